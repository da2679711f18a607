//! Configuration schemas.
//!
//! The root [`RehookConfig`] is deserialized via the `config` crate from a
//! TOML file merged with `REHOOK__`-prefixed environment variables.

pub mod hooks;
pub mod logging;

use serde::{Deserialize, Serialize};
use tracing::info;

use self::hooks::HooksConfig;
use self::logging::LoggingConfig;

use crate::error::RehookError;

/// Root configuration.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct RehookConfig {
    /// Registry and dispatch settings.
    #[serde(default)]
    pub hooks: HooksConfig,
    /// Logging settings.
    #[serde(default)]
    pub logging: LoggingConfig,
}

impl RehookConfig {
    /// Load configuration from a TOML file.
    ///
    /// The file is optional; environment variables such as
    /// `REHOOK__HOOKS__FATAL_ERRORS=false` override values from it.
    pub fn load(path: &str) -> Result<Self, RehookError> {
        let config = config::Config::builder()
            .add_source(config::File::with_name(path).required(false))
            .add_source(
                config::Environment::with_prefix("REHOOK")
                    .prefix_separator("__")
                    .separator("__")
                    .try_parsing(true),
            )
            .build()
            .map_err(|e| RehookError::configuration(format!("Failed to build config: {e}")))?;

        let loaded: Self = config
            .try_deserialize()
            .map_err(|e| RehookError::configuration(format!("Failed to deserialize config: {e}")))?;

        info!(
            path = %path,
            on_duplicate = %loaded.hooks.on_duplicate,
            fatal_errors = loaded.hooks.fatal_errors,
            "Configuration loaded"
        );
        Ok(loaded)
    }

    /// Parse configuration from an in-memory TOML document.
    pub fn from_toml_str(source: &str) -> Result<Self, RehookError> {
        let config = config::Config::builder()
            .add_source(config::File::from_str(source, config::FileFormat::Toml))
            .build()?;

        Ok(config.try_deserialize()?)
    }
}
