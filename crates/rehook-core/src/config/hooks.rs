//! Hook registry and dispatch configuration.

use serde::{Deserialize, Serialize};

/// What the registry does when a key is registered a second time.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DuplicatePolicy {
    /// Refuse the second registration with a `DuplicateKey` error.
    #[default]
    Reject,
    /// Replace the existing entry; lookups see only the newest hooks.
    Replace,
}

impl DuplicatePolicy {
    /// Returns the string name of this policy.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Reject => "reject",
            Self::Replace => "replace",
        }
    }
}

impl std::fmt::Display for DuplicatePolicy {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Hook system configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HooksConfig {
    /// Conflict policy for re-registering an existing key.
    #[serde(default)]
    pub on_duplicate: DuplicatePolicy,
    /// Whether a failing hook aborts the dispatch with an error.
    ///
    /// When `false`, failures are logged and collected in the dispatch
    /// report while the remaining hooks still run.
    #[serde(default = "default_true")]
    pub fatal_errors: bool,
}

impl Default for HooksConfig {
    fn default() -> Self {
        Self {
            on_duplicate: DuplicatePolicy::default(),
            fatal_errors: true,
        }
    }
}

fn default_true() -> bool {
    true
}
