//! # rehook-core
//!
//! Core crate for rehook. Contains the unified error system, configuration
//! schemas, logging initialisation, and the handle types a regex host
//! pipeline passes to hooks (patterns, nodes, match info, and match state).
//!
//! This crate has **no** internal dependencies on other rehook crates.

pub mod config;
pub mod error;
pub mod logging;
pub mod result;
pub mod types;

pub use error::{ErrorKind, RehookError};
pub use result::RehookResult;
