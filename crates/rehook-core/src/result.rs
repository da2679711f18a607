//! Convenience result type alias for rehook.

use crate::error::RehookError;

/// A specialized `Result` type for rehook operations.
pub type RehookResult<T> = Result<T, RehookError>;
