//! Hook scopes: which keys a pattern dispatches to.
//!
//! A host keeps a [`HookScope`] per compilation context, enabling and
//! disabling keys as extensions request, and attaches the current scope to
//! each pattern when its compilation begins. Exec dispatch later uses the
//! keys captured on the pattern, not the scope as it is at match time.

use serde::{Deserialize, Serialize};

use rehook_core::types::{Pattern, PatternFlags};

use crate::hooks::registry::HookRegistry;

/// Ordered, duplicate-free set of enabled hook keys.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct HookScope {
    keys: Vec<String>,
}

impl HookScope {
    /// Creates an empty scope.
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a scope enabling every key in `registry`, in registration order.
    pub fn all(registry: &HookRegistry) -> Self {
        Self {
            keys: registry.keys(),
        }
    }

    /// Enables `key`. Returns `false` if it was already enabled.
    pub fn enable(&mut self, key: impl Into<String>) -> bool {
        let key = key.into();
        if self.is_enabled(&key) {
            return false;
        }
        self.keys.push(key);
        true
    }

    /// Builder form of [`HookScope::enable`].
    pub fn with(mut self, key: impl Into<String>) -> Self {
        self.enable(key);
        self
    }

    /// Disables `key`. Returns `false` if it was not enabled.
    pub fn disable(&mut self, key: &str) -> bool {
        let before = self.keys.len();
        self.keys.retain(|k| k != key);
        self.keys.len() != before
    }

    /// Returns whether `key` is enabled.
    pub fn is_enabled(&self, key: &str) -> bool {
        self.keys.iter().any(|k| k == key)
    }

    /// Enabled keys in enable order.
    pub fn keys(&self) -> &[String] {
        &self.keys
    }

    /// Number of enabled keys.
    pub fn len(&self) -> usize {
        self.keys.len()
    }

    /// Returns whether no key is enabled.
    pub fn is_empty(&self) -> bool {
        self.keys.is_empty()
    }

    /// Creates a pattern handle carrying this scope's keys.
    pub fn pattern(&self, source: impl Into<String>, flags: PatternFlags) -> Pattern {
        Pattern::new(source, flags).with_hook_keys(self.keys.iter().cloned())
    }
}
