//! Hook host: the per-pipeline context owning registry and dispatcher.

use std::sync::Arc;

use tracing::info;

use rehook_core::config::RehookConfig;
use rehook_core::config::hooks::HooksConfig;
use rehook_core::error::RehookError;
use rehook_core::result::RehookResult;
use rehook_core::types::{Pattern, PatternFlags};

use crate::hooks::dispatcher::{EngineHooks, HookDispatcher};
use crate::hooks::registry::{HookEntry, HookRegistry, RegexHooks};
use crate::scope::HookScope;
use crate::traits::{CompileBeginFn, ExecNodeFn};

/// Owns the hook registry and dispatcher of one compiler/executor instance.
///
/// Created when the host pipeline is constructed and shut down with it;
/// nothing here is process-global.
#[derive(Debug)]
pub struct HookHost {
    /// Hook registry.
    registry: Arc<HookRegistry>,
    /// Hook dispatcher.
    dispatcher: Arc<HookDispatcher>,
}

impl HookHost {
    /// Creates a host from hook configuration.
    pub fn new(config: &HooksConfig) -> Self {
        let registry = Arc::new(HookRegistry::with_policy(config.on_duplicate));
        let dispatcher =
            Arc::new(HookDispatcher::new(registry.clone()).with_fatal_errors(config.fatal_errors));

        info!(
            on_duplicate = %config.on_duplicate,
            fatal_errors = config.fatal_errors,
            "Hook host initialized"
        );

        Self {
            registry,
            dispatcher,
        }
    }

    /// Creates a host from the root configuration.
    pub fn from_config(config: &RehookConfig) -> Self {
        Self::new(&config.hooks)
    }

    /// Registers a hook set under `key`.
    pub fn register(&self, key: &str, hooks: Arc<dyn RegexHooks>) -> RehookResult<()> {
        self.registry.register(key, hooks)
    }

    /// Registers a compile-begin callback and an exec callback under `key`.
    pub fn register_fns(
        &self,
        key: &str,
        compile: Option<CompileBeginFn>,
        exec: Option<ExecNodeFn>,
    ) -> RehookResult<()> {
        self.registry.register_fns(key, compile, exec)
    }

    /// Looks up the entry for `key`.
    pub fn lookup(&self, key: &str) -> Option<HookEntry> {
        self.registry.lookup(key)
    }

    /// Looks up the entry for `key`, failing with `NotFound` when absent.
    pub fn require(&self, key: &str) -> RehookResult<HookEntry> {
        self.registry
            .lookup(key)
            .ok_or_else(|| RehookError::not_found(format!("No hooks registered for key '{key}'")))
    }

    /// Removes the entry for `key`.
    pub fn unregister(&self, key: &str) -> Option<HookEntry> {
        self.registry.unregister(key)
    }

    /// Returns an empty scope.
    pub fn scope(&self) -> HookScope {
        HookScope::new()
    }

    /// Returns a scope enabling every registered key.
    pub fn scope_all(&self) -> HookScope {
        HookScope::all(&self.registry)
    }

    /// Creates the handle for a pattern about to be compiled under `scope`.
    pub fn begin_pattern(
        &self,
        source: impl Into<String>,
        flags: PatternFlags,
        scope: &HookScope,
    ) -> Pattern {
        scope.pattern(source, flags)
    }

    /// Returns the hook dispatcher the host pipeline fires through.
    pub fn dispatcher(&self) -> &Arc<HookDispatcher> {
        &self.dispatcher
    }

    /// Returns the dispatcher as the strategy a host pipeline is built with.
    pub fn engine_hooks(&self) -> &dyn EngineHooks {
        &*self.dispatcher
    }

    /// Returns the hook registry.
    pub fn registry(&self) -> &Arc<HookRegistry> {
        &self.registry
    }

    /// Drops every registered hook set. Returns how many were removed.
    pub fn shutdown(&self) -> usize {
        let removed = self.registry.clear();
        info!(removed = removed, "Hook host shut down");
        removed
    }
}

impl Default for HookHost {
    fn default() -> Self {
        Self::new(&HooksConfig::default())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::builtin::RecordingHooks;
    use rehook_core::config::hooks::DuplicatePolicy;
    use rehook_core::error::ErrorKind;

    #[test]
    fn test_host_applies_config() {
        let config = RehookConfig::from_toml_str(
            "[hooks]\non_duplicate = \"replace\"\nfatal_errors = false\n",
        )
        .unwrap();
        let host = HookHost::from_config(&config);
        assert_eq!(host.registry().policy(), DuplicatePolicy::Replace);
        assert!(!host.dispatcher().fatal_errors());
    }

    #[test]
    fn test_default_host_rejects_duplicates() {
        let host = HookHost::default();
        host.register("A", Arc::new(RecordingHooks::new())).unwrap();
        let err = host.register("A", Arc::new(RecordingHooks::new())).unwrap_err();
        assert_eq!(err.kind, ErrorKind::DuplicateKey);
    }

    #[test]
    fn test_begin_pattern_uses_scope() {
        let host = HookHost::default();
        host.register("A", Arc::new(RecordingHooks::new())).unwrap();
        host.register("B", Arc::new(RecordingHooks::new())).unwrap();

        let scoped = host.begin_pattern("x", PatternFlags::default(), &host.scope().with("B"));
        assert_eq!(scoped.hook_keys(), ["B".to_string()]);

        let all = host.begin_pattern("x", PatternFlags::default(), &host.scope_all());
        assert_eq!(all.hook_keys(), ["A".to_string(), "B".to_string()]);
    }

    #[test]
    fn test_require_reports_missing_key() {
        let host = HookHost::default();
        host.register("A", Arc::new(RecordingHooks::new())).unwrap();
        assert_eq!(host.require("A").unwrap().key(), "A");

        let err = host.require("B").unwrap_err();
        assert_eq!(err.kind, ErrorKind::NotFound);
        assert!(err.message.contains("'B'"));
    }

    #[test]
    fn test_shutdown_clears_registry() {
        let host = HookHost::default();
        host.register("A", Arc::new(RecordingHooks::new())).unwrap();
        host.register("B", Arc::new(RecordingHooks::new())).unwrap();
        assert_eq!(host.shutdown(), 2);
        assert!(host.lookup("A").is_none());
        assert!(host.registry().is_empty());
    }
}
