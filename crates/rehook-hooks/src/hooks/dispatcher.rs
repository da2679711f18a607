//! Hook dispatcher: the shim a host pipeline calls at each extension point.
//!
//! For every dispatch call:
//! - The keys attached to the pattern are visited in order.
//! - Keys without a registry entry are recorded as missing and skipped.
//! - Entries that do not support the phase are skipped silently.
//! - Each remaining hook runs exactly once with the caller's arguments.
//!
//! A failing hook either aborts the dispatch with a `HookFailed` error
//! (fatal mode, the default) or is logged and recorded in the report.

use std::sync::Arc;

use tracing::{debug, trace, warn};

use rehook_core::error::RehookError;
use rehook_core::result::RehookResult;
use rehook_core::types::{MatchInfo, MatchState, Node, Pattern};

use super::definitions::{DispatchReport, HookFailure, HookPhase};
use super::registry::{HookRegistry, RegexHooks};

/// Strategy interface a regex host takes at construction time.
///
/// The host calls these at its fixed extension points instead of having
/// its entry points replaced. Every call returns the dispatch report, so
/// failures tolerated in non-fatal mode still reach the host.
pub trait EngineHooks: Send + Sync {
    /// Compilation of `pattern` is starting.
    fn compile_begin(&self, pattern: &Pattern) -> RehookResult<DispatchReport>;

    /// `node` of `pattern` has been compiled.
    fn compile_node(&self, pattern: &Pattern, node: &Node) -> RehookResult<DispatchReport>;

    /// The executor is visiting `node`.
    fn exec_node(
        &self,
        pattern: &Pattern,
        node: &Node,
        info: &MatchInfo,
        state: &mut MatchState,
    ) -> RehookResult<DispatchReport>;
}

/// Host strategy that fires nothing.
#[derive(Debug, Default, Clone, Copy)]
pub struct NoHooks;

impl EngineHooks for NoHooks {
    fn compile_begin(&self, _pattern: &Pattern) -> RehookResult<DispatchReport> {
        Ok(DispatchReport::new(HookPhase::CompileBegin))
    }

    fn compile_node(&self, _pattern: &Pattern, _node: &Node) -> RehookResult<DispatchReport> {
        Ok(DispatchReport::new(HookPhase::CompileNode))
    }

    fn exec_node(
        &self,
        _pattern: &Pattern,
        _node: &Node,
        _info: &MatchInfo,
        _state: &mut MatchState,
    ) -> RehookResult<DispatchReport> {
        Ok(DispatchReport::new(HookPhase::ExecNode))
    }
}

/// Dispatches extension points to the hooks registered for a pattern.
#[derive(Debug)]
pub struct HookDispatcher {
    /// Hook registry.
    registry: Arc<HookRegistry>,
    /// Whether a hook failure aborts the dispatch.
    fatal_errors: bool,
}

impl HookDispatcher {
    /// Creates a dispatcher that propagates hook failures.
    pub fn new(registry: Arc<HookRegistry>) -> Self {
        Self {
            registry,
            fatal_errors: true,
        }
    }

    /// Sets whether hook failures abort the dispatch.
    pub fn with_fatal_errors(mut self, fatal_errors: bool) -> Self {
        self.fatal_errors = fatal_errors;
        self
    }

    /// Returns whether hook failures abort the dispatch.
    pub fn fatal_errors(&self) -> bool {
        self.fatal_errors
    }

    /// Fires the compile-begin hooks of `pattern`.
    pub fn on_compile_begin(&self, pattern: &Pattern) -> RehookResult<DispatchReport> {
        debug!(
            pattern_id = %pattern.id(),
            pattern = %pattern,
            keys = pattern.hook_keys().len(),
            "Dispatching compile_begin"
        );
        self.fire(HookPhase::CompileBegin, pattern, |hooks| {
            hooks.on_compile_begin(pattern)
        })
    }

    /// Fires the per-node compile hooks of `pattern` for `node`.
    pub fn on_compile_node(
        &self,
        pattern: &Pattern,
        node: &Node,
    ) -> RehookResult<DispatchReport> {
        trace!(
            pattern_id = %pattern.id(),
            node = node.index,
            op = node.op(),
            "Dispatching compile_node"
        );
        self.fire(HookPhase::CompileNode, pattern, |hooks| {
            hooks.on_compile_node(pattern, node)
        })
    }

    /// Fires the per-node exec hooks of `pattern` for `node`.
    ///
    /// Each hook receives `state` mutably for the duration of its call only.
    pub fn on_exec_node(
        &self,
        pattern: &Pattern,
        node: &Node,
        info: &MatchInfo,
        state: &mut MatchState,
    ) -> RehookResult<DispatchReport> {
        trace!(
            pattern_id = %pattern.id(),
            node = node.index,
            op = node.op(),
            position = state.position(),
            "Dispatching exec_node"
        );
        self.fire(HookPhase::ExecNode, pattern, |hooks| {
            hooks.on_exec_node(pattern, node, info, state)
        })
    }

    fn fire<F>(
        &self,
        phase: HookPhase,
        pattern: &Pattern,
        mut invoke: F,
    ) -> RehookResult<DispatchReport>
    where
        F: FnMut(&dyn RegexHooks) -> anyhow::Result<()>,
    {
        let mut report = DispatchReport::new(phase);

        for key in pattern.hook_keys() {
            // Cloned out of the map so the shard lock is released before the hook runs.
            let Some(entry) = self.registry.lookup(key) else {
                debug!(key = %key, phase = %phase, "No hooks registered for key");
                report.missing.push(key.clone());
                continue;
            };

            if !entry.supports(phase) {
                continue;
            }

            match invoke(entry.hooks().as_ref()) {
                Ok(()) => report.fired.push(key.clone()),
                Err(e) if self.fatal_errors => {
                    return Err(RehookError::hook_failed(
                        format!("Hook '{key}' failed during {phase}: {e:#}"),
                        e,
                    ));
                }
                Err(e) => {
                    warn!(
                        key = %key,
                        phase = %phase,
                        pattern_id = %pattern.id(),
                        error = %format!("{e:#}"),
                        "Hook failed, continuing"
                    );
                    report.failures.push(HookFailure {
                        key: key.clone(),
                        message: format!("{e:#}"),
                    });
                }
            }
        }

        Ok(report)
    }

    /// Returns a reference to the hook registry.
    pub fn registry(&self) -> &Arc<HookRegistry> {
        &self.registry
    }
}

impl EngineHooks for HookDispatcher {
    fn compile_begin(&self, pattern: &Pattern) -> RehookResult<DispatchReport> {
        self.on_compile_begin(pattern)
    }

    fn compile_node(&self, pattern: &Pattern, node: &Node) -> RehookResult<DispatchReport> {
        self.on_compile_node(pattern, node)
    }

    fn exec_node(
        &self,
        pattern: &Pattern,
        node: &Node,
        info: &MatchInfo,
        state: &mut MatchState,
    ) -> RehookResult<DispatchReport> {
        self.on_exec_node(pattern, node, info, state)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::builtin::RecordingHooks;
    use crate::traits::FnHooks;
    use rehook_core::config::hooks::DuplicatePolicy;
    use rehook_core::error::ErrorKind;
    use rehook_core::types::{NodeKind, PatternFlags};
    use std::sync::Mutex;

    fn setup() -> (Arc<HookRegistry>, HookDispatcher) {
        let registry = Arc::new(HookRegistry::with_policy(DuplicatePolicy::Reject));
        let dispatcher = HookDispatcher::new(registry.clone());
        (registry, dispatcher)
    }

    fn exact(index: usize, text: &str) -> Node {
        Node::new(index, NodeKind::Exact(text.to_string()), index)
    }

    #[test]
    fn test_compile_only_entry_ignores_exec() {
        let (registry, dispatcher) = setup();
        let recorder = Arc::new(RecordingHooks::only(&[HookPhase::CompileBegin]));
        registry.register("A", recorder.clone()).unwrap();

        let pattern = Pattern::new("ab", PatternFlags::default()).with_hook_keys(["A"]);
        let begin = dispatcher.on_compile_begin(&pattern).unwrap();
        assert_eq!(begin.fired, vec!["A".to_string()]);

        let info = MatchInfo::new("ab", 0);
        let mut state = MatchState::new(&info, 0);
        let exec = dispatcher
            .on_exec_node(&pattern, &exact(0, "ab"), &info, &mut state)
            .unwrap();
        assert!(exec.fired.is_empty());
        assert!(exec.is_clean());
        assert_eq!(recorder.events(), vec!["begin".to_string()]);
    }

    #[test]
    fn test_only_scoped_keys_fire() {
        let (registry, dispatcher) = setup();
        let inside = Arc::new(RecordingHooks::new());
        let outside = Arc::new(RecordingHooks::new());
        registry.register("inside", inside.clone()).unwrap();
        registry.register("outside", outside.clone()).unwrap();

        let pattern = Pattern::new("x", PatternFlags::default()).with_hook_keys(["inside"]);
        dispatcher.on_compile_node(&pattern, &exact(0, "x")).unwrap();

        assert_eq!(inside.events(), vec!["comp:EXACT".to_string()]);
        assert!(outside.events().is_empty());
    }

    #[test]
    fn test_missing_key_is_reported_not_an_error() {
        let (_registry, dispatcher) = setup();
        let pattern = Pattern::new("x", PatternFlags::default()).with_hook_keys(["ghost"]);
        let report = dispatcher.on_compile_begin(&pattern).unwrap();
        assert_eq!(report.missing, vec!["ghost".to_string()]);
        assert!(report.fired.is_empty());
    }

    #[test]
    fn test_arguments_pass_through_unmodified() {
        let (registry, dispatcher) = setup();
        let seen: Arc<Mutex<Vec<(String, usize, usize)>>> = Arc::default();
        let sink = seen.clone();
        registry
            .register(
                "spy",
                Arc::new(FnHooks::new().on_exec_node(move |pattern, node, info, state| {
                    sink.lock().unwrap().push((
                        pattern.source().to_string(),
                        node.index,
                        info.start + state.position(),
                    ));
                    Ok(())
                })),
            )
            .unwrap();

        let pattern = Pattern::new("a.c", PatternFlags::default()).with_hook_keys(["spy"]);
        let info = MatchInfo::new("xxabc", 2);
        let mut state = MatchState::new(&info, 0);
        dispatcher
            .on_exec_node(&pattern, &Node::new(1, NodeKind::RegAny, 1), &info, &mut state)
            .unwrap();

        assert_eq!(*seen.lock().unwrap(), vec![("a.c".to_string(), 1, 4)]);
    }

    #[test]
    fn test_fatal_failure_stops_dispatch_and_keeps_registry() {
        let (registry, dispatcher) = setup();
        let after = Arc::new(RecordingHooks::new());
        registry
            .register(
                "boom",
                Arc::new(FnHooks::new().on_exec_node(|_, _, _, _| anyhow::bail!("exec exploded"))),
            )
            .unwrap();
        registry.register("after", after.clone()).unwrap();

        let pattern = Pattern::new("a", PatternFlags::default()).with_hook_keys(["boom", "after"]);
        let info = MatchInfo::new("a", 0);
        let mut state = MatchState::new(&info, 0);
        let err = dispatcher
            .on_exec_node(&pattern, &exact(0, "a"), &info, &mut state)
            .unwrap_err();

        assert_eq!(err.kind, ErrorKind::HookFailed);
        assert!(err.message.contains("boom"));
        assert!(err.message.contains("exec_node"));
        assert!(err.message.contains("exec exploded"));
        assert!(after.events().is_empty());
        assert!(registry.lookup("boom").is_some());
        assert!(registry.lookup("after").is_some());
    }

    #[test]
    fn test_non_fatal_failure_is_recorded() {
        let registry = Arc::new(HookRegistry::new());
        let dispatcher = HookDispatcher::new(registry.clone()).with_fatal_errors(false);
        let after = Arc::new(RecordingHooks::new());
        registry
            .register(
                "boom",
                Arc::new(FnHooks::new().on_compile_begin(|_| anyhow::bail!("bad pattern"))),
            )
            .unwrap();
        registry.register("after", after.clone()).unwrap();

        let pattern = Pattern::new("a", PatternFlags::default()).with_hook_keys(["boom", "after"]);
        let report = dispatcher.on_compile_begin(&pattern).unwrap();

        assert_eq!(report.fired, vec!["after".to_string()]);
        assert_eq!(report.failures.len(), 1);
        assert_eq!(report.failures[0].key, "boom");
        assert_eq!(report.failures[0].message, "bad pattern");
        assert_eq!(after.events(), vec!["begin".to_string()]);
    }

    #[test]
    fn test_hook_may_unregister_itself_during_dispatch() {
        let registry = Arc::new(HookRegistry::new());
        let dispatcher = HookDispatcher::new(registry.clone());
        let handle = registry.clone();
        registry
            .register(
                "once",
                Arc::new(FnHooks::new().on_compile_begin(move |_| {
                    handle.unregister("once");
                    Ok(())
                })),
            )
            .unwrap();

        let pattern = Pattern::new("a", PatternFlags::default()).with_hook_keys(["once"]);
        let first = dispatcher.on_compile_begin(&pattern).unwrap();
        assert_eq!(first.fired, vec!["once".to_string()]);
        let second = dispatcher.on_compile_begin(&pattern).unwrap();
        assert_eq!(second.missing, vec!["once".to_string()]);
    }

    #[test]
    fn test_no_hooks_strategy() {
        let pattern = Pattern::new("a", PatternFlags::default());
        let info = MatchInfo::new("a", 0);
        let mut state = MatchState::new(&info, 0);
        let hooks: &dyn EngineHooks = &NoHooks;
        let begin = hooks.compile_begin(&pattern).unwrap();
        assert_eq!(begin.phase, HookPhase::CompileBegin);
        let exec = hooks.exec_node(&pattern, &exact(0, "a"), &info, &mut state).unwrap();
        assert_eq!(exec.fired_count(), 0);
        assert_eq!(state.position(), 0);
    }

    #[test]
    fn test_strategy_surfaces_non_fatal_failures() {
        let registry = Arc::new(HookRegistry::new());
        let dispatcher = HookDispatcher::new(registry.clone()).with_fatal_errors(false);
        registry
            .register(
                "flaky",
                Arc::new(FnHooks::new().on_exec_node(|_, _, _, _| anyhow::bail!("flaky"))),
            )
            .unwrap();

        let pattern = Pattern::new("a", PatternFlags::default()).with_hook_keys(["flaky"]);
        let info = MatchInfo::new("a", 0);
        let mut state = MatchState::new(&info, 0);
        let hooks: &dyn EngineHooks = &dispatcher;
        let report = hooks
            .exec_node(&pattern, &exact(0, "a"), &info, &mut state)
            .unwrap();

        assert!(!report.is_clean());
        assert_eq!(report.failures[0].key, "flaky");
        assert_eq!(report.failures[0].message, "flaky");
    }
}
