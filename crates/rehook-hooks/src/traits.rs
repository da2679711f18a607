//! Closure-based hook sets for quick registration.

use std::sync::Arc;

use rehook_core::types::{MatchInfo, MatchState, Node, Pattern};

use crate::hooks::definitions::HookPhase;
use crate::hooks::registry::RegexHooks;

/// Callback fired when compilation of a pattern starts.
pub type CompileBeginFn = Arc<dyn Fn(&Pattern) -> anyhow::Result<()> + Send + Sync>;

/// Callback fired for every compiled node.
pub type CompileNodeFn = Arc<dyn Fn(&Pattern, &Node) -> anyhow::Result<()> + Send + Sync>;

/// Callback fired for every executor node visit.
pub type ExecNodeFn = Arc<
    dyn Fn(&Pattern, &Node, &MatchInfo, &mut MatchState) -> anyhow::Result<()> + Send + Sync,
>;

/// A hook set assembled from closures.
///
/// Only the phases with a closure attached are reported as supported.
///
/// ```rust,ignore
/// let hooks = FnHooks::new()
///     .on_compile_node(|_pattern, node| {
///         println!("compiled {}", node.op());
///         Ok(())
///     });
/// registry.register("my-ext", Arc::new(hooks))?;
/// ```
#[derive(Clone, Default)]
pub struct FnHooks {
    compile_begin: Option<CompileBeginFn>,
    compile_node: Option<CompileNodeFn>,
    exec_node: Option<ExecNodeFn>,
}

impl std::fmt::Debug for FnHooks {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("FnHooks")
            .field("compile_begin", &self.compile_begin.is_some())
            .field("compile_node", &self.compile_node.is_some())
            .field("exec_node", &self.exec_node.is_some())
            .finish()
    }
}

impl FnHooks {
    /// Creates a hook set with no callbacks.
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a hook set from already boxed callbacks.
    pub fn from_parts(
        compile_begin: Option<CompileBeginFn>,
        compile_node: Option<CompileNodeFn>,
        exec_node: Option<ExecNodeFn>,
    ) -> Self {
        Self {
            compile_begin,
            compile_node,
            exec_node,
        }
    }

    /// Sets the compile-begin callback.
    pub fn on_compile_begin<F>(mut self, f: F) -> Self
    where
        F: Fn(&Pattern) -> anyhow::Result<()> + Send + Sync + 'static,
    {
        self.compile_begin = Some(Arc::new(f));
        self
    }

    /// Sets the per-node compile callback.
    pub fn on_compile_node<F>(mut self, f: F) -> Self
    where
        F: Fn(&Pattern, &Node) -> anyhow::Result<()> + Send + Sync + 'static,
    {
        self.compile_node = Some(Arc::new(f));
        self
    }

    /// Sets the per-node exec callback.
    pub fn on_exec_node<F>(mut self, f: F) -> Self
    where
        F: Fn(&Pattern, &Node, &MatchInfo, &mut MatchState) -> anyhow::Result<()>
            + Send
            + Sync
            + 'static,
    {
        self.exec_node = Some(Arc::new(f));
        self
    }
}

impl RegexHooks for FnHooks {
    fn supports(&self, phase: HookPhase) -> bool {
        match phase {
            HookPhase::CompileBegin => self.compile_begin.is_some(),
            HookPhase::CompileNode => self.compile_node.is_some(),
            HookPhase::ExecNode => self.exec_node.is_some(),
        }
    }

    fn on_compile_begin(&self, pattern: &Pattern) -> anyhow::Result<()> {
        match &self.compile_begin {
            Some(f) => f(pattern),
            None => Ok(()),
        }
    }

    fn on_compile_node(&self, pattern: &Pattern, node: &Node) -> anyhow::Result<()> {
        match &self.compile_node {
            Some(f) => f(pattern, node),
            None => Ok(()),
        }
    }

    fn on_exec_node(
        &self,
        pattern: &Pattern,
        node: &Node,
        info: &MatchInfo,
        state: &mut MatchState,
    ) -> anyhow::Result<()> {
        match &self.exec_node {
            Some(f) => f(pattern, node, info, state),
            None => Ok(()),
        }
    }
}
