//! Hook phases and dispatch results.

use serde::{Deserialize, Serialize};

/// The extension points a host pipeline fires.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum HookPhase {
    /// Compilation of a pattern is starting. Fired once per pattern.
    CompileBegin,
    /// A node has been compiled. Fired once per node, in program order.
    CompileNode,
    /// The executor visited a node. May fire repeatedly under backtracking.
    ExecNode,
}

impl HookPhase {
    /// All phases in protocol order.
    pub const ALL: [HookPhase; 3] = [Self::CompileBegin, Self::CompileNode, Self::ExecNode];

    /// Returns the string name of this phase.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::CompileBegin => "compile_begin",
            Self::CompileNode => "compile_node",
            Self::ExecNode => "exec_node",
        }
    }

    /// Returns whether this phase runs while compiling.
    pub fn is_compile_phase(&self) -> bool {
        matches!(self, Self::CompileBegin | Self::CompileNode)
    }
}

impl std::fmt::Display for HookPhase {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// A hook failure tolerated by a non-fatal dispatch.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HookFailure {
    /// Key of the failing entry.
    pub key: String,
    /// Rendered error chain.
    pub message: String,
}

/// Outcome of one dispatch call.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DispatchReport {
    /// The phase that was dispatched.
    pub phase: HookPhase,
    /// Keys whose hook ran successfully, in invocation order.
    pub fired: Vec<String>,
    /// Scoped keys with no registry entry.
    pub missing: Vec<String>,
    /// Failures logged instead of propagated.
    pub failures: Vec<HookFailure>,
}

impl DispatchReport {
    /// Creates an empty report for `phase`.
    pub fn new(phase: HookPhase) -> Self {
        Self {
            phase,
            fired: Vec::new(),
            missing: Vec::new(),
            failures: Vec::new(),
        }
    }

    /// Number of hooks that ran successfully.
    pub fn fired_count(&self) -> usize {
        self.fired.len()
    }

    /// Returns true when no hook failed.
    pub fn is_clean(&self) -> bool {
        self.failures.is_empty()
    }
}
