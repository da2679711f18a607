//! Built-in hook implementations.
//!
//! Bundled hook sets that hosts and tests can register directly. Each is a
//! concrete struct implementing [`RegexHooks`].

use std::sync::{Mutex, MutexGuard, PoisonError};

use tracing::debug;

use rehook_core::types::{MatchInfo, MatchState, Node, Pattern};

use crate::hooks::definitions::HookPhase;
use crate::hooks::registry::RegexHooks;

// ---------------------------------------------------------------------------
// Tracing hook: logs every event
// ---------------------------------------------------------------------------

/// Logs every compile and exec event at `debug` level.
#[derive(Debug, Clone)]
pub struct TracingHooks {
    /// Prefix added to every log line.
    pub prefix: String,
}

impl TracingHooks {
    /// Creates a tracing hook with the given log prefix.
    pub fn new(prefix: impl Into<String>) -> Self {
        Self {
            prefix: prefix.into(),
        }
    }
}

impl RegexHooks for TracingHooks {
    fn supports(&self, _phase: HookPhase) -> bool {
        true
    }

    fn on_compile_begin(&self, pattern: &Pattern) -> anyhow::Result<()> {
        debug!(prefix = %self.prefix, pattern = %pattern, "Compiling pattern");
        Ok(())
    }

    fn on_compile_node(&self, pattern: &Pattern, node: &Node) -> anyhow::Result<()> {
        debug!(
            prefix = %self.prefix,
            pattern_id = %pattern.id(),
            node = node.index,
            op = node.op(),
            offset = node.offset,
            "Compiled node"
        );
        Ok(())
    }

    fn on_exec_node(
        &self,
        pattern: &Pattern,
        node: &Node,
        _info: &MatchInfo,
        state: &mut MatchState,
    ) -> anyhow::Result<()> {
        debug!(
            prefix = %self.prefix,
            pattern_id = %pattern.id(),
            node = node.index,
            op = node.op(),
            position = state.position(),
            depth = state.depth(),
            "Visiting node"
        );
        Ok(())
    }
}

// ---------------------------------------------------------------------------
// Recording hook: keeps an event log for inspection
// ---------------------------------------------------------------------------

/// Records events as `"begin"`, `"comp:<OP>"`, and `"exec:<OP>"` strings.
#[derive(Debug)]
pub struct RecordingHooks {
    phases: Vec<HookPhase>,
    events: Mutex<Vec<String>>,
}

impl RecordingHooks {
    /// Records every phase.
    pub fn new() -> Self {
        Self::only(&HookPhase::ALL)
    }

    /// Records only the given phases; the others are reported unsupported.
    pub fn only(phases: &[HookPhase]) -> Self {
        Self {
            phases: phases.to_vec(),
            events: Mutex::new(Vec::new()),
        }
    }

    /// Snapshot of the recorded events.
    pub fn events(&self) -> Vec<String> {
        self.log().clone()
    }

    /// Forgets every recorded event.
    pub fn clear(&self) {
        self.log().clear();
    }

    fn push(&self, event: String) {
        self.log().push(event);
    }

    fn log(&self) -> MutexGuard<'_, Vec<String>> {
        self.events.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

impl Default for RecordingHooks {
    fn default() -> Self {
        Self::new()
    }
}

impl RegexHooks for RecordingHooks {
    fn supports(&self, phase: HookPhase) -> bool {
        self.phases.contains(&phase)
    }

    fn on_compile_begin(&self, _pattern: &Pattern) -> anyhow::Result<()> {
        self.push("begin".to_string());
        Ok(())
    }

    fn on_compile_node(&self, _pattern: &Pattern, node: &Node) -> anyhow::Result<()> {
        self.push(format!("comp:{}", node.op()));
        Ok(())
    }

    fn on_exec_node(
        &self,
        _pattern: &Pattern,
        node: &Node,
        _info: &MatchInfo,
        _state: &mut MatchState,
    ) -> anyhow::Result<()> {
        self.push(format!("exec:{}", node.op()));
        Ok(())
    }
}
