//! Prelude for convenient imports.

pub use rehook_core::error::{ErrorKind, RehookError};
pub use rehook_core::result::RehookResult;
pub use rehook_core::types::{
    Capture, MatchInfo, MatchState, Node, NodeKind, Pattern, PatternFlags, PatternId,
};

pub use crate::builtin::{RecordingHooks, TracingHooks};
pub use crate::hooks::definitions::{DispatchReport, HookFailure, HookPhase};
pub use crate::hooks::dispatcher::{EngineHooks, HookDispatcher, NoHooks};
pub use crate::hooks::registry::{HookEntry, HookRegistry, RegexHooks};
pub use crate::manager::HookHost;
pub use crate::scope::HookScope;
pub use crate::traits::{CompileBeginFn, CompileNodeFn, ExecNodeFn, FnHooks};
