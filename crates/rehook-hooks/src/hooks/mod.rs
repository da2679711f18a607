//! Hook system: registry, dispatcher, and phase definitions.

pub mod definitions;
pub mod dispatcher;
pub mod registry;

pub use definitions::{DispatchReport, HookFailure, HookPhase};
pub use dispatcher::{EngineHooks, HookDispatcher, NoHooks};
pub use registry::{HookEntry, HookRegistry, RegexHooks};
