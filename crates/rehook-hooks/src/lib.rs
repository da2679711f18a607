//! # rehook-hooks
//!
//! Hook framework for regex compiler/executor pipelines. Provides:
//!
//! - A keyed hook registry with a configurable duplicate-key policy
//! - A dispatch shim for the compile-begin, compile-node, and exec-node
//!   extension points, exposed to hosts through the [`EngineHooks`] strategy
//! - Hook scopes selecting which keys a pattern dispatches to
//! - A host context tying registry and dispatcher to one pipeline instance
//! - Closure-based and built-in hook implementations

pub mod builtin;
pub mod hooks;
pub mod manager;
pub mod prelude;
pub mod scope;
pub mod traits;

pub use builtin::{RecordingHooks, TracingHooks};
pub use hooks::definitions::{DispatchReport, HookFailure, HookPhase};
pub use hooks::dispatcher::{EngineHooks, HookDispatcher, NoHooks};
pub use hooks::registry::{HookEntry, HookRegistry, RegexHooks};
pub use manager::HookHost;
pub use scope::HookScope;
pub use traits::FnHooks;
