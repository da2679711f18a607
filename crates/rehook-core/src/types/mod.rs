//! Handle types passed from the host pipeline to hooks.

pub mod id;
pub mod matching;
pub mod node;
pub mod pattern;

pub use id::PatternId;
pub use matching::{Capture, MatchInfo, MatchState};
pub use node::{Node, NodeKind};
pub use pattern::{Pattern, PatternFlags};
