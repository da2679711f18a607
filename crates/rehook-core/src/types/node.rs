//! Node handle: one compiled unit of a pattern program.

use serde::{Deserialize, Serialize};

/// Opcode of a compiled node.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum NodeKind {
    /// Literal string.
    Exact(String),
    /// One alternative of an alternation.
    Branch,
    /// Greedy `*` over a simple node.
    Star,
    /// Greedy `+` over a simple node.
    Plus,
    /// Counted repetition `{min,max}`.
    Curly {
        /// Minimum repetitions.
        min: u32,
        /// Maximum repetitions, `None` for unbounded.
        max: Option<u32>,
    },
    /// Start of capture group `n`.
    Open(u32),
    /// End of capture group `n`.
    Close(u32),
    /// Start-of-line anchor.
    Bol,
    /// End-of-line anchor.
    Eol,
    /// `.`
    RegAny,
    /// Character class.
    AnyOf,
    /// No-op placeholder.
    Nothing,
    /// Return from a sub-program.
    Succeed,
    /// End of the program.
    End,
    /// Any opcode the host does not name.
    Other(u8),
}

impl NodeKind {
    /// Returns the opcode name.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Exact(_) => "EXACT",
            Self::Branch => "BRANCH",
            Self::Star => "STAR",
            Self::Plus => "PLUS",
            Self::Curly { .. } => "CURLY",
            Self::Open(_) => "OPEN",
            Self::Close(_) => "CLOSE",
            Self::Bol => "BOL",
            Self::Eol => "EOL",
            Self::RegAny => "REG_ANY",
            Self::AnyOf => "ANYOF",
            Self::Nothing => "NOTHING",
            Self::Succeed => "SUCCEED",
            Self::End => "END",
            Self::Other(_) => "OTHER",
        }
    }
}

impl std::fmt::Display for NodeKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// The node handle passed to per-node hooks.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Node {
    /// Position of the node in the compiled program.
    pub index: usize,
    /// The node opcode.
    pub kind: NodeKind,
    /// Byte offset in the pattern source that produced this node.
    pub offset: usize,
    /// Index of the following node, `None` at the end of the program.
    pub next: Option<usize>,
}

impl Node {
    /// Creates a node.
    pub fn new(index: usize, kind: NodeKind, offset: usize) -> Self {
        Self {
            index,
            kind,
            offset,
            next: None,
        }
    }

    /// Sets the following node.
    pub fn with_next(mut self, next: usize) -> Self {
        self.next = Some(next);
        self
    }

    /// Returns the opcode name.
    pub fn op(&self) -> &'static str {
        self.kind.as_str()
    }
}
