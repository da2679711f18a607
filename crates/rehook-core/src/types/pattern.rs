//! Pattern handle: the regular expression being compiled or executed.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::id::PatternId;

/// Compile-time modifiers of a pattern.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PatternFlags {
    /// `/i`
    pub case_insensitive: bool,
    /// `/m`
    pub multi_line: bool,
    /// `/s`
    pub single_line: bool,
    /// `/x`
    pub extended: bool,
}

impl PatternFlags {
    /// Renders the flags in modifier order, e.g. `"imsx"`.
    pub fn modifiers(&self) -> String {
        let mut out = String::new();
        if self.multi_line {
            out.push('m');
        }
        if self.single_line {
            out.push('s');
        }
        if self.case_insensitive {
            out.push('i');
        }
        if self.extended {
            out.push('x');
        }
        out
    }
}

/// The pattern handle passed to every hook.
///
/// `hook_keys` records which hook keys were enabled when compilation of
/// this pattern began. The same keys are dispatched to during execution,
/// so a compiled pattern keeps the hooks it was compiled with.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Pattern {
    id: PatternId,
    source: String,
    flags: PatternFlags,
    hook_keys: Vec<String>,
    compiled_at: DateTime<Utc>,
}

impl Pattern {
    /// Creates a pattern handle with no hooks attached.
    pub fn new(source: impl Into<String>, flags: PatternFlags) -> Self {
        Self {
            id: PatternId::new(),
            source: source.into(),
            flags,
            hook_keys: Vec::new(),
            compiled_at: Utc::now(),
        }
    }

    /// Attaches the hook keys this pattern dispatches to.
    pub fn with_hook_keys<I, S>(mut self, keys: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.hook_keys = keys.into_iter().map(Into::into).collect();
        self
    }

    /// Returns the pattern identifier.
    pub fn id(&self) -> PatternId {
        self.id
    }

    /// Returns the pattern source text.
    pub fn source(&self) -> &str {
        &self.source
    }

    /// Returns the compile flags.
    pub fn flags(&self) -> PatternFlags {
        self.flags
    }

    /// Returns the hook keys in dispatch order.
    pub fn hook_keys(&self) -> &[String] {
        &self.hook_keys
    }

    /// Returns whether any hooks are attached.
    pub fn has_hooks(&self) -> bool {
        !self.hook_keys.is_empty()
    }

    /// Returns when compilation of this pattern began.
    pub fn compiled_at(&self) -> DateTime<Utc> {
        self.compiled_at
    }
}

impl std::fmt::Display for Pattern {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "/{}/{}", self.source, self.flags.modifiers())
    }
}
