//! Match handles: read-only attempt info and the executor's mutable state.
//!
//! The executor owns [`MatchState`] and lends `&mut` access to exec hooks for
//! the duration of a single call. Every mutation goes through a checked
//! setter, so a hook can steer the match but cannot leave the state pointing
//! outside the subject, inside a UTF-8 sequence, or holding an inverted
//! capture.

use std::collections::HashMap;
use std::sync::Arc;

use serde::{Deserialize, Serialize};

use crate::error::RehookError;

/// Read-only information about the current match attempt.
#[derive(Debug, Clone)]
pub struct MatchInfo {
    /// The string being matched.
    pub subject: Arc<str>,
    /// Offset where this attempt started.
    pub start: usize,
    /// Offset the match may not extend past.
    pub end: usize,
}

impl MatchInfo {
    /// Creates match info spanning the whole subject from `start`.
    pub fn new(subject: impl Into<Arc<str>>, start: usize) -> Self {
        let subject = subject.into();
        let end = subject.len();
        Self {
            subject,
            start: start.min(end),
            end,
        }
    }

    /// Returns the part of the subject still available from `pos`.
    pub fn remaining(&self, pos: usize) -> &str {
        self.subject.get(pos.min(self.end)..self.end).unwrap_or("")
    }
}

/// A captured byte range.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Capture {
    /// Start offset (inclusive).
    pub start: usize,
    /// End offset (exclusive).
    pub end: usize,
}

/// Mutable executor state during one match attempt.
#[derive(Debug, Clone)]
pub struct MatchState {
    subject: Arc<str>,
    position: usize,
    limit: usize,
    captures: Vec<Option<Capture>>,
    depth: usize,
    scratch: HashMap<String, serde_json::Value>,
}

impl MatchState {
    /// Creates state for an attempt over `info` with `groups` capture groups.
    pub fn new(info: &MatchInfo, groups: usize) -> Self {
        Self {
            subject: info.subject.clone(),
            position: info.start,
            limit: info.end,
            captures: vec![None; groups],
            depth: 0,
            scratch: HashMap::new(),
        }
    }

    /// Current offset in the subject.
    pub fn position(&self) -> usize {
        self.position
    }

    /// Moves the current offset.
    ///
    /// Rejects offsets past the subject end or inside a multi-byte character.
    pub fn set_position(&mut self, position: usize) -> Result<(), RehookError> {
        self.check_offset(position)?;
        self.position = position;
        Ok(())
    }

    /// Advances the current offset by `n` bytes.
    pub fn advance(&mut self, n: usize) -> Result<(), RehookError> {
        self.set_position(self.position.saturating_add(n))
    }

    /// Returns capture group `group`, if set.
    pub fn capture(&self, group: usize) -> Option<Capture> {
        self.captures.get(group).copied().flatten()
    }

    /// Returns all capture slots.
    pub fn captures(&self) -> &[Option<Capture>] {
        &self.captures
    }

    /// Sets capture group `group` to `start..end`.
    pub fn set_capture(&mut self, group: usize, start: usize, end: usize) -> Result<(), RehookError> {
        if group >= self.captures.len() {
            return Err(RehookError::validation(format!(
                "capture group {group} does not exist ({} groups)",
                self.captures.len()
            )));
        }
        if start > end {
            return Err(RehookError::validation(format!(
                "capture range {start}..{end} is inverted"
            )));
        }
        self.check_offset(start)?;
        self.check_offset(end)?;
        self.captures[group] = Some(Capture { start, end });
        Ok(())
    }

    /// Clears capture group `group`. Unknown groups are ignored.
    pub fn clear_capture(&mut self, group: usize) {
        if let Some(slot) = self.captures.get_mut(group) {
            *slot = None;
        }
    }

    /// Current backtracking depth.
    pub fn depth(&self) -> usize {
        self.depth
    }

    /// Records entry into a backtracking frame. Executor-side only.
    pub fn push_frame(&mut self) {
        self.depth += 1;
    }

    /// Records leaving a backtracking frame. Executor-side only.
    pub fn pop_frame(&mut self) {
        self.depth = self.depth.saturating_sub(1);
    }

    /// Hook-owned scratch data carried across node visits.
    pub fn scratch(&self) -> &HashMap<String, serde_json::Value> {
        &self.scratch
    }

    /// Mutable access to the hook scratch data.
    pub fn scratch_mut(&mut self) -> &mut HashMap<String, serde_json::Value> {
        &mut self.scratch
    }

    fn check_offset(&self, offset: usize) -> Result<(), RehookError> {
        if offset > self.limit {
            return Err(RehookError::validation(format!(
                "offset {offset} is past the subject end {}",
                self.limit
            )));
        }
        if !self.subject.is_char_boundary(offset) {
            return Err(RehookError::validation(format!(
                "offset {offset} is inside a multi-byte character"
            )));
        }
        Ok(())
    }
}
