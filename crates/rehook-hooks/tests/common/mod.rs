//! Shared test helpers for integration tests.
//!
//! [`MiniEngine`] is a literal-only regex host: it compiles every character
//! to an `EXACT` node (`.` becomes `REG_ANY`), appends `END`, and matches by
//! retrying from each start offset. It fires hooks through the
//! [`EngineHooks`] strategy it was built with, exactly where a real engine
//! would, and keeps the failures a non-fatal dispatch tolerated.

#![allow(dead_code)]

use std::sync::{Mutex, PoisonError};

use rehook_core::result::RehookResult;
use rehook_core::types::{MatchInfo, MatchState, Node, NodeKind, Pattern};
use rehook_hooks::{DispatchReport, EngineHooks, HookFailure};

/// A compiled program.
pub struct Program {
    /// The pattern handle hooks saw during compilation.
    pub pattern: Pattern,
    /// Nodes in program order, ending with `END`.
    pub nodes: Vec<Node>,
}

/// Literal-only regex host.
pub struct MiniEngine<'h> {
    hooks: &'h dyn EngineHooks,
    failures: Mutex<Vec<HookFailure>>,
}

impl<'h> MiniEngine<'h> {
    /// Creates an engine firing `hooks`.
    pub fn new(hooks: &'h dyn EngineHooks) -> Self {
        Self {
            hooks,
            failures: Mutex::new(Vec::new()),
        }
    }

    /// Hook failures tolerated so far, in dispatch order.
    pub fn failures(&self) -> Vec<HookFailure> {
        self.failures
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }

    fn note(&self, report: DispatchReport) {
        if !report.is_clean() {
            self.failures
                .lock()
                .unwrap_or_else(PoisonError::into_inner)
                .extend(report.failures);
        }
    }

    /// Compiles `pattern`, firing compile-begin then one compile-node per node.
    pub fn compile(&self, pattern: Pattern) -> RehookResult<Program> {
        self.note(self.hooks.compile_begin(&pattern)?);

        let mut nodes = Vec::new();
        for (offset, c) in pattern.source().char_indices() {
            let kind = match c {
                '.' => NodeKind::RegAny,
                c => NodeKind::Exact(c.to_string()),
            };
            let index = nodes.len();
            let node = Node::new(index, kind, offset).with_next(index + 1);
            self.note(self.hooks.compile_node(&pattern, &node)?);
            nodes.push(node);
        }
        let end = Node::new(nodes.len(), NodeKind::End, pattern.source().len());
        self.note(self.hooks.compile_node(&pattern, &end)?);
        nodes.push(end);

        Ok(Program { pattern, nodes })
    }

    /// Finds the first match of `program` in `subject`.
    pub fn exec(&self, program: &Program, subject: &str) -> RehookResult<Option<(usize, usize)>> {
        for start in 0..=subject.len() {
            if !subject.is_char_boundary(start) {
                continue;
            }
            let info = MatchInfo::new(subject, start);
            let mut state = MatchState::new(&info, 1);
            if self.attempt(program, &info, &mut state)? {
                return Ok(Some((start, state.position())));
            }
        }
        Ok(None)
    }

    fn attempt(
        &self,
        program: &Program,
        info: &MatchInfo,
        state: &mut MatchState,
    ) -> RehookResult<bool> {
        for node in &program.nodes {
            self.note(self.hooks.exec_node(&program.pattern, node, info, state)?);
            let rest = info.remaining(state.position());
            match &node.kind {
                NodeKind::Exact(text) => {
                    if !rest.starts_with(text.as_str()) {
                        return Ok(false);
                    }
                    state.advance(text.len())?;
                }
                NodeKind::RegAny => match rest.chars().next() {
                    Some(c) => state.advance(c.len_utf8())?,
                    None => return Ok(false),
                },
                NodeKind::End => {
                    state.set_capture(0, info.start, state.position())?;
                    return Ok(true);
                }
                _ => return Ok(false),
            }
        }
        Ok(false)
    }
}
