//! Hook registry: extensions register a hook set under a unique key.

use std::sync::Arc;
use std::sync::atomic::{AtomicU64, Ordering};

use chrono::{DateTime, Utc};
use dashmap::DashMap;
use dashmap::mapref::entry::Entry;
use tracing::info;

use rehook_core::config::hooks::DuplicatePolicy;
use rehook_core::error::RehookError;
use rehook_core::result::RehookResult;
use rehook_core::types::{MatchInfo, MatchState, Node, Pattern};

use super::definitions::HookPhase;
use crate::traits::{CompileBeginFn, ExecNodeFn, FnHooks};

/// Capability interface implemented by an extension.
///
/// Every callback is optional: an implementation declares the phases it
/// handles through [`RegexHooks::supports`] and overrides only those
/// methods. The dispatcher never calls a method whose phase is unsupported.
pub trait RegexHooks: Send + Sync + std::fmt::Debug {
    /// Returns whether this hook set handles `phase`.
    fn supports(&self, phase: HookPhase) -> bool;

    /// Called once when compilation of `pattern` starts.
    fn on_compile_begin(&self, _pattern: &Pattern) -> anyhow::Result<()> {
        Ok(())
    }

    /// Called once for every compiled node.
    fn on_compile_node(&self, _pattern: &Pattern, _node: &Node) -> anyhow::Result<()> {
        Ok(())
    }

    /// Called every time the executor visits a node.
    ///
    /// `state` is lent for the duration of the call only.
    fn on_exec_node(
        &self,
        _pattern: &Pattern,
        _node: &Node,
        _info: &MatchInfo,
        _state: &mut MatchState,
    ) -> anyhow::Result<()> {
        Ok(())
    }
}

/// Entry in the hook registry.
#[derive(Debug, Clone)]
pub struct HookEntry {
    key: String,
    hooks: Arc<dyn RegexHooks>,
    sequence: u64,
    registered_at: DateTime<Utc>,
}

impl HookEntry {
    /// The key this entry is registered under.
    pub fn key(&self) -> &str {
        &self.key
    }

    /// The registered hook set.
    pub fn hooks(&self) -> &Arc<dyn RegexHooks> {
        &self.hooks
    }

    /// Registration order of the key within its registry.
    pub fn sequence(&self) -> u64 {
        self.sequence
    }

    /// When the current hook set was registered.
    pub fn registered_at(&self) -> DateTime<Utc> {
        self.registered_at
    }

    /// Returns whether the hook set handles `phase`.
    pub fn supports(&self, phase: HookPhase) -> bool {
        self.hooks.supports(phase)
    }
}

/// Keyed registry of hook sets.
///
/// Lookups are lock-free across shards; registration takes a write lock on
/// a single shard only.
#[derive(Debug)]
pub struct HookRegistry {
    entries: DashMap<String, HookEntry>,
    policy: DuplicatePolicy,
    next_sequence: AtomicU64,
}

impl HookRegistry {
    /// Creates an empty registry that rejects duplicate keys.
    pub fn new() -> Self {
        Self::with_policy(DuplicatePolicy::Reject)
    }

    /// Creates an empty registry with the given duplicate-key policy.
    pub fn with_policy(policy: DuplicatePolicy) -> Self {
        Self {
            entries: DashMap::new(),
            policy,
            next_sequence: AtomicU64::new(0),
        }
    }

    /// Returns the duplicate-key policy.
    pub fn policy(&self) -> DuplicatePolicy {
        self.policy
    }

    /// Registers `hooks` under `key`.
    ///
    /// Under [`DuplicatePolicy::Replace`] a replaced key keeps its original
    /// position in [`HookRegistry::keys`].
    pub fn register(&self, key: &str, hooks: Arc<dyn RegexHooks>) -> RehookResult<()> {
        validate_key(key)?;

        let replaced = match self.entries.entry(key.to_string()) {
            Entry::Occupied(mut occupied) => match self.policy {
                DuplicatePolicy::Reject => {
                    return Err(RehookError::duplicate_key(format!(
                        "Hook key '{key}' is already registered"
                    )));
                }
                DuplicatePolicy::Replace => {
                    let sequence = occupied.get().sequence;
                    occupied.insert(HookEntry {
                        key: key.to_string(),
                        hooks,
                        sequence,
                        registered_at: Utc::now(),
                    });
                    true
                }
            },
            Entry::Vacant(vacant) => {
                vacant.insert(HookEntry {
                    key: key.to_string(),
                    hooks,
                    sequence: self.next_sequence.fetch_add(1, Ordering::Relaxed),
                    registered_at: Utc::now(),
                });
                false
            }
        };

        info!(
            key = %key,
            replaced = replaced,
            policy = %self.policy,
            "Hook set registered"
        );

        Ok(())
    }

    /// Registers a compile-begin callback and an exec callback under `key`.
    ///
    /// Either callback may be absent; the entry then supports only the
    /// phases that were supplied. Per-node compile callbacks go through
    /// [`FnHooks::on_compile_node`].
    pub fn register_fns(
        &self,
        key: &str,
        compile: Option<CompileBeginFn>,
        exec: Option<ExecNodeFn>,
    ) -> RehookResult<()> {
        self.register(key, Arc::new(FnHooks::from_parts(compile, None, exec)))
    }

    /// Looks up the entry for `key`. Absence is not an error.
    pub fn lookup(&self, key: &str) -> Option<HookEntry> {
        self.entries.get(key).map(|entry| entry.value().clone())
    }

    /// Returns whether `key` is registered.
    pub fn contains(&self, key: &str) -> bool {
        self.entries.contains_key(key)
    }

    /// Removes the entry for `key`.
    ///
    /// A dispatch already holding the entry finishes with it.
    pub fn unregister(&self, key: &str) -> Option<HookEntry> {
        let removed = self.entries.remove(key).map(|(_, entry)| entry);
        if removed.is_some() {
            info!(key = %key, "Hook set unregistered");
        }
        removed
    }

    /// Removes every entry and returns how many were dropped.
    ///
    /// Only entries this call actually removed are counted; a key registered
    /// concurrently may survive the call.
    pub fn clear(&self) -> usize {
        let mut removed = 0;
        self.entries.retain(|_, _| {
            removed += 1;
            false
        });
        if removed > 0 {
            info!(removed = removed, "Hook registry cleared");
        }
        removed
    }

    /// Number of registered keys.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Returns whether the registry is empty.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// All registered keys in registration order.
    pub fn keys(&self) -> Vec<String> {
        let mut keyed: Vec<(u64, String)> = self
            .entries
            .iter()
            .map(|entry| (entry.sequence, entry.key().clone()))
            .collect();
        keyed.sort_by_key(|(sequence, _)| *sequence);
        keyed.into_iter().map(|(_, key)| key).collect()
    }
}

impl Default for HookRegistry {
    fn default() -> Self {
        Self::new()
    }
}

fn validate_key(key: &str) -> RehookResult<()> {
    if key.is_empty() {
        return Err(RehookError::invalid_key("Hook key must not be empty"));
    }
    if key.chars().any(|c| c.is_whitespace() || c.is_control()) {
        return Err(RehookError::invalid_key(format!(
            "Hook key '{}' contains whitespace or control characters",
            key.escape_debug()
        )));
    }
    Ok(())
}
