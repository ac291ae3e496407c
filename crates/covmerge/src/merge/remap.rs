//! File identifier bookkeeping for one merge run
//!
//! - [`RemapTable`]: per-namespace map from an input file uid to the uid the
//!   file ended up with in the merged report.
//! - [`UidAllocator`]: the single run-wide file uid counter.

use crate::result::{MergeError, MergeResult};
use std::collections::{HashMap, HashSet};

/// Input uid to merged uid, scoped by namespace (module path)
#[derive(Debug, Clone, Default)]
pub struct RemapTable {
    namespaces: HashMap<String, HashMap<u32, u32>>,
}

impl RemapTable {
    /// Create an empty table
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Record that `old_uid` in `namespace` now refers to `new_uid`
    pub fn record(&mut self, namespace: &str, old_uid: u32, new_uid: u32) {
        let _ = self
            .namespaces
            .entry(namespace.to_string())
            .or_default()
            .insert(old_uid, new_uid);
    }

    /// Look up the merged uid for `old_uid` in `namespace`
    #[must_use]
    pub fn resolve(&self, namespace: &str, old_uid: u32) -> Option<u32> {
        self.namespaces
            .get(namespace)
            .and_then(|uids| uids.get(&old_uid))
            .copied()
    }

    /// A read-only view of one namespace
    #[must_use]
    pub fn resolver<'a>(&'a self, namespace: &'a str) -> UidResolver<'a> {
        UidResolver {
            table: self,
            namespace,
        }
    }

    /// Total number of recorded mappings across all namespaces
    #[must_use]
    pub fn len(&self) -> usize {
        self.namespaces.values().map(HashMap::len).sum()
    }

    /// Whether no mapping has been recorded
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

/// Resolves file references for one namespace
#[derive(Debug, Clone, Copy)]
pub struct UidResolver<'a> {
    table: &'a RemapTable,
    namespace: &'a str,
}

impl UidResolver<'_> {
    /// Merged uid for `uid`, or `uid` itself when no mapping exists
    #[must_use]
    pub fn translate(&self, uid: u32) -> u32 {
        self.table.resolve(self.namespace, uid).unwrap_or(uid)
    }

    /// Translate an optional reference
    #[must_use]
    pub fn translate_ref(&self, uid: Option<u32>) -> Option<u32> {
        uid.map(|uid| self.translate(uid))
    }

    /// Namespace this resolver reads from
    #[must_use]
    pub const fn namespace(&self) -> &str {
        self.namespace
    }
}

/// Hands out file uids that are unique across the merged report
///
/// The counter starts at 1 and always stays above every uid handed out or
/// claimed, so [`UidAllocator::fresh`] never collides. Past `u32::MAX` it
/// fails instead of wrapping.
#[derive(Debug, Clone)]
pub struct UidAllocator {
    next: u32,
    used: HashSet<u32>,
}

impl Default for UidAllocator {
    fn default() -> Self {
        Self {
            next: 1,
            used: HashSet::new(),
        }
    }
}

impl UidAllocator {
    /// Create an allocator starting at uid 1
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Take the next unused uid
    ///
    /// # Errors
    ///
    /// Returns [`MergeError::UidSpaceExhausted`] once every uid above the
    /// highest claimed one is taken
    pub fn fresh(&mut self) -> MergeResult<u32> {
        let mut candidate = self.next;
        while self.used.contains(&candidate) {
            candidate = candidate
                .checked_add(1)
                .ok_or(MergeError::UidSpaceExhausted { highest: candidate })?;
        }
        let _ = self.used.insert(candidate);
        self.next = candidate.saturating_add(1);
        Ok(candidate)
    }

    /// Keep an existing uid if nobody has it yet
    ///
    /// Returns `false` when the uid is already in use.
    pub fn claim(&mut self, uid: u32) -> bool {
        if !self.used.insert(uid) {
            return false;
        }
        self.next = self.next.max(uid.saturating_add(1));
        true
    }

    /// The uid the next call to [`UidAllocator::fresh`] returns
    #[must_use]
    pub const fn peek(&self) -> u32 {
        self.next
    }
}
