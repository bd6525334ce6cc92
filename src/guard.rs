//! Runaway-pagination detection
//!
//! Some wikis hand back a continuation cursor that never advances, replaying
//! the same records forever. The guard notices repeats across pages of one
//! list and ends that list's enumeration early.

use std::collections::HashSet;

/// Tracks record keys across the pages of one list
///
/// A repeat shows up as the unique-key set growing slower than the total
/// count of recorded keys. URLs already emitted for a repeated record are
/// deliberately not retracted; ending the list is the only intervention.
#[derive(Debug, Default)]
pub struct LoopGuard {
    seen: HashSet<String>,
    total: usize,
}

impl LoopGuard {
    /// Create an empty guard for a fresh list
    pub fn new() -> Self {
        Self::default()
    }

    /// Record one emitted key
    pub fn record(&mut self, key: &str) {
        self.seen.insert(key.to_string());
        self.total += 1;
    }

    /// Whether any key has repeated since the guard was created or deduplicated
    pub fn looped(&self) -> bool {
        self.seen.len() < self.total
    }

    /// Collapse the running total onto the unique set, clearing the loop signal
    pub fn dedupe(&mut self) {
        self.total = self.seen.len();
    }
}
