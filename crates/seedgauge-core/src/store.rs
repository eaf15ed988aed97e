//! Last-seen cumulative transfer totals keyed by torrent identity.
//!
//! # Design
//! - Owned by the poll loop and passed to the reconciler by `&mut`; there is no shared handle.
//! - Entries are never evicted. Torrents that disappear stop being updated and their
//!   totals stay resident for the life of the process.

use std::collections::HashMap;

/// Cumulative byte totals observed for one torrent.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct CounterTotals {
    /// Cumulative bytes downloaded.
    pub downloaded: u64,
    /// Cumulative bytes uploaded.
    pub uploaded: u64,
}

impl CounterTotals {
    /// Build a totals pair.
    #[must_use]
    pub const fn new(downloaded: u64, uploaded: u64) -> Self {
        Self {
            downloaded,
            uploaded,
        }
    }
}

/// In-memory map from torrent identity to its last recorded totals.
#[derive(Debug, Default)]
pub struct CounterStore {
    totals: HashMap<String, CounterTotals>,
}

impl CounterStore {
    /// Create an empty store.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Last recorded totals for `identity`, or `None` if it was never seen.
    #[must_use]
    pub fn get(&self, identity: &str) -> Option<CounterTotals> {
        self.totals.get(identity).copied()
    }

    /// Insert or overwrite the totals recorded for `identity`.
    pub fn set(&mut self, identity: &str, totals: CounterTotals) {
        if let Some(existing) = self.totals.get_mut(identity) {
            *existing = totals;
        } else {
            self.totals.insert(identity.to_string(), totals);
        }
    }

    /// Number of identities tracked.
    #[must_use]
    pub fn len(&self) -> usize {
        self.totals.len()
    }

    /// Whether no identity has been recorded yet.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.totals.is_empty()
    }
}
