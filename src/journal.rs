//! Undo log backing the all-or-nothing withdraw region.
//!
//! Frames nest: a re-entrant call opens its own frame inside the caller's,
//! and reverting the outer frame also undoes whatever the inner one committed.

use crate::domain::{AccountId, Amount};

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum JournalEntry {
    /// `None` means the account had no entry yet.
    Balance {
        account: AccountId,
        previous: Option<Amount>,
    },
    TotalHeld(Amount),
    DepositCount(u64),
    WithdrawalCount(u64),
    EventEmitted,
}

/// Position of a frame in the journal; consumed by `commit` or `revert`.
#[derive(Debug)]
#[must_use]
pub struct Checkpoint(usize);

#[derive(Debug, Default)]
pub struct Journal {
    entries: Vec<JournalEntry>,
    depth: usize,
}

impl Journal {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn begin(&mut self) -> Checkpoint {
        self.depth += 1;
        Checkpoint(self.entries.len())
    }

    /// No-op while no frame is open.
    pub fn record(&mut self, entry: JournalEntry) {
        if self.depth > 0 {
            self.entries.push(entry);
        }
    }

    pub fn commit(&mut self, _checkpoint: Checkpoint) {
        self.close();
    }

    /// Returns the entries recorded since `checkpoint`, newest first.
    pub fn revert(&mut self, checkpoint: Checkpoint) -> Vec<JournalEntry> {
        let mut undone = self.entries.split_off(checkpoint.0);
        undone.reverse();
        self.close();
        undone
    }

    pub fn depth(&self) -> usize {
        self.depth
    }

    fn close(&mut self) {
        self.depth = self.depth.saturating_sub(1);
        if self.depth == 0 {
            self.entries.clear();
        }
    }
}
