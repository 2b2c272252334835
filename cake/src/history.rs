//! Linear undo/redo history of full snapshots.
//!
//! The history is a bounded list of snapshots plus a cursor. Pushing a value
//! drops everything after the cursor, appends, and evicts the oldest entry
//! once the cap is exceeded. The cursor always addresses a valid entry, so
//! there is always a current value.

#[cfg(test)]
#[path = "history_test.rs"]
mod history_test;

use tracing::debug;

use crate::consts::HISTORY_LIMIT;

#[derive(Debug, Clone)]
pub struct History<T> {
    entries: Vec<T>,
    cursor: usize,
    limit: usize,
}

impl<T: Clone + PartialEq> History<T> {
    /// Start a history holding only `initial`, with the default cap.
    #[must_use]
    pub fn new(initial: T) -> Self {
        Self::with_limit(initial, HISTORY_LIMIT)
    }

    /// Start a history with a custom cap. A cap of zero is treated as one.
    #[must_use]
    pub fn with_limit(initial: T, limit: usize) -> Self {
        Self { entries: vec![initial], cursor: 0, limit: limit.max(1) }
    }

    /// The value at the cursor.
    #[must_use]
    pub fn current(&self) -> &T {
        &self.entries[self.cursor]
    }

    /// Record a new value. Returns false when `value` equals the current
    /// value, in which case nothing changes.
    pub fn push(&mut self, value: T) -> bool {
        if *self.current() == value {
            return false;
        }
        self.entries.truncate(self.cursor + 1);
        self.entries.push(value);
        if self.entries.len() > self.limit {
            let evicted = self.entries.len() - self.limit;
            self.entries.drain(..evicted);
            debug!(evicted, limit = self.limit, "history cap reached; oldest snapshots evicted");
        }
        self.cursor = self.entries.len() - 1;
        true
    }

    /// Step back one entry. Returns false at the oldest entry.
    pub fn undo(&mut self) -> bool {
        if self.cursor == 0 {
            return false;
        }
        self.cursor -= 1;
        true
    }

    /// Step forward one entry. Returns false at the newest entry.
    pub fn redo(&mut self) -> bool {
        if self.cursor + 1 >= self.entries.len() {
            return false;
        }
        self.cursor += 1;
        true
    }

    /// Discard all entries and start over from `value`.
    pub fn reset(&mut self, value: T) {
        self.entries.clear();
        self.entries.push(value);
        self.cursor = 0;
    }

    #[must_use]
    pub fn can_undo(&self) -> bool {
        self.cursor > 0
    }

    #[must_use]
    pub fn can_redo(&self) -> bool {
        self.cursor + 1 < self.entries.len()
    }

    #[must_use]
    pub fn cursor(&self) -> usize {
        self.cursor
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Always false; a history holds at least one entry.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}
