//! Ordered play queue with a cursor
//!
//! The queue is replaced wholesale (single track or whole collection) and
//! afterwards only the cursor moves. Entries are never edited in place.

use crate::error::{PlaybackError, Result};
use crate::types::QueueEntry;
use std::collections::HashSet;

/// Result of moving the cursor forward
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Advance {
    /// Cursor moved to the next entry
    Moved,

    /// Cursor was on the last entry and went back to the first
    Wrapped,

    /// Nothing queued
    Empty,
}

/// Ordered list of entries plus a cursor
///
/// Invariant: `cursor` is `None` exactly when `entries` is empty, and
/// otherwise indexes into `entries`.
#[derive(Debug, Clone, Default)]
pub struct PlaybackQueue {
    entries: Vec<QueueEntry>,
    cursor: Option<usize>,
}

impl PlaybackQueue {
    /// Create new empty queue
    pub fn new() -> Self {
        Self::default()
    }

    /// Replace the queue with a single entry
    pub fn replace_with_single(&mut self, entry: QueueEntry) {
        self.entries = vec![entry];
        self.cursor = Some(0);
    }

    /// Replace the queue with a collection, cursor at `start_index`
    ///
    /// The queue is left untouched if the collection is rejected.
    pub fn replace_with_collection(
        &mut self,
        entries: Vec<QueueEntry>,
        start_index: usize,
    ) -> Result<()> {
        if entries.is_empty() {
            return Err(PlaybackError::EmptyCollection);
        }

        if start_index >= entries.len() {
            return Err(PlaybackError::StartIndexOutOfRange {
                index: start_index,
                len: entries.len(),
            });
        }

        {
            let mut seen = HashSet::with_capacity(entries.len());
            if let Some(dup) = entries.iter().find(|e| !seen.insert(&e.id)) {
                return Err(PlaybackError::DuplicateEntry(dup.id.clone()));
            }
        }

        self.entries = entries;
        self.cursor = Some(start_index);
        Ok(())
    }

    /// Move the cursor forward, wrapping to the first entry at the end
    pub fn advance(&mut self) -> Advance {
        let Some(cursor) = self.cursor else {
            return Advance::Empty;
        };

        if cursor + 1 < self.entries.len() {
            self.cursor = Some(cursor + 1);
            Advance::Moved
        } else {
            self.cursor = Some(0);
            Advance::Wrapped
        }
    }

    /// Move the cursor back one entry
    ///
    /// Returns false (and does nothing) at the first entry or when empty.
    pub fn retreat(&mut self) -> bool {
        match self.cursor {
            Some(cursor) if cursor > 0 => {
                self.cursor = Some(cursor - 1);
                true
            }
            _ => false,
        }
    }

    /// Entry under the cursor
    pub fn current(&self) -> Option<&QueueEntry> {
        self.cursor.and_then(|i| self.entries.get(i))
    }

    /// Cursor position
    pub fn cursor(&self) -> Option<usize> {
        self.cursor
    }

    /// All entries in play order
    pub fn entries(&self) -> &[QueueEntry] {
        &self.entries
    }

    /// Get queue length
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Check if queue is empty
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Check if an entry follows the current one
    pub fn has_next(&self) -> bool {
        self.cursor.is_some_and(|c| c + 1 < self.entries.len())
    }

    /// Check if an entry precedes the current one
    pub fn has_previous(&self) -> bool {
        self.cursor.is_some_and(|c| c > 0)
    }
}
