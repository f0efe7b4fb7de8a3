//! Bounded undo/redo history of full-content snapshots.

use std::collections::VecDeque;

use tracing::debug;

use crate::cursor::Cursor;
use crate::error::EditorError;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HistoryEntry {
    pub content: String,
    pub cursor: Cursor,
}

/// Linear snapshot history with a current-position pointer.
///
/// Once the first snapshot is taken `pos` always indexes a live entry.
/// Entries after `pos` form the redo future and are discarded by the next
/// [`History::save`].
#[derive(Debug, Clone)]
pub struct History {
    entries: VecDeque<HistoryEntry>,
    pos: usize,
    max_entries: usize,
}

impl History {
    pub fn new(max_entries: usize) -> Self {
        Self {
            entries: VecDeque::new(),
            pos: 0,
            max_entries: max_entries.max(1),
        }
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn position(&self) -> usize {
        self.pos
    }

    pub fn max_entries(&self) -> usize {
        self.max_entries
    }

    pub fn current(&self) -> Option<&HistoryEntry> {
        self.entries.get(self.pos)
    }

    pub fn set_max_entries(&mut self, max_entries: usize) {
        self.max_entries = max_entries.max(1);
        self.evict();
    }

    pub fn clear(&mut self) {
        self.entries.clear();
        self.pos = 0;
    }

    /// Records `content`/`cursor` as the newest change.
    ///
    /// Identical content only refreshes the cursor of the current entry.
    pub fn save(&mut self, content: String, cursor: Cursor) {
        if !self.entries.is_empty() {
            self.entries.truncate(self.pos + 1);
            if let Some(current) = self.entries.get_mut(self.pos)
                && current.content == content
            {
                current.cursor = cursor;
                return;
            }
        }

        self.entries.push_back(HistoryEntry { content, cursor });
        self.pos = self.entries.len() - 1;
        self.evict();
    }

    fn evict(&mut self) {
        let excess = self.entries.len().saturating_sub(self.max_entries);
        if excess == 0 {
            return;
        }
        self.entries.drain(..excess);
        self.pos = self.pos.saturating_sub(excess);
        debug!(evicted = excess, kept = self.entries.len(), "history trimmed");
    }

    /// Steps back one entry and returns it.
    pub fn undo(&mut self) -> Result<&HistoryEntry, EditorError> {
        if self.pos == 0 || self.entries.is_empty() {
            return Err(EditorError::AlreadyAtOldestChange);
        }
        self.pos -= 1;
        self.entries
            .get(self.pos)
            .ok_or(EditorError::AlreadyAtOldestChange)
    }

    /// Steps forward one entry and returns it.
    pub fn redo(&mut self) -> Result<&HistoryEntry, EditorError> {
        if self.pos + 1 >= self.entries.len() {
            return Err(EditorError::AlreadyAtNewestChange);
        }
        self.pos += 1;
        self.entries
            .get(self.pos)
            .ok_or(EditorError::AlreadyAtNewestChange)
    }
}
