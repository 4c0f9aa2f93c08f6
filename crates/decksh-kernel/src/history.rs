//! Undo/redo history for state-mutating deck commands.
//!
//! A linear sequence of entries plus a cursor. Each entry pairs the
//! command that ran with a deep snapshot of the slide list after it ran;
//! entry 0 is the baseline captured before the first recorded mutation.
//! Recording after an undo discards the redo lineage.

use decksh_types::Slide;

use crate::params::Params;

/// One recorded mutation (or the baseline at index 0).
#[derive(Debug, Clone)]
pub struct HistoryEntry {
    /// Command name, or "baseline" for the seeded initial entry.
    pub command: String,
    /// Decoded parameters the command ran with.
    pub params: Params,
    /// Structural copy of the slide list at this point in history.
    pub snapshot: Vec<Slide>,
}

/// Linear undo/redo history.
///
/// The cursor is always in `[-1, len - 1]`; -1 only while empty.
#[derive(Debug, Default)]
pub struct History {
    entries: Vec<HistoryEntry>,
    cursor: isize,
}

impl History {
    pub fn new() -> Self {
        Self {
            entries: Vec::new(),
            cursor: -1,
        }
    }

    /// Append an entry at the cursor, discarding any redo lineage beyond
    /// it, and advance the cursor to the new entry.
    pub fn record(&mut self, entry: HistoryEntry) {
        self.entries.truncate((self.cursor + 1) as usize);
        self.entries.push(entry);
        self.cursor = self.entries.len() as isize - 1;
    }

    /// Step the cursor back and return the snapshot there.
    ///
    /// Fails (None) at cursor <= 0: the baseline is the oldest reachable
    /// state.
    pub fn back(&mut self) -> Option<Vec<Slide>> {
        if self.cursor <= 0 {
            return None;
        }
        self.cursor -= 1;
        self.entries
            .get(self.cursor as usize)
            .map(|e| e.snapshot.clone())
    }

    /// Step the cursor forward and return the snapshot there.
    ///
    /// Fails (None) when the cursor is already at the last entry.
    pub fn forward(&mut self) -> Option<Vec<Slide>> {
        if self.cursor >= self.entries.len() as isize - 1 {
            return None;
        }
        self.cursor += 1;
        self.entries
            .get(self.cursor as usize)
            .map(|e| e.snapshot.clone())
    }

    pub fn cursor(&self) -> isize {
        self.cursor
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}
