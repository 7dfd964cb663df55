//! Linear undo/redo history.
//!
//! An ordered list of snapshots plus an index. Recording after an undo drops
//! the redoable tail; there is no branching, no coalescing of rapid edits, and
//! no capacity bound.

/// Snapshot history with a cursor into it.
///
/// Invariant: `index < entries.len()` at all times, and the entry at `index`
/// is the current state.
#[derive(Debug, Clone)]
pub struct History<T> {
    entries: Vec<T>,
    index: usize,
}

impl<T: Clone> History<T> {
    /// Start a one-entry history holding `initial`.
    pub fn new(initial: T) -> Self {
        Self {
            entries: vec![initial],
            index: 0,
        }
    }

    /// Append `snapshot` after discarding everything past the current entry.
    pub fn record(&mut self, snapshot: T) {
        self.entries.truncate(self.index + 1);
        self.entries.push(snapshot);
        self.index = self.entries.len() - 1;
    }

    /// Step back one entry. Returns `None` at the oldest entry.
    pub fn undo(&mut self) -> Option<&T> {
        if self.index == 0 {
            return None;
        }
        self.index -= 1;
        self.entries.get(self.index)
    }

    /// Step forward one entry. Returns `None` when nothing is redoable.
    pub fn redo(&mut self) -> Option<&T> {
        if self.index + 1 >= self.entries.len() {
            return None;
        }
        self.index += 1;
        self.entries.get(self.index)
    }

    /// Drop every entry and start over from `initial`.
    pub fn reset(&mut self, initial: T) {
        self.entries.clear();
        self.entries.push(initial);
        self.index = 0;
    }

    /// The entry the index points at.
    pub fn current(&self) -> &T {
        &self.entries[self.index]
    }

    pub const fn can_undo(&self) -> bool {
        self.index > 0
    }

    pub fn can_redo(&self) -> bool {
        self.index + 1 < self.entries.len()
    }

    pub const fn index(&self) -> usize {
        self.index
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Always `false`; a history holds at least one entry.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}
