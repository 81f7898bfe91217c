//! Cursor-addressed record of committed snapshots.

use crate::{error::EngineError, grid::Snapshot};

/// Ordered sequence of snapshots with a cursor naming the active one.
///
/// Entries are never modified once appended. Committing while the cursor is not on the newest
/// entry discards everything after the cursor first, so an abandoned redo branch can never be
/// reached again.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct MoveHistory {
    /// Committed snapshots, oldest first. Never empty.
    entries: Vec<Snapshot>,
    /// Index of the active snapshot in [`entries`](MoveHistory::entries).
    cursor: usize,
}

impl MoveHistory {
    /// Creates a history holding `initial` as its only, active entry.
    #[must_use]
    pub fn new(initial: Snapshot) -> Self {
        Self {
            entries: vec![initial],
            cursor: 0,
        }
    }

    /// Returns the active snapshot.
    #[must_use]
    #[expect(
        clippy::indexing_slicing,
        reason = "The cursor always points into the entries; every mutation keeps it in range."
    )]
    pub fn current(&self) -> &Snapshot {
        &self.entries[self.cursor]
    }

    /// Returns the index of the active snapshot.
    #[must_use]
    pub const fn cursor(&self) -> usize {
        self.cursor
    }

    /// Returns the number of stored snapshots, the redo branch included.
    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Always `false`; a history holds at least its initial snapshot.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Returns whether an older snapshot is available.
    #[must_use]
    pub const fn can_undo(&self) -> bool {
        self.cursor > 0
    }

    /// Returns whether a newer snapshot is available.
    #[must_use]
    pub fn can_redo(&self) -> bool {
        self.cursor + 1 < self.entries.len()
    }

    /// Drops the redo branch, appends `snapshot` and makes it active.
    pub fn commit(&mut self, snapshot: Snapshot) {
        self.entries.truncate(self.cursor + 1);
        self.entries.push(snapshot);
        self.cursor = self.entries.len() - 1;
    }

    /// Moves the cursor one entry back.
    ///
    /// # Errors
    ///
    /// This function returns [`EngineError::CannotUndo`] if the cursor is on the oldest entry.
    pub fn undo(&mut self) -> Result<&Snapshot, EngineError> {
        if !self.can_undo() {
            return Err(EngineError::CannotUndo);
        }
        self.cursor -= 1;

        Ok(self.current())
    }

    /// Moves the cursor one entry forward.
    ///
    /// # Errors
    ///
    /// This function returns [`EngineError::CannotRedo`] if the cursor is on the newest entry.
    pub fn redo(&mut self) -> Result<&Snapshot, EngineError> {
        if !self.can_redo() {
            return Err(EngineError::CannotRedo);
        }
        self.cursor += 1;

        Ok(self.current())
    }

    /// Replaces every entry with `initial`.
    pub fn reset(&mut self, initial: Snapshot) {
        self.entries.clear();
        self.entries.push(initial);
        self.cursor = 0;
    }
}
