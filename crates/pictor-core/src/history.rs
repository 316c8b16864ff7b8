//! Undo/redo history of committed edits.
//!
//! The history is two stacks of [`Snapshot`]s. The top of the undo stack is
//! the state currently on screen; the bottom is the state that was loaded
//! from disk and can never be undone past. Undo and redo only move
//! snapshots between the stacks; they never create new entries.

use crate::raster::Raster;

/// One point in edit history.
///
/// A snapshot owns its raster. Nothing else holds a reference to the pixel
/// buffer, so a later edit cannot change a stored entry.
#[derive(Debug, Clone, PartialEq)]
pub struct Snapshot {
    raster: Raster,
    scale_factor: f64,
}

impl Snapshot {
    pub fn new(raster: Raster, scale_factor: f64) -> Self {
        Self {
            raster,
            scale_factor,
        }
    }

    pub fn raster(&self) -> &Raster {
        &self.raster
    }

    pub fn scale_factor(&self) -> f64 {
        self.scale_factor
    }
}

/// Committed edits plus the states that were undone.
#[derive(Debug, Default)]
pub struct HistoryStack {
    undo_stack: Vec<Snapshot>,
    redo_stack: Vec<Snapshot>,
}

impl HistoryStack {
    pub fn new() -> Self {
        Self::default()
    }

    /// Discard all history and start over from a freshly loaded raster.
    pub fn reset(&mut self, raster: Raster, scale_factor: f64) {
        self.undo_stack.clear();
        self.redo_stack.clear();
        self.undo_stack.push(Snapshot::new(raster, scale_factor));
    }

    /// Record a completed edit as the new current state.
    ///
    /// Everything that was undone before this edit is dropped.
    pub fn commit(&mut self, raster: Raster, scale_factor: f64) {
        log::debug!(
            "history: commit {}x{} @ {:.3}, {} entries",
            raster.width,
            raster.height,
            scale_factor,
            self.undo_stack.len() + 1
        );
        self.redo_stack.clear();
        self.undo_stack.push(Snapshot::new(raster, scale_factor));
    }

    /// The displayed state, if an image has been loaded.
    pub fn current(&self) -> Option<&Snapshot> {
        self.undo_stack.last()
    }

    pub fn can_undo(&self) -> bool {
        self.undo_stack.len() >= 2
    }

    pub fn can_redo(&self) -> bool {
        !self.redo_stack.is_empty()
    }

    /// Step one entry back and return the state that is now current.
    ///
    /// # Panics
    ///
    /// Panics if [`can_undo`](Self::can_undo) is false. Callers gate the
    /// command on that predicate, so reaching this is a logic error.
    pub fn undo(&mut self) -> &Snapshot {
        assert!(self.can_undo(), "undo called with nothing to undo");
        if let Some(top) = self.undo_stack.pop() {
            self.redo_stack.push(top);
        }
        &self.undo_stack[self.undo_stack.len() - 1]
    }

    /// Re-apply the most recently undone entry and return it.
    ///
    /// # Panics
    ///
    /// Panics if [`can_redo`](Self::can_redo) is false.
    pub fn redo(&mut self) -> &Snapshot {
        assert!(self.can_redo(), "redo called with nothing to redo");
        if let Some(next) = self.redo_stack.pop() {
            self.undo_stack.push(next);
        }
        &self.undo_stack[self.undo_stack.len() - 1]
    }

    pub fn undo_len(&self) -> usize {
        self.undo_stack.len()
    }

    pub fn redo_len(&self) -> usize {
        self.redo_stack.len()
    }

    /// Drop everything, returning to the no-image state.
    pub fn clear(&mut self) {
        self.undo_stack.clear();
        self.redo_stack.clear();
    }
}
