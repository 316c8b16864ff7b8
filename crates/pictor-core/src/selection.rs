//! Rubber-band selection driven by pointer press, move and release.

use serde::{Deserialize, Serialize};

use crate::geometry::{Point, Rect};

/// What to do with a finished selection.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum SelectionChoice {
    /// Dismiss the selection without editing.
    #[default]
    None,
    /// Zoom so the selection fills the viewport.
    ZoomToSelection,
    /// Crop the image to the selection.
    Crop,
}

/// Where the gesture currently is.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SelectionState {
    #[default]
    Idle,
    /// Pointer is down; `current` follows the pointer.
    Dragging { start: Point, current: Point },
    /// Pointer was released; waiting for a [`SelectionChoice`].
    Finalized { start: Point, end: Point },
}

/// Tracks one drag gesture in viewport coordinates.
#[derive(Debug, Clone, Default)]
pub struct SelectionController {
    state: SelectionState,
}

impl SelectionController {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn state(&self) -> SelectionState {
        self.state
    }

    pub fn is_dragging(&self) -> bool {
        matches!(self.state, SelectionState::Dragging { .. })
    }

    pub fn is_finalized(&self) -> bool {
        matches!(self.state, SelectionState::Finalized { .. })
    }

    /// Start a new gesture, discarding whatever was in progress.
    pub fn on_press(&mut self, point: Point) {
        self.state = SelectionState::Dragging {
            start: point,
            current: point,
        };
    }

    /// Follow the pointer while dragging and return the live rectangle.
    pub fn on_move(&mut self, point: Point) -> Option<Rect> {
        match &mut self.state {
            SelectionState::Dragging { start, current } => {
                *current = point;
                Some(Rect::from_corners(*start, point))
            }
            _ => None,
        }
    }

    /// Finish the gesture and return the normalized selection.
    pub fn on_release(&mut self, point: Point) -> Option<Rect> {
        match self.state {
            SelectionState::Dragging { start, .. } => {
                self.state = SelectionState::Finalized { start, end: point };
                Some(Rect::from_corners(start, point))
            }
            _ => None,
        }
    }

    /// The rectangle currently being dragged or awaiting a decision.
    pub fn rect(&self) -> Option<Rect> {
        match self.state {
            SelectionState::Idle => None,
            SelectionState::Dragging { start, current } => Some(Rect::from_corners(start, current)),
            SelectionState::Finalized { start, end } => Some(Rect::from_corners(start, end)),
        }
    }

    /// Consume a finalized selection and return to idle.
    pub fn take_finalized(&mut self) -> Option<Rect> {
        match self.state {
            SelectionState::Finalized { start, end } => {
                self.state = SelectionState::Idle;
                Some(Rect::from_corners(start, end))
            }
            _ => None,
        }
    }

    pub fn cancel(&mut self) {
        self.state = SelectionState::Idle;
    }
}
