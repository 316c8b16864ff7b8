//! Zoom arithmetic on the view state.
//!
//! Zooming never touches pixels: it changes the scale factor at which the
//! raster is displayed and moves the scroll offset so the user keeps looking
//! at the same part of the image.

use serde::{Deserialize, Serialize};

use crate::error::EditorError;
use crate::geometry::{Point, Rect, Size};
use crate::viewport::{scroll_adjustment, ViewState};

/// Scale factors beyond which zoom-in / zoom-out are no longer offered.
///
/// The bounds gate whether the action is available. They do not clamp the
/// arithmetic, so a single step may overshoot them.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ZoomLimits {
    pub max: f64,
    pub min: f64,
}

impl Default for ZoomLimits {
    fn default() -> Self {
        Self {
            max: 3.0,
            min: 0.333,
        }
    }
}

impl ZoomLimits {
    pub fn can_zoom_in(&self, scale_factor: f64) -> bool {
        scale_factor < self.max
    }

    pub fn can_zoom_out(&self, scale_factor: f64) -> bool {
        scale_factor > self.min
    }
}

/// Multiply the scale by `factor`, keeping the middle of the viewport fixed.
pub fn scale_view(state: &ViewState, image_size: Size, factor: f64) -> ViewState {
    let mut next = *state;
    next.scale_factor *= factor;
    next.scroll_offset = Point::new(
        scroll_adjustment(state.scroll_offset.x, factor, state.viewport_size.width),
        scroll_adjustment(state.scroll_offset.y, factor, state.viewport_size.height),
    );
    next.clamp_scroll(next.display_size(image_size));
    next
}

/// Zoom so that `selection` (in display coordinates) fills the viewport.
///
/// The selection's top-left corner becomes the top-left of the visible
/// region. The aspect ratio is preserved, so the selection fills the
/// viewport along its tighter axis.
pub fn zoom_to_rect(
    state: &ViewState,
    image_size: Size,
    selection: Rect,
) -> Result<ViewState, EditorError> {
    if selection.is_empty() {
        return Err(EditorError::InvalidSelection("selection has no area"));
    }
    if state.viewport_size.is_empty() {
        return Err(EditorError::InvalidSelection("viewport has no area"));
    }

    let factor = f64::min(
        state.viewport_size.width as f64 / selection.width as f64,
        state.viewport_size.height as f64 / selection.height as f64,
    );

    let display_size = state.display_size(image_size).scaled(factor);
    let mut next = *state;
    next.scale_factor *= factor;
    next.scroll_offset = Point::new(
        (selection.x as f64 * factor) as i32,
        (selection.y as f64 * factor) as i32,
    );
    next.clamp_scroll(display_size);
    Ok(next)
}
