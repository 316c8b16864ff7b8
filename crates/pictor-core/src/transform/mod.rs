//! Edit operations: zoom, crop and rotation.
//!
//! Zoom operations produce a new [`ViewState`](crate::viewport::ViewState)
//! and leave the pixels alone. Crop and rotation produce a new
//! [`Raster`](crate::raster::Raster); the source raster is never modified.
//!
//! # Coordinate System
//!
//! - Crop regions are in image pixels, origin top-left
//! - Rotation angles are whole degrees, positive = clockwise on screen
//! - Zoom-to-selection rectangles are in display pixels

mod crop;
mod rotation;
mod zoom;

pub use crop::apply_crop;
pub use rotation::{apply_rotation, compute_rotated_bounds, normalize_angle, InterpolationFilter};
pub use zoom::{scale_view, zoom_to_rect, ZoomLimits};
