//! Cropping to a pixel rectangle.
//!
//! # Coordinate System
//!
//! - `(0, 0)` = top-left pixel of the raster
//! - The region's right and bottom edges are exclusive
//! - Parts of the region outside the raster are ignored
//!
//! # Example
//!
//! ```ignore
//! // Keep the 50x30 block starting at (10, 10)
//! let cropped = apply_crop(&raster, Rect::new(10, 10, 50, 30)).unwrap();
//! ```

use crate::geometry::Rect;
use crate::raster::Raster;

/// Extract the part of `raster` covered by `region`.
///
/// # Behavior
///
/// - If the region extends beyond the raster, it is clamped to the raster
/// - Returns `None` when nothing of the region lies inside the raster
/// - A region covering the whole raster returns a copy of it
pub fn apply_crop(raster: &Raster, region: Rect) -> Option<Raster> {
    let region = region.clamp_to(raster.width, raster.height)?;

    // Fast path: full crop returns a clone
    if region.x == 0
        && region.y == 0
        && region.width == raster.width
        && region.height == raster.height
    {
        return Some(raster.clone());
    }

    let channels = raster.channels();
    let src_stride = raster.width as usize * channels;
    let row_len = region.width as usize * channels;
    let mut output = Vec::with_capacity(row_len * region.height as usize);

    // Copy pixel data row by row
    for y in 0..region.height as usize {
        let src_start = (region.y as usize + y) * src_stride + region.x as usize * channels;
        output.extend_from_slice(&raster.pixels[src_start..src_start + row_len]);
    }

    Some(Raster::new(
        region.width,
        region.height,
        raster.depth,
        output,
    ))
}


// ============================================================================
// Property-Based Tests
// ============================================================================
