//! Rotation about the image center with an expanded canvas.
//!
//! Angles are whole degrees, positive = clockwise on screen. Any value is
//! accepted and reduced modulo 360.
//!
//! Quarter turns (0, 90, 180, 270) are exact pixel remaps. Every other angle
//! uses inverse mapping: for each output pixel we find the source position
//! it came from and interpolate:
//!
//! ```text
//! src_x =  (dst_x - dst_cx) * cos(θ) + (dst_y - dst_cy) * sin(θ) + src_cx
//! src_y = -(dst_x - dst_cx) * sin(θ) + (dst_y - dst_cy) * cos(θ) + src_cy
//! ```
//!
//! Output pixels that map outside the source are zero (transparent when the
//! raster has an alpha channel).

use serde::{Deserialize, Serialize};

use crate::raster::Raster;

/// Interpolation filter for rotation operations.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum InterpolationFilter {
    /// Fast bilinear interpolation.
    #[default]
    Bilinear,
    /// High-quality Lanczos3 interpolation.
    Lanczos3,
}

/// Reduce an angle in degrees to `0..360`.
pub fn normalize_angle(angle_degrees: i32) -> u32 {
    angle_degrees.rem_euclid(360) as u32
}

/// Compute the dimensions of the bounding box for a rotated image.
///
/// When an image is rotated, the corners extend beyond the original bounds.
/// This function calculates the minimum bounding box that contains the
/// entire rotated image.
///
/// # Example
///
/// ```
/// use pictor_core::transform::compute_rotated_bounds;
///
/// // 90-degree rotation swaps dimensions
/// assert_eq!(compute_rotated_bounds(100, 50, 90), (50, 100));
/// // A full turn preserves them
/// assert_eq!(compute_rotated_bounds(100, 50, -360), (100, 50));
/// ```
pub fn compute_rotated_bounds(width: u32, height: u32, angle_degrees: i32) -> (u32, u32) {
    match normalize_angle(angle_degrees) {
        0 | 180 => (width, height),
        90 | 270 => (height, width),
        angle => {
            let angle_rad = (angle as f64).to_radians();
            let cos = angle_rad.cos().abs();
            let sin = angle_rad.sin().abs();

            let w = width as f64;
            let h = height as f64;

            // new_w = |w*cos| + |h*sin|
            // new_h = |w*sin| + |h*cos|
            let new_w = (w * cos + h * sin).ceil() as u32;
            let new_h = (w * sin + h * cos).ceil() as u32;

            (new_w.max(1), new_h.max(1))
        }
    }
}

/// Rotate a raster around its center.
///
/// The output canvas is expanded to fit the entire rotated image (no
/// clipping). The result always has the same depth as the input.
pub fn apply_rotation(raster: &Raster, angle_degrees: i32, filter: InterpolationFilter) -> Raster {
    match normalize_angle(angle_degrees) {
        0 => raster.clone(),
        90 => remap_quarter_turn(raster, QuarterTurn::Clockwise),
        180 => remap_quarter_turn(raster, QuarterTurn::Half),
        270 => remap_quarter_turn(raster, QuarterTurn::CounterClockwise),
        angle => rotate_resampled(raster, angle, filter),
    }
}

#[derive(Clone, Copy)]
enum QuarterTurn {
    Clockwise,
    Half,
    CounterClockwise,
}

/// Lossless rotation by a multiple of 90 degrees.
fn remap_quarter_turn(raster: &Raster, turn: QuarterTurn) -> Raster {
    let (w, h) = (raster.width, raster.height);
    let (dst_w, dst_h) = match turn {
        QuarterTurn::Half => (w, h),
        _ => (h, w),
    };
    let channels = raster.channels();
    let mut output = Vec::with_capacity(raster.byte_size());

    for dst_y in 0..dst_h {
        for dst_x in 0..dst_w {
            let (src_x, src_y) = match turn {
                QuarterTurn::Clockwise => (dst_y, h - 1 - dst_x),
                QuarterTurn::Half => (w - 1 - dst_x, h - 1 - dst_y),
                QuarterTurn::CounterClockwise => (w - 1 - dst_y, dst_x),
            };
            output.extend_from_slice(raster.pixel(src_x, src_y));
        }
    }

    debug_assert_eq!(output.len(), dst_w as usize * dst_h as usize * channels);
    Raster::new(dst_w, dst_h, raster.depth, output)
}

fn rotate_resampled(raster: &Raster, angle_degrees: u32, filter: InterpolationFilter) -> Raster {
    let (dst_w, dst_h) = compute_rotated_bounds(raster.width, raster.height, angle_degrees as i32);

    let angle_rad = (angle_degrees as f64).to_radians();
    let cos = angle_rad.cos();
    let sin = angle_rad.sin();

    // Centers of source and destination images
    let src_cx = raster.width as f64 / 2.0;
    let src_cy = raster.height as f64 / 2.0;
    let dst_cx = dst_w as f64 / 2.0;
    let dst_cy = dst_h as f64 / 2.0;

    let channels = raster.channels();
    let mut output = vec![0u8; dst_w as usize * dst_h as usize * channels];
    if raster.is_empty() {
        return Raster::new(dst_w, dst_h, raster.depth, output);
    }

    for dst_y in 0..dst_h {
        for dst_x in 0..dst_w {
            // Work with pixel centers
            let dx = dst_x as f64 + 0.5 - dst_cx;
            let dy = dst_y as f64 + 0.5 - dst_cy;

            let src_x = dx * cos + dy * sin + src_cx - 0.5;
            let src_y = -dx * sin + dy * cos + src_cy - 0.5;

            let dst_idx = (dst_y as usize * dst_w as usize + dst_x as usize) * channels;
            let out = &mut output[dst_idx..dst_idx + channels];

            match filter {
                InterpolationFilter::Bilinear => sample_bilinear(raster, src_x, src_y, out),
                InterpolationFilter::Lanczos3 => sample_lanczos3(raster, src_x, src_y, out),
            }
        }
    }

    Raster::new(dst_w, dst_h, raster.depth, output)
}

/// Sample a pixel using bilinear interpolation.
///
/// Positions more than half a pixel outside the source leave `out` zeroed.
/// Near the border the nearest edge pixels are reused.
fn sample_bilinear(raster: &Raster, x: f64, y: f64, out: &mut [u8]) {
    let (w, h) = (raster.width as f64, raster.height as f64);
    if x < -0.5 || y < -0.5 || x > w - 0.5 || y > h - 0.5 {
        return;
    }

    let max_x = raster.width as i64 - 1;
    let max_y = raster.height as i64 - 1;
    let x0 = (x.floor() as i64).clamp(0, max_x);
    let y0 = (y.floor() as i64).clamp(0, max_y);
    let x1 = (x0 + 1).min(max_x);
    let y1 = (y0 + 1).min(max_y);

    // Fractional distances
    let fx = (x - x0 as f64).clamp(0.0, 1.0);
    let fy = (y - y0 as f64).clamp(0.0, 1.0);

    let p00 = raster.pixel(x0 as u32, y0 as u32);
    let p10 = raster.pixel(x1 as u32, y0 as u32);
    let p01 = raster.pixel(x0 as u32, y1 as u32);
    let p11 = raster.pixel(x1 as u32, y1 as u32);

    for (i, slot) in out.iter_mut().enumerate() {
        let v = p00[i] as f64 * (1.0 - fx) * (1.0 - fy)
            + p10[i] as f64 * fx * (1.0 - fy)
            + p01[i] as f64 * (1.0 - fx) * fy
            + p11[i] as f64 * fx * fy;
        *slot = v.clamp(0.0, 255.0).round() as u8;
    }
}

/// Sample a pixel using Lanczos3 interpolation.
///
/// Lanczos3 considers a 6x6 neighborhood of pixels. Near the edges it falls
/// back to bilinear.
fn sample_lanczos3(raster: &Raster, x: f64, y: f64, out: &mut [u8]) {
    let (w, h) = (raster.width as i64, raster.height as i64);

    if x < 2.0 || x >= (w - 3) as f64 || y < 2.0 || y >= (h - 3) as f64 {
        sample_bilinear(raster, x, y, out);
        return;
    }

    let x0 = x.floor() as i64;
    let y0 = y.floor() as i64;

    let mut sum = [0.0f64; 4];
    let mut weight_sum = 0.0;

    for ky in -2..=3 {
        for kx in -2..=3 {
            let px = x0 + kx;
            let py = y0 + ky;

            if px >= 0 && px < w && py >= 0 && py < h {
                let weight = lanczos_weight(x - px as f64, 3.0) * lanczos_weight(y - py as f64, 3.0);
                let pixel = raster.pixel(px as u32, py as u32);
                for (acc, &v) in sum.iter_mut().zip(pixel) {
                    *acc += v as f64 * weight;
                }
                weight_sum += weight;
            }
        }
    }

    if weight_sum > 0.0 {
        for (slot, acc) in out.iter_mut().zip(sum) {
            *slot = (acc / weight_sum).clamp(0.0, 255.0).round() as u8;
        }
    }
}

/// Lanczos kernel weight function.
///
/// ```text
/// L(x) = sinc(x) * sinc(x/a)  for |x| < a
/// L(x) = 0                     for |x| >= a
/// ```
fn lanczos_weight(x: f64, a: f64) -> f64 {
    if x.abs() < f64::EPSILON {
        return 1.0;
    }
    if x.abs() >= a {
        return 0.0;
    }

    let pi_x = std::f64::consts::PI * x;
    let pi_x_a = pi_x / a;

    (a * pi_x.sin() * pi_x_a.sin()) / (pi_x * pi_x)
}
