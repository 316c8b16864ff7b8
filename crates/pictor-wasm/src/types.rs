//! WASM-compatible wrapper types for rasters and selection choices.
//!
//! This module provides JavaScript-friendly types that wrap the core Pictor
//! types, handling the conversion between Rust and JavaScript data
//! representations.

use pictor_core::{Raster, SelectionChoice};
use wasm_bindgen::prelude::*;

/// A raster snapshot handed to JavaScript.
///
/// # Memory Management
///
/// The pixel data is stored in WASM memory. When you call `pixels()` or
/// `rgba()`, a copy is made to JavaScript memory as a `Uint8Array`.
#[wasm_bindgen]
pub struct JsRaster {
    width: u32,
    height: u32,
    depth: u8,
    pixels: Vec<u8>,
}

#[wasm_bindgen]
impl JsRaster {
    /// Create a raster from dimensions, bits per pixel and packed pixel data.
    ///
    /// # Arguments
    /// * `width` - Width in pixels
    /// * `height` - Height in pixels
    /// * `depth` - Bits per pixel: 8 (gray), 16 (gray+alpha), 24 (RGB), 32 (RGBA)
    /// * `pixels` - Row-major pixel data, `depth / 8` bytes per pixel
    #[wasm_bindgen(constructor)]
    pub fn new(width: u32, height: u32, depth: u8, pixels: Vec<u8>) -> Result<JsRaster, JsValue> {
        if !matches!(depth, 8 | 16 | 24 | 32) {
            return Err(JsValue::from_str(&format!("Unsupported depth: {}", depth)));
        }
        let expected = width as usize * height as usize * (depth as usize / 8);
        if pixels.len() != expected {
            return Err(JsValue::from_str(&format!(
                "Expected {} bytes of pixel data, got {}",
                expected,
                pixels.len()
            )));
        }
        Ok(JsRaster {
            width,
            height,
            depth,
            pixels,
        })
    }

    #[wasm_bindgen(getter)]
    pub fn width(&self) -> u32 {
        self.width
    }

    #[wasm_bindgen(getter)]
    pub fn height(&self) -> u32 {
        self.height
    }

    /// Bits per pixel (8, 16, 24 or 32)
    #[wasm_bindgen(getter)]
    pub fn depth(&self) -> u8 {
        self.depth
    }

    #[wasm_bindgen(getter)]
    pub fn byte_length(&self) -> usize {
        self.pixels.len()
    }

    /// Packed pixel data in the raster's own layout.
    pub fn pixels(&self) -> Vec<u8> {
        self.pixels.clone()
    }

    /// Pixel data expanded to RGBA, ready for a canvas.
    pub fn rgba(&self) -> Vec<u8> {
        to_rgba(self.depth, &self.pixels)
    }

    /// Explicitly free WASM memory.
    ///
    /// This is optional - wasm-bindgen's finalizer will handle cleanup automatically.
    pub fn free(self) {}
}

impl JsRaster {
    pub(crate) fn from_raster(raster: &Raster) -> Self {
        Self {
            width: raster.width,
            height: raster.height,
            depth: raster.depth,
            pixels: raster.pixels.clone(),
        }
    }
}

/// Expand packed 8/16/24/32-bit pixels to RGBA.
pub(crate) fn to_rgba(depth: u8, pixels: &[u8]) -> Vec<u8> {
    let channels = (depth / 8).max(1) as usize;
    let mut out = Vec::with_capacity(pixels.len() / channels * 4);
    for px in pixels.chunks_exact(channels) {
        match *px {
            [v] => out.extend_from_slice(&[v, v, v, 255]),
            [v, a] => out.extend_from_slice(&[v, v, v, a]),
            [r, g, b] => out.extend_from_slice(&[r, g, b, 255]),
            [r, g, b, a] => out.extend_from_slice(&[r, g, b, a]),
            _ => {}
        }
    }
    out
}

/// Convert a u8 choice value to the core SelectionChoice enum.
///
/// Values:
/// - 0 = None (dismiss the selection)
/// - 1 = ZoomToSelection
/// - 2 = Crop
///
/// Any other value dismisses.
pub(crate) fn choice_from_u8(value: u8) -> SelectionChoice {
    match value {
        1 => SelectionChoice::ZoomToSelection,
        2 => SelectionChoice::Crop,
        _ => SelectionChoice::None,
    }
}
