//! The pixel buffer every edit operates on.

/// An 8-bit-per-channel pixel buffer.
///
/// A `Raster` is never mutated once it has been handed to the history;
/// every transform builds a new one. Cloning copies the pixel data, so two
/// rasters never alias the same buffer.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Raster {
    /// Image width in pixels.
    pub width: u32,
    /// Image height in pixels.
    pub height: u32,
    /// Bits per pixel: 8 (gray), 16 (gray + alpha), 24 (RGB) or 32 (RGBA).
    pub depth: u8,
    /// Pixel data in row-major order, `depth / 8` bytes per pixel.
    pub pixels: Vec<u8>,
}

impl Raster {
    /// Create a new Raster with the given dimensions, depth and pixel data.
    pub fn new(width: u32, height: u32, depth: u8, pixels: Vec<u8>) -> Self {
        debug_assert!(
            matches!(depth, 8 | 16 | 24 | 32),
            "Unsupported depth: {depth}"
        );
        debug_assert_eq!(
            pixels.len(),
            width as usize * height as usize * (depth / 8) as usize,
            "Pixel buffer size mismatch"
        );
        Self {
            width,
            height,
            depth,
            pixels,
        }
    }

    /// Create a zero-filled raster (black, or fully transparent with alpha).
    pub fn blank(width: u32, height: u32, depth: u8) -> Self {
        let len = width as usize * height as usize * (depth / 8) as usize;
        Self::new(width, height, depth, vec![0u8; len])
    }

    /// Bytes per pixel.
    #[inline]
    pub fn channels(&self) -> usize {
        (self.depth / 8) as usize
    }

    /// Whether the last channel is alpha.
    pub fn has_alpha(&self) -> bool {
        matches!(self.depth, 16 | 32)
    }

    /// Get the total number of pixels.
    pub fn pixel_count(&self) -> u64 {
        self.width as u64 * self.height as u64
    }

    /// Get the size of the pixel buffer in bytes.
    pub fn byte_size(&self) -> usize {
        self.pixels.len()
    }

    /// Check if this is an empty/invalid raster.
    pub fn is_empty(&self) -> bool {
        self.width == 0 || self.height == 0 || self.pixels.is_empty()
    }

    /// The bytes of the pixel at `(x, y)`.
    #[inline]
    pub fn pixel(&self, x: u32, y: u32) -> &[u8] {
        let c = self.channels();
        let idx = (y as usize * self.width as usize + x as usize) * c;
        &self.pixels[idx..idx + c]
    }

    /// Convert into the `image` crate's dynamic representation.
    pub fn to_dynamic(&self) -> Option<image::DynamicImage> {
        let (w, h, px) = (self.width, self.height, self.pixels.clone());
        match self.depth {
            8 => image::GrayImage::from_raw(w, h, px).map(image::DynamicImage::ImageLuma8),
            16 => image::GrayAlphaImage::from_raw(w, h, px)
                .map(image::DynamicImage::ImageLumaA8),
            24 => image::RgbImage::from_raw(w, h, px).map(image::DynamicImage::ImageRgb8),
            32 => image::RgbaImage::from_raw(w, h, px).map(image::DynamicImage::ImageRgba8),
            _ => None,
        }
    }

    /// Build a raster from any decoded image, keeping the closest 8-bit layout.
    ///
    /// Higher bit depths and float formats are reduced to 8 bits per channel.
    pub fn from_dynamic(img: image::DynamicImage) -> Self {
        use image::ColorType;
        let (width, height) = (img.width(), img.height());
        let (depth, pixels) = match img.color() {
            ColorType::L8 | ColorType::L16 => (8, img.into_luma8().into_raw()),
            ColorType::La8 | ColorType::La16 => (16, img.into_luma_alpha8().into_raw()),
            color if color.has_alpha() => (32, img.into_rgba8().into_raw()),
            _ => (24, img.into_rgb8().into_raw()),
        };
        Self {
            width,
            height,
            depth,
            pixels,
        }
    }
}
