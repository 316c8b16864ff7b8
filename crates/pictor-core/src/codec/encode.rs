//! Image encoding for save and save-as.
//!
//! JPEG goes through the `image` crate's JPEG encoder with a configurable
//! quality. The other formats use the crate's default encoders. Pixel
//! layouts a format cannot store are converted first: JPEG drops alpha,
//! TIFF and WebP widen gray to RGB.

use std::io::Cursor;
use std::path::Path;

use image::codecs::jpeg::JpegEncoder;
use image::{DynamicImage, ImageEncoder, ImageFormat};
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::raster::Raster;

/// Errors that can occur during encoding.
#[derive(Debug, Error)]
pub enum EncodeError {
    /// Pixel data length doesn't match expected dimensions
    #[error("Invalid pixel data: expected {expected} bytes, got {actual}")]
    InvalidPixelData { expected: usize, actual: usize },

    /// Width or height is zero
    #[error("Invalid dimensions: width ({width}) and height ({height}) must be non-zero")]
    InvalidDimensions { width: u32, height: u32 },

    /// No encoder for the requested file type
    #[error("Unsupported output format: {0}")]
    UnsupportedFormat(String),

    /// Encoding failed
    #[error("Encoding failed: {0}")]
    EncodingFailed(String),

    /// Writing the destination failed
    #[error("I/O error: {0}")]
    IoError(String),
}

/// File formats the editor can write.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum SaveFormat {
    #[default]
    Jpeg,
    Png,
    Bmp,
    Tiff,
    WebP,
}

impl SaveFormat {
    pub const ALL: [SaveFormat; 5] = [
        SaveFormat::Jpeg,
        SaveFormat::Png,
        SaveFormat::Bmp,
        SaveFormat::Tiff,
        SaveFormat::WebP,
    ];

    /// Look up a format by file extension, case-insensitively.
    pub fn from_extension(ext: &str) -> Option<Self> {
        match ext.to_ascii_lowercase().as_str() {
            "jpg" | "jpeg" | "jpe" => Some(SaveFormat::Jpeg),
            "png" => Some(SaveFormat::Png),
            "bmp" => Some(SaveFormat::Bmp),
            "tif" | "tiff" => Some(SaveFormat::Tiff),
            "webp" => Some(SaveFormat::WebP),
            _ => None,
        }
    }

    /// Infer the format from a path's extension.
    pub fn from_path(path: &Path) -> Option<Self> {
        path.extension()
            .and_then(|ext| ext.to_str())
            .and_then(Self::from_extension)
    }

    /// Preferred file extension, without the dot.
    pub fn extension(self) -> &'static str {
        match self {
            SaveFormat::Jpeg => "jpg",
            SaveFormat::Png => "png",
            SaveFormat::Bmp => "bmp",
            SaveFormat::Tiff => "tiff",
            SaveFormat::WebP => "webp",
        }
    }

    pub fn image_format(self) -> ImageFormat {
        match self {
            SaveFormat::Jpeg => ImageFormat::Jpeg,
            SaveFormat::Png => ImageFormat::Png,
            SaveFormat::Bmp => ImageFormat::Bmp,
            SaveFormat::Tiff => ImageFormat::Tiff,
            SaveFormat::WebP => ImageFormat::WebP,
        }
    }

    pub fn mime_type(self) -> &'static str {
        self.image_format().to_mime_type()
    }
}

/// Encode a raster into the bytes of an image file.
///
/// `jpeg_quality` (1-100) only applies to JPEG and is clamped.
pub fn encode_raster(
    raster: &Raster,
    format: SaveFormat,
    jpeg_quality: u8,
) -> Result<Vec<u8>, EncodeError> {
    let img = to_encodable(raster, format)?;

    match format {
        SaveFormat::Jpeg => encode_jpeg(&img, jpeg_quality),
        other => {
            let mut buffer = Cursor::new(Vec::new());
            img.write_to(&mut buffer, other.image_format())
                .map_err(|e| EncodeError::EncodingFailed(e.to_string()))?;
            Ok(buffer.into_inner())
        }
    }
}

/// Encode a raster and write it to `path`.
pub fn encode_file(
    raster: &Raster,
    path: &Path,
    format: SaveFormat,
    jpeg_quality: u8,
) -> Result<(), EncodeError> {
    let bytes = encode_raster(raster, format, jpeg_quality)?;
    std::fs::write(path, bytes).map_err(|e| EncodeError::IoError(format!("{}: {e}", path.display())))
}

/// Validate the raster and convert it to a layout `format` can store.
fn to_encodable(raster: &Raster, format: SaveFormat) -> Result<DynamicImage, EncodeError> {
    if raster.width == 0 || raster.height == 0 {
        return Err(EncodeError::InvalidDimensions {
            width: raster.width,
            height: raster.height,
        });
    }

    let expected = raster.width as usize * raster.height as usize * raster.channels();
    if raster.pixels.len() != expected {
        return Err(EncodeError::InvalidPixelData {
            expected,
            actual: raster.pixels.len(),
        });
    }

    let img = raster
        .to_dynamic()
        .ok_or_else(|| EncodeError::EncodingFailed(format!("unsupported depth {}", raster.depth)))?;

    Ok(match (format, raster.depth) {
        (SaveFormat::Jpeg, 16) => DynamicImage::ImageLuma8(img.into_luma8()),
        (SaveFormat::Jpeg, 32) => DynamicImage::ImageRgb8(img.into_rgb8()),
        (SaveFormat::Tiff | SaveFormat::WebP, 8) => DynamicImage::ImageRgb8(img.into_rgb8()),
        (SaveFormat::Tiff | SaveFormat::WebP, 16) => DynamicImage::ImageRgba8(img.into_rgba8()),
        _ => img,
    })
}

fn encode_jpeg(img: &DynamicImage, quality: u8) -> Result<Vec<u8>, EncodeError> {
    // Clamp quality to valid range (1-100)
    let quality = quality.clamp(1, 100);

    let mut buffer = Cursor::new(Vec::new());
    let encoder = JpegEncoder::new_with_quality(&mut buffer, quality);

    encoder
        .write_image(img.as_bytes(), img.width(), img.height(), img.color().into())
        .map_err(|e| EncodeError::EncodingFailed(e.to_string()))?;

    Ok(buffer.into_inner())
}
