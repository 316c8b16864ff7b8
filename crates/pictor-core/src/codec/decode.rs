//! Image decoding with EXIF orientation handling.

use std::io::Cursor;
use std::path::Path;

use exif::{In, Reader, Tag};
use image::{DynamicImage, ImageError, ImageReader};
use thiserror::Error;

use crate::raster::Raster;

/// Error types for image decoding operations.
#[derive(Debug, Error)]
pub enum DecodeError {
    /// The file format is not recognized or supported.
    #[error("Invalid or unsupported image format")]
    InvalidFormat,

    /// The image file is corrupted or incomplete.
    #[error("Corrupted or incomplete image file: {0}")]
    CorruptedFile(String),

    /// I/O error during file reading.
    #[error("I/O error: {0}")]
    IoError(String),
}

/// EXIF orientation values (1-8).
/// See: https://exiftool.org/TagNames/EXIF.html
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[repr(u8)]
pub enum Orientation {
    /// Normal (no transformation needed).
    #[default]
    Normal = 1,
    /// Horizontal flip.
    FlipHorizontal = 2,
    /// Rotate 180 degrees.
    Rotate180 = 3,
    /// Vertical flip.
    FlipVertical = 4,
    /// Transpose (flip horizontal + rotate 270 CW).
    Transpose = 5,
    /// Rotate 90 degrees clockwise.
    Rotate90CW = 6,
    /// Transverse (flip horizontal + rotate 90 CW).
    Transverse = 7,
    /// Rotate 270 degrees clockwise (90 CCW).
    Rotate270CW = 8,
}

impl From<u32> for Orientation {
    fn from(value: u32) -> Self {
        match value {
            2 => Orientation::FlipHorizontal,
            3 => Orientation::Rotate180,
            4 => Orientation::FlipVertical,
            5 => Orientation::Transpose,
            6 => Orientation::Rotate90CW,
            7 => Orientation::Transverse,
            8 => Orientation::Rotate270CW,
            _ => Orientation::Normal,
        }
    }
}

/// Read and decode the image stored at `path`.
pub fn decode_file(path: &Path) -> Result<Raster, DecodeError> {
    let bytes = std::fs::read(path)
        .map_err(|e| DecodeError::IoError(format!("{}: {e}", path.display())))?;
    decode_bytes(&bytes)
}

/// Decode an image from bytes, applying EXIF orientation correction.
///
/// The format is guessed from the content. The result keeps the closest
/// 8-bit layout of the source (gray, gray + alpha, RGB or RGBA).
///
/// # Errors
///
/// Returns `DecodeError::InvalidFormat` if the bytes are not a known format.
/// Returns `DecodeError::CorruptedFile` if decoding fails part-way.
pub fn decode_bytes(bytes: &[u8]) -> Result<Raster, DecodeError> {
    let orientation = extract_orientation(bytes);

    let reader = ImageReader::new(Cursor::new(bytes))
        .with_guessed_format()
        .map_err(|e| DecodeError::IoError(e.to_string()))?;
    if reader.format().is_none() {
        return Err(DecodeError::InvalidFormat);
    }

    let img = reader.decode().map_err(map_image_error)?;
    Ok(Raster::from_dynamic(apply_orientation(img, orientation)))
}

fn map_image_error(err: ImageError) -> DecodeError {
    match err {
        ImageError::Unsupported(_) => DecodeError::InvalidFormat,
        ImageError::IoError(e) => DecodeError::IoError(e.to_string()),
        other => DecodeError::CorruptedFile(other.to_string()),
    }
}

/// Extract EXIF orientation from image bytes.
///
/// Returns `Orientation::Normal` if no EXIF data is found or orientation
/// cannot be determined.
pub fn extract_orientation(bytes: &[u8]) -> Orientation {
    let mut cursor = Cursor::new(bytes);

    Reader::new()
        .read_from_container(&mut cursor)
        .ok()
        .and_then(|exif| {
            exif.get_field(Tag::Orientation, In::PRIMARY)
                .and_then(|field| field.value.get_uint(0))
        })
        .map(Orientation::from)
        .unwrap_or_default()
}

/// Apply EXIF orientation transformation to an image.
fn apply_orientation(img: DynamicImage, orientation: Orientation) -> DynamicImage {
    match orientation {
        Orientation::Normal => img,
        Orientation::FlipHorizontal => img.fliph(),
        Orientation::Rotate180 => img.rotate180(),
        Orientation::FlipVertical => img.flipv(),
        Orientation::Transpose => img.rotate90().fliph(),
        Orientation::Rotate90CW => img.rotate90(),
        Orientation::Transverse => img.rotate270().fliph(),
        Orientation::Rotate270CW => img.rotate270(),
    }
}
