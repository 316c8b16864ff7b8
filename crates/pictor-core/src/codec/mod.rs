//! Reading and writing image files.
//!
//! The editor never touches the file system directly: it goes through the
//! [`Codec`] trait. [`ImageCodec`] is the default implementation, backed by
//! the `image` crate. Front ends without a file system (e.g. the browser)
//! provide their own implementation.
//!
//! # Examples
//!
//! ```ignore
//! use pictor_core::codec::{Codec, ImageCodec, SaveFormat};
//!
//! let mut codec = ImageCodec::default();
//! let raster = codec.decode(Path::new("photo.jpg"))?;
//! codec.encode(&raster, Path::new("copy.png"), SaveFormat::Png)?;
//! ```

mod decode;
mod encode;

use std::path::Path;

pub use decode::{decode_bytes, decode_file, extract_orientation, DecodeError, Orientation};
pub use encode::{encode_file, encode_raster, EncodeError, SaveFormat};

use crate::raster::Raster;

/// Storage the editor loads from and saves to.
pub trait Codec {
    /// Load the image at `path`.
    fn decode(&self, path: &Path) -> Result<Raster, DecodeError>;

    /// Store `raster` at `path` in the given format.
    fn encode(&mut self, raster: &Raster, path: &Path, format: SaveFormat)
        -> Result<(), EncodeError>;
}

/// File-system codec using the `image` crate.
#[derive(Debug, Clone, Copy)]
pub struct ImageCodec {
    /// JPEG quality (1-100).
    pub jpeg_quality: u8,
}

impl Default for ImageCodec {
    fn default() -> Self {
        Self { jpeg_quality: 90 }
    }
}

impl ImageCodec {
    pub fn new(jpeg_quality: u8) -> Self {
        Self { jpeg_quality }
    }
}

impl Codec for ImageCodec {
    fn decode(&self, path: &Path) -> Result<Raster, DecodeError> {
        decode_file(path)
    }

    fn encode(
        &mut self,
        raster: &Raster,
        path: &Path,
        format: SaveFormat,
    ) -> Result<(), EncodeError> {
        encode_file(raster, path, format, self.jpeg_quality)
    }
}

/// Whether a file dialog is picking a file to read or to write.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AccessMode {
    Open,
    Save,
}

/// MIME types the codec can read or write, sorted and de-duplicated.
pub fn supported_mime_types(mode: AccessMode) -> Vec<&'static str> {
    let mut types: Vec<&'static str> = match mode {
        AccessMode::Open => image::ImageFormat::all()
            .filter(|format| format.reading_enabled())
            .map(|format| format.to_mime_type())
            .collect(),
        AccessMode::Save => SaveFormat::ALL.iter().map(|f| f.mime_type()).collect(),
    };
    types.sort_unstable();
    types.dedup();
    types
}
