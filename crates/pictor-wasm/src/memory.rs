//! In-memory file store for the browser.
//!
//! Browsers hand us file contents as byte arrays, not paths. [`MemoryCodec`]
//! keeps those bytes keyed by file name so the core editor can load, save
//! and reload exactly as it would against a file system.

use std::collections::HashMap;
use std::path::{Path, PathBuf};

use pictor_core::codec::{decode_bytes, encode_raster, Codec, DecodeError, EncodeError, SaveFormat};
use pictor_core::Raster;

#[derive(Debug, Default)]
pub struct MemoryCodec {
    files: HashMap<PathBuf, Vec<u8>>,
    jpeg_quality: u8,
}

impl MemoryCodec {
    pub fn new(jpeg_quality: u8) -> Self {
        Self {
            files: HashMap::new(),
            jpeg_quality,
        }
    }

    /// Add or replace a file, returning the replaced contents.
    pub fn insert(&mut self, name: impl Into<PathBuf>, bytes: Vec<u8>) -> Option<Vec<u8>> {
        self.files.insert(name.into(), bytes)
    }

    /// Encoded contents of a stored file.
    pub fn get(&self, name: &Path) -> Option<&[u8]> {
        self.files.get(name).map(Vec::as_slice)
    }

    /// Drop a file, returning its contents.
    pub fn remove(&mut self, name: &Path) -> Option<Vec<u8>> {
        self.files.remove(name)
    }

    pub fn len(&self) -> usize {
        self.files.len()
    }

    pub fn is_empty(&self) -> bool {
        self.files.is_empty()
    }
}

impl Codec for MemoryCodec {
    fn decode(&self, path: &Path) -> Result<Raster, DecodeError> {
        let bytes = self
            .files
            .get(path)
            .ok_or_else(|| DecodeError::IoError(format!("no file named {}", path.display())))?;
        decode_bytes(bytes)
    }

    fn encode(
        &mut self,
        raster: &Raster,
        path: &Path,
        format: SaveFormat,
    ) -> Result<(), EncodeError> {
        let bytes = encode_raster(raster, format, self.jpeg_quality)?;
        log::debug!("stored {} ({} bytes)", path.display(), bytes.len());
        self.files.insert(path.to_path_buf(), bytes);
        Ok(())
    }
}
