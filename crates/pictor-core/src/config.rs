//! Editor settings.
//!
//! All values have defaults matching the classic image viewer behavior:
//! 25% zoom steps, zoom offered between roughly 1/3x and 3x, JPEG output at
//! quality 90.

use std::path::PathBuf;

use serde::{Deserialize, Serialize};

use crate::codec::SaveFormat;
use crate::error::EditorError;
use crate::transform::{InterpolationFilter, ZoomLimits};

/// Settings for an editor session.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct EditorConfig {
    /// Scale multiplier for one zoom-in step.
    pub zoom_in_step: f64,
    /// Scale multiplier for one zoom-out step.
    pub zoom_out_step: f64,
    /// Zoom-in is offered while the scale is below this.
    pub max_zoom: f64,
    /// Zoom-out is offered while the scale is above this.
    pub min_zoom: f64,
    /// JPEG quality (1-100) for save and save-as.
    pub jpeg_quality: u8,
    /// Interpolation for rotations that are not quarter turns.
    pub rotation_filter: InterpolationFilter,
    /// Extension used when a save path has none.
    pub default_suffix: String,
    /// Directory the first file dialog opens in.
    pub start_directory: Option<PathBuf>,
}

impl Default for EditorConfig {
    fn default() -> Self {
        Self {
            zoom_in_step: 1.25,
            zoom_out_step: 0.8,
            max_zoom: 3.0,
            min_zoom: 0.333,
            jpeg_quality: 90,
            rotation_filter: InterpolationFilter::Bilinear,
            default_suffix: "jpg".to_string(),
            start_directory: None,
        }
    }
}

impl EditorConfig {
    pub fn new() -> Self {
        Self::default()
    }

    /// Check that the values make sense together.
    pub fn validate(&self) -> Result<(), EditorError> {
        let positive = |v: f64| v.is_finite() && v > 0.0;
        if !positive(self.zoom_in_step) || !positive(self.zoom_out_step) {
            return Err(EditorError::InvalidConfig(format!(
                "zoom steps must be positive, got {} and {}",
                self.zoom_in_step, self.zoom_out_step
            )));
        }
        if !positive(self.min_zoom) || !positive(self.max_zoom) || self.min_zoom >= self.max_zoom {
            return Err(EditorError::InvalidConfig(format!(
                "zoom bounds must satisfy 0 < min < max, got {} and {}",
                self.min_zoom, self.max_zoom
            )));
        }
        if self.jpeg_quality == 0 || self.jpeg_quality > 100 {
            return Err(EditorError::InvalidConfig(format!(
                "jpeg quality must be 1-100, got {}",
                self.jpeg_quality
            )));
        }
        if SaveFormat::from_extension(&self.default_suffix).is_none() {
            return Err(EditorError::InvalidConfig(format!(
                "unknown default suffix {:?}",
                self.default_suffix
            )));
        }
        Ok(())
    }

    pub fn zoom_limits(&self) -> ZoomLimits {
        ZoomLimits {
            max: self.max_zoom,
            min: self.min_zoom,
        }
    }

    /// Format used when a save path does not name one.
    pub fn default_format(&self) -> SaveFormat {
        SaveFormat::from_extension(&self.default_suffix).unwrap_or_default()
    }

    /// Directory for the first file dialog.
    ///
    /// The configured directory if any, otherwise the user's pictures
    /// directory, otherwise the current directory.
    pub fn resolve_start_directory(&self) -> PathBuf {
        self.start_directory
            .clone()
            .or_else(dirs::picture_dir)
            .or_else(|| std::env::current_dir().ok())
            .unwrap_or_else(|| PathBuf::from("."))
    }
}
