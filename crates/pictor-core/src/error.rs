//! Errors surfaced by the editor session.

use thiserror::Error;

use crate::codec::{DecodeError, EncodeError};
use crate::command::CommandKind;

/// Everything an editor command can fail with.
///
/// None of these leave the session half-changed: a failed command leaves
/// the history, view and displayed raster as they were.
#[derive(Debug, Error)]
pub enum EditorError {
    /// The source could not be read; existing state is untouched.
    #[error(transparent)]
    Decode(#[from] DecodeError),

    /// The destination could not be written; in-memory state is untouched.
    #[error(transparent)]
    Encode(#[from] EncodeError),

    /// The command needs an image and none is loaded.
    #[error("No image loaded")]
    NoImage,

    /// Zero-area selection, selection outside the image, or nothing selected.
    #[error("Invalid selection: {0}")]
    InvalidSelection(&'static str),

    /// Zoom factor that is not a positive finite number.
    #[error("Invalid zoom factor: {0}")]
    InvalidFactor(f64),

    /// The command is currently disabled.
    #[error("Command not available: {0}")]
    Disabled(CommandKind),

    /// Configuration values out of range.
    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),
}
