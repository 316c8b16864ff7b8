//! Parameters for the front end's open/save file dialogs.
//!
//! The application owns a [`DialogContext`] and asks it for options each
//! time it shows a dialog. The first dialog starts in the configured
//! directory; later ones start wherever the user last picked a file.

use std::path::{Path, PathBuf};

use crate::codec::{supported_mime_types, AccessMode};
use crate::config::EditorConfig;

/// Everything a native or web file picker needs.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FileDialogOptions {
    pub mode: AccessMode,
    pub title: &'static str,
    pub directory: PathBuf,
    /// Sorted MIME types to filter by.
    pub mime_filters: Vec<&'static str>,
    /// Filter selected when the dialog opens.
    pub selected_filter: &'static str,
    /// Appended when a save path has no extension.
    pub default_suffix: Option<String>,
}

/// Per-application dialog state.
#[derive(Debug, Clone, Default)]
pub struct DialogContext {
    last_directory: Option<PathBuf>,
}

impl DialogContext {
    pub fn new() -> Self {
        Self::default()
    }

    /// Options for the next dialog of the given kind.
    pub fn options(&self, mode: AccessMode, config: &EditorConfig) -> FileDialogOptions {
        let directory = self
            .last_directory
            .clone()
            .unwrap_or_else(|| config.resolve_start_directory());

        FileDialogOptions {
            mode,
            title: match mode {
                AccessMode::Open => "Open File",
                AccessMode::Save => "Save File",
            },
            directory,
            mime_filters: supported_mime_types(mode),
            selected_filter: "image/jpeg",
            default_suffix: match mode {
                AccessMode::Open => None,
                AccessMode::Save => Some(config.default_suffix.clone()),
            },
        }
    }

    /// Remember the directory of a file the user picked.
    pub fn remember(&mut self, picked: &Path) {
        if let Some(parent) = picked.parent().filter(|p| !p.as_os_str().is_empty()) {
            self.last_directory = Some(parent.to_path_buf());
        }
    }
}

/// Append `suffix` to `path` if it has no extension.
pub fn with_default_suffix(path: &Path, suffix: &str) -> PathBuf {
    if path.extension().is_some() {
        path.to_path_buf()
    } else {
        path.with_extension(suffix)
    }
}
