//! Pictor Core - single-image viewer and editor engine
//!
//! This crate holds everything behind the Pictor front ends: decoding and
//! encoding rasters, the zoom/crop/rotate edit operations, pointer
//! selection, coordinate mapping between the screen and the image, and the
//! undo/redo history. Front ends (the wasm bindings, a desktop shell) only
//! forward events into an [`Editor`] and draw what it reports.

pub mod codec;
pub mod command;
pub mod config;
pub mod dialog;
pub mod editor;
pub mod error;
pub mod geometry;
pub mod history;
pub mod raster;
pub mod selection;
pub mod transform;
pub mod viewport;

pub use codec::{Codec, DecodeError, EncodeError, ImageCodec, SaveFormat};
pub use command::{Command, CommandKind, Enablement};
pub use config::EditorConfig;
pub use editor::{EditOutcome, Editor, LoadSummary};
pub use error::EditorError;
pub use geometry::{Point, PointF, Rect, Size};
pub use history::{HistoryStack, Snapshot};
pub use raster::Raster;
pub use selection::{SelectionChoice, SelectionController, SelectionState};
pub use transform::{apply_crop, apply_rotation, compute_rotated_bounds, InterpolationFilter};
pub use viewport::ViewState;
