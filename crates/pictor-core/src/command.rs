//! The command surface offered to menus, shortcuts and scripting front ends.
//!
//! Availability of every command is a pure function of the session state
//! ([`Enablement::compute`]). Front ends query it on demand instead of
//! toggling flags after each operation.

use std::fmt;
use std::path::PathBuf;

use serde::{Deserialize, Serialize};

use crate::codec::SaveFormat;
use crate::history::HistoryStack;
use crate::transform::ZoomLimits;
use crate::viewport::ViewState;

/// A request from the front end.
#[derive(Debug, Clone, PartialEq)]
pub enum Command {
    Open(PathBuf),
    Save,
    SaveAs(PathBuf, Option<SaveFormat>),
    Reload,
    ZoomIn,
    ZoomOut,
    ZoomByFactor(f64),
    Rotate(i32),
    Undo,
    Redo,
}

impl Command {
    pub fn kind(&self) -> CommandKind {
        match self {
            Command::Open(_) => CommandKind::Open,
            Command::Save => CommandKind::Save,
            Command::SaveAs(..) => CommandKind::SaveAs,
            Command::Reload => CommandKind::Reload,
            Command::ZoomIn => CommandKind::ZoomIn,
            Command::ZoomOut => CommandKind::ZoomOut,
            Command::ZoomByFactor(_) => CommandKind::ZoomByFactor,
            Command::Rotate(_) => CommandKind::Rotate,
            Command::Undo => CommandKind::Undo,
            Command::Redo => CommandKind::Redo,
        }
    }
}

/// Command identity without arguments.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum CommandKind {
    Open,
    Save,
    SaveAs,
    Reload,
    ZoomIn,
    ZoomOut,
    ZoomByFactor,
    Rotate,
    Undo,
    Redo,
}

impl fmt::Display for CommandKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            CommandKind::Open => "open",
            CommandKind::Save => "save",
            CommandKind::SaveAs => "save as",
            CommandKind::Reload => "reload",
            CommandKind::ZoomIn => "zoom in",
            CommandKind::ZoomOut => "zoom out",
            CommandKind::ZoomByFactor => "zoom by factor",
            CommandKind::Rotate => "rotate",
            CommandKind::Undo => "undo",
            CommandKind::Redo => "redo",
        };
        f.write_str(name)
    }
}

/// Which commands are currently available.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct Enablement {
    pub open: bool,
    pub save: bool,
    pub save_as: bool,
    pub reload: bool,
    pub rotate: bool,
    pub undo: bool,
    pub redo: bool,
    pub zoom_in: bool,
    pub zoom_out: bool,
    pub zoom_by_factor: bool,
}

impl Enablement {
    /// Derive availability from the history and view.
    pub fn compute(history: &HistoryStack, view: &ViewState, limits: &ZoomLimits) -> Self {
        let has_image = history.current().is_some();
        Self {
            open: true,
            save: has_image,
            save_as: has_image,
            reload: has_image,
            rotate: has_image,
            undo: history.can_undo(),
            redo: history.can_redo(),
            zoom_in: has_image && limits.can_zoom_in(view.scale_factor),
            zoom_out: has_image && limits.can_zoom_out(view.scale_factor),
            zoom_by_factor: has_image,
        }
    }

    pub fn allows(&self, kind: CommandKind) -> bool {
        match kind {
            CommandKind::Open => self.open,
            CommandKind::Save => self.save,
            CommandKind::SaveAs => self.save_as,
            CommandKind::Reload => self.reload,
            CommandKind::ZoomIn => self.zoom_in,
            CommandKind::ZoomOut => self.zoom_out,
            CommandKind::ZoomByFactor => self.zoom_by_factor,
            CommandKind::Rotate => self.rotate,
            CommandKind::Undo => self.undo,
            CommandKind::Redo => self.redo,
        }
    }
}
