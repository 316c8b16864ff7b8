//! The editing session.
//!
//! [`Editor`] owns the history, the view state and the pointer selection,
//! and is the only thing that mutates them. Every operation runs to
//! completion on the caller's thread; there is no background work.
//!
//! # Edit flow
//!
//! 1. A command or a finished selection asks for an edit.
//! 2. The transform computes a new raster and/or view state from the
//!    current snapshot. Nothing is changed if this fails.
//! 3. The result is committed to the history as one new snapshot, which
//!    drops everything that had been undone.
//!
//! Undo and redo only move through existing snapshots and then restore the
//! snapshot's scale on the view.

use std::fmt;
use std::path::{Path, PathBuf};

use crate::codec::{Codec, ImageCodec, SaveFormat};
use crate::command::{Command, CommandKind, Enablement};
use crate::config::EditorConfig;
use crate::dialog::with_default_suffix;
use crate::error::EditorError;
use crate::geometry::{Point, Rect, Size};
use crate::history::{HistoryStack, Snapshot};
use crate::raster::Raster;
use crate::selection::{SelectionChoice, SelectionController};
use crate::transform::{apply_crop, apply_rotation, scale_view, zoom_to_rect};
use crate::viewport::{rect_to_display_space, rect_to_image_space, ViewState};

/// Whether an edit request changed the session.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EditOutcome {
    /// A new snapshot was committed (or a new image loaded).
    Committed,
    /// Undo or redo moved to an existing snapshot.
    Navigated,
    /// The request was valid but had no effect.
    Unchanged,
}

/// Status line reported after a successful load.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LoadSummary {
    pub path: PathBuf,
    pub width: u32,
    pub height: u32,
    pub depth: u8,
}

impl fmt::Display for LoadSummary {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "Opened \"{}\", {}x{}, Depth: {}",
            self.path.display(),
            self.width,
            self.height,
            self.depth
        )
    }
}

/// A single-image editing session.
#[derive(Debug)]
pub struct Editor<C = ImageCodec> {
    codec: C,
    config: EditorConfig,
    history: HistoryStack,
    view: ViewState,
    selection: SelectionController,
    source: Option<PathBuf>,
    status: Option<String>,
}

impl Editor<ImageCodec> {
    /// Session backed by the file system.
    pub fn with_config(config: EditorConfig) -> Result<Self, EditorError> {
        let codec = ImageCodec::new(config.jpeg_quality);
        Self::new(codec, config)
    }
}

impl<C: Codec> Editor<C> {
    pub fn new(codec: C, config: EditorConfig) -> Result<Self, EditorError> {
        config.validate()?;
        Ok(Self {
            codec,
            config,
            history: HistoryStack::new(),
            view: ViewState::default(),
            selection: SelectionController::new(),
            source: None,
            status: None,
        })
    }

    pub fn config(&self) -> &EditorConfig {
        &self.config
    }

    pub fn codec(&self) -> &C {
        &self.codec
    }

    pub fn codec_mut(&mut self) -> &mut C {
        &mut self.codec
    }

    pub fn history(&self) -> &HistoryStack {
        &self.history
    }

    pub fn view(&self) -> &ViewState {
        &self.view
    }

    pub fn selection(&self) -> &SelectionController {
        &self.selection
    }

    /// The displayed snapshot, if an image is loaded.
    pub fn current(&self) -> Option<&Snapshot> {
        self.history.current()
    }

    pub fn raster(&self) -> Option<&Raster> {
        self.current().map(Snapshot::raster)
    }

    pub fn has_image(&self) -> bool {
        self.current().is_some()
    }

    pub fn scale_factor(&self) -> f64 {
        self.view.scale_factor
    }

    /// Path the current image was loaded from.
    pub fn source(&self) -> Option<&Path> {
        self.source.as_deref()
    }

    /// Latest status line (load summary or load failure).
    pub fn status(&self) -> Option<&str> {
        self.status.as_deref()
    }

    /// Size of the raster in image pixels, zero without an image.
    pub fn image_size(&self) -> Size {
        self.raster()
            .map(|r| Size::new(r.width, r.height))
            .unwrap_or_default()
    }

    /// Size of the raster as laid out on screen.
    pub fn display_size(&self) -> Size {
        self.view.display_size(self.image_size())
    }

    /// The visible area was resized.
    pub fn set_viewport_size(&mut self, size: Size) {
        self.view.viewport_size = size;
        let display = self.display_size();
        self.view.clamp_scroll(display);
    }

    /// Scroll the view, clamped to the scrollable range.
    pub fn scroll_to(&mut self, offset: Point) {
        self.view.scroll_offset = offset;
        let display = self.display_size();
        self.view.clamp_scroll(display);
    }

    pub fn enablement(&self) -> Enablement {
        Enablement::compute(&self.history, &self.view, &self.config.zoom_limits())
    }

    fn ensure_enabled(&self, kind: CommandKind) -> Result<(), EditorError> {
        if self.enablement().allows(kind) {
            Ok(())
        } else {
            Err(EditorError::Disabled(kind))
        }
    }

    /// Run a command from the command surface.
    ///
    /// Disabled commands are rejected with [`EditorError::Disabled`] before
    /// anything is touched.
    pub fn execute(&mut self, command: Command) -> Result<EditOutcome, EditorError> {
        self.ensure_enabled(command.kind())?;
        match command {
            Command::Open(path) => self.open(path).map(|_| EditOutcome::Committed),
            Command::Save => self.save().map(|_| EditOutcome::Unchanged),
            Command::SaveAs(path, format) => {
                self.save_as(&path, format).map(|_| EditOutcome::Unchanged)
            }
            Command::Reload => self.reload().map(|_| EditOutcome::Committed),
            Command::ZoomIn => self.zoom_in(),
            Command::ZoomOut => self.zoom_out(),
            Command::ZoomByFactor(factor) => self.zoom_by_factor(factor),
            Command::Rotate(angle) => self.rotate(angle),
            Command::Undo => self.undo(),
            Command::Redo => self.redo(),
        }
    }

    // =========================================================================
    // Loading and saving
    // =========================================================================

    /// Load an image, replacing the whole history.
    ///
    /// On failure the current image and history are kept and the status
    /// line reports the error.
    pub fn open(&mut self, path: impl Into<PathBuf>) -> Result<LoadSummary, EditorError> {
        let path = path.into();
        let raster = match self.codec.decode(&path) {
            Ok(raster) => raster,
            Err(err) => {
                log::warn!("Cannot load {}: {err}", path.display());
                self.status = Some(format!("Cannot load {}: {err}", path.display()));
                return Err(err.into());
            }
        };

        let summary = LoadSummary {
            path: path.clone(),
            width: raster.width,
            height: raster.height,
            depth: raster.depth,
        };

        self.history.reset(raster, 1.0);
        self.view.scale_factor = 1.0;
        self.view.scroll_offset = Point::default();
        self.selection.cancel();
        self.source = Some(path);
        self.status = Some(summary.to_string());
        log::info!("{summary}");
        Ok(summary)
    }

    /// Re-read the current source, discarding all edits and history.
    pub fn reload(&mut self) -> Result<LoadSummary, EditorError> {
        self.ensure_enabled(CommandKind::Reload)?;
        let path = self.source.clone().ok_or(EditorError::NoImage)?;
        log::info!("Reloading {}", path.display());
        self.open(path)
    }

    /// Write the displayed raster back to its source path.
    pub fn save(&mut self) -> Result<(), EditorError> {
        self.ensure_enabled(CommandKind::Save)?;
        let path = self.source.clone().ok_or(EditorError::NoImage)?;
        let format = SaveFormat::from_path(&path).unwrap_or_else(|| self.config.default_format());
        self.write(&path, format)
    }

    /// Write the displayed raster to `path`.
    ///
    /// Without an explicit format it is taken from the extension; a path
    /// without extension gets the configured default suffix. The source path
    /// used by save and reload does not change.
    pub fn save_as(&mut self, path: &Path, format: Option<SaveFormat>) -> Result<(), EditorError> {
        self.ensure_enabled(CommandKind::SaveAs)?;
        let path = match format {
            Some(format) => with_default_suffix(path, format.extension()),
            None => with_default_suffix(path, &self.config.default_suffix),
        };
        let format = format
            .or_else(|| SaveFormat::from_path(&path))
            .unwrap_or_else(|| self.config.default_format());
        self.write(&path, format)
    }

    fn write(&mut self, path: &Path, format: SaveFormat) -> Result<(), EditorError> {
        let snapshot = self.history.current().ok_or(EditorError::NoImage)?;
        match self.codec.encode(snapshot.raster(), path, format) {
            Ok(()) => {
                log::info!("Saved {} as {:?}", path.display(), format);
                Ok(())
            }
            Err(err) => {
                log::warn!("Cannot save {}: {err}", path.display());
                Err(err.into())
            }
        }
    }

    // =========================================================================
    // Edits
    // =========================================================================

    fn current_raster(&self) -> Result<&Raster, EditorError> {
        self.raster().ok_or(EditorError::NoImage)
    }

    /// Commit a new state and show it.
    fn commit(&mut self, raster: Raster, view: ViewState) {
        self.selection.cancel();
        self.view = view;
        self.history.commit(raster, view.scale_factor);
    }

    /// Commit the view scaled by `factor`.
    ///
    /// Fails with [`EditorError::InvalidFactor`] when the resulting scale
    /// would underflow to zero or overflow to infinity.
    fn zoom_by(&mut self, factor: f64) -> Result<EditOutcome, EditorError> {
        let raster = self.current_raster()?;
        if !(self.view.scale_factor * factor).is_normal() {
            return Err(EditorError::InvalidFactor(factor));
        }
        let raster = raster.clone();
        let view = scale_view(&self.view, self.image_size(), factor);
        log::debug!("zoom x{factor}: scale {} -> {}", self.view.scale_factor, view.scale_factor);
        self.commit(raster, view);
        Ok(EditOutcome::Committed)
    }

    /// Enlarge by one zoom step.
    pub fn zoom_in(&mut self) -> Result<EditOutcome, EditorError> {
        self.ensure_enabled(CommandKind::ZoomIn)?;
        self.zoom_by(self.config.zoom_in_step)
    }

    /// Shrink by one zoom step.
    pub fn zoom_out(&mut self) -> Result<EditOutcome, EditorError> {
        self.ensure_enabled(CommandKind::ZoomOut)?;
        self.zoom_by(self.config.zoom_out_step)
    }

    /// Multiply the scale by an arbitrary positive factor.
    pub fn zoom_by_factor(&mut self, factor: f64) -> Result<EditOutcome, EditorError> {
        self.ensure_enabled(CommandKind::ZoomByFactor)?;
        if !factor.is_finite() || factor <= 0.0 {
            return Err(EditorError::InvalidFactor(factor));
        }
        self.zoom_by(factor)
    }

    /// Zoom so that a viewport rectangle fills the viewport.
    ///
    /// Does nothing while zoom-in is unavailable, which stops repeated
    /// selections from magnifying without bound.
    pub fn zoom_to_selection(&mut self, selection: Rect) -> Result<EditOutcome, EditorError> {
        let raster = self
            .raster()
            .ok_or(EditorError::InvalidSelection("no image loaded"))?;
        if selection.is_empty() {
            return Err(EditorError::InvalidSelection("selection has no area"));
        }
        if !self.enablement().zoom_in {
            log::debug!("zoom to selection skipped at scale {}", self.view.scale_factor);
            return Ok(EditOutcome::Unchanged);
        }

        let display_rect = rect_to_display_space(selection, &self.view);
        let view = zoom_to_rect(&self.view, self.image_size(), display_rect)?;
        let raster = raster.clone();
        self.commit(raster, view);
        Ok(EditOutcome::Committed)
    }

    /// Crop to a viewport rectangle.
    pub fn crop_selection(&mut self, selection: Rect) -> Result<EditOutcome, EditorError> {
        if !self.has_image() {
            return Err(EditorError::InvalidSelection("no image loaded"));
        }
        if selection.is_empty() {
            return Err(EditorError::InvalidSelection("selection has no area"));
        }
        let region = rect_to_image_space(selection, &self.view);
        self.crop(region)
    }

    /// Crop to a rectangle in image pixels, clamped to the raster.
    ///
    /// The cropped image is shown at scale 1.
    pub fn crop(&mut self, region: Rect) -> Result<EditOutcome, EditorError> {
        let raster = self
            .raster()
            .ok_or(EditorError::InvalidSelection("no image loaded"))?;
        let cropped = apply_crop(raster, region)
            .ok_or(EditorError::InvalidSelection("selection does not overlap the image"))?;
        log::debug!(
            "crop {}x{} at ({}, {})",
            cropped.width,
            cropped.height,
            region.x,
            region.y
        );
        self.commit(cropped, self.reset_view());
        Ok(EditOutcome::Committed)
    }

    /// Rotate by whole degrees, clockwise. The result is shown at scale 1.
    pub fn rotate(&mut self, angle_degrees: i32) -> Result<EditOutcome, EditorError> {
        self.ensure_enabled(CommandKind::Rotate)?;
        let raster = self.current_raster()?;
        let rotated = apply_rotation(raster, angle_degrees, self.config.rotation_filter);
        log::debug!(
            "rotate {angle_degrees}: {}x{} -> {}x{}",
            raster.width,
            raster.height,
            rotated.width,
            rotated.height
        );
        self.commit(rotated, self.reset_view());
        Ok(EditOutcome::Committed)
    }

    /// View state for a fresh 1:1 baseline.
    fn reset_view(&self) -> ViewState {
        ViewState::new(self.view.viewport_size)
    }

    // =========================================================================
    // History navigation
    // =========================================================================

    /// Step back one edit.
    pub fn undo(&mut self) -> Result<EditOutcome, EditorError> {
        self.ensure_enabled(CommandKind::Undo)?;
        let scale = self.history.undo().scale_factor();
        log::debug!("undo: scale {scale}, {} left", self.history.undo_len());
        self.show_scale(scale);
        Ok(EditOutcome::Navigated)
    }

    /// Re-apply the last undone edit.
    pub fn redo(&mut self) -> Result<EditOutcome, EditorError> {
        self.ensure_enabled(CommandKind::Redo)?;
        let scale = self.history.redo().scale_factor();
        log::debug!("redo: scale {scale}, {} left", self.history.redo_len());
        self.show_scale(scale);
        Ok(EditOutcome::Navigated)
    }

    fn show_scale(&mut self, scale: f64) {
        self.selection.cancel();
        self.view.scale_factor = scale;
        let display = self.display_size();
        self.view.clamp_scroll(display);
    }

    // =========================================================================
    // Pointer selection
    // =========================================================================

    /// Pointer pressed at a viewport position.
    pub fn pointer_press(&mut self, point: Point) {
        if self.has_image() {
            self.selection.on_press(point);
        }
    }

    /// Pointer moved; returns the rectangle to draw as feedback.
    pub fn pointer_move(&mut self, point: Point) -> Option<Rect> {
        self.selection.on_move(point)
    }

    /// Pointer released; returns the selection awaiting a decision.
    ///
    /// Follow up with [`resolve_selection`](Self::resolve_selection).
    pub fn pointer_release(&mut self, point: Point) -> Option<Rect> {
        self.selection.on_release(point)
    }

    /// Apply the user's choice for the pending selection.
    pub fn resolve_selection(&mut self, choice: SelectionChoice) -> Result<EditOutcome, EditorError> {
        let rect = self
            .selection
            .take_finalized()
            .ok_or(EditorError::InvalidSelection("no pending selection"))?;
        log::debug!("selection {rect:?}: {choice:?}");

        match choice {
            SelectionChoice::None => Ok(EditOutcome::Unchanged),
            SelectionChoice::ZoomToSelection => self.zoom_to_selection(rect),
            SelectionChoice::Crop => self.crop_selection(rect),
        }
    }

    /// Release the pointer and decide synchronously what to do.
    ///
    /// `choose` is only called when a drag was in progress.
    pub fn release_with<F>(&mut self, point: Point, choose: F) -> Result<EditOutcome, EditorError>
    where
        F: FnOnce(Rect) -> SelectionChoice,
    {
        match self.pointer_release(point) {
            Some(rect) => {
                let choice = choose(rect);
                self.resolve_selection(choice)
            }
            None => Ok(EditOutcome::Unchanged),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::codec::{DecodeError, EncodeError};
    use std::collections::HashMap;

    /// In-memory codec: files are rasters keyed by path.
    #[derive(Debug, Default)]
    struct MapCodec {
        files: HashMap<PathBuf, Raster>,
        saved: Vec<(PathBuf, SaveFormat)>,
    }

    impl Codec for MapCodec {
        fn decode(&self, path: &Path) -> Result<Raster, DecodeError> {
            self.files
                .get(path)
                .cloned()
                .ok_or_else(|| DecodeError::IoError(format!("{} not found", path.display())))
        }

        fn encode(
            &mut self,
            raster: &Raster,
            path: &Path,
            format: SaveFormat,
        ) -> Result<(), EncodeError> {
            if path.starts_with("/readonly") {
                return Err(EncodeError::IoError("read-only".into()));
            }
            self.files.insert(path.to_path_buf(), raster.clone());
            self.saved.push((path.to_path_buf(), format));
            Ok(())
        }
    }

    fn gradient(width: u32, height: u32) -> Raster {
        let pixels = (0..width * height).map(|i| (i % 256) as u8).collect();
        Raster::new(width, height, 8, pixels)
    }

    fn editor_with(width: u32, height: u32) -> Editor<MapCodec> {
        let mut codec = MapCodec::default();
        codec
            .files
            .insert(PathBuf::from("/img/a.png"), gradient(width, height));
        codec
            .files
            .insert(PathBuf::from("/img/b.jpg"), gradient(10, 10));
        let mut editor = Editor::new(codec, EditorConfig::default()).unwrap();
        editor.set_viewport_size(Size::new(400, 300));
        editor.open("/img/a.png").unwrap();
        editor
    }

    fn select(
        editor: &mut Editor<MapCodec>,
        from: (i32, i32),
        to: (i32, i32),
        choice: SelectionChoice,
    ) -> Result<EditOutcome, EditorError> {
        editor.pointer_press(Point::new(from.0, from.1));
        editor.pointer_move(Point::new((from.0 + to.0) / 2, (from.1 + to.1) / 2));
        editor.release_with(Point::new(to.0, to.1), |_| choice)
    }

    #[test]
    fn test_new_editor_has_nothing_enabled_but_open() {
        let editor = Editor::new(MapCodec::default(), EditorConfig::default()).unwrap();
        let e = editor.enablement();
        assert!(e.open);
        assert!(!e.save && !e.rotate && !e.reload && !e.undo && !e.redo);
        assert!(!e.zoom_in && !e.zoom_out);
    }

    #[test]
    fn test_invalid_config_is_rejected() {
        let config = EditorConfig {
            jpeg_quality: 0,
            ..EditorConfig::default()
        };
        assert!(Editor::new(MapCodec::default(), config).is_err());
    }

    #[test]
    fn test_open_reports_summary() {
        let editor = editor_with(100, 50);
        assert_eq!(editor.status(), Some("Opened \"/img/a.png\", 100x50, Depth: 8"));
        assert_eq!(editor.history().undo_len(), 1);
        assert!(!editor.enablement().undo);
        assert_eq!(editor.scale_factor(), 1.0);
    }

    #[test]
    fn test_failed_open_keeps_state() {
        let mut editor = editor_with(100, 100);
        editor.zoom_in().unwrap();
        let before = editor.current().unwrap().clone();

        let err = editor.open("/img/missing.png").unwrap_err();
        assert!(matches!(err, EditorError::Decode(_)));
        assert_eq!(editor.current(), Some(&before));
        assert_eq!(editor.history().undo_len(), 2);
        assert_eq!(editor.source(), Some(Path::new("/img/a.png")));
        assert!(editor.status().unwrap().starts_with("Cannot load /img/missing.png"));
    }

    #[test]
    fn test_open_replaces_history() {
        let mut editor = editor_with(100, 100);
        editor.zoom_in().unwrap();
        editor.rotate(90).unwrap();
        editor.undo().unwrap();

        editor.open("/img/b.jpg").unwrap();
        assert_eq!(editor.history().undo_len(), 1);
        assert!(!editor.enablement().redo);
        assert_eq!(editor.image_size(), Size::new(10, 10));
    }

    #[test]
    fn test_every_edit_clears_redo() {
        let mut editor = editor_with(100, 100);
        let edits: Vec<fn(&mut Editor<MapCodec>) -> Result<EditOutcome, EditorError>> = vec![
            |e| e.zoom_in(),
            |e| e.zoom_out(),
            |e| e.zoom_by_factor(1.5),
            |e| e.rotate(45),
            |e| e.crop(Rect::new(0, 0, 20, 20)),
        ];
        for edit in edits {
            editor.zoom_in().unwrap();
            editor.undo().unwrap();
            assert!(editor.enablement().redo);

            edit(&mut editor).unwrap();
            assert!(!editor.enablement().redo);
            assert!(editor.enablement().undo);
            assert!(editor.history().undo_len() >= 1);
        }
    }

    #[test]
    fn test_undo_redo_restores_raster_and_scale() {
        let mut editor = editor_with(100, 50);
        editor.zoom_in().unwrap();
        editor.rotate(90).unwrap();
        let before = editor.current().unwrap().clone();

        editor.undo().unwrap();
        assert_eq!(editor.image_size(), Size::new(100, 50));
        assert_eq!(editor.scale_factor(), 1.25);

        editor.redo().unwrap();
        assert_eq!(editor.current(), Some(&before));
        assert_eq!(editor.scale_factor(), before.scale_factor());
    }

    #[test]
    fn test_undo_does_not_commit() {
        let mut editor = editor_with(100, 100);
        editor.zoom_in().unwrap();
        editor.zoom_in().unwrap();

        editor.undo().unwrap();
        editor.undo().unwrap();
        assert_eq!(editor.history().undo_len(), 1);
        assert_eq!(editor.history().redo_len(), 2);
        assert!(!editor.enablement().undo);
    }

    #[test]
    fn test_undo_past_load_is_disabled_not_panic() {
        let mut editor = editor_with(10, 10);
        assert!(matches!(
            editor.undo(),
            Err(EditorError::Disabled(CommandKind::Undo))
        ));
        assert!(matches!(
            editor.execute(Command::Redo),
            Err(EditorError::Disabled(CommandKind::Redo))
        ));
    }

    #[test]
    fn test_zoom_in_out_round_trip() {
        let mut editor = editor_with(100, 100);
        editor.zoom_in().unwrap();
        editor.zoom_out().unwrap();
        assert!((editor.scale_factor() - 1.0).abs() < 1e-9);
    }

    #[test]
    fn test_zoom_in_bound() {
        let mut editor = editor_with(100, 100);
        let mut steps = 0;
        while editor.enablement().zoom_in {
            editor.execute(Command::ZoomIn).unwrap();
            steps += 1;
            assert!(steps < 20);
        }
        // 1.25^5 = 3.05
        assert_eq!(steps, 5);
        assert!(editor.scale_factor() >= 3.0);
        assert!(matches!(
            editor.execute(Command::ZoomIn),
            Err(EditorError::Disabled(CommandKind::ZoomIn))
        ));
        assert!(editor.enablement().zoom_out);
    }

    #[test]
    fn test_zoom_out_bound() {
        let mut editor = editor_with(100, 100);
        while editor.enablement().zoom_out {
            editor.zoom_out().unwrap();
        }
        assert!(editor.scale_factor() <= 0.333);
        assert!(editor.zoom_out().is_err());
    }

    #[test]
    fn test_zoom_by_factor_validation() {
        let mut editor = editor_with(100, 100);
        for bad in [0.0, -2.0, f64::NAN, f64::INFINITY] {
            assert!(matches!(
                editor.zoom_by_factor(bad),
                Err(EditorError::InvalidFactor(_))
            ));
        }
        assert_eq!(editor.history().undo_len(), 1);

        editor.zoom_by_factor(5.0).unwrap();
        assert_eq!(editor.scale_factor(), 5.0);
        assert!(!editor.enablement().zoom_in);
    }

    #[test]
    fn test_zoom_by_tiny_factor_cannot_reach_zero() {
        let mut editor = editor_with(100, 100);
        editor.execute(Command::ZoomByFactor(1e-200)).unwrap();
        let undo_len = editor.history().undo_len();
        let scale = editor.scale_factor();

        // A second step would underflow to 0.0
        assert!(matches!(
            editor.execute(Command::ZoomByFactor(1e-200)),
            Err(EditorError::InvalidFactor(_))
        ));
        assert_eq!(editor.scale_factor(), scale);
        assert_eq!(editor.history().undo_len(), undo_len);
        assert!(editor.scale_factor() > 0.0);

        // Zoom steps keep working from the tiny scale
        editor.execute(Command::ZoomIn).unwrap();
        assert_eq!(editor.scale_factor(), scale * 1.25);
        assert!(!editor.enablement().zoom_out);
    }

    #[test]
    fn test_zoom_by_huge_factor_cannot_reach_infinity() {
        let mut editor = editor_with(100, 100);
        editor.execute(Command::ZoomByFactor(1e200)).unwrap();
        let scale = editor.scale_factor();

        assert!(matches!(
            editor.execute(Command::ZoomByFactor(1e200)),
            Err(EditorError::InvalidFactor(_))
        ));
        assert!(editor.scale_factor().is_finite());
        assert_eq!(editor.history().undo_len(), 2);

        editor.execute(Command::ZoomOut).unwrap();
        assert_eq!(editor.scale_factor(), scale * 0.8);
    }

    #[test]
    fn test_undo_redo_report_navigation() {
        let mut editor = editor_with(10, 10);
        assert_eq!(editor.zoom_in().unwrap(), EditOutcome::Committed);
        assert_eq!(editor.undo().unwrap(), EditOutcome::Navigated);
        assert_eq!(editor.redo().unwrap(), EditOutcome::Navigated);
        assert_eq!(editor.history().undo_len(), 2);
    }

    #[test]
    fn test_zoom_recenters_scroll() {
        let mut editor = editor_with(1000, 1000);
        editor.scroll_to(Point::new(100, 100));
        editor.zoom_in().unwrap();
        // x: 1.25 * 100 + 0.25 * 400 / 2 = 175, y: 1.25 * 100 + 0.25 * 300 / 2 = 162
        assert_eq!(editor.view().scroll_offset, Point::new(175, 162));
    }

    #[test]
    fn test_crop_selection() {
        let mut editor = editor_with(100, 100);
        let outcome = select(&mut editor, (60, 40), (10, 10), SelectionChoice::Crop).unwrap();
        assert_eq!(outcome, EditOutcome::Committed);
        assert_eq!(editor.image_size(), Size::new(50, 30));
        assert_eq!(editor.scale_factor(), 1.0);
        // Top-left pixel came from (10, 10)
        assert_eq!(editor.raster().unwrap().pixels[0], (10 * 100 + 10) as u8);
    }

    #[test]
    fn test_crop_respects_zoom_and_scroll() {
        let mut editor = editor_with(1000, 1000);
        editor.zoom_by_factor(2.0).unwrap();
        editor.scroll_to(Point::new(200, 100));

        select(&mut editor, (0, 0), (100, 50), SelectionChoice::Crop).unwrap();
        // Display (200,100)-(300,150) is image (100,50)-(150,75)
        assert_eq!(editor.image_size(), Size::new(50, 25));
        assert_eq!(editor.view().scroll_offset, Point::new(0, 0));
    }

    #[test]
    fn test_crop_clamps_to_raster() {
        let mut editor = editor_with(100, 100);
        editor.crop(Rect::new(80, 80, 50, 50)).unwrap();
        assert_eq!(editor.image_size(), Size::new(20, 20));
    }

    #[test]
    fn test_crop_outside_raster_is_rejected() {
        let mut editor = editor_with(100, 100);
        let err = select(&mut editor, (150, 150), (200, 200), SelectionChoice::Crop);
        assert!(matches!(err, Err(EditorError::InvalidSelection(_))));
        assert_eq!(editor.history().undo_len(), 1);
    }

    #[test]
    fn test_zoom_to_selection() {
        let mut editor = editor_with(1000, 1000);
        let outcome =
            select(&mut editor, (200, 100), (300, 200), SelectionChoice::ZoomToSelection).unwrap();

        assert_eq!(outcome, EditOutcome::Committed);
        // min(400 / 100, 300 / 100) = 3
        assert_eq!(editor.scale_factor(), 3.0);
        assert_eq!(editor.display_size(), Size::new(3000, 3000));
        assert_eq!(editor.view().scroll_offset, Point::new(600, 300));
        assert_eq!(editor.image_size(), Size::new(1000, 1000));
        assert_eq!(editor.history().undo_len(), 2);
    }

    #[test]
    fn test_zoom_to_zero_width_selection_fails() {
        let mut editor = editor_with(1000, 1000);
        let err = select(&mut editor, (50, 10), (50, 90), SelectionChoice::ZoomToSelection);
        assert!(matches!(err, Err(EditorError::InvalidSelection(_))));
        assert_eq!(editor.history().undo_len(), 1);
        assert_eq!(editor.scale_factor(), 1.0);
    }

    #[test]
    fn test_zoom_to_selection_noop_at_bound() {
        let mut editor = editor_with(1000, 1000);
        editor.zoom_by_factor(3.0).unwrap();
        let outcome =
            select(&mut editor, (0, 0), (10, 10), SelectionChoice::ZoomToSelection).unwrap();
        assert_eq!(outcome, EditOutcome::Unchanged);
        assert_eq!(editor.history().undo_len(), 2);
        assert_eq!(editor.scale_factor(), 3.0);
    }

    #[test]
    fn test_dismissed_selection_changes_nothing() {
        let mut editor = editor_with(500, 500);
        editor.zoom_in().unwrap();
        editor.scroll_to(Point::new(40, 40));
        let snapshot = editor.current().unwrap().clone();
        let view = *editor.view();

        let outcome = select(&mut editor, (0, 0), (100, 100), SelectionChoice::None).unwrap();
        assert_eq!(outcome, EditOutcome::Unchanged);
        assert_eq!(editor.current(), Some(&snapshot));
        assert_eq!(*editor.view(), view);
        assert_eq!(editor.history().undo_len(), 2);
        assert!(!editor.selection().is_finalized());
    }

    #[test]
    fn test_two_step_selection_resolution() {
        let mut editor = editor_with(100, 100);
        editor.pointer_press(Point::new(10, 10));
        let rect = editor.pointer_release(Point::new(60, 40)).unwrap();
        assert_eq!(rect, Rect::new(10, 10, 50, 30));
        assert!(editor.selection().is_finalized());

        editor.resolve_selection(SelectionChoice::Crop).unwrap();
        assert_eq!(editor.image_size(), Size::new(50, 30));
        assert!(matches!(
            editor.resolve_selection(SelectionChoice::Crop),
            Err(EditorError::InvalidSelection(_))
        ));
    }

    #[test]
    fn test_selection_without_image_is_ignored() {
        let mut editor = Editor::new(MapCodec::default(), EditorConfig::default()).unwrap();
        editor.pointer_press(Point::new(0, 0));
        assert_eq!(editor.pointer_release(Point::new(10, 10)), None);
        assert!(matches!(
            editor.zoom_to_selection(Rect::new(0, 0, 10, 10)),
            Err(EditorError::InvalidSelection(_))
        ));
        assert!(matches!(
            editor.crop_selection(Rect::new(0, 0, 10, 10)),
            Err(EditorError::InvalidSelection(_))
        ));
    }

    #[test]
    fn test_edit_cancels_pending_selection() {
        let mut editor = editor_with(100, 100);
        editor.pointer_press(Point::new(0, 0));
        editor.pointer_release(Point::new(10, 10));
        editor.zoom_in().unwrap();
        assert!(editor.resolve_selection(SelectionChoice::Crop).is_err());
    }

    #[test]
    fn test_rotate() {
        let mut editor = editor_with(100, 50);
        editor.zoom_in().unwrap();
        editor.rotate(90).unwrap();
        assert_eq!(editor.image_size(), Size::new(50, 100));
        assert_eq!(editor.scale_factor(), 1.0);

        let before = editor.raster().unwrap().clone();
        editor.rotate(360).unwrap();
        assert_eq!(editor.raster(), Some(&before));
        editor.rotate(0).unwrap();
        assert_eq!(editor.raster(), Some(&before));
    }

    #[test]
    fn test_stored_snapshots_are_independent() {
        let mut editor = editor_with(20, 20);
        let loaded = editor.raster().unwrap().clone();
        editor.rotate(180).unwrap();
        editor.crop(Rect::new(0, 0, 5, 5)).unwrap();

        editor.undo().unwrap();
        editor.undo().unwrap();
        assert_eq!(editor.raster(), Some(&loaded));
    }

    #[test]
    fn test_reload_discards_history() {
        let mut editor = editor_with(100, 100);
        editor.rotate(30).unwrap();
        editor.zoom_in().unwrap();
        editor.undo().unwrap();

        let summary = editor.reload().unwrap();
        assert_eq!(summary.width, 100);
        assert_eq!(editor.history().undo_len(), 1);
        assert!(!editor.enablement().redo);
        assert_eq!(editor.image_size(), Size::new(100, 100));
    }

    #[test]
    fn test_reload_without_image() {
        let mut editor = Editor::new(MapCodec::default(), EditorConfig::default()).unwrap();
        assert!(matches!(
            editor.reload(),
            Err(EditorError::Disabled(CommandKind::Reload))
        ));
    }

    #[test]
    fn test_save_writes_current_raster() {
        let mut editor = editor_with(100, 100);
        editor.rotate(90).unwrap();
        editor.save().unwrap();

        let (path, format) = editor.codec().saved.last().unwrap().clone();
        assert_eq!(path, PathBuf::from("/img/a.png"));
        assert_eq!(format, SaveFormat::Png);

        // Reload picks up the saved content
        editor.reload().unwrap();
        assert_eq!(editor.history().undo_len(), 1);
    }

    #[test]
    fn test_save_as_format_resolution() {
        let mut editor = editor_with(10, 10);

        editor.save_as(Path::new("/out/one"), None).unwrap();
        editor.save_as(Path::new("/out/two.bmp"), None).unwrap();
        editor
            .save_as(Path::new("/out/three"), Some(SaveFormat::Tiff))
            .unwrap();

        let saved = &editor.codec().saved;
        assert_eq!(saved[0], (PathBuf::from("/out/one.jpg"), SaveFormat::Jpeg));
        assert_eq!(saved[1], (PathBuf::from("/out/two.bmp"), SaveFormat::Bmp));
        assert_eq!(saved[2], (PathBuf::from("/out/three.tiff"), SaveFormat::Tiff));
        assert_eq!(editor.source(), Some(Path::new("/img/a.png")));
    }

    #[test]
    fn test_save_failure_keeps_state() {
        let mut editor = editor_with(10, 10);
        editor.zoom_in().unwrap();
        let err = editor.save_as(Path::new("/readonly/x.png"), None);
        assert!(matches!(err, Err(EditorError::Encode(_))));
        assert_eq!(editor.history().undo_len(), 2);
        assert_eq!(editor.scale_factor(), 1.25);
    }

    #[test]
    fn test_execute_open_and_save() {
        let mut editor = Editor::new(MapCodec::default(), EditorConfig::default()).unwrap();
        assert!(matches!(
            editor.execute(Command::Save),
            Err(EditorError::Disabled(CommandKind::Save))
        ));
        assert!(editor
            .execute(Command::Open(PathBuf::from("/nope.png")))
            .is_err());
        assert!(!editor.has_image());
    }

    #[test]
    fn test_load_summary_display() {
        let summary = LoadSummary {
            path: PathBuf::from("/p/x.jpg"),
            width: 640,
            height: 480,
            depth: 32,
        };
        assert_eq!(summary.to_string(), "Opened \"/p/x.jpg\", 640x480, Depth: 32");
    }
}
