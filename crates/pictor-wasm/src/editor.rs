//! Editor session bindings.
//!
//! [`JsEditor`] wraps a core editor whose "files" live in memory. The page
//! feeds it the bytes of a picked file, forwards pointer events from the
//! canvas, and reads back the current raster to draw.
//!
//! # Example
//!
//! ```typescript
//! const editor = new JsEditor({ jpeg_quality: 85 });
//! editor.set_viewport_size(canvas.width, canvas.height);
//! editor.open_bytes(file.name, new Uint8Array(await file.arrayBuffer()));
//!
//! canvas.onpointerdown = (e) => editor.pointer_press(e.offsetX, e.offsetY);
//! canvas.onpointerup = (e) => {
//!   if (editor.pointer_release(e.offsetX, e.offsetY)) {
//!     editor.resolve_selection(askUser()); // 0 = none, 1 = zoom, 2 = crop
//!   }
//! };
//!
//! ctx.putImageData(editor.image_data(), 0, 0);
//! ```

use std::path::{Path, PathBuf};

use pictor_core::codec::{supported_mime_types, AccessMode};
use pictor_core::dialog::with_default_suffix;
use pictor_core::{EditOutcome, Editor, EditorConfig, EditorError, Point, Size};
use wasm_bindgen::prelude::*;
use wasm_bindgen::Clamped;
use web_sys::ImageData;

use crate::memory::MemoryCodec;
use crate::types::{choice_from_u8, to_rgba, JsRaster};

fn to_js(err: EditorError) -> JsValue {
    JsValue::from_str(&err.to_string())
}

/// Command availability snapshot for toolbar state.
#[wasm_bindgen]
#[derive(Debug, Clone, Copy)]
pub struct JsEnablement {
    pub save: bool,
    pub reload: bool,
    pub rotate: bool,
    pub undo: bool,
    pub redo: bool,
    pub zoom_in: bool,
    pub zoom_out: bool,
    pub zoom_by_factor: bool,
}

/// A single-image editing session for the browser.
#[wasm_bindgen]
pub struct JsEditor {
    inner: Editor<MemoryCodec>,
}

#[wasm_bindgen]
impl JsEditor {
    /// Create a session.
    ///
    /// `config` is an optional object with any of the `EditorConfig` fields;
    /// missing fields use their defaults.
    #[wasm_bindgen(constructor)]
    pub fn new(config: JsValue) -> Result<JsEditor, JsValue> {
        let config: EditorConfig = if config.is_undefined() || config.is_null() {
            EditorConfig::default()
        } else {
            serde_wasm_bindgen::from_value(config)
                .map_err(|e| JsValue::from_str(&format!("Invalid config: {}", e)))?
        };
        let codec = MemoryCodec::new(config.jpeg_quality);
        let inner = Editor::new(codec, config).map_err(to_js)?;
        Ok(JsEditor { inner })
    }

    /// The active configuration as a plain object.
    pub fn config(&self) -> Result<JsValue, JsValue> {
        serde_wasm_bindgen::to_value(self.inner.config())
            .map_err(|e| JsValue::from_str(&e.to_string()))
    }

    /// Load an image from file contents.
    ///
    /// Returns the status line ("Opened ..."). On failure the previous image
    /// stays loaded and the error message is thrown. Only the current
    /// source's bytes are kept in memory.
    pub fn open_bytes(&mut self, name: &str, bytes: Vec<u8>) -> Result<String, JsValue> {
        let previous_source = self.inner.source().map(Path::to_path_buf);
        let previous = self.inner.codec_mut().insert(name, bytes);
        match self.inner.open(name) {
            Ok(summary) => {
                let replaced = previous_source.filter(|old| old.as_path() != Path::new(name));
                if let Some(old) = replaced {
                    self.inner.codec_mut().remove(&old);
                }
                Ok(summary.to_string())
            }
            Err(err) => {
                // Put back what was stored under this name, so reload still works
                match previous {
                    Some(bytes) => {
                        self.inner.codec_mut().insert(name, bytes);
                    }
                    None => {
                        self.inner.codec_mut().remove(Path::new(name));
                    }
                }
                Err(to_js(err))
            }
        }
    }

    /// Discard all edits and load the source file again.
    pub fn reload(&mut self) -> Result<String, JsValue> {
        self.inner
            .reload()
            .map(|summary| summary.to_string())
            .map_err(to_js)
    }

    /// Encode the current image and return its bytes.
    ///
    /// The format comes from `name`'s extension; a name without extension
    /// gets the configured default suffix.
    pub fn save_as(&mut self, name: &str) -> Result<Vec<u8>, JsValue> {
        self.inner.save_as(Path::new(name), None).map_err(to_js)?;
        let stored = stored_name(name, &self.inner.config().default_suffix);
        // The source file stays in the store for reload
        let bytes = if self.inner.source() == Some(stored.as_path()) {
            self.inner.codec().get(&stored).map(<[u8]>::to_vec)
        } else {
            self.inner.codec_mut().remove(&stored)
        };
        bytes.ok_or_else(|| JsValue::from_str("Encoded file missing"))
    }

    /// Encode the current image in the format of the source file.
    pub fn save(&mut self) -> Result<Vec<u8>, JsValue> {
        self.inner.save().map_err(to_js)?;
        let source = self
            .inner
            .source()
            .map(Path::to_path_buf)
            .ok_or_else(|| to_js(EditorError::NoImage))?;
        self.inner
            .codec()
            .get(&source)
            .map(<[u8]>::to_vec)
            .ok_or_else(|| JsValue::from_str("Encoded file missing"))
    }

    pub fn zoom_in(&mut self) -> Result<bool, JsValue> {
        self.inner.zoom_in().map(changed).map_err(to_js)
    }

    pub fn zoom_out(&mut self) -> Result<bool, JsValue> {
        self.inner.zoom_out().map(changed).map_err(to_js)
    }

    pub fn zoom_by_factor(&mut self, factor: f64) -> Result<bool, JsValue> {
        self.inner.zoom_by_factor(factor).map(changed).map_err(to_js)
    }

    /// Rotate by whole degrees, positive = clockwise.
    pub fn rotate(&mut self, angle_degrees: i32) -> Result<bool, JsValue> {
        self.inner.rotate(angle_degrees).map(changed).map_err(to_js)
    }

    pub fn undo(&mut self) -> Result<bool, JsValue> {
        self.inner.undo().map(changed).map_err(to_js)
    }

    pub fn redo(&mut self) -> Result<bool, JsValue> {
        self.inner.redo().map(changed).map_err(to_js)
    }

    pub fn set_viewport_size(&mut self, width: u32, height: u32) {
        self.inner.set_viewport_size(Size::new(width, height));
    }

    pub fn scroll_to(&mut self, x: i32, y: i32) {
        self.inner.scroll_to(Point::new(x, y));
    }

    pub fn pointer_press(&mut self, x: i32, y: i32) {
        self.inner.pointer_press(Point::new(x, y));
    }

    /// Returns `[x, y, width, height]` of the rubber band, or nothing.
    pub fn pointer_move(&mut self, x: i32, y: i32) -> Option<Vec<i32>> {
        self.inner
            .pointer_move(Point::new(x, y))
            .map(|r| vec![r.x, r.y, r.width as i32, r.height as i32])
    }

    /// Returns true when a selection awaits `resolve_selection`.
    pub fn pointer_release(&mut self, x: i32, y: i32) -> bool {
        self.inner.pointer_release(Point::new(x, y)).is_some()
    }

    /// Apply the choice for the pending selection: 0 = none, 1 = zoom, 2 = crop.
    pub fn resolve_selection(&mut self, choice: u8) -> Result<bool, JsValue> {
        self.inner
            .resolve_selection(choice_from_u8(choice))
            .map(changed)
            .map_err(to_js)
    }

    pub fn enablement(&self) -> JsEnablement {
        let e = self.inner.enablement();
        JsEnablement {
            save: e.save,
            reload: e.reload,
            rotate: e.rotate,
            undo: e.undo,
            redo: e.redo,
            zoom_in: e.zoom_in,
            zoom_out: e.zoom_out,
            zoom_by_factor: e.zoom_by_factor,
        }
    }

    #[wasm_bindgen(getter)]
    pub fn has_image(&self) -> bool {
        self.inner.has_image()
    }

    #[wasm_bindgen(getter)]
    pub fn scale_factor(&self) -> f64 {
        self.inner.scale_factor()
    }

    #[wasm_bindgen(getter)]
    pub fn scroll_x(&self) -> i32 {
        self.inner.view().scroll_offset.x
    }

    #[wasm_bindgen(getter)]
    pub fn scroll_y(&self) -> i32 {
        self.inner.view().scroll_offset.y
    }

    #[wasm_bindgen(getter)]
    pub fn display_width(&self) -> u32 {
        self.inner.display_size().width
    }

    #[wasm_bindgen(getter)]
    pub fn display_height(&self) -> u32 {
        self.inner.display_size().height
    }

    /// Latest status line, if any.
    #[wasm_bindgen(getter)]
    pub fn status(&self) -> Option<String> {
        self.inner.status().map(str::to_string)
    }

    /// Copy of the displayed raster.
    pub fn current(&self) -> Option<JsRaster> {
        self.inner.raster().map(JsRaster::from_raster)
    }

    /// The displayed raster at its natural size as canvas `ImageData`.
    pub fn image_data(&self) -> Result<ImageData, JsValue> {
        let raster = self
            .inner
            .raster()
            .ok_or_else(|| to_js(EditorError::NoImage))?;
        let rgba = to_rgba(raster.depth, &raster.pixels);
        ImageData::new_with_u8_clamped_array_and_sh(
            Clamped(rgba.as_slice()),
            raster.width,
            raster.height,
        )
    }
}

/// MIME types for an `<input type="file" accept=...>`: 0 = open, 1 = save.
#[wasm_bindgen]
pub fn dialog_filters(mode: u8) -> js_sys::Array {
    filters(mode).into_iter().map(JsValue::from_str).collect()
}

fn filters(mode: u8) -> Vec<&'static str> {
    let mode = if mode == 1 {
        AccessMode::Save
    } else {
        AccessMode::Open
    };
    supported_mime_types(mode)
}

/// True when the displayed image or view changed and needs a redraw.
fn changed(outcome: EditOutcome) -> bool {
    outcome != EditOutcome::Unchanged
}

/// Name the core editor stores a save-as result under.
fn stored_name(name: &str, default_suffix: &str) -> PathBuf {
    with_default_suffix(Path::new(name), default_suffix)
}
