//! Pictor WASM - WebAssembly bindings for Pictor
//!
//! This crate provides WASM bindings to expose the pictor-core editor to
//! JavaScript/TypeScript applications.
//!
//! # Module Structure
//!
//! - `editor` - The editing session (open, zoom, rotate, crop, undo/redo)
//! - `memory` - In-memory file store standing in for the file system
//! - `types` - WASM-compatible wrapper types for raster data
//!
//! # Usage
//!
//! ```typescript
//! import init, { JsEditor } from '@pictor/wasm';
//!
//! // Initialize WASM module (must call first)
//! await init();
//!
//! const editor = new JsEditor();
//! const bytes = new Uint8Array(await file.arrayBuffer());
//! console.log(editor.open_bytes(file.name, bytes));
//! ```

use wasm_bindgen::prelude::*;

mod editor;
mod memory;
mod types;

// Re-export public types
pub use editor::{dialog_filters, JsEditor, JsEnablement};
pub use memory::MemoryCodec;
pub use types::JsRaster;

/// Initialize the WASM module (called automatically on load)
///
/// Routes panics and `log` output to the browser console.
#[wasm_bindgen(start)]
pub fn init() {
    #[cfg(target_arch = "wasm32")]
    {
        console_error_panic_hook::set_once();
        // Ignore the error if a logger is already installed
        let _ = console_log::init_with_level(log::Level::Info);
    }
    log::debug!("pictor-wasm {} ready", version());
}

/// Get the version of the WASM module
#[wasm_bindgen]
pub fn version() -> String {
    env!("CARGO_PKG_VERSION").to_string()
}
