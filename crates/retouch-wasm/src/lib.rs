//! Retouch WASM - WebAssembly bindings for Retouch
//!
//! This crate exposes the retouch-core filter pipeline to JavaScript and
//! TypeScript front ends.
//!
//! # Module Structure
//!
//! - `types` - WASM-compatible wrappers for bitmaps and encoded images
//! - `pipeline` - Apply filter parameters to a bitmap
//! - `encode` - PNG/JPEG transport encoding
//! - `session` - Upload, preview and re-process an image
//! - `logger` - Routes `log` records to the browser console
//!
//! # Usage
//!
//! ```typescript
//! import init, { JsEditSession } from '@retouch/wasm';
//!
//! await init();
//!
//! const session = new JsEditSession();
//! const preview = session.load(bytes);
//! const edited = session.process({ rotation: 90, sepia: true });
//! ```

use wasm_bindgen::prelude::*;

mod encode;
mod logger;
mod pipeline;
mod session;
mod types;

// Re-export public types
pub use encode::encode_for_transport;
pub use pipeline::{apply_filters, apply_filters_json};
pub use session::JsEditSession;
pub use types::{JsBitmap, JsEncodedImage};

/// Initialize the WASM module (called automatically on load)
#[wasm_bindgen(start)]
pub fn init() {
    logger::install(log::LevelFilter::Info);
}

/// Change the console log level ("error", "warn", "info", "debug", "trace", "off").
#[wasm_bindgen]
pub fn set_log_level(level: &str) {
    logger::install(logger::parse_level(level));
}

/// Get the version of the WASM module
#[wasm_bindgen]
pub fn version() -> String {
    env!("CARGO_PKG_VERSION").to_string()
}
