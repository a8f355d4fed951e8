//! Editing session WASM bindings.
//!
//! The browser keeps one `JsEditSession` per open image:
//!
//! ```typescript
//! const session = new JsEditSession();
//! const preview = session.load(new Uint8Array(await file.arrayBuffer()));
//! img.src = preview.data_url();
//!
//! slider.oninput = () => {
//!   img.src = session.process({ brightness: slider.value }).data_url();
//! };
//! ```

use retouch_core::{EditSession, PipelineConfig, SessionError};
use serde_json::Value;
use wasm_bindgen::prelude::*;

use crate::types::JsEncodedImage;

/// Message shown to users when processing fails; details go to the log.
const PROCESSING_FAILED: &str = "Image processing failed";

#[wasm_bindgen]
pub struct JsEditSession {
    inner: EditSession,
}

#[wasm_bindgen]
impl JsEditSession {
    /// Create a session with the default configuration.
    #[wasm_bindgen(constructor)]
    #[allow(clippy::new_without_default)]
    pub fn new() -> JsEditSession {
        Self {
            inner: EditSession::new(PipelineConfig::default()),
        }
    }

    /// Create a session from a partial configuration object.
    pub fn with_config(config: JsValue) -> Result<JsEditSession, JsValue> {
        let config: PipelineConfig = serde_wasm_bindgen::from_value(config)
            .map_err(|e| JsValue::from_str(&format!("Invalid config: {}", e)))?;
        Ok(Self {
            inner: EditSession::new(config),
        })
    }

    /// Decode an uploaded file and return its encoded preview.
    pub fn load(&mut self, bytes: &[u8]) -> Result<JsEncodedImage, JsValue> {
        self.inner
            .load(bytes)
            .map(JsEncodedImage::from)
            .map_err(|e| JsValue::from_str(&e.to_string()))
    }

    /// Apply filter parameters to the preview and return the encoded result.
    pub fn process(&self, params: JsValue) -> Result<JsEncodedImage, JsValue> {
        let params: Value = serde_wasm_bindgen::from_value(params).map_err(|e| {
            log::error!("Unreadable filter parameters: {}", e);
            JsValue::from_str(PROCESSING_FAILED)
        })?;
        self.process_value(&params)
            .map_err(|_| JsValue::from_str(PROCESSING_FAILED))
    }

    #[wasm_bindgen(getter)]
    pub fn has_image(&self) -> bool {
        self.inner.has_image()
    }
}

impl JsEditSession {
    fn process_value(&self, params: &Value) -> Result<JsEncodedImage, SessionError> {
        self.inner.process(params).map(JsEncodedImage::from).map_err(|e| {
            log::error!("Processing failed: {}", e);
            e
        })
    }
}


#[cfg(all(test, target_arch = "wasm32"))]
mod wasm_tests {
    use super::*;
    use retouch_core::decode::{Bitmap, PixelLayout};
    use retouch_core::encode::encode_png;
    use wasm_bindgen_test::*;

    wasm_bindgen_test_configure!(run_in_browser);

    #[wasm_bindgen_test]
    fn test_process_without_image_is_generic_error() {
        let session = JsEditSession::new();
        let err = session.process(JsValue::NULL).err().unwrap();
        assert_eq!(err.as_string().as_deref(), Some(PROCESSING_FAILED));
    }

    #[wasm_bindgen_test]
    fn test_load_and_process() {
        let png = encode_png(&Bitmap::filled(30, 20, PixelLayout::Rgba, &[1, 2, 3, 4])).unwrap();
        let mut session = JsEditSession::new();
        let preview = session.load(&png).unwrap();
        assert_eq!(preview.mime_type(), "image/png");

        let result = session.process(JsValue::UNDEFINED).unwrap();
        assert_eq!(result.mime_type(), "image/png");
    }

    #[wasm_bindgen_test]
    fn test_load_garbage_fails() {
        let mut session = JsEditSession::new();
        assert!(session.load(b"garbage").is_err());
        assert!(!session.has_image());
    }
}
