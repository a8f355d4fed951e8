//! Transport encoding WASM bindings.
//!
//! # Example
//!
//! ```typescript
//! import { encode_for_transport } from '@retouch/wasm';
//!
//! const encoded = encode_for_transport(result);
//! imgElement.src = encoded.data_url();
//! ```

use retouch_core::config::DEFAULT_JPEG_QUALITY;
use retouch_core::encode;
use wasm_bindgen::prelude::*;

use crate::types::{JsBitmap, JsEncodedImage};

/// Encode an image as PNG (when it has alpha) or JPEG.
///
/// `quality` applies to JPEG output only and defaults to 85.
#[wasm_bindgen]
pub fn encode_for_transport(image: &JsBitmap, quality: Option<u8>) -> Result<JsEncodedImage, JsValue> {
    let quality = quality.unwrap_or(DEFAULT_JPEG_QUALITY);
    encode::encode_for_transport(image.as_bitmap(), quality)
        .map(JsEncodedImage::from)
        .map_err(|e| JsValue::from_str(&e.to_string()))
}
