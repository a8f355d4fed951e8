//! Filter pipeline WASM bindings.
//!
//! # Example
//!
//! ```typescript
//! import { JsBitmap, apply_filters } from '@retouch/wasm';
//!
//! const image = new JsBitmap(width, height, 4, rgbaPixels);
//! const result = apply_filters(image, { rotation: 15, sepia: true, vignette: 0.4 });
//! ```

use retouch_core::pipeline::{self, PipelineError};
use retouch_core::{FilterParams, PipelineConfig};
use serde_json::Value;
use wasm_bindgen::prelude::*;

use crate::types::JsBitmap;

/// Apply the filter pipeline to an image.
///
/// `params` is a plain object of filter parameters; missing keys keep their
/// neutral defaults and numeric strings are accepted.
#[wasm_bindgen]
pub fn apply_filters(image: &JsBitmap, params: JsValue) -> Result<JsBitmap, JsValue> {
    let params: Value =
        serde_wasm_bindgen::from_value(params).map_err(|e| JsValue::from_str(&e.to_string()))?;
    apply_value(image, &params).map_err(|e| JsValue::from_str(&e.to_string()))
}

/// Apply the filter pipeline with parameters given as a JSON string.
#[wasm_bindgen]
pub fn apply_filters_json(image: &JsBitmap, params_json: &str) -> Result<JsBitmap, JsValue> {
    apply_json_str(image, params_json).map_err(|e| JsValue::from_str(&e.to_string()))
}

fn apply_value(image: &JsBitmap, params: &Value) -> Result<JsBitmap, PipelineError> {
    let result = pipeline::apply_json(image.as_bitmap(), params, &PipelineConfig::default())?;
    Ok(JsBitmap::from_bitmap(result))
}

fn apply_json_str(image: &JsBitmap, params_json: &str) -> Result<JsBitmap, PipelineError> {
    let params = FilterParams::from_json_str(params_json)?;
    let result = pipeline::apply(image.as_bitmap(), &params, &PipelineConfig::default());
    Ok(JsBitmap::from_bitmap(result))
}
