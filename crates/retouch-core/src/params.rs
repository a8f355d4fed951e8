//! Parsing of loosely typed parameter maps into [`FilterParams`].
//!
//! Front ends send the filter parameters as a JSON object whose values are
//! not always well typed: slider values often arrive as strings, and
//! checkboxes as numbers or strings. Parsing is therefore lenient in the
//! same way a float conversion and a truthiness test would be:
//!
//! - numbers accept JSON numbers, booleans (`true` = 1) and strings holding
//!   a decimal number (surrounding whitespace ignored),
//! - flags are true for `true`, non-zero numbers, non-empty strings,
//!   non-empty arrays and objects,
//! - `null` and absent keys take the default,
//! - unknown keys are ignored.
//!
//! Any other value for a numeric key is rejected with [`ParamError`].

use serde_json::{Map, Value};
use thiserror::Error;

use crate::FilterParams;

/// Errors raised while parsing a parameter map.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ParamError {
    /// The parameter payload was not a JSON object.
    #[error("Parameters must be a JSON object")]
    NotAnObject,

    /// A numeric parameter could not be interpreted as a finite number.
    #[error("Parameter '{key}' is not a number: {value}")]
    NotANumber { key: String, value: String },
}

impl FilterParams {
    /// Parse a JSON parameter object, filling absent keys with defaults.
    ///
    /// A top-level `null` is treated as an empty object.
    pub fn from_json(value: &Value) -> Result<Self, ParamError> {
        let empty = Map::new();
        let map = match value {
            Value::Object(map) => map,
            Value::Null => &empty,
            _ => return Err(ParamError::NotAnObject),
        };

        let defaults = FilterParams::default();
        let params = FilterParams {
            rotation: number(map, "rotation", defaults.rotation)?,
            flip_x: flag(map, "flip_x"),
            flip_y: flag(map, "flip_y"),
            color_r: number(map, "color_r", defaults.color_r)?,
            color_g: number(map, "color_g", defaults.color_g)?,
            color_b: number(map, "color_b", defaults.color_b)?,
            sepia: flag(map, "sepia"),
            negative: flag(map, "negative"),
            grayscale: flag(map, "grayscale"),
            brightness: number(map, "brightness", defaults.brightness)?,
            contrast: number(map, "contrast", defaults.contrast)?,
            saturation: number(map, "saturation", defaults.saturation)?,
            sharpness: number(map, "sharpness", defaults.sharpness)?,
            blur: number(map, "blur", defaults.blur)?,
            vignette: number(map, "vignette", defaults.vignette)?,
        };

        log::trace!("Parsed filter parameters: {:?}", params);
        Ok(params)
    }

    /// Parse a JSON parameter string.
    ///
    /// Text that is not valid JSON is reported as [`ParamError::NotAnObject`].
    pub fn from_json_str(text: &str) -> Result<Self, ParamError> {
        let value: Value = serde_json::from_str(text).map_err(|e| {
            log::warn!("Rejected parameter payload: {}", e);
            ParamError::NotAnObject
        })?;
        Self::from_json(&value)
    }
}

fn number(map: &Map<String, Value>, key: &str, default: f64) -> Result<f64, ParamError> {
    let parsed = match map.get(key) {
        None | Some(Value::Null) => return Ok(default),
        Some(Value::Number(n)) => n.as_f64(),
        Some(Value::Bool(b)) => Some(if *b { 1.0 } else { 0.0 }),
        Some(Value::String(s)) => s.trim().parse::<f64>().ok(),
        Some(_) => None,
    };

    match parsed {
        Some(v) if v.is_finite() => Ok(v),
        _ => {
            let value = map.get(key).map(Value::to_string).unwrap_or_default();
            log::warn!("Rejected parameter {}={}", key, value);
            Err(ParamError::NotANumber {
                key: key.to_string(),
                value,
            })
        }
    }
}

fn flag(map: &Map<String, Value>, key: &str) -> bool {
    match map.get(key) {
        None | Some(Value::Null) => false,
        Some(Value::Bool(b)) => *b,
        Some(Value::Number(n)) => n.as_f64().is_some_and(|v| v != 0.0),
        Some(Value::String(s)) => !s.is_empty(),
        Some(Value::Array(a)) => !a.is_empty(),
        Some(Value::Object(o)) => !o.is_empty(),
    }
}
