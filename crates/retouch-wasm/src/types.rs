//! WASM-compatible wrapper types for image data.
//!
//! This module provides JavaScript-friendly types that wrap the core Retouch
//! types, handling the conversion between Rust and JavaScript data
//! representations.

use retouch_core::decode::{Bitmap, PixelLayout};
use retouch_core::encode::EncodedImage;
use wasm_bindgen::prelude::*;

/// A bitmap wrapper for JavaScript.
///
/// Pixels are interleaved 8-bit channels in row-major order. `channels` is
/// 1 (gray), 2 (gray + alpha), 3 (RGB) or 4 (RGBA).
///
/// # Memory Management
///
/// The pixel data is stored in WASM memory. Calling `pixels()` copies it to
/// a JavaScript `Uint8Array`.
#[wasm_bindgen]
#[derive(Debug, Clone)]
pub struct JsBitmap {
    inner: Bitmap,
}

#[wasm_bindgen]
impl JsBitmap {
    /// Create a bitmap from dimensions, channel count and pixel data.
    #[wasm_bindgen(constructor)]
    pub fn new(width: u32, height: u32, channels: u8, pixels: Vec<u8>) -> Result<JsBitmap, JsValue> {
        Self::try_new(width, height, channels, pixels).map_err(|e| JsValue::from_str(&e))
    }

    #[wasm_bindgen(getter)]
    pub fn width(&self) -> u32 {
        self.inner.width
    }

    #[wasm_bindgen(getter)]
    pub fn height(&self) -> u32 {
        self.inner.height
    }

    /// Interleaved channels per pixel
    #[wasm_bindgen(getter)]
    pub fn channels(&self) -> u8 {
        self.inner.channels() as u8
    }

    #[wasm_bindgen(getter)]
    pub fn byte_length(&self) -> usize {
        self.inner.byte_size()
    }

    /// Returns pixel data as Uint8Array (copied).
    pub fn pixels(&self) -> Vec<u8> {
        self.inner.pixels.clone()
    }
}

impl JsBitmap {
    /// Validating constructor usable off the wasm32 target.
    pub(crate) fn try_new(
        width: u32,
        height: u32,
        channels: u8,
        pixels: Vec<u8>,
    ) -> Result<Self, String> {
        let layout = PixelLayout::from_channels(channels as usize)
            .ok_or_else(|| format!("Unsupported channel count: {}", channels))?;
        if width == 0 || height == 0 {
            return Err(format!("Invalid dimensions: {}x{}", width, height));
        }
        let expected = width as usize * height as usize * layout.channels();
        if pixels.len() != expected {
            return Err(format!(
                "Invalid pixel data: expected {} bytes, got {}",
                expected,
                pixels.len()
            ));
        }
        Ok(Self {
            inner: Bitmap::new(width, height, layout, pixels),
        })
    }

    pub(crate) fn from_bitmap(inner: Bitmap) -> Self {
        Self { inner }
    }

    pub(crate) fn as_bitmap(&self) -> &Bitmap {
        &self.inner
    }
}

/// An encoded image ready to hand to the browser.
#[wasm_bindgen]
#[derive(Debug, Clone)]
pub struct JsEncodedImage {
    inner: EncodedImage,
}

#[wasm_bindgen]
impl JsEncodedImage {
    /// `image/png` or `image/jpeg`
    #[wasm_bindgen(getter)]
    pub fn mime_type(&self) -> String {
        self.inner.format.mime_type().to_string()
    }

    /// Encoded file bytes as Uint8Array (copied).
    pub fn bytes(&self) -> Vec<u8> {
        self.inner.bytes.clone()
    }

    pub fn base64(&self) -> String {
        self.inner.to_base64()
    }

    /// `data:` URL for an `<img src>` attribute.
    pub fn data_url(&self) -> String {
        self.inner.to_data_url()
    }
}

impl From<EncodedImage> for JsEncodedImage {
    fn from(inner: EncodedImage) -> Self {
        Self { inner }
    }
}
