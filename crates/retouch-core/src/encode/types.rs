//! Encoded output types and errors.

use base64::{engine::general_purpose, Engine as _};
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::decode::{Bitmap, PixelLayout};

/// Errors that can occur during encoding.
#[derive(Debug, Error)]
pub enum EncodeError {
    /// Pixel data length doesn't match expected dimensions
    #[error("Invalid pixel data: expected {expected} bytes, got {actual}")]
    InvalidPixelData { expected: usize, actual: usize },

    /// Width or height is zero
    #[error("Invalid dimensions: width ({width}) and height ({height}) must be non-zero")]
    InvalidDimensions { width: u32, height: u32 },

    /// The encoder cannot write this channel arrangement
    #[error("Layout {0:?} is not supported by this encoder")]
    UnsupportedLayout(PixelLayout),

    /// The underlying encoder failed
    #[error("Encoding failed: {0}")]
    EncodingFailed(String),
}

/// Check dimensions and buffer length before handing a bitmap to an encoder.
pub(super) fn validate(image: &Bitmap) -> Result<(), EncodeError> {
    if image.width == 0 || image.height == 0 {
        return Err(EncodeError::InvalidDimensions {
            width: image.width,
            height: image.height,
        });
    }

    let expected = image.width as usize * image.height as usize * image.channels();
    if image.pixels.len() != expected {
        return Err(EncodeError::InvalidPixelData {
            expected,
            actual: image.pixels.len(),
        });
    }
    Ok(())
}

/// Container format used to ship a result to a client.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum TransportFormat {
    Png,
    Jpeg,
}

impl TransportFormat {
    /// PNG for layouts carrying alpha, JPEG otherwise.
    pub fn for_layout(layout: PixelLayout) -> Self {
        if layout.has_alpha() {
            TransportFormat::Png
        } else {
            TransportFormat::Jpeg
        }
    }

    pub fn mime_type(self) -> &'static str {
        match self {
            TransportFormat::Png => "image/png",
            TransportFormat::Jpeg => "image/jpeg",
        }
    }
}

/// An encoded image ready for transport.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EncodedImage {
    pub format: TransportFormat,
    pub bytes: Vec<u8>,
}

impl EncodedImage {
    /// Standard padded base64 of the encoded bytes.
    pub fn to_base64(&self) -> String {
        general_purpose::STANDARD.encode(&self.bytes)
    }

    /// `data:` URL suitable for an `<img src>` attribute.
    pub fn to_data_url(&self) -> String {
        format!("data:{};base64,{}", self.format.mime_type(), self.to_base64())
    }
}
