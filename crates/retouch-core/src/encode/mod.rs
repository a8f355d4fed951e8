//! Image encoding for transport back to a client.
//!
//! This module provides functionality for:
//! - Encoding opaque bitmaps to JPEG with configurable quality
//! - Encoding any bitmap to PNG, keeping transparency
//! - Picking the transport format from the pixel layout
//! - Packaging the bytes as base64 or a `data:` URL
//!
//! # Examples
//!
//! ```ignore
//! use retouch_core::encode::encode_for_transport;
//!
//! let encoded = encode_for_transport(&bitmap, 85)?;
//! let src = encoded.to_data_url();
//! ```

mod jpeg;
mod png;
mod types;

pub use jpeg::encode_jpeg;
pub use png::encode_png;
pub use types::{EncodeError, EncodedImage, TransportFormat};

use crate::decode::Bitmap;

/// Encode a bitmap in the format its layout calls for.
///
/// Bitmaps carrying alpha become PNG; everything else becomes JPEG at
/// `jpeg_quality`.
pub fn encode_for_transport(image: &Bitmap, jpeg_quality: u8) -> Result<EncodedImage, EncodeError> {
    let format = TransportFormat::for_layout(image.layout);
    let bytes = match format {
        TransportFormat::Png => encode_png(image)?,
        TransportFormat::Jpeg => encode_jpeg(image, jpeg_quality)?,
    };

    log::debug!(
        "Encoded {}x{} {:?} as {} ({} bytes)",
        image.width,
        image.height,
        image.layout,
        format.mime_type(),
        bytes.len()
    );
    Ok(EncodedImage { format, bytes })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::decode::{decode_image, PixelLayout};

    #[test]
    fn test_transparent_result_is_png() {
        let img = Bitmap::filled(6, 6, PixelLayout::Rgba, &[10, 20, 30, 128]);
        let encoded = encode_for_transport(&img, 85).unwrap();

        assert_eq!(encoded.format, TransportFormat::Png);
        assert!(encoded.to_data_url().starts_with("data:image/png;base64,"));
        assert_eq!(decode_image(&encoded.bytes).unwrap(), img);
    }

    #[test]
    fn test_opaque_result_is_jpeg() {
        let img = Bitmap::filled(6, 6, PixelLayout::Rgb, &[10, 20, 30]);
        let encoded = encode_for_transport(&img, 85).unwrap();

        assert_eq!(encoded.format, TransportFormat::Jpeg);
        assert_eq!(&encoded.bytes[0..2], &[0xFF, 0xD8]);
        assert!(encoded.to_data_url().starts_with("data:image/jpeg;base64,/9j/"));
    }

    #[test]
    fn test_invalid_bitmap_fails() {
        let img = Bitmap::new(0, 0, PixelLayout::Rgb, vec![]);
        assert!(encode_for_transport(&img, 85).is_err());
    }
}
