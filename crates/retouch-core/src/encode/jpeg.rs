//! JPEG encoding for opaque results.
//!
//! Uses the `image` crate's baseline JPEG encoder. Only layouts without
//! alpha can be written; transparent bitmaps go through PNG instead.

use image::codecs::jpeg::JpegEncoder;
use image::{ExtendedColorType, ImageEncoder};
use std::io::Cursor;

use super::types::{validate, EncodeError};
use crate::decode::{Bitmap, PixelLayout};

/// Encode an opaque bitmap to JPEG bytes.
///
/// `quality` is clamped to 1-100.
///
/// # Quality Guidelines
///
/// * 90-100: High quality, suitable for archival or further editing
/// * 80-90: Good quality, recommended for previews (default: 85)
/// * Below 60: Low quality, visible artifacts
pub fn encode_jpeg(image: &Bitmap, quality: u8) -> Result<Vec<u8>, EncodeError> {
    validate(image)?;

    let color_type = match image.layout {
        PixelLayout::Rgb => ExtendedColorType::Rgb8,
        PixelLayout::Luma => ExtendedColorType::L8,
        layout => return Err(EncodeError::UnsupportedLayout(layout)),
    };

    let quality = quality.clamp(1, 100);
    let mut buffer = Cursor::new(Vec::new());
    let encoder = JpegEncoder::new_with_quality(&mut buffer, quality);
    encoder
        .write_image(&image.pixels, image.width, image.height, color_type)
        .map_err(|e| EncodeError::EncodingFailed(e.to_string()))?;

    Ok(buffer.into_inner())
}


#[cfg(test)]
mod proptests {
    use super::*;
    use proptest::prelude::*;

    proptest! {
        /// Property: valid opaque input always produces a framed JPEG.
        #[test]
        fn prop_valid_input_produces_valid_jpeg(
            (width, height) in (1u32..=40, 1u32..=40),
            quality in 0u8..=255,
            value in any::<u8>(),
        ) {
            let img = Bitmap::filled(width, height, PixelLayout::Rgb, &[value, value / 2, 255 - value]);
            let jpeg_bytes = encode_jpeg(&img, quality).unwrap();

            prop_assert_eq!(&jpeg_bytes[0..2], &[0xFF, 0xD8]);
            let len = jpeg_bytes.len();
            prop_assert_eq!(&jpeg_bytes[len - 2..], &[0xFF, 0xD9]);
        }

        /// Property: same input always produces same output.
        #[test]
        fn prop_deterministic_output(
            (width, height) in (1u32..=20, 1u32..=20),
            quality in 1u8..=100,
        ) {
            let img = Bitmap::filled(width, height, PixelLayout::Rgb, &[100, 100, 100]);
            prop_assert_eq!(encode_jpeg(&img, quality).unwrap(), encode_jpeg(&img, quality).unwrap());
        }
    }
}
