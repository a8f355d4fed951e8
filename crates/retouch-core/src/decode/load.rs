//! Decoding of uploaded image bytes into a [`Bitmap`].

use std::io::Cursor;

use image::ImageReader;

use super::{Bitmap, DecodeError};

/// Decode an image from bytes, guessing the format from its content.
///
/// The bitmap layout follows the decoded color type (gray, gray+alpha,
/// RGB or RGBA); deeper sample formats are narrowed to 8 bits.
///
/// # Errors
///
/// Returns `DecodeError::InvalidFormat` if the format cannot be recognized,
/// `DecodeError::CorruptedFile` if decoding fails, and
/// `DecodeError::InvalidDimensions` for an image without pixels.
pub fn decode_image(bytes: &[u8]) -> Result<Bitmap, DecodeError> {
    let reader = ImageReader::new(Cursor::new(bytes))
        .with_guessed_format()
        .map_err(|e| DecodeError::CorruptedFile(e.to_string()))?;

    if reader.format().is_none() {
        return Err(DecodeError::InvalidFormat);
    }

    let img = reader
        .decode()
        .map_err(|e| DecodeError::CorruptedFile(e.to_string()))?;

    if img.width() == 0 || img.height() == 0 {
        return Err(DecodeError::InvalidDimensions {
            width: img.width(),
            height: img.height(),
        });
    }

    Ok(Bitmap::from_dynamic(img))
}
