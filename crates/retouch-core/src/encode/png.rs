//! PNG encoding, used whenever the result carries transparency.

use image::codecs::png::PngEncoder;
use image::{ExtendedColorType, ImageEncoder};
use std::io::Cursor;

use super::types::{validate, EncodeError};
use crate::decode::{Bitmap, PixelLayout};

/// Encode a bitmap of any layout to PNG bytes.
pub fn encode_png(image: &Bitmap) -> Result<Vec<u8>, EncodeError> {
    validate(image)?;

    let color_type = match image.layout {
        PixelLayout::Luma => ExtendedColorType::L8,
        PixelLayout::LumaAlpha => ExtendedColorType::La8,
        PixelLayout::Rgb => ExtendedColorType::Rgb8,
        PixelLayout::Rgba => ExtendedColorType::Rgba8,
    };

    let mut buffer = Cursor::new(Vec::new());
    PngEncoder::new(&mut buffer)
        .write_image(&image.pixels, image.width, image.height, color_type)
        .map_err(|e| EncodeError::EncodingFailed(e.to_string()))?;

    Ok(buffer.into_inner())
}
