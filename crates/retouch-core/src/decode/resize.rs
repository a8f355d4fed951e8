//! Image resizing for preview generation and alpha/mask resampling.
//!
//! Provides resize operations using the `image` crate's algorithms.
//! All functions return new `Bitmap` instances without modifying the input.

use super::{Bitmap, DecodeError, FilterType};

/// Resize a bitmap to exact dimensions, keeping its layout.
///
/// # Errors
///
/// Returns `DecodeError::InvalidDimensions` for a zero target size and
/// `DecodeError::CorruptedFile` if the source buffer does not match its
/// dimensions.
pub fn resize(
    image: &Bitmap,
    width: u32,
    height: u32,
    filter: FilterType,
) -> Result<Bitmap, DecodeError> {
    if width == 0 || height == 0 {
        return Err(DecodeError::InvalidDimensions { width, height });
    }

    // Fast path: if dimensions match, just clone
    if image.width == width && image.height == height {
        return Ok(image.clone());
    }

    let dynamic = image
        .to_dynamic()
        .ok_or_else(|| DecodeError::CorruptedFile("Pixel buffer size mismatch".to_string()))?;

    let resized = dynamic.resize_exact(width, height, filter.to_image_filter());

    Ok(Bitmap::from_dynamic(resized))
}

/// Shrink a bitmap so its width does not exceed `max_width`.
///
/// The scale ratio is `min(max_width / width, 1)`; both dimensions are
/// scaled by it and truncated (minimum 1 pixel). Images that already fit
/// are returned unchanged. Uses Lanczos3.
///
/// # Errors
///
/// Returns `DecodeError::InvalidDimensions` if `max_width` is zero.
pub fn resize_for_preview(image: &Bitmap, max_width: u32) -> Result<Bitmap, DecodeError> {
    if max_width == 0 {
        return Err(DecodeError::InvalidDimensions {
            width: max_width,
            height: image.height,
        });
    }

    let (width, height) = calculate_preview_dimensions(image.width, image.height, max_width);
    if (width, height) == (image.width, image.height) {
        return Ok(image.clone());
    }

    resize(image, width, height, FilterType::Lanczos3)
}

/// Calculate preview dimensions for a width cap.
fn calculate_preview_dimensions(width: u32, height: u32, max_width: u32) -> (u32, u32) {
    if width == 0 || height == 0 {
        return (width, height);
    }

    let ratio = (max_width as f64 / width as f64).min(1.0);
    if ratio >= 1.0 {
        return (width, height);
    }

    let new_width = (width as f64 * ratio) as u32;
    let new_height = (height as f64 * ratio) as u32;
    (new_width.max(1), new_height.max(1))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::decode::PixelLayout;

    fn create_test_image(width: u32, height: u32) -> Bitmap {
        // Create a simple gradient image for testing
        let mut pixels = Vec::with_capacity((width * height * 3) as usize);
        for y in 0..height {
            for x in 0..width {
                pixels.push(((x * 255) / width.max(1)) as u8); // R
                pixels.push(((y * 255) / height.max(1)) as u8); // G
                pixels.push(128); // B
            }
        }
        Bitmap::new(width, height, PixelLayout::Rgb, pixels)
    }

    #[test]
    fn test_resize_basic() {
        let img = create_test_image(100, 50);
        let resized = resize(&img, 50, 25, FilterType::Bilinear).unwrap();

        assert_eq!(resized.width, 50);
        assert_eq!(resized.height, 25);
        assert_eq!(resized.pixels.len(), 50 * 25 * 3);
    }

    #[test]
    fn test_resize_same_dimensions() {
        let img = create_test_image(100, 50);
        let resized = resize(&img, 100, 50, FilterType::Bilinear).unwrap();

        assert_eq!(resized, img);
    }

    #[test]
    fn test_resize_keeps_alpha_layout() {
        let img = Bitmap::filled(10, 10, PixelLayout::Rgba, &[10, 20, 30, 200]);
        let resized = resize(&img, 17, 5, FilterType::Lanczos3).unwrap();

        assert_eq!(resized.layout, PixelLayout::Rgba);
        assert_eq!(resized.pixels.len(), 17 * 5 * 4);
    }

    #[test]
    fn test_resize_single_channel() {
        let img = Bitmap::filled(4, 4, PixelLayout::Luma, &[90]);
        let resized = resize(&img, 9, 7, FilterType::Bilinear).unwrap();

        assert_eq!(resized.layout, PixelLayout::Luma);
        assert!(resized.pixels.iter().all(|&v| v == 90));
    }

    #[test]
    fn test_resize_zero_dimensions_error() {
        let img = create_test_image(100, 50);

        assert!(resize(&img, 0, 50, FilterType::Bilinear).is_err());
        assert!(resize(&img, 50, 0, FilterType::Bilinear).is_err());
    }

    #[test]
    fn test_preview_wide_image_is_capped() {
        let img = create_test_image(1600, 900);
        let preview = resize_for_preview(&img, 800).unwrap();

        assert_eq!(preview.width, 800);
        assert_eq!(preview.height, 450);
    }

    #[test]
    fn test_preview_truncates_dimensions() {
        // ratio 800/1000; 333 * 0.8 = 266.4 -> 266
        let img = create_test_image(1000, 333);
        let preview = resize_for_preview(&img, 800).unwrap();

        assert_eq!(preview.width, 800);
        assert_eq!(preview.height, 266);
    }

    #[test]
    fn test_preview_small_image_not_upscaled() {
        let img = create_test_image(100, 50);
        let preview = resize_for_preview(&img, 800).unwrap();

        assert_eq!(preview, img);
    }

    #[test]
    fn test_preview_tall_image_only_width_matters() {
        let img = create_test_image(400, 3000);
        let preview = resize_for_preview(&img, 800).unwrap();

        assert_eq!(preview.width, 400);
        assert_eq!(preview.height, 3000);
    }

    #[test]
    fn test_preview_zero_max_width_error() {
        let img = create_test_image(100, 50);
        assert!(resize_for_preview(&img, 0).is_err());
    }

    #[test]
    fn test_calculate_preview_dimensions_minimum() {
        assert_eq!(calculate_preview_dimensions(10_000, 2, 800), (800, 1));
    }

    #[test]
    fn test_all_filter_types() {
        let img = create_test_image(100, 50);

        for filter in [
            FilterType::Nearest,
            FilterType::Bilinear,
            FilterType::Lanczos3,
        ] {
            let resized = resize(&img, 50, 25, filter).unwrap();
            assert_eq!(resized.width, 50);
            assert_eq!(resized.height, 25);
        }
    }
}
