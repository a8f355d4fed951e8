//! Filter pipeline orchestration.
//!
//! Runs the stages in a fixed order on one bitmap:
//!
//! 1. Geometry: rotation, then horizontal flip, then vertical flip
//! 2. Alpha extraction: split transparency off, normalize to RGB
//! 3. Color: channel gain, sepia, negative, grayscale, enhancements
//! 4. Stylization: Gaussian blur, then vignette
//! 5. Alpha restoration
//!
//! The source bitmap is only borrowed, so the same source can be processed
//! repeatedly with different parameters.

use image::RgbImage;
use serde_json::Value;
use thiserror::Error;

use crate::adjustments::apply_color_adjustments;
use crate::alpha::ColorBuffer;
use crate::blur::blur_rgb;
use crate::config::PipelineConfig;
use crate::decode::Bitmap;
use crate::mask::apply_vignette;
use crate::params::ParamError;
use crate::transform::{apply_rotation, flip_horizontal, flip_vertical};
use crate::FilterParams;

/// Errors that can occur while running the pipeline.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum PipelineError {
    /// The parameter map could not be parsed.
    #[error("Invalid filter parameters: {0}")]
    InvalidParams(#[from] ParamError),
}

/// Apply every filter in `params` to `image`.
///
/// Output is `Rgba` when the input was `Rgba`, and `Rgb` for every other
/// layout.
pub fn apply(image: &Bitmap, params: &FilterParams, config: &PipelineConfig) -> Bitmap {
    log::debug!(
        "Pipeline start: {}x{} {:?}",
        image.width,
        image.height,
        image.layout
    );

    let geometry = apply_geometry(image, params, config);

    let buffer = ColorBuffer::extract(geometry)
        .map_color(|color| apply_color_adjustments(color, params))
        .map_color(|color| apply_stylization(color, params, config));

    let result = buffer.restore(config.alpha_filter);
    log::debug!(
        "Pipeline done: {}x{} {:?}",
        result.width,
        result.height,
        result.layout
    );
    result
}

/// Parse a JSON parameter map and apply it to `image`.
pub fn apply_json(
    image: &Bitmap,
    params: &Value,
    config: &PipelineConfig,
) -> Result<Bitmap, PipelineError> {
    let params = FilterParams::from_json(params)?;
    Ok(apply(image, &params, config))
}

fn apply_geometry(image: &Bitmap, params: &FilterParams, config: &PipelineConfig) -> Bitmap {
    // Stored rotation is clockwise; the primitive turns counter-clockwise.
    let mut out = if params.rotation != 0.0 {
        log::debug!("Rotate {} degrees", params.rotation);
        apply_rotation(image, -params.rotation, config.rotation_filter)
    } else {
        image.clone()
    };

    if params.flip_x {
        log::debug!("Flip horizontal");
        out = flip_horizontal(&out);
    }
    if params.flip_y {
        log::debug!("Flip vertical");
        out = flip_vertical(&out);
    }
    out
}

fn apply_stylization(mut color: RgbImage, params: &FilterParams, config: &PipelineConfig) -> RgbImage {
    if params.blur > 0.0 {
        log::debug!("Gaussian blur radius={}", params.blur);
        color = blur_rgb(&color, params.blur);
    }
    if params.vignette > 0.0 {
        color = apply_vignette(color, params.vignette, config.mask_filter);
    }
    color
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::decode::PixelLayout;
    use serde_json::json;

    fn rgb_gradient(width: u32, height: u32) -> Bitmap {
        let mut pixels = Vec::with_capacity((width * height * 3) as usize);
        for y in 0..height {
            for x in 0..width {
                pixels.extend_from_slice(&[
                    (x * 255 / width.max(1)) as u8,
                    (y * 255 / height.max(1)) as u8,
                    ((x + y) % 256) as u8,
                ]);
            }
        }
        Bitmap::new(width, height, PixelLayout::Rgb, pixels)
    }

    fn rgba_gradient(width: u32, height: u32) -> Bitmap {
        let mut pixels = Vec::with_capacity((width * height * 4) as usize);
        for y in 0..height {
            for x in 0..width {
                pixels.extend_from_slice(&[
                    (x * 5) as u8,
                    (y * 5) as u8,
                    120,
                    (255 - (x + y) % 200) as u8,
                ]);
            }
        }
        Bitmap::new(width, height, PixelLayout::Rgba, pixels)
    }

    fn run(image: &Bitmap, params: Value) -> Bitmap {
        apply_json(image, &params, &PipelineConfig::default()).unwrap()
    }

    #[test]
    fn test_empty_params_identity_rgb() {
        let img = rgb_gradient(23, 17);
        assert_eq!(run(&img, json!({})), img);
    }

    #[test]
    fn test_empty_params_identity_rgba() {
        let img = rgba_gradient(19, 11);
        assert_eq!(run(&img, json!({})), img);
    }

    #[test]
    fn test_gray_input_becomes_rgb() {
        let img = Bitmap::new(2, 1, PixelLayout::Luma, vec![10, 240]);
        let out = run(&img, json!({}));
        assert_eq!(out.layout, PixelLayout::Rgb);
        assert_eq!(out.pixels, vec![10, 10, 10, 240, 240, 240]);
    }

    #[test]
    fn test_rotation_zero_and_full_turn() {
        let img = rgb_gradient(30, 20);
        assert_eq!(run(&img, json!({ "rotation": 0 })), img);

        let turned = run(&img, json!({ "rotation": 360 }));
        assert_eq!(turned.dimensions(), (30, 20));
    }

    #[test]
    fn test_positive_rotation_turns_clockwise() {
        // [A B] turned clockwise puts A on top of B
        let img = Bitmap::new(2, 1, PixelLayout::Rgb, vec![255, 0, 0, 0, 0, 255]);
        let out = run(&img, json!({ "rotation": 90 }));

        assert_eq!(out.dimensions(), (1, 2));
        assert_eq!(out.pixel(0, 0), &[255, 0, 0]);
        assert_eq!(out.pixel(0, 1), &[0, 0, 255]);
    }

    #[test]
    fn test_negative_rotation_turns_counter_clockwise() {
        let img = Bitmap::new(2, 1, PixelLayout::Rgb, vec![255, 0, 0, 0, 0, 255]);
        let out = run(&img, json!({ "rotation": -90 }));

        assert_eq!(out.dimensions(), (1, 2));
        assert_eq!(out.pixel(0, 0), &[0, 0, 255]);
        assert_eq!(out.pixel(0, 1), &[255, 0, 0]);
    }

    #[test]
    fn test_flip_order_after_rotation() {
        let img = Bitmap::new(2, 1, PixelLayout::Rgb, vec![255, 0, 0, 0, 0, 255]);
        let out = run(&img, json!({ "rotation": 90, "flip_y": true }));

        assert_eq!(out.pixel(0, 0), &[0, 0, 255]);
        assert_eq!(out.pixel(0, 1), &[255, 0, 0]);
    }

    #[test]
    fn test_flip_x_mirrors_columns() {
        let img = rgb_gradient(5, 3);
        let out = run(&img, json!({ "flip_x": true }));
        for y in 0..3 {
            for x in 0..5 {
                assert_eq!(out.pixel(x, y), img.pixel(4 - x, y));
            }
        }
    }

    #[test]
    fn test_grayscale_vignette_scenario() {
        let img = rgb_gradient(100, 100);
        let out = run(&img, json!({ "grayscale": true, "vignette": 0.5 }));

        assert_eq!(out.dimensions(), (100, 100));
        assert_eq!(out.layout, PixelLayout::Rgb);
        assert!(out.pixels.chunks_exact(3).all(|p| p[0] == p[1] && p[1] == p[2]));
    }

    #[test]
    fn test_vignette_corners_darker_than_center() {
        let img = Bitmap::filled(100, 100, PixelLayout::Rgb, &[180, 180, 180]);
        let out = run(&img, json!({ "grayscale": true, "vignette": 0.5 }));

        let center = out.pixel(50, 50)[0];
        for (x, y) in [(0, 0), (99, 0), (0, 99), (99, 99)] {
            assert!(out.pixel(x, y)[0] < center);
        }
    }

    #[test]
    fn test_rgba_rotation_scenario() {
        let img = Bitmap::filled(50, 50, PixelLayout::Rgba, &[200, 100, 50, 255]);
        let out = run(&img, json!({ "rotation": 45 }));

        assert_eq!(out.layout, PixelLayout::Rgba);
        assert!(out.width > 50 && out.height > 50);
        assert_eq!(out.byte_size(), (out.width * out.height * 4) as usize);
        // Exposed corners are transparent, the middle is opaque
        assert_eq!(out.pixel(0, 0)[3], 0);
        assert_eq!(out.pixel(out.width / 2, out.height / 2)[3], 255);
    }

    #[test]
    fn test_alpha_untouched_by_color_stage() {
        let img = rgba_gradient(12, 12);
        let out = run(&img, json!({ "negative": true, "sepia": true, "blur": 1.5 }));

        for (o, i) in out.pixels.chunks_exact(4).zip(img.pixels.chunks_exact(4)) {
            assert_eq!(o[3], i[3]);
        }
    }

    #[test]
    fn test_source_is_not_mutated() {
        let img = rgb_gradient(10, 10);
        let copy = img.clone();
        let first = run(&img, json!({ "negative": true, "rotation": 30 }));
        let second = run(&img, json!({ "negative": true, "rotation": 30 }));

        assert_eq!(img, copy);
        assert_eq!(first, second);
    }

    #[test]
    fn test_all_enhancements_neutral() {
        let img = rgb_gradient(16, 16);
        let out = run(
            &img,
            json!({ "brightness": 1, "contrast": 1.0, "saturation": "1", "sharpness": 1 }),
        );
        assert_eq!(out, img);
    }

    #[test]
    fn test_blur_changes_image() {
        let img = rgb_gradient(16, 16);
        let out = run(&img, json!({ "blur": 2 }));
        assert_eq!(out.dimensions(), img.dimensions());
        assert_ne!(out, img);
    }

    #[test]
    fn test_malformed_param_fails() {
        let img = rgb_gradient(4, 4);
        let result = apply_json(&img, &json!({ "brightness": "bright" }), &PipelineConfig::default());
        assert!(matches!(
            result,
            Err(PipelineError::InvalidParams(ParamError::NotANumber { .. }))
        ));
    }

    #[test]
    fn test_non_object_params_fail() {
        let img = rgb_gradient(4, 4);
        let result = apply_json(&img, &json!(42), &PipelineConfig::default());
        assert_eq!(
            result,
            Err(PipelineError::InvalidParams(ParamError::NotAnObject))
        );
    }

    #[test]
    fn test_bilinear_rotation_config() {
        let img = Bitmap::filled(20, 20, PixelLayout::Rgb, &[90, 90, 90]);
        let config = PipelineConfig {
            rotation_filter: crate::transform::InterpolationFilter::Bilinear,
            ..PipelineConfig::default()
        };
        let mut params = FilterParams::default();
        params.rotation = 30.0;

        let out = apply(&img, &params, &config);
        assert_eq!(out.pixel(out.width / 2, out.height / 2), &[90, 90, 90]);
    }
}

// ============================================================================
// Property-Based Tests
// ============================================================================
