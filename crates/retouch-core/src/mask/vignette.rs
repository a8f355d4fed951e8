//! Procedural vignette mask.
//!
//! The mask is drawn at half resolution (never below 10x10), blurred there,
//! and upsampled to the target size. Working small keeps the blur cheap and
//! the upsample smooths any remaining banding.
//!
//! Mask values are 255 where the image is kept and fall off to 0 towards
//! the corners, where the image is replaced by black.

use image::{GrayImage, Luma};

use crate::blur::blur_gray;
use crate::decode::FilterType;

/// Smallest working mask size along either axis.
pub const MIN_MASK_SIZE: u32 = 10;

/// Ellipse radius factor at zero intensity.
const BASE_RADIUS: f64 = 0.75;

/// Radius shrink per unit of intensity.
const RADIUS_FALLOFF: f64 = 0.4;

/// Mask blur radius, relative to the smaller working dimension.
const BLUR_FACTOR: f64 = 0.4;

/// Working mask dimensions for a `width` x `height` image.
#[inline]
pub fn mask_dimensions(width: u32, height: u32) -> (u32, u32) {
    (
        (width / 2).max(MIN_MASK_SIZE),
        (height / 2).max(MIN_MASK_SIZE),
    )
}

/// Fraction of the working mask size used as the ellipse radius.
///
/// Strictly decreasing in `intensity`; not clamped, so intensities above
/// 1.875 leave an empty ellipse.
#[inline]
pub fn radius_factor(intensity: f64) -> f64 {
    BASE_RADIUS - RADIUS_FALLOFF * intensity
}

/// Build a vignette mask for a `width` x `height` image.
///
/// `filter` controls the final upsample from the working size.
pub fn vignette_mask(width: u32, height: u32, intensity: f64, filter: FilterType) -> GrayImage {
    let (mw, mh) = mask_dimensions(width, height);
    let mask = draw_ellipse(mw, mh, radius_factor(intensity));

    let radius = BLUR_FACTOR * mw.min(mh) as f64;
    let blurred = blur_gray(&mask, radius);

    log::trace!(
        "Vignette mask {}x{} -> {}x{}, blur radius {:.1}",
        mw,
        mh,
        width,
        height,
        radius
    );

    if (mw, mh) == (width, height) {
        blurred
    } else {
        image::imageops::resize(&blurred, width, height, filter.to_image_filter())
    }
}

/// Filled ellipse centered on the working mask.
fn draw_ellipse(mw: u32, mh: u32, factor: f64) -> GrayImage {
    let mut mask = GrayImage::new(mw, mh);
    let rx = mw as f64 * factor;
    let ry = mh as f64 * factor;
    if rx <= 0.0 || ry <= 0.0 {
        return mask;
    }

    let cx = (mw / 2) as f64;
    let cy = (mh / 2) as f64;
    for (x, y, px) in mask.enumerate_pixels_mut() {
        let nx = (x as f64 - cx) / rx;
        let ny = (y as f64 - cy) / ry;
        if nx * nx + ny * ny <= 1.0 {
            *px = Luma([255]);
        }
    }
    mask
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_mask_dimensions_half_size() {
        assert_eq!(mask_dimensions(100, 60), (50, 30));
        assert_eq!(mask_dimensions(101, 61), (50, 30));
    }

    #[test]
    fn test_mask_dimensions_floor() {
        assert_eq!(mask_dimensions(1, 1), (10, 10));
        assert_eq!(mask_dimensions(19, 400), (10, 200));
    }

    #[test]
    fn test_radius_factor_values() {
        assert!((radius_factor(0.0) - 0.75).abs() < 1e-12);
        assert!((radius_factor(0.5) - 0.55).abs() < 1e-12);
        assert!((radius_factor(1.0) - 0.35).abs() < 1e-12);
    }

    #[test]
    fn test_ellipse_center_filled_corners_empty() {
        let mask = draw_ellipse(20, 20, 0.55);
        assert_eq!(mask.get_pixel(10, 10).0[0], 255);
        assert_eq!(mask.get_pixel(0, 0).0[0], 0);
        assert_eq!(mask.get_pixel(19, 19).0[0], 0);
    }

    #[test]
    fn test_non_positive_radius_is_empty() {
        let mask = draw_ellipse(20, 20, radius_factor(2.0));
        assert!(mask.as_raw().iter().all(|&v| v == 0));
    }

    #[test]
    fn test_mask_matches_target_size() {
        let mask = vignette_mask(37, 23, 0.5, FilterType::Lanczos3);
        assert_eq!(mask.dimensions(), (37, 23));
    }

    #[test]
    fn test_tiny_target_upsampled_from_floor() {
        let mask = vignette_mask(4, 3, 0.5, FilterType::Bilinear);
        assert_eq!(mask.dimensions(), (4, 3));
    }

    #[test]
    fn test_mask_center_brighter_than_corner() {
        let mask = vignette_mask(100, 100, 0.5, FilterType::Lanczos3);
        let center = mask.get_pixel(50, 50).0[0];
        let corner = mask.get_pixel(0, 0).0[0];
        assert!(center > corner, "center {} corner {}", center, corner);
    }

    #[test]
    fn test_stronger_intensity_shrinks_mask() {
        let total = |i: f64| -> u64 {
            vignette_mask(60, 60, i, FilterType::Bilinear)
                .as_raw()
                .iter()
                .map(|&v| v as u64)
                .sum()
        };
        assert!(total(0.2) > total(0.9));
    }
}
