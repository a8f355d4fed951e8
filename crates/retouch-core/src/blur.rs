//! Gaussian blur.
//!
//! The blur radius is used directly as the Gaussian standard deviation.

use image::{GrayImage, ImageBuffer, Pixel, RgbImage};

/// Blur any 8-bit image buffer. Radii at or below zero return a copy.
fn gaussian<P>(img: &ImageBuffer<P, Vec<u8>>, radius: f64) -> ImageBuffer<P, Vec<u8>>
where
    P: Pixel<Subpixel = u8> + 'static,
{
    if radius <= 0.0 || img.width() == 0 || img.height() == 0 {
        return img.clone();
    }
    image::imageops::blur(img, radius as f32)
}

/// Gaussian blur of an RGB buffer.
pub fn blur_rgb(img: &RgbImage, radius: f64) -> RgbImage {
    gaussian(img, radius)
}

/// Gaussian blur of a single-channel plane.
pub fn blur_gray(img: &GrayImage, radius: f64) -> GrayImage {
    gaussian(img, radius)
}
