//! Color stage algorithms.
//!
//! Applies the color corrections to an opaque RGB buffer.
//!
//! ## Adjustment Order
//! 1. Per-channel gain (red, green, blue)
//! 2. Sepia
//! 3. Negative
//! 4. Grayscale
//! 5. Brightness
//! 6. Contrast
//! 7. Saturation
//! 8. Sharpness
//!
//! Every step is skipped when its parameter is neutral.
//!
//! ## Enhancements
//! Brightness, contrast, saturation and sharpness are all the same operation
//! with a different reference image:
//!
//! `output = reference + factor * (original - reference)`
//!
//! A factor of 0 yields the reference, 1 the original, and values above 1
//! push further away from the reference.

use image::RgbImage;

use crate::luminance::{luma_plane, luma_u8, mean_luma};
use crate::FilterParams;

/// Channel gains within this distance of 1.0 are all treated as unset.
pub const CHANNEL_GAIN_EPSILON: f64 = 0.01;

/// Sepia color matrix, one row per output channel.
pub const SEPIA_MATRIX: [[f64; 3]; 3] = [
    [0.393, 0.769, 0.189],
    [0.349, 0.686, 0.168],
    [0.272, 0.534, 0.131],
];

/// 3x3 smoothing kernel used as the sharpness reference.
const SMOOTH_KERNEL: [u32; 9] = [1, 1, 1, 1, 5, 1, 1, 1, 1];
const SMOOTH_DIVISOR: u32 = 13;

/// Run the whole color stage on an RGB buffer.
///
/// # Example
/// ```ignore
/// let mut params = FilterParams::default();
/// params.negative = true;
/// let inverted = apply_color_adjustments(rgb, &params);
/// ```
pub fn apply_color_adjustments(mut img: RgbImage, params: &FilterParams) -> RgbImage {
    if needs_channel_gain(params.color_r, params.color_g, params.color_b) {
        log::debug!(
            "Channel gain r={} g={} b={}",
            params.color_r,
            params.color_g,
            params.color_b
        );
        apply_channel_gain(&mut img, [params.color_r, params.color_g, params.color_b]);
    }

    if params.sepia {
        log::debug!("Sepia");
        apply_sepia(&mut img);
    }

    if params.negative {
        log::debug!("Negative");
        apply_negative(&mut img);
    }

    if params.grayscale {
        log::debug!("Grayscale");
        apply_grayscale(&mut img);
    }

    for (enhancement, factor) in [
        (Enhancement::Brightness, params.brightness),
        (Enhancement::Contrast, params.contrast),
        (Enhancement::Saturation, params.saturation),
        (Enhancement::Sharpness, params.sharpness),
    ] {
        if factor != 1.0 {
            log::debug!("{:?} factor={}", enhancement, factor);
            img = enhancement.apply(&img, factor);
        }
    }

    img
}

/// Whether any of the channel gains is far enough from 1.0 to matter.
#[inline]
pub fn needs_channel_gain(r: f64, g: f64, b: f64) -> bool {
    (r - 1.0).abs() > CHANNEL_GAIN_EPSILON
        || (g - 1.0).abs() > CHANNEL_GAIN_EPSILON
        || (b - 1.0).abs() > CHANNEL_GAIN_EPSILON
}

/// Scale each channel by its own factor.
///
/// Channels whose factor is exactly 1.0 are left untouched.
pub fn apply_channel_gain(img: &mut RgbImage, gains: [f64; 3]) {
    for (channel, &gain) in gains.iter().enumerate() {
        if gain == 1.0 {
            continue;
        }
        for px in img.pixels_mut() {
            px.0[channel] = to_u8(px.0[channel] as f64 * gain);
        }
    }
}

/// Apply the fixed sepia matrix.
pub fn apply_sepia(img: &mut RgbImage) {
    for px in img.pixels_mut() {
        let [r, g, b] = px.0.map(f64::from);
        px.0 = SEPIA_MATRIX.map(|row| to_u8(row[0] * r + row[1] * g + row[2] * b));
    }
}

/// Invert every channel.
pub fn apply_negative(img: &mut RgbImage) {
    for px in img.pixels_mut() {
        px.0 = px.0.map(|v| 255 - v);
    }
}

/// Replace every pixel by its luma, keeping three identical channels.
pub fn apply_grayscale(img: &mut RgbImage) {
    for px in img.pixels_mut() {
        let [r, g, b] = px.0;
        let l = luma_u8(r, g, b);
        px.0 = [l, l, l];
    }
}

/// Scalar enhancements blending between an image and a reference.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Enhancement {
    /// Reference is solid black.
    Brightness,
    /// Reference is solid gray at the image's mean luma.
    Contrast,
    /// Reference is the image's own luma.
    Saturation,
    /// Reference is the image smoothed with a 3x3 kernel.
    Sharpness,
}

impl Enhancement {
    /// Build the reference image this enhancement blends against.
    pub fn reference(self, img: &RgbImage) -> RgbImage {
        let (w, h) = img.dimensions();
        match self {
            Enhancement::Brightness => RgbImage::new(w, h),
            Enhancement::Contrast => {
                let mean = mean_luma(img.as_raw());
                RgbImage::from_pixel(w, h, image::Rgb([mean, mean, mean]))
            }
            Enhancement::Saturation => {
                let gray = luma_plane(img.as_raw())
                    .into_iter()
                    .flat_map(|l| [l, l, l])
                    .collect();
                RgbImage::from_raw(w, h, gray).unwrap_or_else(|| img.clone())
            }
            Enhancement::Sharpness => smooth(img),
        }
    }

    /// Blend `img` with its reference by `factor`.
    pub fn apply(self, img: &RgbImage, factor: f64) -> RgbImage {
        let reference = self.reference(img);
        blend(&reference, img, factor)
    }
}

/// `reference + factor * (img - reference)`, per channel.
fn blend(reference: &RgbImage, img: &RgbImage, factor: f64) -> RgbImage {
    let (w, h) = img.dimensions();
    let pixels = reference
        .as_raw()
        .iter()
        .zip(img.as_raw())
        .map(|(&r, &v)| to_u8(r as f64 + factor * (v as f64 - r as f64)))
        .collect();
    RgbImage::from_raw(w, h, pixels).unwrap_or_else(|| img.clone())
}

/// 3x3 smoothing; border pixels keep their original values.
fn smooth(img: &RgbImage) -> RgbImage {
    let (w, h) = img.dimensions();
    let mut out = img.clone();
    if w < 3 || h < 3 {
        return out;
    }

    for y in 1..h - 1 {
        for x in 1..w - 1 {
            let mut sums = [0u32; 3];
            for ky in 0..3 {
                for kx in 0..3 {
                    let weight = SMOOTH_KERNEL[(ky * 3 + kx) as usize];
                    let px = img.get_pixel(x + kx - 1, y + ky - 1).0;
                    for c in 0..3 {
                        sums[c] += px[c] as u32 * weight;
                    }
                }
            }
            out.put_pixel(x, y, image::Rgb(sums.map(|s| to_u8(s as f64 / SMOOTH_DIVISOR as f64))));
        }
    }

    out
}

#[inline]
fn to_u8(v: f64) -> u8 {
    v.round().clamp(0.0, 255.0) as u8
}
