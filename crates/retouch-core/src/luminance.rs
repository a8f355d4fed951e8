//! Luma calculation using ITU-R 601-2 weights.
//!
//! These are the weights used for grayscale conversion and as the reference
//! image for the saturation and contrast enhancements. Values are computed in
//! 16.16 fixed point so that gray conversion is exact and repeatable.

/// ITU-R 601-2 coefficient for red channel.
pub const LUMA_R: f32 = 0.299;

/// ITU-R 601-2 coefficient for green channel.
pub const LUMA_G: f32 = 0.587;

/// ITU-R 601-2 coefficient for blue channel.
pub const LUMA_B: f32 = 0.114;

// Fixed point versions of the coefficients above (scaled by 65536).
const FIXED_R: u32 = 19595;
const FIXED_G: u32 = 38470;
const FIXED_B: u32 = 7471;

/// Calculate luma from u8 RGB values (0 to 255).
#[inline]
pub fn luma_u8(r: u8, g: u8, b: u8) -> u8 {
    ((r as u32 * FIXED_R + g as u32 * FIXED_G + b as u32 * FIXED_B + 0x8000) >> 16) as u8
}

/// Compute a luma plane from interleaved RGB pixel data.
pub fn luma_plane(rgb: &[u8]) -> Vec<u8> {
    rgb.chunks_exact(3)
        .map(|px| luma_u8(px[0], px[1], px[2]))
        .collect()
}

/// Mean luma of interleaved RGB pixel data, rounded half up.
///
/// Returns 0 for an empty buffer.
pub fn mean_luma(rgb: &[u8]) -> u8 {
    let count = (rgb.len() / 3) as u64;
    if count == 0 {
        return 0;
    }
    let sum: u64 = rgb
        .chunks_exact(3)
        .map(|px| luma_u8(px[0], px[1], px[2]) as u64)
        .sum();
    (sum as f64 / count as f64 + 0.5).floor() as u8
}
