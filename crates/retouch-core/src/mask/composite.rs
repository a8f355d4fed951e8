//! Mask-driven compositing of two RGB buffers.

use image::{GrayImage, RgbImage};

use super::vignette::vignette_mask;
use crate::decode::FilterType;

/// Blend `fg` over `bg` using `mask` as per-pixel weight.
///
/// `out = (fg * m + bg * (255 - m) + 127) / 255` per channel, with integer
/// division. A mask value of 255 keeps `fg`, 0 keeps `bg`.
///
/// All three buffers must share dimensions; otherwise `fg` is returned
/// unchanged.
pub fn composite(fg: &RgbImage, bg: &RgbImage, mask: &GrayImage) -> RgbImage {
    if fg.dimensions() != bg.dimensions() || fg.dimensions() != mask.dimensions() {
        log::warn!(
            "Composite size mismatch: fg {:?} bg {:?} mask {:?}",
            fg.dimensions(),
            bg.dimensions(),
            mask.dimensions()
        );
        return fg.clone();
    }

    let mut out = fg.clone();
    for ((o, b), m) in out.pixels_mut().zip(bg.pixels()).zip(mask.pixels()) {
        let m = m.0[0] as u32;
        for c in 0..3 {
            o.0[c] = ((o.0[c] as u32 * m + b.0[c] as u32 * (255 - m) + 127) / 255) as u8;
        }
    }
    out
}

/// Darken the edges of `img` with a radial vignette.
///
/// Intensities at or below zero return the image unchanged.
pub fn apply_vignette(img: RgbImage, intensity: f64, mask_filter: FilterType) -> RgbImage {
    if intensity <= 0.0 {
        return img;
    }
    let (w, h) = img.dimensions();
    if w == 0 || h == 0 {
        return img;
    }

    log::debug!("Vignette intensity={} on {}x{}", intensity, w, h);
    let mask = vignette_mask(w, h, intensity, mask_filter);
    let black = RgbImage::new(w, h);
    composite(&img, &black, &mask)
}
