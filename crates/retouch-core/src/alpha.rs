//! Alpha extraction and restoration.
//!
//! Color and stylization stages only ever see an opaque RGB buffer. Any
//! transparency is split off once, right after the geometry stage, and
//! merged back at the very end. [`ColorBuffer`] records which of the two
//! cases applies so later stages never inspect channel counts.

use image::{GrayImage, RgbImage};

use crate::decode::{Bitmap, FilterType, PixelLayout};

/// A detached 8-bit alpha plane.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AlphaChannel {
    plane: GrayImage,
}

impl AlphaChannel {
    /// Wrap an existing alpha plane.
    pub fn new(plane: GrayImage) -> Self {
        Self { plane }
    }

    /// Dimensions at the moment of extraction.
    pub fn dimensions(&self) -> (u32, u32) {
        self.plane.dimensions()
    }

    /// Raw alpha values in row-major order.
    pub fn as_raw(&self) -> &[u8] {
        self.plane.as_raw()
    }

    /// The alpha plane at the requested size, resampling only if it differs.
    fn fitted(self, width: u32, height: u32, filter: FilterType) -> GrayImage {
        if self.plane.dimensions() == (width, height) {
            return self.plane;
        }
        log::debug!(
            "Resampling alpha {}x{} -> {}x{}",
            self.plane.width(),
            self.plane.height(),
            width,
            height
        );
        image::imageops::resize(&self.plane, width, height, filter.to_image_filter())
    }
}

/// An opaque RGB working buffer, with the alpha plane it was split from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ColorBuffer {
    /// Source had no usable transparency.
    Opaque(RgbImage),
    /// Source was RGBA; alpha is held until restoration.
    Transparent(RgbImage, AlphaChannel),
}

impl ColorBuffer {
    /// Split a bitmap into an RGB buffer and, for RGBA input, its alpha plane.
    ///
    /// Gray layouts are expanded to three identical channels. Only a true
    /// four-channel input keeps its transparency; the alpha of a gray+alpha
    /// bitmap is dropped.
    pub fn extract(image: Bitmap) -> Self {
        let (w, h) = image.dimensions();
        let pixel_count = w as usize * h as usize;

        let (rgb, alpha) = match image.layout {
            PixelLayout::Rgb => (image.pixels, None),
            PixelLayout::Rgba => {
                let mut rgb = Vec::with_capacity(pixel_count * 3);
                let mut alpha = Vec::with_capacity(pixel_count);
                for px in image.pixels.chunks_exact(4) {
                    rgb.extend_from_slice(&px[..3]);
                    alpha.push(px[3]);
                }
                (rgb, Some(alpha))
            }
            PixelLayout::Luma | PixelLayout::LumaAlpha => {
                let c = image.channels();
                let rgb = image
                    .pixels
                    .chunks_exact(c)
                    .flat_map(|px| [px[0], px[0], px[0]])
                    .collect();
                (rgb, None)
            }
        };

        let color = RgbImage::from_raw(w, h, rgb).unwrap_or_else(|| RgbImage::new(w, h));
        match alpha.and_then(|a| GrayImage::from_raw(w, h, a)) {
            Some(plane) => {
                log::debug!("Extracted alpha channel {}x{}", w, h);
                ColorBuffer::Transparent(color, AlphaChannel::new(plane))
            }
            None => ColorBuffer::Opaque(color),
        }
    }

    /// Whether an alpha plane is being held.
    pub fn has_alpha(&self) -> bool {
        matches!(self, ColorBuffer::Transparent(..))
    }

    /// The RGB working buffer.
    pub fn color(&self) -> &RgbImage {
        match self {
            ColorBuffer::Opaque(color) | ColorBuffer::Transparent(color, _) => color,
        }
    }

    /// Replace the RGB buffer through `f`, keeping the held alpha.
    pub fn map_color(self, f: impl FnOnce(RgbImage) -> RgbImage) -> Self {
        match self {
            ColorBuffer::Opaque(color) => ColorBuffer::Opaque(f(color)),
            ColorBuffer::Transparent(color, alpha) => ColorBuffer::Transparent(f(color), alpha),
        }
    }

    /// Reattach the alpha plane, resampling it if the buffer changed size.
    ///
    /// Produces `Rgba` when alpha was held and `Rgb` otherwise.
    pub fn restore(self, alpha_filter: FilterType) -> Bitmap {
        match self {
            ColorBuffer::Opaque(color) => Bitmap::from_rgb_image(color),
            ColorBuffer::Transparent(color, alpha) => {
                let (w, h) = color.dimensions();
                let plane = alpha.fitted(w, h, alpha_filter);
                let mut rgba = Vec::with_capacity(w as usize * h as usize * 4);
                for (px, a) in color.as_raw().chunks_exact(3).zip(plane.as_raw()) {
                    rgba.extend_from_slice(px);
                    rgba.push(*a);
                }
                Bitmap::new(w, h, PixelLayout::Rgba, rgba)
            }
        }
    }
}
