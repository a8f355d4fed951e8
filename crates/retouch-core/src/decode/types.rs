//! Core bitmap types shared by every pipeline stage.

use image::{DynamicImage, GrayAlphaImage, GrayImage, RgbImage, RgbaImage};
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Error types for image decoding and resampling operations.
#[derive(Debug, Error)]
pub enum DecodeError {
    /// The file format is not recognized or supported.
    #[error("Invalid or unsupported image format")]
    InvalidFormat,

    /// The image file is corrupted or incomplete.
    #[error("Corrupted or incomplete image file: {0}")]
    CorruptedFile(String),

    /// Requested or decoded dimensions are zero.
    #[error("Invalid dimensions: {width}x{height}")]
    InvalidDimensions { width: u32, height: u32 },
}

/// Filter type for image resizing operations.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum FilterType {
    /// Nearest neighbor interpolation (fastest, lowest quality).
    Nearest,
    /// Bilinear interpolation (fast, acceptable quality).
    #[default]
    Bilinear,
    /// Lanczos3 interpolation (slower, highest quality).
    Lanczos3,
}

impl FilterType {
    /// Convert to the image crate's FilterType.
    pub fn to_image_filter(self) -> image::imageops::FilterType {
        match self {
            FilterType::Nearest => image::imageops::FilterType::Nearest,
            FilterType::Bilinear => image::imageops::FilterType::Triangle,
            FilterType::Lanczos3 => image::imageops::FilterType::Lanczos3,
        }
    }
}

/// Channel arrangement of a bitmap's interleaved pixel data.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum PixelLayout {
    /// Single gray channel.
    Luma,
    /// Gray plus alpha.
    LumaAlpha,
    /// Opaque red, green, blue.
    Rgb,
    /// Red, green, blue plus alpha.
    Rgba,
}

impl PixelLayout {
    /// Number of interleaved 8-bit channels per pixel.
    #[inline]
    pub fn channels(self) -> usize {
        match self {
            PixelLayout::Luma => 1,
            PixelLayout::LumaAlpha => 2,
            PixelLayout::Rgb => 3,
            PixelLayout::Rgba => 4,
        }
    }

    /// Whether the last channel is an alpha channel.
    #[inline]
    pub fn has_alpha(self) -> bool {
        matches!(self, PixelLayout::LumaAlpha | PixelLayout::Rgba)
    }

    /// Layout for a given channel count, if it is one we know.
    pub fn from_channels(channels: usize) -> Option<Self> {
        match channels {
            1 => Some(PixelLayout::Luma),
            2 => Some(PixelLayout::LumaAlpha),
            3 => Some(PixelLayout::Rgb),
            4 => Some(PixelLayout::Rgba),
            _ => None,
        }
    }
}

/// A decoded 8-bit bitmap.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Bitmap {
    /// Image width in pixels.
    pub width: u32,
    /// Image height in pixels.
    pub height: u32,
    /// Channel arrangement of `pixels`.
    pub layout: PixelLayout,
    /// Interleaved pixel data in row-major order.
    /// Length should be width * height * layout.channels().
    pub pixels: Vec<u8>,
}

impl Bitmap {
    /// Create a new Bitmap with the given dimensions, layout and pixel data.
    pub fn new(width: u32, height: u32, layout: PixelLayout, pixels: Vec<u8>) -> Self {
        debug_assert_eq!(
            pixels.len(),
            width as usize * height as usize * layout.channels(),
            "Pixel buffer size mismatch"
        );
        Self {
            width,
            height,
            layout,
            pixels,
        }
    }

    /// Create a Bitmap filled with a single pixel value.
    pub fn filled(width: u32, height: u32, layout: PixelLayout, pixel: &[u8]) -> Self {
        debug_assert_eq!(pixel.len(), layout.channels());
        let pixels = pixel
            .iter()
            .copied()
            .cycle()
            .take(width as usize * height as usize * layout.channels())
            .collect();
        Self::new(width, height, layout, pixels)
    }

    /// Create a Bitmap from an image::RgbImage.
    pub fn from_rgb_image(img: RgbImage) -> Self {
        let (width, height) = img.dimensions();
        Self::new(width, height, PixelLayout::Rgb, img.into_raw())
    }

    /// Create a Bitmap from an image::RgbaImage.
    pub fn from_rgba_image(img: RgbaImage) -> Self {
        let (width, height) = img.dimensions();
        Self::new(width, height, PixelLayout::Rgba, img.into_raw())
    }

    /// Create a Bitmap from any decoded image, narrowing to 8 bits per channel.
    ///
    /// The layout follows the decoded color type: color images become
    /// `Rgb`/`Rgba`, gray images `Luma`/`LumaAlpha`.
    pub fn from_dynamic(img: DynamicImage) -> Self {
        let color = img.color();
        let (width, height) = (img.width(), img.height());
        match (color.has_color(), color.has_alpha()) {
            (true, true) => Self::from_rgba_image(img.into_rgba8()),
            (true, false) => Self::from_rgb_image(img.into_rgb8()),
            (false, true) => Self::new(
                width,
                height,
                PixelLayout::LumaAlpha,
                img.into_luma_alpha8().into_raw(),
            ),
            (false, false) => {
                Self::new(width, height, PixelLayout::Luma, img.into_luma8().into_raw())
            }
        }
    }

    /// Convert to a DynamicImage for use with `image::imageops`.
    ///
    /// Returns `None` if the pixel buffer does not match the dimensions.
    pub fn to_dynamic(&self) -> Option<DynamicImage> {
        let (w, h) = (self.width, self.height);
        let pixels = self.pixels.clone();
        let img = match self.layout {
            PixelLayout::Luma => DynamicImage::ImageLuma8(GrayImage::from_raw(w, h, pixels)?),
            PixelLayout::LumaAlpha => {
                DynamicImage::ImageLumaA8(GrayAlphaImage::from_raw(w, h, pixels)?)
            }
            PixelLayout::Rgb => DynamicImage::ImageRgb8(RgbImage::from_raw(w, h, pixels)?),
            PixelLayout::Rgba => DynamicImage::ImageRgba8(RgbaImage::from_raw(w, h, pixels)?),
        };
        Some(img)
    }

    /// Number of channels per pixel.
    #[inline]
    pub fn channels(&self) -> usize {
        self.layout.channels()
    }

    /// Width and height as a tuple.
    #[inline]
    pub fn dimensions(&self) -> (u32, u32) {
        (self.width, self.height)
    }

    /// Get the total number of pixels.
    pub fn pixel_count(&self) -> u32 {
        self.width * self.height
    }

    /// Get the size of the pixel buffer in bytes.
    pub fn byte_size(&self) -> usize {
        self.pixels.len()
    }

    /// Check if this is an empty/invalid image.
    pub fn is_empty(&self) -> bool {
        self.width == 0 || self.height == 0 || self.pixels.is_empty()
    }

    /// Borrow the channels of the pixel at (x, y).
    #[inline]
    pub fn pixel(&self, x: u32, y: u32) -> &[u8] {
        let c = self.channels();
        let idx = (y as usize * self.width as usize + x as usize) * c;
        &self.pixels[idx..idx + c]
    }
}
