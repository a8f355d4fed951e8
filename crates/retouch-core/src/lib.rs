//! Retouch Core - Image filter pipeline
//!
//! This crate applies a fixed sequence of photo filters to a single bitmap:
//! geometry (rotation and flips), color correction, stylization (blur and
//! vignette), with any transparency carried through untouched. It also
//! provides the glue around the pipeline: decoding uploads, preview
//! thumbnails, transport encoding and an editing session.

pub mod adjustments;
pub mod alpha;
pub mod blur;
pub mod config;
pub mod decode;
pub mod encode;
pub mod luminance;
pub mod mask;
pub mod params;
pub mod pipeline;
pub mod session;
pub mod transform;

pub use config::PipelineConfig;
pub use decode::{Bitmap, PixelLayout};
pub use params::ParamError;
pub use pipeline::{apply, apply_json, PipelineError};
pub use session::{EditSession, SessionError};

/// Filter parameters for a single pipeline run.
///
/// Every field has a neutral default, so an empty parameter map leaves the
/// image untouched.
#[derive(Debug, Clone, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(default)]
pub struct FilterParams {
    /// Rotation in degrees. Positive values turn the image clockwise.
    pub rotation: f64,
    /// Mirror left to right.
    pub flip_x: bool,
    /// Mirror top to bottom.
    pub flip_y: bool,
    /// Red channel gain
    pub color_r: f64,
    /// Green channel gain
    pub color_g: f64,
    /// Blue channel gain
    pub color_b: f64,
    pub sepia: bool,
    pub negative: bool,
    pub grayscale: bool,
    /// Brightness factor (1.0 = unchanged)
    pub brightness: f64,
    /// Contrast factor (1.0 = unchanged)
    pub contrast: f64,
    /// Saturation factor (1.0 = unchanged, 0.0 = gray)
    pub saturation: f64,
    /// Sharpness factor (1.0 = unchanged, 0.0 = smoothed)
    pub sharpness: f64,
    /// Gaussian blur radius in pixels
    pub blur: f64,
    /// Vignette intensity (0 = none, 1 = strong)
    pub vignette: f64,
}

impl Default for FilterParams {
    fn default() -> Self {
        Self {
            rotation: 0.0,
            flip_x: false,
            flip_y: false,
            color_r: 1.0,
            color_g: 1.0,
            color_b: 1.0,
            sepia: false,
            negative: false,
            grayscale: false,
            brightness: 1.0,
            contrast: 1.0,
            saturation: 1.0,
            sharpness: 1.0,
            blur: 0.0,
            vignette: 0.0,
        }
    }
}

impl FilterParams {
    /// Create a new FilterParams with default values
    pub fn new() -> Self {
        Self::default()
    }

    /// Check if all values are at their defaults
    pub fn is_default(&self) -> bool {
        *self == Self::default()
    }
}
