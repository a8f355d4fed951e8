//! Pipeline configuration.
//!
//! Filter parameters describe *what* edit to apply; `PipelineConfig` holds
//! the tunable strategies behind them (resampling filters, preview size,
//! transport quality). `Default` is the production configuration.

use serde::{Deserialize, Serialize};

use crate::decode::FilterType;
use crate::transform::InterpolationFilter;

/// Default cap on preview width in pixels.
pub const DEFAULT_PREVIEW_MAX_WIDTH: u32 = 800;

/// Default JPEG quality for opaque transport encoding.
pub const DEFAULT_JPEG_QUALITY: u8 = 85;

/// Tunable strategies used by the pipeline and its collaborators.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PipelineConfig {
    /// Sampling used when rotating by angles that are not multiples of 90.
    pub rotation_filter: InterpolationFilter,
    /// Resampling used when a stored alpha plane no longer fits the bitmap.
    pub alpha_filter: FilterType,
    /// Resampling used to upsample the vignette mask to full size.
    pub mask_filter: FilterType,
    /// Maximum width of the preview the session edits.
    pub preview_max_width: u32,
    /// JPEG quality (1-100) for results without alpha.
    pub jpeg_quality: u8,
}

impl Default for PipelineConfig {
    fn default() -> Self {
        Self {
            rotation_filter: InterpolationFilter::Nearest,
            alpha_filter: FilterType::Bilinear,
            mask_filter: FilterType::Lanczos3,
            preview_max_width: DEFAULT_PREVIEW_MAX_WIDTH,
            jpeg_quality: DEFAULT_JPEG_QUALITY,
        }
    }
}
