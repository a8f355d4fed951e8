//! Editing session state.
//!
//! An [`EditSession`] holds the image currently being edited: the decoded
//! original and a downscaled preview. Every `process` call starts from the
//! stored preview, so parameters are always absolute rather than cumulative.

use serde_json::Value;
use thiserror::Error;

use crate::config::PipelineConfig;
use crate::decode::{decode_image, resize_for_preview, Bitmap, DecodeError};
use crate::encode::{encode_for_transport, EncodeError, EncodedImage};
use crate::pipeline::{apply_json, PipelineError};

/// Errors surfaced by session operations.
#[derive(Debug, Error)]
pub enum SessionError {
    /// No image has been loaded yet.
    #[error("No image loaded")]
    NoImage,

    #[error(transparent)]
    Decode(#[from] DecodeError),

    #[error(transparent)]
    Pipeline(#[from] PipelineError),

    #[error(transparent)]
    Encode(#[from] EncodeError),
}

/// The image being edited and the configuration used to edit it.
#[derive(Debug, Clone, Default)]
pub struct EditSession {
    config: PipelineConfig,
    original: Option<Bitmap>,
    preview: Option<Bitmap>,
}

impl EditSession {
    pub fn new(config: PipelineConfig) -> Self {
        Self {
            config,
            original: None,
            preview: None,
        }
    }

    /// Decode `bytes`, store the original and its preview, and return the
    /// encoded preview.
    ///
    /// On failure the previously loaded image is kept.
    pub fn load(&mut self, bytes: &[u8]) -> Result<EncodedImage, SessionError> {
        let original = decode_image(bytes)?;
        let preview = resize_for_preview(&original, self.config.preview_max_width)?;
        let encoded = encode_for_transport(&preview, self.config.jpeg_quality)?;

        log::info!(
            "Loaded {}x{} {:?} image, preview {}x{}",
            original.width,
            original.height,
            original.layout,
            preview.width,
            preview.height
        );

        self.original = Some(original);
        self.preview = Some(preview);
        Ok(encoded)
    }

    /// Run the pipeline on the stored preview and encode the result.
    pub fn process(&self, params: &Value) -> Result<EncodedImage, SessionError> {
        let preview = self.preview.as_ref().ok_or(SessionError::NoImage)?;
        let result = apply_json(preview, params, &self.config)?;
        Ok(encode_for_transport(&result, self.config.jpeg_quality)?)
    }

    pub fn has_image(&self) -> bool {
        self.preview.is_some()
    }

    /// Full-resolution decoded upload.
    pub fn original(&self) -> Option<&Bitmap> {
        self.original.as_ref()
    }

    /// Downscaled working copy that edits are applied to.
    pub fn preview(&self) -> Option<&Bitmap> {
        self.preview.as_ref()
    }

    pub fn config(&self) -> &PipelineConfig {
        &self.config
    }
}
