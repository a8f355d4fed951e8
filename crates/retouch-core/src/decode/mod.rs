//! Image decoding and resampling for Retouch.
//!
//! This module provides functionality for:
//! - The [`Bitmap`] type every pipeline stage consumes and produces
//! - Decoding uploaded bytes (JPEG, PNG) into a bitmap
//! - Resizing for preview generation and alpha/mask resampling
//!
//! All operations are synchronous and single-threaded.

mod load;
mod resize;
mod types;

pub use load::decode_image;
pub use resize::{resize, resize_for_preview};
pub use types::{Bitmap, DecodeError, FilterType, PixelLayout};
