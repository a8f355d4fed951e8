//! Vignette masks and mask-driven compositing.
//!
//! ## Algorithm
//!
//! 1. Draw a filled ellipse into a single-channel working mask at half
//!    resolution. The ellipse radius shrinks as the intensity grows.
//! 2. Blur the working mask so the ellipse edge becomes a soft falloff.
//! 3. Upsample the mask to the image size.
//! 4. Composite the image over solid black using the mask as weight.

mod composite;
mod vignette;

pub use composite::{apply_vignette, composite};
pub use vignette::{mask_dimensions, radius_factor, vignette_mask, MIN_MASK_SIZE};
