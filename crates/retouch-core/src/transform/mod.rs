//! Geometry stage: rotation and axis flips.
//!
//! # Transform Order
//!
//! 1. Rotation (with canvas expansion)
//! 2. Horizontal flip
//! 3. Vertical flip
//!
//! # Coordinate System
//!
//! - Rotation angles are in degrees, positive = counter-clockwise
//! - Origin is top-left corner

mod flip;
mod rotation;

pub use flip::{flip_horizontal, flip_vertical};
pub use rotation::{apply_rotation, compute_rotated_bounds, InterpolationFilter};
