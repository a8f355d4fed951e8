//! Image rotation with canvas expansion.
//!
//! Rotation is performed about the image center. Positive angles rotate
//! counter-clockwise as displayed (y axis pointing down). The output canvas
//! is enlarged so that no source pixel is clipped; exposed corners are
//! filled with zero in every channel, which is black for opaque layouts and
//! fully transparent for layouts carrying alpha.
//!
//! Multiples of 90 degrees are handled as exact pixel transposes, so they
//! are lossless. Any other angle uses inverse mapping: for each output
//! pixel center we find the source position and sample it.
//!
//! ```text
//! src_x =  dx * cos(θ) - dy * sin(θ) + src_cx
//! src_y =  dx * sin(θ) + dy * cos(θ) + src_cy
//! ```

use serde::{Deserialize, Serialize};

use crate::decode::Bitmap;

/// Angles closer than this to a multiple of 90 degrees take the exact path.
const RIGHT_ANGLE_TOLERANCE: f64 = 0.001;

/// Interpolation filter for rotation by arbitrary angles.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum InterpolationFilter {
    /// Nearest source pixel. Keeps hard edges and exact source values.
    #[default]
    Nearest,
    /// Bilinear interpolation over the 4 nearest pixels.
    Bilinear,
}

/// Exact rotations that reduce to reordering pixels.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum RightAngle {
    Zero,
    Ccw90,
    Half,
    Ccw270,
}

fn classify(angle_degrees: f64) -> Option<RightAngle> {
    let normalized = angle_degrees.rem_euclid(360.0);
    let near = |target: f64| (normalized - target).abs() < RIGHT_ANGLE_TOLERANCE;

    if near(0.0) || near(360.0) {
        Some(RightAngle::Zero)
    } else if near(90.0) {
        Some(RightAngle::Ccw90)
    } else if near(180.0) {
        Some(RightAngle::Half)
    } else if near(270.0) {
        Some(RightAngle::Ccw270)
    } else {
        None
    }
}

/// Compute the dimensions of the bounding box for a rotated image.
///
/// When an image is rotated, the corners extend beyond the original bounds.
/// This function calculates the minimum bounding box that contains the
/// entire rotated image. Multiples of 360 keep the original size and odd
/// multiples of 90 swap it.
pub fn compute_rotated_bounds(width: u32, height: u32, angle_degrees: f64) -> (u32, u32) {
    match classify(angle_degrees) {
        Some(RightAngle::Zero) | Some(RightAngle::Half) => return (width, height),
        Some(RightAngle::Ccw90) | Some(RightAngle::Ccw270) => return (height, width),
        None => {}
    }

    let angle_rad = angle_degrees.to_radians();
    let cos = angle_rad.cos().abs();
    let sin = angle_rad.sin().abs();

    let w = width as f64;
    let h = height as f64;

    // new_w = |w*cos| + |h*sin|
    // new_h = |w*sin| + |h*cos|
    let new_w = (w * cos + h * sin).round() as u32;
    let new_h = (w * sin + h * cos).round() as u32;

    (new_w.max(1), new_h.max(1))
}

/// Rotate an image about its center, expanding the canvas to fit.
///
/// Works on every pixel layout; alpha is rotated along with color, so
/// exposed corners of an RGBA image are transparent.
///
/// # Arguments
///
/// * `image` - Source image to rotate
/// * `angle_degrees` - Rotation angle in degrees (positive = counter-clockwise)
/// * `filter` - Sampling method for angles that are not multiples of 90
pub fn apply_rotation(image: &Bitmap, angle_degrees: f64, filter: InterpolationFilter) -> Bitmap {
    match classify(angle_degrees) {
        Some(RightAngle::Zero) => image.clone(),
        Some(right) => rotate_exact(image, right),
        None => rotate_resampled(image, angle_degrees, filter),
    }
}

/// Lossless rotation by a multiple of 90 degrees.
fn rotate_exact(image: &Bitmap, right: RightAngle) -> Bitmap {
    let (w, h) = (image.width, image.height);
    let (dst_w, dst_h) = match right {
        RightAngle::Ccw90 | RightAngle::Ccw270 => (h, w),
        RightAngle::Zero | RightAngle::Half => (w, h),
    };
    let c = image.channels();
    let mut output = Vec::with_capacity(image.pixels.len());

    for dst_y in 0..dst_h {
        for dst_x in 0..dst_w {
            let (src_x, src_y) = match right {
                RightAngle::Zero => (dst_x, dst_y),
                RightAngle::Ccw90 => (w - 1 - dst_y, dst_x),
                RightAngle::Half => (w - 1 - dst_x, h - 1 - dst_y),
                RightAngle::Ccw270 => (dst_y, h - 1 - dst_x),
            };
            output.extend_from_slice(image.pixel(src_x, src_y));
        }
    }

    debug_assert_eq!(output.len(), dst_w as usize * dst_h as usize * c);
    Bitmap::new(dst_w, dst_h, image.layout, output)
}

fn rotate_resampled(image: &Bitmap, angle_degrees: f64, filter: InterpolationFilter) -> Bitmap {
    let (src_w, src_h) = (image.width as f64, image.height as f64);
    let (dst_w, dst_h) = compute_rotated_bounds(image.width, image.height, angle_degrees);
    let c = image.channels();

    let angle_rad = angle_degrees.to_radians();
    let cos = angle_rad.cos();
    let sin = angle_rad.sin();

    // Center of source and destination images
    let src_cx = src_w / 2.0;
    let src_cy = src_h / 2.0;
    let dst_cx = dst_w as f64 / 2.0;
    let dst_cy = dst_h as f64 / 2.0;

    let mut output = vec![0u8; dst_w as usize * dst_h as usize * c];

    for dst_y in 0..dst_h {
        for dst_x in 0..dst_w {
            // Pixel center relative to the destination center
            let dx = dst_x as f64 + 0.5 - dst_cx;
            let dy = dst_y as f64 + 0.5 - dst_cy;

            let src_x = dx * cos - dy * sin + src_cx;
            let src_y = dx * sin + dy * cos + src_cy;

            let dst_idx = (dst_y as usize * dst_w as usize + dst_x as usize) * c;
            let out = &mut output[dst_idx..dst_idx + c];

            match filter {
                InterpolationFilter::Nearest => sample_nearest(image, src_x, src_y, out),
                InterpolationFilter::Bilinear => sample_bilinear(image, src_x, src_y, out),
            }
        }
    }

    Bitmap::new(dst_w, dst_h, image.layout, output)
}

/// Copy the source pixel containing (x, y); leaves `out` zeroed outside.
fn sample_nearest(image: &Bitmap, x: f64, y: f64, out: &mut [u8]) {
    if x < 0.0 || y < 0.0 || x >= image.width as f64 || y >= image.height as f64 {
        return;
    }
    out.copy_from_slice(image.pixel(x as u32, y as u32));
}

/// Sample a pixel using bilinear interpolation.
///
/// Bilinear interpolation considers the 4 nearest pixel centers and weights
/// their contribution based on distance. Positions more than half a pixel
/// outside the source stay zero.
fn sample_bilinear(image: &Bitmap, x: f64, y: f64, out: &mut [u8]) {
    let (w, h) = (image.width as f64, image.height as f64);
    if x < 0.0 || y < 0.0 || x >= w || y >= h {
        return;
    }

    // Move to pixel-center coordinates and clamp onto the grid
    let fx_pos = (x - 0.5).clamp(0.0, w - 1.0);
    let fy_pos = (y - 0.5).clamp(0.0, h - 1.0);

    let x0 = fx_pos.floor() as u32;
    let y0 = fy_pos.floor() as u32;
    let x1 = (x0 + 1).min(image.width - 1);
    let y1 = (y0 + 1).min(image.height - 1);

    // Fractional distances
    let fx = fx_pos - x0 as f64;
    let fy = fy_pos - y0 as f64;

    let p00 = image.pixel(x0, y0);
    let p10 = image.pixel(x1, y0);
    let p01 = image.pixel(x0, y1);
    let p11 = image.pixel(x1, y1);

    for i in 0..out.len() {
        let v = p00[i] as f64 * (1.0 - fx) * (1.0 - fy)
            + p10[i] as f64 * fx * (1.0 - fy)
            + p01[i] as f64 * (1.0 - fx) * fy
            + p11[i] as f64 * fx * fy;
        out[i] = v.clamp(0.0, 255.0).round() as u8;
    }
}
