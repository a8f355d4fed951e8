//! Axis mirroring.

use crate::decode::Bitmap;

/// Mirror columns (left becomes right).
pub fn flip_horizontal(image: &Bitmap) -> Bitmap {
    if image.is_empty() {
        return image.clone();
    }
    let row_len = image.width as usize * image.channels();
    let c = image.channels();
    let mut output = Vec::with_capacity(image.pixels.len());

    for row in image.pixels.chunks_exact(row_len) {
        for px in row.chunks_exact(c).rev() {
            output.extend_from_slice(px);
        }
    }

    Bitmap::new(image.width, image.height, image.layout, output)
}

/// Mirror rows (top becomes bottom).
pub fn flip_vertical(image: &Bitmap) -> Bitmap {
    if image.is_empty() {
        return image.clone();
    }
    let row_len = image.width as usize * image.channels();
    let mut output = Vec::with_capacity(image.pixels.len());

    for row in image.pixels.chunks_exact(row_len).rev() {
        output.extend_from_slice(row);
    }

    Bitmap::new(image.width, image.height, image.layout, output)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::decode::PixelLayout;

    fn indexed(width: u32, height: u32, layout: PixelLayout) -> Bitmap {
        let c = layout.channels();
        let pixels = (0..(width * height) as usize)
            .flat_map(|i| std::iter::repeat(i as u8).take(c))
            .collect();
        Bitmap::new(width, height, layout, pixels)
    }

    #[test]
    fn test_flip_horizontal_mirrors_columns() {
        let img = indexed(3, 2, PixelLayout::Luma);
        let flipped = flip_horizontal(&img);
        assert_eq!(flipped.pixels, vec![2, 1, 0, 5, 4, 3]);
    }

    #[test]
    fn test_flip_vertical_mirrors_rows() {
        let img = indexed(3, 2, PixelLayout::Luma);
        let flipped = flip_vertical(&img);
        assert_eq!(flipped.pixels, vec![3, 4, 5, 0, 1, 2]);
    }

    #[test]
    fn test_flip_keeps_pixel_channels_together() {
        let img = Bitmap::new(2, 1, PixelLayout::Rgba, vec![1, 2, 3, 4, 5, 6, 7, 8]);
        let flipped = flip_horizontal(&img);
        assert_eq!(flipped.pixels, vec![5, 6, 7, 8, 1, 2, 3, 4]);
        assert_eq!(flipped.layout, PixelLayout::Rgba);
    }

    #[test]
    fn test_double_flip_is_identity() {
        let img = indexed(7, 5, PixelLayout::Rgb);
        assert_eq!(flip_horizontal(&flip_horizontal(&img)), img);
        assert_eq!(flip_vertical(&flip_vertical(&img)), img);
    }

    #[test]
    fn test_both_flips_equal_half_turn() {
        use crate::transform::{apply_rotation, InterpolationFilter};

        let img = indexed(4, 3, PixelLayout::Rgb);
        let flipped = flip_vertical(&flip_horizontal(&img));
        let rotated = apply_rotation(&img, 180.0, InterpolationFilter::Nearest);
        assert_eq!(flipped, rotated);
    }
}
