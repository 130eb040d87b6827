//! # Resizing Monochrome Images
//!
//! Resampling runs on the already-binarized image with a Lanczos filter,
//! then every pixel is snapped back to black or white so no gray fringe
//! reaches the printer.
//!
//! ## Modes
//!
//! ```text
//! fill_width(img, 384)        fit inside 384 × source height, centered
//! fit(img, 200, 100)          scale to fit inside 200×100, centered,
//!                             remaining area padded white
//! ```

use image::imageops::{self, FilterType};
use image::{GrayImage, Luma};

use super::monochrome::{WHITE, binarize};

/// Resampling filter for all resizes
const FILTER: FilterType = FilterType::Lanczos3;

/// Place `img` on a `width`-dot canvas of the same height
///
/// Wide images shrink to fit the width; narrow ones keep their height and
/// are centered with white margins.
pub fn fill_width(img: &GrayImage, width: u32) -> GrayImage {
    fit(img, width, img.height())
}

/// Scale `img` to fit inside a `box_width × box_height` box, centered
///
/// The aspect ratio is preserved. The output is always exactly the box
/// size, with the unused margin white.
pub fn fit(img: &GrayImage, box_width: u32, box_height: u32) -> GrayImage {
    let mut canvas = GrayImage::from_pixel(box_width, box_height, Luma([WHITE]));
    let (w, h) = img.dimensions();
    if w == 0 || h == 0 || box_width == 0 || box_height == 0 {
        return canvas;
    }

    let scale = f64::min(box_width as f64 / w as f64, box_height as f64 / h as f64);
    let new_w = ((w as f64 * scale).round() as u32).clamp(1, box_width);
    let new_h = ((h as f64 * scale).round() as u32).clamp(1, box_height);
    let scaled = resample(img, new_w, new_h);

    let x = (box_width - new_w) / 2;
    let y = (box_height - new_h) / 2;
    imageops::overlay(&mut canvas, &scaled, x as i64, y as i64);
    canvas
}

fn resample(img: &GrayImage, width: u32, height: u32) -> GrayImage {
    if img.dimensions() == (width, height) {
        return img.clone();
    }
    let mut out = imageops::resize(img, width, height, FILTER);
    binarize(&mut out);
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::render::monochrome::BLACK;

    fn is_monochrome(img: &GrayImage) -> bool {
        img.pixels().all(|p| p.0[0] == BLACK || p.0[0] == WHITE)
    }

    fn checker(w: u32, h: u32) -> GrayImage {
        GrayImage::from_fn(w, h, |x, y| {
            if (x / 4 + y / 4) % 2 == 0 { Luma([BLACK]) } else { Luma([WHITE]) }
        })
    }

    #[test]
    fn test_fill_width_keeps_source_height() {
        let out = fill_width(&checker(100, 50), 384);
        assert_eq!(out.dimensions(), (384, 50));
        assert!(is_monochrome(&out));
        // 100 columns centered in 384
        assert_eq!(out.get_pixel(0, 0).0[0], WHITE);
        assert_eq!(out.get_pixel(383, 0).0[0], WHITE);
        assert_eq!(out.get_pixel(142, 0).0[0], BLACK);
    }

    #[test]
    fn test_fill_width_shrinks_wide_image() {
        let src = GrayImage::from_pixel(800, 100, Luma([BLACK]));
        let out = fill_width(&src, 384);
        assert_eq!(out.dimensions(), (384, 100));
        assert!(is_monochrome(&out));
        // scaled to 384×48, centered at rows 26..74
        assert_eq!(out.get_pixel(192, 0).0[0], WHITE);
        assert_eq!(out.get_pixel(192, 50).0[0], BLACK);
        assert_eq!(out.get_pixel(192, 99).0[0], WHITE);
    }

    #[test]
    fn test_fill_width_tall_narrow_image() {
        let src = GrayImage::from_pixel(1, 200, Luma([BLACK]));
        let out = fill_width(&src, 384);
        assert_eq!(out.dimensions(), (384, 200));
        assert_eq!(out.get_pixel(191, 100).0[0], BLACK);
        assert_eq!(out.get_pixel(0, 100).0[0], WHITE);
    }

    #[test]
    fn test_fit_wide_image_pads_vertically() {
        let src = GrayImage::from_pixel(40, 10, Luma([BLACK]));
        let out = fit(&src, 20, 20);
        assert_eq!(out.dimensions(), (20, 20));
        assert!(is_monochrome(&out));
        // scaled to 20×5, centered at rows 7..12
        assert_eq!(out.get_pixel(10, 0).0[0], WHITE);
        assert_eq!(out.get_pixel(10, 9).0[0], BLACK);
        assert_eq!(out.get_pixel(10, 19).0[0], WHITE);
    }

    #[test]
    fn test_fit_same_size_is_identity() {
        let src = checker(16, 8);
        assert_eq!(fit(&src, 16, 8), src);
    }

    #[test]
    fn test_upscale_has_no_gray_fringe() {
        let out = fit(&checker(7, 5), 61, 33);
        assert!(is_monochrome(&out));
    }
}
