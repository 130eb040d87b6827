//! # Adaptive Monochrome Conversion
//!
//! Converts an RGBA image to pure black and white using one global
//! threshold derived from the image itself.
//!
//! ## Brightness
//!
//! ```text
//! brightness = alpha × sqrt((R² + G² + B²) / (3 × 255²))      ∈ [0, 1]
//! ```
//!
//! The root-mean-square of the channels tracks perceived lightness better
//! than a plain average, and multiplying by alpha makes transparent pixels
//! count as dark.
//!
//! ## Threshold
//!
//! The threshold is the mean brightness of every pixel. Pixels strictly
//! brighter than it become white, the rest black.
//!
//! When the mean is below [`INVERT_BELOW`] the image is mostly dark (or
//! mostly transparent) and the assignment is inverted, so a near-black
//! logo prints as a white page with a black outline instead of a slab of
//! solid black.
//!
//! ```text
//! threshold ≥ 0.1:   bright → white   dark → black
//! threshold < 0.1:   bright → black   dark → white
//! ```

use image::{GrayImage, Luma, Rgba, RgbaImage};

/// Mean brightness below which black and white are swapped
pub const INVERT_BELOW: f64 = 0.1;

/// Gray value for a black dot
pub const BLACK: u8 = 0;

/// Gray value for a white (unprinted) dot
pub const WHITE: u8 = 255;

/// Alpha-weighted RMS brightness of one pixel, in `[0, 1]`
#[inline]
pub fn brightness(pixel: &Rgba<u8>) -> f64 {
    let [r, g, b, a] = pixel.0;
    let (r, g, b) = (r as f64, g as f64, b as f64);
    let alpha = a as f64 / 255.0;
    let mean_square = (r * r + g * g + b * b) / (3.0 * 255.0 * 255.0);
    alpha * mean_square.sqrt()
}

/// Mean brightness over all pixels (0.0 for an empty image)
pub fn threshold(img: &RgbaImage) -> f64 {
    let count = img.width() as u64 * img.height() as u64;
    if count == 0 {
        return 0.0;
    }
    let sum: f64 = img.pixels().map(brightness).sum();
    sum / count as f64
}

/// Render `img` as pure black/white against its own mean brightness
///
/// Returns a grayscale image holding only [`BLACK`] and [`WHITE`].
///
/// ```
/// use image::{Rgba, RgbaImage};
/// use thermoline::render::monochrome::{self, WHITE};
///
/// // Solid black inverts to white
/// let img = RgbaImage::from_pixel(2, 2, Rgba([0, 0, 0, 255]));
/// let mono = monochrome::to_monochrome(&img);
/// assert!(mono.pixels().all(|p| p.0[0] == WHITE));
/// ```
pub fn to_monochrome(img: &RgbaImage) -> GrayImage {
    let threshold = threshold(img);
    let invert = threshold < INVERT_BELOW;
    log::debug!(
        "monochrome threshold {:.4} over {}x{}{}",
        threshold,
        img.width(),
        img.height(),
        if invert { " (inverted)" } else { "" }
    );

    let mut out = GrayImage::new(img.width(), img.height());
    for (x, y, pixel) in img.enumerate_pixels() {
        let bright = brightness(pixel) > threshold;
        let white = bright != invert;
        out.put_pixel(x, y, Luma([if white { WHITE } else { BLACK }]));
    }
    out
}

/// Force every pixel to black or white around mid-gray
///
/// Used after resampling, which blends edges into gray.
pub fn binarize(img: &mut GrayImage) {
    for pixel in img.pixels_mut() {
        pixel.0[0] = if pixel.0[0] >= 128 { WHITE } else { BLACK };
    }
}

// ============================================================================
// PACKED BITMAP
// ============================================================================

/// A packed 1-bit-per-dot raster
///
/// Rows are `bytes_per_row = ceil(width / 8)` bytes, bit 7 is the leftmost
/// dot, 1 is black. Padding bits at the end of a row are 0 (white).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MonoBitmap {
    pub width: usize,
    pub height: usize,
    pub data: Vec<u8>,
}

impl MonoBitmap {
    /// Pack a black/white grayscale image (anything below 128 is black)
    pub fn from_gray(img: &GrayImage) -> Self {
        let width = img.width() as usize;
        let height = img.height() as usize;
        let bytes_per_row = width.div_ceil(8);
        let mut data = vec![0u8; bytes_per_row * height];

        for (x, y, pixel) in img.enumerate_pixels() {
            if pixel.0[0] < 128 {
                let (x, y) = (x as usize, y as usize);
                data[y * bytes_per_row + x / 8] |= 0x80 >> (x % 8);
            }
        }
        Self {
            width,
            height,
            data,
        }
    }

    #[inline]
    pub fn bytes_per_row(&self) -> usize {
        self.width.div_ceil(8)
    }

    /// Whether the dot at `(x, y)` is black
    #[inline]
    pub fn is_black(&self, x: usize, y: usize) -> bool {
        let byte = self.data[y * self.bytes_per_row() + x / 8];
        byte & (0x80 >> (x % 8)) != 0
    }

    /// Unpack back to a grayscale image (black = 0, white = 255)
    pub fn to_gray(&self) -> GrayImage {
        GrayImage::from_fn(self.width as u32, self.height as u32, |x, y| {
            if self.is_black(x as usize, y as usize) {
                Luma([BLACK])
            } else {
                Luma([WHITE])
            }
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_brightness_extremes() {
        assert_eq!(brightness(&Rgba([0, 0, 0, 255])), 0.0);
        assert!((brightness(&Rgba([255, 255, 255, 255])) - 1.0).abs() < 1e-12);
        // fully transparent white counts as dark
        assert_eq!(brightness(&Rgba([255, 255, 255, 0])), 0.0);
    }

    #[test]
    fn test_brightness_single_channel() {
        // pure red: sqrt(1/3)
        let b = brightness(&Rgba([255, 0, 0, 255]));
        assert!((b - (1.0f64 / 3.0).sqrt()).abs() < 1e-12);
    }

    #[test]
    fn test_black_image_inverts_to_white() {
        let img = RgbaImage::from_pixel(2, 2, Rgba([0, 0, 0, 255]));
        assert_eq!(threshold(&img), 0.0);
        let mono = to_monochrome(&img);
        assert!(mono.pixels().all(|p| p.0[0] == WHITE));
    }

    #[test]
    fn test_half_and_half_keeps_polarity() {
        // left column black, right column white
        let img = RgbaImage::from_fn(2, 1, |x, _| {
            if x == 0 {
                Rgba([0, 0, 0, 255])
            } else {
                Rgba([255, 255, 255, 255])
            }
        });
        let mono = to_monochrome(&img);
        assert_eq!(mono.get_pixel(0, 0).0[0], BLACK);
        assert_eq!(mono.get_pixel(1, 0).0[0], WHITE);
    }

    #[test]
    fn test_dark_image_with_gray_mark_inverts() {
        // mostly black with one dim gray dot: mean < 0.1, so polarity flips
        let img = RgbaImage::from_fn(4, 4, |x, y| {
            if x == 0 && y == 0 {
                Rgba([100, 100, 100, 255])
            } else {
                Rgba([0, 0, 0, 255])
            }
        });
        assert!(threshold(&img) < INVERT_BELOW);
        let mono = to_monochrome(&img);
        assert_eq!(mono.get_pixel(0, 0).0[0], BLACK);
        assert_eq!(mono.get_pixel(1, 1).0[0], WHITE);
    }

    #[test]
    fn test_uniform_bright_image_is_black() {
        // a single pixel equals the mean, so it is not strictly brighter
        let img = RgbaImage::from_pixel(1, 1, Rgba([200, 200, 200, 255]));
        let mono = to_monochrome(&img);
        assert!(mono.pixels().all(|p| p.0[0] == BLACK));
    }

    #[test]
    fn test_binarize() {
        let mut img = GrayImage::from_raw(4, 1, vec![0, 127, 128, 255]).unwrap();
        binarize(&mut img);
        assert_eq!(img.as_raw(), &vec![BLACK, BLACK, WHITE, WHITE]);
    }

    #[test]
    fn test_pack_msb_first_with_padding() {
        // 10 dots wide: black at x = 0 and x = 9
        let img = GrayImage::from_fn(10, 1, |x, _| {
            if x == 0 || x == 9 { Luma([BLACK]) } else { Luma([WHITE]) }
        });
        let bitmap = MonoBitmap::from_gray(&img);
        assert_eq!(bitmap.bytes_per_row(), 2);
        assert_eq!(bitmap.data, vec![0x80, 0x40]);
        assert!(bitmap.is_black(9, 0));
        assert!(!bitmap.is_black(8, 0));
    }

    #[test]
    fn test_unpack_matches_source() {
        let img = GrayImage::from_fn(13, 5, |x, y| {
            if (x + y) % 3 == 0 { Luma([BLACK]) } else { Luma([WHITE]) }
        });
        assert_eq!(MonoBitmap::from_gray(&img).to_gray(), img);
    }
}
