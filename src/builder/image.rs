//! # Image Blocks
//!
//! Encodes a source image into alignment + raster command bytes, plus a PNG
//! preview of the exact dots that will be printed.
//!
//! ## Pipeline
//!
//! ```text
//! bytes ─decode─► RGBA ─threshold─► B/W ─resize─► MonoBitmap
//!                                                    │
//!                        ┌───────────────────────────┤
//!                        ▼                           ▼
//!          align + GS v 0 / ESC * strips        preview PNG
//! ```
//!
//! ## Example
//!
//! ```no_run
//! use thermoline::builder::image::{ImageOptions, RasterMode, encode_image};
//! use thermoline::printer::PrinterConfig;
//! use thermoline::protocol::text::Alignment;
//!
//! let png = std::fs::read("logo.png")?;
//! let options = ImageOptions {
//!     fill_width: true,
//!     alignment: Alignment::Center,
//!     raster_mode: RasterMode::EscAsterisk,
//!     ..Default::default()
//! };
//! let encoded = encode_image(&png, &options, &PrinterConfig::default())?;
//! println!("{} raster bytes", encoded.raster.len());
//! # Ok::<(), thermoline::ThermolineError>(())
//! ```

use image::GrayImage;

use crate::error::ThermolineError;
use crate::printer::PrinterConfig;
use crate::protocol::graphics;
use crate::protocol::text::{Alignment, align};
use crate::render::monochrome::{MonoBitmap, to_monochrome};
use crate::render::{preview, scale};

/// Raster serialization
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum RasterMode {
    /// `GS v 0`: the whole image in one command
    #[default]
    GsV,
    /// `ESC *`: 24-dot strips, one per line feed
    EscAsterisk,
}

/// How an image block is scaled, placed and serialized
///
/// | Field | Default | Effect |
/// |-------|---------|--------|
/// | `width` | `None` | Target box width (source width if only `height` is set) |
/// | `height` | `None` | Target box height (source height if only `width` is set) |
/// | `fill_width` | `false` | Fit into a head-width × source-height canvas; only when `width` or `height` is set, and then wins over both |
/// | `alignment` | `Left` | Alignment command sent before the raster |
/// | `raster_mode` | `GsV` | Raster serialization |
///
/// With neither `width` nor `height` the image prints at its native size.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct ImageOptions {
    pub width: Option<u32>,
    pub height: Option<u32>,
    pub fill_width: bool,
    pub alignment: Alignment,
    pub raster_mode: RasterMode,
}

/// Output of [`encode_image`]
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EncodedImage {
    /// Alignment command followed by the raster command(s)
    pub raster: Vec<u8>,
    /// PNG of the scaled monochrome bitmap
    pub preview: Vec<u8>,
    /// Printed size in dots
    pub width: usize,
    pub height: usize,
}

/// Decode, binarize, scale and serialize one image
///
/// ## Errors
///
/// - `Decode` when `source` is not a decodable image or has no pixels
/// - `InvalidCommand` when the scaled image exceeds 65535 rows
pub fn encode_image(
    source: &[u8],
    options: &ImageOptions,
    config: &PrinterConfig,
) -> Result<EncodedImage, ThermolineError> {
    let decoded = image::load_from_memory(source)
        .map_err(|e| ThermolineError::Decode(format!("Failed to decode image: {}", e)))?;
    if decoded.width() == 0 || decoded.height() == 0 {
        return Err(ThermolineError::Decode("image has no pixels".to_string()));
    }

    let mono = to_monochrome(&decoded.to_rgba8());
    let scaled = apply_scaling(&mono, options, config);
    let bitmap = MonoBitmap::from_gray(&scaled);
    log::debug!(
        "image {}x{} -> {}x{} dots ({:?})",
        decoded.width(),
        decoded.height(),
        bitmap.width,
        bitmap.height,
        options.raster_mode
    );

    let preview = preview::encode_png(&bitmap)?;
    let raster = serialize(&bitmap, options)?;

    Ok(EncodedImage {
        raster,
        preview,
        width: bitmap.width,
        height: bitmap.height,
    })
}

fn apply_scaling(img: &GrayImage, options: &ImageOptions, config: &PrinterConfig) -> GrayImage {
    if options.width.is_none() && options.height.is_none() {
        return img.clone();
    }
    if options.fill_width {
        return scale::fill_width(img, config.width_dots());
    }
    let width = options.width.unwrap_or(img.width());
    let height = options.height.unwrap_or(img.height());
    scale::fit(img, width, height)
}

/// Alignment bytes followed by the raster in the requested mode
pub fn serialize(bitmap: &MonoBitmap, options: &ImageOptions) -> Result<Vec<u8>, ThermolineError> {
    let body = match options.raster_mode {
        RasterMode::GsV => graphics::raster(bitmap.bytes_per_row(), bitmap.height, &bitmap.data)?,
        RasterMode::EscAsterisk => {
            graphics::strips(bitmap.bytes_per_row(), bitmap.height, &bitmap.data)?
        }
    };
    let mut out = align(options.alignment);
    out.extend(body);
    Ok(out)
}

#[cfg(test)]
mod tests {
    use super::*;
    use image::{ImageFormat, Rgba, RgbaImage};
    use std::io::Cursor;

    fn png(img: &RgbaImage) -> Vec<u8> {
        let mut bytes = Vec::new();
        img.write_to(&mut Cursor::new(&mut bytes), ImageFormat::Png).unwrap();
        bytes
    }

    /// 16×2, left half black, right half white
    fn half_black() -> Vec<u8> {
        png(&RgbaImage::from_fn(16, 2, |x, _| {
            if x < 8 {
                Rgba([0, 0, 0, 255])
            } else {
                Rgba([255, 255, 255, 255])
            }
        }))
    }

    #[test]
    fn test_gsv_unscaled() {
        let out = encode_image(&half_black(), &ImageOptions::default(), &PrinterConfig::default())
            .unwrap();
        assert_eq!(
            out.raster,
            vec![
                0x1B, 0x61, 0x00, // left
                0x1D, 0x76, 0x30, 0x00, 2, 0, 2, 0, // header
                0xFF, 0x00, // row 0
                0xFF, 0x00, // row 1
            ]
        );
        assert_eq!((out.width, out.height), (16, 2));
    }

    #[test]
    fn test_alignment_prefix() {
        let options = ImageOptions {
            alignment: Alignment::Right,
            ..Default::default()
        };
        let out = encode_image(&half_black(), &options, &PrinterConfig::default()).unwrap();
        assert_eq!(&out.raster[0..3], &[0x1B, 0x61, 0x02]);
    }

    #[test]
    fn test_esc_asterisk_mode() {
        let options = ImageOptions {
            raster_mode: RasterMode::EscAsterisk,
            ..Default::default()
        };
        let out = encode_image(&half_black(), &options, &PrinterConfig::default()).unwrap();
        let body = &out.raster[3..];
        assert_eq!(&body[0..3], &[0x1B, 0x33, 24]);
        assert_eq!(&body[3..8], &[0x1B, 0x2A, 0x21, 16, 0]);
        // columns 0..8 black in rows 0 and 1
        assert_eq!(&body[8..11], &[0xC0, 0x00, 0x00]);
        // column 8 is white
        assert_eq!(&body[8 + 8 * 3..8 + 8 * 3 + 3], &[0x00, 0x00, 0x00]);
        assert_eq!(body.len(), 3 + 5 + 16 * 3 + 1);
        assert_eq!(*body.last().unwrap(), 0x0A);
    }

    #[test]
    fn test_fill_width_alone_keeps_native_size() {
        let options = ImageOptions {
            fill_width: true,
            ..Default::default()
        };
        let out = encode_image(&half_black(), &options, &PrinterConfig::default()).unwrap();
        assert_eq!((out.width, out.height), (16, 2));
    }

    #[test]
    fn test_fill_width_with_target_uses_printer_width() {
        let options = ImageOptions {
            width: Some(100),
            fill_width: true,
            ..Default::default()
        };
        let out = encode_image(&half_black(), &options, &PrinterConfig::default()).unwrap();
        assert_eq!((out.width, out.height), (384, 2));
        // header reports 48 bytes per row, 2 rows
        assert_eq!(&out.raster[3..11], &[0x1D, 0x76, 0x30, 0x00, 48, 0, 2, 0]);
    }

    #[test]
    fn test_fill_width_tall_narrow_image() {
        let src = png(&RgbaImage::from_fn(1, 200, |_, y| {
            if y % 2 == 0 {
                Rgba([0, 0, 0, 255])
            } else {
                Rgba([255, 255, 255, 255])
            }
        }));
        let options = ImageOptions {
            height: Some(200),
            fill_width: true,
            ..Default::default()
        };
        let out = encode_image(&src, &options, &PrinterConfig::default()).unwrap();
        assert_eq!((out.width, out.height), (384, 200));
        assert_eq!(out.raster.len(), 3 + 8 + 48 * 200);
    }

    #[test]
    fn test_explicit_box() {
        let options = ImageOptions {
            width: Some(32),
            height: Some(32),
            ..Default::default()
        };
        let out = encode_image(&half_black(), &options, &PrinterConfig::default()).unwrap();
        assert_eq!((out.width, out.height), (32, 32));
    }

    #[test]
    fn test_only_width_keeps_source_height_box() {
        let options = ImageOptions {
            width: Some(8),
            ..Default::default()
        };
        let out = encode_image(&half_black(), &options, &PrinterConfig::default()).unwrap();
        assert_eq!((out.width, out.height), (8, 2));
    }

    #[test]
    fn test_preview_matches_raster() {
        let out = encode_image(&half_black(), &ImageOptions::default(), &PrinterConfig::default())
            .unwrap();
        let decoded = image::load_from_memory(&out.preview).unwrap().to_luma8();
        let bitmap = MonoBitmap::from_gray(&decoded);
        assert_eq!(&out.raster[11..], &bitmap.data[..]);
    }

    #[test]
    fn test_deterministic() {
        let options = ImageOptions {
            width: Some(64),
            fill_width: true,
            raster_mode: RasterMode::EscAsterisk,
            ..Default::default()
        };
        let config = PrinterConfig::default();
        let a = encode_image(&half_black(), &options, &config).unwrap();
        let b = encode_image(&half_black(), &options, &config).unwrap();
        assert_eq!(a, b);
    }

    #[test]
    fn test_black_square_prints_white() {
        let src = png(&RgbaImage::from_pixel(2, 2, Rgba([0, 0, 0, 255])));
        let out = encode_image(&src, &ImageOptions::default(), &PrinterConfig::default()).unwrap();
        assert_eq!(&out.raster[11..], &[0x00, 0x00]);
    }

    #[test]
    fn test_malformed_bytes() {
        let result = encode_image(b"not an image", &ImageOptions::default(), &PrinterConfig::default());
        assert!(matches!(result, Err(ThermolineError::Decode(_))));
    }
}
