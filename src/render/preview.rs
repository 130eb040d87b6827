//! PNG preview of what the printer will put on paper.

use image::ImageEncoder;
use image::codecs::png::PngEncoder;

use super::monochrome::MonoBitmap;
use crate::error::ThermolineError;

/// Encode a packed bitmap as an 8-bit grayscale PNG
///
/// Decoding the result and re-packing it yields the same bitmap.
pub fn encode_png(bitmap: &MonoBitmap) -> Result<Vec<u8>, ThermolineError> {
    let img = bitmap.to_gray();
    let mut png_bytes = Vec::new();
    PngEncoder::new(&mut png_bytes)
        .write_image(
            img.as_raw(),
            img.width(),
            img.height(),
            image::ExtendedColorType::L8,
        )
        .map_err(|e| ThermolineError::Image(format!("PNG encoding failed: {}", e)))?;
    Ok(png_bytes)
}
