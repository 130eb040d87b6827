//! # ESC/POS Raster Graphics Commands
//!
//! Two serializations of the same packed monochrome bitmap:
//!
//! | Mode | Command | Description | Best For |
//! |------|---------|-------------|----------|
//! | Block raster | GS v 0 | Whole image in one command | Modern printers |
//! | Strip image | ESC * 33 | 24-dot tall strips, column major | Older panel printers |
//!
//! ## Bit Packing (input)
//!
//! Both builders take row-major packed data as produced by
//! [`MonoBitmap`](crate::render::monochrome::MonoBitmap):
//! - `ceil(width / 8)` bytes per row
//! - Bit 7 (MSB) = leftmost dot, 1 = black
//!
//! ```text
//! Byte value 0xF0 = 11110000 = ████░░░░
//! Byte value 0x0F = 00001111 = ░░░░████
//! ```

use super::commands::{self, ESC, GS, LF, STRIP_LINE_SPACING, u16_le};
use crate::error::ThermolineError;

/// Height of one ESC * strip in dots
pub const STRIP_HEIGHT: usize = 24;

/// ESC * mode 33: 24-dot double density
const STRIP_MODE: u8 = 33;

// ============================================================================
// BLOCK RASTER (GS v 0)
// ============================================================================

/// # Print Raster Bit Image (GS v 0 m xL xH yL yH d1...dk)
///
/// ## Protocol Details
///
/// | Format  | Bytes |
/// |---------|-------|
/// | ASCII   | GS v 0 m xL xH yL yH d1...dk |
/// | Hex     | 1D 76 30 00 xL xH yL yH d1...dk |
///
/// - `m`: 0 = normal density
/// - `xL, xH`: bytes per row, little-endian
/// - `yL, yH`: rows, little-endian
/// - `k = bytes_per_row × rows`
///
/// ## Example
///
/// ```
/// use thermoline::protocol::graphics;
///
/// // 16 dots wide (2 bytes), 3 rows
/// let data = vec![0xFF, 0x00, 0x00, 0xFF, 0xAA, 0x55];
/// let cmd = graphics::raster(2, 3, &data).unwrap();
/// assert_eq!(&cmd[0..8], &[0x1D, 0x76, 0x30, 0x00, 2, 0, 3, 0]);
/// assert_eq!(&cmd[8..], &data[..]);
/// ```
///
/// ## Errors
///
/// `InvalidCommand` when either dimension exceeds 65535 or `data` does not
/// hold exactly `bytes_per_row × height` bytes.
pub fn raster(bytes_per_row: usize, height: usize, data: &[u8]) -> Result<Vec<u8>, ThermolineError> {
    let expected = bytes_per_row * height;
    if data.len() != expected {
        return Err(ThermolineError::InvalidCommand(format!(
            "raster data length mismatch: expected {} ({} bytes × {} rows), got {}",
            expected,
            bytes_per_row,
            height,
            data.len()
        )));
    }
    let [xl, xh] = u16_le(to_u16(bytes_per_row, "raster width")?);
    let [yl, yh] = u16_le(to_u16(height, "raster height")?);

    let mut cmd = Vec::with_capacity(8 + data.len());
    cmd.extend_from_slice(&[GS, b'v', b'0', 0, xl, xh, yl, yh]);
    cmd.extend_from_slice(data);
    Ok(cmd)
}

// ============================================================================
// STRIP IMAGE (ESC * 33)
// ============================================================================

/// # Strip Bit Image (ESC * 33 nL nH d1...dk)
///
/// Re-slices a packed raster into 24-dot strips for printers that lack
/// `GS v 0`.
///
/// ## Output Layout
///
/// ```text
/// ESC 3 24                       line spacing = one strip
/// ESC * 33 nL nH [3 × dots] LF   strip 0 (rows 0..24)
/// ESC * 33 nL nH [3 × dots] LF   strip 1 (rows 24..48)
/// ...
/// ```
///
/// `nL nH` is the dot count per line (`bytes_per_row × 8`). Each column is
/// three bytes, top band first; in each byte bit 7 is the topmost dot of
/// its 8-dot band. Rows past the bottom of the image print white.
///
/// Line spacing is left at 24 afterwards. A following `ESC @` restores it.
///
/// ```
/// use thermoline::protocol::graphics;
///
/// // 8 dots wide, 1 row, all black
/// let cmd = graphics::strips(1, 1, &[0xFF]).unwrap();
/// assert_eq!(&cmd[0..3], &[0x1B, 0x33, 24]);
/// assert_eq!(&cmd[3..8], &[0x1B, 0x2A, 0x21, 8, 0]);
/// // first column: only the top dot of the top band is black
/// assert_eq!(&cmd[8..11], &[0x80, 0x00, 0x00]);
/// assert_eq!(*cmd.last().unwrap(), 0x0A);
/// ```
pub fn strips(bytes_per_row: usize, height: usize, data: &[u8]) -> Result<Vec<u8>, ThermolineError> {
    if data.len() != bytes_per_row * height {
        return Err(ThermolineError::InvalidCommand(format!(
            "strip data length mismatch: expected {}, got {}",
            bytes_per_row * height,
            data.len()
        )));
    }
    let dots = bytes_per_row * 8;
    let [nl, nh] = u16_le(to_u16(dots, "strip width")?);
    let strip_count = height.div_ceil(STRIP_HEIGHT);

    let mut cmd = Vec::with_capacity(3 + strip_count * (6 + dots * 3));
    cmd.extend(commands::line_spacing(STRIP_LINE_SPACING));

    for strip in 0..strip_count {
        let base_row = strip * STRIP_HEIGHT;
        cmd.extend_from_slice(&[ESC, b'*', STRIP_MODE, nl, nh]);
        for x in 0..dots {
            let mask = 0x80u8 >> (x % 8);
            for band in 0..3 {
                let mut column_byte = 0u8;
                for k in 0..8 {
                    let row = base_row + band * 8 + k;
                    if row >= height {
                        break;
                    }
                    if data[row * bytes_per_row + x / 8] & mask != 0 {
                        column_byte |= 0x80 >> k;
                    }
                }
                cmd.push(column_byte);
            }
        }
        cmd.push(LF);
    }
    Ok(cmd)
}

fn to_u16(value: usize, what: &str) -> Result<u16, ThermolineError> {
    u16::try_from(value)
        .map_err(|_| ThermolineError::InvalidCommand(format!("{} {} exceeds 65535", what, value)))
}
