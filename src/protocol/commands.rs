//! # ESC/POS Control Commands
//!
//! Byte-level constants and builders for the non-styling part of the
//! command dialect: printer reset, line feeds and line spacing.
//!
//! ## Escape Sequence Structure
//!
//! Commands follow these patterns:
//! - Single byte: `LF`
//! - Two bytes: `ESC @`
//! - Multi-byte with parameters: `ESC 3 n`, `GS v 0 m xL xH yL yH ...`
//!
//! ## Byte Order
//!
//! Multi-byte integers use **little-endian** encoding:
//! - `u16` value 0x1234 is sent as bytes `[0x34, 0x12]`

// ============================================================================
// ESCAPE SEQUENCE CONSTANTS
// ============================================================================

/// ESC (Escape) - Command prefix byte
pub const ESC: u8 = 0x1B;

/// GS (Group Separator) - Extended command prefix
///
/// Used for character size (`GS !`) and raster graphics (`GS v 0`).
pub const GS: u8 = 0x1D;

/// LF (Line Feed) - Print the line buffer and advance one line
pub const LF: u8 = 0x0A;

/// Line spacing used by the strip raster mode (one 24-dot strip per line)
pub const STRIP_LINE_SPACING: u8 = 24;

// ============================================================================
// INITIALIZATION
// ============================================================================

/// # Reset Configuration (ESC @)
///
/// Returns the printer to its power-on formatting state. Sent before every
/// transfer session and between unrelated content blocks so alignment, size,
/// emphasis and raster state never leak from one block into the next.
///
/// ## Protocol Details
///
/// | Format  | Bytes |
/// |---------|-------|
/// | ASCII   | ESC @ |
/// | Hex     | 1B 40 |
/// | Decimal | 27 64 |
///
/// ## Example
///
/// ```
/// use thermoline::protocol::commands;
///
/// assert_eq!(commands::reset(), vec![0x1B, 0x40]);
/// ```
#[inline]
pub fn reset() -> Vec<u8> {
    vec![ESC, b'@']
}

// ============================================================================
// PAPER FEED
// ============================================================================

/// Single line feed
#[inline]
pub fn line_feed() -> Vec<u8> {
    vec![LF]
}

/// `n` consecutive line feeds
///
/// ```
/// use thermoline::protocol::commands;
///
/// assert_eq!(commands::line_feeds(3), vec![0x0A, 0x0A, 0x0A]);
/// assert!(commands::line_feeds(0).is_empty());
/// ```
#[inline]
pub fn line_feeds(n: usize) -> Vec<u8> {
    vec![LF; n]
}

/// # Set Line Spacing (ESC 3 n)
///
/// Sets the distance advanced by each `LF` to `n` dots.
///
/// | Format  | Bytes    |
/// |---------|----------|
/// | ASCII   | ESC 3 n  |
/// | Hex     | 1B 33 n  |
///
/// The strip raster mode sets this to 24 so consecutive strips butt up
/// against each other without white gaps.
#[inline]
pub fn line_spacing(n: u8) -> Vec<u8> {
    vec![ESC, b'3', n]
}

// ============================================================================
// HELPER FUNCTIONS
// ============================================================================

/// Encode a u16 value as little-endian bytes [low, high]
///
/// ```
/// use thermoline::protocol::commands::u16_le;
///
/// assert_eq!(u16_le(0x1234), [0x34, 0x12]);
/// assert_eq!(u16_le(384), [0x80, 0x01]);
/// ```
#[inline]
pub const fn u16_le(value: u16) -> [u8; 2] {
    [value as u8, (value >> 8) as u8]
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_reset() {
        assert_eq!(reset(), vec![0x1B, 0x40]);
    }

    #[test]
    fn test_line_feed_is_single_byte() {
        assert_eq!(line_feed(), vec![0x0A]);
    }

    #[test]
    fn test_line_feeds() {
        assert_eq!(line_feeds(5), vec![LF; 5]);
        assert_eq!(line_feeds(0), Vec::<u8>::new());
    }

    #[test]
    fn test_line_spacing_24() {
        assert_eq!(line_spacing(STRIP_LINE_SPACING), vec![0x1B, 0x33, 0x18]);
    }

    #[test]
    fn test_u16_le() {
        assert_eq!(u16_le(0x0000), [0x00, 0x00]);
        assert_eq!(u16_le(0x00FF), [0xFF, 0x00]);
        assert_eq!(u16_le(0xFF00), [0x00, 0xFF]);
        assert_eq!(u16_le(48), [0x30, 0x00]);
    }
}
