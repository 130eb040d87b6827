//! # ESC/POS Text Styling Commands
//!
//! This module holds the command table for text formatting: alignment,
//! character size, emphasis/underline and print color.
//!
//! ## Text Styling Overview
//!
//! | Setting | Command | Values |
//! |---------|---------|--------|
//! | Alignment | ESC a n | left, center, right |
//! | Font size | GS ! n | normal, wide, tall, large ×2..×7 |
//! | Style | ESC E n / ESC - n | normal, bold, underline |
//! | Color | ESC r n | black, red (two-color paper) |
//!
//! Every setting stays active until the printer receives a new value or
//! `ESC @`. The text builder re-asserts the defaults before every run so
//! nothing leaks between runs.

use super::commands::{ESC, GS};

// ============================================================================
// TEXT ALIGNMENT
// ============================================================================

/// Text and image alignment
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Alignment {
    #[default]
    Left = 0,
    Center = 1,
    Right = 2,
}

impl Alignment {
    /// Parse `"left"`, `"center"` or `"right"` (case-insensitive)
    pub fn parse(s: &str) -> Option<Self> {
        match s.to_ascii_lowercase().as_str() {
            "left" => Some(Self::Left),
            "center" | "centre" => Some(Self::Center),
            "right" => Some(Self::Right),
            _ => None,
        }
    }
}

/// # Select Justification (ESC a n)
///
/// | Format  | Bytes    |
/// |---------|----------|
/// | ASCII   | ESC a n  |
/// | Hex     | 1B 61 n  |
///
/// - `n = 0`: Left (default)
/// - `n = 1`: Center
/// - `n = 2`: Right
///
/// Applies to text and to raster images that follow it.
///
/// ```
/// use thermoline::protocol::text::{align, Alignment};
///
/// assert_eq!(align(Alignment::Center), vec![0x1B, 0x61, 0x01]);
/// ```
pub fn align(alignment: Alignment) -> Vec<u8> {
    vec![ESC, b'a', alignment as u8]
}

// ============================================================================
// CHARACTER SIZE
// ============================================================================

/// Character size selections
///
/// The `GS !` parameter packs the width multiplier in the high nibble and
/// the height multiplier in the low nibble (0 = ×1).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Font {
    #[default]
    Normal,
    /// Double width
    Wide,
    /// Double height
    Tall,
    /// ×2 in both directions
    Large,
    /// ×3
    Large2,
    /// ×4
    Large3,
    /// ×5
    Large4,
    /// ×6
    Large5,
    /// ×7
    Large6,
}

impl Font {
    /// The `GS !` size parameter for this font
    pub const fn size_param(self) -> u8 {
        match self {
            Font::Normal => 0x00,
            Font::Wide => 0x10,
            Font::Tall => 0x01,
            Font::Large => 0x11,
            Font::Large2 => 0x22,
            Font::Large3 => 0x33,
            Font::Large4 => 0x44,
            Font::Large5 => 0x55,
            Font::Large6 => 0x66,
        }
    }

    /// Parse a font name such as `"wide"` or `"large_3"`
    pub fn parse(s: &str) -> Option<Self> {
        let normalized: String = s
            .chars()
            .filter(|c| *c != '_' && *c != '-')
            .collect::<String>()
            .to_ascii_lowercase();
        match normalized.as_str() {
            "normal" => Some(Font::Normal),
            "wide" => Some(Font::Wide),
            "tall" => Some(Font::Tall),
            "large" => Some(Font::Large),
            "large2" => Some(Font::Large2),
            "large3" => Some(Font::Large3),
            "large4" => Some(Font::Large4),
            "large5" => Some(Font::Large5),
            "large6" => Some(Font::Large6),
            _ => None,
        }
    }
}

/// # Select Character Size (GS ! n)
///
/// | Format  | Bytes   |
/// |---------|---------|
/// | ASCII   | GS ! n  |
/// | Hex     | 1D 21 n |
///
/// ```
/// use thermoline::protocol::text::{font, Font};
///
/// assert_eq!(font(Font::Normal), vec![0x1D, 0x21, 0x00]);
/// assert_eq!(font(Font::Large), vec![0x1D, 0x21, 0x11]);
/// ```
pub fn font(f: Font) -> Vec<u8> {
    vec![GS, b'!', f.size_param()]
}

// ============================================================================
// EMPHASIS / UNDERLINE
// ============================================================================

/// Text style
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Style {
    #[default]
    Normal,
    Bold,
    Underline,
}

impl Style {
    pub fn parse(s: &str) -> Option<Self> {
        match s.to_ascii_lowercase().as_str() {
            "normal" => Some(Style::Normal),
            "bold" => Some(Style::Bold),
            "underline" => Some(Style::Underline),
            _ => None,
        }
    }
}

/// # Emphasis / Underline (ESC E n, ESC - n)
///
/// | Style | Hex |
/// |-------|-----|
/// | Normal | 1B 45 00 |
/// | Bold | 1B 45 01 |
/// | Underline | 1B 2D 01 |
///
/// `Normal` only clears emphasis; underline is cleared by `ESC @`.
pub fn style(s: Style) -> Vec<u8> {
    match s {
        Style::Normal => vec![ESC, b'E', 0],
        Style::Bold => vec![ESC, b'E', 1],
        Style::Underline => vec![ESC, b'-', 1],
    }
}

// ============================================================================
// PRINT COLOR
// ============================================================================

/// Print color on two-color paper
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Color {
    #[default]
    Black = 0,
    Red = 1,
}

impl Color {
    pub fn parse(s: &str) -> Option<Self> {
        match s.to_ascii_lowercase().as_str() {
            "black" => Some(Color::Black),
            "red" => Some(Color::Red),
            _ => None,
        }
    }
}

/// # Select Print Color (ESC r n)
///
/// | Format  | Bytes   |
/// |---------|---------|
/// | Hex     | 1B 72 n |
pub fn color(c: Color) -> Vec<u8> {
    vec![ESC, b'r', c as u8]
}

// ============================================================================
// COMBINED STYLE
// ============================================================================

/// Complete formatting for one text run
///
/// Every field has a default, so `TextStyle::default()` is the printer's
/// power-on formatting: left, normal size, no emphasis, black.
///
/// ```
/// use thermoline::protocol::text::{TextStyle, Alignment, Style};
///
/// let title = TextStyle {
///     alignment: Alignment::Center,
///     style: Style::Bold,
///     ..Default::default()
/// };
/// assert_eq!(&title.to_commands()[0..3], &[0x1B, 0x61, 0x01]);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct TextStyle {
    pub alignment: Alignment,
    pub font: Font,
    pub style: Style,
    pub color: Color,
}

impl TextStyle {
    /// Generate command bytes for this style, in alignment/font/style/color order
    pub fn to_commands(&self) -> Vec<u8> {
        let mut cmds = Vec::with_capacity(12);
        cmds.extend(align(self.alignment));
        cmds.extend(font(self.font));
        cmds.extend(style(self.style));
        cmds.extend(color(self.color));
        cmds
    }

    /// Commands restoring the default formatting
    pub fn reset() -> Vec<u8> {
        TextStyle::default().to_commands()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_align() {
        assert_eq!(align(Alignment::Left), vec![0x1B, 0x61, 0x00]);
        assert_eq!(align(Alignment::Center), vec![0x1B, 0x61, 0x01]);
        assert_eq!(align(Alignment::Right), vec![0x1B, 0x61, 0x02]);
    }

    #[test]
    fn test_font_table() {
        assert_eq!(font(Font::Normal), vec![0x1D, 0x21, 0x00]);
        assert_eq!(font(Font::Wide), vec![0x1D, 0x21, 0x10]);
        assert_eq!(font(Font::Tall), vec![0x1D, 0x21, 0x01]);
        assert_eq!(font(Font::Large), vec![0x1D, 0x21, 0x11]);
        assert_eq!(font(Font::Large6), vec![0x1D, 0x21, 0x66]);
    }

    #[test]
    fn test_style() {
        assert_eq!(style(Style::Normal), vec![0x1B, 0x45, 0x00]);
        assert_eq!(style(Style::Bold), vec![0x1B, 0x45, 0x01]);
        assert_eq!(style(Style::Underline), vec![0x1B, 0x2D, 0x01]);
    }

    #[test]
    fn test_color() {
        assert_eq!(color(Color::Black), vec![0x1B, 0x72, 0x00]);
        assert_eq!(color(Color::Red), vec![0x1B, 0x72, 0x01]);
    }

    #[test]
    fn test_reset_is_default_style() {
        assert_eq!(
            TextStyle::reset(),
            vec![
                0x1B, 0x61, 0x00, // left
                0x1D, 0x21, 0x00, // normal size
                0x1B, 0x45, 0x00, // no emphasis
                0x1B, 0x72, 0x00, // black
            ]
        );
    }

    #[test]
    fn test_parse_names() {
        assert_eq!(Alignment::parse("CENTER"), Some(Alignment::Center));
        assert_eq!(Font::parse("large_3"), Some(Font::Large3));
        assert_eq!(Font::parse("Large-6"), Some(Font::Large6));
        assert_eq!(Style::parse("underline"), Some(Style::Underline));
        assert_eq!(Color::parse("red"), Some(Color::Red));
        assert_eq!(Color::parse("blue"), None);
        assert_eq!(Font::parse("huge"), None);
    }
}
