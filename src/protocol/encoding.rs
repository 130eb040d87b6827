//! # Text Encoders
//!
//! Text runs reach the printer as single-byte character codes. The
//! [`TextEncoder`] trait is the seam where a platform or a printer model
//! chooses how a Rust string becomes those bytes.
//!
//! - [`Ascii`]: 7-bit passthrough, everything else becomes `?`
//! - [`Cp437`]: IBM PC code page (`ESC t 0`), accented Latin, box drawing,
//!   shades and a few Greek/math symbols

use super::commands::ESC;

/// Converts text to printer character codes
pub trait TextEncoder: Send + Sync {
    /// Encode `s` into printer bytes
    fn encode(&self, s: &str) -> Vec<u8>;

    /// Command bytes selecting the code page this encoder targets
    ///
    /// Emitted once at the start of every text block. Empty when the
    /// printer default is fine.
    fn select_command(&self) -> Vec<u8> {
        Vec::new()
    }
}

/// Plain 7-bit ASCII
#[derive(Debug, Clone, Copy, Default)]
pub struct Ascii;

impl TextEncoder for Ascii {
    fn encode(&self, s: &str) -> Vec<u8> {
        s.chars()
            .map(|ch| if ch.is_ascii() { ch as u8 } else { b'?' })
            .collect()
    }
}

/// IBM Code Page 437
///
/// ASCII passes through unchanged. Characters outside CP437 are replaced
/// with `?` and logged.
#[derive(Debug, Clone, Copy, Default)]
pub struct Cp437;

/// Upper half of CP437: `CP437_UPPER[i]` prints for byte `0x80 + i`
const CP437_UPPER: [char; 128] = [
    // 0x80
    'Ç', 'ü', 'é', 'â', 'ä', 'à', 'å', 'ç', 'ê', 'ë', 'è', 'ï', 'î', 'ì', 'Ä', 'Å',
    // 0x90
    'É', 'æ', 'Æ', 'ô', 'ö', 'ò', 'û', 'ù', 'ÿ', 'Ö', 'Ü', '¢', '£', '¥', '₧', 'ƒ',
    // 0xA0
    'á', 'í', 'ó', 'ú', 'ñ', 'Ñ', 'ª', 'º', '¿', '⌐', '¬', '½', '¼', '¡', '«', '»',
    // 0xB0
    '░', '▒', '▓', '│', '┤', '╡', '╢', '╖', '╕', '╣', '║', '╗', '╝', '╜', '╛', '┐',
    // 0xC0
    '└', '┴', '┬', '├', '─', '┼', '╞', '╟', '╚', '╔', '╩', '╦', '╠', '═', '╬', '╧',
    // 0xD0
    '╨', '╤', '╥', '╙', '╘', '╒', '╓', '╫', '╪', '┘', '┌', '█', '▄', '▌', '▐', '▀',
    // 0xE0
    'α', 'ß', 'Γ', 'π', 'Σ', 'σ', 'µ', 'τ', 'Φ', 'Θ', 'Ω', 'δ', '∞', 'φ', 'ε', '∩',
    // 0xF0
    '≡', '±', '≥', '≤', '⌠', '⌡', '÷', '≈', '°', '∙', '·', '√', 'ⁿ', '²', '■', '\u{00A0}',
];

impl Cp437 {
    fn lookup(ch: char) -> Option<u8> {
        if ch.is_ascii() {
            return Some(ch as u8);
        }
        CP437_UPPER
            .iter()
            .position(|&c| c == ch)
            .map(|i| 0x80 + i as u8)
    }
}

impl TextEncoder for Cp437 {
    fn encode(&self, s: &str) -> Vec<u8> {
        s.chars()
            .map(|ch| {
                Self::lookup(ch).unwrap_or_else(|| {
                    log::warn!(
                        "cp437: unmapped character '{}' (U+{:04X}), replacing with '?'",
                        ch,
                        ch as u32
                    );
                    b'?'
                })
            })
            .collect()
    }

    /// `ESC t 0`: character code table 0 (PC437)
    fn select_command(&self) -> Vec<u8> {
        vec![ESC, b't', 0]
    }
}
