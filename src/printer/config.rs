//! # Printer Configuration
//!
//! Hardware characteristics the encoder and transport need to know about.
//!
//! ## Presets
//!
//! | Preset | Printable width | Resolution | Width (dots) |
//! |--------|-----------------|------------|--------------|
//! | MM58 | 48mm | 203 DPI | 384 |
//! | MM80 | 72mm | 203 DPI | 575 |
//!
//! ## Usage
//!
//! ```
//! use thermoline::printer::PrinterConfig;
//!
//! let config = PrinterConfig::default();
//! assert_eq!(config.width_dots(), 384);
//! ```

/// Default transport unit before the link negotiates a larger one (bytes)
///
/// 20 bytes is the payload of one write at the Bluetooth LE minimum ATT MTU.
pub const DEFAULT_TRANSPORT_UNIT: usize = 20;

/// # Printer Configuration
///
/// ## Calculations
///
/// ```text
/// dots_per_mm = dpi / 25.4
/// width_dots  = round(width_mm × dots_per_mm)
///
/// 48mm at 203 DPI: round(48 × 7.992) = 384 dots
/// ```
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PrinterConfig {
    /// Printer class name
    pub name: &'static str,

    /// Printable head width in millimeters
    pub width_mm: f32,

    /// Resolution in dots per inch
    pub dpi: u16,

    /// Chunk size used until the link reports a negotiated unit
    pub transport_unit: usize,
}

impl PrinterConfig {
    /// 58mm paper, 48mm printable
    pub const MM58: Self = Self {
        name: "58mm receipt printer",
        width_mm: 48.0,
        dpi: 203,
        transport_unit: DEFAULT_TRANSPORT_UNIT,
    };

    /// 80mm paper, 72mm printable
    pub const MM80: Self = Self {
        name: "80mm receipt printer",
        width_mm: 72.0,
        dpi: 203,
        transport_unit: DEFAULT_TRANSPORT_UNIT,
    };

    /// Calculate dots per millimeter
    #[inline]
    pub fn dots_per_mm(&self) -> f32 {
        self.dpi as f32 / 25.4
    }

    /// Convert millimeters to dots
    #[inline]
    pub fn mm_to_dots(&self, mm: f32) -> u32 {
        (mm * self.dots_per_mm()).round().max(0.0) as u32
    }

    /// Printer head width in dots
    ///
    /// This is the width a "fill width" image is scaled to.
    #[inline]
    pub fn width_dots(&self) -> u32 {
        self.mm_to_dots(self.width_mm)
    }
}

impl Default for PrinterConfig {
    fn default() -> Self {
        Self::MM58
    }
}
