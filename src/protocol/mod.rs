//! # ESC/POS Protocol Implementation
//!
//! Low-level command builders for the ESC/POS dialect spoken by small
//! Bluetooth LE receipt and label printers.
//!
//! ## Module Structure
//!
//! - [`commands`]: Reset, line feed, line spacing
//! - [`text`]: Alignment, character size, emphasis, color
//! - [`graphics`]: `GS v 0` block raster and `ESC *` strip images
//! - [`encoding`]: Text-to-byte encoders
//!
//! ## Usage Example
//!
//! ```
//! use thermoline::protocol::{commands, text};
//!
//! let mut data = Vec::new();
//! data.extend(commands::reset());
//! data.extend(text::align(text::Alignment::Center));
//! data.extend(text::style(text::Style::Bold));
//! data.extend(b"RECEIPT");
//! data.extend(commands::line_feed());
//! ```

pub mod commands;
pub mod encoding;
pub mod graphics;
pub mod text;
