//! # Thermoline - Thermal Printer Stream Encoder
//!
//! Thermoline turns styled text and images into an ESC/POS-style byte
//! stream and pushes it to a small Bluetooth thermal printer in
//! link-sized, acknowledgement-paced chunks. It provides:
//!
//! - **Protocol**: alignment, font, style, color, reset and raster commands
//! - **Raster encoding**: adaptive-threshold monochrome conversion, scaling,
//!   `GS v 0` block raster or `ESC *` 24-dot strips, PNG preview
//! - **Assembly**: text and image blocks joined with reset markers
//! - **Transport**: a chunked send/ack driver behind a link trait
//!
//! ## Quick Start
//!
//! ```no_run
//! use thermoline::{
//!     builder::{ImageOptions, PrintJob, TextBuilder},
//!     printer::PrinterConfig,
//!     protocol::text::{Alignment, Font, TextStyle},
//!     transport::{FileLink, PrinterSession},
//! };
//!
//! let title = TextStyle {
//!     alignment: Alignment::Center,
//!     font: Font::Large,
//!     ..Default::default()
//! };
//! let logo = std::fs::read("logo.png")?;
//!
//! let data = PrintJob::new()
//!     .image(logo, ImageOptions { fill_width: true, ..Default::default() })
//!     .text(TextBuilder::new().styled_text("HELLO", &title).new_line(1))
//!     .build()?;
//!
//! let mut session = PrinterSession::new(FileLink::new("/dev/rfcomm0"), &PrinterConfig::default());
//! session.connect()?;
//! session.print(&data.bytes)?;
//! session.pump()?;
//!
//! # Ok::<(), thermoline::ThermolineError>(())
//! ```
//!
//! ## Module Overview
//!
//! | Module | Description |
//! |--------|-------------|
//! | [`protocol`] | Command bytes, raster serializers, text encoders |
//! | [`render`] | Monochrome conversion, scaling, preview |
//! | [`builder`] | Text blocks, image blocks, job assembly |
//! | [`transport`] | Chunked driver, session, links |
//! | [`json_api`] | JSON print jobs |
//! | [`printer`] | Printer configurations |
//! | [`error`] | Error types |

pub mod builder;
pub mod error;
pub mod json_api;
pub mod printer;
pub mod protocol;
pub mod render;
pub mod transport;

// Re-exports for convenience
pub use builder::{PrintData, PrintJob, PrintStep, TextBuilder, assemble, encode_image};
pub use error::ThermolineError;
pub use printer::PrinterConfig;
pub use transport::{ChunkedDriver, PrinterLink, PrinterSession};
