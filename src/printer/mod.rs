//! # Printer Module
//!
//! Printer hardware configuration.
//!
//! - [`config`]: Head width, resolution and default transport unit

pub mod config;

pub use config::{DEFAULT_TRANSPORT_UNIT, PrinterConfig};
