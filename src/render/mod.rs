//! # Rendering Module
//!
//! Turns decoded images into printable monochrome bitmaps.
//!
//! ## Modules
//!
//! - [`monochrome`]: Adaptive threshold, inversion and 1-bit packing
//! - [`scale`]: Fill-width and fit-to-box resizing without gray fringes
//! - [`preview`]: PNG rendition of the final bitmap
//!
//! ## Pipeline
//!
//! ```text
//! RGBA ─► to_monochrome ─► fill_width / fit ─► MonoBitmap ─► protocol::graphics
//!                                                    └─────► preview::encode_png
//! ```

pub mod monochrome;
pub mod preview;
pub mod scale;
