//! # Print Stream Builders
//!
//! High-level construction of a print stream from text runs and images.
//!
//! - [`text`]: [`TextBuilder`], style-prefixed text runs
//! - [`image`]: [`encode_image`], image to raster bytes + preview
//! - [`job`]: [`assemble`] / [`PrintJob`], blocks joined with reset markers
//!
//! ```text
//! TextBuilder ──┐
//!               ├─► assemble ─► PrintData { bytes, preview } ─► transport
//! ImageBlock ───┘
//! ```

pub mod image;
pub mod job;
pub mod text;

pub use self::image::{EncodedImage, ImageOptions, RasterMode, encode_image};
pub use job::{ImageBlock, PrintData, PrintJob, PrintStep, TRAILING_FEEDS, assemble};
pub use text::TextBuilder;
