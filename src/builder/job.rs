//! # Print Job Assembly
//!
//! Composes text blocks and image blocks into the final byte stream.
//!
//! ## Rules
//!
//! - Before each content block, if anything has been written already, an
//!   `ESC @` reset is inserted so alignment, size and raster state never
//!   carry over from the previous block.
//! - [`PrintStep::NewLine`] is plain paper feed and never gets a reset.
//! - The stream always ends with [`TRAILING_FEEDS`] line feeds, which push
//!   the last printed line out past the tear bar.
//! - Only the preview of the last image block is kept.
//!
//! ```text
//! [text] ESC@ [image] LF LF ESC@ [text] LF×5
//! ```

use crate::error::ThermolineError;
use crate::printer::PrinterConfig;
use crate::protocol::commands;

use super::image::{ImageOptions, encode_image};
use super::text::TextBuilder;

/// Line feeds appended after the last block
pub const TRAILING_FEEDS: usize = 5;

/// An image to be encoded during assembly
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ImageBlock {
    /// Encoded source image (PNG or any format `image` can guess)
    pub source: Vec<u8>,
    pub options: ImageOptions,
}

/// One step of a print job, in print order
#[derive(Debug, Clone)]
pub enum PrintStep {
    Text(TextBuilder),
    Image(ImageBlock),
    /// Paper feed between blocks
    NewLine(usize),
}

/// Finished print stream
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PrintData {
    pub bytes: Vec<u8>,
    /// PNG preview of the most recent image block, if any
    pub preview: Option<Vec<u8>>,
}

/// Assemble `steps` into one print stream
///
/// ## Errors
///
/// Fails with the first image block that cannot be decoded or encoded.
/// Nothing is returned for the blocks before it.
pub fn assemble(steps: &[PrintStep], config: &PrinterConfig) -> Result<PrintData, ThermolineError> {
    let mut bytes = Vec::new();
    let mut preview = None;

    for step in steps {
        match step {
            PrintStep::Text(block) => {
                begin_block(&mut bytes);
                bytes.extend(block.encoder().select_command());
                bytes.extend(block.build());
            }
            PrintStep::Image(block) => {
                let encoded = encode_image(&block.source, &block.options, config)?;
                begin_block(&mut bytes);
                bytes.extend(encoded.raster);
                preview = Some(encoded.preview);
            }
            PrintStep::NewLine(n) => bytes.extend(commands::line_feeds(*n)),
        }
    }

    bytes.extend(commands::line_feeds(TRAILING_FEEDS));
    log::debug!(
        "assembled {} steps into {} bytes{}",
        steps.len(),
        bytes.len(),
        if preview.is_some() { " with preview" } else { "" }
    );
    Ok(PrintData { bytes, preview })
}

fn begin_block(bytes: &mut Vec<u8>) {
    if !bytes.is_empty() {
        bytes.extend(commands::reset());
    }
}

/// Fluent wrapper around [`assemble`]
///
/// ```
/// use thermoline::builder::{PrintJob, TextBuilder};
///
/// let data = PrintJob::new()
///     .text(TextBuilder::new().text("hello"))
///     .new_line(1)
///     .build()
///     .unwrap();
///
/// assert!(data.bytes.ends_with(&[0x0A; 6]));
/// assert!(data.preview.is_none());
/// ```
#[derive(Debug, Clone, Default)]
pub struct PrintJob {
    config: PrinterConfig,
    steps: Vec<PrintStep>,
}

impl PrintJob {
    /// Empty job for the default 58mm printer
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_config(config: PrinterConfig) -> Self {
        Self {
            config,
            steps: Vec::new(),
        }
    }

    pub fn text(mut self, block: TextBuilder) -> Self {
        self.steps.push(PrintStep::Text(block));
        self
    }

    pub fn image(mut self, source: Vec<u8>, options: ImageOptions) -> Self {
        self.steps.push(PrintStep::Image(ImageBlock { source, options }));
        self
    }

    pub fn new_line(mut self, n: usize) -> Self {
        self.steps.push(PrintStep::NewLine(n));
        self
    }

    pub fn step(mut self, step: PrintStep) -> Self {
        self.steps.push(step);
        self
    }

    pub fn steps(&self) -> &[PrintStep] {
        &self.steps
    }

    pub fn config(&self) -> &PrinterConfig {
        &self.config
    }

    pub fn build(&self) -> Result<PrintData, ThermolineError> {
        assemble(&self.steps, &self.config)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::protocol::encoding::Cp437;
    use crate::protocol::text::TextStyle;
    use image::{ImageFormat, Rgba, RgbaImage};
    use pretty_assertions::assert_eq;
    use std::io::Cursor;
    use std::sync::Arc;

    fn checker_png() -> Vec<u8> {
        let img = RgbaImage::from_fn(8, 2, |x, y| {
            if (x + y) % 2 == 0 {
                Rgba([0, 0, 0, 255])
            } else {
                Rgba([255, 255, 255, 255])
            }
        });
        let mut bytes = Vec::new();
        img.write_to(&mut Cursor::new(&mut bytes), ImageFormat::Png).unwrap();
        bytes
    }

    fn image_step() -> PrintStep {
        PrintStep::Image(ImageBlock {
            source: checker_png(),
            options: ImageOptions::default(),
        })
    }

    /// align left + GS v 0 header + 2 rows
    const IMAGE_LEN: usize = 3 + 8 + 2;

    #[test]
    fn test_empty_job_is_five_feeds() {
        let data = assemble(&[], &PrinterConfig::default()).unwrap();
        assert_eq!(data.bytes, vec![0x0A; 5]);
        assert_eq!(data.preview, None);
    }

    #[test]
    fn test_first_block_has_no_reset() {
        let data = PrintJob::new()
            .text(TextBuilder::new().text("a"))
            .build()
            .unwrap();
        assert_eq!(&data.bytes[0..3], &[0x1B, 0x61, 0x00]);
        assert_eq!(data.bytes.len(), 12 + 3 + 1 + 5);
    }

    #[test]
    fn test_text_then_image_resets_at_boundary() {
        let data = PrintJob::new()
            .text(TextBuilder::new().text("a"))
            .step(image_step())
            .build()
            .unwrap();
        let boundary = 16;
        assert_eq!(&data.bytes[boundary..boundary + 2], &[0x1B, 0x40]);
        assert_eq!(&data.bytes[boundary + 2..boundary + 5], &[0x1B, 0x61, 0x00]);
        assert_eq!(data.bytes.len(), boundary + 2 + IMAGE_LEN + 5);
        assert!(data.preview.is_some());
    }

    #[test]
    fn test_image_then_text_resets_at_boundary() {
        let data = PrintJob::new()
            .step(image_step())
            .text(TextBuilder::new().text("a"))
            .build()
            .unwrap();
        assert_eq!(&data.bytes[IMAGE_LEN..IMAGE_LEN + 2], &[0x1B, 0x40]);
        assert_eq!(&data.bytes[IMAGE_LEN + 2..IMAGE_LEN + 14], &TextStyle::reset()[..]);
    }

    #[test]
    fn test_new_line_step_has_no_reset() {
        let data = PrintJob::new()
            .text(TextBuilder::new().text("a"))
            .new_line(2)
            .build()
            .unwrap();
        let mut expected = TextStyle::reset();
        expected.extend_from_slice(&[0x1B, 0x61, 0x00]);
        expected.push(b'a');
        expected.extend(vec![0x0A; 2 + 5]);
        assert_eq!(data.bytes, expected);
    }

    #[test]
    fn test_leading_new_line_forces_reset_before_block() {
        let data = PrintJob::new()
            .new_line(1)
            .text(TextBuilder::new())
            .build()
            .unwrap();
        assert_eq!(&data.bytes[0..3], &[0x0A, 0x1B, 0x40]);
    }

    #[test]
    fn test_last_preview_wins() {
        let wide = PrintStep::Image(ImageBlock {
            source: checker_png(),
            options: ImageOptions {
                width: Some(16),
                ..Default::default()
            },
        });
        let data = PrintJob::new()
            .step(wide)
            .step(image_step())
            .build()
            .unwrap();
        let preview = image::load_from_memory(&data.preview.unwrap()).unwrap();
        assert_eq!(preview.width(), 8);
    }

    #[test]
    fn test_code_page_selected_per_text_block() {
        let block = TextBuilder::with_encoder(Arc::new(Cp437)).text("é");
        let data = PrintJob::new().text(block).build().unwrap();
        assert_eq!(&data.bytes[0..3], &[0x1B, 0x74, 0x00]);
        assert_eq!(data.bytes[18], 0x82);
    }

    #[test]
    fn test_decode_error_aborts_job() {
        let bad = PrintStep::Image(ImageBlock {
            source: vec![1, 2, 3],
            options: ImageOptions::default(),
        });
        let result = PrintJob::new().text(TextBuilder::new().text("a")).step(bad).build();
        assert!(matches!(result, Err(ThermolineError::Decode(_))));
    }

    #[test]
    fn test_assembly_is_deterministic() {
        let job = PrintJob::new()
            .text(TextBuilder::new().text("a"))
            .step(image_step())
            .new_line(1);
        assert_eq!(job.build().unwrap(), job.build().unwrap());
    }
}
