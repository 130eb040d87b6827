//! # Text Blocks
//!
//! Accumulates style-prefixed text runs into one byte buffer.
//!
//! Every run starts by re-asserting the default formatting (left, normal
//! size, no emphasis, black), so a run never inherits what an earlier run
//! selected, whatever order the builder calls come in.
//!
//! ```text
//! styled_text:  [defaults 12B] [align][font][style][color] text
//! text:         [defaults 12B] [align left] text
//! new_line(n):  LF × n
//! ```
//!
//! ## Example
//!
//! ```
//! use thermoline::builder::TextBuilder;
//! use thermoline::protocol::text::{Alignment, Style, TextStyle};
//!
//! let title = TextStyle {
//!     alignment: Alignment::Center,
//!     style: Style::Bold,
//!     ..Default::default()
//! };
//! let block = TextBuilder::new()
//!     .styled_text("RECEIPT", &title)
//!     .new_line(1)
//!     .text("thank you")
//!     .new_line(1);
//!
//! assert!(block.build().ends_with(b"thank you\n"));
//! ```

use std::fmt;
use std::sync::Arc;

use crate::protocol::commands;
use crate::protocol::encoding::{Ascii, TextEncoder};
use crate::protocol::text::{Alignment, TextStyle, align};

/// Builder for one text block
#[derive(Clone)]
pub struct TextBuilder {
    encoder: Arc<dyn TextEncoder>,
    buf: Vec<u8>,
}

impl fmt::Debug for TextBuilder {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("TextBuilder")
            .field("len", &self.buf.len())
            .finish_non_exhaustive()
    }
}

impl Default for TextBuilder {
    fn default() -> Self {
        Self::new()
    }
}

impl TextBuilder {
    /// Empty builder using the ASCII encoder
    pub fn new() -> Self {
        Self::with_encoder(Arc::new(Ascii))
    }

    pub fn with_encoder(encoder: Arc<dyn TextEncoder>) -> Self {
        Self {
            encoder,
            buf: Vec::new(),
        }
    }

    /// Append a run with explicit formatting
    pub fn styled_text(mut self, text: &str, style: &TextStyle) -> Self {
        self.buf.extend(TextStyle::reset());
        self.buf.extend(style.to_commands());
        self.buf.extend(self.encoder.encode(text));
        self
    }

    /// Append a run in the default formatting
    pub fn text(mut self, text: &str) -> Self {
        self.buf.extend(TextStyle::reset());
        self.buf.extend(align(Alignment::Left));
        self.buf.extend(self.encoder.encode(text));
        self
    }

    /// Append `n` line feeds
    pub fn new_line(mut self, n: usize) -> Self {
        self.buf.extend(commands::line_feeds(n));
        self
    }

    /// Encoder used for this block's runs
    pub fn encoder(&self) -> &dyn TextEncoder {
        self.encoder.as_ref()
    }

    pub fn is_empty(&self) -> bool {
        self.buf.is_empty()
    }

    /// The accumulated bytes
    pub fn build(&self) -> Vec<u8> {
        self.buf.clone()
    }
}
