//! JSON schema types for print jobs.

use serde::Deserialize;

fn default_one() -> usize {
    1
}

/// Top-level JSON print job.
#[derive(Debug, Deserialize)]
pub struct JsonJob {
    /// Text encoding: "ascii" (default) or "cp437".
    #[serde(default)]
    pub encoding: Option<String>,
    /// Printer geometry; the 58mm preset when absent.
    #[serde(default)]
    pub printer: Option<JsonPrinter>,
    /// Steps in print order.
    pub steps: Vec<JsonStep>,
}

/// Printer overrides. Missing fields keep the 58mm preset values.
#[derive(Debug, Default, Deserialize)]
pub struct JsonPrinter {
    #[serde(default)]
    pub width_mm: Option<f32>,
    #[serde(default)]
    pub dpi: Option<u16>,
    #[serde(default)]
    pub transport_unit: Option<usize>,
}

/// A single step in the job.
#[derive(Debug, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum JsonStep {
    Text(JsonTextBlock),
    Image(JsonImage),
    NewLine(JsonNewLine),
}

/// A text block: runs and line breaks.
#[derive(Debug, Deserialize)]
pub struct JsonTextBlock {
    pub runs: Vec<JsonRun>,
}

/// One entry of a text block.
#[derive(Debug, Deserialize)]
#[serde(untagged)]
pub enum JsonRun {
    NewLine { new_line: usize },
    Text(JsonTextRun),
}

/// A text run. Any style field present makes it a styled run.
#[derive(Debug, Deserialize)]
pub struct JsonTextRun {
    pub text: String,
    /// "left", "center", "right".
    #[serde(default)]
    pub align: Option<String>,
    /// "normal", "wide", "tall", "large", "large_2" .. "large_6".
    #[serde(default)]
    pub font: Option<String>,
    /// "normal", "bold", "underline".
    #[serde(default)]
    pub style: Option<String>,
    /// "black", "red".
    #[serde(default)]
    pub color: Option<String>,
}

/// Image block. `path` is relative to the job file.
#[derive(Debug, Deserialize)]
pub struct JsonImage {
    pub path: String,
    #[serde(default)]
    pub width: Option<u32>,
    #[serde(default)]
    pub height: Option<u32>,
    #[serde(default)]
    pub fill_width: bool,
    #[serde(default)]
    pub align: Option<String>,
    /// "gsv" (default) or "esc_asterisk".
    #[serde(default)]
    pub mode: Option<String>,
}

/// Paper feed between blocks.
#[derive(Debug, Deserialize)]
pub struct JsonNewLine {
    #[serde(default = "default_one")]
    pub times: usize,
}
