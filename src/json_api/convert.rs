//! Conversion from JSON schema types to print steps.

use std::fmt;
use std::path::Path;
use std::sync::Arc;

use crate::builder::{ImageBlock, ImageOptions, PrintJob, PrintStep, RasterMode, TextBuilder};
use crate::error::ThermolineError;
use crate::printer::PrinterConfig;
use crate::protocol::encoding::{Ascii, Cp437, TextEncoder};
use crate::protocol::text::{Alignment, Color, Font, Style, TextStyle};

use super::schema::*;

/// Errors from JSON → print step conversion.
#[derive(Debug)]
pub enum JsonApiError {
    /// A field value is invalid.
    InvalidField {
        component: &'static str,
        field: &'static str,
        message: String,
    },
}

impl fmt::Display for JsonApiError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            JsonApiError::InvalidField {
                component,
                field,
                message,
            } => write!(f, "{}: invalid {}: {}", component, field, message),
        }
    }
}

impl std::error::Error for JsonApiError {}

impl From<JsonApiError> for ThermolineError {
    fn from(e: JsonApiError) -> Self {
        ThermolineError::InvalidJob(e.to_string())
    }
}

fn parse_field<T>(
    value: Option<&String>,
    parse: fn(&str) -> Option<T>,
    component: &'static str,
    field: &'static str,
    expected: &str,
) -> Result<Option<T>, JsonApiError> {
    match value {
        None => Ok(None),
        Some(s) => parse(s).map(Some).ok_or_else(|| JsonApiError::InvalidField {
            component,
            field,
            message: format!("expected {}, got \"{}\"", expected, s),
        }),
    }
}

impl JsonJob {
    /// Load and parse a job file.
    pub fn from_file(path: &Path) -> Result<Self, ThermolineError> {
        let json = std::fs::read_to_string(path)?;
        Ok(serde_json::from_str(&json)?)
    }

    /// Printer geometry, starting from the 58mm preset.
    pub fn printer_config(&self) -> PrinterConfig {
        let mut config = PrinterConfig::MM58;
        if let Some(printer) = &self.printer {
            if let Some(width_mm) = printer.width_mm {
                config.name = "custom";
                config.width_mm = width_mm;
            }
            if let Some(dpi) = printer.dpi {
                config.name = "custom";
                config.dpi = dpi;
            }
            if let Some(unit) = printer.transport_unit {
                config.transport_unit = unit;
            }
        }
        config
    }

    pub fn encoder(&self) -> Result<Arc<dyn TextEncoder>, JsonApiError> {
        match self.encoding.as_deref() {
            None => Ok(Arc::new(Ascii)),
            Some(s) => match s.to_ascii_lowercase().as_str() {
                "ascii" => Ok(Arc::new(Ascii)),
                "cp437" => Ok(Arc::new(Cp437)),
                _ => Err(JsonApiError::InvalidField {
                    component: "job",
                    field: "encoding",
                    message: format!("expected \"ascii\" or \"cp437\", got \"{}\"", s),
                }),
            },
        }
    }

    /// Convert to print steps, reading images relative to `base_dir`.
    pub fn to_steps(&self, base_dir: &Path) -> Result<Vec<PrintStep>, ThermolineError> {
        let encoder = self.encoder()?;
        self.steps
            .iter()
            .map(|step| step.to_step(&encoder, base_dir))
            .collect()
    }

    pub fn to_job(&self, base_dir: &Path) -> Result<PrintJob, ThermolineError> {
        let job = PrintJob::with_config(self.printer_config());
        Ok(self
            .to_steps(base_dir)?
            .into_iter()
            .fold(job, |job, step| job.step(step)))
    }
}

impl JsonStep {
    fn to_step(
        &self,
        encoder: &Arc<dyn TextEncoder>,
        base_dir: &Path,
    ) -> Result<PrintStep, ThermolineError> {
        match self {
            JsonStep::Text(block) => Ok(PrintStep::Text(block.to_builder(encoder.clone())?)),
            JsonStep::Image(image) => Ok(PrintStep::Image(image.to_block(base_dir)?)),
            JsonStep::NewLine(n) => Ok(PrintStep::NewLine(n.times)),
        }
    }
}

impl JsonTextBlock {
    fn to_builder(&self, encoder: Arc<dyn TextEncoder>) -> Result<TextBuilder, JsonApiError> {
        let mut builder = TextBuilder::with_encoder(encoder);
        for run in &self.runs {
            builder = match run {
                JsonRun::NewLine { new_line } => builder.new_line(*new_line),
                JsonRun::Text(run) => match run.to_style()? {
                    Some(style) => builder.styled_text(&run.text, &style),
                    None => builder.text(&run.text),
                },
            };
        }
        Ok(builder)
    }
}

impl JsonTextRun {
    /// `None` for a plain run (no style fields at all).
    fn to_style(&self) -> Result<Option<TextStyle>, JsonApiError> {
        if self.align.is_none() && self.font.is_none() && self.style.is_none() && self.color.is_none()
        {
            return Ok(None);
        }
        let alignment = parse_field(
            self.align.as_ref(),
            Alignment::parse,
            "text",
            "align",
            "\"left\", \"center\", or \"right\"",
        )?;
        let font = parse_field(
            self.font.as_ref(),
            Font::parse,
            "text",
            "font",
            "\"normal\", \"wide\", \"tall\", or \"large\"..\"large_6\"",
        )?;
        let style = parse_field(
            self.style.as_ref(),
            Style::parse,
            "text",
            "style",
            "\"normal\", \"bold\", or \"underline\"",
        )?;
        let color = parse_field(
            self.color.as_ref(),
            Color::parse,
            "text",
            "color",
            "\"black\" or \"red\"",
        )?;

        Ok(Some(TextStyle {
            alignment: alignment.unwrap_or_default(),
            font: font.unwrap_or_default(),
            style: style.unwrap_or_default(),
            color: color.unwrap_or_default(),
        }))
    }
}

fn parse_raster_mode(s: &str) -> Option<RasterMode> {
    match s.to_ascii_lowercase().as_str() {
        "gsv" | "gs_v" | "raster" => Some(RasterMode::GsV),
        "esc_asterisk" | "asterisk" | "strips" => Some(RasterMode::EscAsterisk),
        _ => None,
    }
}

impl JsonImage {
    fn options(&self) -> Result<ImageOptions, JsonApiError> {
        let alignment = parse_field(
            self.align.as_ref(),
            Alignment::parse,
            "image",
            "align",
            "\"left\", \"center\", or \"right\"",
        )?;
        let raster_mode = parse_field(
            self.mode.as_ref(),
            parse_raster_mode,
            "image",
            "mode",
            "\"gsv\" or \"esc_asterisk\"",
        )?;
        Ok(ImageOptions {
            width: self.width,
            height: self.height,
            fill_width: self.fill_width,
            alignment: alignment.unwrap_or_default(),
            raster_mode: raster_mode.unwrap_or_default(),
        })
    }

    fn to_block(&self, base_dir: &Path) -> Result<ImageBlock, ThermolineError> {
        let options = self.options()?;
        let path = base_dir.join(&self.path);
        let source = std::fs::read(&path).map_err(|e| JsonApiError::InvalidField {
            component: "image",
            field: "path",
            message: format!("cannot read {}: {}", path.display(), e),
        })?;
        Ok(ImageBlock { source, options })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::builder::assemble;

    fn parse(json: &str) -> JsonJob {
        serde_json::from_str(json).unwrap()
    }

    fn steps(json: &str) -> Result<Vec<PrintStep>, ThermolineError> {
        parse(json).to_steps(Path::new("."))
    }

    #[test]
    fn test_minimal_job() {
        let job = parse(r#"{"steps": []}"#);
        assert_eq!(job.printer_config(), PrinterConfig::MM58);
        let data = job.to_job(Path::new(".")).unwrap().build().unwrap();
        assert_eq!(data.bytes, vec![0x0A; 5]);
    }

    #[test]
    fn test_plain_and_styled_runs() {
        let steps = steps(
            r#"{"steps": [{"type": "text", "runs": [
                {"text": "T", "align": "center", "font": "large", "style": "bold"},
                {"new_line": 1},
                {"text": "p"}
            ]}]}"#,
        )
        .unwrap();
        let PrintStep::Text(block) = &steps[0] else {
            panic!("expected text step");
        };
        let bytes = block.build();
        // styled: defaults + 12 style bytes + "T", then LF, then defaults + left + "p"
        assert_eq!(bytes.len(), 12 + 12 + 1 + 1 + 12 + 3 + 1);
        assert_eq!(&bytes[12..15], &[0x1B, 0x61, 0x01]);
        assert_eq!(&bytes[15..18], &[0x1D, 0x21, 0x11]);
        assert_eq!(&bytes[18..21], &[0x1B, 0x45, 0x01]);
        assert_eq!(bytes[25], 0x0A);
        assert_eq!(&bytes[38..41], &[0x1B, 0x61, 0x00]);
        assert_eq!(bytes[41], b'p');
    }

    #[test]
    fn test_new_line_step_defaults_to_one() {
        let steps = steps(r#"{"steps": [{"type": "new_line"}, {"type": "new_line", "times": 3}]}"#)
            .unwrap();
        assert!(matches!(steps[0], PrintStep::NewLine(1)));
        assert!(matches!(steps[1], PrintStep::NewLine(3)));
    }

    #[test]
    fn test_unknown_font_rejected() {
        let result = steps(r#"{"steps": [{"type": "text", "runs": [{"text": "x", "font": "huge"}]}]}"#);
        let Err(ThermolineError::InvalidJob(msg)) = result else {
            panic!("expected InvalidJob");
        };
        assert!(msg.contains("font"));
    }

    #[test]
    fn test_unknown_encoding_rejected() {
        let result = steps(r#"{"encoding": "utf-16", "steps": []}"#);
        assert!(matches!(result, Err(ThermolineError::InvalidJob(_))));
    }

    #[test]
    fn test_cp437_encoding_selects_code_page() {
        let job = parse(r#"{"encoding": "cp437", "steps": [{"type": "text", "runs": [{"text": "é"}]}]}"#);
        let steps = job.to_steps(Path::new(".")).unwrap();
        let data = assemble(&steps, &job.printer_config()).unwrap();
        assert_eq!(&data.bytes[0..3], &[0x1B, 0x74, 0x00]);
        assert_eq!(data.bytes[18], 0x82);
    }

    #[test]
    fn test_printer_override() {
        let job = parse(r#"{"printer": {"width_mm": 72.0}, "steps": []}"#);
        let config = job.printer_config();
        assert_eq!(config.width_dots(), 575);
        assert_eq!(config.dpi, 203);
    }

    #[test]
    fn test_image_options() {
        let image: JsonImage = serde_json::from_str(
            r#"{"path": "logo.png", "width": 200, "align": "right", "mode": "esc_asterisk"}"#,
        )
        .unwrap();
        let options = image.options().unwrap();
        assert_eq!(options.width, Some(200));
        assert_eq!(options.height, None);
        assert_eq!(options.alignment, Alignment::Right);
        assert_eq!(options.raster_mode, RasterMode::EscAsterisk);
    }

    #[test]
    fn test_missing_image_file() {
        let result = steps(r#"{"steps": [{"type": "image", "path": "does-not-exist.png"}]}"#);
        assert!(matches!(result, Err(ThermolineError::InvalidJob(_))));
    }

    #[test]
    fn test_unknown_step_type() {
        let result: Result<JsonJob, _> = serde_json::from_str(r#"{"steps": [{"type": "qr"}]}"#);
        assert!(result.is_err());
    }
}
