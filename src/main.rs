//! # Thermoline CLI
//!
//! Command-line interface for encoding and sending thermal print jobs.
//!
//! ## Usage
//!
//! ```bash
//! # Encode one image into a print stream, with a preview of the dots
//! thermoline image logo.png --fill-width --align center --out logo.bin --preview logo-dots.png
//!
//! # Encode a JSON job
//! thermoline job receipt.json --out receipt.bin
//!
//! # Send a stream (or a JSON job) to the printer in 20-byte chunks
//! thermoline send receipt.bin --device /dev/rfcomm0
//!
//! # Show how a stream would be chunked
//! thermoline chunks receipt.bin --unit 180
//! ```
//!
//! Set `RUST_LOG=thermoline=debug` for encoder and transport logs.

use clap::{Parser, Subcommand, ValueEnum};
use std::path::{Path, PathBuf};
use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};

use thermoline::{
    PrintData, PrintJob, PrinterConfig, PrinterSession, ThermolineError,
    builder::{ImageOptions, RasterMode},
    json_api::JsonJob,
    printer::DEFAULT_TRANSPORT_UNIT,
    protocol::{commands, text::Alignment},
    transport::{DEFAULT_DEVICE, DriverState, FileLink, split_chunks},
};

/// Thermoline - Thermal printer stream encoder
#[derive(Parser, Debug)]
#[command(name = "thermoline")]
#[command(author, version, about, long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Encode a single image into a print stream
    Image {
        /// Source image (PNG, JPEG, ...)
        input: PathBuf,

        /// Target box width in dots
        #[arg(long)]
        width: Option<u32>,

        /// Target box height in dots
        #[arg(long)]
        height: Option<u32>,

        /// Scale to the full printer head width
        #[arg(long)]
        fill_width: bool,

        #[arg(long, value_enum, default_value = "left")]
        align: AlignArg,

        /// Use ESC * strips instead of a GS v 0 raster
        #[arg(long)]
        asterisk: bool,

        #[arg(long, value_enum, default_value = "mm58")]
        printer: PrinterArg,

        /// Output stream file
        #[arg(long, value_name = "FILE")]
        out: PathBuf,

        /// Write a PNG of the printed dots
        #[arg(long, value_name = "FILE")]
        preview: Option<PathBuf>,
    },

    /// Encode a JSON print job
    Job {
        input: PathBuf,

        #[arg(long, value_name = "FILE")]
        out: PathBuf,

        #[arg(long, value_name = "FILE")]
        preview: Option<PathBuf>,
    },

    /// Send a stream file or JSON job to the printer
    Send {
        /// `.json` jobs are encoded first; anything else is sent as-is
        input: PathBuf,

        /// Printer device path
        #[arg(long, default_value = DEFAULT_DEVICE)]
        device: PathBuf,

        /// Transport unit (bytes per write)
        #[arg(long)]
        unit: Option<usize>,
    },

    /// Print the chunk plan for a stream file
    Chunks {
        input: PathBuf,

        #[arg(long, default_value_t = DEFAULT_TRANSPORT_UNIT)]
        unit: usize,
    },
}

#[derive(ValueEnum, Clone, Copy, Debug)]
enum AlignArg {
    Left,
    Center,
    Right,
}

impl From<AlignArg> for Alignment {
    fn from(a: AlignArg) -> Self {
        match a {
            AlignArg::Left => Alignment::Left,
            AlignArg::Center => Alignment::Center,
            AlignArg::Right => Alignment::Right,
        }
    }
}

#[derive(ValueEnum, Clone, Copy, Debug)]
enum PrinterArg {
    Mm58,
    Mm80,
}

impl From<PrinterArg> for PrinterConfig {
    fn from(p: PrinterArg) -> Self {
        match p {
            PrinterArg::Mm58 => PrinterConfig::MM58,
            PrinterArg::Mm80 => PrinterConfig::MM80,
        }
    }
}

fn main() {
    env_logger::init();

    if let Err(e) = run() {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }
}

fn run() -> Result<(), ThermolineError> {
    let cli = Cli::parse();

    match cli.command {
        Commands::Image {
            input,
            width,
            height,
            fill_width,
            align,
            asterisk,
            printer,
            out,
            preview,
        } => {
            let options = ImageOptions {
                width,
                height,
                fill_width,
                alignment: align.into(),
                raster_mode: if asterisk {
                    RasterMode::EscAsterisk
                } else {
                    RasterMode::GsV
                },
            };
            let source = std::fs::read(&input)?;
            let data = PrintJob::with_config(printer.into())
                .image(source, options)
                .build()?;
            write_outputs(&data, &out, preview.as_deref())?;
        }

        Commands::Job {
            input,
            out,
            preview,
        } => {
            let data = build_json_job(&input)?;
            write_outputs(&data, &out, preview.as_deref())?;
        }

        Commands::Send {
            input,
            device,
            unit,
        } => {
            let (bytes, config) = if is_json(&input) {
                let job = JsonJob::from_file(&input)?;
                let data = job.to_job(base_dir(&input))?.build()?;
                (data.bytes, job.printer_config())
            } else {
                (std::fs::read(&input)?, PrinterConfig::default())
            };
            send(&device, unit, &bytes, &config)?;
        }

        Commands::Chunks { input, unit } => {
            let unit = chunk_unit(unit);
            let mut stream = commands::reset();
            stream.extend(std::fs::read(&input)?);
            let chunks = split_chunks(&stream, unit);
            println!(
                "{} bytes (with reset prefix) in {} chunks of {}",
                stream.len(),
                chunks.len(),
                unit
            );
            for (i, chunk) in chunks.iter().enumerate() {
                println!("{:>5}: {:>4} bytes  {}", i, chunk.len(), hex_preview(chunk));
            }
        }
    }

    Ok(())
}

fn is_json(path: &Path) -> bool {
    path.extension()
        .is_some_and(|ext| ext.eq_ignore_ascii_case("json"))
}

fn base_dir(path: &Path) -> &Path {
    path.parent().unwrap_or_else(|| Path::new("."))
}

fn build_json_job(path: &Path) -> Result<PrintData, ThermolineError> {
    let job = JsonJob::from_file(path)?;
    job.to_job(base_dir(path))?.build()
}

fn write_outputs(data: &PrintData, out: &Path, preview: Option<&Path>) -> Result<(), ThermolineError> {
    std::fs::write(out, &data.bytes)?;
    println!("Wrote {} bytes to {}", data.bytes.len(), out.display());

    if let Some(path) = preview {
        match &data.preview {
            Some(png) => {
                std::fs::write(path, png)?;
                println!("Saved preview to {}", path.display());
            }
            None => println!("No image in job, preview not written"),
        }
    }
    Ok(())
}

/// Drive a full chunked session over a device or file
fn send(
    device: &Path,
    unit: Option<usize>,
    bytes: &[u8],
    config: &PrinterConfig,
) -> Result<(), ThermolineError> {
    let mut link = FileLink::new(device);
    if let Some(unit) = unit {
        link = link.with_unit(unit);
    }

    let mut session = PrinterSession::new(link, config);
    let done = Arc::new(AtomicBool::new(false));
    let flag = done.clone();
    session.on_complete(move || flag.store(true, Ordering::SeqCst));

    session.connect()?;
    println!("Sending {} bytes to {}...", bytes.len(), device.display());
    session.print(bytes)?;
    session.pump()?;
    session.disconnect()?;

    if done.load(Ordering::SeqCst) && session.driver().state() == DriverState::Done {
        println!(
            "Printed successfully ({} chunks of {})",
            session.driver().chunks().len(),
            session.driver().chunk_size()
        );
        Ok(())
    } else {
        Err(ThermolineError::TransportWrite(format!(
            "session stopped after {} of {} chunks",
            session.driver().sent(),
            session.driver().chunks().len()
        )))
    }
}

/// Unit the driver would actually use; smaller units are ignored
fn chunk_unit(requested: usize) -> usize {
    requested.max(DEFAULT_TRANSPORT_UNIT)
}

fn hex_preview(chunk: &[u8]) -> String {
    let shown: Vec<String> = chunk.iter().take(8).map(|b| format!("{:02X}", b)).collect();
    let more = if chunk.len() > 8 { " .." } else { "" };
    format!("{}{}", shown.join(" "), more)
}
