//! pdf-to-jpg CLI tool
//!
//! Converts every page of every PDF in a folder into JPEG images.

use anyhow::{Context, Result};
use clap::Parser;
use std::path::PathBuf;
use std::process;
use tracing::{info, warn};

use pdf_batch::batch::{rasterize_folder, RasterizeOptions};
use pdf_batch::pdf::DEFAULT_DPI;

/// Convert all PDFs in a folder to JPEG images
#[derive(Parser)]
#[command(name = "pdf-to-jpg")]
#[command(author, version, about, long_about = None)]
#[command(after_help = "EXAMPLES:
    # Default 200 DPI
    pdf-to-jpg scans/ images/

    # Sharper output
    pdf-to-jpg scans/ images/ --dpi 300

Images land in <OUTPUT_FOLDER>/<pdf name>/page_<n>.jpg.
The output folder is deleted and recreated on every run.
Needs the PDFium library next to the executable, in the working
directory, or installed system-wide.")]
struct Cli {
    /// Folder containing PDF files
    input_folder: PathBuf,

    /// Folder to save JPEG images
    output_folder: PathBuf,

    /// Resolution in DPI
    #[arg(long, default_value_t = DEFAULT_DPI, value_parser = clap::value_parser!(u32).range(1..))]
    dpi: u32,
}

fn main() {
    let cli = Cli::parse();
    pdf_batch::logging::init();

    if let Err(e) = cmd_convert(cli.input_folder, cli.output_folder, cli.dpi) {
        eprintln!("Error: {:#}", e);
        process::exit(1);
    }
}

/// Convert the folder and report per-file failures without failing the process
fn cmd_convert(input: PathBuf, output: PathBuf, dpi: u32) -> Result<()> {
    let options = RasterizeOptions::new(input, output).with_dpi(dpi);

    let summary = rasterize_folder(&options)
        .with_context(|| format!("Cannot convert {}", options.input_dir.display()))?;

    if summary.is_empty() {
        return Ok(());
    }

    for failure in &summary.failures {
        warn!("Skipped {}", failure);
    }
    info!(
        "{} documents converted, {} failed, {} images written",
        summary.documents.len(),
        summary.failures.len(),
        summary.images_written()
    );

    Ok(())
}
