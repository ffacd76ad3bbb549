//! merge-pdfs CLI tool
//!
//! Merges all PDF files in a folder into a single PDF.

use anyhow::{Context, Result};
use clap::Parser;
use std::path::PathBuf;
use std::process;
use tracing::{info, warn};

use pdf_batch::batch::{merge_folder, MergeFolderOptions};

/// Merge all PDFs in a folder into one PDF
#[derive(Parser)]
#[command(name = "merge-pdfs")]
#[command(author, version, about, long_about = None)]
#[command(after_help = "NOTES:
    Files are merged in file name order, so prefix them with numbers:
    1_intro.pdf, 2_body.pdf, ...

    The output folder is deleted and recreated on every run.
    The result is written to <OUTPUT_MERGED_PDF>/merged_output.pdf")]
struct Cli {
    /// Folder containing PDF files to merge
    input_folder: PathBuf,

    /// Folder to save the merged PDF
    output_merged_pdf: PathBuf,
}

fn main() {
    let cli = Cli::parse();
    pdf_batch::logging::init();

    if let Err(e) = cmd_merge(cli.input_folder, cli.output_merged_pdf) {
        eprintln!("Error: {:#}", e);
        process::exit(1);
    }
}

/// Merge the folder and report per-file failures without failing the process
fn cmd_merge(input: PathBuf, output: PathBuf) -> Result<()> {
    let options = MergeFolderOptions::new(input, output);

    let summary = merge_folder(&options)
        .with_context(|| format!("Cannot merge {}", options.input_dir.display()))?;

    if summary.is_empty() {
        return Ok(());
    }

    for failure in &summary.failures {
        warn!("Skipped {}", failure);
    }
    info!(
        "{} added, {} failed, {} pages total",
        summary.added.len(),
        summary.failures.len(),
        summary.page_count
    );

    Ok(())
}
