//! Error types for the pdf-batch library

use std::path::PathBuf;
use thiserror::Error;

/// Result type alias using our Error type
pub type Result<T> = std::result::Result<T, Error>;

/// Main error type for the pdf-batch library
///
/// Only a handful of variants are fatal to a whole run (`InputFolderNotFound`,
/// `OutputOverlapsInput`, `Backend`, and I/O while resetting the output
/// folder). Everything else is caught at the per-file or per-page boundary
/// and recorded as a [`crate::report::Failure`].
#[derive(Error, Debug)]
pub enum Error {
    /// PDF processing error
    #[error("PDF error: {0}")]
    Pdf(#[from] lopdf::Error),

    /// IO error
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Image encoding error
    #[error("Image error: {0}")]
    Image(#[from] image::ImageError),

    /// Invalid work-set file name pattern
    #[error("Invalid glob pattern: {0}")]
    InvalidGlob(#[from] glob::PatternError),

    /// Input folder missing or not a directory
    #[error("Input folder not found: {}", .0.display())]
    InputFolderNotFound(PathBuf),

    /// Output folder would be wiped together with the inputs
    #[error("Output folder {} is the input folder or contains it", .output.display())]
    OutputOverlapsInput { input: PathBuf, output: PathBuf },

    /// Invalid PDF (no pages)
    #[error("PDF has no pages: {}", .0.display())]
    EmptyPdf(PathBuf),

    /// Every input was skipped, there is nothing to write
    #[error("No pages were collected, nothing to write")]
    NothingToMerge,

    /// Rendering a page (or opening a document for rendering) failed
    #[error("Rendering failed for {}: {detail}", .path.display())]
    Render { path: PathBuf, detail: String },

    /// The native rendering library could not be loaded
    #[error("PDF rendering backend unavailable: {0}")]
    Backend(String),
}
