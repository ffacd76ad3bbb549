//! Merge every PDF in a folder into one file

use std::path::PathBuf;

use tracing::{error, info};

use crate::error::Result;
use crate::folder;
use crate::pdf::{LopdfMerger, PdfMerger};
use crate::report::{Failure, MergeSummary};

/// File name of the merged PDF inside the output folder
pub const DEFAULT_OUTPUT_FILENAME: &str = "merged_output.pdf";

/// Options for merging a folder of PDFs
#[derive(Debug, Clone)]
pub struct MergeFolderOptions {
    /// Folder whose `.pdf` files are merged, in file name order
    pub input_dir: PathBuf,
    /// Folder that receives the merged file; wiped before each run
    pub output_dir: PathBuf,
    /// Name of the merged file inside `output_dir`
    pub output_filename: String,
}

impl MergeFolderOptions {
    pub fn new(input_dir: impl Into<PathBuf>, output_dir: impl Into<PathBuf>) -> Self {
        Self {
            input_dir: input_dir.into(),
            output_dir: output_dir.into(),
            output_filename: DEFAULT_OUTPUT_FILENAME.to_string(),
        }
    }
}

/// Merge all PDFs of `options.input_dir` with lopdf
///
/// # Example
///
/// ```no_run
/// use pdf_batch::batch::{merge_folder, MergeFolderOptions};
///
/// let summary = merge_folder(&MergeFolderOptions::new("input_pdf", "output_merged_pdf"))
///     .expect("input folder should exist");
/// println!("{} pages", summary.page_count);
/// ```
pub fn merge_folder(options: &MergeFolderOptions) -> Result<MergeSummary> {
    merge_folder_with(options, LopdfMerger::new())
}

/// Merge all PDFs of `options.input_dir` using `merger`.
///
/// Returns `Err` only when the run cannot start (missing input folder,
/// overlapping folders, output folder reset failing). Files that cannot be
/// merged, and a failed final write, end up in [`MergeSummary::failures`].
pub fn merge_folder_with<M: PdfMerger>(
    options: &MergeFolderOptions,
    mut merger: M,
) -> Result<MergeSummary> {
    folder::prepare_run(&options.input_dir, &options.output_dir)?;

    let mut pdf_files = folder::list_pdfs(&options.input_dir)?;
    folder::sort_by_file_name(&mut pdf_files);

    let mut summary = MergeSummary::default();

    if pdf_files.is_empty() {
        info!("No PDF files found to merge.");
        return Ok(summary);
    }

    info!("Merging {} PDF files...", pdf_files.len());

    for path in pdf_files {
        match merger.append(&path) {
            Ok(pages) => {
                info!("Added: {} ({} pages)", path.display(), pages);
                summary.added.push(path);
            }
            Err(e) => {
                error!("Error adding '{}': {}", path.display(), e);
                summary.failures.push(Failure::file(&path, e));
            }
        }
    }

    let output_path = options.output_dir.join(&options.output_filename);

    match merger.write_to(&output_path) {
        Ok(page_count) => {
            info!("Merged PDF saved to: {}", output_path.display());
            summary.page_count = page_count;
            summary.output_path = Some(output_path);
        }
        Err(e) => {
            error!("Error saving merged PDF: {}", e);
            summary.failures.push(Failure::file(&output_path, e));
        }
    }

    Ok(summary)
}
