//! pdf-batch library
//!
//! Folder-at-a-time PDF utilities behind the `merge-pdfs` and `pdf-to-jpg`
//! binaries. This library provides functionality to:
//! - Merge every PDF in a folder, in file name order, into one PDF
//! - Render every page of every PDF in a folder to JPEG, one subfolder per PDF
//!
//! Both runs wipe their output folder first and carry on past files that
//! fail, recording each failure in the returned summary.
//!
//! # Example
//!
//! ```no_run
//! use pdf_batch::batch::{merge_folder, rasterize_folder, MergeFolderOptions, RasterizeOptions};
//!
//! // Name inputs "1_intro.pdf", "2_body.pdf", ... to control the order
//! let merged = merge_folder(&MergeFolderOptions::new("input_pdf", "output_merged_pdf"))
//!     .expect("Failed to merge PDFs");
//! println!("merged {} pages", merged.page_count);
//!
//! let images = rasterize_folder(&RasterizeOptions::new("input_pdf", "images").with_dpi(300))
//!     .expect("Failed to rasterize PDFs");
//! println!("wrote {} images", images.images_written());
//! ```

pub mod batch;
pub mod error;
pub mod folder;
pub mod logging;
pub mod pdf;
pub mod report;

// Re-export commonly used items
pub use error::{Error, Result};
pub use report::{DocumentReport, Failure, MergeSummary, RasterizeSummary};
