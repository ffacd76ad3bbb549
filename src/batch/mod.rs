//! The two folder-level runs
//!
//! Both follow the same shape: validate, reset the output folder, discover
//! the work set, then loop over it. A failing file (or page) is logged and
//! recorded in the summary; only the preconditions can end a run early.

pub mod merge;
pub mod rasterize;

pub use merge::{merge_folder, merge_folder_with, MergeFolderOptions, DEFAULT_OUTPUT_FILENAME};
pub use rasterize::{rasterize_folder, rasterize_folder_with, RasterizeOptions};
