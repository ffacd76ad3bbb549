//! PDF capabilities: merging, page counting, rendering and JPEG output

pub mod jpeg;
pub mod merge;
pub mod metadata;
pub mod render;

// Re-export commonly used items
pub use jpeg::{encode_jpeg, DEFAULT_JPEG_QUALITY};
pub use merge::{LopdfMerger, PdfMerger};
pub use metadata::count_pages;
pub use render::{scale_for_dpi, PdfBackend, PdfiumBackend, RenderablePdf, DEFAULT_DPI};
