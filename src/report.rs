//! Per-run outcome records
//!
//! Per-file and per-page errors never abort a run. Each one becomes a
//! [`Failure`] pushed into the run's summary, so callers (and tests) can see
//! exactly what was skipped.

use std::fmt;
use std::path::{Path, PathBuf};

/// A recoverable failure for one source file, or one page of it
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Failure {
    /// Source PDF the failure belongs to
    pub path: PathBuf,
    /// 1-based page number when only a single page was affected
    pub page: Option<usize>,
    /// Underlying error message
    pub message: String,
}

impl Failure {
    pub fn file(path: &Path, error: impl fmt::Display) -> Self {
        Self {
            path: path.to_path_buf(),
            page: None,
            message: error.to_string(),
        }
    }

    pub fn page(path: &Path, page: usize, error: impl fmt::Display) -> Self {
        Self {
            path: path.to_path_buf(),
            page: Some(page),
            message: error.to_string(),
        }
    }
}

impl fmt::Display for Failure {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.page {
            Some(page) => write!(f, "{} (page {}): {}", self.path.display(), page, self.message),
            None => write!(f, "{}: {}", self.path.display(), self.message),
        }
    }
}

/// Outcome of one merge run
#[derive(Debug, Clone, Default)]
pub struct MergeSummary {
    /// Files whose pages made it into the merge, in merge order
    pub added: Vec<PathBuf>,
    /// Total number of pages written
    pub page_count: usize,
    /// Path of the merged PDF, if it was written
    pub output_path: Option<PathBuf>,
    pub failures: Vec<Failure>,
}

impl MergeSummary {
    /// True when the work set was empty
    pub fn is_empty(&self) -> bool {
        self.added.is_empty() && self.failures.is_empty()
    }
}

/// Images written for one source document
#[derive(Debug, Clone)]
pub struct DocumentReport {
    pub source: PathBuf,
    pub output_dir: PathBuf,
    /// Pages the document has
    pub page_count: usize,
    /// Pages actually saved; less than `page_count` when saves failed
    pub pages_written: usize,
}

/// Outcome of one rasterize run
#[derive(Debug, Clone, Default)]
pub struct RasterizeSummary {
    pub documents: Vec<DocumentReport>,
    pub failures: Vec<Failure>,
}

impl RasterizeSummary {
    /// True when the work set was empty
    pub fn is_empty(&self) -> bool {
        self.documents.is_empty() && self.failures.is_empty()
    }

    /// Total JPEG files written across all documents
    pub fn images_written(&self) -> usize {
        self.documents.iter().map(|d| d.pages_written).sum()
    }
}
