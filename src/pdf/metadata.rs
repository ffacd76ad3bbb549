//! PDF metadata extraction

use std::path::Path;
use lopdf::Document;
use crate::error::{Error, Result};

/// Count the number of pages in a PDF file
///
/// Pages are counted by walking the page tree rather than trusting the
/// root `Count` field, which merged or hand-edited files sometimes get wrong.
pub fn count_pages(path: &Path) -> Result<usize> {
    let doc = Document::load(path)?;
    let page_count = doc.get_pages().len();

    if page_count == 0 {
        return Err(Error::EmptyPdf(path.to_path_buf()));
    }

    Ok(page_count)
}
