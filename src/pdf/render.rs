//! Page rasterization through PDFium
//!
//! Rendering sits behind two small traits so the batch loop does not care
//! which library draws the pages. [`PdfiumBackend`] is the real one; tests
//! plug in a fake.

use std::path::{Path, PathBuf};

use image::DynamicImage;
use pdfium_render::prelude::*;
use tracing::debug;

use crate::error::{Error, Result};

/// Resolution used when none is given
pub const DEFAULT_DPI: u32 = 200;

/// PDF user space units per inch
pub const POINTS_PER_INCH: f32 = 72.0;

/// Scale factor that turns page points into pixels at `dpi`
pub fn scale_for_dpi(dpi: u32) -> f32 {
    dpi as f32 / POINTS_PER_INCH
}

/// An opened document that can render its pages
pub trait RenderablePdf {
    fn page_count(&self) -> usize;

    /// Render the page at 0-based `index`
    fn render_page(&self, index: usize, dpi: u32) -> Result<DynamicImage>;
}

/// A rendering library that can open PDF files
pub trait PdfBackend {
    type Document<'a>: RenderablePdf
    where
        Self: 'a;

    fn open(&self, path: &Path) -> Result<Self::Document<'_>>;
}

/// [`PdfBackend`] that binds the native PDFium library
pub struct PdfiumBackend {
    pdfium: Pdfium,
}

impl PdfiumBackend {
    /// Bind PDFium, trying the working directory, then the directory of the
    /// running executable, then the system library paths
    pub fn bind() -> Result<Self> {
        let exe_dir = std::env::current_exe()
            .ok()
            .and_then(|exe| exe.parent().map(Path::to_path_buf));

        let bindings = Pdfium::bind_to_library(Pdfium::pdfium_platform_library_name_at_path("./"))
            .or_else(|first| match &exe_dir {
                Some(dir) => Pdfium::bind_to_library(Pdfium::pdfium_platform_library_name_at_path(dir)),
                None => Err(first),
            })
            .or_else(|_| Pdfium::bind_to_system_library())
            .map_err(|e| {
                Error::Backend(format!(
                    "could not load the PDFium library ({:?}). Place {} next to the executable or install it system-wide",
                    e,
                    Pdfium::pdfium_platform_library_name().to_string_lossy()
                ))
            })?;

        Ok(Self {
            pdfium: Pdfium::new(bindings),
        })
    }
}

impl PdfBackend for PdfiumBackend {
    type Document<'a> = PdfiumDocument<'a>;

    fn open(&self, path: &Path) -> Result<PdfiumDocument<'_>> {
        let document = self
            .pdfium
            .load_pdf_from_file(path, None)
            .map_err(|e| Error::Render {
                path: path.to_path_buf(),
                detail: format!("{:?}", e),
            })?;

        Ok(PdfiumDocument {
            document,
            path: path.to_path_buf(),
        })
    }
}

/// A document opened by [`PdfiumBackend`]
pub struct PdfiumDocument<'a> {
    document: PdfDocument<'a>,
    path: PathBuf,
}

impl PdfiumDocument<'_> {
    fn render_error(&self, page: usize, detail: impl std::fmt::Debug) -> Error {
        Error::Render {
            path: self.path.clone(),
            detail: format!("page {}: {:?}", page, detail),
        }
    }
}

impl RenderablePdf for PdfiumDocument<'_> {
    fn page_count(&self) -> usize {
        self.document.pages().len() as usize
    }

    fn render_page(&self, index: usize, dpi: u32) -> Result<DynamicImage> {
        let page_index =
            PdfPageIndex::try_from(index).map_err(|e| self.render_error(index + 1, e))?;

        let page = self
            .document
            .pages()
            .get(page_index)
            .map_err(|e| self.render_error(index + 1, e))?;

        let render_config = PdfRenderConfig::new().scale_page_by_factor(scale_for_dpi(dpi));

        let bitmap = page
            .render_with_config(&render_config)
            .map_err(|e| self.render_error(index + 1, e))?;

        let image = bitmap.as_image();
        debug!(
            "Rendered page {} of {} → {}x{} px",
            index + 1,
            self.path.display(),
            image.width(),
            image.height()
        );

        Ok(image)
    }
}
