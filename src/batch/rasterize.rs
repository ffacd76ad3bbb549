//! Render every page of every PDF in a folder to JPEG

use std::fs;
use std::path::{Path, PathBuf};

use tracing::{debug, error, info, warn};

use crate::error::Result;
use crate::folder;
use crate::pdf::{encode_jpeg, PdfBackend, PdfiumBackend, RenderablePdf, DEFAULT_DPI, DEFAULT_JPEG_QUALITY};
use crate::report::{DocumentReport, Failure, RasterizeSummary};

/// Options for rasterizing a folder of PDFs
#[derive(Debug, Clone)]
pub struct RasterizeOptions {
    /// Folder whose `.pdf` files are rendered
    pub input_dir: PathBuf,
    /// Folder that receives one subfolder per PDF; wiped before each run
    pub output_dir: PathBuf,
    /// Rendering resolution in dots per inch
    pub dpi: u32,
    /// JPEG quality, 1-100
    pub jpeg_quality: u8,
}

impl RasterizeOptions {
    pub fn new(input_dir: impl Into<PathBuf>, output_dir: impl Into<PathBuf>) -> Self {
        Self {
            input_dir: input_dir.into(),
            output_dir: output_dir.into(),
            dpi: DEFAULT_DPI,
            jpeg_quality: DEFAULT_JPEG_QUALITY,
        }
    }

    pub fn with_dpi(mut self, dpi: u32) -> Self {
        self.dpi = dpi;
        self
    }
}

/// Rasterize all PDFs of `options.input_dir` with PDFium
///
/// PDFium is only bound once there is something to render.
pub fn rasterize_folder(options: &RasterizeOptions) -> Result<RasterizeSummary> {
    rasterize_folder_with(options, PdfiumBackend::bind)
}

/// Rasterize all PDFs of `options.input_dir` with the backend produced by
/// `connect`.
///
/// Each document is rendered in full before any page is written. Pages are
/// encoded to JPEG as soon as they are rendered, so only the compressed bytes
/// are held. If opening or rendering fails, the document's subfolder is
/// removed again and the failure is recorded. A page that fails to encode or
/// save is recorded on its own and the remaining pages are still written.
pub fn rasterize_folder_with<B, F>(options: &RasterizeOptions, connect: F) -> Result<RasterizeSummary>
where
    B: PdfBackend,
    F: FnOnce() -> Result<B>,
{
    folder::prepare_run(&options.input_dir, &options.output_dir)?;

    let pdf_files = folder::list_pdfs(&options.input_dir)?;
    let mut summary = RasterizeSummary::default();

    if pdf_files.is_empty() {
        info!("No PDF files found in the input folder.");
        return Ok(summary);
    }

    let backend = connect()?;

    for path in &pdf_files {
        let file_name = path.file_name().unwrap_or_default().to_string_lossy();
        info!("Processing '{}'...", file_name);

        let stem = folder::document_stem(path);
        let output_dir = options.output_dir.join(&stem);
        let created = !output_dir.exists();
        if !created {
            warn!(
                "Output folder {} already exists (inputs share the name '{}'); pages may mix",
                output_dir.display(),
                stem
            );
        }
        if let Err(e) = fs::create_dir_all(&output_dir) {
            error!("Could not create {}: {}", output_dir.display(), e);
            summary.failures.push(Failure::file(path, e));
            continue;
        }

        let pages = match render_document(&backend, path, options.dpi, options.jpeg_quality) {
            Ok(pages) => pages,
            Err(e) => {
                error!("Failed to convert '{}': {}", path.display(), e);
                summary.failures.push(Failure::file(path, e));
                if created {
                    if let Err(e) = fs::remove_dir_all(&output_dir) {
                        warn!("Could not remove {}: {}", output_dir.display(), e);
                    }
                }
                continue;
            }
        };

        let report = write_pages(path, pages, &output_dir, &mut summary.failures);
        summary.documents.push(report);
    }

    Ok(summary)
}

/// JPEG bytes of one page, or why it could not be encoded
type EncodedPage = Result<Vec<u8>>;

/// Render every page of `path` and encode each one right away.
///
/// A render failure fails the whole document; an encode failure only
/// affects its own page.
fn render_document<B: PdfBackend>(
    backend: &B,
    path: &Path,
    dpi: u32,
    quality: u8,
) -> Result<Vec<EncodedPage>> {
    let document = backend.open(path)?;
    let page_count = document.page_count();
    debug!("{}: {} pages at {} dpi", path.display(), page_count, dpi);

    let mut pages = Vec::with_capacity(page_count);
    for index in 0..page_count {
        let image = document.render_page(index, dpi)?;
        pages.push(encode_jpeg(&image, quality));
    }

    Ok(pages)
}

/// Write encoded pages as `page_<n>.jpg`, numbering from 1
fn write_pages(
    source: &Path,
    pages: Vec<EncodedPage>,
    output_dir: &Path,
    failures: &mut Vec<Failure>,
) -> DocumentReport {
    let page_count = pages.len();
    let mut pages_written = 0;

    for (index, encoded) in pages.into_iter().enumerate() {
        let page = index + 1;
        let target = output_dir.join(format!("page_{}.jpg", page));

        let saved = encoded.and_then(|bytes| fs::write(&target, bytes).map_err(Into::into));
        match saved {
            Ok(()) => {
                info!("Saved: {}", target.display());
                pages_written += 1;
            }
            Err(e) => {
                error!("Could not save page {} for '{}': {}", page, source.display(), e);
                failures.push(Failure::page(source, page, e));
            }
        }
    }

    DocumentReport {
        source: source.to_path_buf(),
        output_dir: output_dir.to_path_buf(),
        page_count,
        pages_written,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::Error;
    use crate::pdf::encode_jpeg;
    use image::{DynamicImage, RgbImage};
    use tempfile::TempDir;

    /// Reads the "PDF" as text: `pages=N`, or `pages=N fail=K` to fail
    /// rendering page K (1-based). Anything else fails to open.
    struct TextBackend;

    struct TextDocument {
        pages: usize,
        fail_at: Option<usize>,
    }

    impl PdfBackend for TextBackend {
        type Document<'a> = TextDocument;

        fn open(&self, path: &Path) -> Result<TextDocument> {
            let text = fs::read_to_string(path)?;
            let mut pages = None;
            let mut fail_at = None;
            for field in text.split_whitespace() {
                if let Some(n) = field.strip_prefix("pages=") {
                    pages = n.parse().ok();
                } else if let Some(n) = field.strip_prefix("fail=") {
                    fail_at = n.parse().ok();
                }
            }
            let pages = pages.ok_or_else(|| Error::Render {
                path: path.to_path_buf(),
                detail: "not a PDF".to_string(),
            })?;
            Ok(TextDocument { pages, fail_at })
        }
    }

    impl RenderablePdf for TextDocument {
        fn page_count(&self) -> usize {
            self.pages
        }

        /// Renders a `dpi` x 2 image, so the page width shows the DPI used
        fn render_page(&self, index: usize, dpi: u32) -> Result<DynamicImage> {
            if self.fail_at == Some(index + 1) {
                return Err(Error::Render {
                    path: PathBuf::from("text"),
                    detail: format!("page {} is broken", index + 1),
                });
            }
            Ok(DynamicImage::ImageRgb8(RgbImage::new(dpi, 2)))
        }
    }

    fn setup(files: &[(&str, &str)]) -> (TempDir, RasterizeOptions) {
        let dir = TempDir::new().unwrap();
        let input = dir.path().join("in");
        fs::create_dir(&input).unwrap();
        for (name, body) in files {
            fs::write(input.join(name), body).unwrap();
        }
        let options = RasterizeOptions::new(&input, dir.path().join("out"));
        (dir, options)
    }

    #[test]
    fn test_options_defaults() {
        let options = RasterizeOptions::new("in", "out");
        assert_eq!(options.dpi, 200);
        assert_eq!(options.jpeg_quality, 75);
        assert_eq!(options.with_dpi(300).dpi, 300);
    }

    #[test]
    fn test_one_jpeg_per_page() {
        let (_dir, options) = setup(&[("1_cover.pdf", "pages=1"), ("2_body.pdf", "pages=2")]);

        let summary = rasterize_folder_with(&options, || Ok(TextBackend)).unwrap();

        assert_eq!(summary.images_written(), 3);
        assert!(options.output_dir.join("1_cover/page_1.jpg").is_file());
        assert!(options.output_dir.join("2_body/page_1.jpg").is_file());
        assert!(options.output_dir.join("2_body/page_2.jpg").is_file());
        assert!(!options.output_dir.join("2_body/page_3.jpg").exists());
    }

    #[test]
    fn test_render_failure_leaves_no_partial_output() {
        let (_dir, options) = setup(&[("broken.pdf", "pages=3 fail=2"), ("fine.pdf", "pages=1")]);

        let summary = rasterize_folder_with(&options, || Ok(TextBackend)).unwrap();

        assert!(!options.output_dir.join("broken").exists());
        assert!(options.output_dir.join("fine/page_1.jpg").is_file());
        assert_eq!(summary.failures.len(), 1);
        assert!(summary.failures[0].path.ends_with("broken.pdf"));
        assert_eq!(summary.failures[0].page, None);
    }

    #[test]
    fn test_unreadable_document_is_skipped() {
        let (_dir, options) = setup(&[("garbage.pdf", "%%%"), ("ok.pdf", "pages=2")]);

        let summary = rasterize_folder_with(&options, || Ok(TextBackend)).unwrap();

        assert_eq!(summary.documents.len(), 1);
        assert_eq!(summary.failures.len(), 1);
        assert!(!options.output_dir.join("garbage").exists());
    }

    #[test]
    fn test_page_save_failure_keeps_other_pages() {
        let dir = TempDir::new().unwrap();
        let out = dir.path().join("doc");
        // A folder squatting on the target name makes that one save fail
        fs::create_dir_all(out.join("page_2.jpg")).unwrap();

        let blank = DynamicImage::ImageRgb8(RgbImage::new(4, 4));
        let pages = vec![
            encode_jpeg(&blank, 75),
            encode_jpeg(&blank, 75),
            encode_jpeg(&blank, 75),
        ];
        let mut failures = Vec::new();

        let report = write_pages(Path::new("in/doc.pdf"), pages, &out, &mut failures);

        assert_eq!(report.page_count, 3);
        assert_eq!(report.pages_written, 2);
        assert_eq!(failures.len(), 1);
        assert_eq!(failures[0].page, Some(2));
        assert!(out.join("page_1.jpg").is_file());
        assert!(out.join("page_3.jpg").is_file());
    }

    #[test]
    fn test_encode_failure_is_recorded_per_page() {
        let dir = TempDir::new().unwrap();
        let out = dir.path().join("doc");
        fs::create_dir_all(&out).unwrap();

        let blank = DynamicImage::ImageRgb8(RgbImage::new(4, 4));
        let pages = vec![
            encode_jpeg(&blank, 75),
            Err(Error::Render {
                path: PathBuf::from("in/doc.pdf"),
                detail: "cannot encode".to_string(),
            }),
        ];
        let mut failures = Vec::new();

        let report = write_pages(Path::new("in/doc.pdf"), pages, &out, &mut failures);

        assert_eq!(report.pages_written, 1);
        assert_eq!(failures[0].page, Some(2));
        assert!(!out.join("page_2.jpg").exists());
    }

    #[test]
    fn test_pages_rendered_at_default_dpi() {
        let (_dir, options) = setup(&[("doc.pdf", "pages=1")]);

        rasterize_folder_with(&options, || Ok(TextBackend)).unwrap();

        let (width, _) = image::image_dimensions(options.output_dir.join("doc/page_1.jpg")).unwrap();
        assert_eq!(width, DEFAULT_DPI);
        assert_eq!(width, 200);
    }

    #[test]
    fn test_pages_rendered_at_requested_dpi() {
        let (_dir, options) = setup(&[("doc.pdf", "pages=2")]);
        let options = options.with_dpi(300);

        rasterize_folder_with(&options, || Ok(TextBackend)).unwrap();

        for page in ["doc/page_1.jpg", "doc/page_2.jpg"] {
            let (width, _) = image::image_dimensions(options.output_dir.join(page)).unwrap();
            assert_eq!(width, 300);
        }
    }

    #[cfg(target_os = "linux")]
    #[test]
    fn test_inputs_sharing_a_stem_share_a_folder() {
        let (_dir, options) = setup(&[("a.pdf", "pages=2"), ("a.PDF", "pages=1 fail=1")]);

        let summary = rasterize_folder_with(&options, || Ok(TextBackend)).unwrap();

        // Either visiting order leaves the good document's pages in place
        assert_eq!(summary.documents.len(), 1);
        assert_eq!(summary.failures.len(), 1);
        assert_eq!(summary.documents[0].output_dir, options.output_dir.join("a"));
        assert!(options.output_dir.join("a/page_1.jpg").is_file());
        assert!(options.output_dir.join("a/page_2.jpg").is_file());
    }

    #[test]
    fn test_empty_folder_never_binds_backend() {
        let (_dir, options) = setup(&[("notes.txt", "pages=1")]);

        let summary = rasterize_folder_with(&options, || -> Result<TextBackend> {
            panic!("backend should not be bound for an empty work set")
        })
        .unwrap();

        assert!(summary.is_empty());
        assert!(options.output_dir.is_dir());
    }

    #[test]
    fn test_backend_failure_is_fatal() {
        let (_dir, options) = setup(&[("a.pdf", "pages=1")]);

        let result = rasterize_folder_with(&options, || -> Result<TextBackend> {
            Err(Error::Backend("missing library".to_string()))
        });

        assert!(matches!(result, Err(Error::Backend(_))));
    }
}
