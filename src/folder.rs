//! Work-set discovery and output folder handling
//!
//! Both tools share the same preamble: make sure the input folder exists,
//! wipe and recreate the output folder, then list the `.pdf` files that sit
//! directly inside the input folder.

use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use glob::{MatchOptions, Pattern};
use tracing::{debug, info, warn};

use crate::error::{Error, Result};

/// Fail unless `path` is an existing directory
pub fn ensure_input_folder(path: &Path) -> Result<()> {
    if path.is_dir() {
        Ok(())
    } else {
        Err(Error::InputFolderNotFound(path.to_path_buf()))
    }
}

/// Refuse an output folder that is the input folder or one of its ancestors.
///
/// An output folder that does not exist yet cannot overlap: every ancestor
/// of the (existing) input folder exists too.
pub fn ensure_no_overlap(input: &Path, output: &Path) -> Result<()> {
    if !output.exists() {
        return Ok(());
    }

    let input_abs = input.canonicalize()?;
    let output_abs = output.canonicalize()?;

    if input_abs.starts_with(&output_abs) {
        return Err(Error::OutputOverlapsInput {
            input: input.to_path_buf(),
            output: output.to_path_buf(),
        });
    }

    Ok(())
}

/// Delete `path` (recursively) if present, then create it empty
pub fn reset_output_folder(path: &Path) -> Result<()> {
    match fs::symlink_metadata(path) {
        Ok(meta) => {
            info!("Cleaning output folder: {}", path.display());
            if meta.is_dir() {
                fs::remove_dir_all(path)?;
            } else {
                fs::remove_file(path)?;
            }
        }
        Err(e) if e.kind() == io::ErrorKind::NotFound => {}
        Err(e) => return Err(e.into()),
    }

    fs::create_dir_all(path)?;
    Ok(())
}

/// Validate the input folder and reset the output folder.
///
/// Nothing on disk is touched when this returns an error from the input
/// checks.
pub fn prepare_run(input: &Path, output: &Path) -> Result<()> {
    ensure_input_folder(input)?;
    ensure_no_overlap(input, output)?;
    reset_output_folder(output)
}

/// Pattern every work-set file name must match, ignoring case
const PDF_PATTERN: &str = "*.pdf";

/// List regular files directly inside `folder` whose name ends in `.pdf`,
/// ignoring case.
///
/// Names that are not valid UTF-8 are matched on their lossy form, so they
/// are still picked up. The listing comes back in directory order, which
/// callers should treat as unspecified. Use [`sort_by_file_name`] when order
/// matters.
pub fn list_pdfs(folder: &Path) -> Result<Vec<PathBuf>> {
    let pattern = Pattern::new(PDF_PATTERN)?;
    let options = MatchOptions {
        case_sensitive: false,
        require_literal_separator: true,
        require_literal_leading_dot: false,
    };

    let mut paths = Vec::new();
    for entry in fs::read_dir(folder)? {
        let entry = match entry {
            Ok(entry) => entry,
            Err(e) => {
                warn!("Could not read entry in {}: {}", folder.display(), e);
                continue;
            }
        };

        let name = entry.file_name();
        let lossy = name.to_string_lossy();
        if !pattern.matches_with(&lossy, options) {
            continue;
        }
        if name.to_str().is_none() {
            debug!("File name is not valid UTF-8, matched as {}", lossy);
        }

        let path = entry.path();
        if path.is_file() {
            paths.push(path);
        } else {
            debug!("Skipping non-file entry: {}", path.display());
        }
    }

    Ok(paths)
}

/// Sort paths by file name, codepoint order
pub fn sort_by_file_name(paths: &mut [PathBuf]) {
    paths.sort_by(|a, b| a.file_name().cmp(&b.file_name()));
}

/// Name used for a document's output subfolder: the file name with its
/// final extension stripped
pub fn document_stem(path: &Path) -> String {
    path.file_stem()
        .map(|stem| stem.to_string_lossy().into_owned())
        .unwrap_or_else(|| "document".to_string())
}
