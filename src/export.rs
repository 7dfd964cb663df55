//! Writing the document out as a file.

use std::fs;
use std::io;
use std::path::{Path, PathBuf};
use std::time::Duration;

use crate::document::render_html;

pub const EXPORT_FILE_NAME: &str = "document.md";
pub const EXPORT_MIME: &str = "text/markdown";
pub const HTML_EXPORT_FILE_NAME: &str = "document.html";
pub const HTML_EXPORT_MIME: &str = "text/html";

/// How long the status bar shows "Saved" after an export.
pub const SAVED_INDICATOR_DURATION: Duration = Duration::from_secs(2);

#[derive(Debug, thiserror::Error)]
pub enum ExportError {
    #[error("failed to create export directory {path}: {source}")]
    CreateDir {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
    #[error("failed to write {path}: {source}")]
    Write {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
}

/// Write the raw document to `dir/document.md`, byte for byte.
///
/// # Errors
///
/// Returns [`ExportError`] if the directory or file cannot be written.
pub fn export_markdown(dir: &Path, text: &str) -> Result<PathBuf, ExportError> {
    write_export(dir, EXPORT_FILE_NAME, EXPORT_MIME, text)
}

/// Write the rendered document to `dir/document.html` as a standalone page.
///
/// # Errors
///
/// Returns [`ExportError`] if the directory or file cannot be written.
pub fn export_html(dir: &Path, text: &str) -> Result<PathBuf, ExportError> {
    write_export(dir, HTML_EXPORT_FILE_NAME, HTML_EXPORT_MIME, &html_page(text))
}

/// Wrap the rendered body in a minimal HTML page.
pub fn html_page(text: &str) -> String {
    let body = render_html(text);
    format!(
        "<!DOCTYPE html>\n<html>\n<head>\n<meta charset=\"utf-8\">\n<title>document</title>\n</head>\n<body>\n{body}</body>\n</html>\n"
    )
}

fn write_export(
    dir: &Path,
    file_name: &str,
    mime: &str,
    contents: &str,
) -> Result<PathBuf, ExportError> {
    if !dir.as_os_str().is_empty() {
        fs::create_dir_all(dir).map_err(|source| ExportError::CreateDir {
            path: dir.to_path_buf(),
            source,
        })?;
    }
    let path = dir.join(file_name);
    fs::write(&path, contents).map_err(|source| ExportError::Write {
        path: path.clone(),
        source,
    })?;
    tracing::debug!(path = %path.display(), mime, bytes = contents.len(), "exported");
    Ok(path)
}
