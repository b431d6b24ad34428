//! Embedding of static files into the page.
//!
//! The generated page is a single standalone HTML file, so images and the
//! downloadable notebook are inlined as base64 `data:` URIs.

use std::fs;
use std::path::Path;

use base64::Engine;

use crate::error::{PageError, PageResult};
use crate::html::escape;

/// Build a `data:` URI for a payload.
pub fn data_uri(mime: &str, bytes: &[u8]) -> String {
    let encoded = base64::engine::general_purpose::STANDARD.encode(bytes);
    format!("data:{};base64,{}", mime, encoded)
}

/// Guess an image MIME type from the file extension.
pub fn image_mime(path: &Path) -> &'static str {
    let ext = path
        .extension()
        .and_then(|e| e.to_str())
        .map(str::to_ascii_lowercase);
    match ext.as_deref() {
        Some("png") => "image/png",
        Some("jpg" | "jpeg") => "image/jpeg",
        Some("gif") => "image/gif",
        Some("svg") => "image/svg+xml",
        Some("webp") => "image/webp",
        _ => "application/octet-stream",
    }
}

fn read(path: &Path) -> PageResult<Vec<u8>> {
    fs::read(path).map_err(|e| PageError::ReadError {
        path: path.to_path_buf(),
        message: e.to_string(),
    })
}

/// Build a download anchor carrying the file's bytes unchanged.
pub fn download_link(path: impl AsRef<Path>) -> PageResult<String> {
    let path = path.as_ref();
    let bytes = read(path)?;
    let filename = path
        .file_name()
        .unwrap_or_default()
        .to_string_lossy()
        .to_string();
    Ok(format!(
        "<a class=\"download\" href=\"{}\" download=\"{}\">Download {}</a>",
        data_uri("application/octet-stream", &bytes),
        escape(&filename),
        escape(&filename)
    ))
}

/// Build a captioned `<figure>` for an image file.
pub fn figure(path: impl AsRef<Path>, caption: &str) -> PageResult<String> {
    let path = path.as_ref();
    let bytes = read(path)?;
    Ok(format!(
        "<figure><img src=\"{}\" alt=\"{}\"><figcaption>{}</figcaption></figure>",
        data_uri(image_mime(path), &bytes),
        escape(caption),
        escape(caption)
    ))
}
