//! Portfolio page generation for nbfolio.
//!
//! Turns a [`PageConfig`] into one standalone HTML file: prose sections, an
//! embedded screenshot, a download link for the notebook and the notebook
//! itself rendered through [`nbfolio_render`].
//!
//! Notebook markdown is treated as trusted and its raw HTML is emitted
//! unchanged unless [`PageConfig::escape_raw_html`] is set.

mod assets;
mod config;
mod error;
mod html;
mod markdown;
mod notebook;

pub use assets::{data_uri, download_link, figure, image_mime};
pub use config::{PageConfig, Section, SectionKind};
pub use error::{PageError, PageResult};
pub use html::{escape, generate_html};
pub use markdown::{RawHtml, markdown_to_html};
pub use notebook::notebook_html;

use std::fs;
use std::path::Path;

/// Generate the page for `config` and write it to `output_path`.
pub fn export_page(config: &PageConfig, output_path: impl AsRef<Path>) -> PageResult<()> {
    let output_path = output_path.as_ref();
    let html = generate_html(config);

    fs::write(output_path, &html).map_err(|e| PageError::WriteError {
        path: output_path.to_path_buf(),
        message: e.to_string(),
    })?;

    tracing::info!(
        "Exported {} ({} sections, {} bytes)",
        output_path.display(),
        config.sections.len(),
        html.len()
    );

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_export_page_writes_file() {
        let temp = tempfile::TempDir::new().unwrap();
        let output = temp.path().join("index.html");
        let config = PageConfig {
            base_dir: temp.path().to_path_buf(),
            ..PageConfig::default()
        };

        export_page(&config, &output).unwrap();
        let html = fs::read_to_string(&output).unwrap();
        assert!(html.contains("Project Overview"));
    }

    #[test]
    fn test_export_page_unwritable_path() {
        let temp = tempfile::TempDir::new().unwrap();
        let output = temp.path().join("missing-dir").join("index.html");

        let err = export_page(&PageConfig::default(), &output).unwrap_err();
        assert!(matches!(err, PageError::WriteError { .. }));
    }
}
