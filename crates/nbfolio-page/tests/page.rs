//! Integration tests for page generation.
//!
//! Builds pages from a config file next to real assets and checks the
//! generated HTML.

use std::fs;
use std::path::PathBuf;

use nbfolio_page::{PageConfig, export_page, generate_html};
use tempfile::TempDir;

// =============================================================================
// Test Helpers
// =============================================================================

/// A page directory holding a config, a notebook and a screenshot.
struct TestPage {
    temp_dir: TempDir,
}

impl TestPage {
    fn new(notebook: &str) -> Self {
        let temp_dir = TempDir::new().expect("Failed to create temp directory");
        fs::write(temp_dir.path().join("Gemma3_Hugging_Face.ipynb"), notebook)
            .expect("Failed to write notebook");
        fs::write(temp_dir.path().join("Gradio.png"), [0x89, b'P', b'N', b'G'])
            .expect("Failed to write screenshot");

        let config = PageConfig::default().to_json().expect("Failed to serialize config");
        fs::write(temp_dir.path().join("page.json"), config).expect("Failed to write config");

        Self { temp_dir }
    }

    fn config_path(&self) -> PathBuf {
        self.temp_dir.path().join("page.json")
    }

    fn config(&self) -> PageConfig {
        PageConfig::load(self.config_path()).expect("Failed to load config")
    }
}

fn sample_notebook() -> &'static str {
    r##"{
  "metadata": {"kernelspec": {"language": "python", "name": "python3"}},
  "nbformat": 4,
  "nbformat_minor": 5,
  "cells": [
    {"cell_type": "markdown", "metadata": {}, "source": ["# Loading Gemma\n", "<span class=\"note\">GPU</span>"]},
    {"cell_type": "code", "execution_count": 1, "metadata": {}, "source": ["print(\"ready\")"],
     "outputs": [{"output_type": "stream", "name": "stdout", "text": ["ready\n"]}]},
    {"cell_type": "code", "execution_count": 2, "metadata": {}, "source": ["plot()"],
     "outputs": [{"output_type": "display_data", "metadata": {},
                  "data": {"text/plain": ["<Figure size 640x480>"], "image/png": "iVBORw0KGgo=\n"}}]}
  ]
}"##
}

// =============================================================================
// Page Content
// =============================================================================

#[test]
fn test_full_page() {
    let page = TestPage::new(sample_notebook());
    let html = generate_html(&page.config());

    // Screenshot embedded as data URI
    assert!(html.contains("<img src=\"data:image/png;base64,iVBORw==\""));
    assert!(html.contains("<figcaption>Gemma Model Gradio Interface</figcaption>"));

    // Download link and tabs
    assert!(html.contains("download=\"Gemma3_Hugging_Face.ipynb\">Download Gemma3_Hugging_Face.ipynb</a>"));
    assert!(html.contains("Notebook Overview</label>"));
    assert!(html.contains("Full Notebook Content</label>"));

    // Rendered cells
    assert!(html.contains("<h2>Notebook Contents</h2>"));
    assert!(html.contains("<h3>Markdown Cell 1</h3>"));
    assert!(html.contains("<h1>Loading Gemma</h1>"));
    assert!(html.contains("<span class=\"note\">GPU</span>"));
    assert!(html.contains("<h3>Code Cell 2</h3>"));
    assert!(html.contains("print(&quot;ready&quot;)"));
    assert!(html.contains("<pre class=\"output-text\">ready\n</pre>"));
    assert!(html.contains("&lt;Figure size 640x480&gt;"));
    assert!(html.contains("src=\"data:image/png;base64,iVBORw0KGgo=\""));
    assert_eq!(html.matches("<strong>Output:</strong>").count(), 2);

    // Sections after the notebook still render
    assert!(html.contains("Future Improvements &amp; Full Deployment Plan"));
    assert!(html.contains("https://github.com/roboticslover"));
}

#[test]
fn test_download_link_carries_exact_bytes() {
    use base64::Engine;

    let page = TestPage::new(sample_notebook());
    let html = generate_html(&page.config());
    let encoded = base64::engine::general_purpose::STANDARD.encode(sample_notebook());
    assert!(html.contains(&format!(
        "href=\"data:application/octet-stream;base64,{}\"",
        encoded
    )));
}

#[test]
fn test_escape_raw_html_in_notebook() {
    let page = TestPage::new(sample_notebook());
    let config = PageConfig {
        escape_raw_html: true,
        ..page.config()
    };
    let html = generate_html(&config);
    assert!(!html.contains("<span class=\"note\">"));
    assert!(html.contains("&lt;span class="));
    assert!(html.contains("GPU&lt;/span&gt;"));
}

#[test]
fn test_malformed_notebook_shows_notice() {
    let page = TestPage::new("{\"cells\": [");
    let html = generate_html(&page.config());

    assert!(html.contains("Error loading notebook: JSON error"));
    assert!(html.contains("valid Jupyter notebook"));
    assert!(!html.contains("<h2>Notebook Contents</h2>"));
    // Download link is still offered for the raw file
    assert!(html.contains("Download Gemma3_Hugging_Face.ipynb"));
}

#[test]
fn test_malformed_image_aborts_notebook_only() {
    let notebook = r#"{"cells": [
        {"cell_type": "markdown", "source": ["before"]},
        {"cell_type": "code", "source": [], "outputs": [{"data": {"image/png": "@@@"}}]}
    ]}"#;
    let page = TestPage::new(notebook);
    let html = generate_html(&page.config());

    assert!(html.contains("Error loading notebook: Malformed image/png payload in cell 2"));
    assert!(!html.contains("<h3>Markdown Cell 1</h3>"));
    assert!(html.contains("Deployment Challenges"));
}

#[test]
fn test_output_label_only_for_displayed_outputs() {
    let notebook = r#"{"cells": [
        {"cell_type": "code", "source": ["clear()"], "outputs": [{"output_type": "clear_output"}]},
        {"cell_type": "code", "source": ["show()"],
         "outputs": [{"output_type": "clear_output"}, {"output_type": "stream", "text": ["shown"]}]}
    ]}"#;
    let page = TestPage::new(notebook);
    let html = generate_html(&page.config());

    assert_eq!(html.matches("<strong>Output:</strong>").count(), 1);
    let label = html.find("<strong>Output:</strong>").unwrap();
    assert!(html.find("<h3>Code Cell 2</h3>").unwrap() < label);
}

#[test]
fn test_export_from_loaded_config() {
    let page = TestPage::new(sample_notebook());
    let output = page.temp_dir.path().join("index.html");

    export_page(&page.config(), &output).unwrap();
    let html = fs::read_to_string(&output).unwrap();
    assert_eq!(html, generate_html(&page.config()));
}
