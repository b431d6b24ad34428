//! Standalone HTML page generation.

use std::path::Path;

use nbfolio_render::NotebookRenderer;

use crate::assets::{download_link, figure};
use crate::config::{PageConfig, Section, SectionKind};
use crate::markdown::{RawHtml, markdown_to_html};
use crate::notebook::notebook_html;

const STYLE: &str = r#"
body { font-family: system-ui, -apple-system, "Segoe UI", sans-serif; margin: 0; color: #262730; }
main { max-width: 1100px; margin: 0 auto; padding: 24px; }
.main-header { font-size: 42px; font-weight: bold; margin-bottom: 20px; }
.sub-header { font-size: 28px; font-weight: bold; margin-top: 30px; margin-bottom: 15px; }
.section { padding: 20px 0; }
.highlight { background-color: #f0f2f6; padding: 20px; border-radius: 10px; margin: 20px 0; }
.notice { padding: 12px 16px; border-radius: 6px; margin: 12px 0; }
.notice.error { background-color: #ffebee; color: #b71c1c; }
.notice.info { background-color: #e3f2fd; color: #0d47a1; }
.columns { display: flex; gap: 24px; }
.columns .column { flex: 1; }
figure { margin: 0; }
figure img, img.output-image { max-width: 100%; }
figcaption { color: #6c757d; font-size: 14px; text-align: center; }
pre { background-color: #f6f8fa; padding: 12px; border-radius: 6px; overflow-x: auto; }
.tabs > input { display: none; }
.tabs > label { display: inline-block; padding: 8px 16px; cursor: pointer; border-bottom: 2px solid transparent; }
.tabs > input:checked + label { border-bottom-color: #ff4b4b; font-weight: bold; }
.tabs > .tab-panel { display: none; padding-top: 12px; }
"#;

/// Escape text for HTML content and attribute values.
pub fn escape(s: &str) -> String {
    s.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('"', "&quot;")
}

fn notice(html: &mut String, class: &str, message: &str) {
    html.push_str(&format!(
        "<div class=\"notice {}\">{}</div>\n",
        class,
        escape(message)
    ));
}

fn file_name(path: &Path) -> String {
    path.file_name()
        .unwrap_or_default()
        .to_string_lossy()
        .to_string()
}

/// Generate the whole page for a config.
///
/// Missing or broken assets never fail generation; they show up as notices.
pub fn generate_html(config: &PageConfig) -> String {
    let title = match &config.icon {
        Some(icon) => format!("{} {}", icon, config.title),
        None => config.title.clone(),
    };

    let mut html = String::new();
    html.push_str("<!DOCTYPE html>\n<html lang=\"en\">\n<head>\n<meta charset=\"utf-8\">\n");
    html.push_str("<meta name=\"viewport\" content=\"width=device-width, initial-scale=1\">\n");
    html.push_str(&format!("<title>{}</title>\n", escape(&title)));
    html.push_str(&format!("<style>{}{}</style>\n", STYLE, tab_style(config)));
    html.push_str("</head>\n<body>\n<main>\n");

    html.push_str(&format!(
        "<div class=\"main-header\">{}</div>\n",
        escape(&config.header)
    ));
    html.push_str(&markdown_to_html(&config.intro, RawHtml::PassThrough));

    for (index, section) in config.sections.iter().enumerate() {
        push_section(&mut html, config, index, section);
    }

    html.push_str("</main>\n</body>\n</html>\n");
    html
}

/// Per-section rules showing the checked tab's panel.
fn tab_style(config: &PageConfig) -> String {
    config
        .sections
        .iter()
        .enumerate()
        .filter(|(_, section)| matches!(section.kind, SectionKind::Notebook { .. }))
        .map(|(index, _)| {
            format!(
                "#tab-overview-{i}:checked ~ #panel-overview-{i}, #tab-content-{i}:checked ~ #panel-content-{i} {{ display: block; }}\n",
                i = index
            )
        })
        .collect()
}

fn push_section(html: &mut String, config: &PageConfig, index: usize, section: &Section) {
    html.push_str("<section class=\"section\">\n");
    html.push_str(&format!(
        "<div class=\"sub-header\">{}</div>\n",
        escape(&section.title)
    ));

    let body = markdown_to_html(&section.body, RawHtml::PassThrough);
    match &section.kind {
        SectionKind::Prose { highlight: true } => {
            html.push_str("<div class=\"highlight\">\n");
            html.push_str(&body);
            html.push_str("</div>\n");
        }
        SectionKind::Prose { highlight: false } => html.push_str(&body),
        SectionKind::Screenshot { path, caption } => {
            html.push_str(&body);
            push_screenshot(html, &config.resolve(path), caption);
        }
        SectionKind::Notebook { path, overview } => {
            html.push_str(&body);
            push_notebook(html, config, index, &config.resolve(path), overview);
        }
        SectionKind::Columns { left, right } => {
            html.push_str(&body);
            html.push_str("<div class=\"columns\">\n<div class=\"column\">\n");
            html.push_str(&markdown_to_html(left, RawHtml::PassThrough));
            html.push_str("</div>\n<div class=\"column\">\n");
            html.push_str(&markdown_to_html(right, RawHtml::PassThrough));
            html.push_str("</div>\n</div>\n");
        }
    }

    html.push_str("</section>\n");
}

fn push_screenshot(html: &mut String, path: &Path, caption: &str) {
    if !path.exists() {
        tracing::warn!("Screenshot not found: {}", path.display());
        notice(
            html,
            "error",
            &format!(
                "{} file not found. Please make sure it's in the same directory as the page configuration",
                file_name(path)
            ),
        );
        return;
    }

    match figure(path, caption) {
        Ok(figure) => {
            html.push_str(&figure);
            html.push('\n');
        }
        Err(e) => {
            tracing::warn!("{}", e);
            notice(html, "error", &format!("Error loading screenshot: {}", e));
        }
    }
}

fn push_notebook(html: &mut String, config: &PageConfig, index: usize, path: &Path, overview: &str) {
    if !path.exists() {
        tracing::warn!("Notebook not found: {}", path.display());
        notice(
            html,
            "error",
            &format!(
                "{} not found. Please make sure it's in the same directory as the page configuration",
                file_name(path)
            ),
        );
        return;
    }

    match download_link(path) {
        Ok(link) => html.push_str(&format!("<p>{}</p>\n", link)),
        Err(e) => notice(html, "error", &format!("Error generating download link: {}", e)),
    }

    html.push_str("<div class=\"tabs\">\n");
    html.push_str(&format!(
        "<input type=\"radio\" name=\"notebook-tabs-{i}\" id=\"tab-overview-{i}\" checked>\
         <label for=\"tab-overview-{i}\">Notebook Overview</label>\n\
         <input type=\"radio\" name=\"notebook-tabs-{i}\" id=\"tab-content-{i}\">\
         <label for=\"tab-content-{i}\">Full Notebook Content</label>\n",
        i = index
    ));

    html.push_str(&format!(
        "<div class=\"tab-panel\" id=\"panel-overview-{}\">\n",
        index
    ));
    html.push_str(&markdown_to_html(overview, RawHtml::PassThrough));
    html.push_str("</div>\n");

    html.push_str(&format!(
        "<div class=\"tab-panel\" id=\"panel-content-{}\">\n",
        index
    ));
    push_notebook_content(html, config, path);
    html.push_str("</div>\n</div>\n");
}

fn push_notebook_content(html: &mut String, config: &PageConfig, path: &Path) {
    let raw_html = if config.escape_raw_html {
        RawHtml::Escape
    } else {
        RawHtml::PassThrough
    };

    match NotebookRenderer::new().render_file(path) {
        Ok(blocks) => html.push_str(&notebook_html(&blocks, raw_html)),
        Err(e) => {
            tracing::warn!("Failed to render {}: {}", path.display(), e);
            notice(html, "error", &format!("Error loading notebook: {}", e));
            notice(html, "info", e.hint());
        }
    }
}
