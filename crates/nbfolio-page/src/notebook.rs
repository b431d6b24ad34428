//! HTML for rendered notebook blocks.

use nbfolio_render::{CellKind, RenderBlock};

use crate::assets::data_uri;
use crate::html::escape;
use crate::markdown::{RawHtml, markdown_to_html};

/// Write the "Notebook Contents" listing for a block sequence.
///
/// Every cell is closed by a rule, and the first output of a code cell is
/// preceded by an "Output:" label.
pub fn notebook_html(blocks: &[RenderBlock], raw_html: RawHtml) -> String {
    let mut html = String::from("<h2>Notebook Contents</h2>\n");
    let mut in_cell = false;
    let mut awaiting_source = false;
    let mut outputs_labelled = false;

    for block in blocks {
        match block {
            RenderBlock::Heading { kind, .. } => {
                if in_cell {
                    html.push_str("<hr>\n");
                }
                in_cell = true;
                awaiting_source = *kind == CellKind::Code;
                outputs_labelled = false;
                let label = block.heading_label().unwrap_or_default();
                html.push_str(&format!("<h3>{}</h3>\n", escape(&label)));
            }
            RenderBlock::Markdown(text) => {
                html.push_str("<div class=\"cell-markdown\">\n");
                html.push_str(&markdown_to_html(text, raw_html));
                html.push_str("</div>\n");
            }
            RenderBlock::Code { text, language } => {
                if awaiting_source {
                    awaiting_source = false;
                } else {
                    label_outputs(&mut html, &mut outputs_labelled);
                }
                html.push_str(&format!(
                    "<pre><code class=\"language-{}\">{}</code></pre>\n",
                    language,
                    escape(text)
                ));
            }
            RenderBlock::PlainText(text) => {
                label_outputs(&mut html, &mut outputs_labelled);
                html.push_str(&format!("<pre class=\"output-text\">{}</pre>\n", escape(text)));
            }
            RenderBlock::Image { mime, bytes } => {
                label_outputs(&mut html, &mut outputs_labelled);
                html.push_str(&format!(
                    "<img class=\"output-image\" src=\"{}\" alt=\"cell output\">\n",
                    data_uri(mime, bytes)
                ));
            }
        }
    }

    if in_cell {
        html.push_str("<hr>\n");
    }
    html
}

fn label_outputs(html: &mut String, labelled: &mut bool) {
    if !*labelled {
        html.push_str("<p><strong>Output:</strong></p>\n");
        *labelled = true;
    }
}
