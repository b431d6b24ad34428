//! Projection of notebook cells into display blocks.
//!
//! The [`NotebookRenderer`] turns a notebook into a flat, ordered sequence of
//! [`RenderBlock`]s. Presentation hosts decide how each block kind looks.

use std::io::Read;
use std::path::Path;

use crate::error::RenderResult;
use crate::ipynb::{Cell, JupyterNotebook};
use crate::outputs::{CellOutput, MIME_IMAGE_PNG};

/// Language every code block is labelled with, whatever the notebook's kernel.
pub const CODE_LANGUAGE: &str = "python";

/// Which kind of cell a heading introduces.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CellKind {
    Markdown,
    Code,
}

/// One unit of rendered output.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RenderBlock {
    /// Label opening a cell, e.g. "Code Cell 3".
    Heading { position: usize, kind: CellKind },

    /// Markdown source, trusted and rendered as-is.
    Markdown(String),

    /// Source code or a `text/plain` representation.
    Code {
        text: String,
        language: &'static str,
    },

    /// Stream text or an error traceback.
    PlainText(String),

    /// Decoded image bytes.
    Image {
        mime: &'static str,
        bytes: Vec<u8>,
    },
}

impl RenderBlock {
    /// Display label of a heading block; `None` for other blocks.
    pub fn heading_label(&self) -> Option<String> {
        match self {
            Self::Heading { position, kind } => Some(match kind {
                CellKind::Markdown => format!("Markdown Cell {}", position),
                CellKind::Code => format!("Code Cell {}", position),
            }),
            _ => None,
        }
    }
}

/// Renderer from notebooks to [`RenderBlock`] sequences.
///
/// Stateless: every call is a pure function of its input bytes.
#[derive(Debug, Clone, Copy, Default)]
pub struct NotebookRenderer;

impl NotebookRenderer {
    /// Create a new renderer.
    pub fn new() -> Self {
        Self
    }

    /// Render the notebook at `path`.
    pub fn render_file(&self, path: impl AsRef<Path>) -> RenderResult<Vec<RenderBlock>> {
        let path = path.as_ref();
        let notebook = JupyterNotebook::read_from_file(path)?;
        let blocks = self.render_notebook(&notebook)?;
        tracing::debug!(
            "Rendered {} ({} cells → {} blocks)",
            path.display(),
            notebook.cells.len(),
            blocks.len()
        );
        Ok(blocks)
    }

    /// Render a notebook held in memory.
    pub fn render_bytes(&self, bytes: &[u8]) -> RenderResult<Vec<RenderBlock>> {
        self.render_notebook(&JupyterNotebook::from_slice(bytes)?)
    }

    /// Render a notebook from a JSON string.
    pub fn render_str(&self, text: &str) -> RenderResult<Vec<RenderBlock>> {
        self.render_notebook(&JupyterNotebook::parse_str(text)?)
    }

    /// Render a notebook read to the end from `reader`.
    pub fn render_reader(&self, reader: impl Read) -> RenderResult<Vec<RenderBlock>> {
        self.render_notebook(&JupyterNotebook::from_reader(reader)?)
    }

    /// Render an already parsed notebook.
    pub fn render_notebook(&self, notebook: &JupyterNotebook) -> RenderResult<Vec<RenderBlock>> {
        if let Some(language) = notebook.declared_language()
            && !language.eq_ignore_ascii_case(CODE_LANGUAGE)
        {
            tracing::debug!(
                "Notebook declares {} kernel; code blocks are labelled {}",
                language,
                CODE_LANGUAGE
            );
        }

        let cells = notebook.resolve_cells()?;
        let mut blocks = Vec::new();
        for (index, cell) in cells.into_iter().enumerate() {
            push_cell(&mut blocks, index + 1, cell);
        }
        Ok(blocks)
    }
}

fn push_cell(blocks: &mut Vec<RenderBlock>, position: usize, cell: Cell) {
    match cell {
        Cell::Markdown { source } => {
            blocks.push(RenderBlock::Heading {
                position,
                kind: CellKind::Markdown,
            });
            blocks.push(RenderBlock::Markdown(source));
        }
        Cell::Code { source, outputs } => {
            blocks.push(RenderBlock::Heading {
                position,
                kind: CellKind::Code,
            });
            blocks.push(RenderBlock::Code {
                text: source,
                language: CODE_LANGUAGE,
            });
            for output in outputs {
                push_output(blocks, output);
            }
        }
        Cell::Other { cell_type } => {
            tracing::trace!("Skipping {} cell {}", cell_type, position);
        }
    }
}

fn push_output(blocks: &mut Vec<RenderBlock>, output: CellOutput) {
    match output {
        CellOutput::Error { traceback } => blocks.push(RenderBlock::PlainText(traceback)),
        CellOutput::Text { text } => blocks.push(RenderBlock::PlainText(text)),
        CellOutput::Data {
            text_plain,
            image_png,
        } => {
            if let Some(text) = text_plain {
                blocks.push(RenderBlock::Code {
                    text,
                    language: CODE_LANGUAGE,
                });
            }
            if let Some(bytes) = image_png {
                blocks.push(RenderBlock::Image {
                    mime: MIME_IMAGE_PNG,
                    bytes,
                });
            }
        }
        CellOutput::Unrecognized => {}
    }
}
