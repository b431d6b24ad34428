//! Notebook renderer for nbfolio.
//!
//! Reads a Jupyter notebook and projects its cells into an ordered sequence
//! of display blocks.
//!
//! # Architecture
//!
//! ```text
//! notebook.ipynb ─────► JupyterNotebook ─────► Cell + CellOutput ─────► Vec<RenderBlock>
//!                        (lenient serde)      (classified, images          │
//!                                               decoded eagerly)            ▼
//!                                                                   presentation host
//! ```
//!
//! Rendering is all-or-nothing: a malformed document or image payload fails
//! the whole call and no blocks are returned.

mod error;
mod ipynb;
mod outputs;
mod render;

pub use error::{ErrorKind, RenderError, RenderResult};
pub use ipynb::{Cell, JupyterCell, JupyterNotebook, MultilineText};
pub use outputs::{CellOutput, MIME_IMAGE_PNG, MIME_TEXT_PLAIN};
pub use render::{CODE_LANGUAGE, CellKind, NotebookRenderer, RenderBlock};

use std::path::Path;

/// Render the notebook at `path` into display blocks.
pub fn render(path: impl AsRef<Path>) -> RenderResult<Vec<RenderBlock>> {
    NotebookRenderer::new().render_file(path)
}
