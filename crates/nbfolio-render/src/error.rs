//! Error types for the notebook renderer.

use std::path::PathBuf;

/// Result type for render operations.
pub type RenderResult<T> = Result<T, RenderError>;

/// Errors that can occur while rendering a notebook.
///
/// Every variant is fatal to the render call that produced it; no partial
/// block sequence is ever returned alongside one.
#[derive(Debug, thiserror::Error)]
pub enum RenderError {
    /// The notebook file does not exist.
    #[error("Notebook not found: {}", path.display())]
    NotFound { path: PathBuf },

    /// Failed to read the notebook file.
    #[error("Failed to read file {}: {message}", path.display())]
    ReadError { path: PathBuf, message: String },

    /// The document is not UTF-8.
    #[error("Notebook is not valid UTF-8: {0}")]
    Encoding(#[from] std::str::Utf8Error),

    /// The document is not well-formed JSON.
    #[error("JSON error: {0}")]
    JsonError(#[from] serde_json::Error),

    /// The JSON does not have the shape of a notebook.
    #[error("Invalid notebook: {0}")]
    InvalidNotebook(String),

    /// An `image/png` payload is not valid base64.
    #[error("Malformed image/png payload in cell {cell}: {source}")]
    Image {
        cell: usize,
        #[source]
        source: base64::DecodeError,
    },
}

/// Coarse classification of a [`RenderError`].
///
/// Hosts display both kinds the same way; the split only tells them whether
/// the input was missing or present but unusable.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    /// The input exists but could not be decoded as a notebook.
    Parse,
    /// The input could not be found.
    MissingResource,
}

impl RenderError {
    /// Classify this error.
    pub fn kind(&self) -> ErrorKind {
        match self {
            Self::NotFound { .. } => ErrorKind::MissingResource,
            _ => ErrorKind::Parse,
        }
    }

    /// Recovery hint for the person viewing the error.
    pub fn hint(&self) -> &'static str {
        match self.kind() {
            ErrorKind::MissingResource => {
                "Please make sure the notebook file is in the same directory as the page configuration."
            }
            ErrorKind::Parse => "Please make sure the file is a valid Jupyter notebook (.ipynb).",
        }
    }

    /// Human-readable message with the recovery hint appended.
    pub fn with_hint(&self) -> String {
        format!("{}\n  hint: {}", self, self.hint())
    }
}
