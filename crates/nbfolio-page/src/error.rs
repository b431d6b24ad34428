//! Error types for page generation.

use std::path::PathBuf;

/// Result type for page operations.
pub type PageResult<T> = Result<T, PageError>;

/// Errors that can occur while building or writing a page.
///
/// Notebook and asset problems are not errors here: they become notices in
/// the generated page.
#[derive(Debug, thiserror::Error)]
pub enum PageError {
    /// Failed to read an input file.
    #[error("Failed to read file {}: {message}", path.display())]
    ReadError { path: PathBuf, message: String },

    /// Failed to write the page.
    #[error("Failed to write file {}: {message}", path.display())]
    WriteError { path: PathBuf, message: String },

    /// The page configuration is not valid.
    #[error("Invalid page config {}: {source}", path.display())]
    ConfigError {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    /// Failed to serialize/deserialize JSON.
    #[error("JSON error: {0}")]
    JsonError(#[from] serde_json::Error),
}
