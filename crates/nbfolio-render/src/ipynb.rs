//! Jupyter notebook (.ipynb) reading.
//!
//! Deserializes the nbformat 4 layout leniently: only the keys the renderer
//! needs are modelled, everything else is ignored, and missing or mistyped
//! keys the renderer does not depend on fall back to empty values.

use std::fs;
use std::io::{self, Read};
use std::path::Path;

use serde::de::DeserializeOwned;
use serde::{Deserialize, Deserializer};
use serde_json::Value;

use crate::error::{RenderError, RenderResult};
use crate::outputs::CellOutput;

/// A Jupyter notebook as read from disk.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct JupyterNotebook {
    /// Notebook metadata
    #[serde(default, deserialize_with = "lenient")]
    pub metadata: JupyterMetadata,

    /// Notebook cells, in display order
    #[serde(default)]
    pub cells: Vec<JupyterCell>,
}

/// The parts of notebook metadata the renderer looks at.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct JupyterMetadata {
    /// Kernel specification
    #[serde(default, deserialize_with = "lenient")]
    pub kernelspec: Option<KernelSpec>,

    /// Language info
    #[serde(default, deserialize_with = "lenient")]
    pub language_info: Option<LanguageInfo>,
}

/// Kernel specification.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct KernelSpec {
    /// Language
    #[serde(default, deserialize_with = "lenient")]
    pub language: Option<String>,
}

/// Language information.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct LanguageInfo {
    /// Language name
    #[serde(default, deserialize_with = "lenient")]
    pub name: Option<String>,
}

/// A Jupyter cell, before its outputs are classified.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct JupyterCell {
    /// Cell type (`markdown`, `code`, `raw`, ...); `None` when absent or not a string
    #[serde(default, deserialize_with = "lenient")]
    pub cell_type: Option<String>,

    /// Cell source
    #[serde(default)]
    pub source: MultilineText,

    /// Cell outputs, kept as raw JSON until classified. Only read for code
    /// cells, and only when it is an array.
    #[serde(default)]
    pub outputs: Value,
}

/// Deserialize `T`, falling back to its default when the value has another shape.
fn lenient<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: DeserializeOwned + Default,
{
    let value = Value::deserialize(deserializer)?;
    Ok(serde_json::from_value(value).unwrap_or_default())
}

/// Text stored either as a list of fragments or as one string.
///
/// nbformat writers usually split text into lines that keep their trailing
/// `\n`, so fragments are concatenated without a separator.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(untagged)]
pub enum MultilineText {
    /// Pre-split fragments
    Fragments(Vec<String>),
    /// A single string
    Single(String),
}

impl Default for MultilineText {
    fn default() -> Self {
        Self::Fragments(Vec::new())
    }
}

impl MultilineText {
    /// Concatenate the fragments with no separator.
    pub fn concat(&self) -> String {
        match self {
            Self::Fragments(parts) => parts.concat(),
            Self::Single(text) => text.clone(),
        }
    }

    /// Join the fragments as lines, separated by `\n`.
    pub fn join_lines(&self) -> String {
        match self {
            Self::Fragments(parts) => parts.join("\n"),
            Self::Single(text) => text.clone(),
        }
    }
}

/// A cell with its type and outputs resolved.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Cell {
    /// Markdown cell
    Markdown { source: String },

    /// Code cell with its captured outputs
    Code {
        source: String,
        outputs: Vec<CellOutput>,
    },

    /// Any other cell type; never displayed.
    Other { cell_type: String },
}

impl JupyterNotebook {
    /// Parse a notebook from raw bytes.
    ///
    /// The bytes must be UTF-8 JSON with an object at the top level.
    pub fn from_slice(bytes: &[u8]) -> RenderResult<Self> {
        let text = std::str::from_utf8(bytes)?;
        Self::parse_str(text)
    }

    /// Parse a notebook from a string.
    pub fn parse_str(text: &str) -> RenderResult<Self> {
        let value: Value = serde_json::from_str(text)?;
        if !value.is_object() {
            return Err(RenderError::InvalidNotebook(
                "top-level value must be a JSON object".to_string(),
            ));
        }
        if value.get("cells").is_some_and(|cells| !cells.is_array()) {
            return Err(RenderError::InvalidNotebook(
                "`cells` must be an array".to_string(),
            ));
        }
        let notebook: Self = serde_json::from_value(value)?;
        Ok(notebook)
    }

    /// Read a notebook from any reader.
    pub fn from_reader(mut reader: impl Read) -> RenderResult<Self> {
        let mut bytes = Vec::new();
        reader.read_to_end(&mut bytes).map_err(|e| RenderError::ReadError {
            path: "<reader>".into(),
            message: e.to_string(),
        })?;
        Self::from_slice(&bytes)
    }

    /// Read a notebook from a file.
    pub fn read_from_file(path: impl AsRef<Path>) -> RenderResult<Self> {
        let path = path.as_ref();
        let bytes = fs::read(path).map_err(|e| match e.kind() {
            io::ErrorKind::NotFound => RenderError::NotFound {
                path: path.to_path_buf(),
            },
            _ => RenderError::ReadError {
                path: path.to_path_buf(),
                message: e.to_string(),
            },
        })?;
        Self::from_slice(&bytes)
    }

    /// The kernel language the notebook declares, if any.
    pub fn declared_language(&self) -> Option<&str> {
        self.metadata
            .kernelspec
            .as_ref()
            .and_then(|k| k.language.as_deref())
            .or_else(|| {
                self.metadata
                    .language_info
                    .as_ref()
                    .and_then(|l| l.name.as_deref())
            })
    }

    /// Resolve every cell, classifying outputs and decoding images.
    ///
    /// Fails on the first malformed output; nothing is returned in that case.
    pub fn resolve_cells(&self) -> RenderResult<Vec<Cell>> {
        self.cells
            .iter()
            .enumerate()
            .map(|(index, cell)| cell.resolve(index + 1))
            .collect()
    }
}

impl JupyterCell {
    /// Resolve this cell; `position` is its 1-based place in the notebook.
    fn resolve(&self, position: usize) -> RenderResult<Cell> {
        match self.cell_type.as_deref() {
            Some("markdown") => Ok(Cell::Markdown {
                source: self.source.concat(),
            }),
            Some("code") => {
                let outputs = self
                    .outputs
                    .as_array()
                    .map(Vec::as_slice)
                    .unwrap_or_default()
                    .iter()
                    .map(|output| CellOutput::classify(output, position))
                    .collect::<RenderResult<Vec<_>>>()?;
                Ok(Cell::Code {
                    source: self.source.concat(),
                    outputs,
                })
            }
            other => Ok(Cell::Other {
                cell_type: other.unwrap_or_default().to_string(),
            }),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_missing_cells_is_empty() {
        let notebook = JupyterNotebook::parse_str(r#"{"nbformat": 4}"#).unwrap();
        assert!(notebook.cells.is_empty());
        assert!(notebook.resolve_cells().unwrap().is_empty());
    }

    #[test]
    fn test_source_fragments_concatenate() {
        let notebook = JupyterNotebook::parse_str(
            r##"{"cells": [{"cell_type": "markdown", "source": ["# Hi", "\nbody"]}]}"##,
        )
        .unwrap();
        assert_eq!(notebook.cells[0].source.concat(), "# Hi\nbody");
    }

    #[test]
    fn test_source_as_single_string() {
        let notebook = JupyterNotebook::parse_str(
            r#"{"cells": [{"cell_type": "code", "source": "print(1)"}]}"#,
        )
        .unwrap();
        let cells = notebook.resolve_cells().unwrap();
        assert_eq!(
            cells[0],
            Cell::Code {
                source: "print(1)".to_string(),
                outputs: vec![],
            }
        );
    }

    #[test]
    fn test_missing_cell_type_is_other() {
        let notebook = JupyterNotebook::parse_str(r#"{"cells": [{"source": ["x"]}]}"#).unwrap();
        let cells = notebook.resolve_cells().unwrap();
        assert!(matches!(&cells[0], Cell::Other { cell_type } if cell_type.is_empty()));
    }

    #[test]
    fn test_non_string_cell_type_is_other() {
        let notebook =
            JupyterNotebook::parse_str(r#"{"cells": [{"cell_type": null, "source": ["x"]}]}"#)
                .unwrap();
        let cells = notebook.resolve_cells().unwrap();
        assert!(matches!(&cells[0], Cell::Other { cell_type } if cell_type.is_empty()));
    }

    #[test]
    fn test_code_outputs_not_an_array_are_empty() {
        for outputs in ["null", "{}", "\"text\""] {
            let json = format!(
                r#"{{"cells": [{{"cell_type": "code", "source": ["x"], "outputs": {}}}]}}"#,
                outputs
            );
            let cells = JupyterNotebook::parse_str(&json).unwrap().resolve_cells().unwrap();
            assert_eq!(
                cells[0],
                Cell::Code {
                    source: "x".to_string(),
                    outputs: vec![],
                }
            );
        }
    }

    #[test]
    fn test_mistyped_metadata_is_ignored() {
        for metadata in [
            "null",
            "[]",
            r#"{"language_info": {"name": 3}}"#,
            r#"{"kernelspec": "python3", "language_info": {"name": "python"}}"#,
        ] {
            let json = format!(r#"{{"metadata": {}, "cells": []}}"#, metadata);
            assert!(JupyterNotebook::parse_str(&json).is_ok(), "{}", metadata);
        }

        let notebook = JupyterNotebook::parse_str(
            r#"{"metadata": {"kernelspec": "python3", "language_info": {"name": "julia"}}}"#,
        )
        .unwrap();
        assert_eq!(notebook.declared_language(), Some("julia"));
    }

    #[test]
    fn test_top_level_must_be_object() {
        let err = JupyterNotebook::parse_str("[]").unwrap_err();
        assert!(matches!(err, RenderError::InvalidNotebook(_)));
    }

    #[test]
    fn test_cells_must_be_array() {
        let err = JupyterNotebook::parse_str(r#"{"cells": {}}"#).unwrap_err();
        assert!(matches!(err, RenderError::InvalidNotebook(_)));
    }

    #[test]
    fn test_invalid_utf8() {
        let err = JupyterNotebook::from_slice(&[b'{', 0xff, b'}']).unwrap_err();
        assert!(matches!(err, RenderError::Encoding(_)));
    }

    #[test]
    fn test_declared_language() {
        let notebook = JupyterNotebook::parse_str(
            r#"{"metadata": {"language_info": {"name": "julia"}}, "cells": []}"#,
        )
        .unwrap();
        assert_eq!(notebook.declared_language(), Some("julia"));

        let notebook = JupyterNotebook::parse_str(
            r#"{"metadata": {"kernelspec": {"language": "R", "name": "ir"}}}"#,
        )
        .unwrap();
        assert_eq!(notebook.declared_language(), Some("R"));
    }

    #[test]
    fn test_join_lines() {
        let text = MultilineText::Fragments(vec!["line1".to_string(), "line2".to_string()]);
        assert_eq!(text.join_lines(), "line1\nline2");
        assert_eq!(text.concat(), "line1line2");
    }
}
