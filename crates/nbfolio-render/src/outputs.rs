//! Classification of captured cell outputs.
//!
//! Notebook outputs are recognised by which keys they carry, checked in a
//! fixed order: `traceback`, then `text`, then `data`. The first match wins.

use base64::Engine;
use serde::Deserialize;
use serde_json::{Map, Value};

use crate::error::{RenderError, RenderResult};
use crate::ipynb::MultilineText;

/// MIME key for plain-text representations.
pub const MIME_TEXT_PLAIN: &str = "text/plain";

/// MIME key for base64 PNG images.
pub const MIME_IMAGE_PNG: &str = "image/png";

/// A classified cell output.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CellOutput {
    /// Error traceback, lines joined with `\n`.
    Error { traceback: String },

    /// Stream text, fragments concatenated.
    Text { text: String },

    /// Rich display data. At least one field is set.
    Data {
        text_plain: Option<String>,
        image_png: Option<Vec<u8>>,
    },

    /// Shape not recognised; renders as nothing.
    Unrecognized,
}

impl CellOutput {
    /// Classify a raw output object.
    ///
    /// `cell` is the 1-based position of the owning cell, used to report
    /// malformed image payloads.
    pub fn classify(output: &Value, cell: usize) -> RenderResult<Self> {
        let Some(fields) = output.as_object() else {
            return Ok(Self::Unrecognized);
        };

        if let Some(traceback) = fields.get("traceback") {
            let traceback = MultilineText::deserialize(traceback)?;
            return Ok(Self::Error {
                traceback: traceback.join_lines(),
            });
        }

        if let Some(text) = fields.get("text") {
            let text = MultilineText::deserialize(text)?;
            return Ok(Self::Text {
                text: text.concat(),
            });
        }

        if let Some(data) = fields.get("data").and_then(Value::as_object) {
            return classify_data(data, cell);
        }

        Ok(Self::Unrecognized)
    }

    /// Whether this output produces any display block.
    pub fn is_displayable(&self) -> bool {
        !matches!(self, Self::Unrecognized)
    }
}

fn classify_data(data: &Map<String, Value>, cell: usize) -> RenderResult<CellOutput> {
    let text_plain = data
        .get(MIME_TEXT_PLAIN)
        .map(MultilineText::deserialize)
        .transpose()?
        .map(|text| text.concat());

    let image_png = data
        .get(MIME_IMAGE_PNG)
        .map(MultilineText::deserialize)
        .transpose()?
        .map(|payload| decode_png(&payload.concat(), cell))
        .transpose()?;

    if text_plain.is_none() && image_png.is_none() {
        return Ok(CellOutput::Unrecognized);
    }

    Ok(CellOutput::Data {
        text_plain,
        image_png,
    })
}

/// Decode a base64 image payload.
///
/// Writers often wrap long payloads with newlines, so ASCII whitespace is
/// removed before decoding.
fn decode_png(payload: &str, cell: usize) -> RenderResult<Vec<u8>> {
    let compact: String = payload
        .chars()
        .filter(|c| !c.is_ascii_whitespace())
        .collect();
    base64::engine::general_purpose::STANDARD
        .decode(compact)
        .map_err(|source| RenderError::Image { cell, source })
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_traceback_wins_over_text() {
        let output = json!({
            "output_type": "error",
            "traceback": ["line1", "line2"],
            "text": ["ignored"]
        });
        assert_eq!(
            CellOutput::classify(&output, 1).unwrap(),
            CellOutput::Error {
                traceback: "line1\nline2".to_string()
            }
        );
    }

    #[test]
    fn test_text_wins_over_data() {
        let output = json!({
            "text": ["4", "2"],
            "data": {"text/plain": ["ignored"]}
        });
        assert_eq!(
            CellOutput::classify(&output, 1).unwrap(),
            CellOutput::Text {
                text: "42".to_string()
            }
        );
    }

    #[test]
    fn test_data_with_text_and_image() {
        let output = json!({
            "output_type": "display_data",
            "data": {
                "text/plain": ["<Figure>"],
                "image/png": "aGVsbG8=\n"
            }
        });
        assert_eq!(
            CellOutput::classify(&output, 1).unwrap(),
            CellOutput::Data {
                text_plain: Some("<Figure>".to_string()),
                image_png: Some(b"hello".to_vec()),
            }
        );
    }

    #[test]
    fn test_data_without_known_mime_is_unrecognized() {
        let output = json!({"data": {"text/html": ["<b>x</b>"]}});
        assert_eq!(
            CellOutput::classify(&output, 1).unwrap(),
            CellOutput::Unrecognized
        );
    }

    #[test]
    fn test_unknown_shapes_are_unrecognized() {
        for output in [json!({"output_type": "stream"}), json!(7), json!({"data": 3})] {
            let classified = CellOutput::classify(&output, 1).unwrap();
            assert!(!classified.is_displayable());
        }
    }

    #[test]
    fn test_malformed_base64_reports_cell() {
        let output = json!({"data": {"image/png": "not base64!"}});
        let err = CellOutput::classify(&output, 4).unwrap_err();
        assert!(matches!(err, RenderError::Image { cell: 4, .. }));
    }
}
