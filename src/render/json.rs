//! JSON rendering of the content tree.

use std::io::Write;

use crate::error::{Error, Result};
use crate::model::Document;

/// JSON output format.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum JsonFormat {
    /// Pretty-printed JSON with indentation
    #[default]
    Pretty,
    /// Compact JSON without extra whitespace
    Compact,
}

/// Convert a document to a JSON string.
pub fn to_json(doc: &Document, format: JsonFormat) -> Result<String> {
    let result = match format {
        JsonFormat::Pretty => serde_json::to_string_pretty(doc),
        JsonFormat::Compact => serde_json::to_string(doc),
    };

    result.map_err(render_error)
}

/// Write a document as JSON to any writer.
pub fn write_json<W: Write>(doc: &Document, format: JsonFormat, writer: W) -> Result<()> {
    let result = match format {
        JsonFormat::Pretty => serde_json::to_writer_pretty(writer, doc),
        JsonFormat::Compact => serde_json::to_writer(writer, doc),
    };

    result.map_err(render_error)
}

/// Read a content tree back from its JSON form.
pub fn from_json(json: &str) -> Result<Document> {
    serde_json::from_str(json).map_err(|e| Error::Render(format!("JSON parse error: {}", e)))
}

fn render_error(e: serde_json::Error) -> Error {
    Error::Render(format!("JSON serialization error: {}", e))
}
