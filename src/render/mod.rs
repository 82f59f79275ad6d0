//! Rendering of the content tree: JSON for display, flat text for the
//! summarizer.

mod json;
mod text;

pub use json::{from_json, to_json, write_json, JsonFormat};
pub use text::{flatten, table_snippet, SNIPPET_ROWS};
