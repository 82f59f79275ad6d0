//! Content tree produced by extraction.
//!
//! The tree is built once per extraction and is read-only afterwards: it is
//! either serialized to JSON or flattened to text for summarization.

mod block;
mod document;
mod page;
mod stats;

pub use block::{Cell, ContentBlock, Paragraph, Table, TableGrid};
pub use document::Document;
pub use page::Page;
pub use stats::DocumentStats;
