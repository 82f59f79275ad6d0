//! Flattening of the content tree into summarizer input.

use crate::model::{ContentBlock, Document, Table};

/// Rows of a table that make it into the flattened text.
pub const SNIPPET_ROWS: usize = 2;

/// Placeholder written for a cell with no text.
const MISSING_CELL: &str = "None";

/// Flatten a document to newline-separated text.
///
/// Paragraphs contribute their text; tables contribute a one-line snippet of
/// their first rows. Blocks appear in page order, then block order.
pub fn flatten(doc: &Document) -> String {
    doc.pages
        .iter()
        .flat_map(|page| page.content.iter())
        .filter_map(|block| match block {
            ContentBlock::Paragraph(p) => Some(p.text.clone()),
            ContentBlock::Table(t) => table_snippet(t),
        })
        .collect::<Vec<_>>()
        .join("\n")
}

/// `"Table snippet: a | b ; c | d"` for the first two rows, or `None` for a
/// table without rows.
pub fn table_snippet(table: &Table) -> Option<String> {
    if table.rows.is_empty() {
        return None;
    }

    let rows: Vec<String> = table
        .rows
        .iter()
        .take(SNIPPET_ROWS)
        .map(|row| {
            row.iter()
                .map(|cell| cell.as_deref().unwrap_or(MISSING_CELL))
                .collect::<Vec<_>>()
                .join(" | ")
        })
        .collect();

    Some(format!("Table snippet: {}", rows.join(" ; ")))
}
