//! Content block types.

use serde::{Deserialize, Serialize};

/// A table cell value. `None` marks a cell the detector found no text for.
pub type Cell = Option<String>;

/// Raw table grid: rows of cells, in reading order.
pub type TableGrid = Vec<Vec<Cell>>;

/// A single piece of page content.
///
/// Serializes with a `"type"` tag of `"paragraph"` or `"table"`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum ContentBlock {
    /// A run of body text
    Paragraph(Paragraph),
    /// A detected table region
    Table(Table),
}

impl ContentBlock {
    /// Section title the block was filed under.
    pub fn section(&self) -> Option<&str> {
        match self {
            ContentBlock::Paragraph(p) => p.section.as_deref(),
            ContentBlock::Table(t) => t.section.as_deref(),
        }
    }

    /// Check if this block is a paragraph.
    pub fn is_paragraph(&self) -> bool {
        matches!(self, ContentBlock::Paragraph(_))
    }

    /// Check if this block is a table.
    pub fn is_table(&self) -> bool {
        matches!(self, ContentBlock::Table(_))
    }
}

/// A paragraph of body text.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Paragraph {
    /// Most recent section title at the time of extraction
    pub section: Option<String>,

    /// Normalized text (trimmed, newlines collapsed to spaces)
    pub text: String,
}

impl Paragraph {
    /// Create a paragraph under an optional section.
    pub fn new(section: Option<String>, text: impl Into<String>) -> Self {
        Self {
            section,
            text: text.into(),
        }
    }

    /// Number of whitespace-separated words.
    pub fn word_count(&self) -> usize {
        self.text.split_whitespace().count()
    }
}

/// A table region.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Table {
    /// Most recent section title when the page's tables were collected
    pub section: Option<String>,

    /// Raw extracted grid
    #[serde(rename = "table_data")]
    pub rows: TableGrid,

    /// Free-form caption; extraction never fills this in
    pub description: Option<String>,
}

impl Table {
    /// Create a table from a raw grid.
    pub fn new(section: Option<String>, rows: TableGrid) -> Self {
        Self {
            section,
            rows,
            description: None,
        }
    }

    /// Get the number of rows.
    pub fn row_count(&self) -> usize {
        self.rows.len()
    }

    /// Get the number of columns (based on first row).
    pub fn column_count(&self) -> usize {
        self.rows.first().map(|r| r.len()).unwrap_or(0)
    }

    /// Check if the table has no rows.
    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }
}
