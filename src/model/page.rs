//! Page-level types.

use super::{ContentBlock, Paragraph, Table};
use serde::{Deserialize, Serialize};

/// A single page in the document.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Page {
    /// Page number (1-indexed)
    pub page_number: u32,

    /// Content blocks in extraction order
    pub content: Vec<ContentBlock>,
}

impl Page {
    /// Create an empty page.
    pub fn new(page_number: u32) -> Self {
        Self {
            page_number,
            content: Vec::new(),
        }
    }

    /// Add a block to the page.
    pub fn add_block(&mut self, block: ContentBlock) {
        self.content.push(block);
    }

    /// Add a paragraph to the page.
    pub fn add_paragraph(&mut self, paragraph: Paragraph) {
        self.content.push(ContentBlock::Paragraph(paragraph));
    }

    /// Add a table to the page.
    pub fn add_table(&mut self, table: Table) {
        self.content.push(ContentBlock::Table(table));
    }

    /// Iterate over the page's paragraphs.
    pub fn paragraphs(&self) -> impl Iterator<Item = &Paragraph> {
        self.content.iter().filter_map(|block| match block {
            ContentBlock::Paragraph(p) => Some(p),
            ContentBlock::Table(_) => None,
        })
    }

    /// Iterate over the page's tables.
    pub fn tables(&self) -> impl Iterator<Item = &Table> {
        self.content.iter().filter_map(|block| match block {
            ContentBlock::Table(t) => Some(t),
            ContentBlock::Paragraph(_) => None,
        })
    }

    /// Check if the page is empty (no content blocks).
    pub fn is_empty(&self) -> bool {
        self.content.is_empty()
    }

    /// Get the number of blocks on the page.
    pub fn block_count(&self) -> usize {
        self.content.len()
    }
}
