//! Document metrics shown alongside a summary.

use serde::Serialize;

use super::{ContentBlock, Document};

/// Counts over an extracted document.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct DocumentStats {
    /// Number of pages
    pub pages: usize,
    /// Content blocks of any kind
    pub blocks: usize,
    /// Paragraph blocks
    pub paragraphs: usize,
    /// Table blocks
    pub tables: usize,
    /// Words across paragraph text; table cells are not counted
    pub words: usize,
}

impl DocumentStats {
    /// Walk the document once and tally its content.
    pub fn collect(doc: &Document) -> Self {
        let mut stats = Self {
            pages: doc.pages.len(),
            ..Self::default()
        };

        for block in doc.pages.iter().flat_map(|p| p.content.iter()) {
            stats.blocks += 1;
            match block {
                ContentBlock::Paragraph(p) => {
                    stats.paragraphs += 1;
                    stats.words += p.word_count();
                }
                ContentBlock::Table(_) => stats.tables += 1,
            }
        }

        stats
    }
}
