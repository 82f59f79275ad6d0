//! Document extractor: pages of fragments and tables into a content tree.

use crate::error::Result;
use crate::model::{Document, Page, Paragraph, Table};

use super::backend::PdfBackend;
use super::options::{ExtractOptions, SectionScope};
use super::section::{is_section_title, normalize_text, page_max_font_size};

/// Builds a [`Document`] from any [`PdfBackend`].
#[derive(Debug, Clone, Default)]
pub struct Extractor {
    options: ExtractOptions,
}

impl Extractor {
    /// Create an extractor with the given options.
    pub fn new(options: ExtractOptions) -> Self {
        Self { options }
    }

    /// Get the options.
    pub fn options(&self) -> &ExtractOptions {
        &self.options
    }

    /// Scan every selected page.
    ///
    /// Any backend failure aborts the whole scan; no partial document is
    /// returned.
    pub fn extract<B: PdfBackend + ?Sized>(&self, backend: &B) -> Result<Document> {
        let mut doc = Document::new();
        let mut section: Option<String> = None;

        for page_number in backend.page_numbers() {
            if !self.options.pages.includes(page_number) {
                continue;
            }
            if self.options.section_scope == SectionScope::PerPage {
                section = None;
            }
            let page = self.extract_page(backend, page_number, &mut section)?;
            doc.add_page(page);
        }

        Ok(doc)
    }

    fn extract_page<B: PdfBackend + ?Sized>(
        &self,
        backend: &B,
        page_number: u32,
        section: &mut Option<String>,
    ) -> Result<Page> {
        let mut page = Page::new(page_number);

        let fragments: Vec<_> = backend
            .text_fragments(page_number)?
            .into_iter()
            .filter_map(|f| f.font_size.map(|size| (f.text, size)))
            .collect();
        let max_size = page_max_font_size(fragments.iter().map(|(_, size)| *size));

        for (raw, size) in fragments {
            let text = normalize_text(&raw);
            // A blank heading-sized fragment still replaces the running title.
            if is_section_title(&text, size, max_size) {
                log::debug!("page {}: section {:?}", page_number, text);
                *section = Some(text);
            } else if !text.is_empty() {
                page.add_paragraph(Paragraph::new(section.clone(), text));
            }
        }

        if self.options.detect_tables {
            for grid in backend.tables(page_number)? {
                if grid.is_empty() {
                    continue;
                }
                page.add_table(Table::new(section.clone(), grid));
            }
        }

        log::debug!(
            "page {}: {} blocks (max font size {:.1})",
            page_number,
            page.block_count(),
            max_size
        );
        Ok(page)
    }
}

#[cfg(test)]
mod tests {
    use std::collections::BTreeMap;

    use super::*;
    use crate::error::Error;
    use crate::model::{ContentBlock, TableGrid};
    use crate::parser::backend::Fragment;
    use crate::parser::options::PageSelection;

    #[derive(Default)]
    struct FakeBackend {
        fragments: BTreeMap<u32, Vec<Fragment>>,
        tables: BTreeMap<u32, Vec<TableGrid>>,
        fail_on: Option<u32>,
    }

    impl FakeBackend {
        fn page(mut self, n: u32, fragments: Vec<Fragment>) -> Self {
            self.fragments.insert(n, fragments);
            self
        }

        fn table(mut self, n: u32, grid: TableGrid) -> Self {
            self.tables.entry(n).or_default().push(grid);
            self
        }
    }

    impl PdfBackend for FakeBackend {
        fn page_numbers(&self) -> Vec<u32> {
            self.fragments.keys().copied().collect()
        }

        fn text_fragments(&self, page: u32) -> Result<Vec<Fragment>> {
            if self.fail_on == Some(page) {
                return Err(Error::TextExtract("broken page".to_string()));
            }
            Ok(self.fragments.get(&page).cloned().unwrap_or_default())
        }

        fn tables(&self, page: u32) -> Result<Vec<TableGrid>> {
            Ok(self.tables.get(&page).cloned().unwrap_or_default())
        }
    }

    fn frag(text: &str, size: f32) -> Fragment {
        Fragment::new(text, Some(size))
    }

    fn grid(rows: &[&[&str]]) -> TableGrid {
        rows.iter()
            .map(|r| r.iter().map(|c| Some(c.to_string())).collect())
            .collect()
    }

    fn paragraph(section: Option<&str>, text: &str) -> ContentBlock {
        ContentBlock::Paragraph(Paragraph::new(section.map(String::from), text))
    }

    #[test]
    fn test_empty_page_has_empty_content() {
        let backend = FakeBackend::default().page(1, Vec::new());
        let doc = Extractor::default().extract(&backend).unwrap();

        assert_eq!(doc.page_count(), 1);
        assert_eq!(doc.pages[0].page_number, 1);
        assert!(doc.pages[0].content.is_empty());
    }

    #[test]
    fn test_executive_summary_example() {
        let backend = FakeBackend::default().page(
            1,
            vec![
                frag("Executive Summary", 18.0),
                frag(
                    "Revenue grew 12% year over year driven by strong demand\nin all regions.",
                    11.0,
                ),
            ],
        );
        let doc = Extractor::default().extract(&backend).unwrap();

        assert_eq!(
            doc.pages[0].content,
            vec![paragraph(
                Some("Executive Summary"),
                "Revenue grew 12% year over year driven by strong demand in all regions."
            )]
        );
    }

    #[test]
    fn test_title_never_becomes_paragraph() {
        let backend = FakeBackend::default().page(
            1,
            vec![
                frag("Intro text before any heading goes here for a while", 11.0),
                frag("Methods", 16.0),
                frag("We measured things carefully with several instruments", 11.0),
                frag("Results", 16.0),
                frag("They were good", 11.0),
            ],
        );
        let doc = Extractor::default().extract(&backend).unwrap();
        let content = &doc.pages[0].content;

        // "They were good" is short but smaller than the page maximum
        assert_eq!(content.len(), 3);
        assert_eq!(content[0].section(), None);
        assert_eq!(content[1].section(), Some("Methods"));
        assert_eq!(content[2].section(), Some("Results"));
        assert!(content.iter().all(|b| b.is_paragraph()));
    }

    #[test]
    fn test_long_large_text_is_paragraph() {
        let backend = FakeBackend::default().page(
            1,
            vec![frag(
                "one two three four five six seven eight nine ten eleven",
                18.0,
            )],
        );
        let doc = Extractor::default().extract(&backend).unwrap();

        assert_eq!(
            doc.pages[0].content,
            vec![paragraph(
                None,
                "one two three four five six seven eight nine ten eleven"
            )]
        );
    }

    #[test]
    fn test_tables_follow_paragraphs_with_final_section() {
        let backend = FakeBackend::default()
            .page(
                1,
                vec![
                    frag("Overview", 14.0),
                    frag("Some body text that is long enough to not be a title", 10.0),
                    frag("Figures", 14.0),
                ],
            )
            .table(1, grid(&[&["a", "b"], &["1", "2"]]))
            .table(1, Vec::new());
        let doc = Extractor::default().extract(&backend).unwrap();
        let content = &doc.pages[0].content;

        assert_eq!(content.len(), 2);
        assert!(content[0].is_paragraph());
        assert_eq!(content[0].section(), Some("Overview"));
        match &content[1] {
            ContentBlock::Table(t) => {
                assert_eq!(t.section.as_deref(), Some("Figures"));
                assert_eq!(t.rows, grid(&[&["a", "b"], &["1", "2"]]));
                assert_eq!(t.description, None);
            }
            other => panic!("expected table, got {other:?}"),
        }
    }

    #[test]
    fn test_tables_can_be_disabled() {
        let backend = FakeBackend::default()
            .page(1, Vec::new())
            .table(1, grid(&[&["a", "b"]]));
        let extractor = Extractor::new(ExtractOptions::new().with_tables(false));
        let doc = extractor.extract(&backend).unwrap();

        assert!(doc.pages[0].content.is_empty());
    }

    #[test]
    fn test_section_carries_across_pages() {
        let backend = FakeBackend::default()
            .page(
                1,
                vec![
                    frag("Background", 16.0),
                    frag("Body text on the first page of the report", 10.0),
                ],
            )
            .page(
                2,
                vec![frag(
                    "Continued body text on the next page of the quarterly report",
                    10.0,
                )],
            );
        let doc = Extractor::default().extract(&backend).unwrap();

        assert_eq!(
            doc.pages[1].content,
            vec![paragraph(
                Some("Background"),
                "Continued body text on the next page of the quarterly report"
            )]
        );
    }

    #[test]
    fn test_per_page_scope_resets_section() {
        let backend = FakeBackend::default()
            .page(
                1,
                vec![
                    frag("Background", 16.0),
                    frag("Body text on the first page of the report", 10.0),
                ],
            )
            .page(
                2,
                vec![frag(
                    "Continued body text on the next page of the quarterly report",
                    10.0,
                )],
            );
        let extractor = Extractor::new(ExtractOptions::new().per_page_sections());
        let doc = extractor.extract(&backend).unwrap();

        assert_eq!(doc.pages[1].content.len(), 1);
        assert_eq!(doc.pages[1].content[0].section(), None);
    }

    #[test]
    fn test_fragments_without_font_size_are_skipped() {
        let backend = FakeBackend::default().page(
            1,
            vec![
                Fragment::new("Huge untyped text", None),
                frag("Title", 12.0),
                frag("Body text with quite a few words in it, really", 10.0),
            ],
        );
        let doc = Extractor::default().extract(&backend).unwrap();

        assert_eq!(
            doc.pages[0].content,
            vec![paragraph(
                Some("Title"),
                "Body text with quite a few words in it, really"
            )]
        );
    }

    #[test]
    fn test_blank_fragments_are_not_paragraphs() {
        let backend = FakeBackend::default().page(
            1,
            vec![
                frag("  \n ", 8.0),
                frag("Body text with quite a few words in it, really", 10.0),
            ],
        );
        let doc = Extractor::default().extract(&backend).unwrap();

        assert_eq!(
            doc.pages[0].content,
            vec![paragraph(
                None,
                "Body text with quite a few words in it, really"
            )]
        );
    }

    #[test]
    fn test_blank_heading_clears_section() {
        let backend = FakeBackend::default().page(
            1,
            vec![
                frag("Intro", 20.0),
                frag("Body text with quite a few words in it, really", 10.0),
                frag("   ", 20.0),
                frag("More body text with quite a few words in it, really", 10.0),
            ],
        );
        let doc = Extractor::default().extract(&backend).unwrap();
        let sections: Vec<_> = doc.pages[0].content.iter().map(|b| b.section()).collect();

        assert_eq!(sections, vec![Some("Intro"), Some("")]);
    }

    #[test]
    fn test_page_selection() {
        let backend = FakeBackend::default()
            .page(1, Vec::new())
            .page(2, Vec::new())
            .page(3, Vec::new());
        let extractor =
            Extractor::new(ExtractOptions::new().with_pages(PageSelection::Pages(vec![1, 3])));
        let doc = extractor.extract(&backend).unwrap();

        let numbers: Vec<u32> = doc.pages.iter().map(|p| p.page_number).collect();
        assert_eq!(numbers, vec![1, 3]);
    }

    #[test]
    fn test_backend_error_aborts_scan() {
        let mut backend = FakeBackend::default()
            .page(1, vec![frag("fine", 10.0)])
            .page(2, Vec::new());
        backend.fail_on = Some(2);

        let result = Extractor::default().extract(&backend);
        assert!(matches!(result, Err(Error::TextExtract(_))));
    }
}
