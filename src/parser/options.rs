//! Extraction options and configuration.

use std::ops::RangeInclusive;

use super::tables::TableDetectorConfig;

/// Options for extracting a PDF into a content tree.
#[derive(Debug, Clone)]
pub struct ExtractOptions {
    /// How long a detected section title stays in effect
    pub section_scope: SectionScope,

    /// Page selection (which pages to extract)
    pub pages: PageSelection,

    /// Whether to run the table pass on each page
    pub detect_tables: bool,

    /// Tuning for the table pass
    pub table_detector: TableDetectorConfig,
}

impl ExtractOptions {
    /// Create new extract options with defaults.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the section title scope.
    pub fn with_section_scope(mut self, scope: SectionScope) -> Self {
        self.section_scope = scope;
        self
    }

    /// Forget the running section title at every page boundary.
    pub fn per_page_sections(mut self) -> Self {
        self.section_scope = SectionScope::PerPage;
        self
    }

    /// Set page selection.
    pub fn with_pages(mut self, pages: PageSelection) -> Self {
        self.pages = pages;
        self
    }

    /// Enable or disable the table pass.
    pub fn with_tables(mut self, detect: bool) -> Self {
        self.detect_tables = detect;
        self
    }

    /// Set table detector tuning.
    pub fn with_table_detector(mut self, config: TableDetectorConfig) -> Self {
        self.table_detector = config;
        self
    }
}

impl Default for ExtractOptions {
    fn default() -> Self {
        Self {
            section_scope: SectionScope::AcrossPages,
            pages: PageSelection::All,
            detect_tables: true,
            table_detector: TableDetectorConfig::default(),
        }
    }
}

/// Lifetime of the running section title during a document scan.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SectionScope {
    /// A title stays in effect until the next title, even on later pages
    #[default]
    AcrossPages,
    /// Every page starts without a section
    PerPage,
}

/// Page selection for extraction.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum PageSelection {
    /// Extract all pages
    #[default]
    All,
    /// Extract a range of pages (inclusive, 1-indexed)
    Range(RangeInclusive<u32>),
    /// Extract specific pages (1-indexed)
    Pages(Vec<u32>),
    /// Extract several disjoint ranges, sorted and merged
    Ranges(Vec<RangeInclusive<u32>>),
}

impl PageSelection {
    /// Check if a page number should be included.
    pub fn includes(&self, page: u32) -> bool {
        match self {
            PageSelection::All => true,
            PageSelection::Range(range) => range.contains(&page),
            PageSelection::Pages(pages) => pages.contains(&page),
            PageSelection::Ranges(ranges) => ranges.iter().any(|r| r.contains(&page)),
        }
    }

    /// Parse a page selection string (e.g., "1-10", "1,3,5,7-10").
    pub fn parse(s: &str) -> Result<Self, String> {
        let s = s.trim();
        if s.is_empty() || s.eq_ignore_ascii_case("all") {
            return Ok(PageSelection::All);
        }

        if !s.contains(',') && s.contains('-') {
            return Ok(PageSelection::Range(parse_range(s)?));
        }

        let mut ranges = s
            .split(',')
            .map(parse_range)
            .collect::<Result<Vec<_>, _>>()?;
        ranges.sort_unstable_by_key(|r| *r.start());

        // Ranges stay unexpanded so huge spans cost nothing.
        let mut merged: Vec<RangeInclusive<u32>> = Vec::with_capacity(ranges.len());
        for range in ranges {
            if let Some(last) = merged.last_mut() {
                if *range.start() <= last.end().saturating_add(1) {
                    let end = (*last.end()).max(*range.end());
                    *last = *last.start()..=end;
                    continue;
                }
            }
            merged.push(range);
        }
        Ok(PageSelection::Ranges(merged))
    }
}

/// Parse `"n"` or `"a-b"` into an inclusive range, rejecting `a > b`.
fn parse_range(part: &str) -> Result<RangeInclusive<u32>, String> {
    match part.split_once('-') {
        Some((start, end)) => {
            let (start, end) = (parse_page(start)?, parse_page(end)?);
            if start > end {
                return Err(format!("reversed page range: {}-{}", start, end));
            }
            Ok(start..=end)
        }
        None => {
            let page = parse_page(part)?;
            Ok(page..=page)
        }
    }
}

fn parse_page(s: &str) -> Result<u32, String> {
    match s.trim().parse::<u32>() {
        Ok(0) => Err("page numbers start at 1".to_string()),
        Ok(page) => Ok(page),
        Err(_) => Err(format!("invalid page number: {:?}", s.trim())),
    }
}
