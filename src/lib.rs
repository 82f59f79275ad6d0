//! # pdfbrief
//!
//! Structured content extraction and bounded summarization for PDF documents.
//!
//! Extraction turns each page into paragraphs and tables, filed under the
//! most recent section title. Summarization flattens that tree into text and
//! condenses it with a sequence-to-sequence model, chunking when the text is
//! longer than the model accepts.
//!
//! ## Quick Start
//!
//! ```no_run
//! use pdfbrief::{extract_file, render, summarize_document, ModelProvider, SummarizeOptions};
//!
//! fn main() -> pdfbrief::Result<()> {
//!     let doc = extract_file("report.pdf")?;
//!     println!("{}", render::to_json(&doc, render::JsonFormat::Pretty)?);
//!
//!     let provider = ModelProvider::from_hub(Default::default());
//!     let model = provider.acquire()?;
//!     let summary = summarize_document(&doc, model.as_ref(), &SummarizeOptions::default())?;
//!     println!("{}", summary);
//!     Ok(())
//! }
//! ```
//!
//! ## Features
//!
//! - **Section-aware extraction**: headings detected from font size
//! - **Table detection**: column alignment without ruling lines
//! - **Bounded summaries**: any input length against a fixed token budget
//! - **Pluggable backends**: fake the PDF or the model in tests

pub mod detect;
pub mod error;
pub mod model;
pub mod parser;
pub mod provider;
pub mod render;
pub mod summarize;

// Re-export commonly used types
pub use detect::{detect_format_from_bytes, detect_format_from_path, is_pdf_bytes, PdfHeader};
pub use error::{Error, Result};
pub use model::{Cell, ContentBlock, Document, DocumentStats, Page, Paragraph, Table, TableGrid};
pub use parser::{
    ExtractOptions, Extractor, Fragment, LopdfBackend, PageSelection, PdfBackend, SectionScope,
    TableDetectorConfig,
};
pub use provider::{DeviceChoice, ModelConfig, ModelLoader, ModelProvider};
pub use render::{flatten, JsonFormat};
pub use summarize::{
    summarize, summarize_document, BoundedSummarizer, GenerationParams, SummarizeOptions,
    SummaryModel, SummaryPlan,
};

use std::io::Read;
use std::path::Path;

/// Extract a PDF file into a content tree.
///
/// # Example
///
/// ```no_run
/// use pdfbrief::extract_file;
///
/// let doc = extract_file("report.pdf").unwrap();
/// println!("Pages: {}", doc.page_count());
/// ```
pub fn extract_file<P: AsRef<Path>>(path: P) -> Result<Document> {
    extract_file_with_options(path, ExtractOptions::default())
}

/// Extract a PDF file with custom options.
///
/// # Example
///
/// ```no_run
/// use pdfbrief::{extract_file_with_options, ExtractOptions, PageSelection};
///
/// let options = ExtractOptions::new()
///     .per_page_sections()
///     .with_pages(PageSelection::Range(1..=3));
/// let doc = extract_file_with_options("report.pdf", options).unwrap();
/// ```
pub fn extract_file_with_options<P: AsRef<Path>>(
    path: P,
    options: ExtractOptions,
) -> Result<Document> {
    let backend = LopdfBackend::load_file(path)?.with_table_config(options.table_detector.clone());
    Extractor::new(options).extract(&backend)
}

/// Extract a PDF from bytes.
pub fn extract_bytes(data: &[u8]) -> Result<Document> {
    extract_bytes_with_options(data, ExtractOptions::default())
}

/// Extract a PDF from bytes with custom options.
pub fn extract_bytes_with_options(data: &[u8], options: ExtractOptions) -> Result<Document> {
    let backend = LopdfBackend::load_bytes(data)?.with_table_config(options.table_detector.clone());
    Extractor::new(options).extract(&backend)
}

/// Extract a PDF from a reader.
pub fn extract_reader<R: Read>(reader: R) -> Result<Document> {
    let backend = LopdfBackend::load_reader(reader)?;
    Extractor::default().extract(&backend)
}

/// Extract a PDF file, or `None` if anything goes wrong.
///
/// The cause is logged at warn level and otherwise dropped; no partial
/// document is ever returned. Use [`extract_file`] to see the error.
pub fn parse_file<P: AsRef<Path>>(path: P) -> Option<Document> {
    let path = path.as_ref();
    extract_file(path)
        .map_err(|e| log::warn!("could not extract {}: {}", path.display(), e))
        .ok()
}

/// Extract PDF bytes, or `None` if anything goes wrong.
pub fn parse_bytes(data: &[u8]) -> Option<Document> {
    extract_bytes(data)
        .map_err(|e| log::warn!("could not extract PDF bytes: {}", e))
        .ok()
}

/// Builder tying extraction and summarization options together.
///
/// # Example
///
/// ```no_run
/// use pdfbrief::{ModelProvider, PdfBrief};
///
/// let brief = PdfBrief::new()
///     .per_page_sections()
///     .with_min_length(30)
///     .extract("report.pdf")?;
///
/// let provider = ModelProvider::from_hub(Default::default());
/// let summary = brief.summarize(provider.acquire()?.as_ref())?;
/// # Ok::<(), pdfbrief::Error>(())
/// ```
#[derive(Debug, Clone, Default)]
pub struct PdfBrief {
    extract_options: ExtractOptions,
    summarize_options: SummarizeOptions,
}

impl PdfBrief {
    /// Create a new builder.
    pub fn new() -> Self {
        Self::default()
    }

    /// Reset the running section title at each page.
    pub fn per_page_sections(mut self) -> Self {
        self.extract_options = self.extract_options.per_page_sections();
        self
    }

    /// Set page selection.
    pub fn with_pages(mut self, pages: PageSelection) -> Self {
        self.extract_options = self.extract_options.with_pages(pages);
        self
    }

    /// Enable or disable table detection.
    pub fn with_tables(mut self, detect: bool) -> Self {
        self.extract_options = self.extract_options.with_tables(detect);
        self
    }

    /// Set the minimum summary length.
    pub fn with_min_length(mut self, min_length: usize) -> Self {
        self.summarize_options = self.summarize_options.with_min_length(min_length);
        self
    }

    /// Set the maximum summary length.
    pub fn with_max_length(mut self, max_length: usize) -> Self {
        self.summarize_options = self.summarize_options.with_max_length(max_length);
        self
    }

    /// Replace all extraction options.
    pub fn with_extract_options(mut self, options: ExtractOptions) -> Self {
        self.extract_options = options;
        self
    }

    /// Replace all summarization options.
    pub fn with_summarize_options(mut self, options: SummarizeOptions) -> Self {
        self.summarize_options = options;
        self
    }

    /// Extract a PDF file.
    pub fn extract<P: AsRef<Path>>(self, path: P) -> Result<Brief> {
        let document = extract_file_with_options(path, self.extract_options)?;
        Ok(Brief::new(document, self.summarize_options))
    }

    /// Extract PDF bytes.
    pub fn extract_bytes(self, data: &[u8]) -> Result<Brief> {
        let document = extract_bytes_with_options(data, self.extract_options)?;
        Ok(Brief::new(document, self.summarize_options))
    }

    /// Extract through any backend.
    pub fn extract_with<B: PdfBackend + ?Sized>(self, backend: &B) -> Result<Brief> {
        let document = Extractor::new(self.extract_options).extract(backend)?;
        Ok(Brief::new(document, self.summarize_options))
    }
}

/// An extracted document ready to render or summarize.
#[derive(Debug, Clone)]
pub struct Brief {
    /// The extracted document
    pub document: Document,
    summarize_options: SummarizeOptions,
}

impl Brief {
    fn new(document: Document, summarize_options: SummarizeOptions) -> Self {
        Self {
            document,
            summarize_options,
        }
    }

    /// Convert to JSON.
    pub fn to_json(&self, format: JsonFormat) -> Result<String> {
        render::to_json(&self.document, format)
    }

    /// Flattened text, as fed to the summarizer.
    pub fn text(&self) -> String {
        flatten(&self.document)
    }

    /// Summarize the document.
    pub fn summarize(&self, model: &dyn SummaryModel) -> Result<String> {
        summarize_document(&self.document, model, &self.summarize_options)
    }

    /// Document metrics.
    pub fn stats(&self) -> DocumentStats {
        self.document.stats()
    }

    /// Get the document.
    pub fn document(&self) -> &Document {
        &self.document
    }
}
