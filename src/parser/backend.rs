//! PDF backend abstraction layer.
//!
//! The extractor only needs two things from a page: its text fragments with
//! geometry, and the table grids found on it. [`PdfBackend`] isolates those
//! two capabilities from the concrete PDF library (lopdf).

use std::io::Read;
use std::path::Path;

use lopdf::{Document as LopdfDocument, ObjectId};

use crate::detect::{detect_format_from_bytes, detect_format_from_path};
use crate::error::{Error, Result};
use crate::model::TableGrid;

use super::fragments::assemble_fragments;
use super::spans::{read_page_spans, TextSpan};
use super::tables::{TableDetector, TableDetectorConfig};

/// A block of text on a page with its bounding box.
///
/// Coordinates are in PDF user space (origin bottom-left).
#[derive(Debug, Clone, PartialEq)]
pub struct Fragment {
    pub x0: f32,
    pub y0: f32,
    pub x1: f32,
    pub y1: f32,
    /// Raw text; lines are separated by `\n`
    pub text: String,
    /// Font size, when the source carries one
    pub font_size: Option<f32>,
}

impl Fragment {
    /// Create a fragment with an empty bounding box.
    pub fn new(text: impl Into<String>, font_size: Option<f32>) -> Self {
        Self {
            x0: 0.0,
            y0: 0.0,
            x1: 0.0,
            y1: 0.0,
            text: text.into(),
            font_size,
        }
    }

    /// Set the bounding box.
    pub fn with_bbox(mut self, x0: f32, y0: f32, x1: f32, y1: f32) -> Self {
        self.x0 = x0;
        self.y0 = y0;
        self.x1 = x1;
        self.y1 = y1;
        self
    }
}

/// Abstract interface for page-level PDF access.
///
/// Fragments and tables are two separate calls; implementations may read
/// the page twice.
pub trait PdfBackend {
    /// Page numbers in document order, starting at 1.
    fn page_numbers(&self) -> Vec<u32>;

    /// Text fragments of a page, in reading order.
    fn text_fragments(&self, page: u32) -> Result<Vec<Fragment>>;

    /// Table grids found on a page, top to bottom.
    fn tables(&self, page: u32) -> Result<Vec<TableGrid>>;
}

/// Concrete [`PdfBackend`] backed by `lopdf::Document`.
pub struct LopdfBackend {
    doc: LopdfDocument,
    detector: TableDetector,
}

impl LopdfBackend {
    /// Load from a file path.
    pub fn load_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        detect_format_from_path(path)?;
        let doc = LopdfDocument::load(path).map_err(map_load_error)?;
        Ok(Self::from_document(doc))
    }

    /// Load from an in-memory byte slice.
    pub fn load_bytes(data: &[u8]) -> Result<Self> {
        detect_format_from_bytes(data)?;
        let doc = LopdfDocument::load_mem(data).map_err(map_load_error)?;
        Ok(Self::from_document(doc))
    }

    /// Load from a reader.
    pub fn load_reader<R: Read>(mut reader: R) -> Result<Self> {
        let mut data = Vec::new();
        reader.read_to_end(&mut data)?;
        Self::load_bytes(&data)
    }

    fn from_document(doc: LopdfDocument) -> Self {
        if doc.is_encrypted() {
            log::warn!("document is encrypted; text may not decode");
        }
        log::debug!(
            "loaded PDF {} with {} pages",
            doc.version,
            doc.get_pages().len()
        );
        Self {
            doc,
            detector: TableDetector::new(),
        }
    }

    /// Replace the table detector tuning.
    pub fn with_table_config(mut self, config: TableDetectorConfig) -> Self {
        self.detector = TableDetector::with_config(config);
        self
    }

    /// Number of pages.
    pub fn page_count(&self) -> u32 {
        self.doc.get_pages().len() as u32
    }

    /// PDF version from the header.
    pub fn version(&self) -> String {
        self.doc.version.to_string()
    }

    /// Check if the document is encrypted.
    pub fn is_encrypted(&self) -> bool {
        self.doc.is_encrypted()
    }

    fn page_id(&self, page: u32) -> Result<ObjectId> {
        let pages = self.doc.get_pages();
        pages
            .get(&page)
            .copied()
            .ok_or(Error::PageOutOfRange(page, pages.len() as u32))
    }

    fn spans(&self, page: u32) -> Result<Vec<TextSpan>> {
        read_page_spans(&self.doc, self.page_id(page)?)
    }
}

impl PdfBackend for LopdfBackend {
    fn page_numbers(&self) -> Vec<u32> {
        self.doc.get_pages().into_keys().collect()
    }

    fn text_fragments(&self, page: u32) -> Result<Vec<Fragment>> {
        Ok(assemble_fragments(self.spans(page)?))
    }

    fn tables(&self, page: u32) -> Result<Vec<TableGrid>> {
        Ok(self.detector.detect(&self.spans(page)?))
    }
}

fn map_load_error(e: lopdf::Error) -> Error {
    match e {
        lopdf::Error::Decryption(_) => Error::Encrypted,
        _ => Error::from(e),
    }
}
