//! Error types for pdfbrief.

use std::io;
use thiserror::Error;

/// Result type alias for pdfbrief operations.
pub type Result<T> = std::result::Result<T, Error>;

/// Error types that can occur while extracting or summarizing a PDF.
#[derive(Error, Debug)]
pub enum Error {
    /// I/O error when reading or writing files.
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    /// The input does not start with a PDF header.
    #[error("Unknown file format: not a valid PDF")]
    UnknownFormat,

    /// The PDF header carries a version we cannot read.
    #[error("Unsupported PDF version: {0}")]
    UnsupportedVersion(String),

    /// Error parsing PDF structure.
    #[error("PDF parsing error: {0}")]
    PdfParse(String),

    /// The PDF document is encrypted.
    #[error("Document is encrypted")]
    Encrypted,

    /// Error extracting text or tables from a page.
    #[error("Text extraction error: {0}")]
    TextExtract(String),

    /// Page number is out of range.
    #[error("Page {0} is out of range (document has {1} pages)")]
    PageOutOfRange(u32, u32),

    /// Error serializing the content tree.
    #[error("Rendering error: {0}")]
    Render(String),

    /// Summarization options are inconsistent.
    #[error("Invalid options: {0}")]
    InvalidOptions(String),

    /// The summarization model could not be fetched or built.
    #[error("Model load error: {0}")]
    ModelLoad(String),

    /// Tokenizer failed to encode or decode.
    #[error("Tokenizer error: {0}")]
    Tokenizer(String),

    /// The model failed while generating a summary.
    #[error("Generation error: {0}")]
    Generation(String),

    /// Generic error with message.
    #[error("{0}")]
    Other(String),
}

impl Error {
    /// Whether this error belongs to document extraction.
    pub fn is_extraction(&self) -> bool {
        matches!(
            self,
            Error::Io(_)
                | Error::UnknownFormat
                | Error::UnsupportedVersion(_)
                | Error::PdfParse(_)
                | Error::Encrypted
                | Error::TextExtract(_)
                | Error::PageOutOfRange(..)
        )
    }

    /// Whether this error came out of the summarization stage.
    pub fn is_summarization(&self) -> bool {
        matches!(
            self,
            Error::InvalidOptions(_) | Error::Tokenizer(_) | Error::Generation(_)
        )
    }
}

impl From<lopdf::Error> for Error {
    fn from(err: lopdf::Error) -> Self {
        match err {
            lopdf::Error::IO(e) => Error::Io(e),
            lopdf::Error::Decryption(_) => Error::Encrypted,
            _ => Error::PdfParse(err.to_string()),
        }
    }
}
