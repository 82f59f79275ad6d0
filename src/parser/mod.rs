//! PDF parsing module.
//!
//! [`LopdfBackend`] turns a PDF into positioned fragments and table grids;
//! [`Extractor`] walks those pages and files each block under the running
//! section title.

mod backend;
mod extractor;
mod fragments;
mod options;
mod section;
mod spans;
mod tables;

pub use backend::{Fragment, LopdfBackend, PdfBackend};
pub use extractor::Extractor;
pub use fragments::assemble_fragments;
pub use options::{ExtractOptions, PageSelection, SectionScope};
pub use section::{is_section_title, normalize_text, page_max_font_size, TITLE_WORD_LIMIT};
pub use spans::TextSpan;
pub use tables::{TableDetector, TableDetectorConfig};
