//! Bounded summarization.
//!
//! [`BoundedSummarizer`] keeps every model call within the model's input
//! budget by chunking long text and summarizing the chunk summaries.

mod bounded;
mod model;
mod options;
mod plan;

pub use bounded::{summarize, summarize_document, BoundedSummarizer};
pub use model::{GenerationParams, SummaryModel};
pub use options::SummarizeOptions;
pub use plan::SummaryPlan;
