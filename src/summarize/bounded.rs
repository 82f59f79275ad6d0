//! Length-bounded summarization over a fixed input budget.

use crate::error::Result;
use crate::model::Document;
use crate::render::flatten;

use super::model::SummaryModel;
use super::options::SummarizeOptions;
use super::plan::SummaryPlan;

/// Summarizes text of any length with a model of fixed input size.
///
/// Text within the model's budget is summarized in one call. Longer text is
/// cut into budget-sized token chunks, each chunk is summarized, and the
/// chunk summaries are summarized once more. There is no third level.
pub struct BoundedSummarizer<'m> {
    model: &'m dyn SummaryModel,
    options: SummarizeOptions,
}

impl<'m> BoundedSummarizer<'m> {
    /// Create a summarizer with default options.
    pub fn new(model: &'m dyn SummaryModel) -> Self {
        Self {
            model,
            options: SummarizeOptions::default(),
        }
    }

    /// Set the options.
    pub fn with_options(mut self, options: SummarizeOptions) -> Self {
        self.options = options;
        self
    }

    /// Get the options.
    pub fn options(&self) -> &SummarizeOptions {
        &self.options
    }

    /// Decide how `text` would be summarized without generating anything.
    pub fn plan(&self, text: &str) -> Result<SummaryPlan> {
        self.options.validate()?;
        let tokens = self.model.encode(text)?;
        self.plan_for(&tokens, text)
    }

    fn plan_for(&self, tokens: &[u32], text: &str) -> Result<SummaryPlan> {
        SummaryPlan::build(
            tokens.len(),
            text.split_whitespace().count(),
            self.model.max_input_tokens(),
            &self.options,
        )
    }

    /// Summarize `text`.
    pub fn summarize(&self, text: &str) -> Result<String> {
        self.options.validate()?;
        let tokens = self.model.encode(text)?;

        match self.plan_for(&tokens, text)? {
            SummaryPlan::Direct { params } => {
                log::info!(
                    "summarizing {} tokens directly (max length {})",
                    tokens.len(),
                    params.max_length
                );
                self.model.generate(text, &params)
            }
            SummaryPlan::Chunked {
                chunks,
                chunk_params,
                meta_params,
            } => {
                log::info!(
                    "summarizing {} tokens in {} chunks",
                    tokens.len(),
                    chunks.len()
                );

                let mut summaries = Vec::with_capacity(chunks.len());
                for (i, range) in chunks.into_iter().enumerate() {
                    log::debug!("chunk {}: tokens {}..{}", i + 1, range.start, range.end);
                    let chunk_text = self.model.decode(&tokens[range])?;
                    summaries.push(self.model.generate(&chunk_text, &chunk_params)?);
                }

                let combined = summaries.join(" ");
                log::debug!(
                    "meta summary over {} words",
                    combined.split_whitespace().count()
                );
                self.model.generate(&combined, &meta_params)
            }
        }
    }
}

/// Summarize text with the given model and options.
pub fn summarize(text: &str, model: &dyn SummaryModel, options: &SummarizeOptions) -> Result<String> {
    BoundedSummarizer::new(model)
        .with_options(options.clone())
        .summarize(text)
}

/// Flatten an extracted document and summarize it.
pub fn summarize_document(
    doc: &Document,
    model: &dyn SummaryModel,
    options: &SummarizeOptions,
) -> Result<String> {
    summarize(&flatten(doc), model, options)
}
