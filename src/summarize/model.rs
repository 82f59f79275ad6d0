//! The summarization capability the bounded summarizer drives.

use crate::error::Result;

/// Length targets for one generation call, in tokens.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct GenerationParams {
    /// End-of-sequence is not allowed before this many tokens
    pub min_length: usize,
    /// Generation stops after this many tokens
    pub max_length: usize,
    /// Sample from the distribution instead of taking the best token
    pub do_sample: bool,
}

impl GenerationParams {
    /// Deterministic decoding with the given bounds.
    pub fn greedy(min_length: usize, max_length: usize) -> Self {
        Self {
            min_length,
            max_length,
            do_sample: false,
        }
    }
}

/// A tokenizer plus a sequence-to-sequence summarization model.
///
/// Implementations may truncate over-long inputs inside [`generate`]; that is
/// not an error.
///
/// [`generate`]: SummaryModel::generate
pub trait SummaryModel: Send + Sync {
    /// Input budget in tokens.
    fn max_input_tokens(&self) -> usize;

    /// Tokenize text without truncation.
    fn encode(&self, text: &str) -> Result<Vec<u32>>;

    /// Turn tokens back into text, dropping special tokens.
    fn decode(&self, tokens: &[u32]) -> Result<String>;

    /// Summarize text within the given length bounds.
    fn generate(&self, text: &str, params: &GenerationParams) -> Result<String>;
}
