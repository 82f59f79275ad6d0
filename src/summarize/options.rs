//! Summarization options.

use crate::error::{Error, Result};

/// Length policy for the bounded summarizer.
#[derive(Debug, Clone, PartialEq)]
pub struct SummarizeOptions {
    /// Minimum length of the final summary
    pub min_length: usize,

    /// Upper bound on the final summary length
    pub max_length_cap: usize,

    /// Per-chunk maximum length (further capped by `max_length_cap`)
    pub chunk_max_length: usize,

    /// Per-chunk minimum length
    pub chunk_min_length: usize,

    /// Direct summaries target this share of the input word count
    pub length_ratio: f64,
}

impl Default for SummarizeOptions {
    fn default() -> Self {
        Self {
            min_length: 50,
            max_length_cap: 500,
            chunk_max_length: 150,
            chunk_min_length: 50,
            length_ratio: 0.2,
        }
    }
}

impl SummarizeOptions {
    /// Create new summarize options with defaults.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the minimum summary length.
    pub fn with_min_length(mut self, min_length: usize) -> Self {
        self.min_length = min_length;
        self
    }

    /// Set the maximum summary length.
    pub fn with_max_length(mut self, max_length_cap: usize) -> Self {
        self.max_length_cap = max_length_cap;
        self
    }

    /// Set the per-chunk length bounds.
    pub fn with_chunk_lengths(mut self, min_length: usize, max_length: usize) -> Self {
        self.chunk_min_length = min_length;
        self.chunk_max_length = max_length;
        self
    }

    /// Set the direct-path length ratio.
    pub fn with_length_ratio(mut self, ratio: f64) -> Self {
        self.length_ratio = ratio;
        self
    }

    /// Check the options before any model call is made.
    ///
    /// `min_length` is not checked against the cap: a minimum of 0 is fine,
    /// and a minimum above the cap just means generation stops at the cap.
    pub fn validate(&self) -> Result<()> {
        if self.max_length_cap == 0 {
            return Err(Error::InvalidOptions(
                "max summary length must be positive".to_string(),
            ));
        }
        if self.chunk_max_length == 0 {
            return Err(Error::InvalidOptions(
                "chunk max length must be positive".to_string(),
            ));
        }
        if !self.length_ratio.is_finite() || self.length_ratio < 0.0 {
            return Err(Error::InvalidOptions(format!(
                "length ratio {} is not a non-negative number",
                self.length_ratio
            )));
        }
        Ok(())
    }
}
