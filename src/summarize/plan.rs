//! The generation calls a summary will take, decided before any are made.

use std::ops::Range;

use crate::error::{Error, Result};

use super::model::GenerationParams;
use super::options::SummarizeOptions;

/// How a text will be summarized.
#[derive(Debug, Clone, PartialEq)]
pub enum SummaryPlan {
    /// The text fits the budget: one call.
    Direct { params: GenerationParams },

    /// The text is split into token ranges, each summarized, then the joined
    /// chunk summaries are summarized once more.
    Chunked {
        chunks: Vec<Range<usize>>,
        chunk_params: GenerationParams,
        meta_params: GenerationParams,
    },
}

impl SummaryPlan {
    /// Plan for a text of `token_count` tokens and `word_count` words under a
    /// model that accepts `budget` tokens.
    pub fn build(
        token_count: usize,
        word_count: usize,
        budget: usize,
        options: &SummarizeOptions,
    ) -> Result<Self> {
        if budget == 0 {
            return Err(Error::InvalidOptions(
                "model input budget must be positive".to_string(),
            ));
        }

        if token_count <= budget {
            let target = (word_count as f64 * options.length_ratio).round() as usize;
            let max_length = options.max_length_cap.min(options.min_length.max(target));
            return Ok(SummaryPlan::Direct {
                params: GenerationParams::greedy(options.min_length, max_length),
            });
        }

        let chunks = (0..token_count)
            .step_by(budget)
            .map(|start| start..(start + budget).min(token_count))
            .collect();

        Ok(SummaryPlan::Chunked {
            chunks,
            chunk_params: GenerationParams::greedy(
                options.chunk_min_length,
                options.max_length_cap.min(options.chunk_max_length),
            ),
            meta_params: GenerationParams::greedy(options.min_length, options.max_length_cap),
        })
    }

    /// Total number of generation calls the plan makes.
    pub fn generation_calls(&self) -> usize {
        match self {
            SummaryPlan::Direct { .. } => 1,
            SummaryPlan::Chunked { chunks, .. } => chunks.len() + 1,
        }
    }

    /// Check if the text has to be chunked.
    pub fn is_chunked(&self) -> bool {
        matches!(self, SummaryPlan::Chunked { .. })
    }
}
