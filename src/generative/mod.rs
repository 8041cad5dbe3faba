//! Abstractive summarization through a pretrained sequence-to-sequence model.
//!
//! The model itself lives behind [`TextGenerator`]; the production backend is
//! [`InferenceApiGenerator`], and tests substitute their own implementations.

use std::sync::Arc;

use serde::Serialize;
use tracing::{info, warn};

use crate::error::GenerationError;

pub mod inference_api;

pub use inference_api::{InferenceApiConfig, InferenceApiGenerator};

const ERROR_PREFIX: &str = "Error in abstractive summarization";

/// Bounds passed to the model for every generation
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct GenerationParams {
    /// Maximum summary length in model tokens
    pub max_length: usize,
    /// Minimum summary length in model tokens
    pub min_length: usize,
    /// Sample from the distribution instead of decoding greedily
    pub do_sample: bool,
}

impl Default for GenerationParams {
    fn default() -> Self {
        Self {
            max_length: 130,
            min_length: 30,
            do_sample: false,
        }
    }
}

/// A loaded summarization model
///
/// Implementations are shared read-only across calls and must not keep
/// per-call mutable state.
pub trait TextGenerator: Send + Sync {
    /// Generate a summary of `text` within `params`, returning only the text
    fn generate(&self, text: &str, params: &GenerationParams) -> Result<String, GenerationError>;

    /// Model identifier for logs
    fn model_name(&self) -> &str;
}

/// Summarizer producing newly generated text
pub struct GenerativeSummarizer {
    generator: Arc<dyn TextGenerator>,
    params: GenerationParams,
}

impl GenerativeSummarizer {
    pub fn new(generator: Arc<dyn TextGenerator>, params: GenerationParams) -> Self {
        Self { generator, params }
    }

    pub fn params(&self) -> &GenerationParams {
        &self.params
    }

    /// Summarize `text`; never fails, faults come back as a message prefixed
    /// with "Error in abstractive summarization"
    pub fn summarize(&self, text: &str) -> String {
        match self.try_summarize(text) {
            Ok(summary) => summary,
            Err(e) => {
                warn!(model = self.generator.model_name(), error = %e, "Abstractive summarization failed");
                format!("{ERROR_PREFIX}: {e}")
            }
        }
    }

    pub fn try_summarize(&self, text: &str) -> Result<String, GenerationError> {
        if text.trim().is_empty() {
            return Err(GenerationError::EmptyInput);
        }

        let summary = self.generator.generate(text, &self.params)?;
        let summary = summary.trim();
        if summary.is_empty() {
            return Err(GenerationError::EmptySummary);
        }

        info!(
            model = self.generator.model_name(),
            input_chars = text.len(),
            summary_chars = summary.len(),
            "Abstractive summary ready"
        );
        Ok(summary.to_string())
    }
}

/// Rough model-token estimate: each word and each punctuation mark is a piece
pub fn estimate_tokens(text: &str) -> usize {
    text.split_whitespace()
        .map(|word| {
            let punctuation = word.chars().filter(|c| c.is_ascii_punctuation()).count();
            let has_letters = word.chars().any(char::is_alphanumeric);
            punctuation + usize::from(has_letters)
        })
        .sum()
}
