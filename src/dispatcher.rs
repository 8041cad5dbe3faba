//! Routes a summarization request to the extractive or abstractive backend.
//!
//! The dispatcher never fails: every backend fault has already been turned
//! into a message by the summarizer that raised it, so callers always receive
//! the original text and a non-empty summary string.

use std::sync::Arc;

use serde::{Deserialize, Serialize};
use tracing::{debug, info};

use crate::config::BrevityConfig;
use crate::error::SummarizeError;
use crate::extractive::{SentenceSummarizer, DEFAULT_SENTENCE_COUNT};
use crate::generative::{GenerativeSummarizer, TextGenerator};

/// Summarization strategy
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum SummaryMethod {
    Extractive,
    Abstractive,
}

impl SummaryMethod {
    pub const EXTRACTIVE_TAG: &'static str = "Extractive";
    pub const ABSTRACTIVE_TAG: &'static str = "Abstractive";

    /// Resolve a method tag from the frontend
    ///
    /// Only the exact, case-sensitive tag "Extractive" selects extraction.
    /// Every other value, including a missing or misspelled tag, falls back to
    /// the abstractive path rather than being rejected.
    pub fn from_tag(tag: Option<&str>) -> Self {
        match tag {
            Some(Self::EXTRACTIVE_TAG) => SummaryMethod::Extractive,
            _ => SummaryMethod::Abstractive,
        }
    }

    /// True when `tag` names one of the two methods exactly
    pub fn is_known_tag(tag: &str) -> bool {
        tag == Self::EXTRACTIVE_TAG || tag == Self::ABSTRACTIVE_TAG
    }

    pub fn tag(self) -> &'static str {
        match self {
            SummaryMethod::Extractive => Self::EXTRACTIVE_TAG,
            SummaryMethod::Abstractive => Self::ABSTRACTIVE_TAG,
        }
    }
}

/// One submission from the frontend
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SummarizationRequest {
    pub text: String,
    pub method: Option<String>,
}

/// Original text echoed next to the summary or a descriptive error message
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SummarizationResult {
    pub original_text: String,
    pub summary_text: String,
}

/// Entry point shared by every frontend
pub struct SummarizationDispatcher {
    extractive: SentenceSummarizer,
    abstractive: GenerativeSummarizer,
    sentence_count: usize,
}

impl SummarizationDispatcher {
    pub fn new(extractive: SentenceSummarizer, abstractive: GenerativeSummarizer) -> Self {
        Self {
            extractive,
            abstractive,
            sentence_count: DEFAULT_SENTENCE_COUNT,
        }
    }

    /// Build both summarizers from settings around an already loaded model
    pub fn from_config(
        config: &BrevityConfig,
        generator: Arc<dyn TextGenerator>,
    ) -> Result<Self, SummarizeError> {
        let extractive = SentenceSummarizer::new(config.lsa_config())?;
        let abstractive = GenerativeSummarizer::new(generator, config.generation_params());
        Ok(Self::new(extractive, abstractive).with_sentence_count(config.extractive.sentence_count))
    }

    /// Override the number of sentences an extractive summary keeps
    pub fn with_sentence_count(mut self, sentence_count: usize) -> Self {
        self.sentence_count = sentence_count;
        self
    }

    pub fn sentence_count(&self) -> usize {
        self.sentence_count
    }

    /// Summarize `text` with the method named by `method`
    pub fn summarize(&self, text: &str, method: Option<&str>) -> SummarizationResult {
        let resolved = SummaryMethod::from_tag(method);
        debug!(requested = ?method, resolved = resolved.tag(), "Resolved summarization method");

        let summary_text = match resolved {
            SummaryMethod::Extractive => self.extractive.summarize(text, self.sentence_count),
            SummaryMethod::Abstractive => self.abstractive.summarize(text),
        };

        info!(
            method = resolved.tag(),
            input_chars = text.len(),
            summary_chars = summary_text.len(),
            "Summarization complete"
        );

        SummarizationResult {
            original_text: text.to_string(),
            summary_text,
        }
    }

    pub fn summarize_request(&self, request: &SummarizationRequest) -> SummarizationResult {
        self.summarize(&request.text, request.method.as_deref())
    }
}
