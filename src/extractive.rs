//! Extractive summarization: pick the most salient sentences of the input and
//! emit them verbatim, in the order they appear in the document.

use tracing::{debug, info};

use crate::error::SummarizeError;
use crate::lsa::{LsaConfig, LsaRanker};
use crate::sentence_detector::SentenceDetector;

/// Number of sentences selected when the caller does not ask for a count
pub const DEFAULT_SENTENCE_COUNT: usize = 3;

/// Returned when the input holds no sentence to rank
pub const TOO_SHORT_MESSAGE: &str = "Text too short or improperly formatted for summarization.";

const ERROR_PREFIX: &str = "Error in extractive summarization";

/// Sentence-selecting summarizer built on LSA ranking
pub struct SentenceSummarizer {
    detector: SentenceDetector,
    ranker: LsaRanker,
}

impl SentenceSummarizer {
    pub fn new(config: LsaConfig) -> Result<Self, SummarizeError> {
        Ok(Self {
            detector: SentenceDetector::english(),
            ranker: LsaRanker::new(config)?,
        })
    }

    /// Summarize `text` into at most `target_sentence_count` of its sentences
    ///
    /// Never fails: faults come back as a message prefixed with
    /// "Error in extractive summarization".
    pub fn summarize(&self, text: &str, target_sentence_count: usize) -> String {
        match self.try_summarize(text, target_sentence_count) {
            Ok(Some(summary)) => summary,
            Ok(None) => TOO_SHORT_MESSAGE.to_string(),
            Err(e) => format!("{ERROR_PREFIX}: {e}"),
        }
    }

    /// Selected sentences joined by single spaces, or `None` when there is
    /// nothing to summarize
    pub fn try_summarize(
        &self,
        text: &str,
        target_sentence_count: usize,
    ) -> Result<Option<String>, SummarizeError> {
        let document = self.detector.parse_document(text)?;
        let sentences: Vec<&str> = document.sentences().collect();

        if sentences.is_empty() {
            debug!("Document has no sentences");
            return Ok(None);
        }

        let count = target_sentence_count.min(sentences.len());
        let selected = self.ranker.select(&sentences, count)?;
        if selected.is_empty() {
            return Ok(None);
        }

        info!(
            total_sentences = sentences.len(),
            selected = selected.len(),
            "Extractive summary ready"
        );

        let summary = selected
            .iter()
            .map(|&index| sentences[index])
            .collect::<Vec<_>>()
            .join(" ");
        Ok(Some(summary))
    }
}
