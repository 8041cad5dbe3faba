//! Latent semantic analysis sentence ranking
//!
//! Builds a term-sentence matrix from the words of each sentence, smooths each
//! column by its most frequent term, decomposes it and scores each sentence by
//! the length of its vector in the (optionally reduced) topic space.

use std::collections::{HashMap, HashSet};

use regex_automata::meta::Regex;
use tracing::{debug, warn};

use crate::error::SummarizeError;

pub mod svd;

/// Lower bound on the number of topic dimensions kept
pub const MIN_DIMENSIONS: usize = 3;

/// Weight given to any term present in a sentence before frequency scaling
const TERM_SMOOTHING: f64 = 0.4;

/// Letters with optional interior apostrophes or hyphens
const WORD_PATTERN: &str = r"\p{L}(?:[\p{L}'\u{2019}\-]*\p{L})?";

/// Ranking parameters
#[derive(Debug, Clone)]
pub struct LsaConfig {
    /// Fraction of singular values kept, in (0, 1]
    pub reduction_ratio: f64,
    /// Drop English stop words before building the dictionary
    pub use_stop_words: bool,
}

impl Default for LsaConfig {
    fn default() -> Self {
        Self {
            reduction_ratio: 1.0,
            use_stop_words: false,
        }
    }
}

/// Scores sentences by salience over the document's latent topics
pub struct LsaRanker {
    config: LsaConfig,
    word_pattern: Regex,
    stop_words: HashSet<String>,
}

impl LsaRanker {
    pub fn new(config: LsaConfig) -> Result<Self, SummarizeError> {
        let word_pattern = Regex::new(WORD_PATTERN)
            .map_err(|e| SummarizeError::Tokenizer(e.to_string()))?;

        let stop_words = if config.use_stop_words {
            stop_words::get(stop_words::LANGUAGE::English)
                .into_iter()
                .map(|word| word.to_lowercase())
                .collect()
        } else {
            HashSet::new()
        };

        Ok(Self {
            config,
            word_pattern,
            stop_words,
        })
    }

    /// Lowercased words of a sentence, in order
    pub fn words(&self, sentence: &str) -> Vec<String> {
        self.word_pattern
            .find_iter(sentence)
            .map(|m| sentence[m.range()].to_lowercase())
            .collect()
    }

    /// Salience score per sentence, or `None` when no sentence has a usable word
    pub fn rate_sentences(&self, sentences: &[&str]) -> Result<Option<Vec<f64>>, SummarizeError> {
        let sentence_words: Vec<Vec<String>> = sentences.iter().map(|s| self.words(s)).collect();

        let mut dictionary: HashMap<&str, usize> = HashMap::new();
        for word in sentence_words.iter().flatten() {
            if self.stop_words.contains(word) {
                continue;
            }
            let next_index = dictionary.len();
            dictionary.entry(word.as_str()).or_insert(next_index);
        }

        if dictionary.is_empty() {
            debug!("No rankable words in {} sentences", sentences.len());
            return Ok(None);
        }

        if dictionary.len() < sentences.len() {
            warn!(
                words = dictionary.len(),
                sentences = sentences.len(),
                "Fewer distinct words than sentences, ranking may be unreliable"
            );
        }

        let rows = dictionary.len();
        let columns: Vec<Vec<f64>> = sentence_words
            .iter()
            .map(|words| term_frequency_column(words, &dictionary, rows))
            .collect();

        let topics = rows.min(sentences.len());
        let dimensions = self.dimensions(topics);

        // Keeping every topic makes each score the norm of its column
        let ranks = if dimensions >= topics {
            columns.iter().map(|column| norm(column)).collect()
        } else {
            let decomposition = svd::decompose(columns, rows)?;
            topic_space_ranks(&decomposition, dimensions, sentences.len())
        };

        debug!(
            terms = rows,
            sentences = sentences.len(),
            topics,
            dimensions,
            "Ranked sentences"
        );
        Ok(Some(ranks))
    }

    /// Indices of the `count` best sentences, in document order
    ///
    /// Returns an empty list when nothing can be ranked.
    pub fn select(&self, sentences: &[&str], count: usize) -> Result<Vec<usize>, SummarizeError> {
        let Some(ranks) = self.rate_sentences(sentences)? else {
            return Ok(Vec::new());
        };

        let mut order: Vec<usize> = (0..ranks.len()).collect();
        // Stable sort keeps earlier sentences first among equal ranks
        order.sort_by(|&a, &b| ranks[b].total_cmp(&ranks[a]));
        order.truncate(count);
        order.sort_unstable();
        Ok(order)
    }

    /// Topic dimensions kept out of `topics`
    fn dimensions(&self, topics: usize) -> usize {
        let kept = (topics as f64 * self.config.reduction_ratio) as usize;
        MIN_DIMENSIONS.max(kept)
    }
}

/// Length of each sentence's vector in the first `dimensions` topics
fn topic_space_ranks(decomposition: &svd::ThinSvd, dimensions: usize, sentence_count: usize) -> Vec<f64> {
    let powered_sigma: Vec<f64> = decomposition
        .singular_values
        .iter()
        .take(dimensions)
        .map(|s| s * s)
        .collect();

    (0..sentence_count)
        .map(|j| {
            powered_sigma
                .iter()
                .zip(&decomposition.right_vectors)
                .map(|(s, vector)| s * vector[j] * vector[j])
                .sum::<f64>()
                .sqrt()
        })
        .collect()
}

fn norm(column: &[f64]) -> f64 {
    column.iter().map(|v| v * v).sum::<f64>().sqrt()
}

/// Occurrence counts of dictionary words in one sentence, scaled so the most
/// frequent term gets weight 1.0 and every other term at least the smoothing
fn term_frequency_column(words: &[String], dictionary: &HashMap<&str, usize>, rows: usize) -> Vec<f64> {
    let mut column = vec![0.0; rows];
    for word in words {
        if let Some(&row) = dictionary.get(word.as_str()) {
            column[row] += 1.0;
        }
    }

    let max_frequency = column.iter().copied().fold(0.0, f64::max);
    if max_frequency > 0.0 {
        for value in column.iter_mut() {
            *value = TERM_SMOOTHING + (1.0 - TERM_SMOOTHING) * *value / max_frequency;
        }
    }
    column
}
