// WHY: English sentence boundary detection plus plaintext document parsing
// feeds the extractive summarizer with an ordered list of sentences

use tracing::debug;

use crate::error::SummarizeError;

pub mod abbreviations;
pub mod boundary;
pub mod document;

pub use abbreviations::AbbreviationChecker;
pub use document::{DocumentSentence, Paragraph, SentenceDocument};

/// Position in the source text using 1-based line and column indexing
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Span {
    pub start_line: usize,
    pub start_col: usize,
    pub end_line: usize,
    pub end_col: usize,
}

/// Configuration for sentence boundary detection rules
#[derive(Debug, Clone)]
pub struct SentenceBoundaryRules {
    /// End punctuation characters that can terminate a sentence
    pub end_punctuation: Vec<char>,
    /// Closing characters that stay attached to the sentence they end
    pub closing_punctuation: Vec<char>,
    /// Characters considered opening quotes
    pub opening_quotes: Vec<char>,
    /// Characters considered opening parentheticals
    pub opening_parentheticals: Vec<char>,
}

impl SentenceBoundaryRules {
    /// Rules for English prose
    pub fn english() -> Self {
        Self {
            end_punctuation: vec!['.', '?', '!'],
            closing_punctuation: vec!['"', '\'', '\u{201D}', '\u{2019}', ')', ']'],
            opening_quotes: vec!['"', '\'', '\u{201C}', '\u{2018}'],
            opening_parentheticals: vec!['(', '['],
        }
    }
}

impl Default for SentenceBoundaryRules {
    fn default() -> Self {
        Self::english()
    }
}

/// A sentence borrowed from the source text
#[derive(Debug, Clone)]
pub struct DetectedSentence<'a> {
    pub index: usize,
    pub raw_content: &'a str,
    pub span: Span,
}

impl<'a> DetectedSentence<'a> {
    /// Get raw content without normalization
    pub fn raw(&self) -> &'a str {
        self.raw_content
    }

    /// Content with interior line breaks and whitespace runs collapsed
    pub fn normalize(&self) -> String {
        normalize_sentence(self.raw_content)
    }
}

/// Collapse every whitespace run into a single space and trim both ends
pub fn normalize_sentence(text: &str) -> String {
    let mut result = String::with_capacity(text.len());
    for word in text.split_whitespace() {
        if !result.is_empty() {
            result.push(' ');
        }
        result.push_str(word);
    }
    result
}

/// Sentence detector for English text
pub struct SentenceDetector {
    rules: SentenceBoundaryRules,
    abbreviations: AbbreviationChecker,
}

impl SentenceDetector {
    /// Create new sentence detector with custom rules
    pub fn new(rules: SentenceBoundaryRules) -> Self {
        Self {
            rules,
            abbreviations: AbbreviationChecker::new(),
        }
    }

    /// Create sentence detector with English rules
    pub fn english() -> Self {
        Self::new(SentenceBoundaryRules::english())
    }

    /// Detect sentences borrowing from the input text
    pub fn detect_sentences<'a>(
        &self,
        text: &'a str,
    ) -> Result<Vec<DetectedSentence<'a>>, SummarizeError> {
        boundary::detect_sentences(text, &self.rules, &self.abbreviations)
    }

    /// Detect and normalize sentences
    pub fn detect_sentences_normalized(&self, text: &str) -> Result<Vec<String>, SummarizeError> {
        let sentences = self.detect_sentences(text)?;
        Ok(sentences.iter().map(DetectedSentence::normalize).collect())
    }

    /// Parse plaintext into paragraphs of headings and sentences
    pub fn parse_document(&self, text: &str) -> Result<SentenceDocument, SummarizeError> {
        let document = document::parse(text, self)?;
        debug!(
            paragraphs = document.paragraphs().len(),
            sentences = document.sentence_count(),
            "Parsed plaintext document"
        );
        Ok(document)
    }
}

impl Default for SentenceDetector {
    fn default() -> Self {
        Self::english()
    }
}
