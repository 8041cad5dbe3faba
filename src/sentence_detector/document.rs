// WHY: plaintext layout carries structure: blank lines separate paragraphs and
// all-uppercase lines are headings, which never count as summary sentences

use super::SentenceDetector;
use crate::error::SummarizeError;

/// A sentence or heading of a parsed document
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DocumentSentence {
    pub text: String,
    pub is_heading: bool,
}

/// Consecutive non-blank lines of a document
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Paragraph {
    items: Vec<DocumentSentence>,
}

impl Paragraph {
    /// Headings and sentences in document order
    pub fn items(&self) -> &[DocumentSentence] {
        &self.items
    }

    /// Non-heading sentences in document order
    pub fn sentences(&self) -> impl Iterator<Item = &str> {
        self.items
            .iter()
            .filter(|item| !item.is_heading)
            .map(|item| item.text.as_str())
    }

    pub fn headings(&self) -> impl Iterator<Item = &str> {
        self.items
            .iter()
            .filter(|item| item.is_heading)
            .map(|item| item.text.as_str())
    }
}

/// Ordered sentences of one input text, built per summarization call
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SentenceDocument {
    paragraphs: Vec<Paragraph>,
}

impl SentenceDocument {
    pub fn paragraphs(&self) -> &[Paragraph] {
        &self.paragraphs
    }

    /// All non-heading sentences in document order
    pub fn sentences(&self) -> impl Iterator<Item = &str> {
        self.paragraphs.iter().flat_map(Paragraph::sentences)
    }

    pub fn sentence_count(&self) -> usize {
        self.sentences().count()
    }

    pub fn is_empty(&self) -> bool {
        self.sentences().next().is_none()
    }
}

/// Heading test: at least one cased letter and no lowercase letters
pub fn is_heading(line: &str) -> bool {
    line.chars().any(char::is_uppercase) && !line.chars().any(char::is_lowercase)
}

pub(super) fn parse(text: &str, detector: &SentenceDetector) -> Result<SentenceDocument, SummarizeError> {
    let mut paragraphs = Vec::new();
    let mut builder = ParagraphBuilder::default();

    for line in text.lines() {
        let line = line.trim();

        if line.is_empty() {
            if let Some(paragraph) = builder.finish(detector)? {
                paragraphs.push(paragraph);
            }
        } else if is_heading(line) {
            builder.flush_text(detector)?;
            builder.items.push(DocumentSentence {
                text: line.to_string(),
                is_heading: true,
            });
        } else {
            if !builder.pending_text.is_empty() {
                builder.pending_text.push(' ');
            }
            builder.pending_text.push_str(line);
        }
    }

    if let Some(paragraph) = builder.finish(detector)? {
        paragraphs.push(paragraph);
    }

    Ok(SentenceDocument { paragraphs })
}

#[derive(Default)]
struct ParagraphBuilder {
    items: Vec<DocumentSentence>,
    pending_text: String,
}

impl ParagraphBuilder {
    /// Segment the lines collected since the last heading; sentences keep
    /// their inner whitespace, only the line joins are single spaces
    fn flush_text(&mut self, detector: &SentenceDetector) -> Result<(), SummarizeError> {
        if self.pending_text.is_empty() {
            return Ok(());
        }

        for sentence in detector.detect_sentences(&self.pending_text)? {
            self.items.push(DocumentSentence {
                text: sentence.raw().trim().to_string(),
                is_heading: false,
            });
        }
        self.pending_text.clear();
        Ok(())
    }

    fn finish(&mut self, detector: &SentenceDetector) -> Result<Option<Paragraph>, SummarizeError> {
        self.flush_text(detector)?;
        if self.items.is_empty() {
            return Ok(None);
        }
        Ok(Some(Paragraph {
            items: std::mem::take(&mut self.items),
        }))
    }
}
