// WHY: single pass over the text; a boundary is end punctuation, optional
// closing quotes, whitespace, then something that can open a sentence

use tracing::debug;

use super::{AbbreviationChecker, DetectedSentence, SentenceBoundaryRules, Span};
use crate::error::SummarizeError;

/// Detect sentences with borrowed slices into `text`
pub fn detect_sentences<'a>(
    text: &'a str,
    rules: &SentenceBoundaryRules,
    abbreviations: &AbbreviationChecker,
) -> Result<Vec<DetectedSentence<'a>>, SummarizeError> {
    debug!("Starting sentence detection on {} bytes", text.len());

    let char_indices: Vec<(usize, char)> = text.char_indices().collect();
    let chars: Vec<char> = char_indices.iter().map(|(_, ch)| *ch).collect();

    let mut sentences = Vec::new();
    let mut line = 1;
    let mut col = 1;
    let mut last_line = 1;
    let mut last_col = 1;

    let mut start_idx = skip_whitespace(&chars, 0);
    let mut start_line = 1;
    let mut start_col = 1;

    for i in 0..chars.len() {
        let ch = chars[i];

        if i == start_idx {
            start_line = line;
            start_col = col;
        }

        if i >= start_idx {
            if let Some(end_idx) = boundary_end(&chars, i, rules) {
                let start_byte = char_indices[start_idx].0;
                let through_punct = slice(text, start_byte, byte_after(&char_indices, i, text.len()))?;

                // "Dr. Smith" and friends: the period belongs to the word
                let is_abbreviation = ch == '.' && abbreviations.ends_with_abbreviation(through_punct);

                if !is_abbreviation {
                    let end_byte = byte_after(&char_indices, end_idx, text.len());
                    let raw_content = slice(text, start_byte, end_byte)?;

                    sentences.push(DetectedSentence {
                        index: sentences.len(),
                        raw_content,
                        span: Span {
                            start_line,
                            start_col,
                            end_line: line,
                            end_col: col + (end_idx - i),
                        },
                    });

                    start_idx = skip_whitespace(&chars, end_idx + 1);
                }
            }
        }

        if !ch.is_whitespace() {
            last_line = line;
            last_col = col;
        }

        if ch == '\n' {
            line += 1;
            col = 1;
        } else {
            col += 1;
        }
    }

    // Remaining text is the final sentence
    if start_idx < chars.len() {
        let raw_content = slice(text, char_indices[start_idx].0, text.len())?.trim_end();

        if !raw_content.is_empty() {
            sentences.push(DetectedSentence {
                index: sentences.len(),
                raw_content,
                span: Span {
                    start_line,
                    start_col,
                    end_line: last_line,
                    end_col: last_col,
                },
            });
        }
    }

    debug!("Detected {} sentences", sentences.len());
    Ok(sentences)
}

/// Index of the last character belonging to a sentence that ends at `pos`,
/// or `None` when `pos` is not a boundary
fn boundary_end(chars: &[char], pos: usize, rules: &SentenceBoundaryRules) -> Option<usize> {
    if pos == 0 || !rules.end_punctuation.contains(&chars[pos]) {
        return None;
    }

    let mut next = pos + 1;
    while next < chars.len() && rules.closing_punctuation.contains(&chars[next]) {
        next += 1;
    }
    let end = next - 1;

    // Must have whitespace after the punctuation run
    if next >= chars.len() || !chars[next].is_whitespace() {
        return None;
    }

    next = skip_whitespace(chars, next);
    if next >= chars.len() {
        return None;
    }

    let opener = chars[next];
    let opens_sentence = opener.is_uppercase()
        || rules.opening_quotes.contains(&opener)
        || rules.opening_parentheticals.contains(&opener);

    opens_sentence.then_some(end)
}

fn skip_whitespace(chars: &[char], mut pos: usize) -> usize {
    while pos < chars.len() && chars[pos].is_whitespace() {
        pos += 1;
    }
    pos
}

fn byte_after(char_indices: &[(usize, char)], idx: usize, text_len: usize) -> usize {
    char_indices.get(idx + 1).map(|(byte, _)| *byte).unwrap_or(text_len)
}

fn slice(text: &str, start: usize, end: usize) -> Result<&str, SummarizeError> {
    text.get(start..end)
        .ok_or_else(|| SummarizeError::Segmentation(format!("invalid byte range {start}..{end}")))
}
