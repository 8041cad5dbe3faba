// WHY: a period after these words is part of the word, so it never ends a
// sentence even when a capitalized word follows

use std::collections::HashSet;

/// Titles that precede a proper noun, as in "Dr. Smith" or "Mrs. Jones"
pub const TITLE_ABBREVIATIONS: &[&str] = &[
    "Dr.", "Mr.", "Mrs.", "Ms.", "Prof.", "Sr.", "Jr.", "St.", "Mt.",
    "Gen.", "Gov.", "Sen.", "Rep.", "Rev.", "Capt.", "Lt.", "Col.", "Sgt.",
];

/// Abbreviations that sit inside a sentence rather than at its end
pub const INLINE_ABBREVIATIONS: &[&str] = &[
    "e.g.", "i.e.", "etc.", "vs.", "cf.", "approx.", "No.", "Fig.", "Vol.", "pp.",
];

/// Lookup for words whose trailing period is not a sentence boundary
pub struct AbbreviationChecker {
    abbreviations: HashSet<&'static str>,
}

impl AbbreviationChecker {
    pub fn new() -> Self {
        Self {
            abbreviations: TITLE_ABBREVIATIONS
                .iter()
                .chain(INLINE_ABBREVIATIONS.iter())
                .copied()
                .collect(),
        }
    }

    /// Check if a word is a known non-terminal abbreviation
    pub fn is_abbreviation(&self, word: &str) -> bool {
        self.abbreviations.contains(word)
    }

    /// Single capital letter followed by a period, as in "J. R. R. Tolkien"
    pub fn is_initial(word: &str) -> bool {
        let mut chars = word.chars();
        matches!(
            (chars.next(), chars.next(), chars.next()),
            (Some(letter), Some('.'), None) if letter.is_uppercase()
        )
    }

    /// Two or more letters each followed by a period, as in "U.S." or "a.m."
    pub fn is_dotted_initials(word: &str) -> bool {
        let chars: Vec<char> = word.chars().collect();
        chars.len() >= 4
            && chars.len() % 2 == 0
            && chars
                .chunks(2)
                .all(|pair| pair[0].is_alphabetic() && pair[1] == '.')
    }

    /// Check if text ends with a word whose period must not split the sentence
    pub fn ends_with_abbreviation(&self, text: &str) -> bool {
        match text.split_whitespace().last() {
            Some(last_word) => {
                let clean_word = last_word.trim_start_matches(|c: char| {
                    matches!(c, '"' | '\'' | '(' | '[' | '\u{201C}' | '\u{2018}')
                });
                self.is_abbreviation(clean_word)
                    || Self::is_initial(clean_word)
                    || Self::is_dotted_initials(clean_word)
            }
            None => false,
        }
    }
}

impl Default for AbbreviationChecker {
    fn default() -> Self {
        Self::new()
    }
}
