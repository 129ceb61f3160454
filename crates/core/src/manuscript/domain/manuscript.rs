use std::sync::LazyLock;

use regex::Regex;

use crate::shared::char_range::CharRange;

static WORD_PATTERN: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"\b\w+\b").expect("word pattern is a valid regex")
});

/// One word of the manuscript with its byte offsets into the full text.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ManuscriptToken {
    pub word: String,
    pub start: usize,
    pub end: usize,
}

impl ManuscriptToken {
    pub fn range(&self) -> CharRange {
        CharRange::new(self.start, self.end)
    }
}

/// Full manuscript text plus its word tokens in document order.
///
/// Token offsets are strictly increasing and never overlap; every token's
/// range slices back to its `word` in `text`.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Manuscript {
    text: String,
    tokens: Vec<ManuscriptToken>,
}

impl Manuscript {
    pub fn from_text(text: impl Into<String>) -> Self {
        let text = text.into();
        let tokens = tokenize(&text);
        Self { text, tokens }
    }

    pub fn text(&self) -> &str {
        &self.text
    }

    pub fn tokens(&self) -> &[ManuscriptToken] {
        &self.tokens
    }

    pub fn is_empty(&self) -> bool {
        self.tokens.is_empty()
    }

    /// Index of the token whose range contains `offset`, if any.
    pub fn token_at(&self, offset: usize) -> Option<usize> {
        let idx = self.tokens.partition_point(|t| t.end <= offset);
        self.tokens
            .get(idx)
            .filter(|t| t.start <= offset)
            .map(|_| idx)
    }
}

/// Splits `text` into word tokens (`\b\w+\b`, Unicode-aware).
pub fn tokenize(text: &str) -> Vec<ManuscriptToken> {
    WORD_PATTERN
        .find_iter(text)
        .map(|m| ManuscriptToken {
            word: m.as_str().to_string(),
            start: m.start(),
            end: m.end(),
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_tokenize_records_offsets() {
        let tokens = tokenize("The cat, sat.");
        let words: Vec<&str> = tokens.iter().map(|t| t.word.as_str()).collect();
        assert_eq!(words, vec!["The", "cat", "sat"]);
        assert_eq!((tokens[1].start, tokens[1].end), (4, 7));
        assert_eq!((tokens[2].start, tokens[2].end), (9, 12));
    }

    #[test]
    fn test_tokenize_splits_on_apostrophe() {
        let words: Vec<String> = tokenize("don't").into_iter().map(|t| t.word).collect();
        assert_eq!(words, vec!["don", "t"]);
    }

    #[test]
    fn test_tokenize_unicode_word_chars() {
        let text = "café naïve";
        let tokens = tokenize(text);
        assert_eq!(tokens.len(), 2);
        for t in &tokens {
            assert_eq!(&text[t.start..t.end], t.word);
        }
    }

    #[test]
    fn test_tokenize_empty_text() {
        assert!(tokenize("").is_empty());
        assert!(tokenize(" ... ").is_empty());
    }

    #[test]
    fn test_offsets_strictly_increasing() {
        let tokens = tokenize("one two  three\n\nfour");
        for pair in tokens.windows(2) {
            assert!(pair[0].end <= pair[1].start);
            assert!(pair[0].start < pair[1].start);
        }
    }

    #[test]
    fn test_token_at_finds_containing_token() {
        let m = Manuscript::from_text("the cat sat");
        assert_eq!(m.token_at(0), Some(0));
        assert_eq!(m.token_at(5), Some(1));
        assert_eq!(m.token_at(10), Some(2));
    }

    #[test]
    fn test_token_at_whitespace_is_none() {
        let m = Manuscript::from_text("the cat sat");
        assert_eq!(m.token_at(3), None);
        assert_eq!(m.token_at(100), None);
    }
}
