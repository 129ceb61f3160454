use serde::{Deserialize, Serialize};

use crate::shared::constants::{NO_CONTEXT, SENTENCE_TERMINATORS};

/// Where an enclosing sentence is allowed to start and end.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SentenceBoundary {
    /// Only `.`, `!` and `?` delimit sentences.
    #[default]
    Punctuation,
    /// Line breaks delimit sentences too, so context never spans paragraphs.
    Paragraph,
}

/// Extracts the sentence enclosing a byte offset of the manuscript.
#[derive(Debug, Clone, Copy, Default)]
pub struct SentenceContextResolver {
    boundary: SentenceBoundary,
}

impl SentenceContextResolver {
    pub fn new(boundary: SentenceBoundary) -> Self {
        Self { boundary }
    }

    /// Returns the trimmed sentence around `char_index`, terminator included.
    ///
    /// The start is one past the nearest terminator before `char_index`
    /// (or the document start). The end is the earliest terminator at or after
    /// `char_index` (or the document end). Empty text yields `"N/A"`.
    pub fn sentence_at(&self, text: &str, char_index: usize) -> String {
        if text.is_empty() {
            return NO_CONTEXT.to_string();
        }
        let index = floor_char_boundary(text, char_index.min(text.len()));

        let start = text[..index]
            .rfind(|c: char| self.starts_after(c))
            .map(|p| p + 1)
            .unwrap_or(0);

        let tail = &text[index..];
        let terminator_end = SENTENCE_TERMINATORS
            .iter()
            .filter_map(|t| tail.find(*t))
            .min()
            .map(|p| index + p + 1);
        let paragraph_end = match self.boundary {
            SentenceBoundary::Punctuation => None,
            SentenceBoundary::Paragraph => tail.find('\n').map(|p| index + p),
        };
        let end = [terminator_end, paragraph_end]
            .into_iter()
            .flatten()
            .min()
            .unwrap_or(text.len());

        text[start..end].trim().to_string()
    }

    /// Like [`sentence_at`](Self::sentence_at) but with an optional anchor;
    /// a missing anchor resolves to `"N/A"`.
    pub fn context_for(&self, text: &str, anchor: Option<usize>) -> String {
        match anchor {
            Some(offset) => self.sentence_at(text, offset),
            None => NO_CONTEXT.to_string(),
        }
    }

    fn starts_after(&self, c: char) -> bool {
        SENTENCE_TERMINATORS.contains(&c)
            || (self.boundary == SentenceBoundary::Paragraph && c == '\n')
    }
}

fn floor_char_boundary(text: &str, mut index: usize) -> usize {
    while index > 0 && !text.is_char_boundary(index) {
        index -= 1;
    }
    index
}
