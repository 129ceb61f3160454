use crate::shared::constants::NORMALIZE_STRIP_CHARS;

/// Canonical comparison form of a word: lower-cased, with surrounding
/// punctuation, quotes, brackets and spaces stripped. Inner characters
/// (hyphens, mid-word apostrophes) are kept.
pub fn normalize(word: &str) -> String {
    word.to_lowercase()
        .trim_matches(NORMALIZE_STRIP_CHARS)
        .to_string()
}

pub fn normalize_all<'a, I>(words: I) -> Vec<String>
where
    I: IntoIterator<Item = &'a str>,
{
    words.into_iter().map(normalize).collect()
}
