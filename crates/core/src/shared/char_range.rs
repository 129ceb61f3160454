use serde::{Deserialize, Serialize};

/// Half-open `[start, end)` byte range into the manuscript text.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct CharRange {
    pub start: usize,
    pub end: usize,
}

impl CharRange {
    pub fn new(start: usize, end: usize) -> Self {
        Self { start, end }
    }

    pub fn len(&self) -> usize {
        self.end.saturating_sub(self.start)
    }

    pub fn is_empty(&self) -> bool {
        self.end <= self.start
    }

    pub fn contains(&self, offset: usize) -> bool {
        self.start <= offset && offset < self.end
    }

    /// Smallest range covering both `self` and `other`.
    pub fn span(&self, other: &CharRange) -> CharRange {
        CharRange {
            start: self.start.min(other.start),
            end: self.end.max(other.end),
        }
    }

    /// Slices `text`, returning `None` when the range is out of bounds or
    /// does not fall on UTF-8 boundaries.
    pub fn slice<'a>(&self, text: &'a str) -> Option<&'a str> {
        text.get(self.start..self.end)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[test]
    fn test_len_and_empty() {
        let r = CharRange::new(4, 9);
        assert_eq!(r.len(), 5);
        assert!(!r.is_empty());
        assert!(CharRange::new(3, 3).is_empty());
    }

    #[rstest]
    #[case::start_inclusive(4, true)]
    #[case::inside(6, true)]
    #[case::end_exclusive(9, false)]
    #[case::before(3, false)]
    fn test_contains(#[case] offset: usize, #[case] expected: bool) {
        assert_eq!(CharRange::new(4, 9).contains(offset), expected);
    }

    #[test]
    fn test_span_covers_both() {
        let a = CharRange::new(4, 7);
        let b = CharRange::new(10, 15);
        assert_eq!(a.span(&b), CharRange::new(4, 15));
        assert_eq!(b.span(&a), CharRange::new(4, 15));
    }

    #[test]
    fn test_slice_in_bounds() {
        let text = "the cat sat";
        assert_eq!(CharRange::new(4, 7).slice(text), Some("cat"));
    }

    #[test]
    fn test_slice_out_of_bounds_is_none() {
        assert_eq!(CharRange::new(4, 70).slice("short"), None);
    }
}
