use std::fmt;
use std::ops::Range;

use serde::{Deserialize, Serialize};

use super::alignment_run::RunKind;

/// The three ways narration can disagree with the manuscript.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DiscrepancyKind {
    /// Narrated words differ from the written ones.
    Replace,
    /// Written words were never narrated.
    Delete,
    /// Narrated words do not appear in the manuscript.
    Insert,
}

impl DiscrepancyKind {
    /// `None` for `Equal` runs, which are not discrepancies.
    pub fn from_run_kind(kind: RunKind) -> Option<Self> {
        match kind {
            RunKind::Equal => None,
            RunKind::Replace => Some(Self::Replace),
            RunKind::Delete => Some(Self::Delete),
            RunKind::Insert => Some(Self::Insert),
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            Self::Replace => "Replace",
            Self::Delete => "Delete",
            Self::Insert => "Insert",
        }
    }
}

impl fmt::Display for DiscrepancyKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Reviewer verdict on a discrepancy.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ReviewStatus {
    #[default]
    Unconfirmed,
    Confirmed,
    Ignored,
}

impl fmt::Display for ReviewStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ReviewStatus::Unconfirmed => write!(f, "unconfirmed"),
            ReviewStatus::Confirmed => write!(f, "confirmed"),
            ReviewStatus::Ignored => write!(f, "ignored"),
        }
    }
}

/// A manuscript/narration disagreement surfaced for review.
///
/// Everything except `status` is fixed when the alignment runs.
#[derive(Debug, Clone, PartialEq)]
pub struct Discrepancy {
    pub kind: DiscrepancyKind,
    pub manuscript_text: String,
    pub narrated_text: String,
    /// Where to seek in the audio; `None` for a deletion before the first
    /// narrated word.
    pub start_time: Option<f64>,
    /// Mean recognizer probability over the narrated words, `1.0` for
    /// deletions.
    pub confidence: f64,
    pub manuscript_range: Range<usize>,
    pub transcript_range: Range<usize>,
    pub status: ReviewStatus,
    pub context_sentence: String,
}

impl Discrepancy {
    /// Multi-line description shown when hovering a discrepancy.
    pub fn summary(&self) -> String {
        format!(
            "Type: {}\nConfidence: {:.2}%\nManuscript: '{}'\nNarrated: '{}'",
            self.kind,
            self.confidence * 100.0,
            self.manuscript_text,
            self.narrated_text
        )
    }

    pub fn is_ignored(&self) -> bool {
        self.status == ReviewStatus::Ignored
    }
}
