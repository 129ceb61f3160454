use std::fmt;
use std::ops::Range;

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Classification of one alignment run.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RunKind {
    Equal,
    Replace,
    Delete,
    Insert,
}

impl fmt::Display for RunKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RunKind::Equal => write!(f, "equal"),
            RunKind::Replace => write!(f, "replace"),
            RunKind::Delete => write!(f, "delete"),
            RunKind::Insert => write!(f, "insert"),
        }
    }
}

/// A contiguous classified pair of index ranges: `manuscript[i1..i2]`
/// against `transcript[j1..j2]`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AlignmentRun {
    pub kind: RunKind,
    pub manuscript_range: Range<usize>,
    pub transcript_range: Range<usize>,
}

#[derive(Error, Debug, PartialEq, Eq)]
pub enum AlignmentError {
    #[error("run {index} starts at manuscript {found}, expected {expected}")]
    ManuscriptGap {
        index: usize,
        expected: usize,
        found: usize,
    },
    #[error("run {index} starts at transcript {found}, expected {expected}")]
    TranscriptGap {
        index: usize,
        expected: usize,
        found: usize,
    },
    #[error("run {index} ({kind}) has ranges inconsistent with its kind")]
    KindMismatch { index: usize, kind: RunKind },
    #[error("runs cover manuscript [0, {covered}) but manuscript has {len} tokens")]
    ManuscriptCoverage { covered: usize, len: usize },
    #[error("runs cover transcript [0, {covered}) but transcript has {len} words")]
    TranscriptCoverage { covered: usize, len: usize },
}

impl AlignmentRun {
    pub fn new(kind: RunKind, manuscript_range: Range<usize>, transcript_range: Range<usize>) -> Self {
        Self {
            kind,
            manuscript_range,
            transcript_range,
        }
    }

    pub fn manuscript_len(&self) -> usize {
        self.manuscript_range.len()
    }

    pub fn transcript_len(&self) -> usize {
        self.transcript_range.len()
    }

    /// Whether the ranges' shape agrees with the run's kind.
    pub fn is_well_formed(&self) -> bool {
        let (m, t) = (self.manuscript_len(), self.transcript_len());
        match self.kind {
            RunKind::Equal => m == t && m > 0,
            RunKind::Replace => m > 0 && t > 0,
            RunKind::Delete => m > 0 && t == 0,
            RunKind::Insert => m == 0 && t > 0,
        }
    }

    /// Checks that `runs` partition `[0, manuscript_len)` and
    /// `[0, transcript_len)` contiguously, in order, with well-formed kinds.
    pub fn validate_partition(
        runs: &[AlignmentRun],
        manuscript_len: usize,
        transcript_len: usize,
    ) -> Result<(), AlignmentError> {
        let (mut i, mut j) = (0, 0);
        for (index, run) in runs.iter().enumerate() {
            if run.manuscript_range.start != i {
                return Err(AlignmentError::ManuscriptGap {
                    index,
                    expected: i,
                    found: run.manuscript_range.start,
                });
            }
            if run.transcript_range.start != j {
                return Err(AlignmentError::TranscriptGap {
                    index,
                    expected: j,
                    found: run.transcript_range.start,
                });
            }
            if run.manuscript_range.end < i
                || run.transcript_range.end < j
                || !run.is_well_formed()
            {
                return Err(AlignmentError::KindMismatch {
                    index,
                    kind: run.kind,
                });
            }
            i = run.manuscript_range.end;
            j = run.transcript_range.end;
        }
        if i != manuscript_len {
            return Err(AlignmentError::ManuscriptCoverage {
                covered: i,
                len: manuscript_len,
            });
        }
        if j != transcript_len {
            return Err(AlignmentError::TranscriptCoverage {
                covered: j,
                len: transcript_len,
            });
        }
        Ok(())
    }
}
