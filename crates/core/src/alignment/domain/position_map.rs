use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use super::alignment_run::{AlignmentRun, RunKind};
use crate::manuscript::domain::manuscript::ManuscriptToken;
use crate::shared::char_range::CharRange;

/// What to do with the unpaired tail of a `Replace` run whose two sides
/// differ in length.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum UnevenReplacePolicy {
    /// Pair `min(len)` positions; extra words on either side stay unmapped.
    #[default]
    Truncate,
    /// Extra transcript words map to the run's last manuscript token, and the
    /// last paired transcript word's range is widened over extra manuscript
    /// tokens.
    Boundary,
}

/// Transcript word index -> manuscript byte range, for highlighting.
///
/// Built from `Equal` and `Replace` runs only. Not total: inserted words
/// (and, under `Truncate`, unpaired replacement words) have no entry.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PositionMap {
    entries: BTreeMap<usize, CharRange>,
}

impl PositionMap {
    pub fn build(
        runs: &[AlignmentRun],
        tokens: &[ManuscriptToken],
        policy: UnevenReplacePolicy,
    ) -> Self {
        let mut entries = BTreeMap::new();

        for run in runs {
            if !matches!(run.kind, RunKind::Equal | RunKind::Replace) {
                continue;
            }
            let (i1, i2) = (run.manuscript_range.start, run.manuscript_range.end);
            let (j1, j2) = (run.transcript_range.start, run.transcript_range.end);
            let paired = run.manuscript_len().min(run.transcript_len());

            for k in 0..paired {
                if let Some(token) = tokens.get(i1 + k) {
                    entries.insert(j1 + k, token.range());
                }
            }

            if policy != UnevenReplacePolicy::Boundary || run.kind != RunKind::Replace {
                continue;
            }
            let Some(last_token) = i2.checked_sub(1).and_then(|i| tokens.get(i)) else {
                continue;
            };
            if run.manuscript_len() > paired && paired > 0 {
                let last_paired = j1 + paired - 1;
                if let Some(range) = entries.get_mut(&last_paired) {
                    *range = range.span(&last_token.range());
                }
            }
            for j in (j1 + paired)..j2 {
                entries.insert(j, last_token.range());
            }
        }

        Self { entries }
    }

    pub fn get(&self, transcript_index: usize) -> Option<CharRange> {
        self.entries.get(&transcript_index).copied()
    }

    pub fn contains(&self, transcript_index: usize) -> bool {
        self.entries.contains_key(&transcript_index)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (usize, CharRange)> + '_ {
        self.entries.iter().map(|(&j, &r)| (j, r))
    }

    /// First transcript index whose mapped range contains `offset`.
    pub fn transcript_index_at(&self, offset: usize) -> Option<usize> {
        self.entries
            .iter()
            .find(|(_, range)| range.contains(offset))
            .map(|(&j, _)| j)
    }
}
