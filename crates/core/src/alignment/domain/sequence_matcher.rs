use std::collections::HashMap;
use std::hash::Hash;

use super::alignment_run::{AlignmentRun, RunKind};

/// A maximal block where `a[a..a + size] == b[b..b + size]`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub struct MatchingBlock {
    pub a: usize,
    pub b: usize,
    pub size: usize,
}

/// Longest-matching-block sequence matcher over opaque tokens.
///
/// Finds the longest common contiguous block, recurses on both sides of it,
/// and classifies the gaps between blocks as `Replace`, `Delete` or `Insert`.
/// Every token of `b` is indexed: frequent tokens are never skipped as noise,
/// since prose repeats common words legitimately.
pub struct SequenceMatcher<'a, T> {
    a: &'a [T],
    b: &'a [T],
    b2j: HashMap<&'a T, Vec<usize>>,
}

impl<'a, T: Eq + Hash> SequenceMatcher<'a, T> {
    pub fn new(a: &'a [T], b: &'a [T]) -> Self {
        let mut b2j: HashMap<&'a T, Vec<usize>> = HashMap::new();
        for (j, item) in b.iter().enumerate() {
            b2j.entry(item).or_default().push(j);
        }
        Self { a, b, b2j }
    }

    /// Longest block in `a[alo..ahi]` x `b[blo..bhi]`.
    ///
    /// Ties go to the block starting earliest in `a`, then earliest in `b`.
    /// Returns a zero-sized block at `(alo, blo)` when nothing matches.
    pub fn find_longest_match(&self, alo: usize, ahi: usize, blo: usize, bhi: usize) -> MatchingBlock {
        let mut best = MatchingBlock {
            a: alo,
            b: blo,
            size: 0,
        };
        // j2len[j] = length of the match ending at a[i - 1], b[j]
        let mut j2len: HashMap<usize, usize> = HashMap::new();
        for i in alo..ahi {
            let mut next_j2len: HashMap<usize, usize> = HashMap::new();
            if let Some(positions) = self.b2j.get(&self.a[i]) {
                for &j in positions {
                    if j < blo {
                        continue;
                    }
                    if j >= bhi {
                        break;
                    }
                    let k = j
                        .checked_sub(1)
                        .and_then(|prev| j2len.get(&prev))
                        .copied()
                        .unwrap_or(0)
                        + 1;
                    next_j2len.insert(j, k);
                    if k > best.size {
                        best = MatchingBlock {
                            a: i + 1 - k,
                            b: j + 1 - k,
                            size: k,
                        };
                    }
                }
            }
            j2len = next_j2len;
        }
        best
    }

    /// All matching blocks in ascending order, adjacent blocks merged.
    /// Does not include a trailing sentinel.
    pub fn matching_blocks(&self) -> Vec<MatchingBlock> {
        let mut pending = vec![(0, self.a.len(), 0, self.b.len())];
        let mut blocks = Vec::new();
        while let Some((alo, ahi, blo, bhi)) = pending.pop() {
            let m = self.find_longest_match(alo, ahi, blo, bhi);
            if m.size == 0 {
                continue;
            }
            blocks.push(m);
            if alo < m.a && blo < m.b {
                pending.push((alo, m.a, blo, m.b));
            }
            if m.a + m.size < ahi && m.b + m.size < bhi {
                pending.push((m.a + m.size, ahi, m.b + m.size, bhi));
            }
        }
        blocks.sort_unstable();

        let mut merged: Vec<MatchingBlock> = Vec::with_capacity(blocks.len());
        for block in blocks {
            match merged.last_mut() {
                Some(last) if last.a + last.size == block.a && last.b + last.size == block.b => {
                    last.size += block.size;
                }
                _ => merged.push(block),
            }
        }
        merged
    }

    /// Runs that partition both sequences in order.
    ///
    /// When both sequences are non-empty but share no token at all, the
    /// result is one `Delete` of all of `a` followed by one `Insert` of all
    /// of `b`, never a `Replace`.
    pub fn runs(&self) -> Vec<AlignmentRun> {
        let (la, lb) = (self.a.len(), self.b.len());
        let blocks = self.matching_blocks();

        if blocks.is_empty() && la > 0 && lb > 0 {
            return vec![
                AlignmentRun::new(RunKind::Delete, 0..la, 0..0),
                AlignmentRun::new(RunKind::Insert, la..la, 0..lb),
            ];
        }

        let sentinel = MatchingBlock {
            a: la,
            b: lb,
            size: 0,
        };
        let mut runs = Vec::with_capacity(blocks.len() * 2 + 1);
        let (mut i, mut j) = (0, 0);
        for block in blocks.into_iter().chain(std::iter::once(sentinel)) {
            let kind = match (i < block.a, j < block.b) {
                (true, true) => Some(RunKind::Replace),
                (true, false) => Some(RunKind::Delete),
                (false, true) => Some(RunKind::Insert),
                (false, false) => None,
            };
            if let Some(kind) = kind {
                runs.push(AlignmentRun::new(kind, i..block.a, j..block.b));
            }
            i = block.a + block.size;
            j = block.b + block.size;
            if block.size > 0 {
                runs.push(AlignmentRun::new(RunKind::Equal, block.a..i, block.b..j));
            }
        }
        runs
    }
}

/// Aligns normalized manuscript words against normalized transcript words.
pub fn align(manuscript: &[String], transcript: &[String]) -> Vec<AlignmentRun> {
    let runs = SequenceMatcher::new(manuscript, transcript).runs();
    log::debug!(
        "Aligned {} manuscript words against {} transcript words: {} runs",
        manuscript.len(),
        transcript.len(),
        runs.len()
    );
    runs
}
