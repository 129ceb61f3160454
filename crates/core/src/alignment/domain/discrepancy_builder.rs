use super::alignment_run::AlignmentRun;
use super::discrepancy::{Discrepancy, DiscrepancyKind, ReviewStatus};
use crate::manuscript::domain::manuscript::ManuscriptToken;
use crate::manuscript::domain::sentence_context::SentenceContextResolver;
use crate::shared::constants::{DELETION_CONFIDENCE, MISSING_PROBABILITY};
use crate::transcript::domain::transcribed_word::TranscribedWord;

/// Turns the non-`Equal` alignment runs into discrepancy records.
pub struct DiscrepancyBuilder<'a> {
    tokens: &'a [ManuscriptToken],
    words: &'a [TranscribedWord],
    text: &'a str,
    resolver: SentenceContextResolver,
}

impl<'a> DiscrepancyBuilder<'a> {
    pub fn new(
        tokens: &'a [ManuscriptToken],
        words: &'a [TranscribedWord],
        text: &'a str,
        resolver: SentenceContextResolver,
    ) -> Self {
        Self {
            tokens,
            words,
            text,
            resolver,
        }
    }

    pub fn build(&self, runs: &[AlignmentRun]) -> Vec<Discrepancy> {
        runs.iter().filter_map(|run| self.discrepancy_for(run)).collect()
    }

    fn discrepancy_for(&self, run: &AlignmentRun) -> Option<Discrepancy> {
        let kind = DiscrepancyKind::from_run_kind(run.kind)?;
        let written = self
            .tokens
            .get(run.manuscript_range.clone())
            .unwrap_or_default();
        let narrated = self
            .words
            .get(run.transcript_range.clone())
            .unwrap_or_default();

        let anchor = match written.first() {
            Some(token) => Some(token.start),
            None => self.tokens.get(run.manuscript_range.start).map(|t| t.start),
        };

        Some(Discrepancy {
            kind,
            manuscript_text: join_words(written.iter().map(|t| t.word.as_str())),
            narrated_text: join_words(narrated.iter().map(|w| w.word.as_str())),
            start_time: self.start_time(run, narrated),
            confidence: mean_confidence(narrated),
            manuscript_range: run.manuscript_range.clone(),
            transcript_range: run.transcript_range.clone(),
            status: ReviewStatus::Unconfirmed,
            context_sentence: self.resolver.context_for(self.text, anchor),
        })
    }

    /// First narrated word's start; for a deletion, the end of the word
    /// narrated just before it.
    fn start_time(&self, run: &AlignmentRun, narrated: &[TranscribedWord]) -> Option<f64> {
        if let Some(first) = narrated.first() {
            return Some(first.start_time);
        }
        run.transcript_range
            .start
            .checked_sub(1)
            .and_then(|prev| self.words.get(prev))
            .map(|w| w.end_time)
    }
}

fn join_words<'w>(words: impl Iterator<Item = &'w str>) -> String {
    words.collect::<Vec<_>>().join(" ")
}

fn mean_confidence(narrated: &[TranscribedWord]) -> f64 {
    if narrated.is_empty() {
        return DELETION_CONFIDENCE;
    }
    let total: f64 = narrated
        .iter()
        .map(|w| {
            if w.probability.is_finite() {
                w.probability.clamp(0.0, 1.0)
            } else {
                MISSING_PROBABILITY
            }
        })
        .sum();
    total / narrated.len() as f64
}
