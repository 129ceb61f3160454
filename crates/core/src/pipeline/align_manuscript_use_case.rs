use std::path::Path;
use std::time::Instant;

use super::alignment_result::AlignmentResult;
use super::pipeline_logger::PipelineLogger;
use crate::alignment::domain::alignment_run::{AlignmentError, AlignmentRun};
use crate::alignment::domain::discrepancy_builder::DiscrepancyBuilder;
use crate::alignment::domain::normalizer::normalize_all;
use crate::alignment::domain::position_map::{PositionMap, UnevenReplacePolicy};
use crate::alignment::domain::sequence_matcher::align;
use crate::manuscript::domain::manuscript::Manuscript;
use crate::manuscript::domain::manuscript_parser::ManuscriptParser;
use crate::manuscript::domain::sentence_context::{SentenceBoundary, SentenceContextResolver};
use crate::transcript::domain::transcribed_word::TranscribedWord;
use crate::transcript::domain::transcript_loader::TranscriptLoader;

/// Policies for the parts of the pass with more than one reasonable answer.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct AlignmentOptions {
    pub uneven_replace: UnevenReplacePolicy,
    pub sentence_boundary: SentenceBoundary,
}

/// A loaded manuscript/transcript pair together with its alignment.
#[derive(Debug, Clone)]
pub struct AlignedDocument {
    pub manuscript: Manuscript,
    pub words: Vec<TranscribedWord>,
    pub result: AlignmentResult,
}

/// Runs the batch pass: normalize, align, then derive the position map and
/// discrepancy list.
///
/// Fails only if the alignment does not partition both inputs; everything
/// after that point is total.
pub fn run_alignment(
    manuscript: &Manuscript,
    words: &[TranscribedWord],
    options: AlignmentOptions,
    logger: &mut dyn PipelineLogger,
) -> Result<AlignmentResult, AlignmentError> {
    let tokens = manuscript.tokens();
    logger.metric("manuscript_words", tokens.len() as f64);
    logger.metric("transcript_words", words.len() as f64);

    let t = Instant::now();
    let written = normalize_all(tokens.iter().map(|t| t.word.as_str()));
    let narrated = normalize_all(words.iter().map(|w| w.word.as_str()));
    logger.timing("normalize", elapsed_ms(t));

    let t = Instant::now();
    let runs = align(&written, &narrated);
    logger.timing("align", elapsed_ms(t));
    AlignmentRun::validate_partition(&runs, tokens.len(), words.len())?;
    logger.metric("runs", runs.len() as f64);

    let t = Instant::now();
    let position_map = PositionMap::build(&runs, tokens, options.uneven_replace);
    logger.timing("position_map", elapsed_ms(t));
    logger.metric("mapped_words", position_map.len() as f64);
    logger.info(&format!(
        "Mapped {} of {} transcribed words to the manuscript",
        position_map.len(),
        words.len()
    ));

    let t = Instant::now();
    let resolver = SentenceContextResolver::new(options.sentence_boundary);
    let discrepancies = DiscrepancyBuilder::new(tokens, words, manuscript.text(), resolver).build(&runs);
    logger.timing("discrepancies", elapsed_ms(t));
    logger.metric("discrepancies", discrepancies.len() as f64);
    logger.info(&format!(
        "Found {} potential discrepancies",
        discrepancies.len()
    ));

    Ok(AlignmentResult::new(runs, position_map, discrepancies))
}

fn elapsed_ms(start: Instant) -> f64 {
    start.elapsed().as_secs_f64() * 1000.0
}

/// Loads a manuscript and its transcript, then aligns them.
pub struct AlignManuscriptUseCase {
    parser: Box<dyn ManuscriptParser>,
    loader: Box<dyn TranscriptLoader>,
    options: AlignmentOptions,
    logger: Box<dyn PipelineLogger>,
}

impl AlignManuscriptUseCase {
    pub fn new(
        parser: Box<dyn ManuscriptParser>,
        loader: Box<dyn TranscriptLoader>,
        options: AlignmentOptions,
        logger: Box<dyn PipelineLogger>,
    ) -> Self {
        Self {
            parser,
            loader,
            options,
            logger,
        }
    }

    pub fn execute(
        &mut self,
        manuscript_path: &Path,
        transcript_path: &Path,
    ) -> Result<AlignedDocument, Box<dyn std::error::Error>> {
        // 1. Parse the manuscript into tokens with offsets
        let manuscript = self.parser.parse(manuscript_path)?;

        // 2. Load the timestamped words
        let words = self.loader.load(transcript_path)?;

        // 3. Align and derive map + discrepancies
        let result = run_alignment(&manuscript, &words, self.options, self.logger.as_mut())?;
        self.logger.summary();

        Ok(AlignedDocument {
            manuscript,
            words,
            result,
        })
    }
}
