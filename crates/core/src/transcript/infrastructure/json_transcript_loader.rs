use std::fs;
use std::path::{Path, PathBuf};

use serde::Deserialize;
use thiserror::Error;

use crate::shared::constants::MISSING_PROBABILITY;
use crate::transcript::domain::transcribed_word::TranscribedWord;
use crate::transcript::domain::transcript_loader::TranscriptLoader;

#[derive(Error, Debug)]
pub enum TranscriptLoadError {
    #[error("failed to read transcript {path}: {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("invalid transcript JSON: {0}")]
    Parse(#[source] serde_json::Error),
    #[error("word {index} ends before it starts ({start}s > {end}s)")]
    InvertedWord { index: usize, start: f64, end: f64 },
    #[error("word {index} starts at {start}s, before previous word's start {previous}s")]
    OutOfOrder {
        index: usize,
        start: f64,
        previous: f64,
    },
}

#[derive(Deserialize)]
struct RawWord {
    word: String,
    start: f64,
    end: f64,
    #[serde(default)]
    probability: Option<f64>,
}

#[derive(Deserialize)]
struct RawSegment {
    #[serde(default)]
    words: Vec<RawWord>,
}

#[derive(Deserialize)]
#[serde(untagged)]
enum RawTranscript {
    Words(Vec<RawWord>),
    Segments { segments: Vec<RawSegment> },
}

/// Loads word timestamps from a JSON transcription.
///
/// Accepts either a flat array of `{word, start, end, probability}` objects
/// or a Whisper-style `{segments: [{words: [...]}]}` document.
#[derive(Debug, Default)]
pub struct JsonTranscriptLoader;

impl JsonTranscriptLoader {
    pub fn new() -> Self {
        Self
    }

    pub fn parse_str(json: &str) -> Result<Vec<TranscribedWord>, TranscriptLoadError> {
        let raw: RawTranscript = serde_json::from_str(json).map_err(TranscriptLoadError::Parse)?;
        let raw_words: Vec<RawWord> = match raw {
            RawTranscript::Words(words) => words,
            RawTranscript::Segments { segments } => {
                segments.into_iter().flat_map(|s| s.words).collect()
            }
        };

        let mut missing = 0usize;
        let mut words = Vec::with_capacity(raw_words.len());
        for (index, raw) in raw_words.into_iter().enumerate() {
            if raw.start > raw.end {
                return Err(TranscriptLoadError::InvertedWord {
                    index,
                    start: raw.start,
                    end: raw.end,
                });
            }
            if let Some(prev) = words.last().map(|w: &TranscribedWord| w.start_time) {
                if raw.start < prev {
                    return Err(TranscriptLoadError::OutOfOrder {
                        index,
                        start: raw.start,
                        previous: prev,
                    });
                }
            }
            let probability = match raw.probability {
                Some(p) if p.is_finite() => p.clamp(0.0, 1.0),
                _ => {
                    missing += 1;
                    MISSING_PROBABILITY
                }
            };
            words.push(TranscribedWord {
                word: raw.word.trim().to_string(),
                start_time: raw.start,
                end_time: raw.end,
                probability,
            });
        }

        if missing > 0 {
            log::warn!("{missing} transcript words had no usable probability; using {MISSING_PROBABILITY}");
        }
        Ok(words)
    }
}

impl TranscriptLoader for JsonTranscriptLoader {
    fn load(&self, path: &Path) -> Result<Vec<TranscribedWord>, Box<dyn std::error::Error>> {
        let json = fs::read_to_string(path).map_err(|e| TranscriptLoadError::Read {
            path: path.to_path_buf(),
            source: e,
        })?;
        let words = Self::parse_str(&json)?;
        log::info!(
            "Loaded {} transcribed words from {}",
            words.len(),
            path.display()
        );
        Ok(words)
    }
}
