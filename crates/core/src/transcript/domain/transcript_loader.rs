use std::path::Path;

use super::transcribed_word::TranscribedWord;

/// Domain interface for loading a time-stamped transcription.
///
/// Implementations guarantee `start_time <= end_time` per word and
/// non-decreasing `start_time` across the sequence.
pub trait TranscriptLoader {
    fn load(&self, path: &Path) -> Result<Vec<TranscribedWord>, Box<dyn std::error::Error>>;
}
