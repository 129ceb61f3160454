use std::fs;
use std::path::{Path, PathBuf};

use thiserror::Error;

use crate::manuscript::domain::manuscript::Manuscript;
use crate::manuscript::domain::manuscript_parser::ManuscriptParser;
use crate::shared::constants::PARAGRAPH_SEPARATOR;

#[derive(Error, Debug)]
pub enum ManuscriptParseError {
    #[error("failed to read manuscript {path}: {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

/// Reads a UTF-8 text manuscript, one paragraph per non-blank line.
///
/// Paragraphs are trimmed and re-joined with a blank line between them so
/// the displayed text and token offsets agree regardless of the source's
/// line endings.
#[derive(Debug, Default)]
pub struct PlainTextParser;

impl PlainTextParser {
    pub fn new() -> Self {
        Self
    }

    pub fn normalize_paragraphs(raw: &str) -> String {
        raw.lines()
            .map(str::trim)
            .filter(|line| !line.is_empty())
            .collect::<Vec<_>>()
            .join(PARAGRAPH_SEPARATOR)
    }
}

impl ManuscriptParser for PlainTextParser {
    fn parse(&self, path: &Path) -> Result<Manuscript, Box<dyn std::error::Error>> {
        let raw = fs::read_to_string(path).map_err(|e| ManuscriptParseError::Read {
            path: path.to_path_buf(),
            source: e,
        })?;
        let manuscript = Manuscript::from_text(Self::normalize_paragraphs(&raw));
        log::info!(
            "Parsed {} word tokens from {}",
            manuscript.tokens().len(),
            path.display()
        );
        Ok(manuscript)
    }
}
