use std::path::Path;

use super::manuscript::Manuscript;

/// Domain interface for turning a manuscript document into tokenized text.
pub trait ManuscriptParser {
    fn parse(&self, path: &Path) -> Result<Manuscript, Box<dyn std::error::Error>>;
}
