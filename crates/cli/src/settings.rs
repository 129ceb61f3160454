use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

use narration_review_core::alignment::domain::position_map::UnevenReplacePolicy;
use narration_review_core::manuscript::domain::sentence_context::SentenceBoundary;
use narration_review_core::pipeline::align_manuscript_use_case::AlignmentOptions;
use narration_review_core::shared::constants::{DEFAULT_REWIND_SECONDS, DEFAULT_TICK_INTERVAL_MS};

/// Persisted review preferences. Command-line flags override these per run.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ReviewSettings {
    #[serde(default)]
    pub min_confidence: f64,
    #[serde(default)]
    pub uneven_replace: UnevenReplacePolicy,
    #[serde(default)]
    pub sentence_boundary: SentenceBoundary,
    #[serde(default = "default_tick_interval_ms")]
    pub tick_interval_ms: u64,
    #[serde(default = "default_rewind_seconds")]
    pub rewind_seconds: f64,
}

fn default_tick_interval_ms() -> u64 {
    DEFAULT_TICK_INTERVAL_MS
}

fn default_rewind_seconds() -> f64 {
    DEFAULT_REWIND_SECONDS
}

impl Default for ReviewSettings {
    fn default() -> Self {
        Self {
            min_confidence: 0.0,
            uneven_replace: UnevenReplacePolicy::default(),
            sentence_boundary: SentenceBoundary::default(),
            tick_interval_ms: default_tick_interval_ms(),
            rewind_seconds: default_rewind_seconds(),
        }
    }
}

impl ReviewSettings {
    pub fn config_path() -> Option<PathBuf> {
        dirs::config_dir().map(|d| d.join("Narration Review").join("settings.json"))
    }

    pub fn load() -> Self {
        Self::config_path()
            .map(|path| Self::load_from(&path))
            .unwrap_or_default()
    }

    pub fn load_from(path: &Path) -> Self {
        fs::read_to_string(path)
            .ok()
            .and_then(|json| serde_json::from_str(&json).ok())
            .unwrap_or_default()
    }

    pub fn save(&self) -> std::io::Result<Option<PathBuf>> {
        match Self::config_path() {
            Some(path) => self.save_to(&path).map(|()| Some(path)),
            None => Ok(None),
        }
    }

    pub fn save_to(&self, path: &Path) -> std::io::Result<()> {
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)?;
        }
        let json = serde_json::to_string_pretty(self)?;
        fs::write(path, json)
    }

    pub fn alignment_options(&self) -> AlignmentOptions {
        AlignmentOptions {
            uneven_replace: self.uneven_replace,
            sentence_boundary: self.sentence_boundary,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_missing_file_gives_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let settings = ReviewSettings::load_from(&dir.path().join("absent.json"));
        assert_eq!(settings, ReviewSettings::default());
        assert_eq!(settings.tick_interval_ms, 100);
        assert_eq!(settings.rewind_seconds, 5.0);
    }

    #[test]
    fn test_save_then_load() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nested").join("settings.json");
        let settings = ReviewSettings {
            min_confidence: 0.5,
            uneven_replace: UnevenReplacePolicy::Boundary,
            sentence_boundary: SentenceBoundary::Paragraph,
            tick_interval_ms: 40,
            rewind_seconds: 2.5,
        };
        settings.save_to(&path).unwrap();
        assert_eq!(ReviewSettings::load_from(&path), settings);
    }

    #[test]
    fn test_partial_file_fills_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("settings.json");
        fs::write(&path, r#"{"uneven_replace": "boundary"}"#).unwrap();
        let settings = ReviewSettings::load_from(&path);
        assert_eq!(settings.uneven_replace, UnevenReplacePolicy::Boundary);
        assert_eq!(settings.sentence_boundary, SentenceBoundary::Punctuation);
        assert_eq!(settings.tick_interval_ms, 100);
    }

    #[test]
    fn test_corrupt_file_gives_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("settings.json");
        fs::write(&path, "{not json").unwrap();
        assert_eq!(ReviewSettings::load_from(&path), ReviewSettings::default());
    }
}
