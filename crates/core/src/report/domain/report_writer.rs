use std::path::{Path, PathBuf};

use serde::Serialize;
use thiserror::Error;

use crate::alignment::domain::discrepancy::{Discrepancy, DiscrepancyKind, ReviewStatus};

#[derive(Error, Debug)]
pub enum ReportError {
    #[error("failed to create report directory {path}: {source}")]
    CreateDir {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("failed to write report {path}: {source}")]
    Write {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("failed to serialize report {path}: {source}")]
    Serialize {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },
}

/// One exported discrepancy, flattened for tabular output.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DiscrepancyRow {
    pub start_time: Option<f64>,
    pub kind: DiscrepancyKind,
    pub manuscript_text: String,
    pub narrated_text: String,
    pub confidence: f64,
    pub status: ReviewStatus,
    pub context: String,
}

impl From<&Discrepancy> for DiscrepancyRow {
    fn from(d: &Discrepancy) -> Self {
        Self {
            start_time: d.start_time,
            kind: d.kind,
            manuscript_text: d.manuscript_text.clone(),
            narrated_text: d.narrated_text.clone(),
            confidence: d.confidence,
            status: d.status,
            context: d.context_sentence.clone(),
        }
    }
}

/// Domain interface for exporting reviewed discrepancies.
pub trait ReportWriter {
    fn write(&self, path: &Path, rows: &[DiscrepancyRow]) -> Result<(), ReportError>;
}

pub(crate) fn ensure_parent_dir(path: &Path) -> Result<(), ReportError> {
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        std::fs::create_dir_all(parent).map_err(|e| ReportError::CreateDir {
            path: parent.to_path_buf(),
            source: e,
        })?;
    }
    Ok(())
}
