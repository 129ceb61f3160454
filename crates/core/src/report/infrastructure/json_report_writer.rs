use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::Path;

use crate::report::domain::report_writer::{ensure_parent_dir, DiscrepancyRow, ReportError, ReportWriter};

/// Writes rows as a pretty-printed JSON array.
#[derive(Debug, Default)]
pub struct JsonReportWriter;

impl JsonReportWriter {
    pub fn new() -> Self {
        Self
    }
}

impl ReportWriter for JsonReportWriter {
    fn write(&self, path: &Path, rows: &[DiscrepancyRow]) -> Result<(), ReportError> {
        ensure_parent_dir(path)?;
        let write_err = |e| ReportError::Write {
            path: path.to_path_buf(),
            source: e,
        };
        let mut out = BufWriter::new(File::create(path).map_err(write_err)?);
        serde_json::to_writer_pretty(&mut out, rows).map_err(|e| ReportError::Serialize {
            path: path.to_path_buf(),
            source: e,
        })?;
        out.write_all(b"\n").map_err(write_err)?;
        out.flush().map_err(write_err)?;
        Ok(())
    }
}
