use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::Path;

use crate::report::domain::report_writer::{ensure_parent_dir, DiscrepancyRow, ReportError, ReportWriter};

const HEADER: &str = "start_time,kind,manuscript_text,narrated_text,confidence,status,context";

/// Writes rows as comma-separated values with a header line.
///
/// Fields containing commas, quotes or line breaks are quoted, with inner
/// quotes doubled. A missing start time is written as an empty field.
#[derive(Debug, Default)]
pub struct CsvReportWriter;

impl CsvReportWriter {
    pub fn new() -> Self {
        Self
    }

    fn format_row(row: &DiscrepancyRow) -> String {
        let start = row.start_time.map(|t| format!("{t:.3}")).unwrap_or_default();
        [
            start,
            row.kind.label().to_string(),
            escape(&row.manuscript_text),
            escape(&row.narrated_text),
            format!("{:.4}", row.confidence),
            row.status.to_string(),
            escape(&row.context),
        ]
        .join(",")
    }
}

fn escape(field: &str) -> String {
    if field.contains([',', '"', '\n', '\r']) {
        format!("\"{}\"", field.replace('"', "\"\""))
    } else {
        field.to_string()
    }
}

impl ReportWriter for CsvReportWriter {
    fn write(&self, path: &Path, rows: &[DiscrepancyRow]) -> Result<(), ReportError> {
        ensure_parent_dir(path)?;
        let write_err = |e| ReportError::Write {
            path: path.to_path_buf(),
            source: e,
        };
        let mut out = BufWriter::new(File::create(path).map_err(write_err)?);
        writeln!(out, "{HEADER}").map_err(write_err)?;
        for row in rows {
            writeln!(out, "{}", Self::format_row(row)).map_err(write_err)?;
        }
        out.flush().map_err(write_err)?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::alignment::domain::discrepancy::{DiscrepancyKind, ReviewStatus};
    use rstest::rstest;

    fn row(context: &str) -> DiscrepancyRow {
        DiscrepancyRow {
            start_time: Some(0.1),
            kind: DiscrepancyKind::Replace,
            manuscript_text: "cat".to_string(),
            narrated_text: "mat".to_string(),
            confidence: 0.6,
            status: ReviewStatus::Unconfirmed,
            context: context.to_string(),
        }
    }

    #[rstest]
    #[case::plain("plain", "plain")]
    #[case::comma("a, b", "\"a, b\"")]
    #[case::quote("say \"hi\"", "\"say \"\"hi\"\"\"")]
    #[case::newline("one\ntwo", "\"one\ntwo\"")]
    fn test_escape(#[case] input: &str, #[case] expected: &str) {
        assert_eq!(escape(input), expected);
    }

    #[test]
    fn test_format_row() {
        assert_eq!(
            CsvReportWriter::format_row(&row("The cat sat.")),
            "0.100,Replace,cat,mat,0.6000,unconfirmed,The cat sat."
        );
    }

    #[test]
    fn test_missing_start_time_is_empty_field() {
        let mut r = row("x");
        r.start_time = None;
        assert!(CsvReportWriter::format_row(&r).starts_with(",Replace"));
    }

    #[test]
    fn test_writes_header_and_rows() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("report.csv");
        CsvReportWriter::new()
            .write(&path, &[row("Hello, world."), row("Bye.")])
            .unwrap();
        let text = std::fs::read_to_string(&path).unwrap();
        let lines: Vec<&str> = text.lines().collect();
        assert_eq!(lines.len(), 3);
        assert_eq!(lines[0], HEADER);
        assert!(lines[1].ends_with("\"Hello, world.\""));
    }
}
