use thiserror::Error;

use crate::alignment::domain::alignment_run::AlignmentRun;
use crate::alignment::domain::discrepancy::{Discrepancy, ReviewStatus};
use crate::alignment::domain::position_map::PositionMap;
use crate::report::domain::report_writer::DiscrepancyRow;

#[derive(Error, Debug, PartialEq, Eq)]
pub enum ReviewError {
    #[error("no discrepancy at index {index} (have {len})")]
    UnknownDiscrepancy { index: usize, len: usize },
}

/// Output of one alignment pass over a manuscript/transcript pair.
///
/// Replaced wholesale whenever new files are loaded; only discrepancy
/// statuses change afterwards.
#[derive(Debug, Clone, Default)]
pub struct AlignmentResult {
    runs: Vec<AlignmentRun>,
    position_map: PositionMap,
    discrepancies: Vec<Discrepancy>,
}

impl AlignmentResult {
    pub fn new(runs: Vec<AlignmentRun>, position_map: PositionMap, discrepancies: Vec<Discrepancy>) -> Self {
        Self {
            runs,
            position_map,
            discrepancies,
        }
    }

    pub fn runs(&self) -> &[AlignmentRun] {
        &self.runs
    }

    pub fn position_map(&self) -> &PositionMap {
        &self.position_map
    }

    pub fn discrepancies(&self) -> &[Discrepancy] {
        &self.discrepancies
    }

    /// Discrepancies worth a reviewer's attention: not ignored and at least
    /// `min_confidence` confident. Yields `(index, discrepancy)` in order.
    pub fn review_queue(&self, min_confidence: f64) -> impl Iterator<Item = (usize, &Discrepancy)> + '_ {
        self.discrepancies
            .iter()
            .enumerate()
            .filter(move |(_, d)| !d.is_ignored() && d.confidence >= min_confidence)
    }

    pub fn set_status(&mut self, index: usize, status: ReviewStatus) -> Result<(), ReviewError> {
        let len = self.discrepancies.len();
        let d = self
            .discrepancies
            .get_mut(index)
            .ok_or(ReviewError::UnknownDiscrepancy { index, len })?;
        d.status = status;
        Ok(())
    }

    /// Export rows for the current review queue.
    pub fn report_rows(&self, min_confidence: f64) -> Vec<DiscrepancyRow> {
        self.review_queue(min_confidence)
            .map(|(_, d)| DiscrepancyRow::from(d))
            .collect()
    }
}
