//! Attrition counters for one pipeline run

use crate::app::models::RejectCode;
use std::collections::BTreeMap;

/// Counts of profiles leaving the pipeline at each stage
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PipelineStats {
    /// Identifiers handed to the pipeline
    pub candidates: usize,
    /// Files that produced a profile record
    pub loaded: usize,
    /// Files that could not be opened or were malformed
    pub load_failures: usize,
    /// Files without usable chlorophyll
    pub no_chlorophyll: usize,
    pub qc_passed: usize,
    pub post_interpolation_rejected: usize,
    /// Profiles appended to the dataset
    pub accepted: usize,
    qc_rejections: BTreeMap<RejectCode, usize>,
}

impl PipelineStats {
    /// Empty counters for a run over `candidates` identifiers
    pub fn new(candidates: usize) -> Self {
        Self {
            candidates,
            ..Self::default()
        }
    }

    pub fn record_rejection(&mut self, code: RejectCode) {
        *self.qc_rejections.entry(code).or_default() += 1;
    }

    /// Number of QC rejections with `code`
    pub fn rejections(&self, code: RejectCode) -> usize {
        self.qc_rejections.get(&code).copied().unwrap_or(0)
    }

    pub fn total_rejections(&self) -> usize {
        self.qc_rejections.values().sum()
    }

    /// Rejection counts for every code in evaluation order, zeros included
    pub fn rejection_breakdown(&self) -> Vec<(RejectCode, usize)> {
        RejectCode::ALL
            .into_iter()
            .map(|code| (code, self.rejections(code)))
            .collect()
    }

    /// Three-line attrition summary
    pub fn summary(&self) -> String {
        format!(
            "{} profiles loaded from {} files ({} failed, {} without CHLA)\n\
             {} profiles passed quality control ({} rejected)\n\
             {} profiles passed interpolation checks ({} rejected)",
            self.loaded,
            self.candidates,
            self.load_failures,
            self.no_chlorophyll,
            self.qc_passed,
            self.total_rejections(),
            self.accepted,
            self.post_interpolation_rejected
        )
    }
}
