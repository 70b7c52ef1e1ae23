//! Quality gate for loaded profiles
//!
//! A fixed sequence of independent checks run against the profile's resolved
//! chlorophyll. Evaluation stops at the first failing check, so every profile
//! receives exactly one verdict:
//!
//! 1. [`NoPosition`](crate::app::models::RejectCode::NoPosition) - latitude or longitude missing
//! 2. [`BadPressureRange`](crate::app::models::RejectCode::BadPressureRange) - valid samples do not
//!    span the near-surface to 200 dbar column
//! 3. [`PressureGap`](crate::app::models::RejectCode::PressureGap) - a near-surface gap wider than
//!    20 dbar
//! 4. [`InsufficientPoints`](crate::app::models::RejectCode::InsufficientPoints) - 10 or fewer
//!    valid samples
//! 5. [`DeepValueAnomaly`](crate::app::models::RejectCode::DeepValueAnomaly) - mean chlorophyll
//!    below 200 dbar above 0.3
//! 6. [`MostlyInvalid`](crate::app::models::RejectCode::MostlyInvalid) - almost every sample is
//!    missing or negative
//!
//! Rejection is a normal outcome, reported as a [`QcVerdict`], never an error.

pub mod checks;

#[cfg(test)]
pub mod tests;

use crate::app::models::{ProfileRecord, QcVerdict};
use crate::config::QualityThresholds;
use tracing::debug;

use self::checks::{
    check_deep_values, check_mostly_invalid, check_point_count, check_position,
    check_pressure_gap, check_pressure_range,
};

/// Signature shared by all gate checks; `Some` carries the rejection
pub type Check = fn(&ProfileRecord, &[f64], &QualityThresholds) -> Option<QcVerdict>;

/// Checks in evaluation order
pub const CHECKS: [Check; 6] = [
    check_position,
    check_pressure_range,
    check_pressure_gap,
    check_point_count,
    check_deep_values,
    check_mostly_invalid,
];

/// First-failure-wins quality gate
#[derive(Debug, Clone, Default)]
pub struct QualityGate {
    thresholds: QualityThresholds,
}

impl QualityGate {
    pub fn new(thresholds: QualityThresholds) -> Self {
        Self { thresholds }
    }

    /// Evaluate one profile
    pub fn evaluate(&self, record: &ProfileRecord) -> QcVerdict {
        let chlorophyll = record.chlorophyll().unwrap_or(&[]);
        let verdict = CHECKS
            .iter()
            .find_map(|check| check(record, chlorophyll, &self.thresholds))
            .unwrap_or(QcVerdict::Pass);

        debug!("QC {}: {}", record.label(), verdict);
        verdict
    }
}
