//! Sanity check on resampled chlorophyll
//!
//! Catches interpolation artefacts the quality gate cannot see: missing grid
//! values, a residual deep signal after baseline removal, runaway
//! extrapolation and meaningfully negative concentrations.

use crate::config::{GridConfig, PostInterpolationConfig};

/// Reason a resampled column was rejected
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PostInterpolationFailure {
    MissingValue,
    DeepResidual,
    NonFinite,
    OutOfRange,
    Negative,
}

impl PostInterpolationFailure {
    pub fn as_str(&self) -> &'static str {
        match self {
            PostInterpolationFailure::MissingValue => "missing value",
            PostInterpolationFailure::DeepResidual => "deep residual",
            PostInterpolationFailure::NonFinite => "infinite value",
            PostInterpolationFailure::OutOfRange => "value out of range",
            PostInterpolationFailure::Negative => "negative value",
        }
    }
}

/// Post-interpolation gate bound to one depth grid
#[derive(Debug, Clone)]
pub struct PostInterpolationGate {
    limits: PostInterpolationConfig,
    reference_level: Option<usize>,
}

impl PostInterpolationGate {
    /// The reference level is the grid level nearest the configured depth;
    /// when the grid stops short of it only the deepest level is checked.
    pub fn new(limits: PostInterpolationConfig, grid: &GridConfig) -> Self {
        let reference_level = grid.level_index(limits.reference_depth_m);
        Self {
            limits,
            reference_level,
        }
    }

    pub fn reference_level(&self) -> Option<usize> {
        self.reference_level
    }

    /// Check a resampled chlorophyll column
    pub fn check(&self, column: &[f64]) -> Result<(), PostInterpolationFailure> {
        let limits = &self.limits;
        if column.is_empty() || column.iter().any(|v| v.is_nan()) {
            return Err(PostInterpolationFailure::MissingValue);
        }
        if column.iter().any(|v| v.is_infinite()) {
            return Err(PostInterpolationFailure::NonFinite);
        }

        let reference = self.reference_level.and_then(|i| column.get(i)).copied();
        let deepest = column.last().copied();
        if [reference, deepest]
            .into_iter()
            .flatten()
            .any(|v| v.abs() > limits.max_deep_residual)
        {
            return Err(PostInterpolationFailure::DeepResidual);
        }

        if column.iter().any(|v| v.abs() > limits.max_abs_value) {
            return Err(PostInterpolationFailure::OutOfRange);
        }
        if column.iter().any(|v| *v < limits.min_value) {
            return Err(PostInterpolationFailure::Negative);
        }
        Ok(())
    }
}
