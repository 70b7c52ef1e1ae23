//! Individual quality checks
//!
//! Each check returns `Some(verdict)` on rejection and `None` when the
//! profile passes it. "Valid" samples are those whose chlorophyll is not NaN.

use crate::app::models::{ProfileRecord, QcVerdict, RejectCode};
use crate::config::QualityThresholds;

/// Pressures at indices holding valid chlorophyll, in acquisition order
fn valid_pressures(record: &ProfileRecord, chlorophyll: &[f64]) -> Vec<f64> {
    chlorophyll
        .iter()
        .zip(&record.pressure)
        .filter(|(chla, _)| !chla.is_nan())
        .map(|(_, pres)| *pres)
        .collect()
}

/// NaN-ignoring minimum and maximum
fn nan_min_max(values: &[f64]) -> Option<(f64, f64)> {
    values
        .iter()
        .filter(|v| !v.is_nan())
        .fold(None, |acc, &v| match acc {
            None => Some((v, v)),
            Some((lo, hi)) => Some((lo.min(v), hi.max(v))),
        })
}

/// Latitude and longitude must both be defined
pub fn check_position(
    record: &ProfileRecord,
    _chlorophyll: &[f64],
    _thresholds: &QualityThresholds,
) -> Option<QcVerdict> {
    match record.position() {
        Some(_) => None,
        None => Some(QcVerdict::reject(
            RejectCode::NoPosition,
            "latitude or longitude missing",
        )),
    }
}

/// Valid samples must reach the deep layer and start near the surface
pub fn check_pressure_range(
    record: &ProfileRecord,
    chlorophyll: &[f64],
    thresholds: &QualityThresholds,
) -> Option<QcVerdict> {
    let pressures = valid_pressures(record, chlorophyll);
    let Some((min, max)) = nan_min_max(&pressures) else {
        return Some(QcVerdict::reject(
            RejectCode::BadPressureRange,
            "no valid chlorophyll samples",
        ));
    };

    if max < thresholds.min_max_pressure || min > thresholds.max_min_pressure {
        return Some(QcVerdict::reject(
            RejectCode::BadPressureRange,
            format!("valid samples span {:.1}-{:.1} dbar", min, max),
        ));
    }
    None
}

/// No gap wider than the limit between valid samples above the deep layer
///
/// Only samples before the first valid pressure at or beyond the deep layer
/// boundary are examined. A gap exactly equal to the limit passes.
pub fn check_pressure_gap(
    record: &ProfileRecord,
    chlorophyll: &[f64],
    thresholds: &QualityThresholds,
) -> Option<QcVerdict> {
    let pressures = valid_pressures(record, chlorophyll);
    let surface_end = pressures
        .iter()
        .position(|p| *p >= thresholds.deep_layer_pressure)
        .unwrap_or(pressures.len());

    pressures[..surface_end]
        .windows(2)
        .find(|pair| pair[1] - pair[0] > thresholds.max_pressure_gap)
        .map(|pair| {
            QcVerdict::reject(
                RejectCode::PressureGap,
                format!(
                    "{:.1} dbar gap between {:.1} and {:.1} dbar",
                    pair[1] - pair[0],
                    pair[0],
                    pair[1]
                ),
            )
        })
}

/// More than the minimum number of valid samples
pub fn check_point_count(
    _record: &ProfileRecord,
    chlorophyll: &[f64],
    thresholds: &QualityThresholds,
) -> Option<QcVerdict> {
    let valid = chlorophyll.iter().filter(|v| !v.is_nan()).count();
    if valid <= thresholds.min_valid_points {
        return Some(QcVerdict::reject(
            RejectCode::InsufficientPoints,
            format!("{} valid samples", valid),
        ));
    }
    None
}

/// Mean chlorophyll from the first sample deeper than the deep layer boundary
/// to the end of the profile must stay low
///
/// Profiles without a deep sample, or whose deep samples are all missing, pass.
pub fn check_deep_values(
    record: &ProfileRecord,
    chlorophyll: &[f64],
    thresholds: &QualityThresholds,
) -> Option<QcVerdict> {
    let deep_start = record
        .pressure
        .iter()
        .position(|p| *p > thresholds.deep_layer_pressure)?;

    let deep: Vec<f64> = chlorophyll
        .get(deep_start..)?
        .iter()
        .copied()
        .filter(|v| !v.is_nan())
        .collect();
    if deep.is_empty() {
        return None;
    }

    let mean = deep.iter().sum::<f64>() / deep.len() as f64;
    if mean > thresholds.max_deep_mean_chla {
        return Some(QcVerdict::reject(
            RejectCode::DeepValueAnomaly,
            format!("deep mean chlorophyll {:.3}", mean),
        ));
    }
    None
}

/// Missing plus negative samples must not come within the margin of the total
pub fn check_mostly_invalid(
    _record: &ProfileRecord,
    chlorophyll: &[f64],
    thresholds: &QualityThresholds,
) -> Option<QcVerdict> {
    let missing = chlorophyll.iter().filter(|v| v.is_nan()).count();
    let negative = chlorophyll.iter().filter(|v| **v < 0.0).count();
    let invalid = missing + negative;

    if invalid.abs_diff(chlorophyll.len()) <= thresholds.mostly_invalid_margin {
        return Some(QcVerdict::reject(
            RejectCode::MostlyInvalid,
            format!("{} of {} samples missing or negative", invalid, chlorophyll.len()),
        ));
    }
    None
}
