//! Chlorophyll-specific corrections applied after interpolation
//!
//! Deep red fluorescence from non-algal material shows up as a non-zero
//! chlorophyll floor. Outside the exclusion box the minimum of the deepest
//! grid levels is treated as that floor and removed. Extrapolation towards the
//! surface can then leave an infinite or negative shallowest value, which is
//! repaired from the values beneath it.

use crate::config::ResampleConfig;

/// Apply baseline removal and surface repair to an interpolated column
pub fn correct_chlorophyll(
    mut column: Vec<f64>,
    latitude: f64,
    longitude: f64,
    config: &ResampleConfig,
) -> Vec<f64> {
    if !config.exclusion_box.contains(latitude, longitude) {
        subtract_baseline(&mut column, config.baseline_levels);
    }
    repair_surface_infinity(&mut column);
    backfill_negative_surface(column)
}

/// Subtract the NaN-ignoring minimum of the deepest `levels` values
///
/// When every deep value is NaN the whole column becomes NaN.
pub fn subtract_baseline(column: &mut [f64], levels: usize) {
    let start = column.len().saturating_sub(levels);
    let baseline = column[start..]
        .iter()
        .copied()
        .filter(|v| !v.is_nan())
        .reduce(f64::min)
        .unwrap_or(f64::NAN);

    for value in column.iter_mut() {
        *value -= baseline;
    }
}

/// Replace an infinite shallowest value with its neighbour
pub fn repair_surface_infinity(column: &mut [f64]) {
    if column.len() > 1 && column[0].is_infinite() {
        column[0] = column[1];
    }
}

/// Fill negative near-surface values with the first non-negative value below
///
/// Applies only when the shallowest value is negative. A column with no
/// non-negative value is unusable and comes back as all NaN.
pub fn backfill_negative_surface(mut column: Vec<f64>) -> Vec<f64> {
    if !column.first().is_some_and(|v| *v < 0.0) {
        return column;
    }

    match column.iter().position(|v| *v >= 0.0) {
        Some(first_valid) => {
            let fill = column[first_valid];
            column[..first_valid].fill(fill);
            column
        }
        None => vec![f64::NAN; column.len()],
    }
}
