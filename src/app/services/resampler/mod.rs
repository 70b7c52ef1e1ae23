//! Resampling of quality-controlled profiles onto the fixed depth grid
//!
//! Every tracked variable is interpolated linearly in depth, with linear
//! extrapolation beyond the sampled range. Chlorophyll is median filtered
//! beforehand and corrected afterwards (see [`chlorophyll`]). Variables the
//! profile does not carry, or with fewer than two usable samples, become NaN
//! columns so every resampled profile has the same shape.

pub mod chlorophyll;
pub mod filters;
pub mod interpolation;

#[cfg(test)]
pub mod tests;

pub use chlorophyll::correct_chlorophyll;
pub use filters::median_filter;
pub use interpolation::interpolate_linear;

use crate::app::models::{ProfileRecord, ResampledProfile, Variable};
use crate::app::services::seawater::pressures_from_depths;
use crate::config::ResampleConfig;
use std::collections::BTreeMap;
use tracing::debug;

/// Resampler bound to one depth grid and parameter set
#[derive(Debug, Clone)]
pub struct Resampler {
    grid: Vec<f64>,
    config: ResampleConfig,
}

impl Resampler {
    pub fn new(grid: Vec<f64>, config: ResampleConfig) -> Self {
        Self { grid, config }
    }

    /// Grid depths in metres
    pub fn grid(&self) -> &[f64] {
        &self.grid
    }

    pub fn resample(&self, record: &ProfileRecord) -> ResampledProfile {
        resample_profile(record, &self.grid, &self.config)
    }
}

/// Resample one profile onto `grid`
pub fn resample_profile(
    record: &ProfileRecord,
    grid: &[f64],
    config: &ResampleConfig,
) -> ResampledProfile {
    let (latitude, longitude) = record.position().unwrap_or((f64::NAN, f64::NAN));

    let columns: BTreeMap<Variable, Vec<f64>> = Variable::ALL
        .into_iter()
        .map(|variable| {
            let column = match record.series(variable) {
                Some(values) => {
                    resample_variable(variable, values, &record.depth, grid, latitude, longitude, config)
                }
                None => vec![f64::NAN; grid.len()],
            };
            (variable, column)
        })
        .collect();

    debug!("Resampled {} onto {} levels", record.label(), grid.len());

    ResampledProfile {
        float_id: record.float_id.clone(),
        cycle: record.cycle,
        latitude,
        longitude,
        timestamp: record.timestamp,
        depth: grid.to_vec(),
        pressure: pressures_from_depths(grid, latitude),
        columns,
    }
}

fn resample_variable(
    variable: Variable,
    values: &[f64],
    depth: &[f64],
    grid: &[f64],
    latitude: f64,
    longitude: f64,
    config: &ResampleConfig,
) -> Vec<f64> {
    let (sample_depths, sample_values): (Vec<f64>, Vec<f64>) = depth
        .iter()
        .zip(values)
        .filter(|(z, v)| z.is_finite() && v.is_finite())
        .map(|(z, v)| (*z, *v))
        .unzip();

    if sample_values.len() < 2 {
        return vec![f64::NAN; grid.len()];
    }

    if variable == Variable::Chla {
        let smoothed = median_filter(&sample_values, config.median_window);
        let interpolated = interpolate_linear(&sample_depths, &smoothed, grid);
        correct_chlorophyll(interpolated, latitude, longitude, config)
    } else {
        interpolate_linear(&sample_depths, &sample_values, grid)
    }
}
