//! Profile loading and variable resolution
//!
//! Builds a [`ProfileRecord`] from the first profile of a [`ProfileFile`].
//! For each tracked variable the adjusted copy is used when it holds at least
//! one value anywhere in the file; otherwise the raw copy is used; otherwise
//! the variable is absent. Depth is derived once from pressure and latitude.

pub mod variable_resolution;

pub use variable_resolution::resolve_variable;

use crate::app::models::{LoadOutcome, ProfileFile, ProfileRecord, Variable};
use crate::app::services::identifier_resolver::parse_candidate;
use crate::app::services::seawater::depths_from_pressures;
use crate::constants::PRESSURE_VAR;
use crate::{Error, Result};
use std::collections::BTreeMap;
use tracing::debug;

/// Index of the profile processed within each file
const PROFILE_INDEX: usize = 0;

/// Load the first profile of a file as a [`ProfileRecord`]
///
/// Returns [`LoadOutcome::NoChlorophyll`] when the file has no usable
/// chlorophyll. Structural problems (missing pressure, misaligned arrays,
/// unparseable identifier) are errors for the caller to count and skip.
pub fn load_profile(identifier: &str, file: &ProfileFile) -> Result<LoadOutcome> {
    let candidate = parse_candidate(identifier)?;

    let pressure_rows = file
        .variable(PRESSURE_VAR)
        .ok_or_else(|| Error::malformed_profile(identifier, "missing PRES variable"))?;
    let pressure = pressure_rows
        .get(PROFILE_INDEX)
        .cloned()
        .ok_or_else(|| Error::malformed_profile(identifier, "file contains no profiles"))?;

    let mut variables = BTreeMap::new();
    for variable in Variable::ALL {
        if let Some(series) = resolve_variable(file, variable, PROFILE_INDEX) {
            if series.values.len() != pressure.len() {
                return Err(Error::malformed_profile(
                    identifier,
                    format!(
                        "{} has {} levels but PRES has {}",
                        variable,
                        series.values.len(),
                        pressure.len()
                    ),
                ));
            }
            variables.insert(variable, series);
        }
    }

    let has_chlorophyll = variables
        .get(&Variable::Chla)
        .is_some_and(|s| s.values.iter().any(|v| !v.is_nan()));
    if !has_chlorophyll {
        debug!("{} has no chlorophyll data", identifier);
        return Ok(LoadOutcome::NoChlorophyll);
    }

    let latitude = defined(file.latitude.get(PROFILE_INDEX).copied());
    let longitude = defined(file.longitude.get(PROFILE_INDEX).copied());
    let timestamp = file.juld.get(PROFILE_INDEX).copied().flatten();

    let depth = depths_from_pressures(&pressure, latitude.unwrap_or(f64::NAN));

    let float_id = file
        .platform_number
        .as_deref()
        .map(str::trim)
        .filter(|p| !p.is_empty())
        .map(str::to_string)
        .unwrap_or(candidate.float_id);
    let cycle = file.cycle_number.unwrap_or(candidate.cycle);

    Ok(LoadOutcome::Loaded(ProfileRecord {
        identifier: identifier.to_string(),
        float_id,
        cycle,
        latitude,
        longitude,
        timestamp,
        pressure,
        depth,
        variables,
    }))
}

fn defined(value: Option<f64>) -> Option<f64> {
    value.filter(|v| v.is_finite())
}
