//! Argo NetCDF profile reader
//!
//! Reads the variables the processor needs from an Argo profile file. Fill
//! values are mapped to NaN. `JULD` is stored as days since 1950-01-01 UTC.
//! Platform numbers are character arrays and are taken from the file name by
//! the loader instead.

use crate::app::models::{ProfileFile, Variable};
use crate::constants::PRESSURE_VAR;
use crate::{Error, Result};
use chrono::{DateTime, TimeZone, Utc};
use std::path::Path;
use tracing::debug;

/// Values at or beyond this magnitude are Argo fill values
const ARGO_FILL_THRESHOLD: f64 = 99_999.0;

fn netcdf_error(file: &str, message: impl Into<String>, source: netcdf::Error) -> Error {
    Error::NetCdf {
        file: file.to_string(),
        message: message.into(),
        source,
    }
}

fn has_attr(var: &netcdf::Variable, name: &str) -> bool {
    var.attributes().any(|attr| attr.name() == name)
}

fn fill_value(var: &netcdf::Variable) -> Option<f64> {
    if !has_attr(var, "_FillValue") {
        return None;
    }
    let value = var.attribute_value("_FillValue")?.ok()?;
    f64::try_from(value).ok()
}

fn clean(value: f64, fill: Option<f64>) -> f64 {
    if fill.is_some_and(|f| value == f) || value.abs() >= ARGO_FILL_THRESHOLD {
        f64::NAN
    } else {
        value
    }
}

/// Read a 1-D per-profile variable
fn read_profile_values(file: &netcdf::File, name: &str, label: &str) -> Result<Vec<f64>> {
    let Some(var) = file.variable(name) else {
        return Ok(Vec::new());
    };
    let fill = fill_value(&var);
    let values: Vec<f64> = var
        .get_values(..)
        .map_err(|e| netcdf_error(label, format!("Failed to read {}", name), e))?;
    Ok(values.into_iter().map(|v| clean(v, fill)).collect())
}

/// Read a 2-D `N_PROF x N_LEVELS` variable as rows
fn read_rows(var: &netcdf::Variable, name: &str, label: &str) -> Result<Vec<Vec<f64>>> {
    let dims = var.dimensions();
    if dims.len() != 2 {
        return Err(Error::malformed_profile(
            label,
            format!("{} has {} dimensions, expected 2", name, dims.len()),
        ));
    }
    let levels = dims[1].len();
    let fill = fill_value(var);
    let values: Vec<f64> = var
        .get_values(..)
        .map_err(|e| netcdf_error(label, format!("Failed to read {}", name), e))?;

    if levels == 0 {
        return Ok(vec![Vec::new(); dims[0].len()]);
    }
    Ok(values
        .chunks(levels)
        .map(|row| row.iter().map(|v| clean(*v, fill)).collect())
        .collect())
}

fn julian_to_datetime(days: f64) -> Option<DateTime<Utc>> {
    if !days.is_finite() {
        return None;
    }
    let reference = Utc.with_ymd_and_hms(1950, 1, 1, 0, 0, 0).single()?;
    let millis = (days * 86_400_000.0).round() as i64;
    reference.checked_add_signed(chrono::Duration::milliseconds(millis))
}

/// Read an Argo profile NetCDF file
pub fn read_netcdf_profile(path: &Path) -> Result<ProfileFile> {
    let label = path.display().to_string();
    let file = netcdf::open(path).map_err(|e| netcdf_error(&label, "Failed to open file", e))?;

    let mut profile = ProfileFile {
        latitude: read_profile_values(&file, "LATITUDE", &label)?,
        longitude: read_profile_values(&file, "LONGITUDE", &label)?,
        juld: read_profile_values(&file, "JULD", &label)?
            .into_iter()
            .map(julian_to_datetime)
            .collect(),
        ..ProfileFile::default()
    };

    if let Some(var) = file.variable("CYCLE_NUMBER") {
        if let Ok(cycle) = var.get_value::<i32, _>([0]) {
            profile.cycle_number = u32::try_from(cycle).ok();
        }
    }

    let mut names = vec![PRESSURE_VAR.to_string()];
    for variable in Variable::ALL {
        names.push(variable.name().to_string());
        names.push(variable.adjusted_name());
    }
    for name in names {
        if let Some(var) = file.variable(&name) {
            let rows = read_rows(&var, &name, &label)?;
            profile.variables.insert(name, rows);
        }
    }

    debug!(
        "Read {} profiles and {} variables from {}",
        profile.profile_count(),
        profile.variables.len(),
        label
    );
    Ok(profile)
}
