//! Accumulation and export of accepted profiles
//!
//! Accepted profiles are appended in processing order. Potential density is
//! derived on append from the resampled salinity and temperature. The dataset
//! is shaped into a table only once, at export: one row per profile and grid
//! level, which keeps every profile's metadata next to its values.

pub mod writer;

pub use writer::ParquetDatasetWriter;

use crate::Result;
use crate::app::models::{DayNight, ResampledProfile, Variable};
use crate::app::services::seawater::potential_densities;
use crate::constants::PDENSITY_COLUMN;
use polars::prelude::*;

/// One accepted profile with its derived columns
#[derive(Debug, Clone, PartialEq)]
pub struct DatasetRow {
    pub profile: ResampledProfile,
    /// Potential density at the surface reference pressure (kg/m3)
    pub pdensity: Vec<f64>,
    pub day_night: Option<DayNight>,
}

/// Append-only collection of accepted profiles
#[derive(Debug, Clone, Default)]
pub struct Dataset {
    rows: Vec<DatasetRow>,
    include_day_night: bool,
}

impl Dataset {
    pub fn new(include_day_night: bool) -> Self {
        Self {
            rows: Vec::new(),
            include_day_night,
        }
    }

    /// Append an accepted profile, deriving potential density
    pub fn append(&mut self, profile: ResampledProfile, day_night: Option<DayNight>) {
        let pdensity = potential_densities(
            profile.column(Variable::Psal),
            profile.column(Variable::Temp),
        );
        self.rows.push(DatasetRow {
            profile,
            pdensity,
            day_night,
        });
    }

    /// Number of accepted profiles
    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    pub fn rows(&self) -> &[DatasetRow] {
        &self.rows
    }

    pub fn includes_day_night(&self) -> bool {
        self.include_day_night
    }

    /// Total number of (profile, level) rows in the exported table
    pub fn row_count(&self) -> usize {
        self.rows.iter().map(|row| row.profile.levels()).sum()
    }

    /// Shape the dataset into a long-format dataframe
    ///
    /// Columns: `PROFILE`, `LEVEL`, `FLOAT_ID`, `CYCLE`, `LATITUDE`,
    /// `LONGITUDE`, `JULD`, `DAY_NIGHT` (when enabled), `DEPTH`, `PRES`, one
    /// column per tracked variable and `PDENSITY`. An empty dataset yields
    /// an empty frame with the same schema.
    pub fn to_dataframe(&self) -> Result<DataFrame> {
        let total = self.row_count();
        let mut profile_index = Vec::with_capacity(total);
        let mut level = Vec::with_capacity(total);
        let mut float_id = Vec::with_capacity(total);
        let mut cycle = Vec::with_capacity(total);
        let mut latitude = Vec::with_capacity(total);
        let mut longitude = Vec::with_capacity(total);
        let mut juld: Vec<Option<i64>> = Vec::with_capacity(total);
        let mut day_night: Vec<Option<&str>> = Vec::with_capacity(total);
        let mut depth = Vec::with_capacity(total);
        let mut pressure = Vec::with_capacity(total);
        let mut pdensity = Vec::with_capacity(total);
        let mut variables: Vec<Vec<f64>> = Variable::ALL
            .iter()
            .map(|_| Vec::with_capacity(total))
            .collect();

        for (index, row) in self.rows.iter().enumerate() {
            let profile = &row.profile;
            let levels = profile.levels();
            let timestamp = profile.timestamp.map(|t| t.timestamp_millis());
            let label = row.day_night.map(|d| d.as_str());

            profile_index.extend(std::iter::repeat_n(index as u32, levels));
            level.extend(0..levels as u32);
            float_id.extend(std::iter::repeat_n(profile.float_id.as_str(), levels));
            cycle.extend(std::iter::repeat_n(profile.cycle, levels));
            latitude.extend(std::iter::repeat_n(profile.latitude, levels));
            longitude.extend(std::iter::repeat_n(profile.longitude, levels));
            juld.extend(std::iter::repeat_n(timestamp, levels));
            day_night.extend(std::iter::repeat_n(label, levels));
            depth.extend_from_slice(&profile.depth);
            pressure.extend(padded(&profile.pressure, levels));
            pdensity.extend(padded(&row.pdensity, levels));
            for (values, variable) in variables.iter_mut().zip(Variable::ALL) {
                values.extend(padded(profile.column(variable), levels));
            }
        }

        let juld = Series::new("JULD".into(), juld)
            .cast(&DataType::Datetime(TimeUnit::Milliseconds, None))?;

        let mut columns: Vec<Column> = vec![
            Series::new("PROFILE".into(), profile_index).into(),
            Series::new("LEVEL".into(), level).into(),
            Series::new("FLOAT_ID".into(), float_id).into(),
            Series::new("CYCLE".into(), cycle).into(),
            Series::new("LATITUDE".into(), latitude).into(),
            Series::new("LONGITUDE".into(), longitude).into(),
            juld.into(),
        ];
        if self.include_day_night {
            columns.push(Series::new("DAY_NIGHT".into(), day_night).into());
        }
        columns.push(Series::new("DEPTH".into(), depth).into());
        columns.push(Series::new("PRES".into(), pressure).into());
        for (values, variable) in variables.into_iter().zip(Variable::ALL) {
            columns.push(Series::new(variable.name().into(), values).into());
        }
        columns.push(Series::new(PDENSITY_COLUMN.into(), pdensity).into());

        Ok(DataFrame::new(columns)?)
    }
}

/// Values of a per-level column, NaN-padded or truncated to `levels`
fn padded(values: &[f64], levels: usize) -> impl Iterator<Item = f64> + '_ {
    values
        .iter()
        .copied()
        .chain(std::iter::repeat(f64::NAN))
        .take(levels)
}
