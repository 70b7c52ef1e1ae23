//! Adjusted-vs-raw variable selection

use crate::app::models::{DataSource, ProfileFile, ResolvedSeries, Variable};

/// Pick the data source for one variable and return its values for one profile
///
/// The adjusted copy wins when any profile row in the file has a non-NaN
/// value; an adjusted copy that is entirely NaN falls back to the raw copy.
pub fn resolve_variable(
    file: &ProfileFile,
    variable: Variable,
    profile_index: usize,
) -> Option<ResolvedSeries> {
    let adjusted = file
        .variable(&variable.adjusted_name())
        .filter(|rows| has_any_value(rows));

    let (source, rows) = match adjusted {
        Some(rows) => (DataSource::Adjusted, rows),
        None => (DataSource::Raw, file.variable(variable.name())?),
    };

    rows.get(profile_index).map(|values| ResolvedSeries {
        source,
        values: values.clone(),
    })
}

fn has_any_value(rows: &[Vec<f64>]) -> bool {
    rows.iter().any(|row| row.iter().any(|v| !v.is_nan()))
}
