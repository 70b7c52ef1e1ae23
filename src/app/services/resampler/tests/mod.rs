//! Tests for profile resampling

use super::*;
use crate::app::models::{DataSource, ResolvedSeries};
use crate::config::GridConfig;

fn series(values: Vec<f64>) -> ResolvedSeries {
    ResolvedSeries {
        source: DataSource::Raw,
        values,
    }
}

/// 0-300 m every 10 m with linear temperature and decaying chlorophyll
fn record_at(latitude: f64, longitude: f64) -> ProfileRecord {
    let depth: Vec<f64> = (0..=30).map(|i| i as f64 * 10.0).collect();
    let mut variables = BTreeMap::new();
    variables.insert(
        Variable::Temp,
        series(depth.iter().map(|z| 20.0 - 0.05 * z).collect()),
    );
    variables.insert(
        Variable::Chla,
        series(depth.iter().map(|z| 0.5 * (-z / 50.0).exp() + 0.05).collect()),
    );
    ProfileRecord {
        identifier: "SD5904855_122.nc".to_string(),
        float_id: "5904855".to_string(),
        cycle: 122,
        latitude: Some(latitude),
        longitude: Some(longitude),
        timestamp: None,
        pressure: depth.clone(),
        depth,
        variables,
    }
}

fn grid() -> Vec<f64> {
    GridConfig::default().depths()
}

#[test]
fn test_output_shape_matches_grid() {
    let resampled = resample_profile(&record_at(-45.0, 150.0), &grid(), &ResampleConfig::default());
    assert_eq!(resampled.levels(), 51);
    assert_eq!(resampled.pressure.len(), 51);
    for variable in Variable::ALL {
        assert_eq!(resampled.column(variable).len(), 51);
    }
}

#[test]
fn test_linear_variable_reproduced() {
    let resampled = resample_profile(&record_at(-45.0, 150.0), &grid(), &ResampleConfig::default());
    for (z, t) in resampled.depth.iter().zip(resampled.column(Variable::Temp)) {
        assert!((t - (20.0 - 0.05 * z)).abs() < 1e-9);
    }
}

#[test]
fn test_absent_variable_is_nan_column() {
    let resampled = resample_profile(&record_at(-45.0, 150.0), &grid(), &ResampleConfig::default());
    assert!(resampled.column(Variable::Nitrate).iter().all(|v| v.is_nan()));
    assert!(resampled.column(Variable::Doxy).iter().all(|v| v.is_nan()));
}

#[test]
fn test_single_usable_sample_is_nan_column() {
    let mut record = record_at(-45.0, 150.0);
    let mut values = vec![f64::NAN; record.depth.len()];
    values[3] = 35.0;
    record.variables.insert(Variable::Psal, series(values));

    let resampled = resample_profile(&record, &grid(), &ResampleConfig::default());
    assert!(resampled.column(Variable::Psal).iter().all(|v| v.is_nan()));
}

#[test]
fn test_samples_with_undefined_depth_skipped() {
    let mut record = record_at(-45.0, 150.0);
    record.depth[5] = f64::NAN;
    record.variables.get_mut(&Variable::Temp).unwrap().values[5] = 999.0;

    let resampled = resample_profile(&record, &grid(), &ResampleConfig::default());
    // 50 m sits between the 40 m and 60 m samples once the bad one is dropped
    assert!((resampled.column(Variable::Temp)[10] - 17.5).abs() < 1e-9);
}

#[test]
fn test_resampling_is_deterministic() {
    let record = record_at(-45.0, 150.0);
    let config = ResampleConfig::default();
    let first = resample_profile(&record, &grid(), &config);
    let second = resample_profile(&record, &grid(), &config);
    assert_eq!(first.column(Variable::Chla), second.column(Variable::Chla));
    assert_eq!(first.column(Variable::Temp), second.column(Variable::Temp));
    assert_eq!(first.pressure, second.pressure);
}

#[test]
fn test_baseline_removed_outside_exclusion_box() {
    let config = ResampleConfig::default();
    let outside = resample_profile(&record_at(0.0, 0.0), &grid(), &config);
    let chla = outside.column(Variable::Chla);
    // The deepest grid level holds the smallest of the last ten values
    assert_eq!(chla[50], 0.0);
    assert!(chla.iter().all(|v| *v >= 0.0));
}

#[test]
fn test_baseline_kept_inside_exclusion_box() {
    let config = ResampleConfig::default();
    let inside = resample_profile(&record_at(44.0, 35.0), &grid(), &config);
    let outside = resample_profile(&record_at(0.0, 0.0), &grid(), &config);

    let inside_chla = inside.column(Variable::Chla);
    let outside_chla = outside.column(Variable::Chla);
    assert!(inside_chla[50] > 0.05);
    for (i, o) in inside_chla.iter().zip(outside_chla) {
        assert!((i - inside_chla[50] - o).abs() < 1e-12);
    }
}

#[test]
fn test_median_filter_removes_chlorophyll_spike() {
    let mut record = record_at(0.0, 0.0);
    record.variables.get_mut(&Variable::Chla).unwrap().values[10] = 10.0;

    let resampled = resample_profile(&record, &grid(), &ResampleConfig::default());
    // The spike sat at 100 m (grid index 20)
    assert!(resampled.column(Variable::Chla)[20] < 0.2);
}

#[test]
fn test_pressure_column_from_grid_depth() {
    let resampled = resample_profile(&record_at(-45.0, 150.0), &grid(), &ResampleConfig::default());
    assert!(resampled.pressure[0].abs() < 1e-6);
    // Pressure in dbar runs slightly ahead of depth in metres
    assert!(resampled.pressure[50] > 250.0 && resampled.pressure[50] < 255.0);
}

#[test]
fn test_resampler_struct_matches_free_function() {
    let record = record_at(-45.0, 150.0);
    let resampler = Resampler::new(grid(), ResampleConfig::default());
    let via_struct = resampler.resample(&record);
    let direct = resample_profile(&record, &grid(), &ResampleConfig::default());
    assert_eq!(via_struct.column(Variable::Chla), direct.column(Variable::Chla));
    assert_eq!(resampler.grid().len(), 51);
}
