//! Tests for the quality gate

use super::*;
use crate::app::models::{DataSource, RejectCode, ResolvedSeries, Variable};
use std::collections::BTreeMap;

fn record(pressure: Vec<f64>, chlorophyll: Vec<f64>) -> ProfileRecord {
    let mut variables = BTreeMap::new();
    variables.insert(
        Variable::Chla,
        ResolvedSeries {
            source: DataSource::Raw,
            values: chlorophyll,
        },
    );
    ProfileRecord {
        identifier: "SD5904855_122.nc".to_string(),
        float_id: "5904855".to_string(),
        cycle: 122,
        latitude: Some(-45.0),
        longitude: Some(150.0),
        timestamp: None,
        depth: pressure.clone(),
        pressure,
        variables,
    }
}

/// 0-300 dbar every 10 dbar, chlorophyll decaying with depth
fn good_record() -> ProfileRecord {
    let pressure: Vec<f64> = (0..=30).map(|i| i as f64 * 10.0).collect();
    let chlorophyll = pressure
        .iter()
        .map(|p| 0.5 * (-p / 50.0).exp() + 0.01)
        .collect();
    record(pressure, chlorophyll)
}

fn verdict_code(record: &ProfileRecord) -> Option<RejectCode> {
    QualityGate::default().evaluate(record).code()
}

#[test]
fn test_good_profile_passes() {
    assert_eq!(QualityGate::default().evaluate(&good_record()), QcVerdict::Pass);
}

#[test]
fn test_missing_position_rejected_first() {
    // Also too short, but position is checked first
    let mut profile = record(vec![0.0, 5.0], vec![0.1, 0.1]);
    profile.longitude = None;
    assert_eq!(verdict_code(&profile), Some(RejectCode::NoPosition));
}

#[test]
fn test_shallow_profile_bad_pressure_range() {
    let pressure: Vec<f64> = (0..=15).map(|i| i as f64 * 10.0).collect();
    let chlorophyll = vec![0.2; pressure.len()];
    assert_eq!(
        verdict_code(&record(pressure, chlorophyll)),
        Some(RejectCode::BadPressureRange)
    );
}

#[test]
fn test_range_uses_valid_samples_only() {
    // Pressure reaches 300 dbar but chlorophyll stops at 150
    let mut profile = good_record();
    let chla = &mut profile.variables.get_mut(&Variable::Chla).unwrap().values;
    for value in chla.iter_mut().skip(16) {
        *value = f64::NAN;
    }
    assert_eq!(verdict_code(&profile), Some(RejectCode::BadPressureRange));
}

#[test]
fn test_deep_start_bad_pressure_range() {
    let pressure: Vec<f64> = (0..=30).map(|i| 15.0 + i as f64 * 10.0).collect();
    let chlorophyll = vec![0.1; pressure.len()];
    assert_eq!(
        verdict_code(&record(pressure, chlorophyll)),
        Some(RejectCode::BadPressureRange)
    );
}

#[test]
fn test_no_valid_chlorophyll_bad_pressure_range() {
    let pressure: Vec<f64> = (0..=30).map(|i| i as f64 * 10.0).collect();
    let chlorophyll = vec![f64::NAN; pressure.len()];
    assert_eq!(
        verdict_code(&record(pressure, chlorophyll)),
        Some(RejectCode::BadPressureRange)
    );
}

#[test]
fn test_gap_equal_to_limit_passes() {
    let pressure: Vec<f64> = (0..=15).map(|i| i as f64 * 20.0).collect();
    let chlorophyll = vec![0.05; pressure.len()];
    assert_eq!(verdict_code(&record(pressure, chlorophyll)), None);
}

#[test]
fn test_gap_just_over_limit_rejected() {
    let mut pressure = vec![0.0, 20.0001];
    pressure.extend((3..=30).map(|i| i as f64 * 10.0));
    let chlorophyll = vec![0.05; pressure.len()];
    assert_eq!(
        verdict_code(&record(pressure, chlorophyll)),
        Some(RejectCode::PressureGap)
    );
}

#[test]
fn test_gap_below_deep_layer_ignored() {
    let mut pressure: Vec<f64> = (0..=20).map(|i| i as f64 * 10.0).collect();
    pressure.extend([260.0, 300.0]);
    let chlorophyll = vec![0.05; pressure.len()];
    assert_eq!(verdict_code(&record(pressure, chlorophyll)), None);
}

#[test]
fn test_gap_measured_between_valid_samples() {
    // A run of missing chlorophyll opens a 40 dbar gap in the valid samples
    let mut profile = good_record();
    let chla = &mut profile.variables.get_mut(&Variable::Chla).unwrap().values;
    chla[5] = f64::NAN;
    chla[6] = f64::NAN;
    chla[7] = f64::NAN;
    assert_eq!(verdict_code(&profile), Some(RejectCode::PressureGap));
}

#[test]
fn test_ten_valid_samples_insufficient() {
    let pressure = vec![
        0.0, 20.0, 40.0, 60.0, 80.0, 100.0, 120.0, 140.0, 160.0, 250.0,
    ];
    let chlorophyll = vec![0.1; pressure.len()];
    assert_eq!(
        verdict_code(&record(pressure, chlorophyll)),
        Some(RejectCode::InsufficientPoints)
    );
}

#[test]
fn test_eleven_valid_samples_sufficient() {
    let pressure = vec![
        0.0, 20.0, 40.0, 60.0, 80.0, 100.0, 120.0, 140.0, 160.0, 250.0, 255.0,
    ];
    let chlorophyll = vec![0.1; pressure.len()];
    assert_eq!(verdict_code(&record(pressure, chlorophyll)), None);
}

#[test]
fn test_high_deep_mean_rejected() {
    let mut profile = good_record();
    let chla = &mut profile.variables.get_mut(&Variable::Chla).unwrap().values;
    for value in chla.iter_mut().skip(21) {
        *value = 0.5;
    }
    assert_eq!(verdict_code(&profile), Some(RejectCode::DeepValueAnomaly));
}

#[test]
fn test_deep_check_starts_strictly_below_boundary() {
    // The sample at exactly 200 dbar is not part of the deep layer
    let mut profile = good_record();
    let chla = &mut profile.variables.get_mut(&Variable::Chla).unwrap().values;
    chla[20] = 5.0;
    assert_eq!(verdict_code(&profile), None);
}

#[test]
fn test_profile_without_deep_samples_passes_deep_check() {
    let pressure: Vec<f64> = (0..=20).map(|i| i as f64 * 10.0).collect();
    let chlorophyll = vec![0.5; pressure.len()];
    assert_eq!(verdict_code(&record(pressure, chlorophyll)), None);
}

#[test]
fn test_mostly_negative_rejected() {
    let mut profile = good_record();
    let chla = &mut profile.variables.get_mut(&Variable::Chla).unwrap().values;
    for value in chla.iter_mut().take(25) {
        *value = -0.01;
    }
    assert_eq!(verdict_code(&profile), Some(RejectCode::MostlyInvalid));
}

#[test]
fn test_reject_detail_is_reported() {
    let mut profile = good_record();
    profile.latitude = None;
    let verdict = QualityGate::default().evaluate(&profile);
    assert_eq!(verdict.numeric_code(), 1);
    assert!(verdict.to_string().starts_with("NO_POSITION"));
}

#[test]
fn test_custom_thresholds_respected() {
    let thresholds = QualityThresholds {
        min_valid_points: 40,
        ..QualityThresholds::default()
    };
    let gate = QualityGate::new(thresholds);
    assert_eq!(
        gate.evaluate(&good_record()).code(),
        Some(RejectCode::InsufficientPoints)
    );
}
