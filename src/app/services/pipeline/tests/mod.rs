//! End-to-end tests for the processing loop

use super::*;
use crate::app::adapters::json_source::InMemoryProfileSource;
use crate::app::models::{DayNight, ProfileFile, RejectCode};
use chrono::{DateTime, TimeZone, Utc};
use std::cell::RefCell;
use std::collections::{BTreeMap, BTreeSet};

/// One profile, 0-300 dbar every 5 dbar, chlorophyll decaying with depth
fn profile_file() -> ProfileFile {
    let pressure: Vec<f64> = (0..=60).map(|i| i as f64 * 5.0).collect();
    let chla = pressure.iter().map(|p| 0.5 * (-p / 50.0).exp() + 0.05).collect();
    let temp = pressure.iter().map(|p| 20.0 - 0.04 * p).collect();
    let psal = vec![35.0; pressure.len()];

    let mut variables = BTreeMap::new();
    variables.insert("PRES".to_string(), vec![pressure]);
    variables.insert("CHLA".to_string(), vec![chla]);
    variables.insert("TEMP".to_string(), vec![temp]);
    variables.insert("PSAL".to_string(), vec![psal]);

    ProfileFile {
        platform_number: None,
        cycle_number: None,
        latitude: vec![-45.0],
        longitude: vec![150.0],
        juld: vec![Some(Utc.with_ymd_and_hms(2019, 1, 15, 3, 0, 0).unwrap())],
        variables,
    }
}

fn chla_mut(file: &mut ProfileFile) -> &mut Vec<f64> {
    &mut file.variables.get_mut("CHLA").unwrap()[0]
}

fn ids(names: &[&str]) -> Vec<String> {
    names.iter().map(|n| n.to_string()).collect()
}

#[test]
fn test_three_profile_run() {
    let mut source = InMemoryProfileSource::new();
    source.insert("SD5904855_001.nc", profile_file());

    let mut no_position = profile_file();
    no_position.latitude = vec![f64::NAN];
    source.insert("SD5904855_002.nc", no_position);

    // Missing chlorophyll between 25 and 45 dbar opens a 30 dbar gap
    let mut gapped = profile_file();
    for value in &mut chla_mut(&mut gapped)[5..=9] {
        *value = f64::NAN;
    }
    source.insert("SD5904855_003.nc", gapped);

    let config = Config::default();
    let outcome = ProfilePipeline::new(&source, &config).run(&ids(&[
        "SD5904855_001.nc",
        "SD5904855_002.nc",
        "SD5904855_003.nc",
    ]));

    assert_eq!(outcome.dataset.len(), 1);
    assert_eq!(outcome.stats.rejections(RejectCode::NoPosition), 1);
    assert_eq!(outcome.stats.rejections(RejectCode::PressureGap), 1);
    assert_eq!(outcome.stats.loaded, 3);
    assert_eq!(outcome.stats.qc_passed, 1);
    assert_eq!(outcome.stats.accepted, 1);

    let row = &outcome.dataset.rows()[0];
    assert_eq!(row.profile.float_id, "5904855");
    assert_eq!(row.profile.cycle, 1);
    assert_eq!(row.profile.levels(), 51);
    assert!(row.day_night.is_none());
}

/// Drop every sample strictly between 20 and 45 dbar, leaving a 25 dbar step
fn with_pressure_step(mut file: ProfileFile) -> ProfileFile {
    let keep: Vec<bool> = file.variables["PRES"][0]
        .iter()
        .map(|p| *p <= 20.0 || *p >= 45.0)
        .collect();
    for rows in file.variables.values_mut() {
        let row = &mut rows[0];
        let mut flags = keep.iter();
        row.retain(|_| *flags.next().unwrap_or(&true));
    }
    file
}

#[test]
fn test_three_profile_run_with_pressure_step() {
    let mut source = InMemoryProfileSource::new();
    source.insert("SD5904855_001.nc", profile_file());

    let mut no_position = profile_file();
    no_position.latitude = vec![f64::NAN];
    source.insert("SD5904855_002.nc", no_position);

    let stepped = with_pressure_step(profile_file());
    assert_eq!(
        &stepped.variables["PRES"][0][3..6],
        &[15.0, 20.0, 45.0]
    );
    source.insert("SD5904855_003.nc", stepped);

    let config = Config::default();
    let outcome = ProfilePipeline::new(&source, &config).run(&ids(&[
        "SD5904855_001.nc",
        "SD5904855_002.nc",
        "SD5904855_003.nc",
    ]));

    assert_eq!(outcome.dataset.len(), 1);
    assert_eq!(outcome.dataset.row_count(), 51);
    assert_eq!(outcome.stats.rejections(RejectCode::NoPosition), 1);
    assert_eq!(outcome.stats.rejections(RejectCode::PressureGap), 1);
    assert_eq!(outcome.stats.total_rejections(), 2);
}

#[test]
fn test_unreadable_and_chlorophyll_free_files_are_counted() {
    let mut source = InMemoryProfileSource::new();
    let mut no_chla = profile_file();
    no_chla.variables.remove("CHLA");
    source.insert("SD5904855_001.nc", no_chla);

    let mut malformed = profile_file();
    malformed.variables.remove("PRES");
    source.insert("SD5904855_002.nc", malformed);

    let config = Config::default();
    let outcome = ProfilePipeline::new(&source, &config).run(&ids(&[
        "SD5904855_001.nc",
        "SD5904855_002.nc",
        "SD5904855_404.nc",
    ]));

    assert!(outcome.dataset.is_empty());
    assert_eq!(outcome.stats.candidates, 3);
    assert_eq!(outcome.stats.no_chlorophyll, 1);
    assert_eq!(outcome.stats.load_failures, 2);
    assert_eq!(outcome.stats.loaded, 0);
}

#[test]
fn test_negative_dip_fails_post_interpolation() {
    let mut file = profile_file();
    let chla = chla_mut(&mut file);
    for value in chla.iter_mut() {
        *value = 0.05;
    }
    // Nine consecutive samples between 100 and 140 dbar survive the median filter
    for value in &mut chla[20..=28] {
        *value = -0.5;
    }
    let mut source = InMemoryProfileSource::new();
    source.insert("SD5904855_001.nc", file);

    let config = Config::default();
    let outcome = ProfilePipeline::new(&source, &config).run(&ids(&["SD5904855_001.nc"]));

    assert_eq!(outcome.stats.qc_passed, 1);
    assert_eq!(outcome.stats.post_interpolation_rejected, 1);
    assert!(outcome.dataset.is_empty());
}

struct FixedClassifier {
    calls: RefCell<Vec<DateTime<Utc>>>,
}

impl DayNightClassifier for FixedClassifier {
    fn classify(&self, _latitude: f64, _longitude: f64, time: DateTime<Utc>) -> DayNight {
        self.calls.borrow_mut().push(time);
        DayNight::Night
    }
}

#[test]
fn test_classifier_labels_accepted_profiles() {
    let mut source = InMemoryProfileSource::new();
    source.insert("SD5904855_001.nc", profile_file());
    let mut undated = profile_file();
    undated.juld = vec![None];
    source.insert("SD5904855_002.nc", undated);

    let classifier = FixedClassifier {
        calls: RefCell::new(Vec::new()),
    };
    let config = Config::default();
    let outcome = ProfilePipeline::new(&source, &config)
        .with_classifier(&classifier)
        .with_progress(ProgressBar::hidden())
        .run(&ids(&["SD5904855_001.nc", "SD5904855_002.nc"]));

    assert!(outcome.dataset.includes_day_night());
    assert_eq!(outcome.dataset.rows()[0].day_night, Some(DayNight::Night));
    assert_eq!(outcome.dataset.rows()[1].day_night, None);
    assert_eq!(classifier.calls.borrow().len(), 1);
}

struct MemoryCatalog {
    candidates: Vec<String>,
    floats: BTreeSet<String>,
    saved: RefCell<Option<Vec<String>>>,
}

impl ProfileCatalog for MemoryCatalog {
    fn list_candidates(&self) -> Result<Vec<String>> {
        Ok(self.candidates.clone())
    }

    fn list_target_floats(&self) -> Result<BTreeSet<String>> {
        Ok(self.floats.clone())
    }

    fn load_resolved(&self) -> Result<Option<Vec<String>>> {
        Ok(self.saved.borrow().clone())
    }

    fn save_resolved(&self, identifiers: &[String]) -> Result<()> {
        *self.saved.borrow_mut() = Some(identifiers.to_vec());
        Ok(())
    }
}

#[test]
fn test_prepare_identifiers_resolves_then_reuses() {
    let catalog = MemoryCatalog {
        candidates: ids(&["SR5904855_001.nc", "SD5904855_001.nc", "SD6901474_001.nc"]),
        floats: BTreeSet::from(["5904855".to_string()]),
        saved: RefCell::new(None),
    };

    let first = prepare_identifiers(&catalog, true).unwrap();
    assert_eq!(first.identifiers, ids(&["SD5904855_001.nc"]));
    assert_eq!(first.resolution.unwrap().duplicates_removed, 1);

    let second = prepare_identifiers(&catalog, true).unwrap();
    assert_eq!(second.identifiers, first.identifiers);
    assert!(second.resolution.is_none());
}
