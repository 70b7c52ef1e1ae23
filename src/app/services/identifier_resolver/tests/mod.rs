//! Tests for identifier resolution and duplicate handling

use super::*;
use crate::app::models::SubmissionMode;

fn targets(floats: &[&str]) -> BTreeSet<String> {
    floats.iter().map(|f| f.to_string()).collect()
}

fn listing(names: &[&str]) -> Vec<String> {
    names.iter().map(|n| format!("/data/{}", n)).collect()
}

#[test]
fn test_delayed_mode_preferred_over_realtime() {
    // Real-time listed first so the preference cannot come from listing order
    let candidates = listing(&["SR5904855_122.nc", "SD5904855_122.nc"]);
    let resolution = resolve_identifiers(&candidates, &targets(&["5904855"]));

    assert_eq!(resolution.identifiers, vec!["/data/SD5904855_122.nc"]);
    assert_eq!(resolution.stats.duplicates_removed, 1);
    assert_eq!(resolution.stats.resolved, 1);
}

#[test]
fn test_singleton_always_kept() {
    let candidates = listing(&["SR5904855_123.nc"]);
    let resolution = resolve_identifiers(&candidates, &targets(&["5904855"]));

    assert_eq!(resolution.identifiers, vec!["/data/SR5904855_123.nc"]);
    assert_eq!(resolution.stats.duplicates_removed, 0);
}

#[test]
fn test_same_float_neighbours_are_not_duplicates() {
    // Adjacent cycles share a prefix but not a duplicate key; the last entry
    // in sort order must also survive
    let candidates = listing(&[
        "SD5904855_121.nc",
        "SR5904855_122.nc",
        "SD5904855_122.nc",
        "SR5904855_123.nc",
    ]);
    let resolution = resolve_identifiers(&candidates, &targets(&["5904855"]));

    assert_eq!(
        resolution.identifiers,
        vec![
            "/data/SD5904855_121.nc",
            "/data/SD5904855_122.nc",
            "/data/SR5904855_123.nc",
        ]
    );
}

#[test]
fn test_descending_profiles_dropped() {
    let candidates = listing(&["SD5904855_122.nc", "SD5904855_122D.nc"]);
    let resolution = resolve_identifiers(&candidates, &targets(&["5904855"]));

    assert_eq!(resolution.identifiers, vec!["/data/SD5904855_122.nc"]);
    assert_eq!(resolution.stats.descending, 1);
    assert_eq!(resolution.stats.duplicates_removed, 0);
}

#[test]
fn test_untargeted_floats_filtered() {
    let candidates = listing(&["SD5904855_001.nc", "SD6901474_001.nc"]);
    let resolution = resolve_identifiers(&candidates, &targets(&["6901474"]));

    assert_eq!(resolution.identifiers, vec!["/data/SD6901474_001.nc"]);
    assert_eq!(resolution.stats.not_targeted, 1);
}

#[test]
fn test_unparseable_candidates_skipped_not_fatal() {
    let candidates = listing(&["ar_greylist.txt", "SD5904855_001.nc", "index.html"]);
    let resolution = resolve_identifiers(&candidates, &targets(&["5904855"]));

    assert_eq!(resolution.identifiers.len(), 1);
    assert_eq!(resolution.stats.unparseable, 2);
    assert_eq!(resolution.stats.listed, 3);
}

#[test]
fn test_output_ordered_by_float_and_cycle() {
    let candidates = listing(&["SD6901474_002.nc", "SD5904855_010.nc", "SD5904855_002.nc"]);
    let resolution = resolve_identifiers(&candidates, &targets(&["5904855", "6901474"]));

    assert_eq!(
        resolution.identifiers,
        vec![
            "/data/SD5904855_002.nc",
            "/data/SD5904855_010.nc",
            "/data/SD6901474_002.nc",
        ]
    );
}

#[test]
fn test_select_preferred_tie_breaks_on_identifier() {
    let a = parse_candidate("/b/SR5904855_001.nc").unwrap();
    let b = parse_candidate("/a/SR5904855_001.nc").unwrap();
    let chosen = select_preferred(vec![a, b]).unwrap();
    assert_eq!(chosen.identifier, "/a/SR5904855_001.nc");
    assert_eq!(chosen.mode, SubmissionMode::RealTime);
}

#[test]
fn test_select_preferred_realtime_beats_other_mode() {
    let other = parse_candidate("SM5904855_001.nc").unwrap();
    let realtime = parse_candidate("SR5904855_001.nc").unwrap();
    let chosen = select_preferred(vec![other, realtime]).unwrap();
    assert_eq!(chosen.mode, SubmissionMode::RealTime);
}

#[test]
fn test_select_preferred_empty_group() {
    assert!(select_preferred(Vec::new()).is_none());
}

#[test]
fn test_resolution_summary_mentions_counts() {
    let candidates = listing(&["SR5904855_122.nc", "SD5904855_122.nc"]);
    let resolution = resolve_identifiers(&candidates, &targets(&["5904855"]));
    let summary = resolution.stats.summary();
    assert!(summary.contains("2 listed -> 1 resolved"));
    assert!(summary.contains("duplicates: 1"));
}
