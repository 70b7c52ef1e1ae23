//! Boundaries between the processing core and its collaborators
//!
//! The pipeline never touches the network, the file format or the output
//! format directly. Catalogs, profile sources, writers and the day/night
//! classifier are reached through these traits; concrete implementations
//! live in [`crate::app::adapters`] and in the services that provide them.

use crate::Result;
use crate::app::models::{DayNight, ProfileFile};
use crate::app::services::aggregator::Dataset;
use chrono::{DateTime, Utc};
use std::collections::BTreeSet;

/// Catalog of available profile files and target floats
pub trait ProfileCatalog {
    /// All candidate profile identifiers (arbitrary order)
    fn list_candidates(&self) -> Result<Vec<String>>;

    /// Float numbers the run is restricted to
    fn list_target_floats(&self) -> Result<BTreeSet<String>>;

    /// A previously persisted list of resolved identifiers, if one exists
    fn load_resolved(&self) -> Result<Option<Vec<String>>>;

    /// Persist resolved identifiers for reuse by later runs
    fn save_resolved(&self, identifiers: &[String]) -> Result<()>;
}

/// Provider of profile file contents
pub trait ProfileSource {
    /// Open one profile file by identifier
    fn open(&self, identifier: &str) -> Result<ProfileFile>;
}

/// Sink for the finished dataset
pub trait DatasetWriter {
    /// Persist the dataset, returning the number of bytes written
    fn write(&self, dataset: &Dataset) -> Result<u64>;
}

/// Day/night classification of a profile's time and place
pub trait DayNightClassifier {
    fn classify(&self, latitude: f64, longitude: f64, time: DateTime<Utc>) -> DayNight;
}
