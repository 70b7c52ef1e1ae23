//! JSON profile documents and in-memory profile sources
//!
//! The JSON layout mirrors the Argo file structure: per-profile position and
//! time arrays plus `N_PROF x N_LEVELS` variable arrays, with `null` for
//! missing values.
//!
//! ```json
//! {
//!   "platform_number": "5904855",
//!   "cycle_number": 122,
//!   "latitude": [-45.0],
//!   "longitude": [150.0],
//!   "juld": ["2019-01-15T03:00:00Z"],
//!   "variables": {
//!     "PRES": [[5.0, 10.0, 15.0]],
//!     "CHLA": [[0.41, null, 0.38]]
//!   }
//! }
//! ```

use crate::app::interfaces::ProfileSource;
use crate::app::models::ProfileFile;
use crate::{Error, Result};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::path::Path;

/// Serialized form of a [`ProfileFile`]
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct ProfileDocument {
    pub platform_number: Option<String>,
    pub cycle_number: Option<u32>,
    pub latitude: Vec<Option<f64>>,
    pub longitude: Vec<Option<f64>>,
    pub juld: Vec<Option<DateTime<Utc>>>,
    pub variables: BTreeMap<String, Vec<Vec<Option<f64>>>>,
}

fn to_nan(values: Vec<Option<f64>>) -> Vec<f64> {
    values.into_iter().map(|v| v.unwrap_or(f64::NAN)).collect()
}

fn to_null(values: &[f64]) -> Vec<Option<f64>> {
    values
        .iter()
        .map(|v| if v.is_nan() { None } else { Some(*v) })
        .collect()
}

impl From<ProfileDocument> for ProfileFile {
    fn from(document: ProfileDocument) -> Self {
        ProfileFile {
            platform_number: document.platform_number,
            cycle_number: document.cycle_number,
            latitude: to_nan(document.latitude),
            longitude: to_nan(document.longitude),
            juld: document.juld,
            variables: document
                .variables
                .into_iter()
                .map(|(name, rows)| (name, rows.into_iter().map(to_nan).collect()))
                .collect(),
        }
    }
}

impl From<&ProfileFile> for ProfileDocument {
    fn from(file: &ProfileFile) -> Self {
        ProfileDocument {
            platform_number: file.platform_number.clone(),
            cycle_number: file.cycle_number,
            latitude: to_null(&file.latitude),
            longitude: to_null(&file.longitude),
            juld: file.juld.clone(),
            variables: file
                .variables
                .iter()
                .map(|(name, rows)| (name.clone(), rows.iter().map(|r| to_null(r)).collect()))
                .collect(),
        }
    }
}

/// Decode a JSON profile document
pub fn parse_profile_document(text: &str, identifier: &str) -> Result<ProfileFile> {
    let document: ProfileDocument = serde_json::from_str(text).map_err(|e| {
        Error::json(identifier, "Failed to decode profile document", Some(e))
    })?;
    Ok(document.into())
}

/// Read a JSON profile file from disk
pub fn read_json_profile(path: &Path) -> Result<ProfileFile> {
    let text = std::fs::read_to_string(path)
        .map_err(|e| Error::io(format!("Failed to read '{}'", path.display()), e))?;
    parse_profile_document(&text, &path.display().to_string())
}

/// Write a profile file as a JSON document
pub fn write_json_profile(path: &Path, file: &ProfileFile) -> Result<()> {
    let document = ProfileDocument::from(file);
    let text = serde_json::to_string_pretty(&document)
        .map_err(|e| Error::json(path.display().to_string(), "Failed to encode profile", Some(e)))?;
    std::fs::write(path, text)
        .map_err(|e| Error::io(format!("Failed to write '{}'", path.display()), e))
}

/// Profile source backed by a map of identifiers to already-decoded files
#[derive(Debug, Clone, Default)]
pub struct InMemoryProfileSource {
    files: BTreeMap<String, ProfileFile>,
}

impl InMemoryProfileSource {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, identifier: impl Into<String>, file: ProfileFile) {
        self.files.insert(identifier.into(), file);
    }

    pub fn identifiers(&self) -> Vec<String> {
        self.files.keys().cloned().collect()
    }

    pub fn len(&self) -> usize {
        self.files.len()
    }

    pub fn is_empty(&self) -> bool {
        self.files.is_empty()
    }
}

impl ProfileSource for InMemoryProfileSource {
    fn open(&self, identifier: &str) -> Result<ProfileFile> {
        self.files
            .get(identifier)
            .cloned()
            .ok_or_else(|| Error::file_not_found(identifier))
    }
}
