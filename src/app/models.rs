//! Data models for Argo profile processing
//!
//! This module contains the core data structures that flow through the
//! pipeline: candidate identifiers, raw profile files as returned by a source,
//! loaded profile records, quality verdicts and resampled profiles.

use crate::constants::ADJUSTED_SUFFIX;
use crate::{Error, Result};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;
use std::str::FromStr;

// =============================================================================
// Physical Variables
// =============================================================================

/// Physical variables tracked by the processor
///
/// The set is fixed: temperature, practical salinity, dissolved oxygen,
/// nitrate and chlorophyll-a. Chlorophyll is the variable under QC scrutiny.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum Variable {
    Temp,
    Psal,
    Doxy,
    Nitrate,
    Chla,
}

impl Variable {
    /// All tracked variables in output column order
    pub const ALL: [Variable; 5] = [
        Variable::Temp,
        Variable::Psal,
        Variable::Doxy,
        Variable::Nitrate,
        Variable::Chla,
    ];

    /// Name of the raw variable in Argo files (and of the output column)
    pub fn name(&self) -> &'static str {
        match self {
            Variable::Temp => "TEMP",
            Variable::Psal => "PSAL",
            Variable::Doxy => "DOXY",
            Variable::Nitrate => "NITRATE",
            Variable::Chla => "CHLA",
        }
    }

    /// Name of the adjusted copy of this variable
    pub fn adjusted_name(&self) -> String {
        format!("{}{}", self.name(), ADJUSTED_SUFFIX)
    }
}

impl fmt::Display for Variable {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for Variable {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        let base = s.trim().to_uppercase();
        let base = base.strip_suffix(ADJUSTED_SUFFIX).unwrap_or(&base);
        Variable::ALL
            .into_iter()
            .find(|v| v.name() == base)
            .ok_or_else(|| Error::configuration(format!("Unknown variable '{}'", s)))
    }
}

// =============================================================================
// Candidate Identifiers
// =============================================================================

/// Submission mode encoded in an Argo profile file name
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SubmissionMode {
    /// `R` - real-time submission
    RealTime,
    /// `D` - delayed-mode submission, reviewed and preferred
    Delayed,
    /// Any other mode letter
    Other(char),
}

impl SubmissionMode {
    /// Decode a mode marker letter
    pub fn from_marker(marker: char) -> Self {
        match marker {
            'R' => SubmissionMode::RealTime,
            'D' => SubmissionMode::Delayed,
            other => SubmissionMode::Other(other),
        }
    }

    /// Preference rank used when resolving duplicates (lower is preferred)
    pub fn preference(&self) -> u8 {
        match self {
            SubmissionMode::Delayed => 0,
            SubmissionMode::RealTime => 1,
            SubmissionMode::Other(_) => 2,
        }
    }
}

/// Key identifying one physical profile across submissions
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct DuplicateKey {
    pub float_id: String,
    pub cycle: u32,
    pub descending: bool,
}

impl fmt::Display for DuplicateKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{}_{:03}{}",
            self.float_id,
            self.cycle,
            if self.descending { "D" } else { "" }
        )
    }
}

/// A candidate profile file with the key parsed from its name
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RawCandidate {
    /// Path-like identifier as listed by the catalog
    pub identifier: String,
    /// Data type prefix letters (`S` synthetic, `B` bio, empty for core files)
    pub data_type: String,
    /// Submission mode
    pub mode: SubmissionMode,
    /// Float (platform) number
    pub float_id: String,
    /// Profile cycle number
    pub cycle: u32,
    /// Descending profile marker
    pub descending: bool,
}

impl RawCandidate {
    /// Key shared by all submissions of the same physical profile
    pub fn duplicate_key(&self) -> DuplicateKey {
        DuplicateKey {
            float_id: self.float_id.clone(),
            cycle: self.cycle,
            descending: self.descending,
        }
    }
}

// =============================================================================
// Profile Files and Records
// =============================================================================

/// Contents of one profile file as returned by a [`ProfileSource`]
///
/// Variables are stored as `N_PROF x N_LEVELS` rows with NaN for missing
/// values, mirroring the Argo file layout.
///
/// [`ProfileSource`]: crate::app::interfaces::ProfileSource
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ProfileFile {
    pub platform_number: Option<String>,
    pub cycle_number: Option<u32>,
    pub latitude: Vec<f64>,
    pub longitude: Vec<f64>,
    pub juld: Vec<Option<DateTime<Utc>>>,
    pub variables: BTreeMap<String, Vec<Vec<f64>>>,
}

impl ProfileFile {
    /// Number of profiles (N_PROF) stored in the file
    pub fn profile_count(&self) -> usize {
        self.variables
            .get(crate::constants::PRESSURE_VAR)
            .map(|rows| rows.len())
            .unwrap_or(0)
    }

    /// All rows of a named variable
    pub fn variable(&self, name: &str) -> Option<&[Vec<f64>]> {
        self.variables.get(name).map(|rows| rows.as_slice())
    }

    /// Check whether a named variable exists in the file
    pub fn has_variable(&self, name: &str) -> bool {
        self.variables.contains_key(name)
    }
}

/// Which data quality tier a resolved variable came from
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum DataSource {
    Adjusted,
    Raw,
}

/// A variable's values for one profile after adjusted/raw resolution
#[derive(Debug, Clone, PartialEq)]
pub struct ResolvedSeries {
    pub source: DataSource,
    pub values: Vec<f64>,
}

/// One vertical profile ready for quality control
///
/// Every resolved series shares index alignment with `pressure` and `depth`.
#[derive(Debug, Clone, PartialEq)]
pub struct ProfileRecord {
    pub identifier: String,
    pub float_id: String,
    pub cycle: u32,
    pub latitude: Option<f64>,
    pub longitude: Option<f64>,
    pub timestamp: Option<DateTime<Utc>>,
    /// Sea pressure (dbar)
    pub pressure: Vec<f64>,
    /// Depth (m, positive downward)
    pub depth: Vec<f64>,
    pub variables: BTreeMap<Variable, ResolvedSeries>,
}

impl ProfileRecord {
    /// Values of a resolved variable, if the record carries it
    pub fn series(&self, variable: Variable) -> Option<&[f64]> {
        self.variables.get(&variable).map(|s| s.values.as_slice())
    }

    /// Resolved chlorophyll values
    pub fn chlorophyll(&self) -> Option<&[f64]> {
        self.series(Variable::Chla)
    }

    /// Latitude and longitude when both are defined
    pub fn position(&self) -> Option<(f64, f64)> {
        match (self.latitude, self.longitude) {
            (Some(lat), Some(lon)) if lat.is_finite() && lon.is_finite() => Some((lat, lon)),
            _ => None,
        }
    }

    /// Short label used in log messages
    pub fn label(&self) -> String {
        format!("{}_{:03}", self.float_id, self.cycle)
    }
}

/// Result of loading one candidate file
#[derive(Debug, Clone, PartialEq)]
pub enum LoadOutcome {
    Loaded(ProfileRecord),
    /// The file carries no usable chlorophyll and is skipped
    NoChlorophyll,
}

// =============================================================================
// Quality Verdicts
// =============================================================================

/// Reason a profile failed the quality gate
///
/// Discriminants match the numeric QC codes written to logs and reports.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum RejectCode {
    NoPosition = 1,
    BadPressureRange = 2,
    PressureGap = 3,
    InsufficientPoints = 4,
    DeepValueAnomaly = 5,
    MostlyInvalid = 6,
}

impl RejectCode {
    /// All reject codes in evaluation order
    pub const ALL: [RejectCode; 6] = [
        RejectCode::NoPosition,
        RejectCode::BadPressureRange,
        RejectCode::PressureGap,
        RejectCode::InsufficientPoints,
        RejectCode::DeepValueAnomaly,
        RejectCode::MostlyInvalid,
    ];

    /// Numeric QC code
    pub fn code(&self) -> u8 {
        *self as u8
    }

    /// Constant-style name used in reports
    pub fn as_str(&self) -> &'static str {
        match self {
            RejectCode::NoPosition => "NO_POSITION",
            RejectCode::BadPressureRange => "BAD_PRESSURE_RANGE",
            RejectCode::PressureGap => "PRESSURE_GAP",
            RejectCode::InsufficientPoints => "INSUFFICIENT_POINTS",
            RejectCode::DeepValueAnomaly => "DEEP_VALUE_ANOMALY",
            RejectCode::MostlyInvalid => "MOSTLY_INVALID",
        }
    }
}

impl fmt::Display for RejectCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Outcome of the quality gate for one profile
#[derive(Debug, Clone, PartialEq)]
pub enum QcVerdict {
    Pass,
    Reject { code: RejectCode, detail: String },
}

impl QcVerdict {
    pub fn reject(code: RejectCode, detail: impl Into<String>) -> Self {
        QcVerdict::Reject {
            code,
            detail: detail.into(),
        }
    }

    pub fn is_pass(&self) -> bool {
        matches!(self, QcVerdict::Pass)
    }

    /// Reject code, `None` for a pass
    pub fn code(&self) -> Option<RejectCode> {
        match self {
            QcVerdict::Pass => None,
            QcVerdict::Reject { code, .. } => Some(*code),
        }
    }

    /// Numeric QC code, 0 for a pass
    pub fn numeric_code(&self) -> u8 {
        self.code().map(|c| c.code()).unwrap_or(0)
    }
}

impl fmt::Display for QcVerdict {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            QcVerdict::Pass => f.write_str("PASS"),
            QcVerdict::Reject { code, detail } => write!(f, "{} ({})", code, detail),
        }
    }
}

// =============================================================================
// Resampled Output
// =============================================================================

/// Day or night at the time and place of a profile
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum DayNight {
    Day,
    Night,
}

impl DayNight {
    pub fn as_str(&self) -> &'static str {
        match self {
            DayNight::Day => "day",
            DayNight::Night => "night",
        }
    }
}

/// A profile re-expressed on the fixed depth grid
///
/// `columns` always holds every tracked variable; variables absent from the
/// source file or with too few samples are filled with NaN.
#[derive(Debug, Clone, PartialEq)]
pub struct ResampledProfile {
    pub float_id: String,
    pub cycle: u32,
    pub latitude: f64,
    pub longitude: f64,
    pub timestamp: Option<DateTime<Utc>>,
    /// Grid depths (m)
    pub depth: Vec<f64>,
    /// Grid depths converted to pressure at the profile latitude (dbar)
    pub pressure: Vec<f64>,
    pub columns: BTreeMap<Variable, Vec<f64>>,
}

impl ResampledProfile {
    /// Values of one variable on the grid
    pub fn column(&self, variable: Variable) -> &[f64] {
        self.columns
            .get(&variable)
            .map(|v| v.as_slice())
            .unwrap_or(&[])
    }

    /// Number of grid levels
    pub fn levels(&self) -> usize {
        self.depth.len()
    }
}
