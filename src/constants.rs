//! Application constants for the Argo chlorophyll processor
//!
//! This module contains the default thresholds, grid definition, variable
//! names and file naming conventions used throughout the processor.

// =============================================================================
// File Naming
// =============================================================================

/// Extensions of profile files recognised by the directory catalog
pub const PROFILE_FILE_EXTENSIONS: &[&str] = &["nc", "json"];

/// Default file name for the target float list inside the working directory
pub const DEFAULT_FLOAT_LIST_NAME: &str = "argo_chla_float_list.txt";

/// Default file name for the persisted, resolved profile file list
pub const DEFAULT_FILE_LIST_NAME: &str = "argo_chla_file_list.txt";

/// Default output file name
pub const DEFAULT_OUTPUT_NAME: &str = "all_chla_argo_250_5m.parquet";

/// Application directory name used under the user config directory
pub const APP_DIR_NAME: &str = "argo-chla-processor";

// =============================================================================
// Variable Names
// =============================================================================

/// Name of the pressure variable in profile files
pub const PRESSURE_VAR: &str = "PRES";

/// Suffix marking the adjusted (calibrated) copy of a variable
pub const ADJUSTED_SUFFIX: &str = "_ADJUSTED";

/// Column name of the derived potential density
pub const PDENSITY_COLUMN: &str = "PDENSITY";

// =============================================================================
// Depth Grid
// =============================================================================

/// Shallowest grid depth (m)
pub const DEFAULT_GRID_START_M: f64 = 0.0;

/// Deepest grid depth (m), inclusive
pub const DEFAULT_GRID_STOP_M: f64 = 250.0;

/// Grid spacing (m)
pub const DEFAULT_GRID_STEP_M: f64 = 5.0;

// =============================================================================
// Quality Gate Thresholds
// =============================================================================

/// Profiles must reach at least this pressure (dbar) where chlorophyll is valid
pub const MIN_MAX_PRESSURE_DBAR: f64 = 200.0;

/// Profiles must start no deeper than this pressure (dbar)
pub const MAX_MIN_PRESSURE_DBAR: f64 = 10.0;

/// Largest acceptable spacing between consecutive samples above 200 dbar
pub const MAX_PRESSURE_GAP_DBAR: f64 = 20.0;

/// Pressure separating the near-surface column from the deep reference layer
pub const DEEP_LAYER_PRESSURE_DBAR: f64 = 200.0;

/// Profiles need strictly more valid chlorophyll samples than this
pub const MIN_VALID_POINTS: usize = 10;

/// Mean deep chlorophyll above this value is treated as a sensor anomaly
pub const MAX_DEEP_MEAN_CHLA: f64 = 0.3;

/// Profiles whose usable sample count is within this margin of zero are rejected
pub const MOSTLY_INVALID_MARGIN: usize = 10;

// =============================================================================
// Resampling
// =============================================================================

/// Width of the chlorophyll median filter
pub const MEDIAN_FILTER_WINDOW: usize = 5;

/// Number of deepest grid levels used to find the chlorophyll baseline
pub const BASELINE_LEVELS: usize = 10;

/// Regional exclusion box where deep red fluorescence is a known artifact
/// (Black Sea). Bounds are exclusive.
pub mod exclusion_box {
    pub const LON_MIN: f64 = 27.5;
    pub const LON_MAX: f64 = 42.5;
    pub const LAT_MIN: f64 = 41.0;
    pub const LAT_MAX: f64 = 47.0;
}

// =============================================================================
// Post-Interpolation Gate
// =============================================================================

/// Largest plausible chlorophyll magnitude after resampling
pub const MAX_ABS_CHLA: f64 = 50.0;

/// Most negative chlorophyll value tolerated after baseline correction
pub const MIN_CHLA: f64 = -0.02;

/// Residual allowed at the reference and deepest levels
pub const MAX_DEEP_RESIDUAL: f64 = 0.5;

/// Depth (m) of the grid level checked for baseline residuals
pub const REFERENCE_DEPTH_M: f64 = 250.0;

// =============================================================================
// Day/Night Classification
// =============================================================================

/// Sun elevation (degrees) at sunrise/sunset including refraction
pub const SUNRISE_ELEVATION_DEG: f64 = -0.8333;

/// Half-width of the window searched for sunrise/sunset transitions (hours)
pub const DAY_NIGHT_WINDOW_HOURS: i64 = 12;

/// Sampling step used to locate transitions before refinement (minutes)
pub const DAY_NIGHT_SCAN_STEP_MINUTES: i64 = 10;

// =============================================================================
// Progress Reporting
// =============================================================================

/// Progress bar template for the profile loop
pub const PROGRESS_TEMPLATE: &str =
    "{spinner:.green} [{elapsed_precise}] [{bar:40.cyan/blue}] {pos}/{len} ({percent}%) {msg}";

/// Progress bar characters
pub const PROGRESS_CHARS: &str = "#>-";
