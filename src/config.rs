//! Configuration management and validation.
//!
//! Provides the run configuration: the depth grid, quality gate thresholds,
//! resampling parameters, post-interpolation limits and output settings.
//! Configuration is layered: built-in defaults, then an optional TOML file,
//! then command-line overrides.

use crate::constants::{self, exclusion_box};
use crate::{Error, Result};
use polars::prelude::ParquetCompression;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use std::str::FromStr;
use tracing::debug;

/// Top-level processor configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
#[serde(default)]
pub struct Config {
    pub grid: GridConfig,
    pub quality: QualityThresholds,
    pub resample: ResampleConfig,
    pub post_interpolation: PostInterpolationConfig,
    pub output: OutputConfig,
}

/// Uniform depth grid definition (inclusive of `stop_m` when it falls on a step)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GridConfig {
    pub start_m: f64,
    pub stop_m: f64,
    pub step_m: f64,
}

impl Default for GridConfig {
    fn default() -> Self {
        Self {
            start_m: constants::DEFAULT_GRID_START_M,
            stop_m: constants::DEFAULT_GRID_STOP_M,
            step_m: constants::DEFAULT_GRID_STEP_M,
        }
    }
}

impl GridConfig {
    /// Number of grid levels
    pub fn levels(&self) -> usize {
        ((self.stop_m - self.start_m) / self.step_m + 1e-9).floor() as usize + 1
    }

    /// Grid depths in metres
    pub fn depths(&self) -> Vec<f64> {
        (0..self.levels())
            .map(|i| self.start_m + i as f64 * self.step_m)
            .collect()
    }

    /// Index of the level nearest `depth_m`, or `None` outside the grid
    pub fn level_index(&self, depth_m: f64) -> Option<usize> {
        let last = self.levels() - 1;
        let deepest = self.start_m + last as f64 * self.step_m;
        if !depth_m.is_finite() || depth_m < self.start_m || depth_m > deepest {
            return None;
        }
        let index = ((depth_m - self.start_m) / self.step_m).round() as usize;
        Some(index.min(last))
    }
}

/// Thresholds used by the six-stage quality gate
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct QualityThresholds {
    /// Reject when the deepest valid sample is shallower than this (dbar)
    pub min_max_pressure: f64,
    /// Reject when the shallowest valid sample is deeper than this (dbar)
    pub max_min_pressure: f64,
    /// Largest spacing allowed between consecutive near-surface samples (dbar)
    pub max_pressure_gap: f64,
    /// Boundary of the deep layer used by the gap and deep-value checks (dbar)
    pub deep_layer_pressure: f64,
    /// Reject when the valid sample count is at or below this
    pub min_valid_points: usize,
    /// Reject when mean deep chlorophyll exceeds this
    pub max_deep_mean_chla: f64,
    /// Reject when missing plus negative samples come within this of the total
    pub mostly_invalid_margin: usize,
}

impl Default for QualityThresholds {
    fn default() -> Self {
        Self {
            min_max_pressure: constants::MIN_MAX_PRESSURE_DBAR,
            max_min_pressure: constants::MAX_MIN_PRESSURE_DBAR,
            max_pressure_gap: constants::MAX_PRESSURE_GAP_DBAR,
            deep_layer_pressure: constants::DEEP_LAYER_PRESSURE_DBAR,
            min_valid_points: constants::MIN_VALID_POINTS,
            max_deep_mean_chla: constants::MAX_DEEP_MEAN_CHLA,
            mostly_invalid_margin: constants::MOSTLY_INVALID_MARGIN,
        }
    }
}

/// Latitude/longitude box with exclusive bounds
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RegionBox {
    pub lon_min: f64,
    pub lon_max: f64,
    pub lat_min: f64,
    pub lat_max: f64,
}

impl RegionBox {
    /// Strict containment test
    pub fn contains(&self, latitude: f64, longitude: f64) -> bool {
        self.lon_min < longitude
            && longitude < self.lon_max
            && self.lat_min < latitude
            && latitude < self.lat_max
    }
}

/// Chlorophyll resampling parameters
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ResampleConfig {
    /// Median filter window (odd)
    pub median_window: usize,
    /// Deepest grid levels searched for the baseline minimum
    pub baseline_levels: usize,
    /// Region where baseline subtraction is skipped
    pub exclusion_box: RegionBox,
}

impl Default for ResampleConfig {
    fn default() -> Self {
        Self {
            median_window: constants::MEDIAN_FILTER_WINDOW,
            baseline_levels: constants::BASELINE_LEVELS,
            exclusion_box: RegionBox {
                lon_min: exclusion_box::LON_MIN,
                lon_max: exclusion_box::LON_MAX,
                lat_min: exclusion_box::LAT_MIN,
                lat_max: exclusion_box::LAT_MAX,
            },
        }
    }
}

/// Limits applied to resampled chlorophyll
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PostInterpolationConfig {
    pub max_abs_value: f64,
    pub min_value: f64,
    pub max_deep_residual: f64,
    /// Depth of the residual check level; the nearest grid level is used
    pub reference_depth_m: f64,
}

impl Default for PostInterpolationConfig {
    fn default() -> Self {
        Self {
            max_abs_value: constants::MAX_ABS_CHLA,
            min_value: constants::MIN_CHLA,
            max_deep_residual: constants::MAX_DEEP_RESIDUAL,
            reference_depth_m: constants::REFERENCE_DEPTH_M,
        }
    }
}

/// Supported compression algorithms for parquet files
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CompressionAlgorithm {
    /// Snappy compression - good balance of speed and compression
    Snappy,
    /// ZSTD compression - better compression ratio, slower
    Zstd,
    /// LZ4 compression - fastest, lower compression ratio
    Lz4,
    /// No compression
    Uncompressed,
}

impl CompressionAlgorithm {
    /// Convert to polars ParquetCompression type
    pub fn to_polars_compression(&self) -> ParquetCompression {
        match self {
            CompressionAlgorithm::Snappy => ParquetCompression::Snappy,
            CompressionAlgorithm::Zstd => ParquetCompression::Zstd(None),
            CompressionAlgorithm::Lz4 => ParquetCompression::Lz4Raw,
            CompressionAlgorithm::Uncompressed => ParquetCompression::Uncompressed,
        }
    }
}

impl FromStr for CompressionAlgorithm {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_lowercase().as_str() {
            "snappy" => Ok(CompressionAlgorithm::Snappy),
            "zstd" => Ok(CompressionAlgorithm::Zstd),
            "lz4" => Ok(CompressionAlgorithm::Lz4),
            "none" | "uncompressed" => Ok(CompressionAlgorithm::Uncompressed),
            other => Err(Error::configuration(format!(
                "Unknown compression '{}': expected snappy, zstd, lz4 or none",
                other
            ))),
        }
    }
}

/// Output settings
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct OutputConfig {
    pub compression: CompressionAlgorithm,
    /// Add a day/night label per profile
    pub classify_day_night: bool,
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self {
            compression: CompressionAlgorithm::Snappy,
            classify_day_night: false,
        }
    }
}

impl Config {
    /// Default configuration file location (`<config_dir>/argo-chla-processor/config.toml`)
    pub fn default_config_path() -> Option<PathBuf> {
        dirs::config_dir().map(|dir| dir.join(constants::APP_DIR_NAME).join("config.toml"))
    }

    /// Load configuration from a TOML file
    pub fn from_file(path: &Path) -> Result<Self> {
        if !path.exists() {
            return Err(Error::file_not_found(path.display().to_string()));
        }
        let text = std::fs::read_to_string(path).map_err(|e| {
            Error::io(
                format!("Failed to read config file '{}'", path.display()),
                e,
            )
        })?;
        let config: Config = toml::from_str(&text)?;
        debug!("Loaded configuration from {}", path.display());
        Ok(config)
    }

    /// Load defaults, overlaid by an explicit or default-location config file
    ///
    /// An explicitly named file must exist; the default location is optional.
    pub fn load_layered(config_file: Option<&Path>) -> Result<Self> {
        let config = match config_file {
            Some(path) => Self::from_file(path)?,
            None => match Self::default_config_path().filter(|p| p.exists()) {
                Some(path) => Self::from_file(&path)?,
                None => Self::default(),
            },
        };
        config.validate()?;
        Ok(config)
    }

    /// Check internal consistency of the configuration
    pub fn validate(&self) -> Result<()> {
        let grid = &self.grid;
        if !(grid.step_m.is_finite() && grid.step_m > 0.0) {
            return Err(Error::configuration(format!(
                "Grid step must be positive, got {}",
                grid.step_m
            )));
        }
        if !(grid.start_m.is_finite() && grid.stop_m.is_finite()) || grid.stop_m < grid.start_m {
            return Err(Error::configuration(format!(
                "Grid stop ({}) must not be shallower than start ({})",
                grid.stop_m, grid.start_m
            )));
        }
        if grid.levels() < 2 {
            return Err(Error::configuration("Grid needs at least two levels"));
        }
        if self.resample.median_window == 0 || self.resample.median_window % 2 == 0 {
            return Err(Error::configuration(format!(
                "Median filter window must be odd, got {}",
                self.resample.median_window
            )));
        }
        if self.resample.baseline_levels == 0 {
            return Err(Error::configuration(
                "Baseline correction needs at least one grid level",
            ));
        }
        let quality = &self.quality;
        if quality.max_min_pressure > quality.min_max_pressure {
            return Err(Error::configuration(format!(
                "Near-surface threshold ({}) exceeds required depth ({})",
                quality.max_min_pressure, quality.min_max_pressure
            )));
        }
        if quality.max_pressure_gap <= 0.0 {
            return Err(Error::configuration("Maximum pressure gap must be positive"));
        }
        Ok(())
    }
}
