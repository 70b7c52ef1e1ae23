//! Argo Chlorophyll Processor Library
//!
//! A Rust library for turning raw BGC-Argo float profile files into a single,
//! quality-controlled dataset of chlorophyll (and companion) profiles on a
//! uniform depth grid.
//!
//! This library provides tools for:
//! - Resolving candidate profile files against a target float list, dropping
//!   descending profiles and preferring delayed-mode over real-time submissions
//! - Loading profiles with adjusted-vs-raw variable resolution and derived depth
//! - A six-stage, first-failure-wins quality gate
//! - Median filtering, linear resampling and baseline correction of chlorophyll
//! - A post-interpolation sanity gate
//! - Aggregating accepted profiles with potential density and writing Parquet

pub mod config;
pub mod constants;

// Core application modules
pub mod app {
    pub mod interfaces;
    pub mod models;
    pub mod services {
        pub mod aggregator;
        pub mod day_night;
        pub mod float_survey;
        pub mod identifier_resolver;
        pub mod pipeline;
        pub mod post_interpolation_gate;
        pub mod profile_loader;
        pub mod quality_gate;
        pub mod resampler;
        pub mod seawater;
    }
    pub mod adapters {
        pub mod filesystem;
        pub mod json_source;
        #[cfg(feature = "netcdf")]
        pub mod netcdf_source;
    }
}

// CLI modules
pub mod cli {
    pub mod args;
    pub mod commands;
}

// Re-export commonly used types
pub use app::models::{ProfileRecord, QcVerdict, RejectCode, Variable};
pub use config::Config;

/// Result type alias for the Argo processor
pub type Result<T> = std::result::Result<T, Error>;

/// Error types for Argo profile processing operations
#[derive(thiserror::Error, Debug)]
pub enum Error {
    /// I/O operation failed
    #[error("I/O error: {message}")]
    Io {
        message: String,
        #[source]
        source: std::io::Error,
    },

    /// JSON profile document could not be decoded
    #[error("JSON error in '{file}': {message}")]
    Json {
        file: String,
        message: String,
        #[source]
        source: Option<serde_json::Error>,
    },

    /// Polars dataframe construction or Parquet writing failed
    #[error("Dataset export error: {message}")]
    DatasetWrite {
        message: String,
        #[source]
        source: Option<polars::error::PolarsError>,
    },

    /// Configuration error
    #[error("Configuration error: {message}")]
    Configuration { message: String },

    /// Candidate identifier does not follow the Argo file naming convention
    #[error("Unparseable profile identifier: {identifier}")]
    IdentifierParse { identifier: String },

    /// Profile file was readable but its contents are inconsistent
    #[error("Malformed profile file '{file}': {message}")]
    MalformedProfile { file: String, message: String },

    /// No reader is available for the file's format
    #[error("Unsupported profile format for '{file}': {message}")]
    UnsupportedFormat { file: String, message: String },

    /// File not found
    #[error("File not found: {path}")]
    FileNotFound { path: String },

    /// Directory traversal error
    #[error("Directory traversal error: {message}")]
    DirectoryTraversal {
        message: String,
        #[source]
        source: walkdir::Error,
    },

    /// NetCDF library error
    #[cfg(feature = "netcdf")]
    #[error("NetCDF error in '{file}': {message}")]
    NetCdf {
        file: String,
        message: String,
        #[source]
        source: netcdf::Error,
    },
}

impl Error {
    /// Create an I/O error with context
    pub fn io(message: impl Into<String>, source: std::io::Error) -> Self {
        Self::Io {
            message: message.into(),
            source,
        }
    }

    /// Create a JSON decoding error with context
    pub fn json(
        file: impl Into<String>,
        message: impl Into<String>,
        source: Option<serde_json::Error>,
    ) -> Self {
        Self::Json {
            file: file.into(),
            message: message.into(),
            source,
        }
    }

    /// Create a dataset export error
    pub fn dataset_write(
        message: impl Into<String>,
        source: Option<polars::error::PolarsError>,
    ) -> Self {
        Self::DatasetWrite {
            message: message.into(),
            source,
        }
    }

    /// Create a configuration error
    pub fn configuration(message: impl Into<String>) -> Self {
        Self::Configuration {
            message: message.into(),
        }
    }

    /// Create an identifier parse error
    pub fn identifier_parse(identifier: impl Into<String>) -> Self {
        Self::IdentifierParse {
            identifier: identifier.into(),
        }
    }

    /// Create a malformed profile error
    pub fn malformed_profile(file: impl Into<String>, message: impl Into<String>) -> Self {
        Self::MalformedProfile {
            file: file.into(),
            message: message.into(),
        }
    }

    /// Create an unsupported format error
    pub fn unsupported_format(file: impl Into<String>, message: impl Into<String>) -> Self {
        Self::UnsupportedFormat {
            file: file.into(),
            message: message.into(),
        }
    }

    /// Create a file not found error
    pub fn file_not_found(path: impl Into<String>) -> Self {
        Self::FileNotFound { path: path.into() }
    }

    /// Create a directory traversal error
    pub fn directory_traversal(message: impl Into<String>, source: walkdir::Error) -> Self {
        Self::DirectoryTraversal {
            message: message.into(),
            source,
        }
    }
}

// Automatic conversions from common error types
impl From<std::io::Error> for Error {
    fn from(error: std::io::Error) -> Self {
        Self::Io {
            message: "I/O operation failed".to_string(),
            source: error,
        }
    }
}

impl From<serde_json::Error> for Error {
    fn from(error: serde_json::Error) -> Self {
        Self::Json {
            file: "unknown".to_string(),
            message: "JSON decoding failed".to_string(),
            source: Some(error),
        }
    }
}

impl From<polars::error::PolarsError> for Error {
    fn from(error: polars::error::PolarsError) -> Self {
        Self::DatasetWrite {
            message: "Polars operation failed".to_string(),
            source: Some(error),
        }
    }
}

impl From<walkdir::Error> for Error {
    fn from(error: walkdir::Error) -> Self {
        Self::DirectoryTraversal {
            message: "Directory traversal failed".to_string(),
            source: error,
        }
    }
}

impl From<toml::de::Error> for Error {
    fn from(error: toml::de::Error) -> Self {
        Self::Configuration {
            message: format!("Invalid TOML configuration: {}", error),
        }
    }
}
