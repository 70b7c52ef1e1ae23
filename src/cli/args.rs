//! Command-line argument definitions for the Argo chlorophyll processor
//!
//! This module defines the CLI interface using the clap derive API.

use crate::config::CompressionAlgorithm;
use crate::constants::{DEFAULT_FILE_LIST_NAME, DEFAULT_FLOAT_LIST_NAME, DEFAULT_OUTPUT_NAME};
use crate::{Error, Result};
use clap::{Args as ClapArgs, Parser, Subcommand, ValueEnum};
use std::path::PathBuf;

/// CLI arguments for the Argo chlorophyll processor
///
/// Turns BGC-Argo profile files into a single quality-controlled Parquet
/// dataset of chlorophyll and companion variables on a uniform depth grid.
#[derive(Debug, Clone, Parser)]
#[command(
    name = "argo-chla-processor",
    version,
    about = "Quality-control and resample BGC-Argo chlorophyll profiles into a Parquet dataset",
    long_about = "Resolves BGC-Argo profile files against a list of target floats, keeps one \
                  submission per profile (delayed mode preferred), runs a six-stage quality gate \
                  on chlorophyll, resamples accepted profiles onto a fixed depth grid and writes \
                  the result as a single Parquet file."
)]
pub struct Args {
    #[command(subcommand)]
    pub command: Option<Commands>,
}

/// Available subcommands
#[derive(Debug, Clone, Subcommand)]
pub enum Commands {
    /// Resolve, quality-control and resample profiles into a Parquet dataset
    Process(ProcessArgs),
    /// Resolve candidate files and save the identifier list only
    Resolve(ResolveArgs),
    /// Survey a profile directory for floats that carry chlorophyll
    Floats(FloatsArgs),
}

/// Logging flags shared by every command
#[derive(Debug, Clone, Default, ClapArgs)]
pub struct LoggingArgs {
    /// Logging verbosity level
    #[arg(
        short = 'v',
        long = "verbose",
        action = clap::ArgAction::Count,
        help = "Increase logging verbosity (-v: info, -vv: debug, -vvv: trace)"
    )]
    pub verbose: u8,

    /// Only show errors. Overrides verbose settings.
    #[arg(
        short = 'q',
        long = "quiet",
        help = "Suppress output except errors",
        conflicts_with = "verbose"
    )]
    pub quiet: bool,
}

impl LoggingArgs {
    /// Determine the log level from the verbosity flags
    pub fn get_log_level(&self) -> &'static str {
        if self.quiet {
            "error"
        } else {
            match self.verbose {
                0 => "warn",
                1 => "info",
                2 => "debug",
                _ => "trace",
            }
        }
    }

    /// Progress bars are shown unless quiet
    pub fn show_progress(&self) -> bool {
        !self.quiet
    }
}

/// Location of profiles and list files
#[derive(Debug, Clone, ClapArgs)]
pub struct CatalogArgs {
    /// Directory tree holding the profile files (`.nc` or `.json`)
    #[arg(
        short = 'i',
        long = "profiles-dir",
        value_name = "PATH",
        help = "Directory containing profile files"
    )]
    pub profiles_dir: PathBuf,

    /// Target float list, one float number per line
    #[arg(
        long = "float-list",
        value_name = "FILE",
        default_value = DEFAULT_FLOAT_LIST_NAME,
        help = "File listing the target float numbers"
    )]
    pub float_list: PathBuf,

    /// Resolved identifier list written by `resolve` and reused by `process`
    #[arg(
        long = "file-list",
        value_name = "FILE",
        default_value = DEFAULT_FILE_LIST_NAME,
        help = "File holding the resolved profile list"
    )]
    pub file_list: PathBuf,
}

impl CatalogArgs {
    pub fn validate(&self) -> Result<()> {
        if !self.profiles_dir.is_dir() {
            return Err(Error::configuration(format!(
                "Profile directory does not exist: {}",
                self.profiles_dir.display()
            )));
        }
        Ok(())
    }
}

/// Parquet compression choices on the command line
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum CompressionArg {
    Snappy,
    Zstd,
    Lz4,
    None,
}

impl From<CompressionArg> for CompressionAlgorithm {
    fn from(arg: CompressionArg) -> Self {
        match arg {
            CompressionArg::Snappy => CompressionAlgorithm::Snappy,
            CompressionArg::Zstd => CompressionAlgorithm::Zstd,
            CompressionArg::Lz4 => CompressionAlgorithm::Lz4,
            CompressionArg::None => CompressionAlgorithm::Uncompressed,
        }
    }
}

/// Arguments for the process command
#[derive(Debug, Clone, ClapArgs)]
pub struct ProcessArgs {
    #[command(flatten)]
    pub catalog: CatalogArgs,

    /// Output Parquet file
    #[arg(
        short = 'o',
        long = "output",
        value_name = "FILE",
        default_value = DEFAULT_OUTPUT_NAME,
        help = "Output Parquet file"
    )]
    pub output: PathBuf,

    /// Reuse a previously saved resolved list instead of rescanning
    #[arg(
        long = "reuse-file-list",
        help = "Reuse the saved resolved profile list when present"
    )]
    pub reuse_file_list: bool,

    /// Path to configuration file
    ///
    /// TOML configuration file for thresholds and grid settings. If not
    /// specified, looks for <config_dir>/argo-chla-processor/config.toml
    #[arg(
        short = 'c',
        long = "config",
        value_name = "FILE",
        help = "Path to configuration file (TOML format)"
    )]
    pub config_file: Option<PathBuf>,

    /// Parquet compression, overriding the configuration file
    #[arg(long = "compression", value_enum, help = "Parquet compression algorithm")]
    pub compression: Option<CompressionArg>,

    /// Add a day/night label to every accepted profile
    #[arg(long = "day-night", help = "Label profiles as day or night")]
    pub day_night: bool,

    /// Deepest grid level in metres, overriding the configuration file
    #[arg(long = "max-depth", value_name = "METRES", help = "Deepest grid level (m)")]
    pub max_depth: Option<f64>,

    /// Grid spacing in metres, overriding the configuration file
    #[arg(long = "depth-step", value_name = "METRES", help = "Grid spacing (m)")]
    pub depth_step: Option<f64>,

    #[command(flatten)]
    pub logging: LoggingArgs,
}

impl ProcessArgs {
    /// Validate the process command arguments for consistency
    pub fn validate(&self) -> Result<()> {
        self.catalog.validate()?;

        if let Some(config_file) = &self.config_file {
            if !config_file.exists() {
                return Err(Error::configuration(format!(
                    "Config file does not exist: {}",
                    config_file.display()
                )));
            }
        }
        if self.output.is_dir() {
            return Err(Error::configuration(format!(
                "Output path is a directory: {}",
                self.output.display()
            )));
        }
        Ok(())
    }
}

/// Arguments for the resolve command
#[derive(Debug, Clone, ClapArgs)]
pub struct ResolveArgs {
    #[command(flatten)]
    pub catalog: CatalogArgs,

    #[command(flatten)]
    pub logging: LoggingArgs,
}

/// Arguments for the floats command
#[derive(Debug, Clone, ClapArgs)]
pub struct FloatsArgs {
    /// Directory tree holding the profile files
    #[arg(
        short = 'i',
        long = "profiles-dir",
        value_name = "PATH",
        help = "Directory containing profile files"
    )]
    pub profiles_dir: PathBuf,

    /// Where to write the float list
    #[arg(
        short = 'o',
        long = "output",
        value_name = "FILE",
        default_value = DEFAULT_FLOAT_LIST_NAME,
        help = "Float list to write"
    )]
    pub output: PathBuf,

    #[command(flatten)]
    pub logging: LoggingArgs,
}

impl FloatsArgs {
    pub fn validate(&self) -> Result<()> {
        if !self.profiles_dir.is_dir() {
            return Err(Error::configuration(format!(
                "Profile directory does not exist: {}",
                self.profiles_dir.display()
            )));
        }
        Ok(())
    }
}

impl Commands {
    /// Logging flags of the selected command
    pub fn logging(&self) -> &LoggingArgs {
        match self {
            Commands::Process(args) => &args.logging,
            Commands::Resolve(args) => &args.logging,
            Commands::Floats(args) => &args.logging,
        }
    }
}
