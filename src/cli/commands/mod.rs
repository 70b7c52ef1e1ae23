//! Command implementations for the Argo chlorophyll processor CLI
//!
//! Each command lives in its own module:
//! - `process`: resolve, quality-control, resample and write Parquet
//! - `resolve`: resolve and save the profile file list only
//! - `floats`: survey a directory for floats carrying chlorophyll

pub mod floats;
pub mod process;
pub mod resolve;
pub mod shared;

pub use shared::ProcessingStats;

use crate::cli::args::{Args, Commands};
use crate::{Error, Result};

/// Dispatch to the selected subcommand
pub fn run(args: Args) -> Result<ProcessingStats> {
    match args.command {
        Some(Commands::Process(process_args)) => process::run_process(process_args),
        Some(Commands::Resolve(resolve_args)) => resolve::run_resolve(resolve_args),
        Some(Commands::Floats(floats_args)) => floats::run_floats(floats_args),
        None => Err(Error::configuration("No command given")),
    }
}
