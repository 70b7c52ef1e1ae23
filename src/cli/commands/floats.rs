//! Floats command implementation
//!
//! Opens every profile file under a directory and writes the list of floats
//! that report chlorophyll.

use super::shared::{ProcessingStats, create_progress_bar, setup_logging};
use crate::Result;
use crate::app::adapters::filesystem::{FileProfileSource, scan_profile_files, write_id_list};
use crate::app::services::float_survey::survey_floats;
use crate::cli::args::FloatsArgs;
use colored::*;
use std::time::Instant;
use tracing::info;

/// Run the floats command
pub fn run_floats(args: FloatsArgs) -> Result<ProcessingStats> {
    let start_time = Instant::now();

    setup_logging(&args.logging)?;
    args.validate()?;

    let files = scan_profile_files(&args.profiles_dir)?;
    info!("Surveying {} profile files", files.len());

    let progress = args
        .logging
        .show_progress()
        .then(|| create_progress_bar(files.len() as u64, "Surveying floats"));
    let survey = survey_floats(&files, &FileProfileSource::new(), progress.as_ref());
    if let Some(pb) = &progress {
        pb.finish_with_message(format!("{} floats with CHLA", survey.floats.len()));
    }

    let floats: Vec<&String> = survey.floats.iter().collect();
    write_id_list(&args.output, &floats)?;
    info!("Wrote {} floats to {}", floats.len(), args.output.display());

    let stats = ProcessingStats {
        profiles_listed: survey.stats.listed,
        profiles_accepted: survey.floats.len(),
        errors_encountered: survey.stats.unreadable,
        processing_time: start_time.elapsed(),
        ..ProcessingStats::default()
    };

    if !args.logging.quiet {
        println!("\n{}", "Float Survey Summary".bright_green().bold());
        println!("  {}", survey.summary());
        println!(
            "  {} {}",
            "Float list:".bright_cyan(),
            args.output.display().to_string().bright_white()
        );
    }
    Ok(stats)
}
