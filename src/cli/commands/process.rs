//! Process command implementation
//!
//! Resolves the profile list, runs every profile through the quality gate
//! and resampler, writes the Parquet dataset and reports attrition.

use super::shared::{ProcessingStats, create_progress_bar, load_configuration, setup_logging};
use crate::Result;
use crate::app::adapters::filesystem::{DirectoryCatalog, FileProfileSource};
use crate::app::interfaces::DatasetWriter;
use crate::app::services::aggregator::writer::ParquetDatasetWriter;
use crate::app::services::day_night::SolarClassifier;
use crate::app::services::pipeline::{
    PipelineOutcome, ProfilePipeline, ResolvedInput, prepare_identifiers,
};
use crate::cli::args::ProcessArgs;
use colored::*;
use indicatif::HumanDuration;
use std::time::Instant;
use tracing::{debug, info};

/// Run the process command
pub fn run_process(args: ProcessArgs) -> Result<ProcessingStats> {
    let start_time = Instant::now();

    setup_logging(&args.logging)?;
    info!("Starting Argo chlorophyll processor");
    debug!("Command line arguments: {:?}", args);

    args.validate()?;
    let config = load_configuration(&args)?;
    debug!("Loaded configuration: {:?}", config);

    let catalog = DirectoryCatalog::new(
        &args.catalog.profiles_dir,
        &args.catalog.float_list,
        &args.catalog.file_list,
    );
    let input = prepare_identifiers(&catalog, args.reuse_file_list)?;

    let source = FileProfileSource::new();
    let classifier = SolarClassifier::new();
    let mut pipeline = ProfilePipeline::new(&source, &config);
    if config.output.classify_day_night {
        pipeline = pipeline.with_classifier(&classifier);
    }
    if args.logging.show_progress() {
        pipeline = pipeline.with_progress(create_progress_bar(
            input.identifiers.len() as u64,
            "Processing profiles",
        ));
    }
    let outcome = pipeline.run(&input.identifiers);

    let writer = ParquetDatasetWriter::new(&args.output, config.output.compression);
    let bytes = writer.write(&outcome.dataset)?;

    let stats = ProcessingStats {
        profiles_listed: input.identifiers.len(),
        profiles_accepted: outcome.stats.accepted,
        rows_written: outcome.dataset.row_count(),
        errors_encountered: outcome.stats.load_failures,
        processing_time: start_time.elapsed(),
        output_sizes: vec![(writer.output_path().display().to_string(), bytes)],
    };

    if !args.logging.quiet {
        print_summary(&input, &outcome, &stats);
    }
    Ok(stats)
}

fn print_summary(input: &ResolvedInput, outcome: &PipelineOutcome, stats: &ProcessingStats) {
    println!("\n{}", "Processing Summary".bright_green().bold());

    match &input.resolution {
        Some(resolution) => println!("  {}", resolution.summary()),
        None => println!(
            "  {} {}",
            "Reused saved file list:".bright_cyan(),
            input.identifiers.len().to_string().bright_white()
        ),
    }
    for line in outcome.stats.summary().lines() {
        println!("  {}", line.trim_start());
    }

    if outcome.stats.total_rejections() > 0 {
        println!("\n{}", "Quality gate rejections".bright_yellow());
        for (code, count) in outcome.stats.rejection_breakdown() {
            if count > 0 {
                println!(
                    "  {} {}",
                    format!("{}:", code.as_str()).bright_cyan(),
                    count.to_string().bright_white()
                );
            }
        }
    }

    println!();
    println!(
        "  {} {}",
        "Profiles written:".bright_cyan(),
        stats.profiles_accepted.to_string().bright_white()
    );
    println!(
        "  {} {}",
        "Rows written:".bright_cyan(),
        stats.rows_written.to_string().bright_white()
    );
    for (path, size) in &stats.output_sizes {
        println!(
            "  {} {} ({})",
            "Output:".bright_cyan(),
            path.bright_white(),
            ProcessingStats::format_size(*size)
        );
    }
    println!(
        "  {} {}",
        "Processing time:".bright_cyan(),
        HumanDuration(stats.processing_time)
    );
    if stats.errors_encountered > 0 {
        println!(
            "  {} {}",
            "Unreadable files:".bright_red().bold(),
            stats.errors_encountered.to_string().bright_red().bold()
        );
    }
}
