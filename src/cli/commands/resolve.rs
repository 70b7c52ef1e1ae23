//! Resolve command implementation
//!
//! Scans the profile directory, keeps one ascending file per profile for the
//! target floats and saves the list for later `process --reuse-file-list` runs.

use super::shared::{ProcessingStats, setup_logging};
use crate::Result;
use crate::app::adapters::filesystem::DirectoryCatalog;
use crate::app::services::pipeline::prepare_identifiers;
use crate::cli::args::ResolveArgs;
use colored::*;
use std::time::Instant;
use tracing::info;

/// Run the resolve command
pub fn run_resolve(args: ResolveArgs) -> Result<ProcessingStats> {
    let start_time = Instant::now();

    setup_logging(&args.logging)?;
    args.catalog.validate()?;

    let catalog = DirectoryCatalog::new(
        &args.catalog.profiles_dir,
        &args.catalog.float_list,
        &args.catalog.file_list,
    );
    let input = prepare_identifiers(&catalog, false)?;
    info!(
        "Resolved {} profiles into {}",
        input.identifiers.len(),
        catalog.file_list().display()
    );

    let stats = ProcessingStats {
        profiles_listed: input.resolution.as_ref().map_or(0, |r| r.listed),
        profiles_accepted: input.identifiers.len(),
        processing_time: start_time.elapsed(),
        ..ProcessingStats::default()
    };

    if !args.logging.quiet {
        println!("\n{}", "Resolution Summary".bright_green().bold());
        if let Some(resolution) = &input.resolution {
            println!("  {}", resolution.summary());
        }
        println!(
            "  {} {}",
            "File list:".bright_cyan(),
            catalog.file_list().display().to_string().bright_white()
        );
    }
    Ok(stats)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::app::adapters::filesystem::read_id_list;
    use crate::cli::args::{CatalogArgs, LoggingArgs};
    use tempfile::TempDir;

    #[test]
    fn test_resolve_writes_file_list() {
        let temp_dir = TempDir::new().unwrap();
        let profiles = temp_dir.path().join("profiles");
        std::fs::create_dir_all(&profiles).unwrap();
        for name in [
            "SD5904855_001.nc",
            "SR5904855_001.nc",
            "SD5904855_002D.nc",
            "SR6901474_001.nc",
        ] {
            std::fs::write(profiles.join(name), b"").unwrap();
        }
        let float_list = temp_dir.path().join("floats.txt");
        std::fs::write(&float_list, "5904855\n").unwrap();
        let file_list = temp_dir.path().join("files.txt");

        let args = ResolveArgs {
            catalog: CatalogArgs {
                profiles_dir: profiles,
                float_list,
                file_list: file_list.clone(),
            },
            logging: LoggingArgs {
                verbose: 0,
                quiet: true,
            },
        };
        let stats = run_resolve(args).unwrap();

        assert_eq!(stats.profiles_listed, 4);
        assert_eq!(stats.profiles_accepted, 1);
        let saved = read_id_list(&file_list).unwrap();
        assert_eq!(saved.len(), 1);
        assert!(saved[0].ends_with("SD5904855_001.nc"));
    }
}
