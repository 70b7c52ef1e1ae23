use argo_chla_processor::cli::{args::Args, commands};
use clap::Parser;
use std::process;

fn main() {
    let args = Args::parse();

    // If no subcommand was provided, show help and available commands
    if args.command.is_none() {
        show_help_and_commands();
        process::exit(0);
    }

    match commands::run(args) {
        Ok(_stats) => {
            // Stats have already been reported by the command
            process::exit(0);
        }
        Err(error) => {
            eprintln!("Error: {:#}", anyhow::Error::new(error));
            process::exit(1);
        }
    }
}

/// Show help information and available commands when no subcommand is provided
fn show_help_and_commands() {
    println!("Argo Chlorophyll Processor - BGC-Argo profile QC and resampling");
    println!("================================================================");
    println!();
    println!("Quality-control BGC-Argo chlorophyll profiles, resample them onto a");
    println!("uniform depth grid and write a single Parquet dataset.");
    println!();
    println!("USAGE:");
    println!("    argo-chla-processor <COMMAND> [OPTIONS]");
    println!();
    println!("COMMANDS:");
    println!("    process     Resolve, quality-control and resample profiles (main command)");
    println!("    resolve     Resolve candidate files and save the profile list");
    println!("    floats      List floats whose profiles carry chlorophyll");
    println!("    help        Show this help message or help for specific commands");
    println!();
    println!("OPTIONS:");
    println!("    -h, --help       Show help information");
    println!("    -V, --version    Show version information");
    println!();
    println!("EXAMPLES:");
    println!("    argo-chla-processor floats -i ./profiles");
    println!("    argo-chla-processor process -i ./profiles -o chla.parquet --day-night");
    println!("    argo-chla-processor process -i ./profiles --reuse-file-list -v");
    println!();
    println!("For more information on a specific command, use:");
    println!("    argo-chla-processor <COMMAND> --help");
}
