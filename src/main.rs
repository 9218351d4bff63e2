use clap::Parser;
use imagesorter::cli::{self, SortArgs, run_cli};
use imagesorter::config::SortConfig;
use imagesorter::output::OutputFormatter;
use std::env;
use std::process::ExitCode;
use tracing::Level;
use tracing_subscriber::FmtSubscriber;

/// Exit status for invalid usage, matching clap's own parse errors.
const USAGE_ERROR: u8 = 2;

fn main() -> ExitCode {
    let args: Vec<String> = env::args().collect();

    if cli::wants_help(&args) {
        if let Err(e) = cli::print_usage() {
            OutputFormatter::error(&format!("failed to print usage: {}", e));
            return ExitCode::FAILURE;
        }
        return ExitCode::SUCCESS;
    }

    let args = SortArgs::parse_from(args);

    if args.no_color {
        colored::control::set_override(false);
    }

    // Setup logging
    let log_level = if args.verbose {
        Level::DEBUG
    } else {
        Level::WARN
    };
    let subscriber = FmtSubscriber::builder()
        .with_max_level(log_level)
        .with_ansi(!args.no_color)
        .with_writer(std::io::stderr)
        .finish();
    if let Err(e) = tracing::subscriber::set_global_default(subscriber) {
        eprintln!("Warning: could not set up logging: {}", e);
    }

    let config = match SortConfig::from_args(&args) {
        Ok(config) => config,
        Err(e) => {
            OutputFormatter::error(&e.to_string());
            eprintln!("Run 'imagesorter help' for usage.");
            return ExitCode::from(USAGE_ERROR);
        }
    };

    match run_cli(&config) {
        Ok(report) => {
            tracing::debug!(
                moved = report.total_moved(),
                skipped = report.skipped,
                "session ended: {:?}",
                report.outcome
            );
            ExitCode::SUCCESS
        }
        Err(e) => {
            OutputFormatter::error(&e.to_string());
            ExitCode::FAILURE
        }
    }
}
