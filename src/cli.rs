//! Command-line interface module for imagesorter.
//!
//! This module handles:
//! - The clap argument definition
//! - Usage text
//! - Wiring the terminal's stdin and stdout into a sorting session

use crate::config::SortConfig;
use crate::error::SortResult;
use crate::output::OutputFormatter;
use crate::sorter::{Outcome, SessionReport, Sorter};
use clap::{CommandFactory, Parser};
use std::io;
use std::path::PathBuf;

/// Sort the images of a directory into other directories, one at a time.
///
/// Each image is shown inline in the terminal. Answer with the number of a
/// destination, an empty line to leave the image where it is, or a new
/// directory path to create it and move the image there. Close the input
/// (Ctrl-D) to quit.
#[derive(Debug, Parser)]
#[command(name = "imagesorter", version)]
#[command(after_help = "Example: imagesorter ~/Pictures cool_stuff mediocre_stuff can_be_deleted_safely")]
pub struct SortArgs {
    /// Directory containing the images to sort
    pub source: Option<PathBuf>,

    /// Directories to sort into (with --scan: the one directory whose subdirectories are used)
    pub destinations: Vec<PathBuf>,

    /// Draw images with sixel instead of the kitty graphics protocol
    #[arg(long)]
    pub sixel: bool,

    /// Use every subdirectory of the single target directory as a destination
    #[arg(long)]
    pub scan: bool,

    /// Ask again instead of creating a directory when the answer is not a number
    #[arg(long)]
    pub no_create: bool,

    /// Skip images that cannot be opened or decoded instead of stopping
    #[arg(long)]
    pub skip_unreadable: bool,

    /// Enable debug logging on stderr
    #[arg(short, long)]
    pub verbose: bool,

    /// Disable colored output
    #[arg(long)]
    pub no_color: bool,
}

/// Returns true when the first argument asks for help.
///
/// Any first argument containing `help` counts, which also covers `--help`
/// and `-help`.
pub fn wants_help(args: &[String]) -> bool {
    args.get(1).is_some_and(|arg| arg.contains("help"))
}

/// Prints the full usage text to stdout.
pub fn print_usage() -> io::Result<()> {
    SortArgs::command().print_long_help()
}

/// Runs an interactive session on the process's stdin and stdout.
///
/// Prints the per-destination summary when every image has been shown.
pub fn run_cli(config: &SortConfig) -> SortResult<SessionReport> {
    let stdin = io::stdin().lock();
    let stdout = io::stdout().lock();

    let mut sorter = Sorter::new(config, stdin, stdout)?;
    let report = sorter.run()?;
    drop(sorter);

    if report.outcome == Outcome::Finished {
        OutputFormatter::summary_table(&report.moved, report.skipped);
        OutputFormatter::success("All images sorted.");
    }

    Ok(report)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn args(list: &[&str]) -> Vec<String> {
        list.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn test_wants_help() {
        assert!(wants_help(&args(&["imagesorter", "help"])));
        assert!(wants_help(&args(&["imagesorter", "--help"])));
        assert!(!wants_help(&args(&["imagesorter"])));
        assert!(!wants_help(&args(&["imagesorter", "pics", "help"])));
    }

    #[test]
    fn test_args_accept_flags_anywhere() {
        let parsed = SortArgs::try_parse_from([
            "imagesorter",
            "pics",
            "keep",
            "--scan",
            "-v",
            "--skip-unreadable",
        ])
        .unwrap();

        assert_eq!(parsed.source, Some(PathBuf::from("pics")));
        assert_eq!(parsed.destinations, vec![PathBuf::from("keep")]);
        assert!(parsed.scan);
        assert!(parsed.verbose);
        assert!(parsed.skip_unreadable);
        assert!(!parsed.sixel);
    }

    #[test]
    fn test_command_definition_is_valid() {
        SortArgs::command().debug_assert();
    }
}
