//! Output formatting and styling module.
//!
//! Everything the user reads goes through [`OutputFormatter`]. Messages shown
//! during the sorting loop take an explicit writer so the loop can run against
//! any terminal; end-of-session messages go to stdout and stderr directly.

use colored::*;
use crossterm::{
    cursor::MoveTo,
    queue,
    terminal::{Clear, ClearType},
};
use indicatif::{ProgressBar, ProgressStyle};
use std::collections::HashMap;
use std::io::{self, Write};

/// Manages all CLI output with consistent styling and formatting.
pub struct OutputFormatter;

impl OutputFormatter {
    /// Clears the terminal and moves the cursor to the top-left corner.
    pub fn clear_screen<W: Write>(out: &mut W) -> io::Result<()> {
        queue!(out, Clear(ClearType::All), MoveTo(0, 0))
    }

    /// Writes a warning in yellow with a warning symbol.
    pub fn warning<W: Write + ?Sized>(out: &mut W, message: &str) -> io::Result<()> {
        writeln!(out, "{} {}", "⚠".yellow(), message)
    }

    /// Writes a hint after an answer that could not be used.
    pub fn hint<W: Write + ?Sized>(out: &mut W, message: &str) -> io::Result<()> {
        writeln!(out, "{}", message.cyan())
    }

    /// Prints an error message in red with an X mark.
    ///
    /// # Example
    ///
    /// ```no_run
    /// use imagesorter::output::OutputFormatter;
    /// OutputFormatter::error("failed to move a.png");
    /// ```
    pub fn error(message: &str) {
        eprintln!("{} {}", "✗".red(), message);
    }

    /// Prints a success message in green with a checkmark.
    pub fn success(message: &str) {
        println!("{} {}", "✓".green(), message);
    }

    /// Prints a section header.
    pub fn header(header: &str) {
        println!("\n{}", header.bold());
    }

    /// Starts a spinner shown while an image decodes.
    ///
    /// The spinner draws on stderr and stays hidden when stderr is not a
    /// terminal.
    pub fn decode_spinner(name: &str) -> ProgressBar {
        let spinner = ProgressBar::new_spinner();
        if let Ok(style) = ProgressStyle::with_template("{spinner:.cyan} {msg}") {
            spinner.set_style(style);
        }
        spinner.set_message(format!("decoding {}", name));
        spinner.tick();
        spinner
    }

    /// Prints how many images went to each destination.
    ///
    /// # Example
    ///
    /// ```no_run
    /// use imagesorter::output::OutputFormatter;
    /// use std::collections::HashMap;
    ///
    /// let mut counts = HashMap::new();
    /// counts.insert("keep".to_string(), 15);
    /// counts.insert("trash".to_string(), 8);
    /// OutputFormatter::summary_table(&counts, 4);
    /// ```
    pub fn summary_table(destination_counts: &HashMap<String, usize>, skipped: usize) {
        Self::header("SUMMARY");

        let mut destinations: Vec<_> = destination_counts.iter().collect();
        destinations.sort_by_key(|&(name, _)| name);

        let width = destinations
            .iter()
            .map(|(name, _)| name.len())
            .max()
            .unwrap_or(0)
            .max("Destination".len());

        println!(
            "{:<width$} | {}",
            "Destination".bold(),
            "Images".bold(),
            width = width
        );
        println!("{}", "-".repeat(width + 10));

        let mut total = 0;
        for (destination, count) in &destinations {
            total += **count;
            println!(
                "{:<width$} | {} {}",
                destination,
                count.to_string().green(),
                image_word(**count),
                width = width
            );
        }

        println!("{}", "-".repeat(width + 10));
        println!(
            "{:<width$} | {} {}",
            "Moved".bold(),
            total.to_string().green().bold(),
            image_word(total),
            width = width
        );
        println!(
            "{:<width$} | {} {}",
            "Skipped".bold(),
            skipped.to_string().yellow(),
            image_word(skipped),
            width = width
        );
    }
}

fn image_word(count: usize) -> &'static str {
    if count == 1 { "image" } else { "images" }
}
