//! Command-line interface for the extractor.

use std::path::{Path, PathBuf};

use clap::{CommandFactory, Parser};
use console::style;
use indicatif::{ProgressBar, ProgressStyle};

use crate::error::{ExtractorError, Result};
use crate::extractor::extract;
use crate::lister::list_titles;
use crate::types::{ExtractionMode, ExtractionOutcome, Listing};

const EXAMPLES: &str = "\
Examples:
  # Extract all questions with \"DCIT 408\" in the title
  qti-extract \"DCIT 408\" \"DCIT 201 programming 1.xml\"

  # Extract to a specific directory
  qti-extract \"DCIT 408\" \"DCIT 201 programming 1.xml\" -o extracted_questions/

  # Extract whole sections, each wrapped in an assessment
  qti-extract --sections \"DCIT 318\" \"DCIT 201 programming 1.xml\"

  # List all available titles
  qti-extract --list \"DCIT 201 programming 1.xml\"

  # List titles containing a specific pattern
  qti-extract --list \"DCIT 201 programming 1.xml\" -p \"DCIT 408\"";

/// Extract questions from QTI XML files based on title patterns.
#[derive(Debug, Parser)]
#[command(name = "qti-extract")]
#[command(version, about, long_about = None, after_help = EXAMPLES)]
pub struct Cli {
    /// Pattern to search for in titles (case-insensitive)
    pub title_pattern: Option<String>,

    /// Path to the input XML file
    pub input_file: Option<PathBuf>,

    /// Output directory (default: same directory as the input file)
    #[arg(short, long = "output", value_name = "DIR")]
    pub output_dir: Option<PathBuf>,

    /// List the sections and item titles in the XML file
    #[arg(long)]
    pub list: bool,

    /// Pattern to filter titles when listing (use with --list)
    #[arg(short = 'p', long = "pattern", value_name = "PATTERN")]
    pub list_pattern: Option<String>,

    /// Extract matching sections as assessments. Without this flag only item
    /// titles are matched, never section titles
    #[arg(long)]
    pub sections: bool,

    /// Enable debug output to troubleshoot issues
    #[arg(long)]
    pub debug: bool,
}

impl Cli {
    pub fn mode(&self) -> ExtractionMode {
        if self.sections {
            ExtractionMode::SectionAware
        } else {
            ExtractionMode::Flat
        }
    }
}

/// Run the CLI.
pub fn run(cli: Cli) -> Result<()> {
    if cli.list {
        let input = listing_input(&cli)?;
        return list_command(&input, cli.list_pattern.as_deref());
    }

    let mode = cli.mode();
    let (Some(pattern), Some(input)) = (cli.title_pattern.as_deref(), cli.input_file.as_deref())
    else {
        let missing = if cli.title_pattern.is_none() {
            "a title pattern to search for"
        } else {
            "an input XML file path"
        };
        Cli::command().print_help()?;
        println!();
        return Err(ExtractorError::MissingArgument(missing));
    };

    extract_command(pattern, input, cli.output_dir.as_deref(), mode)
}

/// Input for `--list`: the second positional, or the first one when it
/// names an existing file.
fn listing_input(cli: &Cli) -> Result<PathBuf> {
    if let Some(input) = &cli.input_file {
        return Ok(input.clone());
    }
    match cli.title_pattern.as_deref().map(Path::new) {
        Some(path) if path.is_file() => Ok(path.to_path_buf()),
        _ => Err(ExtractorError::MissingArgument("an input XML file path")),
    }
}

/// Execute an extraction.
fn extract_command(
    pattern: &str,
    input: &Path,
    output: Option<&Path>,
    mode: ExtractionMode,
) -> Result<()> {
    if !input.is_file() {
        return Err(ExtractorError::MissingFile(input.to_path_buf()));
    }

    println!(
        "{} '{}'",
        style("Searching for titles containing:").bold(),
        style(pattern).cyan()
    );
    println!("Input file: {}", input.display());
    if let Some(dir) = output {
        println!("Output directory: {}", dir.display());
    }

    let pb = ProgressBar::new_spinner();
    #[allow(clippy::expect_used)] // Static template string that is guaranteed to be valid
    pb.set_style(
        ProgressStyle::default_spinner()
            .template("{spinner:.green} {msg}")
            .expect("valid template"),
    );
    pb.set_message("Extracting items...");
    pb.enable_steady_tick(std::time::Duration::from_millis(100));

    let outcome = extract(input, pattern, output, mode);
    pb.finish_and_clear();

    print!("{}", render_outcome(&outcome?, pattern));
    Ok(())
}

/// Execute a listing.
fn list_command(input: &Path, pattern: Option<&str>) -> Result<()> {
    let listing = list_titles(input, pattern)?;
    print!("{}", render_listing(&listing, input, pattern));
    Ok(())
}

/// Render the result of an extraction for the terminal.
pub fn render_outcome(outcome: &ExtractionOutcome, pattern: &str) -> String {
    let mut lines = Vec::new();

    match outcome {
        ExtractionOutcome::NoMatch { available_titles } => {
            lines.push(
                style(format!("No items found with title containing '{pattern}'"))
                    .yellow()
                    .to_string(),
            );
            lines.push(format!(
                "\nAll available titles ({} unique):",
                available_titles.len()
            ));
            lines.extend(available_titles.iter().map(|title| format!("  - {title}")));
        }
        ExtractionOutcome::Extracted(report) => {
            if report.matched_sections > 0 {
                lines.push(format!("Found {} matching sections", report.matched_sections));
            }
            lines.push(format!("Found {} matching items", report.matched_items));
            for skipped in &report.skipped {
                lines.push(format!(
                    "{} section '{}' (ident: {}): no items",
                    style("Skipping").yellow(),
                    skipped.title,
                    skipped.ident
                ));
            }
            for file in &report.written {
                lines.push(format!(
                    "{} {} items to: {}",
                    style("Extracted").green().bold(),
                    file.item_count,
                    file.path.display()
                ));
            }
        }
    }

    join_lines(&lines)
}

/// Render a title listing for the terminal.
pub fn render_listing(listing: &Listing, input: &Path, pattern: Option<&str>) -> String {
    let mut lines = vec![
        format!("\nAvailable titles in '{}':", input.display()),
        "=".repeat(50),
    ];

    if listing.total_sections > 0 {
        lines.push(format!(
            "\n{} (Total: {}):",
            style("SECTIONS").bold(),
            listing.total_sections
        ));
        if let Some(p) = pattern {
            lines.push(format!(
                "Sections containing '{p}' ({}):",
                listing.sections.len()
            ));
        }
        lines.extend(
            listing
                .sections
                .iter()
                .map(|section| format!("  - {} (ident: {})", section.title, section.ident)),
        );
    }

    if listing.total_items > 0 {
        lines.push(format!(
            "\n{} (Total: {}):",
            style("ITEMS").bold(),
            listing.total_items
        ));
        if let Some(p) = pattern {
            lines.push(format!(
                "Items containing '{p}' ({}):",
                listing.listed_items()
            ));
        }
        lines.extend(
            listing
                .item_prefixes
                .iter()
                .map(|entry| format!("  - {} ({} items)", entry.prefix, entry.count)),
        );
    }

    join_lines(&lines)
}

/// Join lines so every one ends with a newline.
fn join_lines(lines: &[String]) -> String {
    lines.iter().map(|line| format!("{line}\n")).collect()
}
