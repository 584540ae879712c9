//! pdfstitch - Stitch selected pages from PDF files into a single document.
//!
//! CLI entry point: merge, inspect, and convert subcommands.

use clap::Parser;
use std::process;

use pdfstitch::cli::{Cli, Command, ConvertArgs, InspectArgs, MergeArgs};
use pdfstitch::config::{MergeConfig, OverwriteMode};
use pdfstitch::convert::OfficeConverter;
use pdfstitch::error::StitchError;
use pdfstitch::merge::Merger;
use pdfstitch::output::{OutputFormatter, display_merge_statistics};
use pdfstitch::store::{StoredUpload, read_document, write_document};

#[tokio::main]
async fn main() {
    // Parse CLI arguments
    let cli = Cli::parse();

    // Run the application and handle errors
    if let Err(err) = run(cli).await {
        eprintln!("Error: {err}");
        process::exit(err.exit_code());
    }
}

/// Main application logic.
async fn run(cli: Cli) -> Result<(), StitchError> {
    match cli.command {
        Command::Merge(args) => run_merge(args).await,
        Command::Inspect(args) => run_inspect(args).await,
        Command::Convert(args) => run_convert(args).await,
    }
}

/// Merge selected pages from the given inputs into one output document.
async fn run_merge(args: MergeArgs) -> Result<(), StitchError> {
    let config = args.to_config().await?;
    let formatter = OutputFormatter::from_config(&config);

    if formatter.should_print() {
        formatter.section(&format!("{} v{}", pdfstitch::NAME, pdfstitch::VERSION));
        formatter.blank_line();
    }

    handle_output_overwrite(&config, &formatter).await?;

    formatter.info("Merging documents...");
    if formatter.is_verbose() {
        for (index, selection) in config.selections.iter().enumerate() {
            let pages = if selection.ranges.trim().is_empty() {
                "all pages".to_string()
            } else {
                format!("pages {}", selection.ranges)
            };
            formatter.list_item(index + 1, &format!("{} ({pages})", selection.path.display()));
        }
    }

    let merger = Merger::new();
    let outcome = merger.merge_selections(&config.selections).await?;

    if formatter.should_print() {
        display_merge_statistics(&formatter, &outcome.statistics);
    }

    formatter.debug(&format!("Writing to: {}", config.output.display()));
    write_document(&outcome.document, &config.output).await?;

    formatter.success(&format!(
        "Successfully created {} ({} pages)",
        config.output.display(),
        outcome.statistics.total_pages
    ));

    Ok(())
}

/// Report page counts for the given documents as JSON on stdout.
///
/// Documents that fail to parse report `null` instead of a count, matching
/// the store's upload report shape.
async fn run_inspect(args: InspectArgs) -> Result<(), StitchError> {
    let mut reports = Vec::with_capacity(args.inputs.len());

    for input in &args.inputs {
        let pages = match read_document(input).await {
            Ok(doc) => Some(doc.get_pages().len()),
            Err(StitchError::FileNotFound { name }) => {
                return Err(StitchError::file_not_found(name));
            }
            Err(_) => None,
        };

        reports.push(StoredUpload {
            name: input.display().to_string(),
            pages,
        });
    }

    let json = serde_json::to_string_pretty(&reports)
        .map_err(|e| StitchError::other(format!("Failed to serialize report: {e}")))?;
    println!("{json}");

    Ok(())
}

/// Convert the given documents through the office collaborator.
async fn run_convert(args: ConvertArgs) -> Result<(), StitchError> {
    let converter = OfficeConverter::discover()?;
    let formatter = OutputFormatter::default();

    for input in &args.inputs {
        let output = converter
            .convert(input, &args.outdir, args.to.into())
            .await?;
        formatter.success(&format!(
            "Converted {} -> {}",
            input.display(),
            output.display()
        ));
    }

    Ok(())
}

/// Handle output file overwrite scenarios.
async fn handle_output_overwrite(
    config: &MergeConfig,
    formatter: &OutputFormatter,
) -> Result<(), StitchError> {
    // Check if output exists
    if !config.output.exists() {
        return Ok(());
    }

    match config.overwrite_mode {
        OverwriteMode::Force => {
            // Just overwrite, no questions asked
            Ok(())
        }
        OverwriteMode::NoClobber => {
            // Error if file exists
            Err(StitchError::output_exists(config.output.clone()))
        }
        OverwriteMode::Prompt => {
            // Ask user for confirmation
            if formatter.is_quiet() {
                // In quiet mode, treat as no-clobber
                return Err(StitchError::output_exists(config.output.clone()));
            }

            formatter.warning(&format!(
                "Output file already exists: {}",
                config.output.display()
            ));

            // Simple yes/no prompt
            use std::io::{self, Write};
            print!("Overwrite? [y/N]: ");
            io::stdout().flush().ok();

            let mut response = String::new();
            io::stdin()
                .read_line(&mut response)
                .map_err(|err| StitchError::other(format!("Failed to read input: {err}")))?;

            let response = response.trim().to_lowercase();
            if response == "y" || response == "yes" {
                Ok(())
            } else {
                Err(StitchError::Cancelled)
            }
        }
    }
}
