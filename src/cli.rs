//! CLI argument parsing for pdfstitch.
//!
//! This module defines the command-line interface structure using `clap`.
//! It handles argument parsing, validation, and help text generation.
//!
//! # Examples
//!
//! ```no_run
//! use pdfstitch::cli::Cli;
//! use clap::Parser;
//!
//! let cli = Cli::parse();
//! ```

use clap::{Parser, Subcommand, ValueEnum};
use std::path::PathBuf;

use crate::config::{MergeConfig, OverwriteMode, SourceSelection};
use crate::convert::ConvertTarget;
use crate::error::{Result, StitchError};
use crate::merge::MergePlan;
use crate::utils::collect_paths_for_pattern;

/// Stitch selected pages from PDF files into a single document.
///
/// pdfstitch merges whole documents or selected page ranges, in the order
/// given, and can convert documents to and from PDF through a headless
/// office installation.
#[derive(Parser, Debug)]
#[command(name = "pdfstitch")]
#[command(version)]
#[command(about = "Stitch selected pages from PDF files into one document", long_about = None)]
#[command(author)]
#[command(arg_required_else_help = true)]
pub struct Cli {
    /// Subcommand to run.
    #[command(subcommand)]
    pub command: Command,
}

/// Top-level subcommands.
#[derive(Subcommand, Debug)]
pub enum Command {
    /// Merge PDF files, optionally selecting pages from each
    Merge(MergeArgs),

    /// Report page counts for PDF files as JSON
    Inspect(InspectArgs),

    /// Convert documents to or from PDF via LibreOffice
    Convert(ConvertArgs),
}

/// Arguments for the merge subcommand.
#[derive(Parser, Debug)]
pub struct MergeArgs {
    /// Input PDF files to merge (in order), each optionally with pages
    ///
    /// Each input is either a path or glob pattern, which selects the
    /// whole document, or PATH=RANGES, which selects pages. Ranges are
    /// 1-based and inclusive; invalid parts are dropped silently. A glob
    /// pattern expands to its matches in alphabetical order, all with the
    /// same range selection.
    ///
    /// Examples:
    ///   pdfstitch merge a.pdf b.pdf -o out.pdf
    ///   pdfstitch merge "a.pdf=1,3-5" b.pdf -o out.pdf
    ///   pdfstitch merge "chapters/*.pdf" -o book.pdf
    #[arg(value_name = "FILE[=RANGES]", required_unless_present = "plan")]
    pub inputs: Vec<String>,

    /// Read the merge list from a JSON plan file
    ///
    /// The file holds either a list of {"filename", "ranges"} objects or
    /// a flat list of filenames. Plan entries are merged after any inputs
    /// given directly on the command line.
    #[arg(long, value_name = "FILE")]
    pub plan: Option<PathBuf>,

    /// Output PDF file path
    ///
    /// The merged PDF will be written to this location.
    /// Use --force to overwrite existing files without confirmation.
    #[arg(short, long, value_name = "FILE")]
    pub output: PathBuf,

    /// Force overwrite of existing output file without confirmation
    ///
    /// By default, pdfstitch will prompt before overwriting an existing
    /// file. Use this flag to skip the confirmation prompt.
    #[arg(short, long)]
    pub force: bool,

    /// Never overwrite existing output file
    ///
    /// If the output file already exists, exit with an error
    /// instead of prompting or overwriting.
    #[arg(long, conflicts_with = "force")]
    pub no_clobber: bool,

    /// Suppress all non-error output
    ///
    /// Only errors and warnings will be printed.
    /// Useful for scripts and automation.
    #[arg(short, long, conflicts_with = "verbose")]
    pub quiet: bool,

    /// Verbose output - show per-file details during the merge
    #[arg(short, long)]
    pub verbose: bool,
}

/// Arguments for the inspect subcommand.
#[derive(Parser, Debug)]
pub struct InspectArgs {
    /// PDF files to inspect
    ///
    /// Page counts are reported as a JSON array on stdout. A document
    /// that cannot be parsed reports null instead of a count.
    #[arg(required = true, value_name = "FILE")]
    pub inputs: Vec<PathBuf>,
}

/// Arguments for the convert subcommand.
#[derive(Parser, Debug)]
pub struct ConvertArgs {
    /// Documents to convert
    #[arg(required = true, value_name = "FILE")]
    pub inputs: Vec<PathBuf>,

    /// Target format
    #[arg(long, value_name = "FORMAT", value_enum)]
    pub to: ConvertFormat,

    /// Directory for converted output
    ///
    /// Defaults to the current directory. Output files take the input's
    /// name with the target extension.
    #[arg(long, value_name = "DIR", default_value = ".")]
    pub outdir: PathBuf,
}

/// Conversion target format as accepted on the command line.
#[derive(ValueEnum, Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConvertFormat {
    /// Portable Document Format.
    Pdf,
    /// Office Open XML word-processor document.
    Docx,
}

impl From<ConvertFormat> for ConvertTarget {
    fn from(format: ConvertFormat) -> Self {
        match format {
            ConvertFormat::Pdf => Self::Pdf,
            ConvertFormat::Docx => Self::Docx,
        }
    }
}

impl MergeArgs {
    /// Convert merge arguments into a validated [`MergeConfig`].
    ///
    /// Inputs given directly on the command line come first, expanded
    /// through glob matching, then entries from the plan file, preserving
    /// order within each group.
    ///
    /// # Errors
    ///
    /// Returns an error if:
    /// - The plan file cannot be read or parsed
    /// - Configuration validation fails
    pub async fn to_config(&self) -> Result<MergeConfig> {
        let mut selections: Vec<SourceSelection> = Vec::with_capacity(self.inputs.len());
        for input in &self.inputs {
            selections.extend(expand_input(input));
        }

        if let Some(ref plan_path) = self.plan {
            selections.extend(self.read_plan(plan_path).await?);
        }

        let overwrite_mode = if self.force {
            OverwriteMode::Force
        } else if self.no_clobber {
            OverwriteMode::NoClobber
        } else {
            OverwriteMode::Prompt
        };

        let config = MergeConfig {
            selections,
            output: self.output.clone(),
            overwrite_mode,
            quiet: self.quiet,
            verbose: self.verbose,
        };

        config.validate().map_err(|e| {
            StitchError::invalid_config(format!("Configuration validation failed: {e}"))
        })?;

        Ok(config)
    }

    /// Read a JSON plan file into source selections.
    ///
    /// Plan filenames are treated as paths relative to the current
    /// directory; no store resolution happens here.
    async fn read_plan(&self, path: &PathBuf) -> Result<Vec<SourceSelection>> {
        let bytes = tokio::fs::read(path)
            .await
            .map_err(|e| StitchError::invalid_config(format!(
                "Failed to read plan file {}: {e}",
                path.display()
            )))?;

        let plan: MergePlan = serde_json::from_slice(&bytes).map_err(|e| {
            StitchError::invalid_config(format!(
                "Failed to parse plan file {}: {e}",
                path.display()
            ))
        })?;

        Ok(plan
            .into_items()
            .into_iter()
            .map(|item| SourceSelection::with_ranges(item.filename, item.ranges))
            .collect())
    }
}

/// Split a `PATH=RANGES` input into a selection.
///
/// Splits on the first `=` only, so paths containing further `=` signs in
/// the range part are not a concern, and a path with no `=` selects the
/// whole document.
fn parse_input(input: &str) -> SourceSelection {
    match input.split_once('=') {
        Some((path, ranges)) => SourceSelection::with_ranges(path, ranges),
        None => SourceSelection::whole(input),
    }
}

/// Expand one input through glob matching.
///
/// The path part is treated as a glob pattern; every match becomes a
/// selection carrying the same range expression, in the pattern's match
/// order. An input that matches nothing (or is not a valid pattern) is
/// kept literally, so a plain missing path still fails later with
/// `FileNotFound` rather than vanishing here.
fn expand_input(input: &str) -> Vec<SourceSelection> {
    let selection = parse_input(input);
    let pattern = selection.path.to_string_lossy();

    match collect_paths_for_pattern(pattern.as_ref()) {
        Ok(paths) if !paths.is_empty() => paths
            .into_iter()
            .map(|path| SourceSelection {
                path,
                ranges: selection.ranges.clone(),
            })
            .collect(),
        _ => vec![selection],
    }
}
