//! Configuration for merge runs.
//!
//! This module transforms CLI arguments into a validated, normalized
//! configuration that drives a merge. It handles:
//! - Validation of argument combinations
//! - Resolution of conflicting options
//! - Application of defaults

use anyhow::{Result, bail};
use std::path::PathBuf;

/// One source document plus the page selection applied to it.
///
/// A blank `ranges` string selects the whole document.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SourceSelection {
    /// Path to the source PDF.
    pub path: PathBuf,

    /// Raw page-range expression, e.g. `"1, 3-5, 8"`. Blank means all pages.
    pub ranges: String,
}

impl SourceSelection {
    /// Create a selection covering the whole document.
    pub fn whole(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            ranges: String::new(),
        }
    }

    /// Create a selection with an explicit range expression.
    pub fn with_ranges(path: impl Into<PathBuf>, ranges: impl Into<String>) -> Self {
        Self {
            path: path.into(),
            ranges: ranges.into(),
        }
    }
}

/// Output file overwrite behavior.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum OverwriteMode {
    /// Prompt the user before overwriting (default).
    #[default]
    Prompt,
    /// Always overwrite without prompting.
    Force,
    /// Never overwrite, error if file exists.
    NoClobber,
}

/// Complete configuration for one merge run.
///
/// Selections are kept in caller order; that order is the only thing
/// controlling the output page sequence.
#[derive(Debug, Clone)]
pub struct MergeConfig {
    /// Source selections, in merge order.
    pub selections: Vec<SourceSelection>,

    /// Output PDF file path.
    pub output: PathBuf,

    /// File overwrite behavior.
    pub overwrite_mode: OverwriteMode,

    /// Quiet mode - suppress non-error output.
    pub quiet: bool,

    /// Verbose output mode.
    pub verbose: bool,
}

impl MergeConfig {
    /// Validate the configuration.
    ///
    /// # Errors
    ///
    /// Returns an error if:
    /// - No source selections are specified
    /// - Verbose and quiet modes are both enabled
    /// - The output path collides with an input path
    pub fn validate(&self) -> Result<()> {
        if self.selections.is_empty() {
            bail!("No input files specified");
        }

        if self.verbose && self.quiet {
            bail!("Cannot use both --verbose and --quiet");
        }

        for selection in &self.selections {
            if selection.path == self.output {
                bail!(
                    "Output file cannot be the same as an input file: {}",
                    self.output.display()
                );
            }
        }

        Ok(())
    }
}
