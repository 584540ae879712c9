//! Output formatting and display.
//!
//! This module handles all user-facing output including:
//! - Formatted status messages
//! - Warning display
//! - Summary reports
//! - Quiet and verbose modes
//!
//! # Examples
//!
//! ```no_run
//! use pdfstitch::output::OutputFormatter;
//! use pdfstitch::config::MergeConfig;
//!
//! # fn example(config: MergeConfig) {
//! let formatter = OutputFormatter::from_config(&config);
//! formatter.info("Starting merge operation");
//! formatter.success("Merge completed successfully");
//! # }
//! ```

pub mod formatter;

pub use formatter::OutputFormatter;

use crate::merge::MergeStatistics;

/// Display merge statistics to the user.
pub fn display_merge_statistics(formatter: &OutputFormatter, stats: &MergeStatistics) {
    formatter.info(&format!(
        "Merged {} file(s) in {:.2}s: {} pages",
        stats.files_merged,
        stats.merge_time.as_secs_f64(),
        stats.total_pages
    ));
}
