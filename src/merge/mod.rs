//! Document merging.
//!
//! Two layers: [`OutputBuilder`] is the low-level append primitive that
//! assembles an output document one contiguous page run at a time, and
//! [`Merger`] is the orchestrator that drives it from a merge plan or a
//! list of resolved source selections.

mod builder;
mod orchestrator;

pub use builder::OutputBuilder;
pub use orchestrator::{MergeItem, MergeOutcome, MergePlan, MergeStatistics, Merger};

use crate::config::SourceSelection;
use crate::error::Result;

/// Merge an ordered list of source selections into one document.
///
/// Convenience wrapper over [`Merger::merge_selections`].
///
/// # Errors
///
/// Returns an error if the list is empty, a source is missing, or a
/// document fails to load.
pub async fn merge_selections(selections: &[SourceSelection]) -> Result<MergeOutcome> {
    Merger::new().merge_selections(selections).await
}
