//! Merge orchestration.
//!
//! The [`Merger`] turns an ordered list of (document, range expression)
//! pairs into one combined document. It is a single linear pass: resolve
//! each document, parse its selection, and append every resulting interval
//! to an [`OutputBuilder`](crate::merge::OutputBuilder) in order. Any
//! failure aborts the whole call; a partially merged document is never
//! returned.

use lopdf::Document;
use serde::Deserialize;
use std::path::PathBuf;
use std::time::{Duration, Instant};

use crate::config::SourceSelection;
use crate::error::{Result, StitchError};
use crate::merge::builder::OutputBuilder;
use crate::ranges::{PageInterval, parse_page_ranges};
use crate::store::{DocumentStore, MERGED_DOCUMENT_NAME, read_document};

/// One entry of a merge request: a stored document name plus the page
/// selection applied to it.
///
/// A missing or blank `ranges` field selects the whole document.
#[derive(Debug, Clone, Deserialize, PartialEq, Eq)]
pub struct MergeItem {
    /// Name of the document in the store.
    pub filename: String,

    /// Raw page-range expression. Blank means all pages.
    #[serde(default)]
    pub ranges: String,
}

/// A merge request as submitted by a caller.
///
/// Accepts either the full per-item form or the legacy flat list of
/// filenames, which is treated as "whole document" for every entry.
///
/// ```
/// use pdfstitch::merge::MergePlan;
///
/// let full: MergePlan =
///     serde_json::from_str(r#"[{"filename": "a.pdf", "ranges": "1-3"}]"#).unwrap();
/// let legacy: MergePlan = serde_json::from_str(r#"["a.pdf", "b.pdf"]"#).unwrap();
/// assert_eq!(full.into_items().len(), 1);
/// assert_eq!(legacy.into_items().len(), 2);
/// ```
#[derive(Debug, Clone, Deserialize)]
#[serde(untagged)]
pub enum MergePlan {
    /// Ordered items with per-document range expressions.
    Items(Vec<MergeItem>),
    /// Legacy form: filenames only, whole document each.
    Filenames(Vec<String>),
}

impl MergePlan {
    /// Normalize the request into an ordered item list.
    pub fn into_items(self) -> Vec<MergeItem> {
        match self {
            Self::Items(items) => items,
            Self::Filenames(names) => names
                .into_iter()
                .map(|filename| MergeItem {
                    filename,
                    ranges: String::new(),
                })
                .collect(),
        }
    }
}

/// Statistics about a merge operation.
#[derive(Debug, Clone)]
pub struct MergeStatistics {
    /// Number of source documents processed.
    pub files_merged: usize,

    /// Total number of pages in the merged document.
    pub total_pages: usize,

    /// Total time taken for the merge.
    pub merge_time: Duration,
}

/// Result of a successful merge.
#[derive(Debug)]
pub struct MergeOutcome {
    /// The merged document.
    pub document: Document,

    /// Statistics about the merge.
    pub statistics: MergeStatistics,
}

/// Orchestrator that merges selected page ranges from multiple documents.
///
/// Stateless across calls: each merge owns its output builder for the
/// duration of the call and discards it on success or failure.
pub struct Merger;

impl Merger {
    /// Create a new merger.
    pub fn new() -> Self {
        Self
    }

    /// Merge documents referenced by name through a store namespace.
    ///
    /// Resolves every item against the store before any page is touched, so
    /// a missing document fails the call with nothing written.
    ///
    /// # Errors
    ///
    /// Returns an error if:
    /// - The plan contains no items (`NoFilesSpecified`)
    /// - A referenced document is not in the store (`FileNotFound`)
    /// - A document cannot be read or a page append fails
    ///
    /// # Examples
    ///
    /// ```no_run
    /// # use pdfstitch::merge::{Merger, MergePlan};
    /// # use pdfstitch::store::DocumentStore;
    /// # async fn example(store: DocumentStore, plan: MergePlan) -> pdfstitch::Result<()> {
    /// let merger = Merger::new();
    /// let outcome = merger.merge(&store, "session-1", plan).await?;
    /// println!("Merged {} pages", outcome.statistics.total_pages);
    /// # Ok(())
    /// # }
    /// ```
    pub async fn merge(
        &self,
        store: &DocumentStore,
        namespace: &str,
        plan: MergePlan,
    ) -> Result<MergeOutcome> {
        let items = plan.into_items();
        if items.is_empty() {
            return Err(StitchError::NoFilesSpecified);
        }

        let mut selections = Vec::with_capacity(items.len());
        for item in items {
            let path = store.resolve(namespace, &item.filename)?;
            selections.push(SourceSelection {
                path,
                ranges: item.ranges,
            });
        }

        self.merge_selections(&selections).await
    }

    /// Merge through a store namespace and save the result back into it.
    ///
    /// The merged document is written as
    /// [`MERGED_DOCUMENT_NAME`](crate::store::MERGED_DOCUMENT_NAME) inside
    /// the namespace. Returns the saved path alongside the statistics.
    ///
    /// # Errors
    ///
    /// Same failure modes as [`merge`](Self::merge), plus write errors.
    pub async fn merge_to_store(
        &self,
        store: &DocumentStore,
        namespace: &str,
        plan: MergePlan,
    ) -> Result<(PathBuf, MergeStatistics)> {
        let outcome = self.merge(store, namespace, plan).await?;
        let path = store
            .save_document(namespace, MERGED_DOCUMENT_NAME, &outcome.document)
            .await?;
        Ok((path, outcome.statistics))
    }

    /// Merge an ordered list of resolved source selections.
    ///
    /// This is the core linear pass. For each selection, in order:
    /// load the document; with a blank expression, append the whole
    /// document as one interval; otherwise parse the expression against the
    /// document's page count and append each surviving interval in parser
    /// order. A non-blank expression that parses to nothing appends no
    /// pages and is not an error.
    ///
    /// # Errors
    ///
    /// Returns an error if:
    /// - The selection list is empty (`NoFilesSpecified`)
    /// - A source path does not exist (`FileNotFound`)
    /// - A document fails to load or an append faults
    pub async fn merge_selections(&self, selections: &[SourceSelection]) -> Result<MergeOutcome> {
        let merge_start = Instant::now();

        if selections.is_empty() {
            return Err(StitchError::NoFilesSpecified);
        }

        let mut builder = OutputBuilder::new();

        for selection in selections {
            if !selection.path.is_file() {
                return Err(StitchError::file_not_found(
                    selection.path.display().to_string(),
                ));
            }

            let document = read_document(&selection.path).await?;
            let max_pages = document.get_pages().len();

            let intervals = if selection.ranges.trim().is_empty() {
                vec![PageInterval::new(0, max_pages)]
            } else {
                parse_page_ranges(&selection.ranges, max_pages)
            };

            for interval in intervals {
                builder.append_pages(&document, interval)?;
            }
        }

        let total_pages = builder.page_count();
        let document = builder.finalize()?;

        Ok(MergeOutcome {
            document,
            statistics: MergeStatistics {
                files_merged: selections.len(),
                total_pages,
                merge_time: merge_start.elapsed(),
            },
        })
    }
}

impl Default for Merger {
    fn default() -> Self {
        Self::new()
    }
}
