//! pdfstitch - Stitch selected pages from PDF files into a single document.
//!
//! This library merges whole PDF documents or selected page ranges, in the
//! order they are given. It supports:
//!
//! - Lenient 1-based page-range expressions (`"1, 3-5, 8"`)
//! - Namespaced filesystem storage for uploaded documents
//! - JSON merge plans with per-document selections
//! - Conversion to and from PDF through a headless office installation
//! - Comprehensive error handling
//!
//! # Examples
//!
//! ## Basic Merge
//!
//! ```no_run
//! use pdfstitch::config::SourceSelection;
//! use pdfstitch::merge;
//!
//! # async fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let selections = vec![
//!     SourceSelection::whole("a.pdf"),
//!     SourceSelection::with_ranges("b.pdf", "1, 3-5"),
//! ];
//!
//! let outcome = merge::merge_selections(&selections).await?;
//! println!("Created {} page document", outcome.statistics.total_pages);
//! # Ok(())
//! # }
//! ```
//!
//! ## Using the Store
//!
//! ```no_run
//! use pdfstitch::merge::{MergePlan, Merger};
//! use pdfstitch::store::DocumentStore;
//!
//! # async fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let store = DocumentStore::new("/var/lib/pdfstitch");
//! let upload = store.upload("user-1", "report.pdf", b"%PDF-1.5 ...").await?;
//! println!("{} has {:?} pages", upload.name, upload.pages);
//!
//! let plan: MergePlan = serde_json::from_str(r#"[{"filename": "report.pdf"}]"#)?;
//! let outcome = Merger::new().merge(&store, "user-1", plan).await?;
//! # Ok(())
//! # }
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod cli;
pub mod config;
pub mod convert;
pub mod error;
pub mod merge;
pub mod output;
pub mod ranges;
pub mod store;
pub mod utils;

// Re-export commonly used types
pub use config::MergeConfig;
pub use error::{Result, StitchError};

/// Library version.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Library name.
pub const NAME: &str = env!("CARGO_PKG_NAME");
