//! Namespaced filesystem document store.
//!
//! This module persists uploaded documents under a caller-scoped namespace
//! and resolves document names back to readable handles. The namespace is an
//! explicit parameter on every entry point; one caller's uploads, merges,
//! and cleanups can never touch another's.
//!
//! File names are sanitized before any path join: only the final path
//! component is kept and unexpected characters are replaced, so a stored
//! name can never escape its namespace directory.
//!
//! # Examples
//!
//! ```no_run
//! use pdfstitch::store::DocumentStore;
//! use std::path::PathBuf;
//!
//! # async fn example(bytes: Vec<u8>) -> Result<(), Box<dyn std::error::Error>> {
//! let store = DocumentStore::new(PathBuf::from("uploads"));
//! let stored = store.upload("session-1", "report.pdf", &bytes).await?;
//! println!("{} has {:?} pages", stored.name, stored.pages);
//! # Ok(())
//! # }
//! ```

use lopdf::Document;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use tokio::task;

use crate::error::{Result, StitchError};

/// Default file name for merged output documents.
pub const MERGED_DOCUMENT_NAME: &str = "merged_document.pdf";

/// A stored upload, reported back to the caller.
///
/// `pages` is `None` when the stored file could not be parsed as a PDF;
/// the upload itself still succeeds in that case.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StoredUpload {
    /// Sanitized name the file was stored under.
    pub name: String,

    /// Number of pages, if the file parsed as a PDF.
    pub pages: Option<usize>,
}

/// Filesystem-backed document store with per-caller namespaces.
#[derive(Debug, Clone)]
pub struct DocumentStore {
    /// Root directory holding all namespaces.
    root: PathBuf,
}

impl DocumentStore {
    /// Create a store rooted at the given directory.
    ///
    /// The directory is created lazily when the first upload arrives.
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    /// Root directory of the store.
    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Directory backing a namespace.
    pub fn namespace_dir(&self, namespace: &str) -> PathBuf {
        self.root.join(namespace)
    }

    /// Resolve a document name to its path within a namespace.
    ///
    /// The name is sanitized first; the resolved file must exist.
    ///
    /// # Errors
    ///
    /// Returns `FileNotFound` if no document with that name is stored.
    pub fn resolve(&self, namespace: &str, name: &str) -> Result<PathBuf> {
        let safe = sanitize_file_name(name);
        let path = self.namespace_dir(namespace).join(&safe);
        if !path.is_file() {
            return Err(StitchError::file_not_found(safe));
        }
        Ok(path)
    }

    /// Check whether a document exists in a namespace.
    pub fn exists(&self, namespace: &str, name: &str) -> bool {
        self.resolve(namespace, name).is_ok()
    }

    /// Resolve a stored document for download.
    ///
    /// Same sanitization and existence rules as [`resolve`](Self::resolve).
    pub fn download_path(&self, namespace: &str, name: &str) -> Result<PathBuf> {
        self.resolve(namespace, name)
    }

    /// Store an uploaded file and report its page count.
    ///
    /// Files without a `.pdf` extension are rejected before anything is
    /// written. A file that stores fine but does not parse as a PDF is kept,
    /// with `pages: None` in the report.
    ///
    /// # Errors
    ///
    /// Returns an error if:
    /// - The file name has no `.pdf` extension
    /// - The name sanitizes to nothing
    /// - The file cannot be written
    pub async fn upload(&self, namespace: &str, name: &str, bytes: &[u8]) -> Result<StoredUpload> {
        if !has_pdf_extension(name) {
            return Err(StitchError::unsupported_extension(name));
        }

        let safe = sanitize_file_name(name);
        if safe.is_empty() || !has_pdf_extension(&safe) {
            return Err(StitchError::invalid_config(format!(
                "File name is not usable after sanitization: {name:?}"
            )));
        }

        let dir = self.namespace_dir(namespace);
        tokio::fs::create_dir_all(&dir).await?;

        let path = dir.join(&safe);
        tokio::fs::write(&path, bytes)
            .await
            .map_err(|e| StitchError::FailedToWrite {
                path: path.clone(),
                source: e,
            })?;

        let pages = match read_document(&path).await {
            Ok(doc) => Some(doc.get_pages().len()),
            Err(_) => None,
        };

        Ok(StoredUpload { name: safe, pages })
    }

    /// Store a batch of uploads, probing page counts concurrently.
    ///
    /// Results come back in input order, one per file; a rejected or failed
    /// file does not affect its neighbors.
    pub async fn upload_all(
        &self,
        namespace: &str,
        files: Vec<(String, Vec<u8>)>,
    ) -> Vec<Result<StoredUpload>> {
        use futures::stream::{self, StreamExt};

        let tasks = files.into_iter().enumerate().map(|(idx, (name, bytes))| {
            async move {
                let result = self.upload(namespace, &name, &bytes).await;
                (idx, result)
            }
        });

        let mut indexed: Vec<(usize, Result<StoredUpload>)> =
            stream::iter(tasks).buffer_unordered(4).collect().await;

        indexed.sort_by_key(|(idx, _)| *idx);
        indexed.into_iter().map(|(_, result)| result).collect()
    }

    /// Number of pages in a stored document.
    ///
    /// # Errors
    ///
    /// Returns `FileNotFound` if the name is not stored, or a load error if
    /// the file is not a readable PDF.
    pub async fn page_count(&self, namespace: &str, name: &str) -> Result<usize> {
        let path = self.resolve(namespace, name)?;
        let doc = read_document(&path).await?;
        Ok(doc.get_pages().len())
    }

    /// Open a stored document.
    ///
    /// # Errors
    ///
    /// Returns `FileNotFound` for unknown names, or a load error if the
    /// file cannot be parsed.
    pub async fn open(&self, namespace: &str, name: &str) -> Result<Document> {
        let path = self.resolve(namespace, name)?;
        read_document(&path).await
    }

    /// Write a document into a namespace, atomically.
    ///
    /// Writes to a temporary sibling first, then renames into place, so a
    /// failed write never leaves a partial document behind.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be created or written.
    pub async fn save_document(
        &self,
        namespace: &str,
        name: &str,
        doc: &Document,
    ) -> Result<PathBuf> {
        let safe = sanitize_file_name(name);
        let dir = self.namespace_dir(namespace);
        tokio::fs::create_dir_all(&dir).await?;

        let path = dir.join(&safe);
        write_document(doc, &path).await?;
        Ok(path)
    }

    /// Remove a namespace and everything stored under it.
    ///
    /// A namespace that was never created is a no-op.
    pub async fn purge(&self, namespace: &str) -> Result<()> {
        let dir = self.namespace_dir(namespace);
        match tokio::fs::remove_dir_all(&dir).await {
            Ok(()) => Ok(()),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(()),
            Err(e) => Err(e.into()),
        }
    }
}

/// Load and verify a PDF document from a path.
///
/// # Errors
///
/// Returns an error if:
/// - The file does not exist
/// - The file is not a valid PDF
/// - The PDF is encrypted
/// - The PDF has no pages
pub async fn read_document(path: &Path) -> Result<Document> {
    if !path.is_file() {
        return Err(StitchError::file_not_found(path.display().to_string()));
    }

    let doc = Document::load(path).await.map_err(|e| {
        let err_msg = e.to_string();
        if err_msg.contains("encrypt") || err_msg.contains("password") {
            StitchError::encrypted_pdf(path.to_path_buf())
        } else {
            StitchError::failed_to_load_pdf(path.to_path_buf(), err_msg)
        }
    })?;

    if doc.get_pages().is_empty() {
        return Err(StitchError::corrupted_pdf(
            path.to_path_buf(),
            "PDF has no pages",
        ));
    }

    Ok(doc)
}

/// Write a document to a path atomically (temp file, then rename).
///
/// # Errors
///
/// Returns an error if the file cannot be created, written, or renamed.
pub async fn write_document(doc: &Document, path: &Path) -> Result<()> {
    let path_buf = path.to_path_buf();
    let mut doc_clone = doc.clone();

    task::spawn_blocking(move || {
        let tmp_path = path_buf.with_extension("tmp");

        let file = std::fs::File::create(&tmp_path).map_err(|e| {
            StitchError::FailedToCreateOutput {
                path: tmp_path.clone(),
                source: e,
            }
        })?;

        let mut writer = std::io::BufWriter::new(file);
        doc_clone
            .save_to(&mut writer)
            .map_err(|e| StitchError::FailedToWrite {
                path: tmp_path.clone(),
                source: std::io::Error::other(e),
            })?;

        use std::io::Write;
        writer.flush().map_err(|e| StitchError::FailedToWrite {
            path: tmp_path.clone(),
            source: e,
        })?;

        std::fs::rename(&tmp_path, &path_buf).map_err(|e| StitchError::FailedToWrite {
            path: path_buf.clone(),
            source: e,
        })?;

        Ok::<_, StitchError>(())
    })
    .await
    .map_err(|e| StitchError::other(format!("Write task failed: {e}")))?
}

/// Sanitize an untrusted file name for storage.
///
/// Keeps only the final path component and replaces anything outside
/// `[A-Za-z0-9._-]` with `_`.
pub fn sanitize_file_name(name: &str) -> String {
    let base = name
        .rsplit(['/', '\\'])
        .next()
        .unwrap_or(name)
        .trim();

    base.chars()
        .map(|c| {
            if c.is_ascii_alphanumeric() || matches!(c, '.' | '_' | '-') {
                c
            } else {
                '_'
            }
        })
        .collect::<String>()
        .trim_matches('.')
        .to_string()
}

/// Check for a `.pdf` extension, case-insensitively.
pub fn has_pdf_extension(name: &str) -> bool {
    name.to_ascii_lowercase().ends_with(".pdf")
}
