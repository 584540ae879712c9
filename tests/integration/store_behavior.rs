//! Store behavior through the public API: uploads, namespaces, and purge.

use crate::common::tagged_pdf_bytes;
use pdfstitch::error::StitchError;
use pdfstitch::store::{DocumentStore, MERGED_DOCUMENT_NAME};

#[tokio::test]
async fn test_upload_reports_page_count() {
    let dir = tempfile::tempdir().unwrap();
    let store = DocumentStore::new(dir.path());

    let report = store
        .upload("ns", "doc.pdf", &tagged_pdf_bytes("doc", 4))
        .await
        .unwrap();

    assert_eq!(report.name, "doc.pdf");
    assert_eq!(report.pages, Some(4));
}

#[tokio::test]
async fn test_upload_unparseable_pdf_reports_unknown_pages() {
    let dir = tempfile::tempdir().unwrap();
    let store = DocumentStore::new(dir.path());

    // Stored anyway; the page probe just fails.
    let report = store
        .upload("ns", "junk.pdf", b"not a pdf at all")
        .await
        .unwrap();

    assert_eq!(report.pages, None);
    assert!(store.exists("ns", "junk.pdf"));
}

#[tokio::test]
async fn test_upload_rejects_non_pdf_extension() {
    let dir = tempfile::tempdir().unwrap();
    let store = DocumentStore::new(dir.path());

    let result = store.upload("ns", "notes.txt", b"hello").await;
    assert!(matches!(
        result.unwrap_err(),
        StitchError::UnsupportedExtension { .. }
    ));
}

#[tokio::test]
async fn test_upload_sanitizes_traversal_attempts() {
    let dir = tempfile::tempdir().unwrap();
    let store = DocumentStore::new(dir.path());

    let report = store
        .upload("ns", "../../etc/evil.pdf", &tagged_pdf_bytes("e", 1))
        .await
        .unwrap();

    // Only the final component survives, inside the namespace.
    assert_eq!(report.name, "evil.pdf");
    assert!(store.exists("ns", "evil.pdf"));
    assert!(!dir.path().join("etc").exists());
}

#[tokio::test]
async fn test_namespaces_are_isolated() {
    let dir = tempfile::tempdir().unwrap();
    let store = DocumentStore::new(dir.path());

    store
        .upload("alice", "doc.pdf", &tagged_pdf_bytes("a", 1))
        .await
        .unwrap();

    assert!(store.exists("alice", "doc.pdf"));
    assert!(!store.exists("bob", "doc.pdf"));
}

#[tokio::test]
async fn test_upload_all_preserves_input_order() {
    let dir = tempfile::tempdir().unwrap();
    let store = DocumentStore::new(dir.path());

    let files = vec![
        ("one.pdf".to_string(), tagged_pdf_bytes("one", 1)),
        ("two.pdf".to_string(), tagged_pdf_bytes("two", 2)),
        ("three.pdf".to_string(), tagged_pdf_bytes("three", 3)),
    ];
    let reports: Vec<_> = store
        .upload_all("ns", files)
        .await
        .into_iter()
        .map(|r| r.unwrap())
        .collect();

    let names: Vec<&str> = reports.iter().map(|r| r.name.as_str()).collect();
    assert_eq!(names, vec!["one.pdf", "two.pdf", "three.pdf"]);
    assert_eq!(reports[2].pages, Some(3));
}

#[tokio::test]
async fn test_download_path_for_merged_document() {
    let dir = tempfile::tempdir().unwrap();
    let store = DocumentStore::new(dir.path());

    store
        .upload("ns", MERGED_DOCUMENT_NAME, &tagged_pdf_bytes("m", 1))
        .await
        .unwrap();

    let path = store.download_path("ns", MERGED_DOCUMENT_NAME).unwrap();
    assert!(path.is_file());
    assert!(path.starts_with(dir.path()));
}

#[tokio::test]
async fn test_download_path_missing_document() {
    let dir = tempfile::tempdir().unwrap();
    let store = DocumentStore::new(dir.path());

    let result = store.download_path("ns", "missing.pdf");
    assert!(matches!(
        result.unwrap_err(),
        StitchError::FileNotFound { .. }
    ));
}

#[tokio::test]
async fn test_purge_removes_namespace() {
    let dir = tempfile::tempdir().unwrap();
    let store = DocumentStore::new(dir.path());

    store
        .upload("ns", "doc.pdf", &tagged_pdf_bytes("d", 1))
        .await
        .unwrap();
    assert!(store.exists("ns", "doc.pdf"));

    store.purge("ns").await.unwrap();
    assert!(!store.exists("ns", "doc.pdf"));

    // Purging again is a no-op.
    store.purge("ns").await.unwrap();
}

#[tokio::test]
async fn test_page_count_matches_upload_report() {
    let dir = tempfile::tempdir().unwrap();
    let store = DocumentStore::new(dir.path());

    store
        .upload("ns", "doc.pdf", &tagged_pdf_bytes("d", 6))
        .await
        .unwrap();

    assert_eq!(store.page_count("ns", "doc.pdf").await.unwrap(), 6);
}

#[tokio::test]
async fn test_upload_report_serializes_camel_case() {
    let dir = tempfile::tempdir().unwrap();
    let store = DocumentStore::new(dir.path());

    let report = store
        .upload("ns", "doc.pdf", &tagged_pdf_bytes("d", 2))
        .await
        .unwrap();

    let json = serde_json::to_value(&report).unwrap();
    assert_eq!(json["name"], "doc.pdf");
    assert_eq!(json["pages"], 2);
}
