//! End-to-end merge behavior: ordering, selection, and failure modes.

use crate::common::{page_tags, write_tagged_pdf};
use pdfstitch::config::SourceSelection;
use pdfstitch::error::StitchError;
use pdfstitch::merge::{MergePlan, Merger, merge_selections};
use pdfstitch::store::{DocumentStore, write_document};

#[tokio::test]
async fn test_merge_whole_documents_in_order() {
    let dir = tempfile::tempdir().unwrap();
    let a = dir.path().join("a.pdf");
    let b = dir.path().join("b.pdf");
    write_tagged_pdf(&a, "a", 2);
    write_tagged_pdf(&b, "b", 3);

    let selections = vec![SourceSelection::whole(&a), SourceSelection::whole(&b)];
    let outcome = merge_selections(&selections).await.unwrap();

    assert_eq!(outcome.statistics.files_merged, 2);
    assert_eq!(outcome.statistics.total_pages, 5);
    assert_eq!(
        page_tags(&outcome.document),
        vec!["a-0", "a-1", "b-0", "b-1", "b-2"]
    );
}

#[tokio::test]
async fn test_merge_with_range_selections() {
    let dir = tempfile::tempdir().unwrap();
    let a = dir.path().join("a.pdf");
    let b = dir.path().join("b.pdf");
    write_tagged_pdf(&a, "a", 5);
    write_tagged_pdf(&b, "b", 4);

    // Whole of a, then pages 1-2 of b.
    let selections = vec![
        SourceSelection::whole(&a),
        SourceSelection::with_ranges(&b, "1-2"),
    ];
    let outcome = merge_selections(&selections).await.unwrap();

    assert_eq!(
        page_tags(&outcome.document),
        vec!["a-0", "a-1", "a-2", "a-3", "a-4", "b-0", "b-1"]
    );
}

#[tokio::test]
async fn test_item_order_controls_page_order() {
    let dir = tempfile::tempdir().unwrap();
    let a = dir.path().join("a.pdf");
    let b = dir.path().join("b.pdf");
    write_tagged_pdf(&a, "a", 2);
    write_tagged_pdf(&b, "b", 2);

    let forward = merge_selections(&[SourceSelection::whole(&a), SourceSelection::whole(&b)])
        .await
        .unwrap();
    let reverse = merge_selections(&[SourceSelection::whole(&b), SourceSelection::whole(&a)])
        .await
        .unwrap();

    assert_eq!(page_tags(&forward.document), vec!["a-0", "a-1", "b-0", "b-1"]);
    assert_eq!(page_tags(&reverse.document), vec!["b-0", "b-1", "a-0", "a-1"]);
}

#[tokio::test]
async fn test_duplicate_and_overlapping_parts_duplicate_pages() {
    let dir = tempfile::tempdir().unwrap();
    let a = dir.path().join("a.pdf");
    write_tagged_pdf(&a, "a", 3);

    let selections = vec![SourceSelection::with_ranges(&a, "2, 1-2")];
    let outcome = merge_selections(&selections).await.unwrap();

    assert_eq!(page_tags(&outcome.document), vec!["a-1", "a-0", "a-1"]);
}

#[tokio::test]
async fn test_unparseable_expression_is_a_silent_no_op() {
    let dir = tempfile::tempdir().unwrap();
    let a = dir.path().join("a.pdf");
    let b = dir.path().join("b.pdf");
    write_tagged_pdf(&a, "a", 2);
    write_tagged_pdf(&b, "b", 2);

    // a contributes nothing; the merge still succeeds with b's pages.
    let selections = vec![
        SourceSelection::with_ranges(&a, "abc, 99"),
        SourceSelection::whole(&b),
    ];
    let outcome = merge_selections(&selections).await.unwrap();

    assert_eq!(outcome.statistics.files_merged, 2);
    assert_eq!(page_tags(&outcome.document), vec!["b-0", "b-1"]);
}

#[tokio::test]
async fn test_out_of_range_parts_are_clamped() {
    let dir = tempfile::tempdir().unwrap();
    let a = dir.path().join("a.pdf");
    write_tagged_pdf(&a, "a", 3);

    let selections = vec![SourceSelection::with_ranges(&a, "2-100")];
    let outcome = merge_selections(&selections).await.unwrap();

    assert_eq!(page_tags(&outcome.document), vec!["a-1", "a-2"]);
}

#[tokio::test]
async fn test_empty_selection_list_is_an_error() {
    let result = merge_selections(&[]).await;
    assert!(matches!(
        result.unwrap_err(),
        StitchError::NoFilesSpecified
    ));
}

#[tokio::test]
async fn test_missing_file_aborts_whole_merge() {
    let dir = tempfile::tempdir().unwrap();
    let a = dir.path().join("a.pdf");
    write_tagged_pdf(&a, "a", 2);

    let selections = vec![
        SourceSelection::whole(&a),
        SourceSelection::whole(dir.path().join("missing.pdf")),
    ];
    let result = merge_selections(&selections).await;
    assert!(matches!(
        result.unwrap_err(),
        StitchError::FileNotFound { .. }
    ));
}

#[tokio::test]
async fn test_merged_output_survives_disk_roundtrip() {
    let dir = tempfile::tempdir().unwrap();
    let a = dir.path().join("a.pdf");
    let b = dir.path().join("b.pdf");
    let out = dir.path().join("out.pdf");
    write_tagged_pdf(&a, "a", 2);
    write_tagged_pdf(&b, "b", 1);

    let outcome = merge_selections(&[
        SourceSelection::with_ranges(&a, "2"),
        SourceSelection::whole(&b),
    ])
    .await
    .unwrap();
    write_document(&outcome.document, &out).await.unwrap();

    assert_eq!(crate::common::page_tags_at(&out).await, vec!["a-1", "b-0"]);
}

#[tokio::test]
async fn test_merge_through_store_namespace() {
    let dir = tempfile::tempdir().unwrap();
    let store = DocumentStore::new(dir.path());

    store
        .upload("ns", "a.pdf", &crate::common::tagged_pdf_bytes("a", 2))
        .await
        .unwrap();
    store
        .upload("ns", "b.pdf", &crate::common::tagged_pdf_bytes("b", 2))
        .await
        .unwrap();

    let plan: MergePlan = serde_json::from_str(
        r#"[{"filename": "a.pdf", "ranges": "2"}, {"filename": "b.pdf"}]"#,
    )
    .unwrap();

    let outcome = Merger::new().merge(&store, "ns", plan).await.unwrap();
    assert_eq!(page_tags(&outcome.document), vec!["a-1", "b-0", "b-1"]);
}

#[tokio::test]
async fn test_merge_through_store_missing_name() {
    let dir = tempfile::tempdir().unwrap();
    let store = DocumentStore::new(dir.path());

    store
        .upload("ns", "a.pdf", &crate::common::tagged_pdf_bytes("a", 1))
        .await
        .unwrap();

    let plan: MergePlan = serde_json::from_str(r#"["a.pdf", "missing.pdf"]"#).unwrap();
    let result = Merger::new().merge(&store, "ns", plan).await;
    assert!(matches!(
        result.unwrap_err(),
        StitchError::FileNotFound { .. }
    ));
}

#[tokio::test]
async fn test_merge_to_store_saves_merged_document() {
    use pdfstitch::store::MERGED_DOCUMENT_NAME;

    let dir = tempfile::tempdir().unwrap();
    let store = DocumentStore::new(dir.path());

    store
        .upload("ns", "a.pdf", &crate::common::tagged_pdf_bytes("a", 2))
        .await
        .unwrap();

    let plan: MergePlan = serde_json::from_str(r#"["a.pdf"]"#).unwrap();
    let (path, stats) = Merger::new()
        .merge_to_store(&store, "ns", plan)
        .await
        .unwrap();

    assert!(path.ends_with(MERGED_DOCUMENT_NAME));
    assert_eq!(stats.total_pages, 2);
    assert!(store.exists("ns", MERGED_DOCUMENT_NAME));
    assert_eq!(crate::common::page_tags_at(&path).await, vec!["a-0", "a-1"]);
}

#[tokio::test]
async fn test_merge_empty_plan_is_an_error() {
    let dir = tempfile::tempdir().unwrap();
    let store = DocumentStore::new(dir.path());

    let plan: MergePlan = serde_json::from_str("[]").unwrap();
    let result = Merger::new().merge(&store, "ns", plan).await;
    assert!(matches!(
        result.unwrap_err(),
        StitchError::NoFilesSpecified
    ));
}
