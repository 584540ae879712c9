//! Integration tests for pdfstitch.
//!
//! These tests exercise the full flow using generated PDF fixtures. Each
//! fixture page carries a tag naming its source document and index, so
//! tests can assert the exact page sequence of a merged output.

use lopdf::{Document, Object, dictionary};
use std::path::Path;

/// Build an in-memory PDF whose pages are tagged `"{tag}-{index}"`.
pub fn build_tagged_pdf(tag: &str, pages: usize) -> Document {
    let mut doc = Document::with_version("1.5");

    let pages_id = doc.new_object_id();
    let mut kids = Vec::new();
    for i in 0..pages {
        let page_id = doc.new_object_id();
        let page = dictionary! {
            "Type" => "Page",
            "Parent" => pages_id,
            "MediaBox" => vec![0.into(), 0.into(), 612.into(), 792.into()],
            "PieceInfo" => Object::string_literal(format!("{tag}-{i}")),
        };
        doc.objects.insert(page_id, page.into());
        kids.push(page_id);
    }

    let pages_dict = dictionary! {
        "Type" => "Pages",
        "Kids" => kids.into_iter().map(Object::from).collect::<Vec<Object>>(),
        "Count" => pages as i64,
    };
    doc.objects.insert(pages_id, pages_dict.into());

    let catalog_id = doc.new_object_id();
    let catalog = dictionary! {
        "Type" => "Catalog",
        "Pages" => pages_id,
    };
    doc.objects.insert(catalog_id, catalog.into());
    doc.trailer.set("Root", catalog_id);

    doc
}

/// Serialize a tagged PDF into bytes.
pub fn tagged_pdf_bytes(tag: &str, pages: usize) -> Vec<u8> {
    let mut doc = build_tagged_pdf(tag, pages);
    let mut bytes = Vec::new();
    doc.save_to(&mut bytes).expect("Failed to serialize fixture");
    bytes
}

/// Write a tagged PDF fixture to a path.
pub fn write_tagged_pdf(path: &Path, tag: &str, pages: usize) {
    std::fs::write(path, tagged_pdf_bytes(tag, pages)).expect("Failed to write fixture");
}

/// Read the page tags of a document, in page order.
pub fn page_tags(doc: &Document) -> Vec<String> {
    doc.get_pages()
        .into_values()
        .map(|id| {
            let Ok(Object::Dictionary(dict)) = doc.get_object(id) else {
                panic!("page is not a dictionary");
            };
            let Ok(Object::String(bytes, _)) = dict.get(b"PieceInfo") else {
                panic!("page has no tag");
            };
            String::from_utf8(bytes.clone()).unwrap()
        })
        .collect()
}

/// Read the page tags of a document stored on disk.
pub async fn page_tags_at(path: &Path) -> Vec<String> {
    let doc = Document::load(path).await.expect("Failed to load output");
    page_tags(&doc)
}
