//! Output document assembly.
//!
//! [`OutputBuilder`] owns the in-progress merged document for the duration
//! of one merge call. Pages are appended one contiguous interval at a time;
//! the builder has no primitive for arbitrary index lists, so callers must
//! decompose their selections into contiguous runs first.

use lopdf::{Document, Object, ObjectId, dictionary};

use crate::error::{Result, StitchError};
use crate::ranges::PageInterval;

/// Builder that appends page runs from source documents into one output.
///
/// Append order is the only thing controlling output page order; nothing is
/// ever re-sorted. The builder is consumed by [`finalize`](Self::finalize)
/// and is not reusable across merge calls.
pub struct OutputBuilder {
    /// The output document under construction.
    doc: Document,

    /// Reserved object id for the output page-tree root.
    pages_id: ObjectId,

    /// Page object ids accumulated so far, in append order.
    kids: Vec<ObjectId>,
}

impl OutputBuilder {
    /// Create an empty builder.
    pub fn new() -> Self {
        let mut doc = Document::with_version("1.5");
        let pages_id = doc.new_object_id();

        Self {
            doc,
            pages_id,
            kids: Vec::new(),
        }
    }

    /// Append one contiguous run of pages from a source document.
    ///
    /// The interval is zero-based and half-open, as produced by the range
    /// parser. The source's objects are renumbered past the builder's
    /// current ids before import, so appending the same document twice
    /// yields independent copies of its pages.
    ///
    /// # Errors
    ///
    /// Returns `MergeFailed` if the interval reaches past the source's
    /// actual page count (a stale count at the caller).
    pub fn append_pages(&mut self, source: &Document, interval: PageInterval) -> Result<usize> {
        let mut src = source.clone();
        src.renumber_objects_with(self.doc.max_id + 1);
        self.doc.max_id = src.max_id;

        let pages: Vec<ObjectId> = src.get_pages().into_values().collect();
        if interval.end > pages.len() {
            return Err(StitchError::merge_failed(format!(
                "Page interval {}..{} exceeds document page count {}",
                interval.start,
                interval.end,
                pages.len()
            )));
        }

        let selected = &pages[interval.start..interval.end];

        // Reparent the selected pages onto the output tree so inherited
        // lookups resolve against the document they now live in.
        for &page_id in selected {
            if let Ok(Object::Dictionary(dict)) = src.get_object_mut(page_id) {
                dict.set("Parent", Object::Reference(self.pages_id));
            }
        }

        self.doc.objects.extend(src.objects);
        self.kids.extend_from_slice(selected);

        Ok(selected.len())
    }

    /// Number of pages appended so far.
    pub fn page_count(&self) -> usize {
        self.kids.len()
    }

    /// Assemble the final document.
    ///
    /// Builds the page tree and catalog from the accumulated pages, then
    /// renumbers and compresses. A builder with zero appended pages
    /// produces a valid zero-page document.
    pub fn finalize(mut self) -> Result<Document> {
        let kids: Vec<Object> = self.kids.iter().map(|&id| Object::Reference(id)).collect();
        let count = self.kids.len() as i64;

        let pages_dict = dictionary! {
            "Type" => "Pages",
            "Kids" => kids,
            "Count" => count,
        };
        self.doc
            .objects
            .insert(self.pages_id, Object::Dictionary(pages_dict));

        let catalog_id = self.doc.new_object_id();
        let catalog = dictionary! {
            "Type" => "Catalog",
            "Pages" => self.pages_id,
        };
        self.doc.objects.insert(catalog_id, Object::Dictionary(catalog));
        self.doc.trailer.set("Root", catalog_id);

        // Drop source objects that no selected page reaches, then tidy ids.
        self.doc.prune_objects();
        self.doc.renumber_objects();
        self.doc.compress();

        Ok(self.doc)
    }
}

impl Default for OutputBuilder {
    fn default() -> Self {
        Self::new()
    }
}
