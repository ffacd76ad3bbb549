//! PDF merging functionality using lopdf

use std::collections::BTreeMap;
use std::path::Path;

use lopdf::{Dictionary, Document, Object, ObjectId};
use tracing::debug;

use crate::error::{Error, Result};

/// Page attributes a leaf page may inherit from its ancestors in the page tree
const INHERITABLE_ATTRIBUTES: [&[u8]; 4] = [b"Resources", b"MediaBox", b"CropBox", b"Rotate"];

/// Guard against malformed (cyclic) Parent chains
const MAX_TREE_DEPTH: usize = 64;

/// Version written when every input is older than this
const MINIMUM_VERSION: &str = "1.5";

/// Something that can accumulate pages from several PDFs and write them out
/// as one document
pub trait PdfMerger {
    /// Append every page of the PDF at `path`, returning how many were added.
    ///
    /// On error nothing from `path` has been added.
    fn append(&mut self, path: &Path) -> Result<usize>;

    /// Pages accumulated so far
    fn page_count(&self) -> usize;

    /// Write the merged document to `path`, returning its page count
    fn write_to(self, path: &Path) -> Result<usize>
    where
        Self: Sized;
}

/// [`PdfMerger`] backed by lopdf
///
/// Based on the lopdf merge example:
/// https://github.com/J-F-Liu/lopdf/blob/main/examples/merge.rs
///
/// Objects from each appended document are renumbered above everything
/// already held, so documents never collide. The source catalogs and page
/// tree nodes are dropped; a fresh flat page tree is built on write.
#[derive(Debug)]
pub struct LopdfMerger {
    objects: BTreeMap<ObjectId, Object>,
    page_ids: Vec<ObjectId>,
    max_id: u32,
    version: String,
}

impl Default for LopdfMerger {
    fn default() -> Self {
        Self::new()
    }
}

impl LopdfMerger {
    pub fn new() -> Self {
        Self {
            objects: BTreeMap::new(),
            page_ids: Vec::new(),
            max_id: 0,
            version: MINIMUM_VERSION.to_string(),
        }
    }
}

impl PdfMerger for LopdfMerger {
    fn append(&mut self, path: &Path) -> Result<usize> {
        let mut doc = Document::load(path)?;

        // Renumber objects in this document to avoid conflicts
        doc.renumber_objects_with(self.max_id + 1);

        let page_ids: Vec<ObjectId> = doc.get_pages().into_values().collect();
        if page_ids.is_empty() {
            return Err(Error::EmptyPdf(path.to_path_buf()));
        }

        // Pages are about to lose their original parents
        for &page_id in &page_ids {
            let inherited = inherited_attributes(&doc, page_id);
            if inherited.is_empty() {
                continue;
            }
            if let Ok(page) = doc.get_object_mut(page_id).and_then(Object::as_dict_mut) {
                for (key, value) in inherited {
                    page.set(key, value);
                }
            }
        }

        if doc.version > self.version {
            self.version = doc.version.clone();
        }
        self.max_id = self.max_id.max(doc.max_id);

        for (id, object) in doc.objects {
            let is_tree_root = matches!(object.type_name(), Ok(b"Catalog") | Ok(b"Pages"));
            if !is_tree_root {
                self.objects.insert(id, object);
            }
        }

        debug!("{}: {} pages, max object id now {}", path.display(), page_ids.len(), self.max_id);

        let added = page_ids.len();
        self.page_ids.extend(page_ids);
        Ok(added)
    }

    fn page_count(&self) -> usize {
        self.page_ids.len()
    }

    fn write_to(self, path: &Path) -> Result<usize> {
        if self.page_ids.is_empty() {
            return Err(Error::NothingToMerge);
        }

        let mut merged_doc = Document::with_version(self.version);

        // Add all collected objects FIRST
        merged_doc.objects = self.objects;

        // new_object_id() must hand out ids above everything just added
        merged_doc.max_id = self.max_id;

        let pages_id = merged_doc.new_object_id();

        let kids: Vec<Object> = self
            .page_ids
            .iter()
            .map(|&id| Object::Reference(id))
            .collect();

        let mut pages_object = Dictionary::new();
        pages_object.set("Type", Object::Name(b"Pages".to_vec()));
        pages_object.set("Count", Object::Integer(self.page_ids.len() as i64));
        pages_object.set("Kids", Object::Array(kids));

        let catalog_id = merged_doc.new_object_id();
        let mut catalog = Dictionary::new();
        catalog.set("Type", Object::Name(b"Catalog".to_vec()));
        catalog.set("Pages", Object::Reference(pages_id));

        merged_doc.objects.insert(catalog_id, Object::Dictionary(catalog));
        merged_doc.objects.insert(pages_id, Object::Dictionary(pages_object));
        merged_doc.trailer.set("Root", Object::Reference(catalog_id));

        for &page_id in &self.page_ids {
            if let Ok(page) = merged_doc.get_object_mut(page_id).and_then(Object::as_dict_mut) {
                page.set("Parent", Object::Reference(pages_id));
            }
        }

        // Outlines, name trees etc. of the sources are unreachable now
        let pruned = merged_doc.prune_objects();
        debug!("Pruned {} unreachable objects", pruned.len());

        merged_doc.compress();
        merged_doc.save(path)?;

        Ok(self.page_ids.len())
    }
}

/// Collect inheritable attributes the page does not set itself, taking the
/// nearest ancestor's value for each
fn inherited_attributes(doc: &Document, page_id: ObjectId) -> Vec<(Vec<u8>, Object)> {
    let Ok(page) = doc.get_dictionary(page_id) else {
        return Vec::new();
    };

    let mut missing: Vec<&[u8]> = INHERITABLE_ATTRIBUTES
        .iter()
        .copied()
        .filter(|key| !page.has(key))
        .collect();
    let mut found = Vec::new();

    let mut parent = page.get(b"Parent").and_then(Object::as_reference).ok();
    let mut depth = 0;

    while let Some(node_id) = parent {
        if missing.is_empty() || depth >= MAX_TREE_DEPTH {
            break;
        }
        let Ok(node) = doc.get_dictionary(node_id) else {
            break;
        };

        missing.retain(|key| match node.get(key) {
            Ok(value) => {
                found.push((key.to_vec(), value.clone()));
                false
            }
            Err(_) => true,
        });

        parent = node.get(b"Parent").and_then(Object::as_reference).ok();
        depth += 1;
    }

    found
}
