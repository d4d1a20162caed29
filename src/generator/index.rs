//! Aggregate post index.

use super::{POSTS_DIR, RECORD_FILE, ensure_dir, write_json};
use crate::{
    content::{Document, meta::extract_description},
    log,
};
use anyhow::Result;
use serde::{Serialize, Serializer, ser::SerializeStruct};
use std::path::{Path, PathBuf};

/// Lightweight listing entry for one document.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct IndexEntry {
    pub title: String,
    pub heading: String,
    /// Site-rooted URL path, e.g. `/posts/foo/bar`
    pub path: String,
    pub description: String,
    pub published_at: String,
}

impl Serialize for IndexEntry {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut state = serializer.serialize_struct("IndexEntry", 5)?;
        state.serialize_field("title", &self.title)?;
        state.serialize_field("heading", &self.heading)?;
        state.serialize_field("path", &self.path)?;
        state.serialize_field("description", &self.description)?;
        state.serialize_field("publishedAt", &self.published_at)?;
        state.end()
    }
}

impl IndexEntry {
    /// Project a document, rooting its path under `/<posts_dir>/`.
    pub fn from_document(document: &Document, posts_dir: &str) -> Self {
        Self {
            title: document.title.clone(),
            heading: document.heading.clone(),
            path: format!("/{posts_dir}/{}", document.path),
            description: extract_description(&document.rendered_body),
            published_at: document.published_at.clone(),
        }
    }
}

/// Index entries sorted by `published_at`, oldest first.
///
/// The sort is stable, so equal timestamps keep document order.
pub fn build_index(documents: &[Document], posts_dir: &str) -> Vec<IndexEntry> {
    let mut entries: Vec<_> = documents
        .iter()
        .map(|document| IndexEntry::from_document(document, posts_dir))
        .collect();
    entries.sort_by(|a, b| a.published_at.cmp(&b.published_at));
    entries
}

/// Write `<output>/posts/index.html` holding the sorted index as a JSON array.
pub fn write_index(
    output: &Path,
    posts_dir: &str,
    documents: &[Document],
    pretty: bool,
) -> Result<PathBuf> {
    let dir = output.join(POSTS_DIR);
    ensure_dir(&dir)?;

    let path = dir.join(RECORD_FILE);
    let entries = build_index(documents, posts_dir);
    write_json(&path, &entries, pretty)?;

    log!("index"; "{} entries", entries.len());
    Ok(path)
}
