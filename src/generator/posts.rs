//! Per-document post records.

use super::{POSTS_DIR, RECORD_FILE, ensure_dir, write_json};
use crate::{content::Document, log};
use anyhow::Result;
use std::path::{Path, PathBuf};

/// Write `<output>/posts/<path>/index.html` for every document.
///
/// Each file holds the JSON of the full document and is overwritten as a
/// whole. Returns the written paths.
pub fn write_posts(output: &Path, documents: &[Document], pretty: bool) -> Result<Vec<PathBuf>> {
    let posts_root = output.join(POSTS_DIR);
    let mut written = Vec::with_capacity(documents.len());

    for document in documents {
        let dir = post_dir(&posts_root, &document.path);
        ensure_dir(&dir)?;
        let path = dir.join(RECORD_FILE);
        write_json(&path, document, pretty)?;
        written.push(path);
    }

    log!("posts"; "wrote {} posts", written.len());
    Ok(written)
}

/// Destination directory of a post, splitting its `/`-separated path.
fn post_dir(posts_root: &Path, path: &str) -> PathBuf {
    let mut dir = posts_root.to_path_buf();
    dir.extend(path.split('/').filter(|segment| !segment.is_empty()));
    dir
}
