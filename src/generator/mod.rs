//! Output artifacts built from the assembled documents.
//!
//! | Writer | Output |
//! |--------|--------|
//! | [`posts`] | `<output>/posts/<path>/index.html` (one JSON object each) |
//! | [`index`] | `<output>/posts/index.html` (JSON array, oldest first) |
//! | [`sitemap`] | `<output>/sitemap.xml` |
//!
//! Writers are independent: each reads the shared document list and owns
//! its own output paths.

pub mod index;
pub mod posts;
pub mod sitemap;

use anyhow::{Context, Result};
use serde::Serialize;
use std::{fs, path::Path};

/// Directory under the output root that holds post records and the index.
pub const POSTS_DIR: &str = "posts";

/// File name used for every JSON record.
pub const RECORD_FILE: &str = "index.html";

/// Serialize `value` as JSON and overwrite `path` with it.
pub(crate) fn write_json<T: Serialize + ?Sized>(path: &Path, value: &T, pretty: bool) -> Result<()> {
    let json = if pretty {
        serde_json::to_vec_pretty(value)?
    } else {
        serde_json::to_vec(value)?
    };
    fs::write(path, json).with_context(|| format!("Failed to write {}", path.display()))
}

/// Create `dir` and its parents.
pub(crate) fn ensure_dir(dir: &Path) -> Result<()> {
    fs::create_dir_all(dir).with_context(|| format!("Failed to create directory {}", dir.display()))
}
