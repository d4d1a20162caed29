//! Document records and their assembly from source files.
//!
//! ```text
//! source.md ──┬── read ──► extract_heading()      ──► heading
//!             ├── render() ─────────────────────────► rendered_body
//!             ├── History::last_modified() ──► None ──► excluded
//!             │                               Some ──► published_at
//!             └── file name / relative path ────────► title, path
//! ```

use super::{
    meta::extract_heading,
    render::Renderer,
    source::{file_stem, relative_path},
};
use crate::{log, utils::date::canonical, utils::git::History};
use anyhow::{Context, Result};
use serde::{Serialize, Serializer, ser::SerializeStruct};
use std::{fs, path::Path};

/// One publishable source file.
///
/// Only documents with a resolved timestamp are ever constructed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Document {
    /// File name without extension
    pub title: String,
    /// First `# ` heading of the source, may be empty
    pub heading: String,
    /// Path relative to the source root, no extension (e.g. `foo/bar`)
    pub path: String,
    /// Rendered HTML
    pub rendered_body: String,
    /// Canonical UTC timestamp, see [`crate::utils::date`]
    pub published_at: String,
}

impl Serialize for Document {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut state = serializer.serialize_struct("Document", 5)?;
        state.serialize_field("title", &self.title)?;
        state.serialize_field("heading", &self.heading)?;
        state.serialize_field("path", &self.path)?;
        state.serialize_field("renderedBody", &self.rendered_body)?;
        state.serialize_field("publishedAt", &self.published_at)?;
        state.end()
    }
}

/// Builds [`Document`]s from source paths.
pub struct Assembler<'a> {
    root: &'a Path,
    renderer: &'a dyn Renderer,
    history: &'a dyn History,
}

impl<'a> Assembler<'a> {
    pub fn new(root: &'a Path, renderer: &'a dyn Renderer, history: &'a dyn History) -> Self {
        Self {
            root,
            renderer,
            history,
        }
    }

    /// Assemble a single source, `None` when it has no history.
    pub fn assemble(&self, source: &Path) -> Result<Option<Document>> {
        let Some(modified) = self.history.last_modified(source)? else {
            log!("skip"; "{}: no history", source.display());
            return Ok(None);
        };

        let text = fs::read_to_string(source)
            .with_context(|| format!("Failed to read {}", source.display()))?;

        Ok(Some(Document {
            title: file_stem(source),
            heading: extract_heading(&text),
            path: relative_path(self.root, source),
            rendered_body: self.renderer.render(&text),
            published_at: canonical(modified),
        }))
    }

    /// Assemble every source in order, dropping those without history.
    pub fn assemble_all(&self, sources: &[impl AsRef<Path>]) -> Result<Vec<Document>> {
        let mut documents = Vec::with_capacity(sources.len());
        for source in sources {
            if let Some(document) = self.assemble(source.as_ref())? {
                documents.push(document);
            }
        }
        Ok(documents)
    }
}
