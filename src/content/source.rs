//! Source file discovery.

use anyhow::{Context, Result};
use std::{
    ffi::OsStr,
    path::{Path, PathBuf},
};
use walkdir::{DirEntry, WalkDir};

/// Collect source files under `root`.
///
/// A directory is walked recursively for files with `extension`, in file
/// name order, following symlinks. Any other path is returned as the only
/// source. An unreadable entry or a symlink loop fails the whole walk.
pub fn discover_sources(root: &Path, extension: &str) -> Result<Vec<PathBuf>> {
    if !root.is_dir() {
        return Ok(vec![root.to_path_buf()]);
    }

    let mut sources = Vec::new();
    let walker = WalkDir::new(root)
        .follow_links(true)
        .sort_by_file_name()
        .into_iter()
        .filter_entry(|entry| !is_git_dir(entry));

    for entry in walker {
        let entry = entry.with_context(|| format!("Failed to walk {}", root.display()))?;
        if entry.file_type().is_file()
            && entry.path().extension() == Some(OsStr::new(extension))
        {
            sources.push(entry.into_path());
        }
    }
    Ok(sources)
}

fn is_git_dir(entry: &DirEntry) -> bool {
    entry.file_type().is_dir() && entry.file_name() == ".git"
}

/// Relative output path of a source: relative to `root`, extension removed,
/// `/`-separated.
///
/// | root | source | result |
/// |------|--------|--------|
/// | `content` | `content/foo/bar.md` | `foo/bar` |
/// | `content/hello.md` | `content/hello.md` | `hello` |
pub fn relative_path(root: &Path, source: &Path) -> String {
    let relative = source
        .strip_prefix(root)
        .ok()
        .filter(|rel| !rel.as_os_str().is_empty())
        .unwrap_or_else(|| source.file_name().map_or(source, Path::new));

    relative
        .with_extension("")
        .components()
        .map(|c| c.as_os_str().to_string_lossy())
        .collect::<Vec<_>>()
        .join("/")
}

/// File name without extension.
pub fn file_stem(source: &Path) -> String {
    source
        .file_stem()
        .map(|stem| stem.to_string_lossy().into_owned())
        .unwrap_or_default()
}
