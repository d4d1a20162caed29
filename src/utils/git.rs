//! Change history lookup backed by the git repository holding the sources.
//!
//! A document's published time is the committer time of the newest commit
//! that changed it. Files without any such commit have no history.

use crate::utils::date::from_unix_seconds;
use anyhow::{Context, Result, anyhow};
use chrono::NaiveDateTime;
use gix::{ObjectId, Repository};
use std::path::{Path, PathBuf};

/// Source of "last modified" instants for content files.
pub trait History {
    /// Newest change instant (UTC) of `path`, or `None` if it has no history.
    fn last_modified(&self, path: &Path) -> Result<Option<NaiveDateTime>>;
}

/// History read from the git repository that contains the source root.
pub struct GitHistory {
    repo: Repository,
    /// Canonical working tree root
    root: PathBuf,
}

impl GitHistory {
    /// Discover the repository enclosing `path` (searching upwards).
    ///
    /// `path` may be a file; discovery then starts from its directory.
    pub fn discover(path: &Path) -> Result<Self> {
        let resolved = path
            .canonicalize()
            .with_context(|| format!("Failed to resolve {}", path.display()))?;
        let start = if resolved.is_file() {
            resolved.parent().unwrap_or(resolved.as_path())
        } else {
            resolved.as_path()
        };
        let repo = gix::discover(start)
            .with_context(|| format!("No git repository found for {}", path.display()))?;
        let root = get_worktree_root(&repo)?;
        Ok(Self { repo, root })
    }

    /// Path of `path` relative to the working tree, `None` if it lies outside.
    fn relative_path(&self, path: &Path) -> Result<Option<PathBuf>> {
        let path = path
            .canonicalize()
            .with_context(|| format!("Failed to resolve {}", path.display()))?;
        Ok(path.strip_prefix(&self.root).ok().map(Path::to_path_buf))
    }

    /// Blob id of `relative` in the tree of `commit`.
    fn blob_at(&self, commit: ObjectId, relative: &Path) -> Result<Option<ObjectId>> {
        let tree = self.repo.find_commit(commit)?.tree()?;
        Ok(tree
            .lookup_entry_by_path(relative)?
            .map(|entry| entry.object_id()))
    }
}

impl History for GitHistory {
    fn last_modified(&self, path: &Path) -> Result<Option<NaiveDateTime>> {
        let Some(relative) = self.relative_path(path)? else {
            return Ok(None);
        };
        // Unborn HEAD: nothing has been committed yet
        let Ok(head) = self.repo.head_id() else {
            return Ok(None);
        };

        let mut newest: Option<i64> = None;
        for info in head.ancestors().all()? {
            let id = info?.id;
            let Some(blob) = self.blob_at(id, &relative)? else {
                continue;
            };

            // Treesame to any parent means this commit didn't touch the file
            let commit = self.repo.find_commit(id)?;
            let mut changed = true;
            for parent in commit.parent_ids() {
                if self.blob_at(parent.detach(), &relative)? == Some(blob) {
                    changed = false;
                    break;
                }
            }

            if changed {
                newest = newest.max(Some(commit.time()?.seconds));
            }
        }

        Ok(newest.and_then(from_unix_seconds))
    }
}

/// Canonical working tree root; linked worktrees and submodules keep their
/// git dir elsewhere, so `repo.path()` can't be used.
fn get_worktree_root(repo: &Repository) -> Result<PathBuf> {
    let workdir = repo
        .workdir()
        .ok_or_else(|| anyhow!("Bare repository has no working tree: {}", repo.path().display()))?;
    workdir
        .canonicalize()
        .with_context(|| format!("Failed to resolve {}", workdir.display()))
}
