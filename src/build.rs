//! Site building orchestration.
//!
//! # Architecture
//!
//! ```text
//! build_site()
//!     │
//!     ├── discover_sources()        ──► candidate paths
//!     ├── Assembler::assemble_all() ──► Vec<Document> (no history = dropped)
//!     │
//!     ├── write_posts()    ──► posts/<path>/index.html
//!     ├── write_index()    ──► posts/index.html
//!     └── write_sitemap()  ──► sitemap.xml
//! ```
//!
//! Writers run in that order and the first failure ends the build. Output
//! already written by an earlier writer is left in place.

use crate::{
    config::SiteConfig,
    content::{Assembler, Document, Renderer, discover_sources},
    generator::{index::write_index, posts::write_posts, sitemap::write_sitemap},
    log,
    utils::git::History,
};
use anyhow::Result;
use std::path::PathBuf;

/// Paths written by one build.
#[derive(Debug)]
pub struct BuildOutput {
    pub documents: Vec<Document>,
    pub posts: Vec<PathBuf>,
    pub index: PathBuf,
    pub sitemap: Option<PathBuf>,
}

/// Build every artifact for the configured source tree.
pub fn build_site(
    config: &SiteConfig,
    renderer: &dyn Renderer,
    history: &dyn History,
) -> Result<BuildOutput> {
    let sources = discover_sources(&config.source, &config.build.extension)?;
    log!("source"; "found {} files", sources.len());

    let documents = Assembler::new(&config.source, renderer, history).assemble_all(&sources)?;

    let output = &config.build.output;
    let pretty = config.build.pretty;
    let posts = write_posts(output, &documents, pretty)?;
    let index = write_index(output, &config.posts_dir, &documents, pretty)?;
    let sitemap = if config.sitemap.enable {
        Some(write_sitemap(output, &config.site_url, &config.posts_dir, &documents)?)
    } else {
        None
    };

    Ok(BuildOutput {
        documents,
        posts,
        index,
        sitemap,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{
        content::{MarkdownRenderer, document::tests::FakeHistory},
        utils::git::{
            GitHistory,
            tests::{commit_file, git_available, init_repo},
        },
    };
    use std::{fs, path::Path};
    use tempfile::TempDir;

    struct Site {
        _dir: TempDir,
        config: SiteConfig,
    }

    fn site(files: &[(&str, &str)]) -> Site {
        let dir = TempDir::new().unwrap();
        let source = dir.path().join("content");
        for (name, content) in files {
            let path = source.join(name);
            fs::create_dir_all(path.parent().unwrap()).unwrap();
            fs::write(path, content).unwrap();
        }
        fs::create_dir_all(&source).unwrap();

        let mut config = SiteConfig::default();
        config.source = source;
        config.site_url = "https://x.test".to_string();
        config.posts_dir = "posts".to_string();
        config.build.output = dir.path().join("public");
        Site { _dir: dir, config }
    }

    fn source(site: &Site, name: &str) -> PathBuf {
        site.config.source.join(name)
    }

    fn read(path: &Path) -> String {
        fs::read_to_string(path).unwrap()
    }

    fn post_dirs(output: &Path) -> Vec<String> {
        let mut dirs: Vec<_> = fs::read_dir(output.join("posts"))
            .unwrap()
            .filter_map(Result::ok)
            .filter(|e| e.file_type().unwrap().is_dir())
            .map(|e| e.file_name().to_string_lossy().into_owned())
            .collect();
        dirs.sort();
        dirs
    }

    #[test]
    fn test_document_without_history_is_excluded_everywhere() {
        let site = site(&[
            ("tracked.md", "# Tracked\n\nKept around"),
            ("untracked.md", "# Untracked\n\nNever committed"),
        ]);
        let history =
            FakeHistory::default().with(source(&site, "tracked.md"), "2024-01-01T00:00:00");

        let built = build_site(&site.config, &MarkdownRenderer, &history).unwrap();
        let output = &site.config.build.output;

        assert_eq!(built.documents.len(), 1);
        assert_eq!(post_dirs(output), vec!["tracked"]);

        let index: serde_json::Value = serde_json::from_str(&read(&built.index)).unwrap();
        let index = index.as_array().unwrap();
        assert_eq!(index.len(), 1);
        assert_eq!(index[0]["path"], "/posts/tracked");
        assert_eq!(index[0]["heading"], "Tracked");
        assert_eq!(index[0]["description"], "Kept around");
        assert_eq!(index[0]["publishedAt"], "2024-01-01T00:00:00");

        let sitemap = read(built.sitemap.as_ref().unwrap());
        assert_eq!(sitemap.matches("<url>").count(), 2);
        assert!(sitemap.contains("<loc>https://x.test/posts/tracked</loc>"));
        assert!(sitemap.contains("<loc>https://x.test</loc>"));
        assert!(!sitemap.contains("untracked"));
    }

    #[test]
    fn test_nested_sources_keep_structure() {
        let site = site(&[("2024/jan/first.md", "# First")]);
        let history = FakeHistory::default()
            .with(source(&site, "2024/jan/first.md"), "2024-01-15T08:00:00");

        let built = build_site(&site.config, &MarkdownRenderer, &history).unwrap();
        let post = site.config.build.output.join("posts/2024/jan/first/index.html");
        assert_eq!(built.posts, vec![post.clone()]);

        let record: serde_json::Value = serde_json::from_str(&read(&post)).unwrap();
        assert_eq!(record["title"], "first");
        assert_eq!(record["path"], "2024/jan/first");
        assert_eq!(record["renderedBody"], "<h1>First</h1>\n");
    }

    #[test]
    fn test_index_sorted_by_published_time() {
        let site = site(&[("a.md", "# A"), ("b.md", "# B"), ("c.md", "# C")]);
        let history = FakeHistory::default()
            .with(source(&site, "a.md"), "2024-03-01T00:00:00")
            .with(source(&site, "b.md"), "2024-01-01T00:00:00")
            .with(source(&site, "c.md"), "2024-02-01T00:00:00");

        let built = build_site(&site.config, &MarkdownRenderer, &history).unwrap();
        let index: Vec<serde_json::Value> = serde_json::from_str(&read(&built.index)).unwrap();
        let titles: Vec<_> = index.iter().map(|e| e["title"].as_str().unwrap()).collect();
        assert_eq!(titles, vec!["b", "c", "a"]);

        // the sitemap keeps discovery order
        let sitemap = read(built.sitemap.as_ref().unwrap());
        let a = sitemap.find("/posts/a<").unwrap();
        let b = sitemap.find("/posts/b<").unwrap();
        assert!(a < b);
    }

    #[test]
    fn test_rebuild_is_byte_identical() {
        let site = site(&[
            ("one.md", "# One\n\nFirst post\n\n| a | b |\n|---|---|\n| 1 | 2 |"),
            ("two.md", "# Two\n\n```rust\nfn main() {}\n```"),
        ]);
        let history = FakeHistory::default()
            .with(source(&site, "one.md"), "2024-01-01T00:00:00")
            .with(source(&site, "two.md"), "2024-01-01T00:00:00");

        let first = build_site(&site.config, &MarkdownRenderer, &history).unwrap();
        let snapshot: Vec<String> = first
            .posts
            .iter()
            .chain([&first.index, first.sitemap.as_ref().unwrap()])
            .map(|p| read(p))
            .collect();

        let second = build_site(&site.config, &MarkdownRenderer, &history).unwrap();
        let again: Vec<String> = second
            .posts
            .iter()
            .chain([&second.index, second.sitemap.as_ref().unwrap()])
            .map(|p| read(p))
            .collect();

        assert_eq!(snapshot, again);
    }

    #[test]
    fn test_sitemap_can_be_disabled() {
        let mut site = site(&[("a.md", "# A")]);
        site.config.sitemap.enable = false;
        let history = FakeHistory::default().with(source(&site, "a.md"), "2024-01-01T00:00:00");

        let built = build_site(&site.config, &MarkdownRenderer, &history).unwrap();
        assert!(built.sitemap.is_none());
        assert!(!site.config.build.output.join("sitemap.xml").exists());
    }

    #[test]
    fn test_empty_source_still_writes_index_and_sitemap() {
        let site = site(&[]);
        let built = build_site(&site.config, &MarkdownRenderer, &FakeHistory::default()).unwrap();

        assert!(built.posts.is_empty());
        assert_eq!(read(&built.index), "[]");
        let sitemap = read(built.sitemap.as_ref().unwrap());
        assert_eq!(sitemap.matches("<url>").count(), 1);
    }

    #[test]
    fn test_failed_writer_leaves_earlier_output() {
        let site = site(&[("a.md", "# A")]);
        let history = FakeHistory::default().with(source(&site, "a.md"), "2024-01-01T00:00:00");

        // a directory where the sitemap file should go makes the last writer fail
        fs::create_dir_all(site.config.build.output.join("sitemap.xml")).unwrap();

        assert!(build_site(&site.config, &MarkdownRenderer, &history).is_err());
        assert!(site.config.build.output.join("posts/a/index.html").is_file());
        assert!(site.config.build.output.join("posts/index.html").is_file());
    }

    #[test]
    fn test_single_file_source() {
        let mut site = site(&[("only.md", "# Only\n\nJust me")]);
        site.config.source = source(&site, "only.md");
        let history =
            FakeHistory::default().with(site.config.source.clone(), "2024-01-01T00:00:00");

        let built = build_site(&site.config, &MarkdownRenderer, &history).unwrap();
        assert_eq!(built.documents.len(), 1);
        assert_eq!(built.documents[0].path, "only");
        assert!(site.config.build.output.join("posts/only/index.html").is_file());
    }

    /// Repo with committed `content/a.md` and untracked `content/b.md`.
    fn git_site() -> (TempDir, SiteConfig) {
        let repo = init_repo();
        commit_file(repo.path(), "content/a.md", "# A\n\nHello", "2024-01-01T00:00:00+00:00");
        fs::write(repo.path().join("content/b.md"), "# B\n\nDraft").unwrap();

        let mut config = SiteConfig::default();
        config.source = repo.path().join("content");
        config.site_url = "https://x.test".to_string();
        config.posts_dir = "posts".to_string();
        config.build.output = repo.path().join("public");
        (repo, config)
    }

    fn assert_single_tracked_post(config: &SiteConfig, built: &BuildOutput) {
        let index: Vec<serde_json::Value> = serde_json::from_str(&read(&built.index)).unwrap();
        assert_eq!(index.len(), 1);
        assert_eq!(index[0]["path"], "/posts/a");
        assert_eq!(index[0]["publishedAt"], "2024-01-01T00:00:00");

        assert_eq!(post_dirs(&config.build.output), vec!["a"]);

        let sitemap = read(built.sitemap.as_ref().unwrap());
        assert_eq!(sitemap.matches("<url>").count(), 2);
        assert!(sitemap.contains("<loc>https://x.test/posts/a</loc>"));
        assert!(sitemap.contains("<loc>https://x.test</loc>"));
    }

    #[test]
    fn test_git_history_directory_source() {
        if !git_available() {
            return;
        }
        let (_repo, config) = git_site();
        let history = GitHistory::discover(&config.source).unwrap();

        let built = build_site(&config, &MarkdownRenderer, &history).unwrap();
        assert_eq!(built.documents.len(), 1);
        assert_single_tracked_post(&config, &built);
    }

    #[test]
    fn test_git_history_single_file_source() {
        if !git_available() {
            return;
        }
        let (_repo, mut config) = git_site();
        config.source = config.source.join("a.md");
        let history = GitHistory::discover(&config.source).unwrap();

        let built = build_site(&config, &MarkdownRenderer, &history).unwrap();
        assert_eq!(built.documents[0].path, "a");
        assert_single_tracked_post(&config, &built);
    }

    #[test]
    fn test_git_history_untracked_single_file_is_excluded() {
        if !git_available() {
            return;
        }
        let (_repo, mut config) = git_site();
        config.source = config.source.join("b.md");
        let history = GitHistory::discover(&config.source).unwrap();

        let built = build_site(&config, &MarkdownRenderer, &history).unwrap();
        assert!(built.documents.is_empty());
        assert_eq!(read(&built.index), "[]");
        assert_eq!(read(built.sitemap.as_ref().unwrap()).matches("<url>").count(), 1);
    }
}
