//! md2api - publish a markdown tree as JSON post records, a post index and a sitemap.

mod build;
mod cli;
mod config;
mod content;
mod generator;
mod utils;

use anyhow::Result;
use build::build_site;
use clap::Parser;
use cli::Cli;
use config::SiteConfig;
use content::MarkdownRenderer;
use utils::git::GitHistory;

fn main() -> Result<()> {
    let cli = Cli::parse();
    let config = SiteConfig::load(&cli)?;

    let history = GitHistory::discover(&config.source)?;
    let built = build_site(&config, &MarkdownRenderer, &history)?;

    let sitemap = built
        .sitemap
        .map(|path| format!(", {}", path.display()))
        .unwrap_or_default();
    log!(
        "build";
        "published {} documents to {} posts, {}{}",
        built.documents.len(),
        built.posts.len(),
        built.index.display(),
        sitemap
    );
    Ok(())
}
