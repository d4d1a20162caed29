//! Command-line interface definitions.

use clap::Parser;
use std::path::PathBuf;

/// Convert a markdown tree into JSON post records, a post index and a sitemap
#[derive(Parser, Debug, Clone)]
#[command(version, about, long_about = None, arg_required_else_help = true)]
pub struct Cli {
    /// Markdown file or directory to publish
    pub source: PathBuf,

    /// Public base URL of the site, e.g. https://example.com
    pub site_url: String,

    /// Directory name posts are served under, e.g. `posts`
    pub posts_dir: String,

    /// Output directory path (overrides `[build] output`)
    #[arg(short, long)]
    pub output: Option<PathBuf>,

    /// Config file name (optional, default: md2api.toml)
    #[arg(short = 'C', long, default_value = "md2api.toml")]
    pub config: PathBuf,

    /// Skip sitemap generation
    #[arg(long)]
    pub no_sitemap: bool,
}
