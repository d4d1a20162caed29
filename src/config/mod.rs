//! Run configuration.
//!
//! The three positional CLI arguments (source, site URL, posts directory)
//! are always required. An optional `md2api.toml` tunes the rest:
//!
//! ```toml
//! [build]
//! output = "public"   # output root
//! extension = "md"    # source markup extension
//! pretty = false      # pretty-print JSON records
//!
//! [sitemap]
//! enable = true
//! ```
//!
//! CLI flags override file values.

pub mod defaults;
mod error;

pub use error::ConfigError;

use crate::cli::Cli;
use educe::Educe;
use serde::{Deserialize, Serialize};
use std::{
    fs,
    path::{Path, PathBuf},
};

/// Root configuration, file sections plus CLI-provided run inputs.
#[derive(Debug, Clone, Educe, Serialize, Deserialize)]
#[educe(Default)]
#[serde(deny_unknown_fields)]
pub struct SiteConfig {
    /// Path of the config file (set after loading)
    #[serde(skip)]
    pub config_path: PathBuf,

    /// Markdown file or directory
    #[serde(skip)]
    pub source: PathBuf,

    /// Public base URL without trailing `/`
    #[serde(skip)]
    pub site_url: String,

    /// Posts directory name used in public URLs, without surrounding `/`
    #[serde(skip)]
    pub posts_dir: String,

    #[serde(default)]
    pub build: BuildConfig,

    #[serde(default)]
    pub sitemap: SitemapConfig,
}

/// `[build]` section.
#[derive(Debug, Clone, Educe, Serialize, Deserialize)]
#[educe(Default)]
#[serde(deny_unknown_fields)]
pub struct BuildConfig {
    /// Output root directory.
    #[serde(default = "defaults::build::output")]
    #[educe(Default = defaults::build::output())]
    pub output: PathBuf,

    /// Extension of source files, without the dot.
    #[serde(default = "defaults::build::extension")]
    #[educe(Default = defaults::build::extension())]
    pub extension: String,

    /// Pretty-print JSON output.
    #[serde(default)]
    pub pretty: bool,
}

/// `[sitemap]` section.
#[derive(Debug, Clone, Educe, Serialize, Deserialize)]
#[educe(Default)]
#[serde(deny_unknown_fields)]
pub struct SitemapConfig {
    #[serde(default = "defaults::r#true")]
    #[educe(Default = true)]
    pub enable: bool,
}

impl SiteConfig {
    /// Parse configuration from TOML string
    pub fn parse(content: &str) -> Result<Self, ConfigError> {
        Ok(toml::from_str(content)?)
    }

    /// Load configuration from file path
    pub fn from_path(path: &Path) -> Result<Self, ConfigError> {
        let content =
            fs::read_to_string(path).map_err(|err| ConfigError::Io(path.to_path_buf(), err))?;
        let mut config = Self::parse(&content)?;
        config.config_path = path.to_path_buf();
        Ok(config)
    }

    /// Load `cli.config` if it exists, defaults otherwise, then apply the CLI.
    pub fn load(cli: &Cli) -> Result<Self, ConfigError> {
        let mut config = if cli.config.exists() {
            Self::from_path(&cli.config)?
        } else {
            Self::default()
        };
        config.update_with_cli(cli);
        config.validate()?;
        Ok(config)
    }

    /// Update configuration with CLI arguments
    pub fn update_with_cli(&mut self, cli: &Cli) {
        self.source = cli.source.clone();
        self.site_url = cli.site_url.trim_end_matches('/').to_owned();
        self.posts_dir = cli.posts_dir.trim_matches('/').to_owned();

        if let Some(output) = &cli.output {
            self.build.output = output.clone();
        }
        if cli.no_sitemap {
            self.sitemap.enable = false;
        }
    }

    /// Check the run inputs
    pub fn validate(&self) -> Result<(), ConfigError> {
        let invalid = |msg: &str| Err(ConfigError::Validation(msg.into()));

        if self.site_url.is_empty() {
            return invalid("site url is empty");
        }
        if !(self.site_url.starts_with("http://") || self.site_url.starts_with("https://")) {
            return invalid("site url must start with http:// or https://");
        }
        if self.posts_dir.is_empty() {
            return invalid("posts directory name is empty");
        }
        if self.posts_dir.split('/').any(str::is_empty) {
            return invalid("posts directory name has an empty path segment");
        }
        if self.build.extension.is_empty() {
            return invalid("[build.extension] is empty");
        }
        if !self.source.exists() {
            return Err(ConfigError::Validation(format!(
                "source `{}` not found",
                self.source.display()
            )));
        }
        Ok(())
    }
}
