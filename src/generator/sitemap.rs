//! Sitemap generation.
//!
//! Lists every document plus the site root for search engine indexing.
//!
//! # Sitemap Format
//!
//! ```xml
//! <?xml version="1.0" encoding="UTF-8"?>
//! <urlset xmlns="http://www.sitemaps.org/schemas/sitemap/0.9">
//!   <url>
//!     <loc>https://example.com/posts/hello</loc>
//!     <lastmod>2025-01-01T00:00:00</lastmod>
//!   </url>
//!   <url>
//!     <loc>https://example.com</loc>
//!   </url>
//! </urlset>
//! ```

use super::ensure_dir;
use crate::{content::Document, log};
use anyhow::{Context, Result};
use quick_xml::{
    Writer,
    events::{BytesDecl, BytesEnd, BytesStart, BytesText, Event},
};
use std::{
    fs,
    io::Cursor,
    path::{Path, PathBuf},
};

/// XML namespace for sitemap
const SITEMAP_NS: &str = "http://www.sitemaps.org/schemas/sitemap/0.9";

/// Output file name under the output root
pub const SITEMAP_FILE: &str = "sitemap.xml";

type XmlWriter = Writer<Cursor<Vec<u8>>>;

/// Write `<output>/sitemap.xml` for `documents` and the site root.
pub fn write_sitemap(
    output: &Path,
    site_url: &str,
    posts_dir: &str,
    documents: &[Document],
) -> Result<PathBuf> {
    let sitemap = Sitemap::new(site_url, posts_dir, documents);
    let xml = sitemap.into_xml()?;

    ensure_dir(output)?;
    let path = output.join(SITEMAP_FILE);
    fs::write(&path, xml)
        .with_context(|| format!("Failed to write sitemap to {}", path.display()))?;

    log!("sitemap"; "{}", path.display());
    Ok(path)
}

/// Sitemap data structure
struct Sitemap {
    urls: Vec<UrlEntry>,
}

/// Single URL entry in the sitemap
#[derive(Debug, PartialEq, Eq)]
struct UrlEntry {
    /// Full URL location
    loc: String,
    /// Canonical published timestamp, absent for the site root
    lastmod: Option<String>,
}

impl UrlEntry {
    /// Entry for a relative post path; the empty path is the site root.
    fn new(site_url: &str, posts_dir: &str, path: &str, lastmod: Option<&str>) -> Self {
        let loc = if path.is_empty() {
            site_url.to_owned()
        } else {
            format!("{site_url}/{posts_dir}/{path}")
        };
        Self {
            loc,
            lastmod: lastmod.map(str::to_owned),
        }
    }
}

impl Sitemap {
    /// One entry per document in order, followed by the site root.
    fn new(site_url: &str, posts_dir: &str, documents: &[Document]) -> Self {
        let urls = documents
            .iter()
            .map(|doc| UrlEntry::new(site_url, posts_dir, &doc.path, Some(&doc.published_at)))
            .chain(std::iter::once(UrlEntry::new(site_url, posts_dir, "", None)))
            .collect();
        Self { urls }
    }

    /// Generate the UTF-8 sitemap document.
    fn into_xml(self) -> Result<Vec<u8>> {
        let buf = Vec::with_capacity(128 + self.urls.len() * 128);
        let mut writer = Writer::new_with_indent(Cursor::new(buf), b' ', 2);

        writer.write_event(Event::Decl(BytesDecl::new("1.0", Some("UTF-8"), None)))?;
        let mut urlset = BytesStart::new("urlset");
        urlset.push_attribute(("xmlns", SITEMAP_NS));
        writer.write_event(Event::Start(urlset))?;

        for entry in &self.urls {
            writer.write_event(Event::Start(BytesStart::new("url")))?;
            write_text_element(&mut writer, "loc", &entry.loc)?;
            if let Some(lastmod) = &entry.lastmod {
                write_text_element(&mut writer, "lastmod", lastmod)?;
            }
            writer.write_event(Event::End(BytesEnd::new("url")))?;
        }

        writer.write_event(Event::End(BytesEnd::new("urlset")))?;

        let mut xml = writer.into_inner().into_inner();
        xml.push(b'\n');
        Ok(xml)
    }
}

/// Write a text element: `<tag>text</tag>`.
fn write_text_element(writer: &mut XmlWriter, tag: &str, text: &str) -> Result<()> {
    writer.write_event(Event::Start(BytesStart::new(tag)))?;
    writer.write_event(Event::Text(BytesText::new(text)))?;
    writer.write_event(Event::End(BytesEnd::new(tag)))?;
    Ok(())
}
