//! Markdown to HTML rendering.

use pulldown_cmark::{Options, Parser, html};

/// Converts source markup to rendered text.
pub trait Renderer {
    fn render(&self, text: &str) -> String;
}

/// CommonMark renderer with the GFM extensions posts commonly use.
///
/// Fenced code blocks are part of CommonMark; tables, strikethrough and
/// footnotes are switched on explicitly.
#[derive(Debug, Clone, Copy, Default)]
pub struct MarkdownRenderer;

impl MarkdownRenderer {
    const fn options() -> Options {
        Options::ENABLE_TABLES
            .union(Options::ENABLE_STRIKETHROUGH)
            .union(Options::ENABLE_FOOTNOTES)
    }
}

impl Renderer for MarkdownRenderer {
    fn render(&self, text: &str) -> String {
        let parser = Parser::new_ext(text, Self::options());
        let mut out = String::with_capacity(text.len() * 3 / 2);
        html::push_html(&mut out, parser);
        out
    }
}
