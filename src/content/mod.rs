//! Document pipeline: discovery, rendering, metadata and assembly.
//!
//! ```text
//! discover_sources() ──► Assembler::assemble_all() ──► Vec<Document>
//!                              │
//!                              ├── Renderer (markdown → HTML)
//!                              ├── extract_heading (source text)
//!                              └── History (published time)
//! ```

pub mod document;
pub mod meta;
pub mod render;
pub mod source;

pub use document::{Assembler, Document};
pub use render::{MarkdownRenderer, Renderer};
pub use source::discover_sources;
