//! Markdown to HTML renderer with inline extensions.
//!
//! This crate provides a [`MarkdownRenderer`] built on pulldown-cmark that can
//! be extended with custom inline syntax.
//!
//! # Architecture
//!
//! - [`Extension`]: Installs [`InlineParser`]s and [`NodeRenderer`]s into an
//!   [`ExtensionRegistry`] at fixed priorities. Parsers recognize syntax in the
//!   markdown source and return [`Node`]s; renderers turn nodes of one
//!   [`NodeKind`] into markup.
//! - Matches are replaced by placeholders before pulldown-cmark parses inline
//!   structure and are resolved back into nodes while text is written, so an
//!   extension's syntax wins over links, emphasis and code spans starting
//!   inside it.
//!
//! # Example
//!
//! ```
//! use rw_renderer::MarkdownRenderer;
//!
//! let result = MarkdownRenderer::new().render_markdown("# Hello\n\n**Bold** text");
//! assert_eq!(result.html, "<h1>Hello</h1><p><strong>Bold</strong> text</p>");
//! ```

mod extension;
mod html;
mod inline;
mod placeholder;
mod renderer;
mod state;
mod util;

pub use extension::{Extension, ExtensionRegistry, Prioritized};
pub use inline::{InlineParser, Node, NodeKind, NodeRenderer, ParsedInline};
pub use renderer::{MarkdownRenderer, RenderResult};
pub use state::escape_html;
