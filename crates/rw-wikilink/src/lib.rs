//! Wikilink extension for [`rw_renderer`].
//!
//! Recognizes `[[destination]]` and `[[destination:alias]]` in document text,
//! resolves the destination to a link target and renders the span as a link.
//!
//! # Syntax
//!
//! - `[[Page Name]]` links to `page-name` with the text `Page Name`.
//! - `[[Page Name:shown text]]` uses `shown text` as the link text. The alias
//!   is split off at the last delimiter; a delimiter directly after `[[` or
//!   directly before `]]` is part of the destination.
//! - `[[]]`, unterminated spans and spans crossing a line break stay plain
//!   text.
//! - Wikilinks are matched before markdown inline syntax: `[[foo]](bar)` is a
//!   wikilink followed by `(bar)`, and `*`, `` ` `` or `[` inside the brackets
//!   are part of the link. Code spans and code blocks are never scanned.
//!
//! # Customization
//!
//! [`WikiLinkExtension`] takes three options: the alias delimiter, a
//! [`ResolveDestination`] deciding where a link points and whether the
//! target exists, and a [`RenderWikiLink`] producing the markup.
//!
//! ```
//! use rw_renderer::{MarkdownRenderer, escape_html};
//! use rw_wikilink::{WikiLink, WikiLinkExtension};
//!
//! let extension = WikiLinkExtension::new()
//!     .with_alias_delimiter(b'|')
//!     .with_resolver(|raw: &str| ("path".to_owned(), raw == "Exists"))
//!     .with_renderer(|link: &WikiLink| {
//!         let alias = escape_html(link.alias());
//!         if link.exists() {
//!             format!(r#"<a href="{}">{alias}</a>"#, escape_html(link.destination()))
//!         } else {
//!             alias
//!         }
//!     });
//!
//! let mut renderer = MarkdownRenderer::new().with_extension(&extension);
//! let result = renderer.render_markdown("[[Exists|Alias]] [[Does <not> exist]]");
//! assert_eq!(
//!     result.html,
//!     r#"<p><a href="path">Alias</a> Does &lt;not&gt; exist</p>"#
//! );
//! ```

pub mod config;
mod extension;
mod node;
mod render;
mod resolver;
mod scanner;

pub use config::{ConfigError, WikiLinkConfig};
pub use extension::{
    DEFAULT_ALIAS_DELIMITER, PARSER_PRIORITY, RENDERER_PRIORITY, WIKILINK, WikiLinkExtension,
};
pub use node::{KIND, WikiLink};
pub use render::{DefaultRenderer, RenderWikiLink};
pub use resolver::{DefaultResolver, ResolveDestination};
pub use scanner::{Span, scan};
