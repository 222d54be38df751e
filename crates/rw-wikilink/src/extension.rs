//! Extension wiring.

use std::fmt;
use std::sync::{Arc, LazyLock};

use rw_renderer::{Extension, ExtensionRegistry};

use crate::config::{ConfigError, WikiLinkConfig};
use crate::render::{DefaultRenderer, RenderWikiLink, WikiLinkRenderer};
use crate::resolver::{DefaultResolver, ResolveDestination};
use crate::scanner::WikiLinkParser;

/// Alias delimiter used unless configured otherwise.
pub const DEFAULT_ALIAS_DELIMITER: u8 = b':';

/// Inline parser priority.
///
/// Wikilinks are matched in the source before markdown links, emphasis and
/// code spans, so `[[a *b*]](c)` is a wikilink followed by `(c)`.
pub const PARSER_PRIORITY: i32 = 150;

/// Node renderer priority.
pub const RENDERER_PRIORITY: i32 = 500;

/// Wikilink extension configured with the default options.
///
/// # Example
///
/// ```
/// use rw_renderer::MarkdownRenderer;
/// use rw_wikilink::WIKILINK;
///
/// let mut renderer = MarkdownRenderer::new().with_extension(&*WIKILINK);
/// let result = renderer.render_markdown("See [[Home Page:home]].");
/// assert_eq!(result.html, r#"<p>See <a href="home-page">home</a>.</p>"#);
/// ```
pub static WIKILINK: LazyLock<WikiLinkExtension> = LazyLock::new(WikiLinkExtension::new);

/// Wikilink extension for [`MarkdownRenderer`](rw_renderer::MarkdownRenderer).
///
/// Bundles the alias delimiter, the destination resolver and the link
/// renderer. Each `with_*` option returns a new configuration; the values
/// are fixed once the extension is installed.
#[derive(Clone)]
pub struct WikiLinkExtension {
    alias_delimiter: u8,
    resolver: Arc<dyn ResolveDestination>,
    renderer: Arc<dyn RenderWikiLink>,
}

impl Default for WikiLinkExtension {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Debug for WikiLinkExtension {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("WikiLinkExtension")
            .field("alias_delimiter", &char::from(self.alias_delimiter))
            .finish_non_exhaustive()
    }
}

impl WikiLinkExtension {
    /// Create an extension with the default delimiter (`:`), resolver and renderer.
    #[must_use]
    pub fn new() -> Self {
        Self {
            alias_delimiter: DEFAULT_ALIAS_DELIMITER,
            resolver: Arc::new(DefaultResolver),
            renderer: Arc::new(DefaultRenderer),
        }
    }

    /// Create an extension from loaded configuration.
    ///
    /// The resolver and renderer are the defaults.
    pub fn from_config(config: &WikiLinkConfig) -> Result<Self, ConfigError> {
        Ok(Self::new().with_alias_delimiter(config.alias_delimiter_byte()?))
    }

    /// Set the byte separating destination and alias.
    ///
    /// Use an ASCII byte; other bytes can split multi-byte characters.
    #[must_use]
    pub fn with_alias_delimiter(mut self, alias_delimiter: u8) -> Self {
        self.alias_delimiter = alias_delimiter;
        self
    }

    /// Set the destination resolver.
    #[must_use]
    pub fn with_resolver(mut self, resolver: impl ResolveDestination + 'static) -> Self {
        self.resolver = Arc::new(resolver);
        self
    }

    /// Set the link renderer.
    #[must_use]
    pub fn with_renderer(mut self, renderer: impl RenderWikiLink + 'static) -> Self {
        self.renderer = Arc::new(renderer);
        self
    }

    /// Configured alias delimiter.
    #[must_use]
    pub fn alias_delimiter(&self) -> u8 {
        self.alias_delimiter
    }

    /// Configured destination resolver.
    #[must_use]
    pub fn resolver(&self) -> &dyn ResolveDestination {
        self.resolver.as_ref()
    }
}

impl Extension for WikiLinkExtension {
    fn extend(&self, registry: &mut ExtensionRegistry) {
        tracing::debug!(
            alias_delimiter = %char::from(self.alias_delimiter),
            parser_priority = PARSER_PRIORITY,
            renderer_priority = RENDERER_PRIORITY,
            "Registering wikilink extension"
        );
        registry.add_inline_parser(
            Arc::new(WikiLinkParser::new(
                self.alias_delimiter,
                Arc::clone(&self.resolver),
            )),
            PARSER_PRIORITY,
        );
        registry.add_node_renderer(
            Arc::new(WikiLinkRenderer::new(Arc::clone(&self.renderer))),
            RENDERER_PRIORITY,
        );
    }
}
