//! Wikilink rendering.

use std::sync::Arc;

use rw_renderer::{Node, NodeKind, NodeRenderer, escape_html};

use crate::node::{KIND, WikiLink};

/// Turns a [`WikiLink`] into output markup.
///
/// Implemented for any `Fn(&WikiLink) -> String`. Called once per link in
/// document order; may be called concurrently when documents are rendered
/// in parallel.
///
/// # Example
///
/// ```
/// use rw_renderer::escape_html;
/// use rw_wikilink::{WikiLink, WikiLinkExtension};
///
/// // Render links to missing pages as plain text.
/// let extension = WikiLinkExtension::new().with_renderer(|link: &WikiLink| {
///     let alias = escape_html(link.alias());
///     if link.exists() {
///         format!(r#"<a href="{}">{alias}</a>"#, escape_html(link.destination()))
///     } else {
///         alias
///     }
/// });
/// ```
pub trait RenderWikiLink: Send + Sync {
    /// Render `link` to markup.
    fn render(&self, link: &WikiLink) -> String;
}

impl<F> RenderWikiLink for F
where
    F: Fn(&WikiLink) -> String + Send + Sync,
{
    fn render(&self, link: &WikiLink) -> String {
        self(link)
    }
}

/// Default renderer: `<a href="DESTINATION">ALIAS</a>`, whether or not the
/// destination exists.
#[derive(Clone, Copy, Debug, Default)]
pub struct DefaultRenderer;

impl RenderWikiLink for DefaultRenderer {
    fn render(&self, link: &WikiLink) -> String {
        format!(
            r#"<a href="{}">{}</a>"#,
            escape_html(link.destination()),
            escape_html(link.alias())
        )
    }
}

/// Node renderer for [`WikiLink`] nodes.
pub(crate) struct WikiLinkRenderer {
    render: Arc<dyn RenderWikiLink>,
}

impl WikiLinkRenderer {
    pub(crate) fn new(render: Arc<dyn RenderWikiLink>) -> Self {
        Self { render }
    }
}

impl NodeRenderer for WikiLinkRenderer {
    fn kind(&self) -> NodeKind {
        KIND
    }

    fn render(&self, node: &dyn Node, out: &mut String) {
        if let Some(link) = node.as_any().downcast_ref::<WikiLink>() {
            out.push_str(&self.render.render(link));
        }
    }
}
