//! Extension registration.
//!
//! Extensions add inline parsers and node renderers to a
//! [`MarkdownRenderer`](crate::MarkdownRenderer). Both are kept sorted by
//! priority: lower values run first, registrations with equal priority keep
//! their insertion order.

use std::sync::Arc;

use crate::inline::{InlineParser, NodeKind, NodeRenderer};

/// Value with an ordering priority (lower runs earlier).
#[derive(Clone, Debug)]
pub struct Prioritized<T> {
    /// The registered value.
    pub value: T,
    /// Ordering priority.
    pub priority: i32,
}

impl<T> Prioritized<T> {
    /// Wrap `value` with `priority`.
    #[must_use]
    pub fn new(value: T, priority: i32) -> Self {
        Self { value, priority }
    }
}

/// Extension that can be installed into a renderer.
///
/// # Example
///
/// ```
/// use rw_renderer::{Extension, ExtensionRegistry, MarkdownRenderer};
///
/// struct Noop;
///
/// impl Extension for Noop {
///     fn extend(&self, _registry: &mut ExtensionRegistry) {}
/// }
///
/// let mut renderer = MarkdownRenderer::new().with_extension(&Noop);
/// assert_eq!(renderer.render_markdown("text").html, "<p>text</p>");
/// ```
pub trait Extension {
    /// Register parsers and renderers.
    fn extend(&self, registry: &mut ExtensionRegistry);
}

/// Inline parsers and node renderers installed by extensions.
#[derive(Clone, Default)]
pub struct ExtensionRegistry {
    inline_parsers: Vec<Prioritized<Arc<dyn InlineParser>>>,
    node_renderers: Vec<Prioritized<Arc<dyn NodeRenderer>>>,
}

impl ExtensionRegistry {
    /// Create an empty registry.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Register an inline parser at `priority`.
    pub fn add_inline_parser(&mut self, parser: Arc<dyn InlineParser>, priority: i32) {
        let index = self
            .inline_parsers
            .partition_point(|p| p.priority <= priority);
        self.inline_parsers
            .insert(index, Prioritized::new(parser, priority));
    }

    /// Register a node renderer at `priority`.
    pub fn add_node_renderer(&mut self, renderer: Arc<dyn NodeRenderer>, priority: i32) {
        let index = self
            .node_renderers
            .partition_point(|r| r.priority <= priority);
        self.node_renderers
            .insert(index, Prioritized::new(renderer, priority));
    }

    /// Inline parsers in priority order.
    #[must_use]
    pub fn inline_parsers(&self) -> &[Prioritized<Arc<dyn InlineParser>>] {
        &self.inline_parsers
    }

    /// Node renderers in priority order.
    #[must_use]
    pub fn node_renderers(&self) -> &[Prioritized<Arc<dyn NodeRenderer>>] {
        &self.node_renderers
    }

    /// First renderer registered for `kind`.
    #[must_use]
    pub fn renderer_for(&self, kind: NodeKind) -> Option<&dyn NodeRenderer> {
        self.node_renderers
            .iter()
            .find(|r| r.value.kind() == kind)
            .map(|r| r.value.as_ref())
    }
}
