//! Wikilink node.

use std::any::Any;

use rw_renderer::{Node, NodeKind};

/// Node kind of [`WikiLink`].
pub const KIND: NodeKind = NodeKind::new("WikiLink");

/// A recognized `[[destination]]` or `[[destination:alias]]` span.
///
/// Built once by the inline parser and never modified afterwards.
/// `destination` and `exists` are whatever the configured resolver returned
/// for `raw_destination`.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct WikiLink {
    raw_destination: String,
    alias: String,
    destination: String,
    exists: bool,
}

impl WikiLink {
    pub(crate) fn new(
        raw_destination: String,
        alias: String,
        (destination, exists): (String, bool),
    ) -> Self {
        Self {
            raw_destination,
            alias,
            destination,
            exists,
        }
    }

    /// Destination text exactly as written between the brackets.
    #[must_use]
    pub fn raw_destination(&self) -> &str {
        &self.raw_destination
    }

    /// Visible link text. Equals the raw destination when no alias was given.
    #[must_use]
    pub fn alias(&self) -> &str {
        &self.alias
    }

    /// Resolved link target.
    #[must_use]
    pub fn destination(&self) -> &str {
        &self.destination
    }

    /// Whether the resolver considers the target to exist.
    #[must_use]
    pub fn exists(&self) -> bool {
        self.exists
    }
}

impl Node for WikiLink {
    fn kind(&self) -> NodeKind {
        KIND
    }

    fn as_any(&self) -> &dyn Any {
        self
    }
}
