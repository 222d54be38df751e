//! Wikilink syntax scanning.
//!
//! Recognizes `[[destination]]` and `[[destination<delimiter>alias]]` at the
//! start of a line remainder.

use std::ops::Range;
use std::sync::Arc;

use rw_renderer::{InlineParser, ParsedInline};

use crate::node::WikiLink;
use crate::resolver::ResolveDestination;

const OPEN: u8 = b'[';
const CLOSE: u8 = b']';
const MARKER_LEN: usize = 2;

/// Shortest line that can hold a wikilink with content (`[[x]]`).
const MIN_LEN: usize = 5;

/// Byte ranges of a recognized wikilink span.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Span {
    /// Range of the raw destination.
    pub destination: Range<usize>,
    /// Range of the alias. Equals `destination` when no alias was split off.
    pub alias: Range<usize>,
    /// Bytes consumed, including both bracket pairs.
    pub consumed: usize,
}

/// Scan `line` for a wikilink starting at its first byte.
///
/// The alias is split off at the last `alias_delimiter` before the closing
/// `]]`. A delimiter directly after `[[` or directly before `]]` does not
/// split, so `[[a:]]` links to `a:`. Returns `None` for `[[]]`, unterminated
/// spans and lines not starting with `[[`.
#[must_use]
pub fn scan(line: &[u8], alias_delimiter: u8) -> Option<Span> {
    if line.len() < MIN_LEN || line[0] != OPEN || line[1] != OPEN {
        return None;
    }

    let open = MARKER_LEN;
    let mut close = None;
    let mut delimiter = None;
    for i in open..line.len() - 1 {
        if line[i] == CLOSE && line[i + 1] == CLOSE {
            close = Some(i);
            break;
        }
        if line[i] == alias_delimiter {
            delimiter = Some(i);
        }
    }

    let close = close.filter(|&close| close != open)?;

    let (destination, alias) = match delimiter {
        Some(pos) if pos != open && pos + 1 != close => (open..pos, pos + 1..close),
        _ => (open..close, open..close),
    };

    Some(Span {
        destination,
        alias,
        consumed: close + MARKER_LEN,
    })
}

/// Inline parser for wikilinks, triggered by `[`.
pub(crate) struct WikiLinkParser {
    alias_delimiter: u8,
    resolver: Arc<dyn ResolveDestination>,
}

impl WikiLinkParser {
    pub(crate) fn new(alias_delimiter: u8, resolver: Arc<dyn ResolveDestination>) -> Self {
        Self {
            alias_delimiter,
            resolver,
        }
    }
}

impl InlineParser for WikiLinkParser {
    fn trigger(&self) -> &[u8] {
        &[OPEN]
    }

    fn parse(&self, line: &str) -> Option<ParsedInline> {
        let bytes = line.as_bytes();
        let span = scan(bytes, self.alias_delimiter)?;

        let raw_destination = String::from_utf8_lossy(&bytes[span.destination]).into_owned();
        let alias = String::from_utf8_lossy(&bytes[span.alias]).into_owned();
        let resolved = self.resolver.resolve(&raw_destination);

        tracing::trace!(
            raw_destination = %raw_destination,
            destination = %resolved.0,
            exists = resolved.1,
            consumed = span.consumed,
            "Matched wikilink"
        );

        Some(ParsedInline::new(
            WikiLink::new(raw_destination, alias, resolved),
            span.consumed,
        ))
    }
}

#[cfg(test)]
mod tests {
    use std::sync::atomic::{AtomicUsize, Ordering};

    use super::*;

    /// Returns (destination, alias, consumed) as strings for readable asserts.
    fn scan_str(line: &str, delimiter: u8) -> Option<(&str, &str, usize)> {
        scan(line.as_bytes(), delimiter).map(|span| {
            (
                &line[span.destination],
                &line[span.alias],
                span.consumed,
            )
        })
    }

    #[test]
    fn test_simple_link() {
        assert_eq!(
            scan_str("[[Regular Wiki Link]]", b':'),
            Some(("Regular Wiki Link", "Regular Wiki Link", 21))
        );
    }

    #[test]
    fn test_link_with_alias() {
        assert_eq!(
            scan_str("[[Wiki Link:With Some Alias]]", b':'),
            Some(("Wiki Link", "With Some Alias", 29))
        );
    }

    #[test]
    fn test_empty_link_is_too_short() {
        assert_eq!(scan_str("[[]]", b':'), None);
    }

    #[test]
    fn test_empty_link_followed_by_text() {
        assert_eq!(scan_str("[[]] more", b':'), None);
    }

    #[test]
    fn test_only_delimiter() {
        assert_eq!(scan_str("[[:]]", b':'), Some((":", ":", 5)));
    }

    #[test]
    fn test_delimiter_after_open() {
        assert_eq!(scan_str("[[:a]]", b':'), Some((":a", ":a", 6)));
    }

    #[test]
    fn test_delimiter_before_close() {
        assert_eq!(scan_str("[[a:]]", b':'), Some(("a:", "a:", 6)));
    }

    #[test]
    fn test_last_delimiter_wins() {
        assert_eq!(scan_str("[[a:b:c]]", b':'), Some(("a:b", "c", 9)));
    }

    #[test]
    fn test_custom_delimiter() {
        assert_eq!(scan_str("[[Exists|Alias]]", b'|'), Some(("Exists", "Alias", 16)));
        assert_eq!(
            scan_str("[[a:b]]", b'|'),
            Some(("a:b", "a:b", 7))
        );
    }

    #[test]
    fn test_unterminated() {
        assert_eq!(scan_str("[[foo", b':'), None);
        assert_eq!(scan_str("[[foo]", b':'), None);
    }

    #[test]
    fn test_single_open_marker() {
        assert_eq!(scan_str("[foo]]", b':'), None);
    }

    #[test]
    fn test_not_starting_with_marker() {
        assert_eq!(scan_str("x[[foo]]", b':'), None);
    }

    #[test]
    fn test_stops_at_first_close() {
        assert_eq!(scan_str("[[a]] [[b]]", b':'), Some(("a", "a", 5)));
    }

    #[test]
    fn test_delimiter_after_close_is_ignored() {
        assert_eq!(scan_str("[[a]] x:y", b':'), Some(("a", "a", 5)));
    }

    #[test]
    fn test_single_close_bracket_inside() {
        assert_eq!(scan_str("[[a]b]]", b':'), Some(("a]b", "a]b", 7)));
    }

    #[test]
    fn test_open_markers_inside() {
        assert_eq!(scan_str("[[[[a]]", b':'), Some(("[[a", "[[a", 7)));
    }

    #[test]
    fn test_multibyte_content() {
        assert_eq!(
            scan_str("[[Über Seite:Café]]", b':'),
            Some(("Über Seite", "Café", "[[Über Seite:Café]]".len()))
        );
    }

    #[test]
    fn test_parser_resolves_once_per_match() {
        let calls = Arc::new(AtomicUsize::new(0));
        let counter = Arc::clone(&calls);
        let resolver = move |raw: &str| {
            counter.fetch_add(1, Ordering::SeqCst);
            (format!("/{raw}"), false)
        };
        let parser = WikiLinkParser::new(b':', Arc::new(resolver));

        let parsed = parser.parse("[[page:Page]] tail").unwrap();
        assert_eq!(parsed.consumed, 13);
        let link = parsed.node.as_any().downcast_ref::<WikiLink>().unwrap();
        assert_eq!(link.raw_destination(), "page");
        assert_eq!(link.alias(), "Page");
        assert_eq!(link.destination(), "/page");
        assert!(!link.exists());

        assert!(parser.parse("[[]]").is_none());
        assert_eq!(calls.load(Ordering::SeqCst), 1);
    }

    #[test]
    fn test_parser_trigger() {
        let parser = WikiLinkParser::new(b':', Arc::new(|raw: &str| (raw.to_owned(), true)));
        assert_eq!(parser.trigger(), b"[");
    }
}
