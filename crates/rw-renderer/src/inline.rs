//! Inline extension API.
//!
//! Extensions recognize custom inline syntax and produce [`Node`]s that are
//! later rendered by a matching [`NodeRenderer`].
//!
//! # Architecture
//!
//! Inline parsers run against the markdown source, ahead of pulldown-cmark's
//! own inline parsing:
//!
//! 1. A first parse marks the source bytes that belong to document text (not
//!    code, inline HTML, autolinks or image descriptions).
//! 2. Inside those regions, whenever the current byte is the trigger of a
//!    registered [`InlineParser`], the parser receives the rest of the source
//!    line and either declines or returns a [`ParsedInline`] with the number
//!    of bytes it consumed.
//! 3. Consumed bytes are replaced before the document is parsed again, so
//!    links, emphasis and code spans starting inside a match do not apply.

use std::any::Any;
use std::fmt;
use std::ops::Range;
use std::sync::Arc;

use crate::extension::Prioritized;

/// Identifier of a node type produced by an inline parser.
///
/// Node renderers are looked up by kind, and host code walking
/// [`RenderResult::nodes`](crate::RenderResult::nodes) can use it to pick out
/// the nodes it cares about before downcasting.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct NodeKind(&'static str);

impl NodeKind {
    /// Create a node kind with the given name.
    #[must_use]
    pub const fn new(name: &'static str) -> Self {
        Self(name)
    }

    /// Name of the node kind.
    #[must_use]
    pub const fn name(self) -> &'static str {
        self.0
    }
}

impl fmt::Display for NodeKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.0)
    }
}

/// Inline node attached to the document by an [`InlineParser`].
///
/// Nodes are immutable once constructed.
pub trait Node: fmt::Debug + Send + Sync {
    /// Kind used to dispatch rendering.
    fn kind(&self) -> NodeKind;

    /// Access the concrete node for downcasting.
    fn as_any(&self) -> &dyn Any;
}

/// Successful inline parse.
#[derive(Clone, Debug)]
pub struct ParsedInline {
    /// The recognized node.
    pub node: Arc<dyn Node>,
    /// Number of bytes consumed from the start of the line passed to the parser.
    pub consumed: usize,
}

impl ParsedInline {
    /// Create a parse result.
    #[must_use]
    pub fn new(node: impl Node + 'static, consumed: usize) -> Self {
        Self {
            node: Arc::new(node),
            consumed,
        }
    }
}

/// Recognizer for custom inline syntax.
///
/// # Thread Safety
///
/// Parsers are shared between renderer instances through `Arc`, so they must
/// be `Send + Sync`. Parsers hold configuration only; any per-document state
/// belongs to the renderer.
pub trait InlineParser: Send + Sync {
    /// Bytes that trigger this parser. Must be ASCII.
    fn trigger(&self) -> &[u8];

    /// Try to parse at the start of `line`.
    ///
    /// `line` is markdown source: it starts at a trigger byte and ends at the
    /// end of the current line (exclusive of the newline) or table cell.
    /// Entities and backslash escapes are not decoded yet. Returns `None` to
    /// leave the bytes to other parsers and to markdown parsing.
    fn parse(&self, line: &str) -> Option<ParsedInline>;
}

/// Output rule for one [`NodeKind`].
pub trait NodeRenderer: Send + Sync {
    /// Kind of node handled by this renderer.
    fn kind(&self) -> NodeKind;

    /// Write markup for `node` to `out`.
    fn render(&self, node: &dyn Node, out: &mut String);
}

/// Source bytes where inline syntax may start.
#[derive(Clone, Debug, PartialEq, Eq)]
pub(crate) struct Region {
    /// Candidate start positions.
    pub starts: Range<usize>,
    /// Offset no match may extend past.
    pub limit: usize,
}

/// Inline node matched in the source.
#[derive(Clone, Debug)]
pub(crate) struct InlineMatch {
    /// Source bytes replaced by the node.
    pub range: Range<usize>,
    pub node: Arc<dyn Node>,
}

/// Run inline parsers over `regions` of `source`.
///
/// Regions must be sorted by start. Parsers are tried in slice order at every
/// trigger byte; the first one returning a match wins and scanning resumes
/// right after the consumed bytes, even when those reach into later regions.
/// A parser never sees bytes past the next `\n` or the region limit, and
/// backslash-escaped trigger bytes are skipped.
pub(crate) fn find_inlines(
    source: &str,
    regions: &[Region],
    parsers: &[Prioritized<Arc<dyn InlineParser>>],
) -> Vec<InlineMatch> {
    let bytes = source.as_bytes();
    let mut matches = Vec::new();
    let mut resume = 0;

    for region in regions {
        let limit = region.limit.min(bytes.len());
        let mut pos = region.starts.start.max(resume);

        while pos < region.starts.end.min(limit) {
            let byte = bytes[pos];
            let mut triggered = parsers
                .iter()
                .filter(|p| p.value.trigger().contains(&byte))
                .peekable();

            if triggered.peek().is_none() || is_escaped(bytes, pos) {
                pos += 1;
                continue;
            }

            let line_end = bytes[pos..limit]
                .iter()
                .position(|&b| b == b'\n')
                .map_or(limit, |offset| pos + offset);
            let parsed = source.get(pos..line_end).and_then(|line| {
                triggered
                    .find_map(|p| p.value.parse(line))
                    .filter(|parsed| parsed.consumed > 0 && line.is_char_boundary(parsed.consumed))
            });

            match parsed {
                Some(parsed) => {
                    matches.push(InlineMatch {
                        range: pos..pos + parsed.consumed,
                        node: parsed.node,
                    });
                    pos += parsed.consumed;
                    resume = pos;
                }
                None => pos += 1,
            }
        }
    }

    matches
}

/// Whether the byte at `pos` follows an odd number of backslashes.
fn is_escaped(bytes: &[u8], pos: usize) -> bool {
    let backslashes = bytes[..pos].iter().rev().take_while(|&&b| b == b'\\').count();
    backslashes % 2 == 1
}

#[cfg(test)]
mod tests {
    use super::*;

    const MENTION: NodeKind = NodeKind::new("Mention");

    #[derive(Debug)]
    struct Mention(String);

    impl Node for Mention {
        fn kind(&self) -> NodeKind {
            MENTION
        }

        fn as_any(&self) -> &dyn Any {
            self
        }
    }

    /// Parses `@name` up to the next space.
    struct MentionParser;

    impl InlineParser for MentionParser {
        fn trigger(&self) -> &[u8] {
            b"@"
        }

        fn parse(&self, line: &str) -> Option<ParsedInline> {
            let end = line.find(' ').unwrap_or(line.len());
            if end < 2 {
                return None;
            }
            Some(ParsedInline::new(Mention(line[1..end].to_owned()), end))
        }
    }

    fn parsers() -> Vec<Prioritized<Arc<dyn InlineParser>>> {
        vec![Prioritized::new(Arc::new(MentionParser) as Arc<dyn InlineParser>, 100)]
    }

    fn whole(source: &str) -> Vec<Region> {
        vec![Region {
            starts: 0..source.len(),
            limit: source.len(),
        }]
    }

    fn describe(source: &str, matches: &[InlineMatch]) -> Vec<String> {
        matches
            .iter()
            .map(|m| {
                let mention = m.node.as_any().downcast_ref::<Mention>().unwrap();
                format!("{}:{}@{}", m.node.kind(), mention.0, &source[m.range.clone()])
            })
            .collect()
    }

    fn find(source: &str) -> Vec<String> {
        describe(source, &find_inlines(source, &whole(source), &parsers()))
    }

    #[test]
    fn test_no_triggers() {
        assert!(find("no triggers here").is_empty());
    }

    #[test]
    fn test_matches_in_order() {
        assert_eq!(
            find("hi @bob and @eve"),
            vec!["Mention:bob@@bob", "Mention:eve@@eve"]
        );
    }

    #[test]
    fn test_declined_trigger_is_skipped() {
        assert!(find("a @ b").is_empty());
    }

    #[test]
    fn test_parser_only_sees_current_line() {
        assert_eq!(
            find("@alice\n@bob"),
            vec!["Mention:alice@@alice", "Mention:bob@@bob"]
        );
    }

    #[test]
    fn test_escaped_trigger_is_skipped() {
        assert_eq!(find(r"\@alice \\@bob"), vec![r"Mention:bob@@bob"]);
    }

    #[test]
    fn test_only_regions_are_scanned() {
        let source = "@code @text";
        let regions = vec![Region {
            starts: 6..11,
            limit: 11,
        }];
        let matches = find_inlines(source, &regions, &parsers());
        assert_eq!(describe(source, &matches), vec!["Mention:text@@text"]);
    }

    #[test]
    fn test_match_may_extend_past_region() {
        let source = "@ab`cd` x";
        let regions = vec![
            Region {
                starts: 0..3,
                limit: source.len(),
            },
            Region {
                starts: 7..9,
                limit: source.len(),
            },
        ];
        let matches = find_inlines(source, &regions, &parsers());
        assert_eq!(describe(source, &matches), vec!["Mention:ab`cd`@@ab`cd`"]);
    }

    #[test]
    fn test_region_limit_bounds_line() {
        let source = "@ab|cd";
        let regions = vec![Region {
            starts: 0..3,
            limit: 3,
        }];
        let matches = find_inlines(source, &regions, &parsers());
        assert_eq!(describe(source, &matches), vec!["Mention:ab@@ab"]);
    }

    #[test]
    fn test_empty_source() {
        assert!(find("").is_empty());
    }

    #[test]
    fn test_node_kind_display() {
        assert_eq!(MENTION.to_string(), "Mention");
        assert_eq!(MENTION.name(), "Mention");
    }
}
