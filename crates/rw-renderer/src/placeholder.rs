//! Placeholder substitution for inline extension matches.
//!
//! Matched source spans are replaced by `<marker><index><marker>` before the
//! document is parsed for rendering. The marker is a private-use character
//! that does not occur in the source, so pulldown-cmark treats placeholders as
//! plain text and they come back intact inside text events.

use std::borrow::Cow;
use std::fmt::Write;
use std::sync::Arc;

use pulldown_cmark::{Event, LinkType, Options, Parser, Tag, TagEnd};

use crate::extension::Prioritized;
use crate::inline::{InlineParser, Node, Region, find_inlines};

/// Span replaced by a placeholder.
#[derive(Debug)]
struct Replaced {
    node: Arc<dyn Node>,
    raw: String,
}

/// Piece of a text run after placeholder lookup.
#[derive(Debug)]
pub(crate) enum Segment<'a> {
    Text(&'a str),
    Node(&'a Arc<dyn Node>),
}

/// Placeholders produced for one document.
#[derive(Debug)]
pub(crate) struct Placeholders {
    marker: char,
    replaced: Vec<Replaced>,
}

impl Default for Placeholders {
    fn default() -> Self {
        Self {
            marker: '\u{E000}',
            replaced: Vec::new(),
        }
    }
}

impl Placeholders {
    pub fn is_empty(&self) -> bool {
        self.replaced.is_empty()
    }

    /// Split `text` into plain text and the nodes its placeholders stand for.
    pub fn segments<'a>(&'a self, text: &'a str) -> Vec<Segment<'a>> {
        let mut segments = Vec::new();
        let mut rest = text;

        while let Some((index, start, end)) = self.find(rest) {
            if start > 0 {
                segments.push(Segment::Text(&rest[..start]));
            }
            segments.push(Segment::Node(&self.replaced[index].node));
            rest = &rest[end..];
        }
        if !rest.is_empty() {
            segments.push(Segment::Text(rest));
        }

        segments
    }

    /// Put the original source back for placeholders outside of text.
    pub fn restore<'a>(&self, text: &'a str) -> Cow<'a, str> {
        if self.is_empty() || !text.contains(self.marker) {
            return Cow::Borrowed(text);
        }

        let mut restored = String::with_capacity(text.len());
        let mut rest = text;
        while let Some((index, start, end)) = self.find(rest) {
            restored.push_str(&rest[..start]);
            restored.push_str(&self.replaced[index].raw);
            rest = &rest[end..];
        }
        restored.push_str(rest);
        Cow::Owned(restored)
    }

    /// Locate the next placeholder: (index, start, end) in bytes.
    fn find(&self, text: &str) -> Option<(usize, usize, usize)> {
        let marker_len = self.marker.len_utf8();
        let mut from = 0;

        while let Some(offset) = text[from..].find(self.marker) {
            let start = from + offset;
            let digits_start = start + marker_len;
            let digits_end = digits_start
                + text[digits_start..]
                    .bytes()
                    .take_while(u8::is_ascii_digit)
                    .count();

            if digits_end > digits_start && text[digits_end..].starts_with(self.marker) {
                match text[digits_start..digits_end].parse::<usize>() {
                    Ok(index) if index < self.replaced.len() => {
                        return Some((index, start, digits_end + marker_len));
                    }
                    _ => {}
                }
            }
            from = digits_start;
        }

        None
    }
}

/// Run inline parsers over `markdown` and replace every match with a
/// placeholder.
///
/// Returns the source to render and the placeholders to resolve. Without
/// parsers or matches the source is returned unchanged.
pub(crate) fn substitute<'a>(
    markdown: &'a str,
    options: Options,
    parsers: &[Prioritized<Arc<dyn InlineParser>>],
) -> (Cow<'a, str>, Placeholders) {
    if parsers.is_empty() {
        return (Cow::Borrowed(markdown), Placeholders::default());
    }

    let matches = find_inlines(markdown, &text_regions(markdown, options), parsers);
    if matches.is_empty() {
        return (Cow::Borrowed(markdown), Placeholders::default());
    }

    let Some(marker) = ('\u{E000}'..='\u{F8FF}').find(|c| !markdown.contains(*c)) else {
        tracing::warn!(
            matches = matches.len(),
            "No free placeholder character, inline extensions skipped"
        );
        return (Cow::Borrowed(markdown), Placeholders::default());
    };

    let mut source = String::with_capacity(markdown.len());
    let mut replaced = Vec::with_capacity(matches.len());
    let mut last = 0;
    for (index, matched) in matches.into_iter().enumerate() {
        source.push_str(&markdown[last..matched.range.start]);
        write!(source, "{marker}{index}{marker}").unwrap();
        replaced.push(Replaced {
            raw: markdown[matched.range.clone()].to_owned(),
            node: matched.node,
        });
        last = matched.range.end;
    }
    source.push_str(&markdown[last..]);

    (Cow::Owned(source), Placeholders { marker, replaced })
}

/// Source ranges of document text where inline syntax may start.
///
/// Text inside code blocks, autolinks and image descriptions is skipped;
/// code spans and inline HTML are not text events and never show up. Matches
/// in a table cell may not extend past the cell.
fn text_regions(markdown: &str, options: Options) -> Vec<Region> {
    let mut regions = Vec::new();
    let mut in_code_block = false;
    let mut in_autolink = false;
    let mut image_depth = 0usize;
    let mut cell_end = None;

    for (event, range) in Parser::new_ext(markdown, options).into_offset_iter() {
        match event {
            Event::Start(Tag::CodeBlock(_)) => in_code_block = true,
            Event::End(TagEnd::CodeBlock) => in_code_block = false,
            Event::Start(Tag::Image { .. }) => image_depth += 1,
            Event::End(TagEnd::Image) => image_depth = image_depth.saturating_sub(1),
            Event::Start(Tag::Link {
                link_type: LinkType::Autolink | LinkType::Email,
                ..
            }) => in_autolink = true,
            Event::End(TagEnd::Link) => in_autolink = false,
            Event::Start(Tag::TableCell) => cell_end = Some(range.end),
            Event::End(TagEnd::TableCell) => cell_end = None,
            Event::Text(_) if !in_code_block && !in_autolink && image_depth == 0 => {
                regions.push(Region {
                    limit: cell_end.unwrap_or(markdown.len()),
                    starts: range,
                });
            }
            _ => {}
        }
    }

    regions.sort_by_key(|region| region.starts.start);
    regions
}
