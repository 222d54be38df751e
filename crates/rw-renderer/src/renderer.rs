//! Markdown renderer with inline extensions.

use std::fmt::Write;
use std::sync::Arc;

use pulldown_cmark::{CodeBlockKind, Event, Options, Parser, Tag, TagEnd};

use crate::extension::{Extension, ExtensionRegistry};
use crate::html;
use crate::inline::Node;
use crate::placeholder::{Placeholders, Segment, substitute};
use crate::state::{CodeBlockState, ImageState, TextRun, escape_html};
use crate::util::heading_level_to_num;

/// Result of rendering markdown.
#[derive(Clone, Debug)]
pub struct RenderResult {
    /// Rendered HTML content.
    pub html: String,
    /// Inline nodes produced by extensions, in document order.
    pub nodes: Vec<Arc<dyn Node>>,
}

/// Markdown to HTML renderer.
///
/// # Extensions
///
/// Custom inline syntax can be added via [`with_extension`](Self::with_extension).
/// Inline parsers see the markdown source line by line before pulldown-cmark
/// parses inline structure, so a match takes precedence over links, emphasis
/// and code spans that start inside it. Recognized nodes are rendered by the
/// node renderer registered for their kind.
pub struct MarkdownRenderer {
    output: String,
    code: CodeBlockState,
    image: ImageState,
    text: TextRun,
    table_head: bool,
    pending_image: Option<(String, String)>,
    extensions: ExtensionRegistry,
    placeholders: Placeholders,
    nodes: Vec<Arc<dyn Node>>,
}

impl MarkdownRenderer {
    /// Create a new renderer without extensions.
    #[must_use]
    pub fn new() -> Self {
        Self {
            output: String::with_capacity(4096),
            code: CodeBlockState::default(),
            image: ImageState::default(),
            text: TextRun::default(),
            table_head: false,
            pending_image: None,
            extensions: ExtensionRegistry::new(),
            placeholders: Placeholders::default(),
            nodes: Vec::new(),
        }
    }

    /// Install an extension.
    ///
    /// Extensions register inline parsers and node renderers with a priority;
    /// see [`ExtensionRegistry`].
    #[must_use]
    pub fn with_extension<E: Extension + ?Sized>(mut self, extension: &E) -> Self {
        extension.extend(&mut self.extensions);
        self
    }

    /// Registered extension parsers and renderers.
    #[must_use]
    pub fn extensions(&self) -> &ExtensionRegistry {
        &self.extensions
    }

    /// Parser options used by [`render_markdown`](Self::render_markdown).
    #[must_use]
    pub fn parser_options(&self) -> Options {
        Options::ENABLE_TABLES | Options::ENABLE_STRIKETHROUGH | Options::ENABLE_TASKLISTS
    }

    /// Render markdown text, applying inline extensions.
    pub fn render_markdown(&mut self, markdown: &str) -> RenderResult {
        let options = self.parser_options();
        let (source, placeholders) =
            substitute(markdown, options, self.extensions.inline_parsers());
        self.placeholders = placeholders;
        self.render(Parser::new_ext(&source, options))
    }

    /// Render markdown events and return the result.
    ///
    /// Inline extensions need the source text and only apply through
    /// [`render_markdown`](Self::render_markdown); events passed here are
    /// rendered as they are.
    pub fn render<'a, I>(&mut self, events: I) -> RenderResult
    where
        I: Iterator<Item = Event<'a>>,
    {
        for event in events {
            self.process_event(event);
        }
        self.flush_text();
        self.placeholders = Placeholders::default();

        RenderResult {
            html: std::mem::take(&mut self.output),
            nodes: std::mem::take(&mut self.nodes),
        }
    }

    fn process_event(&mut self, event: Event<'_>) {
        // Text runs end at the first non-text event.
        if !matches!(event, Event::Text(_)) {
            self.flush_text();
        }

        match event {
            Event::Start(tag) => self.start_tag(tag),
            Event::End(tag) => self.end_tag(tag),
            Event::Text(text) => self.text(&text),
            Event::Code(code) => {
                let code = self.placeholders.restore(&code);
                write!(self.output, "<code>{}</code>", escape_html(&code)).unwrap();
            }
            Event::Html(raw) | Event::InlineHtml(raw) => {
                let raw = self.placeholders.restore(&raw);
                self.output.push_str(&raw);
            }
            Event::SoftBreak => self.soft_break(),
            Event::HardBreak => self.output.push_str("<br>"),
            Event::Rule => self.output.push_str("<hr>"),
            Event::TaskListMarker(checked) => html::task_list_marker(checked, &mut self.output),
            Event::FootnoteReference(_) | Event::InlineMath(_) | Event::DisplayMath(_) => {
                // Not supported
            }
        }
    }

    fn start_tag(&mut self, tag: Tag<'_>) {
        match tag {
            Tag::Paragraph => self.output.push_str("<p>"),
            Tag::Heading { level, .. } => {
                write!(self.output, "<h{}>", heading_level_to_num(level)).unwrap();
            }
            Tag::BlockQuote(_) => self.output.push_str("<blockquote>"),
            Tag::CodeBlock(kind) => {
                let lang = match kind {
                    CodeBlockKind::Fenced(info) => info
                        .split_whitespace()
                        .next()
                        .map(ToOwned::to_owned),
                    CodeBlockKind::Indented => None,
                };
                self.code.start(lang);
            }
            Tag::List(start) => match start {
                Some(1) => self.output.push_str("<ol>"),
                Some(n) => write!(self.output, r#"<ol start="{n}">"#).unwrap(),
                None => self.output.push_str("<ul>"),
            },
            Tag::Item => self.output.push_str("<li>"),
            Tag::FootnoteDefinition(_) | Tag::HtmlBlock | Tag::MetadataBlock(_) => {}
            Tag::DefinitionList => self.output.push_str("<dl>"),
            Tag::DefinitionListTitle => self.output.push_str("<dt>"),
            Tag::DefinitionListDefinition => self.output.push_str("<dd>"),
            Tag::Table(_) => self.output.push_str("<table>"),
            Tag::TableHead => {
                self.table_head = true;
                self.output.push_str("<thead><tr>");
            }
            Tag::TableRow => self.output.push_str("<tr>"),
            Tag::TableCell => {
                self.output
                    .push_str(if self.table_head { "<th>" } else { "<td>" });
            }
            Tag::Emphasis => self.output.push_str("<em>"),
            Tag::Strong => self.output.push_str("<strong>"),
            Tag::Strikethrough => self.output.push_str("<s>"),
            Tag::Link { dest_url, .. } => {
                let href = self.placeholders.restore(&dest_url);
                write!(self.output, r#"<a href="{}">"#, escape_html(&href)).unwrap();
            }
            Tag::Image {
                dest_url, title, ..
            } => {
                // Start collecting alt text; image will be rendered in end_tag
                self.image.start();
                self.pending_image = Some((
                    self.placeholders.restore(&dest_url).into_owned(),
                    self.placeholders.restore(&title).into_owned(),
                ));
            }
            Tag::Superscript => self.output.push_str("<sup>"),
            Tag::Subscript => self.output.push_str("<sub>"),
        }
    }

    fn end_tag(&mut self, tag: TagEnd) {
        match tag {
            TagEnd::Paragraph => self.output.push_str("</p>"),
            TagEnd::Heading(level) => {
                write!(self.output, "</h{}>", heading_level_to_num(level)).unwrap();
            }
            TagEnd::BlockQuote(_) => self.output.push_str("</blockquote>"),
            TagEnd::CodeBlock => {
                let (lang, content) = self.code.end();
                let content = self.placeholders.restore(&content);
                html::code_block(lang.as_deref(), &content, &mut self.output);
            }
            TagEnd::List(ordered) => {
                self.output
                    .push_str(if ordered { "</ol>" } else { "</ul>" });
            }
            TagEnd::Item => self.output.push_str("</li>"),
            TagEnd::FootnoteDefinition | TagEnd::HtmlBlock | TagEnd::MetadataBlock(_) => {}
            TagEnd::Image => {
                let alt = self.image.end();
                let alt = self.placeholders.restore(&alt);
                if let Some((src, title)) = self.pending_image.take() {
                    html::image(&src, &alt, &title, &mut self.output);
                }
            }
            TagEnd::DefinitionList => self.output.push_str("</dl>"),
            TagEnd::DefinitionListTitle => self.output.push_str("</dt>"),
            TagEnd::DefinitionListDefinition => self.output.push_str("</dd>"),
            TagEnd::Table => self.output.push_str("</tbody></table>"),
            TagEnd::TableHead => {
                self.table_head = false;
                self.output.push_str("</tr></thead><tbody>");
            }
            TagEnd::TableRow => self.output.push_str("</tr>"),
            TagEnd::TableCell => {
                self.output
                    .push_str(if self.table_head { "</th>" } else { "</td>" });
            }
            TagEnd::Emphasis => self.output.push_str("</em>"),
            TagEnd::Strong => self.output.push_str("</strong>"),
            TagEnd::Strikethrough => self.output.push_str("</s>"),
            TagEnd::Link => self.output.push_str("</a>"),
            TagEnd::Superscript => self.output.push_str("</sup>"),
            TagEnd::Subscript => self.output.push_str("</sub>"),
        }
    }

    fn text(&mut self, text: &str) {
        if self.code.is_active() {
            self.code.push_str(text);
        } else if self.image.is_active() {
            self.image.push_str(text);
        } else {
            self.text.push_str(text);
        }
    }

    /// Write the buffered text, rendering nodes behind its placeholders.
    fn flush_text(&mut self) {
        let Some(text) = self.text.take() else {
            return;
        };

        for segment in self.placeholders.segments(&text) {
            match segment {
                Segment::Text(plain) => self.output.push_str(&escape_html(plain)),
                Segment::Node(node) => {
                    match self.extensions.renderer_for(node.kind()) {
                        Some(renderer) => renderer.render(node.as_ref(), &mut self.output),
                        None => {
                            tracing::warn!(kind = %node.kind(), "No renderer registered for inline node");
                        }
                    }
                    self.nodes.push(Arc::clone(node));
                }
            }
        }
    }

    fn soft_break(&mut self) {
        if self.code.is_active() {
            self.code.push_str("\n");
        } else {
            self.output.push('\n');
        }
    }
}

impl Default for MarkdownRenderer {
    fn default() -> Self {
        Self::new()
    }
}
