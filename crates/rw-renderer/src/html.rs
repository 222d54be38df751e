//! HTML markup for block elements with attributes.

use std::fmt::Write;

use crate::state::escape_html;

/// Write a `<pre><code>` block, tagging the language as a `language-*` class.
pub(crate) fn code_block(lang: Option<&str>, content: &str, out: &mut String) {
    out.push_str("<pre><code");
    if let Some(lang) = lang {
        write!(out, r#" class="language-{}""#, escape_html(lang)).unwrap();
    }
    write!(out, ">{}</code></pre>", escape_html(content)).unwrap();
}

/// Write an `<img>` element. An empty title is omitted.
pub(crate) fn image(src: &str, alt: &str, title: &str, out: &mut String) {
    write!(out, r#"<img src="{}""#, escape_html(src)).unwrap();
    if !title.is_empty() {
        write!(out, r#" title="{}""#, escape_html(title)).unwrap();
    }
    write!(out, r#" alt="{}">"#, escape_html(alt)).unwrap();
}

pub(crate) fn task_list_marker(checked: bool, out: &mut String) {
    let state = if checked { " checked" } else { "" };
    write!(out, r#"<input type="checkbox"{state} disabled> "#).unwrap();
}
