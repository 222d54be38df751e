//! Per-document state tracked while processing events.

/// Code block capture.
#[derive(Default)]
pub(crate) struct CodeBlockState {
    active: bool,
    language: Option<String>,
    buffer: String,
}

impl CodeBlockState {
    /// Start capturing a code block with an optional language.
    pub fn start(&mut self, language: Option<String>) {
        self.active = true;
        self.language = language;
        self.buffer.clear();
    }

    /// Finish capturing and return (language, content).
    pub fn end(&mut self) -> (Option<String>, String) {
        self.active = false;
        (self.language.take(), std::mem::take(&mut self.buffer))
    }

    pub fn is_active(&self) -> bool {
        self.active
    }

    pub fn push_str(&mut self, text: &str) {
        self.buffer.push_str(text);
    }
}

/// Image alt text capture.
///
/// Alt text is plain text, so inline extensions never run inside images.
#[derive(Default)]
pub(crate) struct ImageState {
    active: bool,
    alt_text: String,
}

impl ImageState {
    pub fn start(&mut self) {
        self.active = true;
        self.alt_text.clear();
    }

    /// Stop capturing and return the alt text.
    pub fn end(&mut self) -> String {
        self.active = false;
        std::mem::take(&mut self.alt_text)
    }

    pub fn is_active(&self) -> bool {
        self.active
    }

    pub fn push_str(&mut self, text: &str) {
        self.alt_text.push_str(text);
    }
}

/// Consecutive text events, written out at the next non-text event.
///
/// pulldown-cmark may split a placeholder over several text events; it is
/// only looked up once the run is complete.
#[derive(Default)]
pub(crate) struct TextRun {
    buffer: String,
}

impl TextRun {
    pub fn push_str(&mut self, text: &str) {
        self.buffer.push_str(text);
    }

    /// Take the buffered text, leaving the run empty.
    pub fn take(&mut self) -> Option<String> {
        if self.buffer.is_empty() {
            None
        } else {
            Some(std::mem::take(&mut self.buffer))
        }
    }
}

/// Escape HTML special characters.
#[must_use]
pub fn escape_html(s: &str) -> String {
    let mut result = String::with_capacity(s.len());
    for c in s.chars() {
        match c {
            '&' => result.push_str("&amp;"),
            '<' => result.push_str("&lt;"),
            '>' => result.push_str("&gt;"),
            '"' => result.push_str("&quot;"),
            '\'' => result.push_str("&#x27;"),
            _ => result.push(c),
        }
    }
    result
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_escape_html() {
        assert_eq!(
            escape_html(r#"<a href="x">Tom & 'Jerry'</a>"#),
            "&lt;a href=&quot;x&quot;&gt;Tom &amp; &#x27;Jerry&#x27;&lt;/a&gt;"
        );
    }

    #[test]
    fn test_escape_html_passes_plain_text() {
        assert_eq!(escape_html("[[Wiki Link:Alias]]"), "[[Wiki Link:Alias]]");
    }

    #[test]
    fn test_text_run_take() {
        let mut run = TextRun::default();
        assert_eq!(run.take(), None);

        run.push_str("[[");
        run.push_str("page]]");
        assert_eq!(run.take(), Some("[[page]]".to_owned()));
        assert_eq!(run.take(), None);
    }

    #[test]
    fn test_code_block_state() {
        let mut code = CodeBlockState::default();
        code.start(Some("rust".to_owned()));
        assert!(code.is_active());
        code.push_str("fn main() {}");
        assert_eq!(
            code.end(),
            (Some("rust".to_owned()), "fn main() {}".to_owned())
        );
        assert!(!code.is_active());
    }
}
