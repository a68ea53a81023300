//! Markdown rendering for post bodies

use pulldown_cmark::{html, Event, Options, Parser};

/// Markdown renderer
pub struct MarkdownRenderer {
    options: Options,
    allow_raw_html: bool,
}

impl MarkdownRenderer {
    /// Create a new markdown renderer
    pub fn new() -> Self {
        Self {
            options: Options::ENABLE_TABLES
                | Options::ENABLE_FOOTNOTES
                | Options::ENABLE_STRIKETHROUGH
                | Options::ENABLE_TASKLISTS
                | Options::ENABLE_SMART_PUNCTUATION,
            allow_raw_html: false,
        }
    }

    /// Pass raw HTML blocks from the CMS through unescaped
    pub fn with_raw_html(mut self, allow: bool) -> Self {
        self.allow_raw_html = allow;
        self
    }

    /// Render markdown to HTML
    pub fn render(&self, markdown: &str) -> String {
        let parser = Parser::new_ext(markdown, self.options);
        let allow_raw_html = self.allow_raw_html;

        // Raw HTML from the CMS is shown as text unless explicitly allowed
        let events = parser.map(move |event| match event {
            Event::Html(raw) | Event::InlineHtml(raw) if !allow_raw_html => Event::Text(raw),
            other => other,
        });

        let mut html_output = String::new();
        html::push_html(&mut html_output, events);
        html_output
    }
}

impl Default for MarkdownRenderer {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_render_basic_markdown() {
        let renderer = MarkdownRenderer::new();
        let html = renderer.render("# Hello World\n\nThis is a test.");
        assert!(html.contains("<h1>Hello World</h1>"));
        assert!(html.contains("<p>This is a test.</p>"));
    }

    #[test]
    fn test_render_code_block() {
        let renderer = MarkdownRenderer::new();
        let html = renderer.render("```rust\nfn main() {}\n```");
        assert!(html.contains(r#"<code class="language-rust">"#));
    }

    #[test]
    fn test_raw_html_escaped_by_default() {
        let renderer = MarkdownRenderer::new();
        let html = renderer.render("<script>alert(1)</script>");
        assert!(!html.contains("<script>"));
        assert!(html.contains("&lt;script&gt;"));

        let html = MarkdownRenderer::new()
            .with_raw_html(true)
            .render("<div class=\"note\">hi</div>");
        assert!(html.contains("<div class=\"note\">"));
    }
}
