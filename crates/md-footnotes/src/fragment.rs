//! Fragment rendering capability used for footnote bodies.
//!
//! The footnote pipeline treats the host renderer as an opaque capability:
//! one operation that renders a markdown fragment to HTML. Making the
//! "footnote pass disabled" variant an explicit capability replaces the
//! guard-flag toggling a host would otherwise need, so re-entry is
//! impossible by construction.

use pulldown_cmark::{Options, Parser, html};

/// Capability to render a markdown fragment to HTML with the footnote pass
/// disabled.
///
/// Implementations must not re-enter the footnote pipeline: footnote bodies
/// are rendered through this trait, and footnote-looking syntax inside them
/// has to come out as plain text instead of recursing.
pub trait FragmentRenderer {
    /// Render a markdown fragment to HTML.
    fn render_fragment(&self, markdown: &str) -> String;
}

impl<R: FragmentRenderer + ?Sized> FragmentRenderer for &R {
    fn render_fragment(&self, markdown: &str) -> String {
        (**self).render_fragment(markdown)
    }
}

/// Fragment renderer backed by pulldown-cmark's HTML output.
///
/// GFM extensions (tables, strikethrough, task lists) are enabled;
/// pulldown-cmark's own footnote extension is not, since footnotes are
/// supplied by this crate's pipeline.
///
/// # Example
///
/// ```
/// use md_footnotes::{FragmentRenderer, HtmlFragmentRenderer};
///
/// let renderer = HtmlFragmentRenderer::new();
/// let html = renderer.render_fragment("Some **bold** text");
/// assert_eq!(html, "<p>Some <strong>bold</strong> text</p>\n");
/// ```
#[derive(Clone, Copy, Debug, Default)]
pub struct HtmlFragmentRenderer;

impl HtmlFragmentRenderer {
    /// Create a new renderer.
    #[must_use]
    pub fn new() -> Self {
        Self
    }

    fn parser_options() -> Options {
        Options::ENABLE_TABLES
            | Options::ENABLE_STRIKETHROUGH
            | Options::ENABLE_TASKLISTS
            | Options::ENABLE_GFM
    }
}

impl FragmentRenderer for HtmlFragmentRenderer {
    fn render_fragment(&self, markdown: &str) -> String {
        let parser = Parser::new_ext(markdown, Self::parser_options());
        let mut output = String::with_capacity(markdown.len() * 2);
        html::push_html(&mut output, parser);
        output
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_renders_basic_paragraph() {
        let renderer = HtmlFragmentRenderer::new();
        assert_eq!(renderer.render_fragment("Hello"), "<p>Hello</p>\n");
    }

    #[test]
    fn test_renders_gfm_table() {
        let renderer = HtmlFragmentRenderer::new();
        let html = renderer.render_fragment("| A | B |\n|---|---|\n| 1 | 2 |");
        assert!(html.contains("<table>"));
    }

    #[test]
    fn test_inline_html_passes_through() {
        let renderer = HtmlFragmentRenderer::new();
        let html = renderer.render_fragment("text\n<a href=\"#x\">back</a>");
        assert!(html.contains(r##"<a href="#x">back</a>"##));
    }

    #[test]
    fn test_footnote_syntax_stays_literal() {
        // The fragment renderer must not process footnotes itself.
        let renderer = HtmlFragmentRenderer::new();
        let html = renderer.render_fragment("A note.[^1]");
        assert!(html.contains("[^1]"));
    }

    #[test]
    fn test_reference_is_also_a_fragment_renderer() {
        let renderer = HtmlFragmentRenderer::new();
        let by_ref = &renderer;
        assert_eq!(by_ref.render_fragment("Hello"), "<p>Hello</p>\n");
    }
}
