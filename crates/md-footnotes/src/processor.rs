//! Footnote post-processor: reference injection after the main render.
//!
//! Replaces the placeholder left for each resolved marker with a numbered
//! superscript anchor, renders each footnote body through the fragment
//! renderer, and appends the footnote list after the rendered document.

use crate::escape::{marker_placeholder, unescape_text};
use crate::fragment::FragmentRenderer;
use crate::preprocessor::ResolvedFootnote;

/// Post-processor that injects rendered footnotes into host output.
///
/// # Output HTML Structure
///
/// ```html
/// <p>A note.<sup id="fnref-1"><a href="#fn-1" rel="footnote"
///    title="go to footnote">1</a></sup></p>
/// <div class="footnotes">
/// <hr>
/// <ol>
/// <li id="fn-1"><p>The footnote.
/// <a href="#fnref-1" class="footnote-backref" title="return to article">&#8617;</a></p>
/// </li>
/// </ol>
/// </div>
/// ```
///
/// The `fnref-N` / `fn-N` ids and the `footnotes` / `footnote-backref`
/// classes are the compatibility contract for stylesheets and scripts.
///
/// Footnote bodies are rendered through the [`FragmentRenderer`], which by
/// contract does not re-enter the footnote pipeline, so bodies containing
/// footnote-looking syntax render as plain text instead of recursing.
pub struct FootnoteProcessor<R> {
    footnotes: Vec<ResolvedFootnote>,
    renderer: R,
    skip_footnote_pass: bool,
    warnings: Vec<String>,
}

impl<R: FragmentRenderer> FootnoteProcessor<R> {
    /// Create a new processor from the resolved footnotes of a
    /// [`FootnotePreprocessor`](crate::FootnotePreprocessor) pass.
    #[must_use]
    pub fn new(footnotes: Vec<ResolvedFootnote>, renderer: R) -> Self {
        Self {
            footnotes,
            renderer,
            skip_footnote_pass: false,
            warnings: Vec::new(),
        }
    }

    /// Set the reentrancy guard flag exposed by the host.
    ///
    /// When set, [`post_process`](Self::post_process) leaves the text
    /// unchanged.
    #[must_use]
    pub fn with_skip_footnote_pass(mut self, skip: bool) -> Self {
        self.skip_footnote_pass = skip;
        self
    }

    /// Inject footnote references and the footnote list into rendered
    /// output.
    ///
    /// With no resolved footnotes, no footer is appended and no footnote
    /// styling is introduced; only the internal escape round trip is undone.
    pub fn post_process(&mut self, html: &mut String) {
        if self.skip_footnote_pass {
            return;
        }
        if self.footnotes.is_empty() {
            *html = unescape_text(html);
            return;
        }

        let mut footer = String::from("<div class=\"footnotes\">\n<hr>\n<ol>\n");
        for footnote in &self.footnotes {
            let n = footnote.number;

            let placeholder = marker_placeholder(&footnote.id);
            let reference = format!(
                r##"<sup id="fnref-{n}"><a href="#fn-{n}" rel="footnote" title="go to footnote">{n}</a></sup>"##
            );
            if html.contains(&placeholder) {
                // Exactly one occurrence exists per resolved footnote;
                // duplicates were reverted during extraction.
                *html = html.replacen(&placeholder, &reference, 1);
            } else {
                self.warnings.push(format!(
                    "footnote {n}: placeholder not found in rendered output"
                ));
            }

            let backref = format!(
                r##"<a href="#fnref-{n}" class="footnote-backref" title="return to article">&#8617;</a>"##
            );
            let body = strip_block_indent(&footnote.content);
            let rendered = self.renderer.render_fragment(&format!("{body}\n{backref}"));
            footer.push_str(&format!("<li id=\"fn-{n}\">{rendered}</li>\n"));
        }
        footer.push_str("</ol>\n</div>\n");

        html.push('\n');
        html.push_str(&footer);
        *html = unescape_text(html);
    }

    /// Get warnings generated during processing.
    #[must_use]
    pub fn warnings(&self) -> &[String] {
        &self.warnings
    }
}

/// Strip up to three leading spaces from every line and trim the result.
///
/// Definition bodies carry the block indentation of their continuation
/// lines; without stripping it the fragment renderer would read four-space
/// indented paragraphs as code blocks.
fn strip_block_indent(content: &str) -> String {
    let stripped: Vec<&str> = content
        .lines()
        .map(|line| {
            let indent = line.bytes().take_while(|b| *b == b' ').count().min(3);
            &line[indent..]
        })
        .collect();
    stripped.join("\n").trim().to_string()
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;

    /// Wraps fragments in a tag so tests can see exactly what was rendered.
    struct TaggingRenderer;

    impl FragmentRenderer for TaggingRenderer {
        fn render_fragment(&self, markdown: &str) -> String {
            format!("[rendered:{markdown}]")
        }
    }

    fn footnote(id: &str, content: &str, number: usize) -> ResolvedFootnote {
        ResolvedFootnote {
            id: id.to_string(),
            content: content.to_string(),
            number,
        }
    }

    #[test]
    fn test_empty_footnotes_returns_text_unchanged() {
        let mut processor = FootnoteProcessor::new(vec![], TaggingRenderer);
        let mut html = "<p>No footnotes here.</p>".to_string();
        processor.post_process(&mut html);
        assert_eq!(html, "<p>No footnotes here.</p>");
    }

    #[test]
    fn test_replaces_placeholder_with_superscript() {
        let mut processor = FootnoteProcessor::new(vec![footnote("1", "Body.", 1)], TaggingRenderer);
        let mut html = "<p>A note.¨F¨M¨S1¨F¨M¨E</p>".to_string();
        processor.post_process(&mut html);
        assert!(html.contains(
            r##"<sup id="fnref-1"><a href="#fn-1" rel="footnote" title="go to footnote">1</a></sup>"##
        ));
        assert!(!html.contains("¨F¨M¨S"));
    }

    #[test]
    fn test_footer_structure() {
        let mut processor = FootnoteProcessor::new(
            vec![footnote("a", "First.", 1), footnote("b", "Second.", 2)],
            TaggingRenderer,
        );
        let mut html = "<p>¨F¨M¨Sa¨F¨M¨E and ¨F¨M¨Sb¨F¨M¨E</p>".to_string();
        processor.post_process(&mut html);

        assert!(html.contains("<div class=\"footnotes\">\n<hr>\n<ol>\n"));
        assert!(html.ends_with("</ol>\n</div>\n"));
        assert!(html.contains(r#"<li id="fn-1">"#));
        assert!(html.contains(r#"<li id="fn-2">"#));
        let footer_pos = html.find("<div class=\"footnotes\">").unwrap();
        assert!(html.find(r#"<sup id="fnref-1">"#).unwrap() < footer_pos);
    }

    #[test]
    fn test_body_rendered_with_backref_appended() {
        let mut processor = FootnoteProcessor::new(vec![footnote("1", "Body.", 1)], TaggingRenderer);
        let mut html = "¨F¨M¨S1¨F¨M¨E".to_string();
        processor.post_process(&mut html);
        assert!(html.contains(
            "[rendered:Body.\n<a href=\"#fnref-1\" class=\"footnote-backref\" title=\"return to article\">&#8617;</a>]"
        ));
    }

    #[test]
    fn test_missing_placeholder_records_warning() {
        let mut processor = FootnoteProcessor::new(vec![footnote("1", "Body.", 1)], TaggingRenderer);
        let mut html = "<p>no placeholder</p>".to_string();
        processor.post_process(&mut html);
        assert_eq!(processor.warnings().len(), 1);
        assert!(processor.warnings()[0].contains("footnote 1"));
    }

    #[test]
    fn test_skip_footnote_pass_leaves_text_unchanged() {
        let mut processor = FootnoteProcessor::new(vec![footnote("1", "Body.", 1)], TaggingRenderer)
            .with_skip_footnote_pass(true);
        let mut html = "¨F¨M¨S1¨F¨M¨E".to_string();
        processor.post_process(&mut html);
        assert_eq!(html, "¨F¨M¨S1¨F¨M¨E");
    }

    #[test]
    fn test_unescapes_escape_char_in_output() {
        let mut processor = FootnoteProcessor::new(vec![], TaggingRenderer);
        let mut html = "<p>before ¨T after</p>".to_string();
        processor.post_process(&mut html);
        assert_eq!(html, "<p>before ¨ after</p>");
    }

    #[test]
    fn test_unescapes_inside_footnote_bodies() {
        let mut processor =
            FootnoteProcessor::new(vec![footnote("1", "tréma: ¨T", 1)], TaggingRenderer);
        let mut html = "¨F¨M¨S1¨F¨M¨E".to_string();
        processor.post_process(&mut html);
        assert!(html.contains("tréma: ¨"));
        assert!(!html.contains("¨T"));
    }

    #[test]
    fn test_strip_block_indent() {
        assert_eq!(strip_block_indent("plain"), "plain");
        assert_eq!(strip_block_indent("\n    Body here."), "Body here.");
        assert_eq!(
            strip_block_indent("\n    First.\n\n    Second."),
            "First.\n\n Second."
        );
        assert_eq!(strip_block_indent("  two spaces"), "two spaces");
    }
}
