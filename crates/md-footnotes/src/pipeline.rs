//! End-to-end footnote conversion around a fragment renderer.

use crate::fragment::FragmentRenderer;
use crate::preprocessor::FootnotePreprocessor;
use crate::processor::FootnoteProcessor;

/// Result of converting a document.
#[derive(Clone, Debug)]
pub struct ConversionResult {
    /// Final rendered HTML with footnote references and list injected.
    pub html: String,
    /// Warnings generated during conversion (e.g., duplicate definitions).
    pub warnings: Vec<String>,
}

/// Full conversion pipeline: extraction, main render, injection.
///
/// Runs the [`FootnotePreprocessor`] over the source, renders the
/// intermediate text through the fragment renderer (the host's main pass),
/// then runs the [`FootnoteProcessor`] over the output. The same renderer
/// capability serves the main pass and the footnote-body passes; it never
/// re-enters this pipeline, so footnote bodies cannot recurse.
///
/// Each [`convert`](Self::convert) call uses fresh per-conversion state, so
/// one pipeline can convert any number of documents, and separate pipelines
/// are independent.
///
/// # Example
///
/// ```
/// use md_footnotes::{FootnotePipeline, HtmlFragmentRenderer};
///
/// let pipeline = FootnotePipeline::new(HtmlFragmentRenderer::new());
/// let result = pipeline.convert("A note.[^1]\n\n[^1]: The footnote.");
///
/// assert!(result.html.contains(r#"<sup id="fnref-1">"#));
/// assert!(result.html.contains(r#"<div class="footnotes">"#));
/// ```
pub struct FootnotePipeline<R: FragmentRenderer> {
    renderer: R,
    skip_footnote_pass: bool,
}

impl<R: FragmentRenderer> FootnotePipeline<R> {
    /// Create a pipeline around a fragment renderer.
    #[must_use]
    pub fn new(renderer: R) -> Self {
        Self {
            renderer,
            skip_footnote_pass: false,
        }
    }

    /// Set the reentrancy guard flag for both phases.
    ///
    /// With the flag set, [`convert`](Self::convert) renders the source as
    /// plain markdown and the footnote pass is skipped entirely.
    #[must_use]
    pub fn with_skip_footnote_pass(mut self, skip: bool) -> Self {
        self.skip_footnote_pass = skip;
        self
    }

    /// Convert a document.
    #[must_use]
    pub fn convert(&self, markdown: &str) -> ConversionResult {
        let mut preprocessor =
            FootnotePreprocessor::new().with_skip_footnote_pass(self.skip_footnote_pass);
        let intermediate = preprocessor.process(markdown);
        let mut warnings = preprocessor.warnings().to_vec();
        let footnotes = preprocessor.into_footnotes();

        let mut html = self.renderer.render_fragment(&intermediate);

        let mut processor = FootnoteProcessor::new(footnotes, &self.renderer)
            .with_skip_footnote_pass(self.skip_footnote_pass);
        processor.post_process(&mut html);
        warnings.extend_from_slice(processor.warnings());

        ConversionResult { html, warnings }
    }
}
