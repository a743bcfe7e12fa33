//! Footnote pipeline for markdown rendering.
//!
//! Markdown footnotes work mostly like reference-style links: a marker in
//! running text (`[^name]`) becomes a numbered superscript reference, and a
//! definition elsewhere in the document (`[^name]: body`) supplies the
//! content for a footnote list appended at the end. Definitions can appear
//! anywhere; footnotes are numbered in the order they are cited. The
//! relation is one-to-one: a second marker citing an already-bound id is
//! left as plain text.
//!
//! # Architecture
//!
//! The pipeline wraps an opaque markdown renderer with two phases:
//!
//! 1. **Extraction** ([`FootnotePreprocessor`]): tokenizes the source into
//!    spans, binds markers to definitions in citation order, rewrites
//!    resolved sites as inert placeholders and restores everything
//!    unresolvable as literal text.
//! 2. **Injection** ([`FootnoteProcessor`]): replaces each placeholder in
//!    the rendered output with a superscript anchor, renders footnote
//!    bodies through a [`FragmentRenderer`], and appends the footnote list.
//!
//! The renderer between the phases is any [`FragmentRenderer`]; the bundled
//! [`HtmlFragmentRenderer`] uses pulldown-cmark. [`FootnotePipeline`] ties
//! the three steps together.
//!
//! # Example
//!
//! ```
//! use md_footnotes::{FootnotePipeline, HtmlFragmentRenderer};
//!
//! let pipeline = FootnotePipeline::new(HtmlFragmentRenderer::new());
//! let result = pipeline.convert("A note.[^1]\n\n[^1]: The footnote.");
//!
//! assert!(result.html.contains(r#"<sup id="fnref-1">"#));
//! assert!(result.html.contains(r#"<li id="fn-1">"#));
//! ```

mod escape;
mod fragment;
mod pipeline;
mod preprocessor;
mod processor;
mod tokenizer;

pub use fragment::{FragmentRenderer, HtmlFragmentRenderer};
pub use pipeline::{ConversionResult, FootnotePipeline};
pub use preprocessor::{FootnotePreprocessor, ResolvedFootnote};
pub use processor::FootnoteProcessor;
