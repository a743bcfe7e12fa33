//! Footnote preprocessor: extraction and binding before the main render.
//!
//! Scans raw source for footnote definitions and inline markers, binds each
//! marker to a definition one-to-one in marker order, and rewrites the text
//! so the host renderer only ever sees inert placeholders for resolved
//! references. Everything that cannot be resolved is restored as literal
//! text, so unresolved input survives the conversion untouched.

use std::collections::{HashMap, HashSet};

use crate::escape::{escape_text, marker_placeholder, unescape_id, unescape_text};
use crate::tokenizer::{Span, tokenize};

/// A marker successfully bound to a definition.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ResolvedFootnote {
    /// Footnote id as captured during extraction. Internal escapes are
    /// undone in the final output pass.
    pub id: String,
    /// Un-rendered body text belonging to this footnote.
    pub content: String,
    /// 1-based sequence number, assigned in the order the owning marker
    /// first appears among resolved markers.
    pub number: usize,
}

/// Preprocessor that extracts footnote syntax ahead of the main render.
///
/// All working state is scoped to the preprocessor instance, so independent
/// conversions can run on separate instances concurrently. Binding happens
/// after the full scan, so a marker may appear before or after its
/// definition in the source.
///
/// Resolution rules:
/// - A marker claims the definition with its id; the claim is exclusive, so
///   a second marker with the same id reverts to literal `[^id]` text.
/// - Duplicate definition ids collapse to the last occurrence; earlier
///   occurrences are restored as literal text and a warning is recorded.
/// - Definitions never claimed by a marker are restored verbatim.
///
/// # Example
///
/// ```
/// use md_footnotes::FootnotePreprocessor;
///
/// let mut preprocessor = FootnotePreprocessor::new();
/// let text = preprocessor.process("See note.[^a]\n\n[^a]: The body.");
///
/// // The marker and definition are gone from the intermediate text.
/// assert!(!text.contains("[^a]"));
///
/// let footnotes = preprocessor.into_footnotes();
/// assert_eq!(footnotes.len(), 1);
/// assert_eq!(footnotes[0].number, 1);
/// assert_eq!(footnotes[0].content, "The body.");
/// ```
#[derive(Debug, Default)]
pub struct FootnotePreprocessor {
    skip_footnote_pass: bool,
    footnotes: Vec<ResolvedFootnote>,
    warnings: Vec<String>,
}

impl FootnotePreprocessor {
    /// Create a new preprocessor.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the reentrancy guard flag exposed by the host.
    ///
    /// When set, [`process`](Self::process) passes text through unchanged
    /// and resolves nothing.
    #[must_use]
    pub fn with_skip_footnote_pass(mut self, skip: bool) -> Self {
        self.skip_footnote_pass = skip;
        self
    }

    /// Process source text and return the rewritten intermediate text.
    ///
    /// Resolved marker sites become placeholder tokens; claimed definitions
    /// are removed; orphaned markers and unclaimed definitions are restored
    /// as literal text. Resolved footnotes and warnings from an earlier call
    /// are discarded, so each call is a fresh conversion.
    #[must_use]
    pub fn process(&mut self, input: &str) -> String {
        if self.skip_footnote_pass {
            return input.to_string();
        }
        self.footnotes.clear();
        self.warnings.clear();

        let escaped = escape_text(input);
        let spans = tokenize(&escaped);

        // Definition table, last occurrence wins for duplicate ids.
        let mut definitions: HashMap<&str, usize> = HashMap::new();
        for (idx, span) in spans.iter().enumerate() {
            if let Span::Definition(def) = span {
                if definitions.insert(&def.id, idx).is_some() {
                    self.warnings.push(format!(
                        "duplicate footnote definition [^{}], using the last occurrence",
                        unescape_text(&unescape_id(&def.id))
                    ));
                }
            }
        }

        // Bind markers in source order. The first occurrence of an id claims
        // its definition; later occurrences find nothing and stay orphaned.
        let mut claimed: HashSet<usize> = HashSet::new();
        let mut resolved: HashSet<usize> = HashSet::new();
        for (idx, span) in spans.iter().enumerate() {
            let Span::Marker { id } = span else { continue };
            if let Some(def_idx) = definitions.remove(id.as_str()) {
                if let Span::Definition(def) = &spans[def_idx] {
                    claimed.insert(def_idx);
                    resolved.insert(idx);
                    self.footnotes.push(ResolvedFootnote {
                        id: id.clone(),
                        content: def.content.clone(),
                        number: self.footnotes.len() + 1,
                    });
                }
            }
        }

        // Reconstruct: claimed definitions vanish, resolved markers become
        // placeholders, everything else returns to literal text.
        let mut output = String::with_capacity(escaped.len());
        for (idx, span) in spans.iter().enumerate() {
            match span {
                Span::Literal(text) => output.push_str(text),
                Span::Definition(def) => {
                    if !claimed.contains(&idx) {
                        output.push_str(&def.literal);
                    }
                }
                Span::Marker { id } => {
                    if resolved.contains(&idx) {
                        output.push_str(&marker_placeholder(id));
                    } else {
                        output.push_str("[^");
                        output.push_str(&unescape_id(id));
                        output.push(']');
                    }
                }
            }
        }
        output
    }

    /// Get warnings generated during processing.
    #[must_use]
    pub fn warnings(&self) -> &[String] {
        &self.warnings
    }

    /// Consume the preprocessor and return the resolved footnotes in
    /// sequence-number order.
    #[must_use]
    pub fn into_footnotes(self) -> Vec<ResolvedFootnote> {
        self.footnotes
    }
}
