//! Internal escape tokens protecting footnote constructs from the host renderer.
//!
//! The pipeline rewrites recognized footnote syntax into inert placeholder
//! tokens so the host renderer cannot mis-parse it (a definition would
//! otherwise render as a plain paragraph, a marker next to parentheses as a
//! link reference). Tokens are built from an escape character not expected
//! in normal prose; any occurrence of that character in the source is
//! double-escaped on input and restored on output so the round trip is exact.

/// Escape character used in placeholder tokens (diaeresis, U+00A8).
const ESCAPE: char = '¨';

/// Start delimiter of a marker placeholder: escape char, marker role tag,
/// start tag.
const MARKER_START: &str = "¨F¨M¨S";

/// End delimiter of a marker placeholder.
const MARKER_END: &str = "¨F¨M¨E";

/// Escape every occurrence of the escape character in document text.
///
/// Applied to the whole source before tokenizing, so legitimate content can
/// never collide with placeholder tokens.
pub(crate) fn escape_text(text: &str) -> String {
    text.replace(ESCAPE, "¨T")
}

/// Undo [`escape_text`]. Applied once, over the final output.
pub(crate) fn unescape_text(text: &str) -> String {
    text.replace("¨T", "¨")
}

/// Escape dollar signs in a footnote id before embedding it in a placeholder.
pub(crate) fn escape_id(id: &str) -> String {
    id.replace('$', "¨D")
}

/// Undo [`escape_id`] when an id is surfaced as literal text again.
pub(crate) fn unescape_id(id: &str) -> String {
    id.replace("¨D", "$")
}

/// Build the inert placeholder for a marker occurrence.
///
/// `id` must already be in escaped form (see [`escape_id`]).
pub(crate) fn marker_placeholder(id: &str) -> String {
    format!("{MARKER_START}{id}{MARKER_END}")
}
