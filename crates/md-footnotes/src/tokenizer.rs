//! Single-pass span tokenizer for footnote syntax.
//!
//! Splits source text into an ordered span list: literal text, footnote
//! definition blocks, and inline marker occurrences. Binding and
//! reconstruction operate on this span list, so marker ordering and
//! per-occurrence restoration fall out of the structure instead of depending
//! on substitution order.

use std::sync::LazyLock;

use regex::Regex;

use crate::escape::escape_id;

/// Matches a definition head line: up to 3 spaces of indent, `[^id]:`, at
/// most one space or tab, then the same-line body.
static DEFINITION_HEAD_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^ {0,3}\[\^(.+?)\]:[ \t]?(.*)$").unwrap());

/// Matches an inline marker candidate. A trailing colon is checked
/// separately since that indicates definition syntax.
static MARKER_RE: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"\[\^(.+?)\]").unwrap());

/// A footnote definition block found in the source.
#[derive(Clone, Debug, PartialEq, Eq)]
pub(crate) struct DefinitionSpan {
    /// Footnote id as written, in escaped form.
    pub id: String,
    /// Body text belonging to this definition (may span multiple lines).
    pub content: String,
    /// Exact original span, kept so an unclaimed definition can be restored
    /// verbatim.
    pub literal: String,
}

/// One span of the tokenized source.
#[derive(Clone, Debug, PartialEq, Eq)]
pub(crate) enum Span {
    /// Text the pipeline does not touch.
    Literal(String),
    /// A footnote definition block.
    Definition(DefinitionSpan),
    /// An inline marker occurrence `[^id]`, in source order.
    Marker { id: String },
}

/// Tokenize escaped source text into spans.
///
/// Definitions are recognized first on each line; markers are only scanned
/// in literal text, so syntax inside a definition body stays part of the
/// body. The spans concatenate back to the input exactly, except that a
/// definition span excludes the newline that follows it.
pub(crate) fn tokenize(text: &str) -> Vec<Span> {
    let lines: Vec<&str> = text.split('\n').collect();
    let last = lines.len() - 1;

    let mut spans = Vec::new();
    let mut literal = String::new();

    let mut i = 0;
    while i < lines.len() {
        if let Some(caps) = DEFINITION_HEAD_RE.captures(lines[i]) {
            flush_literal(&mut literal, &mut spans);

            let id = escape_id(&caps[1]);
            let head_body = caps[2].to_string();
            let end = consume_body(&lines, i, head_body.is_empty());

            let content = if end == i {
                head_body
            } else {
                format!("{head_body}\n{}", lines[i + 1..=end].join("\n"))
            };
            spans.push(Span::Definition(DefinitionSpan {
                id,
                content,
                literal: lines[i..=end].join("\n"),
            }));

            if end < last {
                literal.push('\n');
            }
            i = end + 1;
        } else {
            scan_markers(lines[i], &mut literal, &mut spans);
            if i < last {
                literal.push('\n');
            }
            i += 1;
        }
    }
    flush_literal(&mut literal, &mut spans);

    spans
}

/// Determine the last line index of a definition body starting at `head`.
///
/// Continuation lines are blank lines, lines indented at least 3 spaces, and
/// lines whose first non-space character is other whitespace (a tab-indented
/// line continues the body), up to the next definition head or a line of
/// unindented text. A head with
/// no same-line body additionally pulls in the immediately following line,
/// which is how multi-paragraph definitions are written. Trailing blank
/// lines are left outside the span.
fn consume_body(lines: &[&str], head: usize, head_is_empty: bool) -> usize {
    let mut end = head;
    let mut j = head + 1;

    if head_is_empty && j < lines.len() && !DEFINITION_HEAD_RE.is_match(lines[j]) {
        end = j;
        j += 1;
    }
    while j < lines.len() && continues_body(lines[j]) {
        end = j;
        j += 1;
    }
    while end > head && lines[end].trim().is_empty() {
        end -= 1;
    }
    end
}

/// Whether a line continues the body of the current definition.
///
/// Only a line carrying text within 2 spaces of the margin terminates a
/// body, so blank lines and whitespace-led lines (tabs included) continue
/// it.
fn continues_body(line: &str) -> bool {
    if DEFINITION_HEAD_RE.is_match(line) {
        return false;
    }
    let indent = indent_width(line);
    indent >= 3
        || line[indent..]
            .chars()
            .next()
            .is_none_or(char::is_whitespace)
}

fn indent_width(line: &str) -> usize {
    line.bytes().take_while(|b| *b == b' ').count()
}

/// Scan one line of literal text for marker occurrences.
///
/// A candidate immediately followed by a colon is definition syntax in the
/// wrong position (for example over-indented) and stays literal.
fn scan_markers(line: &str, literal: &mut String, spans: &mut Vec<Span>) {
    let mut rest = 0;
    for matched in MARKER_RE.find_iter(line) {
        if line[matched.end()..].starts_with(':') {
            continue;
        }
        literal.push_str(&line[rest..matched.start()]);
        flush_literal(literal, spans);
        // Strip the surrounding "[^" and "]" to get the id.
        let id = &matched.as_str()[2..matched.as_str().len() - 1];
        spans.push(Span::Marker {
            id: escape_id(id),
        });
        rest = matched.end();
    }
    literal.push_str(&line[rest..]);
}

fn flush_literal(literal: &mut String, spans: &mut Vec<Span>) {
    if !literal.is_empty() {
        spans.push(Span::Literal(std::mem::take(literal)));
    }
}
