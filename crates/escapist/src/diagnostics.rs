//! Bounded text rendering for error messages.
//!
//! Everything rendered here goes through [`dialects::diagnostic`] so that
//! control characters in user input (or in an escaper's own configuration)
//! cannot corrupt the message.

use alloc::string::String;

use crate::dialects;

/// How many code points an excerpt shows before it is ellipsized.
pub(crate) const EXCERPT_LEN: usize = 4;

/// Renders up to [`EXCERPT_LEN`] code points starting at `start`, followed by
/// `...` when more input remains beyond them.
pub(crate) fn excerpt(code_points: &[char], start: usize) -> String {
    excerpt_with_len(code_points, start, EXCERPT_LEN)
}

pub(crate) fn excerpt_with_len(code_points: &[char], start: usize, len: usize) -> String {
    let start = start.min(code_points.len());
    let end = start.saturating_add(len).min(code_points.len());
    let mut out = String::new();
    for &ch in &code_points[start..end] {
        dialects::diagnostic().push_escaped(&mut out, ch, None);
    }
    if code_points.len() - start > len {
        out.push_str("...");
    }
    out
}

/// Renders a single character safely.
pub(crate) fn describe(ch: char) -> String {
    dialects::diagnostic().escape_char(ch)
}

/// Renders a sequence of characters safely, skipping absent ones.
pub(crate) fn describe_all(chars: impl IntoIterator<Item = Option<char>>) -> String {
    let mut out = String::new();
    for ch in chars.into_iter().flatten() {
        dialects::diagnostic().push_escaped(&mut out, ch, None);
    }
    out
}
