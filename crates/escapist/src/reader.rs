//! A backtracking cursor over the code points of a string.
//!
//! The text is decoded once into a fixed `Vec<char>`; every position handed
//! out or accepted by [`Reader`] is a code point offset into that array, never
//! a byte offset. The cursor can be saved with [`Reader::index`] and restored
//! with [`Reader::set_index`], which is how rules undo speculative reads.
//!
//! Invariants
//! - [`Reader::try_skip`] either consumes the whole literal or nothing.
//! - [`Reader::read_while`] leaves the cursor untouched when it fails.

use alloc::{string::String, vec::Vec};

use crate::{
    diagnostics,
    error::{UnescapeError, UnescapeErrorKind},
};

/// Code point cursor used by the unescaper and by [`EscapeRule`]s.
///
/// [`EscapeRule`]: crate::EscapeRule
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Reader {
    code_points: Vec<char>,
    index: usize,
}

impl Reader {
    /// Decodes `text` and places the cursor at its first code point.
    #[must_use]
    pub fn new(text: &str) -> Self {
        Self::at(text, 0)
    }

    /// Decodes `text` and places the cursor at code point offset `index`.
    #[must_use]
    pub fn at(text: &str, index: usize) -> Self {
        Self {
            code_points: text.chars().collect(),
            index,
        }
    }

    /// Current code point offset.
    #[must_use]
    pub fn index(&self) -> usize {
        self.index
    }

    /// Moves the cursor to `index`, typically one saved earlier with
    /// [`index`](Self::index).
    pub fn set_index(&mut self, index: usize) {
        self.index = index;
    }

    /// Total number of code points in the underlying text.
    #[must_use]
    pub fn len(&self) -> usize {
        self.code_points.len()
    }

    /// Whether the underlying text has no code points at all.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.code_points.is_empty()
    }

    /// All code points of the underlying text.
    #[must_use]
    pub fn code_points(&self) -> &[char] {
        &self.code_points
    }

    /// Code points from the cursor to the end of input.
    #[must_use]
    pub fn remaining(&self) -> &[char] {
        let start = self.index.min(self.code_points.len());
        &self.code_points[start..]
    }

    /// The code point under the cursor, without consuming it.
    #[must_use]
    pub fn peek(&self) -> Option<char> {
        self.code_points.get(self.index).copied()
    }

    /// Consumes and returns the code point under the cursor.
    pub fn advance(&mut self) -> Option<char> {
        let ch = self.peek()?;
        self.index += 1;
        Some(ch)
    }

    /// Moves the cursor past the code point under it, if any.
    pub fn skip(&mut self) {
        if self.index < self.code_points.len() {
            self.index += 1;
        }
    }

    /// Consumes `literal` if the upcoming code points match it exactly.
    ///
    /// An empty literal always matches without consuming anything. On a
    /// mismatch, or when fewer code points remain than `literal` has, nothing
    /// is consumed and `false` is returned.
    pub fn try_skip(&mut self, literal: &str) -> bool {
        let rest = self.remaining();
        let mut matched = 0;
        for expected in literal.chars() {
            if rest.get(matched) != Some(&expected) {
                return false;
            }
            matched += 1;
        }
        self.index += matched;
        true
    }

    /// Greedily consumes code points satisfying `predicate`, stopping at the
    /// first mismatch, the end of input, or after `max_len` matches.
    ///
    /// # Errors
    ///
    /// Returns [`UnescapeErrorKind::SequenceTooShort`] if fewer than
    /// `min_len` code points matched. The cursor is not moved in that case.
    pub fn read_while(
        &mut self,
        predicate: impl Fn(char) -> bool,
        min_len: usize,
        max_len: usize,
    ) -> Result<String, UnescapeError> {
        let rest = self.remaining();
        let found = rest
            .iter()
            .take(max_len)
            .take_while(|&&ch| predicate(ch))
            .count();
        let read: String = rest[..found].iter().collect();
        if found < min_len {
            return Err(UnescapeErrorKind::SequenceTooShort {
                min: min_len,
                found,
                read,
            }
            .into());
        }
        self.index += found;
        Ok(read)
    }

    /// A short, ellipsized rendering of the text starting at `index`, for
    /// error messages.
    #[must_use]
    pub(crate) fn excerpt(&self, index: usize) -> String {
        diagnostics::excerpt(&self.code_points, index)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn try_skip_consumes_matching_literal() {
        let mut reader = Reader::new("abc123");
        assert!(reader.try_skip("abc"));
        assert_eq!(reader.index(), 3);
    }

    #[test]
    fn try_skip_leaves_cursor_on_mismatch() {
        let mut reader = Reader::new("abc123");
        assert!(!reader.try_skip("invalid"));
        assert_eq!(reader.index(), 0);

        // Partial prefix match must not consume either.
        assert!(!reader.try_skip("abd"));
        assert_eq!(reader.index(), 0);
    }

    #[test]
    fn try_skip_empty_literal_always_matches() {
        let mut reader = Reader::new("");
        assert!(reader.try_skip(""));
        assert_eq!(reader.index(), 0);
    }

    #[test]
    fn try_skip_counts_code_points_not_bytes() {
        let mut reader = Reader::new("😊é!");
        assert!(reader.try_skip("😊é"));
        assert_eq!(reader.index(), 2);
        assert_eq!(reader.peek(), Some('!'));
    }

    #[test]
    fn try_skip_fails_past_end_of_input() {
        let mut reader = Reader::new("ab");
        assert!(!reader.try_skip("abc"));
        assert_eq!(reader.index(), 0);
    }

    #[test]
    fn read_while_returns_matched_run() {
        let mut reader = Reader::new("aaabc");
        let read = reader.read_while(|ch| ch == 'a', 0, usize::MAX).unwrap();
        assert_eq!(read, "aaa");
        assert_eq!(reader.index(), 3);
    }

    #[test]
    fn read_while_with_no_match_returns_empty() {
        let mut reader = Reader::new("123");
        let read = reader.read_while(|ch| ch == 'a', 0, usize::MAX).unwrap();
        assert_eq!(read, "");
        assert_eq!(reader.index(), 0);
    }

    #[test]
    fn read_while_too_short_fails_without_advancing() {
        let mut reader = Reader::new("aaa");
        let err = reader
            .read_while(|ch| ch == 'a', 5, usize::MAX)
            .unwrap_err();
        assert_eq!(
            err.kind(),
            &UnescapeErrorKind::SequenceTooShort {
                min: 5,
                found: 3,
                read: "aaa".into(),
            }
        );
        assert_eq!(reader.index(), 0);
    }

    #[test]
    fn read_while_stops_at_max_len() {
        let mut reader = Reader::new("aaa");
        let read = reader.read_while(|ch| ch == 'a', 0, 2).unwrap();
        assert_eq!(read, "aa");
        assert_eq!(reader.index(), 2);
    }

    #[test]
    fn read_while_starts_from_cursor() {
        let mut reader = Reader::at("xx12y", 2);
        let read = reader
            .read_while(|ch| ch.is_ascii_digit(), 1, usize::MAX)
            .unwrap();
        assert_eq!(read, "12");
        assert_eq!(reader.index(), 4);
    }

    #[test]
    fn cursor_past_end_reads_nothing() {
        let mut reader = Reader::at("ab", 7);
        assert_eq!(reader.peek(), None);
        assert!(reader.remaining().is_empty());
        assert!(!reader.try_skip("a"));
        assert_eq!(reader.read_while(|_| true, 0, 3).unwrap(), "");
    }

    #[test]
    fn skip_stops_at_end_of_input() {
        let mut reader = Reader::new("a");
        reader.skip();
        assert_eq!(reader.index(), 1);
        reader.skip();
        assert_eq!(reader.index(), 1);
    }
}
