use alloc::{string::String, vec::Vec};

use super::{EscapeRule, Unescaped};
use crate::{error::UnescapeError, reader::Reader};

/// Accepts a literal that decodes to nothing, e.g. a line continuation.
///
/// Unescape-only: it never escapes and never requires escaping.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ZeroWidthRule {
    literal: String,
}

impl ZeroWidthRule {
    /// A rule accepting `literal` after the escape prefix.
    pub fn new(literal: impl Into<String>) -> Self {
        Self {
            literal: literal.into(),
        }
    }
}

impl EscapeRule for ZeroWidthRule {
    fn escape(&self, _ch: char, _surrounder: Option<char>) -> Vec<String> {
        Vec::new()
    }

    fn unescape(
        &self,
        reader: &mut Reader,
        _surrounder: Option<char>,
    ) -> Result<Option<Unescaped>, UnescapeError> {
        Ok(reader
            .try_skip(&self.literal)
            .then(|| Unescaped::Text(String::new())))
    }

    fn must_escape(&self, _ch: char, _surrounder: Option<char>) -> bool {
        false
    }
}
