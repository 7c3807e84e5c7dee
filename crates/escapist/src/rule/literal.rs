use alloc::{string::String, vec, vec::Vec};

use super::{EscapeRule, Unescaped};
use crate::{error::UnescapeError, reader::Reader};

/// Maps one target character to a fixed literal spelling, e.g. newline to
/// `n` so that it is written `\n`.
///
/// A mandatory rule escapes its target and rejects it unescaped. An optional
/// rule only accepts the spelling when unescaping; escaping leaves the target
/// verbatim.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LiteralRule {
    target: char,
    literal: String,
    mandatory: bool,
}

impl LiteralRule {
    /// A rule that always escapes `target` as `literal`.
    pub fn always(target: char, literal: impl Into<String>) -> Self {
        Self {
            target,
            literal: literal.into(),
            mandatory: true,
        }
    }

    /// A rule that accepts `literal` for `target` but never produces it.
    pub fn optional(target: char, literal: impl Into<String>) -> Self {
        Self {
            target,
            literal: literal.into(),
            mandatory: false,
        }
    }

    /// The character this rule spells.
    #[must_use]
    pub fn target(&self) -> char {
        self.target
    }

    /// The spelling that follows the escape prefix.
    #[must_use]
    pub fn literal(&self) -> &str {
        &self.literal
    }

    /// Whether the target must be escaped.
    #[must_use]
    pub fn is_mandatory(&self) -> bool {
        self.mandatory
    }
}

impl EscapeRule for LiteralRule {
    fn escape(&self, ch: char, _surrounder: Option<char>) -> Vec<String> {
        if self.mandatory && ch == self.target {
            vec![self.literal.clone()]
        } else {
            Vec::new()
        }
    }

    fn unescape(
        &self,
        reader: &mut Reader,
        _surrounder: Option<char>,
    ) -> Result<Option<Unescaped>, UnescapeError> {
        Ok(reader
            .try_skip(&self.literal)
            .then_some(Unescaped::Char(self.target)))
    }

    fn must_escape(&self, ch: char, _surrounder: Option<char>) -> bool {
        self.mandatory && ch == self.target
    }
}
