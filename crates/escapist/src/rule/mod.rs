//! Escape rules: the pluggable policies an [`Escaper`] consults.
//!
//! A rule answers three questions about a code point under the currently
//! active surrounder (the delimiter that opened the string, if any):
//!
//! - [`escape`](EscapeRule::escape): which escape fragments, if any, spell it.
//! - [`unescape`](EscapeRule::unescape): whether the text after an escape
//!   prefix is one of its spellings, and what it decodes to.
//! - [`must_escape`](EscapeRule::must_escape): whether it may not appear
//!   verbatim.
//!
//! Rules are evaluated first-match in list order, so an earlier rule's
//! decision always wins. They hold no mutable state and are shared freely
//! between concurrent calls.
//!
//! [`Escaper`]: crate::Escaper

use alloc::{string::String, vec::Vec};
use core::fmt;

use crate::{error::UnescapeError, reader::Reader};

mod literal;
mod numeric;
mod surrounder;
mod zero_width;

pub use literal::LiteralRule;
pub use numeric::{NumeralFormat, NumericRule, NumericRuleBuilder, Transformation};
pub use surrounder::SurrounderRule;
pub use zero_width::ZeroWidthRule;

/// Extension point for escape dialects.
pub trait EscapeRule: fmt::Debug + Send + Sync {
    /// Escape fragments spelling `ch`, each of which the escaper wraps in its
    /// own prefix and suffix. An empty list means this rule does not escape
    /// `ch`.
    fn escape(&self, ch: char, surrounder: Option<char>) -> Vec<String>;

    /// Attempts to decode an escape sequence at the reader's cursor, which sits
    /// just after the escape prefix.
    ///
    /// Returns `Ok(None)` when the sequence is not this rule's; the cursor
    /// must then be where it was on entry. On `Ok(Some(_))` the cursor is left
    /// after the consumed sequence.
    ///
    /// # Errors
    ///
    /// A rule may reject a sequence it has committed to, for example a numeric
    /// escape with too few digits.
    fn unescape(
        &self,
        reader: &mut Reader,
        surrounder: Option<char>,
    ) -> Result<Option<Unescaped>, UnescapeError>;

    /// Whether `ch` may not appear unescaped.
    fn must_escape(&self, ch: char, surrounder: Option<char>) -> bool;
}

impl<R: EscapeRule + ?Sized> EscapeRule for alloc::boxed::Box<R> {
    fn escape(&self, ch: char, surrounder: Option<char>) -> Vec<String> {
        (**self).escape(ch, surrounder)
    }

    fn unescape(
        &self,
        reader: &mut Reader,
        surrounder: Option<char>,
    ) -> Result<Option<Unescaped>, UnescapeError> {
        (**self).unescape(reader, surrounder)
    }

    fn must_escape(&self, ch: char, surrounder: Option<char>) -> bool {
        (**self).must_escape(ch, surrounder)
    }
}

/// The decoded value of one escape sequence.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Unescaped {
    /// A whole character.
    Char(char),
    /// Arbitrary text, possibly empty.
    Text(String),
    /// One byte of a UTF-8 encoded character.
    Utf8Byte(u8),
    /// One UTF-16 code unit, possibly half of a surrogate pair.
    Utf16Unit(u16),
}
