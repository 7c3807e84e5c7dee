//! Numeric escapes such as `\u00e9`, `\x41` or `\101`.
//!
//! A code point is first split into units by a [`Transformation`] (UTF-8
//! bytes, UTF-16 code units, or the whole code point), then each unit is
//! written as a numeral in a [`NumeralFormat`], left-padded with `0` to the
//! minimum digit count and wrapped in the rule's own prefix and suffix.
//!
//! Decoding works one escape sequence per unit. A surrogate pair is two
//! sequences, a multi-byte UTF-8 character is several; the units are put back
//! together by the escaper's output buffer, not by the rule.

use alloc::{
    format,
    string::{String, ToString},
    sync::Arc,
    vec::Vec,
};
use core::fmt;

use super::{EscapeRule, Unescaped};
use crate::{
    error::{ConfigError, UnescapeError, UnescapeErrorKind},
    reader::Reader,
};

/// How a code point is split into numeric units.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Transformation {
    /// One to four byte values, `0..=0xFF`.
    Utf8,
    /// One code unit, or a surrogate pair above the Basic Multilingual Plane.
    Utf16,
    /// The code point itself.
    Utf32,
}

impl Transformation {
    /// The numeric units of `ch`.
    #[must_use]
    pub fn units(self, ch: char) -> Vec<u32> {
        match self {
            Self::Utf8 => {
                let mut buf = [0u8; 4];
                ch.encode_utf8(&mut buf).bytes().map(u32::from).collect()
            }
            Self::Utf16 => {
                let mut buf = [0u16; 2];
                ch.encode_utf16(&mut buf).iter().map(|&unit| u32::from(unit)).collect()
            }
            Self::Utf32 => alloc::vec![u32::from(ch)],
        }
    }

    /// The units of `ch` rendered in `format`, unpadded.
    #[must_use]
    pub fn escape(self, ch: char, format: NumeralFormat) -> Vec<String> {
        self.units(ch)
            .into_iter()
            .map(|unit| format.render(unit))
            .collect()
    }

    /// Largest value a single unit can take.
    #[must_use]
    pub fn max_unit(self) -> u32 {
        match self {
            Self::Utf8 => 0xFF,
            Self::Utf16 => 0xFFFF,
            Self::Utf32 => u32::from(char::MAX),
        }
    }

    /// Reinterprets one decoded numeral as a unit of this transformation.
    ///
    /// # Errors
    ///
    /// Fails if `value` does not fit the unit, or for [`Self::Utf32`] if it
    /// is not a Unicode scalar value.
    pub fn decode(self, value: u32) -> Result<Unescaped, UnescapeErrorKind> {
        let invalid = || UnescapeErrorKind::InvalidCodePoint { value };
        match self {
            Self::Utf8 => u8::try_from(value)
                .map(Unescaped::Utf8Byte)
                .map_err(|_| invalid()),
            Self::Utf16 => u16::try_from(value)
                .map(Unescaped::Utf16Unit)
                .map_err(|_| invalid()),
            Self::Utf32 => char::from_u32(value).map(Unescaped::Char).ok_or_else(invalid),
        }
    }
}

/// Base and digit alphabet of a numeral.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum NumeralFormat {
    /// `0` and `1`.
    Binary,
    /// `0` through `7`.
    Octal,
    /// `0` through `9`.
    Decimal,
    /// `0` through `9` and `a` through `f` in either case; rendered lowercase.
    Hexadecimal,
}

impl NumeralFormat {
    /// Numeric base.
    #[must_use]
    pub fn radix(self) -> u32 {
        match self {
            Self::Binary => 2,
            Self::Octal => 8,
            Self::Decimal => 10,
            Self::Hexadecimal => 16,
        }
    }

    /// Whether `ch` is a digit of this format.
    #[must_use]
    pub fn is_digit(self, ch: char) -> bool {
        ch.is_digit(self.radix())
    }

    /// Renders `value` without padding.
    #[must_use]
    pub fn render(self, value: u32) -> String {
        match self {
            Self::Binary => format!("{value:b}"),
            Self::Octal => format!("{value:o}"),
            Self::Decimal => value.to_string(),
            Self::Hexadecimal => format!("{value:x}"),
        }
    }

    /// Parses a run of digits of this format, or `None` if it overflows.
    #[must_use]
    pub fn parse(self, digits: &str) -> Option<u32> {
        u32::from_str_radix(digits, self.radix()).ok()
    }
}

type Predicate = Arc<dyn Fn(char) -> bool + Send + Sync>;

/// A rule writing code points as numerals; see the [module docs](self).
#[derive(Clone)]
pub struct NumericRule {
    prefix: String,
    suffix: String,
    transformation: Transformation,
    format: NumeralFormat,
    min_digits: usize,
    max_digits: usize,
    max_value: u32,
    forced: Predicate,
}

impl NumericRule {
    /// Starts a rule that always escapes the code points matching `forced`.
    ///
    /// A rule whose predicate never matches still decodes its sequences, which
    /// makes it a fallback spelling.
    pub fn builder(forced: impl Fn(char) -> bool + Send + Sync + 'static) -> NumericRuleBuilder {
        NumericRuleBuilder::new(Arc::new(forced))
    }

    fn pad(&self, numeral: String) -> String {
        let len = numeral.chars().count();
        if len >= self.min_digits {
            return numeral;
        }
        let mut padded = "0".repeat(self.min_digits - len);
        padded.push_str(&numeral);
        padded
    }
}

impl fmt::Debug for NumericRule {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("NumericRule")
            .field("prefix", &self.prefix)
            .field("suffix", &self.suffix)
            .field("transformation", &self.transformation)
            .field("format", &self.format)
            .field("min_digits", &self.min_digits)
            .field("max_digits", &self.max_digits)
            .field("max_value", &self.max_value)
            .finish_non_exhaustive()
    }
}

impl EscapeRule for NumericRule {
    fn escape(&self, ch: char, _surrounder: Option<char>) -> Vec<String> {
        if !(self.forced)(ch) {
            return Vec::new();
        }
        self.transformation
            .escape(ch, self.format)
            .into_iter()
            .map(|numeral| {
                let mut fragment = self.prefix.clone();
                fragment.push_str(&self.pad(numeral));
                fragment.push_str(&self.suffix);
                fragment
            })
            .collect()
    }

    fn unescape(
        &self,
        reader: &mut Reader,
        _surrounder: Option<char>,
    ) -> Result<Option<Unescaped>, UnescapeError> {
        let start = reader.index();
        if !reader.try_skip(&self.prefix) {
            return Ok(None);
        }
        let format = self.format;
        let digits = reader.read_while(|ch| format.is_digit(ch), self.min_digits, self.max_digits)?;
        let max = self.max_value.min(self.transformation.max_unit());
        let value = format
            .parse(&digits)
            .filter(|&value| value <= max)
            .ok_or(UnescapeErrorKind::ValueTooLarge { max, digits })?;
        // The prefix alone does not commit to this rule.
        if !reader.try_skip(&self.suffix) {
            reader.set_index(start);
            return Ok(None);
        }
        Ok(Some(self.transformation.decode(value)?))
    }

    fn must_escape(&self, ch: char, _surrounder: Option<char>) -> bool {
        (self.forced)(ch)
    }
}

/// Builder for [`NumericRule`].
///
/// Defaults: no prefix or suffix, [`Transformation::Utf32`],
/// [`NumeralFormat::Decimal`], one digit minimum, no digit maximum, and a
/// maximum value of `U+10FFFF`.
pub struct NumericRuleBuilder {
    prefix: String,
    suffix: String,
    transformation: Transformation,
    format: NumeralFormat,
    min_digits: usize,
    max_digits: usize,
    max_value: u32,
    forced: Predicate,
}

impl NumericRuleBuilder {
    fn new(forced: Predicate) -> Self {
        Self {
            prefix: String::new(),
            suffix: String::new(),
            transformation: Transformation::Utf32,
            format: NumeralFormat::Decimal,
            min_digits: 1,
            max_digits: usize::MAX,
            max_value: u32::from(char::MAX),
            forced,
        }
    }

    /// Literal between the escape prefix and the digits, e.g. `u` in `\u0041`.
    #[must_use]
    pub fn prefix(mut self, prefix: impl Into<String>) -> Self {
        self.prefix = prefix.into();
        self
    }

    /// Literal after the digits, e.g. `}` in `\u{41}`.
    #[must_use]
    pub fn suffix(mut self, suffix: impl Into<String>) -> Self {
        self.suffix = suffix.into();
        self
    }

    /// How code points are split into units.
    #[must_use]
    pub fn transformation(mut self, transformation: Transformation) -> Self {
        self.transformation = transformation;
        self
    }

    /// How each unit is written.
    #[must_use]
    pub fn format(mut self, format: NumeralFormat) -> Self {
        self.format = format;
        self
    }

    /// Exactly `digits` digits.
    #[must_use]
    pub fn digits(mut self, digits: usize) -> Self {
        self.min_digits = digits;
        self.max_digits = digits;
        self
    }

    /// Fewest digits accepted; shorter numerals are zero-padded when escaping.
    #[must_use]
    pub fn min_digits(mut self, digits: usize) -> Self {
        self.min_digits = digits;
        self
    }

    /// Most digits read when unescaping.
    #[must_use]
    pub fn max_digits(mut self, digits: usize) -> Self {
        self.max_digits = digits;
        self
    }

    /// Largest numeral accepted when unescaping.
    #[must_use]
    pub fn max_value(mut self, max_value: u32) -> Self {
        self.max_value = max_value;
        self
    }

    /// Validates the configuration.
    ///
    /// # Errors
    ///
    /// Fails if the maximum value lies above `U+10FFFF`, the minimum digit
    /// count is zero, or the maximum digit count is below the minimum.
    pub fn build(self) -> Result<NumericRule, ConfigError> {
        if self.max_value > u32::from(char::MAX) {
            return Err(ConfigError::MaxValueOutOfRange(self.max_value));
        }
        if self.min_digits < 1 {
            return Err(ConfigError::MinDigitsZero);
        }
        if self.max_digits < self.min_digits {
            return Err(ConfigError::MaxDigitsBelowMin {
                min: self.min_digits,
                max: self.max_digits,
            });
        }
        Ok(NumericRule {
            prefix: self.prefix,
            suffix: self.suffix,
            transformation: self.transformation,
            format: self.format,
            min_digits: self.min_digits,
            max_digits: self.max_digits,
            max_value: self.max_value,
            forced: self.forced,
        })
    }
}

impl fmt::Debug for NumericRuleBuilder {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("NumericRuleBuilder")
            .field("prefix", &self.prefix)
            .field("suffix", &self.suffix)
            .field("transformation", &self.transformation)
            .field("format", &self.format)
            .finish_non_exhaustive()
    }
}
