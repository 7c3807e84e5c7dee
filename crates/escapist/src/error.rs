use alloc::string::String;

use thiserror::Error;

/// The single failure type of [`Escaper::unescape`](crate::Escaper::unescape).
///
/// The [`Display`](core::fmt::Display) output is the full diagnostic message,
/// suitable for surfacing directly in a host parser's own error type.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("{kind}")]
pub struct UnescapeError {
    kind: UnescapeErrorKind,
}

impl UnescapeError {
    /// What went wrong.
    #[must_use]
    pub fn kind(&self) -> &UnescapeErrorKind {
        &self.kind
    }

    /// The code point offset the failure was detected at, when one applies.
    #[must_use]
    pub fn position(&self) -> Option<usize> {
        match self.kind {
            UnescapeErrorKind::MustBeEscaped { position, .. }
            | UnescapeErrorKind::InvalidEscape { position, .. }
            | UnescapeErrorKind::MissingSuffix { position, .. }
            | UnescapeErrorKind::TrailingInput { position, .. } => Some(position),
            _ => None,
        }
    }
}

impl From<UnescapeErrorKind> for UnescapeError {
    fn from(kind: UnescapeErrorKind) -> Self {
        Self { kind }
    }
}

/// Categories of unescape failures.
///
/// Fields holding characters from the input carry them already rendered
/// through the diagnostic escaper, so control characters never reach the
/// message verbatim.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[non_exhaustive]
#[allow(missing_docs)]
pub enum UnescapeErrorKind {
    #[error("expected surrounder to start a string")]
    MissingOpeningSurrounder,
    #[error(
        "character {character} with code point {code_point} should be escaped at position {position}: {excerpt}"
    )]
    MustBeEscaped {
        character: String,
        code_point: u32,
        position: usize,
        excerpt: String,
    },
    #[error("invalid escape sequence {sequence} at position {position}")]
    InvalidEscape { sequence: String, position: usize },
    #[error("sequence must be at least {min} code points long, got {found} instead: {read}")]
    SequenceTooShort {
        min: usize,
        found: usize,
        read: String,
    },
    #[error("code point must be at most {max}: {digits}")]
    ValueTooLarge { max: u32, digits: String },
    #[error("escaped value {value:#x} is not a Unicode scalar value")]
    InvalidCodePoint { value: u32 },
    #[error("unpaired UTF-16 surrogate {unit:#06x}")]
    UnpairedSurrogate { unit: u16 },
    #[error("unclosed string, expected {surrounder} to close the string")]
    UnclosedString { surrounder: String },
    #[error(
        "expected {suffix} to end an escape sequence at position {position}, found {found}: {excerpt}"
    )]
    MissingSuffix {
        suffix: String,
        found: String,
        position: usize,
        excerpt: String,
    },
    #[error("expected {suffix} to end an escape sequence at end of string")]
    MissingSuffixAtEnd { suffix: String },
    #[error("ended string with an incomplete escape sequence")]
    IncompleteEscape,
    #[error("trailing characters found in string at code point {position}: {excerpt}")]
    TrailingInput { position: usize, excerpt: String },
}

/// Invalid configuration passed to a rule builder.
#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
#[allow(missing_docs)]
pub enum ConfigError {
    #[error("code point {0:#x} is above the maximum {max:#x}", max = u32::from(char::MAX))]
    MaxValueOutOfRange(u32),
    #[error("minimum digit count must be at least 1")]
    MinDigitsZero,
    #[error("maximum digit count {max} is below the minimum digit count {min}")]
    MaxDigitsBelowMin { min: usize, max: usize },
}
