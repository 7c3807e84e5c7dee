//! Ready-made escapers for common string syntaxes.
//!
//! Each dialect is built on first use and shared for the life of the
//! program.
//!
//! | Dialect          | Surrounders | Escapes written                      | Also accepted        |
//! |------------------|-------------|--------------------------------------|----------------------|
//! | [`json`]         | `"`         | `\"` `\\` `\b` `\f` `\n` `\r` `\t` `\uXXXX` | `\/`          |
//! | [`java`]         | `"`         | as JSON                              | `\'` `\s` `\0`-`\377` |
//! | [`dual_quote`]   | `'` `"`     | the active quote and `\\`            |                      |
//! | [`diagnostic`]   | none        | `\\` `\b` `\f` `\n` `\r` `\t` `\uXXXX` |                    |

use alloc::boxed::Box;

use once_cell::race::OnceBox;

use crate::{
    escaper::{Escaper, EscaperBuilder},
    rule::{LiteralRule, NumeralFormat, NumericRule, Transformation},
};

static JSON: OnceBox<Escaper> = OnceBox::new();
static JAVA: OnceBox<Escaper> = OnceBox::new();
static DUAL_QUOTE: OnceBox<Escaper> = OnceBox::new();
static DIAGNOSTIC: OnceBox<Escaper> = OnceBox::new();

/// JSON string literals.
///
/// Control characters without a short form are written as `\uXXXX`, with
/// supplementary characters as surrogate pairs.
///
/// ```rust
/// let json = escapist::dialects::json();
/// assert_eq!(json.escape("a\u{1}"), r#""a\u0001""#);
/// assert_eq!(json.unescape(r#""😊\/""#).unwrap(), "\u{1f60a}/");
/// ```
pub fn json() -> &'static Escaper {
    JSON.get_or_init(|| {
        Box::new(
            Escaper::builder('\\', "\\")
                .surrounder('"', "\"")
                .rule(LiteralRule::optional('/', "/"))
                .short_controls()
                .rule(utf16_hex_rule())
                .build(),
        )
    })
}

/// Java string literals, including octal escapes of single bytes.
///
/// Octal escapes decode to UTF-8 bytes, so `\303\251` reads as `é`.
/// Consecutive octal bytes are combined into one character where they form
/// valid UTF-8, instead of each byte being read as its own Latin-1 character.
pub fn java() -> &'static Escaper {
    JAVA.get_or_init(|| {
        let octal = NumericRule::builder(|_| false)
            .transformation(Transformation::Utf8)
            .format(NumeralFormat::Octal)
            .min_digits(1)
            .max_digits(3)
            .max_value(0o377)
            .build()
            .expect("octal byte escape is a valid numeric rule");
        Box::new(
            Escaper::builder('\\', "\\")
                .surrounder('"', "\"")
                .rule(LiteralRule::optional('\'', "'"))
                .short_controls()
                .rule(LiteralRule::optional(' ', "s"))
                .rule(utf16_hex_rule())
                .rule(octal)
                .build(),
        )
    })
}

/// Strings delimited by either `'` or `"`.
///
/// Only the quote that opened a string needs escaping inside it. Escaped
/// output is wrapped in `'`.
pub fn dual_quote() -> &'static Escaper {
    DUAL_QUOTE.get_or_init(|| {
        Box::new(
            Escaper::builder('\\', "\\")
                .surrounder('\'', "'")
                .surrounder('"', "\"")
                .strict_surrounders()
                .build(),
        )
    })
}

/// Unsurrounded escaping used when quoting input in error messages.
pub fn diagnostic() -> &'static Escaper {
    DIAGNOSTIC.get_or_init(|| {
        Box::new(
            Escaper::builder('\\', "\\")
                .short_controls()
                .rule(utf16_hex_rule())
                .build(),
        )
    })
}

fn utf16_hex_rule() -> NumericRule {
    NumericRule::builder(char::is_control)
        .prefix("u")
        .transformation(Transformation::Utf16)
        .format(NumeralFormat::Hexadecimal)
        .digits(4)
        .build()
        .expect("four digit UTF-16 escape is a valid numeric rule")
}

impl EscaperBuilder {
    fn short_controls(self) -> Self {
        self.rule(LiteralRule::always('\u{8}', "b"))
            .rule(LiteralRule::always('\u{c}', "f"))
            .rule(LiteralRule::always('\n', "n"))
            .rule(LiteralRule::always('\r', "r"))
            .rule(LiteralRule::always('\t', "t"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn dialects_are_built_once() {
        assert!(core::ptr::eq(json(), json()));
        assert!(core::ptr::eq(diagnostic(), diagnostic()));
    }

    #[test]
    fn json_prefers_short_forms() {
        assert_eq!(json().escape("\u{8}\u{c}\n\r\t"), r#""\b\f\n\r\t""#);
    }

    #[test]
    fn json_leaves_solidus_verbatim() {
        assert_eq!(json().escape("a/b"), r#""a/b""#);
    }

    #[test]
    fn java_reads_octal_bytes() {
        assert_eq!(java().unescape(r#""\101\0""#).unwrap(), "A\0");
        assert_eq!(java().unescape(r#""\303\251""#).unwrap(), "\u{e9}");
    }

    #[test]
    fn java_octal_reads_at_most_three_digits() {
        assert_eq!(java().unescape(r#""\1011""#).unwrap(), "A1");
    }

    #[test]
    fn java_accepts_space_and_apostrophe() {
        assert_eq!(java().unescape(r#""it\'s\sfine""#).unwrap(), "it's fine");
    }

    #[test]
    fn dual_quote_escapes_only_active_quote() {
        assert_eq!(dual_quote().escape("say \"hi\" it's"), r#"'say "hi" it\'s'"#);
        assert_eq!(dual_quote().unescape(r#""it's \"x\"""#).unwrap(), "it's \"x\"");
    }

    #[test]
    fn diagnostic_is_unsurrounded() {
        assert_eq!(diagnostic().escape("a\u{1}\\"), "a\\u0001\\\\");
        assert!(diagnostic().surrounders().is_empty());
    }
}
