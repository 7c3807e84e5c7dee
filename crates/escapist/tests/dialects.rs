#![expect(missing_docs)]

use escapist::{UnescapeErrorKind, dialects};
use quickcheck::QuickCheck;
use quickcheck_macros::quickcheck;
use rstest::rstest;

fn tests() -> u64 {
    if cfg!(feature = "test-fast") {
        100
    } else if is_ci::cached() {
        10_000
    } else {
        1_000
    }
}

#[test]
fn json_escape_is_read_by_serde_json() {
    #[allow(clippy::needless_pass_by_value)]
    fn prop(text: String) -> bool {
        let escaped = dialects::json().escape(&text);
        serde_json::from_str::<String>(&escaped).ok().as_deref() == Some(text.as_str())
    }

    QuickCheck::new()
        .tests(tests())
        .quickcheck(prop as fn(String) -> bool);
}

#[test]
fn json_unescape_reads_serde_json_output() {
    #[allow(clippy::needless_pass_by_value)]
    fn prop(text: String) -> bool {
        // serde_json writes DEL and the C1 controls verbatim, which this
        // dialect insists on escaping.
        let text: String = text
            .chars()
            .filter(|&ch| !('\u{7f}'..='\u{9f}').contains(&ch))
            .collect();
        let Ok(encoded) = serde_json::to_string(&text) else {
            return false;
        };
        dialects::json().unescape(&encoded).as_deref() == Ok(text.as_str())
    }

    QuickCheck::new()
        .tests(tests())
        .quickcheck(prop as fn(String) -> bool);
}

#[rstest]
#[case::plain(r#""hello""#, "hello")]
#[case::short_forms(r#""\b\f\n\r\t\"\\\/""#, "\u{8}\u{c}\n\r\t\"\\/")]
#[case::lowercase_hex(r#""\u00e9""#, "\u{e9}")]
#[case::uppercase_hex(r#""\u00E9""#, "\u{e9}")]
#[case::surrogate_pair(r#""\ud83d\ude0a""#, "\u{1f60a}")]
fn json_unescape(#[case] input: &str, #[case] expected: &str) {
    assert_eq!(dialects::json().unescape(input).unwrap(), expected);
}

#[rstest]
#[case::control("\u{1}", r#""\u0001""#)]
#[case::del("\u{7f}", r#""\u007f""#)]
#[case::c1("\u{85}", r#""\u0085""#)]
#[case::quote_and_backslash("\"\\", r#""\"\\""#)]
#[case::emoji("\u{1f60a}", "\"\u{1f60a}\"")]
fn json_escape(#[case] input: &str, #[case] expected: &str) {
    assert_eq!(dialects::json().escape(input), expected);
}

#[test]
fn json_rejects_lone_surrogate() {
    let err = dialects::json().unescape(r#""\ud83d""#).unwrap_err();
    assert_eq!(
        err.kind(),
        &UnescapeErrorKind::UnpairedSurrogate { unit: 0xd83d }
    );
}

#[test]
fn json_rejects_short_unicode_escape() {
    let err = dialects::json().unescape(r#""\u12""#).unwrap_err();
    assert!(matches!(
        err.kind(),
        UnescapeErrorKind::SequenceTooShort { min: 4, found: 2, .. }
    ));
}

#[test]
fn json_rejects_raw_newline() {
    let err = dialects::json().unescape("\"a\nb\"").unwrap_err();
    assert!(matches!(
        err.kind(),
        UnescapeErrorKind::MustBeEscaped { code_point: 10, position: 2, .. }
    ));
}

#[rstest]
#[case::single_digit(r#""\7""#, "\u{7}")]
#[case::letter(r#""\101""#, "A")]
#[case::utf8_sequence(r#""\342\202\254""#, "\u{20ac}")]
#[case::lone_high_byte(r#""\351""#, "\u{e9}")]
#[case::space(r#""a\sb""#, "a b")]
#[case::apostrophe(r#""\'""#, "'")]
fn java_unescape(#[case] input: &str, #[case] expected: &str) {
    assert_eq!(dialects::java().unescape(input).unwrap(), expected);
}

#[test]
fn java_rejects_octal_above_a_byte() {
    let err = dialects::java().unescape(r#""\777""#).unwrap_err();
    assert!(matches!(
        err.kind(),
        UnescapeErrorKind::ValueTooLarge { max: 255, digits } if digits == "777"
    ));
}

#[test]
fn java_does_not_escape_with_octal() {
    assert_eq!(dialects::java().escape("\u{0}"), r#""\u0000""#);
}

#[rstest]
#[case::single_quoted(r#"'a"b'"#, "a\"b")]
#[case::double_quoted(r#""a'b""#, "a'b")]
#[case::escaped_active_single(r#"'a\'b'"#, "a'b")]
#[case::escaped_active_double(r#""a\"b""#, "a\"b")]
fn dual_quote_unescape(#[case] input: &str, #[case] expected: &str) {
    assert_eq!(dialects::dual_quote().unescape(input).unwrap(), expected);
}

#[rstest]
#[case::inactive_single_escaped(r#""a\'b""#)]
#[case::inactive_double_escaped(r#"'a\"b'"#)]
fn dual_quote_rejects_escaped_inactive_quote(#[case] input: &str) {
    let err = dialects::dual_quote().unescape(input).unwrap_err();
    assert!(matches!(
        err.kind(),
        UnescapeErrorKind::InvalidEscape { position: 3, .. }
    ));
}

#[test]
fn dual_quote_rejects_other_delimiters() {
    let err = dialects::dual_quote().unescape("`a`").unwrap_err();
    assert_eq!(err.kind(), &UnescapeErrorKind::MissingOpeningSurrounder);
}

/// Strings escaped for the `"` delimiter leave `'` verbatim and still read
/// back, even though escaped output is normally wrapped in `'`.
#[quickcheck]
#[allow(clippy::needless_pass_by_value)]
fn dual_quote_reads_text_escaped_for_double_quotes(text: String) -> bool {
    let escaper = dialects::dual_quote();
    let mut escaped = String::from('"');
    for ch in text.chars() {
        escaped.push_str(&escaper.escape_single_unit(ch, Some('"')));
    }
    escaped.push('"');
    escaper.unescape(&escaped).as_deref() == Ok(text.as_str())
}
