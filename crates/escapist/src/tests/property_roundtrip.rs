use alloc::{format, string::String};

use quickcheck::QuickCheck;

use crate::{Escaper, dialects};

fn tests() -> u64 {
    #[cfg(not(miri))]
    let tests = if cfg!(feature = "test-fast") {
        100
    } else if is_ci::cached() {
        10_000
    } else {
        1_000
    };
    #[cfg(miri)]
    let tests = 10;
    tests
}

fn roundtrips(escaper: &Escaper, text: &str) -> bool {
    escaper.unescape(&escaper.escape(text)).as_deref() == Ok(text)
}

/// Property: unescaping the escaped form of any text yields the text, in
/// every built-in dialect.
#[test]
fn escape_then_unescape_is_identity() {
    #[allow(clippy::needless_pass_by_value)]
    fn prop(text: String) -> bool {
        roundtrips(dialects::json(), &text)
            && roundtrips(dialects::java(), &text)
            && roundtrips(dialects::dual_quote(), &text)
            && roundtrips(dialects::diagnostic(), &text)
    }

    QuickCheck::new()
        .tests(tests())
        .quickcheck(prop as fn(String) -> bool);
}

/// Property: a string followed by arbitrary text is read up to its closing
/// surrounder and no further.
#[test]
fn read_at_stops_after_closing_surrounder() {
    #[allow(clippy::needless_pass_by_value)]
    fn prop(text: String, tail: String) -> bool {
        let escaper = dialects::json();
        let escaped = escaper.escape(&text);
        let input = format!("{escaped}{tail}");
        let mut cursor = 0;
        escaper.read_at(&input, &mut cursor).as_deref() == Ok(text.as_str())
            && cursor == escaped.len()
    }

    QuickCheck::new()
        .tests(tests())
        .quickcheck(prop as fn(String, String) -> bool);
}

/// Property: escaped output never contains a character verbatim where the
/// escaper would reject it.
#[test]
fn escaped_json_has_no_raw_controls() {
    #[allow(clippy::needless_pass_by_value)]
    fn prop(text: String) -> bool {
        let escaped = dialects::json().escape(&text);
        !escaped.chars().any(char::is_control)
    }

    QuickCheck::new()
        .tests(tests())
        .quickcheck(prop as fn(String) -> bool);
}
