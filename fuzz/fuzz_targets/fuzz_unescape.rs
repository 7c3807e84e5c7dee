#![no_main]
use arbitrary::Arbitrary;
use escapist::{Consumed, Escaper, UnescapeContext, UnescapeOptions, dialects};
use libfuzzer_sys::fuzz_target;

#[derive(Debug, Arbitrary)]
enum Dialect {
    Json,
    Java,
    DualQuote,
    Diagnostic,
}

impl Dialect {
    fn escaper(&self) -> &'static Escaper {
        match self {
            Self::Json => dialects::json(),
            Self::Java => dialects::java(),
            Self::DualQuote => dialects::dual_quote(),
            Self::Diagnostic => dialects::diagnostic(),
        }
    }
}

#[derive(Debug, Arbitrary)]
struct Input {
    dialect: Dialect,
    allow_trailing: bool,
    /// Fed to the unescaper as-is.
    escaped: String,
    /// Escaped first, then unescaped again.
    plain: String,
}

fn unescape(input: &Input) {
    let escaper = input.dialect.escaper();

    let options = UnescapeOptions {
        allow_trailing: input.allow_trailing,
        panic_on_error: false,
    };
    let mut consumed = None;
    let result = escaper.unescape_with(
        &input.escaped,
        UnescapeContext::with_callback(options, |report: Consumed| consumed = Some(report)),
    );
    match &result {
        Ok(_) => {
            let consumed = consumed.expect("callback runs on success");
            assert!(consumed.bytes <= input.escaped.len());
            assert!(input.escaped.is_char_boundary(consumed.bytes));
            if !input.allow_trailing {
                assert_eq!(consumed.bytes, input.escaped.len());
            }
        }
        Err(_) => assert!(consumed.is_none()),
    }

    // Anything the JSON dialect accepts in full is valid JSON with the same
    // value.
    if matches!(input.dialect, Dialect::Json) && !input.allow_trailing {
        if let Ok(value) = &result {
            let oracle: String = serde_json::from_str(&input.escaped).expect("valid JSON string");
            assert_eq!(&oracle, value);
        }
    }

    let escaped = escaper.escape(&input.plain);
    assert_eq!(escaper.unescape(&escaped).as_deref(), Ok(input.plain.as_str()));
}

fuzz_target!(|input: Input| unescape(&input));
