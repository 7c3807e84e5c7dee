//! Splits a command line into arguments, where an argument is either a bare
//! word or a dual-quoted string with backslash escapes.
//!
//! The splitter owns the cursor. Whenever it sees a quote it hands the rest
//! of the line to [`Escaper::read_at`], which decodes exactly one string and
//! moves the cursor past it.
//!
//! Run with
//!
//! ```bash
//! cargo run -p escapist --example command_line -- 'say "hello, \"world\"" '\''it\'\''s'\'' done'
//! ```
//!
//! Without arguments a built-in line is split.
#![allow(missing_docs)]

use std::{env, process::ExitCode};

use escapist::{Escaper, UnescapeError, dialects};

fn split(escaper: &Escaper, line: &str) -> Result<Vec<String>, UnescapeError> {
    let mut args = Vec::new();
    let mut cursor = 0;
    while let Some(offset) = line[cursor..].find(|ch: char| !ch.is_whitespace()) {
        cursor += offset;
        let rest = &line[cursor..];
        if rest.starts_with(escaper.surrounders()) {
            args.push(escaper.read_at(line, &mut cursor)?);
        } else {
            let end = rest.find(char::is_whitespace).unwrap_or(rest.len());
            args.push(rest[..end].to_owned());
            cursor += end;
        }
    }
    Ok(args)
}

fn main() -> ExitCode {
    let line = env::args().skip(1).collect::<Vec<_>>().join(" ");
    let line = if line.is_empty() {
        String::from(r#"cp 'my file.txt' "backup\\copy of \"my file\".txt" --verbose"#)
    } else {
        line
    };

    let escaper = dialects::dual_quote();
    match split(escaper, &line) {
        Ok(args) => {
            for (index, arg) in args.iter().enumerate() {
                println!("{index}: {arg}");
                println!("   re-escaped: {}", escaper.escape(arg));
            }
            ExitCode::SUCCESS
        }
        Err(err) => {
            eprintln!("error: {err}");
            ExitCode::FAILURE
        }
    }
}
