//! A rule-driven engine for escaping strings into delimited literals and
//! parsing them back.
//!
//! An [`Escaper`] is assembled once from an escape prefix, an optional escape
//! suffix, a set of surrounders (the delimiters that open and close a string)
//! and an ordered list of [`EscapeRule`]s. It then renders arbitrary text into
//! its escaped form with [`Escaper::escape`] and validates and decodes that
//! form with [`Escaper::unescape`]. All positions are code point offsets.
//!
//! ```rust
//! use escapist::dialects;
//!
//! let json = dialects::json();
//! let escaped = json.escape("tab\there");
//! assert_eq!(escaped, r#""tab\there""#);
//! assert_eq!(json.unescape(&escaped).unwrap(), "tab\there");
//! ```

#![no_std]
extern crate alloc;

#[cfg(test)]
extern crate std;

mod diagnostics;
mod error;
mod escaper;
mod options;
mod output;
mod reader;

pub mod dialects;
pub mod rule;

#[cfg(test)]
mod tests;

pub use error::{ConfigError, UnescapeError, UnescapeErrorKind};
pub use escaper::{Escaper, EscaperBuilder};
pub use options::{Consumed, UnescapeContext, UnescapeOptions};
pub use reader::Reader;
pub use rule::{EscapeRule, Unescaped};
