//! The escaper and its unescape state machine.
//!
//! Unescaping walks the code points of the input through these states:
//!
//! ```text
//! StartString -> None <-> StartEscape -> EndEscape -> None -> ... -> EndString
//! ```
//!
//! - `StartString`: the first code point must be a surrounder (if any are
//!   configured); it becomes the active surrounder and is not emitted.
//! - `None`: plain content. The escape prefix moves to `StartEscape`, the
//!   active surrounder ends the string, anything a rule insists on escaping
//!   is rejected, and everything else is copied.
//! - `StartEscape`: the first rule to decode the sequence wins.
//! - `EndEscape`: the configured suffix must follow.
//!
//! Scanning stops at `EndString` or at the end of input; what happens next
//! depends on the state it stopped in (see [`Escaper::unescape_with`]).

use alloc::{boxed::Box, string::String, vec::Vec};

use tracing::{debug, trace};

use crate::{
    diagnostics,
    error::{UnescapeError, UnescapeErrorKind},
    options::{Consumed, UnescapeContext, UnescapeOptions},
    output::OutputBuffer,
    reader::Reader,
    rule::{EscapeRule, LiteralRule, SurrounderRule, Unescaped},
};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum EscapeState {
    StartString,
    None,
    StartEscape,
    EndEscape,
    EndString,
}

/// An immutable escaping configuration.
///
/// Build one with [`Escaper::builder`] and share it freely; every call works
/// on its own copy of the input.
#[derive(Debug)]
pub struct Escaper {
    prefix: char,
    suffix: Option<char>,
    surrounders: Vec<char>,
    rules: Vec<Box<dyn EscapeRule>>,
}

impl Escaper {
    /// Starts an escaper whose escape sequences begin with `prefix`, and which
    /// escapes `prefix` itself as `prefix` followed by `prefix_literal`.
    pub fn builder(prefix: char, prefix_literal: impl Into<String>) -> EscaperBuilder {
        EscaperBuilder {
            prefix,
            prefix_literal: prefix_literal.into(),
            suffix: None,
            surrounders: Vec::new(),
            strict_surrounders: false,
            rules: Vec::new(),
        }
    }

    /// The code point that opens every escape sequence.
    #[must_use]
    pub fn prefix(&self) -> char {
        self.prefix
    }

    /// The code point that closes every escape sequence, if any.
    #[must_use]
    pub fn suffix(&self) -> Option<char> {
        self.suffix
    }

    /// Configured surrounders in registration order; the first one wraps
    /// escaped output.
    #[must_use]
    pub fn surrounders(&self) -> &[char] {
        &self.surrounders
    }

    /// The complete rule list in evaluation order, including the rules the
    /// builder adds for surrounders and the prefix.
    #[must_use]
    pub fn rules(&self) -> &[Box<dyn EscapeRule>] {
        &self.rules
    }

    /// Escapes `text` and wraps it in the canonical surrounder, if any.
    #[must_use]
    pub fn escape(&self, text: &str) -> String {
        let surrounder = self.surrounders.first().copied();
        let mut out = String::with_capacity(text.len() + 2);
        out.extend(surrounder);
        for ch in text.chars() {
            self.push_escaped(&mut out, ch, surrounder);
        }
        out.extend(surrounder);
        out
    }

    /// Escapes one code point as it would appear inside a string delimited by
    /// `surrounder`, without any delimiters.
    #[must_use]
    pub fn escape_single_unit(&self, ch: char, surrounder: Option<char>) -> String {
        let mut out = String::new();
        self.push_escaped(&mut out, ch, surrounder);
        out
    }

    /// Escapes one code point outside of any string.
    #[must_use]
    pub fn escape_char(&self, ch: char) -> String {
        self.escape_single_unit(ch, None)
    }

    pub(crate) fn push_escaped(&self, out: &mut String, ch: char, surrounder: Option<char>) {
        for rule in &self.rules {
            let fragments = rule.escape(ch, surrounder);
            if fragments.is_empty() {
                continue;
            }
            for fragment in fragments {
                out.push(self.prefix);
                out.push_str(&fragment);
                out.extend(self.suffix);
            }
            return;
        }
        out.push(ch);
    }

    /// Unescapes a complete escaped string.
    ///
    /// # Errors
    ///
    /// See [`unescape_with`](Self::unescape_with); trailing input is an error.
    pub fn unescape(&self, text: &str) -> Result<String, UnescapeError> {
        self.unescape_with(text, UnescapeContext::default())
    }

    /// Unescapes `text` under `context`, reporting consumption to its
    /// callback on success.
    ///
    /// # Errors
    ///
    /// - The input does not open with a surrounder, or is empty when
    ///   surrounders are configured.
    /// - A character that must be escaped appears verbatim.
    /// - No rule decodes an escape sequence, or a rule rejects one.
    /// - The string or the last escape sequence is never closed.
    /// - Input continues after the string and `context` forbids it.
    pub fn unescape_with<F>(
        &self,
        text: &str,
        context: UnescapeContext<F>,
    ) -> Result<String, UnescapeError>
    where
        F: FnOnce(Consumed),
    {
        let UnescapeContext {
            options,
            on_complete,
        } = context;
        match self.scan(text, options) {
            Ok((value, consumed)) => {
                on_complete(consumed);
                Ok(value)
            }
            Err(err) => {
                debug!(kind = ?err.kind(), position = ?err.position(), "unescape failed");
                #[cfg(any(test, feature = "fuzzing"))]
                {
                    if options.panic_on_error {
                        panic!("unescape failed: {err}");
                    }
                }
                Err(err)
            }
        }
    }

    /// Reads an escaped string that starts at byte offset `*cursor` of
    /// `input`, leaving whatever follows it for the caller.
    ///
    /// On success `*cursor` is advanced past the string; on failure it is
    /// left untouched.
    ///
    /// # Errors
    ///
    /// As [`unescape_with`](Self::unescape_with), with trailing input allowed.
    /// A cursor that is not on a character boundary reads as empty input.
    pub fn read_at(&self, input: &str, cursor: &mut usize) -> Result<String, UnescapeError> {
        let rest = input.get(*cursor..).unwrap_or_default();
        let options = UnescapeOptions {
            allow_trailing: true,
            ..UnescapeOptions::default()
        };
        let mut consumed_bytes = 0;
        let value = self.unescape_with(
            rest,
            UnescapeContext::with_callback(options, |consumed: Consumed| {
                consumed_bytes = consumed.bytes;
            }),
        )?;
        *cursor += consumed_bytes;
        Ok(value)
    }

    fn scan(&self, text: &str, options: UnescapeOptions) -> Result<(String, Consumed), UnescapeError> {
        let mut reader = Reader::new(text);
        let mut out = OutputBuffer::new();
        let mut state = EscapeState::StartString;
        let mut surrounder = None;

        while let Some(ch) = reader.peek() {
            let position = reader.index();
            match state {
                EscapeState::StartString => {
                    state = EscapeState::None;
                    if !self.surrounders.is_empty() {
                        if !self.surrounders.contains(&ch) {
                            return Err(UnescapeErrorKind::MissingOpeningSurrounder.into());
                        }
                        surrounder = Some(ch);
                        reader.skip();
                        continue;
                    }
                    // Unsurrounded: the first code point is plain content.
                }
                EscapeState::StartEscape => {
                    let unescaped = self.unescape_sequence(&mut reader, surrounder, ch, position)?;
                    out.push(unescaped)?;
                    state = if self.suffix.is_some() {
                        EscapeState::EndEscape
                    } else {
                        EscapeState::None
                    };
                    continue;
                }
                EscapeState::EndEscape => {
                    if Some(ch) != self.suffix {
                        return Err(UnescapeErrorKind::MissingSuffix {
                            suffix: diagnostics::describe_all([self.suffix]),
                            found: diagnostics::describe(ch),
                            position,
                            excerpt: reader.excerpt(position),
                        }
                        .into());
                    }
                    reader.skip();
                    state = EscapeState::None;
                    continue;
                }
                EscapeState::None | EscapeState::EndString => {}
            }

            reader.skip();
            if ch == self.prefix {
                state = EscapeState::StartEscape;
                continue;
            }
            if surrounder == Some(ch) {
                state = EscapeState::EndString;
                break;
            }
            if self.must_escape(ch, surrounder) {
                return Err(UnescapeErrorKind::MustBeEscaped {
                    character: diagnostics::describe(ch),
                    code_point: u32::from(ch),
                    position,
                    excerpt: reader.excerpt(position),
                }
                .into());
            }
            out.push_char(ch)?;
        }

        let consumed = reader.index().min(reader.len());
        if !options.allow_trailing && consumed < reader.len() {
            return Err(UnescapeErrorKind::TrailingInput {
                position: consumed,
                excerpt: reader.excerpt(consumed),
            }
            .into());
        }

        match state {
            EscapeState::StartString if !self.surrounders.is_empty() => {
                return Err(UnescapeErrorKind::MissingOpeningSurrounder.into());
            }
            EscapeState::None => {
                if let Some(surrounder) = surrounder {
                    return Err(UnescapeErrorKind::UnclosedString {
                        surrounder: diagnostics::describe(surrounder),
                    }
                    .into());
                }
            }
            EscapeState::StartEscape => return Err(UnescapeErrorKind::IncompleteEscape.into()),
            EscapeState::EndEscape => {
                return Err(UnescapeErrorKind::MissingSuffixAtEnd {
                    suffix: diagnostics::describe_all([self.suffix]),
                }
                .into());
            }
            EscapeState::StartString | EscapeState::EndString => {}
        }

        let value = out.finish()?;
        Ok((value, Consumed::of(&reader.code_points()[..consumed])))
    }

    fn unescape_sequence(
        &self,
        reader: &mut Reader,
        surrounder: Option<char>,
        ch: char,
        position: usize,
    ) -> Result<Unescaped, UnescapeError> {
        for (index, rule) in self.rules.iter().enumerate() {
            if let Some(unescaped) = rule.unescape(reader, surrounder)? {
                trace!(rule = index, position, "escape sequence matched");
                return Ok(unescaped);
            }
        }
        Err(UnescapeErrorKind::InvalidEscape {
            sequence: diagnostics::describe_all([Some(self.prefix), Some(ch), self.suffix]),
            position,
        }
        .into())
    }

    fn must_escape(&self, ch: char, surrounder: Option<char>) -> bool {
        self.rules
            .iter()
            .any(|rule| rule.must_escape(ch, surrounder))
    }
}

/// Accumulates an [`Escaper`]'s configuration.
///
/// [`build`](Self::build) places the rules in a fixed order: surrounder
/// escapes first, then the escape for the prefix itself, then the rules
/// added with [`rule`](Self::rule) in the order they were added.
#[derive(Debug)]
pub struct EscaperBuilder {
    prefix: char,
    prefix_literal: String,
    suffix: Option<char>,
    surrounders: Vec<(char, String)>,
    strict_surrounders: bool,
    rules: Vec<Box<dyn EscapeRule>>,
}

impl EscaperBuilder {
    /// Ends every escape sequence with `suffix`.
    #[must_use]
    pub fn suffix(mut self, suffix: char) -> Self {
        self.suffix = Some(suffix);
        self
    }

    /// Registers a delimiter and the literal it is escaped as. Registering
    /// the same delimiter again replaces its literal but keeps its position.
    #[must_use]
    pub fn surrounder(mut self, surrounder: char, literal: impl Into<String>) -> Self {
        let literal = literal.into();
        match self.surrounders.iter_mut().find(|(ch, _)| *ch == surrounder) {
            Some(entry) => entry.1 = literal,
            None => self.surrounders.push((surrounder, literal)),
        }
        self
    }

    /// Escapes a surrounder only inside strings it delimits, instead of
    /// escaping every surrounder everywhere.
    #[must_use]
    pub fn strict_surrounders(mut self) -> Self {
        self.strict_surrounders = true;
        self
    }

    /// Appends a rule after all rules added so far.
    #[must_use]
    pub fn rule(mut self, rule: impl EscapeRule + 'static) -> Self {
        self.rules.push(Box::new(rule));
        self
    }

    /// Assembles the final rule list.
    #[must_use]
    pub fn build(self) -> Escaper {
        let mut rules: Vec<Box<dyn EscapeRule>> =
            Vec::with_capacity(self.surrounders.len() + self.rules.len() + 1);
        if self.strict_surrounders {
            rules.push(Box::new(
                self.surrounders
                    .iter()
                    .cloned()
                    .collect::<SurrounderRule>(),
            ));
        } else {
            for (surrounder, literal) in &self.surrounders {
                rules.push(Box::new(LiteralRule::always(*surrounder, literal.clone())));
            }
        }
        rules.push(Box::new(LiteralRule::always(self.prefix, self.prefix_literal)));
        rules.extend(self.rules);

        debug!(
            rules = rules.len(),
            surrounders = self.surrounders.len(),
            strict = self.strict_surrounders,
            "built escaper"
        );
        Escaper {
            prefix: self.prefix,
            suffix: self.suffix,
            surrounders: self.surrounders.into_iter().map(|(ch, _)| ch).collect(),
            rules,
        }
    }
}
