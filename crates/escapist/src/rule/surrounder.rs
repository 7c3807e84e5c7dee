use alloc::{string::String, vec, vec::Vec};

use super::{EscapeRule, Unescaped};
use crate::{error::UnescapeError, reader::Reader};

/// Escapes a surrounder only inside a string that it delimits.
///
/// With `'` and `"` registered, a `"` inside a `'...'` string stays verbatim
/// while a `'` must be escaped, and vice versa.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SurrounderRule {
    literals: Vec<(char, String)>,
}

impl SurrounderRule {
    /// A rule with no surrounders registered.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers `literal` as the escaped spelling of `surrounder`, replacing
    /// any earlier registration of the same surrounder.
    #[must_use]
    pub fn with(mut self, surrounder: char, literal: impl Into<String>) -> Self {
        let literal = literal.into();
        match self.literals.iter_mut().find(|(ch, _)| *ch == surrounder) {
            Some(entry) => entry.1 = literal,
            None => self.literals.push((surrounder, literal)),
        }
        self
    }

    fn literal_for(&self, surrounder: char) -> Option<&str> {
        self.literals
            .iter()
            .find(|(ch, _)| *ch == surrounder)
            .map(|(_, literal)| literal.as_str())
    }
}

impl<S: Into<String>> FromIterator<(char, S)> for SurrounderRule {
    fn from_iter<I: IntoIterator<Item = (char, S)>>(iter: I) -> Self {
        iter.into_iter()
            .fold(Self::new(), |rule, (ch, literal)| rule.with(ch, literal))
    }
}

impl EscapeRule for SurrounderRule {
    fn escape(&self, ch: char, surrounder: Option<char>) -> Vec<String> {
        match surrounder {
            Some(active) if active == ch => self
                .literal_for(active)
                .map(|literal| vec![String::from(literal)])
                .unwrap_or_default(),
            _ => Vec::new(),
        }
    }

    fn unescape(
        &self,
        reader: &mut Reader,
        surrounder: Option<char>,
    ) -> Result<Option<Unescaped>, UnescapeError> {
        let Some(active) = surrounder else {
            return Ok(None);
        };
        Ok(self
            .literal_for(active)
            .filter(|literal| reader.try_skip(literal))
            .map(|_| Unescaped::Char(active)))
    }

    fn must_escape(&self, ch: char, surrounder: Option<char>) -> bool {
        surrounder == Some(ch) && self.literal_for(ch).is_some()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn quotes() -> SurrounderRule {
        SurrounderRule::new().with('\'', "'").with('"', "\"")
    }

    #[test]
    fn escapes_only_the_active_surrounder() {
        let rule = quotes();
        assert_eq!(rule.escape('\'', Some('\'')), vec![String::from("'")]);
        assert!(rule.escape('"', Some('\'')).is_empty());
        assert!(rule.escape('\'', None).is_empty());
    }

    #[test]
    fn unregistered_active_surrounder_is_ignored() {
        let rule = quotes();
        assert!(rule.escape('`', Some('`')).is_empty());
        assert!(!rule.must_escape('`', Some('`')));
    }

    #[test]
    fn must_escape_follows_active_surrounder() {
        let rule = quotes();
        assert!(rule.must_escape('"', Some('"')));
        assert!(!rule.must_escape('"', Some('\'')));
        assert!(!rule.must_escape('"', None));
    }

    #[test]
    fn unescapes_only_the_active_spelling() {
        let rule = quotes();

        let mut reader = Reader::new("'");
        assert_eq!(
            rule.unescape(&mut reader, Some('\'')).unwrap(),
            Some(Unescaped::Char('\''))
        );
        assert_eq!(reader.index(), 1);

        let mut reader = Reader::new("'");
        assert_eq!(rule.unescape(&mut reader, Some('"')).unwrap(), None);
        assert_eq!(reader.index(), 0);

        let mut reader = Reader::new("'");
        assert_eq!(rule.unescape(&mut reader, None).unwrap(), None);
    }

    #[test]
    fn later_registration_replaces_literal() {
        let rule: SurrounderRule = [('\'', "q"), ('\'', "Q")].into_iter().collect();
        assert_eq!(rule.escape('\'', Some('\'')), vec![String::from("Q")]);
    }
}
