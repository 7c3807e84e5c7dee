use core::fmt;

/// Configuration options for a single unescape call.
///
/// # Examples
///
/// ```rust
/// use escapist::{UnescapeContext, UnescapeOptions, dialects};
///
/// let options = UnescapeOptions {
///     allow_trailing: true,
///     ..Default::default()
/// };
/// let value = dialects::json()
///     .unescape_with(r#""key": 1"#, UnescapeContext::new(options))
///     .unwrap();
/// assert_eq!(value, "key");
/// ```
///
/// # Default
///
/// All options default to `false`.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct UnescapeOptions {
    /// Whether input may continue after the closing surrounder.
    ///
    /// When `false`, any code point left unconsumed once the string has been
    /// closed is reported as an error. Set this to `true` when the escaped
    /// string is embedded in a larger text that a host parser keeps reading
    /// after the string ends.
    ///
    /// # Default
    ///
    /// `false`
    pub allow_trailing: bool,

    #[cfg(any(test, feature = "fuzzing"))]
    #[cfg_attr(feature = "serde", serde(default))]
    /// Panic on unescape errors instead of returning them.
    ///
    /// Enabled only in test and fuzzing builds to produce backtraces on
    /// failures.
    pub panic_on_error: bool,
}

/// How much input a successful unescape consumed.
///
/// Reported once, through the [`UnescapeContext`] callback, so that a host
/// parser owning its own cursor over the same text can advance past exactly
/// the escaped string.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Consumed {
    /// Code point offset of the last consumed code point (`0` for empty
    /// input).
    pub last_index: usize,
    /// Number of code points consumed.
    pub code_points: usize,
    /// Number of UTF-8 bytes consumed; advance a `&str` byte cursor by this.
    pub bytes: usize,
    /// Number of UTF-16 code units consumed.
    pub utf16_units: usize,
}

impl Consumed {
    /// Measures the consumed prefix `code_points`.
    pub(crate) fn of(code_points: &[char]) -> Self {
        Self {
            last_index: code_points.len().saturating_sub(1),
            code_points: code_points.len(),
            bytes: code_points.iter().map(|ch| ch.len_utf8()).sum(),
            utf16_units: code_points.iter().map(|ch| ch.len_utf16()).sum(),
        }
    }
}

fn ignore(_: Consumed) {}

/// Per-call unescape policy plus a completion callback.
///
/// The callback runs exactly once per successful unescape and never on
/// failure.
pub struct UnescapeContext<F = fn(Consumed)> {
    /// Policy for this call.
    pub options: UnescapeOptions,
    /// Receives the consumption report of a successful call.
    pub on_complete: F,
}

impl UnescapeContext {
    /// A context with the given options and no callback.
    #[must_use]
    pub fn new(options: UnescapeOptions) -> Self {
        Self {
            options,
            on_complete: ignore,
        }
    }
}

impl Default for UnescapeContext {
    fn default() -> Self {
        Self::new(UnescapeOptions::default())
    }
}

impl<F: FnOnce(Consumed)> UnescapeContext<F> {
    /// A context with the given options that reports consumption to
    /// `on_complete`.
    pub fn with_callback(options: UnescapeOptions, on_complete: F) -> Self {
        Self {
            options,
            on_complete,
        }
    }
}

impl<F> fmt::Debug for UnescapeContext<F> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("UnescapeContext")
            .field("options", &self.options)
            .finish_non_exhaustive()
    }
}
