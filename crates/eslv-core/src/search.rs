//! Search layer: the filter predicate and its highlighter.
//!
//! A [`Matcher`] is either a literal substring or a compiled regular
//! expression. Both answer two questions: does an event match as a whole
//! ([`Matcher::matches`]), and where is the first match inside a piece of
//! text ([`Matcher::find`]). Spans are byte ranges into the text that was
//! searched, always on `char` boundaries.
//!
//! # Regex dialect
//!
//! Patterns use the `regex` crate syntax (RE2 family, no backreferences or
//! lookaround, linear-time matching). They are compiled with multi-line mode,
//! so `^` and `$` match at every line boundary of the header block, and with
//! case-insensitive matching using Unicode simple case folding.

use crate::error::FilterSyntaxError;
use crate::types::Event;
use regex::{Regex, RegexBuilder};
use serde::Deserialize;
use std::fmt;
use std::ops::Range;
use std::str::FromStr;

/// Which filter front-end is active.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MatchMode {
    /// Literal substring containment.
    Plain,
    /// Regular-expression containment.
    #[default]
    Regex,
}

impl fmt::Display for MatchMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            MatchMode::Plain => write!(f, "plain"),
            MatchMode::Regex => write!(f, "regex"),
        }
    }
}

impl FromStr for MatchMode {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "plain" | "text" | "literal" => Ok(MatchMode::Plain),
            "regex" | "re" | "regexp" => Ok(MatchMode::Regex),
            other => Err(format!("unknown search mode: {other}")),
        }
    }
}

/// Case policy for each mode. Defaults: plain is case-sensitive, regex is
/// case-insensitive.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SearchOptions {
    pub plain_case_sensitive: bool,
    pub regex_case_insensitive: bool,
}

impl Default for SearchOptions {
    fn default() -> Self {
        Self {
            plain_case_sensitive: true,
            regex_case_insensitive: true,
        }
    }
}

/// The active filter predicate.
#[derive(Debug, Clone, Default)]
pub enum Matcher {
    /// No filter: every event matches, nothing is highlighted.
    #[default]
    All,
    /// Case-sensitive substring.
    Literal(String),
    /// Compiled pattern (also used for case-insensitive literals).
    Pattern { source: String, regex: Regex },
}

impl Matcher {
    /// Compile `text` for `mode`. Empty text yields [`Matcher::All`].
    pub fn compile(
        mode: MatchMode,
        text: &str,
        options: &SearchOptions,
    ) -> Result<Matcher, FilterSyntaxError> {
        if text.is_empty() {
            return Ok(Matcher::All);
        }

        match mode {
            MatchMode::Plain if options.plain_case_sensitive => {
                Ok(Matcher::Literal(text.to_string()))
            }
            MatchMode::Plain => build(text, &regex::escape(text), false, true),
            MatchMode::Regex => build(text, text, true, options.regex_case_insensitive),
        }
    }

    /// Like [`compile`](Self::compile), but an invalid pattern falls back to
    /// [`Matcher::All`] and the error is returned alongside for display.
    pub fn compile_or_all(
        mode: MatchMode,
        text: &str,
        options: &SearchOptions,
    ) -> (Matcher, Option<FilterSyntaxError>) {
        match Self::compile(mode, text, options) {
            Ok(matcher) => (matcher, None),
            Err(err) => {
                tracing::warn!(pattern = %err.pattern, message = %err.message, "invalid filter");
                (Matcher::All, Some(err))
            }
        }
    }

    /// True when this matcher filters anything at all.
    pub fn is_active(&self) -> bool {
        !matches!(self, Matcher::All)
    }

    /// The filter text this matcher was built from.
    pub fn text(&self) -> &str {
        match self {
            Matcher::All => "",
            Matcher::Literal(needle) => needle,
            Matcher::Pattern { source, .. } => source,
        }
    }

    /// True when the header block or the body contains a match.
    pub fn matches(&self, event: &Event) -> bool {
        match self {
            Matcher::All => true,
            Matcher::Literal(needle) => {
                event.header.contains(needle.as_str()) || event.body.contains(needle.as_str())
            }
            Matcher::Pattern { regex, .. } => {
                regex.is_match(&event.header) || regex.is_match(&event.body)
            }
        }
    }

    /// Byte span of the first match in `text`. Never matches for
    /// [`Matcher::All`].
    pub fn find(&self, text: &str) -> Option<Range<usize>> {
        match self {
            Matcher::All => None,
            Matcher::Literal(needle) => text
                .find(needle.as_str())
                .map(|start| start..start + needle.len()),
            Matcher::Pattern { regex, .. } => regex.find(text).map(|m| m.range()),
        }
    }
}

fn build(
    source: &str,
    pattern: &str,
    multi_line: bool,
    case_insensitive: bool,
) -> Result<Matcher, FilterSyntaxError> {
    RegexBuilder::new(pattern)
        .multi_line(multi_line)
        .case_insensitive(case_insensitive)
        .build()
        .map(|regex| Matcher::Pattern {
            source: source.to_string(),
            regex,
        })
        .map_err(|err| FilterSyntaxError {
            pattern: source.to_string(),
            message: short_message(&err),
        })
}

/// Reduce a regex error to one line.
///
/// Syntax errors render as a multi-line diagram ending in `error: <kind>`;
/// only the kind is kept.
fn short_message(err: &regex::Error) -> String {
    match err {
        regex::Error::Syntax(text) => text
            .lines()
            .rev()
            .find_map(|line| line.trim().strip_prefix("error: "))
            .unwrap_or_else(|| text.lines().last().unwrap_or(text.as_str()))
            .trim()
            .to_string(),
        regex::Error::CompiledTooBig(_) => "pattern too large".to_string(),
        other => other.to_string(),
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{DateTime, Utc};
    use pretty_assertions::assert_eq;
    use rstest::rstest;

    fn event(header: &str, body: &str) -> Event {
        Event {
            name: "TEST".to_string(),
            sequence: 1,
            timestamp: DateTime::<Utc>::UNIX_EPOCH,
            header: header.to_string(),
            body: body.to_string(),
        }
    }

    #[rstest]
    #[case::plain(MatchMode::Plain)]
    #[case::regex(MatchMode::Regex)]
    fn empty_text_matches_everything(#[case] mode: MatchMode) {
        let matcher = Matcher::compile(mode, "", &SearchOptions::default()).unwrap();
        assert!(!matcher.is_active());
        assert!(matcher.matches(&event("", "")));
        assert_eq!(matcher.find("anything"), None);
    }

    #[test]
    fn plain_is_case_sensitive_by_default() {
        let matcher = Matcher::compile(MatchMode::Plain, "foo", &SearchOptions::default()).unwrap();
        assert!(matcher.matches(&event("A: foo\n", "")));
        assert!(matcher.matches(&event("A: 1\n", "xfoox")));
        assert!(!matcher.matches(&event("A: FOO\n", "Foo")));
    }

    #[test]
    fn plain_case_policy_is_configurable() {
        let options = SearchOptions {
            plain_case_sensitive: false,
            ..SearchOptions::default()
        };
        let matcher = Matcher::compile(MatchMode::Plain, "a.b", &options).unwrap();
        assert!(matcher.matches(&event("X: A.B\n", "")));
        // the dot is literal
        assert!(!matcher.matches(&event("X: axb\n", "")));
        assert_eq!(matcher.text(), "a.b");
    }

    #[test]
    fn regex_is_multiline_and_case_insensitive() {
        let matcher = Matcher::compile(MatchMode::Regex, "^A:", &SearchOptions::default()).unwrap();
        assert!(matcher.matches(&event("B: 1\na: 2\n", "")));
        assert!(!matcher.matches(&event("B: A: 1\n", "")));
    }

    #[test]
    fn regex_case_policy_is_configurable() {
        let options = SearchOptions {
            regex_case_insensitive: false,
            ..SearchOptions::default()
        };
        let matcher = Matcher::compile(MatchMode::Regex, "answer", &options).unwrap();
        assert!(!matcher.matches(&event("Answer-State: ANSWERED\n", "")));
    }

    #[test]
    fn invalid_regex_falls_back_with_diagnostic() {
        let (matcher, err) =
            Matcher::compile_or_all(MatchMode::Regex, "(", &SearchOptions::default());
        assert!(!matcher.is_active());
        let err = err.expect("diagnostic");
        assert_eq!(err.pattern, "(");
        assert!(!err.message.is_empty());
        assert!(!err.message.contains('\n'), "{}", err.message);
    }

    #[test]
    fn find_returns_byte_span_on_char_boundaries() {
        let matcher = Matcher::compile(MatchMode::Regex, "ж+", &SearchOptions::default()).unwrap();
        let text = "ключ: жЖж!";
        let span = matcher.find(text).unwrap();
        assert_eq!(&text[span.clone()], "жЖж");
        assert_eq!(&text[span.end..], "!");
    }

    #[test]
    fn literal_find_span() {
        let matcher = Matcher::compile(MatchMode::Plain, "lo", &SearchOptions::default()).unwrap();
        assert_eq!(matcher.find("hello lo"), Some(3..5));
    }

    #[test]
    fn mode_parses_and_displays() {
        assert_eq!("plain".parse::<MatchMode>(), Ok(MatchMode::Plain));
        assert_eq!("REGEX".parse::<MatchMode>(), Ok(MatchMode::Regex));
        assert!("fuzzy".parse::<MatchMode>().is_err());
        assert_eq!(MatchMode::Regex.to_string(), "regex");
    }
}
