//! String matchers — prefix, suffix, substring, case folding and regex
//!
//! [`StringPattern`] is the engine; the free functions wrap a pattern in a
//! [`Matcher`] that accepts any string-shaped value (`String`, `&str`,
//! `Box<str>`, `Arc<str>`).

use crate::matcher::could_not_apply;
use crate::{describe, resultf, MatchResult, Matcher, MatcherError, Value, MAX_REGEX_PATTERN_LENGTH};
use std::borrow::Cow;
use std::fmt;
use std::sync::Arc;

/// A compiled string test.
///
/// Literal tests keep the text exactly as given, so descriptions quote it
/// verbatim; with `ignore_case` both sides are ASCII-folded at match time.
/// Regexes use the `regex` crate, which matches in linear time.
///
/// # Example
///
/// ```
/// use attest::StringPattern;
///
/// let p = StringPattern::prefix("/API/", true);
/// assert!(p.matches("/api/users"));
/// assert!(!p.matches("/other"));
/// assert_eq!(p.to_string(), "with prefix \"/API/\" ignoring case");
///
/// let re = StringPattern::regex(r"^user-\d+$").unwrap();
/// assert!(re.matches("user-123"));
/// ```
#[derive(Debug, Clone)]
pub struct StringPattern {
    test: Test,
}

#[derive(Debug, Clone)]
enum Test {
    Literal {
        anchor: Anchor,
        text: String,
        ignore_case: bool,
    },
    Regex(regex::Regex),
}

/// Where a literal must sit in the input.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Anchor {
    Whole,
    Start,
    End,
    Anywhere,
}

impl Anchor {
    fn relation(self) -> &'static str {
        match self {
            Self::Whole => "equal to",
            Self::Start => "with prefix",
            Self::End => "with suffix",
            Self::Anywhere => "containing",
        }
    }

    fn holds(self, input: &str, text: &str) -> bool {
        match self {
            Self::Whole => input == text,
            Self::Start => input.starts_with(text),
            Self::End => input.ends_with(text),
            Self::Anywhere => input.contains(text),
        }
    }
}

/// ASCII case folding; borrows when there is nothing to fold.
fn fold(s: &str, ignore_case: bool) -> Cow<'_, str> {
    if ignore_case && s.bytes().any(|b| b.is_ascii_uppercase()) {
        Cow::Owned(s.to_ascii_lowercase())
    } else {
        Cow::Borrowed(s)
    }
}

impl StringPattern {
    fn literal(anchor: Anchor, text: impl Into<String>, ignore_case: bool) -> Self {
        Self {
            test: Test::Literal {
                anchor,
                text: text.into(),
                ignore_case,
            },
        }
    }

    /// Whole-string equality.
    #[must_use]
    pub fn exact(value: impl Into<String>, ignore_case: bool) -> Self {
        Self::literal(Anchor::Whole, value, ignore_case)
    }

    /// The input starts with `value`.
    #[must_use]
    pub fn prefix(value: impl Into<String>, ignore_case: bool) -> Self {
        Self::literal(Anchor::Start, value, ignore_case)
    }

    /// The input ends with `value`.
    #[must_use]
    pub fn suffix(value: impl Into<String>, ignore_case: bool) -> Self {
        Self::literal(Anchor::End, value, ignore_case)
    }

    /// The input contains `value`.
    #[must_use]
    pub fn contains(value: impl Into<String>, ignore_case: bool) -> Self {
        Self::literal(Anchor::Anywhere, value, ignore_case)
    }

    /// Regular expression test, satisfied by a match anywhere in the input.
    ///
    /// # Errors
    ///
    /// Returns [`MatcherError::PatternTooLong`] if `pattern` exceeds
    /// [`MAX_REGEX_PATTERN_LENGTH`] bytes, and
    /// [`MatcherError::InvalidPattern`] if it does not compile.
    pub fn regex(pattern: &str) -> Result<Self, MatcherError> {
        if pattern.len() > MAX_REGEX_PATTERN_LENGTH {
            return Err(MatcherError::PatternTooLong {
                len: pattern.len(),
                max: MAX_REGEX_PATTERN_LENGTH,
            });
        }
        let re = regex::Regex::new(pattern).map_err(|e| MatcherError::InvalidPattern {
            pattern: pattern.to_string(),
            reason: e.to_string(),
        })?;
        Ok(Self { test: Test::Regex(re) })
    }

    /// Returns `true` if `input` satisfies this pattern.
    #[must_use]
    pub fn matches(&self, input: &str) -> bool {
        match &self.test {
            Test::Literal {
                anchor,
                text,
                ignore_case,
            } => anchor.holds(&fold(input, *ignore_case), &fold(text, *ignore_case)),
            Test::Regex(re) => re.is_match(input),
        }
    }
}

impl fmt::Display for StringPattern {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.test {
            Test::Literal {
                anchor,
                text,
                ignore_case,
            } => {
                write!(f, "{} {text:?}", anchor.relation())?;
                if *ignore_case {
                    f.write_str(" ignoring case")?;
                }
                Ok(())
            }
            Test::Regex(re) => write!(f, "matching /{}/", re.as_str()),
        }
    }
}

/// Matches string-shaped values satisfying `pattern`.
#[must_use]
pub fn string_matching(pattern: StringPattern) -> Matcher {
    let pattern = Arc::new(pattern);
    Matcher::new(
        describe!("string {}", Arc::clone(&pattern)),
        move |value: &Value| {
            let Some(input) = value.as_str() else {
                return could_not_apply("a string", value);
            };
            if pattern.matches(input) {
                resultf!(true, "{} is a string {}", value.clone(), Arc::clone(&pattern))
            } else {
                resultf!(false, "{} is not a string {}", value.clone(), Arc::clone(&pattern))
            }
        },
    )
}

/// Matches strings starting with `prefix`.
///
/// ```
/// use attest::has_prefix;
///
/// let m = has_prefix("foo");
/// assert_eq!(m.to_string(), "string with prefix \"foo\"");
/// assert!(m.evaluate("foobar").matched());
/// assert!(m.evaluate(String::from("foo")).matched());
/// ```
#[must_use]
pub fn has_prefix(prefix: impl Into<String>) -> Matcher {
    string_matching(StringPattern::prefix(prefix, false))
}

/// Matches strings ending with `suffix`.
#[must_use]
pub fn has_suffix(suffix: impl Into<String>) -> Matcher {
    string_matching(StringPattern::suffix(suffix, false))
}

/// Matches strings containing `needle`.
#[must_use]
pub fn contains_substring(needle: impl Into<String>) -> Matcher {
    string_matching(StringPattern::contains(needle, false))
}

/// Matches strings equal to `expected` up to ASCII case.
#[must_use]
pub fn equal_ignoring_case(expected: impl Into<String>) -> Matcher {
    string_matching(StringPattern::exact(expected, true))
}

/// Matches strings in which `pattern` finds a match.
///
/// # Errors
///
/// See [`StringPattern::regex`].
pub fn matches_regex(pattern: &str) -> Result<Matcher, MatcherError> {
    StringPattern::regex(pattern).map(string_matching)
}

/// Applies `inner` to the string form of a value.
///
/// String-shaped values are used as they are; any other value is rendered
/// the way reports render it (its `Debug` form) and the rendering is matched.
#[must_use]
pub fn string_form(inner: Matcher) -> Matcher {
    let description = describe!("string form [{}]", inner.clone());
    Matcher::new(description, move |value: &Value| {
        let text = match value.as_str() {
            Some(s) => s.to_string(),
            None => value.to_string(),
        };
        let r: MatchResult = inner.evaluate(text);
        MatchResult::new(r.matched(), r.description().clone()).with_causes([r])
    })
}
