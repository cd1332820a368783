//! Matcher — A named, self-describing predicate over dynamically typed values
//!
//! A `Matcher` pairs a [`Description`] with a match function and an ordered
//! list of user comments. Evaluation goes through a small kernel that stamps
//! every result with the matcher and value that produced it.
//!
//! # Two Construction Forms
//!
//! - [`Matcher::new`] — the canonical form, `Fn(&Value) -> MatchResult`,
//!   used verbatim.
//! - [`Matcher::from_fn`] — a strongly typed callable `Fn(&T) -> R`. The
//!   adapter downcasts each value to `T` and refuses (without calling the
//!   function) when the runtime type differs. `R` is any [`IntoMatchResult`]:
//!   `MatchResult`, `bool`, or `bool` paired with a description.
//!
//! Callables of any other shape do not implement the required traits, so
//! misuse is rejected when the matcher is built, by the compiler.

use crate::reflect::Reflect;
use crate::result::default_description;
use crate::{Description, MatchResult, Value};
use std::any::{self, Any};
use std::fmt;
use std::sync::Arc;

type MatchFn = dyn Fn(&Value) -> MatchResult + Send + Sync;

/// A self-describing predicate.
///
/// Matchers are immutable values: cloning is cheap and shares the
/// description and match function, and [`comment`](Self::comment) returns a
/// new matcher rather than modifying this one.
///
/// # INV: Results carry provenance
///
/// Every result returned by [`evaluate`](Self::evaluate) has
/// `matcher() == Some(self)` and `value() == Some(input)`, whatever the raw
/// match function returned.
///
/// # Example
///
/// ```
/// use attest::{Description, Matcher};
///
/// let is_bar = Matcher::from_fn(Description::text("is \"bar\""), |s: &String| s == "bar");
///
/// assert!(is_bar.evaluate("bar".to_string()).matched());
/// assert!(!is_bar.evaluate("foo".to_string()).matched());
///
/// // Wrong type: the function is never called.
/// let r = is_bar.evaluate(39);
/// assert!(!r.matched());
/// assert!(r.to_string().starts_with("Could not apply"));
/// ```
#[derive(Clone)]
pub struct Matcher {
    description: Description,
    match_fn: Arc<MatchFn>,
    comments: Arc<[String]>,
}

impl Matcher {
    /// Create a matcher from a canonical match function.
    pub fn new<F>(description: Description, match_fn: F) -> Self
    where
        F: Fn(&Value) -> MatchResult + Send + Sync + 'static,
    {
        Self {
            description,
            match_fn: Arc::new(match_fn),
            comments: Arc::from(Vec::new()),
        }
    }

    /// Create a matcher from a strongly typed function.
    ///
    /// Values whose concrete type is not exactly `T` produce a non-matching
    /// result naming both types; `match_fn` is not invoked for them.
    pub fn from_fn<T, R, F>(description: Description, match_fn: F) -> Self
    where
        T: Any,
        R: IntoMatchResult,
        F: Fn(&T) -> R + Send + Sync + 'static,
    {
        let expected = any::type_name::<T>();
        Self::new(description, move |value: &Value| {
            match value.downcast_ref::<T>() {
                Some(typed) => match_fn(typed).into_match_result(),
                None => could_not_apply(expected, value),
            }
        })
    }

    /// Apply this matcher to a value.
    ///
    /// The raw match function runs to completion; panics propagate to the
    /// caller (see [`evaluate_guarded`](crate::evaluate_guarded) for the
    /// panic-safe boundary used by the asserter).
    pub fn evaluate(&self, value: impl Into<Value>) -> MatchResult {
        let value = value.into();
        let result = (self.match_fn)(&value).with_matcher_and_value(self, &value);
        tracing::trace!(
            matcher = %self.description,
            value = %value,
            matched = result.matched(),
            "evaluated matcher"
        );
        result
    }

    /// The matcher's description.
    #[must_use]
    pub fn description(&self) -> &Description {
        &self.description
    }

    /// User comments, in the order they were attached.
    #[must_use]
    pub fn comments(&self) -> &[String] {
        &self.comments
    }

    /// Returns a new matcher with `comment` appended to its comments.
    ///
    /// The comment is stored verbatim; it is never used as a template.
    #[must_use]
    pub fn comment(&self, comment: impl fmt::Display) -> Self {
        self.with_comments([comment])
    }

    /// Returns a new matcher with every item of `comments` appended.
    #[must_use]
    pub fn with_comments<I>(&self, comments: I) -> Self
    where
        I: IntoIterator,
        I::Item: fmt::Display,
    {
        let appended: Vec<String> = self
            .comments
            .iter()
            .cloned()
            .chain(comments.into_iter().map(|c| c.to_string()))
            .collect();
        Self {
            description: self.description.clone(),
            match_fn: Arc::clone(&self.match_fn),
            comments: Arc::from(appended),
        }
    }

    /// Render the description into any text sink.
    ///
    /// # Errors
    ///
    /// Propagates errors reported by the sink.
    pub fn format_into(&self, sink: &mut dyn fmt::Write) -> fmt::Result {
        self.description.format_into(sink)
    }
}

/// The non-match returned when a value's type cannot be inspected.
pub(crate) fn could_not_apply(expected: &'static str, value: &Value) -> MatchResult {
    crate::resultf!(
        false,
        "Could not apply matcher expecting {} to value of type {}",
        expected,
        value.type_name()
    )
}

/// Create a matcher from a canonical match function.
pub fn matcher<F>(match_fn: F, description: impl Into<Description>) -> Matcher
where
    F: Fn(&Value) -> MatchResult + Send + Sync + 'static,
{
    Matcher::new(description.into(), match_fn)
}

impl PartialEq for Matcher {
    fn eq(&self, other: &Self) -> bool {
        std::ptr::addr_eq(Arc::as_ptr(&self.match_fn), Arc::as_ptr(&other.match_fn))
            && self.description.ptr_eq(&other.description)
            && self.comments == other.comments
    }
}

impl fmt::Display for Matcher {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.format_into(f)
    }
}

impl fmt::Debug for Matcher {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Matcher")
            .field("description", &self.description.to_string())
            .field("comments", &self.comments)
            .finish_non_exhaustive()
    }
}

impl Reflect for Matcher {
    fn as_any(&self) -> &dyn Any {
        self
    }
}

// ═══════════════════════════════════════════════════════════════════════════════
// Return shapes accepted by `Matcher::from_fn`
// ═══════════════════════════════════════════════════════════════════════════════

/// Return types a typed match function may produce.
#[diagnostic::on_unimplemented(
    message = "`{Self}` cannot be returned from a match function",
    label = "match functions must return a MatchResult, a bool, or (bool, description)",
    note = "supported return types: `MatchResult`, `bool`, `(bool, Description)`, `(bool, String)`, `(bool, &'static str)`"
)]
pub trait IntoMatchResult {
    /// Normalize into a [`MatchResult`].
    fn into_match_result(self) -> MatchResult;
}

impl IntoMatchResult for MatchResult {
    fn into_match_result(self) -> MatchResult {
        self
    }
}

impl IntoMatchResult for bool {
    fn into_match_result(self) -> MatchResult {
        MatchResult::new(self, default_description(self))
    }
}

impl IntoMatchResult for (bool, Description) {
    fn into_match_result(self) -> MatchResult {
        MatchResult::new(self.0, self.1)
    }
}

impl IntoMatchResult for (bool, String) {
    fn into_match_result(self) -> MatchResult {
        MatchResult::new(self.0, Description::text(self.1))
    }
}

impl IntoMatchResult for (bool, &'static str) {
    fn into_match_result(self) -> MatchResult {
        MatchResult::new(self.0, Description::text(self.1))
    }
}

/// Build a [`Matcher`] from a canonical match function, a template and
/// arguments.
///
/// ```
/// use attest::{matcherf, resultf, Value};
///
/// let limit = 10;
/// let under = matcherf!(
///     move |v: &Value| match v.as_f64() {
///         Some(n) => resultf!(n < f64::from(limit), "{} against {}", n, limit),
///         None => resultf!(false, "not a number"),
///     },
///     "under {}",
///     limit
/// );
/// assert_eq!(under.to_string(), "under 10");
/// assert!(under.evaluate(3).matched());
/// ```
#[macro_export]
macro_rules! matcherf {
    ($match_fn:expr, $template:expr $(, $arg:expr)* $(,)?) => {
        $crate::Matcher::new($crate::describe!($template $(, $arg)*), $match_fn)
    };
}
