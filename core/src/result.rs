//! `MatchResult` — The outcome of applying a matcher, with its justification
//!
//! A result is a boolean outcome, a [`Description`] saying why, provenance
//! (the matcher that produced it and the value it was applied to) and an
//! ordered list of sub-results that justify it. Results nest into an
//! explanation tree that [`Report`](crate::Report) renders.

use crate::reflect::Reflect;
use crate::report::Report;
use crate::{Description, Matcher, Value};
use std::any::Any;
use std::fmt;
use std::sync::Arc;

/// The outcome of applying a [`Matcher`] to a [`Value`].
///
/// # INV: Immutable after construction
///
/// `matched` never changes. Derivations ([`with_causes`](Self::with_causes),
/// [`with_matcher_and_value`](Self::with_matcher_and_value)) return shallow
/// copies sharing the description and the causes list.
///
/// # INV: Rendering is never empty
///
/// An empty description is replaced at construction; one whose arguments
/// render to nothing is replaced when rendered.
///
/// # INV: Causes are in consultation order
///
/// Combinators attach the sub-results they actually observed, in the order
/// they consulted them. A short-circuited combinator carries one cause.
///
/// # Example
///
/// ```
/// use attest::{resultf, MatchResult};
///
/// let inner = resultf!(false, "{} is odd", 3);
/// let outer = resultf!(false, "not all even").with_causes([inner]);
///
/// assert!(!outer.matched());
/// assert_eq!(outer.causes().len(), 1);
/// assert_eq!(outer.causes()[0].to_string(), "3 is odd");
/// ```
#[derive(Clone)]
pub struct MatchResult {
    matched: bool,
    description: Description,
    matcher: Option<Matcher>,
    value: Option<Value>,
    causes: Arc<[MatchResult]>,
}

impl MatchResult {
    /// Create a result with no causes and no provenance yet.
    ///
    /// An empty description is replaced with `"Matched"` / `"Did not match"`.
    #[must_use]
    pub fn new(matched: bool, description: Description) -> Self {
        let description = if description.is_empty() {
            default_description(matched)
        } else {
            description
        };
        Self {
            matched,
            description,
            matcher: None,
            value: None,
            causes: Arc::from(Vec::new()),
        }
    }

    /// Whether the matcher matched.
    #[must_use]
    pub fn matched(&self) -> bool {
        self.matched
    }

    /// Why the matcher did or did not match.
    #[must_use]
    pub fn description(&self) -> &Description {
        &self.description
    }

    /// The matcher that produced this result.
    ///
    /// Always `Some` for results returned by [`Matcher::evaluate`].
    #[must_use]
    pub fn matcher(&self) -> Option<&Matcher> {
        self.matcher.as_ref()
    }

    /// The value this result was produced from.
    ///
    /// Always `Some` for results returned by [`Matcher::evaluate`].
    #[must_use]
    pub fn value(&self) -> Option<&Value> {
        self.value.as_ref()
    }

    /// The sub-results that justify this result, in consultation order.
    #[must_use]
    pub fn causes(&self) -> &[MatchResult] {
        &self.causes
    }

    /// Returns an equivalent result whose causes are replaced by `causes`.
    #[must_use]
    pub fn with_causes(self, causes: impl IntoIterator<Item = MatchResult>) -> Self {
        Self {
            causes: causes.into_iter().collect(),
            ..self
        }
    }

    /// Returns an equivalent result carrying the given provenance.
    ///
    /// Called by the evaluation kernel; user match functions never need it.
    #[must_use]
    pub fn with_matcher_and_value(self, matcher: &Matcher, value: &Value) -> Self {
        Self {
            matcher: Some(matcher.clone()),
            value: Some(value.clone()),
            ..self
        }
    }

    /// Render the description into any text sink.
    ///
    /// A description whose arguments render to nothing falls back to
    /// `"Matched"` / `"Did not match"`, so the rendering is never empty.
    ///
    /// # Errors
    ///
    /// Propagates errors reported by the sink.
    pub fn format_into(&self, sink: &mut dyn fmt::Write) -> fmt::Result {
        let mut rendered = String::new();
        self.description.format_into(&mut rendered)?;
        if rendered.is_empty() {
            default_description(self.matched).format_into(sink)
        } else {
            sink.write_str(&rendered)
        }
    }

    /// The full explanation tree, ready for display.
    #[must_use]
    pub fn report(&self) -> Report<'_> {
        Report::new(self)
    }
}

/// Create a result with no causes; shorthand for [`MatchResult::new`].
#[must_use]
pub fn result(matched: bool, description: impl Into<Description>) -> MatchResult {
    MatchResult::new(matched, description.into())
}

pub(crate) fn default_description(matched: bool) -> Description {
    if matched {
        Description::text("Matched")
    } else {
        Description::text("Did not match")
    }
}

impl fmt::Display for MatchResult {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.format_into(f)
    }
}

impl fmt::Debug for MatchResult {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("MatchResult")
            .field("matched", &self.matched)
            .field("description", &self.description)
            .field("matcher", &self.matcher.as_ref().map(ToString::to_string))
            .field("value", &self.value)
            .field("causes", &self.causes)
            .finish()
    }
}

impl Reflect for MatchResult {
    fn as_any(&self) -> &dyn Any {
        self
    }
}

/// Build a [`MatchResult`] from an outcome, a template and arguments.
///
/// ```
/// use attest::resultf;
///
/// let r = resultf!(true, "{} is positive", 5);
/// assert!(r.matched());
/// assert_eq!(r.to_string(), "5 is positive");
/// ```
#[macro_export]
macro_rules! resultf {
    ($matched:expr, $template:expr $(, $arg:expr)* $(,)?) => {
        $crate::MatchResult::new($matched, $crate::describe!($template $(, $arg)*))
    };
}
