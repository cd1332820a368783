//! attest — Composable, self-explaining matchers for tests
//!
//! A matcher is a named predicate over a dynamically typed value. Applying
//! one yields a [`MatchResult`]: the outcome, a description of why, and the
//! sub-results that justify it. Combinators compose matchers; an
//! [`Asserter`] turns a failing result tree into an indented report for the
//! test harness.
//!
//! # Architecture
//!
//! - [`Description`] — Deferred formatting (template + captured arguments)
//! - [`Value`] / [`Reflect`] — Type-erased subjects with runtime introspection
//! - [`MatchResult`] — Outcome, justification, provenance and causes
//! - [`Matcher`] — Description + match function + comments; the evaluation kernel
//! - [`both`], [`either`], [`not`], [`all_of`], ... — Short-circuiting combinators
//! - [`evaluate_guarded`] — Panic-safe evaluation at the assertion boundary
//! - [`Asserter`] / [`Logger`] — Binding to a test harness
//!
//! # Key Design Insights
//!
//! 1. **Provenance is the kernel's job**: every result returned by
//!    [`Matcher::evaluate`] names the matcher and value that produced it,
//!    whatever the user's match function returned.
//!
//! 2. **Typed functions, dynamic values**: [`Matcher::from_fn`] accepts a
//!    `Fn(&T) -> bool` (or a richer return shape) and refuses, without calling
//!    it, any value that is not exactly a `T`.
//!
//! 3. **Short-circuit order is public**: sub-matchers run left to right and
//!    only as often as the combinator's truth table requires.
//!
//! # Example
//!
//! ```
//! use attest::prelude::*;
//!
//! let is_bar = Matcher::from_fn(Description::text("is \"bar\""), |s: &&'static str| *s == "bar");
//! let m = both(has_prefix("b")).and(is_bar);
//!
//! assert!(m.evaluate("bar").matched());
//!
//! let r = m.evaluate("baz");
//! assert!(!r.matched());
//! assert_eq!(r.to_string(), "second part of 'Both/And' did not match");
//! assert!(r.report().to_string().starts_with("FAILURE: [both [string with prefix \"b\"] and [is \"bar\"]] on [\"baz\"]"));
//! ```
//!
//! In tests, bind an asserter to the harness:
//!
//! ```
//! use attest::prelude::*;
//!
//! let t = Asserter::for_test();
//! t.check_that(vec![1, 2, 3], &every_element(greater_than(0)));
//! t.assert_non_nil(Some("value"), &["lookup must succeed"]);
//! ```

// ═══════════════════════════════════════════════════════════════════════════════
// Modules
// ═══════════════════════════════════════════════════════════════════════════════

pub mod description;
mod guard;
mod logic;
mod matcher;
pub mod matchers;
mod reflect;
mod report;
mod result;
mod value;

mod asserter;
mod logger;

// ═══════════════════════════════════════════════════════════════════════════════
// Public API
// ═══════════════════════════════════════════════════════════════════════════════

// Core types
pub use description::Description;
pub use matcher::{matcher, IntoMatchResult, Matcher};
pub use reflect::{Kind, Nil, Reflect};
pub use report::Report;
pub use result::{result, MatchResult};
pub use value::Value;

// Combinators
pub use logic::{all_of, any_of, both, either, iff, is, neither, not, when};
pub use logic::{Both, Either, Iff, Neither, When};

// Evaluation and assertion
pub use asserter::{Asserter, Assertions, Logger, NullAsserter};
pub use guard::evaluate_guarded;
pub use logger::{TestLogger, WriterLogger};

// Built-in matchers
pub use matchers::{
    any_element, anything, close_to, contains_substring, did_not_match, equal_ignoring_case,
    equal_to, every_element, greater_than, greater_than_or_equal, has_key, has_len, has_prefix,
    has_suffix, is_empty, is_false, is_nil, is_not_empty, is_true, less_than, less_than_or_equal,
    matched, matches_regex, non_nil, not_equal_to, of_kind, of_type, one_of, string_form,
    string_matching, StringPattern,
};

// ═══════════════════════════════════════════════════════════════════════════════
// Prelude
// ═══════════════════════════════════════════════════════════════════════════════

/// Prelude module for convenient imports.
///
/// ```
/// use attest::prelude::*;
/// ```
pub mod prelude {
    pub use crate::matchers::*;
    pub use crate::{
        // Combinators
        all_of,
        any_of,
        both,
        // Macros
        describe,
        either,
        iff,
        is,
        // Core types
        matcher,
        matcherf,
        neither,
        not,
        result,
        resultf,
        when,
        Asserter,
        // Traits
        Assertions,
        Description,
        IntoMatchResult,
        Kind,
        Logger,
        MatchResult,
        Matcher,
        // Errors
        MatcherError,
        Nil,
        NullAsserter,
        Reflect,
        Value,
        WriterLogger,
    };
}

// ═══════════════════════════════════════════════════════════════════════════════
// Constants
// ═══════════════════════════════════════════════════════════════════════════════

/// Maximum length for regex patterns.
///
/// Regex compilation is expensive even with the linear-time `regex` crate;
/// longer patterns are rejected before compiling.
pub const MAX_REGEX_PATTERN_LENGTH: usize = 4096;

// ═══════════════════════════════════════════════════════════════════════════════
// Errors
// ═══════════════════════════════════════════════════════════════════════════════

/// Errors from matcher construction.
///
/// Only matchers built from user-supplied patterns can fail to construct.
/// Mismatches, type incompatibility and panics during evaluation are never
/// errors: they are non-matching [`MatchResult`]s.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum MatcherError {
    /// A regex pattern failed to compile.
    #[error("invalid pattern '{pattern}': {reason}")]
    InvalidPattern {
        /// The pattern that failed to compile.
        pattern: String,
        /// Why it failed.
        reason: String,
    },

    /// A regex pattern exceeds [`MAX_REGEX_PATTERN_LENGTH`].
    #[error("pattern length {len} exceeds maximum {max}")]
    PatternTooLong {
        /// Actual length of the pattern.
        len: usize,
        /// Maximum allowed length.
        max: usize,
    },
}

// ═══════════════════════════════════════════════════════════════════════════════
// Compile-time Assertions
// ═══════════════════════════════════════════════════════════════════════════════
