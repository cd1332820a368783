//! Built-in matchers
//!
//! Everything here is an ordinary consumer of the kernel: each matcher is
//! built with [`Matcher::new`] or [`Matcher::from_fn`] and obeys the same
//! contracts as user-written ones. Values the matcher cannot inspect yield a
//! "Could not apply" non-match rather than a panic.
//!
//! The parameterless matchers are process-wide singletons, built once and
//! cloned on each call.

mod container;
mod equality;
mod kind;
mod ordering;
mod string_match;

pub use container::{any_element, every_element, has_key, has_len, is_empty, is_not_empty};
pub use equality::{equal_to, not_equal_to, one_of};
pub use kind::{of_kind, of_type};
pub use ordering::{close_to, greater_than, greater_than_or_equal, less_than, less_than_or_equal};
pub use string_match::{
    contains_substring, equal_ignoring_case, has_prefix, has_suffix, matches_regex, string_form,
    string_matching, StringPattern,
};

use crate::{result, Description, MatchResult, Matcher, Value};
use once_cell::sync::Lazy;

static ANYTHING: Lazy<Matcher> =
    Lazy::new(|| Matcher::new(Description::text("anything"), |_| result(true, "")));

static IS_TRUE: Lazy<Matcher> = Lazy::new(|| {
    Matcher::from_fn(Description::text("is true"), |b: &bool| {
        (*b, if *b { "value was true" } else { "value was false" })
    })
});

static IS_FALSE: Lazy<Matcher> = Lazy::new(|| {
    Matcher::from_fn(Description::text("is false"), |b: &bool| {
        (!*b, if *b { "value was true" } else { "value was false" })
    })
});

static IS_NIL: Lazy<Matcher> = Lazy::new(|| {
    Matcher::new(Description::text("is nil"), |v: &Value| nil_check(v, true))
});

static NON_NIL: Lazy<Matcher> = Lazy::new(|| {
    Matcher::new(Description::text("non-nil"), |v: &Value| nil_check(v, false))
});

static MATCHED: Lazy<Matcher> = Lazy::new(|| {
    Matcher::from_fn(Description::text("matched"), |r: &MatchResult| {
        (r.matched(), "inspected result")
    })
});

static DID_NOT_MATCH: Lazy<Matcher> = Lazy::new(|| {
    Matcher::from_fn(Description::text("did not match"), |r: &MatchResult| {
        (!r.matched(), "inspected result")
    })
});

fn nil_check(value: &Value, want_nil: bool) -> MatchResult {
    let nil = value.is_nil();
    let text = if nil { "value was nil" } else { "value was not nil" };
    result(nil == want_nil, text)
}

/// Matches every value.
#[must_use]
pub fn anything() -> Matcher {
    ANYTHING.clone()
}

/// Matches `true`.
#[must_use]
pub fn is_true() -> Matcher {
    IS_TRUE.clone()
}

/// Matches `false`.
#[must_use]
pub fn is_false() -> Matcher {
    IS_FALSE.clone()
}

/// Matches [`Value::nil`] and `Option::None` of any type.
#[must_use]
pub fn is_nil() -> Matcher {
    IS_NIL.clone()
}

/// Matches everything [`is_nil`] does not.
#[must_use]
pub fn non_nil() -> Matcher {
    NON_NIL.clone()
}

/// Matches a [`MatchResult`] value that matched.
#[must_use]
pub fn matched() -> Matcher {
    MATCHED.clone()
}

/// Matches a [`MatchResult`] value that did not match.
#[must_use]
pub fn did_not_match() -> Matcher {
    DID_NOT_MATCH.clone()
}
