//! Type-shape matchers: coarse [`Kind`](crate::Kind) tags and exact Rust types.

use crate::{describe, resultf, Kind, Matcher, Value};
use std::any::{self, Any};

/// Matches values of the given coarse [`Kind`].
#[must_use]
pub fn of_kind(kind: Kind) -> Matcher {
    Matcher::new(describe!("of kind {}", kind), move |value: &Value| {
        resultf!(
            value.kind() == kind,
            "{} has kind {}",
            value.type_name(),
            value.kind()
        )
    })
}

/// Matches values whose concrete type is exactly `T`.
///
/// ```
/// use attest::of_type;
///
/// assert!(of_type::<String>().evaluate(String::from("s")).matched());
/// assert!(!of_type::<String>().evaluate("s").matched());
/// ```
#[must_use]
pub fn of_type<T: Any>() -> Matcher {
    let expected = any::type_name::<T>();
    Matcher::new(describe!("of type {}", expected), |value: &Value| {
        resultf!(value.is::<T>(), "value has type {}", value.type_name())
    })
}
