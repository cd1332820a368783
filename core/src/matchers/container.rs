//! Container matchers — length, emptiness, elements and keys
//!
//! These work on anything whose [`Reflect`](crate::Reflect) implementation
//! exposes a length or elements: strings, sequences, sets and maps. Map
//! elements are the map's values; [`has_key`] looks at its keys.

use crate::matcher::could_not_apply;
use crate::{describe, resultf, Matcher, Value};

/// Matches strings and containers of exactly `expected` length.
#[must_use]
pub fn has_len(expected: usize) -> Matcher {
    Matcher::new(describe!("has length {}", expected), move |value: &Value| {
        match value.len() {
            Some(len) => resultf!(len == expected, "length was {}", len),
            None => could_not_apply("a string or container", value),
        }
    })
}

/// Matches empty strings and containers.
#[must_use]
pub fn is_empty() -> Matcher {
    Matcher::new(describe!("is empty"), |value: &Value| match value.len() {
        Some(len) => resultf!(len == 0, "length was {}", len),
        None => could_not_apply("a string or container", value),
    })
}

/// Matches non-empty strings and containers.
#[must_use]
pub fn is_not_empty() -> Matcher {
    Matcher::new(describe!("is not empty"), |value: &Value| match value.len() {
        Some(len) => resultf!(len != 0, "length was {}", len),
        None => could_not_apply("a string or container", value),
    })
}

/// Matches containers whose every element matches `inner`.
///
/// Stops at the first element that does not match; the result's causes are
/// the element results consulted. An empty container matches.
///
/// ```
/// use attest::{every_element, greater_than};
///
/// let m = every_element(greater_than(0));
/// assert!(m.evaluate(vec![1, 2, 3]).matched());
///
/// let r = m.evaluate(vec![1, -2, 3]);
/// assert!(!r.matched());
/// assert_eq!(r.causes().len(), 2);
/// ```
#[must_use]
pub fn every_element(inner: Matcher) -> Matcher {
    let description = describe!("every element [{}]", inner.clone());
    Matcher::new(description, move |value: &Value| {
        let Some(elements) = value.elements() else {
            return could_not_apply("a container", value);
        };
        let total = elements.len();
        let mut causes = Vec::with_capacity(total);
        for (i, element) in elements.into_iter().enumerate() {
            let r = inner.evaluate(element);
            let failed = !r.matched();
            causes.push(r);
            if failed {
                return resultf!(false, "element {} did not match", i).with_causes(causes);
            }
        }
        resultf!(true, "all {} elements matched", total).with_causes(causes)
    })
}

/// Matches containers with at least one element matching `inner`.
///
/// Stops at the first matching element. An empty container does not match.
#[must_use]
pub fn any_element(inner: Matcher) -> Matcher {
    let description = describe!("some element [{}]", inner.clone());
    Matcher::new(description, move |value: &Value| {
        let Some(elements) = value.elements() else {
            return could_not_apply("a container", value);
        };
        let total = elements.len();
        let mut causes = Vec::with_capacity(total);
        for (i, element) in elements.into_iter().enumerate() {
            let r = inner.evaluate(element);
            let hit = r.matched();
            causes.push(r);
            if hit {
                return resultf!(true, "element {} matched", i).with_causes(causes);
            }
        }
        resultf!(false, "none of {} elements matched", total).with_causes(causes)
    })
}

/// Matches maps with at least one key matching `inner`.
///
/// Stops at the first matching key.
#[must_use]
pub fn has_key(inner: Matcher) -> Matcher {
    let description = describe!("has key [{}]", inner.clone());
    Matcher::new(description, move |value: &Value| {
        let Some(keys) = value.keys() else {
            return could_not_apply("a map", value);
        };
        let total = keys.len();
        let mut causes = Vec::with_capacity(total);
        for key in keys {
            let r = inner.evaluate(key);
            let hit = r.matched();
            causes.push(r);
            if hit {
                return resultf!(true, "found a matching key").with_causes(causes);
            }
        }
        resultf!(false, "none of {} keys matched", total).with_causes(causes)
    })
}
