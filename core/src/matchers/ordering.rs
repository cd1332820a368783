//! Ordering matchers over `PartialOrd` values and numeric tolerance.

use crate::matcher::could_not_apply;
use crate::reflect::Reflect;
use crate::{describe, resultf, Matcher, Value};

fn compare<T>(relation: &'static str, bound: T, holds: fn(&T, &T) -> bool) -> Matcher
where
    T: Reflect + PartialOrd + Clone,
{
    let shown = Value::new(bound.clone());
    Matcher::from_fn(describe!("{} {}", relation, shown.clone()), move |x: &T| {
        let actual = Value::new(x.clone());
        if holds(x, &bound) {
            resultf!(true, "{} is {} {}", actual, relation, shown.clone())
        } else {
            resultf!(false, "{} is not {} {}", actual, relation, shown.clone())
        }
    })
}

/// Matches values strictly greater than `bound`.
///
/// The value must have exactly the type of `bound`.
///
/// ```
/// use attest::greater_than;
///
/// let m = greater_than(3);
/// assert!(m.evaluate(4).matched());
/// assert_eq!(m.evaluate(2).to_string(), "2 is not greater than 3");
/// ```
#[must_use]
pub fn greater_than<T: Reflect + PartialOrd + Clone>(bound: T) -> Matcher {
    compare("greater than", bound, |x, b| x > b)
}

/// Matches values greater than or equal to `bound`.
#[must_use]
pub fn greater_than_or_equal<T: Reflect + PartialOrd + Clone>(bound: T) -> Matcher {
    compare("greater than or equal to", bound, |x, b| x >= b)
}

/// Matches values strictly less than `bound`.
#[must_use]
pub fn less_than<T: Reflect + PartialOrd + Clone>(bound: T) -> Matcher {
    compare("less than", bound, |x, b| x < b)
}

/// Matches values less than or equal to `bound`.
#[must_use]
pub fn less_than_or_equal<T: Reflect + PartialOrd + Clone>(bound: T) -> Matcher {
    compare("less than or equal to", bound, |x, b| x <= b)
}

/// Matches numbers of any primitive type within `tolerance` of `target`.
#[must_use]
pub fn close_to(target: f64, tolerance: f64) -> Matcher {
    Matcher::new(
        describe!("within {} of {}", tolerance, target),
        move |value: &Value| match value.as_f64() {
            Some(n) => {
                let distance = (n - target).abs();
                resultf!(distance <= tolerance, "{} is {} away from {}", n, distance, target)
            }
            None => could_not_apply("a number", value),
        },
    )
}
