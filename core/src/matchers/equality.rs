//! Equality matchers over `PartialEq` values and candidate lists.

use crate::reflect::Reflect;
use crate::{describe, resultf, Matcher, Value};

/// Matches values equal to `expected`.
///
/// The value must have exactly the type of `expected`; `equal_to(1u8)` does
/// not apply to `1i32`.
#[must_use]
pub fn equal_to<T: Reflect + PartialEq + Clone>(expected: T) -> Matcher {
    let shown = Value::new(expected.clone());
    Matcher::from_fn(describe!("equal to {}", shown.clone()), move |x: &T| {
        let actual = Value::new(x.clone());
        if *x == expected {
            resultf!(true, "{} equals {}", actual, shown.clone())
        } else {
            resultf!(false, "{} does not equal {}", actual, shown.clone())
        }
    })
}

/// Matches values different from `unexpected`.
#[must_use]
pub fn not_equal_to<T: Reflect + PartialEq + Clone>(unexpected: T) -> Matcher {
    let shown = Value::new(unexpected.clone());
    Matcher::from_fn(describe!("not equal to {}", shown.clone()), move |x: &T| {
        let actual = Value::new(x.clone());
        if *x == unexpected {
            resultf!(false, "{} equals {}", actual, shown.clone())
        } else {
            resultf!(true, "{} does not equal {}", actual, shown.clone())
        }
    })
}

/// Matches values equal to one of `candidates`.
#[must_use]
pub fn one_of<T: Reflect + PartialEq + Clone>(candidates: impl IntoIterator<Item = T>) -> Matcher {
    let candidates: Vec<T> = candidates.into_iter().collect();
    let shown = Value::new(candidates.clone());
    Matcher::from_fn(describe!("one of {}", shown.clone()), move |x: &T| {
        let actual = Value::new(x.clone());
        match candidates.iter().position(|c| c == x) {
            Some(i) => resultf!(true, "{} is candidate {} of {}", actual, i + 1, shown.clone()),
            None => resultf!(false, "{} is not one of {}", actual, shown.clone()),
        }
    })
}
