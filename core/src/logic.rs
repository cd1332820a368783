//! Logic — Short-circuiting combinators over matchers
//!
//! Binary combinators are built in two steps so that call sites read like
//! the sentence they describe:
//!
//! ```
//! use attest::{anything, both, either, not};
//!
//! let never = both(anything()).and(not(anything()));
//! assert!(!never.evaluate(0).matched());
//!
//! let always = either(not(anything())).or(anything());
//! assert!(always.evaluate(0).matched());
//! ```
//!
//! # Evaluation Order
//!
//! Sub-matchers run left to right, each at most once, and only as often as
//! the short-circuit table below allows. Tests rely on this to sequence
//! side-effecting matchers.
//!
//! | Combinator          | Second evaluated when | Matches iff |
//! |---------------------|-----------------------|-------------|
//! | `both(A).and(B)`    | A matched             | A ∧ B       |
//! | `either(A).or(B)`   | A did not match       | A ∨ B       |
//! | `either(A).xor(B)`  | always                | A ⊕ B       |
//! | `neither(A).nor(B)` | A did not match       | ¬A ∧ ¬B     |
//! | `when(A).then(B)`   | A matched             | ¬A ∨ B      |
//! | `iff(A).then(B)`    | always                | A ↔ B       |
//!
//! Each result carries, as causes, exactly the sub-results it observed.
//!
//! Combinators never catch panics. A panicking sub-matcher unwinds through
//! the whole composition up to [`evaluate_guarded`](crate::evaluate_guarded).

use crate::{describe, resultf, MatchResult, Matcher, Value};
use std::fmt;
use std::sync::Arc;

// ═══════════════════════════════════════════════════════════════════════════════
// Builders
// ═══════════════════════════════════════════════════════════════════════════════

/// First half of `both(A).and(B)`.
#[must_use = "call `.and(..)` to build the matcher"]
#[derive(Debug, Clone)]
pub struct Both(Matcher);

/// First half of `either(A).or(B)` and `either(A).xor(B)`.
#[must_use = "call `.or(..)` or `.xor(..)` to build the matcher"]
#[derive(Debug, Clone)]
pub struct Either(Matcher);

/// First half of `neither(A).nor(B)`.
#[must_use = "call `.nor(..)` to build the matcher"]
#[derive(Debug, Clone)]
pub struct Neither(Matcher);

/// First half of `when(A).then(B)`.
#[must_use = "call `.then(..)` to build the matcher"]
#[derive(Debug, Clone)]
pub struct When(Matcher);

/// First half of `iff(A).then(B)`.
#[must_use = "call `.then(..)` to build the matcher"]
#[derive(Debug, Clone)]
pub struct Iff(Matcher);

/// Conjunction: `both(A).and(B)`.
pub fn both(first: Matcher) -> Both {
    Both(first)
}

/// Disjunction or exclusive disjunction: `either(A).or(B)`, `either(A).xor(B)`.
pub fn either(first: Matcher) -> Either {
    Either(first)
}

/// Joint negation: `neither(A).nor(B)`.
pub fn neither(first: Matcher) -> Neither {
    Neither(first)
}

/// Implication: `when(A).then(B)` reads "if A then B".
pub fn when(premise: Matcher) -> When {
    When(premise)
}

/// Biconditional: `iff(A).then(B)`.
pub fn iff(first: Matcher) -> Iff {
    Iff(first)
}

impl Both {
    /// Matches when both parts match. `second` runs only if `first` matched.
    #[must_use]
    pub fn and(self, second: Matcher) -> Matcher {
        let first = self.0;
        let description = describe!("both [{}] and [{}]", first.clone(), second.clone());
        Matcher::new(description, move |value: &Value| {
            let a = first.evaluate(value);
            if !a.matched() {
                return resultf!(false, "first part of 'Both/And' did not match").with_causes([a]);
            }
            let b = second.evaluate(value);
            if b.matched() {
                resultf!(true, "both parts of 'Both/And' matched").with_causes([a, b])
            } else {
                resultf!(false, "second part of 'Both/And' did not match").with_causes([a, b])
            }
        })
    }
}

impl Either {
    /// Matches when either part matches. `second` runs only if `first` did
    /// not match.
    #[must_use]
    pub fn or(self, second: Matcher) -> Matcher {
        let first = self.0;
        let description = describe!("either [{}] or [{}]", first.clone(), second.clone());
        Matcher::new(description, move |value: &Value| {
            let a = first.evaluate(value);
            if a.matched() {
                return resultf!(true, "first part of 'Either/Or' matched").with_causes([a]);
            }
            let b = second.evaluate(value);
            if b.matched() {
                resultf!(true, "second part of 'Either/Or' matched").with_causes([a, b])
            } else {
                resultf!(false, "neither part of 'Either/Or' matched").with_causes([a, b])
            }
        })
    }

    /// Matches when exactly one part matches. Both parts always run.
    #[must_use]
    pub fn xor(self, second: Matcher) -> Matcher {
        let first = self.0;
        let description = describe!("either [{}] xor [{}]", first.clone(), second.clone());
        Matcher::new(description, move |value: &Value| {
            let a = first.evaluate(value);
            let b = second.evaluate(value);
            let outcome = match (a.matched(), b.matched()) {
                (true, true) => resultf!(false, "both parts of 'Either/Xor' matched"),
                (true, false) => resultf!(true, "only the first part of 'Either/Xor' matched"),
                (false, true) => resultf!(true, "only the second part of 'Either/Xor' matched"),
                (false, false) => resultf!(false, "neither part of 'Either/Xor' matched"),
            };
            outcome.with_causes([a, b])
        })
    }
}

impl Neither {
    /// Matches when neither part matches. `second` runs only if `first` did
    /// not match.
    #[must_use]
    pub fn nor(self, second: Matcher) -> Matcher {
        let first = self.0;
        let description = describe!("neither [{}] nor [{}]", first.clone(), second.clone());
        Matcher::new(description, move |value: &Value| {
            let a = first.evaluate(value);
            if a.matched() {
                return resultf!(false, "first part of 'Neither/Nor' matched").with_causes([a]);
            }
            let b = second.evaluate(value);
            if b.matched() {
                resultf!(false, "second part of 'Neither/Nor' matched").with_causes([a, b])
            } else {
                resultf!(true, "neither part of 'Neither/Nor' matched").with_causes([a, b])
            }
        })
    }
}

impl When {
    /// Matches unless the premise matches and the conclusion does not.
    /// `conclusion` runs only if the premise matched.
    #[must_use]
    pub fn then(self, conclusion: Matcher) -> Matcher {
        let premise = self.0;
        let description = describe!("if [{}] then [{}]", premise.clone(), conclusion.clone());
        Matcher::new(description, move |value: &Value| {
            let a = premise.evaluate(value);
            if !a.matched() {
                return resultf!(true, "first part of 'If/Then' did not match").with_causes([a]);
            }
            let b = conclusion.evaluate(value);
            if b.matched() {
                resultf!(true, "both parts of 'If/Then' matched").with_causes([a, b])
            } else {
                resultf!(false, "second part of 'If/Then' did not match").with_causes([a, b])
            }
        })
    }
}

impl Iff {
    /// Matches when both parts agree. Both parts always run.
    #[must_use]
    pub fn then(self, second: Matcher) -> Matcher {
        let first = self.0;
        let description = describe!(
            "if and only if [{}] then [{}]",
            first.clone(),
            second.clone()
        );
        Matcher::new(description, move |value: &Value| {
            let a = first.evaluate(value);
            let b = second.evaluate(value);
            let outcome = match (a.matched(), b.matched()) {
                (true, true) => resultf!(true, "both parts of 'Iff/Then' matched"),
                (false, false) => resultf!(true, "neither part of 'Iff/Then' matched"),
                (true, false) => resultf!(false, "only the first part of 'Iff/Then' matched"),
                (false, true) => resultf!(false, "only the second part of 'Iff/Then' matched"),
            };
            outcome.with_causes([a, b])
        })
    }
}

// ═══════════════════════════════════════════════════════════════════════════════
// Unary decorators
// ═══════════════════════════════════════════════════════════════════════════════

/// Inverts the outcome of `inner`.
///
/// The result keeps the inner result's description and carries the inner
/// result as its only cause.
#[must_use]
pub fn not(inner: Matcher) -> Matcher {
    let description = describe!("not [{}]", inner.clone());
    Matcher::new(description, move |value: &Value| {
        let r = inner.evaluate(value);
        MatchResult::new(!r.matched(), r.description().clone()).with_causes([r])
    })
}

/// Identity over the outcome of `inner`, for readability.
///
/// The result re-exposes the inner result's causes at its own level rather
/// than nesting the inner result, so reports gain no extra layer.
#[must_use]
pub fn is(inner: Matcher) -> Matcher {
    let description = describe!("is [{}]", inner.clone());
    Matcher::new(description, move |value: &Value| {
        let r = inner.evaluate(value);
        MatchResult::new(r.matched(), r.description().clone()).with_causes(r.causes().to_vec())
    })
}

// ═══════════════════════════════════════════════════════════════════════════════
// N-ary
// ═══════════════════════════════════════════════════════════════════════════════

struct Listing(Arc<[Matcher]>);

impl fmt::Display for Listing {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, m) in self.0.iter().enumerate() {
            if i > 0 {
                f.write_str(", ")?;
            }
            write!(f, "[{m}]")?;
        }
        Ok(())
    }
}

/// Matches when every matcher matches, stopping at the first that does not.
///
/// An empty list matches vacuously.
#[must_use]
pub fn all_of(matchers: impl IntoIterator<Item = Matcher>) -> Matcher {
    let matchers: Arc<[Matcher]> = matchers.into_iter().collect();
    let description = describe!("all of {}", Listing(Arc::clone(&matchers)));
    Matcher::new(description, move |value: &Value| {
        let mut causes = Vec::with_capacity(matchers.len());
        for (i, m) in matchers.iter().enumerate() {
            let r = m.evaluate(value);
            let failed = !r.matched();
            causes.push(r);
            if failed {
                return resultf!(false, "part {} of 'All Of' did not match", i + 1)
                    .with_causes(causes);
            }
        }
        resultf!(true, "all {} parts of 'All Of' matched", matchers.len()).with_causes(causes)
    })
}

/// Matches when some matcher matches, stopping at the first that does.
///
/// An empty list never matches.
#[must_use]
pub fn any_of(matchers: impl IntoIterator<Item = Matcher>) -> Matcher {
    let matchers: Arc<[Matcher]> = matchers.into_iter().collect();
    let description = describe!("any of {}", Listing(Arc::clone(&matchers)));
    Matcher::new(description, move |value: &Value| {
        let mut causes = Vec::with_capacity(matchers.len());
        for (i, m) in matchers.iter().enumerate() {
            let r = m.evaluate(value);
            let hit = r.matched();
            causes.push(r);
            if hit {
                return resultf!(true, "part {} of 'Any Of' matched", i + 1).with_causes(causes);
            }
        }
        resultf!(false, "none of the {} parts of 'Any Of' matched", matchers.len())
            .with_causes(causes)
    })
}
