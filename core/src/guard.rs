//! Guard — Panic-safe evaluation at the assertion boundary
//!
//! Combinators never catch panics; this is the one place that does. A
//! matcher that panics anywhere in its composition still produces a
//! reportable, non-matching result here.
//!
//! Catching requires `panic = "unwind"`, which is the default profile and
//! the one the test harness uses.

use crate::{resultf, MatchResult, Matcher, Value};
use std::any::Any;
use std::panic::{self, AssertUnwindSafe};

/// Evaluate `matcher` against `value`, converting a panic into a result.
///
/// A panic yields a non-matching result described as `Panic: <message>`,
/// with the matcher and value attached. The panic hook still runs, so the
/// panic message is printed as usual.
pub fn evaluate_guarded(matcher: &Matcher, value: &Value) -> MatchResult {
    // Matchers are immutable values; nothing observable is left half-updated.
    match panic::catch_unwind(AssertUnwindSafe(|| matcher.evaluate(value))) {
        Ok(result) => result,
        Err(payload) => {
            let message = panic_message(payload.as_ref());
            tracing::warn!(
                matcher = %matcher,
                value = %value,
                panic = %message,
                "matcher panicked"
            );
            resultf!(false, "Panic: {}", message).with_matcher_and_value(matcher, value)
        }
    }
}

fn panic_message(payload: &(dyn Any + Send)) -> String {
    if let Some(s) = payload.downcast_ref::<&'static str>() {
        (*s).to_string()
    } else if let Some(s) = payload.downcast_ref::<String>() {
        s.clone()
    } else {
        "unknown panic".to_string()
    }
}
