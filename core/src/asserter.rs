//! Asserter — Binds matcher evaluation to a test harness
//!
//! An [`Asserter`] evaluates a matcher through the panic-safe boundary,
//! decides whether the outcome warrants output, and drives a [`Logger`]:
//! emit the rendered [`Report`](crate::Report), then mark the test failed or
//! abort it, depending on the operation.
//!
//! | Operation         | Logs when    | Then        |
//! |-------------------|--------------|-------------|
//! | `log_when`        | matched      | nothing     |
//! | `log_unless`      | not matched  | nothing     |
//! | `fail_when`       | matched      | `fail`      |
//! | `fail_unless`     | not matched  | `fail`      |
//! | `fail_now_when`   | matched      | `fail_now`  |
//! | `fail_now_unless` | not matched  | `fail_now`  |
//!
//! `check_that` is `fail_unless`; `assert_that` is `fail_now_unless`.

use crate::guard::evaluate_guarded;
use crate::logger::TestLogger;
use crate::matchers::{is_false, is_nil, is_true, non_nil};
use crate::{Matcher, Value};
use std::fmt;
use std::sync::Arc;

/// The harness capability an [`Asserter`] reports through.
///
/// Thread safety of a shared logger is the implementation's concern; the
/// asserter performs each operation as a single call and keeps no state
/// between calls.
#[diagnostic::on_unimplemented(
    message = "`{Self}` cannot be used as an assertion logger",
    label = "missing `Logger` implementation",
    note = "implement `logf`, `failed`, `fail` and `fail_now`"
)]
pub trait Logger {
    /// Emit formatted text.
    fn logf(&self, args: fmt::Arguments<'_>);

    /// Whether `fail` or `fail_now` has been called.
    fn failed(&self) -> bool;

    /// Mark the current test failed and continue.
    fn fail(&self);

    /// Mark the current test failed and abort it.
    ///
    /// Implementations may return (e.g. after recording the request) or
    /// diverge by panicking.
    fn fail_now(&self);
}

impl<L: Logger + ?Sized> Logger for &L {
    fn logf(&self, args: fmt::Arguments<'_>) {
        (**self).logf(args);
    }
    fn failed(&self) -> bool {
        (**self).failed()
    }
    fn fail(&self) {
        (**self).fail();
    }
    fn fail_now(&self) {
        (**self).fail_now();
    }
}

impl<L: Logger + ?Sized> Logger for Box<L> {
    fn logf(&self, args: fmt::Arguments<'_>) {
        (**self).logf(args);
    }
    fn failed(&self) -> bool {
        (**self).failed()
    }
    fn fail(&self) {
        (**self).fail();
    }
    fn fail_now(&self) {
        (**self).fail_now();
    }
}

impl<L: Logger + ?Sized> Logger for Arc<L> {
    fn logf(&self, args: fmt::Arguments<'_>) {
        (**self).logf(args);
    }
    fn failed(&self) -> bool {
        (**self).failed()
    }
    fn fail(&self) {
        (**self).fail();
    }
    fn fail_now(&self) {
        (**self).fail_now();
    }
}

/// The assertion operations.
///
/// Implementors supply the six primitive operations; the aliases and typed
/// shortcuts are provided.
pub trait Assertions {
    /// Log the report if `matcher` matches `value`.
    fn log_when(&self, value: impl Into<Value>, matcher: &Matcher);

    /// Log the report if `matcher` does not match `value`.
    fn log_unless(&self, value: impl Into<Value>, matcher: &Matcher);

    /// Log and `fail` if `matcher` matches `value`.
    fn fail_when(&self, value: impl Into<Value>, matcher: &Matcher);

    /// Log and `fail` if `matcher` does not match `value`.
    fn fail_unless(&self, value: impl Into<Value>, matcher: &Matcher);

    /// Log and `fail_now` if `matcher` matches `value`.
    fn fail_now_when(&self, value: impl Into<Value>, matcher: &Matcher);

    /// Log and `fail_now` if `matcher` does not match `value`.
    fn fail_now_unless(&self, value: impl Into<Value>, matcher: &Matcher);

    /// Soft assertion: alias for [`fail_unless`](Self::fail_unless).
    fn check_that(&self, value: impl Into<Value>, matcher: &Matcher) {
        self.fail_unless(value, matcher);
    }

    /// Hard assertion: alias for [`fail_now_unless`](Self::fail_now_unless).
    fn assert_that(&self, value: impl Into<Value>, matcher: &Matcher) {
        self.fail_now_unless(value, matcher);
    }

    /// Soft assertion that `value` is `true`.
    fn check_true(&self, value: impl Into<Value>, comments: &[&str]) {
        self.check_that(value, &is_true().with_comments(comments));
    }

    /// Soft assertion that `value` is `false`.
    fn check_false(&self, value: impl Into<Value>, comments: &[&str]) {
        self.check_that(value, &is_false().with_comments(comments));
    }

    /// Soft assertion that `value` is nil.
    fn check_nil(&self, value: impl Into<Value>, comments: &[&str]) {
        self.check_that(value, &is_nil().with_comments(comments));
    }

    /// Soft assertion that `value` is not nil.
    fn check_non_nil(&self, value: impl Into<Value>, comments: &[&str]) {
        self.check_that(value, &non_nil().with_comments(comments));
    }

    /// Hard assertion that `value` is `true`.
    fn assert_true(&self, value: impl Into<Value>, comments: &[&str]) {
        self.assert_that(value, &is_true().with_comments(comments));
    }

    /// Hard assertion that `value` is `false`.
    fn assert_false(&self, value: impl Into<Value>, comments: &[&str]) {
        self.assert_that(value, &is_false().with_comments(comments));
    }

    /// Hard assertion that `value` is nil.
    fn assert_nil(&self, value: impl Into<Value>, comments: &[&str]) {
        self.assert_that(value, &is_nil().with_comments(comments));
    }

    /// Hard assertion that `value` is not nil.
    fn assert_non_nil(&self, value: impl Into<Value>, comments: &[&str]) {
        self.assert_that(value, &non_nil().with_comments(comments));
    }
}

// ═══════════════════════════════════════════════════════════════════════════════
// Asserter
// ═══════════════════════════════════════════════════════════════════════════════

#[derive(Clone, Copy, PartialEq, Eq)]
enum Trigger {
    Matched,
    Unmatched,
}

#[derive(Clone, Copy, PartialEq, Eq)]
enum Action {
    Log,
    Fail,
    FailNow,
}

impl fmt::Display for Action {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Action::Log => "log",
            Action::Fail => "fail",
            Action::FailNow => "fail_now",
        })
    }
}

/// Evaluates matchers and reports through a [`Logger`].
///
/// The asserter holds nothing but the logger; all "has this test failed"
/// state lives there.
///
/// # Example
///
/// ```
/// use attest::{equal_to, Asserter, Assertions, Logger, WriterLogger};
///
/// let asserter = Asserter::new(WriterLogger::new(Vec::new(), || {}));
/// asserter.check_that("different", &equal_to("expected").comment("see #12"));
///
/// assert!(asserter.logger().failed());
/// let output = asserter.logger().with_sink(|sink| String::from_utf8_lossy(sink).into_owned());
/// assert!(output.contains("\"different\""));
/// assert!(output.contains("see #12"));
/// ```
#[derive(Debug, Clone, Default)]
pub struct Asserter<L> {
    logger: L,
}

impl<L: Logger> Asserter<L> {
    /// Create an asserter reporting through `logger`.
    #[must_use]
    pub fn new(logger: L) -> Self {
        Self { logger }
    }

    /// The logger this asserter reports through.
    #[must_use]
    pub fn logger(&self) -> &L {
        &self.logger
    }

    /// Consume the asserter, returning its logger.
    #[must_use]
    pub fn into_logger(self) -> L {
        self.logger
    }

    fn decide(&self, value: Value, matcher: &Matcher, trigger: Trigger, action: Action) {
        let result = evaluate_guarded(matcher, &value);
        let triggered = match trigger {
            Trigger::Matched => result.matched(),
            Trigger::Unmatched => !result.matched(),
        };
        tracing::debug!(
            matcher = %matcher,
            matched = result.matched(),
            triggered,
            action = %action,
            "assertion decided"
        );
        if !triggered {
            return;
        }
        self.logger.logf(format_args!("{}", result.report()));
        match action {
            Action::Log => {}
            Action::Fail => self.logger.fail(),
            Action::FailNow => self.logger.fail_now(),
        }
    }
}

impl Asserter<TestLogger> {
    /// An asserter bound to the running `#[test]`.
    ///
    /// Reports print through the harness's captured output; `assert_*`
    /// failures panic, and `check_*` failures panic when the logger is
    /// dropped at the end of the test.
    #[must_use]
    pub fn for_test() -> Self {
        Self::new(TestLogger::new())
    }
}

impl<L: Logger> Assertions for Asserter<L> {
    fn log_when(&self, value: impl Into<Value>, matcher: &Matcher) {
        self.decide(value.into(), matcher, Trigger::Matched, Action::Log);
    }

    fn log_unless(&self, value: impl Into<Value>, matcher: &Matcher) {
        self.decide(value.into(), matcher, Trigger::Unmatched, Action::Log);
    }

    fn fail_when(&self, value: impl Into<Value>, matcher: &Matcher) {
        self.decide(value.into(), matcher, Trigger::Matched, Action::Fail);
    }

    fn fail_unless(&self, value: impl Into<Value>, matcher: &Matcher) {
        self.decide(value.into(), matcher, Trigger::Unmatched, Action::Fail);
    }

    fn fail_now_when(&self, value: impl Into<Value>, matcher: &Matcher) {
        self.decide(value.into(), matcher, Trigger::Matched, Action::FailNow);
    }

    fn fail_now_unless(&self, value: impl Into<Value>, matcher: &Matcher) {
        self.decide(value.into(), matcher, Trigger::Unmatched, Action::FailNow);
    }
}

/// An asserter that accepts everything.
///
/// It never logs, never fails and never evaluates its matchers. Swap it in
/// to disable a block of assertions without deleting them.
#[derive(Debug, Clone, Copy, Default)]
pub struct NullAsserter;

impl Assertions for NullAsserter {
    fn log_when(&self, _value: impl Into<Value>, _matcher: &Matcher) {}
    fn log_unless(&self, _value: impl Into<Value>, _matcher: &Matcher) {}
    fn fail_when(&self, _value: impl Into<Value>, _matcher: &Matcher) {}
    fn fail_unless(&self, _value: impl Into<Value>, _matcher: &Matcher) {}
    fn fail_now_when(&self, _value: impl Into<Value>, _matcher: &Matcher) {}
    fn fail_now_unless(&self, _value: impl Into<Value>, _matcher: &Matcher) {}
}
