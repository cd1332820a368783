//! End-to-end asserter behaviour observed through real loggers.

use attest_test::prelude::*;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;

fn byte_sink_logger() -> (WriterLogger<Vec<u8>>, Arc<AtomicUsize>) {
    let hook_calls = Arc::new(AtomicUsize::new(0));
    let seen = Arc::clone(&hook_calls);
    let logger = WriterLogger::new(Vec::new(), move || {
        seen.fetch_add(1, Ordering::SeqCst);
    });
    (logger, hook_calls)
}

fn sink_text(asserter: Asserter<WriterLogger<Vec<u8>>>) -> String {
    String::from_utf8(asserter.into_logger().into_inner()).expect("utf-8 report")
}

#[test]
fn test_both_and_reports_two_causes() {
    let r = both(anything()).and(not(anything())).evaluate(0);
    assert!(!r.matched());
    assert_eq!(r.causes().len(), 2);
}

#[test]
fn test_either_or_second_cause_satisfies() {
    let r = either(not(anything())).or(anything()).evaluate(0);
    assert!(r.matched());
    assert_eq!(r.causes().len(), 2);
    assert!(r.causes()[1].matched());
}

#[test]
fn test_short_circuit_skips_second_part() {
    let (probe, seen) = snoop(false);
    let r = both(not(anything())).and(probe.clone()).evaluate(0);
    assert!(!r.matched());
    assert!(!seen.called());

    either(anything()).or(probe.clone()).evaluate(0);
    neither(anything()).nor(probe.clone()).evaluate(0);
    when(not(anything())).then(probe).evaluate(0);
    assert!(!seen.called());
}

#[test]
fn test_adapter_rejects_other_types() {
    let is_bar = Matcher::from_fn(describe!("is {}", Value::new("bar")), |s: &&'static str| {
        *s == "bar"
    });
    assert!(is_bar.evaluate("bar").matched());
    assert!(!is_bar.evaluate("foo").matched());

    let r = is_bar.evaluate(39);
    assert!(!r.matched());
    let text = r.to_string();
    assert!(text.contains("Could not apply"), "{text}");
    assert!(text.contains("i32"), "{text}");
}

#[test]
fn test_check_that_writes_report_to_sink() {
    let (logger, hook_calls) = byte_sink_logger();
    let t = Asserter::new(logger);

    t.check_that("different", &matcher_expecting("expected"));

    assert!(t.logger().failed());
    assert_eq!(hook_calls.load(Ordering::SeqCst), 0);
    let out = sink_text(t);
    assert!(out.contains("\"different\""), "{out}");
    assert!(out.contains("is \"expected\""), "{out}");
    assert!(out.contains("checked by matcher_expecting"), "{out}");
    assert!(out.contains("literal %v and {} stay"), "{out}");
}

#[test]
fn test_assert_that_calls_hook_once() {
    let (logger, hook_calls) = byte_sink_logger();
    let t = Asserter::new(logger);

    t.assert_that("different", &matcher_expecting("expected"));
    assert_eq!(hook_calls.load(Ordering::SeqCst), 1);
    assert!(t.logger().failed());
}

#[test]
fn test_passing_checks_stay_silent() {
    let (logger, hook_calls) = byte_sink_logger();
    let t = Asserter::new(logger);

    t.check_that("expected", &matcher_expecting("expected"));
    t.assert_that("expected", &matcher_expecting("expected"));
    t.check_true(true, &[]);
    t.check_nil(Value::nil(), &["absent"]);
    t.assert_non_nil(Some(1), &[]);

    assert!(!t.logger().failed());
    assert_eq!(hook_calls.load(Ordering::SeqCst), 0);
    assert!(sink_text(t).is_empty());
}

#[test]
fn test_log_when_logs_without_failing() {
    let t = Asserter::new(RecordingLogger::new());
    t.log_when(3, &greater_than(2));
    t.log_unless(3, &greater_than(2));

    let logger = t.logger();
    assert_eq!(logger.lines().len(), 1);
    assert!(logger.lines()[0].starts_with("MATCHED: [greater than 2] on [3]"));
    assert!(!logger.failed());
}

#[test]
fn test_shortcut_comments_reach_report() {
    let t = Asserter::new(RecordingLogger::new());
    t.check_false(true, &["flag must be off", "see %s"]);

    let logger = t.logger();
    assert_eq!(logger.fail_count(), 1);
    let out = logger.output();
    assert!(out.contains("Comment: flag must be off"), "{out}");
    assert!(out.contains("Comment: see %s"), "{out}");
}

#[test]
fn test_panicking_matcher_is_reported_as_failure() {
    let exploding = Matcher::new(Description::text("explodes"), |_: &Value| {
        panic!("matcher blew up")
    });
    let t = Asserter::new(RecordingLogger::new());
    t.check_that(1, &exploding);

    let logger = t.logger();
    assert_eq!(logger.fail_count(), 1);
    assert!(logger.output().contains("Because: [Panic: matcher blew up]"));
}

#[test]
fn test_null_asserter_never_evaluates() {
    let (probe, seen) = snoop(false);
    let t = NullAsserter;

    t.check_that(0, &probe);
    t.assert_that(0, &probe);
    t.fail_now_when(0, &probe);
    t.log_unless(0, &probe);

    assert!(!seen.called());
}

#[test]
fn test_asserter_over_borrowed_logger() {
    fn check_positive(t: &impl Assertions, n: i64) {
        t.check_that(n, &greater_than(0i64));
    }

    let logger = RecordingLogger::new();
    let t = Asserter::new(&logger);
    check_positive(&t, 1);
    check_positive(&t, -1);
    assert_eq!(logger.fail_count(), 1);
}
