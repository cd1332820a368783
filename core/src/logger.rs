//! Logger implementations
//!
//! - [`WriterLogger`] adapts any byte sink and a `fail_now` hook.
//! - [`TestLogger`] binds to the Rust test harness.

use crate::asserter::Logger;
use std::fmt;
use std::io::{self, Write};
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Mutex, MutexGuard, PoisonError};

/// A [`Logger`] writing each report to a byte sink.
///
/// `fail` and `fail_now` both set the failed flag; `fail_now` then invokes
/// the hook supplied at construction. Write errors are reported through
/// `tracing` and otherwise ignored: a broken sink must not mask the test
/// outcome.
pub struct WriterLogger<W> {
    sink: Mutex<W>,
    failed: AtomicBool,
    on_fail_now: Box<dyn Fn() + Send + Sync>,
}

impl<W: Write> WriterLogger<W> {
    /// Create a logger over `sink` that calls `on_fail_now` on `fail_now`.
    pub fn new<F>(sink: W, on_fail_now: F) -> Self
    where
        F: Fn() + Send + Sync + 'static,
    {
        Self {
            sink: Mutex::new(sink),
            failed: AtomicBool::new(false),
            on_fail_now: Box::new(on_fail_now),
        }
    }

    /// Inspect the sink.
    pub fn with_sink<R>(&self, f: impl FnOnce(&W) -> R) -> R {
        f(&self.lock())
    }

    /// Consume the logger, returning the sink.
    pub fn into_inner(self) -> W {
        self.sink.into_inner().unwrap_or_else(PoisonError::into_inner)
    }

    // A panic while holding the lock (e.g. a hook panicking mid-report)
    // leaves the sink usable.
    fn lock(&self) -> MutexGuard<'_, W> {
        self.sink.lock().unwrap_or_else(PoisonError::into_inner)
    }

    fn write_line(&self, args: fmt::Arguments<'_>) -> io::Result<()> {
        let mut sink = self.lock();
        sink.write_fmt(args)?;
        sink.write_all(b"\n")?;
        sink.flush()
    }
}

impl<W: Write> Logger for WriterLogger<W> {
    fn logf(&self, args: fmt::Arguments<'_>) {
        if let Err(err) = self.write_line(args) {
            tracing::warn!(error = %err, "failed to write assertion report");
        }
    }

    fn failed(&self) -> bool {
        self.failed.load(Ordering::SeqCst)
    }

    fn fail(&self) {
        self.failed.store(true, Ordering::SeqCst);
    }

    fn fail_now(&self) {
        self.fail();
        (self.on_fail_now)();
    }
}

impl<W> fmt::Debug for WriterLogger<W> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("WriterLogger")
            .field("failed", &self.failed.load(Ordering::SeqCst))
            .finish_non_exhaustive()
    }
}

// ═══════════════════════════════════════════════════════════════════════════════
// TestLogger
// ═══════════════════════════════════════════════════════════════════════════════

/// A [`Logger`] for `#[test]` functions.
///
/// Reports go through `println!`, which the harness captures and shows for
/// failing tests. `fail_now` panics. A logger that recorded a `fail` panics
/// when dropped, so soft failures still fail the test.
#[derive(Debug, Default)]
pub struct TestLogger {
    failed: AtomicBool,
}

impl TestLogger {
    /// Create a logger for the current test.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }
}

impl Logger for TestLogger {
    fn logf(&self, args: fmt::Arguments<'_>) {
        println!("{args}");
    }

    fn failed(&self) -> bool {
        self.failed.load(Ordering::SeqCst)
    }

    fn fail(&self) {
        self.failed.store(true, Ordering::SeqCst);
    }

    fn fail_now(&self) {
        self.fail();
        panic!("assertion failed; see the report above");
    }
}

impl Drop for TestLogger {
    fn drop(&mut self) {
        if self.failed() && !std::thread::panicking() {
            panic!("one or more checks failed; see the reports above");
        }
    }
}
