//! The test-reporting collaborator.
//!
//! The assertion chain never constructs its reporter; the caller supplies
//! one. The trait is a narrow capability interface: report-and-continue,
//! report-and-abort, and a helper marker. Two adapters ship with the crate:
//! [`TestReporter`] for plain `#[test]` functions and [`RecordingReporter`],
//! a spy for asserting on the chain's own behavior.

use std::cell::{Cell, RefCell};

/// Receives assertion failures.
pub trait Reporter {
    /// Reports a failure and lets the chain continue.
    fn error(&self, message: &str);

    /// Reports an unrecoverable failure. The production adapter panics;
    /// a recording double merely records and returns.
    fn fatal(&self, message: &str);

    /// Marker called on entry to every chain operation. Hosts that track
    /// failure locations can use it; the default does nothing.
    fn helper(&self) {}
}

/// Reporter for ordinary `#[test]` functions.
///
/// Non-fatal failures are collected so an entire chain runs and every
/// mismatch is listed; `fatal` panics immediately. If any collected failure
/// is still pending when the reporter is dropped, the drop panics with the
/// full list, failing the test.
///
/// ```
/// use tag_assert::{expect, Tagged, TestReporter};
///
/// #[derive(Default, Tagged)]
/// struct User {
///     #[tag(json = "id")]
///     pub id: u64,
/// }
///
/// let t = TestReporter::new();
/// expect(&t, &User::default()).expect_field("id").assert("json", "id");
/// ```
#[derive(Debug, Default)]
pub struct TestReporter {
    failures: RefCell<Vec<String>>,
}

impl TestReporter {
    pub fn new() -> Self {
        Self::default()
    }

    /// Whether any non-fatal failure has been reported.
    pub fn failed(&self) -> bool {
        !self.failures.borrow().is_empty()
    }

    /// Takes the collected failures, defusing the drop panic.
    pub fn take_failures(&self) -> Vec<String> {
        std::mem::take(&mut *self.failures.borrow_mut())
    }
}

impl Reporter for TestReporter {
    fn error(&self, message: &str) {
        self.failures.borrow_mut().push(message.to_owned());
    }

    fn fatal(&self, message: &str) {
        panic!("{message}");
    }
}

impl Drop for TestReporter {
    fn drop(&mut self) {
        // Never panic while unwinding.
        if std::thread::panicking() {
            return;
        }
        let failures = self.failures.get_mut();
        if !failures.is_empty() {
            panic!("tag assertions failed:\n  {}", failures.join("\n  "));
        }
    }
}

/// A spy reporter that records everything and never panics.
///
/// Intended for tests that assert on the assertion chain itself: which
/// messages were reported, whether the fatal path fired, how often the
/// helper marker was called.
#[derive(Debug, Default)]
pub struct RecordingReporter {
    errors: RefCell<Vec<String>>,
    fatals: RefCell<Vec<String>>,
    helpers: Cell<usize>,
}

impl RecordingReporter {
    pub fn new() -> Self {
        Self::default()
    }

    /// Messages reported through the continue path, in order.
    pub fn errors(&self) -> Vec<String> {
        self.errors.borrow().clone()
    }

    /// Messages reported through the abort path, in order.
    pub fn fatals(&self) -> Vec<String> {
        self.fatals.borrow().clone()
    }

    /// How many times the helper marker was called.
    pub fn helper_calls(&self) -> usize {
        self.helpers.get()
    }

    pub fn failed(&self) -> bool {
        !self.errors.borrow().is_empty() || !self.fatals.borrow().is_empty()
    }
}

impl Reporter for RecordingReporter {
    fn error(&self, message: &str) {
        self.errors.borrow_mut().push(message.to_owned());
    }

    fn fatal(&self, message: &str) {
        self.fatals.borrow_mut().push(message.to_owned());
    }

    fn helper(&self) {
        self.helpers.set(self.helpers.get() + 1);
    }
}

#[cfg(test)]
mod tests {
    use super::{Reporter, TestReporter};

    #[test]
    fn quiet_reporter_drops_cleanly() {
        let t = TestReporter::new();
        assert!(!t.failed());
    }

    #[test]
    #[should_panic(expected = "tag assertions failed")]
    fn pending_failures_panic_on_drop() {
        let t = TestReporter::new();
        t.error("Record: Field <unknown> not found");
    }

    #[test]
    fn taking_failures_defuses_the_drop() {
        let t = TestReporter::new();
        t.error("one");
        t.error("two");
        assert_eq!(t.take_failures(), vec!["one", "two"]);
        assert!(!t.failed());
    }

    #[test]
    #[should_panic(expected = "Must be struct")]
    fn fatal_panics_immediately() {
        let t = TestReporter::new();
        t.fatal("Must be struct");
    }
}
