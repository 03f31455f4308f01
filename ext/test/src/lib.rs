//! verimatch-test: Probes and conformance fixtures
//!
//! [`Probe`] is a matcher with a fixed answer that counts how often it is
//! consulted. Put probes inside combinators to observe evaluation order and
//! short-circuiting from the outside.
//!
//! # Example
//!
//! ```
//! use verimatch_test::prelude::*;
//!
//! let first = Probe::new("first", false);
//! let second = Probe::new("second", true);
//!
//! let m = all_of![first.clone(), second.clone()]?;
//! assert!(!m.matches(&42));
//!
//! assert_eq!(first.calls(), 1);
//! assert_eq!(second.calls(), 0);
//! # Ok::<(), MatcherError>(())
//! ```

use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;
use verimatch::{DescribeValue, Description, Matcher, SelfDescribing};

#[cfg(feature = "fixtures")]
pub mod fixture;

/// A matcher with a fixed answer and a shared call counter.
///
/// Clones share the counter, so a clone can be handed to a combinator while
/// the original is kept for inspection. Describes itself by its label.
#[derive(Debug, Clone)]
pub struct Probe {
    label: String,
    answer: bool,
    calls: Arc<AtomicUsize>,
}

impl Probe {
    /// Create a probe that always answers `answer`.
    pub fn new(label: impl Into<String>, answer: bool) -> Self {
        Self {
            label: label.into(),
            answer,
            calls: Arc::new(AtomicUsize::new(0)),
        }
    }

    /// A probe that always matches.
    pub fn matching(label: impl Into<String>) -> Self {
        Self::new(label, true)
    }

    /// A probe that never matches.
    pub fn failing(label: impl Into<String>) -> Self {
        Self::new(label, false)
    }

    /// Number of `matches` calls so far, across all clones.
    #[must_use]
    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }

    /// Returns `true` if this probe was never consulted.
    #[must_use]
    pub fn untouched(&self) -> bool {
        self.calls() == 0
    }

    /// Zero the shared counter.
    pub fn reset(&self) {
        self.calls.store(0, Ordering::SeqCst);
    }
}

impl SelfDescribing for Probe {
    fn describe_to(&self, description: &mut dyn Description) {
        description.append(&self.label);
    }
}

impl<T: ?Sized + DescribeValue> Matcher<T> for Probe {
    fn matches(&self, _actual: &T) -> bool {
        self.calls.fetch_add(1, Ordering::SeqCst);
        self.answer
    }
}

/// Prelude for convenient imports.
pub mod prelude {
    pub use super::Probe;
    pub use verimatch::prelude::*;
}

#[cfg(test)]
mod tests {
    use super::*;
    use verimatch::StringDescription;

    #[test]
    fn test_probe_counts_across_clones() {
        let probe = Probe::matching("p");
        let clone = probe.clone();

        assert!(Matcher::<str>::matches(&clone, "x"));
        assert!(Matcher::<i32>::matches(&probe, &1));
        assert_eq!(probe.calls(), 2);

        probe.reset();
        assert!(clone.untouched());
    }

    #[test]
    fn test_probe_describes_by_label() {
        assert_eq!(StringDescription::describe(&Probe::failing("never")), "never");
    }

    #[test]
    fn test_probe_default_mismatch() {
        let mut out = StringDescription::new();
        Matcher::<i32>::describe_mismatch(&Probe::failing("never"), &5, &mut out);
        assert_eq!(out.as_str(), "was <5>");
    }
}
