//! Matchers that decide and explain in one pass
//!
//! Some matchers can only explain a mismatch by redoing the work that decided
//! it (walking a combinator's children, reading a record's properties). A
//! [`DiagnosingMatcher`] does that work once, writing the explanation as it
//! goes. The [`matches`] and [`describe_mismatch`] helpers turn it into the two
//! halves of [`Matcher`](crate::Matcher):
//!
//! ```
//! use verimatch::diagnosing::{self, DiagnosingMatcher};
//! use verimatch::{Description, Matcher, SelfDescribing};
//!
//! struct Positive;
//!
//! impl SelfDescribing for Positive {
//!     fn describe_to(&self, d: &mut dyn Description) {
//!         d.append_text("a positive number");
//!     }
//! }
//!
//! impl DiagnosingMatcher<i32> for Positive {
//!     fn matches_with(&self, actual: &i32, mismatch: &mut dyn Description) -> bool {
//!         if *actual > 0 {
//!             return true;
//!         }
//!         mismatch.append_value(actual).append_text(" is not positive");
//!         false
//!     }
//! }
//!
//! impl Matcher<i32> for Positive {
//!     fn matches(&self, actual: &i32) -> bool {
//!         diagnosing::matches(self, actual)
//!     }
//!
//!     fn describe_mismatch(&self, actual: &i32, d: &mut dyn Description) {
//!         diagnosing::describe_mismatch(self, actual, d);
//!     }
//! }
//!
//! assert!(Positive.matches(&1));
//! ```

use crate::{Description, NullDescription, SelfDescribing};

/// A matcher whose decision and explanation come from the same pass.
///
/// `matches_with` must be idempotent: calling it twice on the same value gives
/// the same answer and writes the same text.
pub trait DiagnosingMatcher<T: ?Sized>: SelfDescribing + Send + Sync {
    /// Decide whether `actual` matches. On `false`, explain why in `mismatch`.
    fn matches_with(&self, actual: &T, mismatch: &mut dyn Description) -> bool;
}

/// The decision half: evaluate with a discarding description.
pub fn matches<T: ?Sized, M: DiagnosingMatcher<T> + ?Sized>(matcher: &M, actual: &T) -> bool {
    matcher.matches_with(actual, &mut NullDescription)
}

/// The explanation half: evaluate into `description`, discarding the answer.
pub fn describe_mismatch<T: ?Sized, M: DiagnosingMatcher<T> + ?Sized>(
    matcher: &M,
    actual: &T,
    description: &mut dyn Description,
) {
    // Only the text matters here.
    let _ = matcher.matches_with(actual, description);
}
