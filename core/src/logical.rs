//! Logical combinators — AND, OR and NOT over matchers
//!
//! Children are evaluated strictly left to right. Once the result is known,
//! later children are never evaluated.
//!
//! - [`AllOf`] — every child must match; stops at the first failure
//! - [`AnyOf`] — some child must match; stops at the first success
//! - [`IsNot`] — inverts its single child

use crate::diagnosing::{self, DiagnosingMatcher};
use crate::{
    DescribeValue, Description, Matcher, MatcherError, SelfDescribing, StringDescription,
    MAX_MATCHERS_PER_COMBINATOR,
};
use std::fmt;

fn check_width(combinator: &'static str, count: usize) -> Result<(), MatcherError> {
    if count == 0 {
        return Err(MatcherError::EmptyCombinator { combinator });
    }
    if count > MAX_MATCHERS_PER_COMBINATOR {
        return Err(MatcherError::TooManyMatchers {
            combinator,
            count,
            max: MAX_MATCHERS_PER_COMBINATOR,
        });
    }
    Ok(())
}

// ═══════════════════════════════════════════════════════════════════════════════
// AllOf
// ═══════════════════════════════════════════════════════════════════════════════

/// Matches when every child matches.
///
/// Describes itself as `(<d1> and <d2> and ...)`. On a mismatch, reports the
/// first failing child: `<child description> <child mismatch>`.
///
/// # Example
///
/// ```
/// use verimatch::{all_of, containing, starting_with, Matcher};
///
/// let m = all_of![starting_with("he"), containing("ll")]?;
/// assert!(m.matches("hello"));
/// assert!(!m.matches("help"));
/// assert_eq!(m.to_string(), "(a string starting with \"he\" and a string containing \"ll\")");
/// # Ok::<(), verimatch::MatcherError>(())
/// ```
pub struct AllOf<T: ?Sized + DescribeValue> {
    matchers: Vec<Box<dyn Matcher<T>>>,
}

impl<T: ?Sized + DescribeValue> AllOf<T> {
    /// Combine `matchers` with AND semantics.
    ///
    /// # Errors
    ///
    /// Returns [`MatcherError::EmptyCombinator`] if `matchers` is empty, or
    /// [`MatcherError::TooManyMatchers`] if it exceeds
    /// [`MAX_MATCHERS_PER_COMBINATOR`].
    pub fn new(matchers: Vec<Box<dyn Matcher<T>>>) -> Result<Self, MatcherError> {
        check_width("all_of", matchers.len())?;
        Ok(Self { matchers })
    }

    /// The children, in evaluation order.
    #[must_use]
    pub fn matchers(&self) -> &[Box<dyn Matcher<T>>] {
        &self.matchers
    }
}

impl<T: ?Sized + DescribeValue> SelfDescribing for AllOf<T> {
    fn describe_to(&self, description: &mut dyn Description) {
        description.append_list("(", " and ", ")", &self.matchers);
    }
}

impl<T: ?Sized + DescribeValue> AllOf<T> {
    fn first_failure(&self, actual: &T) -> Option<&dyn Matcher<T>> {
        let index = self.matchers.iter().position(|m| !m.matches(actual))?;
        tracing::trace!(
            index,
            remaining = self.matchers.len() - index - 1,
            "all_of short-circuited on failing child"
        );
        Some(self.matchers[index].as_ref())
    }
}

impl<T: ?Sized + DescribeValue> DiagnosingMatcher<T> for AllOf<T> {
    fn matches_with(&self, actual: &T, mismatch: &mut dyn Description) -> bool {
        let Some(matcher) = self.first_failure(actual) else {
            return true;
        };
        mismatch.append_description_of(matcher).append_text(" ");
        matcher.describe_mismatch(actual, mismatch);
        false
    }
}

impl<T: ?Sized + DescribeValue> Matcher<T> for AllOf<T> {
    // Deciding never asks a child for its mismatch, so nested `AllOf`s
    // evaluate each leaf at most once.
    fn matches(&self, actual: &T) -> bool {
        self.first_failure(actual).is_none()
    }

    fn describe_mismatch(&self, actual: &T, description: &mut dyn Description) {
        diagnosing::describe_mismatch(self, actual, description);
    }
}

impl<T: ?Sized + DescribeValue> fmt::Display for AllOf<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&StringDescription::describe(self))
    }
}

impl<T: ?Sized + DescribeValue> fmt::Debug for AllOf<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("AllOf").field(&self.matchers.len()).finish()
    }
}

// Note: No unsafe impl needed. `Box<dyn Matcher<T>>` is Send + Sync because
// the trait requires it.

// ═══════════════════════════════════════════════════════════════════════════════
// AnyOf
// ═══════════════════════════════════════════════════════════════════════════════

/// Matches when at least one child matches.
///
/// Describes itself as `(<d1> or <d2> or ...)`. When every child fails the
/// mismatch is the plain `was <value>`.
pub struct AnyOf<T: ?Sized + DescribeValue> {
    matchers: Vec<Box<dyn Matcher<T>>>,
}

impl<T: ?Sized + DescribeValue> AnyOf<T> {
    /// Combine `matchers` with OR semantics.
    ///
    /// # Errors
    ///
    /// Returns [`MatcherError::EmptyCombinator`] if `matchers` is empty, or
    /// [`MatcherError::TooManyMatchers`] if it exceeds
    /// [`MAX_MATCHERS_PER_COMBINATOR`].
    pub fn new(matchers: Vec<Box<dyn Matcher<T>>>) -> Result<Self, MatcherError> {
        check_width("any_of", matchers.len())?;
        Ok(Self { matchers })
    }

    /// The children, in evaluation order.
    #[must_use]
    pub fn matchers(&self) -> &[Box<dyn Matcher<T>>] {
        &self.matchers
    }
}

impl<T: ?Sized + DescribeValue> SelfDescribing for AnyOf<T> {
    fn describe_to(&self, description: &mut dyn Description) {
        description.append_list("(", " or ", ")", &self.matchers);
    }
}

impl<T: ?Sized + DescribeValue> Matcher<T> for AnyOf<T> {
    fn matches(&self, actual: &T) -> bool {
        let hit = self.matchers.iter().position(|m| m.matches(actual));
        if let Some(index) = hit {
            tracing::trace!(
                index,
                remaining = self.matchers.len() - index - 1,
                "any_of short-circuited on matching child"
            );
        }
        hit.is_some()
    }
}

impl<T: ?Sized + DescribeValue> fmt::Display for AnyOf<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&StringDescription::describe(self))
    }
}

impl<T: ?Sized + DescribeValue> fmt::Debug for AnyOf<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("AnyOf").field(&self.matchers.len()).finish()
    }
}

// ═══════════════════════════════════════════════════════════════════════════════
// IsNot
// ═══════════════════════════════════════════════════════════════════════════════

/// Inverts its child. Describes itself as `not <child>`.
///
/// ```
/// use verimatch::{equal_to, not, Matcher};
///
/// let m = not(equal_to(3));
/// assert!(!m.matches(&3));
/// assert!(m.matches(&4));
/// ```
#[derive(Debug, Clone)]
pub struct IsNot<M> {
    matcher: M,
}

impl<M> IsNot<M> {
    /// Negate `matcher`.
    #[must_use]
    pub fn new(matcher: M) -> Self {
        Self { matcher }
    }

    /// The negated matcher.
    #[must_use]
    pub fn inner(&self) -> &M {
        &self.matcher
    }
}

impl<M: SelfDescribing> SelfDescribing for IsNot<M> {
    fn describe_to(&self, description: &mut dyn Description) {
        description
            .append_text("not ")
            .append_description_of(&self.matcher);
    }
}

impl<T: ?Sized + DescribeValue, M: Matcher<T>> Matcher<T> for IsNot<M> {
    fn matches(&self, actual: &T) -> bool {
        !self.matcher.matches(actual)
    }
}

/// Negate a matcher.
#[must_use]
pub fn not<M>(matcher: M) -> IsNot<M> {
    IsNot::new(matcher)
}

// ═══════════════════════════════════════════════════════════════════════════════
// Macros
// ═══════════════════════════════════════════════════════════════════════════════

/// Build an [`AllOf`] from one or more matchers over the same subject type.
///
/// Expands to [`AllOf::new`], so it returns a `Result` and enforces the
/// width limit.
///
/// ```
/// use verimatch::{all_of, equal_to, not, Matcher};
///
/// let m = all_of![not(equal_to(1)), not(equal_to(2))]?;
/// assert!(m.matches(&3));
/// assert!(!m.matches(&2));
/// # Ok::<(), verimatch::MatcherError>(())
/// ```
#[macro_export]
macro_rules! all_of {
    ($($matcher:expr),+ $(,)?) => {
        $crate::AllOf::new(vec![$($crate::boxed($matcher)),+])
    };
}

/// Build an [`AnyOf`] from one or more matchers over the same subject type.
///
/// Expands to [`AnyOf::new`], so it returns a `Result`.
///
/// ```
/// use verimatch::{any_of, equal_to, Matcher};
///
/// let m = any_of![equal_to(1), equal_to(2)]?;
/// assert!(m.matches(&2));
/// assert!(!m.matches(&3));
/// # Ok::<(), verimatch::MatcherError>(())
/// ```
#[macro_export]
macro_rules! any_of {
    ($($matcher:expr),+ $(,)?) => {
        $crate::AnyOf::new(vec![$($crate::boxed($matcher)),+])
    };
}
