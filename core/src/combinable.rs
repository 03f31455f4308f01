//! Fluent `both(..).and(..)` / `either(..).or(..)` composition
//!
//! A [`CombinableMatcher`] keeps the flat list of matchers it was built from,
//! so `both(a).and(b).and(c)` is one AND over `[a, b, c]` rather than a nest
//! of two-element ANDs. Switching operator wraps what was built so far as the
//! first element of a new list: `both(a).and(b).or(c)` is `((a and b) or c)`.
//!
//! Every step returns a new matcher. Earlier builders are left untouched and
//! can be extended again in a different direction.
//!
//! A flat list holds at most [`MAX_MATCHERS_PER_COMBINATOR`] matchers.
//! [`try_and`](CombinableMatcher::try_and) and
//! [`try_or`](CombinableMatcher::try_or) report a longer list as an error;
//! `and` and `or` panic with the same message.

use crate::{
    boxed, AllOf, AnyOf, DescribeValue, Description, Matcher, MatcherError, SelfDescribing,
    MAX_MATCHERS_PER_COMBINATOR,
};
use std::fmt;
use std::sync::Arc;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Combination {
    Single,
    All,
    Any,
}

/// A matcher that can be extended with [`and`](Self::and) and
/// [`or`](Self::or).
///
/// # Example
///
/// ```
/// use verimatch::{both, equal_to, not, Matcher};
///
/// let m = both(not(equal_to(4))).and(not(equal_to(5)));
/// assert!(m.matches(&3));
/// assert!(!m.matches(&4));
/// assert_eq!(m.to_string(), "(not <4> and not <5>)");
/// ```
pub struct CombinableMatcher<T: ?Sized + DescribeValue + 'static> {
    combination: Combination,
    first: Arc<dyn Matcher<T>>,
    rest: Vec<Arc<dyn Matcher<T>>>,
    combined: Arc<dyn Matcher<T>>,
}

impl<T: ?Sized + DescribeValue + 'static> CombinableMatcher<T> {
    /// Start from a single matcher.
    pub fn new<M: Matcher<T> + 'static>(matcher: M) -> Self {
        let first: Arc<dyn Matcher<T>> = Arc::new(matcher);
        Self {
            combination: Combination::Single,
            combined: Arc::clone(&first),
            first,
            rest: Vec::new(),
        }
    }

    /// A new matcher that also requires `other`.
    ///
    /// # Panics
    ///
    /// If the AND list would exceed [`MAX_MATCHERS_PER_COMBINATOR`].
    #[must_use]
    pub fn and<M: Matcher<T> + 'static>(&self, other: M) -> Self {
        self.try_and(other).unwrap_or_else(|err| panic!("{err}"))
    }

    /// A new matcher that alternatively accepts `other`.
    ///
    /// # Panics
    ///
    /// If the OR list would exceed [`MAX_MATCHERS_PER_COMBINATOR`].
    #[must_use]
    pub fn or<M: Matcher<T> + 'static>(&self, other: M) -> Self {
        self.try_or(other).unwrap_or_else(|err| panic!("{err}"))
    }

    /// Like [`and`](Self::and), but reports an overlong list as an error.
    ///
    /// # Errors
    ///
    /// Returns [`MatcherError::TooManyMatchers`] past
    /// [`MAX_MATCHERS_PER_COMBINATOR`].
    pub fn try_and<M: Matcher<T> + 'static>(&self, other: M) -> Result<Self, MatcherError> {
        self.extend(Combination::All, Arc::new(other))
    }

    /// Like [`or`](Self::or), but reports an overlong list as an error.
    ///
    /// # Errors
    ///
    /// Returns [`MatcherError::TooManyMatchers`] past
    /// [`MAX_MATCHERS_PER_COMBINATOR`].
    pub fn try_or<M: Matcher<T> + 'static>(&self, other: M) -> Result<Self, MatcherError> {
        self.extend(Combination::Any, Arc::new(other))
    }

    /// Number of matchers in the outermost combination.
    #[must_use]
    pub fn len(&self) -> usize {
        self.rest.len() + 1
    }

    /// Always `false`: a combinable matcher holds at least one matcher.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        false
    }

    fn extend(
        &self,
        combination: Combination,
        other: Arc<dyn Matcher<T>>,
    ) -> Result<Self, MatcherError> {
        let flatten = self.combination == combination || self.combination == Combination::Single;
        let (first, mut rest) = if flatten {
            (Arc::clone(&self.first), self.rest.clone())
        } else {
            (Arc::clone(&self.combined), Vec::new())
        };
        rest.push(other);
        let combined = Self::build(combination, &first, &rest)?;
        Ok(Self {
            combination,
            first,
            rest,
            combined,
        })
    }

    fn build(
        combination: Combination,
        first: &Arc<dyn Matcher<T>>,
        rest: &[Arc<dyn Matcher<T>>],
    ) -> Result<Arc<dyn Matcher<T>>, MatcherError> {
        let all = || -> Vec<Box<dyn Matcher<T>>> {
            std::iter::once(first)
                .chain(rest)
                .map(|m| boxed(Arc::clone(m)))
                .collect()
        };
        Ok(match combination {
            Combination::Single => Arc::clone(first),
            Combination::All => Arc::new(AllOf::new(all())?),
            Combination::Any => Arc::new(AnyOf::new(all())?),
        })
    }
}

impl<T: ?Sized + DescribeValue + 'static> Clone for CombinableMatcher<T> {
    fn clone(&self) -> Self {
        Self {
            combination: self.combination,
            first: Arc::clone(&self.first),
            rest: self.rest.clone(),
            combined: Arc::clone(&self.combined),
        }
    }
}

impl<T: ?Sized + DescribeValue + 'static> SelfDescribing for CombinableMatcher<T> {
    fn describe_to(&self, description: &mut dyn Description) {
        self.combined.describe_to(description);
    }
}

impl<T: ?Sized + DescribeValue + 'static> Matcher<T> for CombinableMatcher<T> {
    fn matches(&self, actual: &T) -> bool {
        self.combined.matches(actual)
    }

    fn describe_mismatch(&self, actual: &T, description: &mut dyn Description) {
        self.combined.describe_mismatch(actual, description);
    }
}

impl<T: ?Sized + DescribeValue + 'static> fmt::Display for CombinableMatcher<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Display::fmt(&*self.combined, f)
    }
}

impl<T: ?Sized + DescribeValue + 'static> fmt::Debug for CombinableMatcher<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("CombinableMatcher")
            .field("combination", &self.combination)
            .field("len", &self.len())
            .finish()
    }
}

// ═══════════════════════════════════════════════════════════════════════════════
// Builders
// ═══════════════════════════════════════════════════════════════════════════════

/// The result of [`both`]: can only continue with [`and`](Self::and).
pub struct CombinableBothMatcher<T: ?Sized + DescribeValue + 'static> {
    start: CombinableMatcher<T>,
}

impl<T: ?Sized + DescribeValue + 'static> CombinableBothMatcher<T> {
    /// Require `other` as well.
    #[must_use]
    pub fn and<M: Matcher<T> + 'static>(&self, other: M) -> CombinableMatcher<T> {
        self.start.and(other)
    }
}

/// The result of [`either`]: can only continue with [`or`](Self::or).
pub struct CombinableEitherMatcher<T: ?Sized + DescribeValue + 'static> {
    start: CombinableMatcher<T>,
}

impl<T: ?Sized + DescribeValue + 'static> CombinableEitherMatcher<T> {
    /// Accept `other` as an alternative.
    #[must_use]
    pub fn or<M: Matcher<T> + 'static>(&self, other: M) -> CombinableMatcher<T> {
        self.start.or(other)
    }
}

/// Start an AND chain: `both(a).and(b)`.
pub fn both<T, M>(matcher: M) -> CombinableBothMatcher<T>
where
    T: ?Sized + DescribeValue + 'static,
    M: Matcher<T> + 'static,
{
    CombinableBothMatcher {
        start: CombinableMatcher::new(matcher),
    }
}

/// Start an OR chain: `either(a).or(b)`.
pub fn either<T, M>(matcher: M) -> CombinableEitherMatcher<T>
where
    T: ?Sized + DescribeValue + 'static,
    M: Matcher<T> + 'static,
{
    CombinableEitherMatcher {
        start: CombinableMatcher::new(matcher),
    }
}
