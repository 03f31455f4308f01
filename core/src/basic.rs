//! Basic leaf matchers
//!
//! - [`IsEqual`] — `==` against an expected value
//! - [`IsAnything`] — always matches
//! - [`IsNull`] — `None` / [`AnyValue::Null`]
//! - [`CustomMatcher`] — a closure with a fixed description

use crate::{AnyValue, DescribeValue, Description, IsNot, Matcher, SelfDescribing};
use std::fmt;

// ═══════════════════════════════════════════════════════════════════════════════
// IsEqual
// ═══════════════════════════════════════════════════════════════════════════════

/// Matches values equal to an expected value. Describes itself as the
/// rendered expected value (`<3>`, `"foo"`).
///
/// `IsEqual<String>` and `IsEqual<&str>` also match `str` subjects, so
/// string equality composes with the text matchers.
///
/// # Example
///
/// ```
/// use verimatch::{equal_to, Matcher};
///
/// assert!(equal_to(3).matches(&3));
/// assert!(equal_to(String::from("a")).matches("a"));
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct IsEqual<T> {
    expected: T,
}

impl<T> IsEqual<T> {
    /// Match values equal to `expected`.
    #[must_use]
    pub fn new(expected: T) -> Self {
        Self { expected }
    }

    /// The expected value.
    #[must_use]
    pub fn expected(&self) -> &T {
        &self.expected
    }
}

impl<T: DescribeValue> SelfDescribing for IsEqual<T> {
    fn describe_to(&self, description: &mut dyn Description) {
        description.append_value(&self.expected);
    }
}

impl<T: PartialEq + DescribeValue + Send + Sync> Matcher<T> for IsEqual<T> {
    fn matches(&self, actual: &T) -> bool {
        *actual == self.expected
    }
}

impl Matcher<str> for IsEqual<String> {
    fn matches(&self, actual: &str) -> bool {
        actual == self.expected
    }
}

impl Matcher<str> for IsEqual<&'static str> {
    fn matches(&self, actual: &str) -> bool {
        actual == self.expected
    }
}

/// Match values equal to `expected`.
#[must_use]
pub fn equal_to<T>(expected: T) -> IsEqual<T> {
    IsEqual::new(expected)
}

// ═══════════════════════════════════════════════════════════════════════════════
// IsAnything
// ═══════════════════════════════════════════════════════════════════════════════

/// Matches every value.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct IsAnything {
    description: String,
}

impl IsAnything {
    /// Describes itself as `ANYTHING`.
    #[must_use]
    pub fn new() -> Self {
        Self::described("ANYTHING")
    }

    /// Describes itself with the given text.
    pub fn described(description: impl Into<String>) -> Self {
        Self {
            description: description.into(),
        }
    }
}

impl Default for IsAnything {
    fn default() -> Self {
        Self::new()
    }
}

impl SelfDescribing for IsAnything {
    fn describe_to(&self, description: &mut dyn Description) {
        description.append_text(&self.description);
    }
}

impl<T: ?Sized + DescribeValue> Matcher<T> for IsAnything {
    fn matches(&self, _actual: &T) -> bool {
        true
    }
}

/// Match every value.
#[must_use]
pub fn anything() -> IsAnything {
    IsAnything::new()
}

/// Match every value, describing the match with `description`.
pub fn anything_described(description: impl Into<String>) -> IsAnything {
    IsAnything::described(description)
}

// ═══════════════════════════════════════════════════════════════════════════════
// IsNull
// ═══════════════════════════════════════════════════════════════════════════════

/// Matches absent values: `None` for `Option` subjects, [`AnyValue::Null`]
/// for type-erased ones. Describes itself as `null`.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct IsNull;

impl SelfDescribing for IsNull {
    fn describe_to(&self, description: &mut dyn Description) {
        description.append_text("null");
    }
}

impl<V: DescribeValue> Matcher<Option<V>> for IsNull {
    fn matches(&self, actual: &Option<V>) -> bool {
        actual.is_none()
    }
}

impl Matcher<AnyValue> for IsNull {
    fn matches(&self, actual: &AnyValue) -> bool {
        actual.is_null()
    }
}

/// Match absent values.
#[must_use]
pub fn null_value() -> IsNull {
    IsNull
}

/// Match present values. Describes itself as `not null`.
#[must_use]
pub fn not_null_value() -> IsNot<IsNull> {
    IsNot::new(IsNull)
}

// ═══════════════════════════════════════════════════════════════════════════════
// CustomMatcher
// ═══════════════════════════════════════════════════════════════════════════════

/// A closure predicate with a fixed description.
///
/// ```
/// use verimatch::{custom, Matcher, StringDescription};
///
/// let even = custom("an even number", |n: &i32| n % 2 == 0);
/// assert!(even.matches(&4));
/// assert_eq!(StringDescription::describe(&even), "an even number");
/// ```
pub struct CustomMatcher<F> {
    description: String,
    predicate: F,
}

impl<F> CustomMatcher<F> {
    /// Wrap `predicate`, describing it as `description`.
    pub fn new(description: impl Into<String>, predicate: F) -> Self {
        Self {
            description: description.into(),
            predicate,
        }
    }
}

impl<F> SelfDescribing for CustomMatcher<F> {
    fn describe_to(&self, description: &mut dyn Description) {
        description.append_text(&self.description);
    }
}

impl<T, F> Matcher<T> for CustomMatcher<F>
where
    T: ?Sized + DescribeValue,
    F: Fn(&T) -> bool + Send + Sync,
{
    fn matches(&self, actual: &T) -> bool {
        (self.predicate)(actual)
    }
}

impl<F> fmt::Debug for CustomMatcher<F> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("CustomMatcher")
            .field("description", &self.description)
            .finish_non_exhaustive()
    }
}

/// Build a matcher from a closure and a description.
pub fn custom<T, F>(description: impl Into<String>, predicate: F) -> CustomMatcher<F>
where
    T: ?Sized + DescribeValue,
    F: Fn(&T) -> bool + Send + Sync,
{
    CustomMatcher::new(description, predicate)
}
