//! `Matcher` — The core matching capability
//!
//! A matcher answers three questions about a subject of type `T`:
//!
//! 1. [`matches`](Matcher::matches): does this value satisfy me?
//! 2. [`describe_to`](SelfDescribing::describe_to): what would satisfy me?
//! 3. [`describe_mismatch`](Matcher::describe_mismatch): why did this value not?
//!
//! The subject type may be unsized (`str`, `[u8]`, `dyn Trait`), which is how a
//! matcher written for a general type applies to every more specific one.
//!
//! ```
//! use verimatch::{equal_to, Matcher, StringDescription};
//!
//! let m = equal_to(3);
//! assert!(m.matches(&3));
//! assert!(!m.matches(&4));
//! assert_eq!(StringDescription::describe(&m), "<3>");
//! ```

use crate::{DescribeValue, Description, StringDescription};
use std::fmt;
use std::sync::Arc;

/// Anything that can render a description of itself.
pub trait SelfDescribing {
    /// Append a description of `self` to `description`.
    fn describe_to(&self, description: &mut dyn Description);
}

/// A predicate over `T` that can explain itself.
///
/// # Contract
///
/// - `matches` is a pure function of the matcher's construction-time state
///   and the subject. It never mutates the matcher.
/// - `describe_mismatch` is only meaningful for a value `matches` rejected.
///   Its default renders `was <value>`.
///
/// # Thread Safety
///
/// All implementations must be `Send + Sync`, so a matcher tree can be shared
/// across threads and evaluated concurrently.
#[diagnostic::on_unimplemented(
    message = "`{Self}` is not a `Matcher<{T}>`",
    label = "this type cannot match values of type `{T}`",
    note = "implement `SelfDescribing` and `Matcher<{T}>`, or wrap a typed matcher with `type_safe` to match `AnyValue`"
)]
pub trait Matcher<T: ?Sized + DescribeValue>: SelfDescribing + Send + Sync {
    /// Evaluate the matcher against `actual`.
    fn matches(&self, actual: &T) -> bool;

    /// Explain why `actual` does not match.
    fn describe_mismatch(&self, actual: &T, description: &mut dyn Description) {
        describe_mismatch_default(actual, description);
    }
}

/// The default mismatch description: `was <value>`.
pub fn describe_mismatch_default<T: ?Sized + DescribeValue>(
    actual: &T,
    description: &mut dyn Description,
) {
    description.append_text("was ").append_value(actual);
}

/// Box a matcher into a trait object.
///
/// Used by the combinator macros and anywhere a heterogeneous list of
/// matchers over the same subject type is needed.
pub fn boxed<T, M>(matcher: M) -> Box<dyn Matcher<T>>
where
    T: ?Sized + DescribeValue,
    M: Matcher<T> + 'static,
{
    Box::new(matcher)
}

// ═══════════════════════════════════════════════════════════════════════════════
// Pointer impls
// ═══════════════════════════════════════════════════════════════════════════════

impl<S: SelfDescribing + ?Sized> SelfDescribing for &S {
    fn describe_to(&self, description: &mut dyn Description) {
        (**self).describe_to(description);
    }
}

impl<S: SelfDescribing + ?Sized> SelfDescribing for Box<S> {
    fn describe_to(&self, description: &mut dyn Description) {
        (**self).describe_to(description);
    }
}

impl<S: SelfDescribing + ?Sized> SelfDescribing for Arc<S> {
    fn describe_to(&self, description: &mut dyn Description) {
        (**self).describe_to(description);
    }
}

#[diagnostic::do_not_recommend]
impl<T: ?Sized + DescribeValue, M: Matcher<T> + ?Sized> Matcher<T> for &M {
    fn matches(&self, actual: &T) -> bool {
        (**self).matches(actual)
    }

    fn describe_mismatch(&self, actual: &T, description: &mut dyn Description) {
        (**self).describe_mismatch(actual, description);
    }
}

#[diagnostic::do_not_recommend]
impl<T: ?Sized + DescribeValue, M: Matcher<T> + ?Sized> Matcher<T> for Box<M> {
    fn matches(&self, actual: &T) -> bool {
        (**self).matches(actual)
    }

    fn describe_mismatch(&self, actual: &T, description: &mut dyn Description) {
        (**self).describe_mismatch(actual, description);
    }
}

#[diagnostic::do_not_recommend]
impl<T: ?Sized + DescribeValue, M: Matcher<T> + ?Sized> Matcher<T> for Arc<M> {
    fn matches(&self, actual: &T) -> bool {
        (**self).matches(actual)
    }

    fn describe_mismatch(&self, actual: &T, description: &mut dyn Description) {
        (**self).describe_mismatch(actual, description);
    }
}

impl<T: ?Sized + DescribeValue> fmt::Display for dyn Matcher<T> + '_ {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&StringDescription::describe(self))
    }
}

impl<T: ?Sized + DescribeValue> fmt::Debug for dyn Matcher<T> + '_ {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("Matcher")
            .field(&StringDescription::describe(self))
            .finish()
    }
}
