//! Safe-cast adapter from typed matchers to [`AnyValue`]
//!
//! A `Matcher<T>` only ever sees a `&T`. When the subject is type-erased (it
//! may be null, or any type at all) [`TypeSafe`] checks both before
//! delegating, so the typed matcher never sees a value it cannot handle.

use crate::{describe_mismatch_default, AnyValue, DescribeValue, Description, Matcher, SelfDescribing};
use std::any::Any;
use std::fmt;
use std::marker::PhantomData;

/// Lifts a `Matcher<T>` to a `Matcher<AnyValue>`.
///
/// - Null never matches; the mismatch is `was null` and the typed matcher is
///   not consulted.
/// - A value of another type never matches; the mismatch is
///   `was a <type> (<value>)`.
/// - Otherwise the typed matcher decides and explains.
///
/// The expected type is the generic parameter `T`, fixed at compile time.
///
/// # Example
///
/// ```
/// use verimatch::{equal_to, type_safe, AnyValue, Matcher};
///
/// let m = type_safe::<i32, _>(equal_to(5));
/// assert!(m.matches(&AnyValue::of(5i32)));
/// assert!(!m.matches(&AnyValue::of("5")));
/// assert!(!m.matches(&AnyValue::Null));
/// ```
pub struct TypeSafe<T, M> {
    matcher: M,
    _subject: PhantomData<fn(&T)>,
}

impl<T, M> TypeSafe<T, M>
where
    T: Any + DescribeValue,
    M: Matcher<T>,
{
    /// Wrap a typed matcher.
    #[must_use]
    pub fn new(matcher: M) -> Self {
        Self {
            matcher,
            _subject: PhantomData,
        }
    }

    /// The wrapped typed matcher.
    #[must_use]
    pub fn inner(&self) -> &M {
        &self.matcher
    }

    /// Unwrap, returning the typed matcher.
    #[must_use]
    pub fn into_inner(self) -> M {
        self.matcher
    }
}

impl<T, M: SelfDescribing> SelfDescribing for TypeSafe<T, M> {
    fn describe_to(&self, description: &mut dyn Description) {
        self.matcher.describe_to(description);
    }
}

impl<T, M> Matcher<AnyValue> for TypeSafe<T, M>
where
    T: Any + DescribeValue,
    M: Matcher<T>,
{
    fn matches(&self, actual: &AnyValue) -> bool {
        actual
            .downcast_ref::<T>()
            .is_some_and(|typed| self.matcher.matches(typed))
    }

    fn describe_mismatch(&self, actual: &AnyValue, description: &mut dyn Description) {
        if actual.is_null() {
            describe_mismatch_default(actual, description);
            return;
        }
        match actual.downcast_ref::<T>() {
            Some(typed) => self.matcher.describe_mismatch(typed, description),
            None => {
                description
                    .append_text("was a ")
                    .append_text(actual.type_name())
                    .append_text(" (")
                    .append_value(actual)
                    .append_text(")");
            }
        }
    }
}

impl<T, M: fmt::Debug> fmt::Debug for TypeSafe<T, M> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("TypeSafe")
            .field("expected", &std::any::type_name::<T>())
            .field("matcher", &self.matcher)
            .finish()
    }
}

// Note: No unsafe impl needed. `PhantomData<fn(&T)>` is Send + Sync for every
// `T`, so `TypeSafe` is Send + Sync exactly when the wrapped matcher is.

/// Wrap a typed matcher so it applies to [`AnyValue`].
#[must_use]
pub fn type_safe<T, M>(matcher: M) -> TypeSafe<T, M>
where
    T: Any + DescribeValue,
    M: Matcher<T>,
{
    TypeSafe::new(matcher)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::StringDescription;
    use std::sync::atomic::{AtomicUsize, Ordering};

    /// Strings longer than a bound; counts every call.
    struct LongerThan {
        len: usize,
        calls: AtomicUsize,
    }

    impl LongerThan {
        fn new(len: usize) -> Self {
            Self {
                len,
                calls: AtomicUsize::new(0),
            }
        }

        fn calls(&self) -> usize {
            self.calls.load(Ordering::Relaxed)
        }
    }

    impl SelfDescribing for LongerThan {
        fn describe_to(&self, description: &mut dyn Description) {
            description
                .append_text("a string longer than ")
                .append_value(&self.len);
        }
    }

    impl Matcher<String> for LongerThan {
        fn matches(&self, actual: &String) -> bool {
            self.calls.fetch_add(1, Ordering::Relaxed);
            actual.len() > self.len
        }

        fn describe_mismatch(&self, actual: &String, description: &mut dyn Description) {
            self.calls.fetch_add(1, Ordering::Relaxed);
            description
                .append_text("had length ")
                .append_value(&actual.len());
        }
    }

    fn mismatch(matcher: &dyn Matcher<AnyValue>, actual: &AnyValue) -> String {
        let mut out = StringDescription::new();
        matcher.describe_mismatch(actual, &mut out);
        out.into_string()
    }

    #[test]
    fn test_null_never_matches_and_never_reaches_the_typed_matcher() {
        let inner = LongerThan::new(2);
        let m = type_safe::<String, _>(&inner);
        assert!(!m.matches(&AnyValue::Null));
        assert_eq!(mismatch(&m, &AnyValue::Null), "was null");
        assert_eq!(inner.calls(), 0);
    }

    #[test]
    fn test_wrong_type_is_reported_with_its_name() {
        let inner = LongerThan::new(2);
        let m = type_safe::<String, _>(&inner);
        let value = AnyValue::of(42i32);
        assert!(!m.matches(&value));
        assert_eq!(mismatch(&m, &value), "was a i32 (<42>)");
        assert_eq!(inner.calls(), 0);
    }

    #[test]
    fn test_right_type_delegates() {
        let inner = LongerThan::new(2);
        let m = type_safe::<String, _>(&inner);
        assert!(m.matches(&AnyValue::of(String::from("abc"))));
        assert!(!m.matches(&AnyValue::of(String::from("ab"))));
        assert_eq!(
            mismatch(&m, &AnyValue::of(String::from("ab"))),
            "had length <2>"
        );
        assert_eq!(inner.calls(), 3);
    }

    #[test]
    fn test_description_is_the_typed_matchers() {
        let inner = LongerThan::new(2);
        let m = type_safe::<String, _>(&inner);
        assert_eq!(StringDescription::describe(&m), "a string longer than <2>");
    }

    #[test]
    fn test_type_safe_is_send_sync() {
        fn assert_send_sync<T: Send + Sync>() {}
        assert_send_sync::<TypeSafe<String, Box<dyn Matcher<String>>>>();
    }
}
