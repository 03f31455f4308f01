//! Assertion entry points
//!
//! [`check_that`] evaluates one matcher against one value and, on a
//! mismatch, renders the familiar two-line failure message:
//!
//! ```text
//! Expected: a string starting with "user-"
//!      but: was "admin"
//! ```
//!
//! [`assert_that`] is the panicking form for use inside `#[test]` functions.

use crate::{DescribeValue, Matcher, StringDescription};

/// A failed assertion.
///
/// `Display` renders the full failure message.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("{message}")]
pub struct AssertionFailure {
    /// The complete failure message.
    pub message: String,
    /// The rendered expectation (the matcher's description).
    pub expected: String,
    /// The rendered mismatch of the actual value.
    pub actual: String,
}

impl AssertionFailure {
    fn new(reason: &str, expected: String, actual: String) -> Self {
        let mut message = String::new();
        if !reason.is_empty() {
            message.push_str(reason);
            message.push('\n');
        }
        message.push_str("Expected: ");
        message.push_str(&expected);
        message.push_str("\n     but: ");
        message.push_str(&actual);
        Self {
            message,
            expected,
            actual,
        }
    }
}

/// Check `actual` against `matcher`.
///
/// A non-empty `reason` becomes the first line of the failure message.
///
/// # Errors
///
/// Returns [`AssertionFailure`] if `matcher` does not match `actual`.
///
/// # Example
///
/// ```
/// use verimatch::{check_that, equal_to};
///
/// assert!(check_that("", &3, equal_to(3)).is_ok());
///
/// let failure = check_that("wrong answer", &5, equal_to(3)).unwrap_err();
/// assert_eq!(failure.to_string(), "wrong answer\nExpected: <3>\n     but: was <5>");
/// ```
pub fn check_that<T, M>(reason: &str, actual: &T, matcher: M) -> Result<(), AssertionFailure>
where
    T: ?Sized + DescribeValue,
    M: Matcher<T>,
{
    if matcher.matches(actual) {
        return Ok(());
    }

    let expected = StringDescription::describe(&matcher);
    let mut mismatch = StringDescription::new();
    matcher.describe_mismatch(actual, &mut mismatch);

    let failure = AssertionFailure::new(reason, expected, mismatch.into_string());
    tracing::debug!(expected = %failure.expected, actual = %failure.actual, "assertion failed");
    Err(failure)
}

/// Check a plain condition. The failure message is `reason` alone.
///
/// # Errors
///
/// Returns [`AssertionFailure`] if `condition` is `false`.
pub fn check_boolean(reason: &str, condition: bool) -> Result<(), AssertionFailure> {
    if condition {
        return Ok(());
    }
    tracing::debug!(reason, "boolean assertion failed");
    Err(AssertionFailure {
        message: reason.to_string(),
        expected: "true".to_string(),
        actual: "false".to_string(),
    })
}

/// Assert that `matcher` matches `actual`.
///
/// # Panics
///
/// Panics with the failure message if it does not.
#[track_caller]
pub fn assert_that<T, M>(actual: &T, matcher: M)
where
    T: ?Sized + DescribeValue,
    M: Matcher<T>,
{
    assert_that_with_reason("", actual, matcher);
}

/// Assert that `matcher` matches `actual`, prefixing the failure message
/// with `reason`.
///
/// # Panics
///
/// Panics with the failure message if it does not.
#[track_caller]
pub fn assert_that_with_reason<T, M>(reason: &str, actual: &T, matcher: M)
where
    T: ?Sized + DescribeValue,
    M: Matcher<T>,
{
    if let Err(failure) = check_that(reason, actual, matcher) {
        panic!("{failure}");
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{containing, equal_to, not};

    #[test]
    fn test_match_is_ok() {
        assert_eq!(check_that("", &3i32, equal_to(3i32)), Ok(()));
        assert_eq!(check_that("", "json body", containing("json")), Ok(()));
    }

    #[test]
    fn test_failure_message_without_reason() {
        let failure = check_that("", &5i32, equal_to(3i32)).unwrap_err();
        assert_eq!(failure.message, "Expected: <3>\n     but: was <5>");
        assert_eq!(failure.expected, "<3>");
        assert_eq!(failure.actual, "was <5>");
    }

    #[test]
    fn test_failure_message_with_reason() {
        let failure = check_that("status line", "500", not(equal_to("500"))).unwrap_err();
        assert_eq!(
            failure.to_string(),
            "status line\nExpected: not \"500\"\n     but: was \"500\""
        );
    }

    #[test]
    fn test_check_boolean() {
        assert!(check_boolean("unused", true).is_ok());
        let failure = check_boolean("queue should drain", false).unwrap_err();
        assert_eq!(failure.to_string(), "queue should drain");
    }

    #[test]
    fn test_assert_that_passes() {
        assert_that(&4i32, not(equal_to(3i32)));
        assert_that("abc", containing("b"));
    }

    #[test]
    #[should_panic(expected = "Expected: <3>\n     but: was <4>")]
    fn test_assert_that_panics_with_message() {
        assert_that(&4i32, equal_to(3i32));
    }

    #[test]
    #[should_panic(expected = "retries exhausted")]
    fn test_assert_that_with_reason_panics_with_reason() {
        assert_that_with_reason("retries exhausted", &0u32, equal_to(3u32));
    }
}
