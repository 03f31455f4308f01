//! verimatch - Composable, self-describing matchers
//!
//! A matcher decides whether a value meets an expectation and, when it does
//! not, explains why in plain text. Small matchers compose into larger ones,
//! and the failure message is assembled from the pieces.
//!
//! # Architecture
//!
//! - [`Description`] — Append-only text sink with value-rendering rules
//! - [`DescribeValue`] — How a value renders: `"text"`, `<42>`, `[<1>, <2>]`, `null`
//! - [`SelfDescribing`] — Renders itself into a `Description`
//! - [`Matcher<T>`] — Tests a `&T`, describes itself, explains a mismatch
//! - [`DiagnosingMatcher<T>`] — Decision and explanation in one pass
//! - [`AllOf`] / [`AnyOf`] / [`IsNot`] — Short-circuiting logical combinators
//! - [`TypeSafe`] — Applies a typed matcher to a type-erased [`AnyValue`]
//! - [`SamePropertyValuesAs`] — Property-by-property comparison via [`PropertySource`]
//!
//! # Key Design Insights
//!
//! 1. **Rendering is a contract**: descriptions are asserted verbatim in tests,
//!    so every matcher renders through the same [`DescribeValue`] rules.
//!
//! 2. **Left-to-right short-circuit**: combinators stop at the first decisive
//!    child, and that child supplies the mismatch.
//!
//! 3. **Construction fails, evaluation doesn't**: empty or oversized
//!    combinators and bad patterns are rejected with [`MatcherError`] up front.
//!
//! # Example
//!
//! ```
//! use verimatch::prelude::*;
//!
//! let m = both(starting_with("user-")).and(not(ending_with("-0")));
//!
//! assert!(m.matches("user-42"));
//! assert!(!m.matches("user-0"));
//!
//! let failure = check_that("", "user-0", &m).unwrap_err();
//! assert_eq!(
//!     failure.to_string(),
//!     "Expected: (a string starting with \"user-\" and not a string ending with \"-0\")\n     but: not a string ending with \"-0\" was \"user-0\""
//! );
//! ```
//!
//! # Features
//!
//! - `serde` — [`MatcherConfig`], a deserializable text-matcher tree

// ═══════════════════════════════════════════════════════════════════════════════
// Modules
// ═══════════════════════════════════════════════════════════════════════════════

mod assert;
mod basic;
mod combinable;
mod description;
pub mod diagnosing;
mod logical;
mod matcher;
mod property;
mod property_value;
mod same_property_values;
mod text;
mod type_safe;
mod value;

#[cfg(feature = "serde")]
mod config;

// ═══════════════════════════════════════════════════════════════════════════════
// Public API
// ═══════════════════════════════════════════════════════════════════════════════

// Description
pub use description::{Description, NullDescription, SelfDescribingValue, StringDescription};
pub use value::{append_debug, append_display, AnyValue, DescribeValue, Object};

// Core traits
pub use diagnosing::DiagnosingMatcher;
pub use matcher::{boxed, describe_mismatch_default, Matcher, SelfDescribing};
pub use type_safe::{type_safe, TypeSafe};

// Combinators
pub use combinable::{both, either, CombinableBothMatcher, CombinableEitherMatcher, CombinableMatcher};
pub use logical::{not, AllOf, AnyOf, IsNot};

// Concrete matchers
pub use basic::{
    anything, anything_described, custom, equal_to, not_null_value, null_value, CustomMatcher,
    IsAnything, IsEqual, IsNull,
};
pub use text::{
    containing, containing_ignoring_case, ending_with, ending_with_ignoring_case,
    equal_to_compressing_white_space, matches_pattern, starting_with, starting_with_ignoring_case,
    IsEqualCompressingWhiteSpace, MatchesPattern, Relationship, SubstringMatcher,
};

// Properties
pub use property::{PropertyError, PropertyMap, PropertySource};
pub use property_value::{CustomPropertyValue, PropertyValue};
pub use same_property_values::{same_property_values_as, SamePropertyValuesAs};

// Assertions
pub use assert::{assert_that, assert_that_with_reason, check_boolean, check_that, AssertionFailure};

// Config types
#[cfg(feature = "serde")]
pub use config::MatcherConfig;

// ═══════════════════════════════════════════════════════════════════════════════
// Prelude
// ═══════════════════════════════════════════════════════════════════════════════

/// Convenient re-exports for common usage.
///
/// ```
/// use verimatch::prelude::*;
/// ```
pub mod prelude {
    pub use crate::{
        // Factories
        all_of,
        any_of,
        anything,
        // Assertions
        assert_that,
        assert_that_with_reason,
        both,
        check_that,
        containing,
        containing_ignoring_case,
        custom,
        either,
        ending_with,
        ending_with_ignoring_case,
        equal_to,
        equal_to_compressing_white_space,
        matches_pattern,
        not,
        not_null_value,
        null_value,
        same_property_values_as,
        starting_with,
        starting_with_ignoring_case,
        type_safe,
        // Core types
        AnyValue,
        AssertionFailure,
        DescribeValue,
        Description,
        Matcher,
        // Errors
        MatcherError,
        PropertyMap,
        PropertySource,
        PropertyValue,
        SelfDescribing,
        StringDescription,
    };
}

// ═══════════════════════════════════════════════════════════════════════════════
// Constants
// ═══════════════════════════════════════════════════════════════════════════════

/// Maximum allowed depth for nested matcher configs.
///
/// Checked by `MatcherConfig::compile` before any matcher is built.
pub const MAX_DEPTH: usize = 32;

/// Maximum number of children in a single [`AllOf`] or [`AnyOf`].
///
/// A flat list of millions of children stays under [`MAX_DEPTH`] but still
/// costs unbounded memory and evaluation time.
pub const MAX_MATCHERS_PER_COMBINATOR: usize = 256;

/// Maximum length for literal string patterns (equality, substring, white space).
pub const MAX_PATTERN_LENGTH: usize = 8192;

/// Maximum length for regex patterns.
///
/// Shorter than [`MAX_PATTERN_LENGTH`] because compiled regex size grows
/// faster than the pattern text.
pub const MAX_REGEX_PATTERN_LENGTH: usize = 4096;

// ═══════════════════════════════════════════════════════════════════════════════
// Errors
// ═══════════════════════════════════════════════════════════════════════════════

/// Errors from matcher construction.
///
/// These are caught when a matcher is built, never while it evaluates.
/// Fix the inputs and construct the matcher again.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum MatcherError {
    /// An [`AllOf`] or [`AnyOf`] was given no children.
    #[error("{combinator} needs at least one matcher")]
    EmptyCombinator {
        /// `"all_of"` or `"any_of"`.
        combinator: &'static str,
    },

    /// Too many children in an [`AllOf`] or [`AnyOf`].
    #[error("{combinator} has {count} matchers, but maximum allowed is {max}")]
    TooManyMatchers {
        /// `"all_of"` or `"any_of"`.
        combinator: &'static str,
        /// Actual count of children.
        count: usize,
        /// Maximum allowed.
        max: usize,
    },

    /// Matcher nesting exceeds [`MAX_DEPTH`].
    #[error("matcher nesting depth is {depth}, but maximum allowed is {max}")]
    DepthExceeded {
        /// Actual depth of the matcher tree.
        depth: usize,
        /// Maximum allowed depth.
        max: usize,
    },

    /// A regex pattern failed to compile.
    #[error("invalid pattern \"{pattern}\": {reason}")]
    InvalidPattern {
        /// The pattern that failed to compile.
        pattern: String,
        /// The underlying error message.
        reason: String,
    },

    /// A pattern exceeds the maximum allowed length.
    #[error("pattern length is {len}, but maximum allowed is {max}")]
    PatternTooLong {
        /// Actual length of the pattern.
        len: usize,
        /// Maximum allowed length.
        max: usize,
    },

    /// Configuration deserialization failed.
    #[error("invalid config: {reason}")]
    InvalidConfig {
        /// The underlying error message.
        reason: String,
    },

    /// A property of an example value could not be read.
    #[error(transparent)]
    PropertyAccess(#[from] PropertyError),
}
