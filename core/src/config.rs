//! Config types for building text matchers from data.
//!
//! [`MatcherConfig`] is the serde-deserializable form of a text matcher tree.
//! It compiles to a runtime `Box<dyn Matcher<str>>` via
//! [`compile()`](MatcherConfig::compile), which is also where the size limits
//! are enforced.
//!
//! Uses `#[serde(tag = "type")]` for discriminated union deserialization:
//!
//! ```json
//! { "type": "containing", "value": "json", "ignore_case": true }
//! { "type": "all_of", "matchers": [...] }
//! { "type": "not", "matcher": { ... } }
//! ```
//!
//! # Relationship to runtime types
//!
//! | Config variant | Runtime type |
//! |----------------|--------------|
//! | `anything` | [`IsAnything`](crate::IsAnything) |
//! | `equal_to` | [`IsEqual<String>`](crate::IsEqual) |
//! | `containing`, `starting_with`, `ending_with` | [`SubstringMatcher`](crate::SubstringMatcher) |
//! | `matches_pattern` | [`MatchesPattern`](crate::MatchesPattern) |
//! | `equal_compressing_white_space` | [`IsEqualCompressingWhiteSpace`](crate::IsEqualCompressingWhiteSpace) |
//! | `not` | [`IsNot`](crate::IsNot) |
//! | `all_of` | [`AllOf`](crate::AllOf) |
//! | `any_of` | [`AnyOf`](crate::AnyOf) |

use crate::text::check_literal_length;
use crate::{
    anything, anything_described, boxed, equal_to, not, AllOf, AnyOf,
    IsEqualCompressingWhiteSpace, Matcher, MatcherError, MatchesPattern, Relationship,
    SubstringMatcher, MAX_DEPTH,
};
use serde::{Deserialize, Serialize};

/// Configuration for a text matcher.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum MatcherConfig {
    /// Matches every string.
    Anything {
        /// Replacement for the default `ANYTHING` description.
        #[serde(default, skip_serializing_if = "Option::is_none")]
        description: Option<String>,
    },

    /// Exact string equality.
    EqualTo {
        /// The expected string.
        value: String,
    },

    /// The string contains `value`.
    Containing {
        /// The substring.
        value: String,
        /// Compare case-insensitively.
        #[serde(default)]
        ignore_case: bool,
    },

    /// The string starts with `value`.
    StartingWith {
        /// The prefix.
        value: String,
        /// Compare case-insensitively.
        #[serde(default)]
        ignore_case: bool,
    },

    /// The string ends with `value`.
    EndingWith {
        /// The suffix.
        value: String,
        /// Compare case-insensitively.
        #[serde(default)]
        ignore_case: bool,
    },

    /// The whole string matches a regular expression.
    MatchesPattern {
        /// The pattern (Rust `regex` syntax, anchored at both ends).
        pattern: String,
    },

    /// Equality after collapsing white space.
    EqualCompressingWhiteSpace {
        /// The expected string.
        value: String,
    },

    /// Inverts the inner matcher.
    Not {
        /// The matcher to negate.
        matcher: Box<MatcherConfig>,
    },

    /// All matchers must match (logical AND).
    AllOf {
        /// Child matchers, evaluated in order.
        matchers: Vec<MatcherConfig>,
    },

    /// Any matcher must match (logical OR).
    AnyOf {
        /// Child matchers, evaluated in order.
        matchers: Vec<MatcherConfig>,
    },
}

impl MatcherConfig {
    /// Depth of this config tree. Leaves have depth 1.
    #[must_use]
    pub fn depth(&self) -> usize {
        match self {
            Self::Not { matcher } => 1 + matcher.depth(),
            Self::AllOf { matchers } | Self::AnyOf { matchers } => {
                1 + matchers.iter().map(Self::depth).max().unwrap_or(0)
            }
            _ => 1,
        }
    }

    /// Compile this config into a runtime matcher.
    ///
    /// # Errors
    ///
    /// - [`MatcherError::DepthExceeded`] if the tree is deeper than [`MAX_DEPTH`]
    /// - [`MatcherError::EmptyCombinator`] / [`MatcherError::TooManyMatchers`]
    ///   for an empty or oversized `all_of` / `any_of`
    /// - [`MatcherError::PatternTooLong`] for an oversized literal or pattern
    /// - [`MatcherError::InvalidPattern`] if a pattern does not compile
    pub fn compile(&self) -> Result<Box<dyn Matcher<str>>, MatcherError> {
        let depth = self.depth();
        if depth > MAX_DEPTH {
            return Err(MatcherError::DepthExceeded {
                depth,
                max: MAX_DEPTH,
            });
        }
        let matcher = self.compile_node()?;
        tracing::trace!(depth, matcher = %matcher, "compiled matcher config");
        Ok(matcher)
    }

    fn compile_node(&self) -> Result<Box<dyn Matcher<str>>, MatcherError> {
        Ok(match self {
            Self::Anything { description: None } => boxed(anything()),
            Self::Anything {
                description: Some(text),
            } => boxed(anything_described(text.as_str())),
            Self::EqualTo { value } => {
                check_literal_length(value)?;
                boxed(equal_to(value.clone()))
            }
            Self::Containing { value, ignore_case } => {
                substring(Relationship::Containing, value, *ignore_case)?
            }
            Self::StartingWith { value, ignore_case } => {
                substring(Relationship::StartingWith, value, *ignore_case)?
            }
            Self::EndingWith { value, ignore_case } => {
                substring(Relationship::EndingWith, value, *ignore_case)?
            }
            Self::MatchesPattern { pattern } => boxed(MatchesPattern::new(pattern)?),
            Self::EqualCompressingWhiteSpace { value } => {
                boxed(IsEqualCompressingWhiteSpace::new(value.as_str())?)
            }
            Self::Not { matcher } => boxed(not(matcher.compile_node()?)),
            Self::AllOf { matchers } => boxed(AllOf::new(compile_all(matchers)?)?),
            Self::AnyOf { matchers } => boxed(AnyOf::new(compile_all(matchers)?)?),
        })
    }
}

fn substring(
    relationship: Relationship,
    value: &str,
    ignore_case: bool,
) -> Result<Box<dyn Matcher<str>>, MatcherError> {
    Ok(boxed(SubstringMatcher::new(relationship, value, ignore_case)?))
}

fn compile_all(configs: &[MatcherConfig]) -> Result<Vec<Box<dyn Matcher<str>>>, MatcherError> {
    configs.iter().map(MatcherConfig::compile_node).collect()
}
