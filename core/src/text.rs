//! Text matchers
//!
//! All text matchers accept any `AsRef<str>` subject that can be rendered,
//! which covers `str`, `String`, `&str` and `Box<str>`.
//!
//! - [`SubstringMatcher`] — containing / starting with / ending with,
//!   optionally ignoring case
//! - [`MatchesPattern`] — whole-string regular expression match
//! - [`IsEqualCompressingWhiteSpace`] — equality after collapsing white space

use crate::{
    DescribeValue, Description, Matcher, MatcherError, SelfDescribing, MAX_PATTERN_LENGTH,
    MAX_REGEX_PATTERN_LENGTH,
};
use regex::Regex;
use std::sync::OnceLock;

fn check_pattern_length(pattern: &str, max: usize) -> Result<(), MatcherError> {
    if pattern.len() > max {
        return Err(MatcherError::PatternTooLong {
            len: pattern.len(),
            max,
        });
    }
    Ok(())
}

// ═══════════════════════════════════════════════════════════════════════════════
// SubstringMatcher
// ═══════════════════════════════════════════════════════════════════════════════

/// Where the substring must occur.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Relationship {
    /// Anywhere in the subject.
    Containing,
    /// At the start of the subject.
    StartingWith,
    /// At the end of the subject.
    EndingWith,
}

impl Relationship {
    /// The phrase used in descriptions, e.g. `"containing"`.
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Containing => "containing",
            Self::StartingWith => "starting with",
            Self::EndingWith => "ending with",
        }
    }
}

/// Substring matcher.
///
/// Describes itself as `a string containing "foo"`, with ` ignoring case`
/// appended for the case-insensitive forms. The substring is described as
/// given. Case-insensitive matching compares full Unicode lowercase forms of
/// both sides; the substring's form is computed once, at construction.
///
/// # Example
///
/// ```
/// use verimatch::{containing_ignoring_case, starting_with, Matcher, StringDescription};
///
/// assert!(starting_with("/api/").matches("/api/users"));
///
/// let m = containing_ignoring_case("JSON");
/// assert!(m.matches("application/json"));
/// assert_eq!(StringDescription::describe(&m), r#"a string containing "JSON" ignoring case"#);
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SubstringMatcher {
    relationship: Relationship,
    substring: String,
    needle: String,
    ignore_case: bool,
}

impl SubstringMatcher {
    /// Create a substring matcher.
    ///
    /// # Errors
    ///
    /// Returns [`MatcherError::PatternTooLong`] if `substring` exceeds
    /// [`MAX_PATTERN_LENGTH`].
    pub fn new(
        relationship: Relationship,
        substring: impl Into<String>,
        ignore_case: bool,
    ) -> Result<Self, MatcherError> {
        let substring = substring.into();
        check_literal_length(&substring)?;
        let needle = if ignore_case {
            substring.to_lowercase()
        } else {
            substring.clone()
        };
        Ok(Self {
            relationship,
            substring,
            needle,
            ignore_case,
        })
    }

    /// Where the substring must occur.
    #[must_use]
    pub fn relationship(&self) -> Relationship {
        self.relationship
    }

    /// The substring as given.
    #[must_use]
    pub fn substring(&self) -> &str {
        &self.substring
    }

    /// Returns `true` if matching ignores case.
    #[must_use]
    pub fn ignores_case(&self) -> bool {
        self.ignore_case
    }

    fn evaluate(&self, input: &str) -> bool {
        let needle = self.needle.as_str();
        match self.relationship {
            Relationship::Containing => input.contains(needle),
            Relationship::StartingWith => input.starts_with(needle),
            Relationship::EndingWith => input.ends_with(needle),
        }
    }
}

impl SelfDescribing for SubstringMatcher {
    fn describe_to(&self, description: &mut dyn Description) {
        description
            .append_text("a string ")
            .append_text(self.relationship.as_str())
            .append_text(" ")
            .append_value(&self.substring);
        if self.ignore_case {
            description.append_text(" ignoring case");
        }
    }
}

impl<S: ?Sized + AsRef<str> + DescribeValue> Matcher<S> for SubstringMatcher {
    fn matches(&self, actual: &S) -> bool {
        let input = actual.as_ref();
        if self.ignore_case {
            self.evaluate(&input.to_lowercase())
        } else {
            self.evaluate(input)
        }
    }
}

fn literal(
    relationship: Relationship,
    substring: impl Into<String>,
    ignore_case: bool,
) -> SubstringMatcher {
    SubstringMatcher::new(relationship, substring, ignore_case)
        .unwrap_or_else(|err| panic!("{err}"))
}

/// Match strings containing `substring`.
///
/// # Panics
///
/// If `substring` exceeds [`MAX_PATTERN_LENGTH`].
pub fn containing(substring: impl Into<String>) -> SubstringMatcher {
    literal(Relationship::Containing, substring, false)
}

/// Match strings containing `substring`, ignoring case.
///
/// # Panics
///
/// If `substring` exceeds [`MAX_PATTERN_LENGTH`].
pub fn containing_ignoring_case(substring: impl Into<String>) -> SubstringMatcher {
    literal(Relationship::Containing, substring, true)
}

/// Match strings starting with `prefix`.
///
/// # Panics
///
/// If `prefix` exceeds [`MAX_PATTERN_LENGTH`].
pub fn starting_with(prefix: impl Into<String>) -> SubstringMatcher {
    literal(Relationship::StartingWith, prefix, false)
}

/// Match strings starting with `prefix`, ignoring case.
///
/// # Panics
///
/// If `prefix` exceeds [`MAX_PATTERN_LENGTH`].
pub fn starting_with_ignoring_case(prefix: impl Into<String>) -> SubstringMatcher {
    literal(Relationship::StartingWith, prefix, true)
}

/// Match strings ending with `suffix`.
///
/// # Panics
///
/// If `suffix` exceeds [`MAX_PATTERN_LENGTH`].
pub fn ending_with(suffix: impl Into<String>) -> SubstringMatcher {
    literal(Relationship::EndingWith, suffix, false)
}

/// Match strings ending with `suffix`, ignoring case.
///
/// # Panics
///
/// If `suffix` exceeds [`MAX_PATTERN_LENGTH`].
pub fn ending_with_ignoring_case(suffix: impl Into<String>) -> SubstringMatcher {
    literal(Relationship::EndingWith, suffix, true)
}

// ═══════════════════════════════════════════════════════════════════════════════
// MatchesPattern
// ═══════════════════════════════════════════════════════════════════════════════

/// Matches strings that match a regular expression in full.
///
/// The pattern is anchored at both ends, so `\d+` does not match `"a1"`.
/// Matching uses the `regex` crate and runs in linear time.
#[derive(Debug, Clone)]
pub struct MatchesPattern {
    pattern: String,
    regex: Regex,
}

impl MatchesPattern {
    /// Compile `pattern`.
    ///
    /// # Errors
    ///
    /// Returns [`MatcherError::PatternTooLong`] if the pattern exceeds
    /// [`MAX_REGEX_PATTERN_LENGTH`], or [`MatcherError::InvalidPattern`] if it
    /// does not compile.
    pub fn new(pattern: &str) -> Result<Self, MatcherError> {
        check_pattern_length(pattern, MAX_REGEX_PATTERN_LENGTH)?;
        let regex = Regex::new(&format!("^(?:{pattern})$")).map_err(|e| MatcherError::InvalidPattern {
            pattern: pattern.to_string(),
            reason: e.to_string(),
        })?;
        Ok(Self {
            pattern: pattern.to_string(),
            regex,
        })
    }

    /// The pattern as given.
    #[must_use]
    pub fn pattern(&self) -> &str {
        &self.pattern
    }
}

impl SelfDescribing for MatchesPattern {
    fn describe_to(&self, description: &mut dyn Description) {
        description
            .append_text("a string matching the pattern ")
            .append_value(&self.pattern);
    }
}

impl<S: ?Sized + AsRef<str> + DescribeValue> Matcher<S> for MatchesPattern {
    fn matches(&self, actual: &S) -> bool {
        self.regex.is_match(actual.as_ref())
    }
}

/// Match strings matching `pattern` in full.
///
/// # Errors
///
/// See [`MatchesPattern::new`].
pub fn matches_pattern(pattern: &str) -> Result<MatchesPattern, MatcherError> {
    MatchesPattern::new(pattern)
}

// ═══════════════════════════════════════════════════════════════════════════════
// IsEqualCompressingWhiteSpace
// ═══════════════════════════════════════════════════════════════════════════════

fn white_space_run() -> &'static Regex {
    static RUN: OnceLock<Regex> = OnceLock::new();
    // Unicode separators and control characters (tabs, newlines, NBSP, ...).
    RUN.get_or_init(|| Regex::new(r"[\p{Z}\p{C}]+").expect("white space pattern is valid"))
}

fn compress_white_space(text: &str) -> String {
    white_space_run()
        .replace_all(text, " ")
        .trim_matches(' ')
        .to_string()
}

/// Matches strings equal to an expected string once runs of white space are
/// collapsed to a single space and leading and trailing space is removed.
///
/// ```
/// use verimatch::{equal_to_compressing_white_space, Matcher};
///
/// let m = equal_to_compressing_white_space("a b");
/// assert!(m.matches("  a \t\n b "));
/// assert!(!m.matches("ab"));
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct IsEqualCompressingWhiteSpace {
    expected: String,
    compressed: String,
}

impl IsEqualCompressingWhiteSpace {
    /// Match strings equal to `expected` modulo white space.
    ///
    /// # Errors
    ///
    /// Returns [`MatcherError::PatternTooLong`] if `expected` exceeds
    /// [`MAX_PATTERN_LENGTH`].
    pub fn new(expected: impl Into<String>) -> Result<Self, MatcherError> {
        let expected = expected.into();
        check_literal_length(&expected)?;
        let compressed = compress_white_space(&expected);
        Ok(Self {
            expected,
            compressed,
        })
    }

    /// The expected string as given.
    #[must_use]
    pub fn expected(&self) -> &str {
        &self.expected
    }
}

impl SelfDescribing for IsEqualCompressingWhiteSpace {
    fn describe_to(&self, description: &mut dyn Description) {
        description
            .append_text("a string equal to ")
            .append_value(&self.expected)
            .append_text(" compressing white space");
    }
}

impl<S: ?Sized + AsRef<str> + DescribeValue> Matcher<S> for IsEqualCompressingWhiteSpace {
    fn matches(&self, actual: &S) -> bool {
        compress_white_space(actual.as_ref()) == self.compressed
    }

    fn describe_mismatch(&self, actual: &S, description: &mut dyn Description) {
        description.append_text("was ").append_value(actual.as_ref());
    }
}

/// Match strings equal to `expected` modulo white space.
///
/// # Panics
///
/// If `expected` exceeds [`MAX_PATTERN_LENGTH`].
pub fn equal_to_compressing_white_space(expected: impl Into<String>) -> IsEqualCompressingWhiteSpace {
    IsEqualCompressingWhiteSpace::new(expected).unwrap_or_else(|err| panic!("{err}"))
}

/// Check a literal substring against [`MAX_PATTERN_LENGTH`].
pub(crate) fn check_literal_length(literal: &str) -> Result<(), MatcherError> {
    check_pattern_length(literal, MAX_PATTERN_LENGTH)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::StringDescription;

    fn mismatch(matcher: &dyn Matcher<str>, actual: &str) -> String {
        let mut out = StringDescription::new();
        matcher.describe_mismatch(actual, &mut out);
        out.into_string()
    }

    #[test]
    fn test_containing() {
        let m = containing("ell");
        assert!(m.matches("hello"));
        assert!(!m.matches("help"));
        assert!(m.matches(&String::from("yellow")));
        assert_eq!(StringDescription::describe(&m), r#"a string containing "ell""#);
        assert_eq!(mismatch(&m, "help"), r#"was "help""#);
    }

    #[test]
    fn test_starting_and_ending_with() {
        assert!(starting_with("he").matches("hello"));
        assert!(!starting_with("lo").matches("hello"));
        assert!(ending_with("lo").matches("hello"));
        assert!(!ending_with("he").matches("hello"));
        assert_eq!(
            StringDescription::describe(&starting_with("he")),
            r#"a string starting with "he""#
        );
        assert_eq!(
            StringDescription::describe(&ending_with("lo")),
            r#"a string ending with "lo""#
        );
    }

    #[test]
    fn test_empty_substring_matches_everything() {
        assert!(containing("").matches(""));
        assert!(starting_with("").matches("x"));
    }

    #[test]
    fn test_ignoring_case() {
        let m = containing_ignoring_case("ELL");
        assert!(m.matches("HeLLo"));
        assert!(!m.matches("help"));
        assert_eq!(
            StringDescription::describe(&m),
            r#"a string containing "ELL" ignoring case"#
        );
        assert_eq!(m.substring(), "ELL");
        assert!(starting_with_ignoring_case("ÉT").matches("état"));
        assert!(ending_with_ignoring_case("SS").matches("class"));
    }

    #[test]
    fn test_matches_pattern_is_anchored() {
        let m = matches_pattern(r"\d+").unwrap();
        assert!(m.matches("123"));
        assert!(!m.matches("a1"));
        assert!(!m.matches("12 "));
        assert_eq!(
            StringDescription::describe(&m),
            r#"a string matching the pattern "\\d+""#
        );
    }

    #[test]
    fn test_matches_pattern_alternation_is_anchored_as_a_whole() {
        let m = matches_pattern("cat|dog").unwrap();
        assert!(m.matches("dog"));
        assert!(!m.matches("hotdog"));
    }

    #[test]
    fn test_invalid_pattern_is_rejected() {
        let err = matches_pattern("(unclosed").unwrap_err();
        assert!(matches!(err, MatcherError::InvalidPattern { ref pattern, .. } if pattern == "(unclosed"));
    }

    #[test]
    fn test_overlong_pattern_is_rejected() {
        let pattern = "a".repeat(MAX_REGEX_PATTERN_LENGTH + 1);
        assert_eq!(
            matches_pattern(&pattern).unwrap_err(),
            MatcherError::PatternTooLong {
                len: MAX_REGEX_PATTERN_LENGTH + 1,
                max: MAX_REGEX_PATTERN_LENGTH,
            }
        );
    }

    #[test]
    fn test_compressing_white_space() {
        let m = equal_to_compressing_white_space(" hello \t world\n");
        assert!(m.matches("hello world"));
        assert!(m.matches("hello\u{a0}\u{a0}world"));
        assert!(m.matches("\r\nhello   world  "));
        assert!(!m.matches("helloworld"));
        assert!(!m.matches("hello  wor ld"));
    }

    #[test]
    fn test_compressing_white_space_rendering() {
        let m = equal_to_compressing_white_space("a  b");
        assert_eq!(
            StringDescription::describe(&m),
            r#"a string equal to "a  b" compressing white space"#
        );
        assert_eq!(mismatch(&m, "a\tc"), r#"was "a\tc""#);
    }

    #[test]
    fn test_literal_length_limit() {
        assert!(check_literal_length("short").is_ok());
        assert!(check_literal_length(&"x".repeat(MAX_PATTERN_LENGTH + 1)).is_err());
    }

    #[test]
    fn test_overlong_literal_is_rejected_by_constructors() {
        let literal = "x".repeat(MAX_PATTERN_LENGTH + 1);
        let too_long = MatcherError::PatternTooLong {
            len: MAX_PATTERN_LENGTH + 1,
            max: MAX_PATTERN_LENGTH,
        };
        assert_eq!(
            SubstringMatcher::new(Relationship::Containing, literal.as_str(), true).unwrap_err(),
            too_long
        );
        assert_eq!(
            IsEqualCompressingWhiteSpace::new(literal.as_str()).unwrap_err(),
            too_long
        );
        assert!(SubstringMatcher::new(Relationship::EndingWith, "x".repeat(MAX_PATTERN_LENGTH), false).is_ok());
    }

    #[test]
    #[should_panic(expected = "pattern length")]
    fn test_overlong_literal_panics_in_factory() {
        let _ = containing("x".repeat(MAX_PATTERN_LENGTH + 1));
    }
}
