//! Conformance test fixture runner
//!
//! Loads YAML fixtures and runs them against compiled [`MatcherConfig`]s.
//! A fixture pins three things: whether each value matches, the matcher's
//! description, and the mismatch text for values that fail.
//!
//! ```yaml
//! name: containing
//! description: Substring containment
//! matcher: { type: containing, value: json }
//! expected_description: 'a string containing "json"'
//! cases:
//!   - name: hit
//!     value: application/json
//!     matches: true
//!   - name: miss
//!     value: text/html
//!     matches: false
//!     mismatch: 'was "text/html"'
//! ```
//!
//! A fixture with `expect_error` instead asserts that compilation fails with
//! a message containing that text.

use serde::Deserialize;
use verimatch::{Matcher, MatcherConfig, MatcherError, StringDescription};

/// A complete test fixture
#[derive(Debug, Deserialize)]
pub struct Fixture {
    pub name: String,
    #[serde(default)]
    pub description: String,
    pub matcher: MatcherConfig,
    #[serde(default)]
    pub expected_description: Option<String>,
    #[serde(default)]
    pub expect_error: Option<String>,
    #[serde(default)]
    pub cases: Vec<TestCase>,
}

/// Test case
#[derive(Debug, Deserialize)]
pub struct TestCase {
    pub name: String,
    pub value: String,
    pub matches: bool,
    /// Expected mismatch text; only checked when `matches` is `false`.
    #[serde(default)]
    pub mismatch: Option<String>,
}

// ═══════════════════════════════════════════════════════════════════════════════
// Runner
// ═══════════════════════════════════════════════════════════════════════════════

/// Result of running a single test case
#[derive(Debug)]
pub struct CaseResult {
    pub case_name: String,
    pub passed: bool,
    pub expected: String,
    pub actual: String,
}

impl Fixture {
    /// Parse a fixture from YAML
    pub fn from_yaml(yaml: &str) -> Result<Self, serde_yaml::Error> {
        serde_yaml::from_str(yaml)
    }

    /// Parse multiple fixtures from a YAML file with `---` separators
    pub fn from_yaml_multi(yaml: &str) -> Result<Vec<Self>, serde_yaml::Error> {
        let mut fixtures = Vec::new();
        for doc in serde_yaml::Deserializer::from_str(yaml) {
            fixtures.push(Self::deserialize(doc)?);
        }
        Ok(fixtures)
    }

    /// Compile the matcher and run all test cases.
    ///
    /// # Errors
    ///
    /// Returns the compilation error if the matcher config is rejected.
    pub fn run(&self) -> Result<Vec<CaseResult>, MatcherError> {
        let matcher = self.matcher.compile()?;
        Ok(self
            .cases
            .iter()
            .map(|case| run_case(matcher.as_ref(), case))
            .collect())
    }

    /// Run the fixture and panic on the first failure
    pub fn run_and_assert(&self) {
        if let Some(expected) = &self.expect_error {
            match self.matcher.compile() {
                Ok(matcher) => panic!(
                    "Fixture '{}' compiled to '{matcher}', expected error containing {expected:?}",
                    self.name
                ),
                Err(err) => assert!(
                    err.to_string().contains(expected.as_str()),
                    "Fixture '{}' failed with '{err}', expected error containing {expected:?}",
                    self.name
                ),
            }
            return;
        }

        let matcher = self
            .matcher
            .compile()
            .unwrap_or_else(|err| panic!("Fixture '{}' failed to compile: {err}", self.name));

        if let Some(expected) = &self.expected_description {
            let actual = StringDescription::describe(&matcher);
            assert_eq!(
                &actual, expected,
                "Fixture '{}' description differs",
                self.name
            );
        }

        for case in &self.cases {
            let result = run_case(matcher.as_ref(), case);
            assert!(
                result.passed,
                "Fixture '{}' case '{}' failed: expected {}, got {}",
                self.name, result.case_name, result.expected, result.actual
            );
        }
    }
}

fn run_case(matcher: &dyn Matcher<str>, case: &TestCase) -> CaseResult {
    let matched = matcher.matches(&case.value);
    let mut mismatch = StringDescription::new();
    if !matched {
        matcher.describe_mismatch(&case.value, &mut mismatch);
    }

    let mismatch_ok = match (&case.mismatch, matched) {
        (Some(expected), false) => mismatch.as_str() == expected,
        _ => true,
    };

    CaseResult {
        case_name: case.name.clone(),
        passed: matched == case.matches && mismatch_ok,
        expected: summarize(case.matches, case.mismatch.as_deref()),
        actual: summarize(matched, (!matched).then(|| mismatch.as_str())),
    }
}

fn summarize(matched: bool, mismatch: Option<&str>) -> String {
    match (matched, mismatch) {
        (true, _) => "match".to_string(),
        (false, Some(text)) => format!("mismatch ({text})"),
        (false, None) => "mismatch".to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const YAML: &str = r#"
name: prefix
matcher: { type: starting_with, value: "/api" }
expected_description: 'a string starting with "/api"'
cases:
  - name: hit
    value: /api/users
    matches: true
  - name: miss
    value: /health
    matches: false
    mismatch: 'was "/health"'
---
name: empty
matcher: { type: all_of, matchers: [] }
expect_error: needs at least one matcher
"#;

    #[test]
    fn parses_multi_document_yaml() {
        let fixtures = Fixture::from_yaml_multi(YAML).unwrap();
        assert_eq!(fixtures.len(), 2);
        assert_eq!(fixtures[0].cases.len(), 2);
        assert_eq!(fixtures[1].expect_error.as_deref(), Some("needs at least one matcher"));
    }

    #[test]
    fn runs_cases() {
        let fixtures = Fixture::from_yaml_multi(YAML).unwrap();
        let results = fixtures[0].run().unwrap();
        assert!(results.iter().all(|r| r.passed));
        fixtures[0].run_and_assert();
        fixtures[1].run_and_assert();
    }

    #[test]
    fn reports_wrong_mismatch_text() {
        let fixture = Fixture::from_yaml(
            r#"
name: wrong
matcher: { type: equal_to, value: a }
cases:
  - name: miss
    value: b
    matches: false
    mismatch: 'was "c"'
"#,
        )
        .unwrap();
        let results = fixture.run().unwrap();
        assert!(!results[0].passed);
        assert_eq!(results[0].actual, r#"mismatch (was "b")"#);
    }
}
