//! `SamePropertyValuesAs` — Property-by-property comparison with an example
//!
//! The example's properties are read once, at construction, into one
//! equality matcher per property. A candidate then matches when:
//!
//! 1. its source type equals the example's,
//! 2. it exposes no properties beyond the tracked set, and
//! 3. every tracked property equals the candidate's current value.
//!
//! Checks run in that order and stop at the first failure. Ignored
//! property names are left out of steps 2 and 3.

use crate::diagnosing::{self, DiagnosingMatcher};
use crate::property::simple_type_name;
use crate::{
    Description, IsEqual, Matcher, MatcherError, PropertySource, PropertyValue,
    SelfDescribing,
};
use std::collections::BTreeSet;

/// One tracked property: its name and the expected value.
#[derive(Debug, Clone)]
struct PropertyMatcher {
    name: String,
    expected: IsEqual<PropertyValue>,
}

impl PropertyMatcher {
    /// Compare the named property of `actual`; on a difference write
    /// `<name> was <actual value>`.
    fn try_matches_with<C: PropertySource + ?Sized>(
        &self,
        actual: &C,
        mismatch: &mut dyn Description,
    ) -> Result<bool, MatcherError> {
        let value = actual.read_property(&self.name)?;
        if self.expected.matches(&value) {
            return Ok(true);
        }
        mismatch.append_text(&self.name).append_text(" ");
        self.expected.describe_mismatch(&value, mismatch);
        Ok(false)
    }
}

impl SelfDescribing for PropertyMatcher {
    fn describe_to(&self, description: &mut dyn Description) {
        description
            .append_text(&self.name)
            .append_text(": ")
            .append_description_of(&self.expected);
    }
}

/// Matches values whose properties equal those of an example.
///
/// Describes itself as
/// `same property values as Person [age: <30>, name: "Bob"]`, followed by
/// ` ignoring ["nickname"]` when names are ignored.
///
/// A property that cannot be read is a hard failure, not a mismatch:
/// [`try_matches`](Self::try_matches) returns it as an error, and
/// [`Matcher::matches`] panics with it.
///
/// # Example
///
/// ```
/// use verimatch::{same_property_values_as, Matcher, PropertyMap};
///
/// let bob = PropertyMap::new("Person").with("name", "Bob").with("age", 30);
/// let older = PropertyMap::new("Person").with("name", "Bob").with("age", 31);
///
/// assert!(!same_property_values_as(&bob, &[]).unwrap().matches(&older));
/// assert!(same_property_values_as(&bob, &["age"]).unwrap().matches(&older));
/// ```
#[derive(Debug, Clone)]
pub struct SamePropertyValuesAs {
    expected_type: String,
    property_names: BTreeSet<String>,
    property_matchers: Vec<PropertyMatcher>,
    ignored: Vec<String>,
}

impl SamePropertyValuesAs {
    /// Snapshot the properties of `example`, minus `ignored`.
    ///
    /// # Errors
    ///
    /// Returns [`MatcherError::PropertyAccess`] if a property of the example
    /// cannot be read.
    pub fn new<B: PropertySource + ?Sized>(example: &B, ignored: &[&str]) -> Result<Self, MatcherError> {
        let ignored: Vec<String> = ignored.iter().map(|name| (*name).to_string()).collect();
        let property_names = tracked_names(example, &ignored);
        let property_matchers = property_names
            .iter()
            .map(|name| -> Result<PropertyMatcher, MatcherError> {
                Ok(PropertyMatcher {
                    name: name.clone(),
                    expected: IsEqual::new(example.read_property(name)?),
                })
            })
            .collect::<Result<Vec<_>, _>>()?;
        Ok(Self {
            expected_type: example.source_type().to_string(),
            property_names,
            property_matchers,
            ignored,
        })
    }

    /// The tracked property names, in order.
    pub fn property_names(&self) -> impl Iterator<Item = &str> {
        self.property_names.iter().map(String::as_str)
    }

    /// Evaluate against `actual`, reporting unreadable properties as errors.
    ///
    /// # Errors
    ///
    /// Returns [`MatcherError::PropertyAccess`] if a tracked property of
    /// `actual` cannot be read.
    pub fn try_matches<C: PropertySource + ?Sized>(&self, actual: &C) -> Result<bool, MatcherError> {
        self.try_matches_with(actual, &mut crate::NullDescription)
    }

    /// Evaluate against `actual`, writing the reason for a mismatch.
    ///
    /// # Errors
    ///
    /// Returns [`MatcherError::PropertyAccess`] if a tracked property of
    /// `actual` cannot be read.
    pub fn try_matches_with<C: PropertySource + ?Sized>(
        &self,
        actual: &C,
        mismatch: &mut dyn Description,
    ) -> Result<bool, MatcherError> {
        if !self.is_compatible_type(actual, mismatch) || !self.has_no_extra_properties(actual, mismatch) {
            return Ok(false);
        }
        for matcher in &self.property_matchers {
            if !matcher.try_matches_with(actual, mismatch)? {
                return Ok(false);
            }
        }
        Ok(true)
    }

    fn is_compatible_type<C: PropertySource + ?Sized>(&self, actual: &C, mismatch: &mut dyn Description) -> bool {
        if actual.source_type() == self.expected_type {
            return true;
        }
        mismatch
            .append_text("is incompatible type: ")
            .append_text(simple_type_name(actual.source_type()));
        false
    }

    fn has_no_extra_properties<C: PropertySource + ?Sized>(
        &self,
        actual: &C,
        mismatch: &mut dyn Description,
    ) -> bool {
        let extra: Vec<String> = tracked_names(actual, &self.ignored)
            .difference(&self.property_names)
            .cloned()
            .collect();
        if extra.is_empty() {
            return true;
        }
        mismatch.append_text("has extra properties called [");
        mismatch.append_text(&extra.join(", "));
        mismatch.append_text("]");
        false
    }
}

fn tracked_names<B: PropertySource + ?Sized>(source: &B, ignored: &[String]) -> BTreeSet<String> {
    source
        .property_names()
        .into_iter()
        .filter(|name| !ignored.contains(name))
        .collect()
}

impl SelfDescribing for SamePropertyValuesAs {
    fn describe_to(&self, description: &mut dyn Description) {
        description
            .append_text("same property values as ")
            .append_text(simple_type_name(&self.expected_type))
            .append_list(" [", ", ", "]", &self.property_matchers);
        if !self.ignored.is_empty() {
            description
                .append_text(" ignoring ")
                .append_value_list("[", ", ", "]", &self.ignored);
        }
    }
}

impl<C: PropertySource + ?Sized> DiagnosingMatcher<C> for SamePropertyValuesAs {
    /// # Panics
    ///
    /// Panics if a tracked property of `actual` cannot be read.
    fn matches_with(&self, actual: &C, mismatch: &mut dyn Description) -> bool {
        self.try_matches_with(actual, mismatch)
            .unwrap_or_else(|err| panic!("{err}"))
    }
}

impl<C: PropertySource + ?Sized> Matcher<C> for SamePropertyValuesAs {
    fn matches(&self, actual: &C) -> bool {
        diagnosing::matches(self, actual)
    }

    fn describe_mismatch(&self, actual: &C, description: &mut dyn Description) {
        diagnosing::describe_mismatch(self, actual, description);
    }
}

/// Match values whose properties equal those of `example`, ignoring the
/// named properties.
///
/// # Errors
///
/// Returns [`MatcherError::PropertyAccess`] if a property of the example
/// cannot be read.
pub fn same_property_values_as<B: PropertySource + ?Sized>(
    example: &B,
    ignored: &[&str],
) -> Result<SamePropertyValuesAs, MatcherError> {
    SamePropertyValuesAs::new(example, ignored)
}
