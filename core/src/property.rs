//! `PropertySource` — Named, readable properties of a value
//!
//! [`SamePropertyValuesAs`](crate::SamePropertyValuesAs) compares values
//! property by property. A type takes part by implementing
//! [`PropertySource`]: list its property names, and read one by name.
//! [`PropertyMap`] is a ready-made implementation for ad-hoc records.

use crate::{DescribeValue, Description, PropertyValue};
use std::collections::BTreeMap;

/// A property could not be read.
///
/// This is not a mismatch: it means the value itself is broken, and is
/// reported as an error rather than as a failed match.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("failed to read property `{property}`: {reason}")]
pub struct PropertyError {
    /// The property being read.
    pub property: String,
    /// What went wrong.
    pub reason: String,
}

impl PropertyError {
    /// Create a property read error.
    pub fn new(property: impl Into<String>, reason: impl Into<String>) -> Self {
        Self {
            property: property.into(),
            reason: reason.into(),
        }
    }

    /// The property does not exist on this value.
    pub fn unknown(property: impl Into<String>) -> Self {
        Self::new(property, "no such property")
    }
}

/// Exposes a value's properties by name.
///
/// # Thread Safety
///
/// Implementations must be `Send + Sync`, since matchers holding a snapshot
/// of the properties are shared across threads.
///
/// # Example
///
/// ```
/// use verimatch::{describe_value_by_debug, PropertyError, PropertySource, PropertyValue};
///
/// #[derive(Debug)]
/// struct Person {
///     name: String,
///     age: i64,
/// }
///
/// describe_value_by_debug!(Person);
///
/// impl PropertySource for Person {
///     fn property_names(&self) -> Vec<String> {
///         vec!["age".into(), "name".into()]
///     }
///
///     fn read_property(&self, name: &str) -> Result<PropertyValue, PropertyError> {
///         match name {
///             "age" => Ok(self.age.into()),
///             "name" => Ok(self.name.as_str().into()),
///             other => Err(PropertyError::unknown(other)),
///         }
///     }
/// }
///
/// let bob = Person { name: "Bob".into(), age: 30 };
/// assert_eq!(bob.read_property("age"), Ok(PropertyValue::Int(30)));
/// assert!(bob.source_type().ends_with("Person"));
/// ```
#[diagnostic::on_unimplemented(
    message = "`{Self}` does not expose properties",
    label = "this type does not implement `PropertySource`",
    note = "implement `PropertySource` by hand, or model the value as a `PropertyMap`"
)]
pub trait PropertySource: DescribeValue + Send + Sync {
    /// The type this value belongs to. Two values are comparable only when
    /// their source types are equal.
    ///
    /// Defaults to the Rust type name.
    fn source_type(&self) -> &str {
        std::any::type_name::<Self>()
    }

    /// Names of all readable properties.
    fn property_names(&self) -> Vec<String>;

    /// Read one property.
    ///
    /// # Errors
    ///
    /// Returns [`PropertyError`] if the property does not exist or cannot be
    /// read.
    fn read_property(&self, name: &str) -> Result<PropertyValue, PropertyError>;
}

/// The last path segment of a type name, without generic arguments:
/// `my_crate::model::Person<T>` becomes `Person`.
pub(crate) fn simple_type_name(type_name: &str) -> &str {
    let base = type_name.split('<').next().unwrap_or(type_name);
    base.rsplit("::").next().unwrap_or(base)
}

// ═══════════════════════════════════════════════════════════════════════════════
// PropertyMap
// ═══════════════════════════════════════════════════════════════════════════════

/// A named record of properties, kept in name order.
///
/// Renders as `<Person {age: <30>, name: "Bob"}>`.
///
/// # Example
///
/// ```
/// use verimatch::{PropertyMap, PropertySource, PropertyValue};
///
/// let bob = PropertyMap::new("Person").with("name", "Bob").with("age", 30);
/// assert_eq!(bob.property_names(), vec!["age", "name"]);
/// assert_eq!(bob.get("name"), Some(&PropertyValue::from("Bob")));
/// ```
#[derive(Debug, Clone, PartialEq, Default)]
pub struct PropertyMap {
    type_name: String,
    properties: BTreeMap<String, PropertyValue>,
}

impl PropertyMap {
    /// An empty record of the given type.
    pub fn new(type_name: impl Into<String>) -> Self {
        Self {
            type_name: type_name.into(),
            properties: BTreeMap::new(),
        }
    }

    /// Add or replace a property.
    #[must_use]
    pub fn with(mut self, name: impl Into<String>, value: impl Into<PropertyValue>) -> Self {
        self.insert(name, value);
        self
    }

    /// Add or replace a property in place.
    pub fn insert(&mut self, name: impl Into<String>, value: impl Into<PropertyValue>) {
        self.properties.insert(name.into(), value.into());
    }

    /// Look up a property.
    #[must_use]
    pub fn get(&self, name: &str) -> Option<&PropertyValue> {
        self.properties.get(name)
    }

    /// The declared type name.
    #[must_use]
    pub fn type_name(&self) -> &str {
        &self.type_name
    }

    /// Number of properties.
    #[must_use]
    pub fn len(&self) -> usize {
        self.properties.len()
    }

    /// Returns `true` if the record has no properties.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.properties.is_empty()
    }
}

impl DescribeValue for PropertyMap {
    fn describe_value(&self, description: &mut dyn Description) {
        description.append("<");
        description.append(&self.type_name);
        description.append(" {");
        for (index, (name, value)) in self.properties.iter().enumerate() {
            if index > 0 {
                description.append(", ");
            }
            description.append(name);
            description.append(": ");
            value.describe_value(description);
        }
        description.append("}>");
    }
}

impl PropertySource for PropertyMap {
    fn source_type(&self) -> &str {
        &self.type_name
    }

    fn property_names(&self) -> Vec<String> {
        self.properties.keys().cloned().collect()
    }

    fn read_property(&self, name: &str) -> Result<PropertyValue, PropertyError> {
        self.properties
            .get(name)
            .cloned()
            .ok_or_else(|| PropertyError::unknown(name))
    }
}
