//! `PropertyValue` — Type-erased property data
//!
//! Records expose their properties as [`PropertyValue`]s so one matcher can
//! compare properties of any type. Primitives are covered by the built-in
//! variants; anything else goes through [`CustomPropertyValue`].
//!
//! # Extensibility via `Custom`
//!
//! Implement [`CustomPropertyValue`] for a domain type and wrap it with
//! `PropertyValue::Custom(Arc::new(value))`.

use crate::{DescribeValue, Description};
use std::any::Any;
use std::fmt::Debug;
use std::sync::Arc;

/// Extension trait for property values the built-in variants don't cover.
///
/// # Example
///
/// ```
/// use std::any::Any;
/// use std::sync::Arc;
/// use verimatch::{describe_value_by_debug, CustomPropertyValue, PropertyValue};
///
/// #[derive(Debug, PartialEq)]
/// struct Point { x: i32, y: i32 }
///
/// describe_value_by_debug!(Point);
///
/// impl CustomPropertyValue for Point {
///     fn custom_type_name(&self) -> &'static str {
///         "point"
///     }
///
///     fn as_any(&self) -> &dyn Any {
///         self
///     }
///
///     fn eq_value(&self, other: &dyn CustomPropertyValue) -> bool {
///         other.as_any().downcast_ref::<Point>() == Some(self)
///     }
/// }
///
/// let a = PropertyValue::Custom(Arc::new(Point { x: 1, y: 2 }));
/// let b = PropertyValue::Custom(Arc::new(Point { x: 1, y: 2 }));
/// assert_eq!(a, b);
/// ```
pub trait CustomPropertyValue: DescribeValue + Send + Sync + Debug {
    /// A short type identifier, e.g. `"point"`.
    fn custom_type_name(&self) -> &'static str;

    /// Returns `self` as `&dyn Any` for downcasting.
    fn as_any(&self) -> &dyn Any;

    /// Value equality with another custom value. Values of different
    /// concrete types are never equal.
    fn eq_value(&self, other: &dyn CustomPropertyValue) -> bool;
}

/// The value of one named property.
///
/// Rendered with the usual value rules: `None` as `null`, strings quoted,
/// `Int` as `<30>`, lists as `[..]`.
#[derive(Debug, Clone, Default)]
pub enum PropertyValue {
    /// The property has no value.
    #[default]
    None,

    /// String data.
    String(String),

    /// Integer data.
    Int(i64),

    /// Floating-point data.
    Float(f64),

    /// Boolean data.
    Bool(bool),

    /// Raw bytes.
    Bytes(Vec<u8>),

    /// An ordered list of values.
    List(Vec<PropertyValue>),

    /// A domain-specific value.
    Custom(Arc<dyn CustomPropertyValue>),
}

// Manual PartialEq: trait objects compare through `eq_value`.
impl PartialEq for PropertyValue {
    fn eq(&self, other: &Self) -> bool {
        match (self, other) {
            (Self::None, Self::None) => true,
            (Self::String(a), Self::String(b)) => a == b,
            (Self::Int(a), Self::Int(b)) => a == b,
            (Self::Float(a), Self::Float(b)) => a == b,
            (Self::Bool(a), Self::Bool(b)) => a == b,
            (Self::Bytes(a), Self::Bytes(b)) => a == b,
            (Self::List(a), Self::List(b)) => a == b,
            (Self::Custom(a), Self::Custom(b)) => a.eq_value(&**b),
            _ => false,
        }
    }
}

impl PropertyValue {
    /// Returns `true` if this is the `None` variant.
    #[inline]
    #[must_use]
    pub fn is_none(&self) -> bool {
        matches!(self, Self::None)
    }

    /// Try to get the value as a string slice.
    #[inline]
    #[must_use]
    pub fn as_str(&self) -> Option<&str> {
        match self {
            Self::String(s) => Some(s.as_str()),
            _ => Option::None,
        }
    }

    /// Try to get the value as an integer.
    #[inline]
    #[must_use]
    pub fn as_int(&self) -> Option<i64> {
        match self {
            Self::Int(i) => Some(*i),
            _ => Option::None,
        }
    }

    /// Try to get the value as a float.
    #[inline]
    #[must_use]
    pub fn as_float(&self) -> Option<f64> {
        match self {
            Self::Float(f) => Some(*f),
            _ => Option::None,
        }
    }

    /// Try to get the value as a boolean.
    #[inline]
    #[must_use]
    pub fn as_bool(&self) -> Option<bool> {
        match self {
            Self::Bool(b) => Some(*b),
            _ => Option::None,
        }
    }

    /// Try to get the value as a byte slice.
    #[inline]
    #[must_use]
    pub fn as_bytes(&self) -> Option<&[u8]> {
        match self {
            Self::Bytes(b) => Some(b.as_slice()),
            _ => Option::None,
        }
    }

    /// Try to get the value as a list.
    #[inline]
    #[must_use]
    pub fn as_list(&self) -> Option<&[PropertyValue]> {
        match self {
            Self::List(items) => Some(items.as_slice()),
            _ => Option::None,
        }
    }

    /// Try to get the inner custom value. Use [`CustomPropertyValue::as_any`]
    /// to downcast it.
    #[inline]
    #[must_use]
    pub fn as_custom(&self) -> Option<&dyn CustomPropertyValue> {
        match self {
            Self::Custom(c) => Some(c.as_ref()),
            _ => Option::None,
        }
    }

    /// A short name for the kind of value held.
    #[must_use]
    pub fn type_name(&self) -> &'static str {
        match self {
            Self::None => "none",
            Self::String(_) => "string",
            Self::Int(_) => "int",
            Self::Float(_) => "float",
            Self::Bool(_) => "bool",
            Self::Bytes(_) => "bytes",
            Self::List(_) => "list",
            Self::Custom(c) => c.custom_type_name(),
        }
    }
}

impl DescribeValue for PropertyValue {
    fn describe_value(&self, description: &mut dyn Description) {
        match self {
            Self::None => description.append("null"),
            Self::String(s) => s.describe_value(description),
            Self::Int(i) => description.append(&format!("<{i}>")),
            Self::Float(f) => f.describe_value(description),
            Self::Bool(b) => b.describe_value(description),
            Self::Bytes(b) => b.describe_value(description),
            Self::List(items) => items.describe_value(description),
            Self::Custom(c) => c.describe_value(description),
        }
    }
}

impl From<&str> for PropertyValue {
    fn from(s: &str) -> Self {
        Self::String(s.to_string())
    }
}

impl From<String> for PropertyValue {
    fn from(s: String) -> Self {
        Self::String(s)
    }
}

impl From<i64> for PropertyValue {
    fn from(i: i64) -> Self {
        Self::Int(i)
    }
}

impl From<i32> for PropertyValue {
    fn from(i: i32) -> Self {
        Self::Int(i64::from(i))
    }
}

impl From<f64> for PropertyValue {
    fn from(f: f64) -> Self {
        Self::Float(f)
    }
}

impl From<bool> for PropertyValue {
    fn from(b: bool) -> Self {
        Self::Bool(b)
    }
}

impl From<Vec<u8>> for PropertyValue {
    fn from(b: Vec<u8>) -> Self {
        Self::Bytes(b)
    }
}

impl From<Vec<PropertyValue>> for PropertyValue {
    fn from(items: Vec<PropertyValue>) -> Self {
        Self::List(items)
    }
}

impl<T: Into<PropertyValue>> From<Option<T>> for PropertyValue {
    fn from(value: Option<T>) -> Self {
        value.map_or(Self::None, Into::into)
    }
}
