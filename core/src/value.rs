//! Value rendering and type-erased values
//!
//! [`DescribeValue`] is how a value renders itself inside a description. The
//! built-in impls follow one fixed set of rules, because failure messages are
//! compared verbatim in tests:
//!
//! | Value | Rendered |
//! |-------|----------|
//! | `None`, [`AnyValue::Null`] | `null` |
//! | `str`, `String`, `char` | `"escaped"` |
//! | `i8`/`u8`, `i16`/`u16`, `i64`/`u64`, `f32` | `<5b>`, `<5s>`, `<5L>`, `<5.0F>` |
//! | other numbers, `bool` | `<5>`, `<5.0>`, `<true>` |
//! | slices, arrays, `Vec`, `VecDeque` | `[<1>, <2>]` |
//!
//! Anything else opts in with [`describe_value_by_display!`](crate::describe_value_by_display)
//! or [`describe_value_by_debug!`](crate::describe_value_by_debug), which wrap the
//! textual form in angle brackets.
//!
//! # Type erasure
//!
//! [`AnyValue`] is the untyped subject used by the safe-cast adapter
//! ([`TypeSafe`](crate::TypeSafe)): either null or an [`Object`] that can be
//! downcast back to its concrete type.

use crate::description::append_quoted;
use crate::Description;
use std::any::Any;
use std::collections::VecDeque;
use std::fmt;
use std::panic::{self, AssertUnwindSafe};
use std::sync::Arc;

/// Renders a value into a [`Description`].
#[diagnostic::on_unimplemented(
    message = "`{Self}` cannot be rendered in a matcher description",
    label = "missing `DescribeValue` impl",
    note = "use `describe_value_by_display!` or `describe_value_by_debug!` to render your type through its `Display` or `Debug` impl"
)]
pub trait DescribeValue {
    /// Append this value's rendering to `description`.
    fn describe_value(&self, description: &mut dyn Description);
}

/// Append `<display>`, falling back to `<type@address>` when `Display` fails.
///
/// Rendering never fails: a `Display` impl that errors or panics still
/// produces text. Under `panic = "abort"` a panic cannot be recovered.
pub fn append_display<V: fmt::Display + ?Sized>(description: &mut dyn Description, value: &V) {
    let text = render_or_identity(value, |out| fmt::write(out, format_args!("{value}")));
    append_bracketed(description, &text);
}

/// Append `<debug>`, falling back to `<type@address>` when `Debug` fails.
pub fn append_debug<V: fmt::Debug + ?Sized>(description: &mut dyn Description, value: &V) {
    let text = render_or_identity(value, |out| fmt::write(out, format_args!("{value:?}")));
    append_bracketed(description, &text);
}

fn render_or_identity<V: ?Sized>(
    value: &V,
    write: impl FnOnce(&mut String) -> fmt::Result,
) -> String {
    let mut text = String::new();
    let type_name = std::any::type_name::<V>();
    match panic::catch_unwind(AssertUnwindSafe(|| write(&mut text))) {
        Ok(Ok(())) => text,
        Ok(Err(fmt::Error)) => {
            tracing::debug!(type_name, "formatting failed, rendering identity");
            identity_of(value)
        }
        Err(_) => {
            tracing::debug!(type_name, "formatting panicked, rendering identity");
            identity_of(value)
        }
    }
}

fn identity_of<V: ?Sized>(value: &V) -> String {
    format!("{}@{:p}", std::any::type_name::<V>(), value)
}

fn append_bracketed(description: &mut dyn Description, text: &str) {
    description.append("<");
    description.append(text);
    description.append(">");
}

/// Implement [`DescribeValue`] through the type's `Display` impl (`<text>`).
///
/// ```
/// use verimatch::{describe_value_by_display, StringDescription};
/// use std::fmt;
///
/// struct Celsius(i32);
///
/// impl fmt::Display for Celsius {
///     fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
///         write!(f, "{}°C", self.0)
///     }
/// }
///
/// describe_value_by_display!(Celsius);
///
/// assert_eq!(StringDescription::describe_value(&Celsius(21)), "<21°C>");
/// ```
#[macro_export]
macro_rules! describe_value_by_display {
    ($($ty:ty),+ $(,)?) => {
        $(
            impl $crate::DescribeValue for $ty {
                fn describe_value(&self, description: &mut dyn $crate::Description) {
                    $crate::append_display(description, self);
                }
            }
        )+
    };
}

/// Implement [`DescribeValue`] through the type's `Debug` impl (`<text>`).
#[macro_export]
macro_rules! describe_value_by_debug {
    ($($ty:ty),+ $(,)?) => {
        $(
            impl $crate::DescribeValue for $ty {
                fn describe_value(&self, description: &mut dyn $crate::Description) {
                    $crate::append_debug(description, self);
                }
            }
        )+
    };
}

// ═══════════════════════════════════════════════════════════════════════════════
// Built-in impls
// ═══════════════════════════════════════════════════════════════════════════════

impl DescribeValue for str {
    fn describe_value(&self, description: &mut dyn Description) {
        append_quoted(description, self);
    }
}

impl DescribeValue for String {
    fn describe_value(&self, description: &mut dyn Description) {
        append_quoted(description, self);
    }
}

impl DescribeValue for char {
    fn describe_value(&self, description: &mut dyn Description) {
        let mut buf = [0u8; 4];
        append_quoted(description, self.encode_utf8(&mut buf));
    }
}

// Width tags keep `<5b>` and `<5L>` apart in failure messages.
macro_rules! describe_tagged {
    ($($ty:ty => $tag:literal),+ $(,)?) => {
        $(
            impl DescribeValue for $ty {
                fn describe_value(&self, description: &mut dyn Description) {
                    description.append(&format!("<{self}{}>", $tag));
                }
            }
        )+
    };
}

describe_tagged!(
    i8 => "b", u8 => "b",
    i16 => "s", u16 => "s",
    i64 => "L", u64 => "L",
);

describe_value_by_display!(i32, u32, i128, u128, isize, usize, bool);

impl DescribeValue for f32 {
    fn describe_value(&self, description: &mut dyn Description) {
        description.append(&format!("<{self:?}F>"));
    }
}

impl DescribeValue for f64 {
    fn describe_value(&self, description: &mut dyn Description) {
        description.append(&format!("<{self:?}>"));
    }
}

impl<V: DescribeValue> DescribeValue for Option<V> {
    fn describe_value(&self, description: &mut dyn Description) {
        match self {
            Some(value) => value.describe_value(description),
            None => description.append("null"),
        }
    }
}

impl<V: DescribeValue> DescribeValue for [V] {
    fn describe_value(&self, description: &mut dyn Description) {
        description.append_value_list("[", ", ", "]", self);
    }
}

impl<V: DescribeValue, const N: usize> DescribeValue for [V; N] {
    fn describe_value(&self, description: &mut dyn Description) {
        self.as_slice().describe_value(description);
    }
}

impl<V: DescribeValue> DescribeValue for Vec<V> {
    fn describe_value(&self, description: &mut dyn Description) {
        self.as_slice().describe_value(description);
    }
}

impl<V: DescribeValue> DescribeValue for VecDeque<V> {
    fn describe_value(&self, description: &mut dyn Description) {
        description.append_value_list("[", ", ", "]", self);
    }
}

impl<V: DescribeValue + ?Sized> DescribeValue for &V {
    fn describe_value(&self, description: &mut dyn Description) {
        (**self).describe_value(description);
    }
}

impl<V: DescribeValue + ?Sized> DescribeValue for Box<V> {
    fn describe_value(&self, description: &mut dyn Description) {
        (**self).describe_value(description);
    }
}

impl<V: DescribeValue + ?Sized> DescribeValue for Arc<V> {
    fn describe_value(&self, description: &mut dyn Description) {
        (**self).describe_value(description);
    }
}

// ═══════════════════════════════════════════════════════════════════════════════
// Type-erased values
// ═══════════════════════════════════════════════════════════════════════════════

/// A renderable value whose concrete type can be recovered at runtime.
///
/// Implemented for every `'static + Send + Sync` type that implements
/// [`DescribeValue`]; there is nothing to implement by hand.
pub trait Object: DescribeValue + Any + Send + Sync {
    /// Returns `self` as `&dyn Any` for downcasting.
    fn as_any(&self) -> &dyn Any;

    /// The concrete type's name, as reported by `std::any::type_name`.
    fn object_type_name(&self) -> &'static str;
}

impl<T: DescribeValue + Any + Send + Sync> Object for T {
    fn as_any(&self) -> &dyn Any {
        self
    }

    fn object_type_name(&self) -> &'static str {
        std::any::type_name::<T>()
    }
}

/// An untyped, possibly-null value.
///
/// This is the subject type for matchers that must cope with "anything",
/// including null: [`IsNull`](crate::IsNull) and the safe-cast adapter
/// [`TypeSafe`](crate::TypeSafe).
///
/// # Example
///
/// ```
/// use verimatch::AnyValue;
///
/// let value = AnyValue::of(42i32);
/// assert_eq!(value.downcast_ref::<i32>(), Some(&42));
/// assert_eq!(value.downcast_ref::<String>(), None);
/// assert!(AnyValue::Null.is_null());
/// ```
#[derive(Clone)]
pub enum AnyValue {
    /// No value.
    Null,

    /// Some value of an arbitrary type.
    Object(Arc<dyn Object>),
}

impl AnyValue {
    /// Wrap a concrete value.
    pub fn of<T: Object>(value: T) -> Self {
        Self::Object(Arc::new(value))
    }

    /// Returns `true` for [`AnyValue::Null`].
    #[inline]
    #[must_use]
    pub fn is_null(&self) -> bool {
        matches!(self, Self::Null)
    }

    /// Downcast to a concrete type. `None` for null or a different type.
    #[must_use]
    pub fn downcast_ref<T: Any>(&self) -> Option<&T> {
        match self {
            Self::Null => None,
            // Deref to `dyn Object` first: `Arc<dyn Object>` is itself an `Object`.
            Self::Object(object) => (**object).as_any().downcast_ref::<T>(),
        }
    }

    /// The runtime type name, or `"null"`.
    #[must_use]
    pub fn type_name(&self) -> &'static str {
        match self {
            Self::Null => "null",
            Self::Object(object) => (**object).object_type_name(),
        }
    }
}

impl<T: Object> From<Option<T>> for AnyValue {
    fn from(value: Option<T>) -> Self {
        value.map_or(Self::Null, Self::of)
    }
}

impl DescribeValue for AnyValue {
    fn describe_value(&self, description: &mut dyn Description) {
        match self {
            Self::Null => description.append("null"),
            Self::Object(object) => (**object).describe_value(description),
        }
    }
}

impl fmt::Debug for AnyValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Null => f.write_str("Null"),
            Self::Object(object) => f
                .debug_tuple("Object")
                .field(&(**object).object_type_name())
                .finish(),
        }
    }
}
