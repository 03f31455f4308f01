//! `Description` — Append-only text sink for matcher output
//!
//! Matchers never build strings themselves. They append into a [`Description`]
//! owned by whoever asked for the text (an assertion, a `Display` impl, a CLI).
//!
//! # Sinks
//!
//! - [`StringDescription`] — Accumulates text into a `String`
//! - [`NullDescription`] — Discards everything (used when only the boolean matters)
//!
//! # Chaining
//!
//! The rendering helpers live on `dyn Description`, so anything a matcher
//! receives as `&mut dyn Description` chains:
//!
//! ```
//! use verimatch::{Description, StringDescription};
//!
//! let mut out = StringDescription::new();
//! let sink: &mut dyn Description = &mut out;
//! sink.append_text("was ").append_value(&5u8);
//! assert_eq!(out.as_str(), "was <5b>");
//! ```

use crate::{DescribeValue, SelfDescribing};
use std::fmt;

/// Destination for rendered matcher text.
///
/// Implementations only provide [`append`](Self::append). Everything else
/// (value formatting, lists, nested descriptions) is built on top of it and is
/// available on `dyn Description`.
///
/// A description is owned by a single render call. Matchers write into it
/// and must not keep it.
pub trait Description {
    /// Append raw text, unformatted.
    fn append(&mut self, text: &str);
}

impl dyn Description + '_ {
    /// Append plain text.
    pub fn append_text(&mut self, text: &str) -> &mut Self {
        self.append(text);
        self
    }

    /// Append a value using its [`DescribeValue`] formatting
    /// (`"quoted"` strings, `<5b>` tagged numbers, `[a, b]` lists, `null`).
    pub fn append_value<V: DescribeValue + ?Sized>(&mut self, value: &V) -> &mut Self {
        value.describe_value(self);
        self
    }

    /// Append the description of a matcher or other self-describing value.
    pub fn append_description_of<S: SelfDescribing + ?Sized>(&mut self, value: &S) -> &mut Self {
        value.describe_to(self);
        self
    }

    /// Append `start`, each item's description separated by `separator`, then `end`.
    pub fn append_list<I>(&mut self, start: &str, separator: &str, end: &str, values: I) -> &mut Self
    where
        I: IntoIterator,
        I::Item: SelfDescribing,
    {
        self.append(start);
        for (index, value) in values.into_iter().enumerate() {
            if index > 0 {
                self.append(separator);
            }
            value.describe_to(self);
        }
        self.append(end);
        self
    }

    /// Like [`append_list`](Self::append_list), but for plain values.
    pub fn append_value_list<I>(
        &mut self,
        start: &str,
        separator: &str,
        end: &str,
        values: I,
    ) -> &mut Self
    where
        I: IntoIterator,
        I::Item: DescribeValue,
    {
        self.append_list(
            start,
            separator,
            end,
            values.into_iter().map(SelfDescribingValue),
        )
    }
}

/// A plain value dressed up as [`SelfDescribing`], so value lists and matcher
/// lists render through the same loop.
#[derive(Debug, Clone, Copy)]
pub struct SelfDescribingValue<V>(pub V);

impl<V: DescribeValue> SelfDescribing for SelfDescribingValue<V> {
    fn describe_to(&self, description: &mut dyn Description) {
        description.append_value(&self.0);
    }
}

// ═══════════════════════════════════════════════════════════════════════════════
// Sinks
// ═══════════════════════════════════════════════════════════════════════════════

/// A [`Description`] that accumulates text in a `String`.
///
/// # Example
///
/// ```
/// use verimatch::{equal_to, StringDescription};
///
/// assert_eq!(StringDescription::describe(&equal_to(3)), "<3>");
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct StringDescription {
    out: String,
}

impl StringDescription {
    /// Create an empty description.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Render a self-describing value into a fresh string.
    #[must_use]
    pub fn describe<S: SelfDescribing + ?Sized>(value: &S) -> String {
        let mut description = Self::new();
        value.describe_to(&mut description);
        description.out
    }

    /// Render a plain value into a fresh string.
    #[must_use]
    pub fn describe_value<V: DescribeValue + ?Sized>(value: &V) -> String {
        let mut description = Self::new();
        value.describe_value(&mut description);
        description.out
    }

    /// The text accumulated so far.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.out
    }

    /// Consume the description, returning its text.
    #[must_use]
    pub fn into_string(self) -> String {
        self.out
    }

    /// Returns `true` if nothing has been appended.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.out.is_empty()
    }
}

impl Description for StringDescription {
    fn append(&mut self, text: &str) {
        self.out.push_str(text);
    }
}

impl fmt::Display for StringDescription {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.out)
    }
}

/// A [`Description`] that discards everything appended to it.
#[derive(Debug, Clone, Copy, Default)]
pub struct NullDescription;

impl Description for NullDescription {
    fn append(&mut self, _text: &str) {}
}

impl Description for String {
    fn append(&mut self, text: &str) {
        self.push_str(text);
    }
}

// ═══════════════════════════════════════════════════════════════════════════════
// Escaping
// ═══════════════════════════════════════════════════════════════════════════════

/// Append `text` wrapped in double quotes, escaping `"`, `\n`, `\r`, `\t` and `\`.
pub(crate) fn append_quoted(description: &mut dyn Description, text: &str) {
    let mut quoted = String::with_capacity(text.len() + 2);
    quoted.push('"');
    for ch in text.chars() {
        push_escaped(&mut quoted, ch);
    }
    quoted.push('"');
    description.append(&quoted);
}

fn push_escaped(out: &mut String, ch: char) {
    match ch {
        '"' => out.push_str("\\\""),
        '\n' => out.push_str("\\n"),
        '\r' => out.push_str("\\r"),
        '\t' => out.push_str("\\t"),
        '\\' => out.push_str("\\\\"),
        other => out.push(other),
    }
}
