//! Command arguments and their on-demand conversion.

use crate::parser::{self, ParseError};
use std::fmt;
use std::ops::Deref;

mod sealed {
    pub trait Sealed {}
}

/// Types an argument can be converted into.
///
/// The set is closed: booleans, the primitive integer types and `String`
/// (plus `f32`/`f64` with the `float-parse` feature). Asking for anything else is a
/// compile error rather than a runtime failure.
pub trait FromValue: sealed::Sealed + Sized {
    /// Convert the raw token text.
    fn from_text(text: &str) -> Result<Self, ParseError>;
}

impl sealed::Sealed for String {}

impl FromValue for String {
    fn from_text(text: &str) -> Result<Self, ParseError> {
        Ok(text.to_owned())
    }
}

impl sealed::Sealed for bool {}

impl FromValue for bool {
    fn from_text(text: &str) -> Result<Self, ParseError> {
        parser::parse_bool(text)
    }
}

macro_rules! impl_from_value_integer {
    ($($ty:ty),+) => {
        $(
            impl sealed::Sealed for $ty {}

            impl FromValue for $ty {
                fn from_text(text: &str) -> Result<Self, ParseError> {
                    parser::parse_integer(text)
                }
            }
        )+
    };
}

impl_from_value_integer!(i8, i16, i32, i64, i128, isize, u8, u16, u32, u64, u128, usize);

#[cfg(feature = "float-parse")]
macro_rules! impl_from_value_textual {
    ($($ty:ty),+) => {
        $(
            impl sealed::Sealed for $ty {}

            impl FromValue for $ty {
                fn from_text(text: &str) -> Result<Self, ParseError> {
                    parser::parse_textual(text)
                }
            }
        )+
    };
}

#[cfg(feature = "float-parse")]
impl_from_value_textual!(f32, f64);

/// A single argument token, exactly as it appeared on the input line.
///
/// A value has no type of its own; the type is chosen by whoever reads it:
///
/// ```
/// use line_commands::Value;
///
/// let value = Value::from("0x10");
/// assert_eq!(value.parse::<u8>().unwrap(), 16);
/// assert_eq!(value.parse::<String>().unwrap(), "0x10");
/// assert!(value.parse::<bool>().is_err());
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Value {
    text: String,
}

impl Value {
    /// Wrap a token.
    pub fn new(text: impl Into<String>) -> Self {
        Self { text: text.into() }
    }

    /// Convert the token into `T`. Repeated conversions are independent of each other.
    pub fn parse<T: FromValue>(&self) -> Result<T, ParseError> {
        T::from_text(&self.text)
    }

    /// The raw token text.
    pub fn as_str(&self) -> &str {
        &self.text
    }

    /// Unwrap the raw token text.
    pub fn into_string(self) -> String {
        self.text
    }
}

impl Deref for Value {
    type Target = str;

    fn deref(&self) -> &str {
        &self.text
    }
}

impl AsRef<str> for Value {
    fn as_ref(&self) -> &str {
        &self.text
    }
}

impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.text)
    }
}

impl From<&str> for Value {
    fn from(text: &str) -> Self {
        Self::new(text)
    }
}

impl From<String> for Value {
    fn from(text: String) -> Self {
        Self { text }
    }
}

impl From<Value> for String {
    fn from(value: Value) -> Self {
        value.text
    }
}

impl PartialEq<str> for Value {
    fn eq(&self, other: &str) -> bool {
        self.text == other
    }
}

impl PartialEq<&str> for Value {
    fn eq(&self, other: &&str) -> bool {
        self.text == *other
    }
}

impl PartialEq<String> for Value {
    fn eq(&self, other: &String) -> bool {
        &self.text == other
    }
}
