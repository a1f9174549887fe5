//! Message field values
use std::{
    borrow::Cow,
    fmt::Display,
    hash::{Hash, Hasher},
};

use crate::error::ParseError;

/// A single message field: a start-line token, a status code, or one header
/// value.
///
/// A value may be assigned as text, raw bytes, or an integer. Equality is
/// total across the three representations: both operands are reduced to
/// their canonical byte form before comparing. Integers render as base-10
/// ASCII digits with no leading zeros, so `Value::from(12)`,
/// `Value::from("12")`, and `Value::from(b"12".as_slice())` all compare
/// equal.
#[derive(Debug, Clone)]
pub enum Value {
    Text(String),
    Bytes(Vec<u8>),
    Int(i64),
}

impl Value {
    /// Returns the canonical byte form of the value.
    pub fn as_bytes(&self) -> Cow<'_, [u8]> {
        match self {
            Self::Text(text) => Cow::Borrowed(text.as_bytes()),
            Self::Bytes(bytes) => Cow::Borrowed(bytes),
            Self::Int(num) => Cow::Owned(num.to_string().into_bytes()),
        }
    }

    /// Consumes the value and returns its canonical byte form.
    pub fn into_bytes(self) -> Vec<u8> {
        match self {
            Self::Text(text) => text.into_bytes(),
            Self::Bytes(bytes) => bytes,
            Self::Int(num) => num.to_string().into_bytes(),
        }
    }

    pub fn to_string_lossy(&self) -> Cow<'_, str> {
        match self {
            Self::Text(text) => Cow::Borrowed(text),
            Self::Bytes(bytes) => String::from_utf8_lossy(bytes),
            Self::Int(num) => Cow::Owned(num.to_string()),
        }
    }

    /// Converts the value to an integer.
    ///
    /// Text and byte values must be ASCII digits with an optional leading
    /// `-`. Anything else fails with [`ParseErrorKind::InvalidNumber`];
    /// values are never silently coerced.
    ///
    /// [`ParseErrorKind::InvalidNumber`]: crate::error::ParseErrorKind::InvalidNumber
    pub fn to_int(&self) -> Result<i64, ParseError> {
        match self {
            Self::Int(num) => Ok(*num),
            _ => crate::parse::parse_i64_strict(&self.as_bytes()),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.as_bytes().is_empty()
    }

    pub fn is_text(&self) -> bool {
        matches!(self, Self::Text(..))
    }

    pub fn is_int(&self) -> bool {
        matches!(self, Self::Int(..))
    }
}

impl Default for Value {
    fn default() -> Self {
        Self::Text(String::new())
    }
}

impl PartialEq for Value {
    fn eq(&self, other: &Self) -> bool {
        self.as_bytes() == other.as_bytes()
    }
}

impl Eq for Value {}

impl Hash for Value {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.as_bytes().hash(state)
    }
}

impl Display for Value {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.to_string_lossy())
    }
}

impl From<String> for Value {
    fn from(v: String) -> Self {
        Self::Text(v)
    }
}

impl From<&str> for Value {
    fn from(v: &str) -> Self {
        Self::Text(v.to_owned())
    }
}

impl From<Vec<u8>> for Value {
    fn from(v: Vec<u8>) -> Self {
        Self::Bytes(v)
    }
}

impl From<&[u8]> for Value {
    fn from(v: &[u8]) -> Self {
        Self::Bytes(v.to_vec())
    }
}

impl<const N: usize> From<&[u8; N]> for Value {
    fn from(v: &[u8; N]) -> Self {
        Self::Bytes(v.to_vec())
    }
}

macro_rules! impl_from_int {
    ($($t:ty),+) => {
        $(
            impl From<$t> for Value {
                fn from(v: $t) -> Self {
                    Self::Int(i64::from(v))
                }
            }
        )+
    };
}

impl_from_int!(i8, i16, i32, i64, u8, u16, u32);

macro_rules! impl_eq_bytes {
    ($($t:ty),+) => {
        $(
            impl PartialEq<$t> for Value {
                fn eq(&self, other: &$t) -> bool {
                    *self.as_bytes() == *AsRef::<[u8]>::as_ref(other)
                }
            }
        )+
    };
}

impl_eq_bytes!(str, &str, String, [u8], &[u8], Vec<u8>);

impl<const N: usize> PartialEq<[u8; N]> for Value {
    fn eq(&self, other: &[u8; N]) -> bool {
        *self.as_bytes() == other[..]
    }
}

impl<const N: usize> PartialEq<&[u8; N]> for Value {
    fn eq(&self, other: &&[u8; N]) -> bool {
        *self.as_bytes() == other[..]
    }
}

macro_rules! impl_eq_int {
    ($($t:ty),+) => {
        $(
            impl PartialEq<$t> for Value {
                fn eq(&self, other: &$t) -> bool {
                    *self.as_bytes() == *i64::from(*other).to_string().as_bytes()
                }
            }
        )+
    };
}

impl_eq_int!(i8, i16, i32, i64, u8, u16, u32);

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_value_cross_type_equality() {
        assert_eq!(Value::from("GET"), Value::from(b"GET"));
        assert_eq!(Value::from(200), Value::from("200"));
        assert_eq!(Value::from(200), Value::from(b"200"));

        assert_eq!(Value::from("GET"), "GET");
        assert_eq!(Value::from("GET"), b"GET");
        assert_eq!(Value::from("200"), 200);
        assert_eq!(Value::from(b"200"), 200u16);

        assert_ne!(Value::from("200 "), 200);
        assert_ne!(Value::from("012"), 12);
    }

    #[test]
    fn test_value_canonical_int_rendering() {
        assert_eq!(&*Value::from(0).as_bytes(), b"0");
        assert_eq!(&*Value::from(-42).as_bytes(), b"-42");
        assert_eq!(Value::from(12).into_bytes(), b"12");
    }

    #[test]
    fn test_value_to_int() {
        assert_eq!(Value::from(12).to_int().unwrap(), 12);
        assert_eq!(Value::from("12").to_int().unwrap(), 12);
        assert_eq!(Value::from(b"-7").to_int().unwrap(), -7);

        assert!(Value::from("12a").to_int().is_err());
        assert!(Value::from("").to_int().is_err());
        assert!(Value::from("+12").to_int().is_err());
        assert!(Value::from(b"\xff".as_slice()).to_int().is_err());
    }

    #[test]
    fn test_value_default_is_empty_text() {
        let value = Value::default();

        assert!(value.is_text());
        assert!(value.is_empty());
        assert_eq!(value, "");
    }
}
