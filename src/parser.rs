//! Text-to-value conversion primitives.
//!
//! Every conversion in this crate ends up in one of the parsers below. They work on
//! plain `&str` and report failures through [`ParseError`], whose message always
//! starts with `failed to parse`.

use regex::Regex;
use std::num::IntErrorKind;
use std::sync::LazyLock;

static INTEGER_PATTERN: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^(?:(-)?(0x)?([0-9a-zA-Z]+)|((0x)?0))$").expect("integer pattern is valid")
});
static TRUTHY_PATTERN: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^(?:(t|T)(rue)?|1)$").expect("truthy pattern is valid"));
static FALSY_PATTERN: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^(?:(f|F)(alse)?|0)$").expect("falsy pattern is valid"));

/// Errors that can occur while converting a token into a typed value.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ParseError {
    /// The token does not look like a value of the requested kind at all
    /// (e.g. `"number"` requested as an integer).
    #[error("failed to parse: {0} pattern mismatch")]
    PatternMismatch(&'static str),
    /// The token is well formed but its value does not fit the requested type.
    /// This includes negative values requested as an unsigned type.
    #[error("failed to parse: out of range")]
    OutOfRange,
    /// Any other failure of the underlying parser.
    #[error("failed to parse")]
    Unspecified,
}

/// Parse a boolean from one of `t`, `T`, `true`, `True`, `1` or
/// `f`, `F`, `false`, `False`, `0`. Matching is case sensitive.
pub fn parse_bool(text: &str) -> Result<bool, ParseError> {
    if TRUTHY_PATTERN.is_match(text) {
        Ok(true)
    } else if FALSY_PATTERN.is_match(text) {
        Ok(false)
    } else {
        Err(ParseError::PatternMismatch("boolean"))
    }
}

/// Integer types the integer parser can produce.
///
/// This is the bridge between [`parse_integer`] and the `from_str_radix` family of
/// the standard integer types.
pub trait Integer: Sized + Copy {
    /// `true` for the unsigned primitive types.
    const UNSIGNED: bool;
    /// The zero value of the type.
    const ZERO: Self;

    /// Same contract as the inherent `from_str_radix` of the primitive.
    fn from_str_radix(text: &str, radix: u32) -> Result<Self, std::num::ParseIntError>;
}

macro_rules! impl_integer {
    ($unsigned:expr => $($ty:ty),+) => {
        $(
            impl Integer for $ty {
                const UNSIGNED: bool = $unsigned;
                const ZERO: Self = 0;

                fn from_str_radix(text: &str, radix: u32) -> Result<Self, std::num::ParseIntError> {
                    <$ty>::from_str_radix(text, radix)
                }
            }
        )+
    };
}

impl_integer!(false => i8, i16, i32, i64, i128, isize);
impl_integer!(true => u8, u16, u32, u64, u128, usize);

/// Parse an integer: an optional `-`, an optional `0x` prefix selecting base 16,
/// then the digits.
///
/// ```
/// use line_commands::parser::{parse_integer, ParseError};
///
/// assert_eq!(parse_integer::<u8>("0xff"), Ok(255));
/// assert_eq!(parse_integer::<i32>("-0x0a"), Ok(-10));
/// assert_eq!(parse_integer::<u8>("0xffff"), Err(ParseError::OutOfRange));
/// ```
pub fn parse_integer<T: Integer>(text: &str) -> Result<T, ParseError> {
    let captures = INTEGER_PATTERN
        .captures(text)
        .ok_or(ParseError::PatternMismatch("integer"))?;

    // The second alternative only ever matches the bare zero forms.
    let Some(digits) = captures.get(3) else {
        return Ok(T::ZERO);
    };
    let negative = captures.get(1).is_some();
    let radix = if captures.get(2).is_some() { 16 } else { 10 };

    if negative && T::UNSIGNED {
        // Only `-0` fits into an unsigned type.
        let magnitude = T::from_str_radix(digits.as_str(), radix).map_err(int_error)?;
        return if digits.as_str().bytes().all(|b| b == b'0') {
            Ok(magnitude)
        } else {
            Err(ParseError::OutOfRange)
        };
    }

    let number = if negative {
        format!("-{}", digits.as_str())
    } else {
        digits.as_str().to_owned()
    };
    T::from_str_radix(&number, radix).map_err(int_error)
}

fn int_error(error: std::num::ParseIntError) -> ParseError {
    match error.kind() {
        IntErrorKind::PosOverflow | IntErrorKind::NegOverflow => ParseError::OutOfRange,
        _ => ParseError::Unspecified,
    }
}

/// Fallback textual parse for types outside the closed integer/boolean set.
#[cfg(feature = "float-parse")]
pub fn parse_textual<T: std::str::FromStr>(text: &str) -> Result<T, ParseError> {
    text.parse().map_err(|_| ParseError::Unspecified)
}

/// Convert plain text into any supported type.
///
/// Same conversion as [`crate::value::Value::parse`], usable without wrapping the
/// text into a value first.
pub fn parse_as<T: crate::value::FromValue>(text: &str) -> Result<T, ParseError> {
    T::from_text(text)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_integers() {
        assert_eq!(parse_integer::<i32>("1"), Ok(1));
        assert_eq!(parse_integer::<u8>("0xff"), Ok(255));
        assert_eq!(parse_integer::<i32>("-10"), Ok(-10));
        assert_eq!(parse_integer::<i32>("-0x0a"), Ok(-0x0a));
        assert_eq!(parse_integer::<u64>("0"), Ok(0));
        assert_eq!(parse_integer::<u64>("0x0"), Ok(0));
        assert_eq!(parse_integer::<i8>("-128"), Ok(-128));
        assert_eq!(parse_integer::<u16>("0xABCD"), Ok(0xabcd));
    }

    #[test]
    fn test_parse_integer_out_of_range() {
        assert_eq!(parse_integer::<u8>("0xffff"), Err(ParseError::OutOfRange));
        assert_eq!(parse_integer::<u8>("256"), Err(ParseError::OutOfRange));
        assert_eq!(parse_integer::<i8>("-129"), Err(ParseError::OutOfRange));
        // negative values never fit into unsigned types
        assert_eq!(parse_integer::<u32>("-1"), Err(ParseError::OutOfRange));
        assert_eq!(parse_integer::<usize>("-0x10"), Err(ParseError::OutOfRange));
        assert_eq!(parse_integer::<u32>("-0"), Ok(0));
    }

    #[test]
    fn test_parse_integer_mismatch() {
        assert_eq!(
            parse_integer::<i32>("number!"),
            Err(ParseError::PatternMismatch("integer"))
        );
        assert_eq!(parse_integer::<i32>(""), Err(ParseError::PatternMismatch("integer")));
        assert_eq!(parse_integer::<i32>("+5"), Err(ParseError::PatternMismatch("integer")));
        assert_eq!(parse_integer::<i32>("1 2"), Err(ParseError::PatternMismatch("integer")));
    }

    #[test]
    fn test_parse_integer_alphanumeric_is_not_silently_accepted() {
        // Matches the lexical pattern, but is not a number in base 10.
        assert_eq!(parse_integer::<i32>("number"), Err(ParseError::Unspecified));
        assert_eq!(parse_integer::<i32>("12ab"), Err(ParseError::Unspecified));
        assert_eq!(parse_integer::<i32>("0xfg"), Err(ParseError::Unspecified));
        assert_eq!(parse_integer::<i32>("0x"), Err(ParseError::Unspecified));
    }

    #[test]
    fn test_parse_bool() {
        for text in ["1", "t", "T", "true", "True"] {
            assert_eq!(parse_bool(text), Ok(true), "{text}");
        }
        for text in ["0", "f", "F", "false", "False"] {
            assert_eq!(parse_bool(text), Ok(false), "{text}");
        }
        for text in ["foobar", "TRUE", "yes", "", "truee", "01"] {
            assert_eq!(
                parse_bool(text),
                Err(ParseError::PatternMismatch("boolean")),
                "{text}"
            );
        }
    }

    #[test]
    fn test_error_messages() {
        assert_eq!(
            ParseError::PatternMismatch("integer").to_string(),
            "failed to parse: integer pattern mismatch"
        );
        assert_eq!(
            ParseError::PatternMismatch("boolean").to_string(),
            "failed to parse: boolean pattern mismatch"
        );
        assert_eq!(ParseError::OutOfRange.to_string(), "failed to parse: out of range");
        assert_eq!(ParseError::Unspecified.to_string(), "failed to parse");
    }

    #[test]
    fn test_parse_as() {
        assert_eq!(parse_as::<u16>("0xffff"), Ok(u16::MAX));
        assert_eq!(parse_as::<String>("dummy"), Ok("dummy".to_string()));
        assert!(parse_as::<i32>("number").is_err());
    }

    #[cfg(feature = "float-parse")]
    #[test]
    fn test_parse_textual() {
        assert_eq!(parse_as::<f32>("1.2"), Ok(1.2f32));
        assert_eq!(parse_as::<f64>("number"), Err(ParseError::Unspecified));
    }
}
