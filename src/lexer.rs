//! Splitting an input line into a command name and its arguments.

use crate::value::Value;
use std::borrow::Cow;

/// Anything that can hold the text of one input line.
///
/// Byte buffers are treated like C strings: the content ends at the first NUL
/// byte, or at the end of the buffer when there is none. Invalid UTF-8 is
/// replaced rather than rejected.
pub trait Line {
    /// The textual content of the line.
    fn text(&self) -> Cow<'_, str>;
}

impl Line for str {
    fn text(&self) -> Cow<'_, str> {
        Cow::Borrowed(self)
    }
}

impl Line for String {
    fn text(&self) -> Cow<'_, str> {
        Cow::Borrowed(self)
    }
}

impl Line for [u8] {
    fn text(&self) -> Cow<'_, str> {
        let end = self.iter().position(|&b| b == 0).unwrap_or(self.len());
        String::from_utf8_lossy(&self[..end])
    }
}

impl<const N: usize> Line for [u8; N] {
    fn text(&self) -> Cow<'_, str> {
        self.as_slice().text()
    }
}

impl Line for Vec<u8> {
    fn text(&self) -> Cow<'_, str> {
        self.as_slice().text()
    }
}

impl<L: Line + ?Sized> Line for &L {
    fn text(&self) -> Cow<'_, str> {
        (**self).text()
    }
}

/// A tokenized line: the command name followed by its arguments.
///
/// `T` is the argument type, [`Value`] by default. Any type constructible from
/// `&str` works, e.g. plain `String`.
///
/// ```
/// use line_commands::Expression;
///
/// let exp: Expression = Expression::parse("   add  1 -5 0xab ", ' ');
/// assert!(exp.has_command());
/// assert_eq!(exp.command(), "add");
/// assert_eq!(exp.args().len(), 3);
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Expression<T = Value> {
    command: String,
    args: Vec<T>,
}

impl<T> Default for Expression<T> {
    fn default() -> Self {
        Self {
            command: String::new(),
            args: Vec::new(),
        }
    }
}

impl<T: for<'s> From<&'s str>> Expression<T> {
    /// Tokenize `line` on `separator`.
    ///
    /// Runs of separators never produce empty tokens, so leading, trailing and
    /// repeated separators are all ignored. An empty line, or one made of
    /// separators only, yields an expression without a command.
    pub fn parse<L: Line + ?Sized>(line: &L, separator: char) -> Self {
        let text = line.text();
        let mut fields = text
            .split(separator)
            .filter(|field| !field.is_empty() && !field.starts_with(separator));

        let Some(command) = fields.next() else {
            return Self::default();
        };

        Self {
            command: command.to_owned(),
            args: fields.map(|field| T::from(field)).collect(),
        }
    }
}

impl<T> Expression<T> {
    /// The command name; empty when the line held no command.
    pub fn command(&self) -> &str {
        &self.command
    }

    /// The arguments following the command, in order.
    pub fn args(&self) -> &[T] {
        &self.args
    }

    /// `false` for blank lines, which carry nothing to dispatch.
    pub fn has_command(&self) -> bool {
        !self.command.is_empty()
    }

    /// Split into the command name and arguments, or `None` when there is no command.
    pub fn into_parts(self) -> Option<(String, Vec<T>)> {
        if self.has_command() {
            Some((self.command, self.args))
        } else {
            None
        }
    }
}
