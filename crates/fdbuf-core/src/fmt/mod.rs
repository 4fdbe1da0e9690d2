//! Format-directive engine.
//!
//! Interprets `%`-directive format strings against a typed argument
//! slice and appends the rendered text to a byte sink. The grammar is
//! the integer/string subset of POSIX printf: flags, width, precision,
//! and the `d i u o x X c s p` conversions.
//!
//! Reference: POSIX.1-2024 fprintf, ISO C11 7.21.6.1
//!
//! There is no variadic forwarding here. Callers supply [`Arg`] values;
//! an argument whose tag does not match its conversion is a reported
//! [`FormatError`], not undefined behavior. Length modifiers (`h`, `l`,
//! `ll`, …) are absent from the grammar since tagged arguments already
//! carry their full width.

mod parse;
mod render;

pub use parse::parse_format;
pub use render::render_into;

use thiserror::Error;

// ---------------------------------------------------------------------------
// Directive types
// ---------------------------------------------------------------------------

/// Flags parsed from a format directive.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct FormatFlags {
    pub left_justify: bool, // '-'
    pub force_sign: bool,   // '+'
    pub space_sign: bool,   // ' '
    pub alt_form: bool,     // '#'
    pub zero_pad: bool,     // '0'
}

/// Minimum field width.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Width {
    None,
    Fixed(usize),
    FromArg, // '*'
}

/// Precision specification.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Precision {
    None,
    Fixed(usize),
    FromArg, // '.*'
}

/// A parsed format directive.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FormatSpec {
    pub flags: FormatFlags,
    pub width: Width,
    pub precision: Precision,
    pub conversion: u8,
}

/// One piece of a parsed format string.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Segment<'a> {
    /// Literal bytes emitted verbatim.
    Literal(&'a [u8]),
    /// A `%%` escape (emit a single '%').
    Percent,
    /// A conversion directive consuming arguments.
    Spec(FormatSpec),
}

// ---------------------------------------------------------------------------
// Tagged arguments
// ---------------------------------------------------------------------------

/// A typed format argument.
///
/// The positional replacement for a C variadic list: each value carries
/// its own tag, so the renderer can check it against the directive that
/// consumes it.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Arg<'a> {
    /// Signed integer, rendered by `%d` / `%i`.
    Int(i64),
    /// Unsigned integer, rendered by `%u` / `%o` / `%x` / `%X`.
    Uint(u64),
    /// A single byte, rendered by `%c`.
    Char(u8),
    /// A byte string, rendered by `%s`.
    Bytes(&'a [u8]),
    /// An address, rendered by `%p`.
    Ptr(usize),
}

impl From<i8> for Arg<'_> {
    fn from(v: i8) -> Self {
        Arg::Int(v.into())
    }
}

impl From<i16> for Arg<'_> {
    fn from(v: i16) -> Self {
        Arg::Int(v.into())
    }
}

impl From<i32> for Arg<'_> {
    fn from(v: i32) -> Self {
        Arg::Int(v.into())
    }
}

impl From<i64> for Arg<'_> {
    fn from(v: i64) -> Self {
        Arg::Int(v)
    }
}

impl From<isize> for Arg<'_> {
    fn from(v: isize) -> Self {
        Arg::Int(v as i64)
    }
}

impl From<u8> for Arg<'_> {
    fn from(v: u8) -> Self {
        Arg::Char(v)
    }
}

impl From<u16> for Arg<'_> {
    fn from(v: u16) -> Self {
        Arg::Uint(v.into())
    }
}

impl From<u32> for Arg<'_> {
    fn from(v: u32) -> Self {
        Arg::Uint(v.into())
    }
}

impl From<u64> for Arg<'_> {
    fn from(v: u64) -> Self {
        Arg::Uint(v)
    }
}

impl From<usize> for Arg<'_> {
    fn from(v: usize) -> Self {
        Arg::Uint(v as u64)
    }
}

impl<'a> From<&'a [u8]> for Arg<'a> {
    fn from(v: &'a [u8]) -> Self {
        Arg::Bytes(v)
    }
}

impl<'a> From<&'a str> for Arg<'a> {
    fn from(v: &'a str) -> Self {
        Arg::Bytes(v.as_bytes())
    }
}

/// Builds a format-argument slice from plain Rust values.
///
/// ```
/// use fdbuf_core::ByteBuf;
/// use fdbuf_core::fmt_args;
///
/// let mut buf = ByteBuf::new();
/// buf.append_format(b"%s=%d", fmt_args!["answer", 42]).unwrap();
/// assert_eq!(buf.as_slice(), b"answer=42");
/// ```
#[macro_export]
macro_rules! fmt_args {
    () => {
        &[] as &[$crate::fmt::Arg<'_>]
    };
    ($($v:expr),+ $(,)?) => {
        &[$($crate::fmt::Arg::from($v)),+][..]
    };
}

// ---------------------------------------------------------------------------
// Errors
// ---------------------------------------------------------------------------

/// Formatting failure.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum FormatError {
    /// The format string contains a directive the grammar does not
    /// recognize, or ends in the middle of one.
    #[error("malformed format directive at byte {at}")]
    BadDirective { at: usize },
    /// A directive consumed past the end of the argument slice.
    #[error("format string needs argument {index} but only {supplied} were supplied")]
    MissingArg { index: usize, supplied: usize },
    /// An argument's tag does not fit the conversion that consumed it.
    #[error("argument {index} does not match conversion '%{conversion}'")]
    TypeMismatch { index: usize, conversion: char },
}
