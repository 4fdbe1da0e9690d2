//! Byte accumulator.
//!
//! [`ByteBuf`] is the caller-owned sink formatted output is appended
//! to: a growable, append-only run of bytes. Growth is amortized
//! doubling through `Vec`; the format engine bounds how much a single
//! directive can add.

use crate::fmt::{self, Arg, FormatError};

/// A growable accumulator of bytes.
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct ByteBuf {
    data: Vec<u8>,
}

impl ByteBuf {
    /// Create an empty accumulator.
    pub fn new() -> Self {
        Self { data: Vec::new() }
    }

    /// Create an empty accumulator with room for `capacity` bytes.
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            data: Vec::with_capacity(capacity),
        }
    }

    /// Number of accumulated bytes.
    pub fn len(&self) -> usize {
        self.data.len()
    }

    /// True if nothing has been accumulated.
    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }

    /// The accumulated bytes.
    pub fn as_slice(&self) -> &[u8] {
        &self.data
    }

    /// Append raw bytes. Returns the number of bytes appended.
    pub fn append(&mut self, bytes: &[u8]) -> usize {
        self.data.extend_from_slice(bytes);
        bytes.len()
    }

    /// Append a single byte.
    pub fn push(&mut self, byte: u8) {
        self.data.push(byte);
    }

    /// Append formatted text.
    ///
    /// Renders `fmt` with `args` and appends the result, returning the
    /// number of bytes appended. On error the accumulator keeps its
    /// prior content; no retry or recovery is attempted here.
    ///
    /// ```
    /// use fdbuf_core::ByteBuf;
    /// use fdbuf_core::fmt::Arg;
    ///
    /// let mut buf = ByteBuf::new();
    /// let n = buf.append_format(b"%d-%d", &[Arg::Int(3), Arg::Int(7)]).unwrap();
    /// assert_eq!(n, 3);
    /// assert_eq!(buf.as_slice(), b"3-7");
    /// ```
    pub fn append_format(
        &mut self,
        fmt: &[u8],
        args: &[Arg<'_>],
    ) -> Result<usize, FormatError> {
        fmt::render_into(&mut self.data, fmt, args)
    }

    /// Discard the accumulated bytes, keeping the allocation.
    pub fn clear(&mut self) {
        self.data.clear();
    }

    /// Take the accumulated bytes, leaving the accumulator empty.
    pub fn take(&mut self) -> Vec<u8> {
        std::mem::take(&mut self.data)
    }
}

impl AsRef<[u8]> for ByteBuf {
    fn as_ref(&self) -> &[u8] {
        self.as_slice()
    }
}

impl From<Vec<u8>> for ByteBuf {
    fn from(data: Vec<u8>) -> Self {
        Self { data }
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
