//! Buffered fd writer.
//!
//! [`FdWriter`] stages bytes in a [`ByteBuf`] and drains them to a
//! file descriptor. Small appends accumulate; an append that would
//! overflow the staging area drains the pending bytes and the new
//! bytes together in one scatter call, the same overflow rule the
//! full-buffered stdio path uses.
//!
//! The writer borrows the descriptor: it never closes it, and it never
//! flushes implicitly on drop. Callers flush.

use fdbuf_core::ByteBuf;
use fdbuf_core::fmt::{Arg, FormatError};
use thiserror::Error;

use crate::error::IoError;
use crate::fd::{self, IoVec};

/// Default staging capacity (POSIX BUFSIZ).
pub const DEFAULT_CAPACITY: usize = 8192;

/// Failure of a buffered append: either the formatter rejected the
/// directive/arguments, or the descriptor write failed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum WriteError {
    #[error(transparent)]
    Format(#[from] FormatError),
    #[error(transparent)]
    Io(#[from] IoError),
}

/// A buffered writer over a borrowed file descriptor.
///
/// After a failed drain the staged bytes are left in place; the kernel
/// may already hold a prefix of them, so retrying a failed flush can
/// duplicate output. Callers that need exactness on error paths should
/// write through [`fd::fd_writev`] directly.
#[derive(Debug)]
pub struct FdWriter {
    fd: i32,
    staged: ByteBuf,
    capacity: usize,
}

impl FdWriter {
    /// Wrap `fd` with the default staging capacity.
    pub fn new(fd: i32) -> Self {
        Self::with_capacity(fd, DEFAULT_CAPACITY)
    }

    /// Wrap `fd` with an explicit staging capacity.
    pub fn with_capacity(fd: i32, capacity: usize) -> Self {
        Self {
            fd,
            staged: ByteBuf::with_capacity(capacity.max(1)),
            capacity: capacity.max(1),
        }
    }

    /// The wrapped descriptor.
    pub fn fd(&self) -> i32 {
        self.fd
    }

    /// The staging capacity.
    pub fn capacity(&self) -> usize {
        self.capacity
    }

    /// Bytes staged but not yet written.
    pub fn pending(&self) -> &[u8] {
        self.staged.as_slice()
    }

    /// Append raw bytes, returning how many were accepted (always all
    /// of them).
    ///
    /// If `data` fits alongside the pending bytes it is staged;
    /// otherwise pending and new bytes drain together in one scatter
    /// write.
    pub fn append(&mut self, data: &[u8]) -> Result<usize, IoError> {
        if self.staged.len() + data.len() <= self.capacity {
            self.staged.append(data);
        } else {
            let regions = [IoVec::new(self.staged.as_slice()), IoVec::new(data)];
            fd::writev_all(self.fd, &regions)?;
            self.staged.clear();
        }
        Ok(data.len())
    }

    /// Append formatted text, returning the formatted byte count.
    ///
    /// Formats directly into the staging area, then applies the same
    /// overflow rule as [`append`](Self::append). A formatting error
    /// leaves both the staging area and the descriptor untouched.
    pub fn append_format(&mut self, fmt: &[u8], args: &[Arg<'_>]) -> Result<usize, WriteError> {
        let n = self.staged.append_format(fmt, args)?;
        if self.staged.len() > self.capacity {
            self.flush()?;
        }
        Ok(n)
    }

    /// Drain the staged bytes to the descriptor.
    pub fn flush(&mut self) -> Result<(), IoError> {
        if !self.staged.is_empty() {
            fd::write_all(self.fd, self.staged.as_slice())?;
            self.staged.clear();
        }
        Ok(())
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
