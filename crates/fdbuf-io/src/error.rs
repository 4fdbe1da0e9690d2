//! Errno-derived error model.
//!
//! Failures keep their underlying errno, except the one the write
//! layer recovers from locally: a signal interrupting a syscall before
//! any data transferred. That case is its own variant so retry logic
//! can match on it instead of comparing raw error codes.

use std::fmt;

use thiserror::Error;

/// A raw errno value.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Errno(pub i32);

impl Errno {
    /// The raw error number.
    pub const fn raw(self) -> i32 {
        self.0
    }
}

impl fmt::Display for Errno {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let msg = match self.0 {
            libc::EPERM => "Operation not permitted",
            libc::ENOENT => "No such file or directory",
            libc::EINTR => "Interrupted system call",
            libc::EIO => "Input/output error",
            libc::EBADF => "Bad file descriptor",
            libc::EAGAIN => "Resource temporarily unavailable",
            libc::ENOMEM => "Cannot allocate memory",
            libc::EACCES => "Permission denied",
            libc::EFAULT => "Bad address",
            libc::EBUSY => "Device or resource busy",
            libc::EEXIST => "File exists",
            libc::EINVAL => "Invalid argument",
            libc::ENFILE => "Too many open files in system",
            libc::EMFILE => "Too many open files",
            libc::EFBIG => "File too large",
            libc::ENOSPC => "No space left on device",
            libc::ESPIPE => "Illegal seek",
            libc::EROFS => "Read-only file system",
            libc::EPIPE => "Broken pipe",
            _ => return write!(f, "errno {}", self.0),
        };
        f.write_str(msg)
    }
}

/// A failed file-descriptor operation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum IoError {
    /// A signal handler ran before any data transferred; the call is
    /// safe to repeat as-is.
    #[error("interrupted before any data transferred")]
    Interrupted,
    /// Any other failure, cause preserved.
    #[error("{0}")]
    Sys(Errno),
}

impl IoError {
    /// Classify a raw errno.
    pub fn from_raw(errno: i32) -> Self {
        if errno == libc::EINTR {
            IoError::Interrupted
        } else {
            IoError::Sys(Errno(errno))
        }
    }

    /// Capture and classify the calling thread's errno after a failed
    /// syscall.
    pub fn last() -> Self {
        let errno = std::io::Error::last_os_error()
            .raw_os_error()
            .unwrap_or(libc::EIO);
        Self::from_raw(errno)
    }

    /// The underlying errno value.
    pub fn errno(&self) -> i32 {
        match self {
            IoError::Interrupted => libc::EINTR,
            IoError::Sys(e) => e.raw(),
        }
    }
}

impl From<IoError> for std::io::Error {
    fn from(e: IoError) -> Self {
        std::io::Error::from_raw_os_error(e.errno())
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
