//! Interruption retry combinators.
//!
//! A syscall interrupted before transferring anything is safe to
//! repeat verbatim. These combinators encode that one retry rule;
//! every other outcome, including partial transfers, passes through
//! on the first attempt.

use crate::error::IoError;

/// Repeat `op` until it returns anything other than
/// [`IoError::Interrupted`].
pub fn retry_interrupted<T, F>(mut op: F) -> Result<T, IoError>
where
    F: FnMut() -> Result<T, IoError>,
{
    loop {
        match op() {
            Err(IoError::Interrupted) => {}
            done => return done,
        }
    }
}

/// Like [`retry_interrupted`], but gives up after `retries` repeated
/// interruptions and surfaces the final [`IoError::Interrupted`].
pub fn retry_interrupted_bounded<T, F>(mut retries: usize, mut op: F) -> Result<T, IoError>
where
    F: FnMut() -> Result<T, IoError>,
{
    loop {
        match op() {
            Err(IoError::Interrupted) if retries > 0 => retries -= 1,
            done => return done,
        }
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
