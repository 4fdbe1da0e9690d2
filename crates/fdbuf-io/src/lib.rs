//! # fdbuf-io
//!
//! File-descriptor I/O layer: errno-derived errors with the
//! interruption case as its own variant, retry combinators, single-shot
//! and scatter write wrappers over the host syscalls, completion loops,
//! and a buffered writer that stages bytes in a
//! [`ByteBuf`](fdbuf_core::ByteBuf).
//!
//! The single-shot wrappers mask exactly one failure mode: a signal
//! arriving before any data transferred. Partial transfers and every
//! other errno are the caller's to handle; the `*_all` loops exist for
//! callers that want completion.

pub mod error;
pub mod fd;
pub mod retry;
pub mod writer;

pub use error::{Errno, IoError};
pub use fd::{IOV_MAX, IoVec, fd_read, fd_write, fd_writev, write_all, writev_all};
pub use retry::{retry_interrupted, retry_interrupted_bounded};
pub use writer::{FdWriter, WriteError};
