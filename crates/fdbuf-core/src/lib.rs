//! # fdbuf-core
//!
//! Safe building blocks for buffered byte output: a `%`-directive
//! format engine over tagged arguments, and the growable byte
//! accumulator formatted output is appended to.
//!
//! No `unsafe` code is permitted at the crate level. Everything that
//! touches file descriptors lives in `fdbuf-io`.

#![deny(unsafe_code)]

pub mod buf;
pub mod fmt;

pub use buf::ByteBuf;
