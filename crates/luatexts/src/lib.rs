//! A decoder for luatexts, a trivial human-readable and binary-safe
//! serialization format for Lua-style values.
//!
//! A buffer holds a tuple: a decimal count line followed by that many
//! values, each introduced by a one-character type tag on its own line.
//! Lines end in `\n` or `\r\n`. Strings carry an explicit length, so their
//! payload may contain any byte.
//!
//! ```text
//! 3            tuple of three values
//! 1            true
//! S            raw string of 5 bytes
//! 5
//! hello        the payload, then the empty line closing the string
//! T            fixed table, array part [5, 7], empty hash part
//! 2
//! 0
//! U
//! 5
//! U
//! 7
//! ```
//!
//! ```rust
//! use luatexts::{Table, Value, decode};
//!
//! let values = decode(b"3\n1\nS\n5\nhello\nT\n2\n0\nU\n5\nU\n7\n").unwrap();
//! let mut table = Table::new();
//! table.array = vec![Value::UInt(5), Value::UInt(7)];
//! assert_eq!(
//!     values,
//!     vec![Value::Bool(true), Value::from("hello"), Value::Table(table)]
//! );
//! ```
//!
//! Decoding into a host representation goes through [`ValueSink`] and
//! [`decode_into`]. [`encode`] writes the format back out.

#![no_std]
extern crate alloc;

#[cfg(test)]
extern crate std;

mod decoder;
mod encoder;
mod error;
mod sink;
mod value;

#[cfg(test)]
mod tests;

pub use decoder::{DEFAULT_MAX_DEPTH, DecodeOptions, decode, decode_into, decode_with_options};
pub use encoder::{encode, encode_into};
pub use error::{DecodeError, ErrorKind};
pub use sink::{StdSink, ValueSink};
pub use value::{Array, Hash, Table, Value};

pub use bstr::BString;
