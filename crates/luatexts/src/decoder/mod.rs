//! The decode engine.
//!
//! Overview
//! - A tuple is a decimal count line followed by that many values.
//! - A value is a one-byte type tag on its own line followed by a
//!   tag-specific payload. Tables recurse into further values.
//! - Decoding is a single forward pass over a borrowed buffer. There is no
//!   backtracking and no lookahead beyond one line or one UTF-8 sequence.
//!
//! Failure
//! - The first error aborts the whole call. Values built so far are owned by
//!   the decoder's stack frames and are dropped on the way out, so a caller
//!   only ever sees a complete tuple or an error.
//! - Bytes after the last value of the tuple are ignored.
//!
//! Nesting
//! - Every table opened increments a depth counter carried through the
//!   recursion. Passing [`DecodeOptions::max_depth`] fails with
//!   [`ErrorKind::TooDeep`] before any stack is spent on the next level.
//!
//! | Tag | Value            | Payload                                          |
//! |-----|------------------|--------------------------------------------------|
//! | `-` | nil              | none                                             |
//! | `0` | false            | none                                             |
//! | `1` | true             | none                                             |
//! | `N` | number           | one decimal literal line                         |
//! | `U` | unsigned, base 10| one digit line                                   |
//! | `H` | unsigned, base 16| one digit line                                   |
//! | `Z` | unsigned, base 36| one digit line                                   |
//! | `S` | raw string       | byte length line, bytes, empty line              |
//! | `8` | UTF-8 string     | character count line, characters, empty line     |
//! | `T` | fixed table      | array size, hash size, values, key/value pairs   |
//! | `t` | streaming table  | key/value pairs up to a nil key                  |

mod cursor;
mod integer;
mod number;
mod options;
mod utf8;


use alloc::vec::Vec;

use cursor::Cursor;
use integer::{BASE36, DECIMAL, HEX, Radix, read_uint};
pub use options::{DEFAULT_MAX_DEPTH, DecodeOptions};

use crate::{
    error::{DecodeError, ErrorKind},
    sink::{StdSink, ValueSink},
    value::Value,
};

/// Largest array part a fixed table may declare is `2^MAX_BITS`; the hash
/// part is bounded by the same power of two.
const MAX_BITS: u32 = 26;
const MAX_ARRAY_SIZE: u32 = 1 << MAX_BITS;

/// What the decoder needs to know about a value to use it as a table key.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum KeyClass {
    Valid,
    Nil,
    NaN,
}

struct Decoder<'src, 'sink, S: ValueSink> {
    cursor: Cursor<'src>,
    sink: &'sink mut S,
    options: DecodeOptions,
}

impl<'src, 'sink, S: ValueSink> Decoder<'src, 'sink, S> {
    fn new(input: &'src [u8], sink: &'sink mut S, options: DecodeOptions) -> Self {
        Self {
            cursor: Cursor::new(input),
            sink,
            options,
        }
    }

    fn read_uint(&mut self, radix: &Radix) -> Result<u32, DecodeError> {
        read_uint(&mut self.cursor, radix)
    }

    /// Reads a decimal size line as a `usize`.
    fn read_size(&mut self) -> Result<usize, DecodeError> {
        let n = self.read_uint(&DECIMAL)?;
        usize::try_from(n).map_err(|_| self.cursor.fail(ErrorKind::TooHuge))
    }

    fn read_tuple(&mut self) -> Result<Vec<S::Value>, DecodeError> {
        let count = self.read_size()?;
        tracing::trace!(count, "decoding tuple");

        // Each value takes at least two bytes; don't trust the count for
        // the allocation.
        let mut values = Vec::with_capacity(count.min(self.cursor.remaining() / 2));
        for _ in 0..count {
            let (value, _) = self.read_value(0)?;
            values.push(value);
        }
        Ok(values)
    }

    /// Reads one value. `depth` is the number of tables enclosing it.
    fn read_value(&mut self, depth: usize) -> Result<(S::Value, KeyClass), DecodeError> {
        let at = self.cursor.offset();
        let tag = match self.cursor.read_line()? {
            &[tag] => tag,
            _ => return Err(self.cursor.fail_at(ErrorKind::Garbage, at)),
        };

        let value = match tag {
            b'-' => return Ok((self.sink.new_nil(), KeyClass::Nil)),
            b'0' => self.sink.new_bool(false),
            b'1' => self.sink.new_bool(true),
            b'N' => {
                let n = self.read_number()?;
                let class = if n.is_nan() {
                    KeyClass::NaN
                } else {
                    KeyClass::Valid
                };
                return Ok((self.sink.new_number(n), class));
            }
            b'U' => self.read_uint_value(&DECIMAL)?,
            b'H' => self.read_uint_value(&HEX)?,
            b'Z' => self.read_uint_value(&BASE36)?,
            b'S' => self.read_string()?,
            b'8' => self.read_utf8()?,
            b'T' => {
                let depth = self.enter_table(depth, at)?;
                self.read_fixed_table(depth)?
            }
            b't' => {
                let depth = self.enter_table(depth, at)?;
                self.read_streaming_table(depth)?
            }
            _ => return Err(self.cursor.fail_at(ErrorKind::BadType, at)),
        };
        Ok((value, KeyClass::Valid))
    }

    fn read_number(&mut self) -> Result<f64, DecodeError> {
        let at = self.cursor.offset();
        let line = self.cursor.read_line()?;
        number::parse_number(line).map_err(|kind| self.cursor.fail_at(kind, at))
    }

    fn read_uint_value(&mut self, radix: &Radix) -> Result<S::Value, DecodeError> {
        let n = self.read_uint(radix)?;
        Ok(self.sink.new_uint(n))
    }

    fn read_string(&mut self) -> Result<S::Value, DecodeError> {
        let len = self.read_size()?;
        let bytes = self
            .cursor
            .advance(len)
            .map_err(|e| e.reclassify(ErrorKind::BadSize))?;
        self.cursor.expect_empty_line()?;
        Ok(self.sink.new_string(bytes))
    }

    fn read_utf8(&mut self) -> Result<S::Value, DecodeError> {
        let chars = self.read_size()?;
        let bytes = utf8::read_chars(&mut self.cursor, chars)?;
        self.cursor.expect_empty_line()?;
        Ok(self.sink.new_utf8(bytes))
    }

    fn enter_table(&mut self, depth: usize, at: usize) -> Result<usize, DecodeError> {
        let depth = depth + 1;
        if depth > self.options.max_depth {
            tracing::trace!(depth, max_depth = self.options.max_depth, "table nested too deeply");
            return Err(self.cursor.fail_at(ErrorKind::TooDeep, at));
        }
        Ok(depth)
    }

    /// Reads a key and rejects `nil` and NaN.
    fn read_key(&mut self, depth: usize) -> Result<S::Value, DecodeError> {
        let at = self.cursor.offset();
        match self.read_value(depth)? {
            (key, KeyClass::Valid) => Ok(key),
            (_, KeyClass::Nil | KeyClass::NaN) => {
                Err(self.cursor.fail_at(ErrorKind::BadData, at))
            }
        }
    }

    fn read_fixed_table(&mut self, depth: usize) -> Result<S::Value, DecodeError> {
        let array_size = self.read_uint(&DECIMAL)?;
        let hash_size = self.read_uint(&DECIMAL)?;
        self.check_table_size(array_size, hash_size)?;
        let (array_size, hash_size) = (array_size as usize, hash_size as usize);

        let mut table = self.sink.begin_table(array_size, hash_size);
        for index in 0..array_size {
            let (value, _) = self.read_value(depth)?;
            self.sink.array_set(&mut table, index, value);
        }
        for _ in 0..hash_size {
            let key = self.read_key(depth)?;
            let (value, _) = self.read_value(depth)?;
            self.sink.hash_set(&mut table, key, value);
        }
        Ok(self.sink.end_table(table))
    }

    /// Rejects declared sizes that no table could hold, or that the rest of
    /// the input cannot possibly contain at one byte per value.
    fn check_table_size(&mut self, array_size: u32, hash_size: u32) -> Result<(), DecodeError> {
        let hash_too_big =
            hash_size > 0 && u64::from(hash_size).next_power_of_two().trailing_zeros() > MAX_BITS;
        let needed = u64::from(array_size) + 2 * u64::from(hash_size);
        let available = self.cursor.remaining() as u64;
        if array_size > MAX_ARRAY_SIZE || hash_too_big || needed > available {
            tracing::trace!(array_size, hash_size, available, "table size rejected");
            return Err(self.cursor.fail(ErrorKind::TooHuge));
        }
        Ok(())
    }

    fn read_streaming_table(&mut self, depth: usize) -> Result<S::Value, DecodeError> {
        let mut table = self.sink.begin_table(0, 0);
        loop {
            let at = self.cursor.offset();
            let key = match self.read_value(depth)? {
                (_, KeyClass::Nil) => break,
                (_, KeyClass::NaN) => return Err(self.cursor.fail_at(ErrorKind::BadData, at)),
                (key, KeyClass::Valid) => key,
            };
            let (value, _) = self.read_value(depth)?;
            self.sink.hash_set(&mut table, key, value);
        }
        Ok(self.sink.end_table(table))
    }
}

/// Decodes a tuple into [`Value`]s.
///
/// The tuple's length is the count declared on the first line. Trailing
/// bytes after the last value are ignored.
///
/// # Errors
///
/// Returns the first [`DecodeError`] encountered; no partial tuple is
/// returned.
///
/// # Examples
///
/// ```rust
/// use luatexts::{Value, decode};
///
/// let values = decode(b"2\n1\nS\n5\nhello\n").unwrap();
/// assert_eq!(values, vec![Value::Bool(true), Value::from("hello")]);
/// ```
pub fn decode(input: &[u8]) -> Result<Vec<Value>, DecodeError> {
    decode_with_options(input, DecodeOptions::default())
}

/// Like [`decode`], with explicit [`DecodeOptions`].
///
/// # Errors
///
/// Returns the first [`DecodeError`] encountered.
pub fn decode_with_options(input: &[u8], options: DecodeOptions) -> Result<Vec<Value>, DecodeError> {
    decode_into(input, &mut StdSink, options)
}

/// Decodes a tuple by driving a caller-provided [`ValueSink`].
///
/// # Errors
///
/// Returns the first [`DecodeError`] encountered. Every value the sink
/// produced for this call has been dropped by then.
pub fn decode_into<S: ValueSink>(
    input: &[u8],
    sink: &mut S,
    options: DecodeOptions,
) -> Result<Vec<S::Value>, DecodeError> {
    tracing::trace!(len = input.len(), "decode start");
    Decoder::new(input, sink, options)
        .read_tuple()
        .inspect_err(|err| {
            tracing::debug!(kind = ?err.kind(), offset = err.offset(), "decode failed");
        })
}
