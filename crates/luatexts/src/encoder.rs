//! Writer for the format.
//!
//! Produces the canonical shape the decoder accepts: LF terminators, fixed
//! tables, raw `S` strings and `U` integers. Non-finite numbers are written
//! as `NaN`, `inf` and `-inf`.

use alloc::{format, vec::Vec};

use crate::value::Value;

/// Encodes `values` as a tuple.
///
/// # Examples
///
/// ```rust
/// use luatexts::{Value, encode};
///
/// let bytes = encode(&[Value::Bool(false), Value::from("hi")]);
/// assert_eq!(bytes, b"2\n0\nS\n2\nhi\n");
/// ```
#[must_use]
pub fn encode(values: &[Value]) -> Vec<u8> {
    let mut out = Vec::new();
    write_line(&mut out, format!("{}", values.len()).as_bytes());
    for value in values {
        encode_into(&mut out, value);
    }
    out
}

/// Appends one value to `out`.
///
/// A table whose hash part has a `Nil` or NaN key is written as is and will
/// not decode.
pub fn encode_into(out: &mut Vec<u8>, value: &Value) {
    match value {
        Value::Nil => write_line(out, b"-"),
        Value::Bool(false) => write_line(out, b"0"),
        Value::Bool(true) => write_line(out, b"1"),
        Value::Number(n) => {
            write_line(out, b"N");
            // `Debug` is the shortest round-trip form and keeps exponents.
            write_line(out, format!("{n:?}").as_bytes());
        }
        Value::UInt(n) => {
            write_line(out, b"U");
            write_line(out, format!("{n}").as_bytes());
        }
        Value::String(s) => {
            write_line(out, b"S");
            write_line(out, format!("{}", s.len()).as_bytes());
            write_line(out, s.as_slice());
        }
        Value::Table(table) => {
            write_line(out, b"T");
            write_line(out, format!("{}", table.array.len()).as_bytes());
            write_line(out, format!("{}", table.hash.len()).as_bytes());
            for item in &table.array {
                encode_into(out, item);
            }
            for (key, item) in &table.hash {
                encode_into(out, key);
                encode_into(out, item);
            }
        }
    }
}

fn write_line(out: &mut Vec<u8>, line: &[u8]) {
    out.extend_from_slice(line);
    out.push(b'\n');
}
