use alloc::vec::Vec;

use crate::value::{Hash, Table, Value};

/// Abstraction over value construction.
///
/// The decoder drives a sink bottom-up: scalars are created first, then
/// attached to the table being built, and a table becomes a value once all
/// of its entries are in. Handles are owned, so a failed decode rolls back by
/// dropping everything built so far; nothing reaches the caller.
pub trait ValueSink {
    /// A finished value.
    type Value;
    /// A table under construction.
    type Table;

    /// Creates `nil`.
    fn new_nil(&mut self) -> Self::Value;
    /// Creates a boolean.
    fn new_bool(&mut self, b: bool) -> Self::Value;
    /// Creates a number.
    fn new_number(&mut self, n: f64) -> Self::Value;
    /// Creates an unsigned integer.
    fn new_uint(&mut self, n: u32) -> Self::Value;
    /// Creates a string from raw bytes.
    fn new_string(&mut self, bytes: &[u8]) -> Self::Value;

    /// Creates a string from bytes that passed UTF-8 validation.
    ///
    /// The bytes contain no overlong forms, surrogates, U+FFFE or U+FFFF.
    fn new_utf8(&mut self, bytes: &[u8]) -> Self::Value {
        self.new_string(bytes)
    }

    /// Starts a table. The hints are the declared sizes of a fixed table and
    /// zero for a streaming one.
    fn begin_table(&mut self, array_hint: usize, hash_hint: usize) -> Self::Table;
    /// Stores the array element at zero-based `index`. Indices arrive in
    /// increasing order without gaps.
    fn array_set(&mut self, table: &mut Self::Table, index: usize, value: Self::Value);
    /// Stores a hash entry, replacing any earlier value for an equal key.
    fn hash_set(&mut self, table: &mut Self::Table, key: Self::Value, value: Self::Value);
    /// Finishes a table.
    fn end_table(&mut self, table: Self::Table) -> Self::Value;
}

/// Most array slots [`StdSink`] reserves up front; larger arrays grow as
/// elements arrive.
const MAX_ARRAY_RESERVE: usize = 1024;

/// Sink producing [`Value`] trees.
#[derive(Clone, Copy, Debug, Default)]
pub struct StdSink;

impl ValueSink for StdSink {
    type Value = Value;
    type Table = Table;

    #[inline]
    fn new_nil(&mut self) -> Value {
        Value::Nil
    }

    #[inline]
    fn new_bool(&mut self, b: bool) -> Value {
        Value::Bool(b)
    }

    #[inline]
    fn new_number(&mut self, n: f64) -> Value {
        Value::Number(n)
    }

    #[inline]
    fn new_uint(&mut self, n: u32) -> Value {
        Value::UInt(n)
    }

    #[inline]
    fn new_string(&mut self, bytes: &[u8]) -> Value {
        Value::String(bytes.into())
    }

    #[inline]
    fn begin_table(&mut self, array_hint: usize, _hash_hint: usize) -> Table {
        Table {
            array: Vec::with_capacity(array_hint.min(MAX_ARRAY_RESERVE)),
            hash: Hash::new(),
        }
    }

    #[inline]
    fn array_set(&mut self, table: &mut Table, index: usize, value: Value) {
        debug_assert_eq!(index, table.array.len());
        table.array.push(value);
    }

    #[inline]
    fn hash_set(&mut self, table: &mut Table, key: Value, value: Value) {
        table.hash.insert(key, value);
    }

    #[inline]
    fn end_table(&mut self, table: Table) -> Value {
        Value::Table(table)
    }
}

#[cfg(test)]
mod tests {
    use alloc::vec;

    use super::*;

    #[test]
    fn std_sink_builds_tables() {
        let mut sink = StdSink;
        let mut t = sink.begin_table(1, 1);
        let v = sink.new_uint(5);
        sink.array_set(&mut t, 0, v);
        let k = sink.new_string(b"k");
        let v = sink.new_bool(true);
        sink.hash_set(&mut t, k, v);
        let k = sink.new_utf8(b"k");
        let v = sink.new_bool(false);
        sink.hash_set(&mut t, k, v);

        let Value::Table(t) = sink.end_table(t) else {
            panic!("expected a table");
        };
        assert_eq!(t.array, vec![Value::UInt(5)]);
        assert_eq!(t.get(&Value::from("k")), Some(&Value::Bool(false)));
        assert_eq!(t.hash.len(), 1);
    }

    #[test]
    fn array_hint_is_capped() {
        let mut sink = StdSink;
        // Reserving this many slots would overflow.
        let mut t = sink.begin_table(usize::MAX, 0);
        assert!(t.array.capacity() < 2 * MAX_ARRAY_RESERVE);

        let mut t2 = sink.begin_table(3000, 0);
        assert!(t2.array.capacity() < 2 * MAX_ARRAY_RESERVE);
        for index in 0..3000 {
            let v = sink.new_uint(u32::try_from(index).unwrap());
            sink.array_set(&mut t2, index, v);
        }
        assert_eq!(t2.array.len(), 3000);
        assert_eq!(t2.array[2999], Value::UInt(2999));

        let v = sink.new_nil();
        sink.array_set(&mut t, 0, v);
        assert_eq!(t.array.len(), 1);
    }
}
