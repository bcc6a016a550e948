//! Decoded value types.
//!
//! This module defines the [`Value`] enum, which represents anything the
//! format can carry, and [`Table`], the Lua-style container with an array
//! part and a hash part.
//!
//! `Value` has a total order so it can key the hash part of a table. The
//! order ranks variants in declaration order; inside a variant:
//!
//! - numbers compare numerically, with `+0.0` equal to `-0.0`; all NaNs are
//!   equal to each other and sort after every other number,
//! - strings compare bytewise,
//! - tables compare their array parts, then their hash parts.
//!
//! `UInt(1)` and `Number(1.0)` are different keys.
use alloc::{collections::BTreeMap, vec::Vec};
use core::cmp::Ordering;

use bstr::BString;

/// The array part of a [`Table`].
pub type Array = Vec<Value>;
/// The hash part of a [`Table`].
pub type Hash = BTreeMap<Value, Value>;

/// A decoded value.
///
/// # Examples
///
/// ```
/// use luatexts::{Table, Value};
///
/// let mut table = Table::new();
/// table.array.push(Value::UInt(5));
/// table.hash.insert(Value::from("key"), Value::Bool(true));
/// assert_eq!(table.get(&Value::from("key")), Some(&Value::Bool(true)));
/// ```
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[derive(Clone, Debug, Default)]
pub enum Value {
    /// The absent value. Never a table key.
    #[default]
    Nil,
    /// A boolean.
    Bool(bool),
    /// A double precision number.
    Number(f64),
    /// An unsigned integer written in base 10, 16 or 36.
    UInt(u32),
    /// A binary-safe string. Both raw and UTF-8 string payloads decode here.
    String(BString),
    /// A table with an array part and a hash part.
    Table(Table),
}

/// A table: an ordered array part plus a keyed hash part.
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[derive(Clone, Debug, Default, PartialEq, Eq, PartialOrd, Ord)]
pub struct Table {
    /// Values in declaration order.
    pub array: Array,
    /// Keyed entries. Keys are never `Nil` or NaN.
    pub hash: Hash,
}

impl Table {
    /// Creates an empty table.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Looks `key` up in the hash part.
    #[must_use]
    pub fn get(&self, key: &Value) -> Option<&Value> {
        self.hash.get(key)
    }

    /// Returns `true` when both parts are empty.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.array.is_empty() && self.hash.is_empty()
    }
}

impl Value {
    /// Returns `true` if the value is [`Nil`](Value::Nil).
    #[must_use]
    pub fn is_nil(&self) -> bool {
        matches!(self, Self::Nil)
    }

    /// Returns `true` for a NaN [`Number`](Value::Number).
    #[must_use]
    pub fn is_nan(&self) -> bool {
        matches!(self, Self::Number(n) if n.is_nan())
    }

    /// Returns the boolean, if this is one.
    #[must_use]
    pub fn as_bool(&self) -> Option<bool> {
        match self {
            Self::Bool(b) => Some(*b),
            _ => None,
        }
    }

    /// Returns the number, if this is one.
    #[must_use]
    pub fn as_number(&self) -> Option<f64> {
        match self {
            Self::Number(n) => Some(*n),
            _ => None,
        }
    }

    /// Returns the unsigned integer, if this is one.
    #[must_use]
    pub fn as_uint(&self) -> Option<u32> {
        match self {
            Self::UInt(n) => Some(*n),
            _ => None,
        }
    }

    /// Returns the string bytes, if this is a string.
    #[must_use]
    pub fn as_bytes(&self) -> Option<&[u8]> {
        match self {
            Self::String(s) => Some(s.as_slice()),
            _ => None,
        }
    }

    /// Returns the table, if this is one.
    #[must_use]
    pub fn as_table(&self) -> Option<&Table> {
        match self {
            Self::Table(t) => Some(t),
            _ => None,
        }
    }

    fn rank(&self) -> u8 {
        match self {
            Self::Nil => 0,
            Self::Bool(_) => 1,
            Self::Number(_) => 2,
            Self::UInt(_) => 3,
            Self::String(_) => 4,
            Self::Table(_) => 5,
        }
    }
}

#[expect(clippy::float_cmp)]
fn cmp_numbers(a: f64, b: f64) -> Ordering {
    match (a.is_nan(), b.is_nan()) {
        (true, true) => Ordering::Equal,
        (true, false) => Ordering::Greater,
        (false, true) => Ordering::Less,
        (false, false) if a == b => Ordering::Equal,
        (false, false) => a.total_cmp(&b),
    }
}

impl Ord for Value {
    fn cmp(&self, other: &Self) -> Ordering {
        match (self, other) {
            (Self::Nil, Self::Nil) => Ordering::Equal,
            (Self::Bool(a), Self::Bool(b)) => a.cmp(b),
            (Self::Number(a), Self::Number(b)) => cmp_numbers(*a, *b),
            (Self::UInt(a), Self::UInt(b)) => a.cmp(b),
            (Self::String(a), Self::String(b)) => a.cmp(b),
            (Self::Table(a), Self::Table(b)) => a.cmp(b),
            _ => self.rank().cmp(&other.rank()),
        }
    }
}

impl PartialOrd for Value {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl PartialEq for Value {
    fn eq(&self, other: &Self) -> bool {
        self.cmp(other) == Ordering::Equal
    }
}

impl Eq for Value {}

impl From<bool> for Value {
    fn from(v: bool) -> Self {
        Self::Bool(v)
    }
}

impl From<f64> for Value {
    fn from(v: f64) -> Self {
        Self::Number(v)
    }
}

impl From<u32> for Value {
    fn from(v: u32) -> Self {
        Self::UInt(v)
    }
}

impl From<&str> for Value {
    fn from(v: &str) -> Self {
        Self::String(v.into())
    }
}

impl From<&[u8]> for Value {
    fn from(v: &[u8]) -> Self {
        Self::String(v.into())
    }
}

impl From<Vec<u8>> for Value {
    fn from(v: Vec<u8>) -> Self {
        Self::String(v.into())
    }
}

impl From<BString> for Value {
    fn from(v: BString) -> Self {
        Self::String(v)
    }
}

impl From<Table> for Value {
    fn from(v: Table) -> Self {
        Self::Table(v)
    }
}

#[cfg(test)]
mod tests {
    use alloc::vec;

    use super::*;

    #[test]
    fn signed_zeros_are_the_same_key() {
        let mut t = Table::new();
        t.hash.insert(Value::Number(0.0), Value::from("first"));
        t.hash.insert(Value::Number(-0.0), Value::from("second"));
        assert_eq!(t.hash.len(), 1);
        assert_eq!(t.get(&Value::Number(0.0)), Some(&Value::from("second")));
    }

    #[test]
    fn uint_and_number_keys_are_distinct() {
        let mut t = Table::new();
        t.hash.insert(Value::UInt(1), Value::Bool(true));
        t.hash.insert(Value::Number(1.0), Value::Bool(false));
        assert_eq!(t.hash.len(), 2);
    }

    #[test]
    fn variants_rank_in_declaration_order() {
        let ordered = vec![
            Value::Nil,
            Value::Bool(true),
            Value::Number(-1.0),
            Value::UInt(0),
            Value::from(""),
            Value::Table(Table::new()),
        ];
        let mut sorted = ordered.clone();
        sorted.reverse();
        sorted.sort();
        assert_eq!(sorted, ordered);
    }

    #[test]
    fn nan_equals_itself() {
        assert_eq!(Value::Number(f64::NAN), Value::Number(f64::NAN));
        assert!(Value::Number(f64::NAN).is_nan());
        assert_eq!(Value::Number(f64::NAN), Value::Number(-f64::NAN));
        assert!(Value::Number(-f64::NAN) > Value::Number(f64::INFINITY));
    }
}
