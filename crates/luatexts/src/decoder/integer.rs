//! Unsigned integer lines in base 10, 16 and 36.
//!
//! Digits are scanned straight off the cursor; there is no line buffering.
//! The digit run must be followed by `\n` or `\r\n`, which makes signs and
//! surrounding whitespace illegal without special casing them.

use super::cursor::Cursor;
use crate::error::{DecodeError, ErrorKind};

const NOT_A_DIGIT: u8 = 0xFF;

/// Per-base digit table and overflow limits.
#[derive(Debug)]
pub(crate) struct Radix {
    base: u32,
    digits: [u8; 256],
    /// `u32::MAX / base`
    limit: u32,
    /// `u32::MAX % base`
    limit_last_digit: u32,
}

const fn digit_table(base: u8) -> [u8; 256] {
    let mut table = [NOT_A_DIGIT; 256];
    let mut b = 0;
    while b < 256 {
        #[expect(clippy::cast_possible_truncation)]
        let d = match b as u8 {
            c @ b'0'..=b'9' => c - b'0',
            c @ b'a'..=b'z' => c - b'a' + 10,
            c @ b'A'..=b'Z' => c - b'A' + 10,
            _ => NOT_A_DIGIT,
        };
        if d < base {
            table[b] = d;
        }
        b += 1;
    }
    table
}

impl Radix {
    const fn new(base: u8) -> Self {
        Self {
            base: base as u32,
            digits: digit_table(base),
            limit: u32::MAX / base as u32,
            limit_last_digit: u32::MAX % base as u32,
        }
    }

    #[inline]
    fn digit(&self, b: u8) -> Option<u32> {
        match self.digits[b as usize] {
            NOT_A_DIGIT => None,
            d => Some(u32::from(d)),
        }
    }
}

pub(crate) static DECIMAL: Radix = Radix::new(10);
pub(crate) static HEX: Radix = Radix::new(16);
pub(crate) static BASE36: Radix = Radix::new(36);

/// Reads one integer line.
///
/// - [`ErrorKind::Clipped`] if the input ends anywhere before the `\n`,
/// - [`ErrorKind::BadData`] if the first byte is not a digit,
/// - [`ErrorKind::TooHuge`] as soon as the next digit would overflow `u32`,
/// - [`ErrorKind::Garbage`] if anything but `\r\n` or `\n` follows the
///   digits.
pub(crate) fn read_uint(cursor: &mut Cursor<'_>, radix: &Radix) -> Result<u32, DecodeError> {
    let first = cursor.peek()?;
    if radix.digit(first).is_none() {
        return Err(cursor.fail(ErrorKind::BadData));
    }

    let mut value: u32 = 0;
    while let Some(d) = cursor.peek_opt().and_then(|b| radix.digit(b)) {
        if value > radix.limit || (value == radix.limit && d > radix.limit_last_digit) {
            return Err(cursor.fail(ErrorKind::TooHuge));
        }
        value = value * radix.base + d;
        cursor.advance(1)?;
    }

    let mut end = cursor.next_byte()?;
    if end == b'\r' {
        end = cursor.next_byte()?;
    }
    if end != b'\n' {
        return Err(cursor.fail(ErrorKind::Garbage));
    }
    Ok(value)
}

#[cfg(test)]
mod tests {
    use rstest::rstest;

    use super::*;

    fn parse(input: &[u8], radix: &Radix) -> Result<u32, ErrorKind> {
        read_uint(&mut Cursor::new(input), radix).map_err(|e| e.kind())
    }

    #[rstest]
    #[case(b"0\n", 0)]
    #[case(b"7\n", 7)]
    #[case(b"0042\n", 42)]
    #[case(b"123\r\n", 123)]
    #[case(b"4294967295\n", u32::MAX)]
    fn decimal_ok(#[case] input: &[u8], #[case] expected: u32) {
        assert_eq!(parse(input, &DECIMAL), Ok(expected));
    }

    #[rstest]
    #[case(b"ff\n", 0xFF)]
    #[case(b"FF\n", 0xFF)]
    #[case(b"DeadBeef\n", 0xDEAD_BEEF)]
    #[case(b"ffffffff\n", u32::MAX)]
    fn hex_ok(#[case] input: &[u8], #[case] expected: u32) {
        assert_eq!(parse(input, &HEX), Ok(expected));
    }

    #[rstest]
    #[case(b"z\n", 35)]
    #[case(b"Z\n", 35)]
    #[case(b"10\n", 36)]
    #[case(b"1z141z3\n", u32::MAX)]
    fn base36_ok(#[case] input: &[u8], #[case] expected: u32) {
        assert_eq!(parse(input, &BASE36), Ok(expected));
    }

    #[rstest]
    #[case::empty(b"", ErrorKind::Clipped)]
    #[case::no_newline(b"12", ErrorKind::Clipped)]
    #[case::cr_then_eof(b"12\r", ErrorKind::Clipped)]
    #[case::empty_line(b"\n", ErrorKind::BadData)]
    #[case::sign(b"-1\n", ErrorKind::BadData)]
    #[case::plus(b"+1\n", ErrorKind::BadData)]
    #[case::leading_space(b" 1\n", ErrorKind::BadData)]
    #[case::trailing_space(b"1 \n", ErrorKind::Garbage)]
    #[case::trailing_letter(b"12a\n", ErrorKind::Garbage)]
    #[case::cr_not_followed_by_lf(b"12\rx\n", ErrorKind::Garbage)]
    #[case::overflow(b"4294967296\n", ErrorKind::TooHuge)]
    #[case::overflow_long(b"99999999999999999999\n", ErrorKind::TooHuge)]
    fn decimal_errors(#[case] input: &[u8], #[case] expected: ErrorKind) {
        assert_eq!(parse(input, &DECIMAL), Err(expected));
    }

    #[test]
    fn hex_digit_is_not_decimal() {
        assert_eq!(parse(b"1f\n", &DECIMAL), Err(ErrorKind::Garbage));
        assert_eq!(parse(b"g\n", &HEX), Err(ErrorKind::BadData));
    }

    #[test]
    fn overflow_boundaries() {
        assert_eq!(parse(b"100000000\n", &HEX), Err(ErrorKind::TooHuge));
        assert_eq!(parse(b"1z141z4\n", &BASE36), Err(ErrorKind::TooHuge));
    }

    #[test]
    fn overflow_is_detected_before_the_bad_digit_is_consumed() {
        let mut c = Cursor::new(b"4294967296\n");
        let err = read_uint(&mut c, &DECIMAL).unwrap_err();
        assert_eq!(err.offset(), 9);
    }
}
