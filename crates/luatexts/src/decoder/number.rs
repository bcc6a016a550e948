//! Decimal floating point lines.
//!
//! The accepted literal is locale independent: an optional sign, then either
//! `inf`, `infinity` or `nan` in any ASCII case, or a mantissa of digits with
//! an optional fraction and an optional exponent. Hex floats and leading
//! whitespace are not literals.

use bstr::ByteSlice;

use crate::error::ErrorKind;

const WORDS: [&[u8]; 3] = [b"infinity", b"inf", b"nan"];

/// Length of the longest literal at the start of `line`, or 0.
fn literal_len(line: &[u8]) -> usize {
    let mut i = usize::from(matches!(line.first(), Some(b'+' | b'-')));

    let rest = &line[i..];
    for word in WORDS {
        if rest.len() >= word.len() && rest[..word.len()].eq_ignore_ascii_case(word) {
            return i + word.len();
        }
    }

    let digits = |from: usize| line[from..].iter().take_while(|b| b.is_ascii_digit()).count();

    let int_digits = digits(i);
    i += int_digits;
    let mut frac_digits = 0;
    if line.get(i) == Some(&b'.') {
        frac_digits = digits(i + 1);
        if int_digits + frac_digits > 0 {
            i += 1 + frac_digits;
        }
    }
    if int_digits + frac_digits == 0 {
        return 0;
    }

    if matches!(line.get(i), Some(b'e' | b'E')) {
        let mut j = i + 1;
        if matches!(line.get(j), Some(b'+' | b'-')) {
            j += 1;
        }
        let exp_digits = digits(j);
        if exp_digits > 0 {
            i = j + exp_digits;
        }
    }
    i
}

/// Parses a number line (terminator already stripped).
pub(crate) fn parse_number(line: &[u8]) -> Result<f64, ErrorKind> {
    if line.is_empty() {
        return Err(ErrorKind::BadData);
    }
    let len = literal_len(line);
    if len == 0 || len != line.len() {
        return Err(ErrorKind::Garbage);
    }
    let text = line.to_str().map_err(|_| ErrorKind::Garbage)?;
    text.parse::<f64>().map_err(|_| ErrorKind::Garbage)
}
