//! Strict UTF-8 codepoint validation.
//!
//! Rejected on top of the structural rules: overlong forms of every length,
//! codepoints above U+10FFFF, UTF-16 surrogates (U+D800..U+DFFF) and the
//! noncharacters U+FFFE and U+FFFF.

use super::cursor::Cursor;
use crate::error::{DecodeError, ErrorKind};

/// Sequence length by lead byte; 0 marks continuation bytes and bytes that
/// never start a sequence. `C0`/`C1` are listed as two-byte leads and
/// rejected as overlong once the sequence is complete.
static SEQUENCE_LEN: [u8; 256] = {
    let mut table = [0u8; 256];
    let mut b = 0;
    while b < 256 {
        table[b] = match b {
            0x00..=0x7F => 1,
            0xC0..=0xDF => 2,
            0xE0..=0xEF => 3,
            0xF0..=0xF4 => 4,
            _ => 0,
        };
        b += 1;
    }
    table
};

#[inline]
fn is_continuation(b: u8) -> bool {
    b & 0xC0 == 0x80
}

/// Consumes one codepoint and returns its length in bytes.
pub(crate) fn read_char(cursor: &mut Cursor<'_>) -> Result<usize, DecodeError> {
    let start = cursor.offset();
    let lead = cursor.next_byte()?;
    let len = usize::from(SEQUENCE_LEN[usize::from(lead)]);
    match len {
        0 => return Err(bad_utf8(cursor, start)),
        1 => return Ok(1),
        _ => {}
    }

    if cursor.remaining() < len - 1 {
        return Err(cursor.fail(ErrorKind::Clipped));
    }
    let tail = cursor.advance(len - 1)?;
    if !tail.iter().all(|&b| is_continuation(b)) {
        return Err(bad_utf8(cursor, start));
    }

    let overlong_or_out_of_range = matches!(
        (lead, tail[0]),
        (0xC0 | 0xC1, _)
            | (0xE0, 0x80..=0x9F)
            | (0xED, 0xA0..=0xBF)
            | (0xF0, 0x80..=0x8F)
            | (0xF4, 0x90..)
    );
    // U+FFFE and U+FFFF
    let noncharacter = lead == 0xEF && matches!(tail, [0xBF, 0xBE | 0xBF]);
    if overlong_or_out_of_range || noncharacter {
        return Err(bad_utf8(cursor, start));
    }
    Ok(len)
}

/// Reports the failure at the start of the offending sequence.
fn bad_utf8(cursor: &mut Cursor<'_>, start: usize) -> DecodeError {
    cursor.fail_at(ErrorKind::BadUtf8, start)
}

/// Consumes `count` codepoints and returns the bytes they occupy.
pub(crate) fn read_chars<'src>(
    cursor: &mut Cursor<'src>,
    count: usize,
) -> Result<&'src [u8], DecodeError> {
    let start = cursor.offset();
    let mut bytes = 0;
    for _ in 0..count {
        bytes += read_char(cursor)?;
    }
    let text = cursor.consumed_since(start);
    debug_assert_eq!(text.len(), bytes);
    Ok(text)
}
