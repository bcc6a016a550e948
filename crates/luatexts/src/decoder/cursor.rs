//! Cursor: a forward-only view over the unread input.
//!
//! Invariants
//! - The cursor never moves backwards; nothing it consumes can be put back.
//! - The first failed read poisons the cursor. Every later read fails with
//!   [`ErrorKind::Clipped`] at the offset of the original failure, without
//!   looking at the buffer again.
//! - Slices returned by [`Cursor::advance`] and [`Cursor::read_line`] borrow
//!   the input (`'src`) and are never copied.

use crate::error::{DecodeError, ErrorKind};

#[derive(Debug, Clone)]
pub(crate) struct Cursor<'src> {
    input: &'src [u8],
    pos: usize,
    failed_at: Option<usize>,
}

impl<'src> Cursor<'src> {
    pub(crate) fn new(input: &'src [u8]) -> Self {
        Self {
            input,
            pos: 0,
            failed_at: None,
        }
    }

    /// Bytes not yet consumed. Zero once the cursor is poisoned.
    #[inline]
    pub(crate) fn remaining(&self) -> usize {
        if self.failed_at.is_some() {
            return 0;
        }
        self.input.len() - self.pos
    }

    /// Offset of the next unread byte.
    #[inline]
    pub(crate) fn offset(&self) -> usize {
        self.failed_at.unwrap_or(self.pos)
    }

    /// Poisons the cursor and returns an error of `kind` at the current
    /// offset.
    pub(crate) fn fail(&mut self, kind: ErrorKind) -> DecodeError {
        let at = self.offset();
        self.fail_at(kind, at)
    }

    /// Poisons the cursor and reports `kind` at an earlier offset, such as the
    /// start of the field that turned out to be invalid.
    pub(crate) fn fail_at(&mut self, kind: ErrorKind, at: usize) -> DecodeError {
        self.failed_at = Some(at);
        DecodeError::new(kind, at)
    }

    #[inline]
    fn check(&self) -> Result<(), DecodeError> {
        match self.failed_at {
            Some(at) => Err(DecodeError::new(ErrorKind::Clipped, at)),
            None => Ok(()),
        }
    }

    /// The next byte, without consuming it.
    #[inline]
    pub(crate) fn peek(&mut self) -> Result<u8, DecodeError> {
        self.check()?;
        match self.input.get(self.pos) {
            Some(&b) => Ok(b),
            None => Err(self.fail(ErrorKind::Clipped)),
        }
    }

    /// The next byte, or `None` at the end of the input. Does not poison.
    #[inline]
    pub(crate) fn peek_opt(&self) -> Option<u8> {
        if self.failed_at.is_some() {
            return None;
        }
        self.input.get(self.pos).copied()
    }

    /// Consumes exactly `n` bytes.
    pub(crate) fn advance(&mut self, n: usize) -> Result<&'src [u8], DecodeError> {
        self.check()?;
        if self.remaining() < n {
            return Err(self.fail(ErrorKind::Clipped));
        }
        let start = self.pos;
        self.pos += n;
        Ok(&self.input[start..self.pos])
    }

    /// Consumes one byte.
    #[inline]
    pub(crate) fn next_byte(&mut self) -> Result<u8, DecodeError> {
        let b = self.peek()?;
        self.pos += 1;
        Ok(b)
    }

    /// The bytes consumed since `offset`, which must come from
    /// [`Cursor::offset`] on this cursor before it was poisoned.
    pub(crate) fn consumed_since(&self, offset: usize) -> &'src [u8] {
        &self.input[offset..self.pos]
    }

    /// Reads up to and including the next `\n`.
    ///
    /// The returned line excludes the `\n` and a `\r` directly before it.
    /// The terminator is always the last thing consumed, so callers never
    /// rescan for it. Fails [`ErrorKind::Clipped`] when no `\n` is left.
    pub(crate) fn read_line(&mut self) -> Result<&'src [u8], DecodeError> {
        self.check()?;
        let rest = &self.input[self.pos..];
        let Some(len) = rest.iter().position(|&b| b == b'\n') else {
            self.pos = self.input.len();
            return Err(self.fail(ErrorKind::Clipped));
        };
        self.pos += len + 1;
        let line = &rest[..len];
        Ok(line.strip_suffix(b"\r").unwrap_or(line))
    }

    /// Reads a line that must be empty.
    pub(crate) fn expect_empty_line(&mut self) -> Result<(), DecodeError> {
        let start = self.offset();
        let line = self.read_line()?;
        if line.is_empty() {
            Ok(())
        } else {
            Err(self.fail_at(ErrorKind::Garbage, start))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn read_line_strips_lf_and_crlf() {
        let mut c = Cursor::new(b"ab\ncd\r\n\n");
        assert_eq!(c.read_line().unwrap(), b"ab");
        assert_eq!(c.read_line().unwrap(), b"cd");
        assert_eq!(c.read_line().unwrap(), b"");
        assert_eq!(c.remaining(), 0);
    }

    #[test]
    fn lone_cr_is_part_of_the_line() {
        let mut c = Cursor::new(b"a\rb\n");
        assert_eq!(c.read_line().unwrap(), b"a\rb");
    }

    #[test]
    fn only_one_cr_is_stripped() {
        let mut c = Cursor::new(b"a\r\r\n");
        assert_eq!(c.read_line().unwrap(), b"a\r");
    }

    #[test]
    fn read_line_without_terminator_is_clipped() {
        let mut c = Cursor::new(b"abc");
        let err = c.read_line().unwrap_err();
        assert_eq!(err.kind(), ErrorKind::Clipped);
        assert_eq!(err.offset(), 3);
    }

    #[test]
    fn advance_past_end_is_clipped() {
        let mut c = Cursor::new(b"abc");
        assert_eq!(c.advance(2).unwrap(), b"ab");
        assert_eq!(c.advance(2).unwrap_err().kind(), ErrorKind::Clipped);
    }

    #[test]
    fn failure_is_sticky() {
        let mut c = Cursor::new(b"ab\ncd\n");
        assert!(c.advance(10).is_err());
        assert_eq!(c.remaining(), 0);
        assert_eq!(c.peek_opt(), None);
        let err = c.read_line().unwrap_err();
        assert_eq!(err.kind(), ErrorKind::Clipped);
        assert_eq!(err.offset(), 0);
        assert_eq!(c.advance(0).unwrap_err().kind(), ErrorKind::Clipped);
        assert_eq!(c.peek().unwrap_err().kind(), ErrorKind::Clipped);
    }

    #[test]
    fn advance_zero_succeeds_at_end() {
        let mut c = Cursor::new(b"");
        assert_eq!(c.advance(0).unwrap(), b"");
    }

    #[test]
    fn empty_line_check_reports_garbage_at_line_start() {
        let mut c = Cursor::new(b"xyz\n");
        let err = c.expect_empty_line().unwrap_err();
        assert_eq!(err.kind(), ErrorKind::Garbage);
        assert_eq!(err.offset(), 0);
    }
}
