use thiserror::Error;

/// Why a decode failed.
///
/// Every variant except [`ErrorKind::TooDeep`] corresponds to one of the
/// stable error codes of the reference loader.
#[derive(Error, Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorKind {
    /// A declared byte length could not be satisfied by the input.
    #[error("load failed: corrupt data, bad size")]
    BadSize,
    /// A required field was empty, or a table key was `nil` or NaN.
    #[error("load failed: corrupt data")]
    BadData,
    /// The type tag is not one the format defines.
    #[error("load failed: unknown data type")]
    BadType,
    /// Unparsed bytes were found before a required line terminator.
    #[error("load failed: garbage before newline")]
    Garbage,
    /// A declared size exceeds the supported integer or table range.
    #[error("load failed: value too huge")]
    TooHuge,
    /// A UTF-8 string payload is malformed.
    #[error("load failed: invalid utf-8 data")]
    BadUtf8,
    /// The input ended before the required bytes were available.
    #[error("load failed: corrupt data, truncated")]
    Clipped,
    /// Tables are nested deeper than [`DecodeOptions::max_depth`].
    ///
    /// [`DecodeOptions::max_depth`]: crate::DecodeOptions::max_depth
    #[error("load failed: tables nested too deeply")]
    TooDeep,
}

/// The error returned by every decode entry point.
///
/// Carries the [`ErrorKind`] of the first failure together with the byte
/// offset at which it was detected.
#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
#[error("{kind} at byte {offset}")]
pub struct DecodeError {
    kind: ErrorKind,
    offset: usize,
}

impl DecodeError {
    pub(crate) fn new(kind: ErrorKind, offset: usize) -> Self {
        Self { kind, offset }
    }

    /// Keeps the position but reports a different kind.
    pub(crate) fn reclassify(self, kind: ErrorKind) -> Self {
        Self { kind, ..self }
    }

    /// The kind of failure.
    #[must_use]
    pub fn kind(&self) -> ErrorKind {
        self.kind
    }

    /// Byte offset into the input where the failure was detected.
    #[must_use]
    pub fn offset(&self) -> usize {
        self.offset
    }
}
