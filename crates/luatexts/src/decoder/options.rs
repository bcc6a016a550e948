/// Default for [`DecodeOptions::max_depth`].
pub const DEFAULT_MAX_DEPTH: usize = 200;

/// Configuration for a decode call.
///
/// # Examples
///
/// ```rust
/// use luatexts::{DecodeOptions, ErrorKind, decode_with_options};
///
/// let options = DecodeOptions { max_depth: 1 };
/// let nested = b"1\nt\nU\n1\nt\n-\n-\n";
/// let err = decode_with_options(nested, options).unwrap_err();
/// assert_eq!(err.kind(), ErrorKind::TooDeep);
/// ```
#[derive(Debug, Clone, Copy)]
pub struct DecodeOptions {
    /// How many tables may be open at once.
    ///
    /// A top-level table is at depth 1. Opening a table beyond this depth
    /// fails with [`ErrorKind::TooDeep`](crate::ErrorKind::TooDeep) instead
    /// of recursing further. `0` rejects every table.
    ///
    /// # Default
    ///
    /// [`DEFAULT_MAX_DEPTH`]
    pub max_depth: usize,
}

impl Default for DecodeOptions {
    fn default() -> Self {
        Self {
            max_depth: DEFAULT_MAX_DEPTH,
        }
    }
}
