use alloc::collections::TryReserveError;

use thiserror::Error;

/// Errors reported by [`Decoder`](crate::Decoder).
///
/// Malformed numbers, truncated fields and length mismatches are not errors;
/// the decoder degrades into partial output for those.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum DecodeError {
    /// The stream does not open with the `@` marker byte.
    #[error("not a SiebelMessage stream")]
    NotThisFormat {
        /// The first byte, or `None` for an empty stream.
        found: Option<u8>,
    },
    /// A field buffer could not grow.
    #[error("out of memory while buffering a field: {0}")]
    Allocation(#[from] TryReserveError),
}
