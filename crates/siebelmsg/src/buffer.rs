//! Growable byte accumulator used for field content and length tokens.
//!
//! [`FieldBuffer`] is a thin wrapper around `Vec<u8>` whose growth goes
//! through [`Vec::try_reserve`], so running out of memory is reported to the
//! caller as a [`TryReserveError`] instead of aborting the process. Growth is
//! amortized geometric and never loses existing content.

use alloc::{collections::TryReserveError, vec::Vec};

use bstr::{BStr, BString, ByteSlice};

/// Owned, append-only byte buffer with explicit truncation.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FieldBuffer {
    bytes: Vec<u8>,
}

impl FieldBuffer {
    /// Creates an empty buffer without allocating.
    #[must_use]
    pub const fn new() -> Self {
        Self { bytes: Vec::new() }
    }

    /// Appends a single byte.
    ///
    /// # Errors
    ///
    /// Returns [`TryReserveError`] if the buffer cannot grow.
    #[inline]
    pub fn push(&mut self, byte: u8) -> Result<(), TryReserveError> {
        if self.bytes.len() == self.bytes.capacity() {
            self.bytes.try_reserve(1)?;
        }
        self.bytes.push(byte);
        Ok(())
    }

    /// Appends all of `bytes` in one call.
    ///
    /// # Errors
    ///
    /// Returns [`TryReserveError`] if the buffer cannot grow. The buffer is
    /// left unchanged in that case.
    pub fn extend_from_slice(&mut self, bytes: &[u8]) -> Result<(), TryReserveError> {
        self.bytes.try_reserve(bytes.len())?;
        self.bytes.extend_from_slice(bytes);
        Ok(())
    }

    /// Removes `len` bytes starting at `pos`.
    ///
    /// When `pos + len` reaches or passes the end, everything from `pos`
    /// onward is dropped. A `pos` past the end is a no-op.
    pub fn truncate_from(&mut self, pos: usize, len: usize) {
        if pos > self.bytes.len() {
            return;
        }
        match pos.checked_add(len) {
            Some(end) if end < self.bytes.len() => {
                self.bytes.drain(pos..end);
            }
            _ => self.bytes.truncate(pos),
        }
    }

    /// Drops the content and keeps the allocation for reuse.
    #[inline]
    pub fn clear(&mut self) {
        self.bytes.clear();
    }

    /// Moves the content out, leaving the buffer empty.
    pub fn take(&mut self) -> BString {
        BString::from(core::mem::take(&mut self.bytes))
    }

    /// The valid content as a byte string.
    #[inline]
    #[must_use]
    pub fn as_bstr(&self) -> &BStr {
        self.bytes.as_bstr()
    }

    /// The valid content as raw bytes.
    #[inline]
    #[must_use]
    pub fn as_bytes(&self) -> &[u8] {
        &self.bytes
    }

    /// Number of content bytes.
    #[inline]
    #[must_use]
    pub fn len(&self) -> usize {
        self.bytes.len()
    }

    /// Whether the buffer holds no content.
    #[inline]
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.bytes.is_empty()
    }

    /// Bytes the buffer can hold before it has to grow again.
    #[inline]
    #[must_use]
    pub fn capacity(&self) -> usize {
        self.bytes.capacity()
    }
}
