//! A streaming, single-pass decoder for Oracle Siebel's proprietary
//! `SiebelMessage` serialization format.
//!
//! A message looks like this:
//!
//! ```text
//! @0*0*2*0*0*0*4*Key16*Value14*Key21*B
//! ```
//!
//! The `@` marker is followed by six `*`-terminated header tokens. The third
//! one holds the number of property pairs of the first group and the fourth
//! the number of child groups. The body is a run of fields, each preceded by
//! its decimal length and a `*`. Field content is consumed by length, not by
//! terminator, so a `*` inside a value is plain content.
//!
//! [`Decoder`] is fed chunks of bytes and emits [`Fragment`]s as soon as each
//! field completes. Rendered back to back they read as `NAME: value` lines:
//!
//! ```rust
//! use siebelmsg::{Fragment, decode_slice};
//!
//! let fragments = decode_slice(b"@0*0*2*0*0*0*4*Key16*Value14*Key21*B").unwrap();
//! let rendered: String = fragments.iter().map(Fragment::to_string).collect();
//! assert_eq!(rendered, "\nKey1: Value1\nKey2: B\n");
//! ```
//!
//! The decoder is best-effort: apart from the leading marker nothing is
//! validated, and an inconsistent stream (for example a declared length that
//! runs past the end of the input) produces truncated or misaligned output
//! rather than an error.

#![no_std]
extern crate alloc;

#[cfg(any(test, feature = "std"))]
extern crate std;

mod buffer;
mod decoder;
mod error;
mod fragment;
mod header;
#[cfg(feature = "std")]
mod io;
mod options;
mod utf8;

#[cfg(test)]
mod tests;

pub use buffer::FieldBuffer;
pub use decoder::{DELIMITER, Decoder, MARKER, decode_slice};
pub use error::DecodeError;
pub use fragment::Fragment;
pub use header::{HEADER_TOKENS, Header, parse_decimal};
#[cfg(feature = "std")]
pub use io::{DecodeStats, Fragments, Lines, StreamError, decode, fragments, lines};
pub use options::{DecoderOptions, LengthUnit};
