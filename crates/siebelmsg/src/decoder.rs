//! Single-pass decoder for `SiebelMessage` streams.
//!
//! Overview
//! - The decoder is a push state machine: callers [`Decoder::feed`] it chunks
//!   of any size and call [`Decoder::finish`] once the stream ends. The output
//!   does not depend on how the input was chunked.
//! - Two [`FieldBuffer`]s carry the in-flight data: `field` accumulates header
//!   tokens and field content, `length` accumulates the decimal length prefix
//!   of the next field.
//!
//! Framing
//! - Every field is `<length>*<content>`. Content is consumed by its declared
//!   length, never by terminator, so a `*` is significant only once the field
//!   has received at least as many units as were declared. Until then it is
//!   content.
//! - A field is emitted when the delimiter that ends the *next* length prefix
//!   arrives, or at end of stream.
//!
//! Groups
//! - The parity counter `slots` starts at twice the header's property count
//!   and drops by one per delimiter. Odd slots render as labels, even slots as
//!   line ends.
//! - A delimiter that arrives while `slots` is zero opens the next group: its
//!   length prefix is the new group's property count, `slots` becomes
//!   `(count + 1) * 2`, and the token up to the next `*` (the group's name) is
//!   discarded. The header declares how many groups follow the first one.
//!
//! Multi-byte characters
//! - With [`LengthUnit::Characters`] a content byte with its top bit set starts
//!   a character whose width is the count of its leading 1-bits (two for a
//!   stray continuation byte). The whole sequence is appended, the declared
//!   budget grows by the extra bytes, and the continuation bytes are taken
//!   unconditionally (a `*` among them is content).

use alloc::vec::Vec;

use crate::{
    buffer::FieldBuffer,
    error::DecodeError,
    fragment::Fragment,
    header::{Header, clamp, parse_decimal},
    options::{DecoderOptions, LengthUnit},
    utf8::sequence_width,
};

/// Byte that opens every message.
pub const MARKER: u8 = b'@';
/// Byte that terminates header tokens and length prefixes.
pub const DELIMITER: u8 = b'*';

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum State {
    /// Nothing read yet; the next byte must be [`MARKER`].
    Marker,
    /// Reading the `*`-terminated header tokens.
    Header,
    /// Reading the length prefix of the next field.
    AwaitingFieldLength,
    /// Reading a length prefix while the parity counter is exhausted; its
    /// delimiter opens the next group.
    AwaitingGroupLength,
    /// Reading declared field content.
    AwaitingFieldContent,
    /// Reading the trailing bytes of a multi-byte character.
    Continuation { remaining: usize },
    /// Discarding a group name up to and including the next delimiter.
    SkippingGroupName,
    /// All groups decoded or the stream ended. Further input is ignored.
    Done,
    /// The stream did not start with [`MARKER`].
    Rejected { found: Option<u8> },
}

/// Push decoder for `SiebelMessage` streams.
///
/// # Examples
///
/// ```rust
/// use siebelmsg::{Decoder, Fragment};
///
/// let mut decoder = Decoder::default();
/// let mut fragments = decoder.feed(b"@0*0*1*0*0*0*4*Name3*").unwrap();
/// fragments.extend(decoder.feed(b"Bob").unwrap());
/// fragments.extend(decoder.finish().unwrap());
///
/// assert_eq!(
///     fragments,
///     vec![
///         Fragment::Blank,
///         Fragment::Label("Name".into()),
///         Fragment::Line("Bob".into()),
///     ]
/// );
/// ```
///
/// Only a missing `@` marker is reported as an error. Any other
/// inconsistency, such as a declared length running past the end of the
/// stream or a non-numeric length prefix, silently yields truncated or
/// misaligned output.
#[derive(Debug)]
pub struct Decoder {
    options: DecoderOptions,
    state: State,
    header: Header,
    slots: usize,
    pending_groups: usize,
    groups_started: usize,
    declared: usize,
    field: FieldBuffer,
    length: FieldBuffer,
}

impl Default for Decoder {
    fn default() -> Self {
        Self::new(DecoderOptions::default())
    }
}

impl Decoder {
    /// Creates a decoder that has not seen any input.
    #[must_use]
    pub fn new(options: DecoderOptions) -> Self {
        Self {
            options,
            state: State::Marker,
            header: Header::default(),
            slots: 0,
            pending_groups: 0,
            groups_started: 0,
            declared: 0,
            field: FieldBuffer::new(),
            length: FieldBuffer::new(),
        }
    }

    /// Feeds a chunk of input and returns the fragments it completed.
    ///
    /// # Errors
    ///
    /// See [`Decoder::feed_into`].
    pub fn feed(&mut self, chunk: &[u8]) -> Result<Vec<Fragment>, DecodeError> {
        let mut out = Vec::new();
        self.feed_into(chunk, &mut out)?;
        Ok(out)
    }

    /// Feeds a chunk of input, appending completed fragments to `out`.
    ///
    /// Input after the last group is ignored.
    ///
    /// # Errors
    ///
    /// - [`DecodeError::NotThisFormat`] if the stream does not start with `@`.
    ///   Every later call returns the same error.
    /// - [`DecodeError::Allocation`] if a field buffer cannot grow.
    pub fn feed_into(&mut self, chunk: &[u8], out: &mut Vec<Fragment>) -> Result<(), DecodeError> {
        if let State::Rejected { found } = self.state {
            return Err(DecodeError::NotThisFormat { found });
        }
        for &byte in chunk {
            if self.state == State::Done {
                break;
            }
            self.step(byte, out)?;
            #[cfg(any(test, feature = "fuzzing"))]
            self.check_invariants();
        }
        Ok(())
    }

    /// Signals the end of the stream and returns the field still in flight,
    /// if it has any content.
    ///
    /// # Errors
    ///
    /// [`DecodeError::NotThisFormat`] if no input was ever fed or the stream
    /// was rejected.
    pub fn finish(&mut self) -> Result<Option<Fragment>, DecodeError> {
        let flushed = match self.state {
            State::Marker => {
                self.state = State::Rejected { found: None };
                return Err(DecodeError::NotThisFormat { found: None });
            }
            State::Rejected { found } => return Err(DecodeError::NotThisFormat { found }),
            State::Done => return Ok(None),
            State::Header => {
                log::debug!(
                    "stream ended inside the header after {} token(s)",
                    self.header.tokens().len()
                );
                None
            }
            State::AwaitingFieldLength
            | State::AwaitingGroupLength
            | State::AwaitingFieldContent
            | State::Continuation { .. } => {
                (!self.field.is_empty()).then(|| self.complete_field())
            }
            State::SkippingGroupName => None,
        };
        log::debug!(
            "end of stream after {} group(s), {} group(s) never started",
            self.groups_started,
            self.pending_groups.saturating_sub(1)
        );
        self.state = State::Done;
        Ok(flushed)
    }

    /// The message header, once all of its tokens have been read.
    #[must_use]
    pub fn header(&self) -> Option<&Header> {
        self.header.is_complete().then_some(&self.header)
    }

    /// Whether the decoder has stopped consuming input.
    #[must_use]
    pub fn is_done(&self) -> bool {
        self.state == State::Done
    }

    /// Number of groups entered so far.
    #[must_use]
    pub fn groups_started(&self) -> usize {
        self.groups_started
    }

    /// Number of groups not yet finished, counting the current one.
    #[must_use]
    pub fn groups_remaining(&self) -> usize {
        if self.is_done() { 0 } else { self.pending_groups }
    }

    /// The options this decoder was created with.
    #[must_use]
    pub fn options(&self) -> &DecoderOptions {
        &self.options
    }

    fn step(&mut self, byte: u8, out: &mut Vec<Fragment>) -> Result<(), DecodeError> {
        match self.state {
            State::Marker => {
                if byte != MARKER {
                    self.state = State::Rejected { found: Some(byte) };
                    return Err(DecodeError::NotThisFormat { found: Some(byte) });
                }
                self.state = State::Header;
            }
            State::Header => {
                if byte == DELIMITER {
                    self.complete_header_token();
                } else {
                    self.field.push(byte)?;
                }
            }
            State::AwaitingFieldLength | State::AwaitingGroupLength => {
                if byte == DELIMITER {
                    out.push(self.complete_field());
                    self.complete_length();
                } else {
                    self.length.push(byte)?;
                }
            }
            State::AwaitingFieldContent => {
                self.field.push(byte)?;
                let width = match self.options.length_unit {
                    LengthUnit::Characters => sequence_width(byte),
                    LengthUnit::Bytes => 1,
                };
                if width > 1 {
                    self.declared = self.declared.saturating_add(width - 1);
                    self.state = State::Continuation {
                        remaining: width - 1,
                    };
                } else {
                    self.settle_content();
                }
            }
            State::Continuation { remaining } => {
                self.field.push(byte)?;
                if remaining > 1 {
                    self.state = State::Continuation {
                        remaining: remaining - 1,
                    };
                } else {
                    self.settle_content();
                }
            }
            State::SkippingGroupName => {
                if byte == DELIMITER {
                    self.pending_groups = self.pending_groups.saturating_sub(1);
                    self.start_group();
                }
            }
            State::Done | State::Rejected { .. } => {}
        }
        Ok(())
    }

    #[cfg(any(test, feature = "fuzzing"))]
    fn check_invariants(&self) {
        assert!(
            self.length.is_empty()
                || matches!(
                    self.state,
                    State::AwaitingFieldLength | State::AwaitingGroupLength
                ),
            "Internal error: length prefix outside a length state"
        );
        assert!(
            self.state != State::SkippingGroupName || self.field.is_empty(),
            "Internal error: field content carried into a group name"
        );
        if let State::Continuation { remaining } = self.state {
            assert!(
                self.field.len() + remaining <= self.declared,
                "Internal error: continuation overruns its field"
            );
        }
    }

    fn complete_header_token(&mut self) {
        let token = self.field.take();
        self.header.push_token(token);
        if self.header.is_complete() {
            self.slots = self.header.field_slots();
            self.pending_groups = self.header.group_count();
            log::debug!(
                "header declares {} propert(ies) and {} child group(s)",
                self.header.property_count(),
                self.header.child_count()
            );
            self.start_group();
        }
    }

    fn start_group(&mut self) {
        if self.pending_groups == 0 {
            self.state = State::Done;
            return;
        }
        self.groups_started += 1;
        self.declared = 0;
        log::trace!(
            "group {} starts with {} field slot(s)",
            self.groups_started,
            self.slots
        );
        self.state = self.length_state();
    }

    /// Renders the current field by parity and empties the field buffer.
    fn complete_field(&mut self) -> Fragment {
        if self.field.is_empty() {
            Fragment::Blank
        } else if self.slots % 2 == 0 {
            Fragment::Line(self.field.take())
        } else {
            Fragment::Label(self.field.take())
        }
    }

    fn complete_length(&mut self) {
        self.declared = clamp(parse_decimal(self.length.as_bytes()));
        self.length.clear();
        if self.state == State::AwaitingGroupLength {
            self.slots = self.declared.saturating_add(1).saturating_mul(2);
            self.state = State::SkippingGroupName;
            return;
        }
        self.slots -= 1;
        self.state = if self.declared == 0 {
            self.length_state()
        } else {
            State::AwaitingFieldContent
        };
    }

    fn settle_content(&mut self) {
        self.state = if self.field.len() >= self.declared {
            self.length_state()
        } else {
            State::AwaitingFieldContent
        };
    }

    fn length_state(&self) -> State {
        if self.slots == 0 {
            State::AwaitingGroupLength
        } else {
            State::AwaitingFieldLength
        }
    }
}

/// Decodes a complete message held in memory.
///
/// # Errors
///
/// See [`Decoder::feed_into`] and [`Decoder::finish`].
pub fn decode_slice(input: &[u8]) -> Result<Vec<Fragment>, DecodeError> {
    let mut decoder = Decoder::default();
    let mut out = decoder.feed(input)?;
    out.extend(decoder.finish()?);
    Ok(out)
}
