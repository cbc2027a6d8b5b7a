//! Reader and writer adapters built on [`Decoder`].

use alloc::{collections::VecDeque, vec::Vec};
use std::io::{self, ErrorKind, Read, Write};

use bstr::BString;
use thiserror::Error;

use crate::{
    buffer::FieldBuffer, decoder::Decoder, error::DecodeError, fragment::Fragment,
    options::DecoderOptions,
};

const READ_CHUNK: usize = 8 * 1024;

/// Errors from decoding a byte source.
#[derive(Error, Debug)]
pub enum StreamError {
    /// The stream itself could not be decoded.
    #[error(transparent)]
    Decode(#[from] DecodeError),
    /// Reading the source or writing the sink failed.
    #[error("i/o error: {0}")]
    Io(#[from] io::Error),
}

/// Counters describing a completed [`decode`] run.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct DecodeStats {
    /// Bytes read from the source.
    pub bytes_read: u64,
    /// Fragments written to the sink.
    pub fragments: usize,
    /// Groups the decoder entered.
    pub groups: usize,
}

/// Decodes everything `reader` yields and writes the rendered fragments to
/// `writer` as soon as each one completes. The writer is flushed at the end.
///
/// Nothing is written when the stream is rejected.
///
/// # Errors
///
/// [`StreamError::Decode`] for a stream that does not start with `@`,
/// [`StreamError::Io`] if reading or writing fails.
pub fn decode<R: Read, W: Write>(reader: R, mut writer: W) -> Result<DecodeStats, StreamError> {
    let mut fragments = fragments(reader);
    let mut written = 0;
    for fragment in fragments.by_ref() {
        fragment?.write_to(&mut writer)?;
        written += 1;
    }
    writer.flush()?;
    Ok(DecodeStats {
        bytes_read: fragments.bytes_read(),
        fragments: written,
        groups: fragments.decoder().groups_started(),
    })
}

/// Lazily decodes `reader` into [`Fragment`]s with default options.
pub fn fragments<R: Read>(reader: R) -> Fragments<R> {
    Fragments::with_options(reader, DecoderOptions::default())
}

/// Lazily decodes `reader` into completed output lines with default options.
pub fn lines<R: Read>(reader: R) -> Lines<R> {
    Lines::new(fragments(reader))
}

/// Iterator over the fragments decoded from a reader.
///
/// The reader is consumed in chunks as fragments are requested, and is no
/// longer read once the decoder has finished its last group. After an error
/// the iterator is exhausted.
#[derive(Debug)]
pub struct Fragments<R> {
    reader: R,
    decoder: Decoder,
    queue: VecDeque<Fragment>,
    scratch: Vec<Fragment>,
    chunk: Vec<u8>,
    bytes_read: u64,
    finished: bool,
}

impl<R: Read> Fragments<R> {
    /// Wraps `reader` with a decoder configured by `options`.
    pub fn with_options(reader: R, options: DecoderOptions) -> Self {
        Self {
            reader,
            decoder: Decoder::new(options),
            queue: VecDeque::new(),
            scratch: Vec::new(),
            chunk: alloc::vec![0; READ_CHUNK],
            bytes_read: 0,
            finished: false,
        }
    }

    /// The underlying decoder.
    pub fn decoder(&self) -> &Decoder {
        &self.decoder
    }

    /// Bytes read from the source so far.
    pub fn bytes_read(&self) -> u64 {
        self.bytes_read
    }

    fn fill(&mut self) -> Result<(), StreamError> {
        if self.decoder.is_done() {
            self.finished = true;
            return Ok(());
        }
        let read = loop {
            match self.reader.read(&mut self.chunk) {
                Ok(read) => break read,
                Err(err) if err.kind() == ErrorKind::Interrupted => {}
                Err(err) => return Err(err.into()),
            }
        };
        self.bytes_read += read as u64;
        if read == 0 {
            self.finished = true;
            self.queue.extend(self.decoder.finish()?);
        } else {
            self.decoder
                .feed_into(&self.chunk[..read], &mut self.scratch)?;
            self.queue.extend(self.scratch.drain(..));
        }
        Ok(())
    }
}

impl<R: Read> Iterator for Fragments<R> {
    type Item = Result<Fragment, StreamError>;

    fn next(&mut self) -> Option<Self::Item> {
        loop {
            if let Some(fragment) = self.queue.pop_front() {
                return Some(Ok(fragment));
            }
            if self.finished {
                return None;
            }
            if let Err(err) = self.fill() {
                self.finished = true;
                return Some(Err(err));
            }
        }
    }
}

/// Iterator over completed output lines, without their trailing newline.
///
/// A label opens a line as `NAME: `; the next line fragment appends its text
/// and completes it, and a blank fragment completes it as is. A label left
/// open at the end of the stream is yielded as the last line.
#[derive(Debug)]
pub struct Lines<R> {
    fragments: Fragments<R>,
    pending: FieldBuffer,
    open: bool,
}

impl<R: Read> Lines<R> {
    /// Groups the output of `fragments` into lines.
    pub fn new(fragments: Fragments<R>) -> Self {
        Self {
            fragments,
            pending: FieldBuffer::new(),
            open: false,
        }
    }

    /// The fragment iterator this adapter reads from.
    pub fn fragments(&self) -> &Fragments<R> {
        &self.fragments
    }

    fn take_line(&mut self) -> BString {
        self.open = false;
        self.pending.take()
    }
}

impl<R: Read> Iterator for Lines<R> {
    type Item = Result<BString, StreamError>;

    fn next(&mut self) -> Option<Self::Item> {
        loop {
            let fragment = match self.fragments.next() {
                Some(Ok(fragment)) => fragment,
                Some(Err(err)) => return Some(Err(err)),
                None if self.open => return Some(Ok(self.take_line())),
                None => return None,
            };
            let appended = match &fragment {
                Fragment::Label(text) => self
                    .pending
                    .extend_from_slice(text)
                    .and_then(|()| self.pending.extend_from_slice(b": ")),
                Fragment::Line(text) => self.pending.extend_from_slice(text),
                Fragment::Blank => Ok(()),
            };
            if let Err(err) = appended {
                return Some(Err(DecodeError::from(err).into()));
            }
            if fragment.ends_line() {
                return Some(Ok(self.take_line()));
            }
            self.open = true;
        }
    }
}
