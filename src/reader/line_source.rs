//! Line splitting over a decoded byte stream
//!
//! Bytes are pulled from the underlying stream in fixed-size chunks, decoded
//! incrementally with `encoding_rs` and handed out one line at a time. Lines
//! end at CR, LF or CRLF; the terminator is not part of the returned text.

use encoding_rs::{CoderResult, Decoder, Encoding};
use std::fmt;
use std::io::{ErrorKind, Read};

use crate::constants::READ_CHUNK_SIZE;
use crate::{Error, Result};

/// An open, decoding line reader
pub struct LineSource {
    stream: Box<dyn Read>,
    decoder: Decoder,
    encoding: &'static Encoding,
    chunk: Vec<u8>,
    pending: String,
    start: usize,
    eof: bool,
    lines_read: usize,
}

impl LineSource {
    /// Wrap a byte stream; a leading byte-order mark overrides `encoding`
    pub fn new(stream: Box<dyn Read>, encoding: &'static Encoding) -> Self {
        Self {
            stream,
            decoder: encoding.new_decoder(),
            encoding,
            chunk: vec![0; READ_CHUNK_SIZE],
            pending: String::new(),
            start: 0,
            eof: false,
            lines_read: 0,
        }
    }

    /// Physical line number of the last line returned (1-based, 0 before any)
    pub fn line_number(&self) -> usize {
        self.lines_read
    }

    /// Read the next line, or `None` at end of stream
    pub fn next_line(&mut self) -> Result<Option<String>> {
        loop {
            let rest = &self.pending[self.start..];

            if let Some(pos) = rest.find(['\r', '\n']) {
                let bytes = rest.as_bytes();

                // A trailing CR may be the first half of a CRLF split across chunks
                if bytes[pos] == b'\r' && pos + 1 == bytes.len() && !self.eof {
                    self.fill()?;
                    continue;
                }

                let line = rest[..pos].to_string();
                let terminator_len = if bytes[pos] == b'\r' && bytes.get(pos + 1) == Some(&b'\n') {
                    2
                } else {
                    1
                };
                self.start += pos + terminator_len;
                self.lines_read += 1;
                return Ok(Some(line));
            }

            if self.eof {
                if rest.is_empty() {
                    return Ok(None);
                }
                let line = rest.to_string();
                self.start = self.pending.len();
                self.lines_read += 1;
                return Ok(Some(line));
            }

            self.fill()?;
        }
    }

    /// Pull one chunk from the stream and decode it onto the pending text
    fn fill(&mut self) -> Result<()> {
        self.pending.drain(..self.start);
        self.start = 0;

        let read = loop {
            match self.stream.read(&mut self.chunk) {
                Ok(n) => break n,
                Err(e) if e.kind() == ErrorKind::Interrupted => continue,
                Err(e) => return Err(Error::io("Failed to read from source", e)),
            }
        };
        let last = read == 0;

        let Self {
            decoder,
            chunk,
            pending,
            ..
        } = self;
        let mut input = &chunk[..read];

        loop {
            let needed = decoder
                .max_utf8_buffer_length(input.len())
                .unwrap_or(input.len().saturating_mul(3));
            pending.reserve(needed);

            let (result, consumed, _had_errors) = decoder.decode_to_string(input, pending, last);
            input = &input[consumed..];

            match result {
                CoderResult::InputEmpty => break,
                CoderResult::OutputFull => continue,
            }
        }

        if last {
            self.eof = true;
        }

        Ok(())
    }
}

impl fmt::Debug for LineSource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("LineSource")
            .field("encoding", &self.encoding.name())
            .field("lines_read", &self.lines_read)
            .field("eof", &self.eof)
            .finish_non_exhaustive()
    }
}
