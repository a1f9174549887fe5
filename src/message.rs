//! Incremental message state machine
//!
//! This module is sans-IO; it doesn't use networking sockets. Bytes are
//! pushed in with [`Message::feed`] in chunks of any size and the machine
//! buffers whatever has not yet formed a complete line.
use std::{fmt::Display, io::Write};

use crate::{error::ParseError, fields::HeaderMap, parse, value::Value};

/// Parse progress of a message.
///
/// States advance monotonically; there are no reverse transitions. `Body`
/// is terminal: every byte fed afterwards is appended to the body verbatim
/// with no further line tokenization.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum State {
    #[default]
    Top,
    Header,
    Body,
}

/// Top-line shape of a message variant.
///
/// [`Request`](crate::Request) and [`Response`](crate::Response) differ only
/// in the grammar and field names of their first line; everything else
/// (feeding, header handling, body accumulation, serialization) is shared by
/// the [`Message`] engine through this trait.
pub trait StartLine: Default {
    /// Direction marker used by the display form.
    const GLYPH: char;

    /// Parses one complete top line, CRLF already removed.
    fn parse_line(line: &[u8]) -> Result<Self, ParseError>;

    /// Writes the top line including the trailing CRLF.
    fn serialize<W: Write>(&self, buf: W) -> std::io::Result<()>;
}

/// An HTTP/1.1 message being built from fed bytes, mutated, or serialized.
///
/// Every field and header remains assignable for the whole lifetime of the
/// message; [`raw`](Self::raw) always reflects the latest state, never the
/// originally parsed bytes.
///
/// The accumulation buffer keeps the entire byte history fed since
/// construction for inspection via [`buffer`](Self::buffer). Unbounded
/// growth on very large bodies is part of this contract; callers that need
/// bounded memory should frame bodies themselves and stop feeding.
#[derive(Debug, Clone, Default)]
pub struct Message<L> {
    state: State,
    buf: Vec<u8>,
    scan: usize,
    pub(crate) start: L,
    headers: HeaderMap,
    body: Vec<u8>,
}

impl<L: StartLine> Message<L> {
    /// Direct construction with an already-accepted top line.
    pub(crate) fn with_start(start: L) -> Self {
        Self {
            state: State::Header,
            start,
            ..Self::default()
        }
    }

    /// Parses a complete message buffer in one shot.
    ///
    /// Behaviorally identical to feeding the same bytes into a fresh
    /// message in chunks of any size.
    pub fn parse(bytes: &[u8]) -> Result<Self, ParseError> {
        let mut message = Self::default();
        message.feed(bytes)?;
        Ok(message)
    }

    /// Adds a chunk of the message and advances the state machine.
    ///
    /// Complete CRLF-terminated lines are consumed as they become
    /// available; a partially arrived line (the terminator itself may be
    /// split across chunks) stays buffered until a later feed completes
    /// it. Returns the state after consuming the chunk.
    ///
    /// A malformed top line fails fast; the message stays in
    /// [`State::Top`] and the caller should retry on a fresh instance.
    pub fn feed(&mut self, chunk: &[u8]) -> Result<State, ParseError> {
        self.buf.extend_from_slice(chunk);
        self.advance()?;
        Ok(self.state)
    }

    fn advance(&mut self) -> Result<(), ParseError> {
        while self.state != State::Body {
            let Some(index) = parse::scan_line(&self.buf[self.scan..]) else {
                return Ok(());
            };

            let line_start = self.scan;
            let line_end = self.scan + index;
            self.scan = line_end + 2;

            if self.state == State::Top {
                let line = &self.buf[line_start..line_end];
                self.start = L::parse_line(line)?;
                self.state = State::Header;
                tracing::trace!(len = line.len(), "top line accepted");
            } else if line_end == line_start {
                self.state = State::Body;
                tracing::trace!(field_count = self.headers.len(), "header block complete");
            } else {
                let line = &self.buf[line_start..line_end];
                let (_remain, field) = parse::header_field(line)?;
                let name = String::from_utf8(field.name.to_vec())?;
                self.headers.append(name, field.value);
            }
        }

        if self.scan < self.buf.len() {
            let len = self.buf.len() - self.scan;
            self.body.extend_from_slice(&self.buf[self.scan..]);
            self.scan = self.buf.len();
            tracing::trace!(len, total = self.body.len(), "body bytes appended");
        }

        Ok(())
    }

    pub fn state(&self) -> State {
        self.state
    }

    /// Every byte fed since construction.
    pub fn buffer(&self) -> &[u8] {
        &self.buf
    }

    pub fn headers(&self) -> &HeaderMap {
        &self.headers
    }

    pub fn headers_mut(&mut self) -> &mut HeaderMap {
        &mut self.headers
    }

    pub fn body(&self) -> &[u8] {
        &self.body
    }

    pub fn set_body<V: Into<Value>>(&mut self, body: V) {
        self.body = body.into().into_bytes();
    }

    /// Appends a header entry, builder style. The message is complete
    /// afterwards: the state becomes [`State::Body`].
    pub fn with_header<N: Into<String>, V: Into<Value>>(mut self, name: N, value: V) -> Self {
        self.headers.append(name, value);
        self.state = State::Body;
        self
    }

    /// Sets the body, builder style. The message is complete afterwards:
    /// the state becomes [`State::Body`].
    pub fn with_body<V: Into<Value>>(mut self, body: V) -> Self {
        self.set_body(body);
        self.state = State::Body;
        self
    }

    /// Builds the wire form from the current field state.
    ///
    /// Top line, header lines in table order, a blank line, then the body,
    /// with no extra separators. Mutations made after parsing are always
    /// reflected; nothing is cached from the original bytes.
    pub fn raw(&self) -> Vec<u8> {
        let mut buf = Vec::with_capacity(self.buf.len().max(64));
        self.serialize(&mut buf)
            .expect("writing to a Vec does not fail");
        buf
    }

    pub fn serialize<W: Write>(&self, mut buf: W) -> std::io::Result<()> {
        self.start.serialize(&mut buf)?;
        self.headers.serialize(&mut buf)?;
        buf.write_all(&self.body)?;
        Ok(())
    }
}

impl<L: StartLine + PartialEq> PartialEq for Message<L> {
    fn eq(&self, other: &Self) -> bool {
        self.state == other.state
            && self.start == other.start
            && self.headers == other.headers
            && self.body == other.body
    }
}

/// Human-readable form: the wire content with every line prefixed by the
/// variant's direction glyph. Presentation only; not parseable wire bytes.
impl<L: StartLine> Display for Message<L> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let raw = self.raw();
        let text = String::from_utf8_lossy(&raw);
        let text = text.trim_end_matches("\r\n");

        let mut first = true;
        for line in text.split("\r\n") {
            if !first {
                f.write_str("\r\n")?;
            }
            first = false;
            write!(f, "{} {}", L::GLYPH, line)?;
        }

        Ok(())
    }
}
