//! HTTP response messages
use std::io::Write;

use crate::{
    error::ParseError,
    message::{Message, StartLine},
    parse,
    value::Value,
};

/// Response top line: `PROTOCOL SP STATUS SP REASON`.
///
/// The reason phrase is everything after the second space and may contain
/// embedded spaces or be empty.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct StatusLine {
    pub protocol: Value,
    pub status: Value,
    pub reason: Value,
}

impl StartLine for StatusLine {
    const GLYPH: char = '←';

    fn parse_line(line: &[u8]) -> Result<Self, ParseError> {
        let (_remain, parts) = parse::status_line(line)?;

        Ok(Self {
            protocol: parts.protocol.into(),
            status: Value::Int(parse::parse_i64_strict(parts.status)?),
            reason: parts.reason.into(),
        })
    }

    fn serialize<W: Write>(&self, mut buf: W) -> std::io::Result<()> {
        buf.write_all(&self.protocol.as_bytes())?;
        buf.write_all(b" ")?;
        buf.write_all(&self.status.as_bytes())?;
        buf.write_all(b" ")?;
        buf.write_all(&self.reason.as_bytes())?;
        buf.write_all(b"\r\n")?;

        Ok(())
    }
}

/// An HTTP/1.1 response.
pub type Response = Message<StatusLine>;

impl Message<StatusLine> {
    /// Direct construction with all three top-line fields.
    ///
    /// The returned message starts in header state, as if the top line had
    /// already been fed.
    pub fn new<P, R>(protocol: P, status: u16, reason: R) -> Self
    where
        P: Into<Value>,
        R: Into<Value>,
    {
        Self::with_start(StatusLine {
            protocol: protocol.into(),
            status: Value::Int(i64::from(status)),
            reason: reason.into(),
        })
    }

    pub fn protocol(&self) -> &Value {
        &self.start.protocol
    }

    pub fn set_protocol<V: Into<Value>>(&mut self, protocol: V) {
        self.start.protocol = protocol.into();
    }

    /// The status code, always integer-comparable and serialized as base-10
    /// ASCII digits.
    pub fn status(&self) -> &Value {
        &self.start.status
    }

    /// Assigns the status code from text, bytes, or an integer.
    ///
    /// The value must convert to an integer; assignment fails immediately
    /// otherwise rather than coercing. The normalized integer form is
    /// stored.
    pub fn set_status<V: Into<Value>>(&mut self, status: V) -> Result<(), ParseError> {
        self.start.status = Value::Int(status.into().to_int()?);
        Ok(())
    }

    pub fn reason(&self) -> &Value {
        &self.start.reason
    }

    pub fn set_reason<V: Into<Value>>(&mut self, reason: V) {
        self.start.reason = reason.into();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::message::State;

    #[test]
    fn test_response_new() {
        let resp = Response::new("HTTP/1.1", 200, "OK");

        assert_eq!(resp.state(), State::Header);
        assert_eq!(resp.protocol(), "HTTP/1.1");
        assert_eq!(*resp.status(), 200);
        assert_eq!(resp.reason(), "OK");
        assert_eq!(resp.raw(), b"HTTP/1.1 200 OK\r\n\r\n");
    }

    #[test]
    fn test_response_parse() {
        let resp = Response::parse(b"HTTP/1.1 404 Not Found\r\n\r\n").unwrap();

        assert_eq!(resp.state(), State::Body);
        assert_eq!(*resp.status(), 404);
        assert_eq!(resp.status(), "404");
        assert_eq!(resp.status(), b"404");
        assert_eq!(resp.reason(), "Not Found");
    }

    #[test]
    fn test_response_set_status_normalizes() {
        let mut resp = Response::new("HTTP/1.1", 200, "OK");

        resp.set_status("301").unwrap();
        assert_eq!(*resp.status(), 301);
        assert!(resp.status().is_int());

        resp.set_status(b"302").unwrap();
        assert_eq!(*resp.status(), 302);
    }

    #[test]
    fn test_response_set_status_rejects_non_numeric() {
        let mut resp = Response::new("HTTP/1.1", 200, "OK");

        assert!(resp.set_status("teapot").is_err());
        // the previous value is untouched
        assert_eq!(*resp.status(), 200);
    }

    #[test]
    fn test_response_reassignment_leaves_no_trace() {
        let mut resp = Response::new("HTTP/1.1", 404, "Not Found");

        resp.set_status(200).unwrap();
        resp.set_reason("OK");

        let raw = resp.raw();
        assert!(raw.starts_with(b"HTTP/1.1 200 OK\r\n"));
        assert!(!raw.windows(3).any(|w| w == b"404"));
    }
}
