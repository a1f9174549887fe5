//! HTTP request messages
use std::io::Write;

use crate::{
    error::ParseError,
    message::{Message, StartLine},
    parse,
    value::Value,
};

/// Request top line: `METHOD SP TARGET SP PROTOCOL`.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct RequestLine {
    pub method: Value,
    pub target: Value,
    pub protocol: Value,
}

impl StartLine for RequestLine {
    const GLYPH: char = '→';

    fn parse_line(line: &[u8]) -> Result<Self, ParseError> {
        let (_remain, parts) = parse::request_line(line)?;

        Ok(Self {
            method: parts.method.into(),
            target: parts.target.into(),
            protocol: parts.protocol.into(),
        })
    }

    fn serialize<W: Write>(&self, mut buf: W) -> std::io::Result<()> {
        buf.write_all(&self.method.as_bytes())?;
        buf.write_all(b" ")?;
        buf.write_all(&self.target.as_bytes())?;
        buf.write_all(b" ")?;
        buf.write_all(&self.protocol.as_bytes())?;
        buf.write_all(b"\r\n")?;

        Ok(())
    }
}

/// An HTTP/1.1 request.
pub type Request = Message<RequestLine>;

impl Message<RequestLine> {
    /// Direct construction with all three top-line fields.
    ///
    /// The returned message starts in header state, as if the top line had
    /// already been fed.
    pub fn new<M, T, P>(method: M, target: T, protocol: P) -> Self
    where
        M: Into<Value>,
        T: Into<Value>,
        P: Into<Value>,
    {
        Self::with_start(RequestLine {
            method: method.into(),
            target: target.into(),
            protocol: protocol.into(),
        })
    }

    pub fn method(&self) -> &Value {
        &self.start.method
    }

    pub fn set_method<V: Into<Value>>(&mut self, method: V) {
        self.start.method = method.into();
    }

    pub fn target(&self) -> &Value {
        &self.start.target
    }

    pub fn set_target<V: Into<Value>>(&mut self, target: V) {
        self.start.target = target.into();
    }

    pub fn protocol(&self) -> &Value {
        &self.start.protocol
    }

    pub fn set_protocol<V: Into<Value>>(&mut self, protocol: V) {
        self.start.protocol = protocol.into();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::message::State;

    #[test]
    fn test_request_new() {
        let req = Request::new("GET", "/", "HTTP/1.1");

        assert_eq!(req.state(), State::Header);
        assert_eq!(req.method(), "GET");
        assert_eq!(req.target(), "/");
        assert_eq!(req.protocol(), "HTTP/1.1");
        assert_eq!(req.raw(), b"GET / HTTP/1.1\r\n\r\n");
    }

    #[test]
    fn test_request_new_with_headers_is_complete() {
        let req = Request::new("GET", "/", "HTTP/1.1").with_header("Hello", "World");

        assert_eq!(req.state(), State::Body);
        assert_eq!(req.body(), b"");
        assert_eq!(req.raw(), b"GET / HTTP/1.1\r\nHello: World\r\n\r\n");
    }

    #[test]
    fn test_request_new_with_headers_and_body() {
        let req = Request::new("GET", "/", "HTTP/1.1")
            .with_header("Hello", "World")
            .with_body("Hello world");

        assert_eq!(req.state(), State::Body);
        assert_eq!(req.raw(), b"GET / HTTP/1.1\r\nHello: World\r\n\r\nHello world");
    }

    #[test]
    fn test_request_parse() {
        let req = Request::parse(b"GET / HTTP/1.1\r\n\r\n").unwrap();

        assert_eq!(req.state(), State::Body);
        assert_eq!(req.method(), "GET");
    }

    #[test]
    fn test_request_mutation_accepts_all_representations() {
        let mut req = Request::new("GET", "/", "HTTP/1.1");

        req.set_method(b"POST");
        assert_eq!(req.method(), "POST");

        req.set_method("PUT".to_string());
        assert_eq!(req.method(), b"PUT");
    }
}
