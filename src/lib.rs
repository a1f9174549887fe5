//! Incremental parser, mutator, and serializer for HTTP/1.1 messages.
//!
//! This crate is sans-IO; it doesn't use networking sockets. Bytes read by
//! the caller are pushed into a [`Request`] or [`Response`] with
//! [`Message::feed`] in chunks of any size, or parsed in one shot with
//! [`Message::parse`]. Fields and headers accept text, raw bytes, or
//! integers interchangeably, stay mutable after parsing, and
//! [`Message::raw`] serializes the current state back to wire bytes.
//!
//! Message framing beyond the blank header/body boundary line is the
//! caller's responsibility: `Content-Length` and `Transfer-Encoding` are
//! ordinary headers here, never interpreted.
//!
//! ```
//! use h1msg::{Request, State};
//!
//! let req = Request::parse(
//!     b"GET /get HTTP/1.1\r\nHost: httpbin.org\r\n\r\nHello world!",
//! )?;
//!
//! assert_eq!(req.state(), State::Body);
//! assert_eq!(req.method(), "GET");
//! assert_eq!(req.headers().get("host").unwrap(), "httpbin.org");
//! assert_eq!(req.body(), b"Hello world!");
//! # Ok::<(), h1msg::ParseError>(())
//! ```
pub mod error;
pub mod fields;
pub mod message;
mod parse;
pub mod request;
pub mod response;
pub mod value;

pub use crate::{
    error::{ParseError, ParseErrorKind},
    fields::{Entry, HeaderMap},
    message::{Message, StartLine, State},
    request::{Request, RequestLine},
    response::{Response, StatusLine},
    value::Value,
};
