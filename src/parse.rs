//! Wire grammar parsers
//!
//! Parsers here operate on a single line with the CRLF terminator already
//! removed; line extraction is the message state machine's job.
use nom::{
    IResult, Parser,
    bytes::complete::{tag, take_while1},
    character::complete::digit1,
    combinator::{all_consuming, map, rest},
    sequence::separated_pair,
};

use crate::error::{ParseError, ParseErrorKind};

pub(crate) struct RequestLineRef<'a> {
    pub method: &'a [u8],
    pub target: &'a [u8],
    pub protocol: &'a [u8],
}

pub(crate) struct StatusLineRef<'a> {
    pub protocol: &'a [u8],
    pub status: &'a [u8],
    pub reason: &'a [u8],
}

pub(crate) struct FieldRef<'a> {
    pub name: &'a [u8],
    pub value: &'a [u8],
}

/// Returns the index of the next CRLF, if one has fully arrived.
pub(crate) fn scan_line(input: &[u8]) -> Option<usize> {
    input.windows(2).position(|window| window == b"\r\n")
}

/// `METHOD SP TARGET SP PROTOCOL`, exactly three tokens.
pub(crate) fn request_line(input: &[u8]) -> IResult<&[u8], RequestLineRef<'_>> {
    let parts = (token, tag(" "), segment, tag(" "), segment);

    all_consuming(map(parts, |(method, _, target, _, protocol)| {
        RequestLineRef {
            method,
            target,
            protocol,
        }
    }))
    .parse(input)
}

/// `PROTOCOL SP STATUS SP REASON` where the reason phrase runs to the end
/// of the line and may contain spaces (or be empty).
pub(crate) fn status_line(input: &[u8]) -> IResult<&[u8], StatusLineRef<'_>> {
    let parts = (segment, tag(" "), digit1, tag(" "), rest);

    all_consuming(map(parts, |(protocol, _, status, _, reason)| {
        StatusLineRef {
            protocol,
            status,
            reason,
        }
    }))
    .parse(input)
}

/// `NAME ":" OWS VALUE OWS`. The first colon is authoritative; later
/// colons belong to the value.
pub(crate) fn header_field(input: &[u8]) -> IResult<&[u8], FieldRef<'_>> {
    let pair = separated_pair(token, tag(":"), rest);

    all_consuming(map(pair, |(name, value)| FieldRef {
        name,
        value: trim_ows(value),
    }))
    .parse(input)
}

fn token(input: &[u8]) -> IResult<&[u8], &[u8]> {
    take_while1(is_tchar).parse(input)
}

fn segment(input: &[u8]) -> IResult<&[u8], &[u8]> {
    take_while1(|b: u8| b.is_ascii_graphic()).parse(input)
}

pub(crate) fn is_tchar(b: u8) -> bool {
    b.is_ascii_alphanumeric() || b"!#$%&'*+-.^_`|~".contains(&b)
}

fn trim_ows(value: &[u8]) -> &[u8] {
    let start = value
        .iter()
        .position(|b| !matches!(b, b' ' | b'\t'))
        .unwrap_or(value.len());
    let end = value
        .iter()
        .rposition(|b| !matches!(b, b' ' | b'\t'))
        .map_or(start, |index| index + 1);
    &value[start..end]
}

/// Parse a value into an `i64`.
///
/// Only ASCII digits with an optional leading `-` are permitted; the
/// leniency of the std library parsing functions (`+`, Unicode digits)
/// would break canonical byte comparison.
pub(crate) fn parse_i64_strict(value: &[u8]) -> Result<i64, ParseError> {
    let digits = value.strip_prefix(b"-").unwrap_or(value);

    if digits.is_empty() || !digits.iter().all(|b| b.is_ascii_digit()) {
        return Err(ParseError::new(ParseErrorKind::InvalidNumber)
            .with_snippet(value[0..value.len().min(16)].escape_ascii().to_string()));
    }

    let text = std::str::from_utf8(value)?;
    text.parse()
        .map_err(|e| ParseError::new(ParseErrorKind::InvalidNumber).with_source(e))
}
