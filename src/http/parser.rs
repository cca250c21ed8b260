use std::collections::HashMap;
use std::fmt;
use std::io;

use tokio::io::{AsyncBufRead, AsyncBufReadExt};

use crate::http::grammar;
use crate::http::request::Request;

#[derive(Debug)]
pub enum ParseError {
    InvalidRequestLine,
    InvalidHeader,
    /// The stream ended or failed before the header block was complete.
    Io(io::Error),
}

impl ParseError {
    /// Whether the client sent something that breaks the request grammar,
    /// as opposed to the read itself failing.
    pub fn is_malformed(&self) -> bool {
        matches!(self, ParseError::InvalidRequestLine | ParseError::InvalidHeader)
    }
}

impl fmt::Display for ParseError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ParseError::InvalidRequestLine => f.write_str("invalid request line"),
            ParseError::InvalidHeader => f.write_str("invalid header line"),
            ParseError::Io(e) => write!(f, "read failed: {e}"),
        }
    }
}

impl std::error::Error for ParseError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            ParseError::Io(e) => Some(e),
            _ => None,
        }
    }
}

impl From<io::Error> for ParseError {
    fn from(e: io::Error) -> Self {
        ParseError::Io(e)
    }
}

/// The three request-line tokens, extracted after the grammar check passes.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RequestLine {
    pub method: String,
    pub path: String,
    pub version: String,
}

/// Reads one line, without its `\n` or `\r\n` terminator.
///
/// A line that is not valid UTF-8 cannot satisfy any of the grammars, so it
/// comes back as `Ok(None)` and the caller treats it as malformed.
pub async fn read_line<R>(reader: &mut R) -> Result<Option<String>, ParseError>
where
    R: AsyncBufRead + Unpin,
{
    let mut buf = Vec::new();
    let n = reader.read_until(b'\n', &mut buf).await?;

    if n == 0 {
        return Err(ParseError::Io(io::Error::new(
            io::ErrorKind::UnexpectedEof,
            "connection closed before end of header block",
        )));
    }

    if buf.last() == Some(&b'\n') {
        buf.pop();
        if buf.last() == Some(&b'\r') {
            buf.pop();
        }
    }

    Ok(String::from_utf8(buf).ok())
}

pub fn parse_request_line(line: &str) -> Result<RequestLine, ParseError> {
    if !grammar::is_request_line(line) {
        return Err(ParseError::InvalidRequestLine);
    }

    let mut parts = line.split_whitespace();

    let method = parts.next().ok_or(ParseError::InvalidRequestLine)?;
    let path = parts.next().ok_or(ParseError::InvalidRequestLine)?;
    let version = parts.next().ok_or(ParseError::InvalidRequestLine)?;

    Ok(RequestLine {
        method: method.to_string(),
        path: path.to_string(),
        version: version.to_string(),
    })
}

/// Splits a header line on its first colon into a lower-cased name and a
/// trimmed value.
pub fn parse_header_line(line: &str) -> Result<(String, String), ParseError> {
    if !grammar::is_header_line(line) {
        return Err(ParseError::InvalidHeader);
    }

    let (key, value) = line
        .split_once(':')
        .ok_or(ParseError::InvalidHeader)?;

    Ok((key.to_ascii_lowercase(), value.trim().to_string()))
}

pub async fn read_request_line<R>(reader: &mut R) -> Result<RequestLine, ParseError>
where
    R: AsyncBufRead + Unpin,
{
    let line = read_line(reader)
        .await?
        .ok_or(ParseError::InvalidRequestLine)?;

    parse_request_line(&line)
}

/// Reads header lines up to the blank line that ends the header block.
///
/// Stops at the first line that fails the header grammar; nothing after it
/// is read.
pub async fn read_headers<R>(reader: &mut R) -> Result<HashMap<String, String>, ParseError>
where
    R: AsyncBufRead + Unpin,
{
    let mut headers = HashMap::new();

    loop {
        let line = read_line(reader).await?.ok_or(ParseError::InvalidHeader)?;

        if line.is_empty() {
            return Ok(headers);
        }

        let (key, value) = parse_header_line(&line)?;
        // Last occurrence wins
        headers.insert(key, value);
    }
}

pub async fn read_request<R>(reader: &mut R) -> Result<Request, ParseError>
where
    R: AsyncBufRead + Unpin,
{
    let RequestLine { method, path, version } = read_request_line(reader).await?;
    let headers = read_headers(reader).await?;

    Ok(Request {
        method,
        path,
        version,
        headers,
    })
}
