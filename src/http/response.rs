use std::net::SocketAddr;

use crate::http::outcome::Outcome;
use crate::http::request::Method;

/// HTTP status codes the server can answer with.
///
/// - `Ok` (200): Resource served
/// - `NotModified` (304): Client's cached copy is current
/// - `BadRequest` (400): Malformed request or missing Host
/// - `NotFound` (404): Unknown resource
/// - `MethodNotAllowed` (405): Method other than GET/HEAD
/// - `InternalServerError` (500): Server error
/// - `HttpVersionNotSupported` (505): Version other than HTTP/1.1
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StatusCode {
    /// 200 OK
    Ok,
    /// 304 Not Modified
    NotModified,
    /// 400 Bad Request
    BadRequest,
    /// 404 Not Found
    NotFound,
    /// 405 Method Not Allowed
    MethodNotAllowed,
    /// 500 Internal Server Error
    InternalServerError,
    /// 505 HTTP Version Not Supported
    HttpVersionNotSupported,
}

impl StatusCode {
    /// Returns the numeric HTTP status code.
    ///
    /// # Example
    ///
    /// ```
    /// # use cachet::http::response::StatusCode;
    /// assert_eq!(StatusCode::Ok.as_u16(), 200);
    /// assert_eq!(StatusCode::NotModified.as_u16(), 304);
    /// ```
    pub fn as_u16(&self) -> u16 {
        match self {
            StatusCode::Ok => 200,
            StatusCode::NotModified => 304,
            StatusCode::BadRequest => 400,
            StatusCode::NotFound => 404,
            StatusCode::MethodNotAllowed => 405,
            StatusCode::InternalServerError => 500,
            StatusCode::HttpVersionNotSupported => 505,
        }
    }

    /// Returns the standard HTTP reason phrase for this status code.
    pub fn reason_phrase(&self) -> &'static str {
        match self {
            StatusCode::Ok => "OK",
            StatusCode::NotModified => "Not Modified",
            StatusCode::BadRequest => "Bad Request",
            StatusCode::NotFound => "Not Found",
            StatusCode::MethodNotAllowed => "Method Not Allowed",
            StatusCode::InternalServerError => "Internal Server Error",
            StatusCode::HttpVersionNotSupported => "HTTP Version Not Supported",
        }
    }
}

/// Represents a complete HTTP response ready to be sent to a client.
///
/// Headers keep the order they were added in; `body` is `None` when the
/// response carries no message body at all (304, HEAD).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Response {
    /// The HTTP status code
    pub status: StatusCode,
    /// Header lines in wire order
    pub headers: Vec<(String, String)>,
    /// Response body, if any
    pub body: Option<Vec<u8>>,
}

/// Builder for constructing HTTP responses in a fluent style.
///
/// # Example
///
/// ```ignore
/// let response = ResponseBuilder::new(StatusCode::Ok)
///     .header("Cache-Control", "public")
///     .body(b"<html></html>".to_vec())
///     .build();
/// ```
pub struct ResponseBuilder {
    status: StatusCode,
    headers: Vec<(String, String)>,
    body: Option<Vec<u8>>,
}

impl ResponseBuilder {
    /// Creates a new response builder with the specified status code.
    pub fn new(status: StatusCode) -> Self {
        Self {
            status,
            headers: Vec::new(),
            body: None,
        }
    }

    /// Appends a header line.
    pub fn header(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.headers.push((key.into(), value.into()));
        self
    }

    /// Sets the response body.
    pub fn body(mut self, body: Vec<u8>) -> Self {
        self.body = Some(body);
        self
    }

    /// Builds the final Response.
    ///
    /// A body-bearing response gets a trailing `Content-Length` taken from the
    /// finished body; a body-less one gets none.
    pub fn build(mut self) -> Response {
        if let Some(body) = &self.body {
            self.headers
                .push(("Content-Length".to_string(), body.len().to_string()));
        }

        Response {
            status: self.status,
            headers: self.headers,
            body: self.body,
        }
    }
}

impl Response {
    /// First value of the named header, ignoring case.
    pub fn header(&self, key: &str) -> Option<&str> {
        self.headers
            .iter()
            .find(|(k, _)| k.eq_ignore_ascii_case(key))
            .map(|(_, v)| v.as_str())
    }
}

/// Everything besides the outcome that goes into a response.
#[derive(Debug, Clone)]
pub struct ResponseContext {
    /// Current time as an HTTP date
    pub now: String,
    /// The resource's last-modified stamp, if the clock has been set
    pub last_modified: Option<String>,
    /// Supported method of the request, when one was parsed
    pub method: Option<Method>,
    /// Value of the `Server` header and identity shown in the body
    pub server_name: String,
    /// Local end of the connection
    pub local_addr: Option<SocketAddr>,
}

const BAD_REQUEST_BODY: &str = "<html><body><h1>The request could not be understood by the server due to malformed syntax.</h1></body></html>";
const MISSING_HOST_BODY: &str = "<html><body><h1>The request is missing the required Host header field.</h1></body></html>";
const METHOD_NOT_ALLOWED_BODY: &str = "<html><body><h1>The method specified in the Request-Line is not allowed for the resource identified by the Request-URI.</h1></body></html>";
const NOT_FOUND_BODY: &str = "<html><body><h1>The server has not found anything matching the Request-URI.</h1></body></html>";
const VERSION_NOT_SUPPORTED_BODY: &str = "<html><body><h1>The server does not support the HTTP protocol version that was used in the request message.</h1></body></html>";
const INTERNAL_ERROR_BODY: &str = "<html><body><h1>500 Internal Server Error</h1></body></html>";

/// Shown in place of the last-modified stamp before the clock is first set.
const UNSET_LAST_MODIFIED: &str = "an unknown time";

/// Renders the response for `outcome`.
///
/// Output depends only on the arguments, so rendering the same outcome with
/// the same context twice gives identical responses.
pub fn render(outcome: Outcome, ctx: &ResponseContext) -> Response {
    let builder = ResponseBuilder::new(outcome.status())
        .header("Date", ctx.now.as_str())
        .header("Server", ctx.server_name.as_str())
        .header("Content-Type", "text/html");

    match outcome {
        Outcome::Malformed => builder.body(BAD_REQUEST_BODY.into()).build(),
        Outcome::MissingHost => builder.body(MISSING_HOST_BODY.into()).build(),
        Outcome::MethodNotAllowed => builder
            .header("Allow", "GET, HEAD")
            .body(METHOD_NOT_ALLOWED_BODY.into())
            .build(),
        Outcome::NotFound => builder.body(NOT_FOUND_BODY.into()).build(),
        Outcome::VersionNotSupported => builder.body(VERSION_NOT_SUPPORTED_BODY.into()).build(),
        Outcome::InternalError => builder.body(INTERNAL_ERROR_BODY.into()).build(),
        Outcome::NotModified => builder
            .header(
                "Last-Modified",
                ctx.last_modified.as_deref().unwrap_or_default(),
            )
            .build(),
        Outcome::Ok if ctx.method == Some(Method::HEAD) => builder.build(),
        Outcome::Ok => builder
            .header("Cache-Control", "public")
            .body(resource_body(ctx).into_bytes())
            .build(),
    }
}

fn resource_body(ctx: &ResponseContext) -> String {
    let listening_on = match ctx.local_addr {
        Some(addr) => format!("{}, port {}", addr.ip(), addr.port()),
        None => "an unknown address".to_string(),
    };

    format!(
        "<html><body>This is {}. It is listening on {}. It is now {}.<br>This resource was last modified at {}.</body></html>",
        ctx.server_name,
        listening_on,
        ctx.now,
        ctx.last_modified.as_deref().unwrap_or(UNSET_LAST_MODIFIED),
    )
}
