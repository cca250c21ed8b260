//! Request classification.
//!
//! Every request ends in exactly one [`Outcome`], and the outcome alone
//! decides the status line, the extra headers and the body template of the
//! response.

use crate::http::grammar;
use crate::http::request::{Method, Request};
use crate::http::response::StatusCode;

/// The only version the server speaks.
pub const SUPPORTED_VERSION: &str = "HTTP/1.1";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Outcome {
    /// Request line, a header line or the If-Modified-Since date failed the grammar
    Malformed,
    /// No Host header
    MissingHost,
    /// Method other than GET or HEAD
    MethodNotAllowed,
    /// Target is not the served resource
    NotFound,
    /// Version other than HTTP/1.1
    VersionNotSupported,
    /// If-Modified-Since matches the resource's last-modified stamp
    NotModified,
    Ok,
    /// The server failed while handling the request
    InternalError,
}

impl Outcome {
    pub fn status(&self) -> StatusCode {
        match self {
            Outcome::Malformed | Outcome::MissingHost => StatusCode::BadRequest,
            Outcome::MethodNotAllowed => StatusCode::MethodNotAllowed,
            Outcome::NotFound => StatusCode::NotFound,
            Outcome::VersionNotSupported => StatusCode::HttpVersionNotSupported,
            Outcome::NotModified => StatusCode::NotModified,
            Outcome::Ok => StatusCode::Ok,
            Outcome::InternalError => StatusCode::InternalServerError,
        }
    }
}

/// Classifies a parsed request against the single served resource.
///
/// Rules are tried in order and the first match wins:
///
/// 1. missing `Host` header → [`Outcome::MissingHost`]
/// 2. method not GET/HEAD (any case) → [`Outcome::MethodNotAllowed`]
/// 3. target not exactly `resource_path` → [`Outcome::NotFound`]
/// 4. version not exactly `HTTP/1.1` → [`Outcome::VersionNotSupported`]
/// 5. `If-Modified-Since` present: a badly formed date is
///    [`Outcome::Malformed`]; a date equal to `last_modified` is
///    [`Outcome::NotModified`]
/// 6. otherwise [`Outcome::Ok`]
///
/// Rule 5 compares strings byte for byte. An unset `last_modified` never
/// matches.
pub fn classify(request: &Request, resource_path: &str, last_modified: Option<&str>) -> Outcome {
    if request.header("host").is_none() {
        return Outcome::MissingHost;
    }

    if Method::from_token(&request.method).is_none() {
        return Outcome::MethodNotAllowed;
    }

    if request.path != resource_path {
        return Outcome::NotFound;
    }

    if request.version != SUPPORTED_VERSION {
        return Outcome::VersionNotSupported;
    }

    if let Some(since) = request.header("if-modified-since") {
        if !grammar::is_http_date(since) {
            return Outcome::Malformed;
        }

        if last_modified == Some(since) {
            return Outcome::NotModified;
        }
    }

    Outcome::Ok
}
