use std::collections::HashMap;

/// Methods the server is willing to serve.
///
/// Anything else parses fine as a request-line token but is answered with
/// 405 Method Not Allowed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Method {
    /// GET - Retrieve the resource
    GET,
    /// HEAD - Like GET but without the response body
    HEAD,
}

/// Represents a parsed HTTP request from a client.
///
/// Header names are stored lower-cased and values trimmed, so lookups through
/// [`Request::header`] are case-insensitive. No body is ever read.
#[derive(Debug, Clone)]
pub struct Request {
    /// The method token exactly as the client sent it
    pub method: String,
    /// The request target (e.g. "/TestServer")
    pub path: String,
    /// HTTP version token (e.g. "HTTP/1.1")
    pub version: String,
    /// Request headers keyed by lower-cased field name
    pub headers: HashMap<String, String>,
}

/// Builder for constructing Request objects.
pub struct RequestBuilder {
    method: Option<String>,
    path: Option<String>,
    version: Option<String>,
    headers: HashMap<String, String>,
}

impl Method {
    /// Matches a request-line method token against the supported methods.
    ///
    /// Unlike most of HTTP, the comparison ignores ASCII case.
    ///
    /// # Example
    ///
    /// ```
    /// # use cachet::http::request::Method;
    /// assert_eq!(Method::from_token("GET"), Some(Method::GET));
    /// assert_eq!(Method::from_token("head"), Some(Method::HEAD));
    /// assert_eq!(Method::from_token("POST"), None);
    /// ```
    pub fn from_token(s: &str) -> Option<Self> {
        if s.eq_ignore_ascii_case("GET") {
            Some(Method::GET)
        } else if s.eq_ignore_ascii_case("HEAD") {
            Some(Method::HEAD)
        } else {
            None
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Method::GET => "GET",
            Method::HEAD => "HEAD",
        }
    }
}

impl RequestBuilder {
    pub fn new() -> Self {
        Self {
            method: None,
            path: None,
            version: None,
            headers: HashMap::new(),
        }
    }

    pub fn method(mut self, method: impl Into<String>) -> Self {
        self.method = Some(method.into());
        self
    }

    pub fn path(mut self, path: impl Into<String>) -> Self {
        self.path = Some(path.into());
        self
    }

    pub fn version(mut self, version: impl Into<String>) -> Self {
        self.version = Some(version.into());
        self
    }

    /// Adds a header, normalizing the name and value the same way the parser does.
    pub fn header(mut self, key: impl AsRef<str>, value: impl AsRef<str>) -> Self {
        self.headers.insert(
            key.as_ref().to_ascii_lowercase(),
            value.as_ref().trim().to_string(),
        );
        self
    }

    pub fn build(self) -> Result<Request, &'static str> {
        Ok(Request {
            method: self.method.ok_or("method missing")?,
            path: self.path.ok_or("path missing")?,
            version: self.version.unwrap_or_else(|| "HTTP/1.1".to_string()),
            headers: self.headers,
        })
    }
}

impl Default for RequestBuilder {
    fn default() -> Self {
        Self::new()
    }
}

impl Request {
    /// Retrieves a header value by name, ignoring case.
    ///
    /// # Returns
    ///
    /// `Some(&str)` with the trimmed header value if present, `None` otherwise.
    pub fn header(&self, key: &str) -> Option<&str> {
        self.headers
            .get(&key.to_ascii_lowercase())
            .map(|v| v.as_str())
    }

    /// The supported method this request uses, if any.
    pub fn supported_method(&self) -> Option<Method> {
        Method::from_token(&self.method)
    }
}
