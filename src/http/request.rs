/// A single header line as it appeared on the wire.
///
/// Names keep their original casing; nothing is merged or normalized here.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Header {
    pub name: String,
    pub value: String,
}

impl Header {
    pub fn new(name: impl Into<String>, value: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            value: value.into(),
        }
    }

    /// Whether the header can be written as a single line: the name is a
    /// token and the value holds no CR, LF or NUL.
    pub fn is_writable(&self) -> bool {
        is_token(&self.name) && !self.value.bytes().any(|b| matches!(b, b'\r' | b'\n' | 0))
    }
}

/// RFC 7230 token characters, as used for methods and header names.
pub fn is_token(s: &str) -> bool {
    !s.is_empty()
        && s.bytes().all(|b| {
            b.is_ascii_alphanumeric() || b"!#$%&'*+-.^_`|~".contains(&b)
        })
}

/// Represents a parsed HTTP request as delivered by the event loop.
///
/// This is the wire-level view: the method token and URI exactly as sent,
/// headers in arrival order (duplicates included), and the raw body bytes.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WireRequest {
    /// The method token (e.g. "GET"), not case-normalized
    pub method: String,
    /// The request target including any query string (e.g. "/search?q=rust")
    pub uri: String,
    /// HTTP version (typically "HTTP/1.1")
    pub version: String,
    /// Headers in the order they were received
    pub headers: Vec<Header>,
    /// Request body; `None` when the request carried no Content-Length
    pub body: Option<Vec<u8>>,
}

/// Builder for constructing WireRequest objects.
pub struct WireRequestBuilder {
    method: Option<String>,
    uri: Option<String>,
    version: Option<String>,
    headers: Vec<Header>,
    body: Option<Vec<u8>>,
}

impl WireRequestBuilder {
    pub fn new() -> Self {
        Self {
            method: None,
            uri: None,
            version: None,
            headers: Vec::new(),
            body: None,
        }
    }

    pub fn method(mut self, method: impl Into<String>) -> Self {
        self.method = Some(method.into());
        self
    }

    pub fn uri(mut self, uri: impl Into<String>) -> Self {
        self.uri = Some(uri.into());
        self
    }

    pub fn version(mut self, version: impl Into<String>) -> Self {
        self.version = Some(version.into());
        self
    }

    /// Appends a header. Repeated names are kept as separate entries.
    pub fn header(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.headers.push(Header::new(name, value));
        self
    }

    pub fn body(mut self, body: impl Into<Vec<u8>>) -> Self {
        self.body = Some(body.into());
        self
    }

    pub fn build(self) -> Result<WireRequest, &'static str> {
        Ok(WireRequest {
            method: self.method.ok_or("method missing")?,
            uri: self.uri.ok_or("uri missing")?,
            version: self.version.unwrap_or_else(|| "HTTP/1.1".to_string()),
            headers: self.headers,
            body: self.body,
        })
    }
}

impl Default for WireRequestBuilder {
    fn default() -> Self {
        Self::new()
    }
}

impl WireRequest {
    pub fn builder() -> WireRequestBuilder {
        WireRequestBuilder::new()
    }

    /// Retrieves the first header value with the given name, ignoring case.
    pub fn header(&self, name: &str) -> Option<&str> {
        self.headers
            .iter()
            .find(|h| h.name.eq_ignore_ascii_case(name))
            .map(|h| h.value.as_str())
    }

    /// Retrieves the Content-Length header value and parses it as a usize.
    ///
    /// Returns 0 if the header is missing or not a valid number.
    pub fn content_length(&self) -> usize {
        self.header("Content-Length")
            .and_then(|v| v.trim().parse().ok())
            .unwrap_or(0)
    }

    /// Determines whether the connection should remain open after the response.
    ///
    /// An explicit Connection header wins. Otherwise HTTP/1.1 defaults to
    /// keep-alive and HTTP/1.0 to close.
    pub fn keep_alive(&self) -> bool {
        match self.header("Connection") {
            Some(v) if v.eq_ignore_ascii_case("keep-alive") => true,
            Some(v) if v.eq_ignore_ascii_case("close") => false,
            _ => self.version != "HTTP/1.0",
        }
    }
}
