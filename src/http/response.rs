use crate::http::request::Header;
use crate::http::status::reason_for;

/// Represents a complete HTTP response ready to be handed to the event loop.
///
/// The reason phrase is always derived from the status code; there is no way
/// to set it independently. The body is fully materialized.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WireResponse {
    /// Numeric status code
    pub status: u16,
    /// Reason phrase matching `status`
    pub reason: String,
    /// Headers in the order they will be written
    pub headers: Vec<Header>,
    /// Response body as bytes
    pub body: Vec<u8>,
}

impl WireResponse {
    /// Creates a response whose reason phrase is looked up from `status`.
    pub fn new(status: u16, headers: Vec<Header>, body: Vec<u8>) -> Self {
        Self {
            status,
            reason: reason_for(status).to_string(),
            headers,
            body,
        }
    }

    /// The bare `500 Internal Server Error` used whenever a request fails
    /// before a real response exists: no headers, empty body.
    pub fn internal_error() -> Self {
        Self::new(500, Vec::new(), Vec::new())
    }

    /// Retrieves the first header value with the given name, ignoring case.
    pub fn header(&self, name: &str) -> Option<&str> {
        self.headers
            .iter()
            .find(|h| h.name.eq_ignore_ascii_case(name))
            .map(|h| h.value.as_str())
    }
}
