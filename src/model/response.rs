use std::collections::HashMap;
use std::fmt;

use crate::model::body::Body;

/// What application code hands back: a status, one value per header name,
/// and a body that is written out later.
///
/// There is no reason phrase here; it is always derived from the status.
pub struct Response {
    status: u16,
    headers: HashMap<String, String>,
    body: Box<dyn Body>,
}

/// Builder for constructing responses in a fluent style.
///
/// # Example
///
/// ```
/// # use switchyard::model::Response;
/// let response = Response::builder(200)
///     .header("Content-Type", "application/json")
///     .body("{}")
///     .build();
/// assert_eq!(response.status(), 200);
/// ```
pub struct ResponseBuilder {
    status: u16,
    headers: HashMap<String, String>,
    body: Box<dyn Body>,
}

impl ResponseBuilder {
    pub fn new(status: u16) -> Self {
        Self {
            status,
            headers: HashMap::new(),
            body: Box::new(()),
        }
    }

    /// Adds or replaces a header. Names are kept exactly as given.
    pub fn header(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.headers.insert(name.into(), value.into());
        self
    }

    pub fn body(mut self, body: impl Body) -> Self {
        self.body = Box::new(body);
        self
    }

    pub fn build(self) -> Response {
        Response {
            status: self.status,
            headers: self.headers,
            body: self.body,
        }
    }
}

impl Response {
    /// A response with the given status, no headers and an empty body.
    pub fn new(status: u16) -> Self {
        ResponseBuilder::new(status).build()
    }

    pub fn builder(status: u16) -> ResponseBuilder {
        ResponseBuilder::new(status)
    }

    /// `200` with a `text/plain` body.
    pub fn text(body: impl Into<String>) -> Self {
        ResponseBuilder::new(200)
            .header("Content-Type", "text/plain; charset=utf-8")
            .body(body.into())
            .build()
    }

    pub fn not_found() -> Self {
        Self::new(404)
    }

    pub fn status(&self) -> u16 {
        self.status
    }

    pub fn headers(&self) -> &HashMap<String, String> {
        &self.headers
    }

    pub fn into_parts(self) -> (u16, HashMap<String, String>, Box<dyn Body>) {
        (self.status, self.headers, self.body)
    }
}

impl fmt::Debug for Response {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Response")
            .field("status", &self.status)
            .field("headers", &self.headers)
            .finish_non_exhaustive()
    }
}
