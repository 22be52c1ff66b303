use std::collections::HashMap;

use bytes::buf::Reader;
use bytes::{Buf, Bytes};

/// A DER-encoded X.509 certificate presented by the client.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClientCertificate(pub Bytes);

/// The application-facing view of one HTTP exchange.
///
/// Every field is computed once when the request is built and nothing can be
/// changed afterwards. Header keys are lower-case.
#[derive(Debug, Clone)]
pub struct Request {
    server_name: String,
    server_port: u16,
    uri: String,
    query_string: Option<String>,
    method: String,
    headers: HashMap<String, String>,
    body: Bytes,
}

impl Request {
    pub(crate) fn new(
        server_name: String,
        server_port: u16,
        uri: String,
        query_string: Option<String>,
        method: String,
        headers: HashMap<String, String>,
        body: Bytes,
    ) -> Self {
        Self {
            server_name,
            server_port,
            uri,
            query_string,
            method,
            headers,
            body,
        }
    }

    /// Host the server was configured to listen on.
    pub fn server_name(&self) -> &str {
        &self.server_name
    }

    pub fn server_port(&self) -> u16 {
        self.server_port
    }

    /// Always empty: the event loop does not expose peer addresses.
    pub fn remote_addr(&self) -> &str {
        ""
    }

    /// Request path without the query string.
    pub fn uri(&self) -> &str {
        &self.uri
    }

    /// Everything after the first `?`, if there was one. `/a?` gives `Some("")`.
    pub fn query_string(&self) -> Option<&str> {
        self.query_string.as_deref()
    }

    pub fn scheme(&self) -> &str {
        "http"
    }

    /// Lower-cased method token, e.g. `"get"`.
    pub fn request_method(&self) -> &str {
        &self.method
    }

    pub fn protocol(&self) -> &str {
        "HTTP/1.1"
    }

    pub fn headers(&self) -> &HashMap<String, String> {
        &self.headers
    }

    /// Looks up a header; `name` is lower-cased before the lookup.
    pub fn header(&self, name: &str) -> Option<&str> {
        self.headers
            .get(&name.to_ascii_lowercase())
            .map(|v| v.as_str())
    }

    /// Always `None`: no TLS layer is wired in.
    pub fn ssl_client_cert(&self) -> Option<&ClientCertificate> {
        None
    }

    /// A fresh reader over the request body, starting at offset zero.
    ///
    /// Requests without a body yield an empty reader. Creating a reader does
    /// not copy the bytes.
    pub fn body(&self) -> Reader<Bytes> {
        self.body.clone().reader()
    }

    /// The raw body bytes.
    pub fn body_bytes(&self) -> &Bytes {
        &self.body
    }
}
