//! The transport-agnostic request/response model seen by application code.

pub mod body;
pub mod request;
pub mod response;

pub use body::{Body, ReaderBody, WriteFn};
pub use request::{ClientCertificate, Request};
pub use response::{Response, ResponseBuilder};

/// Conversion into a [`Response`].
pub trait IntoResponse {
    fn into_response(self) -> Response;
}

impl IntoResponse for Response {
    fn into_response(self) -> Response {
        self
    }
}

/// A bare status code: no headers, empty body.
impl IntoResponse for u16 {
    fn into_response(self) -> Response {
        Response::new(self)
    }
}

impl<B: Body> IntoResponse for (u16, B) {
    fn into_response(self) -> Response {
        Response::builder(self.0).body(self.1).build()
    }
}

/// Application logic: one request in, one response (or error) out.
///
/// Called synchronously on a worker thread, never on the event loop.
pub trait Application: Send + Sync + 'static {
    fn call(&self, request: &Request) -> anyhow::Result<Response>;
}

impl<F, R> Application for F
where
    F: Fn(&Request) -> anyhow::Result<R> + Send + Sync + 'static,
    R: IntoResponse,
{
    fn call(&self, request: &Request) -> anyhow::Result<Response> {
        self(request).map(IntoResponse::into_response)
    }
}
