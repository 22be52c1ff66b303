use std::any::Any;
use std::panic::{self, AssertUnwindSafe};
use std::sync::Arc;

use anyhow::Context;

use crate::adapter::inbound::from_wire_request;
use crate::adapter::outbound::to_wire_response;
use crate::config::ServerConfig;
use crate::executor::Executor;
use crate::http::request::WireRequest;
use crate::http::response::WireResponse;
use crate::model::Application;
use crate::server::{Deliver, Handler};

/// A request that ended in the fallback 500, as reported to the error hook.
#[derive(Debug)]
pub struct RequestFailure {
    /// Method token as received
    pub method: String,
    /// Request target as received, query included
    pub uri: String,
    pub error: anyhow::Error,
}

/// Receives every failure that is turned into the fallback 500.
pub type ErrorHook = Arc<dyn Fn(&RequestFailure) + Send + Sync + 'static>;

/// Bridges the event loop to an [`Application`].
///
/// `handle` only schedules work. The worker task translates the request,
/// runs the application, translates the response, and delivers it. Whatever
/// happens in between, the deliver callback runs exactly once: with the real
/// response on success, otherwise with a bare `500 Internal Server Error`.
pub struct DispatchHandler<A> {
    app: Arc<A>,
    host: Arc<str>,
    port: u16,
    executor: Arc<dyn Executor>,
    on_error: ErrorHook,
}

impl<A: Application> DispatchHandler<A> {
    pub fn new(app: A, options: &ServerConfig, executor: Arc<dyn Executor>) -> Self {
        Self {
            app: Arc::new(app),
            host: Arc::from(options.host.as_str()),
            port: options.port,
            executor,
            on_error: Arc::new(log_error),
        }
    }

    /// Replaces the default logging hook.
    pub fn with_error_hook<F>(mut self, hook: F) -> Self
    where
        F: Fn(&RequestFailure) + Send + Sync + 'static,
    {
        self.on_error = Arc::new(hook);
        self
    }
}

impl<A: Application> Handler for DispatchHandler<A> {
    fn handle(&self, request: WireRequest, deliver: Deliver) {
        let mut delivery = Delivery::new(deliver);

        let app = Arc::clone(&self.app);
        let host = Arc::clone(&self.host);
        let port = self.port;
        let on_error = Arc::clone(&self.on_error);

        self.executor.execute(Box::new(move || {
            let method = request.method.clone();
            let uri = request.uri.clone();

            let outcome = panic::catch_unwind(AssertUnwindSafe(|| {
                process(app.as_ref(), &host, port, request)
            }));

            // `delivery` drops on both paths and hands over whichever response it holds.
            let error = match outcome {
                Ok(Ok(response)) => {
                    delivery.complete(response);
                    return;
                }
                Ok(Err(e)) => e,
                Err(payload) => {
                    anyhow::anyhow!("application panicked: {}", panic_message(&*payload))
                }
            };

            on_error(&RequestFailure { method, uri, error });
        }));
    }
}

fn process<A: Application>(
    app: &A,
    host: &str,
    port: u16,
    request: WireRequest,
) -> anyhow::Result<WireResponse> {
    let request = from_wire_request(host, port, request);
    let response = app.call(&request)?;
    to_wire_response(response).context("failed to translate response")
}

/// Owns the obligation to call `deliver`.
///
/// Starts out holding the fallback 500. The callback fires when the guard is
/// dropped, which covers normal completion, errors, unwinding, and an executor
/// that discards the task without running it.
struct Delivery {
    deliver: Option<Deliver>,
    response: WireResponse,
}

impl Delivery {
    fn new(deliver: Deliver) -> Self {
        Self {
            deliver: Some(deliver),
            response: WireResponse::internal_error(),
        }
    }

    fn complete(&mut self, response: WireResponse) {
        self.response = response;
    }
}

impl Drop for Delivery {
    fn drop(&mut self) {
        if let Some(deliver) = self.deliver.take() {
            let response = std::mem::replace(&mut self.response, WireResponse::internal_error());
            deliver(response);
        }
    }
}

fn log_error(failure: &RequestFailure) {
    tracing::error!(
        method = %failure.method,
        uri = %failure.uri,
        error = %format!("{:#}", failure.error),
        "Request failed, responding 500"
    );
}

fn panic_message(payload: &(dyn Any + Send)) -> &str {
    if let Some(s) = payload.downcast_ref::<&str>() {
        *s
    } else if let Some(s) = payload.downcast_ref::<String>() {
        s.as_str()
    } else {
        "non-string panic payload"
    }
}
