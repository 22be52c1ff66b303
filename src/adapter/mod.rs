//! Translation between the wire types and the application model, and the
//! handler that runs applications off the event loop.
//!
//! ```text
//! event loop ── handle(wire, deliver) ──▶ DispatchHandler
//!                                            │ executor.execute(..)
//!                                            ▼
//!                          inbound ─▶ Application::call ─▶ outbound
//!                                            │
//!                              deliver(wire response) ◀─┘  (exactly once)
//! ```

pub mod dispatch;
pub mod headers;
pub mod inbound;
pub mod outbound;

use std::sync::Arc;

use crate::config::ServerConfig;
use crate::executor::Executor;
use crate::model::Application;
use crate::server::EventLoop;

pub use dispatch::{DispatchHandler, ErrorHook, RequestFailure};
pub use inbound::from_wire_request;
pub use outbound::to_wire_response;

/// Serves `app` on `options.host:options.port`, blocking until the event loop
/// stops.
///
/// The same options are used for binding and for the `server_name` and
/// `server_port` every request reports. Bind and runtime failures are
/// returned; they are not retried.
pub fn run_server<A: Application>(
    app: A,
    options: &ServerConfig,
    executor: Arc<dyn Executor>,
) -> anyhow::Result<()> {
    let event_loop = EventLoop::bind(options)?;
    let handler = DispatchHandler::new(app, options, executor);
    event_loop.run(handler)
}
