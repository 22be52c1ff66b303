//! The event-loop server and the callback contract it drives.
//!
//! The event loop owns sockets, parsing and writing. For every parsed request
//! it calls [`Handler::handle`] and later writes whatever the handler passes
//! to the [`Deliver`] callback. Handlers must return promptly: the loop is a
//! single thread shared by every connection.

pub mod listener;

use crate::http::request::WireRequest;
use crate::http::response::WireResponse;

pub use listener::{EventLoop, ShutdownHandle};

/// Completion callback handed to a [`Handler`] alongside each request.
pub type Deliver = Box<dyn FnOnce(WireResponse) + Send + 'static>;

/// What the event loop calls for every inbound request.
///
/// Implementations must call `deliver` exactly once per call, from any
/// thread, at any later time.
pub trait Handler: Send + Sync + 'static {
    fn handle(&self, request: WireRequest, deliver: Deliver);
}
