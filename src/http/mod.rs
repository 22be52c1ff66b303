//! Wire-level HTTP/1.1 plumbing for the embedded event loop.
//!
//! This module is the concrete side of the bridge: it turns bytes into
//! [`request::WireRequest`] values and [`response::WireResponse`] values back
//! into bytes. It knows nothing about the application model.
//!
//! # Architecture
//!
//! - **`connection`**: Per-connection state machine driving a [`crate::server::Handler`]
//! - **`parser`**: Parses incoming HTTP requests from byte buffers
//! - **`request`**: Wire request representation (ordered headers, raw body)
//! - **`response`**: Wire response representation (derived reason phrase)
//! - **`status`**: Status code to reason phrase table
//! - **`writer`**: Serializes and writes responses to the client
//!
//! # Connection State Machine
//!
//! ```text
//!        ┌─────────────┐
//!        │   Reading   │ ← Wait for incoming request data
//!        └──────┬──────┘
//!               │ Request received (malformed → 400, then Closed)
//!               ▼
//!        ┌──────────────────┐
//!        │   Processing     │ ← handler.handle(req, deliver); await delivery
//!        └──────┬───────────┘
//!               │ Response delivered
//!               ▼
//!        ┌──────────────────┐
//!        │    Writing       │ ← Send response to client
//!        └──────┬───────────┘
//!               │ Response sent
//!               ├─ Keep-Alive → Reading (same connection)
//!               └─ Close → Closed
//! ```

pub mod request;
pub mod response;
pub mod parser;
pub mod connection;
pub mod writer;
pub mod status;
