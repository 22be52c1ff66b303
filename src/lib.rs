//! Switchyard - HTTP adapter
//!
//! Runs transport-agnostic application handlers behind a small event-loop
//! HTTP/1.1 server, translating requests and responses in both directions.

pub mod adapter;
pub mod config;
pub mod executor;
pub mod http;
pub mod model;
pub mod server;

pub use adapter::run_server;
