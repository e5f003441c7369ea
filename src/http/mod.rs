//! HTTP server module.
//!
//! Plain-HTTP serving with graceful shutdown on SIGTERM/SIGINT. TLS is the
//! job of the balancer tier sitting in front of this service.

mod server;
mod shutdown;

pub use server::{start_server, ServerError};
