//! # zonebar - Blue/Green Deployment Health & Banner Service
//!
//! A single-purpose HTTP endpoint for blue/green deployments: it answers
//! load-balancer health probes with a togglable availability flag, and it
//! serves a generated banner script that shows browsers which zone they
//! reached and offers a one-click switch to the other zone.
//!
//! ## Modules
//!
//! - [`config`] - TOML configuration, served paths, and header constants
//! - [`http`] - server startup and graceful shutdown
//! - [`middleware`] - per-request tracing span with a request ID
//! - [`routes`] - the banner, probe, and toggle endpoints
//! - [`state`] - process-wide state: the availability flag and its seeding

pub mod config;
pub mod http;
pub mod middleware;
pub mod routes;
pub mod state;

pub use routes::create_router;
pub use state::AppState;
