//! Load-balancer health probe and its availability toggles.
//!
//! Balancers probe `HEAD /health` to decide whether this instance receives
//! traffic. `POST /health/disable` flips the flag so the balancer drains the
//! instance ahead of a zone switch; `POST /health/enable` brings it back.
//! The flag is availability, not liveness: a disabled process keeps serving
//! everything else.

use axum::{extract::State, http::StatusCode};
use tracing::instrument;

use crate::state::AppState;

/// Availability probe.
///
/// Returns 200 while the instance should receive traffic, 503 once disabled
/// (or seeded unavailable at startup). Registered for HEAD only, so there is
/// never a body.
#[instrument(name = "health::probe", skip(state))]
pub async fn probe(State(state): State<AppState>) -> StatusCode {
    if state.availability.is_available() {
        StatusCode::OK
    } else {
        StatusCode::SERVICE_UNAVAILABLE
    }
}

/// Mark this instance unavailable to the load balancer.
#[instrument(name = "health::disable", skip(state))]
pub async fn disable(State(state): State<AppState>) -> &'static str {
    if state.availability.disable() {
        tracing::info!("Server DISABLED, probe will report 503");
        "DISABLING the server"
    } else {
        "NoOp, already disabled"
    }
}

/// Mark this instance available to the load balancer again.
#[instrument(name = "health::enable", skip(state))]
pub async fn enable(State(state): State<AppState>) -> &'static str {
    if state.availability.enable() {
        "NoOp, already enabled"
    } else {
        tracing::info!("Server ENABLED, probe will report 200");
        "ENABLING the server"
    }
}
