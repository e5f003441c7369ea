//! HTTP route handlers for the zone health service.
//!
//! Three logical endpoints: the generated banner script, the load-balancer
//! health probe, and the probe's enable/disable toggles. Route groups carry
//! their own response-header layers; the banner script gets anti-cache
//! headers so a browser re-fetches it after every zone switch.
//!
//! Request tracing is enabled via middleware that generates a unique request
//! ID for each incoming request.

pub mod deployment_bar;
pub mod health;

use axum::{
    http::StatusCode,
    middleware,
    routing::{get, head, post},
    Router,
};
use http::header::{HeaderValue, CACHE_CONTROL, EXPIRES};
use tower_http::set_header::SetResponseHeaderLayer;

use crate::config::{
    CACHE_CONTROL_BAR, DEPLOYMENT_BAR_PATH, EXPIRES_BAR, HEALTH_DISABLE_PATH, HEALTH_ENABLE_PATH,
    HEALTH_PATH,
};
use crate::middleware::request_id_layer;
use crate::state::AppState;

/// Creates the Axum router with all routes and header layers.
pub fn create_router(state: AppState) -> Router {
    // Banner script - regenerated per request, must never be served stale
    let bar_routes = Router::new()
        .route(DEPLOYMENT_BAR_PATH, get(deployment_bar::script))
        .layer(SetResponseHeaderLayer::if_not_present(
            CACHE_CONTROL,
            HeaderValue::from_static(CACHE_CONTROL_BAR),
        ))
        .layer(SetResponseHeaderLayer::if_not_present(
            EXPIRES,
            HeaderValue::from_static(EXPIRES_BAR),
        ));

    // Health probe (HEAD only) and its POST toggles. A GET to any of these
    // paths gets the same explanatory 404 as an unmatched path; remaining
    // method mismatches get the method router's default 405.
    let health_routes = Router::new()
        .route(HEALTH_PATH, head(health::probe).get(not_found))
        .route(HEALTH_DISABLE_PATH, post(health::disable).get(not_found))
        .route(HEALTH_ENABLE_PATH, post(health::enable).get(not_found));

    Router::new()
        .merge(bar_routes)
        .merge(health_routes)
        .fallback(not_found)
        .with_state(state)
        // Request ID middleware - creates root span with request_id for correlation
        .layer(middleware::from_fn(request_id_layer))
}

/// Explanatory 404 for every GET this service does not answer: unmatched
/// paths and GETs to the health paths alike.
async fn not_found() -> (StatusCode, String) {
    (
        StatusCode::NOT_FOUND,
        format!("Only {HEALTH_PATH} is served here"),
    )
}
