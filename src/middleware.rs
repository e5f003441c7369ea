//! Request tracing middleware.
//!
//! Wraps every request in a span carrying a generated request ID, method,
//! and path so that all log lines within one request correlate. Completions
//! of load-balancer probes (`HEAD /health` fires every few seconds) are
//! logged at debug; everything else at info.

use std::time::Instant;

use axum::{extract::Request, middleware::Next, response::Response};
use tracing::Instrument;
use uuid::Uuid;

use crate::config::HEALTH_PATH;

/// Middleware that creates a per-request tracing span.
///
/// This should be the outermost layer so the span wraps all other middleware
/// and the handler itself.
pub async fn request_id_layer(request: Request, next: Next) -> Response {
    let request_id = Uuid::new_v4();
    let method = request.method().clone();
    let path = request.uri().path().to_string();
    let is_probe = path == HEALTH_PATH;

    let span = tracing::info_span!(
        "request",
        request_id = %request_id,
        method = %method,
        path = %path,
    );

    let start = Instant::now();

    async move {
        let response = next.run(request).await;
        let status = response.status().as_u16();
        let duration_ms = start.elapsed().as_millis() as u64;

        if is_probe {
            tracing::debug!(status, duration_ms, "Probe completed");
        } else {
            tracing::info!(status, duration_ms, "Request completed");
        }

        response
    }
    .instrument(span)
    .await
}
