//! Request timing observer
//!
//! Logs method, path, status and elapsed time once per completed request,
//! for API-prefixed paths only. Asset and SPA shell requests pass through
//! unlogged.

use axum::{extract::Request, middleware::Next, response::Response};
use std::time::Instant;

pub const API_PREFIX: &str = "/api";

/// Whether a path falls under the logged API prefix
pub fn is_api_path(path: &str) -> bool {
    path == API_PREFIX || path.starts_with("/api/")
}

/// Timing middleware. The completion log fires exactly once, after the
/// downstream handler has produced its response.
pub async fn request_timing(req: Request, next: Next) -> Response {
    let started = Instant::now();
    let method = req.method().clone();
    let path = req.uri().path().to_string();

    let response = next.run(req).await;

    if is_api_path(&path) {
        tracing::info!(
            %method,
            %path,
            status = response.status().as_u16(),
            elapsed_ms = started.elapsed().as_millis() as u64,
            "api request"
        );
    }

    response
}
