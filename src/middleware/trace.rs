//! Request tracing middleware

use axum::{
    extract::Request,
    http::{HeaderName, HeaderValue},
    middleware::Next,
    response::Response,
};
use std::time::Instant;
use tracing::Instrument;
use uuid::Uuid;

static REQUEST_ID: HeaderName = HeaderName::from_static("x-request-id");

/// Log each request with timing under a per-request span.
///
/// Reuses an inbound `x-request-id` or mints one, and echoes it back. Headers
/// are never logged, so bearer tokens stay out of the logs.
pub async fn request_tracing(request: Request, next: Next) -> Response {
    let method = request.method().clone();
    let path = request.uri().path().to_string();
    let request_id = request
        .headers()
        .get(&REQUEST_ID)
        .and_then(|h| h.to_str().ok())
        .map(str::to_string)
        .unwrap_or_else(|| Uuid::new_v4().to_string());

    let span = tracing::info_span!("request", id = %request_id, method = %method, path = %path);
    let start = Instant::now();

    let mut response = next.run(request).instrument(span.clone()).await;

    let duration_ms = start.elapsed().as_millis();
    let status = response.status();

    span.in_scope(|| {
        if status.is_server_error() {
            tracing::error!(status = %status.as_u16(), duration_ms = %duration_ms, "Request completed with error");
        } else if status.is_client_error() {
            tracing::warn!(status = %status.as_u16(), duration_ms = %duration_ms, "Request completed with client error");
        } else {
            tracing::info!(status = %status.as_u16(), duration_ms = %duration_ms, "Request completed");
        }
    });

    if let Ok(value) = HeaderValue::from_str(&request_id) {
        response.headers_mut().insert(REQUEST_ID.clone(), value);
    }

    response
}
