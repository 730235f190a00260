//! Per-request correlation IDs.
//!
//! Every request gets an ID: the caller's `X-Request-ID` when one is
//! supplied, otherwise a fresh UUID. The ID is attached to the request
//! span, stored in extensions, and echoed on the response so a client can
//! quote it when reporting a problem.

use axum::{
    body::Body,
    http::{header::HeaderName, HeaderValue, Request},
    middleware::Next,
    response::Response,
};
use tracing::Instrument;
use uuid::Uuid;

/// Header carrying the correlation ID in both directions.
pub const REQUEST_ID_HEADER: &str = "X-Request-ID";

/// Correlation ID stored in request extensions.
#[derive(Debug, Clone)]
pub struct RequestId(pub String);

fn incoming_request_id(req: &Request<Body>) -> String {
    req.headers()
        .get(REQUEST_ID_HEADER)
        .and_then(|v| v.to_str().ok())
        .map(str::to_string)
        .unwrap_or_else(|| Uuid::new_v4().to_string())
}

/// Middleware that tags the request with a correlation ID and logs one
/// completion line per request.
pub async fn trace_id(mut req: Request<Body>, next: Next) -> Response {
    let request_id = incoming_request_id(&req);
    req.extensions_mut().insert(RequestId(request_id.clone()));

    let span = tracing::info_span!(
        "request",
        request_id = %request_id,
        method = %req.method(),
        path = %req.uri().path(),
    );

    let started = std::time::Instant::now();
    let mut response = next.run(req).instrument(span).await;

    tracing::info!(
        request_id = %request_id,
        status = response.status().as_u16(),
        duration_ms = started.elapsed().as_millis() as u64,
        "Request completed"
    );

    if let Ok(value) = HeaderValue::from_str(&request_id) {
        response
            .headers_mut()
            .insert(HeaderName::from_static("x-request-id"), value);
    }

    response
}
