//! Request lifecycle hooks.
//!
//! Brackets every inbound request: the entry side opens the root span with
//! request attributes and a fresh request id and logs "request received";
//! the exit side records the response status and wall-clock elapsed time on
//! the span, logs "request completed", and closes the root span. Closing
//! happens on every exit path because the span guard is scoped to the
//! instrumented future.

use std::time::Instant;

use axum::extract::Request;
use axum::http::header::{HeaderValue, USER_AGENT};
use axum::middleware::Next;
use axum::response::Response;
use tracing::{field, info, info_span, Instrument};

use crate::http::request::{RequestId, X_REQUEST_ID};

/// Entry/exit hook pair, installed as a single axum middleware layer.
pub async fn request_lifecycle(mut request: Request, next: Next) -> Response {
    let started = Instant::now();
    let request_id = RequestId::generate();

    let method = request.method().clone();
    let path = request.uri().path().to_owned();
    let user_agent = request
        .headers()
        .get(USER_AGENT)
        .and_then(|v| v.to_str().ok())
        .unwrap_or("")
        .to_owned();

    // Handlers pick the id up from extensions for error bodies.
    request.extensions_mut().insert(request_id.clone());

    let span = info_span!(
        "http_request",
        http.method = %method,
        http.route = %path,
        http.user_agent = %user_agent,
        request_id = %request_id,
        http.status_code = field::Empty,
        duration_ms = field::Empty,
    );

    async move {
        // Span attributes (method, route, request id) reach this record
        // through the formatter's scope merge.
        info!("request received");

        let mut response = next.run(request).await;

        let status = response.status().as_u16();
        let elapsed_ms = started.elapsed().as_millis() as u64;
        let span = tracing::Span::current();
        span.record("http.status_code", status);
        span.record("duration_ms", elapsed_ms);

        info!(status = status, duration_ms = elapsed_ms, "request completed");

        if let Ok(value) = HeaderValue::from_str(request_id.as_str()) {
            response.headers_mut().insert(X_REQUEST_ID, value);
        }
        response
    }
    .instrument(span)
    .await
}
