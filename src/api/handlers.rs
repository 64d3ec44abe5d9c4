//! Endpoint handlers.
//!
//! The handlers never share mutable state; all cross-request coordination
//! lives in the telemetry pipeline's batch queues.

use std::time::Duration;

use axum::extract::{Extension, State};
use axum::response::{Html, IntoResponse, Response};
use axum::Json;
use rand::Rng;
use serde_json::{json, Value};
use tracing::{debug, error, field, info, instrument, warn, Span};

use crate::api::types::{Order, OrdersResponse, SlowResponse, User, UsersResponse};
use crate::http::request::RequestId;
use crate::http::response::{ApiError, SimulatedError};
use crate::http::server::AppState;

/// Sleep for a random duration in the given millisecond range.
///
/// Stands in for real I/O; the exact range is demo dressing.
async fn simulate_work(min_ms: u64, max_ms: u64) {
    let delay = { rand::thread_rng().gen_range(min_ms..=max_ms) };
    tokio::time::sleep(Duration::from_millis(delay)).await;
}

/// `GET /` — JSON welcome, or the HTML dashboard when enabled.
pub async fn home(State(state): State<AppState>) -> Response {
    info!("home endpoint called");
    if state.config.dashboard_enabled {
        Html(include_str!("dashboard.html")).into_response()
    } else {
        Json(json!({
            "message": "Welcome to the OTEL Demo App!",
            "endpoints": ["/", "/api/users", "/api/orders", "/api/slow", "/error", "/health"],
        }))
        .into_response()
    }
}

/// `GET /health` — always healthy, independent of every other endpoint.
pub async fn health(State(state): State<AppState>) -> Json<Value> {
    Json(json!({
        "status": "healthy",
        "service": state.config.service_name,
        "version": state.config.service_version,
    }))
}

/// `GET /api/users` — one simulated database query in a child span.
pub async fn get_users() -> Json<UsersResponse> {
    let users = fetch_users_from_db().await;
    info!(user.count = users.len(), "returned users");
    Json(UsersResponse { users })
}

#[instrument(
    name = "fetch-users-from-db",
    fields(
        db.system = "postgresql",
        db.operation = "SELECT",
        db.table = "users",
        user.count = field::Empty,
    )
)]
async fn fetch_users_from_db() -> Vec<User> {
    simulate_work(10, 50).await;
    let users = vec![
        User { id: 1, name: "Alice", email: "alice@example.com" },
        User { id: 2, name: "Bob", email: "bob@example.com" },
        User { id: 3, name: "Charlie", email: "charlie@example.com" },
    ];
    Span::current().record("user.count", users.len() as u64);
    users
}

/// `GET /api/orders` — three sequential work phases nested under one parent.
pub async fn get_orders() -> Json<OrdersResponse> {
    let orders = process_orders().await;
    info!(order.count = orders.len(), "returned orders");
    Json(OrdersResponse { orders })
}

#[instrument(name = "process-orders", fields(order.count = field::Empty))]
async fn process_orders() -> Vec<Order> {
    validate_request().await;
    fetch_orders_from_db().await;
    enrich_order_data().await;

    let orders = vec![
        Order { id: 101, user_id: 1, total: 99.99, status: "shipped" },
        Order { id: 102, user_id: 2, total: 149.50, status: "pending" },
    ];
    Span::current().record("order.count", orders.len() as u64);
    orders
}

#[instrument(name = "validate-request")]
async fn validate_request() {
    simulate_work(5, 10).await;
}

#[instrument(
    name = "fetch-orders-from-db",
    fields(db.system = "postgresql", db.operation = "SELECT", db.table = "orders")
)]
async fn fetch_orders_from_db() {
    simulate_work(20, 80).await;
}

#[instrument(name = "enrich-order-data")]
async fn enrich_order_data() {
    simulate_work(10, 30).await;
}

/// `GET /api/slow` — latency-visibility fixture; the response reports the
/// delay it actually slept.
pub async fn slow() -> Json<SlowResponse> {
    let delay_seconds = slow_operation().await;
    warn!(delay_seconds, "slow endpoint completed");
    Json(SlowResponse {
        message: "Slow operation completed",
        delay_seconds,
    })
}

#[instrument(name = "slow-operation", fields(delay.seconds = field::Empty))]
async fn slow_operation() -> f64 {
    let delay_seconds = { rand::thread_rng().gen_range(0.5..=2.0) };
    Span::current().record("delay.seconds", delay_seconds);
    tokio::time::sleep(Duration::from_secs_f64(delay_seconds)).await;
    delay_seconds
}

/// `GET /error` — raises one of three simulated error kinds, records it on
/// the span, and maps to the JSON 500 body.
pub async fn simulated_error(Extension(request_id): Extension<RequestId>) -> ApiError {
    let source = error_operation().await;
    ApiError::simulated(source, request_id)
}

#[instrument(
    name = "error-operation",
    fields(
        error.simulated = true,
        otel.status_code = field::Empty,
        otel.status_message = field::Empty,
    )
)]
async fn error_operation() -> SimulatedError {
    let error = pick_simulated_error();
    let span = Span::current();
    span.record("otel.status_code", "ERROR");
    span.record("otel.status_message", error.to_string().as_str());
    error!(
        exception.message = %error,
        error_type = error.error_type(),
        "simulated failure raised"
    );
    debug!(error.kind = error.error_type(), detail = ?error, "simulated failure detail");
    error
}

fn pick_simulated_error() -> SimulatedError {
    match rand::thread_rng().gen_range(0..3) {
        0 => SimulatedError::Value("order total is negative"),
        1 => SimulatedError::Runtime("inventory service did not respond"),
        _ => SimulatedError::Key("customer_tier"),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn simulated_errors_cover_the_fixed_set() {
        let mut seen = std::collections::HashSet::new();
        for _ in 0..200 {
            seen.insert(pick_simulated_error().error_type());
        }
        assert_eq!(
            seen,
            ["ValueError", "RuntimeError", "KeyError"].into_iter().collect()
        );
    }

    #[tokio::test]
    async fn slow_operation_sleeps_at_least_its_reported_delay() {
        let started = std::time::Instant::now();
        let delay = slow_operation().await;
        assert!((0.5..=2.0).contains(&delay));
        assert!(started.elapsed().as_secs_f64() >= delay);
    }
}
