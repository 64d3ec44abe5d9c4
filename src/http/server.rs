//! HTTP server setup and configuration.
//!
//! # Responsibilities
//! - Build the Axum router from an explicit route table
//! - Wire up middleware (request lifecycle hooks, timeout)
//! - Serve with graceful shutdown (ctrl-c or lifecycle signal)

use std::sync::Arc;
use std::time::Duration;

use axum::http::StatusCode;
use axum::routing::get;
use axum::Router;
use tokio::net::TcpListener;
use tokio::sync::broadcast;
use tower::ServiceBuilder;
use tower_http::timeout::TimeoutLayer;

use crate::api;
use crate::config::ServiceConfig;
use crate::http::middleware::request_lifecycle;

/// Application state injected into handlers.
#[derive(Clone)]
pub struct AppState {
    pub config: Arc<ServiceConfig>,
}

/// Explicit route table: path, handler.
///
/// Kept as a plain function rather than scattered registration so the whole
/// HTTP surface is visible in one place.
pub fn build_router(state: AppState) -> Router {
    Router::new()
        .route("/", get(api::home))
        .route("/api/users", get(api::get_users))
        .route("/api/orders", get(api::get_orders))
        .route("/api/slow", get(api::slow))
        .route("/error", get(api::simulated_error))
        .route("/health", get(api::health))
        .with_state(state)
        .layer(
            ServiceBuilder::new()
                .layer(TimeoutLayer::with_status_code(
                    StatusCode::REQUEST_TIMEOUT,
                    Duration::from_secs(30),
                ))
                .layer(axum::middleware::from_fn(request_lifecycle)),
        )
}

/// HTTP server for the demo service.
pub struct HttpServer {
    router: Router,
    config: ServiceConfig,
}

impl HttpServer {
    /// Create a new HTTP server with the given configuration.
    pub fn new(config: ServiceConfig) -> Self {
        let state = AppState {
            config: Arc::new(config.clone()),
        };
        let router = build_router(state);
        Self { router, config }
    }

    /// Run the server, accepting connections on the given listener until
    /// ctrl-c or the shutdown channel fires.
    pub async fn run(
        self,
        listener: TcpListener,
        shutdown: broadcast::Receiver<()>,
    ) -> Result<(), std::io::Error> {
        let addr = listener.local_addr()?;
        tracing::info!(address = %addr, "HTTP server starting");

        axum::serve(listener, self.router)
            .with_graceful_shutdown(shutdown_signal(shutdown))
            .await?;

        tracing::info!("HTTP server stopped");
        Ok(())
    }

    /// Get a reference to the config.
    pub fn config(&self) -> &ServiceConfig {
        &self.config
    }
}

/// Wait for ctrl-c or an explicit shutdown trigger.
async fn shutdown_signal(mut shutdown: broadcast::Receiver<()>) {
    tokio::select! {
        result = tokio::signal::ctrl_c() => {
            if result.is_ok() {
                tracing::info!("Shutdown signal received");
            }
        }
        _ = shutdown.recv() => {
            tracing::info!("Shutdown triggered");
        }
    }
}
