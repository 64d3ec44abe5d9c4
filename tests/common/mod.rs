//! Shared utilities for integration tests.

use std::net::SocketAddr;
use std::time::Duration;

use otel_demo_service::{HttpServer, ServiceConfig, Shutdown};

/// Start the service on an ephemeral port and return its address plus the
/// shutdown handle keeping it alive.
pub async fn start_service(config: ServiceConfig) -> (SocketAddr, Shutdown) {
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();

    let shutdown = Shutdown::new();
    let server_shutdown = shutdown.subscribe();
    let server = HttpServer::new(config);

    tokio::spawn(async move {
        let _ = server.run(listener, server_shutdown).await;
    });

    // Wait for the listener to start serving.
    tokio::time::sleep(Duration::from_millis(100)).await;

    (addr, shutdown)
}

/// Config suitable for tests: no collector, no export.
pub fn test_config() -> ServiceConfig {
    ServiceConfig {
        export_enabled: false,
        ..ServiceConfig::default()
    }
}
