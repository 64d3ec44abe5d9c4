//! OTLP Demo Service
//!
//! A toy HTTP service whose purpose is to emit correlated telemetry: every
//! request opens a root span, handlers nest work-phase spans under it, and
//! every structured log line carries the active trace and span identifiers
//! so a backend can join logs to traces.
//!
//! # Architecture Overview
//!
//! ```text
//!                    ┌──────────────────────────────────────────────┐
//!                    │                DEMO SERVICE                  │
//!                    │                                              │
//!   Client Request   │  ┌─────────┐   ┌────────────┐   ┌────────┐  │
//!   ─────────────────┼─▶│  http   │──▶│ lifecycle  │──▶│  api   │  │
//!                    │  │ server  │   │ middleware │   │handlers│  │
//!                    │  └─────────┘   └────────────┘   └───┬────┘  │
//!                    │                                     │       │
//!                    │          spans + log events         ▼       │
//!                    │  ┌────────────────────────────────────────┐ │
//!                    │  │              telemetry                 │ │
//!                    │  │  stdout JSON lines   OTLP batch export │ │
//!                    │  └───────────────────────────┬────────────┘ │
//!                    └──────────────────────────────┼──────────────┘
//!                                                   ▼
//!                                          OpenTelemetry collector
//! ```

use clap::Parser;
use tokio::net::TcpListener;

use otel_demo_service::config;
use otel_demo_service::http::HttpServer;
use otel_demo_service::lifecycle::Shutdown;
use otel_demo_service::telemetry;

/// CLI overrides on top of the environment-driven configuration.
#[derive(Debug, Parser)]
#[command(name = "otel-demo-service", version, about)]
struct Cli {
    /// Bind address, e.g. 0.0.0.0:8080
    #[arg(long)]
    bind: Option<String>,

    /// OTLP/gRPC collector endpoint, e.g. http://localhost:4317
    #[arg(long)]
    collector_endpoint: Option<String>,

    /// Disable OTLP export entirely (stdout logging only)
    #[arg(long)]
    no_export: bool,

    /// Serve the HTML dashboard on /
    #[arg(long)]
    dashboard: bool,
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();

    let mut config = config::load_config()?;
    if let Some(bind) = cli.bind {
        config.bind_address = bind;
    }
    if let Some(endpoint) = cli.collector_endpoint {
        config.otlp_endpoint = endpoint;
    }
    if cli.no_export {
        config.export_enabled = false;
    }
    if cli.dashboard {
        config.dashboard_enabled = true;
    }
    config::validation::validate_config(&config).map_err(config::ConfigError::Validation)?;

    let telemetry = telemetry::init(&config)?;

    tracing::info!(
        service = %config.service_name,
        environment = %config.environment,
        otlp_endpoint = %config.otlp_endpoint,
        export_enabled = config.export_enabled,
        bind_address = %config.bind_address,
        "Configuration loaded"
    );

    let listener = TcpListener::bind(&config.bind_address).await?;
    let local_addr = listener.local_addr()?;
    tracing::info!(address = %local_addr, "Listening for connections");

    let shutdown = Shutdown::new();
    let server = HttpServer::new(config);
    server.run(listener, shutdown.subscribe()).await?;

    tracing::info!("Shutdown complete");

    // Flush buffered spans and logs before exit.
    telemetry.shutdown()?;
    Ok(())
}
