//! Configuration schema definitions.
//!
//! This module defines the complete configuration structure for the demo
//! service. Everything here is frozen at startup; the telemetry resource is
//! derived from it once and never changes for the lifetime of the process.

/// Root configuration for the demo service.
#[derive(Debug, Clone)]
pub struct ServiceConfig {
    /// Service name reported in every span and log (`service.name`).
    pub service_name: String,

    /// Service version (`service.version`), taken from the crate version.
    pub service_version: String,

    /// Deployment environment (`deployment.environment.name`).
    pub environment: String,

    /// OTLP/gRPC collector endpoint (e.g., "http://localhost:4317").
    pub otlp_endpoint: String,

    /// Whether spans and logs are exported to the collector at all.
    /// When false the service still logs structured JSON to stdout.
    pub export_enabled: bool,

    /// HTTP bind address (e.g., "0.0.0.0:8080").
    pub bind_address: String,

    /// Default log level directive when RUST_LOG is unset.
    pub log_level: String,

    /// Serve the HTML dashboard on `/` instead of the JSON welcome body.
    pub dashboard_enabled: bool,

    /// Host and orchestrator identity attached to the resource.
    pub host: HostIdentity,
}

/// Optional host/container/orchestrator identifiers.
///
/// Each field is attached to the telemetry resource only when present, so a
/// bare-metal run does not advertise empty Kubernetes attributes.
#[derive(Debug, Clone, Default)]
pub struct HostIdentity {
    /// Host name (`host.name`).
    pub hostname: Option<String>,

    /// Kubernetes pod name (`k8s.pod.name`).
    pub pod_name: Option<String>,

    /// Kubernetes namespace (`k8s.namespace.name`).
    pub pod_namespace: Option<String>,
}

impl Default for ServiceConfig {
    fn default() -> Self {
        Self {
            service_name: "sample-app".to_string(),
            service_version: env!("CARGO_PKG_VERSION").to_string(),
            environment: "demo".to_string(),
            otlp_endpoint: "http://localhost:4317".to_string(),
            export_enabled: true,
            bind_address: "0.0.0.0:8080".to_string(),
            log_level: "info".to_string(),
            dashboard_enabled: false,
            host: HostIdentity::default(),
        }
    }
}
