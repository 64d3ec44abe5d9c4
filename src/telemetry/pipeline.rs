//! Telemetry pipeline initialization and shutdown.
//!
//! One explicit initialization phase builds the whole outbound stack:
//! OTLP/gRPC batch exporters for spans and logs sharing a single resource,
//! the W3C trace-context propagator, and the tracing-subscriber layers that
//! feed them. Handlers only ever talk to the `tracing` macros; everything
//! past the subscriber is buffered and flushed by the SDK's background
//! workers, so a slow or unreachable collector never stalls a request.

use opentelemetry::global;
use opentelemetry::trace::TracerProvider as _;
use opentelemetry_appender_tracing::layer::OpenTelemetryTracingBridge;
use opentelemetry_otlp::{LogExporter, SpanExporter, WithExportConfig};
use opentelemetry_sdk::logs::SdkLoggerProvider;
use opentelemetry_sdk::propagation::TraceContextPropagator;
use opentelemetry_sdk::trace::SdkTracerProvider;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;
use tracing_subscriber::EnvFilter;

use crate::config::schema::ServiceConfig;
use crate::telemetry::format::JsonEventFormat;
use crate::telemetry::resource::build_resource;

/// Error type for telemetry initialization and shutdown.
#[derive(Debug, thiserror::Error)]
pub enum TelemetryError {
    #[error("failed to build OTLP exporter: {0}")]
    Exporter(#[from] opentelemetry_otlp::ExporterBuildError),

    #[error("failed to install tracing subscriber: {0}")]
    Subscriber(#[from] tracing_subscriber::util::TryInitError),

    #[error("telemetry flush incomplete: {0}")]
    Flush(#[from] opentelemetry_sdk::error::OTelSdkError),
}

/// Guard owning the span and log providers.
///
/// Keep this alive for the lifetime of the process and call [`shutdown`]
/// on the way out to flush buffered telemetry.
///
/// [`shutdown`]: Telemetry::shutdown
pub struct Telemetry {
    tracer_provider: SdkTracerProvider,
    logger_provider: SdkLoggerProvider,
}

impl Telemetry {
    /// Flush and shut down both providers.
    pub fn shutdown(self) -> Result<(), TelemetryError> {
        self.tracer_provider.shutdown()?;
        self.logger_provider.shutdown()?;
        Ok(())
    }
}

/// Initialize the process-wide telemetry pipeline.
///
/// When export is disabled the providers carry no exporters: spans still get
/// valid ids (so log correlation keeps working) but nothing leaves the
/// process except the stdout JSON lines.
pub fn init(config: &ServiceConfig) -> Result<Telemetry, TelemetryError> {
    global::set_text_map_propagator(TraceContextPropagator::new());

    let resource = build_resource(config);

    let tracer_provider = if config.export_enabled {
        let exporter = SpanExporter::builder()
            .with_tonic()
            .with_endpoint(&config.otlp_endpoint)
            .build()?;
        SdkTracerProvider::builder()
            .with_resource(resource.clone())
            .with_batch_exporter(exporter)
            .build()
    } else {
        SdkTracerProvider::builder()
            .with_resource(resource.clone())
            .build()
    };

    let logger_provider = if config.export_enabled {
        let exporter = LogExporter::builder()
            .with_tonic()
            .with_endpoint(&config.otlp_endpoint)
            .build()?;
        SdkLoggerProvider::builder()
            .with_resource(resource)
            .with_batch_exporter(exporter)
            .build()
    } else {
        SdkLoggerProvider::builder().with_resource(resource).build()
    };

    global::set_tracer_provider(tracer_provider.clone());

    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(&config.log_level));
    let stdout_layer = tracing_subscriber::fmt::layer().event_format(JsonEventFormat::new(config));
    let span_layer = tracing_opentelemetry::layer()
        .with_tracer(tracer_provider.tracer(env!("CARGO_PKG_NAME")));
    let log_bridge = OpenTelemetryTracingBridge::new(&logger_provider);

    tracing_subscriber::registry()
        .with(filter)
        .with(stdout_layer)
        .with(span_layer)
        .with(log_bridge)
        .try_init()?;

    Ok(Telemetry {
        tracer_provider,
        logger_provider,
    })
}
