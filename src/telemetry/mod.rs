//! Telemetry subsystem.
//!
//! # Data Flow
//! ```text
//! handlers instrument with tracing spans/events
//!     → format.rs (one JSON line per event on stdout,
//!                  tagged with trace_id/span_id)
//!     → tracing-opentelemetry layer (spans → OTel SDK)
//!     → opentelemetry-appender-tracing layer (events → OTel logs)
//!
//! OTel SDK batch processors buffer in-process and flush
//! in the background over OTLP/gRPC to the collector.
//! ```
//!
//! # Design Decisions
//! - One explicit initialization phase (`pipeline::init`) builds the whole
//!   stack and returns a guard; the guard's shutdown flushes everything
//! - The resource is derived from config once and shared by both signals
//! - Collector failures stay inside the batch workers; request handling
//!   never observes them
//! - Correlation ids come from the innermost open span, which is task-local
//!   under tokio, so concurrent requests never see each other's ids

pub mod correlation;
pub mod format;
pub mod pipeline;
pub mod resource;

pub use format::JsonEventFormat;
pub use pipeline::{init, Telemetry, TelemetryError};
