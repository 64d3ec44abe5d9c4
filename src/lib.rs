//! OTLP Demo Service Library

pub mod api;
pub mod config;
pub mod http;
pub mod lifecycle;
pub mod telemetry;

pub use config::schema::ServiceConfig;
pub use http::HttpServer;
pub use lifecycle::Shutdown;
