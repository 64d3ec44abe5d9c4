//! Configuration validation.
//!
//! Semantic checks on top of what parsing already guarantees: the bind
//! address must be a socket address, the collector endpoint must be an
//! http(s) URL, and identifying fields must be non-empty. All failures are
//! collected and returned together.

use std::net::SocketAddr;

use url::Url;

use crate::config::schema::ServiceConfig;

/// A single semantic validation failure.
#[derive(Debug, thiserror::Error)]
pub enum ValidationError {
    #[error("service_name must not be empty")]
    EmptyServiceName,

    #[error("invalid bind address {0:?}")]
    InvalidBindAddress(String),

    #[error("invalid OTLP endpoint {0:?}: {1}")]
    InvalidEndpoint(String, String),

    #[error("OTLP endpoint {0:?} must use an http or https scheme")]
    UnsupportedEndpointScheme(String),
}

/// Validate a configuration, returning every error found.
pub fn validate_config(config: &ServiceConfig) -> Result<(), Vec<ValidationError>> {
    let mut errors = Vec::new();

    if config.service_name.trim().is_empty() {
        errors.push(ValidationError::EmptyServiceName);
    }

    if config.bind_address.parse::<SocketAddr>().is_err() {
        errors.push(ValidationError::InvalidBindAddress(
            config.bind_address.clone(),
        ));
    }

    match Url::parse(&config.otlp_endpoint) {
        Ok(url) if url.scheme() != "http" && url.scheme() != "https" => {
            errors.push(ValidationError::UnsupportedEndpointScheme(
                config.otlp_endpoint.clone(),
            ));
        }
        Ok(_) => {}
        Err(e) => {
            errors.push(ValidationError::InvalidEndpoint(
                config.otlp_endpoint.clone(),
                e.to_string(),
            ));
        }
    }

    if errors.is_empty() {
        Ok(())
    } else {
        Err(errors)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rejects_bad_endpoint_and_address_together() {
        let config = ServiceConfig {
            bind_address: "not-an-address".into(),
            otlp_endpoint: "grpc://collector:4317".into(),
            ..ServiceConfig::default()
        };
        let errors = validate_config(&config).unwrap_err();
        assert_eq!(errors.len(), 2);
    }

    #[test]
    fn accepts_https_collector() {
        let config = ServiceConfig {
            otlp_endpoint: "https://collector.example.com:4317".into(),
            ..ServiceConfig::default()
        };
        assert!(validate_config(&config).is_ok());
    }
}
