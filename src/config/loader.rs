//! Configuration loading from the process environment.

use std::env;

use crate::config::schema::{HostIdentity, ServiceConfig};
use crate::config::validation::{validate_config, ValidationError};

/// Error type for configuration loading.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("validation failed: {}", format_errors(.0))]
    Validation(Vec<ValidationError>),
}

fn format_errors(errors: &[ValidationError]) -> String {
    errors
        .iter()
        .map(|e| e.to_string())
        .collect::<Vec<_>>()
        .join(", ")
}

/// Read a variable, treating an empty value the same as an unset one.
fn env_var(name: &str) -> Option<String> {
    env::var(name).ok().filter(|v| !v.is_empty())
}

/// Build and validate configuration from environment variables.
///
/// Every field has a default; the environment only overrides. The resulting
/// config is immutable for the lifetime of the process.
pub fn load_config() -> Result<ServiceConfig, ConfigError> {
    let defaults = ServiceConfig::default();

    let config = ServiceConfig {
        service_name: env_var("OTEL_SERVICE_NAME").unwrap_or(defaults.service_name),
        service_version: defaults.service_version,
        environment: env_var("OTEL_ENVIRONMENT").unwrap_or(defaults.environment),
        otlp_endpoint: env_var("OTEL_EXPORTER_OTLP_ENDPOINT").unwrap_or(defaults.otlp_endpoint),
        export_enabled: !matches!(
            env_var("TELEMETRY_EXPORT_DISABLED").as_deref(),
            Some("1") | Some("true")
        ),
        bind_address: env_var("BIND_ADDRESS").unwrap_or(defaults.bind_address),
        log_level: env_var("LOG_LEVEL").unwrap_or(defaults.log_level),
        dashboard_enabled: matches!(
            env_var("DASHBOARD_ENABLED").as_deref(),
            Some("1") | Some("true")
        ),
        host: HostIdentity {
            hostname: env_var("HOSTNAME"),
            pod_name: env_var("POD_NAME"),
            pod_namespace: env_var("POD_NAMESPACE"),
        },
    };

    validate_config(&config).map_err(ConfigError::Validation)?;

    Ok(config)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_are_valid() {
        let config = ServiceConfig::default();
        assert!(validate_config(&config).is_ok());
        assert_eq!(config.otlp_endpoint, "http://localhost:4317");
        assert!(config.export_enabled);
        assert!(!config.dashboard_enabled);
    }
}
