//! Resource descriptor construction.
//!
//! The resource is the fixed metadata stamped on every span and log record
//! this process emits. It is built once from the frozen configuration.

use opentelemetry::KeyValue;
use opentelemetry_sdk::Resource;
use opentelemetry_semantic_conventions::resource as semconv;

use crate::config::schema::ServiceConfig;

/// Build the process-wide resource from configuration.
///
/// Host and Kubernetes identifiers are attached only when configured so a
/// plain local run does not report empty attributes.
pub fn build_resource(config: &ServiceConfig) -> Resource {
    let mut attributes = vec![
        KeyValue::new(semconv::SERVICE_VERSION, config.service_version.clone()),
        KeyValue::new(
            semconv::DEPLOYMENT_ENVIRONMENT_NAME,
            config.environment.clone(),
        ),
    ];

    if let Some(hostname) = &config.host.hostname {
        attributes.push(KeyValue::new(semconv::HOST_NAME, hostname.clone()));
    }
    if let Some(pod) = &config.host.pod_name {
        attributes.push(KeyValue::new(semconv::K8S_POD_NAME, pod.clone()));
    }
    if let Some(namespace) = &config.host.pod_namespace {
        attributes.push(KeyValue::new(
            semconv::K8S_NAMESPACE_NAME,
            namespace.clone(),
        ));
    }

    Resource::builder()
        .with_service_name(config.service_name.clone())
        .with_attributes(attributes)
        .build()
}

#[cfg(test)]
mod tests {
    use super::*;
    use opentelemetry::Value;

    fn lookup(resource: &Resource, key: &'static str) -> Option<Value> {
        resource.get(&opentelemetry::Key::from_static_str(key))
    }

    #[test]
    fn carries_service_identity() {
        let config = ServiceConfig::default();
        let resource = build_resource(&config);
        assert_eq!(
            lookup(&resource, "service.name"),
            Some(Value::from(config.service_name.clone()))
        );
        assert_eq!(
            lookup(&resource, "deployment.environment.name"),
            Some(Value::from("demo"))
        );
    }

    #[test]
    fn omits_unset_host_identity() {
        let resource = build_resource(&ServiceConfig::default());
        assert_eq!(lookup(&resource, "k8s.pod.name"), None);
    }

    #[test]
    fn attaches_pod_identity_when_configured() {
        let mut config = ServiceConfig::default();
        config.host.pod_name = Some("sample-app-7d4b9".into());
        config.host.pod_namespace = Some("demo".into());
        let resource = build_resource(&config);
        assert_eq!(
            lookup(&resource, "k8s.pod.name"),
            Some(Value::from("sample-app-7d4b9"))
        );
    }
}
