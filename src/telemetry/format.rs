//! Structured event emission.
//!
//! Renders every log event as exactly one JSON object per line on the local
//! sink, merging (in order of increasing precedence):
//!
//! 1. fixed service metadata from the resource descriptor,
//! 2. the record's own fields (timestamp, level, logger target, message),
//! 3. attributes recorded on the enclosing span scope (outermost first, so
//!    inner spans win), which carries the request id onto every record,
//! 4. the caller-supplied event fields,
//! 5. `trace_id`/`span_id` of the innermost open span, fixed-width hex.
//!
//! The whole record is formatted into one buffer before a single writer call,
//! so concurrent emissions never interleave partial lines. The remote copy of
//! each event travels independently through the OTLP log bridge and its batch
//! exporter; this formatter never touches the network.

use std::fmt;

use chrono::{SecondsFormat, Utc};
use serde_json::{json, Map, Value};
use tracing::field::{Field, Visit};
use tracing::{Event, Subscriber};
use tracing_opentelemetry::OtelData;
use tracing_subscriber::fmt::format::Writer;
use tracing_subscriber::fmt::{FmtContext, FormatEvent, FormatFields};
use tracing_subscriber::registry::LookupSpan;

use crate::config::schema::ServiceConfig;
use crate::telemetry::correlation;

/// Single-line JSON event formatter with trace correlation.
pub struct JsonEventFormat {
    base: Vec<(&'static str, Value)>,
}

impl JsonEventFormat {
    pub fn new(config: &ServiceConfig) -> Self {
        Self {
            base: vec![
                ("service.name", json!(config.service_name)),
                ("service.version", json!(config.service_version)),
                ("deployment.environment", json!(config.environment)),
            ],
        }
    }
}

impl<S, N> FormatEvent<S, N> for JsonEventFormat
where
    S: Subscriber + for<'lookup> LookupSpan<'lookup>,
    N: for<'writer> FormatFields<'writer> + 'static,
{
    fn format_event(
        &self,
        ctx: &FmtContext<'_, S, N>,
        mut writer: Writer<'_>,
        event: &Event<'_>,
    ) -> fmt::Result {
        let metadata = event.metadata();
        let mut record = Map::new();

        for (key, value) in &self.base {
            record.insert((*key).to_string(), value.clone());
        }

        // Record creation time, captured before any buffering.
        record.insert(
            "timestamp".to_string(),
            json!(Utc::now().to_rfc3339_opts(SecondsFormat::Micros, true)),
        );
        record.insert("level".to_string(), json!(metadata.level().to_string()));
        record.insert("target".to_string(), json!(metadata.target()));

        // Span-scope attributes, outermost first so inner spans override.
        if let Some(scope) = ctx.event_scope() {
            for span in scope.from_root() {
                let extensions = span.extensions();
                if let Some(otel) = extensions.get::<OtelData>() {
                    if let Some(attributes) = &otel.builder.attributes {
                        for kv in attributes {
                            record.insert(kv.key.to_string(), otel_value(&kv.value));
                        }
                    }
                }
            }
        }

        let mut visitor = JsonVisitor {
            record: &mut record,
        };
        event.record(&mut visitor);

        // Correlation ids of the innermost open span, if any.
        let ids = ctx
            .event_scope()
            .and_then(|mut scope| scope.next())
            .and_then(|span| correlation::span_ids(&span));
        if let Some(ids) = ids {
            record.insert("trace_id".to_string(), json!(ids.trace_id_hex()));
            record.insert("span_id".to_string(), json!(ids.span_id_hex()));
        }

        let line = serde_json::to_string(&Value::Object(record)).map_err(|_| fmt::Error)?;
        writer.write_str(&line)?;
        writeln!(writer)
    }
}

fn otel_value(value: &opentelemetry::Value) -> Value {
    use opentelemetry::{Array, Value as Otel};
    match value {
        Otel::Bool(b) => json!(b),
        Otel::I64(i) => json!(i),
        Otel::F64(f) => json!(f),
        Otel::String(s) => json!(s.as_str()),
        Otel::Array(Array::Bool(items)) => json!(items),
        Otel::Array(Array::I64(items)) => json!(items),
        Otel::Array(Array::F64(items)) => json!(items),
        Otel::Array(Array::String(items)) => {
            Value::Array(items.iter().map(|s| json!(s.as_str())).collect())
        }
        _ => json!(value.as_str()),
    }
}

struct JsonVisitor<'a> {
    record: &'a mut Map<String, Value>,
}

impl Visit for JsonVisitor<'_> {
    fn record_f64(&mut self, field: &Field, value: f64) {
        self.record.insert(field.name().to_string(), json!(value));
    }

    fn record_i64(&mut self, field: &Field, value: i64) {
        self.record.insert(field.name().to_string(), json!(value));
    }

    fn record_u64(&mut self, field: &Field, value: u64) {
        self.record.insert(field.name().to_string(), json!(value));
    }

    fn record_bool(&mut self, field: &Field, value: bool) {
        self.record.insert(field.name().to_string(), json!(value));
    }

    fn record_str(&mut self, field: &Field, value: &str) {
        self.record.insert(field.name().to_string(), json!(value));
    }

    fn record_debug(&mut self, field: &Field, value: &dyn fmt::Debug) {
        let rendered = format!("{value:?}");
        if field.name() == "message" {
            self.record.insert("message".to_string(), json!(rendered));
        } else {
            self.record.insert(field.name().to_string(), json!(rendered));
        }
    }

    fn record_error(&mut self, field: &Field, value: &(dyn std::error::Error + 'static)) {
        self.record
            .insert(field.name().to_string(), json!(value.to_string()));
    }
}
