//! Trace/log correlation.
//!
//! Resolves the trace and span identifiers of the innermost open span so log
//! records can be joined to traces in the backend. The lookup reads the
//! per-span OpenTelemetry data that the `tracing-opentelemetry` layer stores
//! in the subscriber registry: the span id is assigned at span creation, and
//! the trace id lives either on the span's own builder (root spans) or in the
//! parent context (nested spans).
//!
//! Outside any span there is nothing to correlate; that is a normal state,
//! not an error.

use opentelemetry::trace::{SpanId, TraceContextExt, TraceId};
use tracing_opentelemetry::OtelData;
use tracing_subscriber::registry::{LookupSpan, SpanRef};

/// Identifiers of the active span, ready for fixed-width hex rendering.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ActiveSpanIds {
    pub trace_id: TraceId,
    pub span_id: SpanId,
}

impl ActiveSpanIds {
    /// Trace id as 32 lowercase hex digits, zero-padded.
    pub fn trace_id_hex(&self) -> String {
        format!("{:032x}", self.trace_id)
    }

    /// Span id as 16 lowercase hex digits, zero-padded.
    pub fn span_id_hex(&self) -> String {
        format!("{:016x}", self.span_id)
    }
}

/// Resolve correlation ids from a registry span.
///
/// Returns `None` when the span carries no OpenTelemetry data (no otel layer
/// installed) or when either id would be invalid (all-zero).
pub fn span_ids<'a, S>(span: &SpanRef<'a, S>) -> Option<ActiveSpanIds>
where
    S: for<'lookup> LookupSpan<'lookup>,
{
    let extensions = span.extensions();
    let otel = extensions.get::<OtelData>()?;

    let span_id = otel.builder.span_id.filter(|id| *id != SpanId::INVALID)?;

    // Root spans carry their own trace id; children inherit the parent's.
    let trace_id = otel.builder.trace_id.or_else(|| {
        let parent = otel.parent_cx.span().span_context().clone();
        parent.is_valid().then(|| parent.trace_id())
    })?;

    if trace_id == TraceId::INVALID {
        return None;
    }

    Some(ActiveSpanIds { trace_id, span_id })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn hex_rendering_is_fixed_width() {
        let ids = ActiveSpanIds {
            trace_id: TraceId::from(0xabc_u128),
            span_id: SpanId::from(0x2a_u64),
        };
        let trace_hex = ids.trace_id_hex();
        let span_hex = ids.span_id_hex();
        assert_eq!(trace_hex.len(), 32);
        assert_eq!(span_hex.len(), 16);
        assert_eq!(trace_hex, "00000000000000000000000000000abc");
        assert_eq!(span_hex, "000000000000002a");
        assert_ne!(trace_hex, "0".repeat(32));
        assert_ne!(span_hex, "0".repeat(16));
    }
}
