//! Typed results and the centralized result-to-response translator.
//!
//! Handlers return `Result<Json<T>, ApiError>`; this module is the single
//! place that maps a typed error to an HTTP status and JSON body. Simulated
//! business errors are recovered here into a 500 response and never crash
//! the process.

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde_json::json;

use crate::http::request::RequestId;

/// The three simulated business error kinds the `/error` endpoint raises.
///
/// The type labels are part of the response contract, so clients and tests
/// can match on them.
#[derive(Debug, thiserror::Error)]
pub enum SimulatedError {
    #[error("invalid value in simulated payload: {0}")]
    Value(&'static str),

    #[error("simulated runtime failure: {0}")]
    Runtime(&'static str),

    #[error("missing key in simulated record: {0}")]
    Key(&'static str),
}

impl SimulatedError {
    /// Stable label for the `error_type` response field.
    pub fn error_type(&self) -> &'static str {
        match self {
            SimulatedError::Value(_) => "ValueError",
            SimulatedError::Runtime(_) => "RuntimeError",
            SimulatedError::Key(_) => "KeyError",
        }
    }
}

/// Handler-level error, carrying the request id for the response body.
#[derive(Debug, thiserror::Error)]
pub enum ApiError {
    #[error("{source}")]
    Simulated {
        source: SimulatedError,
        request_id: RequestId,
    },
}

impl ApiError {
    pub fn simulated(source: SimulatedError, request_id: RequestId) -> Self {
        ApiError::Simulated { source, request_id }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        match self {
            ApiError::Simulated { source, request_id } => {
                let body = json!({
                    "error": source.to_string(),
                    "error_type": source.error_type(),
                    "request_id": request_id.as_str(),
                });
                (StatusCode::INTERNAL_SERVER_ERROR, Json(body)).into_response()
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn error_type_labels_are_fixed() {
        assert_eq!(SimulatedError::Value("x").error_type(), "ValueError");
        assert_eq!(SimulatedError::Runtime("x").error_type(), "RuntimeError");
        assert_eq!(SimulatedError::Key("x").error_type(), "KeyError");
    }

    #[test]
    fn simulated_error_maps_to_500() {
        let err = ApiError::simulated(SimulatedError::Runtime("boom"), RequestId::generate());
        let response = err.into_response();
        assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
    }
}
