//! Response types for the duration calculator API.
//!
//! This module defines the success envelope, the error response
//! structures and the mapping from engine errors to HTTP statuses.

use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::config::{RegulationMetadata, RuleConfig};
use crate::error::EngineError;
use crate::models::CalculationResult;

/// Per-request metadata returned next to a result.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ResponseMeta {
    /// Unique identifier for this calculation.
    pub calculation_id: Uuid,
    /// When the calculation was performed.
    pub timestamp: DateTime<Utc>,
    /// The version of the engine that performed the calculation.
    pub engine_version: String,
    /// Time spent calculating, in microseconds.
    pub duration_us: u64,
}

/// Successful response of `/api/calculate`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CalculationResponse {
    /// The calculation result.
    pub result: CalculationResult,
    /// Request metadata.
    pub meta: ResponseMeta,
}

/// Response of `/api/rules`.
#[derive(Debug, Clone, Serialize)]
pub struct RulesResponse {
    /// The active regulation metadata.
    pub regulation: RegulationMetadata,
    /// The active rule set.
    pub rules: RuleConfig,
}

/// API error response structure.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ApiError {
    /// Error code for programmatic handling.
    pub code: String,
    /// Human-readable error message.
    pub message: String,
    /// Optional structured details about the error.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub details: Option<serde_json::Value>,
}

impl ApiError {
    /// Creates a new API error.
    pub fn new(code: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            code: code.into(),
            message: message.into(),
            details: None,
        }
    }

    /// Creates a new API error with details.
    pub fn with_details(
        code: impl Into<String>,
        message: impl Into<String>,
        details: serde_json::Value,
    ) -> Self {
        Self {
            code: code.into(),
            message: message.into(),
            details: Some(details),
        }
    }

    /// Creates a validation error response.
    pub fn validation_error(message: impl Into<String>) -> Self {
        Self::new("VALIDATION_ERROR", message)
    }

    /// Creates a malformed JSON error response.
    pub fn malformed_json(message: impl Into<String>) -> Self {
        Self::new("MALFORMED_JSON", message)
    }

    /// Creates a missing fields error response.
    pub fn missing_fields(fields: &[String], message: impl Into<String>) -> Self {
        Self::with_details(
            "MISSING_FIELDS",
            message,
            serde_json::json!({ "missing": fields }),
        )
    }
}

/// Wraps an [`ApiError`] as `{"error": ...}`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ErrorEnvelope {
    /// The error body.
    pub error: ApiError,
}

/// API error with HTTP status code.
pub struct ApiErrorResponse {
    /// The HTTP status code.
    pub status: StatusCode,
    /// The error body.
    pub error: ApiError,
}

impl ApiErrorResponse {
    /// Creates a new error response.
    pub fn new(status: StatusCode, error: ApiError) -> Self {
        Self { status, error }
    }
}

impl IntoResponse for ApiErrorResponse {
    fn into_response(self) -> Response {
        (self.status, Json(ErrorEnvelope { error: self.error })).into_response()
    }
}

impl From<EngineError> for ApiErrorResponse {
    fn from(error: EngineError) -> Self {
        match error {
            EngineError::ConfigNotFound { path } => ApiErrorResponse {
                status: StatusCode::INTERNAL_SERVER_ERROR,
                error: ApiError::with_details(
                    "CONFIG_ERROR",
                    "Configuration error",
                    serde_json::json!({ "path": path }),
                ),
            },
            EngineError::ConfigParseError { path, message } => ApiErrorResponse {
                status: StatusCode::INTERNAL_SERVER_ERROR,
                error: ApiError::with_details(
                    "CONFIG_ERROR",
                    "Configuration parse error",
                    serde_json::json!({ "path": path, "reason": message }),
                ),
            },
            EngineError::Validation { field, message } => ApiErrorResponse {
                status: StatusCode::UNPROCESSABLE_ENTITY,
                error: ApiError::with_details(
                    "VALIDATION_ERROR",
                    format!("Invalid value for '{}': {}", field, message),
                    serde_json::json!({ "field": field }),
                ),
            },
            EngineError::CalculationError { message } => ApiErrorResponse {
                status: StatusCode::INTERNAL_SERVER_ERROR,
                error: ApiError::with_details(
                    "CALCULATION_ERROR",
                    "Calculation failed",
                    serde_json::json!({ "reason": message }),
                ),
            },
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_api_error_serialization() {
        let error = ApiError::new("TEST_ERROR", "Test message");
        let json = serde_json::to_string(&error).unwrap();
        assert!(json.contains("\"code\":\"TEST_ERROR\""));
        assert!(json.contains("\"message\":\"Test message\""));
        assert!(!json.contains("details"));
    }

    #[test]
    fn test_missing_fields_lists_fields() {
        let error = ApiError::missing_fields(&["eingabetyp".to_string()], "missing field");
        assert_eq!(error.code, "MISSING_FIELDS");
        assert_eq!(
            error.details.unwrap()["missing"],
            serde_json::json!(["eingabetyp"])
        );
    }

    #[test]
    fn test_validation_error_maps_to_unprocessable_entity() {
        let engine_error = EngineError::validation("teilzeit_eingabe", "too low");
        let api_error: ApiErrorResponse = engine_error.into();

        assert_eq!(api_error.status, StatusCode::UNPROCESSABLE_ENTITY);
        assert_eq!(api_error.error.code, "VALIDATION_ERROR");
        assert_eq!(
            api_error.error.details.unwrap()["field"],
            "teilzeit_eingabe"
        );
    }

    #[test]
    fn test_calculation_error_maps_to_internal_error() {
        let engine_error = EngineError::CalculationError {
            message: "overflow".to_string(),
        };
        let api_error: ApiErrorResponse = engine_error.into();

        assert_eq!(api_error.status, StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(api_error.error.code, "CALCULATION_ERROR");
    }

    #[test]
    fn test_config_errors_map_to_internal_error() {
        let api_error: ApiErrorResponse = EngineError::ConfigNotFound {
            path: "rules.yaml".to_string(),
        }
        .into();
        assert_eq!(api_error.status, StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(api_error.error.code, "CONFIG_ERROR");
    }

    #[test]
    fn test_error_envelope_shape() {
        let envelope = ErrorEnvelope {
            error: ApiError::validation_error("bad"),
        };
        let json = serde_json::to_value(envelope).unwrap();
        assert_eq!(json["error"]["code"], "VALIDATION_ERROR");
        assert_eq!(json["error"]["message"], "bad");
    }
}
