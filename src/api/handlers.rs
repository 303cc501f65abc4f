//! HTTP request handlers for the duration calculator API.
//!
//! This module contains the handler functions for all API endpoints.

use std::time::Instant;

use axum::{
    Json, Router,
    extract::{State, rejection::JsonRejection},
    http::{StatusCode, header},
    response::{IntoResponse, Response},
    routing::{get, post},
};
use chrono::Utc;
use tracing::{debug, info, warn};
use uuid::Uuid;

use crate::models::CalculationInput;

use super::request::CalculationRequest;
use super::response::{
    ApiError, ApiErrorResponse, CalculationResponse, ResponseMeta, RulesResponse,
};
use super::state::AppState;

/// Creates the API router with all endpoints.
pub fn create_router(state: AppState) -> Router {
    Router::new()
        .route("/api/calculate", post(calculate_handler))
        .route("/api/rules", get(rules_handler))
        .with_state(state)
}

/// Handler for GET /api/rules.
///
/// Returns the active rule set so clients can show limits and reason values.
async fn rules_handler(State(state): State<AppState>) -> Json<RulesResponse> {
    Json(RulesResponse {
        regulation: state.metadata().clone(),
        rules: state.rules().clone(),
    })
}

/// Handler for POST /api/calculate.
///
/// Accepts a calculation request and returns the calculated duration.
async fn calculate_handler(
    State(state): State<AppState>,
    payload: Result<Json<CalculationRequest>, JsonRejection>,
) -> Response {
    // Generate correlation ID for request tracking
    let correlation_id = Uuid::new_v4();
    info!(correlation_id = %correlation_id, "Processing calculation request");

    let request = match payload {
        Ok(Json(req)) => req,
        Err(rejection) => {
            let error = rejection_to_error(rejection);
            warn!(
                correlation_id = %correlation_id,
                code = %error.error.code,
                error = %error.error.message,
                "Rejected calculation request"
            );
            return error.into_response();
        }
    };

    let input: CalculationInput = request.into();

    let start_time = Instant::now();
    match state.calculator().calculate(&input) {
        Ok(result) => {
            let duration_us = start_time.elapsed().as_micros() as u64;
            info!(
                correlation_id = %correlation_id,
                base_duration_months = result.original_duration_months,
                final_duration_months = result.final_duration_months,
                tolerance_applied = result.tolerance_rule_applied,
                duration_us,
                "Calculation completed successfully"
            );
            debug!(correlation_id = %correlation_id, "\n{}", result);

            let response = CalculationResponse {
                result,
                meta: ResponseMeta {
                    calculation_id: correlation_id,
                    timestamp: Utc::now(),
                    engine_version: env!("CARGO_PKG_VERSION").to_string(),
                    duration_us,
                },
            };
            (
                StatusCode::OK,
                [(header::CONTENT_TYPE, "application/json")],
                Json(response),
            )
                .into_response()
        }
        Err(err) => {
            warn!(
                correlation_id = %correlation_id,
                error = %err,
                "Calculation failed"
            );
            ApiErrorResponse::from(err).into_response()
        }
    }
}

/// Maps a JSON extractor rejection to an error response.
fn rejection_to_error(rejection: JsonRejection) -> ApiErrorResponse {
    match rejection {
        JsonRejection::JsonDataError(err) => {
            // serde's detailed message, e.g. "missing field `eingabetyp`"
            let body_text = err.body_text();
            match missing_field_name(&body_text) {
                Some(field) => ApiErrorResponse::new(
                    StatusCode::BAD_REQUEST,
                    ApiError::missing_fields(&[field], body_text),
                ),
                None => ApiErrorResponse::new(
                    StatusCode::UNPROCESSABLE_ENTITY,
                    ApiError::validation_error(body_text),
                ),
            }
        }
        JsonRejection::JsonSyntaxError(err) => ApiErrorResponse::new(
            StatusCode::BAD_REQUEST,
            ApiError::malformed_json(format!("Invalid JSON syntax: {}", err)),
        ),
        JsonRejection::MissingJsonContentType(_) => ApiErrorResponse::new(
            StatusCode::BAD_REQUEST,
            ApiError::new(
                "MISSING_CONTENT_TYPE",
                "Content-Type must be application/json",
            ),
        ),
        _ => ApiErrorResponse::new(
            StatusCode::BAD_REQUEST,
            ApiError::malformed_json("Failed to parse request body"),
        ),
    }
}

/// Extracts the field name from a serde "missing field `name`" message.
fn missing_field_name(message: &str) -> Option<String> {
    let rest = message.split("missing field `").nth(1)?;
    let name = rest.split('`').next()?;
    Some(name.to_string())
}
