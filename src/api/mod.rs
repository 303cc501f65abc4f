//! HTTP API module for the duration calculator.
//!
//! This module provides the REST endpoints for calculating part-time
//! training durations and for reading the active rule set.

mod handlers;
mod request;
mod response;
mod state;

pub use handlers::create_router;
pub use request::{CalculationRequest, InputType, ShorteningReasonsRequest};
pub use response::{
    ApiError, ApiErrorResponse, CalculationResponse, ErrorEnvelope, ResponseMeta, RulesResponse,
};
pub use state::AppState;
