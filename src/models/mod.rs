//! Core data models for the duration engine.
//!
//! This module contains the input and result models used throughout the engine.

mod calculation_result;
mod input;

pub use calculation_result::{AuditStep, AuditTrace, AuditWarning, CalculationResult};
pub use input::{CalculationInput, PartTimeInput, ShorteningReason, ShorteningReasons};
