//! Input validation for the duration calculation.
//!
//! This module checks a [`CalculationInput`] against the accepted ranges of
//! the active [`RuleConfig`] before any arithmetic runs. Field names in
//! errors follow the request vocabulary so clients can highlight the
//! offending input.

use rust_decimal::Decimal;
use rust_decimal::prelude::ToPrimitive;

use crate::config::RuleConfig;
use crate::error::{EngineError, EngineResult};
use crate::models::{CalculationInput, PartTimeInput};

/// Field name of the base duration.
pub const FIELD_BASE_DURATION: &str = "basis_dauer_monate";
/// Field name of the full-time weekly hours.
pub const FIELD_FULL_TIME_HOURS: &str = "vollzeit_stunden";
/// Field name of the part-time value.
pub const FIELD_PART_TIME: &str = "teilzeit_eingabe";
/// Field name of the prior experience months.
pub const FIELD_PRIOR_EXPERIENCE: &str = "vorkenntnisse_monate";
/// Field name of the unfinished training duration.
pub const FIELD_UNFINISHED_TRAINING: &str = "beruf_q2_dauer_monate";

/// An input that passed validation.
///
/// Carries the base duration as whole months and the unfinished training
/// span floored to whole months.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValidatedInput {
    /// Full-time base duration in months.
    pub base_duration_months: u32,
    /// Reference full-time weekly hours.
    pub full_time_weekly_hours: Decimal,
    /// Part-time share as entered.
    pub part_time: PartTimeInput,
    /// Completed months of unfinished training, if that reason was selected.
    pub unfinished_training_months: Option<u32>,
}

/// Validates a calculation input against the configured limits.
///
/// # Errors
///
/// Returns [`EngineError::Validation`] naming the first offending field when:
/// - the base duration lies outside its bounds
/// - the full-time weekly hours lie outside their bounds
/// - the part-time percent lies outside its bounds (in hours mode the
///   bounds are checked exactly against the full-time hours)
/// - the unfinished training reason is selected without a duration
/// - a month count is negative
///
/// # Example
///
/// ```
/// use teilzeit_engine::calculation::validate_input;
/// use teilzeit_engine::config::RuleConfig;
/// use teilzeit_engine::models::CalculationInput;
/// use rust_decimal::Decimal;
///
/// let rules = RuleConfig::default();
/// let ok = CalculationInput::hours(36, Decimal::from(40), Decimal::from(20));
/// assert!(validate_input(&ok, &rules).is_ok());
///
/// let too_few_hours = CalculationInput::hours(36, Decimal::from(40), Decimal::from(19));
/// assert!(validate_input(&too_few_hours, &rules).is_err());
/// ```
pub fn validate_input(
    input: &CalculationInput,
    rules: &RuleConfig,
) -> EngineResult<ValidatedInput> {
    let limits = &rules.limits;

    let base_bounds = limits.base_duration_months;
    if !base_bounds.contains(input.base_duration_months) {
        return Err(EngineError::validation(
            FIELD_BASE_DURATION,
            format!(
                "must be between {} and {} months, got {}",
                base_bounds.min, base_bounds.max, input.base_duration_months
            ),
        ));
    }
    let base_duration_months = u32::try_from(input.base_duration_months).map_err(|_| {
        EngineError::validation(FIELD_BASE_DURATION, "must be a non-negative month count")
    })?;

    let full_time = input.full_time_weekly_hours;
    let hour_bounds = limits.full_time_weekly_hours;
    if !hour_bounds.contains(full_time) {
        return Err(EngineError::validation(
            FIELD_FULL_TIME_HOURS,
            format!(
                "must be between {} and {} hours, got {}",
                hour_bounds.min, hour_bounds.max, full_time
            ),
        ));
    }

    let percent_bounds = limits.part_time_percent;
    match input.part_time {
        PartTimeInput::Percent(percent) => {
            if !percent_bounds.contains(percent) {
                return Err(EngineError::validation(
                    FIELD_PART_TIME,
                    format!(
                        "part-time share must be between {}% and {}%, got {}%",
                        percent_bounds.min, percent_bounds.max, percent
                    ),
                ));
            }
        }
        PartTimeInput::Hours(hours) => {
            // hours / full_time * 100 within [min, max], without dividing
            let scaled = hours.checked_mul(Decimal::ONE_HUNDRED).ok_or_else(|| {
                EngineError::validation(
                    FIELD_PART_TIME,
                    format!("weekly hours must not exceed {}, got {}", full_time, hours),
                )
            })?;
            if scaled < full_time * percent_bounds.min {
                return Err(EngineError::validation(
                    FIELD_PART_TIME,
                    format!(
                        "weekly hours must be at least {} ({}% of {} full-time hours), got {}",
                        (full_time * percent_bounds.min / Decimal::ONE_HUNDRED).normalize(),
                        percent_bounds.min,
                        full_time,
                        hours
                    ),
                ));
            }
            if scaled > full_time * percent_bounds.max {
                return Err(EngineError::validation(
                    FIELD_PART_TIME,
                    format!(
                        "weekly hours must not exceed {} ({}% of {} full-time hours), got {}",
                        (full_time * percent_bounds.max / Decimal::ONE_HUNDRED).normalize(),
                        percent_bounds.max,
                        full_time,
                        hours
                    ),
                ));
            }
        }
    }

    let reasons = &input.reasons;
    if reasons.prior_experience_months < Decimal::ZERO {
        return Err(EngineError::validation(
            FIELD_PRIOR_EXPERIENCE,
            format!("must not be negative, got {}", reasons.prior_experience_months),
        ));
    }

    let unfinished_training_months = if reasons.unfinished_training {
        let months = reasons.unfinished_training_months.ok_or_else(|| {
            EngineError::validation(
                FIELD_UNFINISHED_TRAINING,
                "required when unfinished prior training is selected",
            )
        })?;
        if months < Decimal::ZERO {
            return Err(EngineError::validation(
                FIELD_UNFINISHED_TRAINING,
                format!("must not be negative, got {}", months),
            ));
        }
        Some(months.floor().to_u32().unwrap_or(u32::MAX))
    } else {
        None
    };

    Ok(ValidatedInput {
        base_duration_months,
        full_time_weekly_hours: full_time,
        part_time: input.part_time,
        unfinished_training_months,
    })
}
