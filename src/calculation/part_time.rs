//! Part-time ratio and extension functionality.
//!
//! This module derives the part-time share from the entered value and
//! extends the shortened duration proportionally as per § 7a Abs. 2 BBiG.
//! Month counts are floored to whole months; the ratio is applied by
//! multiplying before dividing so that exact results stay exact.

use rust_decimal::Decimal;
use rust_decimal::prelude::ToPrimitive;

use crate::error::{EngineError, EngineResult};
use crate::models::{AuditStep, PartTimeInput};

/// Statutory reference for the minimum part-time share.
pub const PART_TIME_RATIO_CLAUSE: &str = "§ 7a Abs. 1 Satz 3 BBiG";

/// Statutory reference for the proportional extension.
pub const EXTENSION_CLAUSE: &str = "§ 7a Abs. 2 Satz 1 BBiG";

/// Statutory reference for rounding down to whole months.
pub const ROUNDING_CLAUSE: &str = "§ 7a Abs. 2 Satz 2 BBiG";

/// The resolved part-time share.
#[derive(Debug, Clone)]
pub struct PartTimeRatioResult {
    /// Share of full time in percent.
    pub percent: Decimal,
    /// Weekly hours actually worked.
    pub weekly_hours: Decimal,
    /// The audit step recording this derivation.
    pub audit_step: AuditStep,
}

/// Derives percent and weekly hours from whichever one was entered.
///
/// Hours are `full_time × percent / 100`; percent is
/// `hours / full_time × 100`.
///
/// # Errors
///
/// Returns [`EngineError::CalculationError`] if the full-time hours are zero.
///
/// # Example
///
/// ```
/// use teilzeit_engine::calculation::resolve_part_time_ratio;
/// use teilzeit_engine::models::PartTimeInput;
/// use rust_decimal::Decimal;
///
/// let result = resolve_part_time_ratio(
///     Decimal::from(40),
///     PartTimeInput::Hours(Decimal::from(30)),
///     1,
/// ).unwrap();
/// assert_eq!(result.percent, Decimal::from(75));
/// ```
pub fn resolve_part_time_ratio(
    full_time_weekly_hours: Decimal,
    part_time: PartTimeInput,
    step_number: u32,
) -> EngineResult<PartTimeRatioResult> {
    let (percent, weekly_hours, mode) = match part_time {
        PartTimeInput::Percent(percent) => {
            let hours = full_time_weekly_hours * percent / Decimal::ONE_HUNDRED;
            (percent, hours, "percent")
        }
        PartTimeInput::Hours(hours) => {
            let percent = (hours * Decimal::ONE_HUNDRED)
                .checked_div(full_time_weekly_hours)
                .ok_or_else(|| EngineError::CalculationError {
                    message: format!(
                        "cannot derive part-time share from {} of {} hours",
                        hours, full_time_weekly_hours
                    ),
                })?;
            (percent, hours, "hours")
        }
    };

    let audit_step = AuditStep {
        step_number,
        rule_id: "part_time_ratio".to_string(),
        rule_name: "Part-Time Share".to_string(),
        clause_ref: PART_TIME_RATIO_CLAUSE.to_string(),
        input: serde_json::json!({
            "full_time_weekly_hours": full_time_weekly_hours.normalize().to_string(),
            "mode": mode,
            "value": part_time.value().normalize().to_string()
        }),
        output: serde_json::json!({
            "percent": percent.round_dp(2).normalize().to_string(),
            "weekly_hours": weekly_hours.round_dp(2).normalize().to_string()
        }),
        reasoning: format!(
            "{} of {} full-time hours per week = {}%",
            weekly_hours.round_dp(2).normalize(),
            full_time_weekly_hours.normalize(),
            percent.round_dp(2).normalize()
        ),
    };

    Ok(PartTimeRatioResult {
        percent,
        weekly_hours,
        audit_step,
    })
}

/// The result of the proportional part-time extension.
#[derive(Debug, Clone)]
pub struct PartTimeExtensionResult {
    /// The unrounded extended duration.
    pub exact_months: Decimal,
    /// The extended duration floored to whole months.
    pub extended_months: u32,
    /// Audit steps for the extension and the rounding.
    pub audit_steps: Vec<AuditStep>,
}

/// Extends the shortened duration in proportion to the part-time share.
///
/// In percent mode the exact duration is `shortened × 100 / percent`; in
/// hours mode it is `shortened × full_time / hours`. The result is then
/// floored to whole months.
///
/// # Arguments
///
/// * `shortened_months` - The duration after shortening
/// * `full_time_weekly_hours` - Reference full-time weekly hours
/// * `part_time` - The part-time share as entered
/// * `step_number` - The step number of the first audit step
///
/// # Errors
///
/// Returns [`EngineError::CalculationError`] if the part-time value is zero
/// or the result cannot be represented as whole months.
///
/// # Example
///
/// ```
/// use teilzeit_engine::calculation::extend_for_part_time;
/// use teilzeit_engine::models::PartTimeInput;
/// use rust_decimal::Decimal;
///
/// let result = extend_for_part_time(
///     36,
///     Decimal::from(40),
///     PartTimeInput::Percent(Decimal::from(95)),
///     3,
/// ).unwrap();
/// assert_eq!(result.extended_months, 37);
/// assert_eq!(result.audit_steps.len(), 2);
/// ```
pub fn extend_for_part_time(
    shortened_months: u32,
    full_time_weekly_hours: Decimal,
    part_time: PartTimeInput,
    step_number: u32,
) -> EngineResult<PartTimeExtensionResult> {
    let shortened = Decimal::from(shortened_months);
    let (numerator, denominator, formula) = match part_time {
        PartTimeInput::Percent(percent) => (
            shortened * Decimal::ONE_HUNDRED,
            percent,
            format!("{} x 100 / {}", shortened_months, percent.normalize()),
        ),
        PartTimeInput::Hours(hours) => (
            shortened * full_time_weekly_hours,
            hours,
            format!(
                "{} x {} / {}",
                shortened_months,
                full_time_weekly_hours.normalize(),
                hours.normalize()
            ),
        ),
    };

    let exact_months = numerator.checked_div(denominator).ok_or_else(|| {
        EngineError::CalculationError {
            message: format!(
                "cannot extend {} months by a share of {}",
                shortened_months, denominator
            ),
        }
    })?;
    let extended_months = exact_months.floor().to_u32().ok_or_else(|| {
        EngineError::CalculationError {
            message: format!("extended duration {} is not a month count", exact_months),
        }
    })?;

    let extension_step = AuditStep {
        step_number,
        rule_id: "part_time_extension".to_string(),
        rule_name: "Part-Time Extension".to_string(),
        clause_ref: EXTENSION_CLAUSE.to_string(),
        input: serde_json::json!({
            "shortened_months": shortened_months,
            "part_time": part_time
        }),
        output: serde_json::json!({
            "exact_months": exact_months.round_dp(4).normalize().to_string()
        }),
        reasoning: format!(
            "{} = {} months",
            formula,
            exact_months.round_dp(2).normalize()
        ),
    };

    let rounded_down = exact_months != Decimal::from(extended_months);
    let rounding_step = AuditStep {
        step_number: step_number + 1,
        rule_id: "month_rounding".to_string(),
        rule_name: "Rounding to Whole Months".to_string(),
        clause_ref: ROUNDING_CLAUSE.to_string(),
        input: serde_json::json!({
            "exact_months": exact_months.round_dp(4).normalize().to_string()
        }),
        output: serde_json::json!({
            "extended_months": extended_months,
            "rounded_down": rounded_down
        }),
        reasoning: if rounded_down {
            format!(
                "{} months rounded down to {} whole months",
                exact_months.round_dp(2).normalize(),
                extended_months
            )
        } else {
            format!("{} months is already a whole number", extended_months)
        },
    };

    Ok(PartTimeExtensionResult {
        exact_months,
        extended_months,
        audit_steps: vec![extension_step, rounding_step],
    })
}
