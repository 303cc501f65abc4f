//! Extension ceiling functionality.
//!
//! A part-time extension may not exceed 1.5 times the original base
//! duration (§ 7a Abs. 2 Satz 1 BBiG). The ceiling references the base
//! before any shortening.

use rust_decimal::Decimal;
use rust_decimal::prelude::ToPrimitive;

use crate::config::ExtensionRules;
use crate::error::{EngineError, EngineResult};
use crate::models::AuditStep;

/// Statutory reference for the extension ceiling.
pub const CEILING_CLAUSE: &str = "§ 7a Abs. 2 Satz 1 BBiG";

/// The result of applying the extension ceiling.
#[derive(Debug, Clone)]
pub struct ExtensionCeilingResult {
    /// The ceiling in whole months, floored.
    pub ceiling_months: u32,
    /// The unrounded duration after the ceiling.
    pub exact_months: Decimal,
    /// The whole-month duration after the ceiling.
    pub capped_months: u32,
    /// Whether the ceiling reduced the duration.
    pub ceiling_applied: bool,
    /// The audit step recording this calculation.
    pub audit_step: AuditStep,
}

/// Returns `floor(base × factor)`.
///
/// # Example
///
/// ```
/// use teilzeit_engine::calculation::extension_ceiling_months;
/// use rust_decimal::Decimal;
///
/// assert_eq!(extension_ceiling_months(24, Decimal::new(15, 1)).unwrap(), 36);
/// assert_eq!(extension_ceiling_months(42, Decimal::new(15, 1)).unwrap(), 63);
/// assert_eq!(extension_ceiling_months(27, Decimal::new(15, 1)).unwrap(), 40);
/// ```
pub fn extension_ceiling_months(
    base_duration_months: u32,
    max_factor: Decimal,
) -> EngineResult<u32> {
    let ceiling = Decimal::from(base_duration_months) * max_factor;
    ceiling
        .floor()
        .to_u32()
        .ok_or_else(|| EngineError::CalculationError {
            message: format!("extension ceiling {} is not a month count", ceiling),
        })
}

/// Caps the extended duration at the ceiling.
///
/// Both the exact duration and the floored duration are capped; the exact
/// value is kept for reporting.
///
/// # Arguments
///
/// * `base_duration_months` - The original base duration, before shortening
/// * `exact_months` - The unrounded extended duration
/// * `extended_months` - The extended duration floored to whole months
/// * `rules` - The extension rules
/// * `step_number` - The step number for audit trail sequencing
pub fn apply_extension_ceiling(
    base_duration_months: u32,
    exact_months: Decimal,
    extended_months: u32,
    rules: &ExtensionRules,
    step_number: u32,
) -> EngineResult<ExtensionCeilingResult> {
    let ceiling_months = extension_ceiling_months(base_duration_months, rules.max_factor)?;
    let exact_ceiling = Decimal::from(base_duration_months) * rules.max_factor;

    let exact_after = exact_months.min(exact_ceiling);
    let capped_months = extended_months.min(ceiling_months);
    let ceiling_applied = extended_months > ceiling_months;

    let reasoning = if ceiling_applied {
        format!(
            "{} months exceeds the ceiling of {} x {} = {} months, capped",
            extended_months,
            base_duration_months,
            rules.max_factor.normalize(),
            ceiling_months
        )
    } else {
        format!(
            "{} months is within the ceiling of {} x {} = {} months",
            extended_months,
            base_duration_months,
            rules.max_factor.normalize(),
            ceiling_months
        )
    };

    let audit_step = AuditStep {
        step_number,
        rule_id: "extension_ceiling".to_string(),
        rule_name: "Extension Ceiling".to_string(),
        clause_ref: CEILING_CLAUSE.to_string(),
        input: serde_json::json!({
            "base_duration_months": base_duration_months,
            "extended_months": extended_months,
            "max_factor": rules.max_factor.normalize().to_string()
        }),
        output: serde_json::json!({
            "ceiling_months": ceiling_months,
            "capped_months": capped_months,
            "ceiling_applied": ceiling_applied
        }),
        reasoning,
    };

    Ok(ExtensionCeilingResult {
        ceiling_months,
        exact_months: exact_after,
        capped_months,
        ceiling_applied,
        audit_step,
    })
}
