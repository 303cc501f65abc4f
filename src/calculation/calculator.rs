//! The duration calculator.
//!
//! [`DurationCalculator`] runs the complete calculation for one input:
//! validation, part-time share, shortening, proportional extension,
//! rounding, ceiling and the negligible-difference rule. It holds only
//! immutable rule data and can be shared across threads.

use rust_decimal::prelude::ToPrimitive;
use rust_decimal::{Decimal, RoundingStrategy};
use tracing::debug;

use crate::config::RuleConfig;
use crate::error::{EngineError, EngineResult};
use crate::models::{AuditTrace, CalculationInput, CalculationResult};

use super::ceiling::apply_extension_ceiling;
use super::part_time::{extend_for_part_time, resolve_part_time_ratio};
use super::shortening::apply_shortening;
use super::tolerance::apply_tolerance_rule;
use super::validation::validate_input;

/// Calculates part-time training durations under a fixed rule set.
///
/// # Example
///
/// ```
/// use teilzeit_engine::calculation::DurationCalculator;
/// use teilzeit_engine::models::{CalculationInput, ShorteningReasons};
/// use rust_decimal::Decimal;
///
/// let calculator = DurationCalculator::default();
/// let input = CalculationInput::percent(36, Decimal::from(40), Decimal::from(75))
///     .with_reasons(ShorteningReasons { abitur: true, ..ShorteningReasons::none() });
///
/// let result = calculator.calculate(&input).unwrap();
/// assert_eq!(result.shortened_duration_months, 24);
/// assert_eq!(result.final_duration_months, 32);
/// assert_eq!(result.extension_months, 8);
/// ```
#[derive(Debug, Clone, Default)]
pub struct DurationCalculator {
    rules: RuleConfig,
}

impl DurationCalculator {
    /// Creates a calculator for the given rule set.
    pub fn new(rules: RuleConfig) -> Self {
        Self { rules }
    }

    /// Returns the rule set in use.
    pub fn rules(&self) -> &RuleConfig {
        &self.rules
    }

    /// Runs the complete calculation.
    ///
    /// Identical inputs always produce identical results.
    ///
    /// # Errors
    ///
    /// Returns [`EngineError::Validation`] for out-of-range or incomplete
    /// input, and [`EngineError::CalculationError`] if an intermediate value
    /// cannot be represented.
    pub fn calculate(&self, input: &CalculationInput) -> EngineResult<CalculationResult> {
        let rules = &self.rules;
        let validated = validate_input(input, rules)?;
        let base = validated.base_duration_months;

        let mut trace = AuditTrace::default();
        let mut step_number: u32 = 1;

        let ratio = resolve_part_time_ratio(
            validated.full_time_weekly_hours,
            validated.part_time,
            step_number,
        )?;
        trace.steps.push(ratio.audit_step);
        step_number += 1;

        let shortening = apply_shortening(
            base,
            &input.reasons,
            input.age,
            validated.unfinished_training_months,
            &rules.shortening,
            step_number,
        );
        trace.steps.push(shortening.audit_step);
        trace.warnings.extend(shortening.warning);
        step_number += 1;

        let extension = extend_for_part_time(
            shortening.shortened_months,
            validated.full_time_weekly_hours,
            validated.part_time,
            step_number,
        )?;
        step_number += extension.audit_steps.len() as u32;
        trace.steps.extend(extension.audit_steps);

        let ceiling = apply_extension_ceiling(
            base,
            extension.exact_months,
            extension.extended_months,
            &rules.extension,
            step_number,
        )?;
        trace.steps.push(ceiling.audit_step);
        step_number += 1;

        let tolerance = apply_tolerance_rule(
            base,
            extension.extended_months,
            ceiling.capped_months,
            rules.extension.tolerance_months,
            step_number,
        );
        trace.steps.push(tolerance.audit_step);

        let final_months = tolerance.final_months;
        let total_weeks = (Decimal::from(final_months) * rules.weeks_per_month)
            .round_dp_with_strategy(0, RoundingStrategy::MidpointAwayFromZero)
            .to_u32()
            .ok_or_else(|| EngineError::CalculationError {
                message: format!("week total for {} months is out of range", final_months),
            })?;
        let final_years = (Decimal::from(final_months) / Decimal::from(12))
            .round_dp_with_strategy(1, RoundingStrategy::MidpointNearestEven);

        debug!(
            base_duration_months = base,
            shortened_months = shortening.shortened_months,
            extended_months = extension.extended_months,
            final_months,
            tolerance_applied = tolerance.applied,
            "Duration calculated"
        );

        Ok(CalculationResult {
            original_duration_months: base,
            uncapped_shortening_months: shortening.uncapped_months,
            applied_shortening_months: shortening.applied_months,
            shortened_duration_months: shortening.shortened_months,
            part_time_percent: ratio.percent.round_dp(2).normalize(),
            part_time_hours: ratio.weekly_hours.round_dp(2).normalize(),
            weekly_hours: ratio.weekly_hours.round_dp(2).normalize(),
            after_extension_months: extension.exact_months.round_dp(2).normalize(),
            raw_extended_months: extension.extended_months,
            after_ceiling_months: ceiling.exact_months.round_dp(2).normalize(),
            extension_ceiling_months: ceiling.ceiling_months,
            tolerance_rule_applied: tolerance.applied,
            final_duration_months: final_months,
            final_duration_years: final_years.normalize(),
            extension_months: final_months.saturating_sub(shortening.shortened_months),
            total_weeks,
            audit_trace: trace,
        })
    }
}

/// Runs a calculation under the statutory rule set.
///
/// # Example
///
/// ```
/// use teilzeit_engine::calculation::calculate;
/// use teilzeit_engine::models::CalculationInput;
/// use rust_decimal::Decimal;
///
/// let input = CalculationInput::percent(24, Decimal::from(40), Decimal::from(50));
/// let result = calculate(&input).unwrap();
/// assert_eq!(result.final_duration_months, 36);
/// ```
pub fn calculate(input: &CalculationInput) -> EngineResult<CalculationResult> {
    DurationCalculator::default().calculate(input)
}
