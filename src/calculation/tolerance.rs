//! Negligible-difference rule.
//!
//! If the extended duration exceeds the original base duration by no more
//! than the tolerance band (six months under § 8 Abs. 3 BBiG), the base
//! duration applies instead.

use crate::models::AuditStep;

/// Statutory reference for the tolerance rule.
pub const TOLERANCE_CLAUSE: &str = "§ 8 Abs. 3 BBiG";

/// The result of the tolerance check.
#[derive(Debug, Clone)]
pub struct ToleranceRuleResult {
    /// The final duration in months.
    pub final_months: u32,
    /// Whether the base duration replaced the extended duration.
    pub applied: bool,
    /// The audit step recording this check.
    pub audit_step: AuditStep,
}

/// Applies the tolerance rule.
///
/// The rule triggers when `base < extended_months <= base + tolerance`.
/// Otherwise the ceiling-capped duration stands. At full time the extended
/// duration never exceeds the base, so the rule is inert.
///
/// # Arguments
///
/// * `base_duration_months` - The original base duration
/// * `extended_months` - The extended duration floored to whole months, before the ceiling
/// * `capped_months` - The extended duration after the ceiling
/// * `tolerance_months` - Width of the tolerance band
/// * `step_number` - The step number for audit trail sequencing
///
/// # Example
///
/// ```
/// use teilzeit_engine::calculation::apply_tolerance_rule;
///
/// // 36 months at 95% extends to 37, within six months of the base
/// let result = apply_tolerance_rule(36, 37, 37, 6, 6);
/// assert_eq!(result.final_months, 36);
/// assert!(result.applied);
///
/// let result = apply_tolerance_rule(36, 48, 48, 6, 6);
/// assert_eq!(result.final_months, 48);
/// assert!(!result.applied);
/// ```
pub fn apply_tolerance_rule(
    base_duration_months: u32,
    extended_months: u32,
    capped_months: u32,
    tolerance_months: u32,
    step_number: u32,
) -> ToleranceRuleResult {
    let excess = extended_months.saturating_sub(base_duration_months);
    let applied = extended_months > base_duration_months && excess <= tolerance_months;
    let final_months = if applied {
        base_duration_months
    } else {
        capped_months
    };

    let reasoning = if applied {
        format!(
            "{} months exceeds the base of {} months by {} (at most {}), base duration applies",
            extended_months, base_duration_months, excess, tolerance_months
        )
    } else if extended_months <= base_duration_months {
        format!(
            "{} months does not exceed the base of {} months, rule not applicable",
            extended_months, base_duration_months
        )
    } else {
        format!(
            "{} months exceeds the base of {} months by {} (more than {}), {} months stands",
            extended_months, base_duration_months, excess, tolerance_months, capped_months
        )
    };

    let audit_step = AuditStep {
        step_number,
        rule_id: "negligible_difference".to_string(),
        rule_name: "Negligible Difference".to_string(),
        clause_ref: TOLERANCE_CLAUSE.to_string(),
        input: serde_json::json!({
            "base_duration_months": base_duration_months,
            "extended_months": extended_months,
            "capped_months": capped_months,
            "tolerance_months": tolerance_months
        }),
        output: serde_json::json!({
            "final_months": final_months,
            "applied": applied
        }),
        reasoning,
    };

    ToleranceRuleResult {
        final_months,
        applied,
        audit_step,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_applies_at_band_edges() {
        let just_over = apply_tolerance_rule(36, 37, 37, 6, 1);
        assert!(just_over.applied);
        assert_eq!(just_over.final_months, 36);

        let at_limit = apply_tolerance_rule(36, 42, 42, 6, 1);
        assert!(at_limit.applied);
        assert_eq!(at_limit.final_months, 36);
    }

    #[test]
    fn test_not_applied_beyond_band() {
        let result = apply_tolerance_rule(36, 43, 43, 6, 1);

        assert!(!result.applied);
        assert_eq!(result.final_months, 43);
        assert!(result.audit_step.reasoning.contains("more than 6"));
    }

    #[test]
    fn test_not_applied_at_or_below_base() {
        for extended in [24, 30, 36] {
            let result = apply_tolerance_rule(36, extended, extended, 6, 1);
            assert!(!result.applied);
            assert_eq!(result.final_months, extended);
        }
    }

    #[test]
    fn test_ceiling_capped_value_stands_when_not_applied() {
        let result = apply_tolerance_rule(24, 48, 36, 6, 1);
        assert!(!result.applied);
        assert_eq!(result.final_months, 36);
    }

    #[test]
    fn test_audit_step() {
        let result = apply_tolerance_rule(36, 37, 37, 6, 7);

        assert_eq!(result.audit_step.step_number, 7);
        assert_eq!(result.audit_step.rule_id, "negligible_difference");
        assert_eq!(result.audit_step.clause_ref, "§ 8 Abs. 3 BBiG");
        assert_eq!(result.audit_step.output["applied"], true);
        assert_eq!(result.audit_step.output["final_months"], 36);
    }
}
