//! Shortening calculation functionality.
//!
//! This module sums the month values of the selected shortening reasons and
//! applies the statutory cap as per § 8 Abs. 1 BBiG.

use rust_decimal::Decimal;

use crate::config::ShorteningRules;
use crate::models::{AuditStep, AuditWarning, ShorteningReason, ShorteningReasons};

/// Statutory reference for the shortening step.
pub const SHORTENING_CLAUSE: &str = "§ 8 Abs. 1 BBiG";

/// Warning code recorded when the reasons exceed the cap.
pub const SHORTENING_CAPPED_WARNING: &str = "SHORTENING_CAPPED";

/// The result of applying the shortening reasons to a base duration.
#[derive(Debug, Clone)]
pub struct ShorteningResult {
    /// Each contributing reason with its month value, in evaluation order.
    pub contributions: Vec<(ShorteningReason, u32)>,
    /// Sum of all contributions before the cap.
    pub uncapped_months: u32,
    /// Shortening actually applied, at most the configured cap.
    pub applied_months: u32,
    /// Base duration minus the applied shortening.
    pub shortened_months: u32,
    /// The audit step recording this calculation.
    pub audit_step: AuditStep,
    /// Set when the cap reduced the shortening.
    pub warning: Option<AuditWarning>,
}

/// Lists the month contribution of every selected reason.
///
/// Prior experience counts once, whether it comes from a positive
/// `prior_experience_months` or from a professional-experience answer.
/// The age reason applies when declared or when `age` reaches the
/// configured threshold. Unfinished training contributes its bucket value,
/// which may be zero.
pub fn reason_contributions(
    reasons: &ShorteningReasons,
    age: Option<u32>,
    unfinished_training_months: Option<u32>,
    rules: &ShorteningRules,
) -> Vec<(ShorteningReason, u32)> {
    let months = &rules.reasons;
    let mut contributions = Vec::new();

    if reasons.abitur {
        contributions.push((ShorteningReason::Abitur, months.abitur));
    }
    if reasons.realschule {
        contributions.push((ShorteningReason::Realschule, months.realschule));
    }
    let old_enough = age.is_some_and(|age| age >= rules.age_threshold_years);
    if reasons.age_over_21 || old_enough {
        contributions.push((ShorteningReason::AgeOver21, months.age_over_21));
    }
    if reasons.prior_experience_months > Decimal::ZERO || reasons.professional_experience {
        contributions.push((ShorteningReason::PriorExperience, months.prior_experience));
    }
    if reasons.family_care {
        contributions.push((ShorteningReason::FamilyCare, months.family_care));
    }
    if reasons.childcare {
        contributions.push((ShorteningReason::Childcare, months.childcare));
    }
    if let Some(completed) = unfinished_training_months {
        contributions.push((
            ShorteningReason::UnfinishedTraining,
            rules.unfinished_training_months(completed),
        ));
    }

    contributions
}

/// Applies the shortening reasons to the base duration.
///
/// The contributions are summed, then capped at
/// `rules.max_total_months`. The shortened duration is not raised back to
/// any minimum.
///
/// # Arguments
///
/// * `base_duration_months` - The validated full-time base duration
/// * `reasons` - The selected shortening reasons
/// * `age` - The trainee age, if given
/// * `unfinished_training_months` - Validated completed months of unfinished training
/// * `rules` - The shortening rules
/// * `step_number` - The step number for audit trail sequencing
///
/// # Example
///
/// ```
/// use teilzeit_engine::calculation::apply_shortening;
/// use teilzeit_engine::config::ShorteningRules;
/// use teilzeit_engine::models::ShorteningReasons;
///
/// let reasons = ShorteningReasons { abitur: true, realschule: true, ..ShorteningReasons::none() };
/// let result = apply_shortening(36, &reasons, None, None, &ShorteningRules::default(), 2);
///
/// assert_eq!(result.uncapped_months, 18);
/// assert_eq!(result.applied_months, 12);
/// assert_eq!(result.shortened_months, 24);
/// assert!(result.warning.is_some());
/// ```
pub fn apply_shortening(
    base_duration_months: u32,
    reasons: &ShorteningReasons,
    age: Option<u32>,
    unfinished_training_months: Option<u32>,
    rules: &ShorteningRules,
    step_number: u32,
) -> ShorteningResult {
    let contributions = reason_contributions(reasons, age, unfinished_training_months, rules);
    let uncapped_months: u32 = contributions
        .iter()
        .fold(0u32, |sum, (_, months)| sum.saturating_add(*months));
    let applied_months = uncapped_months
        .min(rules.max_total_months)
        .min(base_duration_months);
    let shortened_months = base_duration_months - applied_months;
    let capped = applied_months < uncapped_months;

    let reason_map: serde_json::Map<String, serde_json::Value> = contributions
        .iter()
        .map(|(reason, months)| (reason.key().to_string(), serde_json::json!(months)))
        .collect();

    let reasoning = if contributions.is_empty() {
        format!(
            "No shortening reasons selected, duration stays at {} months",
            base_duration_months
        )
    } else if capped {
        format!(
            "Reasons total {} months, capped at {} months: {} - {} = {} months",
            uncapped_months,
            applied_months,
            base_duration_months,
            applied_months,
            shortened_months
        )
    } else {
        format!(
            "Reasons total {} months: {} - {} = {} months",
            uncapped_months, base_duration_months, applied_months, shortened_months
        )
    };

    let audit_step = AuditStep {
        step_number,
        rule_id: "shortening".to_string(),
        rule_name: "Shortening of Training Duration".to_string(),
        clause_ref: SHORTENING_CLAUSE.to_string(),
        input: serde_json::json!({
            "base_duration_months": base_duration_months,
            "reasons": reason_map,
            "max_total_months": rules.max_total_months
        }),
        output: serde_json::json!({
            "uncapped_months": uncapped_months,
            "applied_months": applied_months,
            "shortened_months": shortened_months,
            "capped": capped
        }),
        reasoning,
    };

    let warning = capped.then(|| AuditWarning {
        code: SHORTENING_CAPPED_WARNING.to_string(),
        message: format!(
            "Selected reasons add up to {} months; only {} months can be applied",
            uncapped_months, applied_months
        ),
        severity: "low".to_string(),
    });

    ShorteningResult {
        contributions,
        uncapped_months,
        applied_months,
        shortened_months,
        audit_step,
        warning,
    }
}
