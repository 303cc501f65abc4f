//! Calculation result models for the duration engine.
//!
//! This module contains the [`CalculationResult`] type and its associated
//! structures that capture all outputs of a duration calculation, including
//! every intermediate step and an audit trace.

use std::fmt;

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// A single step in the audit trace recording a calculation decision.
///
/// Each step captures the input, output, and reasoning for a rule application.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AuditStep {
    /// The sequential step number.
    pub step_number: u32,
    /// The unique identifier of the rule that was applied.
    pub rule_id: String,
    /// The human-readable name of the rule.
    pub rule_name: String,
    /// Reference to the statutory provision for this rule.
    pub clause_ref: String,
    /// The input data for this step.
    pub input: serde_json::Value,
    /// The output data from this step.
    pub output: serde_json::Value,
    /// Human-readable explanation of the decision.
    pub reasoning: String,
}

/// A warning generated during calculation.
///
/// Warnings indicate noteworthy conditions that don't prevent calculation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AuditWarning {
    /// A code identifying the type of warning.
    pub code: String,
    /// A human-readable description of the warning.
    pub message: String,
    /// The severity level (e.g., "low", "medium", "high").
    pub severity: String,
}

/// The complete audit trace for a calculation.
///
/// Records every decision made during the calculation process.
///
/// # Example
///
/// ```
/// use teilzeit_engine::models::AuditTrace;
///
/// let trace = AuditTrace {
///     steps: vec![],
///     warnings: vec![],
/// };
/// assert!(trace.step("extension_ceiling").is_none());
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct AuditTrace {
    /// The sequence of calculation steps.
    pub steps: Vec<AuditStep>,
    /// Any warnings generated during calculation.
    pub warnings: Vec<AuditWarning>,
}

impl AuditTrace {
    /// Returns the step recorded for `rule_id`, if any.
    pub fn step(&self, rule_id: &str) -> Option<&AuditStep> {
        self.steps.iter().find(|step| step.rule_id == rule_id)
    }

    /// Returns true if a warning with `code` was recorded.
    pub fn has_warning(&self, code: &str) -> bool {
        self.warnings.iter().any(|warning| warning.code == code)
    }
}

/// The complete result of a duration calculation.
///
/// Field names on the wire follow the German request vocabulary of the
/// calculator form. Month counts are whole months; fractional values are
/// serialized as JSON numbers.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CalculationResult {
    /// Full-time base duration as entered.
    #[serde(rename = "original_dauer_monate")]
    pub original_duration_months: u32,
    /// Sum of all selected reasons before the cap.
    #[serde(rename = "verkuerzung_gesamt_ohne_begrenzung")]
    pub uncapped_shortening_months: u32,
    /// Shortening actually applied, capped.
    #[serde(rename = "verkuerzung_gesamt_monate")]
    pub applied_shortening_months: u32,
    /// Base duration minus the applied shortening.
    #[serde(rename = "verkuerzte_dauer_monate")]
    pub shortened_duration_months: u32,
    /// Part-time share in percent.
    #[serde(rename = "teilzeit_prozent", with = "rust_decimal::serde::float")]
    pub part_time_percent: Decimal,
    /// Agreed weekly part-time hours.
    #[serde(rename = "teilzeit_stunden", with = "rust_decimal::serde::float")]
    pub part_time_hours: Decimal,
    /// Weekly hours actually worked.
    #[serde(rename = "wochenstunden", with = "rust_decimal::serde::float")]
    pub weekly_hours: Decimal,
    /// Exact duration after the proportional part-time extension.
    #[serde(rename = "nach_schritt1_monate", with = "rust_decimal::serde::float")]
    pub after_extension_months: Decimal,
    /// The extended duration floored to whole months.
    #[serde(rename = "verlaengerte_dauer_monate")]
    pub raw_extended_months: u32,
    /// Exact duration after applying the ceiling.
    #[serde(rename = "nach_schritt2_monate", with = "rust_decimal::serde::float")]
    pub after_ceiling_months: Decimal,
    /// The ceiling: 1.5× the base duration, floored.
    #[serde(rename = "obergrenze_monate")]
    pub extension_ceiling_months: u32,
    /// Whether the negligible-difference rule reverted to the base duration.
    #[serde(rename = "regel_8_abs_3_angewendet")]
    pub tolerance_rule_applied: bool,
    /// The final training duration.
    #[serde(rename = "finale_dauer_monate")]
    pub final_duration_months: u32,
    /// The final training duration in years, one decimal.
    #[serde(rename = "finale_dauer_jahre", with = "rust_decimal::serde::float")]
    pub final_duration_years: Decimal,
    /// Final duration minus the shortened duration.
    #[serde(rename = "verlaengerung_durch_teilzeit_monate")]
    pub extension_months: u32,
    /// Final duration in weeks.
    #[serde(rename = "gesamt_wochen")]
    pub total_weeks: u32,
    /// Complete audit trace of calculation decisions.
    pub audit_trace: AuditTrace,
}

const RULE: &str =
    "======================================================================";

impl fmt::Display for CalculationResult {
    /// Renders a plain-text summary of the calculation.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "{RULE}")?;
        writeln!(f, "BERECHNUNGSERGEBNIS TEILZEITAUSBILDUNG")?;
        writeln!(f, "{RULE}")?;
        writeln!(f)?;
        writeln!(f, "EINGABEWERTE:")?;
        writeln!(
            f,
            "  Regulaere Ausbildungsdauer:      {} Monate",
            self.original_duration_months
        )?;
        writeln!(
            f,
            "  Teilzeit-Prozentsatz:            {:.1}%",
            self.part_time_percent
        )?;
        writeln!(
            f,
            "  Teilzeitstunden:                 {:.1} Stunden",
            self.part_time_hours
        )?;
        writeln!(f)?;
        writeln!(f, "BERECHNUNGSSCHRITTE:")?;
        writeln!(
            f,
            "  1. Nach Verkuerzung:             {} Monate (Verkuerzung gesamt: {} Monate)",
            self.shortened_duration_months, self.applied_shortening_months
        )?;
        writeln!(
            f,
            "  2. Nach Verlaengerung:           {:.1} Monate",
            self.after_extension_months
        )?;
        writeln!(
            f,
            "  3. Nach Obergrenze (max 1,5x):   {:.1} Monate",
            self.after_ceiling_months
        )?;
        writeln!(
            f,
            "  4. Nach Abrundung:               {} Monate",
            self.raw_extended_months.min(self.extension_ceiling_months)
        )?;
        if self.tolerance_rule_applied {
            writeln!(
                f,
                "     Paragraph 8 Abs. 3 BBiG: Regelausbildungszeit von {} Monaten gilt",
                self.original_duration_months
            )?;
        }
        writeln!(f)?;
        writeln!(f, "ENDERGEBNIS:")?;
        writeln!(
            f,
            "  Finale Ausbildungsdauer:         {} Monate ({} Jahre, {} Wochen)",
            self.final_duration_months, self.final_duration_years, self.total_weeks
        )?;
        writeln!(
            f,
            "  Verlaengerung durch Teilzeit:    {} Monate",
            self.extension_months
        )?;
        write!(f, "{RULE}")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_result() -> CalculationResult {
        CalculationResult {
            original_duration_months: 36,
            uncapped_shortening_months: 12,
            applied_shortening_months: 12,
            shortened_duration_months: 24,
            part_time_percent: Decimal::from(75),
            part_time_hours: Decimal::from(30),
            weekly_hours: Decimal::from(30),
            after_extension_months: Decimal::from(32),
            raw_extended_months: 32,
            after_ceiling_months: Decimal::from(32),
            extension_ceiling_months: 54,
            tolerance_rule_applied: false,
            final_duration_months: 32,
            final_duration_years: Decimal::new(27, 1),
            extension_months: 8,
            total_weeks: 139,
            audit_trace: AuditTrace::default(),
        }
    }

    #[test]
    fn test_result_uses_german_wire_names() {
        let json = serde_json::to_value(sample_result()).unwrap();

        assert_eq!(json["finale_dauer_monate"], 32);
        assert_eq!(json["verlaengerung_durch_teilzeit_monate"], 8);
        assert_eq!(json["verkuerzung_gesamt_monate"], 12);
        assert_eq!(json["verkuerzte_dauer_monate"], 24);
        assert_eq!(json["regel_8_abs_3_angewendet"], false);
        assert!(json["audit_trace"]["steps"].is_array());
    }

    #[test]
    fn test_fractional_values_serialize_as_numbers() {
        let json = serde_json::to_value(sample_result()).unwrap();

        assert_eq!(json["wochenstunden"].as_f64(), Some(30.0));
        assert_eq!(json["teilzeit_prozent"].as_f64(), Some(75.0));
        assert_eq!(json["finale_dauer_jahre"].as_f64(), Some(2.7));
    }

    #[test]
    fn test_result_deserializes_from_wire_format() {
        let original = sample_result();
        let json = serde_json::to_string(&original).unwrap();
        let parsed: CalculationResult = serde_json::from_str(&json).unwrap();
        assert_eq!(parsed.final_duration_months, 32);
        assert_eq!(parsed.part_time_percent, Decimal::from(75));
    }

    #[test]
    fn test_report_contains_key_figures() {
        let report = sample_result().to_string();

        assert!(report.contains("BERECHNUNGSERGEBNIS TEILZEITAUSBILDUNG"));
        assert!(report.contains("Finale Ausbildungsdauer"));
        assert!(report.contains("32 Monate"));
        assert!(report.contains("75.0%"));
        assert!(!report.contains("Paragraph 8 Abs. 3"));
    }

    #[test]
    fn test_report_mentions_tolerance_rule_when_applied() {
        let mut result = sample_result();
        result.tolerance_rule_applied = true;
        assert!(result.to_string().contains("Paragraph 8 Abs. 3 BBiG"));
    }

    #[test]
    fn test_audit_trace_lookup() {
        let trace = AuditTrace {
            steps: vec![AuditStep {
                step_number: 1,
                rule_id: "shortening".to_string(),
                rule_name: "Shortening".to_string(),
                clause_ref: "§ 8 Abs. 1 BBiG".to_string(),
                input: serde_json::json!({}),
                output: serde_json::json!({}),
                reasoning: String::new(),
            }],
            warnings: vec![AuditWarning {
                code: "SHORTENING_CAPPED".to_string(),
                message: "capped".to_string(),
                severity: "low".to_string(),
            }],
        };

        assert_eq!(trace.step("shortening").unwrap().step_number, 1);
        assert!(trace.step("missing").is_none());
        assert!(trace.has_warning("SHORTENING_CAPPED"));
        assert!(!trace.has_warning("OTHER"));
    }
}
