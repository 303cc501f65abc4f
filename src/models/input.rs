//! Calculation input model and related types.
//!
//! This module defines the immutable [`CalculationInput`] built fresh for
//! every calculation request, the part-time input mode and the typed record
//! of selected shortening reasons.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// How the part-time share was entered.
///
/// Exactly one value is supplied; the other one is derived
/// (hours = full-time hours × percent / 100).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case", tag = "mode", content = "value")]
pub enum PartTimeInput {
    /// Share of full time in percent.
    Percent(Decimal),
    /// Agreed weekly hours.
    Hours(Decimal),
}

impl PartTimeInput {
    /// Returns the raw value as entered.
    pub fn value(&self) -> Decimal {
        match self {
            Self::Percent(value) | Self::Hours(value) => *value,
        }
    }
}

/// A statutory shortening reason.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ShorteningReason {
    /// Higher education entrance qualification.
    Abitur,
    /// Intermediate school certificate.
    Realschule,
    /// Trainee is 21 or older.
    AgeOver21,
    /// Relevant prior professional experience.
    PriorExperience,
    /// Family or nursing care responsibilities.
    FamilyCare,
    /// Childcare responsibilities.
    Childcare,
    /// Unfinished prior training, bucketed by completed months.
    UnfinishedTraining,
}

impl ShorteningReason {
    /// Returns the stable identifier of the reason.
    pub fn key(&self) -> &'static str {
        match self {
            Self::Abitur => "abitur",
            Self::Realschule => "realschule",
            Self::AgeOver21 => "age_over_21",
            Self::PriorExperience => "prior_experience",
            Self::FamilyCare => "family_care",
            Self::Childcare => "childcare",
            Self::UnfinishedTraining => "unfinished_training",
        }
    }
}

/// The shortening reasons selected for a calculation.
///
/// Yes/no toggles from the form collapse into this record. Mutual
/// exclusivity of form options is not enforced here.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct ShorteningReasons {
    /// Has a higher education entrance qualification.
    pub abitur: bool,
    /// Has an intermediate school certificate.
    pub realschule: bool,
    /// Declared to be 21 or older.
    pub age_over_21: bool,
    /// Has family or nursing care responsibilities.
    pub family_care: bool,
    /// Has childcare responsibilities.
    pub childcare: bool,
    /// Months of relevant prior experience; any positive value qualifies.
    pub prior_experience_months: Decimal,
    /// Answered yes to a professional-experience question.
    pub professional_experience: bool,
    /// Answered yes to "started another training without finishing it".
    pub unfinished_training: bool,
    /// Completed months of the unfinished training; required when
    /// `unfinished_training` is set.
    pub unfinished_training_months: Option<Decimal>,
}

impl ShorteningReasons {
    /// Returns a record with no reason selected.
    pub fn none() -> Self {
        Self::default()
    }

    /// Returns a record with every reason selected.
    ///
    /// The unfinished training is given a completed span of 12 months.
    pub fn all() -> Self {
        Self {
            abitur: true,
            realschule: true,
            age_over_21: true,
            family_care: true,
            childcare: true,
            prior_experience_months: Decimal::from(12),
            professional_experience: true,
            unfinished_training: true,
            unfinished_training_months: Some(Decimal::from(12)),
        }
    }
}

/// Everything the duration calculator needs for one calculation.
///
/// # Example
///
/// ```
/// use teilzeit_engine::models::{CalculationInput, ShorteningReasons};
/// use rust_decimal::Decimal;
///
/// let input = CalculationInput::percent(36, Decimal::from(40), Decimal::from(75))
///     .with_reasons(ShorteningReasons {
///         abitur: true,
///         ..ShorteningReasons::none()
///     });
/// assert_eq!(input.base_duration_months, 36);
/// assert!(input.reasons.abitur);
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CalculationInput {
    /// Full-time training duration per training regulation, in months.
    pub base_duration_months: i64,
    /// Reference full-time weekly hours.
    pub full_time_weekly_hours: Decimal,
    /// Part-time share as entered.
    pub part_time: PartTimeInput,
    /// Selected shortening reasons.
    pub reasons: ShorteningReasons,
    /// Trainee age in years, if known.
    pub age: Option<u32>,
}

impl CalculationInput {
    /// Creates an input with the part-time share given in percent.
    pub fn percent(
        base_duration_months: i64,
        full_time_weekly_hours: Decimal,
        percent: Decimal,
    ) -> Self {
        Self {
            base_duration_months,
            full_time_weekly_hours,
            part_time: PartTimeInput::Percent(percent),
            reasons: ShorteningReasons::none(),
            age: None,
        }
    }

    /// Creates an input with the part-time share given in weekly hours.
    pub fn hours(
        base_duration_months: i64,
        full_time_weekly_hours: Decimal,
        hours: Decimal,
    ) -> Self {
        Self {
            part_time: PartTimeInput::Hours(hours),
            ..Self::percent(base_duration_months, full_time_weekly_hours, Decimal::ONE_HUNDRED)
        }
    }

    /// Replaces the selected shortening reasons.
    pub fn with_reasons(mut self, reasons: ShorteningReasons) -> Self {
        self.reasons = reasons;
        self
    }

    /// Sets the trainee age.
    pub fn with_age(mut self, age: u32) -> Self {
        self.age = Some(age);
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_hours_constructor_keeps_base_fields() {
        let input = CalculationInput::hours(36, Decimal::from(40), Decimal::from(30));
        assert_eq!(input.base_duration_months, 36);
        assert_eq!(input.part_time, PartTimeInput::Hours(Decimal::from(30)));
        assert_eq!(input.reasons, ShorteningReasons::none());
        assert_eq!(input.age, None);
    }

    #[test]
    fn test_with_age_sets_age() {
        let input =
            CalculationInput::percent(36, Decimal::from(40), Decimal::from(100)).with_age(22);
        assert_eq!(input.age, Some(22));
    }

    #[test]
    fn test_part_time_value() {
        assert_eq!(PartTimeInput::Percent(Decimal::from(75)).value(), Decimal::from(75));
        assert_eq!(PartTimeInput::Hours(Decimal::from(30)).value(), Decimal::from(30));
    }

    #[test]
    fn test_shortening_reason_serialization() {
        let json = serde_json::to_string(&ShorteningReason::AgeOver21).unwrap();
        assert_eq!(json, "\"age_over_21\"");
        assert_eq!(ShorteningReason::AgeOver21.key(), "age_over_21");

        let reason: ShorteningReason = serde_json::from_str("\"unfinished_training\"").unwrap();
        assert_eq!(reason, ShorteningReason::UnfinishedTraining);
    }

    #[test]
    fn test_all_reasons_supplies_unfinished_training_months() {
        let reasons = ShorteningReasons::all();
        assert!(reasons.unfinished_training);
        assert_eq!(reasons.unfinished_training_months, Some(Decimal::from(12)));
    }
}
