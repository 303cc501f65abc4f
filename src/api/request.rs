//! Request types for the duration calculator API.
//!
//! This module defines the JSON request structures for the `/api/calculate`
//! endpoint. Field names follow the German vocabulary of the calculator form.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::models::{CalculationInput, PartTimeInput, ShorteningReasons};

/// How `teilzeit_eingabe` is to be read.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum InputType {
    /// Share of full time in percent.
    Prozent,
    /// Agreed weekly hours.
    Stunden,
}

/// Request body for the `/api/calculate` endpoint.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CalculationRequest {
    /// Full-time training duration in months.
    pub basis_dauer_monate: i64,
    /// Reference full-time weekly hours.
    pub vollzeit_stunden: Decimal,
    /// Part-time value, read according to `eingabetyp`.
    pub teilzeit_eingabe: Decimal,
    /// Whether `teilzeit_eingabe` is a percent or hours value.
    pub eingabetyp: InputType,
    /// Selected shortening reasons.
    pub verkuerzungsgruende: ShorteningReasonsRequest,
    /// Trainee age in years.
    #[serde(default)]
    pub alter: Option<u32>,
}

/// Shortening reasons in a calculation request.
///
/// Every field is optional and defaults to "not selected". Unknown keys are
/// rejected.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ShorteningReasonsRequest {
    /// Higher education entrance qualification.
    pub abitur: bool,
    /// Intermediate school certificate.
    pub realschule: bool,
    /// Declared to be 21 or older.
    pub alter_ueber_21: bool,
    /// Family or nursing care responsibilities.
    pub familien_pflegeverantwortung: bool,
    /// Childcare responsibilities.
    pub familien_kinderbetreuung: bool,
    /// Months of relevant prior experience.
    pub vorkenntnisse_monate: Decimal,
    /// Completed a vocational training.
    pub beruf_q1: bool,
    /// Started another training without finishing it.
    pub beruf_q2: bool,
    /// Completed months of that unfinished training.
    pub beruf_q2_dauer_monate: Option<Decimal>,
    /// Relevant professional activity.
    pub beruf_q3: bool,
    /// Relevant vocational school attendance.
    pub beruf_q4: bool,
    /// Relevant qualification measure.
    pub beruf_q5: bool,
    /// Other relevant experience.
    pub beruf_q6: bool,
    /// Client-side pre-computation; accepted but not used.
    pub berufliche_verkuerzung_monate: Option<Decimal>,
}

impl From<ShorteningReasonsRequest> for ShorteningReasons {
    fn from(req: ShorteningReasonsRequest) -> Self {
        ShorteningReasons {
            abitur: req.abitur,
            realschule: req.realschule,
            age_over_21: req.alter_ueber_21,
            family_care: req.familien_pflegeverantwortung,
            childcare: req.familien_kinderbetreuung,
            prior_experience_months: req.vorkenntnisse_monate,
            professional_experience: req.beruf_q1
                || req.beruf_q3
                || req.beruf_q4
                || req.beruf_q5
                || req.beruf_q6,
            unfinished_training: req.beruf_q2,
            unfinished_training_months: req.beruf_q2_dauer_monate,
        }
    }
}

impl From<CalculationRequest> for CalculationInput {
    fn from(req: CalculationRequest) -> Self {
        let part_time = match req.eingabetyp {
            InputType::Prozent => PartTimeInput::Percent(req.teilzeit_eingabe),
            InputType::Stunden => PartTimeInput::Hours(req.teilzeit_eingabe),
        };
        CalculationInput {
            base_duration_months: req.basis_dauer_monate,
            full_time_weekly_hours: req.vollzeit_stunden,
            part_time,
            reasons: req.verkuerzungsgruende.into(),
            age: req.alter,
        }
    }
}
