//! Calculation logic for the duration engine.
//!
//! This module contains the individual calculation steps, input
//! validation, the shortening reasons with their cap, the part-time share
//! and proportional extension, rounding down to whole months, the
//! extension ceiling and the negligible-difference rule, and the
//! [`DurationCalculator`] that runs them in order.

mod calculator;
mod ceiling;
mod part_time;
mod shortening;
mod tolerance;
mod validation;

pub use calculator::{DurationCalculator, calculate};
pub use ceiling::{
    CEILING_CLAUSE, ExtensionCeilingResult, apply_extension_ceiling, extension_ceiling_months,
};
pub use part_time::{
    EXTENSION_CLAUSE, PART_TIME_RATIO_CLAUSE, PartTimeExtensionResult, PartTimeRatioResult,
    ROUNDING_CLAUSE, extend_for_part_time, resolve_part_time_ratio,
};
pub use shortening::{
    SHORTENING_CAPPED_WARNING, SHORTENING_CLAUSE, ShorteningResult, apply_shortening,
    reason_contributions,
};
pub use tolerance::{TOLERANCE_CLAUSE, ToleranceRuleResult, apply_tolerance_rule};
pub use validation::{
    FIELD_BASE_DURATION, FIELD_FULL_TIME_HOURS, FIELD_PART_TIME, FIELD_PRIOR_EXPERIENCE,
    FIELD_UNFINISHED_TRAINING, ValidatedInput, validate_input,
};
