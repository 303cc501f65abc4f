//! Configuration types for the duration rules.
//!
//! This module contains the strongly-typed rule structures that are
//! deserialized from YAML configuration files. The [`Default`] values are
//! the statutory parameters of § 7a and § 8 BBiG.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// Extension ceiling factor (§ 7a Abs. 2 Satz 1 BBiG): at most 1.5× the base duration.
pub const STATUTORY_MAX_EXTENSION_FACTOR: Decimal = Decimal::from_parts(15, 0, 0, false, 1);

/// Average number of weeks per month used for the week total.
pub const WEEKS_PER_MONTH: Decimal = Decimal::from_parts(433, 0, 0, false, 2);

/// Metadata about the regulation the rules implement.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RegulationMetadata {
    /// Short code for the rule set (e.g., "BBIG-7A-8").
    pub code: String,
    /// The human-readable name of the rule set.
    pub name: String,
    /// The version or effective date of the rule set.
    pub version: String,
    /// Where the rule set comes from.
    pub source: String,
}

impl Default for RegulationMetadata {
    fn default() -> Self {
        Self {
            code: "BBIG-7A-8".to_string(),
            name: "Teilzeitberufsausbildung nach § 7a und § 8 BBiG".to_string(),
            version: "2021-06-10".to_string(),
            source: "Empfehlung des Hauptausschusses des BIBB vom 10. Juni 2021".to_string(),
        }
    }
}

/// Inclusive whole-month bounds.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct MonthBounds {
    /// Smallest accepted value.
    pub min: u32,
    /// Largest accepted value.
    pub max: u32,
}

impl MonthBounds {
    /// Returns true if `value` lies within the bounds.
    pub fn contains(&self, value: i64) -> bool {
        value >= i64::from(self.min) && value <= i64::from(self.max)
    }
}

/// Inclusive decimal bounds.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct DecimalBounds {
    /// Smallest accepted value.
    pub min: Decimal,
    /// Largest accepted value.
    pub max: Decimal,
}

impl DecimalBounds {
    /// Returns true if `value` lies within the bounds.
    pub fn contains(&self, value: Decimal) -> bool {
        value >= self.min && value <= self.max
    }
}

/// Accepted input ranges.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct InputLimits {
    /// Full-time base duration in months (IHK trades: 24 to 42).
    pub base_duration_months: MonthBounds,
    /// Reference full-time weekly hours.
    pub full_time_weekly_hours: DecimalBounds,
    /// Part-time share in percent (§ 7a Abs. 1 Satz 3 BBiG: at least 50).
    pub part_time_percent: DecimalBounds,
}

impl Default for InputLimits {
    fn default() -> Self {
        Self {
            base_duration_months: MonthBounds { min: 24, max: 42 },
            full_time_weekly_hours: DecimalBounds {
                min: Decimal::from(10),
                max: Decimal::from(48),
            },
            part_time_percent: DecimalBounds {
                min: Decimal::from(50),
                max: Decimal::ONE_HUNDRED,
            },
        }
    }
}

/// Fixed month values per shortening reason (§ 8 Abs. 1 BBiG).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReasonMonths {
    /// Higher education entrance qualification.
    pub abitur: u32,
    /// Intermediate school certificate.
    pub realschule: u32,
    /// Trainee is 21 or older.
    pub age_over_21: u32,
    /// Relevant prior professional experience.
    pub prior_experience: u32,
    /// Family or nursing care responsibilities.
    pub family_care: u32,
    /// Childcare responsibilities.
    pub childcare: u32,
}

impl Default for ReasonMonths {
    fn default() -> Self {
        Self {
            abitur: 12,
            realschule: 6,
            age_over_21: 12,
            prior_experience: 12,
            family_care: 12,
            childcare: 12,
        }
    }
}

/// Maps a completed span of unfinished prior training to a shortening.
///
/// A bucket applies when the completed duration is at least `min_months`;
/// the highest matching bucket wins.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct UnfinishedTrainingBucket {
    /// Minimum completed months for this bucket.
    pub min_months: u32,
    /// Shortening granted by this bucket.
    pub months: u32,
}

/// Shortening rules.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ShorteningRules {
    /// Cap on the total applied shortening.
    pub max_total_months: u32,
    /// Age from which the age reason applies.
    pub age_threshold_years: u32,
    /// Month value per fixed reason.
    pub reasons: ReasonMonths,
    /// Buckets for unfinished prior training, ascending by `min_months`.
    pub unfinished_training: Vec<UnfinishedTrainingBucket>,
}

impl Default for ShorteningRules {
    fn default() -> Self {
        Self {
            max_total_months: 12,
            age_threshold_years: 21,
            reasons: ReasonMonths::default(),
            unfinished_training: vec![
                UnfinishedTrainingBucket {
                    min_months: 6,
                    months: 6,
                },
                UnfinishedTrainingBucket {
                    min_months: 12,
                    months: 12,
                },
            ],
        }
    }
}

impl ShorteningRules {
    /// Returns the shortening granted for `completed_months` of unfinished training.
    ///
    /// # Example
    ///
    /// ```
    /// use teilzeit_engine::config::ShorteningRules;
    ///
    /// let rules = ShorteningRules::default();
    /// assert_eq!(rules.unfinished_training_months(5), 0);
    /// assert_eq!(rules.unfinished_training_months(11), 6);
    /// assert_eq!(rules.unfinished_training_months(30), 12);
    /// ```
    pub fn unfinished_training_months(&self, completed_months: u32) -> u32 {
        self.unfinished_training
            .iter()
            .filter(|bucket| completed_months >= bucket.min_months)
            .map(|bucket| bucket.months)
            .max()
            .unwrap_or(0)
    }
}

/// Part-time extension rules (§ 7a Abs. 2 and § 8 Abs. 3 BBiG).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ExtensionRules {
    /// Ceiling as a multiple of the original base duration.
    pub max_factor: Decimal,
    /// Extensions up to this many months beyond the base are disregarded.
    pub tolerance_months: u32,
}

impl Default for ExtensionRules {
    fn default() -> Self {
        Self {
            max_factor: STATUTORY_MAX_EXTENSION_FACTOR,
            tolerance_months: 6,
        }
    }
}

/// The complete set of duration rules.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RuleConfig {
    /// Accepted input ranges.
    pub limits: InputLimits,
    /// Shortening reasons and cap.
    pub shortening: ShorteningRules,
    /// Extension ceiling and tolerance band.
    pub extension: ExtensionRules,
    /// Weeks per month for the week total.
    #[serde(default = "default_weeks_per_month")]
    pub weeks_per_month: Decimal,
}

fn default_weeks_per_month() -> Decimal {
    WEEKS_PER_MONTH
}

impl Default for RuleConfig {
    fn default() -> Self {
        Self {
            limits: InputLimits::default(),
            shortening: ShorteningRules::default(),
            extension: ExtensionRules::default(),
            weeks_per_month: WEEKS_PER_MONTH,
        }
    }
}

impl RuleConfig {
    /// Checks the rule set for internal consistency.
    ///
    /// Returns a description of the first problem found.
    pub fn check(&self) -> Result<(), String> {
        let limits = &self.limits;
        if limits.base_duration_months.min == 0
            || limits.base_duration_months.min > limits.base_duration_months.max
        {
            return Err("limits.base_duration_months must satisfy 0 < min <= max".to_string());
        }
        if limits.full_time_weekly_hours.min <= Decimal::ZERO
            || limits.full_time_weekly_hours.min > limits.full_time_weekly_hours.max
        {
            return Err("limits.full_time_weekly_hours must satisfy 0 < min <= max".to_string());
        }
        if limits.part_time_percent.min <= Decimal::ZERO
            || limits.part_time_percent.min > limits.part_time_percent.max
            || limits.part_time_percent.max > Decimal::ONE_HUNDRED
        {
            return Err("limits.part_time_percent must satisfy 0 < min <= max <= 100".to_string());
        }
        if self.extension.max_factor < Decimal::ONE {
            return Err("extension.max_factor must be at least 1".to_string());
        }
        if self.weeks_per_month <= Decimal::ZERO {
            return Err("weeks_per_month must be positive".to_string());
        }
        let ascending = self
            .shortening
            .unfinished_training
            .windows(2)
            .all(|pair| pair[0].min_months < pair[1].min_months);
        if !ascending {
            return Err(
                "shortening.unfinished_training buckets must be ascending by min_months"
                    .to_string(),
            );
        }
        Ok(())
    }
}

/// A loaded regulation: metadata plus its rule set.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Regulation {
    /// Regulation metadata.
    metadata: RegulationMetadata,
    /// The duration rules.
    rules: RuleConfig,
}

impl Regulation {
    /// Creates a new Regulation from its component parts.
    pub fn new(metadata: RegulationMetadata, rules: RuleConfig) -> Self {
        Self { metadata, rules }
    }

    /// Returns the regulation metadata.
    pub fn metadata(&self) -> &RegulationMetadata {
        &self.metadata
    }

    /// Returns the duration rules.
    pub fn rules(&self) -> &RuleConfig {
        &self.rules
    }
}

impl Default for Regulation {
    fn default() -> Self {
        Self::new(RegulationMetadata::default(), RuleConfig::default())
    }
}
