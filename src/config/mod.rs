//! Rule configuration for the duration engine.
//!
//! This module provides functionality to load the statutory duration rules
//! from YAML files, including input limits, shortening reasons, the
//! shortening cap and the extension ceiling.
//!
//! # Example
//!
//! ```no_run
//! use teilzeit_engine::config::ConfigLoader;
//!
//! let config = ConfigLoader::load("./config/bbig").unwrap();
//! println!("Loaded rules: {}", config.metadata().name);
//! ```

mod loader;
mod types;

pub use loader::ConfigLoader;
pub use types::{
    DecimalBounds, ExtensionRules, InputLimits, MonthBounds, ReasonMonths, Regulation,
    RegulationMetadata, RuleConfig, STATUTORY_MAX_EXTENSION_FACTOR, ShorteningRules,
    UnfinishedTrainingBucket, WEEKS_PER_MONTH,
};
