//! Application state for the duration calculator API.
//!
//! This module defines the shared application state that is available
//! to all request handlers.

use std::sync::Arc;

use crate::calculation::DurationCalculator;
use crate::config::{ConfigLoader, RegulationMetadata, RuleConfig};

/// Shared application state.
///
/// Holds the loaded regulation and a calculator built from its rules. Both
/// are immutable, so handlers share them without locking.
#[derive(Clone)]
pub struct AppState {
    config: Arc<ConfigLoader>,
    calculator: Arc<DurationCalculator>,
}

impl AppState {
    /// Creates a new application state with the given configuration loader.
    pub fn new(config: ConfigLoader) -> Self {
        let calculator = DurationCalculator::new(config.rules().clone());
        Self {
            config: Arc::new(config),
            calculator: Arc::new(calculator),
        }
    }

    /// Returns a reference to the configuration loader.
    pub fn config(&self) -> &ConfigLoader {
        &self.config
    }

    /// Returns the regulation metadata.
    pub fn metadata(&self) -> &RegulationMetadata {
        self.config.metadata()
    }

    /// Returns the active rule set.
    pub fn rules(&self) -> &RuleConfig {
        self.config.rules()
    }

    /// Returns the calculator.
    pub fn calculator(&self) -> &DurationCalculator {
        &self.calculator
    }
}

impl Default for AppState {
    fn default() -> Self {
        Self::new(ConfigLoader::statutory())
    }
}
