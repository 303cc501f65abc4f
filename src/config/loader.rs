//! Configuration loading functionality.
//!
//! This module provides the [`ConfigLoader`] type for loading duration
//! rules from YAML files.

use std::fs;
use std::path::Path;

use tracing::debug;

use crate::error::{EngineError, EngineResult};

use super::types::{Regulation, RegulationMetadata, RuleConfig};

/// Loads and provides access to the duration rules.
///
/// The `ConfigLoader` reads YAML configuration files from a directory,
/// checks the rule set for consistency and exposes it to the calculator.
///
/// # Directory Structure
///
/// The configuration directory should have the following structure:
/// ```text
/// config/bbig/
/// ├── regulation.yaml  # Regulation metadata
/// └── rules.yaml       # Limits, shortening reasons, extension rules
/// ```
///
/// # Example
///
/// ```no_run
/// use teilzeit_engine::config::ConfigLoader;
///
/// let loader = ConfigLoader::load("./config/bbig").unwrap();
/// println!("Cap: {} months", loader.rules().shortening.max_total_months);
/// ```
#[derive(Debug, Clone)]
pub struct ConfigLoader {
    regulation: Regulation,
}

impl ConfigLoader {
    /// Loads configuration from the specified directory.
    ///
    /// # Arguments
    ///
    /// * `path` - Path to the configuration directory (e.g., "./config/bbig")
    ///
    /// # Returns
    ///
    /// Returns a `ConfigLoader` instance on success, or an error if:
    /// - Any required file is missing
    /// - Any file contains invalid YAML
    /// - The rule set is internally inconsistent
    ///
    /// # Example
    ///
    /// ```no_run
    /// use teilzeit_engine::config::ConfigLoader;
    ///
    /// let loader = ConfigLoader::load("./config/bbig")?;
    /// # Ok::<(), teilzeit_engine::error::EngineError>(())
    /// ```
    pub fn load<P: AsRef<Path>>(path: P) -> EngineResult<Self> {
        let path = path.as_ref();

        let metadata_path = path.join("regulation.yaml");
        let metadata = Self::load_yaml::<RegulationMetadata>(&metadata_path)?;

        let rules_path = path.join("rules.yaml");
        let rules = Self::load_yaml::<RuleConfig>(&rules_path)?;

        rules
            .check()
            .map_err(|message| EngineError::ConfigParseError {
                path: rules_path.display().to_string(),
                message,
            })?;

        debug!(
            code = %metadata.code,
            version = %metadata.version,
            "Loaded duration rules"
        );

        Ok(Self {
            regulation: Regulation::new(metadata, rules),
        })
    }

    /// Returns a loader holding the built-in statutory rule set.
    ///
    /// # Example
    ///
    /// ```
    /// use teilzeit_engine::config::ConfigLoader;
    ///
    /// let loader = ConfigLoader::statutory();
    /// assert_eq!(loader.rules().shortening.max_total_months, 12);
    /// ```
    pub fn statutory() -> Self {
        Self {
            regulation: Regulation::default(),
        }
    }

    /// Loads and parses a YAML file.
    fn load_yaml<T: serde::de::DeserializeOwned>(path: &Path) -> EngineResult<T> {
        let path_str = path.display().to_string();

        let content = fs::read_to_string(path).map_err(|_| EngineError::ConfigNotFound {
            path: path_str.clone(),
        })?;

        serde_yaml::from_str(&content).map_err(|e| EngineError::ConfigParseError {
            path: path_str,
            message: e.to_string(),
        })
    }

    /// Returns the underlying regulation.
    pub fn regulation(&self) -> &Regulation {
        &self.regulation
    }

    /// Returns the regulation metadata.
    pub fn metadata(&self) -> &RegulationMetadata {
        self.regulation.metadata()
    }

    /// Returns the duration rules.
    pub fn rules(&self) -> &RuleConfig {
        self.regulation.rules()
    }
}

impl Default for ConfigLoader {
    fn default() -> Self {
        Self::statutory()
    }
}
