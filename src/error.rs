//! Error types for the part-time training duration engine.
//!
//! This module provides strongly-typed errors using the `thiserror` crate
//! for all error conditions that can occur while loading rules or
//! calculating a training duration.

use thiserror::Error;

/// The main error type for the duration engine.
///
/// All operations in the engine return this error type, making it easy
/// to handle errors consistently throughout the application.
///
/// # Example
///
/// ```
/// use teilzeit_engine::error::EngineError;
///
/// let error = EngineError::Validation {
///     field: "basis_dauer_monate".to_string(),
///     message: "must be between 24 and 42 months".to_string(),
/// };
/// assert_eq!(
///     error.to_string(),
///     "Invalid value for 'basis_dauer_monate': must be between 24 and 42 months"
/// );
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum EngineError {
    /// Configuration file was not found at the specified path.
    #[error("Configuration file not found: {path}")]
    ConfigNotFound {
        /// The path that was not found.
        path: String,
    },

    /// Configuration file could not be parsed or contains an inconsistent rule set.
    #[error("Failed to parse configuration file '{path}': {message}")]
    ConfigParseError {
        /// The path to the file that failed to parse.
        path: String,
        /// A description of the parse error.
        message: String,
    },

    /// An input value was out of range or a required sub-value was missing.
    ///
    /// This is the only error the calculation core produces for bad input.
    /// It is deterministic: the same input always fails the same way.
    #[error("Invalid value for '{field}': {message}")]
    Validation {
        /// The request field that failed validation (wire name).
        field: String,
        /// A description of what made the field invalid.
        message: String,
    },

    /// A general calculation error occurred.
    #[error("Calculation error: {message}")]
    CalculationError {
        /// A description of the calculation error.
        message: String,
    },
}

impl EngineError {
    /// Shorthand for building a [`EngineError::Validation`].
    pub fn validation(field: impl Into<String>, message: impl Into<String>) -> Self {
        Self::Validation {
            field: field.into(),
            message: message.into(),
        }
    }

    /// Returns true if this error was caused by invalid caller input.
    pub fn is_validation(&self) -> bool {
        matches!(self, Self::Validation { .. })
    }
}

/// A type alias for Results that return EngineError.
pub type EngineResult<T> = Result<T, EngineError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_config_not_found_displays_path() {
        let error = EngineError::ConfigNotFound {
            path: "/missing/rules.yaml".to_string(),
        };
        assert_eq!(
            error.to_string(),
            "Configuration file not found: /missing/rules.yaml"
        );
    }

    #[test]
    fn test_config_parse_error_displays_path_and_message() {
        let error = EngineError::ConfigParseError {
            path: "/config/bad.yaml".to_string(),
            message: "invalid YAML syntax".to_string(),
        };
        assert_eq!(
            error.to_string(),
            "Failed to parse configuration file '/config/bad.yaml': invalid YAML syntax"
        );
    }

    #[test]
    fn test_validation_displays_field_and_message() {
        let error = EngineError::validation("teilzeit_eingabe", "must be between 50% and 100%");
        assert_eq!(
            error.to_string(),
            "Invalid value for 'teilzeit_eingabe': must be between 50% and 100%"
        );
        assert!(error.is_validation());
    }

    #[test]
    fn test_calculation_error_displays_message() {
        let error = EngineError::CalculationError {
            message: "month count out of range".to_string(),
        };
        assert_eq!(
            error.to_string(),
            "Calculation error: month count out of range"
        );
        assert!(!error.is_validation());
    }

    #[test]
    fn test_errors_implement_std_error() {
        fn assert_error<T: std::error::Error>() {}
        assert_error::<EngineError>();
    }

    #[test]
    fn test_error_propagation_with_question_mark() {
        fn rejects_input() -> EngineResult<()> {
            Err(EngineError::validation("vollzeit_stunden", "too low"))
        }

        fn propagates_error() -> EngineResult<()> {
            rejects_input()?;
            Ok(())
        }

        assert!(propagates_error().is_err());
    }
}
