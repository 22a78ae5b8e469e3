//! Error types for the payroll simulation engine.
//!
//! This module provides strongly-typed errors using the `thiserror` crate
//! for all error conditions that can occur while loading configuration or
//! running a simulation.

use thiserror::Error;

/// The main error type for the payroll simulation engine.
///
/// All fallible operations in the engine return this error type, making it
/// easy to handle errors consistently throughout the application.
///
/// # Example
///
/// ```
/// use jmu_payroll::error::EngineError;
///
/// let error = EngineError::ConfigNotFound {
///     path: "/missing/salaries.yaml".to_string(),
/// };
/// assert_eq!(error.to_string(), "Configuration file not found: /missing/salaries.yaml");
/// ```
#[derive(Debug, Error)]
pub enum EngineError {
    /// Configuration file was not found at the specified path.
    #[error("Configuration file not found: {path}")]
    ConfigNotFound {
        /// The path that was not found.
        path: String,
    },

    /// Configuration file could not be parsed.
    #[error("Failed to parse configuration file '{path}': {message}")]
    ConfigParseError {
        /// The path to the file that failed to parse.
        path: String,
        /// A description of the parse error.
        message: String,
    },

    /// No configuration was supplied for the calculation.
    #[error("A configuration is required to run a calculation (scope: {scope})")]
    ConfigurationRequired {
        /// The jurisdiction scope that was requested.
        scope: String,
    },

    /// A configuration entry was missing and the lookup policy is strict.
    #[error("Configuration is incomplete: missing {key}")]
    ConfigurationIncomplete {
        /// The missing table or entry key.
        key: String,
    },

    /// A configuration table violates one of its invariants.
    #[error("Invalid configuration '{table}': {message}")]
    InvalidConfiguration {
        /// The table that failed validation.
        table: String,
        /// A description of the violation.
        message: String,
    },

    /// The position has no salary table.
    #[error("Position not found in salary table: {position}")]
    PositionNotFound {
        /// The position that was not found.
        position: String,
    },

    /// The salary step does not exist for the position.
    #[error("Step '{step}' not found for position '{position}'")]
    StepNotFound {
        /// The position that was looked up.
        position: String,
        /// The step code that was not found.
        step: String,
    },

    /// A simulation input was rejected at the engine boundary.
    #[error("Invalid input field '{field}': {message}")]
    InvalidInput {
        /// The field that was invalid.
        field: String,
        /// A description of what made the field invalid.
        message: String,
    },
}

/// A type alias for Results that return EngineError.
pub type EngineResult<T> = Result<T, EngineError>;
