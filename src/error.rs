//! Error types for the converter design and simulation library.
//!
//! This module provides a unified error type [`ConverterError`] that covers
//! all error conditions that can occur while deriving component values,
//! checking the integration step, running a simulation and loading or
//! writing design files.

use thiserror::Error;

/// Result type alias using [`ConverterError`].
pub type Result<T> = std::result::Result<T, ConverterError>;

/// Unified error type for all converter operations.
#[derive(Error, Debug)]
pub enum ConverterError {
    // ============ Design Errors ============
    /// The converter specification violates one of its constraints
    #[error("Invalid specification: {message}")]
    InvalidSpecification { message: String },

    // ============ Simulation Errors ============
    /// Time step too coarse for the switching period or the circuit time constants
    #[error("Unstable step size: dt = {dt:.3e} s exceeds the stability limit of {limit:.3e} s")]
    UnstableStepSize { dt: f64, limit: f64 },

    /// Invalid simulation parameter
    #[error("Invalid simulation parameter: {message}")]
    InvalidSimulationParam { message: String },

    /// Numerical overflow detected
    #[error("Numerical overflow detected at t = {time:.3e} s (value: {value:.2e})")]
    NumericalOverflow { time: f64, value: f64 },

    // ============ I/O Errors ============
    /// Error reading a design file
    #[error("Failed to read design file '{path}': {source}")]
    FileReadError {
        path: String,
        #[source]
        source: std::io::Error,
    },

    /// Malformed design file
    #[error("Design file error: {message}")]
    ConfigError { message: String },

    /// Error writing a report or waveform
    #[error("Output error: {message}")]
    OutputError { message: String },
}

impl ConverterError {
    /// Create an invalid specification error
    pub fn invalid_spec(message: impl Into<String>) -> Self {
        Self::InvalidSpecification {
            message: message.into(),
        }
    }

    /// Create an invalid simulation parameter error
    pub fn invalid_param(message: impl Into<String>) -> Self {
        Self::InvalidSimulationParam {
            message: message.into(),
        }
    }

    /// Create an unstable step size error
    pub fn unstable_step(dt: f64, limit: f64) -> Self {
        Self::UnstableStepSize { dt, limit }
    }
}

impl From<serde_yaml::Error> for ConverterError {
    fn from(e: serde_yaml::Error) -> Self {
        Self::ConfigError {
            message: e.to_string(),
        }
    }
}

impl From<std::io::Error> for ConverterError {
    fn from(e: std::io::Error) -> Self {
        Self::OutputError {
            message: e.to_string(),
        }
    }
}
