//! Error types for the groundwater forecasting engine.

use std::fmt;
use thiserror::Error;

/// Result type alias for engine operations.
pub type Result<T> = std::result::Result<T, PredictionError>;

/// Why a numeric value failed a finiteness check.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NonFinite {
    NaN,
    PositiveInfinity,
    NegativeInfinity,
}

impl NonFinite {
    /// Classify a value, returning `None` when it is finite.
    pub fn classify(value: f64) -> Option<Self> {
        if value.is_nan() {
            Some(Self::NaN)
        } else if value == f64::INFINITY {
            Some(Self::PositiveInfinity)
        } else if value == f64::NEG_INFINITY {
            Some(Self::NegativeInfinity)
        } else {
            None
        }
    }
}

impl fmt::Display for NonFinite {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::NaN => write!(f, "NaN"),
            Self::PositiveInfinity => write!(f, "positive infinity"),
            Self::NegativeInfinity => write!(f, "negative infinity"),
        }
    }
}

/// Errors that can occur during validation and prediction.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum PredictionError {
    /// Argument has the wrong shape or type.
    #[error("type mismatch for {parameter}: expected {expected}, got {actual}")]
    TypeMismatch {
        parameter: String,
        expected: String,
        actual: String,
    },

    /// Value lies outside its defined interval.
    #[error("{parameter} is out of range: got {actual}, expected {expected}")]
    RangeViolation {
        parameter: String,
        actual: f64,
        expected: String,
    },

    /// Required numeric parameter is NaN or infinite.
    #[error(
        "{parameter} must be a finite number, got {reason}. \
         Check that the upstream regression fit produced a usable value"
    )]
    NotFinite { parameter: String, reason: NonFinite },

    /// Too few points or seasonal cycles for the operation.
    #[error("insufficient data for {operation}: Found {found} {unit}, {required} are required. {remediation}")]
    InsufficientData {
        operation: String,
        found: usize,
        required: usize,
        unit: String,
        remediation: String,
    },

    /// Unrecognised stress category.
    #[error("invalid stress category '{value}': expected one of {valid}")]
    InvalidCategory { value: String, valid: String },

    /// Unparseable or unrepresentable date.
    #[error("invalid date for {parameter}: {reason}")]
    InvalidDate { parameter: String, reason: String },

    /// Parallel sequences of different lengths.
    #[error("dimension mismatch: actual has {expected} values, predicted has {got}")]
    DimensionMismatch { expected: usize, got: usize },

    /// Computation error (e.g., an average over an empty window).
    #[error("computation error: {0}")]
    ComputationError(String),

    /// Invalid engine configuration.
    #[error("invalid configuration: {0}")]
    Config(String),
}

impl PredictionError {
    /// Too few valid measurements for `operation`.
    pub fn insufficient_points(operation: &str, found: usize, required: usize) -> Self {
        Self::InsufficientData {
            operation: operation.to_string(),
            found,
            required,
            unit: "valid data point(s)".to_string(),
            remediation: "Supply more measurements with a parseable date and a finite water level."
                .to_string(),
        }
    }

    /// Too few years containing both a pre- and post-monsoon reading.
    pub fn insufficient_cycles(found: usize, required: usize) -> Self {
        Self::InsufficientData {
            operation: "seasonal forecast".to_string(),
            found,
            required,
            unit: "complete seasonal cycle(s)".to_string(),
            remediation: "A complete cycle needs both season types in the same year: \
                          at least one pre-monsoon (Jan-May) and one post-monsoon (Oct-Dec) reading."
                .to_string(),
        }
    }
}
