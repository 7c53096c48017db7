//! Error types for the domain layer.

use std::fmt;
use thiserror::Error;

/// Errors that occur during value object construction.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ValidationError {
    #[error("Field '{field}' cannot be empty")]
    EmptyField { field: String },

    #[error("Duplicate {field} '{name}'")]
    DuplicateName { field: String, name: String },

    #[error("Value for '{attribute}' of '{part}' is not a finite number: {value}")]
    NonFiniteValue {
        part: String,
        attribute: String,
        value: f64,
    },

    #[error("Field '{field}' has invalid format: {reason}")]
    InvalidFormat { field: String, reason: String },

    #[error("Expected {expected} values for '{part}', got {actual}")]
    LengthMismatch {
        part: String,
        expected: usize,
        actual: usize,
    },
}

impl ValidationError {
    /// Creates an empty field validation error.
    pub fn empty_field(field: impl Into<String>) -> Self {
        ValidationError::EmptyField { field: field.into() }
    }

    /// Creates a duplicate name validation error.
    pub fn duplicate_name(field: impl Into<String>, name: impl Into<String>) -> Self {
        ValidationError::DuplicateName {
            field: field.into(),
            name: name.into(),
        }
    }

    /// Creates a non-finite value validation error.
    pub fn non_finite(part: impl Into<String>, attribute: impl Into<String>, value: f64) -> Self {
        ValidationError::NonFiniteValue {
            part: part.into(),
            attribute: attribute.into(),
            value,
        }
    }

    /// Creates an invalid format validation error.
    pub fn invalid_format(field: impl Into<String>, reason: impl Into<String>) -> Self {
        ValidationError::InvalidFormat {
            field: field.into(),
            reason: reason.into(),
        }
    }

    /// Creates a length mismatch validation error.
    pub fn length_mismatch(part: impl Into<String>, expected: usize, actual: usize) -> Self {
        ValidationError::LengthMismatch {
            part: part.into(),
            expected,
            actual,
        }
    }
}

/// Error codes organized by category.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorCode {
    // Input errors
    SchemaMismatch,
    EmptyInput,
    ValidationFailed,

    // Projection errors
    UnknownDimension,
    InsufficientDimensions,

    // Control flow
    Cancelled,
}

impl fmt::Display for ErrorCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            ErrorCode::SchemaMismatch => "SCHEMA_MISMATCH",
            ErrorCode::EmptyInput => "EMPTY_INPUT",
            ErrorCode::ValidationFailed => "VALIDATION_FAILED",
            ErrorCode::UnknownDimension => "UNKNOWN_DIMENSION",
            ErrorCode::InsufficientDimensions => "INSUFFICIENT_DIMENSIONS",
            ErrorCode::Cancelled => "CANCELLED",
        };
        write!(f, "{}", s)
    }
}

/// Failures of the frontier engine.
///
/// `SchemaMismatch` and `EmptyInput` abort a whole run. `UnknownDimension`,
/// `InsufficientDimensions` and `Cancelled` are scoped to a single projection.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum EngineError {
    #[error("Catalog schemas disagree: {slot} has [{found}], expected [{expected}]")]
    SchemaMismatch {
        slot: String,
        expected: String,
        found: String,
    },

    #[error("Unknown dimension '{0}'")]
    UnknownDimension(String),

    #[error("Projection needs {required} distinct dimensions, got {supplied}")]
    InsufficientDimensions { required: usize, supplied: usize },

    #[error("Nothing to filter: {0} is empty")]
    EmptyInput(String),

    #[error(transparent)]
    Validation(#[from] ValidationError),

    #[error("Projection cancelled")]
    Cancelled,
}

impl EngineError {
    /// Creates an empty input error naming what was empty.
    pub fn empty_input(what: impl Into<String>) -> Self {
        EngineError::EmptyInput(what.into())
    }

    /// Returns the stable error code for this failure.
    pub fn code(&self) -> ErrorCode {
        match self {
            EngineError::SchemaMismatch { .. } => ErrorCode::SchemaMismatch,
            EngineError::UnknownDimension(_) => ErrorCode::UnknownDimension,
            EngineError::InsufficientDimensions { .. } => ErrorCode::InsufficientDimensions,
            EngineError::EmptyInput(_) => ErrorCode::EmptyInput,
            EngineError::Validation(_) => ErrorCode::ValidationFailed,
            EngineError::Cancelled => ErrorCode::Cancelled,
        }
    }

    /// Returns true if the failure only affects the projection that raised it.
    pub fn is_projection_scoped(&self) -> bool {
        matches!(
            self,
            EngineError::UnknownDimension(_)
                | EngineError::InsufficientDimensions { .. }
                | EngineError::Cancelled
        )
    }
}
