//! Error types for the motion backend.

use dancer_spec::{BackendError, ValidationError};
use thiserror::Error;

/// Result type for motion operations.
pub type MotionResult<T> = Result<T, MotionError>;

/// Errors that can occur during generation, calibration, or export.
#[derive(Debug, Error)]
pub enum MotionError {
    /// Features or parameters failed validation; nothing was generated.
    #[error("invalid input: {}", summarize(.0))]
    InputInvalid(Vec<ValidationError>),

    /// Invalid parameter value outside of validated inputs.
    #[error("invalid parameter '{name}': {message}")]
    InvalidParameter {
        /// Parameter name.
        name: String,
        /// Error message.
        message: String,
    },

    /// Script (de)serialization failed.
    #[error("script serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    /// I/O error while writing an export.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

impl MotionError {
    /// Creates an invalid parameter error.
    pub fn invalid_param(name: impl Into<String>, message: impl Into<String>) -> Self {
        Self::InvalidParameter {
            name: name.into(),
            message: message.into(),
        }
    }

    /// Validation errors carried by an `InputInvalid` error.
    pub fn validation_errors(&self) -> &[ValidationError] {
        match self {
            MotionError::InputInvalid(errors) => errors,
            _ => &[],
        }
    }
}

fn summarize(errors: &[ValidationError]) -> String {
    match errors {
        [] => "no details".to_string(),
        [only] => only.to_string(),
        [first, rest @ ..] => format!("{} (and {} more)", first, rest.len()),
    }
}

impl BackendError for MotionError {
    fn code(&self) -> &'static str {
        match self {
            MotionError::InputInvalid(_) => "MOTION_001",
            MotionError::InvalidParameter { .. } => "MOTION_002",
            MotionError::Serialization(_) => "MOTION_003",
            MotionError::Io(_) => "MOTION_004",
        }
    }

    fn category(&self) -> &'static str {
        "motion"
    }
}
