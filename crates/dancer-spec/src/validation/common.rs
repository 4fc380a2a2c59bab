//! Range and finiteness checks shared by parameter, target, and settings
//! validation.

use std::fmt;
use std::ops::RangeInclusive;

/// Error type for common validation failures.
#[derive(Debug, Clone, PartialEq)]
pub struct CommonValidationError {
    /// Human-readable error message.
    pub message: String,
}

impl CommonValidationError {
    /// Creates a new validation error with the given message.
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }
}

impl fmt::Display for CommonValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.message)
    }
}

impl std::error::Error for CommonValidationError {}

/// Validate that a value is finite.
///
/// # Example
/// ```
/// use dancer_spec::validation::common::validate_finite;
///
/// assert!(validate_finite("duration", 12.0).is_ok());
/// assert!(validate_finite("duration", f64::NAN).is_err());
/// ```
pub fn validate_finite(name: &str, value: f64) -> Result<(), CommonValidationError> {
    if !value.is_finite() {
        return Err(CommonValidationError::new(format!(
            "{} must be finite, got {}",
            name, value
        )));
    }
    Ok(())
}

/// Validate that a value is positive (> 0).
///
/// # Example
/// ```
/// use dancer_spec::validation::common::validate_positive;
///
/// assert!(validate_positive("duration", 1.0).is_ok());
/// assert!(validate_positive("duration", 0.0).is_err());
/// ```
pub fn validate_positive(name: &str, value: f64) -> Result<(), CommonValidationError> {
    validate_finite(name, value)?;
    if value <= 0.0 {
        return Err(CommonValidationError::new(format!(
            "{} must be positive, got {}",
            name, value
        )));
    }
    Ok(())
}

/// Validate that a value is within an inclusive domain.
///
/// # Example
/// ```
/// use dancer_spec::validation::common::validate_domain;
///
/// assert!(validate_domain("pitch_range", 120.0, &(-200.0..=200.0)).is_ok());
/// assert!(validate_domain("pitch_range", 250.0, &(-200.0..=200.0)).is_err());
/// ```
pub fn validate_domain(
    name: &str,
    value: f64,
    domain: &RangeInclusive<f64>,
) -> Result<(), CommonValidationError> {
    validate_finite(name, value)?;
    if !domain.contains(&value) {
        return Err(CommonValidationError::new(format!(
            "{} must be in [{}, {}], got {}",
            name,
            domain.start(),
            domain.end(),
            value
        )));
    }
    Ok(())
}
