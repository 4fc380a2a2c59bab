//! Feature, parameter, and target validation.

pub mod common;

#[cfg(test)]
mod tests;

use crate::error::{ErrorCode, ValidationError, ValidationResult, ValidationWarning, WarningCode};
use crate::features::{AudioFeatures, MAX_FEATURE_MAGNITUDE, MAX_TIMESTAMP};
use crate::params::{
    CalibrationParameters, CalibrationTarget, ENERGY_MULTIPLIER_DOMAIN, PITCH_RANGE_DOMAIN,
    SHIFT_DOMAIN, TARGET_PERCENTAGE_DOMAIN, TARGET_PITCH_DOMAIN, TARGET_SPEED_DOMAIN,
};

pub use common::{validate_domain, validate_finite, validate_positive, CommonValidationError};

/// Validates a feature set.
///
/// Errors make the features unusable for generation. Warnings flag inputs the
/// engine can still process, such as a flat pitch curve.
///
/// # Example
/// ```
/// use dancer_spec::AudioFeatures;
/// use dancer_spec::validation::validate_features;
///
/// let features = AudioFeatures::new(3.0, vec![1.0, 2.0], vec![1.0, 2.0], vec![0.5, 0.7]);
/// assert!(validate_features(&features).is_ok());
///
/// let short = AudioFeatures::new(3.0, vec![1.0], vec![1.0], vec![0.5]);
/// assert!(!validate_features(&short).is_ok());
/// ```
pub fn validate_features(features: &AudioFeatures) -> ValidationResult {
    let mut result = ValidationResult::success();

    if let Err(e) = validate_positive("duration", features.duration) {
        let code = if features.duration.is_finite() {
            ErrorCode::InvalidDuration
        } else {
            ErrorCode::NonFiniteValue
        };
        result.add_error(ValidationError::with_path(code, e.message, "duration"));
    }

    let n = features.beats.len();
    if n < 2 {
        result.add_error(ValidationError::with_path(
            ErrorCode::TooFewBeats,
            format!("at least 2 beats are required, got {}", n),
            "beats",
        ));
    }

    for (name, seq) in [("pitch", &features.pitch), ("energy", &features.energy)] {
        if seq.len() != n {
            result.add_error(ValidationError::with_path(
                ErrorCode::LengthMismatch,
                format!("{} has {} values but there are {} beats", name, seq.len(), n),
                name,
            ));
        }
    }

    for (name, seq) in [
        ("beats", &features.beats),
        ("pitch", &features.pitch),
        ("energy", &features.energy),
    ] {
        if let Some(i) = seq.iter().position(|v| !v.is_finite()) {
            result.add_error(ValidationError::with_path(
                ErrorCode::NonFiniteValue,
                format!("{} contains non-finite value {}", name, seq[i]),
                format!("{}[{}]", name, i),
            ));
        }
    }

    if let Some(i) = features.beats.iter().position(|&b| b < 0.0) {
        result.add_error(ValidationError::with_path(
            ErrorCode::NegativeBeat,
            format!("beat timestamp {} is negative", features.beats[i]),
            format!("beats[{}]", i),
        ));
    }

    if features.duration > MAX_TIMESTAMP {
        result.add_error(ValidationError::with_path(
            ErrorCode::ValueTooLarge,
            format!("duration {} exceeds {}s", features.duration, MAX_TIMESTAMP),
            "duration",
        ));
    }
    if let Some(i) = features.beats.iter().position(|&b| b > MAX_TIMESTAMP) {
        result.add_error(ValidationError::with_path(
            ErrorCode::ValueTooLarge,
            format!("beat timestamp {} exceeds {}s", features.beats[i], MAX_TIMESTAMP),
            format!("beats[{}]", i),
        ));
    }
    for (name, seq) in [("pitch", &features.pitch), ("energy", &features.energy)] {
        if let Some(i) = seq.iter().position(|v| v.abs() > MAX_FEATURE_MAGNITUDE) {
            result.add_error(ValidationError::with_path(
                ErrorCode::ValueTooLarge,
                format!("{} value {} exceeds magnitude {}", name, seq[i], MAX_FEATURE_MAGNITUDE),
                format!("{}[{}]", name, i),
            ));
        }
    }

    if let Some(i) = features.beats.windows(2).position(|w| w[1] <= w[0]) {
        result.add_error(ValidationError::with_path(
            ErrorCode::NonMonotonicBeats,
            format!(
                "beat {} does not follow {}",
                features.beats[i + 1],
                features.beats[i]
            ),
            format!("beats[{}]", i + 1),
        ));
    }

    if let Some(i) = features.energy.iter().position(|&e| e < 0.0) {
        result.add_error(ValidationError::with_path(
            ErrorCode::NegativeEnergy,
            format!("energy {} is negative", features.energy[i]),
            format!("energy[{}]", i),
        ));
    }

    if !result.is_ok() {
        return result;
    }

    if is_flat(&features.pitch) {
        result.add_warning(ValidationWarning::with_path(
            WarningCode::DegeneratePitch,
            "pitch is constant; every beat gets the center offset",
            "pitch",
        ));
    }
    if is_flat(&features.energy) {
        result.add_warning(ValidationWarning::with_path(
            WarningCode::DegenerateEnergy,
            "energy is constant; every beat gets the same amplitude",
            "energy",
        ));
    }
    if let Some(&last) = features.beats.last() {
        if last > features.duration {
            result.add_warning(ValidationWarning::with_path(
                WarningCode::BeatBeyondDuration,
                format!(
                    "last beat at {}s lies beyond the track duration {}s",
                    last, features.duration
                ),
                format!("beats[{}]", n - 1),
            ));
        }
    }

    result
}

/// Validates generation parameters against their domains.
///
/// When `features` is given the start time is checked against the first beat.
pub fn validate_parameters(
    params: &CalibrationParameters,
    features: Option<&AudioFeatures>,
) -> ValidationResult {
    let mut result = ValidationResult::success();

    let checks = [
        ("pitch_range", params.pitch_range, &PITCH_RANGE_DOMAIN),
        (
            "energy_multiplier",
            params.energy_multiplier,
            &ENERGY_MULTIPLIER_DOMAIN,
        ),
        (
            "amplitude_centering",
            params.amplitude_centering,
            &SHIFT_DOMAIN,
        ),
        ("center_offset", params.center_offset, &SHIFT_DOMAIN),
    ];
    for (name, value, domain) in checks {
        if let Err(e) = validate_domain(name, value, domain) {
            result.add_error(ValidationError::with_path(
                ErrorCode::ParameterOutOfRange,
                e.message,
                name,
            ));
        }
    }

    if !params.start_time.is_finite() || params.start_time < 0.0 {
        result.add_error(ValidationError::with_path(
            ErrorCode::InvalidStartTime,
            format!(
                "start_time must be finite and non-negative, got {}",
                params.start_time
            ),
            "start_time",
        ));
    } else if let Some(first) = features.and_then(|f| f.beats.first()) {
        if params.start_time > *first {
            result.add_error(ValidationError::with_path(
                ErrorCode::InvalidStartTime,
                format!(
                    "start_time {} lies after the first beat {}",
                    params.start_time, first
                ),
                "start_time",
            ));
        }
    }

    result
}

/// Validates a calibration target against its domains.
pub fn validate_target(target: &CalibrationTarget) -> ValidationResult {
    let mut result = ValidationResult::success();

    let checks = [
        (
            "target_pitch_center",
            target.target_pitch_center,
            &TARGET_PITCH_DOMAIN,
        ),
        ("target_speed", target.target_speed, &TARGET_SPEED_DOMAIN),
        (
            "target_percentage",
            target.target_percentage,
            &TARGET_PERCENTAGE_DOMAIN,
        ),
    ];
    for (name, value, domain) in checks {
        if let Err(e) = validate_domain(name, value, domain) {
            result.add_error(ValidationError::with_path(
                ErrorCode::TargetOutOfRange,
                e.message,
                name,
            ));
        }
    }

    result
}

/// Validates everything action generation needs.
pub fn validate_for_generate(
    features: &AudioFeatures,
    params: &CalibrationParameters,
) -> ValidationResult {
    let mut result = validate_features(features);
    result.merge(validate_parameters(params, Some(features)));
    result
}

/// Validates everything calibration needs.
///
/// The pitch range and energy multiplier in `base` are search outputs, so
/// their current values are not checked.
pub fn validate_for_calibrate(
    features: &AudioFeatures,
    base: &CalibrationParameters,
    target: &CalibrationTarget,
) -> ValidationResult {
    let mut result = validate_features(features);
    let searchable = CalibrationParameters {
        pitch_range: 0.0,
        energy_multiplier: 0.0,
        ..*base
    };
    result.merge(validate_parameters(&searchable, Some(features)));
    result.merge(validate_target(target));
    result
}

fn is_flat(values: &[f64]) -> bool {
    match values.first() {
        Some(first) => values.iter().all(|v| v == first),
        None => false,
    }
}
