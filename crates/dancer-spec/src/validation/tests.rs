use super::*;
use crate::error::{ErrorCode, WarningCode};
use crate::params::OverflowPolicy;

fn valid_features() -> AudioFeatures {
    AudioFeatures::new(
        5.0,
        vec![0.5, 1.0, 1.5, 2.0],
        vec![2.1, 2.6, 2.3, 2.9],
        vec![0.2, 0.8, 0.4, 0.6],
    )
}

fn error_codes(result: &ValidationResult) -> Vec<ErrorCode> {
    result.errors.iter().map(|e| e.code).collect()
}

// ========================================================================
// Features
// ========================================================================

#[test]
fn test_valid_features_pass() {
    let result = validate_features(&valid_features());
    assert!(result.is_ok(), "errors: {:?}", result.errors);
    assert!(result.warnings.is_empty());
}

#[test]
fn test_single_beat_rejected() {
    let features = AudioFeatures::new(2.0, vec![1.0], vec![1.0], vec![1.0]);
    let result = validate_features(&features);
    assert_eq!(error_codes(&result), vec![ErrorCode::TooFewBeats]);
}

#[test]
fn test_length_mismatch_rejected() {
    let mut features = valid_features();
    features.energy.pop();
    let result = validate_features(&features);
    assert_eq!(error_codes(&result), vec![ErrorCode::LengthMismatch]);
    assert_eq!(result.errors[0].path.as_deref(), Some("energy"));
}

#[test]
fn test_non_monotonic_beats_rejected() {
    let mut features = valid_features();
    features.beats[2] = 1.0;
    let result = validate_features(&features);
    assert_eq!(error_codes(&result), vec![ErrorCode::NonMonotonicBeats]);
    assert_eq!(result.errors[0].path.as_deref(), Some("beats[2]"));
}

#[test]
fn test_duplicate_beat_rejected() {
    let features = AudioFeatures::new(3.0, vec![1.0, 1.0], vec![1.0, 2.0], vec![1.0, 2.0]);
    let result = validate_features(&features);
    assert!(error_codes(&result).contains(&ErrorCode::NonMonotonicBeats));
}

#[test]
fn test_nan_pitch_rejected() {
    let mut features = valid_features();
    features.pitch[1] = f64::NAN;
    let result = validate_features(&features);
    assert_eq!(error_codes(&result), vec![ErrorCode::NonFiniteValue]);
}

#[test]
fn test_zero_duration_rejected() {
    let mut features = valid_features();
    features.duration = 0.0;
    let result = validate_features(&features);
    assert_eq!(error_codes(&result), vec![ErrorCode::InvalidDuration]);
}

#[test]
fn test_negative_energy_rejected() {
    let mut features = valid_features();
    features.energy[0] = -0.1;
    let result = validate_features(&features);
    assert_eq!(error_codes(&result), vec![ErrorCode::NegativeEnergy]);
}

#[test]
fn test_negative_beat_rejected() {
    let mut features = valid_features();
    features.beats[0] = -0.5;
    let result = validate_features(&features);
    assert_eq!(error_codes(&result), vec![ErrorCode::NegativeBeat]);
}

#[test]
fn test_flat_sequences_warn() {
    let features = AudioFeatures::new(3.0, vec![1.0, 2.0], vec![1.0, 1.0], vec![1.0, 1.0]);
    let result = validate_features(&features);
    assert!(result.is_ok());
    let codes: Vec<_> = result.warnings.iter().map(|w| w.code).collect();
    assert_eq!(
        codes,
        vec![WarningCode::DegeneratePitch, WarningCode::DegenerateEnergy]
    );
}

#[test]
fn test_beat_beyond_duration_warns() {
    let mut features = valid_features();
    features.duration = 1.8;
    let result = validate_features(&features);
    assert!(result.is_ok());
    assert_eq!(result.warnings[0].code, WarningCode::BeatBeyondDuration);
}

// ========================================================================
// Parameters
// ========================================================================

#[test]
fn test_default_parameters_pass() {
    let result = validate_parameters(&CalibrationParameters::default(), None);
    assert!(result.is_ok(), "errors: {:?}", result.errors);
}

#[test]
fn test_parameter_domains() {
    let params = CalibrationParameters::new(250.0, -1.0)
        .with_policy(OverflowPolicy::Fold)
        .with_center_offset(101.0);
    let result = validate_parameters(&params, None);
    assert_eq!(result.errors.len(), 3);
    assert!(result
        .errors
        .iter()
        .all(|e| e.code == ErrorCode::ParameterOutOfRange));
}

#[test]
fn test_start_time_after_first_beat_rejected() {
    let params = CalibrationParameters::default().with_start_time(0.75);
    let result = validate_parameters(&params, Some(&valid_features()));
    assert_eq!(error_codes(&result), vec![ErrorCode::InvalidStartTime]);

    let params = CalibrationParameters::default().with_start_time(0.5);
    assert!(validate_parameters(&params, Some(&valid_features())).is_ok());
}

#[test]
fn test_negative_start_time_rejected() {
    let params = CalibrationParameters::default().with_start_time(-1.0);
    let result = validate_parameters(&params, None);
    assert_eq!(error_codes(&result), vec![ErrorCode::InvalidStartTime]);
}

// ========================================================================
// Targets
// ========================================================================

#[test]
fn test_target_domains() {
    let target = CalibrationTarget {
        target_pitch_center: 120.0,
        target_speed: 500.0,
        target_percentage: 0.5,
        ..CalibrationTarget::default()
    };
    let result = validate_target(&target);
    assert_eq!(
        error_codes(&result),
        vec![ErrorCode::TargetOutOfRange, ErrorCode::TargetOutOfRange]
    );
}

#[test]
fn test_calibrate_ignores_search_parameters() {
    let base = CalibrationParameters::new(999.0, -5.0);
    let result = validate_for_calibrate(&valid_features(), &base, &CalibrationTarget::default());
    assert!(result.is_ok(), "errors: {:?}", result.errors);
}

#[test]
fn test_generate_merges_feature_and_parameter_errors() {
    let features = AudioFeatures::new(3.0, vec![1.0], vec![1.0], vec![1.0]);
    let params = CalibrationParameters::new(300.0, 1.0);
    let result = validate_for_generate(&features, &params);
    assert_eq!(
        error_codes(&result),
        vec![ErrorCode::TooFewBeats, ErrorCode::ParameterOutOfRange]
    );
}

#[test]
fn test_oversized_values_rejected() {
    let features = AudioFeatures::new(
        3.0,
        vec![1.0, 2e9],
        vec![1.0, 1e300],
        vec![1.0, 2.0],
    );
    let result = validate_features(&features);
    assert_eq!(
        error_codes(&result),
        vec![ErrorCode::ValueTooLarge, ErrorCode::ValueTooLarge]
    );
    assert_eq!(result.errors[0].path.as_deref(), Some("beats[1]"));
    assert_eq!(result.errors[1].path.as_deref(), Some("pitch[1]"));
}
