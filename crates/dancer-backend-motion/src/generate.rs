//! Main entry point for action generation.

use dancer_spec::{
    validate_for_generate, ActionSequence, AudioFeatures, CalibrationParameters,
    ValidationWarning,
};

use crate::error::{MotionError, MotionResult};
use crate::offsets::map_offsets;
use crate::sequencer::sequence_actions;

/// Result of a generation call.
#[derive(Debug, Clone, PartialEq)]
pub struct GenerateResult {
    /// The generated actions.
    pub actions: ActionSequence,
    /// Non-fatal validation warnings (e.g., flat pitch).
    pub warnings: Vec<ValidationWarning>,
}

/// Generates the action sequence for a track.
///
/// Inputs are validated first; any error aborts the call and nothing is
/// produced. Warnings are logged and returned alongside the actions.
///
/// # Example
/// ```
/// use dancer_backend_motion::generate::generate;
/// use dancer_spec::{AudioFeatures, CalibrationParameters};
///
/// let features = AudioFeatures::new(3.0, vec![1.0, 2.0], vec![1.0, 1.0], vec![1.0, 1.0]);
/// let result = generate(&features, &CalibrationParameters::new(100.0, 1.0)).unwrap();
/// assert_eq!(result.actions.len(), 4);
/// assert_eq!(result.warnings.len(), 2);
/// ```
pub fn generate(
    features: &AudioFeatures,
    params: &CalibrationParameters,
) -> MotionResult<GenerateResult> {
    let warnings = validate_for_generate(features, params)
        .into_result()
        .map_err(MotionError::InputInvalid)?;

    for warning in &warnings {
        tracing::warn!(code = %warning.code, "{}", warning.message);
    }

    let actions = generate_unchecked(features, params);
    tracing::debug!(
        beats = features.beat_count(),
        actions = actions.len(),
        policy = %params.overflow_policy,
        "generated actions"
    );

    Ok(GenerateResult { actions, warnings })
}

/// Generates the action sequence, discarding warnings.
pub fn generate_actions(
    features: &AudioFeatures,
    params: &CalibrationParameters,
) -> MotionResult<ActionSequence> {
    generate(features, params).map(|r| r.actions)
}

/// Generates without validating. Callers must have validated `features` and
/// the non-searched parameters already; the calibration loop uses this to
/// avoid re-validating on every objective evaluation.
pub(crate) fn generate_unchecked(
    features: &AudioFeatures,
    params: &CalibrationParameters,
) -> ActionSequence {
    let profile = map_offsets(features, params);
    let actions = sequence_actions(
        &features.beats,
        &profile,
        params.overflow_policy,
        params.start_time,
    );

    debug_assert!(actions.all_in_range(), "policy emitted out-of-range position");
    debug_assert!(actions.is_time_ordered(), "policy emitted out-of-order time");

    actions
}
