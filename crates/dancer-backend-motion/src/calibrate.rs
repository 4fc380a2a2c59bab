//! Two-stage automatic calibration.
//!
//! Stage one searches the pitch range with the energy multiplier held at zero,
//! so every stroke sits on its center and the mean position depends on pitch
//! alone. Stage two keeps that pitch range and searches the energy multiplier
//! against the selected speed or travel objective. Each stage regenerates the
//! full action sequence per evaluation; the features are validated once up
//! front and only borrowed afterwards.
//!
//! The search always runs under [`OverflowPolicy::Clamp`]. The caller's policy
//! is kept in the parameters returned by [`CalibrationResult::apply_to`] and
//! only affects the final generation.

use dancer_spec::{
    validate_for_calibrate, ActionSequence, AudioFeatures, CalibrationParameters,
    CalibrationRecord, CalibrationTarget, ObjectiveKind, OverflowPolicy,
};
use serde::{Deserialize, Serialize};

use crate::error::{MotionError, MotionResult};
use crate::generate::generate_unchecked;
use crate::minimize::{minimize_bounded, MinimizeConfig, MinimizeReport};
use crate::stats::{fraction_above, mean_normalized_speed, mean_travel, MAX_SPEED};

/// Starting pitch range for stage one.
pub const PITCH_START: f64 = 100.0;
/// Search bounds for the pitch range.
pub const PITCH_BOUNDS: (f64, f64) = (-200.0, 200.0);
/// Starting energy multiplier for stage two.
pub const ENERGY_START: f64 = 10.0;
/// Search bounds for the energy multiplier.
pub const ENERGY_BOUNDS: (f64, f64) = (0.0, 100.0);

/// Calibrated parameters plus the minimizer report of each stage.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct CalibrationResult {
    /// Pitch range chosen by stage one.
    pub pitch_range: f64,
    /// Energy multiplier chosen by stage two.
    pub energy_multiplier: f64,
    /// Stage one report.
    pub pitch_stage: MinimizeReport,
    /// Stage two report.
    pub energy_stage: MinimizeReport,
}

impl CalibrationResult {
    /// Whether both stages met their tolerances.
    pub fn converged(&self) -> bool {
        self.pitch_stage.converged && self.energy_stage.converged
    }

    /// `base` with the calibrated pitch range and energy multiplier.
    pub fn apply_to(&self, base: &CalibrationParameters) -> CalibrationParameters {
        CalibrationParameters {
            pitch_range: self.pitch_range,
            energy_multiplier: self.energy_multiplier,
            ..*base
        }
    }

    /// Report record for this result.
    pub fn to_record(&self) -> CalibrationRecord {
        CalibrationRecord {
            pitch_range: self.pitch_range,
            energy_multiplier: self.energy_multiplier,
            pitch_residual: self.pitch_stage.value,
            energy_residual: self.energy_stage.value,
            evaluations: self.pitch_stage.evaluations + self.energy_stage.evaluations,
            converged: self.converged(),
        }
    }
}

/// Stage one objective: distance of the mean position from the target center.
pub fn mean_position_objective(actions: &ActionSequence, target_pitch_center: f64) -> f64 {
    (actions.mean_position().unwrap_or(0.0) - target_pitch_center).abs()
}

/// Stage two objective for `kind`.
pub fn energy_objective(actions: &ActionSequence, target: &CalibrationTarget) -> f64 {
    match target.objective_kind {
        ObjectiveKind::MeanSpeed => {
            (mean_normalized_speed(actions) - target.target_speed / MAX_SPEED).abs()
        }
        ObjectiveKind::PercentageAbove => {
            (fraction_above(actions, target.target_speed) - target.target_percentage).abs()
        }
        ObjectiveKind::MeanTravel => (mean_travel(actions) - target.target_percentage).abs(),
    }
}

/// Calibrates with the default minimizer configuration.
///
/// # Example
/// ```
/// use dancer_backend_motion::calibrate::calibrate;
/// use dancer_spec::{AudioFeatures, CalibrationParameters, CalibrationTarget};
///
/// let features = AudioFeatures::new(
///     5.0,
///     vec![1.0, 2.0, 3.0, 4.0],
///     vec![0.0, 0.0, 0.0, 1.0],
///     vec![1.0, 2.0, 1.0, 2.0],
/// );
/// let target = CalibrationTarget { target_pitch_center: 40.0, ..CalibrationTarget::default() };
/// let result = calibrate(&features, &CalibrationParameters::default(), &target).unwrap();
/// assert!((result.pitch_range - 40.0).abs() < 1e-3);
/// ```
pub fn calibrate(
    features: &AudioFeatures,
    base: &CalibrationParameters,
    target: &CalibrationTarget,
) -> MotionResult<CalibrationResult> {
    calibrate_with(features, base, target, &MinimizeConfig::default())
}

/// Calibrates with an explicit minimizer configuration.
pub fn calibrate_with(
    features: &AudioFeatures,
    base: &CalibrationParameters,
    target: &CalibrationTarget,
    config: &MinimizeConfig,
) -> MotionResult<CalibrationResult> {
    if config.max_iter == 0 || config.max_evals == 0 {
        return Err(MotionError::invalid_param(
            "max_iter",
            "minimizer budget must allow at least one iteration",
        ));
    }

    let warnings = validate_for_calibrate(features, base, target)
        .into_result()
        .map_err(MotionError::InputInvalid)?;
    for warning in &warnings {
        tracing::warn!(code = %warning.code, "{}", warning.message);
    }

    let pitch_stage = minimize_bounded(
        |pitch_range| {
            let params = CalibrationParameters {
                pitch_range,
                energy_multiplier: 0.0,
                overflow_policy: OverflowPolicy::Clamp,
                ..*base
            };
            mean_position_objective(
                &generate_unchecked(features, &params),
                target.target_pitch_center,
            )
        },
        PITCH_START,
        PITCH_BOUNDS,
        config,
    );
    log_stage("pitch", &pitch_stage);

    let energy_stage = minimize_bounded(
        |energy_multiplier| {
            let params = CalibrationParameters {
                pitch_range: pitch_stage.x,
                energy_multiplier,
                overflow_policy: OverflowPolicy::Clamp,
                ..*base
            };
            energy_objective(&generate_unchecked(features, &params), target)
        },
        ENERGY_START,
        ENERGY_BOUNDS,
        config,
    );
    log_stage(target.objective_kind.as_str(), &energy_stage);

    Ok(CalibrationResult {
        pitch_range: pitch_stage.x,
        energy_multiplier: energy_stage.x,
        pitch_stage,
        energy_stage,
    })
}

fn log_stage(stage: &str, report: &MinimizeReport) {
    tracing::debug!(
        stage,
        x = report.x,
        residual = report.value,
        iterations = report.iterations,
        evaluations = report.evaluations,
        "calibration stage finished"
    );
    if !report.converged {
        tracing::warn!(
            stage,
            x = report.x,
            residual = report.value,
            "calibration stage did not converge; using best point found"
        );
    }
}
