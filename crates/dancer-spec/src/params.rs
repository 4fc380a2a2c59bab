//! Generation parameters, overflow policies, and calibration targets.

use serde::{Deserialize, Serialize};
use std::ops::RangeInclusive;
use std::str::FromStr;

use crate::error::SpecError;

/// Domain of `pitch_range`.
pub const PITCH_RANGE_DOMAIN: RangeInclusive<f64> = -200.0..=200.0;
/// Domain of `energy_multiplier`.
pub const ENERGY_MULTIPLIER_DOMAIN: RangeInclusive<f64> = 0.0..=100.0;
/// Domain of `amplitude_centering` and `center_offset`.
pub const SHIFT_DOMAIN: RangeInclusive<f64> = -100.0..=100.0;
/// Domain of `target_pitch_center`.
pub const TARGET_PITCH_DOMAIN: RangeInclusive<f64> = 0.0..=100.0;
/// Domain of `target_speed` in position units per second.
pub const TARGET_SPEED_DOMAIN: RangeInclusive<f64> = 0.0..=400.0;
/// Domain of `target_percentage` (a fraction).
pub const TARGET_PERCENTAGE_DOMAIN: RangeInclusive<f64> = 0.0..=1.0;

/// Strategy for a candidate position outside [0, 100].
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum OverflowPolicy {
    /// Clamp into range (lossy).
    #[default]
    Clamp,
    /// Reflect off the 0 and 100 walls.
    Bounce,
    /// Fold the travel distance in half around the previous position.
    Fold,
}

impl OverflowPolicy {
    /// All policies, in index order.
    pub const ALL: [OverflowPolicy; 3] = [
        OverflowPolicy::Clamp,
        OverflowPolicy::Bounce,
        OverflowPolicy::Fold,
    ];

    /// Returns the policy for an integer code (0 clamp, 1 bounce, 2 fold).
    pub fn from_index(index: u8) -> Option<Self> {
        Self::ALL.get(index as usize).copied()
    }

    /// Integer code of this policy.
    pub fn index(&self) -> u8 {
        match self {
            OverflowPolicy::Clamp => 0,
            OverflowPolicy::Bounce => 1,
            OverflowPolicy::Fold => 2,
        }
    }

    /// Returns the string name used in settings and on the command line.
    pub fn as_str(&self) -> &'static str {
        match self {
            OverflowPolicy::Clamp => "clamp",
            OverflowPolicy::Bounce => "bounce",
            OverflowPolicy::Fold => "fold",
        }
    }
}

impl std::fmt::Display for OverflowPolicy {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for OverflowPolicy {
    type Err = SpecError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let trimmed = s.trim();
        if let Ok(index) = trimmed.parse::<u8>() {
            if let Some(policy) = Self::from_index(index) {
                return Ok(policy);
            }
        }
        match trimmed.to_ascii_lowercase().as_str() {
            "clamp" => Ok(OverflowPolicy::Clamp),
            "bounce" => Ok(OverflowPolicy::Bounce),
            "fold" => Ok(OverflowPolicy::Fold),
            _ => Err(SpecError::UnknownName {
                kind: "overflow policy",
                value: s.to_string(),
                expected: "clamp, bounce, fold",
            }),
        }
    }
}

/// Objective minimized by the second calibration stage.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum ObjectiveKind {
    /// Mean transition speed against `target_speed`.
    MeanSpeed,
    /// Fraction of transitions faster than `target_speed` against `target_percentage`.
    #[default]
    PercentageAbove,
    /// Mean normalized travel per transition against `target_percentage`.
    MeanTravel,
}

impl ObjectiveKind {
    /// All objectives, in code order.
    pub const ALL: [ObjectiveKind; 3] = [
        ObjectiveKind::MeanSpeed,
        ObjectiveKind::PercentageAbove,
        ObjectiveKind::MeanTravel,
    ];

    /// Returns the objective for a 1-based code (1 mean speed, 2 percentage, 3 travel).
    pub fn from_code(code: u8) -> Option<Self> {
        match code {
            1..=3 => Some(Self::ALL[(code - 1) as usize]),
            _ => None,
        }
    }

    /// Returns the string name used in settings and on the command line.
    pub fn as_str(&self) -> &'static str {
        match self {
            ObjectiveKind::MeanSpeed => "mean-speed",
            ObjectiveKind::PercentageAbove => "percentage-above",
            ObjectiveKind::MeanTravel => "mean-travel",
        }
    }
}

impl std::fmt::Display for ObjectiveKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for ObjectiveKind {
    type Err = SpecError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let trimmed = s.trim();
        if let Ok(code) = trimmed.parse::<u8>() {
            if let Some(kind) = Self::from_code(code) {
                return Ok(kind);
            }
        }
        match trimmed.to_ascii_lowercase().replace('_', "-").as_str() {
            "mean-speed" => Ok(ObjectiveKind::MeanSpeed),
            "percentage-above" => Ok(ObjectiveKind::PercentageAbove),
            "mean-travel" => Ok(ObjectiveKind::MeanTravel),
            _ => Err(SpecError::UnknownName {
                kind: "objective",
                value: s.to_string(),
                expected: "mean-speed, percentage-above, mean-travel",
            }),
        }
    }
}

/// Free inputs to action generation.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CalibrationParameters {
    /// How much pitch variation moves the stroke center.
    pub pitch_range: f64,
    /// Stroke amplitude scale.
    pub energy_multiplier: f64,
    /// What to do with positions outside [0, 100].
    pub overflow_policy: OverflowPolicy,
    /// Loudness-driven skew of the stroke center.
    pub amplitude_centering: f64,
    /// Constant shift of the stroke center.
    pub center_offset: f64,
    /// Time of the implicit first action, in seconds.
    pub start_time: f64,
}

impl Default for CalibrationParameters {
    fn default() -> Self {
        Self {
            pitch_range: 100.0,
            energy_multiplier: 10.0,
            overflow_policy: OverflowPolicy::Clamp,
            amplitude_centering: 0.0,
            center_offset: 0.0,
            start_time: 0.0,
        }
    }
}

impl CalibrationParameters {
    /// Creates parameters with the given range and multiplier, defaults elsewhere.
    pub fn new(pitch_range: f64, energy_multiplier: f64) -> Self {
        Self {
            pitch_range,
            energy_multiplier,
            ..Self::default()
        }
    }

    /// Sets the overflow policy.
    pub fn with_policy(mut self, policy: OverflowPolicy) -> Self {
        self.overflow_policy = policy;
        self
    }

    /// Sets the amplitude centering term.
    pub fn with_amplitude_centering(mut self, value: f64) -> Self {
        self.amplitude_centering = value;
        self
    }

    /// Sets the constant center offset.
    pub fn with_center_offset(mut self, value: f64) -> Self {
        self.center_offset = value;
        self
    }

    /// Sets the start time.
    pub fn with_start_time(mut self, value: f64) -> Self {
        self.start_time = value;
        self
    }
}

/// Descriptive statistics the calibration engine tries to reach.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CalibrationTarget {
    /// Desired mean position when amplitude is zero.
    pub target_pitch_center: f64,
    /// Desired characteristic speed in position units per second.
    pub target_speed: f64,
    /// Desired fraction in [0, 1].
    pub target_percentage: f64,
    /// Objective used for the energy multiplier stage.
    pub objective_kind: ObjectiveKind,
}

impl Default for CalibrationTarget {
    fn default() -> Self {
        Self {
            target_pitch_center: 20.0,
            target_speed: 250.0,
            target_percentage: 0.65,
            objective_kind: ObjectiveKind::PercentageAbove,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_policy_index_roundtrip() {
        for policy in OverflowPolicy::ALL {
            assert_eq!(OverflowPolicy::from_index(policy.index()), Some(policy));
        }
        assert_eq!(OverflowPolicy::from_index(3), None);
    }

    #[test]
    fn test_policy_from_str() {
        assert_eq!("bounce".parse::<OverflowPolicy>().unwrap(), OverflowPolicy::Bounce);
        assert_eq!("FOLD".parse::<OverflowPolicy>().unwrap(), OverflowPolicy::Fold);
        assert_eq!("0".parse::<OverflowPolicy>().unwrap(), OverflowPolicy::Clamp);
        assert!("wrap".parse::<OverflowPolicy>().is_err());
        assert!("7".parse::<OverflowPolicy>().is_err());
    }

    #[test]
    fn test_objective_from_str() {
        assert_eq!(
            "mean_travel".parse::<ObjectiveKind>().unwrap(),
            ObjectiveKind::MeanTravel
        );
        assert_eq!("1".parse::<ObjectiveKind>().unwrap(), ObjectiveKind::MeanSpeed);
        assert!("0".parse::<ObjectiveKind>().is_err());
        assert!("median".parse::<ObjectiveKind>().is_err());
    }

    #[test]
    fn test_serde_names() {
        let json = serde_json::to_string(&ObjectiveKind::PercentageAbove).unwrap();
        assert_eq!(json, "\"percentage-above\"");
        let json = serde_json::to_string(&OverflowPolicy::Bounce).unwrap();
        assert_eq!(json, "\"bounce\"");
    }

    #[test]
    fn test_parameters_partial_json() {
        let params: CalibrationParameters =
            serde_json::from_str(r#"{"pitch_range": 40, "overflow_policy": "fold"}"#).unwrap();
        assert_eq!(params.pitch_range, 40.0);
        assert_eq!(params.energy_multiplier, 10.0);
        assert_eq!(params.overflow_policy, OverflowPolicy::Fold);
    }

    #[test]
    fn test_target_defaults() {
        let target = CalibrationTarget::default();
        assert_eq!(target.target_pitch_center, 20.0);
        assert_eq!(target.target_speed, 250.0);
        assert_eq!(target.objective_kind, ObjectiveKind::PercentageAbove);
    }
}
