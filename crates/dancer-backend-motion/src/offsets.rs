//! Per-beat stroke center and amplitude derived from pitch and energy.

use dancer_spec::{AudioFeatures, CalibrationParameters, POSITION_MAX};

use crate::normalize::normalize;

/// Stroke amplitude for a normalized energy of 1 and a multiplier of 1.
pub const AMPLITUDE_SCALE: f64 = 50.0;

/// Derived per-beat motion inputs.
///
/// Built fresh from the features on every call; the features themselves are
/// never written to.
#[derive(Debug, Clone, PartialEq)]
pub struct MotionProfile {
    /// Stroke center per beat.
    pub offsets: Vec<f64>,
    /// Stroke half-height per beat, applied above and below the center.
    pub amplitudes: Vec<f64>,
}

impl MotionProfile {
    /// Number of beats covered.
    pub fn len(&self) -> usize {
        self.offsets.len()
    }

    /// Whether the profile covers no beats.
    pub fn is_empty(&self) -> bool {
        self.offsets.is_empty()
    }
}

/// Maps normalized pitch and energy to stroke centers and amplitudes.
///
/// ```text
/// offset[i]    = np[i] * pitch_range + (100 - pitch_range) / 2
///                + amplitude_centering * ne[i] + center_offset
/// amplitude[i] = ne[i] * energy_multiplier * 50
/// ```
///
/// # Example
/// ```
/// use dancer_backend_motion::offsets::map_offsets;
/// use dancer_spec::{AudioFeatures, CalibrationParameters};
///
/// let features = AudioFeatures::new(3.0, vec![1.0, 2.0], vec![1.0, 3.0], vec![0.0, 2.0]);
/// let profile = map_offsets(&features, &CalibrationParameters::new(100.0, 1.0));
/// assert_eq!(profile.offsets, vec![0.0, 100.0]);
/// assert_eq!(profile.amplitudes, vec![0.0, 50.0]);
/// ```
pub fn map_offsets(features: &AudioFeatures, params: &CalibrationParameters) -> MotionProfile {
    let pitch = normalize(&features.pitch);
    let energy = normalize(&features.energy);
    let base = (POSITION_MAX - params.pitch_range) / 2.0;

    let offsets = pitch
        .iter()
        .zip(&energy)
        .map(|(p, e)| {
            p * params.pitch_range
                + base
                + params.amplitude_centering * e
                + params.center_offset
        })
        .collect();

    let amplitudes = energy
        .iter()
        .map(|e| e * params.energy_multiplier * AMPLITUDE_SCALE)
        .collect();

    MotionProfile {
        offsets,
        amplitudes,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn features() -> AudioFeatures {
        AudioFeatures::new(
            5.0,
            vec![1.0, 2.0, 3.0],
            vec![0.0, 0.5, 1.0],
            vec![2.0, 4.0, 6.0],
        )
    }

    #[test]
    fn test_pitch_range_spreads_around_center() {
        let profile = map_offsets(&features(), &CalibrationParameters::new(40.0, 0.0));
        assert_eq!(profile.offsets, vec![30.0, 50.0, 70.0]);
        assert_eq!(profile.amplitudes, vec![0.0, 0.0, 0.0]);
    }

    #[test]
    fn test_negative_pitch_range_inverts() {
        let profile = map_offsets(&features(), &CalibrationParameters::new(-40.0, 0.0));
        assert_eq!(profile.offsets, vec![70.0, 50.0, 30.0]);
    }

    #[test]
    fn test_energy_multiplier_scales_amplitude() {
        let profile = map_offsets(&features(), &CalibrationParameters::new(0.0, 2.0));
        assert_eq!(profile.amplitudes, vec![0.0, 50.0, 100.0]);
        assert_eq!(profile.offsets, vec![50.0, 50.0, 50.0]);
    }

    #[test]
    fn test_centering_and_offset_terms() {
        let params = CalibrationParameters::new(0.0, 0.0)
            .with_amplitude_centering(-20.0)
            .with_center_offset(5.0);
        let profile = map_offsets(&features(), &params);
        assert_eq!(profile.offsets, vec![55.0, 45.0, 35.0]);
    }

    #[test]
    fn test_features_not_mutated() {
        let features = features();
        let before = features.clone();
        let _ = map_offsets(&features, &CalibrationParameters::default());
        assert_eq!(features, before);
    }

    #[test]
    fn test_flat_features_sit_at_center() {
        let features = AudioFeatures::new(3.0, vec![1.0, 2.0], vec![1.0, 1.0], vec![1.0, 1.0]);
        let profile = map_offsets(&features, &CalibrationParameters::new(100.0, 1.0));
        assert_eq!(profile.offsets, vec![50.0, 50.0]);
        assert_eq!(profile.amplitudes, vec![25.0, 25.0]);
        assert_eq!(profile.len(), 2);
    }
}
