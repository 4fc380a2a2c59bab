//! Per-beat audio features supplied by an external extractor.
//!
//! Beat tracking, RMS energy and pitch tracking are not performed here. An
//! extractor writes one JSON document per track:
//!
//! ```json
//! {
//!   "duration": 182.4,
//!   "beats": [0.52, 1.04, 1.57],
//!   "pitch": [2.91, 3.02, 2.87],
//!   "energy": [4.1, 6.3, 5.0]
//! }
//! ```

use serde::{Deserialize, Serialize};

use crate::error::SpecError;

/// Largest accepted timestamp or duration, in seconds.
pub const MAX_TIMESTAMP: f64 = 1e9;

/// Largest accepted absolute pitch or energy value.
pub const MAX_FEATURE_MAGNITUDE: f64 = 1e100;

/// Precomputed features for one track, consumed read-only by the engine.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AudioFeatures {
    /// Total track length in seconds.
    pub duration: f64,
    /// Beat timestamps in seconds, strictly increasing.
    pub beats: Vec<f64>,
    /// Log-scale pitch energy per beat segment.
    pub pitch: Vec<f64>,
    /// RMS energy per beat segment.
    pub energy: Vec<f64>,
}

impl AudioFeatures {
    /// Creates a feature set from its parts. No validation is performed.
    pub fn new(duration: f64, beats: Vec<f64>, pitch: Vec<f64>, energy: Vec<f64>) -> Self {
        Self {
            duration,
            beats,
            pitch,
            energy,
        }
    }

    /// Number of beats.
    pub fn beat_count(&self) -> usize {
        self.beats.len()
    }

    /// Parses features from a JSON string.
    pub fn from_json(json: &str) -> Result<Self, SpecError> {
        Ok(serde_json::from_str(json)?)
    }

    /// Serializes features to pretty-printed JSON.
    pub fn to_json_pretty(&self) -> Result<String, SpecError> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    /// Converts to a JSON value (used for hashing).
    pub fn to_value(&self) -> Result<serde_json::Value, SpecError> {
        Ok(serde_json::to_value(self)?)
    }
}
