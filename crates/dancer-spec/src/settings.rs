//! User settings: the loaded configuration struct handed to the engine.
//!
//! Settings are plain data. They are read once from a JSON file, overridden
//! by command-line flags, and passed down explicitly; nothing in the engine
//! reads them from global state. Every field has a default, so a settings file
//! only needs the keys it changes:
//!
//! ```json
//! {
//!   "parameters": { "pitch_range": 60, "overflow_policy": "bounce" },
//!   "target": { "target_speed": 300, "objective_kind": "mean-speed" },
//!   "format": "csv"
//! }
//! ```

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use std::str::FromStr;

use crate::error::{SpecError, ValidationResult};
use crate::params::{CalibrationParameters, CalibrationTarget};
use crate::validation::{validate_parameters, validate_target};

/// File name of the settings document inside the config directory.
pub const SETTINGS_FILE_NAME: &str = "settings.json";

/// Persisted script format.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ExportFormat {
    /// JSON script format.
    #[default]
    Funscript,
    /// `time_ms,position` lines.
    Csv,
}

impl ExportFormat {
    /// Returns the file extension for this format.
    pub fn extension(&self) -> &'static str {
        match self {
            ExportFormat::Funscript => "funscript",
            ExportFormat::Csv => "csv",
        }
    }
}

impl std::fmt::Display for ExportFormat {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.extension())
    }
}

impl FromStr for ExportFormat {
    type Err = SpecError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "funscript" | "json" => Ok(ExportFormat::Funscript),
            "csv" => Ok(ExportFormat::Csv),
            _ => Err(SpecError::UnknownName {
                kind: "export format",
                value: s.to_string(),
                expected: "funscript, csv",
            }),
        }
    }
}

/// All user-tunable options.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    /// Generation parameters.
    pub parameters: CalibrationParameters,
    /// Calibration targets.
    pub target: CalibrationTarget,
    /// Output format.
    pub format: ExportFormat,
}

impl Settings {
    /// Parses settings from JSON.
    pub fn from_json(json: &str) -> Result<Self, SpecError> {
        Ok(serde_json::from_str(json)?)
    }

    /// Serializes settings to pretty-printed JSON.
    pub fn to_json_pretty(&self) -> Result<String, SpecError> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    /// Loads settings from a file.
    pub fn load(path: &Path) -> Result<Self, SpecError> {
        let content = std::fs::read_to_string(path)?;
        Self::from_json(&content)
    }

    /// Loads settings from a file if it exists, defaults otherwise.
    pub fn load_or_default(path: &Path) -> Result<Self, SpecError> {
        if path.exists() {
            Self::load(path)
        } else {
            Ok(Self::default())
        }
    }

    /// Writes settings to a file, creating parent directories.
    pub fn save(&self, path: &Path) -> Result<(), SpecError> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        std::fs::write(path, self.to_json_pretty()?)?;
        Ok(())
    }

    /// Default settings path under a config directory.
    pub fn path_in(config_dir: &Path) -> PathBuf {
        config_dir.join("dancer").join(SETTINGS_FILE_NAME)
    }

    /// Checks every option against its domain.
    pub fn validate(&self) -> ValidationResult {
        let mut result = validate_parameters(&self.parameters, None);
        result.merge(validate_target(&self.target));
        result
    }
}
