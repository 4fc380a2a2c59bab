//! Report types and builder for generation, calibration, and validation runs.
//!
//! Reports are what `dancer <command> --json` prints: the input hash, the
//! parameters actually used, any calibration outcome, output artifacts, and
//! the validation messages collected along the way.

use crate::error::{ValidationError, ValidationWarning};
use crate::params::CalibrationParameters;
use crate::settings::ExportFormat;
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// Report schema version.
pub const REPORT_VERSION: u32 = 1;

/// A complete report for one command run.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Report {
    /// Report schema version.
    pub report_version: u32,
    /// Hex BLAKE3 hash of the canonical features and parameters.
    pub input_hash: String,
    /// Whether the run succeeded without errors.
    pub ok: bool,
    /// Errors that occurred.
    pub errors: Vec<ReportError>,
    /// Warnings that were generated.
    pub warnings: Vec<ReportWarning>,
    /// Parameters used for generation.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub parameters: Option<CalibrationParameters>,
    /// Calibration outcome, when calibration ran.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub calibration: Option<CalibrationRecord>,
    /// Artifacts written.
    pub outputs: Vec<OutputResult>,
    /// Total execution time in milliseconds.
    pub duration_ms: u64,
    /// Tool identifier and version (e.g., "dancer-cli v0.1.0").
    pub backend_version: String,
}

impl Report {
    /// Creates a new report builder.
    pub fn builder(input_hash: String, backend_version: String) -> ReportBuilder {
        ReportBuilder::new(input_hash, backend_version)
    }

    /// Serializes the report to pretty-printed JSON.
    pub fn to_json_pretty(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string_pretty(self)
    }

    /// Parses a report from JSON.
    pub fn from_json(json: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(json)
    }
}

/// Error entry in a report.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReportError {
    /// Error code (e.g., "E001", "MOTION_001").
    pub code: String,
    /// Human-readable error message.
    pub message: String,
    /// Path to the problematic field.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub path: Option<String>,
}

impl ReportError {
    /// Creates a new report error.
    pub fn new(code: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            code: code.into(),
            message: message.into(),
            path: None,
        }
    }

    /// Converts a ValidationError to a ReportError.
    pub fn from_validation_error(err: &ValidationError) -> Self {
        Self {
            code: err.code.code().to_string(),
            message: err.message.clone(),
            path: err.path.clone(),
        }
    }
}

/// Warning entry in a report.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReportWarning {
    /// Warning code (e.g., "W001").
    pub code: String,
    /// Human-readable warning message.
    pub message: String,
    /// Path to the problematic field.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub path: Option<String>,
}

impl ReportWarning {
    /// Creates a new report warning.
    pub fn new(code: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            code: code.into(),
            message: message.into(),
            path: None,
        }
    }

    /// Converts a ValidationWarning to a ReportWarning.
    pub fn from_validation_warning(warn: &ValidationWarning) -> Self {
        Self {
            code: warn.code.code().to_string(),
            message: warn.message.clone(),
            path: warn.path.clone(),
        }
    }
}

/// Summary of a calibration run.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CalibrationRecord {
    /// Chosen pitch range.
    pub pitch_range: f64,
    /// Chosen energy multiplier.
    pub energy_multiplier: f64,
    /// Residual of the pitch stage objective.
    pub pitch_residual: f64,
    /// Residual of the energy stage objective.
    pub energy_residual: f64,
    /// Objective evaluations across both stages.
    pub evaluations: usize,
    /// Whether both stages met their tolerances.
    pub converged: bool,
}

/// Result entry for a single written artifact.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OutputResult {
    /// File format.
    pub format: ExportFormat,
    /// Path where the artifact was written.
    pub path: PathBuf,
    /// Hex BLAKE3 hash of the written bytes.
    pub hash: String,
    /// Number of actions in the artifact.
    pub action_count: usize,
}

/// Builder for [`Report`].
#[derive(Debug)]
pub struct ReportBuilder {
    input_hash: String,
    backend_version: String,
    ok: bool,
    errors: Vec<ReportError>,
    warnings: Vec<ReportWarning>,
    parameters: Option<CalibrationParameters>,
    calibration: Option<CalibrationRecord>,
    outputs: Vec<OutputResult>,
    duration_ms: u64,
}

impl ReportBuilder {
    /// Creates a new report builder.
    pub fn new(input_hash: String, backend_version: String) -> Self {
        Self {
            input_hash,
            backend_version,
            ok: true,
            errors: Vec::new(),
            warnings: Vec::new(),
            parameters: None,
            calibration: None,
            outputs: Vec::new(),
            duration_ms: 0,
        }
    }

    /// Sets the success flag explicitly.
    pub fn ok(mut self, ok: bool) -> Self {
        self.ok = ok;
        self
    }

    /// Adds an error and clears the success flag.
    pub fn error(mut self, error: ReportError) -> Self {
        self.errors.push(error);
        self.ok = false;
        self
    }

    /// Adds a warning.
    pub fn warning(mut self, warning: ReportWarning) -> Self {
        self.warnings.push(warning);
        self
    }

    /// Records the parameters used.
    pub fn parameters(mut self, parameters: CalibrationParameters) -> Self {
        self.parameters = Some(parameters);
        self
    }

    /// Records a calibration outcome.
    pub fn calibration(mut self, record: CalibrationRecord) -> Self {
        self.calibration = Some(record);
        self
    }

    /// Adds an output artifact.
    pub fn output(mut self, output: OutputResult) -> Self {
        self.outputs.push(output);
        self
    }

    /// Sets the execution time.
    pub fn duration_ms(mut self, duration_ms: u64) -> Self {
        self.duration_ms = duration_ms;
        self
    }

    /// Builds the report.
    pub fn build(self) -> Report {
        Report {
            report_version: REPORT_VERSION,
            input_hash: self.input_hash,
            ok: self.ok,
            errors: self.errors,
            warnings: self.warnings,
            parameters: self.parameters,
            calibration: self.calibration,
            outputs: self.outputs,
            duration_ms: self.duration_ms,
            backend_version: self.backend_version,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::{ErrorCode, WarningCode};
    use pretty_assertions::assert_eq;

    #[test]
    fn test_builder_defaults() {
        let report = Report::builder("abc".into(), "dancer-cli v0.1.0".into()).build();
        assert!(report.ok);
        assert_eq!(report.report_version, REPORT_VERSION);
        assert!(report.outputs.is_empty());
    }

    #[test]
    fn test_error_clears_ok() {
        let err = ValidationError::new(ErrorCode::TooFewBeats, "one beat");
        let report = Report::builder("abc".into(), "v".into())
            .error(ReportError::from_validation_error(&err))
            .build();
        assert!(!report.ok);
        assert_eq!(report.errors[0].code, "E001");
    }

    #[test]
    fn test_json_roundtrip() {
        let warn = ValidationWarning::with_path(WarningCode::DegeneratePitch, "flat", "pitch");
        let report = Report::builder("abc".into(), "v".into())
            .warning(ReportWarning::from_validation_warning(&warn))
            .parameters(CalibrationParameters::default())
            .calibration(CalibrationRecord {
                pitch_range: 40.0,
                energy_multiplier: 12.5,
                pitch_residual: 0.0,
                energy_residual: 0.01,
                evaluations: 57,
                converged: true,
            })
            .output(OutputResult {
                format: ExportFormat::Csv,
                path: PathBuf::from("out.csv"),
                hash: "f00".into(),
                action_count: 8,
            })
            .duration_ms(12)
            .build();

        let json = report.to_json_pretty().unwrap();
        assert_eq!(Report::from_json(&json).unwrap(), report);
    }
}
