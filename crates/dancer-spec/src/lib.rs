//! Dancer Spec Library
//!
//! This crate provides the value types shared by the motion engine and the
//! command-line tool: per-beat audio features, generation parameters,
//! calibration targets, actions, settings, validation, and reports.
//!
//! # Overview
//!
//! An external extractor turns an audio track into [`AudioFeatures`]. The
//! engine (`dancer-backend-motion`) maps those features plus
//! [`CalibrationParameters`] into an [`ActionSequence`] of timestamped
//! positions in [0, 100], and can search for parameters that reach a
//! [`CalibrationTarget`].
//!
//! # Example
//!
//! ```
//! use dancer_spec::{AudioFeatures, CalibrationParameters, OverflowPolicy};
//! use dancer_spec::validation::validate_for_generate;
//!
//! let features = AudioFeatures::new(
//!     4.0,
//!     vec![0.5, 1.0, 1.5],
//!     vec![2.0, 2.4, 2.2],
//!     vec![0.3, 0.9, 0.5],
//! );
//! let params = CalibrationParameters::new(80.0, 1.5).with_policy(OverflowPolicy::Bounce);
//!
//! let result = validate_for_generate(&features, &params);
//! assert!(result.is_ok());
//! ```
//!
//! # Modules
//!
//! - [`action`]: Action and ActionSequence
//! - [`error`]: Error and warning types for validation
//! - [`features`]: AudioFeatures input document
//! - [`hash`]: Canonical hashing of generation inputs
//! - [`params`]: Parameters, policies, objectives, targets
//! - [`report`]: Report types and builder
//! - [`settings`]: User settings and export format
//! - [`validation`]: Validation functions

pub mod action;
pub mod error;
pub mod features;
pub mod hash;
pub mod params;
pub mod report;
pub mod settings;
pub mod validation;

// Re-export commonly used types at the crate root
pub use action::{Action, ActionSequence, POSITION_CENTER, POSITION_MAX, POSITION_MIN};
pub use error::{
    BackendError, ErrorCode, SpecError, ValidationError, ValidationResult, ValidationWarning,
    WarningCode,
};
pub use features::{AudioFeatures, MAX_FEATURE_MAGNITUDE, MAX_TIMESTAMP};
pub use hash::{bytes_hash, canonical_input_hash};
pub use params::{
    CalibrationParameters, CalibrationTarget, ObjectiveKind, OverflowPolicy,
    ENERGY_MULTIPLIER_DOMAIN, PITCH_RANGE_DOMAIN, SHIFT_DOMAIN, TARGET_PERCENTAGE_DOMAIN,
    TARGET_PITCH_DOMAIN, TARGET_SPEED_DOMAIN,
};
pub use report::{
    CalibrationRecord, OutputResult, Report, ReportBuilder, ReportError, ReportWarning,
    REPORT_VERSION,
};
pub use settings::{ExportFormat, Settings};
pub use validation::{
    validate_features, validate_for_calibrate, validate_for_generate, validate_parameters,
    validate_target,
};
