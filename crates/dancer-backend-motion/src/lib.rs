//! Dancer Motion Backend - Beat-Synchronized Action Generation
//!
//! This crate turns per-beat audio features into a sequence of timed stroke
//! positions and searches for generation parameters that hit a requested
//! motion character.
//!
//! # Pipeline
//!
//! 1. Pitch and energy are min-max normalized ([`normalize`]).
//! 2. Each beat gets a stroke center and amplitude ([`offsets`]).
//! 3. Every beat emits an up-stroke at the half-beat and a down-stroke on the
//!    beat ([`sequencer`]); candidates outside [0, 100] are resolved by an
//!    overflow policy ([`policy`]).
//! 4. Optionally, [`calibrate`] picks the pitch range and energy multiplier.
//! 5. [`export`] writes CSV or JSON scripts.
//!
//! # Determinism
//!
//! Generation and calibration are pure functions of their inputs. The same
//! features and parameters always yield the same actions and byte-identical
//! exports.
//!
//! # Example
//!
//! ```
//! use dancer_backend_motion::{generate, render};
//! use dancer_spec::{AudioFeatures, CalibrationParameters, ExportFormat};
//!
//! let features = AudioFeatures::new(3.0, vec![1.0, 2.0], vec![1.0, 2.0], vec![1.0, 2.0]);
//! let result = generate(&features, &CalibrationParameters::default()).unwrap();
//! let export = render(&result.actions, ExportFormat::Csv).unwrap();
//! assert_eq!(export.extension, "csv");
//! ```

pub mod calibrate;
pub mod error;
pub mod export;
pub mod generate;
pub mod minimize;
pub mod normalize;
pub mod offsets;
pub mod policy;
pub mod sequencer;
pub mod stats;

// Re-export main types
pub use calibrate::{calibrate, calibrate_with, CalibrationResult};
pub use error::{MotionError, MotionResult};
pub use export::{render, to_csv_string, write_csv, ExportResult, Funscript};
pub use generate::{generate, generate_actions, GenerateResult};
pub use minimize::{minimize_bounded, MinimizeConfig, MinimizeReport};
pub use stats::MotionSummary;

/// Crate version for backend identification.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Backend identifier recorded in reports.
pub const BACKEND_ID: &str = "dancer-backend-motion";
