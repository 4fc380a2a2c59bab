//! CLI argument definitions for the Dancer command-line interface.
//!
//! All `#[derive(Parser)]`, `#[derive(Subcommand)]` and `#[derive(Args)]`
//! types are defined here, keeping `main.rs` focused on dispatch logic.

use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};
use dancer_spec::{CalibrationParameters, CalibrationTarget, ObjectiveKind, OverflowPolicy};

/// Dancer - Beat-Synchronized Motion Script Generator
#[derive(Parser)]
#[command(name = "dancer")]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true)]
pub struct Cli {
    /// Enable debug logging on stderr (overridden by RUST_LOG)
    #[arg(short, long, global = true)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Generate a motion script from a features file
    Generate {
        #[command(flatten)]
        input: InputArgs,

        #[command(flatten)]
        params: ParamArgs,

        #[command(flatten)]
        target: TargetArgs,

        /// Output path (default: features path with the format's extension)
        #[arg(short, long)]
        out: Option<PathBuf>,

        /// Write `time_ms,position` CSV instead of a JSON script
        #[arg(long)]
        csv: bool,

        /// Calibrate pitch range and energy multiplier before generating
        #[arg(long)]
        automap: bool,

        /// Overwrite an existing output file
        #[arg(short, long)]
        yes: bool,

        /// Output a machine-readable JSON report (no colored output)
        #[arg(long)]
        json: bool,
    },

    /// Search for the pitch range and energy multiplier that hit a target
    Calibrate {
        #[command(flatten)]
        input: InputArgs,

        #[command(flatten)]
        params: ParamArgs,

        #[command(flatten)]
        target: TargetArgs,

        /// Store the calibrated parameters in the settings file
        #[arg(long)]
        save: bool,

        /// Output a machine-readable JSON report (no colored output)
        #[arg(long)]
        json: bool,
    },

    /// Generate in memory and print motion statistics
    Analyze {
        #[command(flatten)]
        input: InputArgs,

        #[command(flatten)]
        params: ParamArgs,

        /// Speed threshold in units/s for the fraction-above statistic
        /// (default: the calibration target speed)
        #[arg(long)]
        threshold: Option<f64>,

        /// Output machine-readable JSON (no colored output)
        #[arg(long)]
        json: bool,
    },

    /// Validate a features file and the effective settings
    Validate {
        #[command(flatten)]
        input: InputArgs,

        #[command(flatten)]
        params: ParamArgs,

        /// Output a machine-readable JSON report (no colored output)
        #[arg(long)]
        json: bool,
    },
}

/// Where the inputs come from.
#[derive(Args, Debug, Clone)]
pub struct InputArgs {
    /// Path to the features JSON file
    #[arg(short, long)]
    pub features: PathBuf,

    /// Settings file (default: <config dir>/dancer/settings.json if present)
    #[arg(long)]
    pub config: Option<PathBuf>,
}

/// Generation parameter overrides.
#[derive(Args, Debug, Clone, Default)]
pub struct ParamArgs {
    /// Pitch range mapped onto the stroke range
    #[arg(long, allow_negative_numbers = true)]
    pub pitch: Option<f64>,

    /// Energy multiplier for stroke amplitude
    #[arg(long)]
    pub energy: Option<f64>,

    /// Overflow policy: clamp, bounce or fold (or 0, 1, 2)
    #[arg(long)]
    pub overflow: Option<OverflowPolicy>,

    /// Shift stroke centers by energy
    #[arg(long, allow_negative_numbers = true)]
    pub amplitude_centering: Option<f64>,

    /// Constant shift of every stroke center
    #[arg(long, allow_negative_numbers = true)]
    pub center_offset: Option<f64>,

    /// Time the first up-stroke starts from, in seconds
    #[arg(long)]
    pub start_time: Option<f64>,
}

impl ParamArgs {
    /// Applies the overrides given on the command line.
    pub fn apply(&self, params: &mut CalibrationParameters) {
        if let Some(v) = self.pitch {
            params.pitch_range = v;
        }
        if let Some(v) = self.energy {
            params.energy_multiplier = v;
        }
        if let Some(v) = self.overflow {
            params.overflow_policy = v;
        }
        if let Some(v) = self.amplitude_centering {
            params.amplitude_centering = v;
        }
        if let Some(v) = self.center_offset {
            params.center_offset = v;
        }
        if let Some(v) = self.start_time {
            params.start_time = v;
        }
    }
}

/// Calibration target overrides.
#[derive(Args, Debug, Clone, Default)]
pub struct TargetArgs {
    /// Target mean stroke center (0-100)
    #[arg(long)]
    pub auto_pitch: Option<f64>,

    /// Target speed in units/s (0-400)
    #[arg(long)]
    pub auto_speed: Option<f64>,

    /// Target percentage (0-100) for percentage-above and mean-travel
    #[arg(long)]
    pub auto_per: Option<f64>,

    /// Energy objective: mean-speed, percentage-above or mean-travel (or 1, 2, 3)
    #[arg(long)]
    pub auto_mode: Option<ObjectiveKind>,
}

impl TargetArgs {
    /// Applies the overrides given on the command line.
    ///
    /// `--auto-per` is given in percent and stored as a fraction.
    pub fn apply(&self, target: &mut CalibrationTarget) {
        if let Some(v) = self.auto_pitch {
            target.target_pitch_center = v;
        }
        if let Some(v) = self.auto_speed {
            target.target_speed = v;
        }
        if let Some(v) = self.auto_per {
            target.target_percentage = v / 100.0;
        }
        if let Some(v) = self.auto_mode {
            target.objective_kind = v;
        }
    }
}
