//! Analyze command implementation
//!
//! Generates in memory and prints motion statistics plus a coarse intensity
//! strip. Nothing is written to disk.

use std::process::ExitCode;
use std::time::Instant;

use anyhow::{Context, Result};
use colored::Colorize;
use dancer_backend_motion::generate;
use dancer_backend_motion::stats::{intensity_profile, MotionSummary};
use dancer_spec::{
    validate_for_generate, AudioFeatures, CalibrationParameters, Report, ReportBuilder,
    ValidationResult,
};
use serde::Serialize;

use super::reporting;
use super::{backend_version, prepare};
use crate::cli_args::{InputArgs, ParamArgs};

/// Width of the printed intensity strip in cells.
pub const STRIP_WIDTH: usize = 60;

const SHADES: [char; 5] = [' ', '░', '▒', '▓', '█'];

#[derive(Debug, Serialize)]
struct AnalyzeOutput<'a> {
    features: String,
    parameters: dancer_spec::CalibrationParameters,
    summary: &'a MotionSummary,
    intensity: Vec<f64>,
}

/// Run the analyze command
///
/// # Returns
/// Exit code: 0 on success, 1 if the inputs are invalid
pub fn run(
    input: &InputArgs,
    params: &ParamArgs,
    threshold: Option<f64>,
    json: bool,
) -> Result<ExitCode> {
    let start = Instant::now();
    let prepared = prepare(input, params, None)?;
    let threshold = threshold.unwrap_or(prepared.target.target_speed);

    let validation = validate_for_generate(&prepared.features, &prepared.params);
    if !validation.is_ok() {
        let duration_ms = start.elapsed().as_millis() as u64;
        if json {
            let report = invalid_input_report(
                &prepared.features,
                &prepared.params,
                &prepared.source_hash,
                &validation,
                duration_ms,
            );
            reporting::print_report_json(&report)?;
        } else {
            reporting::print_errors(&validation.errors);
            println!(
                "\n{} Input has {} error(s) ({}ms)",
                "FAILED".red().bold(),
                validation.errors.len(),
                duration_ms
            );
        }
        return Ok(ExitCode::from(1));
    }

    let generated =
        generate(&prepared.features, &prepared.params).context("Generation failed")?;

    let summary = MotionSummary::compute(&generated.actions, threshold);
    let intensity = intensity_profile(&generated.actions);

    if json {
        let output = AnalyzeOutput {
            features: input.features.display().to_string(),
            parameters: prepared.params,
            summary: &summary,
            intensity,
        };
        let json = serde_json::to_string_pretty(&output).context("Failed to serialize summary")?;
        println!("{}", json);
        return Ok(ExitCode::SUCCESS);
    }

    println!("{} {}", "Analyzing:".cyan().bold(), input.features.display());
    reporting::print_warnings(&generated.warnings);
    reporting::print_parameters(&prepared.params);
    print_summary(&summary);
    println!("\n{}", "Intensity:".cyan().bold());
    println!("  |{}|", intensity_strip(&intensity, STRIP_WIDTH));

    Ok(ExitCode::SUCCESS)
}

fn invalid_input_report(
    features: &AudioFeatures,
    params: &CalibrationParameters,
    source_hash: &str,
    validation: &ValidationResult,
    duration_ms: u64,
) -> Report {
    let builder = ReportBuilder::new(
        reporting::input_hash(features, params, source_hash),
        backend_version(),
    );
    reporting::apply_validation_messages(builder, validation)
        .duration_ms(duration_ms)
        .build()
}

fn print_summary(summary: &MotionSummary) {
    println!("\n{}", "Summary:".cyan().bold());
    println!("  actions             {}", summary.action_count);
    println!("  duration            {:.3}s", summary.duration);
    println!(
        "  position            {:.1} .. {:.1} (mean {:.2})",
        summary.min_position, summary.max_position, summary.mean_position
    );
    println!(
        "  speed               mean {:.1}/s, max {:.1}/s",
        summary.mean_speed, summary.max_speed
    );
    println!(
        "  above {:<13} {:.1}%",
        format!("{}/s", summary.speed_threshold),
        summary.fraction_above * 100.0
    );
    println!("  mean travel         {:.1}%", summary.mean_travel * 100.0);
}

/// Buckets per-transition intensities into `width` cells, shading each by
/// its bucket mean.
pub fn intensity_strip(intensity: &[f64], width: usize) -> String {
    if intensity.is_empty() || width == 0 {
        return String::new();
    }
    let cells = width.min(intensity.len());
    (0..cells)
        .map(|cell| {
            let lo = cell * intensity.len() / cells;
            let hi = ((cell + 1) * intensity.len() / cells).max(lo + 1);
            let bucket = &intensity[lo..hi];
            let mean = bucket.iter().sum::<f64>() / bucket.len() as f64;
            let shade = (mean * (SHADES.len() - 1) as f64).round() as usize;
            SHADES[shade.min(SHADES.len() - 1)]
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_intensity_strip_shades() {
        assert_eq!(intensity_strip(&[0.0, 0.25, 0.5, 0.75, 1.0], 60), " ░▒▓█");
    }

    #[test]
    fn test_intensity_strip_buckets() {
        let strip = intensity_strip(&[0.0, 0.0, 1.0, 1.0], 2);
        assert_eq!(strip, " █");
    }

    #[test]
    fn test_intensity_strip_empty() {
        assert_eq!(intensity_strip(&[], 60), "");
    }

    #[test]
    fn test_invalid_input_report_is_json() {
        let features = AudioFeatures::new(3.0, vec![1.0], vec![1.0], vec![1.0]);
        let params = CalibrationParameters::default();
        let validation = validate_for_generate(&features, &params);
        assert!(!validation.is_ok());

        let report = invalid_input_report(&features, &params, "source", &validation, 4);
        let json = report.to_json_pretty().unwrap();
        let value: serde_json::Value = serde_json::from_str(&json).unwrap();
        assert_eq!(value["ok"], serde_json::json!(false));
        assert_eq!(
            value["errors"].as_array().unwrap().len(),
            validation.errors.len()
        );
        assert_eq!(value["duration_ms"], serde_json::json!(4));
        assert_eq!(Report::from_json(&json).unwrap(), report);
    }
}
