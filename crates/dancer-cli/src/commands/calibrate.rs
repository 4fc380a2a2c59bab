//! Calibrate command implementation

use std::process::ExitCode;
use std::time::Instant;

use anyhow::{anyhow, Context, Result};
use colored::Colorize;
use dancer_backend_motion::calibrate;
use dancer_spec::{validate_for_calibrate, ReportBuilder, Settings};

use super::reporting;
use super::{backend_version, prepare};
use crate::cli_args::{InputArgs, ParamArgs, TargetArgs};

/// Run the calibrate command
///
/// # Arguments
/// * `input` - Features and settings locations
/// * `params` - Fixed parameter overrides (policy, centering, offset, start time)
/// * `target` - Calibration target overrides
/// * `save` - Store the calibrated parameters in the settings file
/// * `json` - Whether to output machine-readable JSON
///
/// # Returns
/// Exit code: 0 on success, 1 if the inputs are invalid
pub fn run(
    input: &InputArgs,
    params: &ParamArgs,
    target: &TargetArgs,
    save: bool,
    json: bool,
) -> Result<ExitCode> {
    let start = Instant::now();
    let prepared = prepare(input, params, Some(target))?;

    let validation = validate_for_calibrate(&prepared.features, &prepared.params, &prepared.target);
    let builder = ReportBuilder::new(
        reporting::input_hash(&prepared.features, &prepared.params, &prepared.source_hash),
        backend_version(),
    );
    if !validation.is_ok() {
        let duration_ms = start.elapsed().as_millis() as u64;
        if json {
            let report = reporting::apply_validation_messages(builder, &validation)
                .duration_ms(duration_ms)
                .build();
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

    if !json {
        println!(
            "{} {} ({} target {})",
            "Calibrating:".cyan().bold(),
            input.features.display(),
            prepared.target.objective_kind,
            describe_target(&prepared.target)
        );
    }

    let result = calibrate(&prepared.features, &prepared.params, &prepared.target)
        .context("Calibration failed")?;
    let calibrated = result.apply_to(&prepared.params);

    if save {
        let path = prepared
            .resolved
            .path
            .clone()
            .ok_or_else(|| anyhow!("no settings location available; pass --config"))?;
        let settings = Settings {
            parameters: calibrated,
            target: prepared.target,
            ..prepared.resolved.settings
        };
        settings
            .save(&path)
            .with_context(|| format!("Failed to write settings to: {}", path.display()))?;
        if !json {
            println!("{} {}", "Saved settings to:".dimmed(), path.display());
        }
    }

    let duration_ms = start.elapsed().as_millis() as u64;
    let report = reporting::apply_validation_messages(builder, &validation)
        .parameters(calibrated)
        .calibration(result.to_record())
        .duration_ms(duration_ms)
        .ok(true)
        .build();

    if json {
        reporting::print_report_json(&report)?;
        return Ok(ExitCode::SUCCESS);
    }

    reporting::print_warnings(&validation.warnings);
    reporting::print_parameters(&calibrated);
    println!(
        "  {:<19} {:.6} ({} evaluations)",
        "pitch residual", result.pitch_stage.value, result.pitch_stage.evaluations
    );
    println!(
        "  {:<19} {:.6} ({} evaluations)",
        "energy residual", result.energy_stage.value, result.energy_stage.evaluations
    );
    if result.converged() {
        println!("\n{} Calibrated ({}ms)", "SUCCESS".green().bold(), duration_ms);
    } else {
        println!(
            "\n{} Calibration did not converge; best parameters shown ({}ms)",
            "WARNING".yellow().bold(),
            duration_ms
        );
    }

    Ok(ExitCode::SUCCESS)
}

fn describe_target(target: &dancer_spec::CalibrationTarget) -> String {
    use dancer_spec::ObjectiveKind;
    match target.objective_kind {
        ObjectiveKind::MeanSpeed => format!("speed {}", target.target_speed),
        ObjectiveKind::PercentageAbove => format!(
            "{:.0}% above {}",
            target.target_percentage * 100.0,
            target.target_speed
        ),
        ObjectiveKind::MeanTravel => format!("travel {:.0}%", target.target_percentage * 100.0),
    }
}
