//! Generate command implementation
//!
//! Loads features, optionally calibrates, generates the action sequence and
//! writes it as a JSON script or CSV.

use std::fs;
use std::path::PathBuf;
use std::process::ExitCode;
use std::time::Instant;

use anyhow::{bail, Context, Result};
use colored::Colorize;
use dancer_backend_motion::{calibrate, generate, render};
use dancer_spec::{
    validate_for_calibrate, validate_for_generate, ExportFormat, OutputResult, ReportBuilder,
    ReportWarning, ValidationResult,
};

use super::reporting;
use super::{backend_version, prepare};
use crate::cli_args::{InputArgs, ParamArgs, TargetArgs};
use crate::input::output_path;

/// Options for the generate command.
#[derive(Debug, Clone)]
pub struct GenerateOptions {
    pub input: InputArgs,
    pub params: ParamArgs,
    pub target: TargetArgs,
    pub out: Option<PathBuf>,
    pub csv: bool,
    pub automap: bool,
    pub yes: bool,
    pub json: bool,
}

/// Run the generate command
///
/// # Returns
/// Exit code: 0 on success, 1 if the inputs are invalid
pub fn run(options: &GenerateOptions) -> Result<ExitCode> {
    let start = Instant::now();
    let json = options.json;

    let prepared = prepare(&options.input, &options.params, Some(&options.target))?;
    let mut params = prepared.params;
    let format = if options.csv {
        ExportFormat::Csv
    } else {
        prepared.resolved.settings.format
    };
    let out = options
        .out
        .clone()
        .unwrap_or_else(|| output_path(&options.input.features, format));

    if out.exists() && !options.yes {
        bail!(
            "output file already exists: {} (pass --yes to overwrite)",
            out.display()
        );
    }

    if !json {
        println!(
            "{} {}",
            "Generating:".cyan().bold(),
            options.input.features.display()
        );
    }

    let mut builder = ReportBuilder::new(
        reporting::input_hash(&prepared.features, &params, &prepared.source_hash),
        backend_version(),
    );

    // With --automap the pitch range and energy multiplier are search outputs.
    let validation = if options.automap {
        validate_for_calibrate(&prepared.features, &params, &prepared.target)
    } else {
        validate_for_generate(&prepared.features, &params)
    };
    if !validation.is_ok() {
        return finish_invalid(builder, &validation, json, start);
    }

    if options.automap {
        let result =
            calibrate(&prepared.features, &params, &prepared.target).context("Calibration failed")?;
        params = result.apply_to(&params);
        builder = builder.calibration(result.to_record());
        if !json {
            println!(
                "{} pitch_range={:.3} energy_multiplier={:.3}{}",
                "Calibrated:".cyan().bold(),
                result.pitch_range,
                result.energy_multiplier,
                if result.converged() {
                    String::new()
                } else {
                    format!(" ({})", "not converged".yellow())
                }
            );
        }
    }

    let generated = generate(&prepared.features, &params).context("Generation failed")?;
    let export = render(&generated.actions, format).context("Failed to render script")?;

    fs::write(&out, &export.data)
        .with_context(|| format!("Failed to write output: {}", out.display()))?;

    let duration_ms = start.elapsed().as_millis() as u64;
    for warning in &generated.warnings {
        builder = builder.warning(ReportWarning::from_validation_warning(warning));
    }
    let report = builder
        .parameters(params)
        .output(OutputResult {
            format,
            path: out.clone(),
            hash: export.hash.clone(),
            action_count: generated.actions.len(),
        })
        .duration_ms(duration_ms)
        .ok(true)
        .build();

    if json {
        reporting::print_report_json(&report)?;
    } else {
        reporting::print_warnings(&generated.warnings);
        reporting::print_parameters(&params);
        println!(
            "\n{} {} actions written to {} ({}ms)",
            "SUCCESS".green().bold(),
            generated.actions.len(),
            out.display(),
            duration_ms
        );
        println!("{} {}", "Hash:".dimmed(), &export.hash[..16]);
    }

    Ok(ExitCode::SUCCESS)
}

fn finish_invalid(
    builder: ReportBuilder,
    validation: &ValidationResult,
    json: bool,
    start: Instant,
) -> Result<ExitCode> {
    let duration_ms = start.elapsed().as_millis() as u64;
    if json {
        let report = reporting::apply_validation_messages(builder, validation)
            .duration_ms(duration_ms)
            .build();
        reporting::print_report_json(&report)?;
    } else {
        reporting::print_errors(&validation.errors);
        reporting::print_warnings(&validation.warnings);
        println!(
            "\n{} Input has {} error(s) ({}ms)",
            "FAILED".red().bold(),
            validation.errors.len(),
            duration_ms
        );
    }
    Ok(ExitCode::from(1))
}
