//! Validate command implementation
//!
//! Checks a features file together with the effective settings.

use std::process::ExitCode;
use std::time::Instant;

use anyhow::Result;
use colored::Colorize;
use dancer_spec::{validate_for_generate, validate_target, ReportBuilder};

use super::reporting;
use super::{backend_version, prepare};
use crate::cli_args::{InputArgs, ParamArgs};

/// Run the validate command
///
/// # Returns
/// Exit code: 0 if valid, 1 if invalid
pub fn run(input: &InputArgs, params: &ParamArgs, json: bool) -> Result<ExitCode> {
    let start = Instant::now();
    let prepared = prepare(input, params, None)?;

    let mut validation = validate_for_generate(&prepared.features, &prepared.params);
    validation.merge(validate_target(&prepared.target));
    let duration_ms = start.elapsed().as_millis() as u64;

    if json {
        let builder = ReportBuilder::new(
            reporting::input_hash(&prepared.features, &prepared.params, &prepared.source_hash),
            backend_version(),
        )
        .parameters(prepared.params)
        .duration_ms(duration_ms);
        let report = reporting::apply_validation_messages(builder, &validation)
            .ok(validation.is_ok())
            .build();
        reporting::print_report_json(&report)?;
    } else {
        println!("{} {}", "Validating:".cyan().bold(), input.features.display());
        if let Some(path) = prepared.resolved.path.as_ref().filter(|_| prepared.resolved.loaded) {
            println!("{} {}", "Settings:".dimmed(), path.display());
        }
        println!(
            "{} {} beats, {:.3}s",
            "Features:".dimmed(),
            prepared.features.beat_count(),
            prepared.features.duration
        );
        reporting::print_errors(&validation.errors);
        reporting::print_warnings(&validation.warnings);

        if validation.is_ok() {
            println!(
                "\n{} Input is valid ({}ms)",
                "SUCCESS".green().bold(),
                duration_ms
            );
        } else {
            println!(
                "\n{} Input has {} error(s) ({}ms)",
                "FAILED".red().bold(),
                validation.errors.len(),
                duration_ms
            );
        }
    }

    if validation.is_ok() {
        Ok(ExitCode::SUCCESS)
    } else {
        Ok(ExitCode::from(1))
    }
}
