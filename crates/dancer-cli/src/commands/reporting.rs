use anyhow::{Context, Result};
use colored::Colorize;
use dancer_spec::{
    canonical_input_hash, AudioFeatures, CalibrationParameters, Report, ReportBuilder,
    ReportError, ReportWarning, ValidationError, ValidationResult, ValidationWarning,
};

pub(crate) fn apply_validation_messages(
    mut builder: ReportBuilder,
    validation: &ValidationResult,
) -> ReportBuilder {
    for err in &validation.errors {
        builder = builder.error(ReportError::from_validation_error(err));
    }
    for warn in &validation.warnings {
        builder = builder.warning(ReportWarning::from_validation_warning(warn));
    }
    builder
}

/// Hash of the inputs, or the raw source hash if they cannot be canonicalized.
pub(crate) fn input_hash(
    features: &AudioFeatures,
    params: &CalibrationParameters,
    source_hash: &str,
) -> String {
    canonical_input_hash(features, params).unwrap_or_else(|_| source_hash.to_string())
}

pub(crate) fn print_report_json(report: &Report) -> Result<()> {
    let json = report
        .to_json_pretty()
        .context("Failed to serialize report")?;
    println!("{}", json);
    Ok(())
}

pub(crate) fn print_errors(errors: &[ValidationError]) {
    if errors.is_empty() {
        return;
    }
    println!("\n{}", "Errors:".red().bold());
    for error in errors {
        let path_info = error
            .path
            .as_ref()
            .map(|p| format!(" at {}", p))
            .unwrap_or_default();
        println!(
            "  {} [{}]{}: {}",
            "x".red(),
            error.code.to_string().red(),
            path_info.dimmed(),
            error.message
        );
    }
}

pub(crate) fn print_warnings(warnings: &[ValidationWarning]) {
    if warnings.is_empty() {
        return;
    }
    println!("\n{}", "Warnings:".yellow().bold());
    for warning in warnings {
        let path_info = warning
            .path
            .as_ref()
            .map(|p| format!(" at {}", p))
            .unwrap_or_default();
        println!(
            "  {} [{}]{}: {}",
            "!".yellow(),
            warning.code.to_string().yellow(),
            path_info.dimmed(),
            warning.message
        );
    }
}

pub(crate) fn print_parameters(params: &CalibrationParameters) {
    println!("\n{}", "Parameters:".cyan().bold());
    println!("  pitch_range         {:.3}", params.pitch_range);
    println!("  energy_multiplier   {:.3}", params.energy_multiplier);
    println!("  overflow_policy     {}", params.overflow_policy);
    println!("  amplitude_centering {:.3}", params.amplitude_centering);
    println!("  center_offset       {:.3}", params.center_offset);
    println!("  start_time          {:.3}", params.start_time);
}
