//! CLI command implementations

pub mod analyze;
pub mod calibrate;
pub mod generate;
pub mod validate;

mod reporting;

use anyhow::{Context, Result};
use dancer_spec::{AudioFeatures, CalibrationParameters, CalibrationTarget};

use crate::cli_args::{InputArgs, ParamArgs, TargetArgs};
use crate::input::{load_features, resolve_settings, ResolvedSettings};

/// Features plus the effective parameters after settings and flag overrides.
pub(crate) struct Prepared {
    pub features: AudioFeatures,
    pub source_hash: String,
    pub resolved: ResolvedSettings,
    pub params: CalibrationParameters,
    pub target: CalibrationTarget,
}

/// Loads inputs and layers CLI flags over the settings file.
pub(crate) fn prepare(
    input: &InputArgs,
    params: &ParamArgs,
    target: Option<&TargetArgs>,
) -> Result<Prepared> {
    let resolved = resolve_settings(input.config.as_deref()).context("Failed to load settings")?;
    let loaded = load_features(&input.features).with_context(|| {
        format!("Failed to load features file: {}", input.features.display())
    })?;

    let mut effective_params = resolved.settings.parameters;
    params.apply(&mut effective_params);
    let mut effective_target = resolved.settings.target;
    if let Some(target) = target {
        target.apply(&mut effective_target);
    }

    tracing::debug!(
        features = %input.features.display(),
        settings_loaded = resolved.loaded,
        "inputs prepared"
    );

    Ok(Prepared {
        features: loaded.features,
        source_hash: loaded.source_hash,
        resolved,
        params: effective_params,
        target: effective_target,
    })
}

/// Backend version string recorded in reports.
pub(crate) fn backend_version() -> String {
    format!(
        "dancer-cli v{} ({} v{})",
        env!("CARGO_PKG_VERSION"),
        dancer_backend_motion::BACKEND_ID,
        dancer_backend_motion::VERSION
    )
}
