//! Loading features and settings from disk.

use std::path::{Path, PathBuf};

use dancer_spec::{bytes_hash, AudioFeatures, ExportFormat, Settings, SpecError};

/// Result of loading a features file.
#[derive(Debug, Clone)]
pub struct LoadResult {
    /// Parsed features.
    pub features: AudioFeatures,
    /// BLAKE3 hash of the file content (hex string).
    pub source_hash: String,
}

/// Effective settings and where they came from.
#[derive(Debug, Clone)]
pub struct ResolvedSettings {
    /// Loaded settings, or defaults.
    pub settings: Settings,
    /// File the settings belong to; `None` when no config dir is known.
    pub path: Option<PathBuf>,
    /// Whether `path` existed and was read.
    pub loaded: bool,
}

/// Errors that can occur while loading inputs.
#[derive(Debug)]
pub enum InputError {
    /// File could not be read.
    FileRead {
        path: PathBuf,
        source: std::io::Error,
    },

    /// Features JSON could not be parsed.
    FeaturesParse { path: PathBuf, source: SpecError },

    /// Settings file could not be loaded.
    Settings { path: PathBuf, source: SpecError },
}

impl std::fmt::Display for InputError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            InputError::FileRead { path, source } => {
                write!(f, "failed to read file '{}': {}", path.display(), source)
            }
            InputError::FeaturesParse { path, source } => {
                write!(f, "invalid features file '{}': {}", path.display(), source)
            }
            InputError::Settings { path, source } => {
                write!(f, "invalid settings file '{}': {}", path.display(), source)
            }
        }
    }
}

impl std::error::Error for InputError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            InputError::FileRead { source, .. } => Some(source),
            InputError::FeaturesParse { source, .. } | InputError::Settings { source, .. } => {
                Some(source)
            }
        }
    }
}

/// Loads a features JSON file.
///
/// # Example
/// ```no_run
/// use std::path::Path;
/// use dancer_cli::input::load_features;
///
/// let result = load_features(Path::new("song.json")).unwrap();
/// println!("{} beats", result.features.beat_count());
/// ```
pub fn load_features(path: &Path) -> Result<LoadResult, InputError> {
    let content = std::fs::read_to_string(path).map_err(|source| InputError::FileRead {
        path: path.to_path_buf(),
        source,
    })?;
    let features = AudioFeatures::from_json(&content).map_err(|source| {
        InputError::FeaturesParse {
            path: path.to_path_buf(),
            source,
        }
    })?;

    Ok(LoadResult {
        features,
        source_hash: bytes_hash(content.as_bytes()),
    })
}

/// Default settings location under the user's config directory.
pub fn default_settings_path() -> Option<PathBuf> {
    dirs::config_dir().map(|dir| Settings::path_in(&dir))
}

/// Resolves the effective settings.
///
/// An explicit `config` path must exist. Without one, the default location is
/// used if present and built-in defaults otherwise.
pub fn resolve_settings(config: Option<&Path>) -> Result<ResolvedSettings, InputError> {
    match config {
        Some(path) => {
            let settings = Settings::load(path).map_err(|source| InputError::Settings {
                path: path.to_path_buf(),
                source,
            })?;
            Ok(ResolvedSettings {
                settings,
                path: Some(path.to_path_buf()),
                loaded: true,
            })
        }
        None => {
            let Some(path) = default_settings_path() else {
                return Ok(ResolvedSettings {
                    settings: Settings::default(),
                    path: None,
                    loaded: false,
                });
            };
            let loaded = path.exists();
            let settings =
                Settings::load_or_default(&path).map_err(|source| InputError::Settings {
                    path: path.clone(),
                    source,
                })?;
            Ok(ResolvedSettings {
                settings,
                path: Some(path),
                loaded,
            })
        }
    }
}

/// Default output path: the features path with the format's extension.
pub fn output_path(features_path: &Path, format: ExportFormat) -> PathBuf {
    features_path.with_extension(format.extension())
}
