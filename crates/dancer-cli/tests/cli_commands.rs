//! Command tests that run against files in a temporary directory.

use std::fs;
use std::path::{Path, PathBuf};

use dancer_cli::cli_args::{InputArgs, ParamArgs, TargetArgs};
use dancer_cli::commands::generate::{run as generate, GenerateOptions};
use dancer_cli::commands::{calibrate, validate};
use dancer_spec::{OverflowPolicy, Settings};
use pretty_assertions::assert_eq;
use tempfile::{tempdir, TempDir};

const FEATURES: &str = r#"{
    "duration": 3.0,
    "beats": [1.0, 2.0],
    "pitch": [1.0, 1.0],
    "energy": [1.0, 1.0]
}"#;

struct Workspace {
    _dir: TempDir,
    features: PathBuf,
    config: PathBuf,
}

fn workspace(settings: &str) -> Workspace {
    let dir = tempdir().unwrap();
    let features = dir.path().join("song.json");
    let config = dir.path().join("settings.json");
    fs::write(&features, FEATURES).unwrap();
    fs::write(&config, settings).unwrap();
    Workspace {
        _dir: dir,
        features,
        config,
    }
}

fn input(ws: &Workspace) -> InputArgs {
    InputArgs {
        features: ws.features.clone(),
        config: Some(ws.config.clone()),
    }
}

fn options(ws: &Workspace) -> GenerateOptions {
    GenerateOptions {
        input: input(ws),
        params: ParamArgs {
            pitch: Some(100.0),
            energy: Some(1.0),
            ..ParamArgs::default()
        },
        target: TargetArgs::default(),
        out: None,
        csv: true,
        automap: false,
        yes: false,
        json: false,
    }
}

fn read(path: &Path) -> String {
    fs::read_to_string(path).unwrap()
}

#[test]
fn test_generate_writes_csv_next_to_features() {
    let ws = workspace("{}");
    generate(&options(&ws)).unwrap();
    let out = ws.features.with_extension("csv");
    assert_eq!(read(&out), "500,75\n1000,25\n1500,75\n2000,25\n");
}

#[test]
fn test_generate_uses_settings_format() {
    let ws = workspace(r#"{"format": "funscript"}"#);
    let opts = GenerateOptions {
        csv: false,
        ..options(&ws)
    };
    generate(&opts).unwrap();
    let script: serde_json::Value =
        serde_json::from_str(&read(&ws.features.with_extension("funscript"))).unwrap();
    assert_eq!(script["actions"][1], serde_json::json!({"at": 1000, "pos": 25}));
}

#[test]
fn test_generate_refuses_overwrite_without_yes() {
    let ws = workspace("{}");
    let out = ws.features.with_extension("csv");
    fs::write(&out, "keep me").unwrap();

    let err = generate(&options(&ws)).unwrap_err();
    assert!(err.to_string().contains("--yes"));
    assert_eq!(read(&out), "keep me");

    let opts = GenerateOptions {
        yes: true,
        ..options(&ws)
    };
    generate(&opts).unwrap();
    assert_eq!(read(&out), "500,75\n1000,25\n1500,75\n2000,25\n");
}

#[test]
fn test_generate_invalid_parameters_writes_nothing() {
    let ws = workspace("{}");
    let mut opts = options(&ws);
    opts.params.energy = Some(500.0);
    generate(&opts).unwrap();
    assert!(!ws.features.with_extension("csv").exists());
}

#[test]
fn test_generate_explicit_out_path() {
    let ws = workspace("{}");
    let out = ws.features.with_file_name("custom.csv");
    let opts = GenerateOptions {
        out: Some(out.clone()),
        ..options(&ws)
    };
    generate(&opts).unwrap();
    assert!(out.exists());
}

#[test]
fn test_missing_config_is_an_error() {
    let ws = workspace("{}");
    let mut opts = options(&ws);
    opts.input.config = Some(ws.config.with_file_name("absent.json"));
    let err = generate(&opts).unwrap_err();
    assert!(format!("{:#}", err).contains("absent.json"));
}

#[test]
fn test_calibrate_save_updates_settings() {
    let ws = workspace(r#"{"parameters": {"overflow_policy": "fold"}}"#);
    let target = TargetArgs {
        auto_pitch: Some(50.0),
        ..TargetArgs::default()
    };
    calibrate::run(&input(&ws), &ParamArgs::default(), &target, true, true).unwrap();

    let saved = Settings::load(&ws.config).unwrap();
    assert_eq!(saved.parameters.overflow_policy, OverflowPolicy::Fold);
    assert_eq!(saved.target.target_pitch_center, 50.0);
    assert!((0.0..=100.0).contains(&saved.parameters.energy_multiplier));
}

#[test]
fn test_validate_runs_on_valid_input() {
    let ws = workspace("{}");
    validate::run(&input(&ws), &ParamArgs::default(), true).unwrap();
}
