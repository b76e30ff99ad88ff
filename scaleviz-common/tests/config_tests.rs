//! Configuration loading and directory resolution
//!
//! Tests that touch SCALEVIZ_* environment variables are marked #[serial]
//! so they never run concurrently.

use scaleviz_common::config::{
    load_or_default, load_toml_config, resolve_dir, ChartPaths, ConfigSource, TomlConfig,
    DATA_DIR_ENV, DEFAULT_DATA_DIR, DEFAULT_OUTPUT_DIR, OUTPUT_DIR_ENV,
};
use serial_test::serial;
use std::env;
use std::io::Write;
use std::path::{Path, PathBuf};
use tempfile::{NamedTempFile, TempDir};

fn write_config(contents: &str) -> NamedTempFile {
    let mut file = NamedTempFile::new().unwrap();
    file.write_all(contents.as_bytes()).unwrap();
    file
}

fn clear_env() {
    env::remove_var(OUTPUT_DIR_ENV);
    env::remove_var(DATA_DIR_ENV);
}

#[test]
#[serial]
fn test_resolve_dir_default() {
    clear_env();
    let dir = resolve_dir(None, OUTPUT_DIR_ENV, None, DEFAULT_OUTPUT_DIR);
    assert_eq!(dir, PathBuf::from("output"));
}

#[test]
#[serial]
fn test_resolve_dir_priority() {
    clear_env();
    let toml_dir = Path::new("/tmp/scaleviz-toml");

    // TOML beats default
    assert_eq!(
        resolve_dir(None, OUTPUT_DIR_ENV, Some(toml_dir), DEFAULT_OUTPUT_DIR),
        toml_dir
    );

    // Environment beats TOML
    env::set_var(OUTPUT_DIR_ENV, "/tmp/scaleviz-env");
    assert_eq!(
        resolve_dir(None, OUTPUT_DIR_ENV, Some(toml_dir), DEFAULT_OUTPUT_DIR),
        PathBuf::from("/tmp/scaleviz-env")
    );

    // Argument beats environment
    assert_eq!(
        resolve_dir(
            Some(Path::new("/tmp/scaleviz-cli")),
            OUTPUT_DIR_ENV,
            Some(toml_dir),
            DEFAULT_OUTPUT_DIR
        ),
        PathBuf::from("/tmp/scaleviz-cli")
    );

    clear_env();
}

#[test]
#[serial]
fn test_empty_env_var_is_ignored() {
    clear_env();
    env::set_var(DATA_DIR_ENV, "");
    assert_eq!(
        resolve_dir(None, DATA_DIR_ENV, None, DEFAULT_DATA_DIR),
        PathBuf::from("data")
    );
    clear_env();
}

#[test]
#[serial]
fn test_chart_paths_resolve() {
    clear_env();
    env::set_var(DATA_DIR_ENV, "/srv/datasets");

    let config = TomlConfig {
        output_dir: Some(PathBuf::from("/var/charts")),
        data_dir: Some(PathBuf::from("/ignored")),
        ..TomlConfig::default()
    };
    let paths = ChartPaths::resolve(None, None, &config);
    assert_eq!(paths.output_dir, PathBuf::from("/var/charts"));
    assert_eq!(paths.data_dir, PathBuf::from("/srv/datasets"));
    assert_eq!(
        paths.dataset("tech_adoption.csv"),
        PathBuf::from("/srv/datasets/tech_adoption.csv")
    );
    assert_eq!(
        paths.artifact("adoption_timeline.json"),
        PathBuf::from("/var/charts/adoption_timeline.json")
    );

    clear_env();
}

#[test]
fn test_ensure_output_dir_creates_nested() {
    let temp = TempDir::new().unwrap();
    let paths = ChartPaths {
        output_dir: temp.path().join("a").join("b"),
        data_dir: temp.path().to_path_buf(),
    };
    paths.ensure_output_dir().unwrap();
    assert!(paths.output_dir.is_dir());
    // Second call is a no-op
    paths.ensure_output_dir().unwrap();
}

#[test]
fn test_load_toml_config_full() {
    let file = write_config(
        r##"
output_dir = "/tmp/charts"
data_dir = "datasets"

[logging]
level = "debug"

[style.adoption.palette]
fallback = "#000000"
categories = [
    { name = "Mobile", color = "#111111" },
    { name = "AI/Agentic", color = "#222222" },
]

[style.ai_compute.impact_sizes]
default_size = 7.0
tiers = [{ tier = "Transformative", size = 30.0 }]
"##,
    );

    let config = load_toml_config(file.path()).unwrap();
    assert_eq!(config.output_dir, Some(PathBuf::from("/tmp/charts")));
    assert_eq!(config.data_dir, Some(PathBuf::from("datasets")));
    assert_eq!(config.logging.level, "debug");

    let adoption = config.style_override("adoption").unwrap();
    let palette = adoption.palette.as_ref().unwrap();
    assert_eq!(palette.color_for("AI/Agentic"), "#222222");
    assert_eq!(palette.color_for("Hardware"), "#000000");
    assert!(adoption.impact_sizes.is_none());

    let ai_compute = config.style_override("ai_compute").unwrap();
    let sizes = ai_compute.impact_sizes.as_ref().unwrap();
    assert_eq!(sizes.size_for("Transformative"), 30.0);
    assert_eq!(sizes.size_for("Low"), 7.0);

    assert!(config.style_override("energetic_biology").is_none());
}

#[test]
fn test_load_toml_config_minimal() {
    let file = write_config("");
    let config = load_toml_config(file.path()).unwrap();
    assert_eq!(config, TomlConfig::default());
    assert_eq!(config.logging.level, "info");
}

#[test]
fn test_load_toml_config_missing_file() {
    let temp = TempDir::new().unwrap();
    assert!(load_toml_config(&temp.path().join("absent.toml")).is_err());
}

#[test]
fn test_load_or_default_explicit_file() {
    let file = write_config("output_dir = \"rendered\"\n");
    let (config, source) = load_or_default(Some(file.path()));
    assert_eq!(config.output_dir, Some(PathBuf::from("rendered")));
    assert_eq!(source, ConfigSource::File(file.path().to_path_buf()));
}

#[test]
fn test_load_or_default_malformed_file() {
    let file = write_config("output_dir = [unterminated\n");
    let (config, source) = load_or_default(Some(file.path()));
    assert_eq!(config, TomlConfig::default());
    match source {
        ConfigSource::Rejected { path, reason } => {
            assert_eq!(path, file.path());
            assert!(reason.contains("TOML"));
        }
        other => panic!("expected rejection, got {:?}", other),
    }
}

#[test]
fn test_load_or_default_missing_explicit_file() {
    let temp = TempDir::new().unwrap();
    let missing = temp.path().join("nope.toml");
    let (config, source) = load_or_default(Some(&missing));
    assert_eq!(config, TomlConfig::default());
    assert!(matches!(source, ConfigSource::Rejected { .. }));
}
