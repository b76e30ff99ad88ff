//! Configuration loading and directory resolution
//!
//! Directory resolution priority:
//! 1. Command-line argument (highest priority)
//! 2. Environment variable
//! 3. TOML config file
//! 4. Compiled default (fallback)
//!
//! A missing config file is normal; an unreadable or malformed one is
//! logged and replaced by defaults so chart generation still runs.

use crate::style::StyleOverride;
use crate::{Error, Result};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::path::{Path, PathBuf};
use tracing::{info, warn};

/// Environment variable overriding the output directory
pub const OUTPUT_DIR_ENV: &str = "SCALEVIZ_OUTPUT_DIR";

/// Environment variable overriding the dataset directory
pub const DATA_DIR_ENV: &str = "SCALEVIZ_DATA_DIR";

/// Environment variable naming the TOML config file
pub const CONFIG_FILE_ENV: &str = "SCALEVIZ_CONFIG";

/// Config file looked up in the working directory
pub const LOCAL_CONFIG_FILE: &str = "scaleviz.toml";

pub const DEFAULT_OUTPUT_DIR: &str = "output";
pub const DEFAULT_DATA_DIR: &str = "data";

/// Bootstrap configuration loaded from TOML
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct TomlConfig {
    /// Directory charts are written to
    #[serde(default)]
    pub output_dir: Option<PathBuf>,

    /// Directory holding the CSV datasets
    #[serde(default)]
    pub data_dir: Option<PathBuf>,

    /// Logging configuration (optional)
    #[serde(default)]
    pub logging: LoggingConfig,

    /// Per-chart style overrides keyed by style name
    /// (`ai_compute`, `adoption`, `energetic_biology`, `energetic_technology`)
    #[serde(default)]
    pub style: HashMap<String, StyleOverride>,
}

impl TomlConfig {
    /// Style override for one chart, if configured
    pub fn style_override(&self, name: &str) -> Option<&StyleOverride> {
        self.style.get(name)
    }
}

/// Logging configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LoggingConfig {
    /// Log level (trace, debug, info, warn, error)
    #[serde(default = "default_log_level")]
    pub level: String,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: default_log_level(),
        }
    }
}

fn default_log_level() -> String {
    "info".to_string()
}

/// Parse a TOML config file
pub fn load_toml_config(path: &Path) -> Result<TomlConfig> {
    let content = std::fs::read_to_string(path)?;
    let config = toml::from_str(&content)?;
    Ok(config)
}

/// Find the config file to use, if any.
///
/// Explicit paths (argument or environment) are returned even when they do
/// not exist so the caller can report them.
pub fn locate_config_file(cli_arg: Option<&Path>) -> Option<PathBuf> {
    if let Some(path) = cli_arg {
        return Some(path.to_path_buf());
    }

    if let Ok(path) = std::env::var(CONFIG_FILE_ENV) {
        if !path.is_empty() {
            return Some(PathBuf::from(path));
        }
    }

    let local = PathBuf::from(LOCAL_CONFIG_FILE);
    if local.exists() {
        return Some(local);
    }

    dirs::config_dir()
        .map(|d| d.join("scaleviz").join("config.toml"))
        .filter(|path| path.exists())
}

/// Where the active configuration came from
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ConfigSource {
    /// No config file found
    Defaults,
    /// Loaded from this file
    File(PathBuf),
    /// File found but unusable; defaults in effect
    Rejected { path: PathBuf, reason: String },
}

impl ConfigSource {
    /// Report the outcome once logging is up
    pub fn log(&self) {
        match self {
            ConfigSource::Defaults => info!("No config file found, using defaults"),
            ConfigSource::File(path) => info!("Loaded config from {}", path.display()),
            ConfigSource::Rejected { path, reason } => {
                warn!("Ignoring config file {}: {}", path.display(), reason)
            }
        }
    }
}

/// Load the config file if one is found, falling back to defaults on any error.
///
/// Does not log: binaries call this before the tracing subscriber exists
/// (the file may set the log level) and report the [`ConfigSource`] after.
pub fn load_or_default(cli_arg: Option<&Path>) -> (TomlConfig, ConfigSource) {
    let Some(path) = locate_config_file(cli_arg) else {
        return (TomlConfig::default(), ConfigSource::Defaults);
    };

    match load_toml_config(&path) {
        Ok(config) => (config, ConfigSource::File(path)),
        Err(e) => (
            TomlConfig::default(),
            ConfigSource::Rejected {
                path,
                reason: e.to_string(),
            },
        ),
    }
}

/// Resolve a directory by priority: argument, environment, TOML, default
pub fn resolve_dir(
    cli_arg: Option<&Path>,
    env_var_name: &str,
    toml_value: Option<&Path>,
    default: &str,
) -> PathBuf {
    // Priority 1: Command-line argument
    if let Some(path) = cli_arg {
        return path.to_path_buf();
    }

    // Priority 2: Environment variable
    if let Ok(path) = std::env::var(env_var_name) {
        if !path.is_empty() {
            return PathBuf::from(path);
        }
    }

    // Priority 3: TOML config file
    if let Some(path) = toml_value {
        return path.to_path_buf();
    }

    // Priority 4: Compiled default
    PathBuf::from(default)
}

/// Resolved input and output locations for a chart run
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ChartPaths {
    pub output_dir: PathBuf,
    pub data_dir: PathBuf,
}

impl ChartPaths {
    pub fn resolve(cli_output: Option<&Path>, cli_data: Option<&Path>, config: &TomlConfig) -> Self {
        Self {
            output_dir: resolve_dir(
                cli_output,
                OUTPUT_DIR_ENV,
                config.output_dir.as_deref(),
                DEFAULT_OUTPUT_DIR,
            ),
            data_dir: resolve_dir(cli_data, DATA_DIR_ENV, config.data_dir.as_deref(), DEFAULT_DATA_DIR),
        }
    }

    /// Create the output directory if needed
    pub fn ensure_output_dir(&self) -> Result<()> {
        std::fs::create_dir_all(&self.output_dir).map_err(|e| {
            Error::Config(format!(
                "Cannot create output directory {}: {}",
                self.output_dir.display(),
                e
            ))
        })
    }

    /// Path of a dataset file inside the data directory
    pub fn dataset(&self, file_name: &str) -> PathBuf {
        self.data_dir.join(file_name)
    }

    /// Path of an artifact inside the output directory
    pub fn artifact(&self, file_name: &str) -> PathBuf {
        self.output_dir.join(file_name)
    }
}
