//! Configuration loading and validation for dx.
//!
//! This module handles:
//! - Loading `config.toml` (sampling defaults, output preferences)
//! - Config resolution order (CLI > env > XDG > defaults)
//! - Semantic validation (positive sample count, bounded precision)

use dx_common::OutputFormat;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use thiserror::Error;

/// Default XDG config directory name.
const CONFIG_DIR_NAME: &str = "dx";

/// Config file name inside the config directory.
const CONFIG_FILE_NAME: &str = "config.toml";

/// Environment variable naming an explicit config file.
pub const CONFIG_ENV: &str = "DX_CONFIG";

/// Most significant digits an f64 can carry through a decimal round trip.
pub const MAX_PRECISION: usize = 17;

/// Errors that can occur during config loading.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("config file not found: {path}")]
    NotFound { path: PathBuf },

    #[error("invalid TOML in config file {path}: {source}")]
    Parse {
        path: PathBuf,
        #[source]
        source: toml::de::Error,
    },

    #[error("I/O error reading {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("invalid value for {field}: {message}")]
    Invalid { field: &'static str, message: String },
}

impl From<ConfigError> for dx_common::Error {
    fn from(err: ConfigError) -> Self {
        dx_common::Error::Config(err.to_string())
    }
}

/// Top-level `config.toml`.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct DxConfig {
    pub sampling: SamplingConfig,
    pub output: OutputConfig,
}

/// `[sampling]` table.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct SamplingConfig {
    /// Seed for `dx sample` when `--seed` is absent. Unset draws a fresh seed.
    pub seed: Option<u64>,
    /// Number of variates for `dx sample` when `-n` is absent.
    pub count: usize,
}

impl Default for SamplingConfig {
    fn default() -> Self {
        SamplingConfig {
            seed: None,
            count: 10,
        }
    }
}

/// `[output]` table.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct OutputConfig {
    /// Format when `--format` is absent.
    pub format: OutputFormat,
    /// Significant digits in `md` and `summary` output.
    pub precision: usize,
}

impl Default for OutputConfig {
    fn default() -> Self {
        OutputConfig {
            format: OutputFormat::Json,
            precision: 6,
        }
    }
}

impl DxConfig {
    /// Check values serde cannot express as types.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.sampling.count == 0 {
            return Err(ConfigError::Invalid {
                field: "sampling.count",
                message: "must be at least 1".to_string(),
            });
        }
        if self.output.precision == 0 || self.output.precision > MAX_PRECISION {
            return Err(ConfigError::Invalid {
                field: "output.precision",
                message: format!(
                    "must be between 1 and {}, got {}",
                    MAX_PRECISION, self.output.precision
                ),
            });
        }
        Ok(())
    }
}

/// Resolved configuration with provenance information.
#[derive(Debug, Clone, Serialize)]
pub struct ResolvedConfig {
    /// The loaded configuration.
    pub config: DxConfig,
    /// File it came from (None if using defaults).
    pub source: Option<PathBuf>,
}

/// Configuration resolution options.
#[derive(Debug, Default)]
pub struct ConfigOptions {
    /// Explicit config file (highest priority).
    pub config_path: Option<PathBuf>,
}

/// Load configuration with the standard resolution order.
///
/// Resolution order (highest to lowest priority):
/// 1. Explicit `--config` path (via ConfigOptions)
/// 2. Environment variable (DX_CONFIG)
/// 3. XDG config home (~/.config/dx/config.toml), if present
/// 4. Built-in defaults
///
/// An explicitly named file must exist; the XDG file is optional.
pub fn load_config(options: &ConfigOptions) -> Result<ResolvedConfig, ConfigError> {
    let explicit = options
        .config_path
        .clone()
        .or_else(|| std::env::var_os(CONFIG_ENV).map(PathBuf::from));

    if let Some(path) = explicit {
        if !path.exists() {
            return Err(ConfigError::NotFound { path });
        }
        let config = load_config_file(&path)?;
        return Ok(ResolvedConfig {
            config,
            source: Some(path),
        });
    }

    let default_path = default_config_path();
    if default_path.exists() {
        let config = load_config_file(&default_path)?;
        return Ok(ResolvedConfig {
            config,
            source: Some(default_path),
        });
    }

    tracing::debug!("no config file found, using defaults");
    Ok(ResolvedConfig {
        config: DxConfig::default(),
        source: None,
    })
}

/// Path of the XDG config file, whether or not it exists.
pub fn default_config_path() -> PathBuf {
    let xdg_config = std::env::var("XDG_CONFIG_HOME")
        .map(PathBuf::from)
        .unwrap_or_else(|_| {
            dirs::home_dir()
                .unwrap_or_else(|| PathBuf::from("."))
                .join(".config")
        });

    xdg_config.join(CONFIG_DIR_NAME).join(CONFIG_FILE_NAME)
}

/// Read, parse and validate one config file.
pub fn load_config_file(path: &Path) -> Result<DxConfig, ConfigError> {
    let content = std::fs::read_to_string(path).map_err(|e| ConfigError::Io {
        path: path.to_path_buf(),
        source: e,
    })?;
    let config = parse_config(&content, path)?;
    tracing::debug!(path = %path.display(), "loaded config file");
    Ok(config)
}

/// Parse and validate config text. `path` is used for error messages only.
pub fn parse_config(content: &str, path: &Path) -> Result<DxConfig, ConfigError> {
    let config: DxConfig = toml::from_str(content).map_err(|e| ConfigError::Parse {
        path: path.to_path_buf(),
        source: e,
    })?;
    config.validate()?;
    Ok(config)
}
