//! Logging configuration.
//!
//! Sources, lowest to highest priority:
//! - `RUST_LOG` (coarse level only; the directive itself is honored by `init_logging`)
//! - `DX_LOG`, `DX_LOG_FORMAT`
//! - CLI flags (`-v`, `-q`, `--log-format`)

use clap::ValueEnum;
use serde::{Deserialize, Serialize};

/// Log output format.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, ValueEnum, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LogFormat {
    /// Human-readable console format (default).
    #[default]
    Human,
    /// One JSON object per line.
    Jsonl,
}

impl std::str::FromStr for LogFormat {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "human" | "pretty" => Ok(LogFormat::Human),
            "jsonl" | "json" => Ok(LogFormat::Jsonl),
            _ => Err(format!("unknown log format: {}", s)),
        }
    }
}

impl std::fmt::Display for LogFormat {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            LogFormat::Human => write!(f, "human"),
            LogFormat::Jsonl => write!(f, "jsonl"),
        }
    }
}

/// Log level filter.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LogLevel {
    Trace,
    Debug,
    Info,
    /// Default: a CLI that prints results on stdout stays quiet on stderr.
    #[default]
    Warn,
    Error,
    Off,
}

impl LogLevel {
    /// Level requested by `-v`/`-q` flags, if any.
    ///
    /// `-q` wins over `-v`. One `-v` is info, two debug, three or more trace.
    pub fn from_flags(verbose: u8, quiet: bool) -> Option<LogLevel> {
        if quiet {
            return Some(LogLevel::Off);
        }
        match verbose {
            0 => None,
            1 => Some(LogLevel::Info),
            2 => Some(LogLevel::Debug),
            _ => Some(LogLevel::Trace),
        }
    }
}

impl std::str::FromStr for LogLevel {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "trace" => Ok(LogLevel::Trace),
            "debug" => Ok(LogLevel::Debug),
            "info" => Ok(LogLevel::Info),
            "warn" | "warning" => Ok(LogLevel::Warn),
            "error" => Ok(LogLevel::Error),
            "off" | "quiet" => Ok(LogLevel::Off),
            _ => Err(format!("unknown log level: {}", s)),
        }
    }
}

impl std::fmt::Display for LogLevel {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            LogLevel::Trace => write!(f, "trace"),
            LogLevel::Debug => write!(f, "debug"),
            LogLevel::Info => write!(f, "info"),
            LogLevel::Warn => write!(f, "warn"),
            LogLevel::Error => write!(f, "error"),
            LogLevel::Off => write!(f, "off"),
        }
    }
}

impl From<LogLevel> for tracing_subscriber::filter::LevelFilter {
    fn from(level: LogLevel) -> Self {
        match level {
            LogLevel::Trace => tracing_subscriber::filter::LevelFilter::TRACE,
            LogLevel::Debug => tracing_subscriber::filter::LevelFilter::DEBUG,
            LogLevel::Info => tracing_subscriber::filter::LevelFilter::INFO,
            LogLevel::Warn => tracing_subscriber::filter::LevelFilter::WARN,
            LogLevel::Error => tracing_subscriber::filter::LevelFilter::ERROR,
            LogLevel::Off => tracing_subscriber::filter::LevelFilter::OFF,
        }
    }
}

/// Logging configuration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LogConfig {
    pub format: LogFormat,
    pub level: LogLevel,
    /// Timestamps in human output.
    pub timestamps: bool,
    /// Set when the level came from the CLI or `DX_LOG`, which then
    /// override any `RUST_LOG` directive.
    pub explicit_level: bool,
}

impl Default for LogConfig {
    fn default() -> Self {
        LogConfig {
            format: LogFormat::Human,
            level: LogLevel::Warn,
            timestamps: false,
            explicit_level: false,
        }
    }
}

impl LogConfig {
    /// Create config from the process environment and CLI overrides.
    pub fn from_env(cli_level: Option<LogLevel>, cli_format: Option<LogFormat>) -> Self {
        Self::resolve(|key| std::env::var(key).ok(), cli_level, cli_format)
    }

    /// Same as [`LogConfig::from_env`], reading variables through `lookup`.
    pub fn resolve(
        lookup: impl Fn(&str) -> Option<String>,
        cli_level: Option<LogLevel>,
        cli_format: Option<LogFormat>,
    ) -> Self {
        let mut config = LogConfig::default();

        if let Some(level) = lookup("DX_LOG").and_then(|v| v.parse::<LogLevel>().ok()) {
            config.level = level;
            config.explicit_level = true;
        } else if let Some(val) = lookup("RUST_LOG") {
            config.level = coarse_level(&val).unwrap_or(config.level);
        }

        if let Some(format) = lookup("DX_LOG_FORMAT").and_then(|v| v.parse::<LogFormat>().ok()) {
            config.format = format;
        }

        if let Some(level) = cli_level {
            config.level = level;
            config.explicit_level = true;
        }
        if let Some(format) = cli_format {
            config.format = format;
        }

        config
    }

    pub fn with_format(mut self, format: LogFormat) -> Self {
        self.format = format;
        self
    }

    pub fn with_level(mut self, level: LogLevel) -> Self {
        self.level = level;
        self.explicit_level = true;
        self
    }

    pub fn with_timestamps(mut self, enabled: bool) -> Self {
        self.timestamps = enabled;
        self
    }

    /// `EnvFilter` directive covering the library and the binary.
    pub fn directive(&self) -> String {
        format!("dx={0},dx_core={0}", self.level)
    }
}

/// Most verbose level named anywhere in a `RUST_LOG` directive.
fn coarse_level(directive: &str) -> Option<LogLevel> {
    ["trace", "debug", "info", "warn", "error"]
        .iter()
        .find(|name| directive.contains(*name))
        .and_then(|name| name.parse().ok())
}
