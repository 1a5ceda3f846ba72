//! Structured logging for dx.
//!
//! - stdout is reserved for command payloads (JSON/MD/summary output)
//! - stderr receives all log output (human or JSONL)
//!
//! ```ignore
//! use dx_core::logging::{init_logging, LogConfig};
//!
//! let config = LogConfig::from_env(None, None);
//! init_logging(&config);
//! tracing::debug!(n = 4, "fitting sample");
//! ```

pub mod config;

pub use config::{LogConfig, LogFormat, LogLevel};

use std::io::IsTerminal;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;
use tracing_subscriber::{fmt, EnvFilter};

/// Build the event filter for `config`.
///
/// An explicit level (CLI or `DX_LOG`) wins; otherwise a `RUST_LOG`
/// directive is used verbatim; otherwise the configured default level.
pub fn build_filter(config: &LogConfig) -> EnvFilter {
    if config.explicit_level {
        return EnvFilter::new(config.directive());
    }
    EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(config.directive()))
}

/// Initialize the logging subsystem.
///
/// Call once at startup. A second call leaves the first subscriber in place.
pub fn init_logging(config: &LogConfig) {
    let filter = build_filter(config);

    let result = match config.format {
        LogFormat::Human => {
            let use_ansi = std::io::stderr().is_terminal();
            let layer = fmt::layer()
                .with_writer(std::io::stderr)
                .with_target(false)
                .with_ansi(use_ansi);
            if config.timestamps {
                tracing_subscriber::registry()
                    .with(filter)
                    .with(layer)
                    .try_init()
            } else {
                tracing_subscriber::registry()
                    .with(filter)
                    .with(layer.without_time())
                    .try_init()
            }
        }
        LogFormat::Jsonl => {
            let layer = fmt::layer()
                .json()
                .flatten_event(true)
                .with_current_span(false)
                .with_writer(std::io::stderr);
            tracing_subscriber::registry()
                .with(filter)
                .with(layer)
                .try_init()
        }
    };

    if let Err(err) = result {
        tracing::debug!(error = %err, "logging already initialized");
    }
}
