//! Error types for dx.
//!
//! This module provides structured error handling with:
//! - Stable error codes for machine parsing
//! - Category classification for error grouping
//! - Remediation suggestions for humans
//!
//! # Human-Facing Output
//!
//! ```text
//! ✗ Invalid Parameter
//!   Reason: invalid pareto parameter: scale must be > 0, got 0
//!   Fix: Check the shape and scale arguments against the distribution's parameter domain.
//! ```
//!
//! # Agent-Facing Output
//!
//! ```json
//! {
//!   "code": 10,
//!   "category": "parameter",
//!   "message": "invalid pareto parameter: scale must be > 0, got 0",
//!   "context": { "distribution": "pareto" }
//! }
//! ```

use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use thiserror::Error;

/// Result type alias for dx operations.
pub type Result<T> = std::result::Result<T, Error>;

/// Error categories for grouping related errors.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ErrorCategory {
    /// Distribution parameters or statistics outside their domain.
    Parameter,
    /// Unusable input to a fitting routine.
    Sample,
    /// Configuration file or environment errors.
    Config,
    /// File I/O and serialization errors.
    Io,
}

impl std::fmt::Display for ErrorCategory {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ErrorCategory::Parameter => write!(f, "parameter"),
            ErrorCategory::Sample => write!(f, "sample"),
            ErrorCategory::Config => write!(f, "config"),
            ErrorCategory::Io => write!(f, "io"),
        }
    }
}

/// Unified error type for dx.
#[derive(Error, Debug)]
pub enum Error {
    // Parameter errors (10-19)
    #[error("invalid {distribution} parameter: {message}")]
    InvalidParameter {
        distribution: &'static str,
        message: String,
    },

    #[error("{operation} is undefined for {distribution}: {message}")]
    UndefinedOperation {
        distribution: &'static str,
        operation: &'static str,
        message: String,
    },

    // Sample errors (20-29)
    #[error("cannot fit {distribution} to an empty sample")]
    EmptySample { distribution: &'static str },

    #[error("degenerate sample for {distribution}: {message}")]
    DegenerateSample {
        distribution: &'static str,
        message: String,
    },

    #[error("non-finite value {value} at index {index} in {distribution} sample")]
    NonFiniteSample {
        distribution: &'static str,
        index: usize,
        value: f64,
    },

    // Configuration errors (30-39)
    #[error("configuration error: {0}")]
    Config(String),

    // I/O errors (60-69)
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON serialization error: {0}")]
    Json(#[from] serde_json::Error),
}

impl Error {
    /// Build an [`Error::InvalidParameter`].
    pub fn invalid_parameter(distribution: &'static str, message: impl Into<String>) -> Self {
        Error::InvalidParameter {
            distribution,
            message: message.into(),
        }
    }

    /// Build an [`Error::UndefinedOperation`].
    pub fn undefined(
        distribution: &'static str,
        operation: &'static str,
        message: impl Into<String>,
    ) -> Self {
        Error::UndefinedOperation {
            distribution,
            operation,
            message: message.into(),
        }
    }

    /// Returns the error code for this error type.
    ///
    /// Error codes are stable and grouped by category:
    /// - 10-19: Parameter errors
    /// - 20-29: Sample errors
    /// - 30-39: Configuration errors
    /// - 60-69: I/O errors
    pub fn code(&self) -> u32 {
        match self {
            Error::InvalidParameter { .. } => 10,
            Error::UndefinedOperation { .. } => 11,
            Error::EmptySample { .. } => 20,
            Error::DegenerateSample { .. } => 21,
            Error::NonFiniteSample { .. } => 22,
            Error::Config(_) => 30,
            Error::Io(_) => 60,
            Error::Json(_) => 61,
        }
    }

    /// Returns the error category for grouping and filtering.
    pub fn category(&self) -> ErrorCategory {
        match self {
            Error::InvalidParameter { .. } | Error::UndefinedOperation { .. } => {
                ErrorCategory::Parameter
            }
            Error::EmptySample { .. }
            | Error::DegenerateSample { .. }
            | Error::NonFiniteSample { .. } => ErrorCategory::Sample,
            Error::Config(_) => ErrorCategory::Config,
            Error::Io(_) | Error::Json(_) => ErrorCategory::Io,
        }
    }

    /// The distribution the error concerns, if any.
    pub fn distribution(&self) -> Option<&'static str> {
        match self {
            Error::InvalidParameter { distribution, .. }
            | Error::UndefinedOperation { distribution, .. }
            | Error::EmptySample { distribution }
            | Error::DegenerateSample { distribution, .. }
            | Error::NonFiniteSample { distribution, .. } => Some(*distribution),
            Error::Config(_) | Error::Io(_) | Error::Json(_) => None,
        }
    }

    /// Returns a human-readable remediation hint.
    pub fn remediation(&self) -> &'static str {
        match self {
            Error::InvalidParameter { .. } => {
                "Check the shape and scale arguments against the distribution's parameter domain."
            }
            Error::UndefinedOperation { .. } => {
                "This statistic does not exist for the given parameters. Choose parameters inside its domain."
            }
            Error::EmptySample { .. } => "Provide at least one observation to fit.",
            Error::DegenerateSample { .. } => {
                "The observations carry no spread information. Provide at least two distinct values."
            }
            Error::NonFiniteSample { .. } => "Remove NaN and infinite values from the sample.",
            Error::Config(_) => {
                "Run 'dx config show' to inspect the resolved configuration, or check the TOML syntax."
            }
            Error::Io(_) => "Check that the path exists and is readable. Retry the operation.",
            Error::Json(_) => "Internal serialization failure. Report it with the command line used.",
        }
    }

    /// Returns a short headline for human-readable output.
    pub fn headline(&self) -> &'static str {
        match self {
            Error::InvalidParameter { .. } => "Invalid Parameter",
            Error::UndefinedOperation { .. } => "Undefined Operation",
            Error::EmptySample { .. } => "Empty Sample",
            Error::DegenerateSample { .. } => "Degenerate Sample",
            Error::NonFiniteSample { .. } => "Non-finite Sample Value",
            Error::Config(_) => "Configuration Error",
            Error::Io(_) => "I/O Error",
            Error::Json(_) => "JSON Serialization Error",
        }
    }
}

/// Structured error response for JSON output.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StructuredError {
    /// Stable error code.
    pub code: u32,

    /// Error category for grouping.
    pub category: ErrorCategory,

    /// Human-readable error message.
    pub message: String,

    /// Additional structured context (e.g., distribution, sample index).
    #[serde(default, skip_serializing_if = "HashMap::is_empty")]
    pub context: HashMap<String, serde_json::Value>,
}

impl From<&Error> for StructuredError {
    fn from(err: &Error) -> Self {
        let mut context = HashMap::new();

        if let Some(distribution) = err.distribution() {
            context.insert("distribution".to_string(), serde_json::json!(distribution));
        }
        match err {
            Error::UndefinedOperation { operation, .. } => {
                context.insert("operation".to_string(), serde_json::json!(operation));
            }
            Error::NonFiniteSample { index, .. } => {
                context.insert("index".to_string(), serde_json::json!(index));
            }
            _ => {}
        }

        StructuredError {
            code: err.code(),
            category: err.category(),
            message: err.to_string(),
            context,
        }
    }
}

impl StructuredError {
    /// Add additional context to the error.
    pub fn with_context(mut self, key: impl Into<String>, value: impl Serialize) -> Self {
        if let Ok(v) = serde_json::to_value(value) {
            self.context.insert(key.into(), v);
        }
        self
    }

    /// Serialize to JSON string.
    pub fn to_json(&self) -> String {
        serde_json::to_string(self).unwrap_or_else(|_| {
            format!(r#"{{"code":{},"error":"serialization_failed"}}"#, self.code)
        })
    }
}

/// Format an error for human-readable stderr output.
///
/// Output format:
/// ```text
/// ✗ [Headline]
///   Reason: [Error message]
///   Fix: [Remediation hint]
/// ```
pub fn format_error_human(err: &Error, use_color: bool) -> String {
    let (red, cyan, reset) = if use_color {
        ("\x1b[31m", "\x1b[36m", "\x1b[0m")
    } else {
        ("", "", "")
    };

    format!(
        "{red}✗{reset} {headline}\n  Reason: {message}\n  {cyan}Fix:{reset} {remediation}",
        red = red,
        cyan = cyan,
        reset = reset,
        headline = err.headline(),
        message = err,
        remediation = err.remediation()
    )
}
