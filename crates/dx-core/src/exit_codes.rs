//! Exit codes for the dx CLI.
//!
//! Exit codes communicate the outcome without requiring output parsing.
//!
//! Exit code ranges:
//! - 0: Success
//! - 10-19: User errors (fixable by changing arguments, input or config)
//! - 20-29: Internal errors (bugs or environment failures)

use dx_common::Error;

/// Exit codes for dx commands.
///
/// These codes are a stable contract for automation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[repr(i32)]
pub enum ExitCode {
    /// Success
    Clean = 0,

    // ========================================================================
    // User Errors (10-19)
    // ========================================================================
    /// Command line could not be parsed
    ArgsError = 10,

    /// Distribution parameter outside its domain
    ParameterError = 11,

    /// Statistic or function does not exist for the parameters
    UndefinedError = 12,

    /// Sample unusable for fitting
    SampleError = 13,

    /// Configuration file missing, malformed or invalid
    ConfigError = 14,

    // ========================================================================
    // Internal Errors (20-29)
    // ========================================================================
    /// Internal error (bug - please report)
    InternalError = 20,

    /// I/O error
    IoError = 21,
}

impl ExitCode {
    /// Convert to i32 for process exit.
    pub fn as_i32(self) -> i32 {
        self as i32
    }

    pub fn is_success(self) -> bool {
        self == ExitCode::Clean
    }

    /// Codes 10-19.
    pub fn is_user_error(self) -> bool {
        (10..20).contains(&self.as_i32())
    }

    /// Codes 20 and above.
    pub fn is_internal_error(self) -> bool {
        self.as_i32() >= 20
    }

    /// Stable name for JSON output.
    pub fn code_name(&self) -> &'static str {
        match self {
            ExitCode::Clean => "OK",
            ExitCode::ArgsError => "ERR_ARGS",
            ExitCode::ParameterError => "ERR_PARAMETER",
            ExitCode::UndefinedError => "ERR_UNDEFINED",
            ExitCode::SampleError => "ERR_SAMPLE",
            ExitCode::ConfigError => "ERR_CONFIG",
            ExitCode::InternalError => "ERR_INTERNAL",
            ExitCode::IoError => "ERR_IO",
        }
    }
}

impl From<&Error> for ExitCode {
    fn from(err: &Error) -> Self {
        match err {
            Error::InvalidParameter { .. } => ExitCode::ParameterError,
            Error::UndefinedOperation { .. } => ExitCode::UndefinedError,
            Error::EmptySample { .. }
            | Error::DegenerateSample { .. }
            | Error::NonFiniteSample { .. } => ExitCode::SampleError,
            Error::Config(_) => ExitCode::ConfigError,
            Error::Io(_) => ExitCode::IoError,
            Error::Json(_) => ExitCode::InternalError,
        }
    }
}

impl From<ExitCode> for i32 {
    fn from(code: ExitCode) -> Self {
        code as i32
    }
}

impl std::fmt::Display for ExitCode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{} ({})", self.code_name(), self.as_i32())
    }
}
