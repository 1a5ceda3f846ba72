//! dx common types and errors.
//!
//! This crate provides foundational types shared across dx crates:
//! - Structured error types with stable codes
//! - Support-interval declarations for distributions
//! - Output format specifications and real-number rendering

pub mod error;
pub mod output;
pub mod support;

pub use error::{format_error_human, Error, ErrorCategory, Result, StructuredError};
pub use output::{format_real, serialize_opt_real, serialize_real, OutputFormat};
pub use support::Support;
