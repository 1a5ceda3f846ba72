//! dx core library.
//!
//! This library provides:
//! - Erlang and Pareto distributions behind the [`dist::ContinuousUnivariate`] trait
//! - Runtime family dispatch for the CLI
//! - Configuration loading and validation
//! - Logging setup and exit codes
//!
//! The binary entry point is in `main.rs`.

pub mod config;
pub mod dist;
pub mod exit_codes;
pub mod logging;
pub mod output;

pub use dist::{ContinuousUnivariate, Erlang, FitMle, Pareto};
