//! Core math modules.

pub mod gamma;
pub mod real;
pub mod stable;
