//! Constructor argument checks.
//!
//! Each check returns the accepted value so constructors can bind it
//! directly, and reports failures as [`Error::InvalidParameter`].

use dx_common::{Error, Result};
use dx_math::Real;

/// Require `value > 0`. NaN fails.
pub fn positive<T: Real>(distribution: &'static str, name: &str, value: T) -> Result<T> {
    if value > T::zero() {
        Ok(value)
    } else {
        Err(Error::invalid_parameter(
            distribution,
            format!("{} must be > 0, got {}", name, value),
        ))
    }
}

/// Require a non-negative integer and widen it to `u64`.
pub fn non_negative_integer(distribution: &'static str, name: &str, value: i64) -> Result<u64> {
    u64::try_from(value).map_err(|_| {
        Error::invalid_parameter(
            distribution,
            format!("{} must be a non-negative integer, got {}", name, value),
        )
    })
}

/// Require a real value that is a non-negative integer (`3.0`, not `3.5`).
pub fn integral<T: Real>(distribution: &'static str, name: &str, value: T) -> Result<u64> {
    let x = value.as_f64();
    // u64::MAX as f64 rounds up to 2^64, so the bound is exclusive
    if x.is_finite() && x >= 0.0 && x.fract() == 0.0 && x < u64::MAX as f64 {
        Ok(x as u64)
    } else {
        Err(Error::invalid_parameter(
            distribution,
            format!("{} must be a non-negative integer, got {}", name, value),
        ))
    }
}
