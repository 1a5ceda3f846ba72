//! Support-interval declarations.
//!
//! Every continuous distribution declares the closed interval on which its
//! density can be non-zero. Generic dispatch (the CLI, `insupport` checks,
//! report rendering) reads this declaration instead of knowing each family.

use crate::output::serialize_real;
use serde::Serialize;

/// Closed support interval `[lower, upper]`; either end may be infinite.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
#[serde(bound(serialize = "T: Copy + Into<f64>"))]
pub struct Support<T> {
    #[serde(serialize_with = "serialize_real")]
    pub lower: T,
    #[serde(serialize_with = "serialize_real")]
    pub upper: T,
}

impl<T: Copy + PartialOrd> Support<T> {
    /// Declare `[lower, upper]`.
    pub fn new(lower: T, upper: T) -> Self {
        Support { lower, upper }
    }

    /// Whether `x` lies in the interval. NaN is never contained.
    pub fn contains(&self, x: T) -> bool {
        self.lower <= x && x <= self.upper
    }
}

impl<T: Copy + Into<f64>> std::fmt::Display for Support<T> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let lower: f64 = self.lower.into();
        let upper: f64 = self.upper.into();
        let open_upper = if upper.is_infinite() { ")" } else { "]" };
        let open_lower = if lower.is_infinite() { "(" } else { "[" };
        write!(f, "{}{}, {}{}", open_lower, lower, upper, open_upper)
    }
}
