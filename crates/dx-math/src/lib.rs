//! dx math utilities.

pub mod math;

pub use math::gamma::*;
pub use math::real::Real;
pub use math::stable::*;
