//! Floating-point precision abstraction.
//!
//! Distributions are generic over a [`Real`] type so callers can pick `f32`
//! or `f64`. The special-function kernels in this crate run in `f64`;
//! [`Real::of`] and [`Real::as_f64`] move values across that boundary.
//! The sampling hooks bind the precision to the variate generators of
//! `rand_distr` without leaking its trait bounds into every signature.

use num_traits::{Float, FloatConst};
use rand::Rng;
use rand_distr::{Distribution, Exp1, Gamma};
use std::fmt::{Debug, Display};

/// A floating-point type usable as distribution precision.
pub trait Real:
    Float + FloatConst + Debug + Display + Default + Send + Sync + 'static
{
    /// Convert from `f64`, rounding to this precision.
    fn of(x: f64) -> Self;

    /// Widen (or pass through) to `f64`.
    fn as_f64(self) -> f64;

    /// One standard-exponential variate, Exp(1).
    fn sample_exp1<R: Rng + ?Sized>(rng: &mut R) -> Self;

    /// One Gamma(shape, scale) variate.
    ///
    /// Returns NaN when the generator rejects the parameters
    /// (non-positive or non-finite shape or scale).
    fn sample_gamma<R: Rng + ?Sized>(shape: Self, scale: Self, rng: &mut R) -> Self;
}

macro_rules! impl_real {
    ($t:ty) => {
        impl Real for $t {
            #[inline]
            fn of(x: f64) -> Self {
                x as $t
            }

            #[inline]
            fn as_f64(self) -> f64 {
                self as f64
            }

            fn sample_exp1<R: Rng + ?Sized>(rng: &mut R) -> Self {
                Exp1.sample(rng)
            }

            fn sample_gamma<R: Rng + ?Sized>(shape: Self, scale: Self, rng: &mut R) -> Self {
                match Gamma::new(shape, scale) {
                    Ok(gamma) => gamma.sample(rng),
                    Err(_) => <$t>::NAN,
                }
            }
        }
    };
}

impl_real!(f32);
impl_real!(f64);
