//! Erlang distribution.
//!
//! The Gamma distribution restricted to an integer shape α ≥ 0, with
//! scale θ. Density on `[0, ∞)`:
//!
//! f(x) = x^(α−1) e^(−x/θ) / (Γ(α) θ^α)
//!
//! Evaluation delegates to the Gamma kernels in `dx_math` with rate 1/θ.
//! The scale is stored as given; the kernels return NaN for θ ≤ 0.

use super::{validate, ContinuousUnivariate};
use dx_common::{Error, Result, Support};
use dx_math::{
    gamma_cdf, gamma_cum_hazard, gamma_entropy, gamma_hazard, gamma_inv_cdf, gamma_inv_survival,
    gamma_log_cdf, gamma_log_pdf, gamma_log_survival, gamma_pdf, gamma_survival, Real,
};
use num_complex::Complex;
use rand::Rng;
use serde::Serialize;

/// Erlang(α, θ) with integer shape α and scale θ.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Erlang<T = f64> {
    shape: u64,
    scale: T,
}

impl<T: Real> Erlang<T> {
    pub const NAME: &'static str = "erlang";

    /// Build Erlang(α, θ).
    ///
    /// Fails when `shape` is negative. The scale is not checked.
    pub fn new(shape: i64, scale: T) -> Result<Self> {
        let shape = validate::non_negative_integer(Self::NAME, "shape", shape)?;
        Ok(Erlang { shape, scale })
    }

    /// Build from a real-valued shape, which must be a whole number.
    pub fn from_real_shape(shape: T, scale: T) -> Result<Self> {
        let shape = validate::integral(Self::NAME, "shape", shape)?;
        Ok(Erlang { shape, scale })
    }

    /// Erlang(α, 1).
    pub fn with_shape(shape: i64) -> Result<Self> {
        Self::new(shape, T::one())
    }

    pub fn shape(&self) -> u64 {
        self.shape
    }

    pub fn scale(&self) -> T {
        self.scale
    }

    /// Rate 1/θ.
    pub fn rate(&self) -> T {
        self.scale.recip()
    }

    pub fn params(&self) -> (u64, T) {
        (self.shape, self.scale)
    }

    /// Moment generating function (1 − tθ)^(−α).
    ///
    /// Finite for t < 1/θ; +∞ from the pole onward, where the integral diverges.
    pub fn mgf(&self, t: T) -> T {
        let base = T::one() - t * self.scale;
        if base <= T::zero() && self.shape > 0 {
            return T::infinity();
        }
        base.powf(-self.alpha())
    }

    /// Characteristic function (1 − itθ)^(−α).
    pub fn cf(&self, t: T) -> Complex<T> {
        Complex::new(T::one(), -(t * self.scale)).powf(-self.alpha())
    }

    fn alpha(&self) -> T {
        T::of(self.shape as f64)
    }

    /// (α, β) in the rate parameterization used by the Gamma kernels.
    fn kernel(&self) -> (f64, f64) {
        (self.shape as f64, self.rate().as_f64())
    }
}

impl<T: Real> Default for Erlang<T> {
    fn default() -> Self {
        Erlang {
            shape: 1,
            scale: T::one(),
        }
    }
}

impl<T: Real> ContinuousUnivariate for Erlang<T> {
    type Value = T;

    fn name(&self) -> &'static str {
        Self::NAME
    }

    fn support(&self) -> Support<T> {
        Support::new(T::zero(), T::infinity())
    }

    fn pdf(&self, x: T) -> T {
        let (a, b) = self.kernel();
        T::of(gamma_pdf(x.as_f64(), a, b))
    }

    fn logpdf(&self, x: T) -> T {
        let (a, b) = self.kernel();
        T::of(gamma_log_pdf(x.as_f64(), a, b))
    }

    fn cdf(&self, x: T) -> T {
        let (a, b) = self.kernel();
        T::of(gamma_cdf(x.as_f64(), a, b))
    }

    fn ccdf(&self, x: T) -> T {
        let (a, b) = self.kernel();
        T::of(gamma_survival(x.as_f64(), a, b))
    }

    fn logcdf(&self, x: T) -> T {
        let (a, b) = self.kernel();
        T::of(gamma_log_cdf(x.as_f64(), a, b))
    }

    fn logccdf(&self, x: T) -> T {
        let (a, b) = self.kernel();
        T::of(gamma_log_survival(x.as_f64(), a, b))
    }

    fn quantile(&self, p: T) -> T {
        let (a, b) = self.kernel();
        T::of(gamma_inv_cdf(p.as_f64(), a, b))
    }

    fn cquantile(&self, p: T) -> T {
        let (a, b) = self.kernel();
        T::of(gamma_inv_survival(p.as_f64(), a, b))
    }

    fn mean(&self) -> T {
        self.alpha() * self.scale
    }

    fn var(&self) -> T {
        self.alpha() * self.scale * self.scale
    }

    fn mode(&self) -> Result<T> {
        if self.shape < 1 {
            return Err(Error::undefined(
                Self::NAME,
                "mode",
                format!("shape must be >= 1, got {}", self.shape),
            ));
        }
        Ok((self.alpha() - T::one()) * self.scale)
    }

    fn skewness(&self) -> T {
        T::of(2.0) / self.alpha().sqrt()
    }

    fn kurtosis(&self) -> T {
        T::of(6.0) / self.alpha()
    }

    fn entropy(&self) -> T {
        let (a, b) = self.kernel();
        T::of(gamma_entropy(a, b))
    }

    fn hazard(&self, x: T) -> T {
        let (a, b) = self.kernel();
        T::of(gamma_hazard(x.as_f64(), a, b))
    }

    fn cumulative_hazard(&self, x: T) -> T {
        let (a, b) = self.kernel();
        T::of(gamma_cum_hazard(x.as_f64(), a, b))
    }

    fn rand<R: Rng + ?Sized>(&self, rng: &mut R) -> T {
        if self.shape == 0 {
            return T::zero();
        }
        T::sample_gamma(self.alpha(), self.scale, rng)
    }
}

impl<T: Real> rand::distr::Distribution<T> for Erlang<T> {
    fn sample<R: Rng + ?Sized>(&self, rng: &mut R) -> T {
        ContinuousUnivariate::rand(self, rng)
    }
}
