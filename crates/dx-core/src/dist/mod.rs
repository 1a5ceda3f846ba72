//! Continuous univariate distributions.
//!
//! Each family is a small `Copy` value holding validated parameters and
//! implementing [`ContinuousUnivariate`]. Families with a closed-form
//! maximum-likelihood estimator also implement [`FitMle`].
//!
//! Families are generic over the precision `T: Real` (`f32` or `f64`);
//! every evaluation returns a value of the same precision.
//!
//! ```
//! use dx_core::dist::{ContinuousUnivariate, Pareto};
//!
//! let d = Pareto::new(3.0, 2.0).unwrap();
//! assert_eq!(d.mean(), 3.0);
//! assert_eq!(d.pdf(4.0), 0.09375);
//! ```

pub mod erlang;
pub mod family;
pub mod pareto;
pub mod summary;
pub mod validate;

pub use erlang::Erlang;
pub use family::{AnyDist, EvalFn, Family};
pub use pareto::Pareto;
pub use summary::Summary;

use dx_common::{Result, Support};
use dx_math::Real;
use num_traits::{Float, Zero};
use rand::Rng;

/// A continuous distribution over the real line.
///
/// Evaluations outside the support return the limiting value
/// (density 0, log-density −∞, cdf 0 or 1) rather than an error.
/// NaN arguments propagate.
pub trait ContinuousUnivariate {
    /// Precision of arguments and results.
    type Value: Real;

    /// Lowercase family name, as used in errors and output.
    fn name(&self) -> &'static str;

    /// Closed interval on which the density can be non-zero.
    fn support(&self) -> Support<Self::Value>;

    fn minimum(&self) -> Self::Value {
        self.support().lower
    }

    fn maximum(&self) -> Self::Value {
        self.support().upper
    }

    fn insupport(&self, x: Self::Value) -> bool {
        self.support().contains(x)
    }

    fn pdf(&self, x: Self::Value) -> Self::Value;
    fn logpdf(&self, x: Self::Value) -> Self::Value;
    fn cdf(&self, x: Self::Value) -> Self::Value;

    /// Survival function, `1 - cdf(x)` computed without cancellation.
    fn ccdf(&self, x: Self::Value) -> Self::Value;

    fn logcdf(&self, x: Self::Value) -> Self::Value;
    fn logccdf(&self, x: Self::Value) -> Self::Value;

    /// Inverse of `cdf`. NaN outside `[0, 1]`.
    fn quantile(&self, p: Self::Value) -> Self::Value;

    /// Inverse of `ccdf`. NaN outside `[0, 1]`.
    fn cquantile(&self, p: Self::Value) -> Self::Value;

    fn mean(&self) -> Self::Value;
    fn var(&self) -> Self::Value;

    fn std(&self) -> Self::Value {
        self.var().sqrt()
    }

    fn median(&self) -> Self::Value {
        self.quantile(Self::Value::of(0.5))
    }

    /// Location of the density maximum, or an error where none exists.
    fn mode(&self) -> Result<Self::Value>;

    fn skewness(&self) -> Self::Value;

    /// Excess kurtosis (zero for the normal distribution).
    fn kurtosis(&self) -> Self::Value;

    /// Differential entropy in nats.
    fn entropy(&self) -> Self::Value;

    /// Hazard rate `pdf(x) / ccdf(x)`, evaluated in log space.
    fn hazard(&self, x: Self::Value) -> Self::Value {
        let log_pdf = self.logpdf(x);
        let log_surv = self.logccdf(x);
        if log_pdf.is_nan() || log_surv.is_nan() {
            return Self::Value::nan();
        }
        if log_surv == Self::Value::neg_infinity() {
            return Self::Value::infinity();
        }
        if log_pdf == Self::Value::neg_infinity() {
            return Self::Value::zero();
        }
        (log_pdf - log_surv).exp()
    }

    /// Cumulative hazard `-ln ccdf(x)`.
    fn cumulative_hazard(&self, x: Self::Value) -> Self::Value {
        -self.logccdf(x)
    }

    /// Sum of `logpdf` over the observations.
    fn loglikelihood(&self, xs: &[Self::Value]) -> Self::Value {
        xs.iter()
            .fold(Self::Value::zero(), |acc, &x| acc + self.logpdf(x))
    }

    /// One variate drawn from `rng`.
    fn rand<R: Rng + ?Sized>(&self, rng: &mut R) -> Self::Value;

    fn sample_n<R: Rng + ?Sized>(&self, rng: &mut R, n: usize) -> Vec<Self::Value> {
        tracing::trace!(distribution = self.name(), n, "drawing sample batch");
        (0..n).map(|_| self.rand(rng)).collect()
    }
}

/// Maximum-likelihood estimation from a sample.
pub trait FitMle: ContinuousUnivariate + Sized {
    fn fit_mle(samples: &[Self::Value]) -> Result<Self>;
}
