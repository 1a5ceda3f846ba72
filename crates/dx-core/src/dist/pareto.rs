//! Pareto (type I) distribution.
//!
//! Shape α > 0 and scale θ > 0, supported on `[θ, ∞)`:
//!
//! f(x) = α θ^α / x^(α+1)
//!
//! Everything has a closed form. The tail is evaluated directly as
//! (θ/x)^α and the cdf is derived from it, so `ccdf` keeps full relative
//! precision far into the tail.

use super::{validate, ContinuousUnivariate, FitMle};
use dx_common::{Error, Result, Support};
use dx_math::Real;
use rand::Rng;
use serde::Serialize;

/// Pareto(α, θ).
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Pareto<T = f64> {
    shape: T,
    scale: T,
}

impl<T: Real> Pareto<T> {
    pub const NAME: &'static str = "pareto";

    /// Build Pareto(α, θ). Both must be strictly positive.
    pub fn new(shape: T, scale: T) -> Result<Self> {
        let shape = validate::positive(Self::NAME, "shape", shape)?;
        let scale = validate::positive(Self::NAME, "scale", scale)?;
        Ok(Pareto { shape, scale })
    }

    /// Build from arguments of narrower numeric types, widening both to `T`.
    ///
    /// ```
    /// use dx_core::dist::Pareto;
    /// let d: Pareto<f64> = Pareto::promoted(3i32, 2.0f32).unwrap();
    /// assert_eq!(d.params(), (3.0, 2.0));
    /// ```
    pub fn promoted<A: Into<T>, B: Into<T>>(shape: A, scale: B) -> Result<Self> {
        Self::new(shape.into(), scale.into())
    }

    /// Pareto(α, 1).
    pub fn with_shape(shape: T) -> Result<Self> {
        Self::new(shape, T::one())
    }

    pub fn shape(&self) -> T {
        self.shape
    }

    pub fn scale(&self) -> T {
        self.scale
    }

    pub fn params(&self) -> (T, T) {
        (self.shape, self.scale)
    }
}

impl<T: Real> Default for Pareto<T> {
    fn default() -> Self {
        Pareto {
            shape: T::one(),
            scale: T::one(),
        }
    }
}

impl<T: Real> ContinuousUnivariate for Pareto<T> {
    type Value = T;

    fn name(&self) -> &'static str {
        Self::NAME
    }

    fn support(&self) -> Support<T> {
        Support::new(self.scale, T::infinity())
    }

    fn pdf(&self, x: T) -> T {
        if x.is_nan() {
            return x;
        }
        if x >= self.scale {
            self.shape * (self.scale / x).powf(self.shape) / x
        } else {
            T::zero()
        }
    }

    fn logpdf(&self, x: T) -> T {
        if x.is_nan() {
            return x;
        }
        if x >= self.scale {
            self.shape.ln() + self.shape * self.scale.ln() - (self.shape + T::one()) * x.ln()
        } else {
            T::neg_infinity()
        }
    }

    fn cdf(&self, x: T) -> T {
        T::one() - self.ccdf(x)
    }

    fn ccdf(&self, x: T) -> T {
        if x.is_nan() {
            return x;
        }
        if x >= self.scale {
            (self.scale / x).powf(self.shape)
        } else {
            T::one()
        }
    }

    fn logcdf(&self, x: T) -> T {
        (-self.ccdf(x)).ln_1p()
    }

    fn logccdf(&self, x: T) -> T {
        if x.is_nan() {
            return x;
        }
        if x >= self.scale {
            self.shape * (self.scale / x).ln()
        } else {
            T::zero()
        }
    }

    fn quantile(&self, p: T) -> T {
        self.cquantile(T::one() - p)
    }

    fn cquantile(&self, p: T) -> T {
        if !(p >= T::zero() && p <= T::one()) {
            return T::nan();
        }
        self.scale / p.powf(self.shape.recip())
    }

    fn mean(&self) -> T {
        let a = self.shape;
        if a > T::one() {
            a * self.scale / (a - T::one())
        } else {
            T::infinity()
        }
    }

    fn median(&self) -> T {
        self.scale * T::of(2.0).powf(self.shape.recip())
    }

    fn var(&self) -> T {
        let a = self.shape;
        if a > T::of(2.0) {
            let am1 = a - T::one();
            self.scale * self.scale * a / (am1 * am1 * (a - T::of(2.0)))
        } else {
            T::infinity()
        }
    }

    fn mode(&self) -> Result<T> {
        Ok(self.scale)
    }

    fn skewness(&self) -> T {
        let a = self.shape;
        if a > T::of(3.0) {
            T::of(2.0) * (T::one() + a) / (a - T::of(3.0)) * ((a - T::of(2.0)) / a).sqrt()
        } else {
            T::nan()
        }
    }

    fn kurtosis(&self) -> T {
        let a = self.shape;
        if a > T::of(4.0) {
            let poly = a * a * a + a * a - T::of(6.0) * a - T::of(2.0);
            T::of(6.0) * poly / (a * (a - T::of(3.0)) * (a - T::of(4.0)))
        } else {
            T::nan()
        }
    }

    fn entropy(&self) -> T {
        (self.scale / self.shape).ln() + self.shape.recip() + T::one()
    }

    fn rand<R: Rng + ?Sized>(&self, rng: &mut R) -> T {
        self.scale * (T::sample_exp1(rng) / self.shape).exp()
    }
}

impl<T: Real> FitMle for Pareto<T> {
    /// θ̂ = min xᵢ and α̂ = n / Σ ln(xᵢ/θ̂).
    fn fit_mle(samples: &[T]) -> Result<Self> {
        if samples.is_empty() {
            return Err(Error::EmptySample {
                distribution: Self::NAME,
            });
        }
        if let Some((index, value)) = samples.iter().enumerate().find(|(_, x)| !x.is_finite()) {
            return Err(Error::NonFiniteSample {
                distribution: Self::NAME,
                index,
                value: value.as_f64(),
            });
        }

        let scale = samples.iter().copied().fold(T::infinity(), T::min);
        let scale = validate::positive(Self::NAME, "scale estimate (sample minimum)", scale)?;

        let log_scale = scale.ln();
        let log_excess = samples
            .iter()
            .fold(T::zero(), |acc, &x| acc + (x.ln() - log_scale));
        if log_excess <= T::zero() {
            return Err(Error::DegenerateSample {
                distribution: Self::NAME,
                message: format!(
                    "sum of ln(x / {}) over {} observations is zero, shape estimate is unbounded",
                    scale,
                    samples.len()
                ),
            });
        }

        let shape = T::of(samples.len() as f64) / log_excess;
        tracing::debug!(
            n = samples.len(),
            shape = %shape,
            scale = %scale,
            "fitted pareto by maximum likelihood"
        );
        Self::new(shape, scale)
    }
}

impl<T: Real> rand::distr::Distribution<T> for Pareto<T> {
    fn sample<R: Rng + ?Sized>(&self, rng: &mut R) -> T {
        ContinuousUnivariate::rand(self, rng)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    fn approx_eq(a: f64, b: f64, tol: f64) -> bool {
        (a - b).abs() <= tol * (1.0 + a.abs().max(b.abs()))
    }

    #[test]
    fn rejects_non_positive_parameters() {
        assert!(Pareto::<f64>::new(0.0, 1.0).is_err());
        assert!(Pareto::<f64>::new(1.0, 0.0).is_err());
        assert!(Pareto::<f64>::new(-2.0, 1.0).is_err());
        assert!(Pareto::<f64>::new(f64::NAN, 1.0).is_err());
        let err = Pareto::<f64>::new(2.0, -1.0).unwrap_err();
        assert_eq!(
            err.to_string(),
            "invalid pareto parameter: scale must be > 0, got -1"
        );
    }

    #[test]
    fn constructors_and_accessors() {
        let d: Pareto<f64> = Pareto::default();
        assert_eq!(d.params(), (1.0, 1.0));
        let d = Pareto::with_shape(2.5f32).unwrap();
        assert_eq!(d.shape(), 2.5);
        assert_eq!(d.scale(), 1.0);
        let d: Pareto<f64> = Pareto::promoted(4u8, 0.5f32).unwrap();
        assert_eq!(d.params(), (4.0, 0.5));
    }

    #[test]
    fn shape_three_scale_two() {
        let d = Pareto::<f64>::new(3.0, 2.0).unwrap();
        assert_eq!(d.mean(), 3.0);
        assert!(approx_eq(d.median(), 2.519_842_099_789_746, 1e-14));
        assert!(approx_eq(d.pdf(4.0), 0.09375, 1e-15));
        assert!(approx_eq(d.ccdf(4.0), 0.125, 1e-15));
        assert!(approx_eq(d.cdf(4.0), 0.875, 1e-15));
        assert_eq!(d.var(), 3.0);
        assert_eq!(d.mode().unwrap(), 2.0);
        assert_eq!(d.minimum(), 2.0);
        assert_eq!(d.maximum(), f64::INFINITY);
    }

    #[test]
    fn moment_thresholds() {
        let d = Pareto::<f64>::new(1.0, 1.0).unwrap();
        assert_eq!(d.mean(), f64::INFINITY);
        let d = Pareto::<f64>::new(2.0, 1.0).unwrap();
        assert_eq!(d.mean(), 2.0);
        assert_eq!(d.var(), f64::INFINITY);
        let d = Pareto::<f64>::new(2.5, 1.0).unwrap();
        assert!(approx_eq(d.var(), 20.0 / 9.0, 1e-14));
        let d = Pareto::<f64>::new(3.0, 1.0).unwrap();
        assert!(d.var().is_finite());
        assert!(d.skewness().is_nan());
        let d = Pareto::<f64>::new(4.0, 1.0).unwrap();
        assert!(d.skewness().is_finite());
        assert!(d.kurtosis().is_nan());
        let d = Pareto::<f64>::new(5.0, 1.0).unwrap();
        assert!(d.kurtosis().is_finite());
    }

    #[test]
    fn higher_moments_known_values() {
        // α=5: skew = 12/2 * sqrt(3/5), kurt = 6 * 118 / (5 * 2 * 1)
        let d = Pareto::<f64>::new(5.0, 3.0).unwrap();
        assert!(approx_eq(d.skewness(), 6.0 * 0.6f64.sqrt(), 1e-14));
        assert!(approx_eq(d.kurtosis(), 70.8, 1e-14));
    }

    #[test]
    fn below_scale_limits() {
        let d = Pareto::<f64>::new(2.0, 3.0).unwrap();
        assert_eq!(d.pdf(2.9), 0.0);
        assert_eq!(d.logpdf(2.9), f64::NEG_INFINITY);
        assert_eq!(d.cdf(2.9), 0.0);
        assert_eq!(d.ccdf(2.9), 1.0);
        assert_eq!(d.logccdf(2.9), 0.0);
        assert_eq!(d.logcdf(2.9), f64::NEG_INFINITY);
        assert_eq!(d.hazard(2.9), 0.0);
    }

    #[test]
    fn boundary_at_scale() {
        let d = Pareto::<f64>::new(2.0, 3.0).unwrap();
        assert!(approx_eq(d.pdf(3.0), 2.0 / 3.0, 1e-15));
        assert_eq!(d.cdf(3.0), 0.0);
        assert_eq!(d.ccdf(3.0), 1.0);
        assert!(d.insupport(3.0));
        assert!(!d.insupport(2.999));
    }

    #[test]
    fn nan_propagates() {
        let d = Pareto::<f64>::new(2.0, 1.0).unwrap();
        assert!(d.pdf(f64::NAN).is_nan());
        assert!(d.logpdf(f64::NAN).is_nan());
        assert!(d.cdf(f64::NAN).is_nan());
        assert!(d.logccdf(f64::NAN).is_nan());
        assert!(d.quantile(f64::NAN).is_nan());
    }

    #[test]
    fn quantile_endpoints() {
        let d = Pareto::<f64>::new(2.5, 1.5).unwrap();
        assert_eq!(d.quantile(0.0), 1.5);
        assert_eq!(d.quantile(1.0), f64::INFINITY);
        assert_eq!(d.cquantile(1.0), 1.5);
        assert_eq!(d.cquantile(0.0), f64::INFINITY);
        assert!(d.quantile(-0.1).is_nan());
        assert!(d.cquantile(1.1).is_nan());
    }

    #[test]
    fn quantile_inverts_cdf() {
        let d = Pareto::<f64>::new(1.7, 0.4).unwrap();
        for &p in &[0.001, 0.1, 0.5, 0.77, 0.999] {
            assert!(approx_eq(d.cdf(d.quantile(p)), p, 1e-12), "p={}", p);
            assert!(approx_eq(d.ccdf(d.cquantile(p)), p, 1e-12), "p={}", p);
        }
    }

    #[test]
    fn log_forms_agree() {
        let d = Pareto::<f64>::new(2.0, 1.0).unwrap();
        for &x in &[1.0, 1.5, 10.0, 1e6] {
            assert!(approx_eq(d.logpdf(x), d.pdf(x).ln(), 1e-13));
            assert!(approx_eq(d.logccdf(x), d.ccdf(x).ln(), 1e-13));
        }
        assert!(approx_eq(d.logcdf(10.0), 0.99f64.ln(), 1e-14));
    }

    #[test]
    fn hazard_is_shape_over_x() {
        let d = Pareto::<f64>::new(3.0, 2.0).unwrap();
        assert!(approx_eq(d.hazard(4.0), 0.75, 1e-13));
        assert!(approx_eq(d.cumulative_hazard(4.0), 3.0 * 2f64.ln(), 1e-14));
    }

    #[test]
    fn entropy_formula() {
        let d = Pareto::<f64>::new(2.0, 4.0).unwrap();
        assert!(approx_eq(d.entropy(), 2f64.ln() + 1.5, 1e-15));
    }

    #[test]
    fn fit_recovers_closed_form() {
        let xs = [2.0, 3.0, 4.0, 5.0];
        let d = Pareto::<f64>::fit_mle(&xs).unwrap();
        assert_eq!(d.scale(), 2.0);
        // Σ ln(x/2) = ln(1 · 1.5 · 2 · 2.5) = ln 7.5
        let expected = 4.0 / 7.5f64.ln();
        assert!(approx_eq(d.shape(), expected, 1e-14));
        assert!(approx_eq(d.shape(), 1.985_206, 1e-6));
    }

    #[test]
    fn fit_from_samples_recovers_parameters() {
        let truth = Pareto::<f64>::new(2.5, 1.5).unwrap();
        let mut rng = StdRng::seed_from_u64(11);
        let xs = truth.sample_n(&mut rng, 50_000);
        let fit = Pareto::<f64>::fit_mle(&xs).unwrap();
        assert!((fit.shape() - 2.5).abs() < 0.06, "shape={}", fit.shape());
        assert!((fit.scale() - 1.5).abs() < 1e-3, "scale={}", fit.scale());
        assert!(fit.loglikelihood(&xs) >= truth.loglikelihood(&xs));
    }

    #[test]
    fn fit_rejects_unusable_samples() {
        let err = Pareto::<f64>::fit_mle(&[]).unwrap_err();
        assert_eq!(err.code(), 20);

        let err = Pareto::<f64>::fit_mle(&[3.0, 3.0, 3.0]).unwrap_err();
        assert_eq!(err.code(), 21);

        // distinct values whose logarithms coincide
        let x = 1e300f64;
        let next = f64::from_bits(x.to_bits() + 1);
        let err = Pareto::<f64>::fit_mle(&[x, next]).unwrap_err();
        assert_eq!(err.code(), 21);
        assert!(err.to_string().contains("is zero"), "{}", err);
        assert!(!err.to_string().contains("equal"));

        let err = Pareto::<f64>::fit_mle(&[1.0, f64::INFINITY]).unwrap_err();
        assert!(matches!(err, Error::NonFiniteSample { index: 1, .. }));

        let err = Pareto::<f64>::fit_mle(&[-1.0, 2.0]).unwrap_err();
        assert_eq!(err.code(), 10);
    }

    #[test]
    fn samples_stay_in_support() {
        let d = Pareto::<f64>::new(0.8, 5.0).unwrap();
        let mut rng = StdRng::seed_from_u64(5);
        assert!(d.sample_n(&mut rng, 10_000).iter().all(|&x| x >= 5.0));
    }

    #[test]
    fn sample_median_converges() {
        let d = Pareto::<f64>::new(3.0, 2.0).unwrap();
        let mut rng = StdRng::seed_from_u64(21);
        let mut xs = d.sample_n(&mut rng, 40_001);
        xs.sort_by(|a, b| a.total_cmp(b));
        let median = xs[xs.len() / 2];
        assert!((median - d.median()).abs() < 0.02, "median={}", median);
    }

    #[test]
    fn single_precision() {
        let d = Pareto::new(3.0f32, 2.0f32).unwrap();
        assert_eq!(d.mean(), 3.0f32);
        assert!((d.pdf(4.0f32) - 0.09375).abs() < 1e-7);
        let fit = Pareto::fit_mle(&[2.0f32, 3.0, 4.0, 5.0]).unwrap();
        assert!((fit.shape() - 1.985_206).abs() < 1e-5);
    }
}
