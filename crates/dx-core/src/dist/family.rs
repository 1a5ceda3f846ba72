//! Runtime family selection.
//!
//! The CLI chooses a family from a string, so it needs a value that can
//! be either distribution. [`AnyDist`] is that value, fixed at `f64`.

use super::{ContinuousUnivariate, Erlang, FitMle, Pareto};
use clap::ValueEnum;
use dx_common::{Error, Result, Support};
use num_complex::Complex;
use rand::Rng;
use serde::{Deserialize, Serialize};

/// Supported distribution families.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Family {
    Erlang,
    Pareto,
}

impl Family {
    pub fn name(self) -> &'static str {
        match self {
            Family::Erlang => Erlang::<f64>::NAME,
            Family::Pareto => Pareto::<f64>::NAME,
        }
    }

    /// Construct the family from real-valued parameters.
    ///
    /// Erlang requires a whole-number shape.
    pub fn build(self, shape: f64, scale: f64) -> Result<AnyDist> {
        match self {
            Family::Erlang => Erlang::from_real_shape(shape, scale).map(AnyDist::Erlang),
            Family::Pareto => Pareto::new(shape, scale).map(AnyDist::Pareto),
        }
    }

    /// Fit the family to a sample by maximum likelihood.
    pub fn fit(self, samples: &[f64]) -> Result<AnyDist> {
        match self {
            Family::Erlang => Err(Error::undefined(
                Erlang::<f64>::NAME,
                "fit_mle",
                "no closed-form estimator for an integer shape",
            )),
            Family::Pareto => Pareto::fit_mle(samples).map(AnyDist::Pareto),
        }
    }
}

impl std::fmt::Display for Family {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.name())
    }
}

/// A distribution of any supported family at `f64` precision.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum AnyDist {
    Erlang(Erlang<f64>),
    Pareto(Pareto<f64>),
}

macro_rules! dispatch {
    ($self:expr, $d:ident => $body:expr) => {
        match $self {
            AnyDist::Erlang($d) => $body,
            AnyDist::Pareto($d) => $body,
        }
    };
}

impl AnyDist {
    pub fn family(&self) -> Family {
        match self {
            AnyDist::Erlang(_) => Family::Erlang,
            AnyDist::Pareto(_) => Family::Pareto,
        }
    }

    /// (shape, scale) as reals.
    pub fn params(&self) -> (f64, f64) {
        match self {
            AnyDist::Erlang(d) => (d.shape() as f64, d.scale()),
            AnyDist::Pareto(d) => d.params(),
        }
    }

    /// Moment generating function, where the family has one in closed form.
    pub fn mgf(&self, t: f64) -> Result<f64> {
        match self {
            AnyDist::Erlang(d) => Ok(d.mgf(t)),
            AnyDist::Pareto(_) => Err(Error::undefined(
                Pareto::<f64>::NAME,
                "mgf",
                "the moment generating function diverges for t > 0",
            )),
        }
    }

    /// Characteristic function, where the family has one in closed form.
    pub fn cf(&self, t: f64) -> Result<Complex<f64>> {
        match self {
            AnyDist::Erlang(d) => Ok(d.cf(t)),
            AnyDist::Pareto(_) => Err(Error::undefined(
                Pareto::<f64>::NAME,
                "cf",
                "no closed form without the incomplete gamma of a complex argument",
            )),
        }
    }
}

impl ContinuousUnivariate for AnyDist {
    type Value = f64;

    fn name(&self) -> &'static str {
        dispatch!(self, d => d.name())
    }

    fn support(&self) -> Support<f64> {
        dispatch!(self, d => d.support())
    }

    fn pdf(&self, x: f64) -> f64 {
        dispatch!(self, d => d.pdf(x))
    }

    fn logpdf(&self, x: f64) -> f64 {
        dispatch!(self, d => d.logpdf(x))
    }

    fn cdf(&self, x: f64) -> f64 {
        dispatch!(self, d => d.cdf(x))
    }

    fn ccdf(&self, x: f64) -> f64 {
        dispatch!(self, d => d.ccdf(x))
    }

    fn logcdf(&self, x: f64) -> f64 {
        dispatch!(self, d => d.logcdf(x))
    }

    fn logccdf(&self, x: f64) -> f64 {
        dispatch!(self, d => d.logccdf(x))
    }

    fn quantile(&self, p: f64) -> f64 {
        dispatch!(self, d => d.quantile(p))
    }

    fn cquantile(&self, p: f64) -> f64 {
        dispatch!(self, d => d.cquantile(p))
    }

    fn mean(&self) -> f64 {
        dispatch!(self, d => d.mean())
    }

    fn var(&self) -> f64 {
        dispatch!(self, d => d.var())
    }

    fn median(&self) -> f64 {
        dispatch!(self, d => d.median())
    }

    fn mode(&self) -> Result<f64> {
        dispatch!(self, d => d.mode())
    }

    fn skewness(&self) -> f64 {
        dispatch!(self, d => d.skewness())
    }

    fn kurtosis(&self) -> f64 {
        dispatch!(self, d => d.kurtosis())
    }

    fn entropy(&self) -> f64 {
        dispatch!(self, d => d.entropy())
    }

    fn hazard(&self, x: f64) -> f64 {
        dispatch!(self, d => d.hazard(x))
    }

    fn cumulative_hazard(&self, x: f64) -> f64 {
        dispatch!(self, d => d.cumulative_hazard(x))
    }

    fn rand<R: Rng + ?Sized>(&self, rng: &mut R) -> f64 {
        dispatch!(self, d => d.rand(rng))
    }
}

/// A pointwise function selectable on the command line.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum EvalFn {
    Pdf,
    Logpdf,
    Cdf,
    Ccdf,
    Logcdf,
    Logccdf,
    Quantile,
    Cquantile,
    Hazard,
    Cumhazard,
}

impl EvalFn {
    pub fn apply<D: ContinuousUnivariate>(self, dist: &D, x: D::Value) -> D::Value {
        match self {
            EvalFn::Pdf => dist.pdf(x),
            EvalFn::Logpdf => dist.logpdf(x),
            EvalFn::Cdf => dist.cdf(x),
            EvalFn::Ccdf => dist.ccdf(x),
            EvalFn::Logcdf => dist.logcdf(x),
            EvalFn::Logccdf => dist.logccdf(x),
            EvalFn::Quantile => dist.quantile(x),
            EvalFn::Cquantile => dist.cquantile(x),
            EvalFn::Hazard => dist.hazard(x),
            EvalFn::Cumhazard => dist.cumulative_hazard(x),
        }
    }

    pub fn name(self) -> &'static str {
        match self {
            EvalFn::Pdf => "pdf",
            EvalFn::Logpdf => "logpdf",
            EvalFn::Cdf => "cdf",
            EvalFn::Ccdf => "ccdf",
            EvalFn::Logcdf => "logcdf",
            EvalFn::Logccdf => "logccdf",
            EvalFn::Quantile => "quantile",
            EvalFn::Cquantile => "cquantile",
            EvalFn::Hazard => "hazard",
            EvalFn::Cumhazard => "cumhazard",
        }
    }
}

impl std::fmt::Display for EvalFn {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.name())
    }
}
