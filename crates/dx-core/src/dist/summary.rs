//! Summary statistics of a distribution, as reported by `dx stats`.

use super::{AnyDist, ContinuousUnivariate, Family};
use dx_common::{serialize_opt_real, serialize_real, Support};
use serde::Serialize;

/// Every scalar statistic of one distribution.
///
/// Non-finite statistics serialize as `"inf"` or `"nan"`. A mode that does
/// not exist is `null` with the reason in `mode_error`.
#[derive(Debug, Clone, Serialize)]
pub struct Summary {
    pub distribution: Family,
    #[serde(serialize_with = "serialize_real")]
    pub shape: f64,
    #[serde(serialize_with = "serialize_real")]
    pub scale: f64,
    pub support: Support<f64>,
    #[serde(serialize_with = "serialize_real")]
    pub mean: f64,
    #[serde(serialize_with = "serialize_real")]
    pub median: f64,
    #[serde(serialize_with = "serialize_opt_real")]
    pub mode: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub mode_error: Option<String>,
    #[serde(serialize_with = "serialize_real")]
    pub var: f64,
    #[serde(serialize_with = "serialize_real")]
    pub std: f64,
    #[serde(serialize_with = "serialize_real")]
    pub skewness: f64,
    #[serde(serialize_with = "serialize_real")]
    pub kurtosis: f64,
    #[serde(serialize_with = "serialize_real")]
    pub entropy: f64,
}

impl Summary {
    pub fn of(dist: &AnyDist) -> Self {
        let (shape, scale) = dist.params();
        let (mode, mode_error) = match dist.mode() {
            Ok(m) => (Some(m), None),
            Err(e) => (None, Some(e.to_string())),
        };
        Summary {
            distribution: dist.family(),
            shape,
            scale,
            support: dist.support(),
            mean: dist.mean(),
            median: dist.median(),
            mode,
            mode_error,
            var: dist.var(),
            std: dist.std(),
            skewness: dist.skewness(),
            kurtosis: dist.kurtosis(),
            entropy: dist.entropy(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn pareto_heavy_tail_serializes_labels() {
        let d = Family::Pareto.build(1.5, 1.0).unwrap();
        let json = serde_json::to_value(Summary::of(&d)).unwrap();
        assert_eq!(json["distribution"], "pareto");
        assert_eq!(json["var"], "inf");
        assert_eq!(json["skewness"], "nan");
        assert_eq!(json["mean"], 3.0);
        assert_eq!(json["support"]["upper"], "inf");
        assert!(json.get("mode_error").is_none());
    }

    #[test]
    fn erlang_shape_zero_reports_missing_mode() {
        let d = Family::Erlang.build(0.0, 1.0).unwrap();
        let summary = Summary::of(&d);
        assert!(summary.mode.is_none());
        assert!(summary.mode_error.unwrap().contains("shape must be >= 1"));
    }

    #[test]
    fn nan_mode_serializes_as_label() {
        let d = Family::Erlang.build(2.0, f64::NAN).unwrap();
        let json = serde_json::to_value(Summary::of(&d)).unwrap();
        assert_eq!(json["mode"], "nan");
        assert!(json.get("mode_error").is_none());
    }
}
