//! Command payloads and their rendering.
//!
//! Every command builds one report value. The same value renders as
//! pretty JSON, a Markdown table, or a one-line summary.

use crate::config::ResolvedConfig;
use crate::dist::{EvalFn, Family, Summary};
use dx_common::{format_real, serialize_real, OutputFormat, Result};
use serde::Serialize;

/// A command result that can be rendered in every [`OutputFormat`].
pub trait Report: Serialize {
    /// Heading of the Markdown rendering.
    fn title(&self) -> String;

    /// (label, value) rows of the Markdown table.
    fn rows(&self, precision: usize) -> Vec<(String, String)>;

    fn summary(&self, precision: usize) -> String;
}

/// Render `report` for stdout.
pub fn render<R: Report>(report: &R, format: OutputFormat, precision: usize) -> Result<String> {
    Ok(match format {
        OutputFormat::Json => serde_json::to_string_pretty(report)?,
        OutputFormat::Md => markdown(&report.title(), &report.rows(precision)),
        OutputFormat::Summary => report.summary(precision),
    })
}

fn markdown(title: &str, rows: &[(String, String)]) -> String {
    let mut out = format!("## {}\n\n| | |\n|---|---|\n", title);
    for (label, value) in rows {
        out.push_str(&format!("| {} | {} |\n", label, value));
    }
    out
}

fn params_label(distribution: Family, shape: f64, scale: f64) -> String {
    format!("{}(shape={}, scale={})", distribution, shape, scale)
}

impl Report for Summary {
    fn title(&self) -> String {
        params_label(self.distribution, self.shape, self.scale)
    }

    fn rows(&self, precision: usize) -> Vec<(String, String)> {
        let f = |x: f64| format_real(x, precision);
        let mode = match (&self.mode, &self.mode_error) {
            (Some(m), _) => f(*m),
            (None, Some(reason)) => format!("undefined ({})", reason),
            (None, None) => "undefined".to_string(),
        };
        vec![
            ("support".into(), self.support.to_string()),
            ("mean".into(), f(self.mean)),
            ("median".into(), f(self.median)),
            ("mode".into(), mode),
            ("var".into(), f(self.var)),
            ("std".into(), f(self.std)),
            ("skewness".into(), f(self.skewness)),
            ("kurtosis".into(), f(self.kurtosis)),
            ("entropy".into(), f(self.entropy)),
        ]
    }

    fn summary(&self, precision: usize) -> String {
        let f = |x: f64| format_real(x, precision);
        format!(
            "{}: mean={} median={} var={}",
            params_label(self.distribution, self.shape, self.scale),
            f(self.mean),
            f(self.median),
            f(self.var)
        )
    }
}

/// One evaluated point.
#[derive(Debug, Clone, Serialize)]
pub struct Point {
    #[serde(serialize_with = "serialize_real")]
    pub x: f64,
    #[serde(serialize_with = "serialize_real")]
    pub value: f64,
}

/// Output of `dx eval`.
#[derive(Debug, Clone, Serialize)]
pub struct EvalReport {
    pub distribution: Family,
    #[serde(serialize_with = "serialize_real")]
    pub shape: f64,
    #[serde(serialize_with = "serialize_real")]
    pub scale: f64,
    pub function: EvalFn,
    pub points: Vec<Point>,
}

impl Report for EvalReport {
    fn title(&self) -> String {
        format!(
            "{} of {}",
            self.function,
            params_label(self.distribution, self.shape, self.scale)
        )
    }

    fn rows(&self, precision: usize) -> Vec<(String, String)> {
        self.points
            .iter()
            .map(|p| (format_real(p.x, precision), format_real(p.value, precision)))
            .collect()
    }

    fn summary(&self, precision: usize) -> String {
        let values: Vec<String> = self
            .points
            .iter()
            .map(|p| {
                format!(
                    "{}({})={}",
                    self.function,
                    format_real(p.x, precision),
                    format_real(p.value, precision)
                )
            })
            .collect();
        values.join(" ")
    }
}

/// Characteristic function value at one point.
#[derive(Debug, Clone, Serialize)]
pub struct ComplexValue {
    #[serde(serialize_with = "serialize_real")]
    pub re: f64,
    #[serde(serialize_with = "serialize_real")]
    pub im: f64,
}

#[derive(Debug, Clone, Serialize)]
pub struct TransformPoint {
    #[serde(serialize_with = "serialize_real")]
    pub t: f64,
    #[serde(serialize_with = "serialize_real")]
    pub mgf: f64,
    pub cf: ComplexValue,
}

/// Output of `dx mgf`.
#[derive(Debug, Clone, Serialize)]
pub struct TransformReport {
    pub distribution: Family,
    #[serde(serialize_with = "serialize_real")]
    pub shape: f64,
    #[serde(serialize_with = "serialize_real")]
    pub scale: f64,
    pub points: Vec<TransformPoint>,
}

impl Report for TransformReport {
    fn title(&self) -> String {
        format!(
            "mgf and cf of {}",
            params_label(self.distribution, self.shape, self.scale)
        )
    }

    fn rows(&self, precision: usize) -> Vec<(String, String)> {
        let f = |x: f64| format_real(x, precision);
        self.points
            .iter()
            .map(|p| {
                (
                    format!("t={}", f(p.t)),
                    format!(
                        "mgf={} cf={}{}{}i",
                        f(p.mgf),
                        f(p.cf.re),
                        if p.cf.im < 0.0 { "" } else { "+" },
                        f(p.cf.im)
                    ),
                )
            })
            .collect()
    }

    fn summary(&self, precision: usize) -> String {
        let values: Vec<String> = self
            .points
            .iter()
            .map(|p| {
                format!(
                    "mgf({})={}",
                    format_real(p.t, precision),
                    format_real(p.mgf, precision)
                )
            })
            .collect();
        values.join(" ")
    }
}

/// Output of `dx sample`.
#[derive(Debug, Clone, Serialize)]
pub struct SampleReport {
    pub distribution: Family,
    #[serde(serialize_with = "serialize_real")]
    pub shape: f64,
    #[serde(serialize_with = "serialize_real")]
    pub scale: f64,
    pub seed: u64,
    pub values: Vec<f64>,
}

impl Report for SampleReport {
    fn title(&self) -> String {
        format!(
            "{} draws from {}",
            self.values.len(),
            params_label(self.distribution, self.shape, self.scale)
        )
    }

    fn rows(&self, precision: usize) -> Vec<(String, String)> {
        self.values
            .iter()
            .enumerate()
            .map(|(i, &x)| (i.to_string(), format_real(x, precision)))
            .collect()
    }

    fn summary(&self, precision: usize) -> String {
        let values: Vec<String> = self
            .values
            .iter()
            .map(|&x| format_real(x, precision))
            .collect();
        values.join(" ")
    }
}

/// Output of `dx fit`.
#[derive(Debug, Clone, Serialize)]
pub struct FitReport {
    pub distribution: Family,
    pub n: usize,
    #[serde(serialize_with = "serialize_real")]
    pub shape: f64,
    #[serde(serialize_with = "serialize_real")]
    pub scale: f64,
    #[serde(serialize_with = "serialize_real")]
    pub loglikelihood: f64,
}

impl Report for FitReport {
    fn title(&self) -> String {
        format!("{} fit to {} observations", self.distribution, self.n)
    }

    fn rows(&self, precision: usize) -> Vec<(String, String)> {
        vec![
            ("shape".into(), format_real(self.shape, precision)),
            ("scale".into(), format_real(self.scale, precision)),
            (
                "loglikelihood".into(),
                format_real(self.loglikelihood, precision),
            ),
        ]
    }

    fn summary(&self, precision: usize) -> String {
        format!(
            "{} (n={}, loglik={})",
            params_label(self.distribution, self.shape, self.scale),
            self.n,
            format_real(self.loglikelihood, precision)
        )
    }
}

impl Report for ResolvedConfig {
    fn title(&self) -> String {
        "configuration".to_string()
    }

    fn rows(&self, _precision: usize) -> Vec<(String, String)> {
        let source = self
            .source
            .as_ref()
            .map(|p| p.display().to_string())
            .unwrap_or_else(|| "(defaults)".to_string());
        let seed = self
            .config
            .sampling
            .seed
            .map(|s| s.to_string())
            .unwrap_or_else(|| "(random)".to_string());
        vec![
            ("source".into(), source),
            ("sampling.seed".into(), seed),
            ("sampling.count".into(), self.config.sampling.count.to_string()),
            ("output.format".into(), self.config.output.format.to_string()),
            (
                "output.precision".into(),
                self.config.output.precision.to_string(),
            ),
        ]
    }

    fn summary(&self, precision: usize) -> String {
        self.rows(precision)
            .into_iter()
            .map(|(k, v)| format!("{}={}", k, v))
            .collect::<Vec<_>>()
            .join(" ")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn fit_report() -> FitReport {
        FitReport {
            distribution: Family::Pareto,
            n: 4,
            shape: 1.985_206_229,
            scale: 2.0,
            loglikelihood: -7.25,
        }
    }

    #[test]
    fn json_rendering_is_the_serde_form() {
        let text = render(&fit_report(), OutputFormat::Json, 6).unwrap();
        let parsed: serde_json::Value = serde_json::from_str(&text).unwrap();
        assert_eq!(parsed["distribution"], "pareto");
        assert_eq!(parsed["n"], 4);
        assert_eq!(parsed["scale"], 2.0);
    }

    #[test]
    fn markdown_rendering_respects_precision() {
        let text = render(&fit_report(), OutputFormat::Md, 4).unwrap();
        assert!(text.starts_with("## pareto fit to 4 observations"));
        assert!(text.contains("| shape | 1.985 |"));
    }

    #[test]
    fn summary_is_one_line() {
        let text = render(&fit_report(), OutputFormat::Summary, 3).unwrap();
        assert_eq!(text, "pareto(shape=1.985206229, scale=2) (n=4, loglik=-7.25)");
        assert!(!text.contains('\n'));
    }

    #[test]
    fn eval_points_label_non_finite() {
        let report = EvalReport {
            distribution: Family::Pareto,
            shape: 2.0,
            scale: 1.0,
            function: EvalFn::Logpdf,
            points: vec![Point {
                x: 0.5,
                value: f64::NEG_INFINITY,
            }],
        };
        let json = serde_json::to_value(&report).unwrap();
        assert_eq!(json["function"], "logpdf");
        assert_eq!(json["points"][0]["value"], "-inf");
        assert_eq!(report.summary(6), "logpdf(0.5)=-inf");
    }
}
