//! Output format specifications.

use clap::ValueEnum;
use serde::{Deserialize, Serialize, Serializer};

/// Supported output formats for CLI commands.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, ValueEnum, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OutputFormat {
    /// Structured JSON (default for machine consumption)
    #[default]
    Json,

    /// Human-readable Markdown table
    Md,

    /// One-line summary for quick checks
    Summary,
}

impl std::fmt::Display for OutputFormat {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            OutputFormat::Json => write!(f, "json"),
            OutputFormat::Md => write!(f, "md"),
            OutputFormat::Summary => write!(f, "summary"),
        }
    }
}

/// Serialize a real number, writing non-finite values as `"inf"`, `"-inf"` or `"nan"`.
///
/// JSON has no literal for them and serde_json would otherwise emit `null`,
/// which loses the distinction between an infinite mean and an undefined one.
pub fn serialize_real<T, S>(value: &T, serializer: S) -> Result<S::Ok, S::Error>
where
    T: Copy + Into<f64>,
    S: Serializer,
{
    let x: f64 = (*value).into();
    if x.is_finite() {
        serializer.serialize_f64(x)
    } else {
        serializer.serialize_str(non_finite_label(x))
    }
}

/// [`serialize_real`] for an optional value; `None` stays `null`.
pub fn serialize_opt_real<T, S>(value: &Option<T>, serializer: S) -> Result<S::Ok, S::Error>
where
    T: Copy + Into<f64>,
    S: Serializer,
{
    match value {
        Some(x) => serialize_real(x, serializer),
        None => serializer.serialize_none(),
    }
}

/// Render a real with `precision` significant digits for text output.
pub fn format_real(x: f64, precision: usize) -> String {
    if !x.is_finite() {
        return non_finite_label(x).to_string();
    }
    if x == 0.0 {
        return "0".to_string();
    }
    let magnitude = x.abs();
    if !(1e-4..1e12).contains(&magnitude) {
        return format!("{:.*e}", precision.saturating_sub(1), x);
    }
    let int_digits = magnitude.log10().floor() as i64 + 1;
    let decimals = (precision as i64 - int_digits).max(0) as usize;
    let text = format!("{:.*}", decimals, x);
    if text.contains('.') {
        text.trim_end_matches('0').trim_end_matches('.').to_string()
    } else {
        text
    }
}

fn non_finite_label(x: f64) -> &'static str {
    if x.is_nan() {
        "nan"
    } else if x > 0.0 {
        "inf"
    } else {
        "-inf"
    }
}
