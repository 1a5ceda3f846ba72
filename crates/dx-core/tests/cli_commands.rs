//! End-to-end tests of the dx subcommands and output formats.

mod support;

use predicates::prelude::*;
use std::io::Write;
use support::{dx, dx_json};

fn close(value: &serde_json::Value, expected: f64, tol: f64) -> bool {
    value
        .as_f64()
        .map(|v| (v - expected).abs() <= tol)
        .unwrap_or(false)
}

mod stats {
    use super::*;

    #[test]
    fn erlang_two_three() {
        let json = dx_json(&["stats", "erlang", "--shape", "2", "--scale", "3"]);
        assert_eq!(json["distribution"], "erlang");
        assert!(close(&json["mean"], 6.0, 1e-12));
        assert!(close(&json["var"], 18.0, 1e-12));
        assert!(close(&json["skewness"], std::f64::consts::SQRT_2, 1e-12));
        assert!(close(&json["kurtosis"], 3.0, 1e-12));
        assert!(close(&json["mode"], 3.0, 1e-12));
        assert_eq!(json["support"]["lower"], 0.0);
        assert_eq!(json["support"]["upper"], "inf");
    }

    #[test]
    fn pareto_three_two() {
        let json = dx_json(&["stats", "pareto", "--shape", "3", "--scale", "2"]);
        assert!(close(&json["mean"], 3.0, 1e-12));
        assert!(close(&json["median"], 2.519_842_099_789_746, 1e-12));
        assert_eq!(json["skewness"], "nan");
        assert_eq!(json["kurtosis"], "nan");
    }

    #[test]
    fn pareto_infinite_mean() {
        let json = dx_json(&["stats", "pareto", "--shape", "0.5"]);
        assert_eq!(json["mean"], "inf");
        assert_eq!(json["var"], "inf");
    }

    #[test]
    fn markdown_table() {
        dx().args(["-f", "md", "stats", "erlang", "--shape", "2", "--scale", "3"])
            .assert()
            .success()
            .stdout(predicate::str::contains("## erlang(shape=2, scale=3)"))
            .stdout(predicate::str::contains("| mean | 6 |"))
            .stdout(predicate::str::contains("| support | [0, inf) |"));
    }

    #[test]
    fn summary_line() {
        dx().args(["-f", "summary", "stats", "pareto", "--shape", "3", "--scale", "2"])
            .assert()
            .success()
            .stdout(predicate::str::starts_with(
                "pareto(shape=3, scale=2): mean=3 median=2.51984 var=3",
            ));
    }
}

mod eval {
    use super::*;

    #[test]
    fn pareto_pdf_points() {
        let json = dx_json(&[
            "eval", "pareto", "--shape", "3", "--scale", "2", "--fn", "pdf", "1", "4",
        ]);
        assert_eq!(json["function"], "pdf");
        let points = json["points"].as_array().unwrap();
        assert_eq!(points.len(), 2);
        assert_eq!(points[0]["value"], 0.0);
        assert!(close(&points[1]["value"], 0.09375, 1e-15));
    }

    #[test]
    fn log_density_below_support_is_negative_infinity() {
        let json = dx_json(&["eval", "pareto", "--scale", "2", "--fn", "logpdf", "1"]);
        assert_eq!(json["points"][0]["value"], "-inf");
    }

    #[test]
    fn quantile_out_of_range_is_nan() {
        let json = dx_json(&["eval", "erlang", "--shape", "2", "--fn", "quantile", "1.5"]);
        assert_eq!(json["points"][0]["value"], "nan");
    }

    #[test]
    fn cdf_and_ccdf_sum_to_one() {
        let cdf = dx_json(&["eval", "erlang", "--shape", "3", "--fn", "cdf", "2.5"]);
        let ccdf = dx_json(&["eval", "erlang", "--shape", "3", "--fn", "ccdf", "2.5"]);
        let total = cdf["points"][0]["value"].as_f64().unwrap()
            + ccdf["points"][0]["value"].as_f64().unwrap();
        assert!((total - 1.0).abs() < 1e-14);
    }

    #[test]
    fn negative_points_accepted() {
        let json = dx_json(&["eval", "erlang", "--shape", "2", "--fn", "cdf", "-1"]);
        assert_eq!(json["points"][0]["value"], 0.0);
    }
}

mod mgf {
    use super::*;

    #[test]
    fn erlang_transforms() {
        let json = dx_json(&["mgf", "erlang", "--shape", "3", "--scale", "0.5", "0", "1"]);
        let points = json["points"].as_array().unwrap();
        assert!(close(&points[0]["mgf"], 1.0, 1e-15));
        assert!(close(&points[0]["cf"]["re"], 1.0, 1e-15));
        assert!(close(&points[1]["mgf"], 8.0, 1e-12));
    }
}

mod sample {
    use super::*;

    #[test]
    fn seeded_draws_are_reproducible() {
        let args = ["sample", "pareto", "--shape", "2", "--scale", "1", "-n", "5", "--seed", "7"];
        let first = dx_json(&args);
        let second = dx_json(&args);
        assert_eq!(first["values"], second["values"]);
        assert_eq!(first["seed"], 7);
        let values = first["values"].as_array().unwrap();
        assert_eq!(values.len(), 5);
        assert!(values.iter().all(|v| v.as_f64().unwrap() >= 1.0));
    }

    #[test]
    fn unseeded_run_reports_its_seed() {
        let json = dx_json(&["sample", "erlang", "--shape", "2", "-n", "3"]);
        assert!(json["seed"].is_u64());
        assert_eq!(json["values"].as_array().unwrap().len(), 3);
    }

    #[test]
    fn config_supplies_count_and_seed() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "[sampling]\nseed = 99\ncount = 4").unwrap();
        let output = dx()
            .arg("--config")
            .arg(file.path())
            .args(["sample", "erlang", "--shape", "1"])
            .output()
            .unwrap();
        assert!(output.status.success());
        let json: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
        assert_eq!(json["seed"], 99);
        assert_eq!(json["values"].as_array().unwrap().len(), 4);
    }
}

mod fit {
    use super::*;

    #[test]
    fn pareto_closed_form() {
        let json = dx_json(&["fit", "pareto", "2", "3", "4", "5"]);
        assert_eq!(json["n"], 4);
        assert!(close(&json["scale"], 2.0, 0.0));
        assert!(close(&json["shape"], 4.0 / 7.5f64.ln(), 1e-12));
        assert!(json["loglikelihood"].as_f64().unwrap().is_finite());
    }

    #[test]
    fn summary_format() {
        dx().args(["-f", "summary", "fit", "pareto", "2", "3", "4", "5"])
            .assert()
            .success()
            .stdout(predicate::str::contains("(n=4, loglik="));
    }
}

mod config {
    use super::*;

    #[test]
    fn show_defaults() {
        let json = dx_json(&["config", "show"]);
        assert!(json["source"].is_null());
        assert_eq!(json["config"]["sampling"]["count"], 10);
        assert_eq!(json["config"]["output"]["format"], "json");
    }

    #[test]
    fn config_format_applies_without_flag() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "[output]\nformat = \"summary\"\nprecision = 3").unwrap();
        dx().arg("--config")
            .arg(file.path())
            .args(["stats", "pareto", "--shape", "3", "--scale", "2"])
            .assert()
            .success()
            .stdout(predicate::str::contains("median=2.52"));
    }

    #[test]
    fn flag_overrides_config_format() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "[output]\nformat = \"md\"").unwrap();
        let output = dx()
            .arg("--config")
            .arg(file.path())
            .args(["-f", "json", "config", "show"])
            .output()
            .unwrap();
        let json: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
        assert_eq!(json["config"]["output"]["format"], "md");
    }
}

#[test]
fn version_reports_package_version() {
    let json = dx_json(&["version"]);
    assert_eq!(json["dx_version"], env!("CARGO_PKG_VERSION"));
}

#[test]
fn jsonl_logs_go_to_stderr() {
    let output = dx()
        .args(["-vv", "--log-format", "jsonl", "fit", "pareto", "2", "3", "4", "5"])
        .output()
        .unwrap();
    assert!(output.status.success());
    let stderr = String::from_utf8_lossy(&output.stderr);
    let fitted = stderr
        .lines()
        .filter_map(|line| serde_json::from_str::<serde_json::Value>(line).ok())
        .any(|event| event["message"] == "fitted pareto by maximum likelihood");
    assert!(fitted, "stderr: {}", stderr);
    let _: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
}
