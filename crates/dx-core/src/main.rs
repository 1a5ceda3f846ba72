//! dx - evaluate, sample and fit Erlang and Pareto distributions.
//!
//! stdout carries the command payload; stderr carries logs and errors.

use clap::error::ErrorKind;
use clap::{Args, Parser, Subcommand};
use dx_common::{format_error_human, Error, OutputFormat, Result, StructuredError};
use dx_core::config::{load_config, ConfigOptions, ResolvedConfig};
use dx_core::dist::{ContinuousUnivariate, EvalFn, Family, Summary};
use dx_core::exit_codes::ExitCode;
use dx_core::logging::{init_logging, LogConfig, LogFormat, LogLevel};
use dx_core::output::{
    render, ComplexValue, EvalReport, FitReport, Point, Report, SampleReport, TransformPoint,
    TransformReport,
};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use std::io::IsTerminal;
use std::path::PathBuf;

/// Erlang and Pareto distributions from the command line
#[derive(Parser)]
#[command(name = "dx")]
#[command(author, version, long_about = None)]
#[command(propagate_version = true)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    #[command(flatten)]
    global: GlobalOpts,
}

/// Global options available to all commands
#[derive(Args, Debug)]
struct GlobalOpts {
    /// Config file (default: $XDG_CONFIG_HOME/dx/config.toml)
    #[arg(long, global = true, env = "DX_CONFIG")]
    config: Option<PathBuf>,

    /// Output format (default: from config, else json)
    #[arg(long, short = 'f', global = true)]
    format: Option<OutputFormat>,

    /// Increase verbosity (-v, -vv, -vvv)
    #[arg(short, long, global = true, action = clap::ArgAction::Count)]
    verbose: u8,

    /// Silence all logging
    #[arg(short, long, global = true)]
    quiet: bool,

    /// Log format on stderr
    #[arg(long, global = true)]
    log_format: Option<LogFormat>,
}

#[derive(Subcommand)]
enum Commands {
    /// Summary statistics of a distribution
    Stats(DistArgs),

    /// Evaluate a pointwise function at one or more points
    Eval(EvalArgs),

    /// Moment generating and characteristic functions
    Mgf(MgfArgs),

    /// Draw random variates
    Sample(SampleArgs),

    /// Fit a distribution to observations by maximum likelihood
    Fit(FitArgs),

    /// Configuration management
    Config(ConfigArgs),

    /// Print version information
    Version,
}

#[derive(Args, Debug)]
struct DistArgs {
    /// Distribution family
    #[arg(value_enum)]
    family: Family,

    /// Shape parameter (whole number for erlang)
    #[arg(long, default_value_t = 1.0, allow_negative_numbers = true)]
    shape: f64,

    /// Scale parameter
    #[arg(long, default_value_t = 1.0, allow_negative_numbers = true)]
    scale: f64,
}

#[derive(Args, Debug)]
struct EvalArgs {
    #[command(flatten)]
    dist: DistArgs,

    /// Function to evaluate
    #[arg(long = "fn", value_enum)]
    function: EvalFn,

    /// Points (probabilities for quantile and cquantile)
    #[arg(required = true, allow_negative_numbers = true)]
    points: Vec<f64>,
}

#[derive(Args, Debug)]
struct MgfArgs {
    #[command(flatten)]
    dist: DistArgs,

    /// Arguments t
    #[arg(required = true, allow_negative_numbers = true)]
    t: Vec<f64>,
}

#[derive(Args, Debug)]
struct SampleArgs {
    #[command(flatten)]
    dist: DistArgs,

    /// Number of variates (default: from config)
    #[arg(short = 'n', long, value_parser = parse_count)]
    count: Option<usize>,

    /// RNG seed (default: from config, else random)
    #[arg(long)]
    seed: Option<u64>,
}

/// Same lower bound as `sampling.count` in the config file.
fn parse_count(s: &str) -> std::result::Result<usize, String> {
    let n: usize = s.parse().map_err(|e| format!("{}", e))?;
    if n == 0 {
        return Err("must be at least 1".to_string());
    }
    Ok(n)
}

#[derive(Args, Debug)]
struct FitArgs {
    /// Distribution family
    #[arg(value_enum)]
    family: Family,

    /// Observations
    #[arg(required = true, allow_negative_numbers = true)]
    observations: Vec<f64>,
}

#[derive(Args, Debug)]
struct ConfigArgs {
    #[command(subcommand)]
    command: ConfigCommands,
}

#[derive(Subcommand, Debug)]
enum ConfigCommands {
    /// Show the resolved configuration and where it came from
    Show,
}

fn main() {
    let cli = match Cli::try_parse() {
        Ok(cli) => cli,
        Err(err) => {
            if matches!(err.kind(), ErrorKind::DisplayHelp | ErrorKind::DisplayVersion) {
                err.exit();
            }
            let _ = err.print();
            std::process::exit(ExitCode::ArgsError.as_i32());
        }
    };

    let log_config = LogConfig::from_env(
        LogLevel::from_flags(cli.global.verbose, cli.global.quiet),
        cli.global.log_format,
    );
    init_logging(&log_config);

    let exit_code = match run(&cli) {
        Ok(()) => ExitCode::Clean,
        Err((err, format)) => {
            report_error(&err, format);
            ExitCode::from(&err)
        }
    };
    std::process::exit(exit_code.as_i32());
}

/// Run the command; on failure also return the format the error should use.
fn run(cli: &Cli) -> std::result::Result<(), (Error, OutputFormat)> {
    let options = ConfigOptions {
        config_path: cli.global.config.clone(),
    };
    let fallback = cli.global.format.unwrap_or_default();
    let resolved = load_config(&options).map_err(|e| (e.into(), fallback))?;

    let format = cli.global.format.unwrap_or(resolved.config.output.format);
    let precision = resolved.config.output.precision;
    tracing::debug!(
        source = ?resolved.source,
        format = %format,
        precision,
        "resolved configuration"
    );

    let payload = dispatch(&cli.command, &resolved)
        .and_then(|report| report.render(format, precision))
        .map_err(|e| (e, format))?;
    if !payload.is_empty() {
        println!("{}", payload.trim_end());
    }
    Ok(())
}

/// Type-erased report so `dispatch` can return any command's payload.
enum Payload {
    Stats(Summary),
    Eval(EvalReport),
    Transform(TransformReport),
    Sample(SampleReport),
    Fit(FitReport),
    Config(ResolvedConfig),
    Version(VersionInfo),
}

impl Payload {
    fn render(&self, format: OutputFormat, precision: usize) -> Result<String> {
        match self {
            Payload::Stats(r) => render(r, format, precision),
            Payload::Eval(r) => render(r, format, precision),
            Payload::Transform(r) => render(r, format, precision),
            Payload::Sample(r) => render(r, format, precision),
            Payload::Fit(r) => render(r, format, precision),
            Payload::Config(r) => render(r, format, precision),
            Payload::Version(r) => render(r, format, precision),
        }
    }
}

fn dispatch(command: &Commands, resolved: &ResolvedConfig) -> Result<Payload> {
    match command {
        Commands::Stats(args) => {
            let dist = args.family.build(args.shape, args.scale)?;
            Ok(Payload::Stats(Summary::of(&dist)))
        }
        Commands::Eval(args) => {
            let dist = args.dist.family.build(args.dist.shape, args.dist.scale)?;
            let points = args
                .points
                .iter()
                .map(|&x| Point {
                    x,
                    value: args.function.apply(&dist, x),
                })
                .collect();
            Ok(Payload::Eval(EvalReport {
                distribution: dist.family(),
                shape: args.dist.shape,
                scale: args.dist.scale,
                function: args.function,
                points,
            }))
        }
        Commands::Mgf(args) => {
            let dist = args.dist.family.build(args.dist.shape, args.dist.scale)?;
            let points = args
                .t
                .iter()
                .map(|&t| -> Result<TransformPoint> {
                    let cf = dist.cf(t)?;
                    Ok(TransformPoint {
                        t,
                        mgf: dist.mgf(t)?,
                        cf: ComplexValue { re: cf.re, im: cf.im },
                    })
                })
                .collect::<Result<Vec<_>>>()?;
            Ok(Payload::Transform(TransformReport {
                distribution: dist.family(),
                shape: args.dist.shape,
                scale: args.dist.scale,
                points,
            }))
        }
        Commands::Sample(args) => {
            let dist = args.dist.family.build(args.dist.shape, args.dist.scale)?;
            let count = args.count.unwrap_or(resolved.config.sampling.count);
            let seed = args
                .seed
                .or(resolved.config.sampling.seed)
                .unwrap_or_else(|| rand::rng().random());
            tracing::debug!(seed, count, "sampling");
            let mut rng = StdRng::seed_from_u64(seed);
            Ok(Payload::Sample(SampleReport {
                distribution: dist.family(),
                shape: args.dist.shape,
                scale: args.dist.scale,
                seed,
                values: dist.sample_n(&mut rng, count),
            }))
        }
        Commands::Fit(args) => {
            let dist = args.family.fit(&args.observations)?;
            let (shape, scale) = dist.params();
            Ok(Payload::Fit(FitReport {
                distribution: dist.family(),
                n: args.observations.len(),
                shape,
                scale,
                loglikelihood: dist.loglikelihood(&args.observations),
            }))
        }
        Commands::Config(args) => match args.command {
            ConfigCommands::Show => Ok(Payload::Config(resolved.clone())),
        },
        Commands::Version => Ok(Payload::Version(VersionInfo::current())),
    }
}

#[derive(Debug, serde::Serialize)]
struct VersionInfo {
    dx_version: &'static str,
    rust_version: &'static str,
}

impl VersionInfo {
    fn current() -> Self {
        VersionInfo {
            dx_version: env!("CARGO_PKG_VERSION"),
            rust_version: env!("CARGO_PKG_RUST_VERSION"),
        }
    }
}

impl Report for VersionInfo {
    fn title(&self) -> String {
        "dx".to_string()
    }

    fn rows(&self, _precision: usize) -> Vec<(String, String)> {
        vec![
            ("version".into(), self.dx_version.to_string()),
            ("rust-version".into(), self.rust_version.to_string()),
        ]
    }

    fn summary(&self, _precision: usize) -> String {
        format!("dx {}", self.dx_version)
    }
}

/// Write an error to stderr: JSON when the payload format is JSON, else human-readable.
fn report_error(err: &Error, format: OutputFormat) {
    match format {
        OutputFormat::Json => {
            let structured =
                StructuredError::from(err).with_context("exit_code", ExitCode::from(err).code_name());
            eprintln!("{}", structured.to_json());
        }
        OutputFormat::Md | OutputFormat::Summary => {
            let use_color = std::io::stderr().is_terminal();
            eprintln!("{}", format_error_human(err, use_color));
        }
    }
}
