//! Command-line interface.

use std::path::PathBuf;

use apiprobe_application::SuiteRegistry;
use apiprobe_domain::{CaseAction, RunConfig};
use apiprobe_infrastructure::{
    ConsoleReporter, EnvConfigLoader, JsonReporter, Reporter, RunnerSettings, load_suite_file,
};
use clap::{Args, Parser, Subcommand, ValueEnum};

use crate::builtin;
use crate::error::AppError;
use crate::runner::execute_suites;

/// apiprobe - HTTP API assertion test runner
#[derive(Parser, Debug)]
#[command(
    name = "apiprobe",
    version,
    about = "Run suites of HTTP API assertions",
    long_about = "Runs suites of HTTP cases, one request per case, and checks status codes and JSON bodies. \
                  Configuration comes from the environment; APIPROBE_-prefixed variables override plain ones."
)]
pub struct Cli {
    /// Log more (repeat for trace)
    #[arg(short, long, global = true, action = clap::ArgAction::Count)]
    verbose: u8,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Run suites and report results
    Run(RunArgs),

    /// List available suites and their cases
    List(ListArgs),
}

/// Report output format.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, ValueEnum)]
pub enum ReportFormat {
    /// Human-readable text
    #[default]
    Console,
    /// Pretty JSON
    Json,
}

#[derive(Args, Debug)]
struct SuiteSource {
    /// Load additional suites from a YAML or JSON file
    #[arg(long = "file", value_name = "PATH")]
    files: Vec<PathBuf>,

    /// JSON file of configuration values, below the process environment
    #[arg(long, value_name = "PATH")]
    env_file: Option<PathBuf>,

    /// Skip the built-in suites
    #[arg(long)]
    no_builtin: bool,
}

#[derive(Args, Debug)]
struct RunArgs {
    /// Only run the named suite (repeatable)
    #[arg(long = "suite", value_name = "NAME")]
    suites: Vec<String>,

    #[command(flatten)]
    source: SuiteSource,

    /// Run suites concurrently
    #[arg(long)]
    parallel: bool,

    /// Output format
    #[arg(long, value_enum, default_value_t = ReportFormat::Console)]
    format: ReportFormat,

    /// Per-request timeout in milliseconds
    #[arg(long, value_name = "MS")]
    timeout_ms: Option<u64>,

    /// List every assertion in console output
    #[arg(long)]
    show_assertions: bool,
}

#[derive(Args, Debug)]
struct ListArgs {
    #[command(flatten)]
    source: SuiteSource,
}

impl Cli {
    /// Default log level implied by `-v` flags.
    #[must_use]
    pub const fn verbosity(&self) -> &'static str {
        match self.verbose {
            0 => "warn",
            1 => "info",
            2 => "debug",
            _ => "trace",
        }
    }

    /// Execute the command and return the process exit code.
    ///
    /// # Errors
    ///
    /// Returns [`AppError`] for configuration, suite loading or client
    /// setup failures.
    pub async fn execute(self) -> Result<i32, AppError> {
        match self.command {
            Commands::Run(args) => run(args).await,
            Commands::List(args) => list(args).await,
        }
    }
}

async fn load_config(source: &SuiteSource) -> Result<RunConfig, AppError> {
    let vars = std::env::vars_os()
        .filter_map(|(name, value)| Some((name.into_string().ok()?, value.into_string().ok()?)));
    let config = EnvConfigLoader::new()
        .load(vars, source.env_file.as_deref())
        .await?;
    Ok(config)
}

async fn load_registry(source: &SuiteSource, config: &RunConfig) -> Result<SuiteRegistry, AppError> {
    let mut registry = SuiteRegistry::new();
    if !source.no_builtin {
        builtin::register(&mut registry, config)?;
    }
    for path in &source.files {
        for suite in load_suite_file(path).await? {
            registry.define(suite)?;
        }
    }
    Ok(registry)
}

async fn run(args: RunArgs) -> Result<i32, AppError> {
    let config = load_config(&args.source).await?;
    let settings = RunnerSettings::resolve(&config, args.timeout_ms, args.parallel)?;
    let registry = load_registry(&args.source, &config).await?;
    let suites = registry.select(&args.suites)?;

    let report = execute_suites(config, settings, suites).await?;

    let rendered = match args.format {
        ReportFormat::Console => ConsoleReporter::new()
            .with_assertions(args.show_assertions)
            .render(&report)?,
        ReportFormat::Json => JsonReporter.render(&report)?,
    };
    print!("{rendered}");
    Ok(report.exit_code())
}

async fn list(args: ListArgs) -> Result<i32, AppError> {
    let config = load_config(&args.source).await?;
    let registry = load_registry(&args.source, &config).await?;

    for suite in registry.suites() {
        println!("{}", suite.name);
        for case in &suite.cases {
            let target = match &case.action {
                CaseAction::Request(request) => format!("{} {}", request.method, request.url),
                CaseAction::ConfigCheck => "config check".to_string(),
            };
            println!("  {} ({target})", case.name);
        }
    }
    Ok(0)
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::panic)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_parse_run_flags() {
        let cli = Cli::try_parse_from([
            "apiprobe",
            "run",
            "--suite",
            "GET API",
            "--suite",
            "Users API",
            "--format",
            "json",
            "--timeout-ms",
            "500",
            "--parallel",
            "--no-builtin",
            "--file",
            "extra.yaml",
        ])
        .unwrap();

        let Commands::Run(args) = cli.command else {
            panic!("expected run");
        };
        assert_eq!(args.suites, vec!["GET API", "Users API"]);
        assert_eq!(args.format, ReportFormat::Json);
        assert_eq!(args.timeout_ms, Some(500));
        assert!(args.parallel);
        assert!(args.source.no_builtin);
        assert_eq!(args.source.files, vec![PathBuf::from("extra.yaml")]);
    }

    #[test]
    fn test_verbosity() {
        let cli = Cli::try_parse_from(["apiprobe", "-vv", "list"]).unwrap();
        assert_eq!(cli.verbosity(), "debug");

        let cli = Cli::try_parse_from(["apiprobe", "list"]).unwrap();
        assert_eq!(cli.verbosity(), "warn");
    }

    #[test]
    fn test_unknown_format_rejected() {
        assert!(Cli::try_parse_from(["apiprobe", "run", "--format", "xml"]).is_err());
    }

    #[tokio::test]
    async fn test_unknown_suite_is_usage_error() {
        let source = SuiteSource {
            files: Vec::new(),
            env_file: None,
            no_builtin: false,
        };
        let registry = load_registry(&source, &RunConfig::new()).await.unwrap();
        let err = registry.select(&["Nope".to_string()]).unwrap_err();
        assert_eq!(AppError::from(err).to_string(), "unknown suite 'Nope'");
    }
}
