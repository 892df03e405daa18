//! Command-line interface for sharpcheck.

use clap::{Args, Parser, Subcommand};
use std::path::PathBuf;
use tracing_subscriber::EnvFilter;

use crate::config::AnalyzerConfig;
use crate::orchestrator::{AnalysisRequest, Availability, Orchestrator};
use crate::report::{self, OutputFormat};

/// Exit codes.
pub const EXIT_SUCCESS: i32 = 0;
pub const EXIT_FAILED: i32 = 1;
pub const EXIT_ERROR: i32 = 2;

/// Static analysis for C# source: compiler diagnostics, metrics, and
/// heuristic suggestions.
///
/// Analysis runs in a separate analyzer process; `build` compiles it and
/// `status` reports whether it is available.
#[derive(Parser)]
#[command(name = "sharpcheck")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    #[command(flatten)]
    pub global: GlobalArgs,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Args)]
pub struct GlobalArgs {
    /// Path to config YAML file (default: auto-discover)
    #[arg(short, long, global = true)]
    pub config: Option<PathBuf>,

    /// Increase log verbosity (-v, -vv)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Analyze a C# file or inline source
    #[command(visible_alias = "check")]
    Analyze(AnalyzeArgs),
    /// Report whether the analyzer is built
    Status,
    /// Build the analyzer
    Build,
}

/// Arguments for the analyze command.
#[derive(Args)]
pub struct AnalyzeArgs {
    /// C# file to analyze
    pub path: Option<PathBuf>,

    /// Inline source text to analyze instead of a file
    #[arg(short, long)]
    pub source: Option<String>,

    /// Name used for the unit in diagnostic locations
    #[arg(long)]
    pub display_name: Option<String>,

    /// Output format: pretty or json
    #[arg(short, long, default_value = "pretty")]
    pub format: String,
}

/// Install the stderr log subscriber. `RUST_LOG` wins over `-v`.
pub fn init_logging(verbose: u8) {
    let default = match verbose {
        0 => "warn",
        1 => "info",
        _ => "debug",
    };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default));
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .try_init();
}

fn orchestrator(global: &GlobalArgs) -> anyhow::Result<Orchestrator> {
    let config = AnalyzerConfig::load(global.config.as_deref())?;
    Ok(Orchestrator::new(config))
}

/// Run the analyze command.
pub fn run_analyze(global: &GlobalArgs, args: &AnalyzeArgs) -> anyhow::Result<i32> {
    let format: OutputFormat = match args.format.parse() {
        Ok(f) => f,
        Err(e) => {
            eprintln!("Error: {}", e);
            return Ok(EXIT_ERROR);
        }
    };

    let request = match AnalysisRequest::new(
        args.source.clone(),
        args.path.clone(),
        args.display_name.clone(),
    ) {
        Ok(r) => r,
        Err(e) => {
            report::write_error(&e);
            return Ok(EXIT_ERROR);
        }
    };

    let orchestrator = orchestrator(global)?;
    let result = match orchestrator.analyze(&request) {
        Ok(r) => r,
        Err(e) => {
            report::write_error(&e);
            return Ok(EXIT_ERROR);
        }
    };

    match format {
        OutputFormat::Json => report::write_json(&result)?,
        OutputFormat::Pretty => {
            let target = match (&args.path, request.display_name()) {
                (_, Some(name)) => name.to_string(),
                (Some(path), None) => path.display().to_string(),
                (None, None) => "<inline source>".to_string(),
            };
            report::write_pretty(&target, &result);
        }
    }

    if result.error_count() > 0 {
        Ok(EXIT_FAILED)
    } else {
        Ok(EXIT_SUCCESS)
    }
}

/// Run the status command.
pub fn run_status(global: &GlobalArgs) -> anyhow::Result<i32> {
    let orchestrator = orchestrator(global)?;
    let availability = orchestrator.status();
    let artifact = orchestrator.config().artifact_path();
    report::write_status(availability, &artifact.display().to_string());

    match availability {
        Availability::Built => Ok(EXIT_SUCCESS),
        Availability::NotBuilt => Ok(EXIT_FAILED),
    }
}

/// Run the build command.
pub fn run_build(global: &GlobalArgs) -> anyhow::Result<i32> {
    let orchestrator = orchestrator(global)?;
    let outcome = orchestrator.build();
    report::write_build_outcome(&outcome);

    if outcome.success {
        Ok(EXIT_SUCCESS)
    } else {
        Ok(EXIT_FAILED)
    }
}
