// Lint configuration for this crate
#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]
#![allow(clippy::must_use_candidate)]

//! Daily panel check-in from the command line.
//!
//! # Examples
//!
//! ```bash
//! # Credentials come from the environment
//! export IKUUU_EMAIL=alice@example.com IKUUU_PASSWORD=...
//! checkin
//!
//! # Another panel host
//! checkin --domain panel.example.org
//!
//! # Machine-readable report
//! checkin --format json --pretty
//! ```

mod output;
mod report;
mod run;

use std::io::IsTerminal;

use anyhow::Result;
use clap::{Parser, ValueEnum};
use tracing::{error, warn};
use tracing_subscriber::fmt::time::ChronoLocal;
use tracing_subscriber::{EnvFilter, Layer, Registry, fmt, prelude::*};

use output::{JsonFormatter, TextFormatter};

// ============================================================================
// CLI Definition
// ============================================================================

/// Daily check-in for SSPanel-style panels.
#[derive(Parser)]
#[command(name = "checkin")]
#[command(about = "Log in to the panel, check in, and show account status")]
#[command(long_about = r#"
Logs in to an SSPanel-style web panel, performs the daily check-in, and
prints the account status scraped from the dashboard.

Environment:
  IKUUU_EMAIL      Account email (required)
  IKUUU_PASSWORD   Account password (required)
  IKUUU_DOMAIN     Panel host (default: ikuuu.ch)

Exit status is 0 when the check-in succeeded or was already done today.
"#)]
#[command(version)]
pub struct Cli {
    /// Panel host, overriding IKUUU_DOMAIN.
    #[arg(long, short)]
    pub domain: Option<String>,

    /// Output format (text or json).
    #[arg(long, short = 'f', default_value = "text")]
    pub format: OutputFormat,

    /// Pretty-print JSON output.
    #[arg(long)]
    pub pretty: bool,

    /// Skip the pauses between stages.
    #[arg(long)]
    pub no_pause: bool,

    /// Verbose output (show debug info).
    #[arg(long, short)]
    pub verbose: bool,

    /// Quiet mode (warnings and errors only).
    #[arg(long, short)]
    pub quiet: bool,

    /// Disable colored output.
    #[arg(long)]
    pub no_color: bool,
}

/// Output format options.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum, Default)]
pub enum OutputFormat {
    /// Human-readable text.
    #[default]
    Text,
    /// JSON report for scripting.
    Json,
}

/// CLI exit codes.
#[repr(i32)]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExitCode {
    /// Checked in, or already checked in today.
    Success = 0,
    /// Anything else.
    Error = 1,
    /// Stopped by Ctrl-C.
    Interrupted = 130,
}

// ============================================================================
// Logging Setup
// ============================================================================

fn setup_logging(cli: &Cli) {
    let level = if cli.verbose {
        "debug"
    } else if cli.quiet {
        "warn"
    } else {
        "info"
    };
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(format!("checkin={level}")));

    let layer = fmt::layer()
        .with_target(false)
        .with_timer(ChronoLocal::new("%Y-%m-%d %H:%M:%S".to_string()));

    // A JSON report owns stdout; diagnostics move to stderr.
    let layer: Box<dyn Layer<Registry> + Send + Sync> = if cli.format == OutputFormat::Json {
        layer.with_writer(std::io::stderr).boxed()
    } else {
        layer.with_writer(std::io::stdout).boxed()
    };

    tracing_subscriber::registry().with(layer).with(filter).init();
}

// ============================================================================
// Main Entry Point
// ============================================================================

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    setup_logging(&cli);

    let code = tokio::select! {
        result = run::run(&cli) => match result {
            Ok(report) => {
                print_report(&cli, &report)?;
                report.log_summary();
                if report.succeeded() { ExitCode::Success } else { ExitCode::Error }
            }
            Err(e) => {
                error!("{e:#}");
                ExitCode::Error
            }
        },
        _ = tokio::signal::ctrl_c() => {
            warn!("Interrupted by user");
            ExitCode::Interrupted
        }
    };

    std::process::exit(code as i32);
}

fn print_report(cli: &Cli, report: &report::RunReport) -> Result<()> {
    let rendered = match cli.format {
        OutputFormat::Json => JsonFormatter::new(cli.pretty).format(report)?,
        OutputFormat::Text => {
            let use_colors = !cli.no_color && std::io::stdout().is_terminal();
            TextFormatter::new(use_colors).format_report(report)
        }
    };
    println!("{rendered}");
    Ok(())
}
