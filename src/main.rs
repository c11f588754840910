//! Payments Analytics CLI
//!
//! Runs one analytics pipeline described by a configuration document.
//!
//! # Usage
//!
//! ```bash
//! cargo run -- --config config.yaml
//! RUST_LOG=payments_analytics=debug cargo run -- --config runs/daily.json
//! cargo run -- --config config.yaml --log-level debug > results.txt
//! ```
//!
//! Logs go to stderr so the console writer's output on stdout stays clean.
//!
//! # Exit Codes
//!
//! - 0: The run completed, even if some stages degraded
//! - 1: The configuration could not be loaded

use anyhow::Context;
use payments_analytics::cli::{self, CliArgs};
use payments_analytics::config::load_config;
use payments_analytics::core::{CoreEngine, RunReport};
use std::process;
use tracing::{error, warn};
use tracing_subscriber::EnvFilter;

/// Filter applied when neither `--log-level` nor RUST_LOG is set
const DEFAULT_LOG_FILTER: &str = "payments_analytics=info";

/// Pick the log filter: `--log-level` first, then RUST_LOG, then the default
fn log_filter(log_level: Option<&str>) -> EnvFilter {
    match log_level {
        Some(directive) => EnvFilter::try_new(directive).ok(),
        None => EnvFilter::try_from_default_env().ok(),
    }
    .unwrap_or_else(|| EnvFilter::new(DEFAULT_LOG_FILTER))
}

fn init_tracing(log_level: Option<&str>) {
    tracing_subscriber::fmt()
        .with_env_filter(log_filter(log_level))
        .with_writer(std::io::stderr)
        .init();
}

fn run(args: &CliArgs) -> anyhow::Result<RunReport> {
    let config = load_config(&args.config).with_context(|| {
        format!(
            "Cannot start run with configuration '{}'",
            args.config.display()
        )
    })?;

    Ok(CoreEngine::new().run(&config))
}

fn main() {
    let args = cli::parse_args();
    init_tracing(args.log_level.as_deref());

    match run(&args) {
        Ok(report) if report.is_clean() => {}
        Ok(report) => {
            for failure in &report.failures {
                warn!(
                    stage = ?failure.stage,
                    component = %failure.component,
                    error = %failure.error,
                    "Degraded stage"
                );
            }
        }
        Err(e) => {
            error!("{:#}", e);
            process::exit(1);
        }
    }
}
