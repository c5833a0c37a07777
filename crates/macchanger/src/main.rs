//! macchanger entry point.
//!
//! Parses the command line, initializes logging and runs a single change or
//! listing against the host through the `ip` command.

use std::process::ExitCode;

use anyhow::Context;
use clap::Parser;
use tracing::info;
use tracing_subscriber::{EnvFilter, FmtSubscriber};

use macchanger::{normalize_args, run_cli, Args};
use macchanger_common::ShellRunner;

/// Initialize tracing/logging.
///
/// `RUST_LOG` takes precedence over `--log-level`. Logs go to stderr so
/// stdout only carries the report.
fn init_logging(level: &str) -> anyhow::Result<()> {
    let filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(level))
        .with_context(|| format!("Invalid log level '{}'", level))?;

    let subscriber = FmtSubscriber::builder()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(true)
        .with_thread_ids(false)
        .with_file(false)
        .with_line_number(false)
        .finish();

    tracing::subscriber::set_global_default(subscriber)
        .context("Failed to set tracing subscriber")?;
    Ok(())
}

#[tokio::main(flavor = "current_thread")]
async fn main() -> ExitCode {
    let args = Args::parse_from(normalize_args(std::env::args_os()));

    if let Err(e) = init_logging(&args.log_level) {
        eprintln!("{:#}", e);
        return ExitCode::FAILURE;
    }

    info!("--- Starting macchanger ---");

    let runner = ShellRunner::new(args.command_timeout());
    let mut stdout = std::io::stdout();
    let status = run_cli(&args, runner, &mut stdout).await;

    info!("macchanger exiting with status {:?}", status);
    status.into()
}
