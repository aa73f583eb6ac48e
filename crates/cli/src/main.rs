// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

// Allow panic!/unwrap/expect in test code
#![cfg_attr(test, allow(clippy::panic))]
#![cfg_attr(test, allow(clippy::unwrap_used))]
#![cfg_attr(test, allow(clippy::expect_used))]

//! runlog: consolidated report of backup job runs and restores
//!
//! Reads `jobs.jsonl` and `restore.jsonl` from `<state>/logs/` and the
//! running snapshot from `<state>/running.json`.
//!
//! - `RUNLOG_STATE_DIR` - state directory (default `$XDG_STATE_HOME/runlog`)
//! - `RUNLOG_LOG` - tracing filter (default `warn`)

mod color;
mod commands;
mod env;
mod exit_error;
mod output;

use std::path::PathBuf;

use anyhow::Result;
use clap::{Parser, Subcommand};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use crate::env::StatePaths;
use crate::exit_error::ExitError;
use crate::output::OutputFormat;

#[derive(Parser)]
#[command(name = "runlog", version, about = "Backup run reports from job and restore logs")]
#[command(styles = color::styles())]
struct Cli {
    /// State directory (overrides RUNLOG_STATE_DIR)
    #[arg(long, global = true, value_name = "DIR")]
    state_dir: Option<PathBuf>,

    /// Output format
    #[arg(short = 'o', long = "output", global = true, value_enum, default_value_t)]
    output: OutputFormat,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Report every run and restore, or a single run
    Logs(commands::logs::LogsArgs),
    /// Show one run or restore with its tasks
    Show(commands::logs::ShowArgs),
    /// Append an event to the job or restore log
    Emit(commands::emit::EmitArgs),
    /// Show the job runs and restores tracked as running
    Running,
}

fn init_tracing() {
    let filter =
        EnvFilter::try_new(env::log_filter()).unwrap_or_else(|_| EnvFilter::new(env::DEFAULT_LOG_FILTER));
    tracing_subscriber::registry()
        .with(tracing_subscriber::fmt::layer().with_target(false).with_writer(std::io::stderr))
        .with(filter)
        .init();
}

async fn run(cli: Cli) -> Result<()> {
    let paths = StatePaths::resolve(cli.state_dir)?;
    tracing::debug!(state_dir = %paths.root().display(), "resolved state directory");

    match cli.command {
        Commands::Logs(args) => commands::logs::handle_logs(args, &paths, cli.output).await,
        Commands::Show(args) => commands::logs::handle_show(args, &paths, cli.output).await,
        Commands::Emit(args) => commands::emit::handle(args, &paths, cli.output).await,
        Commands::Running => commands::running::handle(&paths, cli.output),
    }
}

fn main() {
    init_tracing();
    let cli = Cli::parse();

    let result = tokio::runtime::Builder::new_current_thread()
        .enable_all()
        .build()
        .map_err(anyhow::Error::from)
        .and_then(|runtime| runtime.block_on(run(cli)));

    if let Err(err) = result {
        eprintln!("Error: {err:#}");
        std::process::exit(ExitError::code_of(&err));
    }
}

#[cfg(test)]
#[path = "main_tests.rs"]
mod tests;
