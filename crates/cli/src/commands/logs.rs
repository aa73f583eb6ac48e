// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Report commands: `runlog logs` and `runlog show`

use anyhow::Result;
use clap::Args;
use runlog_storage::{BackupLogs, JsonlLogStore, LogsReport, RunningSnapshot};

use crate::env::StatePaths;
use crate::exit_error::ExitError;
use crate::output::{format_or_json, render_runs, render_tree, OutputFormat};

#[derive(Args)]
pub struct LogsArgs {
    /// Only report the run started by this entry id
    #[arg(long = "run", value_name = "ID")]
    pub run_id: Option<String>,
}

#[derive(Args)]
pub struct ShowArgs {
    /// Id of the entry that started the run or restore
    pub run_id: String,
}

/// Read both logs from the state directory and consolidate them.
pub async fn load_report(paths: &StatePaths, run_id: Option<&str>) -> Result<LogsReport> {
    let running = RunningSnapshot::load(&paths.running_path())?;
    let logs = BackupLogs::new(JsonlLogStore::new(paths.logs_dir()));
    Ok(logs.get_backup_ng_logs(run_id, &running).await?)
}

pub async fn handle_logs(args: LogsArgs, paths: &StatePaths, format: OutputFormat) -> Result<()> {
    let report = load_report(paths, args.run_id.as_deref()).await?;
    format_or_json(format, &report, || match &report {
        LogsReport::All(runs) if runs.is_empty() => println!("No runs found"),
        LogsReport::All(runs) => print!("{}", render_runs(runs.values())),
        LogsReport::Single(Some(run)) => print!("{}", render_tree(run)),
        LogsReport::Single(None) => {
            println!("No run found: {}", args.run_id.as_deref().unwrap_or_default())
        }
    })
}

pub async fn handle_show(args: ShowArgs, paths: &StatePaths, format: OutputFormat) -> Result<()> {
    let run = load_report(paths, Some(&args.run_id))
        .await?
        .into_single()
        .ok_or_else(|| ExitError::new(1, format!("run not found: {}", args.run_id)))?;
    format_or_json(format, &run, || print!("{}", render_tree(&run)))
}

#[cfg(test)]
#[path = "logs_tests.rs"]
mod tests;
