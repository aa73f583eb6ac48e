// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Append events to the job or restore log

use anyhow::Result;
use clap::Args;
use runlog_core::{LogEvent, Namespace};
use runlog_storage::JsonlLogStore;
use std::io::Read;

use crate::env::StatePaths;
use crate::output::{format_or_json, OutputFormat};

#[derive(Args)]
pub struct EmitArgs {
    /// Log to append to (jobs or restore)
    #[arg(value_parser = parse_namespace)]
    pub namespace: Namespace,

    /// JSON event: {"event": "job.start", "jobId": "...", ...}
    /// If omitted, reads from stdin
    #[arg(value_name = "JSON")]
    pub payload: Option<String>,

    /// Message stored alongside the event (`restore` opens a restore)
    #[arg(long)]
    pub message: Option<String>,
}

fn parse_namespace(s: &str) -> Result<Namespace, String> {
    Namespace::parse(s).ok_or_else(|| format!("unknown log '{s}' (expected jobs or restore)"))
}

/// Parse an event payload, naming the expected shape on failure.
pub fn parse_event(json: &str) -> Result<LogEvent> {
    serde_json::from_str(json).map_err(|e| {
        anyhow::anyhow!(
            "invalid event JSON: {}. Expected: {{\"event\": \"job.start\"|\"job.end\"|\"task.start\"|\"task.end\"|\"jobCall.start\"|\"jobCall.end\", ...}}",
            e
        )
    })
}

pub async fn handle(args: EmitArgs, paths: &StatePaths, format: OutputFormat) -> Result<()> {
    let json = match args.payload {
        Some(s) => s,
        None => {
            let mut buf = String::new();
            std::io::stdin().read_to_string(&mut buf)?;
            buf
        }
    };
    let event = parse_event(&json)?;

    let store = JsonlLogStore::new(paths.logs_dir());
    let entry = store.append(args.namespace, args.message, event).await?;
    format_or_json(format, &entry, || println!("{}", entry.id))
}

#[cfg(test)]
#[path = "emit_tests.rs"]
mod tests;
