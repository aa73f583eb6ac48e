// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

use std::fmt::Write;

use chrono::{DateTime, Utc};
use clap::ValueEnum;
use runlog_core::{format_elapsed_ms, RunRecord, RunStatus};
use serde::Serialize;
use serde_json::Value;

use crate::color::{self, Tone};

#[cfg(test)]
#[path = "output_tests.rs"]
mod tests;

#[derive(Clone, Copy, Debug, Default, PartialEq, ValueEnum)]
pub enum OutputFormat {
    #[default]
    Text,
    Json,
}

/// Format epoch milliseconds as a UTC timestamp.
pub fn format_timestamp(epoch_ms: u64) -> String {
    i64::try_from(epoch_ms)
        .ok()
        .and_then(DateTime::<Utc>::from_timestamp_millis)
        .map(|t| t.format("%Y-%m-%d %H:%M:%S").to_string())
        .unwrap_or_else(|| epoch_ms.to_string())
}

/// Human label of a record: job name, message, or the id in its payload.
pub fn record_label(record: &RunRecord) -> String {
    if let Some(name) = record.job_name.as_deref().or(record.message.as_deref()) {
        return name.to_string();
    }
    record
        .data
        .as_ref()
        .and_then(|d| d.get("id"))
        .and_then(Value::as_str)
        .map_or_else(|| "-".to_string(), str::to_string)
}

fn timing(record: &RunRecord) -> String {
    let start = format_timestamp(record.start);
    match (record.end, record.duration_ms()) {
        (Some(end), Some(ms)) => {
            format!("{start} → {} ({})", format_timestamp(end), format_elapsed_ms(ms))
        }
        _ => format!("{start} → -"),
    }
}

fn error_message(record: &RunRecord) -> Option<&str> {
    if !matches!(record.status, RunStatus::Failure | RunStatus::Skipped) {
        return None;
    }
    record.result.as_ref()?.get("message")?.as_str()
}

/// Render a record and its tasks as an indented tree.
pub fn render_tree(record: &RunRecord) -> String {
    let mut out = String::new();
    write_tree(&mut out, record, 0);
    out
}

fn write_tree(out: &mut String, record: &RunRecord, depth: usize) {
    let indent = "  ".repeat(depth);
    let _ = write!(
        out,
        "{indent}{}  {}  {}  {}",
        color::paint(Tone::Id, record.id.as_str()),
        color::status(record.status),
        record_label(record),
        color::paint(Tone::Timing, &timing(record)),
    );
    if let Some(message) = error_message(record) {
        let _ = write!(out, "  {}", color::paint(Tone::Note, &format!("({message})")));
    }
    out.push('\n');
    for task in &record.tasks {
        write_tree(out, task, depth + 1);
    }
}

/// Render every run, separated by blank lines.
pub fn render_runs<'a>(runs: impl IntoIterator<Item = &'a RunRecord>) -> String {
    runs.into_iter().map(render_tree).collect::<Vec<_>>().join("\n")
}

/// Format-branch helper for non-list commands.
///
/// Renders as JSON when `format` is `Json`, otherwise calls `text_fn`.
pub fn format_or_json<T: Serialize>(
    format: OutputFormat,
    data: &T,
    text_fn: impl FnOnce(),
) -> anyhow::Result<()> {
    match format {
        OutputFormat::Json => {
            println!("{}", serde_json::to_string_pretty(data)?);
        }
        OutputFormat::Text => {
            text_fn();
        }
    }
    Ok(())
}
