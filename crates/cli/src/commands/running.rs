// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

use anyhow::Result;
use runlog_storage::RunningSnapshot;

use crate::color::{self, Tone};
use crate::env::StatePaths;
use crate::output::{format_or_json, OutputFormat};

/// Text listing of a running snapshot, sorted by id.
pub fn render_running(snapshot: &RunningSnapshot) -> String {
    if snapshot.is_empty() {
        return "Nothing running\n".to_string();
    }

    let mut out = String::new();
    if !snapshot.jobs.is_empty() {
        let mut jobs: Vec<_> = snapshot.jobs.iter().collect();
        jobs.sort();
        out.push_str(&format!("{}\n", color::paint(Tone::Heading, "Jobs:")));
        for (job_id, run_id) in jobs {
            out.push_str(&format!("  {job_id}  {}\n", color::paint(Tone::Note, run_id.as_str())));
        }
    }
    if !snapshot.restores.is_empty() {
        let mut restores: Vec<_> = snapshot.restores.iter().collect();
        restores.sort();
        out.push_str(&format!("{}\n", color::paint(Tone::Heading, "Restores:")));
        for run_id in restores {
            out.push_str(&format!("  {run_id}\n"));
        }
    }
    out
}

pub fn handle(paths: &StatePaths, format: OutputFormat) -> Result<()> {
    let snapshot = RunningSnapshot::load(&paths.running_path())?;
    format_or_json(format, &snapshot, || print!("{}", render_running(&snapshot)))
}

#[cfg(test)]
#[path = "running_tests.rs"]
mod tests;
