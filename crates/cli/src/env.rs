// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Centralized environment variable access for the CLI.

use std::path::{Path, PathBuf};

/// Default tracing filter when `RUNLOG_LOG` is unset
pub const DEFAULT_LOG_FILTER: &str = "warn";

/// Resolve state directory: RUNLOG_STATE_DIR > XDG_STATE_HOME/runlog > ~/.local/state/runlog
pub fn state_dir() -> anyhow::Result<PathBuf> {
    if let Ok(dir) = std::env::var("RUNLOG_STATE_DIR") {
        return Ok(PathBuf::from(dir));
    }
    if let Ok(xdg) = std::env::var("XDG_STATE_HOME") {
        return Ok(PathBuf::from(xdg).join("runlog"));
    }
    let home = std::env::var("HOME").map_err(|_| {
        anyhow::anyhow!("cannot resolve state directory: set RUNLOG_STATE_DIR or HOME")
    })?;
    Ok(PathBuf::from(home).join(".local/state/runlog"))
}

/// Tracing filter directives (`RUNLOG_LOG`)
pub fn log_filter() -> String {
    std::env::var("RUNLOG_LOG")
        .ok()
        .filter(|s| !s.is_empty())
        .unwrap_or_else(|| DEFAULT_LOG_FILTER.to_string())
}

/// Files under the state directory.
#[derive(Debug, Clone)]
pub struct StatePaths {
    root: PathBuf,
}

impl StatePaths {
    /// Use `override_dir` if given, else resolve from the environment.
    pub fn resolve(override_dir: Option<PathBuf>) -> anyhow::Result<Self> {
        let root = match override_dir {
            Some(dir) => dir,
            None => state_dir()?,
        };
        Ok(Self { root })
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Directory holding `jobs.jsonl` and `restore.jsonl`
    pub fn logs_dir(&self) -> PathBuf {
        self.root.join("logs")
    }

    pub fn running_path(&self) -> PathBuf {
        self.root.join("running.json")
    }
}

#[cfg(test)]
#[path = "env_tests.rs"]
mod tests;
