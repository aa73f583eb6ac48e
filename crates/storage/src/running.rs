// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Snapshot of the job runs and restores currently executing.
//!
//! Owned by whatever process runs the jobs; the report only reads it to tell
//! a run that is still going (`pending`) from one that was abandoned
//! (`interrupted`).

use std::collections::{HashMap, HashSet};
use std::path::{Path, PathBuf};

use runlog_core::{EntryId, JobId};
use serde::{Deserialize, Serialize};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum RunningError {
    #[error("failed to read running snapshot {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("invalid running snapshot {}: {source}", path.display())]
    Json {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RunningSnapshot {
    /// job id → id of the run currently executing it
    #[serde(default)]
    pub jobs: HashMap<JobId, EntryId>,
    /// ids of restores currently executing
    #[serde(default)]
    pub restores: HashSet<EntryId>,
}

impl RunningSnapshot {
    pub fn with_job(mut self, job_id: impl Into<JobId>, run_id: impl Into<EntryId>) -> Self {
        self.jobs.insert(job_id.into(), run_id.into());
        self
    }

    pub fn with_restore(mut self, run_id: impl Into<EntryId>) -> Self {
        self.restores.insert(run_id.into());
        self
    }

    pub fn is_empty(&self) -> bool {
        self.jobs.is_empty() && self.restores.is_empty()
    }

    /// Whether `run_id` is the run the tracker holds for `job_id`.
    pub fn is_job_running(&self, job_id: &JobId, run_id: &EntryId) -> bool {
        self.jobs.get(job_id.as_str()) == Some(run_id)
    }

    pub fn is_restore_running(&self, run_id: &EntryId) -> bool {
        self.restores.contains(run_id.as_str())
    }

    /// Load a snapshot from a JSON file. A missing file means nothing is running.
    pub fn load(path: &Path) -> Result<Self, RunningError> {
        let content = match std::fs::read_to_string(path) {
            Ok(content) => content,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => return Ok(Self::default()),
            Err(source) => return Err(RunningError::Io { path: path.to_path_buf(), source }),
        };
        serde_json::from_str(&content)
            .map_err(|source| RunningError::Json { path: path.to_path_buf(), source })
    }
}

#[cfg(test)]
#[path = "running_tests.rs"]
mod tests;
