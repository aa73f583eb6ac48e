// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Backup log report over a log store.

use runlog_core::{Namespace, RunRecord};
use serde::Serialize;

use crate::report::{consolidate, Consolidated};
use crate::running::RunningSnapshot;
use crate::store::{LogStore, StoreError};

/// Result of [`BackupLogs::get_backup_ng_logs`].
///
/// Serializes as the bare map, the bare record, or `null`.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum LogsReport {
    /// Every run, when no run id was requested
    All(Consolidated),
    /// The requested run, if it exists
    Single(Option<RunRecord>),
}

impl LogsReport {
    pub fn into_single(self) -> Option<RunRecord> {
        match self {
            LogsReport::Single(record) => record,
            LogsReport::All(_) => None,
        }
    }
}

/// Reads both logs and consolidates them into run records.
pub struct BackupLogs<S> {
    store: S,
}

impl<S: LogStore> BackupLogs<S> {
    pub fn new(store: S) -> Self {
        Self { store }
    }

    /// Consolidated report of every run, or of `run_id` alone.
    ///
    /// Both logs are read concurrently; either read failing fails the call.
    /// An unknown `run_id` yields `Single(None)`.
    pub async fn get_backup_ng_logs(
        &self,
        run_id: Option<&str>,
        running: &RunningSnapshot,
    ) -> Result<LogsReport, StoreError> {
        let (job_log, restore_log) = tokio::try_join!(
            self.store.get_logs(Namespace::Jobs),
            self.store.get_logs(Namespace::Restore),
        )?;

        let mut consolidated = consolidate(&job_log, &restore_log, running, run_id);
        Ok(match run_id {
            None => LogsReport::All(consolidated),
            Some(id) => LogsReport::Single(consolidated.shift_remove(id)),
        })
    }
}

#[cfg(test)]
#[path = "service_tests.rs"]
mod tests;
