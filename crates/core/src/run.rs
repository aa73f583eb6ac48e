// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Run and task records of the consolidated backup report.

use crate::event::{EntryId, JobId, ScheduleId};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::cmp::Ordering;

/// Status of a run or task.
///
/// `Pending` and `Interrupted` are the open states; the other three are
/// terminal. An interrupted record can still be closed by a late end event.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RunStatus {
    /// Started and still tracked as running
    Pending,
    /// Started, but no longer tracked as running and never ended
    Interrupted,
    /// Ended on a benign condition
    Skipped,
    Failure,
    Success,
}

impl RunStatus {
    pub fn is_terminal(&self) -> bool {
        matches!(self, RunStatus::Skipped | RunStatus::Failure | RunStatus::Success)
    }

    /// Initial status of a root record: `Pending` when the running tracker
    /// still points at it.
    pub fn opening(tracked_as_running: bool) -> Self {
        if tracked_as_running {
            RunStatus::Pending
        } else {
            RunStatus::Interrupted
        }
    }
}

impl std::fmt::Display for RunStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(match self {
            RunStatus::Pending => "pending",
            RunStatus::Interrupted => "interrupted",
            RunStatus::Skipped => "skipped",
            RunStatus::Failure => "failure",
            RunStatus::Success => "success",
        })
    }
}

/// Start and optional end of a record, in epoch milliseconds.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Span {
    pub start: u64,
    pub end: Option<u64>,
}

impl Span {
    /// Finished spans first, ordered by end time; unfinished spans after,
    /// ordered by start time.
    pub fn finish_then_start(&self, other: &Span) -> Ordering {
        match (self.end, other.end) {
            (Some(a), Some(b)) => a.cmp(&b),
            (Some(_), None) => Ordering::Less,
            (None, Some(_)) => Ordering::Greater,
            (None, None) => self.start.cmp(&other.start),
        }
    }
}

/// One job run, restore, or task within either.
///
/// Job-specific fields are only set on job runs; `message` is set on tasks
/// and restores. `tasks` is empty until a child is attached.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RunRecord {
    pub id: EntryId,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub job_id: Option<JobId>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub schedule_id: Option<ScheduleId>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub job_name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub data: Option<Value>,
    pub start: u64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub end: Option<u64>,
    pub status: RunStatus,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub result: Option<Value>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub tasks: Vec<RunRecord>,
}

impl RunRecord {
    /// Record opened by a `job.start` entry.
    pub fn job_run(
        id: EntryId,
        job_id: JobId,
        schedule_id: Option<ScheduleId>,
        job_name: Option<String>,
        data: Option<Value>,
        start: u64,
        status: RunStatus,
    ) -> Self {
        Self {
            id,
            job_id: Some(job_id),
            schedule_id,
            job_name,
            message: None,
            data,
            start,
            end: None,
            status,
            result: None,
            tasks: Vec::new(),
        }
    }

    /// Record opened by a `task.start` or `jobCall.start` entry, or a
    /// restore root.
    pub fn task(
        id: EntryId,
        message: Option<String>,
        data: Option<Value>,
        start: u64,
        status: RunStatus,
    ) -> Self {
        Self {
            id,
            job_id: None,
            schedule_id: None,
            job_name: None,
            message,
            data,
            start,
            end: None,
            status,
            result: None,
            tasks: Vec::new(),
        }
    }

    pub fn span(&self) -> Span {
        Span { start: self.start, end: self.end }
    }

    /// Elapsed time between start and end, if ended.
    pub fn duration_ms(&self) -> Option<u64> {
        self.end.map(|end| end.saturating_sub(self.start))
    }
}

#[cfg(test)]
#[path = "run_tests.rs"]
mod tests;
