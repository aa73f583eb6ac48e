// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Shared test helpers for use across crates.
//!
//! Gated behind `#[cfg(any(test, feature = "test-support"))]`.

use crate::event::{CallParams, EntryId, JobId, LogEntry, LogEvent, ScheduleId, RESTORE_MESSAGE};
use crate::run::{RunRecord, RunStatus};
use serde_json::{json, Value};

// ── Proptest strategies ─────────────────────────────────────────────────

/// Proptest strategies for run state types.
pub mod strategies {
    use crate::run::{RunStatus, Span};
    use proptest::prelude::*;

    pub fn arb_run_status() -> impl Strategy<Value = RunStatus> {
        prop_oneof![
            Just(RunStatus::Pending),
            Just(RunStatus::Interrupted),
            Just(RunStatus::Skipped),
            Just(RunStatus::Failure),
            Just(RunStatus::Success),
        ]
    }

    pub fn arb_span() -> impl Strategy<Value = Span> {
        (0u64..1_000, prop::option::of(0u64..1_000))
            .prop_map(|(start, end)| Span { start, end: end.map(|e| start + e) })
    }
}

// ── Record builder ──────────────────────────────────────────────────────────

/// Builds a [`RunRecord`] for tests: an open, pending root `run-1` started
/// at 1000 unless told otherwise.
#[derive(Debug, Clone)]
pub struct RunRecordBuilder {
    record: RunRecord,
}

impl RunRecord {
    pub fn builder() -> RunRecordBuilder {
        RunRecordBuilder {
            record: RunRecord::task(EntryId::new("run-1"), None, None, 1_000, RunStatus::Pending),
        }
    }
}

impl RunRecordBuilder {
    pub fn id(mut self, id: impl Into<EntryId>) -> Self {
        self.record.id = id.into();
        self
    }

    pub fn job_id(mut self, job_id: Option<JobId>) -> Self {
        self.record.job_id = job_id;
        self
    }

    pub fn schedule_id(mut self, schedule_id: Option<ScheduleId>) -> Self {
        self.record.schedule_id = schedule_id;
        self
    }

    pub fn job_name(mut self, job_name: Option<String>) -> Self {
        self.record.job_name = job_name;
        self
    }

    pub fn message(mut self, message: Option<String>) -> Self {
        self.record.message = message;
        self
    }

    pub fn data(mut self, data: Option<Value>) -> Self {
        self.record.data = data;
        self
    }

    pub fn start(mut self, start: u64) -> Self {
        self.record.start = start;
        self
    }

    pub fn end(mut self, end: Option<u64>) -> Self {
        self.record.end = end;
        self
    }

    pub fn status(mut self, status: RunStatus) -> Self {
        self.record.status = status;
        self
    }

    pub fn result(mut self, result: Option<Value>) -> Self {
        self.record.result = result;
        self
    }

    pub fn tasks(mut self, tasks: Vec<RunRecord>) -> Self {
        self.record.tasks = tasks;
        self
    }

    pub fn build(self) -> RunRecord {
        self.record
    }
}

// ── Log entry factory functions ─────────────────────────────────────────────

/// `job.start` for a backup job run.
pub fn job_start_entry(id: &str, job_id: &str, time: u64) -> LogEntry {
    LogEntry::new(
        id,
        time,
        LogEvent::JobStart {
            kind: Some("backup".to_string()),
            key: None,
            job_id: JobId::new(job_id),
            job_name: Some(format!("{job_id}-name")),
            schedule_id: Some(ScheduleId::new("schedule-1")),
            data: None,
        },
    )
    .with_message("backup")
}

/// `job.start` for a legacy keyed job of some other type.
pub fn keyed_job_start_entry(id: &str, job_id: &str, kind: &str, time: u64) -> LogEntry {
    LogEntry::new(
        id,
        time,
        LogEvent::JobStart {
            kind: Some(kind.to_string()),
            key: Some("legacy-key".to_string()),
            job_id: JobId::new(job_id),
            job_name: None,
            schedule_id: None,
            data: None,
        },
    )
}

pub fn job_end_entry(id: &str, run_id: &str, time: u64, error: Option<Value>) -> LogEntry {
    LogEntry::new(id, time, LogEvent::JobEnd { run_job_id: EntryId::new(run_id), error })
}

/// `task.start` attached to `parent_id`, carrying a VM payload.
pub fn task_start_entry(id: &str, parent_id: &str, time: u64) -> LogEntry {
    LogEntry::new(
        id,
        time,
        LogEvent::TaskStart {
            parent_id: Some(EntryId::new(parent_id)),
            data: Some(json!({ "type": "VM", "id": format!("vm-{id}") })),
        },
    )
    .with_message("backup VM")
}

/// Parentless `task.start` that opens a restore.
pub fn restore_start_entry(id: &str, time: u64) -> LogEntry {
    LogEntry::new(
        id,
        time,
        LogEvent::TaskStart {
            parent_id: None,
            data: Some(json!({ "jobId": "j1", "srId": "sr-1", "time": 1 })),
        },
    )
    .with_message(RESTORE_MESSAGE)
}

pub fn task_end_entry(
    id: &str,
    task_id: &str,
    time: u64,
    result: Option<Value>,
    status: Option<RunStatus>,
) -> LogEntry {
    LogEntry::new(id, time, LogEvent::TaskEnd { task_id: EntryId::new(task_id), result, status })
}

pub fn job_call_start_entry(id: &str, run_id: &str, vm_id: &str, time: u64) -> LogEntry {
    LogEntry::new(
        id,
        time,
        LogEvent::JobCallStart {
            run_job_id: EntryId::new(run_id),
            method: Some("vm.rollingSnapshot".to_string()),
            params: CallParams { id: Some(vm_id.to_string()) },
        },
    )
}

pub fn job_call_end_entry(id: &str, call_id: &str, time: u64, error: Option<Value>) -> LogEntry {
    LogEntry::new(id, time, LogEvent::JobCallEnd { run_call_id: EntryId::new(call_id), error })
}

/// Error payload with the given message.
pub fn error(message: &str) -> Value {
    json!({ "message": message })
}
