// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Event methods: name, log summary, referenced record

use super::{EntryId, LogEvent};

impl LogEvent {
    pub fn name(&self) -> &'static str {
        match self {
            LogEvent::JobStart { .. } => "job.start",
            LogEvent::JobEnd { .. } => "job.end",
            LogEvent::TaskStart { .. } => "task.start",
            LogEvent::TaskEnd { .. } => "task.end",
            LogEvent::JobCallStart { .. } => "jobCall.start",
            LogEvent::JobCallEnd { .. } => "jobCall.end",
        }
    }

    /// Whether this event opens a run or task (as opposed to closing one).
    pub fn is_start(&self) -> bool {
        matches!(
            self,
            LogEvent::JobStart { .. } | LogEvent::TaskStart { .. } | LogEvent::JobCallStart { .. }
        )
    }

    /// The already-recorded entry this event points at: the parent for
    /// child starts, the closed record for ends. `None` for job starts and
    /// parentless task starts.
    pub fn referenced_id(&self) -> Option<&EntryId> {
        match self {
            LogEvent::JobStart { .. } => None,
            LogEvent::TaskStart { parent_id, .. } => parent_id.as_ref(),
            LogEvent::JobEnd { run_job_id, .. } | LogEvent::JobCallStart { run_job_id, .. } => {
                Some(run_job_id)
            }
            LogEvent::TaskEnd { task_id, .. } => Some(task_id),
            LogEvent::JobCallEnd { run_call_id, .. } => Some(run_call_id),
        }
    }

    /// One-line summary for tracing output.
    pub fn log_summary(&self) -> String {
        let t = self.name();
        match self {
            LogEvent::JobStart { kind, job_id, .. } => match kind {
                Some(kind) => format!("{t} job={job_id} type={kind}"),
                None => format!("{t} job={job_id}"),
            },
            LogEvent::JobEnd { run_job_id, error } => {
                format!("{t} run={run_job_id} error={}", error.is_some())
            }
            LogEvent::TaskStart { parent_id: Some(parent), .. } => format!("{t} parent={parent}"),
            LogEvent::TaskStart { parent_id: None, .. } => t.to_string(),
            LogEvent::TaskEnd { task_id, status, .. } => match status {
                Some(status) => format!("{t} task={task_id} status={status}"),
                None => format!("{t} task={task_id}"),
            },
            LogEvent::JobCallStart { run_job_id, method, params } => {
                let method = method.as_deref().unwrap_or("-");
                let vm = params.id.as_deref().unwrap_or("-");
                format!("{t} run={run_job_id} method={method} vm={vm}")
            }
            LogEvent::JobCallEnd { run_call_id, error } => {
                format!("{t} call={run_call_id} error={}", error.is_some())
            }
        }
    }
}
