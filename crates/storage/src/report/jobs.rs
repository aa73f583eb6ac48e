// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Job run and VM call handlers.

use runlog_core::{CallParams, LogEntry, LogEvent, RunRecord, RunStatus};
use serde_json::{Map, Value};

use super::Consolidator;

/// Job type whose runs are always report roots, keyed or not.
const BACKUP_JOB_TYPE: &str = "backup";

/// Returns false when the entry leaves the report unchanged.
pub(super) fn apply(c: &mut Consolidator<'_>, entry: &LogEntry) -> bool {
    match &entry.data {
        LogEvent::JobStart { kind, key, job_id, job_name, schedule_id, data } => {
            let is_root = kind.as_deref() == Some(BACKUP_JOB_TYPE) || key.is_none();
            if !is_root || !c.selects_run(&entry.id) {
                return false;
            }
            let status = RunStatus::opening(c.running.is_job_running(job_id, &entry.id));
            c.open_root(RunRecord::job_run(
                entry.id.clone(),
                job_id.clone(),
                schedule_id.clone(),
                job_name.clone(),
                data.clone(),
                entry.time,
                status,
            ));
            true
        }

        LogEvent::JobEnd { run_job_id, error } => {
            c.close(run_job_id, entry.time, error.clone(), None)
        }

        LogEvent::JobCallStart { run_job_id, params, .. } => {
            let Some(parent) = c.started_index(run_job_id) else {
                return false;
            };
            c.open_child(parent, entry.id.clone(), None, Some(vm_data(params)), entry.time);
            true
        }

        LogEvent::JobCallEnd { run_call_id, error } => {
            c.close(run_call_id, entry.time, error.clone(), None)
        }

        _ => false,
    }
}

/// Task payload of a VM call: `{"type": "VM", "id": <vm>}`.
fn vm_data(params: &CallParams) -> Value {
    let mut data = Map::new();
    data.insert("type".to_string(), Value::from("VM"));
    if let Some(id) = &params.id {
        data.insert("id".to_string(), Value::from(id.as_str()));
    }
    Value::Object(data)
}
