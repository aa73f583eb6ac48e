// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Task and restore handlers.

use runlog_core::{LogEntry, LogEvent, RunRecord, RunStatus};

use super::Consolidator;

/// Returns false when the entry leaves the report unchanged.
pub(super) fn apply(c: &mut Consolidator<'_>, entry: &LogEntry) -> bool {
    match &entry.data {
        LogEvent::TaskStart { parent_id, data } => {
            let parent = parent_id.as_ref().and_then(|id| c.started_index(id));
            if let Some(parent) = parent {
                c.open_child(parent, entry.id.clone(), entry.message.clone(), data.clone(), entry.time);
                true
            } else if entry.is_restore_marker() {
                let status = RunStatus::opening(c.running.is_restore_running(&entry.id));
                c.open_root(RunRecord::task(
                    entry.id.clone(),
                    entry.message.clone(),
                    data.clone(),
                    entry.time,
                    status,
                ));
                true
            } else {
                false
            }
        }

        LogEvent::TaskEnd { task_id, result, status } => {
            c.close(task_id, entry.time, result.clone(), *status)
        }

        _ => false,
    }
}
