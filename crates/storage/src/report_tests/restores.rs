// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

use super::*;
use runlog_core::{EntryId, LogEvent};
use serde_json::json;

fn restores_only(
    entries: impl IntoIterator<Item = LogEntry>,
    running: &RunningSnapshot,
) -> Consolidated {
    consolidate(&LogSnapshot::new(), &log(entries), running, None)
}

#[test]
fn tracked_restore_is_pending_root() {
    let running = RunningSnapshot::default().with_restore("x1");
    let report = restores_only([restore_start_entry("x1", 10)], &running);

    let restore = &report["x1"];
    assert_eq!(restore.status, RunStatus::Pending);
    assert_eq!(restore.message.as_deref(), Some("restore"));
    assert!(restore.job_id.is_none());
    assert_eq!(restore.data.as_ref().map(|d| d["srId"].clone()), Some(json!("sr-1")));
}

#[test]
fn untracked_restore_is_interrupted() {
    let report = restores_only([restore_start_entry("x1", 10)], &RunningSnapshot::default());
    assert_eq!(report["x1"].status, RunStatus::Interrupted);
}

#[test]
fn restore_with_subtasks_resolves() {
    let report = restores_only(
        [
            restore_start_entry("x1", 10),
            task_start_entry("t1", "x1", 11),
            task_end_entry("e1", "t1", 20, None, Some(RunStatus::Success)),
            task_end_entry("e2", "x1", 30, Some(json!({ "size": 1 })), Some(RunStatus::Success)),
        ],
        &RunningSnapshot::default(),
    );

    let restore = &report["x1"];
    assert_eq!(restore.status, RunStatus::Success);
    assert_eq!(restore.end, Some(30));
    assert_eq!(task_ids(restore), vec!["t1"]);
}

#[test]
fn restore_failing_subtask_fails_restore() {
    let report = restores_only(
        [
            restore_start_entry("x1", 10),
            task_start_entry("t1", "x1", 11),
            task_end_entry("e1", "t1", 20, Some(error("VDI_IO_ERROR")), None),
            task_end_entry("e2", "x1", 30, None, None),
        ],
        &RunningSnapshot::default(),
    );
    assert_eq!(report["x1"].status, RunStatus::Failure);
}

#[test]
fn parentless_task_without_restore_marker_is_discarded() {
    let orphan = LogEntry::new(
        "t1",
        10,
        LogEvent::TaskStart { parent_id: None, data: None },
    )
    .with_message("transfer");
    let report = restores_only([orphan], &RunningSnapshot::default());
    assert!(report.is_empty());
}

#[test]
fn task_with_unknown_parent_is_discarded() {
    let report = restores_only(
        [task_start_entry("t1", "ghost", 10), task_end_entry("e1", "t1", 20, None, None)],
        &RunningSnapshot::default(),
    );
    assert!(report.is_empty());
}

#[test]
fn restore_marker_with_known_parent_attaches_as_task() {
    let nested = LogEntry::new(
        "x2",
        11,
        LogEvent::TaskStart { parent_id: Some(EntryId::new("x1")), data: None },
    )
    .with_message("restore");
    let report = restores_only([restore_start_entry("x1", 10), nested], &RunningSnapshot::default());

    assert_eq!(report.len(), 1);
    assert_eq!(task_ids(&report["x1"]), vec!["x2"]);
}

#[test]
fn restores_come_before_job_runs() {
    let report = consolidate(
        &log([job_start_entry("r1", "j1", 5)]),
        &log([restore_start_entry("x1", 10)]),
        &RunningSnapshot::default(),
        None,
    );

    let ids: Vec<&str> = report.keys().map(|k| k.as_str()).collect();
    assert_eq!(ids, vec!["x1", "r1"]);
}

#[test]
fn run_filter_does_not_apply_to_restores() {
    let report = consolidate(
        &log([job_start_entry("r1", "j1", 5)]),
        &log([restore_start_entry("x1", 10)]),
        &RunningSnapshot::default(),
        Some("x1"),
    );

    let ids: Vec<&str> = report.keys().map(|k| k.as_str()).collect();
    assert_eq!(ids, vec!["x1"]);
}

#[test]
fn job_log_task_can_attach_to_open_restore() {
    let report = consolidate(
        &log([task_start_entry("t1", "x1", 20), task_end_entry("e1", "t1", 25, None, None)]),
        &log([restore_start_entry("x1", 10)]),
        &RunningSnapshot::default(),
        None,
    );

    let restore = &report["x1"];
    assert_eq!(task_ids(restore), vec!["t1"]);
    assert_eq!(restore.tasks[0].status, RunStatus::Success);
}
