// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

use super::*;
use serde_json::json;

// ── job.start ────────────────────────────────────────────────────────────────

#[test]
fn tracked_job_run_is_pending() {
    let running = RunningSnapshot::default().with_job("j1", "r1");
    let report = consolidate(
        &log([job_start_entry("r1", "j1", 10)]),
        &LogSnapshot::new(),
        &running,
        None,
    );

    let run = &report["r1"];
    assert_eq!(run.status, RunStatus::Pending);
    assert_eq!(run.job_id.as_ref().map(|j| j.as_str()), Some("j1"));
    assert_eq!(run.job_name.as_deref(), Some("j1-name"));
    assert_eq!(run.schedule_id.as_ref().map(|s| s.as_str()), Some("schedule-1"));
    assert_eq!(run.start, 10);
    assert!(run.end.is_none());
}

#[test]
fn untracked_job_run_is_interrupted() {
    let report = jobs_only([job_start_entry("r1", "j1", 10)]);
    assert_eq!(report["r1"].status, RunStatus::Interrupted);
}

#[test]
fn job_tracked_under_another_run_is_interrupted() {
    let running = RunningSnapshot::default().with_job("j1", "r2");
    let report = consolidate(
        &log([job_start_entry("r1", "j1", 10), job_start_entry("r2", "j1", 20)]),
        &LogSnapshot::new(),
        &running,
        None,
    );

    assert_eq!(report["r1"].status, RunStatus::Interrupted);
    assert_eq!(report["r2"].status, RunStatus::Pending);
}

#[yare::parameterized(
    keyed_backup = { "backup", true },
    keyed_call   = { "call", false },
)]
fn keyed_job_start_is_root_only_for_backups(kind: &str, is_root: bool) {
    let report = jobs_only([keyed_job_start_entry("r1", "j1", kind, 10)]);
    assert_eq!(report.contains_key("r1"), is_root);
}

#[test]
fn job_start_copies_payload_data() {
    let mut entry = job_start_entry("r1", "j1", 10);
    if let LogEvent::JobStart { data, .. } = &mut entry.data {
        *data = Some(json!({ "mode": "delta" }));
    }
    let report = jobs_only([entry]);
    assert_eq!(report["r1"].data, Some(json!({ "mode": "delta" })));
}

// ── job.end ──────────────────────────────────────────────────────────────────

#[test]
fn job_end_without_error_is_success() {
    let report = jobs_only([job_start_entry("r1", "j1", 10), job_end_entry("e1", "r1", 50, None)]);

    let run = &report["r1"];
    assert_eq!(run.status, RunStatus::Success);
    assert_eq!(run.end, Some(50));
    assert!(run.result.is_none());
}

#[test]
fn job_end_with_error_is_failure_and_keeps_result() {
    let report = jobs_only([
        job_start_entry("r1", "j1", 10),
        job_end_entry("e1", "r1", 50, Some(error("SR full"))),
    ]);

    let run = &report["r1"];
    assert_eq!(run.status, RunStatus::Failure);
    assert_eq!(run.result, Some(error("SR full")));
}

#[test]
fn job_end_with_skip_error_is_skipped() {
    let report = jobs_only([
        job_start_entry("r1", "j1", 10),
        job_end_entry("e1", "r1", 50, Some(error("no VMs match this pattern"))),
    ]);
    assert_eq!(report["r1"].status, RunStatus::Skipped);
}

#[test]
fn job_end_for_unknown_run_is_ignored() {
    let report = jobs_only([job_end_entry("e1", "ghost", 50, None)]);
    assert!(report.is_empty());
}

#[test]
fn second_job_end_does_not_change_closed_run() {
    let report = jobs_only([
        job_start_entry("r1", "j1", 10),
        job_end_entry("e1", "r1", 50, None),
        job_end_entry("e2", "r1", 90, Some(error("late"))),
    ]);

    let run = &report["r1"];
    assert_eq!(run.status, RunStatus::Success);
    assert_eq!(run.end, Some(50));
}

// ── Task status folding ──────────────────────────────────────────────────────

#[test]
fn skipped_task_downgrades_successful_run() {
    let report = jobs_only([
        job_start_entry("r1", "j1", 10),
        task_start_entry("t1", "r1", 11),
        task_end_entry("e1", "t1", 20, Some(error("no disks found")), None),
        job_end_entry("e2", "r1", 30, None),
    ]);

    let run = &report["r1"];
    assert_eq!(run.tasks[0].status, RunStatus::Skipped);
    assert_eq!(run.status, RunStatus::Skipped);
}

#[test]
fn failed_task_fails_run() {
    let report = jobs_only([
        job_start_entry("r1", "j1", 10),
        task_start_entry("t1", "r1", 11),
        task_start_entry("t2", "r1", 12),
        task_end_entry("e1", "t1", 20, Some(error("no disks found")), None),
        task_end_entry("e2", "t2", 21, Some(error("VDI_IO_ERROR")), None),
        job_end_entry("e3", "r1", 30, None),
    ]);
    assert_eq!(report["r1"].status, RunStatus::Failure);
}

#[test]
fn unfinished_task_keeps_parent_status_at_start() {
    let running = RunningSnapshot::default().with_job("j1", "r1");
    let report = consolidate(
        &log([job_start_entry("r1", "j1", 10), task_start_entry("t1", "r1", 11)]),
        &LogSnapshot::new(),
        &running,
        None,
    );

    let task = &report["r1"].tasks[0];
    assert_eq!(task.status, RunStatus::Pending);
    assert!(task.end.is_none());
}

#[test]
fn task_inherits_interrupted_status() {
    let report = jobs_only([job_start_entry("r1", "j1", 10), task_start_entry("t1", "r1", 11)]);
    assert_eq!(report["r1"].tasks[0].status, RunStatus::Interrupted);
}

#[test]
fn task_explicit_status_overrides_result() {
    let report = jobs_only([
        job_start_entry("r1", "j1", 10),
        task_start_entry("t1", "r1", 11),
        task_end_entry("e1", "t1", 20, Some(json!({ "size": 10 })), Some(RunStatus::Success)),
        job_end_entry("e2", "r1", 30, None),
    ]);

    let run = &report["r1"];
    assert_eq!(run.tasks[0].status, RunStatus::Success);
    assert_eq!(run.tasks[0].result, Some(json!({ "size": 10 })));
    assert_eq!(run.status, RunStatus::Success);
}

#[test]
fn task_result_without_status_is_failure() {
    let report = jobs_only([
        job_start_entry("r1", "j1", 10),
        task_start_entry("t1", "r1", 11),
        task_end_entry("e1", "t1", 20, Some(json!({ "size": 10 })), None),
    ]);
    assert_eq!(report["r1"].tasks[0].status, RunStatus::Failure);
}

// ── Task ordering ────────────────────────────────────────────────────────────

#[test]
fn tasks_sorted_finished_first_when_run_ends() {
    let report = jobs_only([
        job_start_entry("r1", "j1", 10),
        task_start_entry("t1", "r1", 11),
        task_start_entry("t2", "r1", 12),
        task_start_entry("t3", "r1", 13),
        task_start_entry("t4", "r1", 14),
        task_end_entry("e1", "t3", 30, None, None),
        task_end_entry("e2", "t2", 40, None, None),
        job_end_entry("e3", "r1", 50, None),
    ]);

    assert_eq!(task_ids(&report["r1"]), vec!["t3", "t2", "t1", "t4"]);
}

#[test]
fn failed_run_keeps_task_start_order() {
    let report = jobs_only([
        job_start_entry("r1", "j1", 10),
        task_start_entry("t1", "r1", 11),
        task_start_entry("t2", "r1", 12),
        task_end_entry("e1", "t2", 20, None, None),
        task_end_entry("e2", "t1", 30, None, None),
        job_end_entry("e3", "r1", 50, Some(error("boom"))),
    ]);

    let run = &report["r1"];
    assert_eq!(run.status, RunStatus::Failure);
    assert_eq!(task_ids(run), vec!["t1", "t2"]);
}

#[test]
fn failing_task_keeps_task_start_order() {
    let report = jobs_only([
        job_start_entry("r1", "j1", 10),
        task_start_entry("t1", "r1", 11),
        task_start_entry("t2", "r1", 12),
        task_end_entry("e1", "t2", 20, None, None),
        task_end_entry("e2", "t1", 30, Some(error("boom")), None),
        job_end_entry("e3", "r1", 50, None),
    ]);

    let run = &report["r1"];
    assert_eq!(run.status, RunStatus::Failure);
    assert_eq!(task_ids(run), vec!["t1", "t2"]);
}

#[test]
fn skipped_run_still_sorts_tasks() {
    let report = jobs_only([
        job_start_entry("r1", "j1", 10),
        task_start_entry("t1", "r1", 11),
        task_start_entry("t2", "r1", 12),
        task_end_entry("e1", "t2", 20, None, None),
        task_end_entry("e2", "t1", 30, Some(error("no disks found")), None),
        job_end_entry("e3", "r1", 50, None),
    ]);

    let run = &report["r1"];
    assert_eq!(run.status, RunStatus::Skipped);
    assert_eq!(task_ids(run), vec!["t2", "t1"]);
}

#[test]
fn tasks_keep_start_order_while_run_is_open() {
    let report = jobs_only([
        job_start_entry("r1", "j1", 10),
        task_start_entry("t1", "r1", 11),
        task_start_entry("t2", "r1", 12),
        task_end_entry("e1", "t2", 20, None, None),
    ]);

    assert_eq!(task_ids(&report["r1"]), vec!["t1", "t2"]);
}

// ── jobCall ──────────────────────────────────────────────────────────────────

#[test]
fn job_call_becomes_vm_task() {
    let report = jobs_only([
        job_start_entry("r1", "j1", 10),
        job_call_start_entry("c1", "r1", "vm-42", 11),
        job_call_end_entry("e1", "c1", 20, None),
        job_end_entry("e2", "r1", 30, None),
    ]);

    let task = &report["r1"].tasks[0];
    assert_eq!(task.id, "c1");
    assert_eq!(task.data, Some(json!({ "type": "VM", "id": "vm-42" })));
    assert!(task.message.is_none());
    assert_eq!(task.status, RunStatus::Success);
    assert_eq!(task.end, Some(20));
}

#[test]
fn failed_job_call_fails_run() {
    let report = jobs_only([
        job_start_entry("r1", "j1", 10),
        job_call_start_entry("c1", "r1", "vm-1", 11),
        job_call_end_entry("e1", "c1", 20, Some(error("VM_LACKS_FEATURE"))),
        job_end_entry("e2", "r1", 30, None),
    ]);

    let run = &report["r1"];
    assert_eq!(run.tasks[0].status, RunStatus::Failure);
    assert_eq!(run.status, RunStatus::Failure);
}

#[test]
fn skipped_job_call_uses_no_such_object() {
    let report = jobs_only([
        job_start_entry("r1", "j1", 10),
        job_call_start_entry("c1", "r1", "vm-1", 11),
        job_call_end_entry("e1", "c1", 20, Some(json!({ "code": 1, "message": "no such VM" }))),
    ]);
    assert_eq!(report["r1"].tasks[0].status, RunStatus::Skipped);
}

#[test]
fn job_call_for_unknown_run_is_discarded() {
    let report = jobs_only([
        job_call_start_entry("c1", "ghost", "vm-1", 11),
        job_call_end_entry("e1", "c1", 20, None),
    ]);
    assert!(report.is_empty());
}

#[test]
fn job_call_after_run_ended_is_discarded() {
    let report = jobs_only([
        job_start_entry("r1", "j1", 10),
        job_end_entry("e1", "r1", 20, None),
        job_call_start_entry("c1", "r1", "vm-1", 30),
    ]);
    assert!(report["r1"].tasks.is_empty());
}

// ── Run filter ───────────────────────────────────────────────────────────────

#[test]
fn run_filter_opens_only_matching_job_run() {
    let report = consolidate(
        &log([
            job_start_entry("r1", "j1", 10),
            job_start_entry("r2", "j2", 11),
            task_start_entry("t1", "r1", 12),
            task_start_entry("t2", "r2", 13),
        ]),
        &LogSnapshot::new(),
        &RunningSnapshot::default(),
        Some("r2"),
    );

    let ids: Vec<&str> = report.keys().map(|k| k.as_str()).collect();
    assert_eq!(ids, vec!["r2"]);
    assert_eq!(task_ids(&report["r2"]), vec!["t2"]);
}

#[test]
fn run_filter_for_missing_run_yields_nothing() {
    let report = consolidate(
        &log([job_start_entry("r1", "j1", 10)]),
        &LogSnapshot::new(),
        &RunningSnapshot::default(),
        Some("nope"),
    );
    assert!(report.is_empty());
}

// ── Re-used ids ──────────────────────────────────────────────────────────────

#[test]
fn restarted_root_id_replaces_record_in_place() {
    let report = consolidate(
        &log([job_start_entry("r1", "j1", 10), job_start_entry("r2", "j2", 11)]),
        &log([restore_start_entry("r1", 5), restore_start_entry("x1", 6)]),
        &RunningSnapshot::default(),
        None,
    );

    let ids: Vec<&str> = report.keys().map(|k| k.as_str()).collect();
    assert_eq!(ids, vec!["r1", "x1", "r2"]);
    assert_eq!(report["r1"].job_id.as_ref().map(|j| j.as_str()), Some("j1"));
    assert!(report["r1"].message.is_none());
}
