// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

mod jobs;
mod properties;
mod restores;

use super::*;
pub(super) use runlog_core::test_support::{
    error, job_call_end_entry, job_call_start_entry, job_end_entry, job_start_entry,
    keyed_job_start_entry, restore_start_entry, task_end_entry, task_start_entry,
};
pub(super) use runlog_core::RunStatus;

/// Build an insertion-ordered log from entries.
pub(super) fn log(entries: impl IntoIterator<Item = LogEntry>) -> LogSnapshot {
    entries.into_iter().map(|e| (e.id.clone(), e)).collect()
}

pub(super) fn jobs_only(entries: impl IntoIterator<Item = LogEntry>) -> Consolidated {
    consolidate(&log(entries), &LogSnapshot::new(), &RunningSnapshot::default(), None)
}

pub(super) fn task_ids(record: &RunRecord) -> Vec<&str> {
    record.tasks.iter().map(|t| t.id.as_str()).collect()
}

// ── Basic replay ─────────────────────────────────────────────────────────────

#[test]
fn empty_logs_produce_empty_report() {
    let report = jobs_only([]);
    assert!(report.is_empty());
}

#[test]
fn report_keeps_first_start_order() {
    let report = jobs_only([
        job_start_entry("r2", "j2", 10),
        job_start_entry("r1", "j1", 20),
        job_start_entry("r3", "j3", 5),
    ]);

    let ids: Vec<&str> = report.keys().map(|k| k.as_str()).collect();
    assert_eq!(ids, vec!["r2", "r1", "r3"]);
}

#[test]
fn consolidator_open_count_tracks_started_records() {
    let running = RunningSnapshot::default();
    let mut consolidator = Consolidator::new(&running);

    consolidator.apply_entry(&job_start_entry("r1", "j1", 10));
    consolidator.apply_entry(&task_start_entry("t1", "r1", 11));
    assert_eq!(consolidator.open_count(), 2);

    consolidator.apply_entry(&task_end_entry("e1", "t1", 12, None, None));
    assert_eq!(consolidator.open_count(), 1);

    consolidator.apply_entry(&job_end_entry("e2", "r1", 13, None));
    assert_eq!(consolidator.open_count(), 0);

    let report = consolidator.finish();
    assert_eq!(report["r1"].status, RunStatus::Success);
}

#[test]
fn task_tree_is_materialized() {
    let report = jobs_only([
        job_start_entry("r1", "j1", 10),
        task_start_entry("t1", "r1", 11),
        task_start_entry("t2", "r1", 12),
        task_end_entry("e1", "t1", 20, None, None),
    ]);

    let run = &report["r1"];
    assert_eq!(task_ids(run), vec!["t1", "t2"]);
    assert_eq!(run.tasks[0].message.as_deref(), Some("backup VM"));
    assert_eq!(run.tasks[0].end, Some(20));
    assert_eq!(run.tasks[1].end, None);
}

#[test]
fn apply_entry_reports_ignored_entries() {
    let running = RunningSnapshot::default();
    let mut consolidator = Consolidator::new(&running);

    assert!(!consolidator.apply_entry(&task_end_entry("e0", "t0", 5, None, None)));
    assert!(!consolidator.apply_entry(&keyed_job_start_entry("k1", "j9", "call", 6)));
    assert!(consolidator.apply_entry(&job_start_entry("r1", "j1", 10)));
    assert!(consolidator.apply_entry(&job_call_start_entry("c1", "r1", "vm-1", 11)));
    assert!(!consolidator.apply_entry(&job_call_start_entry("c2", "ghost", "vm-2", 12)));
    assert!(consolidator.apply_entry(&job_call_end_entry("e1", "c1", 13, None)));
    assert!(!consolidator.apply_entry(&job_call_end_entry("e2", "c1", 14, None)));
}
