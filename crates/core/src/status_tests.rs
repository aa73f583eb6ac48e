// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

use super::*;
use crate::test_support::strategies::arb_run_status;
use proptest::prelude::*;
use serde_json::json;

#[yare::parameterized(
    no_disks      = { json!({ "message": "no disks found" }) },
    no_vms        = { json!({ "message": "no VMs match this pattern" }) },
    unhealthy     = { json!({ "message": "unhealthy VDI chain" }) },
    no_such_object = { json!({ "code": 1, "message": "no such VM abc" }) },
    float_code     = { json!({ "code": 1.0 }) },
)]
fn skip_conditions_are_recognized(error: Value) {
    assert!(is_skipped_error(&error));
    assert_eq!(status_from_outcome(Some(&error), None), RunStatus::Skipped);
}

#[yare::parameterized(
    other_message  = { json!({ "message": "VDI_IO_ERROR" }) },
    prefix_only    = { json!({ "message": "no disks found on SR" }) },
    different_case = { json!({ "message": "No disks found" }) },
    other_code     = { json!({ "code": 2, "message": "unauthorized" }) },
    fractional_code = { json!({ "code": 1.5 }) },
    string_code    = { json!({ "code": "1" }) },
    bare_string    = { json!("no disks found") },
    empty_object   = { json!({}) },
)]
fn other_errors_are_failures(error: Value) {
    assert!(!is_skipped_error(&error));
    assert_eq!(status_from_outcome(Some(&error), None), RunStatus::Failure);
}

#[test]
fn missing_outcome_is_success() {
    assert_eq!(status_from_outcome(None, None), RunStatus::Success);
}

#[test]
fn explicit_status_overrides_outcome() {
    let result = json!({ "size": 1024 });
    assert_eq!(
        status_from_outcome(Some(&result), Some(RunStatus::Success)),
        RunStatus::Success
    );
    assert_eq!(status_from_outcome(None, Some(RunStatus::Failure)), RunStatus::Failure);
    assert_eq!(status_from_outcome(None, Some(RunStatus::Skipped)), RunStatus::Skipped);
}

#[test]
fn explicit_failure_with_skip_payload_is_skipped() {
    let error = json!({ "message": "unhealthy VDI chain" });
    assert_eq!(
        status_from_outcome(Some(&error), Some(RunStatus::Failure)),
        RunStatus::Skipped
    );
}

#[test]
fn merge_keeps_parent_failure() {
    let merged = merge_task_statuses(RunStatus::Failure, [RunStatus::Success]);
    assert_eq!(merged, RunStatus::Failure);
}

#[test]
fn merge_without_tasks_keeps_status() {
    assert_eq!(merge_task_statuses(RunStatus::Success, []), RunStatus::Success);
    assert_eq!(merge_task_statuses(RunStatus::Skipped, []), RunStatus::Skipped);
}

#[test]
fn merge_skipped_task_downgrades_success() {
    let merged =
        merge_task_statuses(RunStatus::Success, [RunStatus::Success, RunStatus::Skipped]);
    assert_eq!(merged, RunStatus::Skipped);
}

#[test]
fn merge_failure_after_skip_still_wins() {
    let merged = merge_task_statuses(
        RunStatus::Success,
        [RunStatus::Skipped, RunStatus::Success, RunStatus::Failure],
    );
    assert_eq!(merged, RunStatus::Failure);
}

#[test]
fn merge_ignores_open_tasks() {
    let merged =
        merge_task_statuses(RunStatus::Success, [RunStatus::Pending, RunStatus::Interrupted]);
    assert_eq!(merged, RunStatus::Success);
}

proptest! {
    #[test]
    fn merge_fails_iff_parent_or_any_task_fails(
        parent in arb_run_status(),
        tasks in prop::collection::vec(arb_run_status(), 0..8),
    ) {
        let merged = merge_task_statuses(parent, tasks.iter().copied());
        let any_failure = parent == RunStatus::Failure || tasks.contains(&RunStatus::Failure);
        prop_assert_eq!(merged == RunStatus::Failure, any_failure);
    }

    #[test]
    fn merge_is_order_independent(
        parent in arb_run_status(),
        tasks in prop::collection::vec(arb_run_status(), 0..8),
    ) {
        let forward = merge_task_statuses(parent, tasks.iter().copied());
        let backward = merge_task_statuses(parent, tasks.iter().rev().copied());
        prop_assert_eq!(forward, backward);
    }
}
