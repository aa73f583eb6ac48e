// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

use super::*;
use crate::test_support::strategies::arb_span;
use proptest::prelude::*;
use serde_json::json;

fn span(start: u64, end: Option<u64>) -> Span {
    Span { start, end }
}

#[yare::parameterized(
    pending     = { RunStatus::Pending, false },
    interrupted = { RunStatus::Interrupted, false },
    skipped     = { RunStatus::Skipped, true },
    failure     = { RunStatus::Failure, true },
    success     = { RunStatus::Success, true },
)]
fn run_status_is_terminal(status: RunStatus, terminal: bool) {
    assert_eq!(status.is_terminal(), terminal);
}

#[test]
fn run_status_opening() {
    assert_eq!(RunStatus::opening(true), RunStatus::Pending);
    assert_eq!(RunStatus::opening(false), RunStatus::Interrupted);
}

#[test]
fn run_status_serializes_lowercase() {
    assert_eq!(serde_json::to_string(&RunStatus::Interrupted).unwrap(), "\"interrupted\"");
    let parsed: RunStatus = serde_json::from_str("\"skipped\"").unwrap();
    assert_eq!(parsed, RunStatus::Skipped);
    assert_eq!(RunStatus::Failure.to_string(), "failure");
}

#[test]
fn finished_span_sorts_before_unfinished() {
    assert_eq!(span(50, Some(500)).finish_then_start(&span(1, None)), Ordering::Less);
    assert_eq!(span(1, None).finish_then_start(&span(50, Some(500))), Ordering::Greater);
}

#[test]
fn finished_spans_sort_by_end() {
    assert_eq!(span(1, Some(30)).finish_then_start(&span(2, Some(20))), Ordering::Greater);
    assert_eq!(span(1, Some(20)).finish_then_start(&span(2, Some(20))), Ordering::Equal);
}

#[test]
fn unfinished_spans_sort_by_start() {
    assert_eq!(span(10, None).finish_then_start(&span(20, None)), Ordering::Less);
}

proptest! {
    #[test]
    fn sorted_spans_put_finished_first_in_order(mut spans in prop::collection::vec(arb_span(), 0..16)) {
        spans.sort_by(Span::finish_then_start);

        let first_open = spans.iter().position(|s| s.end.is_none()).unwrap_or(spans.len());
        prop_assert!(spans[first_open..].iter().all(|s| s.end.is_none()));

        let ends: Vec<u64> = spans[..first_open].iter().filter_map(|s| s.end).collect();
        prop_assert!(ends.windows(2).all(|w| w[0] <= w[1]));

        let starts: Vec<u64> = spans[first_open..].iter().map(|s| s.start).collect();
        prop_assert!(starts.windows(2).all(|w| w[0] <= w[1]));
    }
}

#[test]
fn job_run_serializes_camel_case_and_omits_empty_fields() {
    let record = RunRecord::job_run(
        EntryId::new("r1"),
        JobId::new("j1"),
        Some(ScheduleId::new("s1")),
        Some("nightly".to_string()),
        None,
        1_000,
        RunStatus::Pending,
    );

    let value = serde_json::to_value(&record).unwrap();
    assert_eq!(
        value,
        json!({
            "id": "r1",
            "jobId": "j1",
            "scheduleId": "s1",
            "jobName": "nightly",
            "start": 1000,
            "status": "pending",
        })
    );
}

#[test]
fn task_with_children_serializes_tasks() {
    let child = RunRecord::builder().id("t1").start(1_100).end(Some(1_200)).build();
    let record = RunRecord::builder()
        .id("x1")
        .message(Some("restore".to_string()))
        .tasks(vec![child])
        .build();

    let value = serde_json::to_value(&record).unwrap();
    assert_eq!(value["message"], "restore");
    assert_eq!(value["tasks"][0]["id"], "t1");
    assert_eq!(value["tasks"][0]["end"], 1200);
}

#[test]
fn record_round_trips_through_json() {
    let record = RunRecord::builder()
        .id("r1")
        .end(Some(2_000))
        .status(RunStatus::Failure)
        .result(Some(json!({ "message": "boom" })))
        .build();
    let json = serde_json::to_string(&record).unwrap();
    let parsed: RunRecord = serde_json::from_str(&json).unwrap();
    assert_eq!(parsed, record);
}

#[test]
fn duration_only_once_ended() {
    let open = RunRecord::builder().start(1_000).build();
    assert_eq!(open.duration_ms(), None);

    let closed = RunRecord::builder().start(1_000).end(Some(4_500)).build();
    assert_eq!(closed.duration_ms(), Some(3_500));
}
