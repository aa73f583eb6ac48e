//! `runlog logs` specs
//!
//! Consolidated reports built from the job and restore logs.

use crate::prelude::*;

const NIGHTLY: &[&str] = &[
    r#"{"id":"r1","time":1700000000000,"message":"backup","data":{"event":"job.start","type":"backup","jobId":"j1","jobName":"nightly","scheduleId":"s1"}}"#,
    r#"{"id":"t1","time":1700000001000,"message":"backup VM","data":{"event":"task.start","parentId":"r1","data":{"type":"VM","id":"vm-1"}}}"#,
    r#"{"id":"t2","time":1700000002000,"message":"backup VM","data":{"event":"task.start","parentId":"r1","data":{"type":"VM","id":"vm-2"}}}"#,
    r#"{"id":"e1","time":1700000030000,"data":{"event":"task.end","taskId":"t2","result":{"message":"no disks found"}}}"#,
    r#"{"id":"e2","time":1700000040000,"data":{"event":"task.end","taskId":"t1","status":"success"}}"#,
    r#"{"id":"e3","time":1700000050000,"data":{"event":"job.end","runJobId":"r1"}}"#,
];

#[test]
fn logs_without_state_reports_nothing() {
    let temp = Project::empty();
    temp.runlog().args(&["logs"]).passes().stdout_eq("No runs found\n");
}

#[test]
fn logs_json_folds_task_statuses() {
    let temp = Project::empty();
    temp.log("jobs", NIGHTLY);

    let report = temp.runlog().args(&["logs", "-o", "json"]).passes().json();
    let run = &report["r1"];
    assert_eq!(run["status"], "skipped");
    assert_eq!(run["jobName"], "nightly");
    assert_eq!(run["end"], 1700000050000u64);

    let tasks: Vec<&str> =
        run["tasks"].as_array().into_iter().flatten().filter_map(|t| t["id"].as_str()).collect();
    assert_eq!(tasks, vec!["t2", "t1"]);
    assert_eq!(run["tasks"][0]["status"], "skipped");
}

#[test]
fn logs_text_renders_tree() {
    let temp = Project::empty();
    temp.log("jobs", NIGHTLY);

    temp.runlog()
        .args(&["logs"])
        .passes()
        .stdout_has("r1  skipped  nightly  2023-11-14 22:13:20 → 2023-11-14 22:14:10 (50s)")
        .stdout_has("\n  t2  skipped  backup VM")
        .stdout_has("(no disks found)");
}

#[test]
fn logs_marks_tracked_runs_pending() {
    let temp = Project::empty();
    temp.log("jobs", &NIGHTLY[..3]);
    temp.file("running.json", r#"{"jobs":{"j1":"r1"}}"#);

    let report = temp.runlog().args(&["logs", "-o", "json"]).passes().json();
    assert_eq!(report["r1"]["status"], "pending");
    assert_eq!(report["r1"]["tasks"][0]["status"], "pending");
}

#[test]
fn logs_marks_untracked_open_runs_interrupted() {
    let temp = Project::empty();
    temp.log("jobs", &NIGHTLY[..3]);

    let report = temp.runlog().args(&["logs", "-o", "json"]).passes().json();
    assert_eq!(report["r1"]["status"], "interrupted");
}

#[test]
fn logs_for_single_run() {
    let temp = Project::empty();
    temp.log("jobs", NIGHTLY);

    let run = temp.runlog().args(&["logs", "--run", "r1", "-o", "json"]).passes().json();
    assert_eq!(run["id"], "r1");
    assert_eq!(run["status"], "skipped");
}

#[test]
fn logs_for_unknown_run_is_null() {
    let temp = Project::empty();
    temp.log("jobs", NIGHTLY);

    temp.runlog().args(&["logs", "--run", "missing", "-o", "json"]).passes().stdout_eq("null\n");
    temp.runlog().args(&["logs", "--run", "missing"]).passes().stdout_eq("No run found: missing\n");
}

#[test]
fn logs_lists_restores_before_runs() {
    let temp = Project::empty();
    temp.log("jobs", NIGHTLY);
    temp.log(
        "restore",
        &[r#"{"id":"x1","time":1700000100000,"message":"restore","data":{"event":"task.start","data":{"srId":"sr-1"}}}"#],
    );

    let output = temp.runlog().args(&["logs", "-o", "json"]).passes().stdout();
    let x1 = output.find("\"x1\"").unwrap_or(usize::MAX);
    let r1 = output.find("\"r1\"").unwrap_or(usize::MAX);
    assert!(x1 < r1, "restore should be listed first:\n{output}");
}

#[test]
fn logs_fails_on_unknown_event_kind() {
    let temp = Project::empty();
    temp.log(
        "jobs",
        &[NIGHTLY[0], r#"{"id":"z1","time":1700000001000,"data":{"event":"vm.export"}}"#],
    );

    temp.runlog().args(&["logs"]).fails().code_eq(1).stderr_has("corrupt jobs log at line 2");
}
