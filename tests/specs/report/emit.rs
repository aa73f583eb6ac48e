//! `runlog emit` specs
//!
//! Events appended through the CLI show up in the report.

use crate::prelude::*;

#[test]
fn emit_prints_new_entry_id() {
    let temp = Project::empty();

    let id = temp
        .runlog()
        .args(&["emit", "jobs", r#"{"event":"job.start","type":"backup","jobId":"j1"}"#])
        .passes()
        .stdout();
    assert!(id.starts_with("log-"), "unexpected id {id:?}");
    assert!(temp.state_path("logs/jobs.jsonl").exists());
}

#[test]
fn emitted_events_build_a_run() {
    let temp = Project::empty();

    let run_id = temp
        .runlog()
        .args(&["emit", "jobs", r#"{"event":"job.start","type":"backup","jobId":"j1","jobName":"adhoc"}"#])
        .passes()
        .stdout()
        .trim()
        .to_string();
    let end = format!(r#"{{"event":"job.end","runJobId":"{run_id}","error":{{"message":"unhealthy VDI chain"}}}}"#);
    temp.runlog().args(&["emit", "jobs"]).stdin(&end).passes();

    let run = temp.runlog().args(&["show", &run_id, "-o", "json"]).passes().json();
    assert_eq!(run["jobName"], "adhoc");
    assert_eq!(run["status"], "skipped");
}

#[test]
fn emit_restore_with_message_opens_restore() {
    let temp = Project::empty();

    temp.runlog()
        .args(&["emit", "restore", r#"{"event":"task.start","data":{"srId":"sr-1"}}"#, "--message", "restore"])
        .passes();

    let report = temp.runlog().args(&["logs", "-o", "json"]).passes().json();
    let restores: Vec<_> = report.as_object().into_iter().flat_map(|m| m.values()).collect();
    assert_eq!(restores.len(), 1);
    assert_eq!(restores[0]["message"], "restore");
    assert_eq!(restores[0]["status"], "interrupted");
}

#[test]
fn emit_rejects_unknown_event() {
    let temp = Project::empty();

    temp.runlog()
        .args(&["emit", "jobs", r#"{"event":"vm.export"}"#])
        .fails()
        .stderr_has("invalid event JSON");
    assert!(!temp.state_path("logs/jobs.jsonl").exists());
}
