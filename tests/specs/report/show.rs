//! `runlog show` specs

use crate::prelude::*;

const RUN: &[&str] = &[
    r#"{"id":"r1","time":1700000000000,"data":{"event":"job.start","type":"backup","jobId":"j1","jobName":"weekly"}}"#,
    r#"{"id":"c1","time":1700000001000,"data":{"event":"jobCall.start","runJobId":"r1","method":"vm.rollingSnapshot","params":{"id":"vm-9"}}}"#,
    r#"{"id":"c2","time":1700000002000,"data":{"event":"jobCall.end","runCallId":"c1","error":{"message":"VDI_IO_ERROR"}}}"#,
    r#"{"id":"e1","time":1700000003000,"data":{"event":"job.end","runJobId":"r1"}}"#,
];

#[test]
fn show_renders_run_with_calls() {
    let temp = Project::empty();
    temp.log("jobs", RUN);

    temp.runlog()
        .args(&["show", "r1"])
        .passes()
        .stdout_has("r1  failure  weekly")
        .stdout_has("  c1  failure  vm-9")
        .stdout_has("(VDI_IO_ERROR)");
}

#[test]
fn show_json_is_bare_record() {
    let temp = Project::empty();
    temp.log("jobs", RUN);

    let run = temp.runlog().args(&["show", "r1", "-o", "json"]).passes().json();
    assert_eq!(run["id"], "r1");
    assert_eq!(run["tasks"][0]["data"]["type"], "VM");
    assert_eq!(run["tasks"][0]["data"]["id"], "vm-9");
}

#[test]
fn show_unknown_run_fails() {
    let temp = Project::empty();
    temp.log("jobs", RUN);

    temp.runlog().args(&["show", "nope"]).fails().code_eq(1).stderr_has("run not found: nope");
}
