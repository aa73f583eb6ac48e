//! `runlog running` specs

use crate::prelude::*;

#[test]
fn running_without_snapshot_is_empty() {
    let temp = Project::empty();
    temp.runlog().args(&["running"]).passes().stdout_eq("Nothing running\n");
}

#[test]
fn running_lists_snapshot() {
    let temp = Project::empty();
    temp.file("running.json", r#"{"jobs":{"j1":"r1"},"restores":["x1"]}"#);

    temp.runlog()
        .args(&["running"])
        .passes()
        .stdout_eq("Jobs:\n  j1  r1\nRestores:\n  x1\n");
}

#[test]
fn running_rejects_invalid_snapshot() {
    let temp = Project::empty();
    temp.file("running.json", "[1, 2]");

    temp.runlog().args(&["running"]).fails().stderr_has("invalid running snapshot");
}
