// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

use super::*;
use serial_test::serial;

#[test]
#[serial]
fn lists_jobs_then_restores() {
    std::env::set_var("NO_COLOR", "1");
    let snapshot = RunningSnapshot::default()
        .with_job("j2", "r2")
        .with_job("j1", "r1")
        .with_restore("x1");

    assert_eq!(
        render_running(&snapshot),
        "Jobs:\n  j1  r1\n  j2  r2\nRestores:\n  x1\n"
    );
}

#[test]
fn empty_snapshot() {
    assert_eq!(render_running(&RunningSnapshot::default()), "Nothing running\n");
}

#[test]
fn missing_snapshot_file_is_not_an_error() {
    let dir = tempfile::tempdir().unwrap();
    let paths = StatePaths::resolve(Some(dir.path().to_path_buf())).unwrap();
    handle(&paths, OutputFormat::Json).unwrap();
}
