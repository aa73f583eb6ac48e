// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

use super::jsonl::parse_log;
use super::*;
use runlog_core::test_support::{job_start_entry, restore_start_entry, task_start_entry};
use runlog_core::{FakeStamper, LogEvent};
use std::time::Duration;
use tempfile::tempdir;
use yare::parameterized;

fn fake_store(dir: &std::path::Path) -> (JsonlLogStore<FakeStamper>, FakeStamper) {
    let stamper = FakeStamper::new();
    let store = JsonlLogStore::with_stamper(dir, stamper.clone());
    (store, stamper)
}

fn job_end(run: &str) -> LogEvent {
    LogEvent::JobEnd { run_job_id: EntryId::new(run), error: None }
}

// ── JSONL store ──────────────────────────────────────────────────────────────

#[tokio::test]
async fn missing_log_file_reads_as_empty() {
    let dir = tempdir().unwrap();
    let store = JsonlLogStore::new(dir.path().join("not-created"));

    for namespace in Namespace::ALL {
        assert!(store.get_logs(namespace).await.unwrap().is_empty());
    }
}

#[tokio::test]
async fn append_stamps_id_and_time() {
    let dir = tempdir().unwrap();
    let (store, stamper) = fake_store(dir.path());

    let first = store.append(Namespace::Jobs, None, job_end("r1")).await.unwrap();
    stamper.advance(Duration::from_secs(2));
    let second = store
        .append(Namespace::Jobs, Some("done".to_string()), job_end("r2"))
        .await
        .unwrap();

    assert_eq!(first.id, "log-1");
    assert_eq!(first.time, 1_000_000);
    assert_eq!(second.id, "log-2");
    assert_eq!(second.time, 1_002_000);

    let log = store.get_logs(Namespace::Jobs).await.unwrap();
    let read: Vec<&LogEntry> = log.values().collect();
    assert_eq!(read, vec![&first, &second]);
}

#[tokio::test]
async fn namespaces_use_separate_files() {
    let dir = tempdir().unwrap();
    let (store, _stamper) = fake_store(dir.path());

    store.append_entry(Namespace::Jobs, &job_start_entry("r1", "j1", 10)).await.unwrap();
    store.append_entry(Namespace::Restore, &restore_start_entry("x1", 11)).await.unwrap();

    assert!(dir.path().join("jobs.jsonl").exists());
    assert!(dir.path().join("restore.jsonl").exists());

    let jobs = store.get_logs(Namespace::Jobs).await.unwrap();
    let restores = store.get_logs(Namespace::Restore).await.unwrap();
    assert_eq!(jobs.keys().map(|k| k.as_str()).collect::<Vec<_>>(), vec!["r1"]);
    assert_eq!(restores.keys().map(|k| k.as_str()).collect::<Vec<_>>(), vec!["x1"]);
}

#[tokio::test]
async fn appended_entry_is_one_line() {
    let dir = tempdir().unwrap();
    let (store, _stamper) = fake_store(dir.path());

    store.append_entry(Namespace::Jobs, &job_start_entry("r1", "j1", 10)).await.unwrap();
    store.append_entry(Namespace::Jobs, &task_start_entry("t1", "r1", 11)).await.unwrap();

    let content = std::fs::read_to_string(store.log_path(Namespace::Jobs)).unwrap();
    assert_eq!(content.lines().count(), 2);
    assert!(content.ends_with('\n'));
}

#[tokio::test]
async fn corrupt_file_fails_read() {
    let dir = tempdir().unwrap();
    let store = JsonlLogStore::new(dir.path());
    std::fs::write(store.log_path(Namespace::Restore), "{not json}\n").unwrap();

    let err = store.get_logs(Namespace::Restore).await.unwrap_err();
    assert!(matches!(err, StoreError::Corrupt { namespace: Namespace::Restore, line: 1, .. }));
}

// ── Parsing ──────────────────────────────────────────────────────────────────

#[test]
fn parse_skips_blank_lines() {
    let content = concat!(
        "\n",
        r#"{"id":"r1","time":10,"data":{"event":"job.start","type":"backup","jobId":"j1"}}"#,
        "\n   \n",
        r#"{"id":"e1","time":20,"data":{"event":"job.end","runJobId":"r1"}}"#,
        "\n",
    );

    let log = parse_log(Namespace::Jobs, content).unwrap();
    assert_eq!(log.keys().map(|k| k.as_str()).collect::<Vec<_>>(), vec!["r1", "e1"]);
}

#[test]
fn parse_accepts_null_optional_payloads() {
    let content = concat!(
        r#"{"id":"r1","time":10,"message":null,"data":{"event":"job.start","jobId":"j1","data":null}}"#,
        "\n",
        r#"{"id":"c1","time":11,"data":{"event":"jobCall.start","runJobId":"r1","params":null}}"#,
        "\n",
        r#"{"id":"e1","time":20,"data":{"event":"jobCall.end","runCallId":"c1","error":null}}"#,
        "\n",
    );

    let log = parse_log(Namespace::Jobs, content).unwrap();
    assert_eq!(log.len(), 3);
    assert!(matches!(
        &log["c1"].data,
        LogEvent::JobCallStart { params, .. } if params.id.is_none()
    ));
}

#[parameterized(
    unknown_kind = { r#"{"id":"a","time":1,"data":{"event":"vm.migrate"}}"# },
    missing_event = { r#"{"id":"a","time":1,"data":{}}"# },
    missing_time = { r#"{"id":"a","data":{"event":"job.end","runJobId":"r1"}}"# },
    truncated = { r#"{"id":"a","time":1,"da"# },
)]
fn parse_reports_bad_line_number(line: &str) {
    let content = format!(
        "{}\n\n{line}\n",
        r#"{"id":"r1","time":10,"data":{"event":"job.end","runJobId":"r0"}}"#
    );

    match parse_log(Namespace::Jobs, &content) {
        Err(StoreError::Corrupt { namespace, line, .. }) => {
            assert_eq!(namespace, Namespace::Jobs);
            assert_eq!(line, 3);
        }
        other => panic!("expected corrupt log error, got {other:?}"),
    }
}

#[test]
fn parse_later_duplicate_id_replaces_entry_in_place() {
    let content = concat!(
        r#"{"id":"a","time":1,"data":{"event":"job.end","runJobId":"r1"}}"#,
        "\n",
        r#"{"id":"b","time":2,"data":{"event":"job.end","runJobId":"r2"}}"#,
        "\n",
        r#"{"id":"a","time":3,"data":{"event":"job.end","runJobId":"r3"}}"#,
        "\n",
    );

    let log = parse_log(Namespace::Jobs, content).unwrap();
    assert_eq!(log.keys().map(|k| k.as_str()).collect::<Vec<_>>(), vec!["a", "b"]);
    assert_eq!(log["a"].time, 3);
}

// ── Memory store ─────────────────────────────────────────────────────────────

#[tokio::test]
async fn memory_store_keeps_namespaces_apart() {
    let store = MemoryLogStore::with_entries(
        [job_start_entry("r1", "j1", 10)],
        [restore_start_entry("x1", 5)],
    );

    let jobs = store.get_logs(Namespace::Jobs).await.unwrap();
    let restores = store.get_logs(Namespace::Restore).await.unwrap();
    assert_eq!(jobs.keys().collect::<Vec<_>>(), vec!["r1"]);
    assert_eq!(restores.keys().collect::<Vec<_>>(), vec!["x1"]);
}

#[tokio::test]
async fn memory_snapshot_is_detached_from_later_pushes() {
    let store = MemoryLogStore::new();

    let before = store.get_logs(Namespace::Jobs).await.unwrap();
    store.push(Namespace::Jobs, job_start_entry("r1", "j1", 10));

    assert!(before.is_empty());
    assert_eq!(store.get_logs(Namespace::Jobs).await.unwrap().len(), 1);
}

#[tokio::test]
async fn shared_store_reads_through_arc() {
    let store = std::sync::Arc::new(MemoryLogStore::new());
    store.push(Namespace::Restore, restore_start_entry("x1", 5));

    let log = LogStore::get_logs(&store, Namespace::Restore).await.unwrap();
    assert_eq!(log.len(), 1);
}
