// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! File-backed log store: one JSON entry per line, one file per namespace.

use std::path::{Path, PathBuf};

use async_trait::async_trait;
use runlog_core::{LogEntry, LogEvent, Namespace, Stamper, SystemStamper};
use tokio::io::AsyncWriteExt;

use super::{LogSnapshot, LogStore, StoreError};

/// Log store rooted at a directory holding `jobs.jsonl` and `restore.jsonl`.
#[derive(Debug, Clone)]
pub struct JsonlLogStore<S: Stamper = SystemStamper> {
    dir: PathBuf,
    stamper: S,
}

impl JsonlLogStore {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self::with_stamper(dir, SystemStamper)
    }
}

impl<S: Stamper> JsonlLogStore<S> {
    pub fn with_stamper(dir: impl Into<PathBuf>, stamper: S) -> Self {
        Self { dir: dir.into(), stamper }
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    pub fn log_path(&self, namespace: Namespace) -> PathBuf {
        self.dir.join(format!("{namespace}.jsonl"))
    }

    /// Append a new entry stamped with the current time and a fresh id.
    pub async fn append(
        &self,
        namespace: Namespace,
        message: Option<String>,
        data: LogEvent,
    ) -> Result<LogEntry, StoreError> {
        let entry = LogEntry {
            id: self.stamper.entry_id(),
            time: self.stamper.epoch_ms(),
            message,
            data,
        };
        self.append_entry(namespace, &entry).await?;
        Ok(entry)
    }

    /// Append an already-built entry as-is.
    pub async fn append_entry(&self, namespace: Namespace, entry: &LogEntry) -> Result<(), StoreError> {
        let io_err = |source| StoreError::Io { namespace, source };

        let mut line = serde_json::to_vec(entry)?;
        line.push(b'\n');

        tokio::fs::create_dir_all(&self.dir).await.map_err(io_err)?;
        let mut file = tokio::fs::OpenOptions::new()
            .create(true)
            .append(true)
            .open(self.log_path(namespace))
            .await
            .map_err(io_err)?;
        file.write_all(&line).await.map_err(io_err)?;
        file.flush().await.map_err(io_err)?;

        tracing::debug!(%namespace, entry_id = %entry.id, event = entry.data.name(), "appended log entry");
        Ok(())
    }
}

#[async_trait]
impl<S: Stamper> LogStore for JsonlLogStore<S> {
    async fn get_logs(&self, namespace: Namespace) -> Result<LogSnapshot, StoreError> {
        let path = self.log_path(namespace);
        let content = match tokio::fs::read_to_string(&path).await {
            Ok(content) => content,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => return Ok(LogSnapshot::new()),
            Err(source) => return Err(StoreError::Io { namespace, source }),
        };
        parse_log(namespace, &content)
    }
}

/// Parse JSONL content into a snapshot. Blank lines are ignored; any other
/// unreadable line, including one with an unknown event kind, is an error.
pub(crate) fn parse_log(namespace: Namespace, content: &str) -> Result<LogSnapshot, StoreError> {
    let mut snapshot = LogSnapshot::new();
    for (idx, line) in content.lines().enumerate() {
        if line.trim().is_empty() {
            continue;
        }
        let entry: LogEntry = serde_json::from_str(line)
            .map_err(|source| StoreError::Corrupt { namespace, line: idx + 1, source })?;
        snapshot.insert(entry.id.clone(), entry);
    }
    tracing::trace!(%namespace, entries = snapshot.len(), "read log");
    Ok(snapshot)
}
