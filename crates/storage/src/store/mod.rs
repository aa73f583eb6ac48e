// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Append-only log stores

mod jsonl;
mod memory;

pub use jsonl::JsonlLogStore;
pub use memory::MemoryLogStore;

use async_trait::async_trait;
use indexmap::IndexMap;
use runlog_core::{EntryId, LogEntry, Namespace};
use thiserror::Error;

/// Entries of one log keyed by entry id, in insertion order.
///
/// Insertion order is not necessarily chronological.
pub type LogSnapshot = IndexMap<EntryId, LogEntry>;

/// Errors that can occur reading or writing a log
#[derive(Debug, Error)]
pub enum StoreError {
    #[error("IO error on {namespace} log: {source}")]
    Io {
        namespace: Namespace,
        #[source]
        source: std::io::Error,
    },
    #[error("corrupt {namespace} log at line {line}: {source}")]
    Corrupt {
        namespace: Namespace,
        line: usize,
        #[source]
        source: serde_json::Error,
    },
    #[error("serialization error: {0}")]
    Json(#[from] serde_json::Error),
}

/// Source of log snapshots.
///
/// Each call returns a consistent snapshot of one namespace. Implementations
/// must be safe to read from concurrently.
#[async_trait]
pub trait LogStore: Send + Sync {
    async fn get_logs(&self, namespace: Namespace) -> Result<LogSnapshot, StoreError>;
}

#[async_trait]
impl<S: LogStore + ?Sized> LogStore for std::sync::Arc<S> {
    async fn get_logs(&self, namespace: Namespace) -> Result<LogSnapshot, StoreError> {
        (**self).get_logs(namespace).await
    }
}

#[cfg(test)]
#[path = "../store_tests/mod.rs"]
mod tests;
