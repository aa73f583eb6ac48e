// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! In-memory log store

use std::collections::HashMap;

use async_trait::async_trait;
use parking_lot::Mutex;
use runlog_core::{LogEntry, Namespace};

use super::{LogSnapshot, LogStore, StoreError};

/// Log store held in memory. Reads return clones, so a snapshot is never
/// affected by later pushes.
#[derive(Debug, Default)]
pub struct MemoryLogStore {
    logs: Mutex<HashMap<Namespace, LogSnapshot>>,
}

impl MemoryLogStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Store pre-populated with both logs.
    pub fn with_entries(
        jobs: impl IntoIterator<Item = LogEntry>,
        restore: impl IntoIterator<Item = LogEntry>,
    ) -> Self {
        let store = Self::new();
        for entry in jobs {
            store.push(Namespace::Jobs, entry);
        }
        for entry in restore {
            store.push(Namespace::Restore, entry);
        }
        store
    }

    pub fn push(&self, namespace: Namespace, entry: LogEntry) {
        self.logs.lock().entry(namespace).or_default().insert(entry.id.clone(), entry);
    }
}

#[async_trait]
impl LogStore for MemoryLogStore {
    async fn get_logs(&self, namespace: Namespace) -> Result<LogSnapshot, StoreError> {
        Ok(self.logs.lock().get(&namespace).cloned().unwrap_or_default())
    }
}
