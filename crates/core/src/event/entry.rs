// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

use super::LogEvent;
use serde::{Deserialize, Serialize};

crate::define_id! {
    /// Identifier of a log entry.
    ///
    /// A run or task is identified by the id of the entry that started it,
    /// so end events reference their run through this type as well.
    pub struct EntryId;
}

/// One recorded event as stored in a log.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LogEntry {
    pub id: EntryId,
    /// Epoch milliseconds
    pub time: u64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
    pub data: LogEvent,
}

impl LogEntry {
    pub fn new(id: impl Into<EntryId>, time: u64, data: LogEvent) -> Self {
        Self { id: id.into(), time, message: None, data }
    }

    pub fn with_message(mut self, message: impl Into<String>) -> Self {
        self.message = Some(message.into());
        self
    }

    /// Whether this entry opens a restore operation.
    pub fn is_restore_marker(&self) -> bool {
        self.message.as_deref() == Some(RESTORE_MESSAGE)
    }
}

/// Message carried by the `task.start` entry that opens a restore.
pub const RESTORE_MESSAGE: &str = "restore";
