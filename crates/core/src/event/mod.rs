// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Log events recorded by backup jobs and restores

mod entry;
mod methods;

pub use entry::{EntryId, LogEntry, RESTORE_MESSAGE};

use crate::run::RunStatus;
use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value;

crate::define_id! {
    /// Identifier of a backup job definition.
    pub struct JobId;
}

crate::define_id! {
    /// Identifier of the schedule that triggered a job run.
    pub struct ScheduleId;
}

/// Independent append-only logs kept by the log store.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Namespace {
    Jobs,
    Restore,
}

impl Namespace {
    pub const ALL: [Namespace; 2] = [Namespace::Jobs, Namespace::Restore];

    pub fn as_str(&self) -> &'static str {
        match self {
            Namespace::Jobs => "jobs",
            Namespace::Restore => "restore",
        }
    }

    pub fn parse(s: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|ns| ns.as_str() == s)
    }
}

impl std::fmt::Display for Namespace {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Parameters of a VM-scoped call made by a job run.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct CallParams {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
}

/// Payload of a log entry, tagged by its `event` field.
///
/// The set of kinds is closed: an entry with any other `event` tag fails to
/// deserialize, which fails the whole consolidation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "event")]
pub enum LogEvent {
    #[serde(rename = "job.start", rename_all = "camelCase")]
    JobStart {
        /// Job type (`backup`, `call`, ...)
        #[serde(rename = "type", default, skip_serializing_if = "Option::is_none")]
        kind: Option<String>,
        /// Present on legacy non-backup jobs
        #[serde(default, skip_serializing_if = "Option::is_none")]
        key: Option<String>,
        job_id: JobId,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        job_name: Option<String>,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        schedule_id: Option<ScheduleId>,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        data: Option<Value>,
    },

    #[serde(rename = "job.end", rename_all = "camelCase")]
    JobEnd {
        run_job_id: EntryId,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        error: Option<Value>,
    },

    #[serde(rename = "task.start", rename_all = "camelCase")]
    TaskStart {
        #[serde(default, skip_serializing_if = "Option::is_none")]
        parent_id: Option<EntryId>,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        data: Option<Value>,
    },

    #[serde(rename = "task.end", rename_all = "camelCase")]
    TaskEnd {
        task_id: EntryId,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        result: Option<Value>,
        /// Explicit final status, overriding the one derived from `result`
        #[serde(default, skip_serializing_if = "Option::is_none")]
        status: Option<RunStatus>,
    },

    #[serde(rename = "jobCall.start", rename_all = "camelCase")]
    JobCallStart {
        run_job_id: EntryId,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        method: Option<String>,
        #[serde(default, deserialize_with = "null_as_default")]
        params: CallParams,
    },

    #[serde(rename = "jobCall.end", rename_all = "camelCase")]
    JobCallEnd {
        run_call_id: EntryId,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        error: Option<Value>,
    },
}

/// `null` reads the same as a missing field.
fn null_as_default<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Default + Deserialize<'de>,
{
    Ok(Option::<T>::deserialize(deserializer)?.unwrap_or_default())
}
