// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Consolidated run report built by replaying the job and restore logs.
//!
//! Records live in an arena. `started` indexes the records whose start has
//! been seen but not their end, so an end event (or a child start) finds its
//! record by id. `roots` holds every top-level run in first-start order and
//! keeps it after the run ends.

mod jobs;
mod tasks;

use std::collections::HashMap;

use indexmap::IndexMap;
use runlog_core::{
    merge_task_statuses, status_from_outcome, EntryId, LogEntry, LogEvent, RunRecord, RunStatus,
    Span,
};
use serde_json::Value;

use crate::running::RunningSnapshot;
use crate::store::LogSnapshot;

/// Top-level runs keyed by the id of their start entry.
pub type Consolidated = IndexMap<EntryId, RunRecord>;

#[derive(Debug)]
struct Node {
    /// Always has empty `tasks`; children are tracked by index
    record: RunRecord,
    children: Vec<usize>,
}

/// Replays log entries into run records.
#[derive(Debug)]
pub struct Consolidator<'a> {
    running: &'a RunningSnapshot,
    run_filter: Option<EntryId>,
    arena: Vec<Node>,
    started: HashMap<EntryId, usize>,
    roots: IndexMap<EntryId, usize>,
}

impl<'a> Consolidator<'a> {
    pub fn new(running: &'a RunningSnapshot) -> Self {
        Self {
            running,
            run_filter: None,
            arena: Vec::new(),
            started: HashMap::new(),
            roots: IndexMap::new(),
        }
    }

    /// Only open job runs started by `run_id` from now on (`None` opens all).
    pub fn filter_runs(&mut self, run_id: Option<&str>) {
        self.run_filter = run_id.map(EntryId::new);
    }

    /// Number of records started but not yet ended.
    pub fn open_count(&self) -> usize {
        self.started.len()
    }

    pub fn replay<'e>(&mut self, entries: impl IntoIterator<Item = &'e LogEntry>) {
        for entry in entries {
            self.apply_entry(entry);
        }
    }

    /// Apply one log entry. Returns false when the entry was ignored: a
    /// non-root or filtered-out job start, or an event whose parent or
    /// target record is not open.
    pub fn apply_entry(&mut self, entry: &LogEntry) -> bool {
        tracing::trace!(entry_id = %entry.id, event = %entry.data.log_summary(), "replay");
        let applied = match &entry.data {
            LogEvent::JobStart { .. }
            | LogEvent::JobEnd { .. }
            | LogEvent::JobCallStart { .. }
            | LogEvent::JobCallEnd { .. } => jobs::apply(self, entry),

            LogEvent::TaskStart { .. } | LogEvent::TaskEnd { .. } => tasks::apply(self, entry),
        };
        if !applied {
            tracing::debug!(
                entry_id = %entry.id,
                event = entry.data.name(),
                opens = entry.data.is_start(),
                referenced = entry.data.referenced_id().map(|id| id.as_str()),
                "ignored log entry"
            );
        }
        applied
    }

    /// Materialize the arena into owned record trees.
    pub fn finish(self) -> Consolidated {
        let mut slots: Vec<Option<Node>> = self.arena.into_iter().map(Some).collect();
        self.roots
            .into_iter()
            .filter_map(|(id, idx)| materialize(&mut slots, idx).map(|record| (id, record)))
            .collect()
    }

    fn selects_run(&self, id: &EntryId) -> bool {
        self.run_filter.as_ref().map_or(true, |filter| filter == id)
    }

    fn started_index(&self, id: &EntryId) -> Option<usize> {
        self.started.get(id).copied()
    }

    fn push(&mut self, record: RunRecord) -> usize {
        let idx = self.arena.len();
        self.started.insert(record.id.clone(), idx);
        self.arena.push(Node { record, children: Vec::new() });
        idx
    }

    /// Open a top-level run. A re-used id replaces the earlier record but
    /// keeps its position.
    fn open_root(&mut self, record: RunRecord) {
        let id = record.id.clone();
        let idx = self.push(record);
        self.roots.insert(id, idx);
    }

    /// Open a task under `parent`; it starts with the parent's current status.
    fn open_child(
        &mut self,
        parent: usize,
        id: EntryId,
        message: Option<String>,
        data: Option<Value>,
        start: u64,
    ) {
        let status = self.arena[parent].record.status;
        let idx = self.push(RunRecord::task(id, message, data, start, status));
        self.arena[parent].children.push(idx);
    }

    /// Close the open record `id`. Returns false when no such record is open.
    fn close(
        &mut self,
        id: &EntryId,
        end: u64,
        outcome: Option<Value>,
        explicit: Option<RunStatus>,
    ) -> bool {
        let Some(idx) = self.started.remove(id) else {
            return false;
        };

        let provisional = status_from_outcome(outcome.as_ref(), explicit);
        let children = std::mem::take(&mut self.arena[idx].children);
        let status =
            merge_task_statuses(provisional, children.iter().map(|&c| self.arena[c].record.status));
        // A failed record keeps its tasks in start order.
        let children = match status {
            RunStatus::Failure => children,
            _ => self.sorted_by_time(children),
        };

        let node = &mut self.arena[idx];
        node.children = children;
        node.record.end = Some(end);
        node.record.result = outcome;
        node.record.status = status;
        true
    }

    fn sorted_by_time(&self, mut children: Vec<usize>) -> Vec<usize> {
        let span = |idx: usize| -> Span { self.arena[idx].record.span() };
        children.sort_by(|&a, &b| span(a).finish_then_start(&span(b)));
        children
    }
}

fn materialize(slots: &mut [Option<Node>], idx: usize) -> Option<RunRecord> {
    let Node { mut record, children } = slots.get_mut(idx)?.take()?;
    record.tasks = children.into_iter().filter_map(|c| materialize(slots, c)).collect();
    Some(record)
}

/// Build the report from both logs.
///
/// The restore log is replayed first, then the job log; both share one
/// `started` index. `run_filter` only restricts which job runs are opened.
pub fn consolidate(
    job_log: &LogSnapshot,
    restore_log: &LogSnapshot,
    running: &RunningSnapshot,
    run_filter: Option<&str>,
) -> Consolidated {
    let mut consolidator = Consolidator::new(running);
    consolidator.replay(restore_log.values());
    consolidator.filter_runs(run_filter);
    consolidator.replay(job_log.values());

    let open = consolidator.open_count();
    let consolidated = consolidator.finish();
    tracing::debug!(
        jobs = job_log.len(),
        restores = restore_log.len(),
        runs = consolidated.len(),
        open,
        "consolidated backup logs"
    );
    consolidated
}

#[cfg(test)]
#[path = "../report_tests/mod.rs"]
mod tests;
