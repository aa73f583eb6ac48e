// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Status rules applied when a run or task ends.
//!
//! A terminal payload maps to `success`/`failure`, a handful of benign
//! errors downgrade `failure` to `skipped`, and a parent then folds in the
//! statuses of its tasks.

use crate::run::RunStatus;
use serde_json::Value;

/// Error messages that mean "nothing to do" rather than a real failure.
pub const SKIPPED_MESSAGES: [&str; 3] =
    ["no disks found", "no VMs match this pattern", "unhealthy VDI chain"];

/// API error code of a "no such object" error.
pub const NO_SUCH_OBJECT_CODE: f64 = 1.0;

/// Whether an error payload is one of the benign skip conditions.
pub fn is_skipped_error(error: &Value) -> bool {
    let message = error.get("message").and_then(Value::as_str);
    if message.is_some_and(|m| SKIPPED_MESSAGES.contains(&m)) {
        return true;
    }
    // Numeric compare, so `1` and `1.0` both match.
    error.get("code").and_then(Value::as_f64) == Some(NO_SUCH_OBJECT_CODE)
}

/// Status carried by an end event before tasks are considered.
///
/// Without an explicit status, a missing payload means success and any
/// payload means failure. A failure whose payload is a skip condition
/// becomes `skipped`.
pub fn status_from_outcome(outcome: Option<&Value>, explicit: Option<RunStatus>) -> RunStatus {
    let status = explicit.unwrap_or(match outcome {
        None => RunStatus::Success,
        Some(_) => RunStatus::Failure,
    });
    match (status, outcome) {
        (RunStatus::Failure, Some(error)) if is_skipped_error(error) => RunStatus::Skipped,
        _ => status,
    }
}

/// Fold task statuses into the parent's provisional status.
///
/// A failing parent stays failed. Otherwise any failing task fails the
/// parent, and any skipped task downgrades it to `skipped`. `Failure` is
/// returned only by those two early exits.
pub fn merge_task_statuses(
    status: RunStatus,
    tasks: impl IntoIterator<Item = RunStatus>,
) -> RunStatus {
    if status == RunStatus::Failure {
        return status;
    }
    let mut merged = status;
    for task in tasks {
        match task {
            RunStatus::Failure => return RunStatus::Failure,
            RunStatus::Skipped => merged = RunStatus::Skipped,
            _ => {}
        }
    }
    merged
}

#[cfg(test)]
#[path = "status_tests.rs"]
mod tests;
