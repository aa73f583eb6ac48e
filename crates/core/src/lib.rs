// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

// Allow panic!/unwrap/expect in test code
#![cfg_attr(test, allow(clippy::panic))]
#![cfg_attr(test, allow(clippy::unwrap_used))]
#![cfg_attr(test, allow(clippy::expect_used))]

//! runlog-core: Log events, run records, and status rules for backup run reports

pub mod event;
pub mod id;
pub mod run;
pub mod stamp;
pub mod status;
pub mod time_fmt;

#[cfg(any(test, feature = "test-support"))]
pub mod test_support;

pub use event::{
    CallParams, EntryId, JobId, LogEntry, LogEvent, Namespace, ScheduleId, RESTORE_MESSAGE,
};
pub use run::{RunRecord, RunStatus, Span};
pub use stamp::{FakeStamper, Stamper, SystemStamper};
pub use status::{is_skipped_error, merge_task_statuses, status_from_outcome};
pub use time_fmt::{format_elapsed, format_elapsed_ms};
