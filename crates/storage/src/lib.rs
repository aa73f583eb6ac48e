// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

// Allow panic!/unwrap/expect in test code
#![cfg_attr(test, allow(clippy::panic))]
#![cfg_attr(test, allow(clippy::unwrap_used))]
#![cfg_attr(test, allow(clippy::expect_used))]

//! runlog-storage: Log stores and the consolidated backup run report

mod report;
mod running;
mod service;
mod store;

pub use report::{consolidate, Consolidated, Consolidator};
pub use running::{RunningError, RunningSnapshot};
pub use service::{BackupLogs, LogsReport};
pub use store::{JsonlLogStore, LogSnapshot, LogStore, MemoryLogStore, StoreError};
