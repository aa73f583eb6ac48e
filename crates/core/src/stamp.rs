// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Ids and timestamps for entries appended to a log.

use parking_lot::Mutex;
use std::sync::Arc;
use std::time::{Duration, SystemTime, UNIX_EPOCH};

use crate::event::EntryId;

/// Source of the id and time stamped on each new log entry.
pub trait Stamper: Clone + Send + Sync {
    fn entry_id(&self) -> EntryId;
    /// Current time in epoch milliseconds
    fn epoch_ms(&self) -> u64;
}

/// Random `log-<nanoid>` ids and wall-clock time.
#[derive(Debug, Clone, Default)]
pub struct SystemStamper;

impl SystemStamper {
    pub const ID_PREFIX: &'static str = "log-";
    pub const ID_RANDOM_LEN: usize = 19;
}

impl Stamper for SystemStamper {
    fn entry_id(&self) -> EntryId {
        EntryId::new(format!("{}{}", Self::ID_PREFIX, nanoid::nanoid!(19)))
    }

    fn epoch_ms(&self) -> u64 {
        SystemTime::now().duration_since(UNIX_EPOCH).unwrap_or_default().as_millis() as u64
    }
}

#[derive(Debug)]
struct FakeState {
    issued: u64,
    epoch_ms: u64,
}

/// Deterministic stamper: ids `log-1`, `log-2`, ... and a clock that only
/// moves when told to. Clones share state.
#[derive(Debug, Clone)]
pub struct FakeStamper {
    state: Arc<Mutex<FakeState>>,
}

impl FakeStamper {
    pub const START_MS: u64 = 1_000_000;

    pub fn new() -> Self {
        Self { state: Arc::new(Mutex::new(FakeState { issued: 0, epoch_ms: Self::START_MS })) }
    }

    pub fn advance(&self, duration: Duration) {
        self.state.lock().epoch_ms += duration.as_millis() as u64;
    }

    pub fn set_epoch_ms(&self, ms: u64) {
        self.state.lock().epoch_ms = ms;
    }

    /// Number of ids handed out so far
    pub fn issued(&self) -> u64 {
        self.state.lock().issued
    }
}

impl Default for FakeStamper {
    fn default() -> Self {
        Self::new()
    }
}

impl Stamper for FakeStamper {
    fn entry_id(&self) -> EntryId {
        let mut state = self.state.lock();
        state.issued += 1;
        EntryId::new(format!("{}{}", SystemStamper::ID_PREFIX, state.issued))
    }

    fn epoch_ms(&self) -> u64 {
        self.state.lock().epoch_ms
    }
}

#[cfg(test)]
#[path = "stamp_tests.rs"]
mod tests;
