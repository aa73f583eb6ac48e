// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Compact elapsed-time formatting ("5s", "2m", "1h", "3d")

pub fn format_elapsed(secs: u64) -> String {
    if secs < 60 {
        format!("{secs}s")
    } else if secs < 3_600 {
        format!("{}m", secs / 60)
    } else if secs < 86_400 {
        format!("{}h", secs / 3_600)
    } else {
        format!("{}d", secs / 86_400)
    }
}

/// Like [`format_elapsed`], but sub-second durations keep millisecond precision.
pub fn format_elapsed_ms(ms: u64) -> String {
    if ms < 1_000 {
        format!("{ms}ms")
    } else {
        format_elapsed(ms / 1_000)
    }
}

#[cfg(test)]
#[path = "time_fmt_tests.rs"]
mod tests;
