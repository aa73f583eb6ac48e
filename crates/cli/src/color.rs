// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! 256-color palette for report output and `--help`.

use clap::builder::styling::{Ansi256Color, Color, Style, Styles};
use runlog_core::RunStatus;
use std::io::IsTerminal;

/// Role of a piece of text, mapped to one palette entry.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Tone {
    /// Section headings and `--help` headers: steel blue
    Heading,
    /// Run and task ids: light grey
    Id,
    /// Start/end times and durations: medium grey
    Timing,
    /// Error messages and secondary ids: dark grey
    Note,
    Success,
    Failure,
    Skipped,
    /// Runs still open (pending, interrupted)
    Open,
}

impl Tone {
    pub const fn code(self) -> u8 {
        match self {
            Tone::Heading => 74,
            Tone::Id => 250,
            Tone::Timing => 245,
            Tone::Note => 240,
            Tone::Success => 114,
            Tone::Failure => 174,
            Tone::Skipped => 180,
            Tone::Open => 110,
        }
    }

    pub fn of_status(status: RunStatus) -> Self {
        match status {
            RunStatus::Success => Tone::Success,
            RunStatus::Failure => Tone::Failure,
            RunStatus::Skipped => Tone::Skipped,
            RunStatus::Pending | RunStatus::Interrupted => Tone::Open,
        }
    }

    fn style(self) -> Style {
        Style::new().fg_color(Some(Color::Ansi256(Ansi256Color(self.code()))))
    }
}

/// `NO_COLOR=1` disables, then `COLOR=1` forces, otherwise color only on a TTY.
pub fn should_colorize() -> bool {
    if std::env::var("NO_COLOR").is_ok_and(|v| v == "1") {
        return false;
    }
    if std::env::var("COLOR").is_ok_and(|v| v == "1") {
        return true;
    }
    std::io::stdout().is_terminal()
}

/// Clap `Styles` for `--help`, plain when color is off.
pub fn styles() -> Styles {
    if !should_colorize() {
        return Styles::plain();
    }
    Styles::styled()
        .header(Tone::Heading.style())
        .literal(Tone::Id.style())
        .placeholder(Tone::Timing.style())
}

pub fn paint(tone: Tone, text: &str) -> String {
    if !should_colorize() {
        return text.to_string();
    }
    format!("\x1b[38;5;{}m{text}\x1b[0m", tone.code())
}

/// Status word in its outcome color.
pub fn status(status: RunStatus) -> String {
    paint(Tone::of_status(status), &status.to_string())
}

#[cfg(test)]
#[path = "color_tests.rs"]
mod tests;
