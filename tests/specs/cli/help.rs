//! CLI help output specs
//!
//! Verify help text displays for all commands.

use crate::prelude::*;

#[test]
fn runlog_no_args_shows_usage_and_fails() {
    cli().fails().stderr_has("Usage:");
}

#[test]
fn runlog_help_lists_commands() {
    cli()
        .args(&["--help"])
        .passes()
        .stdout_has("Usage:")
        .stdout_has("logs")
        .stdout_has("show")
        .stdout_has("emit")
        .stdout_has("running");
}

#[test]
fn runlog_logs_help_shows_run_flag() {
    cli().args(&["logs", "--help"]).passes().stdout_has("--run");
}

#[test]
fn runlog_emit_help_shows_message_flag() {
    cli().args(&["emit", "--help"]).passes().stdout_has("--message");
}

#[test]
fn runlog_version_shows_version() {
    cli().args(&["--version"]).passes().stdout_has("0.2");
}
