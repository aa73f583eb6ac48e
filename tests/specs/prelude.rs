//! Shared helpers for black-box CLI specs.
//!
//! Every spec runs the `runlog` binary against its own temporary state
//! directory with color disabled.

use std::path::{Path, PathBuf};

use assert_cmd::Command;
use tempfile::TempDir;

/// `runlog` with no state directory configured.
pub fn cli() -> CliBuilder {
    CliBuilder::new()
}

pub struct CliBuilder {
    cmd: Command,
    args: Vec<String>,
}

impl CliBuilder {
    fn new() -> Self {
        #[allow(clippy::expect_used)]
        let mut cmd = Command::cargo_bin("runlog").expect("runlog binary should be built");
        cmd.env("NO_COLOR", "1").env_remove("COLOR").env_remove("RUNLOG_LOG");
        Self { cmd, args: Vec::new() }
    }

    pub fn args(mut self, args: &[&str]) -> Self {
        self.args.extend(args.iter().map(|a| a.to_string()));
        self
    }

    pub fn env(mut self, key: &str, value: impl AsRef<std::ffi::OsStr>) -> Self {
        self.cmd.env(key, value);
        self
    }

    pub fn stdin(mut self, input: &str) -> Self {
        self.cmd.write_stdin(input.to_string());
        self
    }

    fn run(mut self) -> RunAssert {
        let output = self.cmd.args(&self.args).output();
        #[allow(clippy::expect_used)]
        let output = output.expect("runlog should spawn");
        RunAssert {
            args: self.args.join(" "),
            code: output.status.code(),
            stdout: String::from_utf8_lossy(&output.stdout).into_owned(),
            stderr: String::from_utf8_lossy(&output.stderr).into_owned(),
        }
    }

    /// Run and assert exit code 0.
    pub fn passes(self) -> RunAssert {
        let run = self.run();
        assert_eq!(
            run.code,
            Some(0),
            "`runlog {}` failed\nstdout:\n{}\nstderr:\n{}",
            run.args,
            run.stdout,
            run.stderr
        );
        run
    }

    /// Run and assert a non-zero exit code.
    pub fn fails(self) -> RunAssert {
        let run = self.run();
        assert_ne!(run.code, Some(0), "`runlog {}` unexpectedly passed\nstdout:\n{}", run.args, run.stdout);
        run
    }
}

pub struct RunAssert {
    args: String,
    code: Option<i32>,
    stdout: String,
    stderr: String,
}

impl RunAssert {
    pub fn stdout(&self) -> String {
        self.stdout.clone()
    }

    pub fn json(&self) -> serde_json::Value {
        #[allow(clippy::expect_used)]
        serde_json::from_str(&self.stdout).expect("stdout should be JSON")
    }

    pub fn stdout_has(self, needle: &str) -> Self {
        assert!(self.stdout.contains(needle), "stdout missing {needle:?}:\n{}", self.stdout);
        self
    }

    pub fn stdout_lacks(self, needle: &str) -> Self {
        assert!(!self.stdout.contains(needle), "stdout unexpectedly has {needle:?}:\n{}", self.stdout);
        self
    }

    pub fn stdout_eq(self, expected: &str) -> Self {
        similar_asserts::assert_eq!(self.stdout, expected);
        self
    }

    pub fn stderr_has(self, needle: &str) -> Self {
        assert!(self.stderr.contains(needle), "stderr missing {needle:?}:\n{}", self.stderr);
        self
    }

    pub fn code_eq(self, code: i32) -> Self {
        assert_eq!(self.code, Some(code), "stderr:\n{}", self.stderr);
        self
    }
}

/// Temporary state directory.
pub struct Project {
    dir: TempDir,
}

impl Project {
    pub fn empty() -> Self {
        #[allow(clippy::expect_used)]
        let dir = tempfile::tempdir().expect("tempdir");
        Self { dir }
    }

    pub fn path(&self) -> &Path {
        self.dir.path()
    }

    pub fn state_path(&self, rel: &str) -> PathBuf {
        self.dir.path().join(rel)
    }

    /// Write a file relative to the state directory.
    #[allow(clippy::expect_used)]
    pub fn file(&self, rel: &str, content: &str) {
        let path = self.state_path(rel);
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent).expect("create parent dir");
        }
        std::fs::write(path, content).expect("write file");
    }

    /// Write a log from JSON lines.
    pub fn log(&self, namespace: &str, lines: &[&str]) {
        let mut content = lines.join("\n");
        content.push('\n');
        self.file(&format!("logs/{namespace}.jsonl"), &content);
    }

    /// `runlog` pointed at this state directory.
    pub fn runlog(&self) -> CliBuilder {
        cli().env("RUNLOG_STATE_DIR", self.path())
    }
}
