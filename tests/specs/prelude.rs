// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Shared harness: an isolated state directory and fluent assertions.

#![allow(dead_code)]

use assert_cmd::Command;
use std::path::{Path, PathBuf};
use tempfile::TempDir;

/// `culprit` with no state directory, for help and argument checks.
pub fn cli() -> CliBuilder {
    CliBuilder { cmd: culprit_cmd() }
}

fn culprit_cmd() -> Command {
    let mut cmd = Command::cargo_bin("culprit").unwrap();
    cmd.env_remove("CULPRIT_STATE_DIR").env_remove("CULPRIT_CONFIG").env_remove("CULPRIT_LOG");
    cmd
}

/// A scratch state directory that every command in one test shares.
pub struct Project {
    dir: TempDir,
}

impl Project {
    pub fn empty() -> Self {
        Self { dir: TempDir::new().unwrap() }
    }

    pub fn path(&self) -> &Path {
        self.dir.path()
    }

    pub fn journal(&self) -> PathBuf {
        self.path().join("builds.jsonl")
    }

    /// Write a file relative to the state directory.
    pub fn file(&self, rel: &str, content: &str) {
        let path = self.path().join(rel);
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent).unwrap();
        }
        std::fs::write(path, content).unwrap();
    }

    pub fn culprit(&self) -> CliBuilder {
        let mut cmd = culprit_cmd();
        cmd.env("CULPRIT_STATE_DIR", self.path());
        CliBuilder { cmd }
    }

    /// `culprit record <job> --outcome <outcome> [extra...]`, which must pass.
    pub fn record(&self, job: &str, outcome: &str, extra: &[&str]) {
        let mut args = vec!["record", job, "--outcome", outcome];
        args.extend_from_slice(extra);
        self.culprit().args(&args).passes();
    }

    /// A build in `job` whose change set is a single author.
    pub fn commit(&self, job: &str, outcome: &str, author: &str) {
        self.record(job, outcome, &["--author", author]);
    }

    /// A build in `job` with no changes, triggered by `upstream` (`job#N`).
    pub fn trigger(&self, job: &str, outcome: &str, upstream: &str) {
        self.record(job, outcome, &["--upstream", upstream]);
    }

    /// Recipients of `build`, one address per entry.
    pub fn recipients(&self, build: &str) -> Vec<String> {
        self.culprit()
            .args(&["recipients", build])
            .passes()
            .stdout()
            .lines()
            .map(str::to_string)
            .collect()
    }
}

pub struct CliBuilder {
    cmd: Command,
}

impl CliBuilder {
    pub fn args(mut self, args: &[&str]) -> Self {
        self.cmd.args(args);
        self
    }

    pub fn env(mut self, key: &str, value: impl AsRef<std::ffi::OsStr>) -> Self {
        self.cmd.env(key, value);
        self
    }

    fn run(mut self) -> Output {
        let out = self.cmd.output().unwrap();
        Output {
            code: out.status.code(),
            stdout: String::from_utf8_lossy(&out.stdout).into_owned(),
            stderr: String::from_utf8_lossy(&out.stderr).into_owned(),
        }
    }

    pub fn passes(self) -> Output {
        let out = self.run();
        assert_eq!(
            out.code,
            Some(0),
            "expected success\nstdout:\n{}\nstderr:\n{}",
            out.stdout,
            out.stderr
        );
        out
    }

    pub fn fails(self) -> Output {
        let out = self.run();
        assert_ne!(out.code, Some(0), "expected failure\nstdout:\n{}", out.stdout);
        out
    }

    pub fn exits_with(self, code: i32) -> Output {
        let out = self.run();
        assert_eq!(out.code, Some(code), "stdout:\n{}\nstderr:\n{}", out.stdout, out.stderr);
        out
    }
}

pub struct Output {
    code: Option<i32>,
    stdout: String,
    stderr: String,
}

impl Output {
    pub fn stdout(&self) -> &str {
        &self.stdout
    }

    pub fn stderr(&self) -> &str {
        &self.stderr
    }

    pub fn stdout_has(self, needle: &str) -> Self {
        assert!(self.stdout.contains(needle), "stdout missing {needle:?}:\n{}", self.stdout);
        self
    }

    pub fn stderr_has(self, needle: &str) -> Self {
        assert!(self.stderr.contains(needle), "stderr missing {needle:?}:\n{}", self.stderr);
        self
    }

    pub fn stdout_eq(self, expected: &str) -> Self {
        similar_asserts::assert_eq!(self.stdout, expected);
        self
    }

    pub fn json(&self) -> serde_json::Value {
        serde_json::from_str(&self.stdout).unwrap()
    }
}
