// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! CLI help output specs

use crate::prelude::*;

#[test]
fn no_args_shows_usage_and_fails() {
    cli().exits_with(2).stderr_has("Usage:");
}

#[test]
fn help_lists_commands() {
    cli()
        .args(&["--help"])
        .passes()
        .stdout_has("record")
        .stdout_has("history")
        .stdout_has("recipients")
        .stdout_has("explain");
}

#[test]
fn record_help_shows_flags() {
    cli()
        .args(&["record", "--help"])
        .passes()
        .stdout_has("--outcome")
        .stdout_has("--upstream");
}

#[test]
fn version_shows_version() {
    cli().args(&["--version"]).passes().stdout_has("0.2");
}
