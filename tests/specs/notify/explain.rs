// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! `culprit explain` shows the anchor, window and upstream origins.

use crate::prelude::*;

#[test]
fn explain_shows_window_and_origins() {
    let project = Project::empty();
    project.commit("jobA", "success", "First <first@example.com>");
    project.trigger("jobB", "success", "jobA#1");
    project.commit("jobA", "success", "Second <second@example.com>");
    project.trigger("jobB", "failure", "jobA#2");

    project.culprit().args(&["explain", "jobB#2"]).passes().stdout_eq(
        "\
build:  jobB#2 (failure)
anchor: jobB#1
window:
  jobB#2 <- jobA#2
contributors:
  Second <second@example.com>
anomalies: none
providers:
  upstream_committers_since_last_success
recipients:
  second@example.com
",
    );
}

#[test]
fn explain_reports_missing_anchor() {
    let project = Project::empty();
    project.commit("jobA", "failure", "first@example.com");

    project
        .culprit()
        .args(&["explain", "jobA#1"])
        .passes()
        .stdout_has("anchor: none")
        .stdout_has("recipients: none");
}

#[test]
fn explain_reports_cycles() {
    let project = Project::empty();
    project.commit("jobB", "success", "first@example.com");
    project.record("jobB", "failure", &["--upstream", "jobB#2"]);

    let out = project.culprit().args(&["explain", "jobB#2", "--output", "json"]).passes();
    let json = out.json();
    assert_eq!(json["anomalies"][0], "upstream cycle through jobB#2");
    assert_eq!(json["recipients"], serde_json::json!([]));
}
