// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Committers since the last success, traced through upstream jobs.
//!
//! jobA carries the commits; jobB (and jobC) have no source control of
//! their own and are triggered by the job before them.

use crate::prelude::*;

const FIRST: &str = "First Person <first@example.com>";
const SECOND: &str = "Second Person <second@example.com>";
const THIRD: &str = "Third Person <third@example.com>";

#[test]
fn job_that_never_succeeded_notifies_nobody() {
    let project = Project::empty();
    project.commit("jobA", "success", FIRST);
    project.trigger("jobB", "failure", "jobA#1");

    assert!(project.recipients("jobB#1").is_empty());
}

#[test]
fn only_committers_after_the_last_success_are_notified() {
    let project = Project::empty();
    project.commit("jobA", "success", FIRST);
    project.trigger("jobB", "success", "jobA#1");
    project.commit("jobA", "success", SECOND);
    project.trigger("jobB", "failure", "jobA#2");

    assert_eq!(project.recipients("jobB#2"), vec!["second@example.com"]);
}

#[test]
fn consecutive_failures_accumulate_committers() {
    let project = Project::empty();
    project.commit("jobA", "success", FIRST);
    project.trigger("jobB", "success", "jobA#1");
    project.commit("jobA", "success", SECOND);
    project.trigger("jobB", "failure", "jobA#2");
    project.commit("jobA", "success", THIRD);
    project.trigger("jobB", "failure", "jobA#3");

    assert_eq!(project.recipients("jobB#3"), vec!["second@example.com", "third@example.com"]);
}

#[test]
fn three_job_chain_reaches_back_to_the_committing_job() {
    let project = Project::empty();
    let runs = [(1, FIRST, "success"), (2, SECOND, "success"), (3, THIRD, "failure")];
    for (n, author, outcome) in runs {
        project.commit("jobA", "success", author);
        project.trigger("jobB", "success", &format!("jobA#{n}"));
        project.trigger("jobC", outcome, &format!("jobB#{n}"));
    }

    assert_eq!(project.recipients("jobC#3"), vec!["third@example.com"]);
}

#[test]
fn recipients_are_stable_across_calls() {
    let project = Project::empty();
    project.commit("jobA", "success", FIRST);
    project.trigger("jobB", "success", "jobA#1");
    project.commit("jobA", "success", SECOND);
    project.trigger("jobB", "failure", "jobA#2");

    assert_eq!(project.recipients("jobB#2"), project.recipients("jobB#2"));
}

#[test]
fn self_referencing_upstream_terminates() {
    let project = Project::empty();
    project.commit("jobB", "success", FIRST);
    project.record("jobB", "failure", &["--upstream", "jobB#2"]);

    assert!(project.recipients("jobB#2").is_empty());
}

#[test]
fn unknown_build_exits_with_code_2() {
    let project = Project::empty();
    project.commit("jobA", "success", FIRST);

    project
        .culprit()
        .args(&["recipients", "jobA#9"])
        .exits_with(2)
        .stderr_has("unknown build jobA#9");
}

#[test]
fn json_output_lists_recipients() {
    let project = Project::empty();
    project.commit("jobA", "success", FIRST);
    project.commit("jobA", "failure", SECOND);

    let out = project.culprit().args(&["recipients", "jobA#2", "-o", "json"]).passes();
    let json = out.json();
    assert_eq!(json["build"], "jobA#2");
    assert_eq!(json["recipients"], serde_json::json!(["second@example.com"]));
}
