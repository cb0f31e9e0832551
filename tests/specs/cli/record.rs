// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Recording builds and reading them back.

use crate::prelude::*;

#[test]
fn record_prints_the_new_build_key() {
    let project = Project::empty();

    for (outcome, key) in [("success", "jobA#1\n"), ("failure", "jobA#2\n")] {
        project.culprit().args(&["record", "jobA", "--outcome", outcome]).passes().stdout_eq(key);
    }
    assert!(project.journal().exists());
}

#[test]
fn non_increasing_ordinal_is_rejected() {
    let project = Project::empty();
    project.record("jobA", "success", &["--ordinal", "5"]);

    project
        .culprit()
        .args(&["record", "jobA", "--outcome", "success", "--ordinal", "5"])
        .fails()
        .stderr_has("jobA");
    let out = project.culprit().args(&["history", "jobA", "-o", "json"]).passes();
    assert_eq!(out.json().as_array().map(Vec::len), Some(1));
}

#[test]
fn history_round_trips_through_the_journal() {
    let project = Project::empty();
    project.record("jobA", "success", &["--author", "First <first@example.com>", "--scm"]);
    project.record("jobB", "failure", &["--upstream", "jobA#1"]);

    let out = project.culprit().args(&["history", "jobB", "--output", "json"]).passes();
    let json = out.json();
    assert_eq!(json[0]["job"], "jobB");
    assert_eq!(json[0]["outcome"], "FAILURE");
    assert_eq!(json[0]["causes"][0]["type"], "upstream");

    project
        .culprit()
        .args(&["history"])
        .passes()
        .stdout_has("jobA")
        .stdout_has("jobB")
        .stdout_has("#1 failure");
}

#[test]
fn torn_journal_tail_is_ignored() {
    let project = Project::empty();
    project.record("jobA", "success", &[]);
    let mut journal = std::fs::read_to_string(project.journal()).unwrap();
    journal.push_str("{\"seq\":2,\"build\":{\"job\":");
    std::fs::write(project.journal(), journal).unwrap();

    project
        .culprit()
        .args(&["record", "jobA", "--outcome", "failure"])
        .passes()
        .stdout_eq("jobA#2\n");
    let out = project.culprit().args(&["history", "jobA", "-o", "json"]).passes();
    assert_eq!(out.json().as_array().map(Vec::len), Some(2));
}

#[test]
fn unknown_outcome_is_a_usage_error() {
    Project::empty()
        .culprit()
        .args(&["record", "jobA", "--outcome", "great"])
        .exits_with(2)
        .stderr_has("unknown build outcome");
}
