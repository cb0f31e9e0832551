// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Provider selection and the address directory.

use crate::prelude::*;

fn failing_rebuild() -> Project {
    let project = Project::empty();
    project.commit("jobA", "success", "first");
    project.trigger("jobB", "success", "jobA#1");
    project.commit("jobA", "success", "second");
    project.trigger("jobB", "failure", "jobA#2");
    project.record("jobB", "failure", &["--user", "carol"]);
    project
}

#[test]
fn bare_user_ids_need_a_directory_suffix() {
    let project = failing_rebuild();

    assert!(project.recipients("jobB#3").is_empty());

    project.file("config.toml", "[directory]\ndefault_suffix = \"example.com\"\n");
    assert_eq!(project.recipients("jobB#3"), vec!["second@example.com"]);
}

#[test]
fn providers_are_combined_in_order() {
    let project = failing_rebuild();
    project.file(
        "config.toml",
        r#"
[[providers]]
type = "requester"

[[providers]]
type = "upstream_committers_since_last_success"

[[providers]]
type = "list"
recipients = ["ops@example.com"]

[directory]
default_suffix = "example.com"
excluded = ["ops@example.com"]

[directory.users]
second = "s.person@example.org"
"#,
    );

    assert_eq!(project.recipients("jobB#3"), vec!["carol@example.com", "s.person@example.org"]);
}

#[test]
fn config_flag_overrides_state_dir_config() {
    let project = failing_rebuild();
    project.file("other.toml", "[[providers]]\ntype = \"requester\"\n");
    let other = project.path().join("other.toml");

    project
        .culprit()
        .args(&["recipients", "jobB#3", "--identities", "--config", other.to_str().unwrap()])
        .passes()
        .stdout_eq("carol\n");
}

#[test]
fn invalid_config_is_reported() {
    let project = failing_rebuild();
    project.file("config.toml", "[[providers]]\ntype = \"everyone\"\n");

    project.culprit().args(&["recipients", "jobB#3"]).fails().stderr_has("config.toml");
}
