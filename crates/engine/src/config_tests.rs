// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

use super::*;
use yare::parameterized;

#[test]
fn empty_file_is_default() {
    let config = NotifyConfig::from_toml_str("").unwrap();
    assert_eq!(config, NotifyConfig::default());
    assert_eq!(config.max_upstream_depth, DEFAULT_MAX_DEPTH);
    assert_eq!(config.providers, vec![ProviderConfig::UpstreamCommittersSinceLastSuccess]);
}

#[test]
fn full_config_parses() {
    let config = NotifyConfig::from_toml_str(
        r#"
max_upstream_depth = 16

[[providers]]
type = "upstream_committers_since_last_success"

[[providers]]
type = "requester"

[[providers]]
type = "list"
recipients = ["ops@example.com"]

[directory]
default_suffix = "example.com"
excluded = ["jenkins"]

[directory.users]
bob = "robert@example.com"
"#,
    )
    .unwrap();

    assert_eq!(config.max_upstream_depth, 16);
    assert_eq!(
        config.providers,
        vec![
            ProviderConfig::UpstreamCommittersSinceLastSuccess,
            ProviderConfig::Requester,
            ProviderConfig::List { recipients: vec!["ops@example.com".into()] },
        ]
    );
    assert_eq!(config.directory.default_suffix.as_deref(), Some("example.com"));
    assert_eq!(config.directory.excluded, vec!["jenkins"]);
    assert_eq!(config.directory.users["bob"], "robert@example.com");
}

#[parameterized(
    zero_depth = { "max_upstream_depth = 0" },
    no_providers = { "providers = []" },
    blank_list_entry = { "[[providers]]\ntype = \"list\"\nrecipients = [\" \"]" },
)]
fn invalid(content: &str) {
    assert!(matches!(NotifyConfig::from_toml_str(content), Err(ConfigError::Invalid(_))));
}

#[parameterized(
    unknown_provider = { "[[providers]]\ntype = \"everyone\"" },
    unknown_key = { "max_depth = 3" },
    wrong_type = { "max_upstream_depth = \"deep\"" },
    list_without_recipients = { "[[providers]]\ntype = \"list\"" },
)]
fn unparseable(content: &str) {
    assert!(matches!(NotifyConfig::from_toml_str(content), Err(ConfigError::Parse { .. })));
}

#[test]
fn missing_file_is_default() {
    let dir = tempfile::tempdir().unwrap();
    let config = NotifyConfig::load(&dir.path().join("culprit.toml")).unwrap();
    assert_eq!(config, NotifyConfig::default());
}

#[test]
fn load_reports_path_on_parse_error() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("culprit.toml");
    std::fs::write(&path, "providers = 3").unwrap();

    let err = NotifyConfig::load(&path).unwrap_err();
    assert!(matches!(&err, ConfigError::Parse { path: p, .. } if p == &path));
    assert!(err.to_string().contains("culprit.toml"));
}

#[test]
fn load_reads_file() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("culprit.toml");
    std::fs::write(&path, "[[providers]]\ntype = \"developers\"\n").unwrap();

    let config = NotifyConfig::load(&path).unwrap();
    assert_eq!(config.providers, vec![ProviderConfig::Developers]);
}
