// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Notification configuration, read from TOML.
//!
//! ```toml
//! max_upstream_depth = 64
//!
//! [[providers]]
//! type = "upstream_committers_since_last_success"
//!
//! [[providers]]
//! type = "list"
//! recipients = ["ops@example.com"]
//!
//! [directory]
//! default_suffix = "example.com"
//! excluded = ["jenkins"]
//!
//! [directory.users]
//! bob = "robert@example.com"
//! ```

use crate::collector::DEFAULT_MAX_DEPTH;
use crate::directory::DirectoryConfig;
use crate::provider::ProviderConfig;
use serde::Deserialize;
use std::path::{Path, PathBuf};
use thiserror::Error;

/// Errors from loading a configuration file
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("invalid config {}: {source}", path.display())]
    Parse {
        path: PathBuf,
        #[source]
        source: toml::de::Error,
    },
    #[error("invalid config: {0}")]
    Invalid(String),
}

/// Which providers run and how their output becomes addresses.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct NotifyConfig {
    /// Upstream edges followed before giving up on a branch
    pub max_upstream_depth: usize,
    /// Providers in the order their recipients are listed
    pub providers: Vec<ProviderConfig>,
    pub directory: DirectoryConfig,
}

impl Default for NotifyConfig {
    fn default() -> Self {
        Self {
            max_upstream_depth: DEFAULT_MAX_DEPTH,
            providers: vec![ProviderConfig::default()],
            directory: DirectoryConfig::default(),
        }
    }
}

impl NotifyConfig {
    /// Load from `path`. A missing file yields the default configuration.
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let content = match std::fs::read_to_string(path) {
            Ok(content) => content,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                tracing::debug!(path = %path.display(), "no config file, using defaults");
                return Ok(Self::default());
            }
            Err(source) => return Err(ConfigError::Io { path: path.to_owned(), source }),
        };
        let config: Self = toml::from_str(&content)
            .map_err(|source| ConfigError::Parse { path: path.to_owned(), source })?;
        config.validate()?;
        tracing::debug!(
            path = %path.display(),
            providers = config.providers.len(),
            "loaded config"
        );
        Ok(config)
    }

    pub fn from_toml_str(content: &str) -> Result<Self, ConfigError> {
        let config: Self = toml::from_str(content)
            .map_err(|source| ConfigError::Parse { path: PathBuf::from("<inline>"), source })?;
        config.validate()?;
        Ok(config)
    }

    fn validate(&self) -> Result<(), ConfigError> {
        if self.max_upstream_depth == 0 {
            return Err(ConfigError::Invalid("max_upstream_depth must be at least 1".into()));
        }
        if self.providers.is_empty() {
            return Err(ConfigError::Invalid("at least one provider is required".into()));
        }
        for provider in &self.providers {
            if let ProviderConfig::List { recipients } = provider {
                if recipients.iter().any(|r| r.trim().is_empty()) {
                    return Err(ConfigError::Invalid("list recipients must not be blank".into()));
                }
            }
        }
        Ok(())
    }
}

#[cfg(test)]
#[path = "config_tests.rs"]
mod tests;
