// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! On-disk locations shared by every command.

use anyhow::{Context, Result};
use culprit_core::{BuildHistory, BuildKey, BuildRecord};
use culprit_engine::NotifyConfig;
use culprit_storage::{BuildStore, Journal};
use std::path::PathBuf;
use std::sync::Arc;

use crate::env;
use crate::exit_error::ExitError;

const JOURNAL_FILE: &str = "builds.jsonl";

pub struct State {
    dir: PathBuf,
    config_path: PathBuf,
}

impl State {
    /// Explicit flags win over the environment.
    pub fn resolve(dir: Option<PathBuf>, config: Option<PathBuf>) -> Result<Self> {
        let dir = match dir {
            Some(dir) => dir,
            None => env::state_dir()?,
        };
        let config_path = config.unwrap_or_else(|| env::config_path(&dir));
        Ok(Self { dir, config_path })
    }

    pub fn journal_path(&self) -> PathBuf {
        self.dir.join(JOURNAL_FILE)
    }

    pub fn load_store(&self) -> Result<BuildStore> {
        let path = self.journal_path();
        Journal::load(&path).with_context(|| format!("loading {}", path.display()))
    }

    pub fn open_journal(&self) -> Result<Journal> {
        let path = self.journal_path();
        Journal::open(&path).with_context(|| format!("opening {}", path.display()))
    }

    pub fn load_config(&self) -> Result<NotifyConfig> {
        Ok(NotifyConfig::load(&self.config_path)?)
    }
}

/// Look up a build, failing with the unknown-build exit code.
pub fn find_build(store: &BuildStore, key: &BuildKey) -> Result<Arc<BuildRecord>> {
    store.get(key).ok_or_else(|| ExitError::unknown_build(key).into())
}

#[cfg(test)]
#[path = "state_tests.rs"]
mod tests;
