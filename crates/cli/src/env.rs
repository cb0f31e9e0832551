// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Centralized environment variable access.

use std::path::{Path, PathBuf};
use thiserror::Error;

/// Log filter directives, e.g. `culprit_engine=debug`
pub const LOG_ENV: &str = "CULPRIT_LOG";

#[derive(Debug, Error)]
pub enum EnvError {
    #[error("cannot determine state directory; set CULPRIT_STATE_DIR")]
    NoStateDir,
}

fn non_empty(var: &str) -> Option<String> {
    std::env::var(var).ok().filter(|v| !v.trim().is_empty())
}

/// Resolve state directory: CULPRIT_STATE_DIR > XDG_STATE_HOME/culprit > ~/.local/state/culprit
pub fn state_dir() -> Result<PathBuf, EnvError> {
    if let Some(dir) = non_empty("CULPRIT_STATE_DIR") {
        return Ok(PathBuf::from(dir));
    }
    if let Some(xdg) = non_empty("XDG_STATE_HOME") {
        return Ok(PathBuf::from(xdg).join("culprit"));
    }
    let home = dirs::home_dir().ok_or(EnvError::NoStateDir)?;
    Ok(home.join(".local/state/culprit"))
}

/// Resolve config file: CULPRIT_CONFIG > <state_dir>/config.toml
pub fn config_path(state_dir: &Path) -> PathBuf {
    match non_empty("CULPRIT_CONFIG") {
        Some(path) => PathBuf::from(path),
        None => state_dir.join("config.toml"),
    }
}

#[cfg(test)]
#[path = "env_tests.rs"]
mod tests;
