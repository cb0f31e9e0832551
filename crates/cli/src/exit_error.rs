// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Error type that carries a process exit code.
//!
//! Commands return `ExitError` through `anyhow` and `main()` maps it to the
//! process status. Anything else exits with 1.

use culprit_core::BuildKey;
use std::fmt;

/// Exit status for a build that is not in the history.
pub const UNKNOWN_BUILD: i32 = 2;

#[derive(Debug)]
pub struct ExitError {
    pub code: i32,
    pub message: String,
}

impl ExitError {
    pub fn new(code: i32, message: impl Into<String>) -> Self {
        Self { code, message: message.into() }
    }

    pub fn unknown_build(key: &BuildKey) -> Self {
        Self::new(UNKNOWN_BUILD, format!("unknown build {key}"))
    }
}

impl fmt::Display for ExitError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.message)
    }
}

impl std::error::Error for ExitError {}
