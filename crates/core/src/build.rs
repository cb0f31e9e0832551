// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Build records: one completed execution of a job.

use crate::id::JobName;
use crate::identity::Identity;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

/// Result of a completed build.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Outcome {
    Success,
    Unstable,
    Failure,
    Aborted,
    NotBuilt,
}

impl Outcome {
    pub fn is_success(&self) -> bool {
        matches!(self, Outcome::Success)
    }
}

crate::simple_display! {
    Outcome {
        Success => "success",
        Unstable => "unstable",
        Failure => "failure",
        Aborted => "aborted",
        NotBuilt => "not_built",
    }
}

impl FromStr for Outcome {
    type Err = ParseOutcomeError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "success" => Ok(Outcome::Success),
            "unstable" => Ok(Outcome::Unstable),
            "failure" => Ok(Outcome::Failure),
            "aborted" => Ok(Outcome::Aborted),
            "not_built" | "not-built" => Ok(Outcome::NotBuilt),
            _ => Err(ParseOutcomeError(s.to_string())),
        }
    }
}

/// Unrecognized outcome name.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("unknown build outcome '{0}' (expected success, unstable, failure, aborted, or not_built)")]
pub struct ParseOutcomeError(String);

/// Identity of a build: the owning job plus its ordinal in that job's history.
///
/// Displays and parses as `job#ordinal`, e.g. `jobA#3`.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct BuildKey {
    pub job: JobName,
    pub ordinal: u64,
}

impl BuildKey {
    pub fn new(job: impl Into<JobName>, ordinal: u64) -> Self {
        Self { job: job.into(), ordinal }
    }
}

impl fmt::Display for BuildKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}#{}", self.job, self.ordinal)
    }
}

/// Malformed `job#ordinal` build reference.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ParseKeyError {
    #[error("build reference '{0}' is missing '#<number>'")]
    MissingOrdinal(String),
    #[error("build reference '{0}' has an empty job name")]
    EmptyJob(String),
    #[error("build reference '{0}' has an invalid build number")]
    InvalidOrdinal(String),
}

impl FromStr for BuildKey {
    type Err = ParseKeyError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim();
        // Job names may themselves contain '#', the ordinal is after the last one
        let (job, ordinal) =
            s.rsplit_once('#').ok_or_else(|| ParseKeyError::MissingOrdinal(s.to_string()))?;
        if job.is_empty() {
            return Err(ParseKeyError::EmptyJob(s.to_string()));
        }
        let ordinal =
            ordinal.parse::<u64>().map_err(|_| ParseKeyError::InvalidOrdinal(s.to_string()))?;
        Ok(BuildKey::new(job, ordinal))
    }
}

/// Why a build was started.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum Cause {
    /// Triggered by the completion of a build in another job
    Upstream { build: BuildKey },
    /// Started by a user (manual build or rebuild)
    User { user_id: String },
    /// Started by source-control polling or a push hook
    Scm,
    /// Started by a periodic schedule
    Timer,
}

impl fmt::Display for Cause {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Cause::Upstream { build } => write!(f, "upstream {}", build),
            Cause::User { user_id } => write!(f, "user {}", user_id),
            Cause::Scm => f.write_str("scm"),
            Cause::Timer => f.write_str("timer"),
        }
    }
}

/// Immutable snapshot of one completed execution of a job.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BuildRecord {
    pub job: JobName,
    /// Build number; strictly increasing within the job's history
    pub ordinal: u64,
    pub outcome: Outcome,
    /// Contributors attached directly to this build, in source-control order
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub change_set: Vec<Identity>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub causes: Vec<Cause>,
    /// Epoch milliseconds when the build completed (0 if unknown)
    #[serde(default)]
    pub completed_at_ms: u64,
}

impl BuildRecord {
    pub fn key(&self) -> BuildKey {
        BuildKey::new(self.job.clone(), self.ordinal)
    }

    /// Whether this build carries a change set of its own.
    pub fn has_changes(&self) -> bool {
        !self.change_set.is_empty()
    }

    /// Builds in other jobs that triggered this one.
    pub fn upstream_causes(&self) -> impl Iterator<Item = &BuildKey> {
        self.causes.iter().filter_map(|cause| match cause {
            Cause::Upstream { build } => Some(build),
            _ => None,
        })
    }

    /// User ids of whoever started this build by hand.
    pub fn requesters(&self) -> impl Iterator<Item = &str> {
        self.causes.iter().filter_map(|cause| match cause {
            Cause::User { user_id } => Some(user_id.as_str()),
            _ => None,
        })
    }
}

crate::builder! {
    pub struct BuildRecordBuilder => BuildRecord {
        into {
            job: JobName = "job",
        }
        set {
            ordinal: u64 = 1,
            outcome: Outcome = Outcome::Success,
            change_set: Vec<Identity> = Vec::new(),
            causes: Vec<Cause> = Vec::new(),
            completed_at_ms: u64 = 1_000_000,
        }
    }
}

#[cfg(any(test, feature = "test-support"))]
impl BuildRecordBuilder {
    /// Append a contributor parsed from an SCM author string.
    pub fn author(mut self, author: &str) -> Self {
        self.change_set.push(Identity::parse(author));
        self
    }

    /// Append an upstream cause.
    pub fn upstream(mut self, job: &str, ordinal: u64) -> Self {
        self.causes.push(Cause::Upstream { build: BuildKey::new(job, ordinal) });
        self
    }

    /// Append an arbitrary cause.
    pub fn cause(mut self, cause: Cause) -> Self {
        self.causes.push(cause);
        self
    }

    /// Append a user cause.
    pub fn requested_by(mut self, user_id: &str) -> Self {
        self.causes.push(Cause::User { user_id: user_id.to_string() });
        self
    }
}

#[cfg(test)]
#[path = "build_tests.rs"]
mod tests;
