// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! In-memory job histories.
//!
//! Each job owns a copy-on-write log: readers clone the current
//! `Arc<Vec<..>>` and work on that snapshot, writers hold the per-job lock
//! only long enough to push onto a fresh or uniquely-owned vector. A reader
//! therefore always sees a consistent prefix of the job's history, and an
//! append made while a resolution is running is simply not part of its
//! snapshot.

use culprit_core::{BuildHistory, BuildKey, BuildRecord, JobName};
use parking_lot::RwLock;
use std::collections::HashMap;
use std::sync::Arc;
use thiserror::Error;

/// Errors from appending to a job history
#[derive(Debug, Error)]
pub enum StoreError {
    #[error("build {job}#{ordinal} is not after the latest build #{latest}")]
    OrdinalNotIncreasing { job: JobName, ordinal: u64, latest: u64 },
}

type Builds = Arc<Vec<Arc<BuildRecord>>>;

#[derive(Debug, Default)]
struct JobLog {
    builds: RwLock<Builds>,
}

impl JobLog {
    fn snapshot(&self) -> Builds {
        Arc::clone(&self.builds.read())
    }
}

/// Append-only build histories for every job.
#[derive(Debug, Default)]
pub struct BuildStore {
    jobs: RwLock<HashMap<JobName, Arc<JobLog>>>,
}

impl BuildStore {
    pub fn new() -> Self {
        Self::default()
    }

    fn log(&self, job: &JobName) -> Option<Arc<JobLog>> {
        self.jobs.read().get(job).cloned()
    }

    fn log_or_create(&self, job: &JobName) -> Arc<JobLog> {
        if let Some(log) = self.log(job) {
            return log;
        }
        Arc::clone(self.jobs.write().entry(job.clone()).or_default())
    }

    fn snapshot(&self, job: &JobName) -> Builds {
        self.log(job).map(|log| log.snapshot()).unwrap_or_default()
    }

    /// Append a completed build to its job's history.
    ///
    /// Ordinals must be strictly increasing per job. Upstream causes are not
    /// checked: they may point at builds that were rotated out.
    pub fn append(&self, record: BuildRecord) -> Result<Arc<BuildRecord>, StoreError> {
        let log = self.log_or_create(&record.job);
        let mut builds = log.builds.write();
        if let Some(latest) = builds.last() {
            if record.ordinal <= latest.ordinal {
                return Err(StoreError::OrdinalNotIncreasing {
                    job: record.job,
                    ordinal: record.ordinal,
                    latest: latest.ordinal,
                });
            }
        }
        let record = Arc::new(record);
        Arc::make_mut(&mut builds).push(Arc::clone(&record));
        tracing::trace!(build = %record.key(), outcome = %record.outcome, "build appended");
        Ok(record)
    }

    /// Names of every job with a history, sorted.
    pub fn jobs(&self) -> Vec<JobName> {
        let mut jobs: Vec<JobName> = self.jobs.read().keys().cloned().collect();
        jobs.sort();
        jobs
    }

    /// The job's full available history, ascending.
    pub fn history(&self, job: &JobName) -> Vec<Arc<BuildRecord>> {
        self.snapshot(job).to_vec()
    }

    pub fn latest(&self, job: &JobName) -> Option<Arc<BuildRecord>> {
        self.snapshot(job).last().cloned()
    }

    /// Ordinal the next build of `job` should get, `None` once the latest
    /// build holds the largest possible ordinal.
    pub fn next_ordinal(&self, job: &JobName) -> Option<u64> {
        self.latest(job).map_or(Some(1), |build| build.ordinal.checked_add(1))
    }

    /// Total number of builds across all jobs.
    pub fn len(&self) -> usize {
        let logs: Vec<Arc<JobLog>> = self.jobs.read().values().cloned().collect();
        logs.iter().map(|log| log.snapshot().len()).sum()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Keep only the newest `keep` builds of `job`. Returns how many were dropped.
    pub fn retain_last(&self, job: &JobName, keep: usize) -> usize {
        let Some(log) = self.log(job) else {
            return 0;
        };
        let mut builds = log.builds.write();
        let dropped = builds.len().saturating_sub(keep);
        if dropped > 0 {
            Arc::make_mut(&mut builds).drain(..dropped);
            tracing::debug!(%job, dropped, "rotated build history");
        }
        dropped
    }

    /// Drop every build of `job` with ordinal `<= ordinal`. Returns how many were dropped.
    pub fn discard_through(&self, job: &JobName, ordinal: u64) -> usize {
        let Some(log) = self.log(job) else {
            return 0;
        };
        let mut builds = log.builds.write();
        let dropped = builds.partition_point(|b| b.ordinal <= ordinal);
        if dropped > 0 {
            Arc::make_mut(&mut builds).drain(..dropped);
            tracing::debug!(%job, dropped, through = ordinal, "discarded build history");
        }
        dropped
    }
}

impl BuildHistory for BuildStore {
    fn get(&self, key: &BuildKey) -> Option<Arc<BuildRecord>> {
        let builds = self.snapshot(&key.job);
        let idx = builds.binary_search_by_key(&key.ordinal, |b| b.ordinal).ok()?;
        builds.get(idx).cloned()
    }

    fn last_successful_before(&self, job: &JobName, ordinal: u64) -> Option<Arc<BuildRecord>> {
        let builds = self.snapshot(job);
        let end = builds.partition_point(|b| b.ordinal < ordinal);
        builds[..end].iter().rev().find(|b| b.outcome.is_success()).cloned()
    }

    fn builds_between(&self, job: &JobName, after: u64, through: u64) -> Vec<Arc<BuildRecord>> {
        let builds = self.snapshot(job);
        let start = builds.partition_point(|b| b.ordinal <= after);
        let end = builds.partition_point(|b| b.ordinal <= through);
        if start >= end {
            return Vec::new();
        }
        builds[start..end].to_vec()
    }
}

#[cfg(test)]
#[path = "store_tests.rs"]
mod tests;
