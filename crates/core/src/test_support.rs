// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Shared test helpers for use across crates.
//!
//! Gated behind `#[cfg(any(test, feature = "test-support"))]`.

use crate::{BuildHistory, BuildKey, BuildRecord, JobName, Outcome};
use parking_lot::RwLock;
use std::collections::{BTreeMap, HashMap};
use std::sync::Arc;

// ── Proptest strategies ─────────────────────────────────────────────────

/// Proptest strategies for build records.
pub mod strategies {
    use crate::{BuildRecord, Identity, Outcome};
    use proptest::prelude::*;

    pub fn arb_outcome() -> impl Strategy<Value = Outcome> {
        prop_oneof![
            Just(Outcome::Success),
            Just(Outcome::Unstable),
            Just(Outcome::Failure),
            Just(Outcome::Aborted),
            Just(Outcome::NotBuilt),
        ]
    }

    /// Small address pool so generated change sets overlap.
    pub fn arb_identity() -> impl Strategy<Value = Identity> {
        (0u8..6).prop_map(|n| Identity::new(format!("Person {n}"), format!("p{n}@example.com")))
    }

    /// A job history of 1..=`max_len` builds numbered from 1, no upstream causes.
    pub fn arb_job_history(
        job: &'static str,
        max_len: usize,
    ) -> impl Strategy<Value = Vec<BuildRecord>> {
        prop::collection::vec(
            (arb_outcome(), prop::collection::vec(arb_identity(), 0..3)),
            1..=max_len,
        )
        .prop_map(move |builds| {
            builds
                .into_iter()
                .enumerate()
                .map(|(i, (outcome, change_set))| BuildRecord {
                    job: job.into(),
                    ordinal: i as u64 + 1,
                    outcome,
                    change_set,
                    causes: Vec::new(),
                    completed_at_ms: 1_000_000 + i as u64,
                })
                .collect()
        })
    }
}

// ── Fake history ─────────────────────────────────────────────────────────

/// In-memory history with no validation at all.
///
/// Accepts anything, including self-referencing and cyclic upstream causes,
/// so resolver tests can exercise malformed graphs.
#[derive(Clone, Default)]
pub struct FakeHistory {
    jobs: Arc<RwLock<HashMap<JobName, BTreeMap<u64, Arc<BuildRecord>>>>>,
}

impl FakeHistory {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with(records: impl IntoIterator<Item = BuildRecord>) -> Self {
        let history = Self::new();
        for record in records {
            history.push(record);
        }
        history
    }

    /// Insert or replace a build.
    pub fn push(&self, record: BuildRecord) -> Arc<BuildRecord> {
        let record = Arc::new(record);
        self.jobs
            .write()
            .entry(record.job.clone())
            .or_default()
            .insert(record.ordinal, Arc::clone(&record));
        record
    }

    /// Drop a build, simulating retention.
    pub fn remove(&self, key: &BuildKey) {
        if let Some(builds) = self.jobs.write().get_mut(&key.job) {
            builds.remove(&key.ordinal);
        }
    }
}

impl BuildHistory for FakeHistory {
    fn get(&self, key: &BuildKey) -> Option<Arc<BuildRecord>> {
        self.jobs.read().get(&key.job)?.get(&key.ordinal).cloned()
    }

    fn last_successful_before(&self, job: &JobName, ordinal: u64) -> Option<Arc<BuildRecord>> {
        let jobs = self.jobs.read();
        jobs.get(job)?
            .range(..ordinal)
            .rev()
            .map(|(_, build)| build)
            .find(|build| build.outcome.is_success())
            .cloned()
    }

    fn builds_between(&self, job: &JobName, after: u64, through: u64) -> Vec<Arc<BuildRecord>> {
        if after >= through {
            return Vec::new();
        }
        let jobs = self.jobs.read();
        match jobs.get(job) {
            Some(builds) => builds.range(after + 1..=through).map(|(_, b)| Arc::clone(b)).collect(),
            None => Vec::new(),
        }
    }
}

// ── Record factory functions ─────────────────────────────────────────────

/// A build whose change set holds a single author.
pub fn authored(job: &str, ordinal: u64, outcome: Outcome, author: &str) -> BuildRecord {
    BuildRecord::builder().job(job).ordinal(ordinal).outcome(outcome).author(author).build()
}

/// A build with no change set, triggered by a single upstream build.
pub fn triggered(job: &str, ordinal: u64, outcome: Outcome, upstream: &BuildKey) -> BuildRecord {
    BuildRecord::builder()
        .job(job)
        .ordinal(ordinal)
        .outcome(outcome)
        .upstream(upstream.job.as_str(), upstream.ordinal)
        .build()
}
