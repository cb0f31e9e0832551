// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Read-only views over job histories and the upstream dependency graph.
//!
//! Storage lives elsewhere; the resolver only needs these queries. All
//! returned records are shared, immutable snapshots.

use crate::build::{BuildKey, BuildRecord};
use crate::id::JobName;
use std::sync::Arc;

/// Per-job ordered build history.
pub trait BuildHistory: Send + Sync {
    /// Look up a single build. `None` if it never existed or was rotated out.
    fn get(&self, key: &BuildKey) -> Option<Arc<BuildRecord>>;

    /// The successful build with the greatest ordinal strictly below `ordinal`.
    fn last_successful_before(&self, job: &JobName, ordinal: u64) -> Option<Arc<BuildRecord>>;

    /// Builds with ordinal in `(after, through]`, ascending.
    fn builds_between(&self, job: &JobName, after: u64, through: u64) -> Vec<Arc<BuildRecord>>;
}

impl<T: BuildHistory + ?Sized> BuildHistory for Arc<T> {
    fn get(&self, key: &BuildKey) -> Option<Arc<BuildRecord>> {
        (**self).get(key)
    }

    fn last_successful_before(&self, job: &JobName, ordinal: u64) -> Option<Arc<BuildRecord>> {
        (**self).last_successful_before(job, ordinal)
    }

    fn builds_between(&self, job: &JobName, after: u64, through: u64) -> Vec<Arc<BuildRecord>> {
        (**self).builds_between(job, after, through)
    }
}

impl<T: BuildHistory + ?Sized> BuildHistory for &T {
    fn get(&self, key: &BuildKey) -> Option<Arc<BuildRecord>> {
        (**self).get(key)
    }

    fn last_successful_before(&self, job: &JobName, ordinal: u64) -> Option<Arc<BuildRecord>> {
        (**self).last_successful_before(job, ordinal)
    }

    fn builds_between(&self, job: &JobName, after: u64, through: u64) -> Vec<Arc<BuildRecord>> {
        (**self).builds_between(job, after, through)
    }
}

/// An upstream cause, resolved against the history.
#[derive(Debug, Clone)]
pub enum Upstream {
    Found(Arc<BuildRecord>),
    /// Referenced build is not in the history (rotated out or never recorded)
    Missing(BuildKey),
}

/// "What upstream builds led to this build?"
pub trait DependencyGraph {
    fn upstream_of(&self, build: &BuildRecord) -> Vec<Upstream>;
}

/// Every history doubles as a dependency graph by resolving upstream cause keys.
impl<H: BuildHistory + ?Sized> DependencyGraph for H {
    fn upstream_of(&self, build: &BuildRecord) -> Vec<Upstream> {
        build
            .upstream_causes()
            .map(|key| match self.get(key) {
                Some(record) => Upstream::Found(record),
                None => Upstream::Missing(key.clone()),
            })
            .collect()
    }
}

#[cfg(test)]
#[path = "history_tests.rs"]
mod tests;
