// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Committers since the last successful build.
//!
//! The *anchor* is the job's last successful build strictly before the
//! triggering build. The *window* is every build of the same job after the
//! anchor, up to and including the triggering build. Each window build is
//! traced to its origins and the origins' change sets are merged.
//!
//! Without an anchor there is no known-good baseline and the result is
//! empty: notifying nobody beats notifying every contributor in history.

use crate::collector::{Anomaly, UpstreamCollector, DEFAULT_MAX_DEPTH};
use crate::IdentitySet;
use culprit_core::{BuildHistory, BuildKey, BuildRecord};
use std::sync::Arc;

/// One window build and the origins its contributors came from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WindowEntry {
    pub build: BuildKey,
    pub origins: Vec<BuildKey>,
}

/// Full account of one resolution, for callers that want more than the set.
#[derive(Debug, Clone)]
pub struct Resolution {
    pub build: BuildKey,
    pub anchor: Option<BuildKey>,
    pub window: Vec<WindowEntry>,
    pub identities: IdentitySet,
    pub anomalies: Vec<Anomaly>,
}

impl Resolution {
    fn unanchored(build: BuildKey) -> Self {
        Self {
            build,
            anchor: None,
            window: Vec::new(),
            identities: IdentitySet::default(),
            anomalies: Vec::new(),
        }
    }
}

/// Resolves "who contributed since the last success" for a triggering build.
pub struct CommitterWindowResolver<H> {
    history: H,
    max_depth: usize,
}

impl<H: BuildHistory> CommitterWindowResolver<H> {
    pub fn new(history: H) -> Self {
        Self { history, max_depth: DEFAULT_MAX_DEPTH }
    }

    pub fn max_depth(mut self, max_depth: usize) -> Self {
        self.max_depth = max_depth;
        self
    }

    pub fn history(&self) -> &H {
        &self.history
    }

    /// The anchor and the window builds after it, or `None` without an anchor.
    ///
    /// The triggering build is always the last window entry, even if the
    /// history has not recorded it yet.
    pub fn window(
        &self,
        triggering: &BuildRecord,
    ) -> Option<(Arc<BuildRecord>, Vec<Arc<BuildRecord>>)> {
        let anchor = self.history.last_successful_before(&triggering.job, triggering.ordinal)?;
        let mut window =
            self.history.builds_between(&triggering.job, anchor.ordinal, triggering.ordinal);
        if window.last().map(|b| b.ordinal) != Some(triggering.ordinal) {
            window.push(Arc::new(triggering.clone()));
        }
        Some((anchor, window))
    }

    /// Contributors for every build since the anchor, with the reasoning.
    pub fn resolve(&self, triggering: &BuildRecord) -> Resolution {
        let key = triggering.key();
        let Some((anchor, window)) = self.window(triggering) else {
            tracing::debug!(build = %key, "no successful build before this one, nobody to blame");
            return Resolution::unanchored(key);
        };

        let collector = UpstreamCollector::new(&self.history).max_depth(self.max_depth);
        let mut resolution = Resolution::unanchored(key);
        resolution.anchor = Some(anchor.key());

        for build in &window {
            let origins = collector.origins_of(build);
            for origin in &origins.builds {
                resolution.identities.extend(origin.change_set.iter().cloned());
            }
            resolution.window.push(WindowEntry { build: build.key(), origins: origins.keys() });
            resolution.anomalies.extend(origins.anomalies);
        }

        tracing::debug!(
            build = %resolution.build,
            anchor = %anchor.key(),
            window = resolution.window.len(),
            identities = resolution.identities.len(),
            "resolved committers since last success"
        );
        resolution
    }

    /// Contributors for every build since the anchor.
    pub fn recipients_for(&self, triggering: &BuildRecord) -> IdentitySet {
        self.resolve(triggering).identities
    }
}

#[cfg(test)]
#[path = "window_tests.rs"]
mod tests;
