// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Upstream origin collection.
//!
//! A build with a change set of its own is its own origin. A build without
//! one delegates to whichever upstream builds triggered it, recursively, so
//! a failure three jobs down a chain still traces back to the build that
//! carried the commits.
//!
//! The walk is an explicit depth-first traversal. Every build is keyed by
//! `(job, ordinal)` and moves through two states: *active* while its
//! upstream subtree is being explored and *done* afterwards. Reaching an
//! active build again means the upstream references form a cycle; reaching
//! a done build means two paths converge (fan-in) and it has already been
//! accounted for, unless the new path is shorter. A done build remembers the
//! depth it was expanded at and is expanded again from a shallower depth, so
//! the depth limit never depends on the order causes are listed in.

use culprit_core::history::Upstream;
use culprit_core::{BuildKey, BuildRecord, DependencyGraph};
use std::collections::{HashMap, HashSet};
use std::fmt;
use std::sync::Arc;

/// Upstream edges followed before the walk gives up on a branch.
pub const DEFAULT_MAX_DEPTH: usize = 128;

/// A malformed-graph condition met while collecting origins.
///
/// None of these abort resolution: the offending edge contributes nothing
/// and the walk continues with whatever else is reachable.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Anomaly {
    /// `build` was reached again while its own upstream walk was in progress
    Cycle { build: BuildKey },
    /// The walk reached `build` at the depth limit without finding a change set
    DepthExceeded { build: BuildKey, limit: usize },
    /// `from` names an upstream cause that is not in the history
    MissingUpstream { from: BuildKey, missing: BuildKey },
}

impl Anomaly {
    /// Cycles and depth overruns point at misconfiguration; a missing
    /// upstream is normal once retention has rotated old builds out.
    pub fn is_misconfiguration(&self) -> bool {
        !matches!(self, Anomaly::MissingUpstream { .. })
    }
}

impl fmt::Display for Anomaly {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Anomaly::Cycle { build } => write!(f, "upstream cycle through {}", build),
            Anomaly::DepthExceeded { build, limit } => {
                write!(f, "upstream chain deeper than {} at {}", limit, build)
            }
            Anomaly::MissingUpstream { from, missing } => {
                write!(f, "{} names upstream {} which is not in the history", from, missing)
            }
        }
    }
}

/// Result of [`UpstreamCollector::origins_of`].
#[derive(Debug, Clone, Default)]
pub struct Origins {
    /// Builds whose change sets stand in for the queried build, in discovery order
    pub builds: Vec<Arc<BuildRecord>>,
    pub anomalies: Vec<Anomaly>,
}

impl Origins {
    pub fn keys(&self) -> Vec<BuildKey> {
        self.builds.iter().map(|b| b.key()).collect()
    }

    pub fn is_empty(&self) -> bool {
        self.builds.is_empty()
    }
}

#[derive(Clone, Copy, PartialEq, Eq)]
enum Visit {
    Active,
    Done { depth: usize },
}

enum Frame {
    Enter { build: Arc<BuildRecord>, depth: usize },
    Exit { key: BuildKey, depth: usize },
}

fn note(anomalies: &mut Vec<Anomaly>, anomaly: Anomaly) {
    if !anomalies.contains(&anomaly) {
        anomalies.push(anomaly);
    }
}

/// Walks upstream causes to find the builds that actually carried changes.
pub struct UpstreamCollector<'a, G: ?Sized> {
    graph: &'a G,
    max_depth: usize,
}

impl<'a, G: DependencyGraph + ?Sized> UpstreamCollector<'a, G> {
    pub fn new(graph: &'a G) -> Self {
        Self { graph, max_depth: DEFAULT_MAX_DEPTH }
    }

    pub fn max_depth(mut self, max_depth: usize) -> Self {
        self.max_depth = max_depth;
        self
    }

    /// The origin builds for `build`.
    ///
    /// Visited state is local to this call, so repeated calls are independent
    /// and give the same answer for an unchanged history.
    pub fn origins_of(&self, build: &Arc<BuildRecord>) -> Origins {
        let mut origins = Origins::default();
        let mut visits: HashMap<BuildKey, Visit> = HashMap::new();
        // Builds cut off by the depth limit and not (yet) reached any shallower
        let mut truncated: HashSet<BuildKey> = HashSet::new();
        let mut stack = vec![Frame::Enter { build: Arc::clone(build), depth: 0 }];

        while let Some(frame) = stack.pop() {
            let (build, depth) = match frame {
                Frame::Exit { key, depth } => {
                    visits.insert(key, Visit::Done { depth });
                    continue;
                }
                Frame::Enter { build, depth } => (build, depth),
            };

            let key = build.key();
            match visits.get(&key) {
                Some(Visit::Active) => {
                    tracing::warn!(build = %key, "upstream cause cycle, ignoring edge");
                    note(&mut origins.anomalies, Anomaly::Cycle { build: key });
                    continue;
                }
                Some(Visit::Done { depth: seen }) if *seen <= depth => continue,
                Some(Visit::Done { .. }) | None => {}
            }

            if build.has_changes() {
                visits.insert(key, Visit::Done { depth: 0 });
                origins.builds.push(build);
                continue;
            }

            if depth >= self.max_depth {
                tracing::debug!(build = %key, limit = self.max_depth, "upstream chain too deep");
                visits.insert(key.clone(), Visit::Done { depth });
                truncated.insert(key.clone());
                note(
                    &mut origins.anomalies,
                    Anomaly::DepthExceeded { build: key, limit: self.max_depth },
                );
                continue;
            }

            truncated.remove(&key);
            visits.insert(key.clone(), Visit::Active);
            stack.push(Frame::Exit { key: key.clone(), depth });

            let mut found = Vec::new();
            for link in self.graph.upstream_of(&build) {
                match link {
                    Upstream::Found(upstream) => found.push(upstream),
                    Upstream::Missing(missing) => {
                        tracing::debug!(build = %key, %missing, "upstream build not in history");
                        note(
                            &mut origins.anomalies,
                            Anomaly::MissingUpstream { from: key.clone(), missing },
                        );
                    }
                }
            }
            // Reversed so the first cause is explored first
            for upstream in found.into_iter().rev() {
                stack.push(Frame::Enter { build: upstream, depth: depth + 1 });
            }
        }

        origins.anomalies.retain(|anomaly| match anomaly {
            Anomaly::DepthExceeded { build, .. } => {
                let still = truncated.contains(build);
                if still {
                    tracing::warn!(build = %build, limit = self.max_depth, "upstream chain too deep");
                }
                still
            }
            _ => true,
        });
        origins
    }
}

#[cfg(test)]
#[path = "collector_tests.rs"]
mod tests;
