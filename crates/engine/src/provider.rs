// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Recipient providers.
//!
//! Each provider answers one question about a build ("who committed since
//! the last success", "who started it", ...). Providers are selected and
//! ordered by configuration through [`ProviderConfig`].

use crate::collector::UpstreamCollector;
use crate::window::CommitterWindowResolver;
use crate::IdentitySet;
use culprit_core::{BuildHistory, BuildRecord, Identity};
use serde::{Deserialize, Serialize};
use std::sync::Arc;

/// Shared inputs for a provider call.
#[derive(Clone, Copy)]
pub struct ProviderContext<'a> {
    pub history: &'a dyn BuildHistory,
    pub max_depth: usize,
}

impl<'a> ProviderContext<'a> {
    pub fn new(history: &'a dyn BuildHistory, max_depth: usize) -> Self {
        Self { history, max_depth }
    }

    fn resolver(&self) -> CommitterWindowResolver<&'a dyn BuildHistory> {
        CommitterWindowResolver::new(self.history).max_depth(self.max_depth)
    }
}

/// A source of contributor identities for a build.
pub trait RecipientProvider: Send + Sync {
    /// Configuration name, as used in the `type` field.
    fn name(&self) -> &'static str;

    fn recipients(&self, ctx: &ProviderContext<'_>, build: &BuildRecord) -> IdentitySet;
}

/// Everyone who contributed, directly or through upstream jobs, since the
/// job last succeeded.
pub struct UpstreamCommittersSinceLastSuccess;

impl RecipientProvider for UpstreamCommittersSinceLastSuccess {
    fn name(&self) -> &'static str {
        "upstream_committers_since_last_success"
    }

    fn recipients(&self, ctx: &ProviderContext<'_>, build: &BuildRecord) -> IdentitySet {
        ctx.resolver().recipients_for(build)
    }
}

/// The job's own change sets since the last success, without following
/// upstream causes. A job that never succeeded blames only the triggering
/// build's own change set.
pub struct Culprits;

impl RecipientProvider for Culprits {
    fn name(&self) -> &'static str {
        "culprits"
    }

    fn recipients(&self, ctx: &ProviderContext<'_>, build: &BuildRecord) -> IdentitySet {
        match ctx.resolver().window(build) {
            Some((_, window)) => {
                window.iter().flat_map(|b| b.change_set.iter().cloned()).collect()
            }
            None => build.change_set.iter().cloned().collect(),
        }
    }
}

/// The triggering build's own change set.
pub struct Developers;

impl RecipientProvider for Developers {
    fn name(&self) -> &'static str {
        "developers"
    }

    fn recipients(&self, _ctx: &ProviderContext<'_>, build: &BuildRecord) -> IdentitySet {
        build.change_set.iter().cloned().collect()
    }
}

/// Contributors to the builds the triggering build traces back to, ignoring
/// earlier builds of the job.
pub struct UpstreamCommitters;

impl RecipientProvider for UpstreamCommitters {
    fn name(&self) -> &'static str {
        "upstream_committers"
    }

    fn recipients(&self, ctx: &ProviderContext<'_>, build: &BuildRecord) -> IdentitySet {
        let collector = UpstreamCollector::new(ctx.history).max_depth(ctx.max_depth);
        let origins = collector.origins_of(&Arc::new(build.clone()));
        origins.builds.iter().flat_map(|b| b.change_set.iter().cloned()).collect()
    }
}

/// Whoever started the build by hand.
pub struct Requester;

impl RecipientProvider for Requester {
    fn name(&self) -> &'static str {
        "requester"
    }

    fn recipients(&self, _ctx: &ProviderContext<'_>, build: &BuildRecord) -> IdentitySet {
        build.requesters().map(Identity::parse).collect()
    }
}

/// A fixed list, regardless of the build.
pub struct List {
    recipients: IdentitySet,
}

impl List {
    pub fn new<S: AsRef<str>>(recipients: impl IntoIterator<Item = S>) -> Self {
        Self { recipients: recipients.into_iter().map(|r| Identity::parse(r.as_ref())).collect() }
    }
}

impl RecipientProvider for List {
    fn name(&self) -> &'static str {
        "list"
    }

    fn recipients(&self, _ctx: &ProviderContext<'_>, _build: &BuildRecord) -> IdentitySet {
        self.recipients.clone()
    }
}

/// A provider as written in configuration.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum ProviderConfig {
    #[default]
    UpstreamCommittersSinceLastSuccess,
    Culprits,
    Developers,
    UpstreamCommitters,
    Requester,
    List { recipients: Vec<String> },
}

impl ProviderConfig {
    pub fn build(&self) -> Box<dyn RecipientProvider> {
        match self {
            ProviderConfig::UpstreamCommittersSinceLastSuccess => {
                Box::new(UpstreamCommittersSinceLastSuccess)
            }
            ProviderConfig::Culprits => Box::new(Culprits),
            ProviderConfig::Developers => Box::new(Developers),
            ProviderConfig::UpstreamCommitters => Box::new(UpstreamCommitters),
            ProviderConfig::Requester => Box::new(Requester),
            ProviderConfig::List { recipients } => Box::new(List::new(recipients)),
        }
    }
}

#[cfg(test)]
#[path = "provider_tests.rs"]
mod tests;
