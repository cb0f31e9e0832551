// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

use crate::config::NotifyConfig;
use crate::directory::{DirectoryResolver, IdentityResolver};
use crate::formatter::RecipientFormatter;
use crate::provider::{ProviderContext, RecipientProvider};
use crate::IdentitySet;
use culprit_core::{Address, BuildHistory, BuildRecord};

/// Configured providers plus identity resolution over one history.
pub struct Notifier<H, R> {
    history: H,
    providers: Vec<Box<dyn RecipientProvider>>,
    formatter: RecipientFormatter<R>,
    max_depth: usize,
}

impl<H: BuildHistory> Notifier<H, DirectoryResolver> {
    pub fn from_config(history: H, config: &NotifyConfig) -> Self {
        Self::new(
            history,
            config.providers.iter().map(|p| p.build()).collect(),
            DirectoryResolver::new(&config.directory),
        )
        .max_depth(config.max_upstream_depth)
    }
}

impl<H: BuildHistory, R: IdentityResolver> Notifier<H, R> {
    pub fn new(history: H, providers: Vec<Box<dyn RecipientProvider>>, resolver: R) -> Self {
        Self {
            history,
            providers,
            formatter: RecipientFormatter::new(resolver),
            max_depth: crate::DEFAULT_MAX_DEPTH,
        }
    }

    pub fn max_depth(mut self, max_depth: usize) -> Self {
        self.max_depth = max_depth;
        self
    }

    pub fn provider_names(&self) -> Vec<&'static str> {
        self.providers.iter().map(|p| p.name()).collect()
    }

    /// Union of every provider's identities, in provider order.
    pub fn identities(&self, build: &BuildRecord) -> IdentitySet {
        let ctx = ProviderContext::new(&self.history, self.max_depth);
        let mut identities = IdentitySet::default();
        for provider in &self.providers {
            let found = provider.recipients(&ctx, build);
            tracing::trace!(
                build = %build.key(),
                provider = provider.name(),
                count = found.len(),
                "provider recipients"
            );
            identities.extend(found);
        }
        identities
    }

    /// Deliverable addresses for `build`.
    pub fn recipients(&self, build: &BuildRecord) -> Vec<Address> {
        self.formatter.format(&self.identities(build))
    }
}

#[cfg(test)]
#[path = "notifier_tests.rs"]
mod tests;
