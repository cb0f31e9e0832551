// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

use crate::directory::IdentityResolver;
use culprit_core::{Address, Identity};
use indexmap::IndexSet;

/// Turns contributor identities into a deduplicated, ordered address list.
pub struct RecipientFormatter<R> {
    resolver: R,
}

impl<R: IdentityResolver> RecipientFormatter<R> {
    pub fn new(resolver: R) -> Self {
        Self { resolver }
    }

    pub fn resolver(&self) -> &R {
        &self.resolver
    }

    /// Resolve each identity in order, dropping the ones with no address.
    pub fn format<'a>(&self, identities: impl IntoIterator<Item = &'a Identity>) -> Vec<Address> {
        let mut addresses = IndexSet::new();
        for identity in identities {
            match self.resolver.resolve(identity) {
                Some(address) => {
                    addresses.insert(address);
                }
                None => tracing::debug!(%identity, "no address for contributor, skipping"),
            }
        }
        addresses.into_iter().collect()
    }
}

#[cfg(test)]
#[path = "formatter_tests.rs"]
mod tests;
