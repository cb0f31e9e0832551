// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Identity to address resolution.

use culprit_core::{Address, Identity};
use serde::Deserialize;
use std::collections::{HashMap, HashSet};

/// Maps a contributor identity to a deliverable address.
pub trait IdentityResolver: Send + Sync {
    /// `None` when the identity cannot (or must not) be notified.
    fn resolve(&self, identity: &Identity) -> Option<Address>;
}

/// The `[directory]` configuration table.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct DirectoryConfig {
    /// Appended to bare user ids, e.g. `@example.com`
    pub default_suffix: Option<String>,
    /// Explicit user id (or address) to address mappings
    pub users: HashMap<String, String>,
    /// User ids or addresses that never receive mail
    pub excluded: Vec<String>,
}

/// Resolves identities against a [`DirectoryConfig`].
///
/// Lookups are case-insensitive. In order: excluded identities resolve to
/// nothing, explicit mappings win, email addresses pass through, and bare
/// user ids get the default suffix if one is configured.
#[derive(Debug, Clone, Default)]
pub struct DirectoryResolver {
    default_suffix: Option<String>,
    users: HashMap<String, Address>,
    excluded: HashSet<String>,
}

impl DirectoryResolver {
    pub fn new(config: &DirectoryConfig) -> Self {
        let users = config
            .users
            .iter()
            .map(|(user, address)| (normalize(user), Address::new(address.as_str())))
            .collect();
        let excluded = config.excluded.iter().map(|e| normalize(e)).collect();
        let default_suffix = config
            .default_suffix
            .as_deref()
            .map(str::trim)
            .filter(|s| !s.is_empty())
            .map(|s| if s.starts_with('@') { s.to_string() } else { format!("@{s}") });
        Self { default_suffix, users, excluded }
    }
}

fn normalize(s: &str) -> String {
    s.trim().to_ascii_lowercase()
}

impl IdentityResolver for DirectoryResolver {
    fn resolve(&self, identity: &Identity) -> Option<Address> {
        let key = identity.key();
        if key.is_empty() || self.excluded.contains(&key) {
            return None;
        }
        if let Some(address) = self.users.get(&key) {
            return Some(address.clone());
        }
        if identity.has_email() {
            return Some(Address::new(identity.address.as_str()));
        }
        let suffix = self.default_suffix.as_ref()?;
        let address = Address::new(format!("{}{}", identity.address.trim(), suffix));
        if self.excluded.contains(&normalize(address.as_str())) {
            return None;
        }
        Some(address)
    }
}

#[cfg(test)]
#[path = "directory_tests.rs"]
mod tests;
