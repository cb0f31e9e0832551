// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Contributor identities and notifiable addresses.
//!
//! Both types compare by address, ASCII-case-insensitively and ignoring
//! surrounding whitespace, so `First@Example.com` and `first@example.com`
//! name the same contributor.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::hash::{Hash, Hasher};

fn normalized(address: &str) -> String {
    address.trim().to_ascii_lowercase()
}

/// A contributor attached to a build's change set.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Identity {
    /// Display name as recorded by source control
    pub name: String,
    /// Contributor address; either an email or a bare user id
    pub address: String,
}

impl Identity {
    pub fn new(name: impl Into<String>, address: impl Into<String>) -> Self {
        Self { name: name.into(), address: address.into() }
    }

    /// Parse an SCM author string.
    ///
    /// `"First Person <first@example.com>"` yields name `First Person` and
    /// address `first@example.com`. Anything without an `<...>` suffix is
    /// taken as both name and address (a bare user id such as `alice`).
    pub fn parse(author: &str) -> Self {
        let author = author.trim();
        if let Some(rest) = author.strip_suffix('>') {
            if let Some((name, address)) = rest.rsplit_once('<') {
                let name = name.trim();
                let address = address.trim();
                let name = if name.is_empty() { address } else { name };
                return Self::new(name, address);
            }
        }
        Self::new(author, author)
    }

    /// Whether the address already looks like a deliverable email address.
    pub fn has_email(&self) -> bool {
        self.address.contains('@')
    }

    /// The normalized address used for equality and lookups.
    pub fn key(&self) -> String {
        normalized(&self.address)
    }
}

impl PartialEq for Identity {
    fn eq(&self, other: &Self) -> bool {
        self.address.trim().eq_ignore_ascii_case(other.address.trim())
    }
}

impl Eq for Identity {}

impl Hash for Identity {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.key().hash(state);
    }
}

impl fmt::Display for Identity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.name == self.address {
            f.write_str(&self.address)
        } else {
            write!(f, "{} <{}>", self.name, self.address)
        }
    }
}

/// A deliverable notification address produced by identity resolution.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Address(String);

impl Address {
    pub fn new(address: impl Into<String>) -> Self {
        Self(address.into().trim().to_string())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl PartialEq for Address {
    fn eq(&self, other: &Self) -> bool {
        self.0.eq_ignore_ascii_case(&other.0)
    }
}

impl Eq for Address {}

impl Hash for Address {
    fn hash<H: Hasher>(&self, state: &mut H) {
        normalized(&self.0).hash(state);
    }
}

impl PartialEq<&str> for Address {
    fn eq(&self, other: &&str) -> bool {
        self.0.eq_ignore_ascii_case(other.trim())
    }
}

impl fmt::Display for Address {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for Address {
    fn from(s: &str) -> Self {
        Self::new(s)
    }
}

impl From<String> for Address {
    fn from(s: String) -> Self {
        Self::new(s)
    }
}

#[cfg(test)]
#[path = "identity_tests.rs"]
mod tests;
