// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

// Allow panic!/unwrap/expect in test code
#![cfg_attr(test, allow(clippy::panic))]
#![cfg_attr(test, allow(clippy::unwrap_used))]
#![cfg_attr(test, allow(clippy::expect_used))]

//! culprit-engine: resolves who should hear about a build.
//!
//! The core question is "who contributed since this job last succeeded",
//! where contributions to upstream jobs count for downstream jobs that have
//! no source control of their own. [`CommitterWindowResolver`] answers it,
//! [`UpstreamCollector`] does the upstream walk, and [`Notifier`] combines
//! configured [`RecipientProvider`]s with identity resolution.

pub mod collector;
pub mod config;
pub mod directory;
pub mod formatter;
pub mod notifier;
pub mod provider;
pub mod window;

use culprit_core::Identity;

/// Contributor identities, deduplicated by address, in first-seen order.
pub type IdentitySet = indexmap::IndexSet<Identity>;

pub use collector::{Anomaly, Origins, UpstreamCollector, DEFAULT_MAX_DEPTH};
pub use config::{ConfigError, NotifyConfig};
pub use directory::{DirectoryConfig, DirectoryResolver, IdentityResolver};
pub use formatter::RecipientFormatter;
pub use notifier::Notifier;
pub use provider::{ProviderConfig, ProviderContext, RecipientProvider};
pub use window::{CommitterWindowResolver, Resolution, WindowEntry};
