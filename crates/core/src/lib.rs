// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

// Allow panic!/unwrap/expect in test code
#![cfg_attr(test, allow(clippy::panic))]
#![cfg_attr(test, allow(clippy::unwrap_used))]
#![cfg_attr(test, allow(clippy::expect_used))]

//! culprit-core: build records, contributor identities, and the read-only
//! history traits the recipient resolver consumes.

pub mod macros;

pub mod build;
pub mod clock;
pub mod history;
pub mod id;
pub mod identity;

#[cfg(any(test, feature = "test-support"))]
pub mod test_support;

pub use build::{BuildKey, BuildRecord, Cause, Outcome, ParseKeyError, ParseOutcomeError};
#[cfg(any(test, feature = "test-support"))]
pub use build::BuildRecordBuilder;
pub use clock::{Clock, FakeClock, SystemClock};
pub use history::{BuildHistory, DependencyGraph};
pub use id::JobName;
pub use identity::{Address, Identity};
