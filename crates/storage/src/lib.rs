// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

// Allow panic!/unwrap/expect in test code
#![cfg_attr(test, allow(clippy::panic))]
#![cfg_attr(test, allow(clippy::unwrap_used))]
#![cfg_attr(test, allow(clippy::expect_used))]

//! culprit-storage: append-only job histories and their on-disk journal

mod journal;
mod store;

pub use journal::{Journal, JournalEntry, JournalError};
pub use store::{BuildStore, StoreError};
