// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! CLI command implementations

pub mod explain;
pub mod history;
pub mod recipients;
pub mod record;
