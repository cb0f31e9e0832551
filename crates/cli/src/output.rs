// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

use clap::ValueEnum;
use serde::Serialize;

#[derive(Clone, Copy, Debug, Default, PartialEq, ValueEnum)]
pub enum OutputFormat {
    #[default]
    Text,
    Json,
}

/// Pretty-print any serializable value as JSON on stdout.
pub fn print_json<T: Serialize + ?Sized>(value: &T) -> anyhow::Result<()> {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}

/// Compact elapsed time: "5s", "2m", "1h", "3d".
pub fn format_elapsed(secs: u64) -> String {
    match secs {
        0..=59 => format!("{secs}s"),
        60..=3_599 => format!("{}m", secs / 60),
        3_600..=86_399 => format!("{}h", secs / 3_600),
        _ => format!("{}d", secs / 86_400),
    }
}

/// Relative age of `epoch_ms` as seen at `now_ms`; "-" when unknown.
pub fn format_time_ago(epoch_ms: u64, now_ms: u64) -> String {
    if epoch_ms == 0 {
        return "-".to_string();
    }
    format!("{} ago", format_elapsed(now_ms.saturating_sub(epoch_ms) / 1000))
}

/// Left-aligned column width: the longest value, at least the header.
pub fn column_width<'a>(header: &str, values: impl IntoIterator<Item = &'a str>) -> usize {
    values.into_iter().map(str::len).max().unwrap_or(0).max(header.len())
}

#[cfg(test)]
#[path = "output_tests.rs"]
mod tests;
