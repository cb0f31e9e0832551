// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! `culprit explain` - the anchor, window and upstream origins behind a
//! build's recipients.

use anyhow::Result;
use clap::Args;
use culprit_core::{Address, BuildHistory, BuildKey, BuildRecord, Identity, Outcome};
use culprit_engine::{CommitterWindowResolver, Notifier, NotifyConfig};
use serde::Serialize;

use crate::output::{print_json, OutputFormat};
use crate::state::{find_build, State};

#[derive(Args)]
pub struct ExplainArgs {
    /// Build to explain, as `job#N`
    #[arg(value_name = "JOB#N")]
    pub build: BuildKey,
}

#[derive(Debug, Serialize)]
pub struct WindowBuild {
    pub build: String,
    pub origins: Vec<String>,
}

#[derive(Debug, Serialize)]
pub struct Explanation {
    pub build: String,
    pub outcome: Outcome,
    /// Last successful build before this one
    pub anchor: Option<String>,
    pub window: Vec<WindowBuild>,
    /// Contributors since the anchor, through upstream jobs
    pub contributors: Vec<Identity>,
    pub anomalies: Vec<String>,
    pub providers: Vec<&'static str>,
    pub recipients: Vec<Address>,
}

pub fn explain(
    history: &dyn BuildHistory,
    config: &NotifyConfig,
    build: &BuildRecord,
) -> Explanation {
    let resolution =
        CommitterWindowResolver::new(history).max_depth(config.max_upstream_depth).resolve(build);
    let notifier = Notifier::from_config(history, config);

    Explanation {
        build: resolution.build.to_string(),
        outcome: build.outcome,
        anchor: resolution.anchor.as_ref().map(ToString::to_string),
        window: resolution
            .window
            .iter()
            .map(|entry| WindowBuild {
                build: entry.build.to_string(),
                origins: entry.origins.iter().map(ToString::to_string).collect(),
            })
            .collect(),
        contributors: resolution.identities.into_iter().collect(),
        anomalies: resolution.anomalies.iter().map(ToString::to_string).collect(),
        providers: notifier.provider_names(),
        recipients: notifier.recipients(build),
    }
}

fn print_list<T: std::fmt::Display>(title: &str, items: &[T]) {
    if items.is_empty() {
        println!("{title}: none");
        return;
    }
    println!("{title}:");
    for item in items {
        println!("  {item}");
    }
}

fn print_text(explanation: &Explanation) {
    println!("build:  {} ({})", explanation.build, explanation.outcome);
    match &explanation.anchor {
        Some(anchor) => println!("anchor: {anchor}"),
        None => println!("anchor: none (no earlier successful build)"),
    }
    let window: Vec<String> = explanation
        .window
        .iter()
        .map(|w| {
            if w.origins.is_empty() {
                format!("{} (no changes)", w.build)
            } else {
                format!("{} <- {}", w.build, w.origins.join(", "))
            }
        })
        .collect();
    print_list("window", &window);
    print_list("contributors", &explanation.contributors);
    print_list("anomalies", &explanation.anomalies);
    print_list("providers", &explanation.providers);
    print_list("recipients", &explanation.recipients);
}

pub fn handle(args: ExplainArgs, state: &State, format: OutputFormat) -> Result<()> {
    let store = state.load_store()?;
    let config = state.load_config()?;
    let build = find_build(&store, &args.build)?;

    let explanation = explain(&store, &config, &build);
    match format {
        OutputFormat::Text => print_text(&explanation),
        OutputFormat::Json => print_json(&explanation)?,
    }
    Ok(())
}

#[cfg(test)]
#[path = "explain_tests.rs"]
mod tests;
