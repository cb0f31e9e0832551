// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! `culprit recipients` - who to notify about a build.

use anyhow::Result;
use clap::Args;
use culprit_core::BuildKey;
use culprit_engine::Notifier;
use serde::Serialize;

use crate::output::{print_json, OutputFormat};
use crate::state::{find_build, State};

#[derive(Args)]
pub struct RecipientsArgs {
    /// Build to notify about, as `job#N`
    #[arg(value_name = "JOB#N")]
    pub build: BuildKey,

    /// List contributor identities instead of resolved addresses
    #[arg(long)]
    pub identities: bool,
}

#[derive(Serialize)]
struct RecipientsOutput {
    build: String,
    recipients: Vec<String>,
}

pub fn handle(args: RecipientsArgs, state: &State, format: OutputFormat) -> Result<()> {
    let store = state.load_store()?;
    let config = state.load_config()?;
    let build = find_build(&store, &args.build)?;

    let notifier = Notifier::from_config(&store, &config);
    let recipients: Vec<String> = if args.identities {
        notifier.identities(&build).iter().map(ToString::to_string).collect()
    } else {
        notifier.recipients(&build).iter().map(ToString::to_string).collect()
    };

    match format {
        OutputFormat::Text => {
            for recipient in &recipients {
                println!("{recipient}");
            }
        }
        OutputFormat::Json => {
            print_json(&RecipientsOutput { build: args.build.to_string(), recipients })?
        }
    }
    Ok(())
}
