// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

// Allow panic!/unwrap/expect in test code
#![cfg_attr(test, allow(clippy::panic))]
#![cfg_attr(test, allow(clippy::unwrap_used))]
#![cfg_attr(test, allow(clippy::expect_used))]

//! `culprit` - record builds and work out who to tell when they break.

mod commands;
mod env;
mod exit_error;
mod output;
mod state;

use anyhow::Result;
use clap::{Parser, Subcommand};
use std::path::PathBuf;
use tracing_subscriber::{filter::LevelFilter, EnvFilter};

use crate::commands::{explain, history, recipients, record};
use crate::exit_error::ExitError;
use crate::output::OutputFormat;
use crate::state::State;

#[derive(Parser)]
#[command(
    name = "culprit",
    version,
    about = "Find who to notify about a build, through upstream jobs"
)]
struct Cli {
    /// Directory holding the build journal [default: $CULPRIT_STATE_DIR,
    /// $XDG_STATE_HOME/culprit, or ~/.local/state/culprit]
    #[arg(long, global = true, value_name = "DIR")]
    state_dir: Option<PathBuf>,

    /// Notification config [default: $CULPRIT_CONFIG or <state-dir>/config.toml]
    #[arg(long, global = true, value_name = "FILE")]
    config: Option<PathBuf>,

    #[arg(short = 'o', long = "output", value_enum, default_value_t, global = true)]
    output: OutputFormat,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Record a completed build
    Record(record::RecordArgs),
    /// Show recorded builds
    History(history::HistoryArgs),
    /// Print the addresses to notify about a build
    Recipients(recipients::RecipientsArgs),
    /// Show how the recipients of a build were worked out
    Explain(explain::ExplainArgs),
}

fn init_tracing() {
    let filter = EnvFilter::builder()
        .with_default_directive(LevelFilter::WARN.into())
        .with_env_var(env::LOG_ENV)
        .from_env_lossy();

    tracing_subscriber::fmt().with_env_filter(filter).with_writer(std::io::stderr).init();
}

fn run(cli: Cli) -> Result<()> {
    let state = State::resolve(cli.state_dir, cli.config)?;
    let format = cli.output;

    match cli.command {
        Command::Record(args) => record::handle(args, &state, format),
        Command::History(args) => history::handle(args, &state, format),
        Command::Recipients(args) => recipients::handle(args, &state, format),
        Command::Explain(args) => explain::handle(args, &state, format),
    }
}

fn main() {
    let cli = Cli::parse();
    init_tracing();

    if let Err(err) = run(cli) {
        let code = err.downcast_ref::<ExitError>().map_or(1, |e| e.code);
        eprintln!("error: {err:#}");
        std::process::exit(code);
    }
}
