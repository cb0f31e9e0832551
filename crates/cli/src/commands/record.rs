// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! `culprit record` - append a completed build to the journal.

use anyhow::{bail, Result};
use clap::Args;
use culprit_core::{BuildKey, BuildRecord, Cause, Clock, Identity, JobName, Outcome, SystemClock};
use culprit_storage::BuildStore;

use crate::output::{print_json, OutputFormat};
use crate::state::State;

#[derive(Args)]
pub struct RecordArgs {
    /// Job the build belongs to
    pub job: String,

    /// Build result (success, unstable, failure, aborted, not_built)
    #[arg(long)]
    pub outcome: Outcome,

    /// Build number [default: one past the latest recorded build]
    #[arg(long)]
    pub ordinal: Option<u64>,

    /// Contributor in the build's change set, as `Name <email>` or a user id
    #[arg(long = "author", value_name = "AUTHOR")]
    pub authors: Vec<String>,

    /// Upstream build that triggered this one, as `job#N`
    #[arg(long = "upstream", value_name = "JOB#N")]
    pub upstreams: Vec<BuildKey>,

    /// User who started the build by hand
    #[arg(long, value_name = "USER")]
    pub user: Option<String>,

    /// Started by source-control polling or a push hook
    #[arg(long)]
    pub scm: bool,

    /// Started by a periodic schedule
    #[arg(long)]
    pub timer: bool,
}

impl RecordArgs {
    fn causes(&self) -> Vec<Cause> {
        let mut causes: Vec<Cause> =
            self.upstreams.iter().map(|build| Cause::Upstream { build: build.clone() }).collect();
        if let Some(user_id) = &self.user {
            causes.push(Cause::User { user_id: user_id.clone() });
        }
        if self.scm {
            causes.push(Cause::Scm);
        }
        if self.timer {
            causes.push(Cause::Timer);
        }
        causes
    }

    /// The record this invocation describes, numbered against `store`.
    pub fn to_record(&self, store: &BuildStore, clock: &impl Clock) -> Result<BuildRecord> {
        let job = JobName::new(self.job.trim());
        if job.is_empty() {
            bail!("job name must not be empty");
        }
        let ordinal = match self.ordinal {
            Some(ordinal) => ordinal,
            None => match store.next_ordinal(&job) {
                Some(next) => next,
                None => bail!("{job} has no build numbers left"),
            },
        };
        if ordinal == 0 {
            bail!("build numbers start at 1");
        }
        Ok(BuildRecord {
            job,
            ordinal,
            outcome: self.outcome,
            change_set: self.authors.iter().map(|a| Identity::parse(a)).collect(),
            causes: self.causes(),
            completed_at_ms: clock.epoch_ms(),
        })
    }
}

pub fn handle(args: RecordArgs, state: &State, format: OutputFormat) -> Result<()> {
    let store = state.load_store()?;
    let record = args.to_record(&store, &SystemClock)?;

    // Validate against the replayed history before anything reaches disk
    store.append(record.clone())?;
    let seq = state.open_journal()?.append(&record)?;
    tracing::debug!(build = %record.key(), seq, "recorded build");

    match format {
        OutputFormat::Text => println!("{}", record.key()),
        OutputFormat::Json => print_json(&record)?,
    }
    Ok(())
}

#[cfg(test)]
#[path = "record_tests.rs"]
mod tests;
