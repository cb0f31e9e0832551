// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! `culprit history` - list jobs, or the builds of one job.

use anyhow::Result;
use clap::Args;
use culprit_core::{BuildRecord, Clock, JobName, SystemClock};
use culprit_storage::BuildStore;
use serde::Serialize;
use std::sync::Arc;

use crate::output::{column_width, format_time_ago, print_json, OutputFormat};
use crate::state::State;

#[derive(Args)]
pub struct HistoryArgs {
    /// Job to show; omit to list every job
    pub job: Option<String>,

    /// Show only the most recent N builds
    #[arg(long, short = 'n')]
    pub limit: Option<usize>,
}

#[derive(Debug, Serialize)]
pub struct JobSummary {
    pub job: JobName,
    pub builds: usize,
    pub latest: Option<BuildRecord>,
}

pub fn job_summaries(store: &BuildStore) -> Vec<JobSummary> {
    store
        .jobs()
        .into_iter()
        .map(|job| {
            let builds = store.history(&job).len();
            let latest = store.latest(&job).map(|b| (*b).clone());
            JobSummary { job, builds, latest }
        })
        .collect()
}

/// Builds of `job`, oldest first, keeping only the last `limit`.
pub fn recent_builds(
    store: &BuildStore,
    job: &JobName,
    limit: Option<usize>,
) -> Vec<Arc<BuildRecord>> {
    let mut builds = store.history(job);
    if let Some(limit) = limit {
        let skip = builds.len().saturating_sub(limit);
        builds.drain(..skip);
    }
    builds
}

pub fn handle(args: HistoryArgs, state: &State, format: OutputFormat) -> Result<()> {
    let store = state.load_store()?;
    let now_ms = SystemClock.epoch_ms();

    let Some(job) = args.job else {
        let jobs = job_summaries(&store);
        return match format {
            OutputFormat::Json => print_json(&jobs),
            OutputFormat::Text => {
                print_jobs(&jobs, now_ms);
                Ok(())
            }
        };
    };

    let builds = recent_builds(&store, &JobName::new(job.trim()), args.limit);
    match format {
        OutputFormat::Json => {
            let records: Vec<&BuildRecord> = builds.iter().map(Arc::as_ref).collect();
            print_json(&records)?;
        }
        OutputFormat::Text => {
            if builds.is_empty() {
                println!("No builds recorded for {}", job.trim());
            } else {
                print_builds(&builds, now_ms);
            }
        }
    }
    Ok(())
}

fn print_jobs(jobs: &[JobSummary], now_ms: u64) {
    if jobs.is_empty() {
        println!("No builds recorded");
        return;
    }
    let job_w = column_width("JOB", jobs.iter().map(|j| j.job.as_str()));
    println!("{:<job_w$}  {:>6}  {:<14}  COMPLETED", "JOB", "BUILDS", "LATEST");
    for summary in jobs {
        let (latest, completed) = match &summary.latest {
            Some(b) => (
                format!("#{} {}", b.ordinal, b.outcome),
                format_time_ago(b.completed_at_ms, now_ms),
            ),
            None => ("-".to_string(), "-".to_string()),
        };
        println!("{:<job_w$}  {:>6}  {:<14}  {}", summary.job, summary.builds, latest, completed);
    }
}

fn print_builds(builds: &[Arc<BuildRecord>], now_ms: u64) {
    let keys: Vec<String> = builds.iter().map(|b| b.key().to_string()).collect();
    let key_w = column_width("BUILD", keys.iter().map(String::as_str));
    println!("{:<key_w$}  {:<9}  {:<10}  CAUSES / CHANGES", "BUILD", "OUTCOME", "COMPLETED");
    for (build, key) in builds.iter().zip(&keys) {
        let causes: Vec<String> = build.causes.iter().map(ToString::to_string).collect();
        let changes: Vec<String> = build.change_set.iter().map(ToString::to_string).collect();
        let detail = match (causes.is_empty(), changes.is_empty()) {
            (true, true) => "-".to_string(),
            (false, true) => causes.join(", "),
            (true, false) => changes.join(", "),
            (false, false) => format!("{} / {}", causes.join(", "), changes.join(", ")),
        };
        println!(
            "{:<key_w$}  {:<9}  {:<10}  {}",
            key,
            build.outcome.to_string(),
            format_time_ago(build.completed_at_ms, now_ms),
            detail
        );
    }
}

#[cfg(test)]
#[path = "history_tests.rs"]
mod tests;
