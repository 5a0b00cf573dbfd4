// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! `ji jobs` command handler

use std::time::Duration;

use anyhow::Result;
use clap::Args;
use ji_client::JobsUpdate;
use ji_core::JobTable;

use crate::client::{ClientError, ControllerClient};
use crate::exit_error::{ExitError, EXIT_UNREACHABLE};
use crate::output::{format_no_change, format_table, OutputFormat};
use crate::poll::{Poller, Tick};

#[derive(Args, Debug)]
pub struct JobsArgs {
    /// Only fetch jobs if the table changed after this update time
    #[arg(long, default_value_t = 0)]
    pub since: u64,

    /// Show a single job by id
    #[arg(long = "job")]
    pub job: Option<u32>,

    /// Poll the controller every N seconds, printing each new table
    #[arg(long, value_name = "SECS")]
    pub watch: Option<u64>,

    /// Stop watching after this many polls
    #[arg(long, requires = "watch")]
    pub count: Option<usize>,
}

pub async fn handle(args: JobsArgs, client: &ControllerClient, format: OutputFormat) -> Result<()> {
    match args.watch {
        None => {
            let update = fetch(client, args.since).await?;
            print!("{}", format_update(&update, args.since, args.job, format)?);
            Ok(())
        }
        Some(secs) => watch(&args, client, format, Duration::from_secs(secs)).await,
    }
}

async fn watch(
    args: &JobsArgs,
    client: &ControllerClient,
    format: OutputFormat,
    interval: Duration,
) -> Result<()> {
    let mut poller = Poller::new(interval, args.count);
    let mut since = args.since;
    let mut snapshot: Option<JobTable> = None;
    let mut polls = 0usize;

    loop {
        match poller.tick().await {
            Tick::Ready => {}
            Tick::Done => return Ok(()),
            Tick::Interrupted => {
                tracing::debug!(polls, "watch interrupted");
                return Ok(());
            }
        }

        let update = fetch(client, since).await?;
        polls += 1;

        // Later polls stay quiet while nothing changes.
        if polls == 1 || update.table().is_some() {
            print!("{}", format_update(&update, since, args.job, format)?);
        } else {
            tracing::debug!(since, "no job changes");
        }

        snapshot = update.merge_into(snapshot);
        if let Some(table) = &snapshot {
            since = table.last_update;
        }
    }
}

async fn fetch(client: &ControllerClient, since: u64) -> Result<JobsUpdate> {
    client.jobs(since).await.map_err(|e| unreachable_exit(e, client))
}

fn unreachable_exit(err: ClientError, client: &ControllerClient) -> anyhow::Error {
    if err.is_connection() {
        anyhow::Error::new(ExitError::new(
            EXIT_UNREACHABLE,
            format!("{} (controller {})", err, client.addr()),
        ))
    } else {
        err.into()
    }
}

fn format_update(
    update: &JobsUpdate,
    since: u64,
    job: Option<u32>,
    format: OutputFormat,
) -> Result<String> {
    match update {
        JobsUpdate::Updated(table) => format_table(table, job, format),
        JobsUpdate::NoChange => format_no_change(since, format),
    }
}

#[cfg(test)]
#[path = "jobs_tests.rs"]
mod tests;
