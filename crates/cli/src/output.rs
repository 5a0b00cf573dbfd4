// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

use anyhow::{anyhow, Result};
use clap::ValueEnum;
use ji_core::{render_job, render_table, JobTable};

#[cfg(test)]
#[path = "output_tests.rs"]
mod tests;

#[derive(Clone, Copy, Debug, Default, PartialEq, ValueEnum)]
pub enum OutputFormat {
    #[default]
    Text,
    Json,
}

/// Format a fresh job table, or just one of its jobs.
pub fn format_table(table: &JobTable, job: Option<u32>, format: OutputFormat) -> Result<String> {
    let Some(job_id) = job else {
        return match format {
            OutputFormat::Text => Ok(render_table(table)),
            OutputFormat::Json => Ok(format!("{}\n", serde_json::to_string_pretty(table)?)),
        };
    };

    let record = table
        .find(job_id)
        .ok_or_else(|| anyhow!("job {} not found", job_id))?;
    match format {
        OutputFormat::Text => Ok(render_job(record)),
        OutputFormat::Json => Ok(format!("{}\n", serde_json::to_string_pretty(record)?)),
    }
}

/// Format the "nothing changed" result of an incremental query.
pub fn format_no_change(since: u64, format: OutputFormat) -> Result<String> {
    match format {
        OutputFormat::Text => Ok(format!("No changes since {}\n", since)),
        OutputFormat::Json => Ok(format!(
            "{}\n",
            serde_json::json!({ "changed": false, "last_update": since })
        )),
    }
}
