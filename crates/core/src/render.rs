// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Text rendering of job tables.
//!
//! The layout is consumed by downstream tooling: field labels, their order,
//! and the line breaks are fixed. `Indecies` is spelled as tooling expects.

use std::fmt::{self, Write};

use crate::job::JobRecord;
use crate::table::JobTable;

/// Write the summary line followed by one block per record.
pub fn write_table<W: Write>(out: &mut W, table: &JobTable) -> fmt::Result {
    writeln!(
        out,
        "Jobs updated at {}, record count {}",
        table.last_update,
        table.record_count()
    )?;
    for job in &table.records {
        write_job(out, job)?;
    }
    Ok(())
}

/// Write one job block, terminated by a blank line.
pub fn write_job<W: Write>(out: &mut W, job: &JobRecord) -> fmt::Result {
    writeln!(
        out,
        "JobId={} UserId={} JobState={} TimeLimit={}",
        job.job_id, job.user_id, job.job_state, job.time_limit
    )?;
    writeln!(out, "Priority={} Partition={}", job.priority, job.partition)?;
    writeln!(
        out,
        "   Name={} NodeList={} StartTime={:x} EndTime={:x}",
        job.name,
        job.nodes,
        low_32(job.start_time),
        low_32(job.end_time)
    )?;
    writeln!(out, "NodeListIndecies={}", job.node_inx)?;
    writeln!(
        out,
        "   ReqProcs={} ReqNodes={} Shared={} Contiguous={}",
        job.num_procs,
        job.num_nodes,
        u8::from(job.shared),
        u8::from(job.contiguous)
    )?;
    writeln!(
        out,
        "MinProcs={} MinMemory={} MinTmpDisk={}",
        job.min_procs, job.min_memory, job.min_tmp_disk
    )?;
    writeln!(
        out,
        "   ReqNodeList={} Features={} JobScript={}",
        job.req_nodes, job.features, job.job_script
    )?;
    writeln!(out, "ReqNodeListIndecies={}", job.req_node_inx)?;
    writeln!(out)
}

pub fn render_table(table: &JobTable) -> String {
    let mut buf = String::new();
    // Writing into a String cannot fail
    let _ = write_table(&mut buf, table);
    buf
}

pub fn render_job(job: &JobRecord) -> String {
    let mut buf = String::new();
    let _ = write_job(&mut buf, job);
    buf
}

/// Rendered times keep only the low 32 bits; use the model for full values.
fn low_32(secs: u64) -> u32 {
    (secs & u64::from(u32::MAX)) as u32
}

#[cfg(test)]
#[path = "render_tests.rs"]
mod tests;
