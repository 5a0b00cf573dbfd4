// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Job table snapshot returned by a successful query.

use serde::{Deserialize, Serialize};

use crate::error::ModelError;
use crate::job::JobRecord;

/// A snapshot of job state as of `last_update`.
///
/// `records` keeps the controller's order. The record count is always
/// `records.len()`; the wire form's `record_count` is checked against it on
/// decode and derived from it on encode.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "JobTableWire", into = "JobTableWire")]
pub struct JobTable {
    pub last_update: u64,
    pub records: Vec<JobRecord>,
}

impl JobTable {
    pub fn new(last_update: u64, records: Vec<JobRecord>) -> Self {
        Self {
            last_update,
            records,
        }
    }

    pub fn record_count(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// Look up a record by job id.
    pub fn find(&self, job_id: u32) -> Option<&JobRecord> {
        self.records.iter().find(|r| r.job_id == job_id)
    }
}

#[derive(Serialize, Deserialize)]
struct JobTableWire {
    last_update: u64,
    record_count: usize,
    #[serde(default)]
    records: Vec<JobRecord>,
}

impl TryFrom<JobTableWire> for JobTable {
    type Error = ModelError;

    fn try_from(wire: JobTableWire) -> Result<Self, Self::Error> {
        if wire.record_count != wire.records.len() {
            return Err(ModelError::RecordCountMismatch {
                declared: wire.record_count,
                actual: wire.records.len(),
            });
        }
        Ok(Self::new(wire.last_update, wire.records))
    }
}

impl From<JobTable> for JobTableWire {
    fn from(table: JobTable) -> Self {
        Self {
            last_update: table.last_update,
            record_count: table.records.len(),
            records: table.records,
        }
    }
}

#[cfg(test)]
#[path = "table_tests.rs"]
mod tests;
