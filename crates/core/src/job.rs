// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Job records as reported by the controller.

use serde::{Deserialize, Serialize};
use std::fmt;

use crate::node_index::NodeIndices;

/// Scheduling state of a job.
///
/// Carried on the wire as its numeric code. Codes this client does not know
/// are kept as `Unknown` rather than failing the whole table.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "u16", into = "u16")]
pub enum JobState {
    Pending,
    StageIn,
    Running,
    StageOut,
    Complete,
    Failed,
    Timeout,
    End,
    Unknown(u16),
}

impl JobState {
    /// Name used in rendered output.
    pub fn as_str(&self) -> &'static str {
        match self {
            JobState::Pending => "PENDING",
            JobState::StageIn => "STAGE_IN",
            JobState::Running => "RUNNING",
            JobState::StageOut => "STAGE_OUT",
            JobState::Complete => "COMPLETE",
            JobState::Failed => "FAILED",
            JobState::Timeout => "TIMEOUT",
            JobState::End => "END",
            JobState::Unknown(_) => "?",
        }
    }

    /// Whether the job has stopped running for good.
    pub fn is_terminal(&self) -> bool {
        matches!(
            self,
            JobState::Complete | JobState::Failed | JobState::Timeout | JobState::End
        )
    }
}

impl From<u16> for JobState {
    fn from(code: u16) -> Self {
        match code {
            0 => JobState::Pending,
            1 => JobState::StageIn,
            2 => JobState::Running,
            3 => JobState::StageOut,
            4 => JobState::Complete,
            5 => JobState::Failed,
            6 => JobState::Timeout,
            7 => JobState::End,
            other => JobState::Unknown(other),
        }
    }
}

impl From<JobState> for u16 {
    fn from(state: JobState) -> Self {
        match state {
            JobState::Pending => 0,
            JobState::StageIn => 1,
            JobState::Running => 2,
            JobState::StageOut => 3,
            JobState::Complete => 4,
            JobState::Failed => 5,
            JobState::Timeout => 6,
            JobState::End => 7,
            JobState::Unknown(code) => code,
        }
    }
}

impl fmt::Display for JobState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One job's complete state snapshot.
///
/// Field order matches the record layout on the wire: identity and state,
/// name and placement, node indices, resource request, requested node
/// indices, features and script.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct JobRecord {
    pub job_id: u32,
    pub user_id: u32,
    pub job_state: JobState,
    pub time_limit: u32,
    pub priority: u32,
    pub partition: String,

    pub name: String,
    pub nodes: String,
    /// Seconds since the epoch
    pub start_time: u64,
    /// Seconds since the epoch
    pub end_time: u64,
    #[serde(default)]
    pub node_inx: NodeIndices,

    pub num_procs: u32,
    pub num_nodes: u32,
    pub shared: bool,
    pub contiguous: bool,
    pub min_procs: u32,
    pub min_memory: u32,
    pub min_tmp_disk: u32,
    pub req_nodes: String,
    #[serde(default)]
    pub req_node_inx: NodeIndices,

    pub features: String,
    pub job_script: String,
}

/// Builder for `JobRecord` with test defaults.
#[cfg(any(test, feature = "test-support"))]
pub struct JobRecordBuilder {
    record: JobRecord,
}

#[cfg(any(test, feature = "test-support"))]
impl Default for JobRecordBuilder {
    fn default() -> Self {
        Self {
            record: JobRecord {
                job_id: 1,
                user_id: 1000,
                job_state: JobState::Pending,
                time_limit: 60,
                priority: 1,
                partition: "batch".to_string(),
                name: "job".to_string(),
                nodes: String::new(),
                start_time: 0,
                end_time: 0,
                node_inx: NodeIndices::Absent,
                num_procs: 1,
                num_nodes: 1,
                shared: false,
                contiguous: false,
                min_procs: 1,
                min_memory: 0,
                min_tmp_disk: 0,
                req_nodes: String::new(),
                req_node_inx: NodeIndices::Absent,
                features: String::new(),
                job_script: "/bin/true".to_string(),
            },
        }
    }
}

#[cfg(any(test, feature = "test-support"))]
impl JobRecordBuilder {
    pub fn job_id(mut self, v: u32) -> Self {
        self.record.job_id = v;
        self
    }
    pub fn user_id(mut self, v: u32) -> Self {
        self.record.user_id = v;
        self
    }
    pub fn state(mut self, v: JobState) -> Self {
        self.record.job_state = v;
        self
    }
    pub fn time_limit(mut self, v: u32) -> Self {
        self.record.time_limit = v;
        self
    }
    pub fn priority(mut self, v: u32) -> Self {
        self.record.priority = v;
        self
    }
    pub fn partition(mut self, v: impl Into<String>) -> Self {
        self.record.partition = v.into();
        self
    }
    pub fn name(mut self, v: impl Into<String>) -> Self {
        self.record.name = v.into();
        self
    }
    pub fn nodes(mut self, v: impl Into<String>, inx: NodeIndices) -> Self {
        self.record.nodes = v.into();
        self.record.node_inx = inx;
        self
    }
    pub fn times(mut self, start: u64, end: u64) -> Self {
        self.record.start_time = start;
        self.record.end_time = end;
        self
    }
    pub fn procs(mut self, num_procs: u32, num_nodes: u32, min_procs: u32) -> Self {
        self.record.num_procs = num_procs;
        self.record.num_nodes = num_nodes;
        self.record.min_procs = min_procs;
        self
    }
    pub fn shared(mut self, v: bool) -> Self {
        self.record.shared = v;
        self
    }
    pub fn contiguous(mut self, v: bool) -> Self {
        self.record.contiguous = v;
        self
    }
    pub fn memory(mut self, min_memory: u32, min_tmp_disk: u32) -> Self {
        self.record.min_memory = min_memory;
        self.record.min_tmp_disk = min_tmp_disk;
        self
    }
    pub fn req_nodes(mut self, v: impl Into<String>, inx: NodeIndices) -> Self {
        self.record.req_nodes = v.into();
        self.record.req_node_inx = inx;
        self
    }
    pub fn features(mut self, v: impl Into<String>) -> Self {
        self.record.features = v.into();
        self
    }
    pub fn job_script(mut self, v: impl Into<String>) -> Self {
        self.record.job_script = v.into();
        self
    }
    pub fn build(self) -> JobRecord {
        self.record
    }
}

#[cfg(any(test, feature = "test-support"))]
impl JobRecord {
    /// Create a builder with test defaults.
    pub fn builder() -> JobRecordBuilder {
        JobRecordBuilder::default()
    }
}

#[cfg(test)]
#[path = "job_tests.rs"]
mod tests;
