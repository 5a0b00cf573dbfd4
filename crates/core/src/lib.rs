// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

// Allow panic!/unwrap/expect in test code
#![cfg_attr(test, allow(clippy::panic))]
#![cfg_attr(test, allow(clippy::unwrap_used))]
#![cfg_attr(test, allow(clippy::expect_used))]

//! ji-core: job table model and text rendering for the ji client

pub mod error;
pub mod job;
pub mod node_index;
pub mod render;
pub mod table;

pub use error::ModelError;
pub use job::{JobRecord, JobState};
pub use node_index::NodeIndices;
pub use render::{render_job, render_table, write_job, write_table};
pub use table::JobTable;

#[cfg(any(test, feature = "test-support"))]
pub use job::JobRecordBuilder;
