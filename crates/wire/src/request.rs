// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

use serde::{Deserialize, Serialize};

/// Request from client to controller
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(tag = "type")]
pub enum Request {
    /// Job table, if anything changed after `last_update`.
    ///
    /// `0` asks for the full table.
    JobInfo { last_update: u64 },
}
