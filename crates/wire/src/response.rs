// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

use ji_core::JobTable;
use serde::{Deserialize, Serialize};

/// Response from controller to client
///
/// Marked non-exhaustive so consumers always carry a default arm for
/// message kinds added later.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(tag = "type")]
#[non_exhaustive]
pub enum Response {
    /// Job table snapshot (`last_update`, `record_count`, `records`)
    JobInfo(JobTable),

    /// Bare status code: 0 for "nothing changed", anything else is a failure
    ReturnCode { code: i32 },

    /// Any message kind this client does not handle; payload is discarded
    #[serde(other)]
    Unknown,
}

impl Response {
    /// Message kind, for diagnostics
    pub fn kind(&self) -> &'static str {
        match self {
            Response::JobInfo(_) => "JobInfo",
            Response::ReturnCode { .. } => "ReturnCode",
            Response::Unknown => "Unknown",
        }
    }
}
