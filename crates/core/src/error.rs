// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

use thiserror::Error;

/// Violations of the job table invariants, detected while decoding.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ModelError {
    #[error("node index array of {len} element(s) has no -1 terminator")]
    UnterminatedIndexArray { len: usize },

    #[error("node index {0} is out of range")]
    InvalidNodeIndex(i64),

    #[error("record count {declared} does not match {actual} record(s)")]
    RecordCountMismatch { declared: usize, actual: usize },
}
